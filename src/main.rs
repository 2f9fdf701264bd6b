use engine::{
    Agent, FIELD_HEIGHT, FIELD_WIDTH, GOAL_BAND_MAX, GOAL_BAND_MIN, GOAL_DEPTH, InputState,
    MatchEngine, MatchPhase, Team, Vector2, project,
};
use env_logger::Env;
use log::info;
use macroquad::prelude::*;

/// World-to-screen magnification of the isometric view.
const ZOOM: f32 = 12.0;

const PITCH_GREEN: Color = Color::new(0.0, 0.4, 0.0, 1.0);
const LINE_WHITE: Color = Color::new(1.0, 1.0, 1.0, 0.8);
const LEFT_BLUE: Color = Color::new(0.2, 0.4, 1.0, 1.0);
const RIGHT_RED: Color = Color::new(1.0, 0.25, 0.2, 1.0);

fn window_conf() -> Conf {
    Conf {
        window_title: "isokick".to_string(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut engine = MatchEngine::new();

    info!("match started, {:?} kicks off", engine.context.kickoff.team);

    loop {
        let input = read_input();
        let delta_ms = ((get_frame_time() * 1000.0) as u64).max(1);

        engine.tick(&input, delta_ms);

        let viewport = Vector2::new(screen_width(), screen_height());
        let camera = engine.camera;

        clear_background(PITCH_GREEN);

        draw_pitch(camera, viewport);
        draw_agents(&engine.field.agents, camera, viewport);
        draw_ball(&engine, camera, viewport);
        draw_hud(&engine);

        next_frame().await;
    }
}

fn read_input() -> InputState {
    InputState {
        up: is_key_down(KeyCode::Up),
        down: is_key_down(KeyCode::Down),
        left: is_key_down(KeyCode::Left),
        right: is_key_down(KeyCode::Right),
        pass: is_key_down(KeyCode::S),
        shoot: is_key_down(KeyCode::D),
        lob: is_key_down(KeyCode::Q),
        through: is_key_down(KeyCode::Z),
    }
}

fn to_screen(point: Vector2<f32>, camera: Vector2<f32>, viewport: Vector2<f32>) -> (f32, f32) {
    let projected = project(point, camera, ZOOM, viewport);
    (projected.x, projected.y)
}

fn field_line(
    from: Vector2<f32>,
    to: Vector2<f32>,
    camera: Vector2<f32>,
    viewport: Vector2<f32>,
    color: Color,
) {
    let (x1, y1) = to_screen(from, camera, viewport);
    let (x2, y2) = to_screen(to, camera, viewport);

    draw_line(x1, y1, x2, y2, 2.0, color);
}

fn draw_pitch(camera: Vector2<f32>, viewport: Vector2<f32>) {
    let corners = [
        Vector2::new(0.0, 0.0),
        Vector2::new(FIELD_WIDTH, 0.0),
        Vector2::new(FIELD_WIDTH, FIELD_HEIGHT),
        Vector2::new(0.0, FIELD_HEIGHT),
    ];

    for i in 0..corners.len() {
        field_line(corners[i], corners[(i + 1) % 4], camera, viewport, LINE_WHITE);
    }

    field_line(
        Vector2::new(FIELD_WIDTH / 2.0, 0.0),
        Vector2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT),
        camera,
        viewport,
        LINE_WHITE,
    );

    let (cx, cy) = to_screen(
        Vector2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0),
        camera,
        viewport,
    );
    draw_circle_lines(cx, cy, 40.0, 2.0, LINE_WHITE);

    draw_goal_net(0.0, -GOAL_DEPTH, camera, viewport);
    draw_goal_net(FIELD_WIDTH, FIELD_WIDTH + GOAL_DEPTH, camera, viewport);
}

/// Lattice net behind a goal line: the frame plus a few evenly spaced
/// strings in both directions, interpolated in screen space.
fn draw_goal_net(line_x: f32, back_x: f32, camera: Vector2<f32>, viewport: Vector2<f32>) {
    const DIVISIONS: u32 = 5;

    let posts = [
        Vector2::new(line_x, GOAL_BAND_MIN),
        Vector2::new(line_x, GOAL_BAND_MAX),
        Vector2::new(back_x, GOAL_BAND_MAX),
        Vector2::new(back_x, GOAL_BAND_MIN),
    ];

    for i in 0..posts.len() {
        field_line(posts[i], posts[(i + 1) % 4], camera, viewport, LINE_WHITE);
    }

    for step in 1..DIVISIONS {
        let t = step as f32 / DIVISIONS as f32;

        let along = GOAL_BAND_MIN + (GOAL_BAND_MAX - GOAL_BAND_MIN) * t;
        field_line(
            Vector2::new(line_x, along),
            Vector2::new(back_x, along),
            camera,
            viewport,
            LINE_WHITE,
        );

        let depth = line_x + (back_x - line_x) * t;
        field_line(
            Vector2::new(depth, GOAL_BAND_MIN),
            Vector2::new(depth, GOAL_BAND_MAX),
            camera,
            viewport,
            LINE_WHITE,
        );
    }
}

fn draw_agents(agents: &[Agent], camera: Vector2<f32>, viewport: Vector2<f32>) {
    for agent in agents {
        let (x, y) = to_screen(agent.position, camera, viewport);

        let color = if agent.is_goalkeeper {
            BLACK
        } else if agent.team == Team::Left {
            LEFT_BLUE
        } else {
            RIGHT_RED
        };

        draw_circle(x, y, 8.0, color);

        if agent.has_ball {
            draw_circle_lines(x, y, 11.0, 2.0, YELLOW);
        }

        if agent.controlled {
            draw_circle_lines(x, y, 14.0, 1.0, WHITE);
        }
    }
}

fn draw_ball(engine: &MatchEngine, camera: Vector2<f32>, viewport: Vector2<f32>) {
    let (x, y) = to_screen(engine.field.ball.position, camera, viewport);
    draw_circle(x, y, 4.0, WHITE);
}

fn draw_hud(engine: &MatchEngine) {
    let score = format!(
        "{} : {}",
        engine.context.score.left(),
        engine.context.score.right()
    );
    draw_text(&score, 10.0, 30.0, 32.0, WHITE);

    if engine.context.phase == MatchPhase::Kickoff {
        let side = match engine.context.kickoff.team {
            Team::Left => "left",
            Team::Right => "right",
        };

        let banner = if engine.context.kickoff.first {
            format!("Kick-off ({})", side)
        } else {
            format!("Restart ({})", side)
        };

        let width = measure_text(&banner, None, 40, 1.0).width;
        draw_text(
            &banner,
            (screen_width() - width) / 2.0,
            60.0,
            40.0,
            YELLOW,
        );
    }
}
