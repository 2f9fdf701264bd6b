use nalgebra::Vector2;

/// Snapshot of the held keys for a single tick.
///
/// The frontend fills this from its keyboard capability every frame. There
/// is no buffering: only current-frame held state is visible to the engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,

    /// Full-power shot.
    pub shoot: bool,
    /// Standard pass.
    pub pass: bool,
    /// Lobbed shot at 0.8x shot speed.
    pub lob: bool,
    /// Grounded through ball, horizontal only.
    pub through: bool,
}

impl InputState {
    pub fn any_action(&self) -> bool {
        self.shoot || self.pass || self.lob || self.through
    }

    /// Unit-length direction read from the held arrows, falling back to
    /// `default` when none are held. A zero resolution (no arrows and a
    /// zero default) yields the zero vector rather than NaN.
    pub fn direction(&self, default: Vector2<f32>) -> Vector2<f32> {
        let mut direction = Vector2::zeros();

        if self.up {
            direction.y -= 1.0;
        }
        if self.down {
            direction.y += 1.0;
        }
        if self.left {
            direction.x -= 1.0;
        }
        if self.right {
            direction.x += 1.0;
        }

        if direction.x == 0.0 && direction.y == 0.0 {
            direction = default;
        }

        let magnitude = direction.norm();
        if magnitude == 0.0 {
            return Vector2::zeros();
        }

        direction / magnitude
    }
}
