use nalgebra::Vector2;

/// Horizontal shear factor of the isometric transform.
pub const ISO_X_SCALE: f32 = 0.7;
/// Vertical shear factor of the isometric transform.
pub const ISO_Y_SCALE: f32 = 0.35;

fn iso(point: Vector2<f32>, zoom: f32) -> Vector2<f32> {
    Vector2::new(
        (point.x - point.y) * ISO_X_SCALE * zoom,
        (point.x + point.y) * ISO_Y_SCALE * zoom,
    )
}

/// Projects a field-space point to screen space.
///
/// The camera's own projected position is subtracted and half the viewport
/// added, so the camera point always lands at the viewport centre. Pure
/// function, no hidden state.
pub fn project(
    point: Vector2<f32>,
    camera: Vector2<f32>,
    zoom: f32,
    viewport: Vector2<f32>,
) -> Vector2<f32> {
    iso(point, zoom) - iso(camera, zoom) + viewport / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_point_projects_to_viewport_centre() {
        let viewport = Vector2::new(800.0, 600.0);

        for &(x, y) in &[(0.0, 0.0), (75.0, 50.0), (-13.5, 99.0), (150.0, 0.25)] {
            let point = Vector2::new(x, y);
            let projected = project(point, point, 12.0, viewport);

            assert_eq!(projected, viewport / 2.0);
        }
    }

    #[test]
    fn centre_round_trip_holds_for_any_positive_zoom() {
        let viewport = Vector2::new(1024.0, 768.0);
        let point = Vector2::new(42.0, 17.0);

        for &zoom in &[0.5, 1.0, 12.0, 64.0] {
            assert_eq!(project(point, point, zoom, viewport), viewport / 2.0);
        }
    }

    #[test]
    fn unit_step_shears_by_iso_factors() {
        let origin = Vector2::zeros();
        let viewport = Vector2::zeros();

        let projected = project(Vector2::new(1.0, 0.0), origin, 1.0, viewport);

        assert_eq!(projected, Vector2::new(ISO_X_SCALE, ISO_Y_SCALE));
    }

    #[test]
    fn x_and_y_steps_land_on_mirrored_screen_columns() {
        let origin = Vector2::zeros();
        let viewport = Vector2::zeros();

        let along_x = project(Vector2::new(1.0, 0.0), origin, 12.0, viewport);
        let along_y = project(Vector2::new(0.0, 1.0), origin, 12.0, viewport);

        assert_eq!(along_x.x, -along_y.x);
        assert_eq!(along_x.y, along_y.y);
    }
}
