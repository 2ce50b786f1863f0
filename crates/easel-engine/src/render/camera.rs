use cgmath::{Deg, Matrix4, Point3, Vector3, ortho, perspective};

use crate::platform::WindowMode;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Vertical field of view of the 3D camera.
const FOV_Y: Deg<f32> = Deg(60.0);

/// Depth range of the flat camera, in pixels either side of z = 0.
const FLAT_DEPTH: f32 = 1000.0;

#[rustfmt::skip]
const FLIP_Y: Matrix4<f32> = Matrix4::new(
    1.0,  0.0, 0.0, 0.0,
    0.0, -1.0, 0.0, 0.0,
    0.0,  0.0, 1.0, 0.0,
    0.0,  0.0, 0.0, 1.0,
);

/// Pixel space to wgpu clip space for a `width` x `height` window.
///
/// In both modes the z = 0 plane maps exactly onto the window: `(0, 0)` is the
/// top-left corner and `(width, height)` the bottom-right.
///
/// The 3D camera sits on the window's center axis at the distance where a 60°
/// vertical field of view spans the window height, looking down -Z. Near and
/// far planes are a tenth and ten times that distance.
pub fn view_projection(width: f32, height: f32, mode: WindowMode) -> Matrix4<f32> {
    let width = width.max(1.0);
    let height = height.max(1.0);

    match mode {
        WindowMode::TwoD => {
            OPENGL_TO_WGPU_MATRIX * ortho(0.0, width, height, 0.0, -FLAT_DEPTH, FLAT_DEPTH)
        }
        WindowMode::ThreeD => {
            let half_fov: cgmath::Rad<f32> = (FOV_Y / 2.0).into();
            let distance = (height / 2.0) / half_fov.0.tan();
            let cx = width / 2.0;
            let cy = height / 2.0;

            let view = Matrix4::look_at_rh(
                Point3::new(cx, cy, distance),
                Point3::new(cx, cy, 0.0),
                Vector3::unit_y(),
            );
            let proj = perspective(FOV_Y, width / height, distance / 10.0, distance * 10.0);

            // Pixel rows grow downward, so flip after projection.
            OPENGL_TO_WGPU_MATRIX * FLIP_Y * proj * view
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    fn ndc(m: Matrix4<f32>, x: f32, y: f32, z: f32) -> (f32, f32, f32) {
        let clip = m * Vector4::new(x, y, z, 1.0);
        (clip.x / clip.w, clip.y / clip.w, clip.z / clip.w)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn flat_corners_map_to_ndc_corners() {
        let m = view_projection(800.0, 600.0, WindowMode::TwoD);

        let (x, y, _) = ndc(m, 0.0, 0.0, 0.0);
        assert!(approx(x, -1.0) && approx(y, 1.0));

        let (x, y, z) = ndc(m, 800.0, 600.0, 0.0);
        assert!(approx(x, 1.0) && approx(y, -1.0));
        assert!((0.0..=1.0).contains(&z));
    }

    #[test]
    fn perspective_z0_plane_matches_window() {
        let m = view_projection(1280.0, 720.0, WindowMode::ThreeD);

        let (x, y, _) = ndc(m, 640.0, 360.0, 0.0);
        assert!(approx(x, 0.0) && approx(y, 0.0));

        let (x, y, _) = ndc(m, 0.0, 0.0, 0.0);
        assert!(approx(x, -1.0), "x = {x}");
        assert!(approx(y, 1.0), "y = {y}");

        let (x, y, z) = ndc(m, 1280.0, 720.0, 0.0);
        assert!(approx(x, 1.0) && approx(y, -1.0));
        assert!((0.0..=1.0).contains(&z));
    }

    #[test]
    fn nearer_points_have_smaller_depth() {
        let m = view_projection(400.0, 400.0, WindowMode::ThreeD);
        let (_, _, far) = ndc(m, 200.0, 200.0, -50.0);
        let (_, _, near) = ndc(m, 200.0, 200.0, 50.0);
        assert!(near < far);
    }

    #[test]
    fn zero_size_does_not_produce_nan() {
        let m = view_projection(0.0, 0.0, WindowMode::ThreeD);
        let (x, y, z) = ndc(m, 0.0, 0.0, 0.0);
        assert!(x.is_finite() && y.is_finite() && z.is_finite());
    }
}
