use glam::{Mat4, Vec3};

pub const START_RADIUS: f32 = 18.0;
pub const START_PITCH: f32 = 45.0;
pub const START_YAW: f32 = 45.0;
pub const MIN_RADIUS: f32 = 5.0;
pub const MAX_RADIUS: f32 = 50.0;
pub const PITCH_LIMIT: f32 = 89.0;
/// Degrees of rotation per pixel of drag.
pub const DRAG_SENSITIVITY: f32 = 0.5;
/// Radius change per wheel notch.
pub const ZOOM_STEP: f32 = 1.0;
pub const FOV_Y_DEGREES: f32 = 45.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 200.0;

/// Camera circling the origin, driven by left-drag and the mouse wheel.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Vertical angle in degrees, kept inside `±PITCH_LIMIT`.
    pitch: f32,
    /// Horizontal angle in degrees.
    yaw: f32,
    radius: f32,
    dragging: bool,
    last_cursor: Option<[f32; 2]>,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            pitch: START_PITCH,
            yaw: START_YAW,
            radius: START_RADIUS,
            dragging: false,
            last_cursor: None,
        }
    }
}

impl OrbitCamera {
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Track the cursor; while dragging, the delta since the last position rotates the camera.
    pub fn cursor_moved(&mut self, position: [f32; 2]) {
        if let (true, Some(last)) = (self.dragging, self.last_cursor) {
            self.rotate(position[0] - last[0], position[1] - last[1]);
        }
        self.last_cursor = Some(position);
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * DRAG_SENSITIVITY;
        self.pitch = (self.pitch + dy * DRAG_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Positive `notches` move the camera closer.
    pub fn zoom(&mut self, notches: f32) {
        self.radius = (self.radius - notches * ZOOM_STEP).clamp(MIN_RADIUS, MAX_RADIUS);
    }

    pub fn eye(&self) -> Vec3 {
        let pitch = self.pitch.to_radians();
        let yaw = self.yaw.to_radians();
        Vec3::new(
            self.radius * pitch.cos() * yaw.sin(),
            self.radius * pitch.sin(),
            self.radius * pitch.cos() * yaw.cos(),
        )
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect.max(1e-3), Z_NEAR, Z_FAR);
        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn starts_at_reference_pose() {
        let camera = OrbitCamera::default();
        assert_eq!((camera.pitch, camera.yaw, camera.radius), (45.0, 45.0, 18.0));
        assert!(approx(camera.eye().length(), 18.0));
    }

    #[test]
    fn eye_follows_spherical_angles() {
        let mut camera = OrbitCamera::default();
        camera.rotate(-90.0, -90.0);
        assert!(approx(camera.yaw, 0.0));
        assert!(approx(camera.pitch, 0.0));
        let eye = camera.eye();
        assert!(approx(eye.x, 0.0) && approx(eye.y, 0.0) && approx(eye.z, 18.0));
    }

    #[test]
    fn moving_without_button_does_not_rotate() {
        let mut camera = OrbitCamera::default();
        camera.cursor_moved([10.0, 10.0]);
        camera.cursor_moved([50.0, 30.0]);
        assert_eq!((camera.yaw, camera.pitch), (START_YAW, START_PITCH));
    }

    #[test]
    fn drag_rotates_by_half_a_degree_per_pixel() {
        let mut camera = OrbitCamera::default();
        camera.cursor_moved([100.0, 100.0]);
        camera.set_dragging(true);
        camera.cursor_moved([120.0, 90.0]);
        assert!(approx(camera.yaw, 55.0));
        assert!(approx(camera.pitch, 40.0));

        camera.set_dragging(false);
        camera.cursor_moved([300.0, 300.0]);
        assert!(approx(camera.yaw, 55.0));
    }

    #[test]
    fn first_sample_of_a_drag_is_not_a_jump() {
        let mut camera = OrbitCamera::default();
        camera.set_dragging(true);
        camera.cursor_moved([500.0, 500.0]);
        assert_eq!((camera.yaw, camera.pitch), (START_YAW, START_PITCH));
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = OrbitCamera::default();
        camera.rotate(0.0, 1000.0);
        assert_eq!(camera.pitch, PITCH_LIMIT);
        camera.rotate(0.0, -1000.0);
        assert_eq!(camera.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = OrbitCamera::default();
        camera.zoom(3.0);
        assert_eq!(camera.radius, 15.0);
        camera.zoom(100.0);
        assert_eq!(camera.radius, MIN_RADIUS);
        camera.zoom(-100.0);
        assert_eq!(camera.radius, MAX_RADIUS);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let camera = OrbitCamera::default();
        let clip = camera.view_proj(16.0 / 9.0) * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(approx(ndc.x, 0.0) && approx(ndc.y, 0.0));
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
