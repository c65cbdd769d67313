/// Camera state and perspective projection onto the canvas
use nalgebra::{Matrix4, Point2, Point3, Vector2};

/// Side length of the square viewport, in view-space units on the
/// projection plane.
pub const VIEWPORT_SIZE: f32 = 1.0;

/// Distance from the camera to the projection plane.
pub const PROJECTION_PLANE_Z: f32 = 1.0;

/// Camera pose with an eagerly composed view transform.
///
/// The view transform is `transpose(orientation) * translate(-position)`;
/// both setters recompose it before returning.
pub struct Camera {
    position: Point3<f32>,
    orientation: Matrix4<f32>,
    transform: Matrix4<f32>,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            position: Point3::origin(),
            orientation: Matrix4::identity(),
            transform: Matrix4::identity(),
        }
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn set_position(&mut self, position: Point3<f32>) {
        self.position = position;
        self.compose();
    }

    pub fn set_orientation(&mut self, orientation: Matrix4<f32>) {
        self.orientation = orientation;
        self.compose();
    }

    /// The world-to-view transform for the current pose.
    pub fn transform(&self) -> &Matrix4<f32> {
        &self.transform
    }

    fn compose(&mut self) {
        self.transform =
            self.orientation.transpose() * Matrix4::new_translation(&-self.position.coords);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a viewport coordinate to an integer pixel coordinate centered on the
/// canvas origin, truncating toward zero.
pub fn viewport_to_canvas(pt: Vector2<f32>, width: usize, height: usize) -> Point2<i32> {
    Point2::new(
        (pt.x * width as f32 / VIEWPORT_SIZE) as i32,
        (pt.y * height as f32 / VIEWPORT_SIZE) as i32,
    )
}

/// Perspective-project a view-space vertex to centered canvas coordinates.
///
/// There is no guard for `z <= 0`: such vertices produce non-finite viewport
/// coordinates, which saturate on the integer cast. The near-plane clip keeps
/// them out of the normal pipeline, and the depth test's bounds check drops
/// any pixel they would produce.
pub fn project_vertex(v: &Point3<f32>, width: usize, height: usize) -> Point2<i32> {
    viewport_to_canvas(
        Vector2::new(
            v.x * PROJECTION_PLANE_Z / v.z,
            v.y * PROJECTION_PLANE_Z / v.z,
        ),
        width,
        height,
    )
}
