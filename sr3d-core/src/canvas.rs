/// The rendering canvas: framebuffer, depth buffer, and the draw pipeline
use nalgebra::{Matrix4, Point2, Point3};

use crate::clip::clip_instance;
use crate::geometry::Color;
use crate::projection::{project_vertex, Camera};
use crate::raster::{interpolate, triangle_spans};
use crate::transform::ModelInstance;

/// Framebuffer fill for cleared pixels.
const BACKGROUND: Color = Color::BLACK;

/// A software rendering surface.
///
/// Owns the color framebuffer and the per-pixel inverse-depth buffer, both
/// frame-scoped: [`Canvas::clear`] resets them and every draw call writes
/// into them. Drawing coordinates are centered on the canvas middle, with X
/// growing right and Y growing up; the framebuffer itself is stored row-major
/// from the top-left.
pub struct Canvas {
    title: String,
    width: usize,
    height: usize,
    framebuffer: Vec<Color>,
    depth_buffer: Vec<f32>,
    camera: Camera,
}

impl Canvas {
    pub fn new(title: &str, width: usize, height: usize) -> Self {
        Self {
            title: title.to_string(),
            width,
            height,
            framebuffer: vec![BACKGROUND; width * height],
            depth_buffer: vec![0.0; width * height],
            camera: Camera::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Rendered pixels in row-major order from the top-left corner.
    pub fn framebuffer(&self) -> &[Color] {
        &self.framebuffer
    }

    /// Reset the framebuffer and the depth buffer for a new frame.
    pub fn clear(&mut self) {
        self.framebuffer.fill(BACKGROUND);
        self.depth_buffer.fill(0.0);
    }

    pub fn set_camera_position(&mut self, position: Point3<f32>) {
        self.camera.set_position(position);
    }

    pub fn set_camera_orientation(&mut self, orientation: Matrix4<f32>) {
        self.camera.set_orientation(orientation);
    }

    /// Run the full pipeline for one instance: compose the camera and
    /// instance transforms, cull and clip, project, drop back-facing
    /// triangles, and scanline-fill the rest with depth testing.
    pub fn draw_simple_model(&mut self, instance: &ModelInstance) {
        let overall = self.camera.transform() * instance.transformation();

        let Some(clipped) = clip_instance(instance, &overall) else {
            return;
        };

        let projected: Vec<Point2<i32>> = clipped
            .vertices
            .iter()
            .map(|v| project_vertex(v, self.width, self.height))
            .collect();

        for triangle in &clipped.triangles {
            let [i0, i1, i2] = triangle.vertex_indices;
            let v0 = clipped.vertices[i0];
            let v1 = clipped.vertices[i1];
            let v2 = clipped.vertices[i2];

            if !is_front_facing(&v0, &v1, &v2) {
                continue;
            }

            self.draw_filled_triangle(
                projected[i0],
                projected[i1],
                projected[i2],
                v0.z,
                v1.z,
                v2.z,
                triangle.color,
            );
        }
    }

    /// Clip and project an instance like [`Canvas::draw_simple_model`], but
    /// outline every surviving triangle instead of filling; no back-face
    /// culling and no depth testing.
    pub fn draw_wireframe_model(&mut self, instance: &ModelInstance) {
        let overall = self.camera.transform() * instance.transformation();

        let Some(clipped) = clip_instance(instance, &overall) else {
            return;
        };

        let projected: Vec<Point2<i32>> = clipped
            .vertices
            .iter()
            .map(|v| project_vertex(v, self.width, self.height))
            .collect();

        for triangle in &clipped.triangles {
            let [i0, i1, i2] = triangle.vertex_indices;
            self.draw_triangle(projected[i0], projected[i1], projected[i2], triangle.color);
        }
    }

    /// Outline a triangle given in centered canvas coordinates.
    pub fn draw_triangle(&mut self, p0: Point2<i32>, p1: Point2<i32>, p2: Point2<i32>, color: Color) {
        self.draw_line(p0, p1, color);
        self.draw_line(p1, p2, color);
        self.draw_line(p2, p0, color);
    }

    /// Draw a line segment in centered canvas coordinates, stepping along
    /// the major axis and interpolating the other.
    pub fn draw_line(&mut self, mut p0: Point2<i32>, mut p1: Point2<i32>, color: Color) {
        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;

        if dx.abs() > dy.abs() {
            // Horizontal-ish; draw left to right.
            if dx < 0 {
                std::mem::swap(&mut p0, &mut p1);
            }
            let ys = interpolate(p0.x, p0.y as f32, p1.x, p1.y as f32);
            for x in p0.x..=p1.x {
                self.put_pixel(x, ys[(x - p0.x) as usize] as i32, color);
            }
        } else {
            // Vertical-ish; draw bottom to top.
            if dy < 0 {
                std::mem::swap(&mut p0, &mut p1);
            }
            let xs = interpolate(p0.y, p0.x as f32, p1.y, p1.x as f32);
            for y in p0.y..=p1.y {
                self.put_pixel(xs[(y - p0.y) as usize] as i32, y, color);
            }
        }
    }

    /// Write one pixel at centered canvas coordinates; out-of-bounds
    /// coordinates are ignored.
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(offset) = self.buffer_offset(x, y) {
            self.framebuffer[offset] = color;
        }
    }

    /// Scanline-fill a triangle given in centered canvas coordinates, depth
    /// testing each pixel against the interpolated inverse of the vertices'
    /// view-space Z.
    #[allow(clippy::too_many_arguments)]
    fn draw_filled_triangle(
        &mut self,
        mut p0: Point2<i32>,
        mut p1: Point2<i32>,
        mut p2: Point2<i32>,
        mut z0: f32,
        mut z1: f32,
        mut z2: f32,
        color: Color,
    ) {
        // Sort by ascending Y; the Z values travel with their points.
        if p1.y < p0.y {
            std::mem::swap(&mut p0, &mut p1);
            std::mem::swap(&mut z0, &mut z1);
        }
        if p2.y < p0.y {
            std::mem::swap(&mut p0, &mut p2);
            std::mem::swap(&mut z0, &mut z2);
        }
        if p2.y < p1.y {
            std::mem::swap(&mut p1, &mut p2);
            std::mem::swap(&mut z1, &mut z2);
        }

        let spans = triangle_spans(
            (p0.y, p0.x as f32, 1.0 / z0),
            (p1.y, p1.x as f32, 1.0 / z1),
            (p2.y, p2.x as f32, 1.0 / z2),
        );

        for y in p0.y..=p2.y {
            let row = (y - p0.y) as usize;
            let x_left = spans.x_left[row] as i32;
            let x_right = spans.x_right[row] as i32;

            let inv_z_row = interpolate(x_left, spans.z_left[row], x_right, spans.z_right[row]);
            for x in x_left..=x_right {
                if self.test_and_set_depth(x, y, inv_z_row[(x - x_left) as usize]) {
                    self.put_pixel(x, y, color);
                }
            }
        }
    }

    /// Depth-test a pixel at centered canvas coordinates against the stored
    /// inverse depth. Stores the candidate and reports true only when it is
    /// strictly nearer; out-of-bounds (or NaN) candidates are discarded
    /// without touching the buffer.
    fn test_and_set_depth(&mut self, x: i32, y: i32, inverse_z: f32) -> bool {
        let Some(offset) = self.buffer_offset(x, y) else {
            return false;
        };
        if self.depth_buffer[offset] < inverse_z {
            self.depth_buffer[offset] = inverse_z;
            return true;
        }
        false
    }

    /// Map centered canvas coordinates to a framebuffer offset, or `None`
    /// when the pixel falls outside the canvas.
    fn buffer_offset(&self, x: i32, y: i32) -> Option<usize> {
        let w = self.width as i32;
        let h = self.height as i32;
        let x = w / 2 + x;
        let y = h / 2 - y;
        if x < 0 || x >= w || y < 0 || y >= h {
            return None;
        }
        Some((y * w + x) as usize)
    }
}

/// A triangle faces the camera when the normal computed from its winding,
/// dotted with the view-space position of its first vertex, is positive.
/// Meshes are wound clockwise as seen from outside for this to hold.
fn is_front_facing(v0: &Point3<f32>, v1: &Point3<f32>, v2: &Point3<f32>) -> bool {
    let normal = (v1 - v0).cross(&(v2 - v0));
    v0.coords.dot(&normal) > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Model;
    use nalgebra::Vector3;

    fn center_offset(canvas: &Canvas) -> usize {
        canvas.buffer_offset(0, 0).unwrap()
    }

    #[test]
    fn test_center_maps_to_buffer_middle() {
        let canvas = Canvas::new("", 600, 600);
        assert_eq!(canvas.buffer_offset(0, 0), Some(300 * 600 + 300));
    }

    #[test]
    fn test_edge_pixel_is_out_of_bounds() {
        // (1, 0, 2) projects to centered (300, 0) on a 600x600 canvas, which
        // is buffer column 600: one past the last valid column.
        let mut canvas = Canvas::new("", 600, 600);
        let pixel = crate::projection::project_vertex(&Point3::new(1.0, 0.0, 2.0), 600, 600);
        assert_eq!(pixel, Point2::new(300, 0));
        assert!(canvas.buffer_offset(pixel.x, pixel.y).is_none());
        assert!(!canvas.test_and_set_depth(pixel.x, pixel.y, 0.5));
    }

    #[test]
    fn test_put_pixel_ignores_out_of_bounds() {
        let mut canvas = Canvas::new("", 10, 10);
        canvas.put_pixel(1_000_000, -1_000_000, Color::WHITE);
        assert!(canvas.framebuffer().iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn test_depth_result_is_draw_order_independent() {
        let near = [Point2::new(0, 10), Point2::new(-10, -10), Point2::new(10, -10)];
        let far = near;

        for (first, second, first_z, second_z) in [
            (Color::RED, Color::GREEN, 5.0, 10.0),
            (Color::GREEN, Color::RED, 10.0, 5.0),
        ] {
            let mut canvas = Canvas::new("", 100, 100);
            canvas.draw_filled_triangle(
                near[0], near[1], near[2], first_z, first_z, first_z, first,
            );
            canvas.draw_filled_triangle(far[0], far[1], far[2], second_z, second_z, second_z, second);

            // Whichever order they are drawn in, the nearer (z = 5) triangle
            // owns the overlapping pixels.
            let winner = if first_z < second_z { first } else { second };
            assert_eq!(canvas.framebuffer()[center_offset(&canvas)], winner);
        }
    }

    #[test]
    fn test_depth_buffer_never_decreases() {
        let mut canvas = Canvas::new("", 100, 100);
        assert!(canvas.test_and_set_depth(0, 0, 0.2));
        assert!(!canvas.test_and_set_depth(0, 0, 0.1));
        assert!(canvas.test_and_set_depth(0, 0, 0.3));
        let offset = center_offset(&canvas);
        assert!((canvas.depth_buffer[offset] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_cube_renders_front_face_at_center() {
        let cube = Model::cube(2.0);
        let instance = ModelInstance::new(&cube, Vector3::new(0.0, 0.0, 7.0));

        let mut canvas = Canvas::new("", 120, 120);
        canvas.clear();
        canvas.draw_simple_model(&instance);

        // The face nearest the camera is blue; it covers the canvas center.
        assert_eq!(canvas.framebuffer()[center_offset(&canvas)], Color::BLUE);
        // Its depth is 1/6 (the face sits at z = 6).
        let depth = canvas.depth_buffer[center_offset(&canvas)];
        assert!((depth - 1.0 / 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_culled_instance_draws_nothing() {
        let cube = Model::cube(2.0);
        let instance = ModelInstance::new(&cube, Vector3::new(0.0, 0.0, -10.0));

        let mut canvas = Canvas::new("", 120, 120);
        canvas.clear();
        canvas.draw_simple_model(&instance);

        assert!(canvas.framebuffer().iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn test_wireframe_leaves_depth_untouched() {
        let cube = Model::cube(2.0);
        let instance = ModelInstance::new(&cube, Vector3::new(0.0, 0.0, 7.0));

        let mut canvas = Canvas::new("", 120, 120);
        canvas.clear();
        canvas.draw_wireframe_model(&instance);

        assert!(canvas.framebuffer().iter().any(|&c| c != Color::BLACK));
        assert!(canvas.depth_buffer.iter().all(|&d| d == 0.0));
    }

    #[test]
    fn test_draw_line_endpoints() {
        let mut canvas = Canvas::new("", 100, 100);
        canvas.draw_line(Point2::new(-5, 0), Point2::new(5, 0), Color::WHITE);
        assert_eq!(
            canvas.framebuffer()[canvas.buffer_offset(-5, 0).unwrap()],
            Color::WHITE
        );
        assert_eq!(
            canvas.framebuffer()[canvas.buffer_offset(5, 0).unwrap()],
            Color::WHITE
        );
    }
}
