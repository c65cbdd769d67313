/// Scene entities: colors, triangles, models, and bounding volumes
use nalgebra::Point3;

/// An opaque color with three 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const PINK: Color = Color::new(255, 192, 203);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const ORANGE: Color = Color::new(255, 165, 0);
    pub const GOLD: Color = Color::new(255, 215, 0);
    pub const YELLOW: Color = Color::new(255, 255, 0);
    pub const LIME: Color = Color::new(0, 255, 0);
    pub const GREEN: Color = Color::new(0, 128, 0);
    pub const CYAN: Color = Color::new(0, 255, 255);
    pub const TEAL: Color = Color::new(0, 128, 128);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const NAVY: Color = Color::new(0, 0, 128);
    pub const MAGENTA: Color = Color::new(255, 0, 255);
    pub const PURPLE: Color = Color::new(128, 0, 128);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const SILVER: Color = Color::new(192, 192, 192);
    pub const GRAY: Color = Color::new(128, 128, 128);
    pub const DIM_GRAY: Color = Color::new(105, 105, 105);
    pub const BLACK: Color = Color::new(0, 0, 0);
}

/// A triangle face referencing three vertices of a paired vertex list by
/// index, with a fill color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertex_indices: [usize; 3],
    pub color: Color,
}

impl Triangle {
    pub const fn new(v0: usize, v1: usize, v2: usize, color: Color) -> Self {
        Self {
            vertex_indices: [v0, v1, v2],
            color,
        }
    }
}

/// A conservative spherical bound around a model's vertices, used only for
/// whole-instance frustum rejection.
#[derive(Debug, Clone, Copy)]
pub struct BoundingSphere {
    pub center: Point3<f32>,
    pub radius: f32,
}

/// An immutable triangle mesh with a bounding sphere derived at construction.
///
/// Triangle vertex indices must be valid offsets into `vertices`; this is a
/// caller guarantee, not validated here. Untrusted meshes enter through
/// [`crate::meshfile`], which checks indices before constructing a model.
#[derive(Debug, Clone)]
pub struct Model {
    pub vertices: Vec<Point3<f32>>,
    pub triangles: Vec<Triangle>,
    pub bounding_sphere: BoundingSphere,
}

impl Model {
    pub fn new(vertices: Vec<Point3<f32>>, triangles: Vec<Triangle>) -> Self {
        let bounding_sphere = compute_bounding_sphere(&vertices);
        Self {
            vertices,
            triangles,
            bounding_sphere,
        }
    }

    /// A cube of the given edge length centered on the origin, with a
    /// distinct color per face.
    ///
    /// Faces are wound clockwise as seen from outside the cube, matching the
    /// back-face convention of [`crate::canvas::Canvas::draw_simple_model`].
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;

        let vertices = vec![
            Point3::new(half, half, half),
            Point3::new(-half, half, half),
            Point3::new(-half, -half, half),
            Point3::new(half, -half, half),
            Point3::new(half, half, -half),
            Point3::new(-half, half, -half),
            Point3::new(-half, -half, -half),
            Point3::new(half, -half, -half),
        ];

        let triangles = vec![
            // +z
            Triangle::new(0, 2, 1, Color::RED),
            Triangle::new(0, 3, 2, Color::RED),
            // -z
            Triangle::new(4, 5, 7, Color::BLUE),
            Triangle::new(5, 6, 7, Color::BLUE),
            // +x
            Triangle::new(0, 4, 7, Color::GREEN),
            Triangle::new(0, 7, 3, Color::GREEN),
            // -x
            Triangle::new(1, 2, 6, Color::YELLOW),
            Triangle::new(1, 6, 5, Color::YELLOW),
            // +y
            Triangle::new(0, 1, 5, Color::PURPLE),
            Triangle::new(0, 5, 4, Color::PURPLE),
            // -y
            Triangle::new(3, 7, 6, Color::CYAN),
            Triangle::new(3, 6, 2, Color::CYAN),
        ];

        Self::new(vertices, triangles)
    }
}

/// Center is the midpoint of the axis-aligned bounding box; radius is the
/// distance to the farthest of the box's eight corners. Loose but cheap.
fn compute_bounding_sphere(vertices: &[Point3<f32>]) -> BoundingSphere {
    let Some(first) = vertices.first() else {
        return BoundingSphere {
            center: Point3::origin(),
            radius: 0.0,
        };
    };

    let mut mins = *first;
    let mut maxs = *first;
    for v in &vertices[1..] {
        mins.x = mins.x.min(v.x);
        mins.y = mins.y.min(v.y);
        mins.z = mins.z.min(v.z);
        maxs.x = maxs.x.max(v.x);
        maxs.y = maxs.y.max(v.y);
        maxs.z = maxs.z.max(v.z);
    }

    let center = nalgebra::center(&mins, &maxs);

    let corners = [
        Point3::new(mins.x, mins.y, mins.z),
        Point3::new(mins.x, mins.y, maxs.z),
        Point3::new(mins.x, maxs.y, mins.z),
        Point3::new(mins.x, maxs.y, maxs.z),
        Point3::new(maxs.x, mins.y, mins.z),
        Point3::new(maxs.x, mins.y, maxs.z),
        Point3::new(maxs.x, maxs.y, mins.z),
        Point3::new(maxs.x, maxs.y, maxs.z),
    ];

    let mut radius_squared = 0.0f32;
    for corner in &corners {
        radius_squared = radius_squared.max(nalgebra::distance_squared(&center, corner));
    }

    BoundingSphere {
        center,
        radius: radius_squared.sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_sphere_unit_cube() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
        ];
        let model = Model::new(vertices, Vec::new());

        let sphere = &model.bounding_sphere;
        assert!((sphere.center.x - 0.5).abs() < 1e-6);
        assert!((sphere.center.y - 0.5).abs() < 1e-6);
        assert!((sphere.center.z - 0.5).abs() < 1e-6);
        assert!((sphere.radius - (3.0f32).sqrt() / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounding_sphere_empty_model() {
        let model = Model::new(Vec::new(), Vec::new());
        assert_eq!(model.bounding_sphere.center, Point3::origin());
        assert_eq!(model.bounding_sphere.radius, 0.0);
    }

    #[test]
    fn test_bounding_sphere_off_axis_points() {
        // The sphere bounds the AABB corners, not the true minimal sphere.
        let model = Model::new(
            vec![Point3::new(-2.0, 0.0, 0.0), Point3::new(2.0, 1.0, 0.0)],
            Vec::new(),
        );
        let sphere = &model.bounding_sphere;
        assert!((sphere.center.x - 0.0).abs() < 1e-6);
        assert!((sphere.center.y - 0.5).abs() < 1e-6);
        let expected = (4.0f32 * 4.0 + 1.0).sqrt() / 2.0;
        assert!((sphere.radius - expected).abs() < 1e-6);
    }

    #[test]
    fn test_cube_indices_are_valid() {
        let cube = Model::cube(2.0);
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.triangles.len(), 12);
        for triangle in &cube.triangles {
            for &index in &triangle.vertex_indices {
                assert!(index < cube.vertices.len());
            }
        }
        assert!((cube.bounding_sphere.radius - (3.0f32).sqrt()).abs() < 1e-6);
    }
}
