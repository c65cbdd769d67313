/// Frustum culling and triangle clipping against the view volume
use std::sync::OnceLock;

use nalgebra::{Matrix4, Point3, Vector3};

use crate::geometry::{Model, Triangle};
use crate::projection::PROJECTION_PLANE_Z;
use crate::transform::ModelInstance;

/// A half-space boundary: points with `dot(normal, p) + distance >= 0` are
/// inside.
#[derive(Debug, Clone)]
pub struct Plane {
    pub normal: Vector3<f32>,
    pub distance: f32,
}

impl Plane {
    pub fn new(normal: Vector3<f32>, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Signed distance from `point` to the plane; positive means inside.
    pub fn signed_distance(&self, point: &Point3<f32>) -> f32 {
        self.normal.dot(&point.coords) + self.distance
    }
}

/// The five view-volume planes in clipping order: left, right, top, bottom,
/// near. A 90-degree frustum matching the unit viewport at the projection
/// plane; there is no far plane.
pub fn clipping_planes() -> &'static [Plane; 5] {
    static PLANES: OnceLock<[Plane; 5]> = OnceLock::new();
    PLANES.get_or_init(|| {
        let s = std::f32::consts::FRAC_1_SQRT_2;
        [
            Plane::new(Vector3::new(s, 0.0, s), 0.0),
            Plane::new(Vector3::new(-s, 0.0, s), 0.0),
            Plane::new(Vector3::new(0.0, -s, s), 0.0),
            Plane::new(Vector3::new(0.0, s, s), 0.0),
            Plane::new(Vector3::new(0.0, 0.0, 1.0), -PROJECTION_PLANE_Z),
        ]
    })
}

/// A transient per-draw model: the instance's transformed vertices (originals
/// first, synthesized clip vertices appended) and the surviving triangles.
#[derive(Debug, Clone)]
pub struct ClippedModel {
    pub vertices: Vec<Point3<f32>>,
    pub triangles: Vec<Triangle>,
}

/// Transform an instance into view space and clip it against the view volume.
///
/// Returns `None` when the instance's bounding sphere lies entirely outside
/// any clipping plane. Passing the sphere test is only a failure to prove
/// invisibility; survivors still get clipped triangle by triangle.
pub fn clip_instance(instance: &ModelInstance, transform: &Matrix4<f32>) -> Option<ClippedModel> {
    let model: &Model = instance.model;

    let center = transform.transform_point(&model.bounding_sphere.center);
    // Rotation and translation leave the radius alone; only scale matters.
    let radius = model.bounding_sphere.radius * instance.scale();

    for plane in clipping_planes() {
        if plane.signed_distance(&center) < -radius {
            return None;
        }
    }

    let mut vertices: Vec<Point3<f32>> = model
        .vertices
        .iter()
        .map(|v| transform.transform_point(v))
        .collect();

    // Clip plane-at-a-time: each plane consumes the previous plane's output.
    // The vertex list is shared and append-only, so indices minted while
    // clipping one plane stay valid for all later planes.
    let mut triangles = model.triangles.clone();
    for plane in clipping_planes() {
        let mut clipped = Vec::with_capacity(triangles.len());
        for triangle in &triangles {
            clip_triangle(plane, triangle, &mut vertices, &mut clipped);
        }
        triangles = clipped;
    }

    Some(ClippedModel {
        vertices,
        triangles,
    })
}

/// Clip one triangle against one plane, pushing the surviving triangles onto
/// `out` and any synthesized vertices onto `vertices`.
fn clip_triangle(
    plane: &Plane,
    triangle: &Triangle,
    vertices: &mut Vec<Point3<f32>>,
    out: &mut Vec<Triangle>,
) {
    let [i0, i1, i2] = triangle.vertex_indices;
    let d0 = plane.signed_distance(&vertices[i0]);
    let d1 = plane.signed_distance(&vertices[i1]);
    let d2 = plane.signed_distance(&vertices[i2]);

    let inside = (d0 > 0.0) as u8 + (d1 > 0.0) as u8 + (d2 > 0.0) as u8;

    match inside {
        3 => out.push(*triangle),
        1 => {
            // A is the inside vertex, found in index order; B and C follow
            // it cyclically. The clipped result is the triangle A, AB', AC'.
            let (a, b, c) = if d0 > 0.0 {
                (i0, i1, i2)
            } else if d1 > 0.0 {
                (i1, i2, i0)
            } else {
                (i2, i0, i1)
            };

            let new_b = intersect_edge(&vertices[a], &vertices[b], plane);
            let new_c = intersect_edge(&vertices[a], &vertices[c], plane);
            vertices.push(new_b);
            vertices.push(new_c);
            let idx_b = vertices.len() - 2;
            let idx_c = vertices.len() - 1;

            out.push(Triangle::new(a, idx_b, idx_c, triangle.color));
        }
        2 => {
            // C is the outside vertex, found by elimination; A and B are the
            // inside pair in cyclic order after it. The clipped quad
            // A, B, AC', BC' becomes two triangles.
            let (a, b, c) = if d0 <= 0.0 {
                (i1, i2, i0)
            } else if d1 <= 0.0 {
                (i2, i0, i1)
            } else {
                (i0, i1, i2)
            };

            let new_a = intersect_edge(&vertices[a], &vertices[c], plane);
            let new_b = intersect_edge(&vertices[b], &vertices[c], plane);
            vertices.push(new_a);
            vertices.push(new_b);
            let idx_new_a = vertices.len() - 2;
            let idx_new_b = vertices.len() - 1;

            out.push(Triangle::new(a, b, idx_new_a, triangle.color));
            out.push(Triangle::new(idx_new_a, b, idx_new_b, triangle.color));
        }
        _ => {} // fully outside
    }
}

/// Parametric intersection of segment `ab` with `plane`. Callers guarantee
/// the endpoints straddle the plane, so the denominator is non-zero.
fn intersect_edge(a: &Point3<f32>, b: &Point3<f32>, plane: &Plane) -> Point3<f32> {
    let da = plane.signed_distance(a);
    let db = plane.signed_distance(b);
    let t = da / (da - db);
    *a + (b - a) * t
}
