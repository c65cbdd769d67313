/// Instance pose state and local transform composition
use nalgebra::{Matrix4, Vector3};

use crate::geometry::Model;

/// Homogeneous rotation of `angle_degrees` about `axis`.
///
/// The axis need not be normalized, but must be non-zero.
pub fn rotation_about_axis(angle_degrees: f32, axis: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::new_rotation(axis.normalize() * angle_degrees.to_radians())
}

/// A posed occurrence of a shared, read-only model.
///
/// The local transform `translate * scale * rotate` is cached and recomputed
/// by every pose setter, so reading it never observes a stale pose.
pub struct ModelInstance<'a> {
    pub model: &'a Model,
    translation: Vector3<f32>,
    scale: f32,
    rotation_angle: f32,
    rotation_axis: Vector3<f32>,
    transform: Matrix4<f32>,
}

impl<'a> ModelInstance<'a> {
    /// A translated instance with unit scale and no rotation.
    pub fn new(model: &'a Model, translation: Vector3<f32>) -> Self {
        let mut instance = Self {
            model,
            translation,
            scale: 1.0,
            rotation_angle: 0.0,
            rotation_axis: Vector3::x(),
            transform: Matrix4::identity(),
        };
        instance.compute_transform();
        instance
    }

    /// The composed local-to-world transform for the current pose.
    pub fn transformation(&self) -> &Matrix4<f32> {
        &self.transform
    }

    pub fn translation(&self) -> Vector3<f32> {
        self.translation
    }

    pub fn set_translation(&mut self, translation: Vector3<f32>) {
        self.translation = translation;
        self.compute_transform();
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.compute_transform();
    }

    pub fn rotation_angle(&self) -> f32 {
        self.rotation_angle
    }

    pub fn rotation_axis(&self) -> Vector3<f32> {
        self.rotation_axis
    }

    /// Rotation of `angle_degrees` about the (non-zero) `axis`.
    pub fn set_rotation(&mut self, angle_degrees: f32, axis: Vector3<f32>) {
        self.rotation_angle = angle_degrees;
        self.rotation_axis = axis;
        self.compute_transform();
    }

    fn compute_transform(&mut self) {
        self.transform = Matrix4::new_translation(&self.translation)
            * Matrix4::new_scaling(self.scale)
            * rotation_about_axis(self.rotation_angle, self.rotation_axis);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rotation_is_identity() {
        let matrix = rotation_about_axis(0.0, Vector3::y());
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_quarter_turn_about_y() {
        let matrix = rotation_about_axis(90.0, Vector3::y());
        let rotated = matrix.transform_point(&nalgebra::Point3::new(1.0, 0.0, 0.0));
        assert!((rotated.x - 0.0).abs() < 1e-6);
        assert!((rotated.y - 0.0).abs() < 1e-6);
        assert!((rotated.z - -1.0).abs() < 1e-6);
    }

    #[test]
    fn test_new_instance_composes_translation() {
        let cube = Model::cube(2.0);
        let instance = ModelInstance::new(&cube, Vector3::new(1.0, 2.0, 3.0));
        let expected = Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0));
        assert!((instance.transformation() - expected).norm() < 1e-6);
    }

    #[test]
    fn test_setters_recompute_transform() {
        let cube = Model::cube(2.0);
        let mut instance = ModelInstance::new(&cube, Vector3::new(0.0, 0.0, 5.0));

        instance.set_scale(0.5);
        instance.set_rotation(45.0, Vector3::new(1.0, 1.0, 0.0));
        instance.set_translation(Vector3::new(-1.0, 0.0, 6.0));

        let expected = Matrix4::new_translation(&Vector3::new(-1.0, 0.0, 6.0))
            * Matrix4::new_scaling(0.5)
            * rotation_about_axis(45.0, Vector3::new(1.0, 1.0, 0.0));
        assert!((instance.transformation() - expected).norm() < 1e-6);
    }
}
