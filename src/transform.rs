use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::serial;

/// Spatial state of an actor. Rotation is stored as Euler angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    #[serde(default)]
    pub position: Vec3,
    #[serde(default)]
    pub rotation: Vec3,
    #[serde(default = "default_scale")]
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: default_scale(),
        }
    }
}

fn default_scale() -> Vec3 {
    Vec3::ONE
}

impl Transform {
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Overwrites whichever of `position`, `rotation` and `scale` are present.
    pub fn read(&mut self, value: &Value) {
        serial::read(value, "position", &mut self.position, false);
        serial::read(value, "rotation", &mut self.rotation, false);
        serial::read(value, "scale", &mut self.scale, false);
    }

    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.rotation.y.to_radians(),
            self.rotation.x.to_radians(),
            self.rotation.z.to_radians(),
        )
    }

    pub fn set_rotation_quat(&mut self, rotation: Quat) {
        let (y, x, z) = rotation.normalize().to_euler(EulerRot::YXZ);
        self.rotation = Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees());
    }

    /// Model matrix: translation * rotation * scale.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.position)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation_quat() * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation_quat() * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation_quat() * Vec3::Y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn read_keeps_missing_fields() {
        let mut transform = Transform::default();
        transform.read(&json!({ "position": [1, 2, 3], "scale": [2, 2, 2] }));
        assert_eq!(transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.rotation, Vec3::ZERO);
        assert_eq!(transform.scale, Vec3::splat(2.0));
    }

    #[test]
    fn matrix_applies_translation_and_scale() {
        let transform = Transform::new(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO, Vec3::splat(2.0));
        let point = transform.matrix().transform_point3(Vec3::X);
        assert!(approx(point, Vec3::new(7.0, 0.0, 0.0)));
    }

    #[test]
    fn yaw_turns_forward_vector() {
        let transform = Transform::new(Vec3::ZERO, Vec3::new(0.0, 90.0, 0.0), Vec3::ONE);
        assert!(approx(transform.forward(), Vec3::NEG_X));
        assert!(approx(transform.up(), Vec3::Y));
    }

    #[test]
    fn quaternion_round_trips_through_degrees() {
        let mut transform = Transform::default();
        let rotation = Transform::new(Vec3::ZERO, Vec3::new(30.0, 45.0, 10.0), Vec3::ONE);
        transform.set_rotation_quat(rotation.rotation_quat());
        assert!(approx(transform.rotation, Vec3::new(30.0, 45.0, 10.0)));
    }
}
