use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::host::{AttachPoint, Transform};
use crate::utils::{quat_from_euler_degrees, Vector3};

pub const DEFAULT_WORN_POSITION: Vector3 = Vector3::zero();
pub const DEFAULT_WORN_ROTATION: Vector3 = Vector3::new(0.0, 180.0, 0.0);
pub const DEFAULT_WORN_SCALE: Vector3 = Vector3::splat(1.5);

pub const DEFAULT_MENU_POSITION: Vector3 = Vector3::new(0.0, 1.0, 0.0);
pub const DEFAULT_MENU_ROTATION: Vector3 = Vector3::zero();
pub const DEFAULT_MENU_SCALE: Vector3 = Vector3::splat(3.0);

/// One wearable entry of a content pack.
///
/// Field names follow the content API (`resourceId`, `menuScale`, ...).
/// Every placement field is optional and falls back to a fixed default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WearableDescriptor {
    /// Library reference of the model, e.g. `artifact:1579238405710021245`
    pub resource_id: String,
    #[serde(default)]
    pub attach_point: Option<AttachPoint>,

    #[serde(default)]
    pub position: Option<Vector3>,
    /// Euler angles in degrees
    #[serde(default)]
    pub rotation: Option<Vector3>,
    #[serde(default)]
    pub scale: Option<Vector3>,

    #[serde(default)]
    pub menu_position: Option<Vector3>,
    #[serde(default)]
    pub menu_rotation: Option<Vector3>,
    #[serde(default)]
    pub menu_scale: Option<Vector3>,

    /// Spacing to the next preview in the menu
    #[serde(default)]
    pub preview_margin: Option<f32>,
}

impl WearableDescriptor {
    pub fn new(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            attach_point: None,
            position: None,
            rotation: None,
            scale: None,
            menu_position: None,
            menu_rotation: None,
            menu_scale: None,
            preview_margin: None,
        }
    }

    pub fn worn_attach_point(&self) -> AttachPoint {
        self.attach_point.clone().unwrap_or_default()
    }

    pub fn worn_scale(&self) -> Vec3 {
        self.scale.unwrap_or(DEFAULT_WORN_SCALE).to_vec3()
    }

    /// Local transform of the model relative to the attach point
    pub fn worn_transform(&self) -> Transform {
        let position = self.position.unwrap_or(DEFAULT_WORN_POSITION);
        let rotation = self.rotation.unwrap_or(DEFAULT_WORN_ROTATION);

        Transform::at(position.to_vec3())
            .with_rotation(quat_from_euler_degrees(rotation))
            .with_scale(self.worn_scale())
    }

    /// Transform of the preview holder; `x` is the running menu offset and
    /// replaces the x component of `menuPosition`.
    pub fn menu_transform(&self, x: f32) -> Transform {
        let position = self.menu_position.unwrap_or(DEFAULT_MENU_POSITION);
        let rotation = self.menu_rotation.unwrap_or(DEFAULT_MENU_ROTATION);
        let scale = self.menu_scale.unwrap_or(DEFAULT_MENU_SCALE);

        Transform::at(Vec3::new(x, position.y, position.z))
            .with_rotation(quat_from_euler_degrees(rotation))
            .with_scale(scale.to_vec3())
    }
}
