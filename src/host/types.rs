use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Handle for an actor living in the host's scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

/// Identity of a connected user as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Local transform relative to the parent actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self { position, ..Self::default() }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color3 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color3 {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    MiddleLeft,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextSpec {
    pub contents: String,
    pub anchor: TextAnchor,
    pub color: Color3,
    pub height: f32,
}

/// What the host should render for an actor
#[derive(Debug, Clone, PartialEq)]
pub enum ActorVisual {
    /// Grouping node with nothing to draw
    Empty,
    Text(TextSpec),
    /// Model instantiated from the host's content library
    Library { resource_id: String },
}

/// Named body location on a user's avatar, e.g. `head` or `left-hand`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachPoint(String);

impl AttachPoint {
    pub const DEFAULT: &'static str = "head";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AttachPoint {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl fmt::Display for AttachPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub attach_point: AttachPoint,
    pub user: UserId,
}

/// Everything the host needs to create one actor
#[derive(Debug, Clone, PartialEq)]
pub struct ActorSpec {
    pub parent: Option<ActorId>,
    pub transform: Transform,
    pub visual: ActorVisual,
    pub attachment: Option<Attachment>,
}

impl ActorSpec {
    pub fn empty() -> Self {
        Self {
            parent: None,
            transform: Transform::default(),
            visual: ActorVisual::Empty,
            attachment: None,
        }
    }

    pub fn text(text: TextSpec) -> Self {
        Self { visual: ActorVisual::Text(text), ..Self::empty() }
    }

    pub fn library(resource_id: impl Into<String>) -> Self {
        Self {
            visual: ActorVisual::Library { resource_id: resource_id.into() },
            ..Self::empty()
        }
    }

    pub fn with_parent(mut self, parent: ActorId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    pub fn resource_id(&self) -> Option<&str> {
        match &self.visual {
            ActorVisual::Library { resource_id } => Some(resource_id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EaseCurve {
    Linear,
    EaseOutSine,
}

/// Destination of a property animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationTarget {
    LocalScale(Vec3),
}
