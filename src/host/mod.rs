//! Boundary to the mixed-reality host runtime
//!
//! The host owns the scene graph, animation playback and the binding of
//! attachments to connected clients. The extension only sees the
//! operations named by [`SceneHost`] and the [`HostEvent`]s it is fed.

use glam::Vec3;
use thiserror::Error;

pub mod events;
pub mod recording;
pub mod types;

pub use events::{HostEvent, HoverPhase};
pub use recording::{Mutation, RecordedActor, RecordingHost};
pub use types::{
    ActorId, ActorSpec, ActorVisual, AnimationTarget, AttachPoint, Attachment, Color3, EaseCurve,
    TextAnchor, TextSpec, Transform, UserId,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HostError {
    #[error("Unknown actor: {0}")]
    UnknownActor(ActorId),

    #[error("Host rejected {operation}: {reason}")]
    Rejected { operation: &'static str, reason: String },
}

pub type HostResult<T> = Result<T, HostError>;

/// Outbound scene operations the extension may issue
pub trait SceneHost {
    fn create_actor(&mut self, spec: ActorSpec) -> HostResult<ActorId>;

    /// Destroy an actor together with its children
    fn destroy_actor(&mut self, actor: ActorId) -> HostResult<()>;

    /// Make an actor clickable; the host then reports hover and click events for it
    fn set_button_behavior(&mut self, actor: ActorId) -> HostResult<()>;

    fn animate_to(
        &mut self,
        actor: ActorId,
        target: AnimationTarget,
        duration_secs: f32,
        curve: EaseCurve,
    ) -> HostResult<()>;

    fn set_attachment(&mut self, actor: ActorId, attachment: Attachment) -> HostResult<()>;

    fn set_local_scale(&mut self, actor: ActorId, scale: Vec3) -> HostResult<()>;
}
