//! Events the host runtime delivers to the extension

use super::types::{ActorId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverPhase {
    Enter,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Session is ready for scene mutations; fires once
    Started,
    UserJoined { user: UserId },
    UserLeft { user: UserId },
    ButtonHover { actor: ActorId, phase: HoverPhase },
    ButtonClick { actor: ActorId, user: UserId },
    /// Session is shutting down
    Stopped,
}

impl HostEvent {
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::Started => "started",
            HostEvent::UserJoined { .. } => "user-joined",
            HostEvent::UserLeft { .. } => "user-left",
            HostEvent::ButtonHover { .. } => "button-hover",
            HostEvent::ButtonClick { .. } => "button-click",
            HostEvent::Stopped => "stopped",
        }
    }
}
