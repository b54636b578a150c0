//! In-memory scene host
//!
//! Keeps a flat scene graph plus an ordered log of every mutation the
//! extension issued. Used by the headless runner and by tests.

use std::collections::BTreeMap;

use glam::Vec3;
use tracing::debug;

use super::types::{ActorId, ActorSpec, AnimationTarget, Attachment, EaseCurve, Transform, UserId};
use super::{HostError, HostResult, SceneHost};

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Created { actor: ActorId, spec: ActorSpec },
    Destroyed { actor: ActorId },
    ButtonBehavior { actor: ActorId },
    Animated { actor: ActorId, target: AnimationTarget, duration_secs: f32, curve: EaseCurve },
    AttachmentSet { actor: ActorId, attachment: Attachment },
    ScaleSet { actor: ActorId, scale: Vec3 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedActor {
    pub id: ActorId,
    pub spec: ActorSpec,
    /// Current local transform, including scale changes after creation
    pub transform: Transform,
    pub attachment: Option<Attachment>,
    pub is_button: bool,
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    next_id: u64,
    actors: BTreeMap<ActorId, RecordedActor>,
    mutations: Vec<Mutation>,
    created: usize,
    destroyed: usize,
    reject_creates: bool,
    reject_destroys: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `create_actor` call fail
    pub fn set_reject_creates(&mut self, reject: bool) {
        self.reject_creates = reject;
    }

    /// Make every following `destroy_actor` call fail
    pub fn set_reject_destroys(&mut self, reject: bool) {
        self.reject_destroys = reject;
    }

    pub fn actor(&self, id: ActorId) -> Option<&RecordedActor> {
        self.actors.get(&id)
    }

    pub fn is_live(&self, id: ActorId) -> bool {
        self.actors.contains_key(&id)
    }

    pub fn live_actors(&self) -> impl Iterator<Item = &RecordedActor> {
        self.actors.values()
    }

    pub fn live_count(&self) -> usize {
        self.actors.len()
    }

    /// Direct children of `parent` in creation order
    pub fn children_of(&self, parent: ActorId) -> Vec<&RecordedActor> {
        self.actors
            .values()
            .filter(|a| a.spec.parent == Some(parent))
            .collect()
    }

    /// Live actors attached to `user`
    pub fn attached_to(&self, user: UserId) -> Vec<&RecordedActor> {
        self.actors
            .values()
            .filter(|a| a.attachment.as_ref().map(|att| att.user) == Some(user))
            .collect()
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn clear_mutations(&mut self) {
        self.mutations.clear();
    }

    /// Number of successful `create_actor` calls
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// Number of successful `destroy_actor` calls; descendants are not counted
    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    fn actor_mut(&mut self, id: ActorId) -> HostResult<&mut RecordedActor> {
        self.actors.get_mut(&id).ok_or(HostError::UnknownActor(id))
    }

    fn remove_subtree(&mut self, root: ActorId) {
        let children: Vec<ActorId> = self
            .actors
            .values()
            .filter(|a| a.spec.parent == Some(root))
            .map(|a| a.id)
            .collect();
        for child in children {
            self.remove_subtree(child);
        }
        self.actors.remove(&root);
    }
}

impl SceneHost for RecordingHost {
    fn create_actor(&mut self, spec: ActorSpec) -> HostResult<ActorId> {
        if self.reject_creates {
            return Err(HostError::Rejected {
                operation: "create_actor",
                reason: "creation disabled".to_string(),
            });
        }
        if let Some(parent) = spec.parent {
            if !self.actors.contains_key(&parent) {
                return Err(HostError::UnknownActor(parent));
            }
        }

        self.next_id += 1;
        let id = ActorId(self.next_id);
        debug!("Created {} ({:?})", id, spec.visual);

        self.actors.insert(
            id,
            RecordedActor {
                id,
                spec: spec.clone(),
                transform: spec.transform,
                attachment: spec.attachment.clone(),
                is_button: false,
            },
        );
        self.mutations.push(Mutation::Created { actor: id, spec });
        self.created += 1;
        Ok(id)
    }

    fn destroy_actor(&mut self, actor: ActorId) -> HostResult<()> {
        if self.reject_destroys {
            return Err(HostError::Rejected {
                operation: "destroy_actor",
                reason: "destruction disabled".to_string(),
            });
        }
        if !self.actors.contains_key(&actor) {
            return Err(HostError::UnknownActor(actor));
        }
        self.remove_subtree(actor);
        self.mutations.push(Mutation::Destroyed { actor });
        self.destroyed += 1;
        debug!("Destroyed {}", actor);
        Ok(())
    }

    fn set_button_behavior(&mut self, actor: ActorId) -> HostResult<()> {
        self.actor_mut(actor)?.is_button = true;
        self.mutations.push(Mutation::ButtonBehavior { actor });
        Ok(())
    }

    fn animate_to(
        &mut self,
        actor: ActorId,
        target: AnimationTarget,
        duration_secs: f32,
        curve: EaseCurve,
    ) -> HostResult<()> {
        // Animations are recorded as their end state
        let recorded = self.actor_mut(actor)?;
        match target {
            AnimationTarget::LocalScale(scale) => recorded.transform.scale = scale,
        }
        self.mutations.push(Mutation::Animated { actor, target, duration_secs, curve });
        Ok(())
    }

    fn set_attachment(&mut self, actor: ActorId, attachment: Attachment) -> HostResult<()> {
        self.actor_mut(actor)?.attachment = Some(attachment.clone());
        self.mutations.push(Mutation::AttachmentSet { actor, attachment });
        Ok(())
    }

    fn set_local_scale(&mut self, actor: ActorId, scale: Vec3) -> HostResult<()> {
        self.actor_mut(actor)?.transform.scale = scale;
        self.mutations.push(Mutation::ScaleSet { actor, scale });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destroy_removes_children() {
        let mut host = RecordingHost::new();
        let root = host.create_actor(ActorSpec::empty()).unwrap();
        let child = host.create_actor(ActorSpec::empty().with_parent(root)).unwrap();
        let grandchild = host.create_actor(ActorSpec::library("artifact:1").with_parent(child)).unwrap();

        host.destroy_actor(root).unwrap();

        assert!(!host.is_live(child));
        assert!(!host.is_live(grandchild));
        assert_eq!(host.live_count(), 0);
        assert_eq!(host.destroyed_count(), 1);
    }

    #[test]
    fn test_unknown_actor_is_reported() {
        let mut host = RecordingHost::new();
        assert_eq!(host.destroy_actor(ActorId(42)), Err(HostError::UnknownActor(ActorId(42))));
        assert_eq!(
            host.create_actor(ActorSpec::empty().with_parent(ActorId(7))),
            Err(HostError::UnknownActor(ActorId(7)))
        );
    }

    #[test]
    fn test_rejected_destroy_keeps_actor() {
        let mut host = RecordingHost::new();
        let actor = host.create_actor(ActorSpec::empty()).unwrap();
        host.set_reject_destroys(true);

        assert!(matches!(host.destroy_actor(actor), Err(HostError::Rejected { .. })));
        assert!(host.is_live(actor));
        assert_eq!(host.destroyed_count(), 0);
    }

    #[test]
    fn test_scale_updates_transform() {
        let mut host = RecordingHost::new();
        let actor = host.create_actor(ActorSpec::empty()).unwrap();
        host.set_local_scale(actor, Vec3::splat(2.0)).unwrap();
        assert_eq!(host.actor(actor).unwrap().transform.scale, Vec3::splat(2.0));
        assert_eq!(host.mutations().len(), 2);
    }
}
