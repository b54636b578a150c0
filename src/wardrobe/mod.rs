//! Wardrobe menu and per-user attachment lifecycle
//!
//! Per user the controller moves between `Unworn` and `Worn`:
//! wearing an item while already worn destroys the old instance first,
//! removing or leaving destroys it.

use thiserror::Error;

use crate::host::HostError;

pub mod attachments;
pub mod controller;
pub mod menu;

pub use attachments::{AttachmentState, Wearing, WornItem};
pub use controller::WardrobeController;
pub use menu::ButtonAction;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WardrobeError {
    #[error("Wearable not found: {0}")]
    WearableNotFound(String),

    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

pub type WardrobeResult<T> = Result<T, WardrobeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, WearableDescriptor};
    use crate::config::{MenuSettings, WardrobeBehaviorSettings};
    use crate::host::{
        ActorId, AnimationTarget, EaseCurve, HostError, HoverPhase, Mutation, RecordingHost,
        SceneHost, UserId,
    };
    use crate::utils::{quat_from_euler_degrees, Vector3};
    use glam::Vec3;

    fn catalog() -> Catalog {
        vec![
            ("a".to_string(), WearableDescriptor::new("artifact:100")),
            ("b".to_string(), WearableDescriptor::new("artifact:200")),
            ("c".to_string(), WearableDescriptor::new("artifact:300")),
        ]
        .into_iter()
        .collect()
    }

    fn controller() -> WardrobeController {
        WardrobeController::new(WardrobeBehaviorSettings::default())
    }

    fn assert_vec_close(actual: Vec3, expected: Vec3) {
        assert!(
            (actual - expected).abs().max_element() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_wear_replaces_previous_item() {
        let mut host = RecordingHost::new();
        let mut wardrobe = controller();
        let catalog = catalog();
        let user = UserId::new();

        let first = wardrobe.wear(&mut host, &catalog, "a", user).unwrap();
        let second = wardrobe.wear(&mut host, &catalog, "b", user).unwrap();

        assert!(!host.is_live(first));
        assert!(host.is_live(second));
        assert_eq!(wardrobe.attachments().len(), 1);
        assert_eq!(wardrobe.attachments().lookup(user).item().unwrap().wearable_id, "b");
        assert_eq!(host.attached_to(user).len(), 1);
    }

    #[test]
    fn test_repeated_wear_does_not_leak_actors() {
        let mut host = RecordingHost::new();
        let mut wardrobe = controller();
        let catalog = catalog();
        let user = UserId::new();

        for round in 1..=4 {
            wardrobe.wear(&mut host, &catalog, "a", user).unwrap();
            assert_eq!(host.destroyed_count(), host.created_count() - 1);
            assert_eq!(host.created_count(), round);
            assert_eq!(wardrobe.attachments().len(), 1);
        }
        assert_eq!(host.live_count(), 1);
    }

    #[test]
    fn test_wear_unknown_id_changes_nothing() {
        let mut host = RecordingHost::new();
        let mut wardrobe = controller();
        let catalog = catalog();
        let user = UserId::new();
        let worn = wardrobe.wear(&mut host, &catalog, "a", user).unwrap();
        host.clear_mutations();

        let result = wardrobe.wear(&mut host, &catalog, "missing", user);

        assert_eq!(result, Err(WardrobeError::WearableNotFound("missing".to_string())));
        assert!(host.mutations().is_empty());
        assert_eq!(wardrobe.attachments().lookup(user).item().unwrap().actor, worn);
    }

    #[test]
    fn test_wear_applies_descriptor_defaults() {
        let mut host = RecordingHost::new();
        let mut wardrobe = controller();
        let catalog = catalog();
        let user = UserId::new();

        let actor = wardrobe.wear(&mut host, &catalog, "c", user).unwrap();
        let recorded = host.actor(actor).unwrap();

        assert_eq!(recorded.spec.resource_id(), Some("artifact:300"));
        assert_eq!(recorded.transform.position, Vec3::ZERO);
        assert_eq!(recorded.transform.scale, Vec3::splat(1.5));
        assert!(recorded
            .transform
            .rotation
            .abs_diff_eq(quat_from_euler_degrees(Vector3::new(0.0, 180.0, 0.0)), 1e-6));

        let attachment = recorded.attachment.as_ref().unwrap();
        assert_eq!(attachment.attach_point.as_str(), "head");
        assert_eq!(attachment.user, user);
    }

    #[test]
    fn test_remove_without_item_is_noop() {
        let mut host = RecordingHost::new();
        let mut wardrobe = controller();

        assert_eq!(wardrobe.remove(&mut host, UserId::new()), Ok(false));
        assert_eq!(host.destroyed_count(), 0);
        assert!(host.mutations().is_empty());
        assert!(wardrobe.attachments().is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut host = RecordingHost::new();
        let mut wardrobe = controller();
        let catalog = catalog();
        let user = UserId::new();
        wardrobe.wear(&mut host, &catalog, "a", user).unwrap();

        assert_eq!(wardrobe.remove(&mut host, user), Ok(true));
        assert_eq!(wardrobe.remove(&mut host, user), Ok(false));
        assert_eq!(host.destroyed_count(), 1);
        assert!(!wardrobe.attachments().lookup(user).is_worn());
    }

    #[test]
    fn test_user_left_destroys_exactly_once() {
        let mut host = RecordingHost::new();
        let mut wardrobe = controller();
        let catalog = catalog();
        let leaving = UserId::new();
        let staying = UserId::new();
        wardrobe.wear(&mut host, &catalog, "a", leaving).unwrap();
        wardrobe.wear(&mut host, &catalog, "b", staying).unwrap();

        assert_eq!(wardrobe.on_user_left(&mut host, leaving), Ok(true));

        assert_eq!(host.destroyed_count(), 1);
        assert!(!wardrobe.attachments().lookup(leaving).is_worn());
        assert!(wardrobe.attachments().lookup(staying).is_worn());
    }

    #[test]
    fn test_scale_accumulates_linearly() {
        let mut host = RecordingHost::new();
        let mut wardrobe = controller();
        let catalog = catalog();
        let user = UserId::new();
        let actor = wardrobe.wear(&mut host, &catalog, "a", user).unwrap();

        for _ in 0..3 {
            wardrobe.adjust_scale(&mut host, user, 0.02).unwrap();
        }

        assert_vec_close(host.actor(actor).unwrap().transform.scale, Vec3::splat(1.56));
        let tracked = wardrobe.attachments().lookup(user).item().unwrap().scale;
        assert_vec_close(tracked, Vec3::splat(1.56));
    }

    #[test]
    fn test_scale_is_unbounded_by_default() {
        let mut host = RecordingHost::new();
        let mut wardrobe = controller();
        let catalog = catalog();
        let user = UserId::new();
        wardrobe.wear(&mut host, &catalog, "a", user).unwrap();

        let scale = wardrobe.adjust_scale(&mut host, user, -2.0).unwrap().unwrap();
        assert_vec_close(scale, Vec3::splat(-0.5));
    }

    #[test]
    fn test_scale_respects_configured_bounds() {
        let mut host = RecordingHost::new();
        let mut wardrobe = WardrobeController::new(WardrobeBehaviorSettings {
            scale_min: Some(0.1),
            scale_max: Some(1.6),
            ..WardrobeBehaviorSettings::default()
        });
        let catalog = catalog();
        let user = UserId::new();
        wardrobe.wear(&mut host, &catalog, "a", user).unwrap();

        let grown = wardrobe.adjust_scale(&mut host, user, 1.0).unwrap().unwrap();
        assert_vec_close(grown, Vec3::splat(1.6));
        let shrunk = wardrobe.adjust_scale(&mut host, user, -5.0).unwrap().unwrap();
        assert_vec_close(shrunk, Vec3::splat(0.1));
    }

    #[test]
    fn test_scale_without_item_is_noop() {
        let mut host = RecordingHost::new();
        let mut wardrobe = controller();
        assert_eq!(wardrobe.adjust_scale(&mut host, UserId::new(), 0.02), Ok(None));
        assert!(host.mutations().is_empty());
    }

    #[test]
    fn test_join_rebinds_every_wearer() {
        let mut host = RecordingHost::new();
        let mut wardrobe = controller();
        let catalog = catalog();
        let users = [UserId::new(), UserId::new(), UserId::new()];
        for (user, id) in users.iter().zip(["a", "b", "c"]) {
            wardrobe.wear(&mut host, &catalog, id, *user).unwrap();
        }
        host.clear_mutations();

        assert_eq!(wardrobe.on_user_joined(&mut host), Ok(3));

        let mut rebound: Vec<UserId> = host
            .mutations()
            .iter()
            .filter_map(|m| match m {
                Mutation::AttachmentSet { attachment, .. } => Some(attachment.user),
                _ => None,
            })
            .collect();
        rebound.sort();
        let mut expected = users.to_vec();
        expected.sort();
        assert_eq!(rebound, expected);
    }

    #[test]
    fn test_previews_step_by_margin() {
        let mut host = RecordingHost::new();
        let mut wardrobe = controller();

        assert_eq!(wardrobe.render_catalog_previews(&mut host, &catalog()), Ok(3));

        let root = wardrobe.previews_root().unwrap();
        let offsets: Vec<f32> = host
            .children_of(root)
            .iter()
            .map(|holder| holder.transform.position.x)
            .collect();
        assert_eq!(offsets, vec![0.0, -1.5, -3.0]);
    }

    #[test]
    fn test_preview_margin_override_shifts_following_entries() {
        let mut host = RecordingHost::new();
        let mut wardrobe = controller();
        let mut wide = WearableDescriptor::new("artifact:wide");
        wide.preview_margin = Some(2.5);
        let catalog: Catalog = vec![
            ("wide".to_string(), wide),
            ("next".to_string(), WearableDescriptor::new("artifact:next")),
        ]
        .into_iter()
        .collect();

        wardrobe.render_catalog_previews(&mut host, &catalog).unwrap();

        let root = wardrobe.previews_root().unwrap();
        let offsets: Vec<f32> = host
            .children_of(root)
            .iter()
            .map(|h| h.transform.position.x)
            .collect();
        assert_eq!(offsets, vec![0.0, -2.5]);
    }

    #[test]
    fn test_empty_catalog_renders_nothing() {
        let mut host = RecordingHost::new();
        let mut wardrobe = controller();
        assert_eq!(wardrobe.render_catalog_previews(&mut host, &Catalog::new()), Ok(0));
        assert_eq!(host.created_count(), 0);
        assert_eq!(wardrobe.previews_root(), None);
    }

    #[test]
    fn test_menu_controls_dispatch_clicks() {
        let mut host = RecordingHost::new();
        let mut wardrobe = controller();
        let catalog = catalog();
        let user = UserId::new();
        wardrobe.render_menu(&mut host, &MenuSettings::default(), "Hats").unwrap();
        wardrobe.render_catalog_previews(&mut host, &catalog).unwrap();

        let find = |action: &ButtonAction| -> ActorId {
            host.live_actors()
                .map(|a| a.id)
                .find(|id| wardrobe.button_action(*id) == Some(action))
                .unwrap()
        };
        let wear_b = find(&ButtonAction::Wear("b".to_string()));
        let scale_up = find(&ButtonAction::ScaleUp);
        let scale_down = find(&ButtonAction::ScaleDown);
        let remove = find(&ButtonAction::Remove);

        wardrobe.on_click(&mut host, &catalog, wear_b, user).unwrap();
        wardrobe.on_click(&mut host, &catalog, scale_up, user).unwrap();
        wardrobe.on_click(&mut host, &catalog, scale_up, user).unwrap();
        wardrobe.on_click(&mut host, &catalog, scale_down, user).unwrap();
        let tracked = wardrobe.attachments().lookup(user).item().unwrap().scale;
        assert_vec_close(tracked, Vec3::splat(1.52));

        wardrobe.on_click(&mut host, &catalog, remove, user).unwrap();
        assert!(!wardrobe.attachments().lookup(user).is_worn());
    }

    #[test]
    fn test_hover_pulses_registered_buttons_only() {
        let mut host = RecordingHost::new();
        let mut wardrobe = controller();
        wardrobe.render_menu(&mut host, &MenuSettings::default(), "Hats").unwrap();
        let header = host
            .live_actors()
            .find(|a| matches!(a.spec.visual, crate::host::ActorVisual::Text(_)))
            .map(|a| a.id)
            .unwrap();
        let button = host.live_actors().find(|a| a.is_button).map(|a| a.id).unwrap();
        host.clear_mutations();

        wardrobe.on_hover(&mut host, header, HoverPhase::Enter).unwrap();
        assert!(host.mutations().is_empty());

        wardrobe.on_hover(&mut host, button, HoverPhase::Enter).unwrap();
        assert_eq!(host.actor(button).unwrap().transform.scale, Vec3::splat(1.1));
        assert_eq!(
            host.mutations(),
            &[Mutation::Animated {
                actor: button,
                target: AnimationTarget::LocalScale(Vec3::splat(1.1)),
                duration_secs: 0.5,
                curve: EaseCurve::EaseOutSine,
            }]
        );
        wardrobe.on_hover(&mut host, button, HoverPhase::Exit).unwrap();
        assert_eq!(host.actor(button).unwrap().transform.scale, Vec3::ONE);
    }

    #[test]
    fn test_teardown_destroys_all_worn_items() {
        let mut host = RecordingHost::new();
        let mut wardrobe = controller();
        let catalog = catalog();
        wardrobe.wear(&mut host, &catalog, "a", UserId::new()).unwrap();
        wardrobe.wear(&mut host, &catalog, "b", UserId::new()).unwrap();

        assert_eq!(wardrobe.teardown(&mut host), Ok(2));
        assert!(wardrobe.attachments().is_empty());
        assert_eq!(host.live_count(), 0);
    }

    #[test]
    fn test_actor_already_gone_still_releases_entry() {
        let mut host = RecordingHost::new();
        let mut wardrobe = controller();
        let catalog = catalog();
        let user = UserId::new();
        let actor = wardrobe.wear(&mut host, &catalog, "a", user).unwrap();
        host.destroy_actor(actor).unwrap();

        assert_eq!(wardrobe.on_user_left(&mut host, user), Ok(true));
        assert!(wardrobe.attachments().is_empty());
    }

    #[test]
    fn test_rejected_destroy_on_leave_keeps_entry() {
        let mut host = RecordingHost::new();
        let mut wardrobe = controller();
        let catalog = catalog();
        let user = UserId::new();
        let actor = wardrobe.wear(&mut host, &catalog, "a", user).unwrap();
        host.set_reject_destroys(true);

        let result = wardrobe.on_user_left(&mut host, user);

        assert!(matches!(result, Err(WardrobeError::Host(HostError::Rejected { .. }))));
        assert!(host.is_live(actor));
        assert_eq!(wardrobe.attachments().lookup(user).item().unwrap().actor, actor);

        host.set_reject_destroys(false);
        assert_eq!(wardrobe.on_user_left(&mut host, user), Ok(true));
        assert!(!host.is_live(actor));
        assert!(wardrobe.attachments().is_empty());
    }

    #[test]
    fn test_rejected_destroy_on_remove_and_rewear_keeps_item() {
        let mut host = RecordingHost::new();
        let mut wardrobe = controller();
        let catalog = catalog();
        let user = UserId::new();
        let actor = wardrobe.wear(&mut host, &catalog, "a", user).unwrap();
        host.set_reject_destroys(true);

        assert!(wardrobe.remove(&mut host, user).is_err());
        assert!(wardrobe.wear(&mut host, &catalog, "b", user).is_err());

        assert!(host.is_live(actor));
        assert_eq!(host.live_count(), 1);
        assert_eq!(wardrobe.attachments().lookup(user).item().unwrap().wearable_id, "a");
    }

    #[test]
    fn test_teardown_attempts_every_item() {
        let mut host = RecordingHost::new();
        let mut wardrobe = controller();
        let catalog = catalog();
        for id in ["a", "b", "c"] {
            wardrobe.wear(&mut host, &catalog, id, UserId::new()).unwrap();
        }
        host.set_reject_destroys(true);

        let result = wardrobe.teardown(&mut host);

        assert!(matches!(result, Err(WardrobeError::Host(HostError::Rejected { .. }))));
        assert_eq!(wardrobe.attachments().len(), 3);
        for (_, item) in wardrobe.attachments().iter() {
            assert!(host.is_live(item.actor));
        }

        host.set_reject_destroys(false);
        assert_eq!(wardrobe.teardown(&mut host), Ok(3));
        assert_eq!(host.live_count(), 0);
    }
}
