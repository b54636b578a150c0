use std::collections::HashMap;

use glam::Vec3;
use tracing::{debug, info, warn};

use super::attachments::{AttachmentState, WornItem};
use super::menu::{self, ButtonAction};
use super::{WardrobeError, WardrobeResult};
use crate::catalog::Catalog;
use crate::config::{MenuSettings, WardrobeBehaviorSettings};
use crate::host::{
    ActorId, ActorSpec, AnimationTarget, Attachment, EaseCurve, HostError, HoverPhase, SceneHost,
    UserId,
};

pub const HOVER_SCALE: f32 = 1.1;
pub const HOVER_DURATION_SECS: f32 = 0.5;

/// Owns who wears what and mediates every change to it
#[derive(Debug)]
pub struct WardrobeController {
    settings: WardrobeBehaviorSettings,
    attachments: AttachmentState,
    buttons: HashMap<ActorId, ButtonAction>,
    menu_root: Option<ActorId>,
    previews_root: Option<ActorId>,
}

impl WardrobeController {
    pub fn new(settings: WardrobeBehaviorSettings) -> Self {
        Self {
            settings,
            attachments: AttachmentState::new(),
            buttons: HashMap::new(),
            menu_root: None,
            previews_root: None,
        }
    }

    pub fn attachments(&self) -> &AttachmentState {
        &self.attachments
    }

    pub fn button_action(&self, actor: ActorId) -> Option<&ButtonAction> {
        self.buttons.get(&actor)
    }

    pub fn menu_root(&self) -> Option<ActorId> {
        self.menu_root
    }

    pub fn previews_root(&self) -> Option<ActorId> {
        self.previews_root
    }

    pub fn render_menu(
        &mut self,
        host: &mut dyn SceneHost,
        menu_settings: &MenuSettings,
        header: &str,
    ) -> WardrobeResult<()> {
        if self.menu_root.is_some() {
            debug!("Menu already rendered");
            return Ok(());
        }

        let menu = menu::render_menu(host, menu_settings, header)?;
        self.menu_root = Some(menu.root);
        self.buttons.extend(menu.buttons);
        info!("🧥 Wardrobe menu rendered with header '{}'", header);
        Ok(())
    }

    /// Render one preview per catalog entry. Returns how many were created;
    /// an empty catalog or a second call creates nothing.
    pub fn render_catalog_previews(
        &mut self,
        host: &mut dyn SceneHost,
        catalog: &Catalog,
    ) -> WardrobeResult<usize> {
        if self.previews_root.is_some() {
            debug!("Catalog previews already rendered");
            return Ok(0);
        }
        if catalog.is_empty() {
            info!("Catalog is empty; no previews to render");
            return Ok(0);
        }

        let previews = menu::render_previews(host, catalog, self.settings.preview_margin)?;
        self.previews_root = Some(previews.root);

        let count = previews.previews.len();
        for preview in previews.previews {
            self.buttons.insert(preview.model, ButtonAction::Wear(preview.wearable_id));
        }
        info!("🧥 Rendered {} catalog previews", count);
        Ok(count)
    }

    /// Put `wearable_id` on `user`, replacing anything they already wear.
    pub fn wear(
        &mut self,
        host: &mut dyn SceneHost,
        catalog: &Catalog,
        wearable_id: &str,
        user: UserId,
    ) -> WardrobeResult<ActorId> {
        let descriptor = catalog
            .get(wearable_id)
            .ok_or_else(|| WardrobeError::WearableNotFound(wearable_id.to_string()))?;

        self.release(host, user)?;

        let attach_point = descriptor.worn_attach_point();
        let spec = ActorSpec::library(&descriptor.resource_id)
            .with_transform(descriptor.worn_transform())
            .with_attachment(Attachment { attach_point: attach_point.clone(), user });
        let actor = host.create_actor(spec)?;

        info!("User {} now wears '{}' on {} ({})", user, wearable_id, attach_point, actor);
        self.attachments.insert(
            user,
            WornItem {
                actor,
                wearable_id: wearable_id.to_string(),
                attach_point,
                scale: descriptor.worn_scale(),
            },
        );
        Ok(actor)
    }

    /// Take off whatever `user` wears. Returns whether anything was removed.
    pub fn remove(&mut self, host: &mut dyn SceneHost, user: UserId) -> WardrobeResult<bool> {
        let removed = self.release(host, user)?;
        if let Some(item) = &removed {
            info!("User {} removed '{}'", user, item.wearable_id);
        }
        Ok(removed.is_some())
    }

    /// Add `delta` to every scale axis of the worn item. Returns the new
    /// scale, or `None` when the user wears nothing.
    pub fn adjust_scale(
        &mut self,
        host: &mut dyn SceneHost,
        user: UserId,
        delta: f32,
    ) -> WardrobeResult<Option<Vec3>> {
        let Some(item) = self.attachments.get_mut(user) else {
            debug!("Scale change ignored, user {} wears nothing", user);
            return Ok(None);
        };

        let bounds = &self.settings;
        let scale = Vec3::new(
            bounds.clamp_scale(item.scale.x + delta),
            bounds.clamp_scale(item.scale.y + delta),
            bounds.clamp_scale(item.scale.z + delta),
        );
        host.set_local_scale(item.actor, scale)?;
        item.scale = scale;

        debug!("User {} scaled '{}' to {}", user, item.wearable_id, scale);
        Ok(Some(scale))
    }

    pub fn on_user_left(&mut self, host: &mut dyn SceneHost, user: UserId) -> WardrobeResult<bool> {
        let released = self.release(host, user)?;
        if let Some(item) = &released {
            info!("User {} left; destroyed their '{}'", user, item.wearable_id);
        }
        Ok(released.is_some())
    }

    /// Re-bind every tracked attachment to its owner.
    ///
    /// The join event does not say which client's binding went stale, so all
    /// wearers are refreshed. Returns how many attachments were re-bound.
    pub fn on_user_joined(&mut self, host: &mut dyn SceneHost) -> WardrobeResult<usize> {
        let mut rebound = 0;
        for (user, item) in self.attachments.iter() {
            host.set_attachment(
                item.actor,
                Attachment { attach_point: item.attach_point.clone(), user },
            )?;
            rebound += 1;
        }
        debug!("Re-bound {} attachments after join", rebound);
        Ok(rebound)
    }

    /// Destroy all worn items at session end. Returns how many were destroyed.
    ///
    /// Every item is attempted. Items the host refuses to destroy stay
    /// tracked and the first such error is returned.
    pub fn teardown(&mut self, host: &mut dyn SceneHost) -> WardrobeResult<usize> {
        let mut destroyed = 0;
        let mut first_error = None;

        for (user, item) in self.attachments.drain() {
            match destroy_ignoring_missing(host, item.actor) {
                Ok(()) => {
                    debug!("Destroyed '{}' worn by {}", item.wearable_id, user);
                    destroyed += 1;
                }
                Err(e) => {
                    warn!("Could not destroy '{}' worn by {}: {}", item.wearable_id, user, e);
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                    self.attachments.insert(user, item);
                }
            }
        }

        info!("Wardrobe torn down, {} worn items destroyed", destroyed);
        match first_error {
            Some(e) => Err(e),
            None => Ok(destroyed),
        }
    }

    pub fn on_hover(
        &mut self,
        host: &mut dyn SceneHost,
        actor: ActorId,
        phase: HoverPhase,
    ) -> WardrobeResult<()> {
        if !self.buttons.contains_key(&actor) {
            debug!("Hover on unregistered {}", actor);
            return Ok(());
        }

        let scale = match phase {
            HoverPhase::Enter => Vec3::splat(HOVER_SCALE),
            HoverPhase::Exit => Vec3::ONE,
        };
        host.animate_to(
            actor,
            AnimationTarget::LocalScale(scale),
            HOVER_DURATION_SECS,
            EaseCurve::EaseOutSine,
        )?;
        Ok(())
    }

    pub fn on_click(
        &mut self,
        host: &mut dyn SceneHost,
        catalog: &Catalog,
        actor: ActorId,
        user: UserId,
    ) -> WardrobeResult<()> {
        let Some(action) = self.buttons.get(&actor).cloned() else {
            debug!("Click on unregistered {}", actor);
            return Ok(());
        };

        match action {
            ButtonAction::Remove => {
                self.remove(host, user)?;
            }
            ButtonAction::ScaleUp => {
                self.adjust_scale(host, user, self.settings.scale_step)?;
            }
            ButtonAction::ScaleDown => {
                self.adjust_scale(host, user, -self.settings.scale_step)?;
            }
            ButtonAction::Wear(wearable_id) => {
                self.wear(host, catalog, &wearable_id, user)?;
            }
        }
        Ok(())
    }

    /// Destroy the user's actor, then drop the entry. A failed destroy
    /// leaves the entry in place.
    fn release(
        &mut self,
        host: &mut dyn SceneHost,
        user: UserId,
    ) -> WardrobeResult<Option<WornItem>> {
        let Some(actor) = self.attachments.lookup(user).item().map(|item| item.actor) else {
            return Ok(None);
        };
        destroy_ignoring_missing(host, actor)?;
        Ok(self.attachments.take(user))
    }
}

/// The host may already have dropped an actor (e.g. with its client); that
/// still counts as destroyed.
fn destroy_ignoring_missing(host: &mut dyn SceneHost, actor: ActorId) -> WardrobeResult<()> {
    match host.destroy_actor(actor) {
        Ok(()) => Ok(()),
        Err(HostError::UnknownActor(_)) => {
            warn!("{} was already gone from the scene", actor);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
