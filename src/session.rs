//! One running wardrobe instance inside a hosted world
//!
//! All events are handled one at a time on the task that drives the session.
//! The catalog fetch is the only asynchronous step: it runs on its own task
//! and reports back through the session's event channel as
//! [`SessionEvent::CatalogResolved`].

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::catalog::{load_catalog, Catalog, CatalogSource, CatalogState};
use crate::config::{SessionParams, WardrobeSettings};
use crate::host::{HostEvent, SceneHost};
use crate::wardrobe::{WardrobeController, WardrobeError, WardrobeResult};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Host(HostEvent),
    CatalogResolved(CatalogState),
}

impl From<HostEvent> for SessionEvent {
    fn from(event: HostEvent) -> Self {
        SessionEvent::Host(event)
    }
}

/// Whether the session keeps consuming events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFlow {
    Continue,
    Stop,
}

/// Cloneable handle the host glue uses to feed events in
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl EventSender {
    /// Returns `false` once the session has shut down
    pub fn send(&self, event: impl Into<SessionEvent>) -> bool {
        self.tx.send(event.into()).is_ok()
    }
}

pub type EventReceiver = mpsc::UnboundedReceiver<SessionEvent>;

pub struct Session<H: SceneHost> {
    host: H,
    settings: WardrobeSettings,
    params: SessionParams,
    source: Arc<dyn CatalogSource>,
    catalog: CatalogState,
    wardrobe: WardrobeController,
    tx: mpsc::UnboundedSender<SessionEvent>,
    started: bool,
    stopped: bool,
}

impl<H: SceneHost> Session<H> {
    pub fn new(
        host: H,
        settings: WardrobeSettings,
        params: SessionParams,
        source: Arc<dyn CatalogSource>,
    ) -> (Self, EventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let wardrobe = WardrobeController::new(settings.wardrobe.clone());
        let session = Self {
            host,
            settings,
            params,
            source,
            catalog: CatalogState::NotConfigured,
            wardrobe,
            tx,
            started: false,
            stopped: false,
        };
        (session, rx)
    }

    pub fn sender(&self) -> EventSender {
        EventSender { tx: self.tx.clone() }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn params(&self) -> &SessionParams {
        &self.params
    }

    pub fn catalog_state(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn wardrobe(&self) -> &WardrobeController {
        &self.wardrobe
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Handle one event to completion.
    ///
    /// Must be called from within a Tokio runtime, since `Started` spawns
    /// the catalog fetch.
    pub fn handle(&mut self, event: SessionEvent) -> SessionFlow {
        if self.stopped {
            debug!("Session stopped, dropping {:?}", event);
            return SessionFlow::Stop;
        }

        match event {
            SessionEvent::Host(HostEvent::Stopped) => {
                self.stop();
                return SessionFlow::Stop;
            }
            SessionEvent::Host(event) => {
                let name = event.name();
                if let Err(e) = self.handle_host_event(event) {
                    report(name, &e);
                }
            }
            SessionEvent::CatalogResolved(state) => {
                if let Err(e) = self.on_catalog_resolved(state) {
                    report("catalog-resolved", &e);
                }
            }
        }
        SessionFlow::Continue
    }

    /// Consume events until the host stops the session, then hand the host back.
    pub async fn run(mut self, mut rx: EventReceiver) -> H {
        while let Some(event) = rx.recv().await {
            if self.handle(event) == SessionFlow::Stop {
                break;
            }
        }
        if !self.stopped {
            self.stop();
        }
        self.host
    }

    /// Process events until the catalog fetch started by `Started` resolved.
    pub async fn wait_for_catalog(&mut self, rx: &mut EventReceiver) {
        while self.catalog.is_loading() {
            let Some(event) = rx.recv().await else {
                break;
            };
            if self.handle(event) == SessionFlow::Stop {
                break;
            }
        }
    }

    fn handle_host_event(&mut self, event: HostEvent) -> WardrobeResult<()> {
        match event {
            HostEvent::Started => self.start(),
            HostEvent::UserJoined { user } => {
                debug!("User {} joined", user);
                self.wardrobe.on_user_joined(&mut self.host)?;
                Ok(())
            }
            HostEvent::UserLeft { user } => {
                self.wardrobe.on_user_left(&mut self.host, user)?;
                Ok(())
            }
            HostEvent::ButtonHover { actor, phase } => {
                self.wardrobe.on_hover(&mut self.host, actor, phase)
            }
            HostEvent::ButtonClick { actor, user } => {
                let empty = Catalog::new();
                let catalog = self.catalog.catalog().unwrap_or(&empty);
                self.wardrobe.on_click(&mut self.host, catalog, actor, user)
            }
            HostEvent::Stopped => Ok(()),
        }
    }

    fn start(&mut self) -> WardrobeResult<()> {
        if self.started {
            debug!("Session already started");
            return Ok(());
        }
        self.started = true;
        info!("🚀 Wardrobe session started");

        // Catalog fetch first so a menu failure cannot keep previews away
        match self.params.content_pack.clone() {
            Some(content_pack) => {
                self.catalog = CatalogState::Loading;
                let source = Arc::clone(&self.source);
                let settings = self.settings.catalog.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let state =
                        load_catalog(source.as_ref(), Some(content_pack.as_str()), &settings).await;
                    if tx.send(SessionEvent::CatalogResolved(state)).is_err() {
                        debug!("Session gone before catalog resolved");
                    }
                });
            }
            None => {
                info!("No content pack configured; wardrobe starts without previews");
                self.catalog = CatalogState::NotConfigured;
            }
        }

        self.wardrobe
            .render_menu(&mut self.host, &self.settings.menu, &self.params.header)
    }

    fn on_catalog_resolved(&mut self, state: CatalogState) -> WardrobeResult<()> {
        self.catalog = state;
        match &self.catalog {
            CatalogState::Loaded(catalog) => {
                self.wardrobe.render_catalog_previews(&mut self.host, catalog)?;
            }
            CatalogState::Unavailable(e) => {
                warn!("Catalog unavailable, menu stays without previews: {}", e);
            }
            CatalogState::NotConfigured | CatalogState::Loading => {}
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.stopped = true;
        if let Err(e) = self.wardrobe.teardown(&mut self.host) {
            report("stopped", &e);
        }
        info!("Wardrobe session stopped");
    }
}

fn report(event: &str, error: &WardrobeError) {
    match error {
        WardrobeError::WearableNotFound(id) => {
            warn!("Ignoring {} for unknown wearable '{}'", event, id)
        }
        WardrobeError::Host(e) => warn!("Host rejected {} handling: {}", event, e),
    }
}
