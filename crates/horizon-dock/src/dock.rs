//! The dock: favorites mirrored into host items, revealed from a screen edge.
//!
//! [`Dock`] ties the pieces together. It owns the host adapter (through its
//! [`RevealController`]), the list of live items, and a subscription to the
//! favorites model. The host feeds it [`DockEvent`]s from its dispatch
//! queue; everything runs to completion on that one thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use horizon_dock_core::logging::targets;
use horizon_dock_core::{dock_debug, dock_error, ConnectionGuard, DockEvent, PerfSpan};

use crate::config::{DockConfig, ItemsConfig};
use crate::error::{DockError, Result};
use crate::favorites::{AppId, FavoritesModel};
use crate::host::{DockHost, VisualEntry};
use crate::reconcile::{ListReconciler, ReconcileDiff};
use crate::reveal::{RevealController, RevealState};

/// A favorites dock bound to a host.
pub struct Dock<H: DockHost> {
    reveal: RevealController<H>,
    favorites: Arc<FavoritesModel>,
    entries: Vec<H::Entry>,
    items: ItemsConfig,
    shown_initially: bool,
    dirty: Arc<AtomicBool>,
    favorites_connection: Option<ConnectionGuard<()>>,
    active: bool,
}

impl<H: DockHost> Dock<H> {
    /// Build the dock, arm the edge sensor and populate it from `favorites`.
    ///
    /// The surface starts hidden. Fails with [`DockError::Config`] before
    /// touching the host if `config` does not validate.
    pub fn new(host: H, config: &DockConfig, favorites: Arc<FavoritesModel>) -> Result<Self> {
        config.validate()?;

        let mut reveal = RevealController::new(host, config.reveal.poll_interval());
        reveal.host_mut().hide_surface();
        reveal.host_mut().arm_pressure(config.reveal.pressure());

        let dirty = Arc::new(AtomicBool::new(false));
        let flag = dirty.clone();
        let connection = favorites.changed().connect_scoped(move |_| {
            flag.store(true, Ordering::SeqCst);
        });

        let mut dock = Self {
            reveal,
            favorites,
            entries: Vec::new(),
            items: config.items.clone(),
            shown_initially: false,
            dirty,
            favorites_connection: Some(connection),
            active: true,
        };
        dock.redisplay()?;
        Ok(dock)
    }

    /// Build a dock whose favorites come from the configuration.
    pub fn from_config(host: H, config: &DockConfig) -> Result<Self> {
        let favorites = Arc::new(FavoritesModel::from_apps(config.favorites.iter().cloned()));
        Self::new(host, config, favorites)
    }

    /// Handle one event from the host's dispatch queue.
    ///
    /// Fails with [`DockError::ShutDown`] for anything but a repeated
    /// shutdown once the dock has been shut down.
    pub fn handle_event(&mut self, event: DockEvent) -> Result<()> {
        if !self.active {
            return match event {
                DockEvent::Shutdown => Ok(()),
                _ => Err(DockError::ShutDown),
            };
        }

        match event {
            DockEvent::PressureTrigger => self.reveal.on_pressure_trigger(),
            DockEvent::InteractionBegan => self.reveal.on_interaction_began(),
            DockEvent::InteractionEnded => self.reveal.on_interaction_ended(),
            DockEvent::Timer { id } => {
                if self.reveal.on_timer(id).is_none() {
                    dock_debug!(targets::DOCK, ?id, "ignoring unknown timer");
                }
            }
            DockEvent::FavoritesChanged => {
                self.redisplay()?;
            }
            DockEvent::ShowAppsClicked => self.toggle_show_apps(),
            DockEvent::Shutdown => self.shutdown(),
        }
        Ok(())
    }

    /// Redisplay if the favorites model changed since the last pass.
    ///
    /// Returns whether a pass ran.
    pub fn process_pending(&mut self) -> Result<bool> {
        if !self.active || !self.dirty.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.redisplay()?;
        Ok(true)
    }

    /// Run one reconciliation pass against the favorites model.
    ///
    /// On a precondition failure nothing on screen changes.
    pub fn redisplay(&mut self) -> Result<ReconcileDiff<AppId>> {
        if !self.active {
            return Err(DockError::ShutDown);
        }
        self.dirty.store(false, Ordering::SeqCst);
        let _span = PerfSpan::new("dock_redisplay");

        let apps = self.favorites.apps();
        let desired: Vec<AppId> = apps.iter().map(|app| app.id.clone()).collect();
        let diff = ListReconciler::reconcile(&desired, &self.entries).inspect_err(|err| {
            dock_error!(targets::DOCK, %err, "dock items out of sync with favorites");
        })?;

        let overview = self.reveal.host().overview_state();
        let animate_removal = self.items.animate_removals && overview.allows_animation();
        let animate_insertion =
            self.shown_initially && self.items.animate_insertions && overview.allows_animation();

        let host = self.reveal.host_mut();
        for entry in diff.take_removed(&mut self.entries) {
            host.destroy_visual(entry, animate_removal);
        }
        diff.insert_created(&mut self.entries, |insertion| {
            host.create_visual(&apps[insertion.position])
        });

        host.apply_order(&self.entries);
        for insertion in &diff.insertions {
            host.show_visual(&self.entries[insertion.position], animate_insertion);
        }
        self.shown_initially = true;

        dock_debug!(
            targets::DOCK,
            items = self.entries.len(),
            inserted = diff.insertions.len(),
            removed = diff.removals.len(),
            "redisplayed"
        );
        Ok(diff)
    }

    /// Toggle the application grid.
    pub fn toggle_show_apps(&mut self) {
        let host = self.reveal.host_mut();
        if host.overview_state().visible {
            host.hide_overview();
        } else {
            host.show_apps();
        }
    }

    /// Tear the dock down: cancel the poll, disarm the sensor, drop the
    /// favorites subscription and destroy every item.
    ///
    /// Safe to call more than once. Also runs on drop.
    pub fn shutdown(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        dock_debug!(targets::DOCK, items = self.entries.len(), "shutting down");

        self.favorites_connection = None;
        self.reveal.shutdown();

        let host = self.reveal.host_mut();
        host.disarm_pressure();
        for entry in self.entries.drain(..) {
            host.destroy_visual(entry, false);
        }
        host.apply_order(&[]);
        host.hide_surface();
    }

    /// Whether the dock is still running.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current reveal state.
    pub fn reveal_state(&self) -> RevealState {
        self.reveal.state()
    }

    /// The reveal controller.
    pub fn reveal(&self) -> &RevealController<H> {
        &self.reveal
    }

    /// The live items, in display order.
    pub fn entries(&self) -> &[H::Entry] {
        &self.entries
    }

    /// Ids of the live items, in display order.
    pub fn entry_ids(&self) -> Vec<AppId> {
        self.entries.iter().map(|e| e.entity().clone()).collect()
    }

    /// The favorites model this dock mirrors.
    pub fn favorites(&self) -> &Arc<FavoritesModel> {
        &self.favorites
    }

    /// The host adapter.
    pub fn host(&self) -> &H {
        self.reveal.host()
    }

    /// Mutable access to the host adapter.
    pub fn host_mut(&mut self) -> &mut H {
        self.reveal.host_mut()
    }
}

impl<H: DockHost> Drop for Dock<H> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
