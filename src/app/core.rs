//! Core ChatApp struct definition and initialization

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use std::time::Instant;
use tracing::{info, warn};

use crate::backend::spawn_backend;
use crate::client::ChatClient;
use crate::config::{load_settings, save_settings, Settings};
use crate::protocol::{BackendAction, GuiEvent};
use crate::session::ChatSession;
use crate::transport::{DummyStore, HttpStore, TransportError};
use crate::ui;
use crate::view::MessageListView;

/// Status line shown when the HTTP store could not be set up
pub const OFFLINE_SAMPLE_NOTICE: &str = "Store unavailable: showing offline sample data";
/// Status line shown in dummy mode
pub const DUMMY_MODE_NOTICE: &str = "Dummy mode: showing sample data";

/// Channel ends of a running backend plus the status line to show for it
pub(crate) struct BackendHandle {
    pub action_tx: Sender<BackendAction>,
    pub event_rx: Receiver<GuiEvent>,
    pub notice: Option<&'static str>,
}

/// Start the backend on the store `settings` ask for. `http` builds the HTTP
/// store and is only called outside dummy mode; if it fails the sample
/// conversation is served and a notice says so.
pub(crate) fn start_backend(
    settings: &Settings,
    http: impl FnOnce() -> Result<HttpStore, TransportError>,
) -> BackendHandle {
    let refresh_interval = settings.refresh_interval();
    let ((action_tx, event_rx), notice) = if settings.dummy_mode {
        info!("dummy mode; serving the sample conversation");
        (
            spawn_backend(DummyStore::seeded(), refresh_interval),
            Some(DUMMY_MODE_NOTICE),
        )
    } else {
        match http() {
            Ok(store) => {
                info!(url = %store.chats_url(), "using HTTP message store");
                (spawn_backend(store, refresh_interval), None)
            }
            Err(e) => {
                warn!(error = %e, "HTTP store unavailable; falling back to sample conversation");
                (
                    spawn_backend(DummyStore::seeded(), refresh_interval),
                    Some(OFFLINE_SAMPLE_NOTICE),
                )
            }
        }
    };
    BackendHandle {
        action_tx,
        event_rx,
        notice,
    }
}

pub struct ChatApp {
    pub client: ChatClient<MessageListView>,

    // Persisted settings; theme and username are refreshed from the session on save
    pub settings: Settings,

    // Identity field in the toolbar (committed on Enter)
    pub username_input: String,

    pub(super) last_visibility_tick: Instant,
}

impl ChatApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = load_settings();
        ui::apply_style(&cc.egui_ctx, settings.theme);
        Self::with_settings(settings)
    }

    /// Build the app and start its backend thread.
    pub fn with_settings(settings: Settings) -> Self {
        let backend = start_backend(&settings, || HttpStore::new(&settings.store_url));

        let session = ChatSession::new(settings.username.clone(), settings.theme);
        let mut client = ChatClient::new(
            session,
            MessageListView::new(),
            backend.action_tx,
            backend.event_rx,
        );
        if let Some(notice) = backend.notice {
            client.set_status(notice);
        }

        Self {
            client,
            username_input: settings.username.clone(),
            settings,
            last_visibility_tick: Instant::now(),
        }
    }

    pub(super) fn toggle_theme(&mut self, ctx: &egui::Context) {
        let theme = self.client.toggle_theme();
        ui::apply_style(ctx, theme);
        self.save_settings();
    }

    pub(super) fn set_username(&mut self, name: String) {
        self.username_input = name.clone();
        self.client.set_current_user(name);
        self.save_settings();
    }

    pub(super) fn save_settings(&mut self) {
        self.settings.theme = self.client.session.theme();
        self.settings.username = self.client.session.current_user().to_string();
        if let Err(e) = save_settings(&self.settings) {
            warn!(error = %e, "failed to save settings");
        }
    }
}

impl Drop for ChatApp {
    fn drop(&mut self) {
        self.client.shutdown();
        // Persist settings on exit
        self.save_settings();
    }
}
