/// Backend submodules for store polling and I/O
///
/// - `gate`: coalescing guard that keeps one fetch in flight
/// - `handlers`: UI action handling and task completion
/// - `main_loop`: the runtime thread and its refresh tick
mod gate;
mod handlers;
mod main_loop;

pub use gate::RefreshGate;
pub use main_loop::run_backend;

use std::thread;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::protocol::{BackendAction, GuiEvent};
use crate::transport::MessageStore;

/// Start the backend thread for `store` and return the UI's channel ends.
pub fn spawn_backend<S: MessageStore>(
    store: S,
    refresh_interval: Duration,
) -> (Sender<BackendAction>, Receiver<GuiEvent>) {
    let (action_tx, action_rx) = unbounded::<BackendAction>();
    let (event_tx, event_rx) = unbounded::<GuiEvent>();

    thread::spawn(move || {
        run_backend(store, refresh_interval, action_rx, event_tx);
    });

    (action_tx, event_rx)
}
