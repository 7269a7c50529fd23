//! Periodic UI refresh trigger.
//!
//! The host tracker does not repaint the countdown on its own, so while a
//! grace period is active a background thread fires roughly every 90 ms
//! and asks the host to re-read its binding values. The trigger exists
//! only alongside an active grace period: the context starts it when the
//! period begins and stops it the moment the period ends.
//!
//! Ordering guarantee: the refresh side effect runs under a mutex, the
//! thread checks the active flag before each firing, and `stop()` joins
//! the thread. No refresh runs after the trigger has been stopped, and no
//! two refreshes overlap.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::host::UiRefresher;

/// Default trigger period.
pub const REFRESH_PERIOD: Duration = Duration::from_millis(90);

/// Shared between the context (main thread) and the trigger thread. The
/// trigger thread only reads `active` and invokes the guarded refresher;
/// it never touches grace state.
pub(crate) struct RefreshGate {
    active: AtomicBool,
    ui: Mutex<Box<dyn UiRefresher>>,
}

impl RefreshGate {
    pub(crate) fn new(ui: Box<dyn UiRefresher>) -> Self {
        Self {
            active: AtomicBool::new(false),
            ui: Mutex::new(ui),
        }
    }

    pub(crate) fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Run the host refresh under the gate's mutex.
    pub(crate) fn refresh_ui(&self) {
        if let Ok(mut ui) = self.ui.lock() {
            ui.refresh();
        }
    }
}

/// Handle to the running trigger thread.
///
/// Dropping the sender wakes the thread immediately, so `stop()` does not
/// wait out a full period before joining.
pub(crate) struct RefreshTrigger {
    stop_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl RefreshTrigger {
    pub(crate) fn start(period: Duration, gate: Arc<RefreshGate>) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(period) {
                Err(RecvTimeoutError::Timeout) => {
                    if !gate.is_active() {
                        break;
                    }
                    gate.refresh_ui();
                }
                // Stop requested, or the handle was dropped.
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });
        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Stop the thread and wait for any in-flight refresh to finish.
    pub(crate) fn stop(&mut self) {
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RefreshTrigger {
    fn drop(&mut self) {
        self.stop();
    }
}
