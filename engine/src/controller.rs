//! The async half of the interaction: snapshot publishing and the one-shot
//! warp timer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::debug;

use soma_types::{ScrollOutcome, StemIndex, ZoomConfig, ZoomConfigError, ZoomMachine, ZoomSnapshot};

/// Owns the zoom/warp machine, publishes one atomic [`ZoomSnapshot`] per
/// operation, and runs the timed warp transition.
///
/// Driven by discrete host calls (scroll, selection, reset) delivered from a
/// single logical thread of control; the only other task touching state is
/// the warp timer the controller itself spawns, and [`ZoomController::reset`]
/// cancels that timer before clearing state.
#[derive(Debug)]
pub struct ZoomController {
    machine: Arc<Mutex<ZoomMachine>>,
    tx: watch::Sender<ZoomSnapshot>,
    /// Pending warp completion. Aborted on reset and on drop.
    warp_task: Option<JoinHandle<()>>,
}

/// Updates under the lock are pure and cannot panic, so a poisoned lock
/// still holds a coherent machine.
fn lock(machine: &Mutex<ZoomMachine>) -> MutexGuard<'_, ZoomMachine> {
    machine.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ZoomController {
    /// Build a controller from a validated configuration.
    pub fn new(config: ZoomConfig) -> Result<Self, ZoomConfigError> {
        Ok(Self::from_machine(ZoomMachine::new(config)?))
    }

    /// Build a controller with the reference interaction defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::from_machine(ZoomMachine::default())
    }

    fn from_machine(machine: ZoomMachine) -> Self {
        let (tx, _rx) = watch::channel(machine.snapshot());
        Self {
            machine: Arc::new(Mutex::new(machine)),
            tx,
            warp_task: None,
        }
    }

    /// Feed one raw wheel delta.
    ///
    /// Swallowed input (anything arriving during or after the warp) is not
    /// republished; an accepted update is published as a single snapshot.
    /// The first threshold crossing also schedules the warp completion.
    pub fn handle_scroll(&mut self, delta: f64) {
        let outcome = {
            let mut machine = lock(&self.machine);
            let outcome = machine.handle_scroll(delta);
            if outcome != ScrollOutcome::Swallowed {
                self.tx.send_replace(machine.snapshot());
            }
            outcome
        };
        if outcome == ScrollOutcome::WarpTriggered {
            self.schedule_warp();
        }
    }

    fn schedule_warp(&mut self) {
        let delay = lock(&self.machine).config().warp_delay;
        // Anchor the deadline at the threshold crossing itself, not at the
        // spawned task's first poll.
        let deadline = Instant::now() + delay;
        debug!(?delay, "warp triggered, scheduling completion");

        let machine = Arc::clone(&self.machine);
        let tx = self.tx.clone();
        self.warp_task = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            let mut machine = lock(&machine);
            machine.finish_warp();
            tx.send_replace(machine.snapshot());
            debug!("warp complete, nucleus reached");
        }));
    }

    /// Select a stem, or clear the selection. Accepted in any phase; only
    /// meaningful to the host once the nucleus is reached.
    pub fn set_active_stem(&mut self, stem: Option<StemIndex>) {
        let mut machine = lock(&self.machine);
        machine.set_active_stem(stem);
        self.tx.send_replace(machine.snapshot());
    }

    /// Rewind the whole machine to its initial configuration.
    ///
    /// The pending warp timer is cancelled before state is cleared; a stale
    /// completion firing after reset would otherwise mark the nucleus
    /// reached on a fresh cycle. The machine-side phase guard covers the
    /// window where the completion already started running.
    pub fn reset(&mut self) {
        if let Some(task) = self.warp_task.take() {
            task.abort();
        }
        let mut machine = lock(&self.machine);
        machine.reset();
        self.tx.send_replace(machine.snapshot());
        debug!("controller reset");
    }

    /// Current observable state.
    #[must_use]
    pub fn snapshot(&self) -> ZoomSnapshot {
        *self.tx.borrow()
    }

    /// Subscribe to snapshot updates. Each accepted operation publishes
    /// exactly one value; receivers coalesce to the latest.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ZoomSnapshot> {
        self.tx.subscribe()
    }
}

impl Drop for ZoomController {
    fn drop(&mut self) {
        if let Some(task) = self.warp_task.take() {
            task.abort();
        }
    }
}
