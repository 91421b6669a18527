//! Lock-and-join charging: a battery advanced by its own worker thread.
//!
//! The tick engine never uses this module; it mutates batteries from its
//! single thread of control.  `SharedBattery` and `ChargeWorker` exist for
//! callers that want charging to progress on a wall-clock timer while other
//! code observes the battery.
//!
//! # Rules
//!
//! - Every read or write of the battery goes through the battery's own
//!   `Mutex`.  [`SharedBattery::snapshot`] copies all fields under one lock
//!   acquisition, so a reader never sees a half-applied step.
//! - A worker is stopped by sending on its cancel channel and is always
//!   joined: by [`ChargeWorker::cancel`], [`ChargeWorker::join`], or on drop.
//!   No worker outlives its handle.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::Battery;

// ── SharedBattery ─────────────────────────────────────────────────────────────

/// A battery behind a mutex, cloneable across threads.
#[derive(Clone, Debug)]
pub struct SharedBattery(Arc<Mutex<Battery>>);

/// Consistent copy of a battery's observable state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BatterySnapshot {
    pub charge_kwh:   f64,
    pub capacity_kwh: f64,
    pub charging:     bool,
}

impl BatterySnapshot {
    pub fn state_of_charge(&self) -> f64 {
        self.charge_kwh / self.capacity_kwh * 100.0
    }

    pub fn is_full(&self) -> bool {
        self.charge_kwh >= self.capacity_kwh
    }
}

impl SharedBattery {
    pub fn new(battery: Battery) -> Self {
        Self(Arc::new(Mutex::new(battery)))
    }

    /// Copy the battery's state under a single lock acquisition.
    pub fn snapshot(&self) -> BatterySnapshot {
        let b = self.lock();
        BatterySnapshot {
            charge_kwh:   b.charge_kwh(),
            capacity_kwh: b.capacity_kwh(),
            charging:     b.is_charging(),
        }
    }

    /// Run `f` with exclusive access to the battery.
    pub fn with<R>(&self, f: impl FnOnce(&mut Battery) -> R) -> R {
        f(&mut self.lock())
    }

    /// Recover the battery once no other handle (including workers) holds it.
    pub fn try_into_inner(self) -> Result<Battery, SharedBattery> {
        match Arc::try_unwrap(self.0) {
            Ok(m)   => Ok(m.into_inner().unwrap_or_else(PoisonError::into_inner)),
            Err(rc) => Err(SharedBattery(rc)),
        }
    }

    // Battery arithmetic cannot leave the value half-updated, so a poisoned
    // lock still guards a consistent battery.
    fn lock(&self) -> MutexGuard<'_, Battery> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── ChargeWorker ──────────────────────────────────────────────────────────────

/// Why a [`ChargeWorker`] stopped.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum WorkerExit {
    /// The battery reached full charge.
    Full,
    /// The worker was cancelled before the battery filled.
    Cancelled,
}

/// Handle to a thread that applies one charge step to a [`SharedBattery`]
/// every `period` until the battery is full or the worker is cancelled.
pub struct ChargeWorker {
    cancel: Option<Sender<()>>,
    handle: Option<JoinHandle<WorkerExit>>,
}

impl ChargeWorker {
    /// Mark `battery` as charging and start stepping it.
    pub fn spawn(battery: SharedBattery, period: Duration) -> Self {
        let (cancel, cancelled) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            if !battery.with(|b| b.start_charging()) {
                return WorkerExit::Full;
            }
            loop {
                match cancelled.recv_timeout(period) {
                    Err(RecvTimeoutError::Timeout) => {
                        let full = battery.with(|b| {
                            b.charge_step(1);
                            b.is_full()
                        });
                        if full {
                            return WorkerExit::Full;
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                        battery.with(Battery::stop_charging);
                        return WorkerExit::Cancelled;
                    }
                }
            }
        });
        Self {
            cancel: Some(cancel),
            handle: Some(handle),
        }
    }

    /// Whether the worker thread has already exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Ask the worker to stop and wait for it.  A worker that filled the
    /// battery before seeing the request still reports [`WorkerExit::Full`].
    pub fn cancel(mut self) -> WorkerExit {
        self.request_stop();
        self.wait()
    }

    /// Wait for the worker to fill the battery.
    pub fn join(mut self) -> WorkerExit {
        self.wait()
    }

    fn request_stop(&mut self) {
        if let Some(tx) = self.cancel.take() {
            // The worker may already have exited and dropped its receiver.
            let _ = tx.send(());
        }
    }

    fn wait(&mut self) -> WorkerExit {
        match self.handle.take() {
            Some(handle) => match handle.join() {
                Ok(exit)   => exit,
                Err(panic) => std::panic::resume_unwind(panic),
            },
            None => WorkerExit::Cancelled,
        }
    }
}

impl Drop for ChargeWorker {
    fn drop(&mut self) {
        self.request_stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
