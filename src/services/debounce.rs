// src/services/debounce.rs
//
// Debounced background jobs
//
// CRITICAL RULES:
// - At most one job is pending or running at a time
// - Scheduling a new job aborts the previous task
// - A job must check its ticket before applying results; an aborted task may
//   already have finished its await point when the abort lands

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Proof that a job is still the latest one scheduled
#[derive(Debug, Clone)]
pub struct DebounceTicket {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl DebounceTicket {
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }
}

pub struct Debouncer {
    window: Duration,
    generation: Arc<AtomicU64>,
    task_handle: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: Arc::new(AtomicU64::new(0)),
            task_handle: Arc::new(Mutex::new(None)),
        }
    }

    /// Run `job` once the window elapses without another `schedule` or `cancel`.
    /// Must be called from within a tokio runtime.
    pub fn schedule<F, Fut>(&self, job: F)
    where
        F: FnOnce(DebounceTicket) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let ticket = self.supersede();
        let window = self.window;

        let task = tokio::spawn(async move {
            tokio::time::sleep(window).await;

            if !ticket.is_current() {
                return;
            }

            job(ticket).await;
        });

        let mut handle = self.task_handle.lock().unwrap_or_else(PoisonError::into_inner);
        *handle = Some(task);
    }

    /// Drop whatever is pending or in flight
    pub fn cancel(&self) {
        self.supersede();
    }

    pub fn is_pending(&self) -> bool {
        self.task_handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }

    fn supersede(&self) -> DebounceTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let mut handle = self.task_handle.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = handle.take() {
            task.abort();
        }

        DebounceTicket {
            generation,
            current: Arc::clone(&self.generation),
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
