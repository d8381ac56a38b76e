//! Fetch Controller
//!
//! Requests run on a background thread and report back over a channel. Every
//! completion carries the generation that issued it; a completion from an
//! older generation (a torn-down mount, a superseded request) is dropped
//! unseen.

use crate::error::Result;
use crate::record::Record;
use crate::source::RecordSource;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

pub type Generation = u64;

/// Message from a background request
struct Completion<T> {
    generation: Generation,
    result: Result<T>,
}

/// Generation-guarded background job runner
pub struct Loader<T> {
    generation: Generation,
    in_flight: bool,
    tx: Sender<Completion<T>>,
    rx: Receiver<Completion<T>>,
}

impl<T: Send + 'static> Default for Loader<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> Loader<T> {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            generation: 0,
            in_flight: false,
            tx,
            rx,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Run `job` on a background thread under the current generation
    pub fn start<F>(&mut self, job: F)
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        self.in_flight = true;
        let generation = self.generation;
        let tx = self.tx.clone();

        thread::spawn(move || {
            let result = job();
            // Fails only once the loader is dropped
            let _ = tx.send(Completion { generation, result });
        });
    }

    /// Anything started before this call becomes stale
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.in_flight = false;
    }

    /// Drain finished jobs without blocking
    pub fn poll(&mut self) -> Option<Result<T>> {
        while let Ok(completion) = self.rx.try_recv() {
            if let Some(result) = self.accept(completion) {
                return Some(result);
            }
        }
        None
    }

    /// Block until the current generation finishes or `timeout` passes
    pub fn wait(&mut self, timeout: Duration) -> Option<Result<T>> {
        if !self.in_flight {
            return self.poll();
        }

        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return self.wait_forever();
        };
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(completion) => {
                    if let Some(result) = self.accept(completion) {
                        return Some(result);
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None;
                }
            }
        }
    }

    fn wait_forever(&mut self) -> Option<Result<T>> {
        while let Ok(completion) = self.rx.recv() {
            if let Some(result) = self.accept(completion) {
                return Some(result);
            }
        }
        None
    }

    fn accept(&mut self, completion: Completion<T>) -> Option<Result<T>> {
        if completion.generation != self.generation {
            log::debug!(
                "discarding stale response from generation {} (current {})",
                completion.generation,
                self.generation
            );
            return None;
        }
        self.in_flight = false;
        Some(completion.result)
    }
}

/// Owns the one-time retrieval of the record collection for a mount
pub struct FetchController {
    source: Arc<dyn RecordSource>,
    loader: Loader<Vec<Record>>,
    records: Vec<Record>,
    requested: bool,
    last_error: Option<String>,
}

impl FetchController {
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self {
            source,
            loader: Loader::new(),
            records: Vec::new(),
            requested: false,
            last_error: None,
        }
    }

    /// Start the fetch for this mount. Returns `false` if it was already issued.
    pub fn load(&mut self) -> bool {
        if self.requested {
            return false;
        }
        self.requested = true;
        self.last_error = None;

        let source = Arc::clone(&self.source);
        log::info!("loading users (generation {})", self.loader.generation());
        self.loader.start(move || source.fetch_all());
        true
    }

    /// Apply a finished fetch, if any. Returns `true` when state changed.
    pub fn poll(&mut self) -> bool {
        match self.loader.poll() {
            Some(result) => {
                self.apply(result);
                true
            }
            None => false,
        }
    }

    /// Blocking variant of [`poll`](Self::poll) for the CLI and tests
    pub fn wait(&mut self, timeout: Duration) -> bool {
        match self.loader.wait(timeout) {
            Some(result) => {
                self.apply(result);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, result: Result<Vec<Record>>) {
        match result {
            Ok(records) => {
                log::info!("loaded {} users", records.len());
                self.records = records;
            }
            Err(e) => {
                let kind = if e.is_transport() { "transport" } else { "payload" };
                log::error!("failed to load users ({} error): {}", kind, e);
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Tear down the mount: late responses are ignored, the collection is dropped
    pub fn unmount(&mut self) {
        self.loader.invalidate();
        self.records.clear();
        self.requested = false;
        self.last_error = None;
    }

    /// Unmount and load again under a fresh generation
    pub fn reload(&mut self) {
        self.unmount();
        self.load();
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn generation(&self) -> Generation {
        self.loader.generation()
    }
}
