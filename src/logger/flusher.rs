//! Background flush loop: one thread per logger core, woken by a ticker or
//! by an explicit request.

use crate::internal;
use crate::output::Writer;
use crossbeam_channel::{Sender, TrySendError, bounded, select, tick};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub(super) type WriterList = Arc<RwLock<Vec<Arc<dyn Writer>>>>;

/// Owns the flush thread. Dropping the request sender ends the loop.
#[derive(Default)]
pub(super) struct Flusher {
    signal: Mutex<Option<Sender<()>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Flusher {
    /// No thread; [`Flusher::request`] always reports that nobody is listening.
    pub(super) fn disabled() -> Self {
        Self::default()
    }

    pub(super) fn spawn(interval: Duration, writers: WriterList) -> Self {
        // One slot: a request made while another is pending is dropped.
        let (tx, rx) = bounded::<()>(1);
        let spawned = thread::Builder::new()
            .name("cascadelog-flush".to_string())
            .spawn(move || {
                let ticker = tick(interval);
                loop {
                    select! {
                        recv(ticker) -> _ => flush_all(&writers),
                        recv(rx) -> msg => match msg {
                            Ok(()) => flush_all(&writers),
                            Err(_) => break,
                        },
                    }
                }
            });

        match spawned {
            Ok(handle) => Self {
                signal: Mutex::new(Some(tx)),
                handle: Mutex::new(Some(handle)),
            },
            Err(e) => {
                internal::error("FLUSH", &format!("Failed to start flush thread: {e}"));
                Self::disabled()
            }
        }
    }

    /// Asks the thread for a flush without blocking. Returns `false` when
    /// there is no thread to ask, so the caller can flush inline.
    pub(super) fn request(&self) -> bool {
        let signal = self.signal.lock().unwrap_or_else(PoisonError::into_inner);
        match signal.as_ref().map(|tx| tx.try_send(())) {
            Some(Ok(()) | Err(TrySendError::Full(()))) => true,
            Some(Err(TrySendError::Disconnected(()))) | None => false,
        }
    }

    /// Ends the loop and waits for the thread. Safe to call more than once.
    pub(super) fn stop(&self) {
        drop(self.signal.lock().unwrap_or_else(PoisonError::into_inner).take());
        let handle = self.handle.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(handle) = handle
            && handle.thread().id() != thread::current().id()
        {
            let _ = handle.join();
        }
    }
}

pub(super) fn flush_all(writers: &RwLock<Vec<Arc<dyn Writer>>>) {
    let writers = writers.read().unwrap_or_else(PoisonError::into_inner);
    for writer in writers.iter() {
        if let Err(e) = writer.flush() {
            internal::warn("FLUSH", &format!("Writer flush failed: {e}"));
        }
    }
}
