//! Background image decoding
//!
//! Decoding a large upload can take a noticeable time, so it runs on a
//! worker thread. Finished results wait in a shared queue until the UI
//! thread drains them at the start of the next frame.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use dk_core::texture::decode_file;
use dk_core::{DecalId, Texture, TextureError};
use parking_lot::Mutex;

/// Outcome of one decode request
pub type DecodeResult = (DecalId, Result<Texture, TextureError>);

/// Handle of one decode request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeTicket(u64);

#[derive(Debug)]
struct Request {
    decal: DecalId,
    cancelled: bool,
}

#[derive(Debug, Default)]
struct Inner {
    finished: Vec<DecodeResult>,
    in_flight: HashMap<DecodeTicket, Request>,
    next_ticket: u64,
}

/// Queue of finished decodes
#[derive(Debug, Clone, Default)]
pub struct DecodeQueue {
    inner: Arc<Mutex<Inner>>,
}

impl DecodeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `path` in the background for `decal`
    pub fn spawn(&self, decal: DecalId, path: PathBuf) {
        let ticket = self.start(decal);
        let queue = self.clone();
        std::thread::spawn(move || {
            let result = decode_file(&path);
            match &result {
                Ok(texture) => tracing::info!(
                    "Decoded {:?} ({}x{})",
                    path,
                    texture.width(),
                    texture.height()
                ),
                Err(e) => tracing::warn!("Failed to decode {:?}: {}", path, e),
            }
            queue.finish(ticket, result);
        });
    }

    /// Register a request for `decal` whose result arrives through [`Self::finish`]
    pub fn start(&self, decal: DecalId) -> DecodeTicket {
        let mut inner = self.inner.lock();
        let ticket = DecodeTicket(inner.next_ticket);
        inner.next_ticket += 1;
        inner.in_flight.insert(
            ticket,
            Request {
                decal,
                cancelled: false,
            },
        );
        ticket
    }

    /// Record the result of a request; cancelled requests are dropped
    pub fn finish(&self, ticket: DecodeTicket, result: Result<Texture, TextureError>) {
        let mut inner = self.inner.lock();
        match inner.in_flight.remove(&ticket) {
            Some(request) if !request.cancelled => inner.finished.push((request.decal, result)),
            Some(request) => {
                tracing::debug!("Dropping decode for cleared decal {}", request.decal)
            }
            None => tracing::warn!("Decode result for unknown request {:?}", ticket),
        }
    }

    /// Discard running and undrained decodes for `decal`
    pub fn cancel(&self, decal: DecalId) {
        let mut inner = self.inner.lock();
        for request in inner.in_flight.values_mut() {
            if request.decal == decal {
                request.cancelled = true;
            }
        }
        inner.finished.retain(|(id, _)| *id != decal);
    }

    /// Take every finished decode, oldest first
    pub fn drain(&self) -> Vec<DecodeResult> {
        std::mem::take(&mut self.inner.lock().finished)
    }

    /// Number of decodes still running and not cancelled
    pub fn pending(&self) -> usize {
        self.inner
            .lock()
            .in_flight
            .values()
            .filter(|request| !request.cancelled)
            .count()
    }
}
