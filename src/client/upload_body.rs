//! Streamed upload body that records when the last byte left the client
//!
//! The body is handed to the connection in chunks. The instant the final
//! chunk is taken by the transport is recorded, then refined if the
//! transport polls the stream once more for end-of-body.

use futures::stream::{self, Stream};
use reqwest::Body;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Chunk size handed to the transport per poll
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Shared slot holding the upload write-complete instant
#[derive(Debug, Clone, Default)]
pub struct WriteMarker(Arc<Mutex<Option<Instant>>>);

impl WriteMarker {
    /// When the body was fully written, if it has been
    pub fn get(&self) -> Option<Instant> {
        self.0.lock().ok().and_then(|slot| *slot)
    }

    fn mark(&self) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(Instant::now());
        }
    }
}

/// Wrap `payload` in a streaming body plus the marker it will fill in
pub fn instrumented(payload: Vec<u8>) -> (Body, WriteMarker) {
    let marker = WriteMarker::default();
    let body = Body::wrap_stream(chunk_stream(payload, marker.clone()));
    (body, marker)
}

fn chunk_stream(payload: Vec<u8>, marker: WriteMarker) -> impl Stream<Item = io::Result<Vec<u8>>> + Send + 'static {
    let chunks: Vec<Vec<u8>> = payload.chunks(CHUNK_SIZE).map(<[u8]>::to_vec).collect();

    stream::unfold((chunks.into_iter(), marker), |(mut chunks, marker)| async move {
        match chunks.next() {
            Some(chunk) => {
                if chunks.as_slice().is_empty() {
                    marker.mark();
                }
                Some((Ok::<_, io::Error>(chunk), (chunks, marker)))
            }
            None => {
                marker.mark();
                None
            }
        }
    })
}
