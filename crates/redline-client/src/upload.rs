//! Upload progress reporting
//!
//! The request body is handed to reqwest as a stream of fixed-size chunks.
//! Each chunk pulled by the transport advances the running byte count.

use futures_util::stream::{self, Stream, StreamExt};
use tokio::sync::mpsc;

/// Size of each streamed body chunk
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Sender side of the progress channel passed to [`ReviewClient::review`](crate::ReviewClient::review)
pub type ProgressSender = mpsc::UnboundedSender<UploadProgress>;

/// Bytes handed to the transport so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub sent: u64,
    pub total: u64,
}

impl UploadProgress {
    /// Whole percentage in `0..=100`, rounded down so 100 only means every
    /// byte was sent. An empty body counts as complete.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let pct = self.sent.min(self.total) * 100 / self.total;
        pct as u8
    }

    pub fn is_complete(&self) -> bool {
        self.sent >= self.total
    }
}

/// Split `bytes` into a body stream that reports progress as it is consumed.
///
/// A closed progress receiver is ignored; the upload continues.
pub fn progress_stream(
    bytes: Vec<u8>,
    progress: ProgressSender,
) -> impl Stream<Item = std::io::Result<Vec<u8>>> + Send + 'static {
    let total = bytes.len() as u64;
    let chunks: Vec<Vec<u8>> = bytes.chunks(CHUNK_SIZE).map(<[u8]>::to_vec).collect();

    if chunks.is_empty() {
        let _ = progress.send(UploadProgress { sent: 0, total: 0 });
    }

    let mut sent = 0u64;
    stream::iter(chunks).map(move |chunk| {
        sent += chunk.len() as u64;
        let _ = progress.send(UploadProgress { sent, total });
        Ok(chunk)
    })
}
