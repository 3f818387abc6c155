//! Operator quit keyword on standard input.
//!
//! # Responsibilities
//! - Keep the last four bytes typed in a ring
//! - Report when they spell the keyword, in order
//!
//! # Design Decisions
//! - Matching is byte-wise and ignores line boundaries: `"xquit"` matches
//! - End of input is not a stop request; other triggers still apply

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;

use crate::lifecycle::shutdown::{Shutdown, StopReason};

/// Keyword that stops the relay.
pub const QUIT_KEYWORD: [u8; 4] = *b"quit";

/// Rolling window over the last four bytes read.
#[derive(Debug, Clone)]
pub struct KeywordRing {
    keyword: [u8; 4],
    slots: [u8; 4],
    cursor: usize,
}

impl KeywordRing {
    pub fn new(keyword: [u8; 4]) -> Self {
        Self {
            keyword,
            slots: [0; 4],
            cursor: 0,
        }
    }

    /// Record `byte`; true when the window now equals the keyword.
    pub fn push(&mut self, byte: u8) -> bool {
        self.slots[self.cursor & 3] = byte;
        self.cursor = self.cursor.wrapping_add(1);

        // `cursor` now indexes the oldest byte.
        (0..4).all(|i| self.slots[self.cursor.wrapping_add(i) & 3] == self.keyword[i])
    }
}

/// How a watcher finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    Matched,
    InputClosed,
}

/// Read `input` until `keyword` has been typed or input ends.
pub async fn watch_for_keyword<R>(mut input: R, keyword: [u8; 4]) -> std::io::Result<WatchOutcome>
where
    R: AsyncRead + Unpin,
{
    let mut ring = KeywordRing::new(keyword);
    let mut buf = [0u8; 64];

    loop {
        let n = input.read(&mut buf).await?;
        if n == 0 {
            return Ok(WatchOutcome::InputClosed);
        }
        if buf[..n].iter().any(|&byte| ring.push(byte)) {
            return Ok(WatchOutcome::Matched);
        }
    }
}

/// Watch `input` for the quit keyword and trigger `shutdown` on a match.
pub fn spawn_keyword_watcher<R>(input: R, shutdown: Shutdown) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        match watch_for_keyword(input, QUIT_KEYWORD).await {
            Ok(WatchOutcome::Matched) => {
                tracing::info!("Quit keyword received");
                shutdown.trigger(StopReason::Keyword);
            }
            Ok(WatchOutcome::InputClosed) => {
                tracing::info!("Standard input closed, keyword shutdown unavailable");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read standard input");
            }
        }
    })
}
