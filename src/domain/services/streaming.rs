#[cfg(test)]
#[path = "streaming_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use tokio::time;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_STREAM_DELAY_MS: u64 = 30;

/// Replays a reply that arrived in one piece as a paced sequence of chunks.
/// Swap this out if the backend ever gains real incremental delivery; callers
/// only see the chunk callback.
#[derive(Clone, Debug)]
pub struct StreamSimulator {
    delay: Duration,
}

impl Default for StreamSimulator {
    fn default() -> StreamSimulator {
        return StreamSimulator::new(Duration::from_millis(DEFAULT_STREAM_DELAY_MS));
    }
}

impl StreamSimulator {
    pub fn new(delay: Duration) -> StreamSimulator {
        return StreamSimulator { delay };
    }

    pub fn delay(&self) -> Duration {
        return self.delay;
    }

    /// Splits on single spaces and re-attaches one space to every token but the
    /// last. Joining the chunks gives back the input byte for byte.
    pub fn chunks(text: &str) -> Vec<String> {
        let words = text.split(' ').collect::<Vec<&str>>();
        let last = words.len() - 1;

        return words
            .iter()
            .enumerate()
            .map(|(idx, word)| {
                if idx < last {
                    return format!("{word} ");
                }
                return word.to_string();
            })
            .collect();
    }

    /// Hands each chunk to `on_chunk` in order, pausing `delay` before every
    /// one. Stops before the next chunk once `token` is cancelled; pass a token
    /// nobody cancels to always run to the end. Returns whether every chunk was
    /// delivered.
    pub async fn deliver<F>(
        &self,
        text: &str,
        token: &CancellationToken,
        mut on_chunk: F,
    ) -> Result<bool>
    where
        F: FnMut(String) -> Result<()>,
    {
        for chunk in StreamSimulator::chunks(text) {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    return Ok(false);
                }
                _ = time::sleep(self.delay) => {}
            }
            on_chunk(chunk)?;
        }

        return Ok(true);
    }
}
