//! Display sinks: where encoded frames end up.
//!
//! The engine only produces frames. Delivery strategy (rate limits, retries,
//! fallbacks) belongs to the sink, so a misbehaving display never touches
//! game state.

use super::Frame;
use crossterm::execute;
use crossterm::terminal::SetTitle;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Why a sink could not surface a frame.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("display update throttled, next write allowed in {0:?}")]
    Throttled(Duration),
    #[error("display write failed: {0}")]
    Io(#[from] io::Error),
    #[error("display channel closed")]
    Closed,
}

/// Anything that can show a frame to the player.
pub trait DisplaySink {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    fn show(&mut self, frame: &Frame) -> Result<(), SinkError>;
}

/// Writes the address-bar string into the terminal window title.
///
/// Terminals (and the multiplexers between them and the user) cope badly with
/// a title changing every few milliseconds, so writes closer together than
/// `min_interval` are refused with [`SinkError::Throttled`].
pub struct TitleSink<W: Write> {
    out: W,
    min_interval: Duration,
    last_write: Option<Instant>,
}

impl<W: Write> TitleSink<W> {
    pub fn new(out: W, min_interval: Duration) -> Self {
        Self {
            out,
            min_interval,
            last_write: None,
        }
    }

    /// Like [`DisplaySink::show`] but with an explicit clock reading.
    pub fn show_at(&mut self, frame: &Frame, now: Instant) -> Result<(), SinkError> {
        if let Some(last) = self.last_write {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.min_interval {
                return Err(SinkError::Throttled(self.min_interval - elapsed));
            }
        }
        execute!(self.out, SetTitle(&frame.text))?;
        self.last_write = Some(now);
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for TitleSink<W> {
    fn name(&self) -> &'static str {
        "title"
    }

    fn show(&mut self, frame: &Frame) -> Result<(), SinkError> {
        self.show_at(frame, Instant::now())
    }
}

/// Keeps the most recent frame in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    latest: Option<Frame>,
    writes: u64,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<&Frame> {
        self.latest.as_ref()
    }

    /// Number of frames received so far.
    pub fn writes(&self) -> u64 {
        self.writes
    }
}

impl DisplaySink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn show(&mut self, frame: &Frame) -> Result<(), SinkError> {
        self.latest = Some(frame.clone());
        self.writes += 1;
        Ok(())
    }
}

/// Tries `primary` first and hands the frame to `fallback` when it fails.
pub struct FallbackSink<P, F> {
    primary: P,
    fallback: F,
    fallbacks: u64,
}

impl<P: DisplaySink, F: DisplaySink> FallbackSink<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self {
            primary,
            fallback,
            fallbacks: 0,
        }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    /// How many frames went to the fallback.
    pub fn fallbacks(&self) -> u64 {
        self.fallbacks
    }
}

impl<P: DisplaySink, F: DisplaySink> DisplaySink for FallbackSink<P, F> {
    fn name(&self) -> &'static str {
        self.primary.name()
    }

    fn show(&mut self, frame: &Frame) -> Result<(), SinkError> {
        match self.primary.show(frame) {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::debug!(
                    sink = self.primary.name(),
                    fallback = self.fallback.name(),
                    %err,
                    "primary display rejected frame"
                );
                self.fallbacks += 1;
                self.fallback.show(frame)
            }
        }
    }
}
