//! Per-episode progress reporting.
//!
//! The download loop emits one [`ProgressUpdate`] per episode start and per
//! failed transfer. Sinks decide how (and whether) to show them; they return
//! nothing, so a broken sink cannot fail a download run.

use std::io::Write;

/// Which variant of the "Downloading" line to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressStyle {
    /// `Downloading 2 of 5: "Title"`
    #[default]
    Counted,
    /// `Downloading "Title"`
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Episode `index` (1-based) of `total` is about to be fetched.
    Downloading {
        index: usize,
        total: usize,
        title: String,
    },
    /// The transfer for `file` failed.
    Failed { file: String, error: String },
}

impl ProgressEvent {
    /// Human-readable line for this event.
    pub fn message(&self, style: ProgressStyle) -> String {
        match (self, style) {
            (ProgressEvent::Downloading { index, total, title }, ProgressStyle::Counted) => {
                format!("Downloading {} of {}: \"{}\"", index, total, title)
            }
            (ProgressEvent::Downloading { title, .. }, ProgressStyle::Plain) => {
                format!("Downloading \"{}\"", title)
            }
            (ProgressEvent::Failed { error, .. }, _) => format!("  ERROR -> {}", error),
        }
    }
}

/// An event together with its rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub event: ProgressEvent,
    pub message: String,
}

impl ProgressUpdate {
    pub fn new(event: ProgressEvent, style: ProgressStyle) -> Self {
        let message = event.message(style);
        Self { event, message }
    }
}

pub trait ProgressSink {
    fn report(&mut self, update: &ProgressUpdate);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn report(&mut self, _update: &ProgressUpdate) {}
}

/// Writes each message as one line (e.g. to stdout).
pub struct TextProgress<W: Write> {
    out: W,
}

impl<W: Write> TextProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TextProgress<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ProgressSink for TextProgress<W> {
    fn report(&mut self, update: &ProgressUpdate) {
        let res = writeln!(self.out, "{}", update.message).and_then(|_| self.out.flush());
        if let Err(e) = res {
            tracing::warn!("progress output failed: {}", e);
        }
    }
}

/// Emits structured tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn report(&mut self, update: &ProgressUpdate) {
        match &update.event {
            ProgressEvent::Downloading { index, total, title } => {
                tracing::info!(index, total, title = %title, "{}", update.message);
            }
            ProgressEvent::Failed { file, error } => {
                tracing::warn!(file = %file, error = %error, "{}", update.message);
            }
        }
    }
}

/// Keeps every update in memory, for callers that render progress themselves.
#[derive(Debug, Default, Clone)]
pub struct MemoryProgress {
    pub updates: Vec<ProgressUpdate>,
}

impl MemoryProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.updates.iter().map(|u| u.message.as_str()).collect()
    }
}

impl ProgressSink for MemoryProgress {
    fn report(&mut self, update: &ProgressUpdate) {
        self.updates.push(update.clone());
    }
}
