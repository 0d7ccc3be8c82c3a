//! Download orchestration: fetch every enclosure of a feed, one item at a
//! time, in document order.
//!
//! Failure handling is asymmetric:
//! - output directory creation and item parsing abort the run (no report),
//! - a failed transfer is recorded as an outcome and the run moves on.
//!
//! Progress sinks and fetchers are isolated from the loop; a panic in either
//! is caught and does not unwind through the run.

mod error;
mod output_dir;

pub use error::DownloadError;
pub use output_dir::prepare_output_dir;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::episode::Episode;
use crate::feed::Element;
use crate::fetch::Fetch;
use crate::naming::resolve_file_name;
use crate::progress::{ProgressEvent, ProgressSink, ProgressStyle, ProgressUpdate};
use crate::report::{BatchReport, DownloadOutcome};

/// How often the between-items pause looks at the abort token.
const ABORT_POLL: Duration = Duration::from_millis(100);

/// Parameters of one run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DownloadOptions {
    /// Pause between two items (never after the last one).
    pub delay: Duration,
    /// Output directory relative to the base directory; empty = base directory.
    pub output_dir: PathBuf,
    /// Name files after the episode title.
    pub rename: bool,
    /// Variant of the "Downloading" progress line.
    pub style: ProgressStyle,
}

/// Where one episode goes on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub file_name: String,
    pub dest: PathBuf,
}

impl DownloadTask {
    pub fn for_episode(episode: &Episode, output_dir: &Path, rename: bool) -> Self {
        let file_name = resolve_file_name(episode, rename);
        let dest = output_dir.join(&file_name);
        Self { file_name, dest }
    }
}

/// Downloads every item. `base_dir` is what a relative `output_dir` is
/// resolved against (normally the working directory).
pub fn run(
    items: &[&Element],
    options: &DownloadOptions,
    base_dir: &Path,
    fetcher: &dyn Fetch,
    progress: &mut dyn ProgressSink,
) -> Result<BatchReport, DownloadError> {
    let abort = AtomicBool::new(false);
    run_with_abort(items, options, base_dir, fetcher, progress, &abort)
}

/// Like [`run`], but stops between two items once `abort` is set and returns
/// the partial report with `cancelled` set. The CLI sets the token from its
/// control socket (`pdl stop`).
pub fn run_with_abort(
    items: &[&Element],
    options: &DownloadOptions,
    base_dir: &Path,
    fetcher: &dyn Fetch,
    progress: &mut dyn ProgressSink,
    abort: &AtomicBool,
) -> Result<BatchReport, DownloadError> {
    let output_dir = prepare_output_dir(base_dir, &options.output_dir)?;
    let total = items.len();
    let mut report = BatchReport::with_capacity(total);

    tracing::info!(
        total,
        output_dir = %output_dir.display(),
        rename = options.rename,
        delay_secs = options.delay.as_secs_f64(),
        "download run started"
    );

    for (i, item) in items.iter().enumerate() {
        let index = i + 1;
        let episode =
            Episode::from_item(item).map_err(|source| DownloadError::Parse { index, source })?;

        notify(
            progress,
            ProgressEvent::Downloading {
                index,
                total,
                title: episode.title().to_string(),
            },
            options.style,
        );

        let task = DownloadTask::for_episode(&episode, &output_dir, options.rename);
        tracing::debug!(
            index,
            guid = episode.guid(),
            url = episode.source_url(),
            dest = %task.dest.display(),
            "fetching episode"
        );

        match fetch_isolated(fetcher, episode.source_url(), &task.dest) {
            Ok(()) => report.record(DownloadOutcome::success(task.file_name)),
            Err(error) => {
                tracing::warn!(index, file = %task.file_name, "fetch failed: {}", error);
                notify(
                    progress,
                    ProgressEvent::Failed {
                        file: task.file_name.clone(),
                        error: error.clone(),
                    },
                    options.style,
                );
                report.record(DownloadOutcome::failure(task.file_name, error));
            }
        }

        if index < total && pause_between_items(options.delay, abort) {
            tracing::info!(done = index, total, "download run cancelled");
            report.cancelled = true;
            break;
        }
    }

    tracing::info!(
        total = report.total_items,
        downloaded = report.total_downloaded,
        errors = report.total_errors,
        "download run finished"
    );
    Ok(report)
}

/// Runs the fetcher, turning both errors and panics into a message.
fn fetch_isolated(fetcher: &dyn Fetch, url: &str, dest: &Path) -> Result<(), String> {
    let message = match panic::catch_unwind(AssertUnwindSafe(|| fetcher.fetch(url, dest))) {
        Ok(Ok(())) => return Ok(()),
        Ok(Err(e)) => e.to_string(),
        Err(payload) => format!("fetch panicked: {}", panic_message(payload.as_ref())),
    };
    if message.is_empty() {
        Err("fetch failed".to_string())
    } else {
        Err(message)
    }
}

/// Best-effort delivery to the sink; a panicking sink is logged and ignored.
fn notify(progress: &mut dyn ProgressSink, event: ProgressEvent, style: ProgressStyle) {
    let update = ProgressUpdate::new(event, style);
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| progress.report(&update))) {
        tracing::warn!(
            "progress sink panicked: {}",
            panic_message(payload.as_ref())
        );
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Blocks for `delay`, returning early with `true` as soon as `abort` is set.
/// A delay too large to put a deadline on waits for the abort token only.
fn pause_between_items(delay: Duration, abort: &AtomicBool) -> bool {
    let deadline = Instant::now().checked_add(delay);
    loop {
        if abort.load(Ordering::Relaxed) {
            return true;
        }
        let remaining = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return false;
                }
                deadline - now
            }
            None => ABORT_POLL,
        };
        thread::sleep(remaining.min(ABORT_POLL));
    }
}
