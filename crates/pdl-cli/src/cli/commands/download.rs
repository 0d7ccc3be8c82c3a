//! `pdl download` – fetch every episode enclosure of a feed.

use anyhow::{Context, Result};
use pdl_core::config::{PdlConfig, ProgressMode};
use pdl_core::control;
use pdl_core::download::{self, DownloadOptions};
use pdl_core::feed::FeedSource;
use pdl_core::fetch::CurlFetcher;
use pdl_core::progress::{NoopProgress, ProgressSink, TextProgress, TracingProgress};
use pdl_core::report::BatchReport;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use super::files_in_total;
use crate::cli::control_socket;

/// Effective settings for one run: command-line values win over config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSettings {
    pub options: DownloadOptions,
    pub progress: ProgressMode,
}

impl DownloadSettings {
    pub fn resolve(
        cfg: &PdlConfig,
        output_dir: Option<PathBuf>,
        delay: Option<u64>,
        rename: Option<bool>,
        progress: Option<ProgressMode>,
    ) -> Self {
        let progress = progress.unwrap_or(cfg.progress);
        Self {
            options: DownloadOptions {
                delay: Duration::from_secs(delay.unwrap_or(cfg.delay_secs)),
                output_dir: output_dir.unwrap_or_else(|| PathBuf::from(&cfg.output_dir)),
                rename: rename.unwrap_or(cfg.rename),
                style: progress.style(),
            },
            progress,
        }
    }
}

fn progress_sink(mode: ProgressMode, json: bool) -> Box<dyn ProgressSink> {
    match mode {
        ProgressMode::Counted | ProgressMode::Plain if json => {
            Box::new(TextProgress::new(io::stderr()))
        }
        ProgressMode::Counted | ProgressMode::Plain => Box::new(TextProgress::stdout()),
        ProgressMode::Log => Box::new(TracingProgress),
        ProgressMode::None => Box::new(NoopProgress),
    }
}

/// Lines printed after a run.
pub(crate) fn summary_lines(report: &BatchReport) -> Vec<String> {
    let mut lines = Vec::new();
    if report.cancelled {
        lines.push("Download cancelled".to_string());
    } else {
        lines.push("Download complete".to_string());
    }
    lines.push(String::new());
    lines.push(format!("{} files downloaded.", report.total_downloaded));
    lines.push(format!("{} errors.", report.total_errors));
    for failed in report.failures() {
        lines.push(format!(
            "  {}: {}",
            failed.file,
            failed.error.as_deref().unwrap_or("unknown error")
        ));
    }
    lines
}

pub fn run_download(
    cfg: &PdlConfig,
    source: &FeedSource,
    settings: &DownloadSettings,
    json: bool,
) -> Result<()> {
    let fetch_cfg = cfg.fetch_config();
    let feed = source.load(&fetch_cfg)?;
    let items = feed.items();

    if !json {
        println!("Starting download...\n");
        println!("{}\n", files_in_total(items.len()));
    }

    let base_dir = std::env::current_dir().context("resolve working directory")?;
    let fetcher = CurlFetcher::new(fetch_cfg);
    let mut sink = progress_sink(settings.progress, json);

    let abort = Arc::new(AtomicBool::new(false));
    let socket_path = control::default_control_socket_path().ok();
    if let Some(path) = &socket_path {
        match control_socket::spawn_control_listener(Arc::clone(&abort), path) {
            Ok(_) => tracing::debug!(path = %path.display(), "control socket listening"),
            Err(e) => tracing::warn!("control socket unavailable: {:#}", e),
        }
    }

    let result = download::run_with_abort(
        &items,
        &settings.options,
        &base_dir,
        &fetcher,
        sink.as_mut(),
        &abort,
    );
    if let Some(path) = &socket_path {
        let _ = std::fs::remove_file(path);
    }
    let report = result.with_context(|| format!("download from {}", source))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        for line in summary_lines(&report) {
            println!("{}", line);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdl_core::progress::ProgressStyle;
    use pdl_core::report::DownloadOutcome;

    #[test]
    fn resolve_uses_config_defaults() {
        let cfg = PdlConfig::default();
        let s = DownloadSettings::resolve(&cfg, None, None, None, None);
        assert_eq!(s.options.delay, Duration::from_secs(1));
        assert_eq!(s.options.output_dir, PathBuf::from("download"));
        assert!(s.options.rename);
        assert_eq!(s.options.style, ProgressStyle::Counted);
        assert_eq!(s.progress, ProgressMode::Counted);
    }

    #[test]
    fn resolve_prefers_command_line() {
        let cfg = PdlConfig::default();
        let s = DownloadSettings::resolve(
            &cfg,
            Some(PathBuf::from("")),
            Some(0),
            Some(false),
            Some(ProgressMode::Plain),
        );
        assert_eq!(s.options.delay, Duration::ZERO);
        assert_eq!(s.options.output_dir, PathBuf::from(""));
        assert!(!s.options.rename);
        assert_eq!(s.options.style, ProgressStyle::Plain);
        assert_eq!(s.progress, ProgressMode::Plain);
    }

    #[test]
    fn summary_lists_failures() {
        let report = BatchReport {
            total_items: 2,
            total_downloaded: 1,
            total_errors: 1,
            outcomes: vec![
                DownloadOutcome::success("a.mp3"),
                DownloadOutcome::failure("b.mp3", "HTTP 404"),
            ],
            cancelled: false,
        };
        assert_eq!(
            summary_lines(&report),
            vec![
                "Download complete",
                "",
                "1 files downloaded.",
                "1 errors.",
                "  b.mp3: HTTP 404",
            ]
        );
    }

    #[test]
    fn summary_marks_cancelled_runs() {
        let report = BatchReport {
            cancelled: true,
            ..BatchReport::default()
        };
        assert_eq!(summary_lines(&report)[0], "Download cancelled");
    }
}
