//! CLI for the PDL podcast feed downloader.

mod commands;
mod control_socket;
mod yes_no;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use pdl_core::config::{self, ProgressMode};
use pdl_core::feed::FeedSource;
use std::path::PathBuf;

use commands::{run_download, run_list, run_stop, DownloadSettings};
use yes_no::parse_yes_no;

/// Top-level CLI for the PDL downloader.
#[derive(Debug, Parser)]
#[command(name = "pdl")]
#[command(about = "PDL: download every episode of a podcast feed", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Progress output on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProgressArg {
    /// `Downloading 2 of 5: "title"`
    Counted,
    /// `Downloading "title"`
    Plain,
    /// Log file only.
    Log,
    /// Nothing.
    None,
}

impl From<ProgressArg> for ProgressMode {
    fn from(arg: ProgressArg) -> Self {
        match arg {
            ProgressArg::Counted => ProgressMode::Counted,
            ProgressArg::Plain => ProgressMode::Plain,
            ProgressArg::Log => ProgressMode::Log,
            ProgressArg::None => ProgressMode::None,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every episode enclosure referenced by a feed.
    Download {
        /// Feed URL or path to a local feed file.
        feed: String,

        /// Treat FEED as a local path even if it looks like a URL.
        #[arg(long)]
        local: bool,

        /// Output directory, relative to the working directory. Overrides config.
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Seconds to wait between two downloads. Overrides config.
        #[arg(short, long, value_name = "SECS")]
        delay: Option<u64>,

        /// Name files after the episode title (y/yes/n/no). Overrides config.
        #[arg(long, value_name = "YES|NO", value_parser = parse_yes_no)]
        rename: Option<bool>,

        /// Progress output. Overrides config.
        #[arg(long, value_enum)]
        progress: Option<ProgressArg>,

        /// Print the final report as JSON (progress lines go to stderr).
        #[arg(long)]
        json: bool,
    },

    /// List the episodes of a feed and the file names they would be saved as.
    List {
        /// Feed URL or path to a local feed file.
        feed: String,

        /// Treat FEED as a local path even if it looks like a URL.
        #[arg(long)]
        local: bool,

        /// Name files after the episode title (y/yes/n/no). Overrides config.
        #[arg(long, value_name = "YES|NO", value_parser = parse_yes_no)]
        rename: Option<bool>,
    },

    /// Stop a running `pdl download` after its current episode.
    Stop,
}

fn feed_source(feed: &str, local: bool) -> FeedSource {
    if local {
        FeedSource::Local(PathBuf::from(feed))
    } else {
        FeedSource::detect(feed)
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Download {
                feed,
                local,
                output_dir,
                delay,
                rename,
                progress,
                json,
            } => {
                let settings = DownloadSettings::resolve(
                    &cfg,
                    output_dir,
                    delay,
                    rename,
                    progress.map(ProgressMode::from),
                );
                run_download(&cfg, &feed_source(&feed, local), &settings, json)?;
            }
            CliCommand::List {
                feed,
                local,
                rename,
            } => {
                let rename = rename.unwrap_or(cfg.rename);
                run_list(&cfg, &feed_source(&feed, local), rename)?;
            }
            CliCommand::Stop => run_stop()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
