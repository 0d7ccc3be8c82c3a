//! Tests for the download subcommand.

use super::{parse, parse_err};
use crate::cli::{CliCommand, ProgressArg};
use std::path::Path;

#[test]
fn cli_parse_download_defaults() {
    match parse(&["pdl", "download", "https://example.com/feed.xml"]) {
        CliCommand::Download {
            feed,
            local,
            output_dir,
            delay,
            rename,
            progress,
            json,
        } => {
            assert_eq!(feed, "https://example.com/feed.xml");
            assert!(!local);
            assert!(output_dir.is_none());
            assert!(delay.is_none());
            assert!(rename.is_none());
            assert!(progress.is_none());
            assert!(!json);
        }
        _ => panic!("expected Download"),
    }
}

#[test]
fn cli_parse_download_all_options() {
    match parse(&[
        "pdl",
        "download",
        "feeds/show.xml",
        "--local",
        "-o",
        "casts",
        "--delay",
        "3",
        "--rename",
        "No",
        "--progress",
        "plain",
        "--json",
    ]) {
        CliCommand::Download {
            feed,
            local,
            output_dir,
            delay,
            rename,
            progress,
            json,
        } => {
            assert_eq!(feed, "feeds/show.xml");
            assert!(local);
            assert_eq!(output_dir.as_deref(), Some(Path::new("casts")));
            assert_eq!(delay, Some(3));
            assert_eq!(rename, Some(false));
            assert_eq!(progress, Some(ProgressArg::Plain));
            assert!(json);
        }
        _ => panic!("expected Download with options"),
    }
}

#[test]
fn cli_parse_download_rename_yes() {
    match parse(&["pdl", "download", "f.xml", "--rename", "y"]) {
        CliCommand::Download { rename, .. } => assert_eq!(rename, Some(true)),
        _ => panic!("expected Download"),
    }
}

#[test]
fn cli_parse_download_rejects_bad_rename() {
    parse_err(&["pdl", "download", "f.xml", "--rename", "maybe"]);
}

#[test]
fn cli_parse_download_rejects_negative_delay() {
    parse_err(&["pdl", "download", "f.xml", "--delay", "-1"]);
}

#[test]
fn cli_parse_download_requires_feed() {
    parse_err(&["pdl", "download"]);
}
