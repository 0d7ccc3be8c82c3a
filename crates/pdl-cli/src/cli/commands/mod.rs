//! CLI command handlers. Each command is in its own file.

mod download;
mod list;
mod stop;

pub use download::{run_download, DownloadSettings};
pub use list::run_list;
pub use stop::run_stop;

/// "1 file in total." / "3 files in total."
pub(crate) fn files_in_total(n: usize) -> String {
    format!("{} file{} in total.", n, if n == 1 { "" } else { "s" })
}
