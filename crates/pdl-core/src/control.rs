//! Stopping a running download from another process.
//!
//! `pdl download` listens on a Unix socket in the XDG state dir while it runs;
//! `pdl stop` connects and sends one command line. The download loop only
//! sees the abort token the listener sets (see
//! [`crate::download::run_with_abort`]).

use std::path::PathBuf;

/// A line understood by the control socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Finish the current item, then end the run with a partial report.
    Stop,
}

impl ControlCommand {
    /// Parses one protocol line; unknown lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "stop" | "cancel" => Some(ControlCommand::Stop),
            _ => None,
        }
    }

    pub fn as_line(self) -> &'static str {
        match self {
            ControlCommand::Stop => "stop\n",
        }
    }
}

/// Default path for the control socket (same XDG state dir as the log).
pub fn default_control_socket_path() -> std::io::Result<PathBuf> {
    let dir = xdg::BaseDirectories::with_prefix("pdl")?.get_state_home();
    Ok(dir.join("control.sock"))
}
