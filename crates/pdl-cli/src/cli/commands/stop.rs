//! `pdl stop` – ask a running `pdl download` to stop after its current item.

use anyhow::Result;
use pdl_core::control::{self, ControlCommand};

use crate::cli::control_socket;

pub fn run_stop() -> Result<()> {
    let path = control::default_control_socket_path()?;
    if control_socket::send(&path, ControlCommand::Stop)? {
        println!("Stop requested; the download ends after the current episode.");
    } else {
        println!("No download is running.");
    }
    Ok(())
}
