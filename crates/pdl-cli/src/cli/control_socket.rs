//! Control socket: server (during `pdl download`) and client (for `pdl stop`).
//! Protocol: one command per line, see [`ControlCommand`].

use anyhow::{Context, Result};
use pdl_core::control::ControlCommand;
use std::io::{self, BufRead, BufReader, Write};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Binds `path` (replacing a stale socket) and spawns a thread that sets
/// `abort` for every stop command received. Ignores malformed lines.
pub fn spawn_control_listener(
    abort: Arc<AtomicBool>,
    path: impl AsRef<Path>,
) -> Result<thread::JoinHandle<()>> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create control socket dir {}", dir.display()))?;
    }
    let _ = std::fs::remove_file(path);
    let listener = UnixListener::bind(path)
        .with_context(|| format!("bind control socket {}", path.display()))?;

    let handle = thread::spawn(move || {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let abort = Arc::clone(&abort);
                    thread::spawn(move || serve_connection(stream, &abort));
                }
                Err(e) => tracing::debug!("control socket accept: {}", e),
            }
        }
    });
    Ok(handle)
}

fn serve_connection(stream: UnixStream, abort: &AtomicBool) {
    for line in BufReader::new(stream).lines() {
        let Ok(line) = line else { break };
        if let Some(ControlCommand::Stop) = ControlCommand::parse(&line) {
            tracing::info!("stop requested over control socket");
            abort.store(true, Ordering::Relaxed);
        }
    }
}

/// Sends `command` to a running `pdl download`. Returns `false` when no run
/// is listening (no socket, or a stale one).
pub fn send(socket_path: &Path, command: ControlCommand) -> Result<bool> {
    if !socket_path.exists() {
        return Ok(false);
    }
    let mut stream = match UnixStream::connect(socket_path) {
        Ok(s) => s,
        Err(e) if e.kind() == io::ErrorKind::ConnectionRefused => return Ok(false),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("connect control socket {}", socket_path.display()))
        }
    };
    stream.write_all(command.as_line().as_bytes())?;
    Ok(true)
}
