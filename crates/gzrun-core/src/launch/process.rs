use std::io::Read;
use std::process::{Child, Command, Stdio};

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use super::args::LaunchPlan;
use super::errors::LaunchError;

/// Size of a single stdout read. Each successful read becomes one chunk.
const READ_BUFFER_SIZE: usize = 8192;

/// A running program and the stream of its standard output.
///
/// The stream ends when the program closes its stdout. Process exit is only
/// logged; callers never observe it.
pub struct LaunchHandle {
    pub pid: u32,
    pub output: UnboundedReceiver<String>,
}

/// Spawn the planned program with its stdout piped back as text chunks.
///
/// The child inherits the working directory, environment and stderr of this
/// process. A dedicated OS thread performs the blocking reads and reaps the
/// child once its stdout closes.
pub fn spawn(plan: &LaunchPlan) -> Result<LaunchHandle, LaunchError> {
    info!(
        event = "core.launch.spawn_started",
        program = %plan.program.display(),
        args = ?plan.display_args()
    );

    let mut child = Command::new(&plan.program)
        .args(&plan.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| {
            warn!(
                event = "core.launch.spawn_failed",
                program = %plan.program.display(),
                error = %source
            );
            LaunchError::SpawnFailed {
                program: plan.program.clone(),
                source,
            }
        })?;

    let pid = child.id();
    let Some(stdout) = child.stdout.take() else {
        return Err(LaunchError::StdoutUnavailable {
            program: plan.program.clone(),
        });
    };

    let (tx, rx) = futures::channel::mpsc::unbounded::<String>();
    std::thread::Builder::new()
        .name(format!("gzrun-output-{}", pid))
        .spawn(move || {
            let chunks = pump_chunks(stdout, &tx, pid);
            drop(tx);
            reap(child, pid, chunks);
        })
        .map_err(|source| LaunchError::ReaderFailed {
            program: plan.program.clone(),
            source,
        })?;

    info!(event = "core.launch.spawn_completed", pid = pid);

    Ok(LaunchHandle { pid, output: rx })
}

/// Forward every read from `reader` as one lossily decoded chunk.
///
/// Returns the number of chunks sent. Stops at EOF, on a read error, or when
/// the receiving side has been dropped.
pub(crate) fn pump_chunks<R: Read>(mut reader: R, tx: &UnboundedSender<String>, pid: u32) -> usize {
    let mut buf = [0u8; READ_BUFFER_SIZE];
    let mut sent = 0;

    loop {
        match reader.read(&mut buf) {
            Ok(0) => {
                debug!(event = "core.launch.output_eof", pid = pid, chunks = sent);
                break;
            }
            Ok(n) => {
                let chunk = String::from_utf8_lossy(&buf[..n]).into_owned();
                if tx.unbounded_send(chunk).is_err() {
                    debug!(
                        event = "core.launch.output_receiver_dropped",
                        pid = pid,
                        chunks = sent
                    );
                    break;
                }
                sent += 1;
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(event = "core.launch.output_read_failed", pid = pid, error = %e);
                break;
            }
        }
    }

    sent
}

fn reap(mut child: Child, pid: u32, chunks: usize) {
    match child.wait() {
        Ok(status) => info!(
            event = "core.launch.process_exited",
            pid = pid,
            code = ?status.code(),
            chunks = chunks
        ),
        Err(e) => warn!(event = "core.launch.process_wait_failed", pid = pid, error = %e),
    }
}
