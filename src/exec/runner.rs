// src/exec/runner.rs

//! Production run backend.

use std::future::Future;
use std::io::{self, Write};
use std::pin::Pin;
use std::process::{ExitStatus, Stdio};
use std::time::SystemTime;

use chrono::Local;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::display::DisplaySink;
use crate::exec::backend::RunBackend;
use crate::exec::command::CommandLine;

const CHUNK_SIZE: usize = 8192;

/// Runs the configured command and renders its transcript:
///
/// ```text
/// <command line>
/// <combined stdout/stderr, as produced>
/// <exit status or spawn error, only on failure>
/// <local completion time>
/// ```
#[derive(Debug, Clone)]
pub struct CommandRunner {
    command: CommandLine,
}

impl CommandRunner {
    pub fn new(command: CommandLine) -> Self {
        Self { command }
    }
}

impl RunBackend for CommandRunner {
    fn run<'a>(
        &'a mut self,
        display: &'a mut dyn DisplaySink,
    ) -> Pin<Box<dyn Future<Output = SystemTime> + Send + 'a>> {
        Box::pin(async move {
            match display.redisplay() {
                Ok(mut surface) => {
                    if let Err(err) = render_run(&self.command, surface.as_mut()).await {
                        warn!(error = %err, "failed to write run transcript");
                    }
                }
                Err(err) => {
                    warn!(error = %err, "failed to open display surface; skipping run");
                }
            }
            SystemTime::now()
        })
    }
}

/// Run `command` and write its full transcript to `out`.
///
/// Only failures to write to `out` are returned; command failures end up in
/// the transcript.
pub async fn render_run(command: &CommandLine, out: &mut (dyn Write + Send)) -> io::Result<()> {
    writeln!(out, "{command}")?;
    out.flush()?;

    info!(cmd = %command, "starting command");

    match stream_command(command, out).await {
        Ok(status) if status.success() => {
            info!(cmd = %command, "command finished");
        }
        Ok(status) => {
            info!(cmd = %command, %status, "command failed");
            writeln!(out, "{status}")?;
        }
        Err(err) => {
            info!(cmd = %command, error = %err, "command could not be run");
            writeln!(out, "{err}")?;
        }
    }

    writeln!(out, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f %z"))?;
    out.flush()
}

/// Which pipe a chunk came from.
enum Chunk {
    Stdout(io::Result<usize>),
    Stderr(io::Result<usize>),
}

/// Spawn `command` and copy stdout and stderr into `out` as they arrive.
async fn stream_command(
    command: &CommandLine,
    out: &mut (dyn Write + Send),
) -> io::Result<ExitStatus> {
    let mut child = Command::new(command.program())
        .args(command.args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let mut stdout = child.stdout.take();
    let mut stderr = child.stderr.take();
    let mut out_buf = vec![0u8; CHUNK_SIZE];
    let mut err_buf = vec![0u8; CHUNK_SIZE];

    while stdout.is_some() || stderr.is_some() {
        let chunk = tokio::select! {
            n = read_chunk(&mut stdout, &mut out_buf) => Chunk::Stdout(n),
            n = read_chunk(&mut stderr, &mut err_buf) => Chunk::Stderr(n),
        };

        match chunk {
            Chunk::Stdout(Ok(0)) => stdout = None,
            Chunk::Stderr(Ok(0)) => stderr = None,
            Chunk::Stdout(Ok(n)) => copy_chunk(out, &out_buf[..n]),
            Chunk::Stderr(Ok(n)) => copy_chunk(out, &err_buf[..n]),
            Chunk::Stdout(Err(err)) => {
                debug!(error = %err, "stdout read failed");
                stdout = None;
            }
            Chunk::Stderr(Err(err)) => {
                debug!(error = %err, "stderr read failed");
                stderr = None;
            }
        }
    }

    child.wait().await
}

async fn read_chunk<R: AsyncRead + Unpin>(pipe: &mut Option<R>, buf: &mut [u8]) -> io::Result<usize> {
    match pipe {
        Some(pipe) => pipe.read(buf).await,
        None => std::future::pending().await,
    }
}

/// Write errors drop the chunk; the caller keeps draining the pipes.
fn copy_chunk(out: &mut (dyn Write + Send), bytes: &[u8]) {
    if let Err(err) = out.write_all(bytes).and_then(|()| out.flush()) {
        debug!(error = %err, "dropping command output");
    }
}
