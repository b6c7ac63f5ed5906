use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{info, warn};

use crate::config::CompilerConfig;
use crate::pipeline::TaskError;
use crate::ui;

pub const PROJECT_FLAG: &str = "-p";
pub const WATCH_FLAG: &str = "-w";

/// One compiler run: a console label and the arguments after the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub label: &'static str,
    pub args: Vec<OsString>,
}

impl Invocation {
    /// `-p <project>`, plus `-w` in watch mode.
    pub fn new(label: &'static str, project: &Path, watch: bool) -> Self {
        let mut args: Vec<OsString> = vec![PROJECT_FLAG.into(), project.as_os_str().to_owned()];
        if watch {
            args.push(WATCH_FLAG.into());
        }
        Self { label, args }
    }
}

/// How a compiler process ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOutcome {
    pub code: Option<i32>,
    pub stdout_lines: usize,
    pub stderr_lines: usize,
}

impl CompilerOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Resolve the configured compiler.
///
/// Anything that looks like a path is taken relative to `root`; a bare name
/// is looked up on `PATH`.
pub fn resolve_program(root: &Path, program: &str) -> Result<PathBuf, TaskError> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 || candidate.is_absolute() {
        return Ok(root.join(candidate));
    }
    which::which(program).map_err(|_| TaskError::CompilerNotFound {
        program: program.to_string(),
    })
}

/// Run the compiler task. A non-zero exit is reported but does not fail the task.
pub async fn run(
    root: &Path,
    config: &CompilerConfig,
    invocation: &Invocation,
) -> Result<(), TaskError> {
    let program = resolve_program(root, &config.program)?;
    let outcome = execute(&program, root, invocation).await?;

    if !outcome.success() {
        warn!(
            event = "build.compiler.exit_nonzero",
            label = invocation.label,
            code = ?outcome.code
        );
        ui::warn(&format!(
            "{} compiler exited with {}",
            invocation.label,
            outcome
                .code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "a signal".to_string())
        ));
    }
    Ok(())
}

/// Spawn `program`, relay its output line by line and wait for it to exit.
pub async fn execute(
    program: &Path,
    cwd: &Path,
    invocation: &Invocation,
) -> Result<CompilerOutcome, TaskError> {
    let label = invocation.label;
    info!(
        event = "build.compiler.spawn_started",
        label = label,
        program = %program.display()
    );

    let mut child = Command::new(program)
        .args(&invocation.args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| TaskError::CompilerSpawnFailed {
            program: program.to_path_buf(),
            source,
        })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let (stdout_lines, stderr_lines) = tokio::join!(
        relay(stdout, |line| ui::compiler_line(label, line)),
        relay(stderr, |line| ui::compiler_error(label, line)),
    );

    let status = child
        .wait()
        .await
        .map_err(|source| TaskError::CompilerWaitFailed {
            program: program.to_path_buf(),
            source,
        })?;

    info!(
        event = "build.compiler.exited",
        label = label,
        code = ?status.code()
    );

    Ok(CompilerOutcome {
        code: status.code(),
        stdout_lines,
        stderr_lines,
    })
}

async fn relay<R, F>(stream: Option<R>, mut emit: F) -> usize
where
    R: AsyncRead + Unpin,
    F: FnMut(&str),
{
    let Some(stream) = stream else {
        return 0;
    };
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    let mut count = 0;
    // Drain until EOF; closing the pipe early would kill the child with SIGPIPE.
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                emit(line.trim_end_matches(['\n', '\r']));
                count += 1;
            }
            Err(e) => {
                warn!(event = "build.compiler.relay_failed", error = %e);
                break;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_args() {
        let build = Invocation::new("CLIENT", Path::new("./src/client"), false);
        assert_eq!(build.args, vec![OsString::from("-p"), OsString::from("./src/client")]);

        let watch = Invocation::new("BACKEND", Path::new("./src/"), true);
        assert_eq!(
            watch.args,
            vec![
                OsString::from("-p"),
                OsString::from("./src/"),
                OsString::from("-w")
            ]
        );
        assert_eq!(watch.label, "BACKEND");
    }

    #[test]
    fn test_relative_program_is_joined_to_root() {
        let program = resolve_program(Path::new("/project"), "./node_modules/.bin/tsc").unwrap();
        assert_eq!(program, PathBuf::from("/project/./node_modules/.bin/tsc"));
    }

    #[test]
    fn test_unknown_bare_program_is_not_found() {
        let err = resolve_program(Path::new("/project"), "gzrun-no-such-compiler").unwrap_err();
        assert!(matches!(err, TaskError::CompilerNotFound { .. }));
    }

    #[tokio::test]
    async fn test_relay_replaces_invalid_bytes() {
        let input: &[u8] = b"bad \xff path\r\nok\n";
        let mut lines = Vec::new();

        let count = relay(Some(input), |line| lines.push(line.to_string())).await;

        assert_eq!(count, 2);
        assert_eq!(lines, vec!["bad \u{fffd} path", "ok"]);
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        fn script(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("fake-tsc");
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        #[tokio::test]
        async fn test_execute_relays_both_streams() {
            let dir = TempDir::new().unwrap();
            let program = script(
                dir.path(),
                "echo \"compiling $2\"\necho done\necho 'error TS1005' >&2",
            );
            let invocation = Invocation::new("CLIENT", Path::new("src/client"), false);

            let outcome = execute(&program, dir.path(), &invocation).await.unwrap();

            assert!(outcome.success());
            assert_eq!(outcome.stdout_lines, 2);
            assert_eq!(outcome.stderr_lines, 1);
        }

        #[tokio::test]
        async fn test_invalid_utf8_line_keeps_draining() {
            let dir = TempDir::new().unwrap();
            let program = script(
                dir.path(),
                "printf 'bad \\377 path\\n'\ni=0\nwhile [ $i -lt 4000 ]; do echo \"line $i\"; i=$((i+1)); done\nexit 0",
            );
            let invocation = Invocation::new("BACKEND", Path::new("src"), true);

            let outcome = execute(&program, dir.path(), &invocation).await.unwrap();

            assert_eq!(outcome.code, Some(0));
            assert_eq!(outcome.stdout_lines, 4001);
            assert_eq!(outcome.stderr_lines, 0);
        }

        #[tokio::test]
        async fn test_nonzero_exit_does_not_fail_task() {
            let dir = TempDir::new().unwrap();
            script(dir.path(), "echo 'error TS2304' >&2\nexit 2");
            let config = CompilerConfig {
                program: "./fake-tsc".to_string(),
            };
            let invocation = Invocation::new("BACKEND", Path::new("src"), false);

            assert!(run(dir.path(), &config, &invocation).await.is_ok());

            let outcome = execute(&dir.path().join("fake-tsc"), dir.path(), &invocation)
                .await
                .unwrap();
            assert_eq!(outcome.code, Some(2));
            assert!(!outcome.success());
        }

        #[tokio::test]
        async fn test_missing_program_fails_task() {
            let dir = TempDir::new().unwrap();
            let config = CompilerConfig {
                program: "./node_modules/.bin/tsc".to_string(),
            };
            let invocation = Invocation::new("CLIENT", Path::new("src/client"), false);

            let err = run(dir.path(), &config, &invocation).await.unwrap_err();
            assert!(matches!(err, TaskError::CompilerSpawnFailed { .. }));
        }
    }
}
