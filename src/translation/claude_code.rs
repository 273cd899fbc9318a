//! Translation through the local Claude Code CLI (`claude -p`).

use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use super::error::TranslateError;

pub struct ClaudeCodeProvider {
    command: PathBuf,
    model: String,
}

impl ClaudeCodeProvider {
    /// Resolves `command` to an executable and keeps the model alias.
    pub fn new(command: &str, model: &str) -> Result<Self, TranslateError> {
        let resolved =
            find_executable(command).ok_or_else(|| TranslateError::CommandNotFound(command.to_string()))?;
        debug!(command = %resolved.display(), model, "using claude code");
        Ok(Self {
            command: resolved,
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `prompt` on stdin and returns the trimmed stdout.
    pub async fn run(&self, prompt: &str) -> Result<String, TranslateError> {
        let display = self.command.display().to_string();
        let spawn_err = |source| TranslateError::Spawn {
            command: display.clone(),
            source,
        };

        let mut child = Command::new(&self.command)
            .args(["-p", "--model", &self.model])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(spawn_err)?;

        // Feed stdin while stdout is drained; the task drops the pipe when done.
        let feeder = child.stdin.take().map(|mut stdin| {
            let prompt = prompt.to_owned();
            tokio::spawn(async move { stdin.write_all(prompt.as_bytes()).await })
        });

        let output = child.wait_with_output().await.map_err(spawn_err)?;

        if let Some(feeder) = feeder {
            match feeder.await.map_err(io::Error::other) {
                Ok(Ok(())) => {}
                Ok(Err(err)) if err.kind() == io::ErrorKind::BrokenPipe => {
                    debug!("claude closed stdin before reading the whole prompt");
                }
                Ok(Err(err)) | Err(err) => return Err(spawn_err(err)),
            }
        }
        if !output.status.success() {
            return Err(TranslateError::Process {
                command: display,
                status: output.status.to_string(),
            });
        }

        let result = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if result.is_empty() {
            return Err(TranslateError::EmptyResponse("claude"));
        }
        Ok(result)
    }
}

/// Looks `command` up the way a shell would: paths with a separator are
/// checked directly, bare names are searched on `PATH`.
pub fn find_executable(command: &str) -> Option<PathBuf> {
    let candidate = Path::new(command);
    if candidate.components().count() > 1 || candidate.is_absolute() {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(command))
        .find(|full| full.is_file())
}
