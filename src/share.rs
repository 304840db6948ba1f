//! Share composer - summary text and the terminal's stand-ins for a share sheet

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::state::WeatherResult;

/// Where a share goes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum ShareTarget {
    /// System clipboard through the terminal (OSC 52)
    Clipboard,
    /// Pipe the text into a program's stdin
    Command { program: String, args: Vec<String> },
    /// Append the text to a file
    File(PathBuf),
}

impl ShareTarget {
    pub fn label(&self) -> String {
        match self {
            ShareTarget::Clipboard => "Copy to clipboard".to_string(),
            ShareTarget::Command { program, .. } => format!("Send to {}", program),
            ShareTarget::File(path) => format!("Append to {}", path.display()),
        }
    }
}

/// How a share attempt ended
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum ShareOutcome {
    /// Completed and the target is known
    SharedWith(String),
    /// Completed, target not reported
    Shared,
    Dismissed,
    Failed(String),
}

impl ShareOutcome {
    pub fn status_text(&self) -> String {
        match self {
            ShareOutcome::SharedWith(target) => format!("Shared with {}", target),
            ShareOutcome::Shared => "Shared".to_string(),
            ShareOutcome::Dismissed => "Share dismissed".to_string(),
            ShareOutcome::Failed(reason) => format!("Share failed: {}", reason),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ShareError {
    #[error("could not write to terminal: {0}")]
    Terminal(std::io::Error),
    #[error("could not start {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("could not write {path}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// One-sentence summary of a result
pub fn compose_share_text(result: &WeatherResult) -> String {
    format!(
        "Today the temperature is {}°C and the weather condition is {} at {}.",
        result.temperature, result.description, result.location
    )
}

/// Deliver `text` to `target`.
///
/// The clipboard target writes to the terminal; callers that own the
/// screen should use [`share_via_terminal`] on the render thread instead.
pub async fn invoke_share(target: &ShareTarget, text: &str) -> ShareOutcome {
    let result = match target {
        ShareTarget::Clipboard => return share_via_terminal(text),
        ShareTarget::Command { program, args } => run_command(program, args, text)
            .await
            .map(|()| ShareOutcome::SharedWith(program.clone())),
        ShareTarget::File(path) => append_to_file(path, text)
            .await
            .map(|()| ShareOutcome::SharedWith(path.display().to_string())),
    };
    report(target, result)
}

/// Clipboard share written synchronously to the locked terminal.
pub fn share_via_terminal(text: &str) -> ShareOutcome {
    let result =
        copy_to_clipboard(&mut std::io::stdout().lock(), text).map(|()| ShareOutcome::Shared);
    report(&ShareTarget::Clipboard, result)
}

fn report(target: &ShareTarget, result: Result<ShareOutcome, ShareError>) -> ShareOutcome {
    match result {
        Ok(outcome) => {
            tracing::info!(share_target = %target.label(), "share completed");
            outcome
        }
        Err(e) => {
            tracing::warn!(share_target = %target.label(), error = %e, "share failed");
            ShareOutcome::Failed(e.to_string())
        }
    }
}

/// OSC 52 "set clipboard" request carrying `text`
pub fn osc52_sequence(text: &str) -> Vec<u8> {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes())).into_bytes()
}

/// Emit an OSC 52 clipboard request as one write. The terminal decides
/// whether to honour it.
pub fn copy_to_clipboard<W: Write>(out: &mut W, text: &str) -> Result<(), ShareError> {
    out.write_all(&osc52_sequence(text)).map_err(ShareError::Terminal)?;
    out.flush().map_err(ShareError::Terminal)
}

async fn run_command(program: &str, args: &[String], text: &str) -> Result<(), ShareError> {
    let spawn_error = |source| ShareError::Spawn {
        program: program.to_string(),
        source,
    };

    let mut child = tokio::process::Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(spawn_error)?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .await
            .map_err(spawn_error)?;
        // stdin dropped here so the child sees EOF
    }

    let output = child.wait_with_output().await.map_err(spawn_error)?;
    if output.status.success() {
        Ok(())
    } else {
        Err(ShareError::CommandFailed {
            program: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

async fn append_to_file(path: &Path, text: &str) -> Result<(), ShareError> {
    let file_error = |source| ShareError::File {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(file_error)?;
    }
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(file_error)?;
    file.write_all(text.as_bytes()).await.map_err(file_error)?;
    file.write_all(b"\n").await.map_err(file_error)?;
    file.flush().await.map_err(file_error)
}
