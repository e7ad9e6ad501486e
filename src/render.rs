//! External renderer invocation.
//!
//! Hands a DOT description to the Graphviz `dot` binary and returns the
//! rendered bytes. The renderer is a black box: its failures are surfaced
//! as-is and never recovered here.

use std::process::Stdio;

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Errors from the external renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The renderer binary could not be launched (usually: not installed).
    #[error("failed to launch renderer '{0}': {1}")]
    Spawn(String, std::io::Error),

    /// I/O with the renderer process failed.
    #[error("renderer I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The renderer ran but exited with an error.
    #[error("renderer failed: {0}")]
    Failed(String),
}

/// Render DOT source to the given output format ("svg", "png", ...).
pub async fn render(dot_source: &str, format: &str) -> Result<Vec<u8>, RenderError> {
    render_with("dot", dot_source, format).await
}

async fn render_with(binary: &str, dot_source: &str, format: &str) -> Result<Vec<u8>, RenderError> {
    let mut child = Command::new(binary)
        .arg(format!("-T{}", format))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| RenderError::Spawn(binary.to_string(), e))?;

    // stdin is piped above, so take() always succeeds
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(dot_source.as_bytes()).await?;
    }

    let output = child.wait_with_output().await?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RenderError::Failed(stderr.trim().to_string()));
    }

    Ok(output.stdout)
}
