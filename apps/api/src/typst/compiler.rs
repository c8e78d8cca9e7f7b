use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Typst compiler I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Typst compile timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Typst compile failed (exit code {code:?}): {diagnostics}")]
    Failed {
        code: Option<i32>,
        diagnostics: String,
    },

    #[error("Typst exited successfully but produced no PDF")]
    MissingOutput,
}

/// A rendered PDF and the job it belongs to.
#[derive(Debug, Clone)]
pub struct CompiledDocument {
    pub job_id: String,
    pub pdf: Bytes,
}

/// Turns a complete Typst source into PDF bytes.
///
/// Implementations must be safe to call concurrently; each call gets its own
/// scratch space.
#[async_trait]
pub trait DocumentCompiler: Send + Sync {
    async fn compile(&self, source: &str, job_id: &str) -> Result<CompiledDocument, CompileError>;
}

/// Shells out to the `typst` binary.
#[derive(Debug, Clone)]
pub struct TypstCli {
    pub binary: String,
    pub work_root: PathBuf,
    pub timeout: Duration,
}

impl TypstCli {
    pub fn new(binary: impl Into<String>, work_root: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            work_root: work_root.into(),
            timeout,
        }
    }
}

#[async_trait]
impl DocumentCompiler for TypstCli {
    async fn compile(&self, source: &str, job_id: &str) -> Result<CompiledDocument, CompileError> {
        // Removed on drop, whichever way this function returns
        let scratch = tempfile::Builder::new()
            .prefix(&format!("typst-{job_id}-"))
            .tempdir_in(&self.work_root)?;

        let input = scratch.path().join(format!("{job_id}.typ"));
        let output = scratch.path().join(format!("{job_id}.pdf"));
        tokio::fs::write(&input, source).await?;

        debug!(
            "Compiling job {job_id} ({} bytes) in {}",
            source.len(),
            scratch.path().display()
        );

        let child = Command::new(&self.binary)
            .arg("compile")
            .arg(&input)
            .arg(&output)
            .current_dir(scratch.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let run = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(run) => run?,
            Err(_) => {
                error!("Typst job {job_id} timed out; source starts: {}", snippet(source));
                return Err(CompileError::Timeout {
                    seconds: self.timeout.as_secs(),
                });
            }
        };

        if !run.status.success() {
            let stderr = String::from_utf8_lossy(&run.stderr).trim().to_string();
            let diagnostics = if stderr.is_empty() {
                String::from_utf8_lossy(&run.stdout).trim().to_string()
            } else {
                stderr
            };
            error!(
                "Typst job {job_id} failed: {diagnostics}; source starts: {}",
                snippet(source)
            );
            return Err(CompileError::Failed {
                code: run.status.code(),
                diagnostics,
            });
        }

        let pdf = match tokio::fs::read(&output).await {
            Ok(pdf) => pdf,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CompileError::MissingOutput)
            }
            Err(e) => return Err(e.into()),
        };

        info!("Typst job {job_id} produced {} bytes of PDF", pdf.len());
        Ok(CompiledDocument {
            job_id: job_id.to_string(),
            pdf: Bytes::from(pdf),
        })
    }
}

fn snippet(source: &str) -> String {
    source.chars().take(200).collect()
}
