use crate::error::GitBulkError;
use crate::result::GitBulkResult;
use anyhow::anyhow;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Handle to the external `git` binary. Resolved once per process via
/// `locate` and passed to whatever needs it; there is no ambient cache.
pub struct GitTool {
    exe: PathBuf,
}

impl GitTool {
    /// Probes `git --version`, which both finds the binary on PATH and
    /// confirms it runs.
    pub async fn locate() -> GitBulkResult<Self> {
        let exe = PathBuf::from("git");
        let output = Command::new(&exe)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| GitBulkError::Other(anyhow!("git not found: {e}")))?;
        if !output.status.success() {
            return Err(GitBulkError::Other(anyhow!("git --version failed")));
        }
        Ok(Self { exe })
    }

    /// Whether a remote answers at `url`. A non-zero exit means "does not
    /// exist"; only a failure to launch git at all is an error.
    pub async fn remote_exists(&self, url: &str) -> GitBulkResult<bool> {
        let status = Command::new(&self.exe)
            .args(["ls-remote", "--exit-code", url])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| GitBulkError::Other(anyhow!(e)))?;
        Ok(status.success())
    }

    /// Clones `url` into `parent`; bare for mirror pushes, working for
    /// clones whose remote URL gets rewritten before pushing.
    pub async fn clone(&self, url: &str, parent: &Path, bare: bool) -> GitBulkResult<()> {
        let mut args = vec!["clone"];
        if bare {
            args.push("--bare");
        }
        args.push(url);
        self.run(&args, parent).await
    }

    pub async fn set_remote_url(&self, workdir: &Path, url: &str) -> GitBulkResult<()> {
        self.run(&["remote", "set-url", "origin", url], workdir).await
    }

    /// Makes the destination's refs an exact replica of the clone's,
    /// including deletions.
    pub async fn push_mirror(&self, workdir: &Path, url: &str) -> GitBulkResult<()> {
        self.run(&["push", "--mirror", url], workdir).await
    }

    pub async fn push_force(&self, workdir: &Path) -> GitBulkResult<()> {
        self.run(&["push", "-f"], workdir).await
    }

    async fn run(&self, args: &[&str], cwd: &Path) -> GitBulkResult<()> {
        let output = Command::new(&self.exe)
            .args(args)
            .current_dir(cwd)
            .stdout(Stdio::null())
            .output()
            .await
            .map_err(|e| GitBulkError::Other(anyhow!(e)))?;
        if output.status.success() {
            Ok(())
        } else {
            Err(GitBulkError::ExternalProcess {
                command: format!("git {}", args.join(" ")),
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
