use crate::error::{AigError, Result};
use crate::model::{DateWindow, IdentityShape};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tracing::{debug, info};

/// What to ask `git log` for.
#[derive(Debug, Clone)]
pub struct LogQuery<'a> {
    pub window: DateWindow,
    pub shape: IdentityShape,
    pub author: Option<&'a str>,
}

impl LogQuery<'_> {
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "log".to_string(),
            "--all".to_string(),
            format!("--since={}", self.window.since_arg()),
            format!("--until={}", self.window.until_arg()),
            format!("--pretty={}", self.shape.pretty_format()),
            "--numstat".to_string(),
            "--date=format:%Y-%m-%d %H:%M:%S".to_string(),
            "--no-merges".to_string(),
        ];
        if let Some(author) = self.author {
            args.push(format!("--author={author}"));
        }
        args
    }
}

/// The repository whose history is read through the `git` executable.
pub struct GitLog {
    path: PathBuf,
}

impl GitLog {
    /// Use the repository at `path`, or the current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let path = match path {
            Some(p) => p.as_ref().to_path_buf(),
            None => std::env::current_dir()?,
        };
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `git log` once and return its whole stdout.
    pub fn fetch(&self, query: &LogQuery<'_>, progress: bool) -> Result<String> {
        let args = query.args();
        info!(repo = %self.path.display(), ?args, "running git log");

        let pb = if progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message("Reading commit history...");
            pb.enable_steady_tick(Duration::from_millis(100));
            Some(pb)
        } else {
            None
        };

        let output = Command::new("git")
            .args(&args)
            .current_dir(&self.path)
            .output();

        if let Some(pb) = &pb {
            pb.finish_and_clear();
        }

        let output = output?;
        if !output.status.success() {
            return Err(AigError::GitLog {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(bytes = text.len(), "git log finished");
        Ok(text)
    }
}
