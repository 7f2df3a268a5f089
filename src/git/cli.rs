use crate::error::{FlowError, Result};
use crate::git::GitExecutor;
use crate::ui;
use git2::{BranchType, ErrorCode, Repository, StatusOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

/// Production executor: runs the git program as a subprocess and answers
/// read-only queries through `git2`.
pub struct GitCli {
    program: String,
    repo: Repository,
    workdir: PathBuf,
}

impl GitCli {
    /// Discover the repository containing `path` and drive it with `program`
    pub fn discover<P: AsRef<Path>>(path: P, program: impl Into<String>) -> Result<Self> {
        let repo = Repository::discover(path)?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| FlowError::config("bare repositories have no working tree"))?
            .to_path_buf();

        Ok(GitCli {
            program: program.into(),
            repo,
            workdir,
        })
    }

    /// Directory commands run in
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn command_line(&self, args: &[&str]) -> String {
        let mut line = self.program.clone();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Copy the child's stderr to ours as it arrives, keeping a copy.
fn forward_stderr<R: Read>(mut source: R) -> io::Result<String> {
    let mut captured = Vec::new();
    let mut chunk = [0u8; 4096];
    let mut stderr = io::stderr();

    loop {
        let n = source.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        stderr.write_all(&chunk[..n])?;
        captured.extend_from_slice(&chunk[..n]);
    }
    stderr.flush()?;

    Ok(String::from_utf8_lossy(&captured).trim().to_string())
}

fn failure_reason(status: ExitStatus, diagnostics: String) -> String {
    if !diagnostics.is_empty() {
        return diagnostics;
    }
    match status.code() {
        Some(code) => format!("exited with status {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl GitExecutor for GitCli {
    fn run(&self, args: &[&str]) -> Result<()> {
        let line = self.command_line(args);
        ui::display_command(&line);
        debug!(program = %self.program, ?args, workdir = %self.workdir.display(), "running git");

        let mut child = Command::new(&self.program)
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                FlowError::command(&line, format!("cannot start '{}': {}", self.program, e))
            })?;

        let diagnostics = match child.stderr.take() {
            Some(stderr) => forward_stderr(stderr)?,
            None => String::new(),
        };
        let status = child.wait()?;
        debug!(%status, "git finished");

        if status.success() {
            Ok(())
        } else {
            Err(FlowError::command(line, failure_reason(status, diagnostics)))
        }
    }

    fn is_working_tree_clean(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .include_ignored(false)
            .recurse_untracked_dirs(false);

        let statuses = self.repo.statuses(Some(&mut options))?;
        debug!(pending = statuses.len(), "working tree status");
        Ok(statuses.is_empty())
    }

    fn branch_exists(&self, branch: &str) -> Result<bool> {
        match self.repo.find_branch(branch, BranchType::Local) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_forward_stderr_captures_and_trims() {
        let captured = forward_stderr(Cursor::new(b"error: pathspec 'x' did not match\n")).unwrap();
        assert_eq!(captured, "error: pathspec 'x' did not match");
    }

    #[test]
    fn test_forward_stderr_empty() {
        let captured = forward_stderr(Cursor::new(Vec::new())).unwrap();
        assert!(captured.is_empty());
    }

    #[test]
    fn test_discover_outside_repository_fails() {
        let dir = tempfile::tempdir().unwrap();
        // A fresh temp dir may still sit inside some repository on dev machines.
        if Repository::discover(dir.path()).is_err() {
            assert!(GitCli::discover(dir.path(), "git").is_err());
        }
    }
}
