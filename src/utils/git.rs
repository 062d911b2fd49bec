use {
    anyhow::{anyhow, Result},
    log::{debug, info},
    semver::Version,
    std::{
        ffi::{OsStr, OsString},
        fmt, io,
        path::PathBuf,
        process::Command,
    },
};

/// Captured result of one git invocation. A non-zero exit is data here, not
/// an error; only a failure to spawn the process is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitStep {
    Add,
    Commit,
    Tag,
    Push,
    PushTags,
}

impl fmt::Display for GitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GitStep::Add => "git add",
            GitStep::Commit => "git commit",
            GitStep::Tag => "git tag",
            GitStep::Push => "git push",
            GitStep::PushTags => "git push --tags",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitFailure {
    pub step: GitStep,
    pub diagnostic: String,
}

/// Outcome of the commit/tag/push sequence. Steps run in order and stop at
/// the first failure, so `completed` is always a prefix of the sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitReport {
    pub completed: Vec<GitStep>,
    pub failure: Option<GitFailure>,
}

#[derive(Debug, Clone)]
pub struct Git {
    program: OsString,
    work_dir: PathBuf,
}

impl Git {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self::with_program("git", work_dir)
    }

    pub fn with_program(program: impl AsRef<OsStr>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            work_dir: work_dir.into(),
        }
    }

    /// Runs git with `args` in the working directory and blocks until it exits.
    pub fn run<I, S>(&self, args: I) -> io::Result<GitOutput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.program);
        command.args(args).current_dir(&self.work_dir);
        debug!("running {command:?}");

        let output = command.output()?;
        Ok(GitOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Whether there are no staged, unstaged or untracked changes. Errors when
    /// git is missing or the directory is not a repository.
    pub fn is_clean(&self) -> Result<bool> {
        let output = self
            .run(["status", "--porcelain"])
            .map_err(|e| anyhow!("git not found, is it installed and in PATH? ({e})"))?;
        if !output.success {
            return Err(anyhow!(
                "git command failed, is this a git repository? {}",
                output.stderr.trim()
            ));
        }
        Ok(output.stdout.trim().is_empty())
    }

    /// Stages `files`, commits, tags `v<version>`, pushes the branch and then
    /// the tags. Stops at the first failing step and reports it; earlier steps
    /// stay done.
    pub fn commit_tag_push(
        &self,
        version: &Version,
        message: &str,
        files: &[PathBuf],
    ) -> GitReport {
        let mut add_args = vec![OsString::from("add"), OsString::from("--")];
        add_args.extend(files.iter().map(|file| {
            file.strip_prefix(&self.work_dir)
                .unwrap_or(file)
                .as_os_str()
                .to_os_string()
        }));

        let steps: [(GitStep, Vec<OsString>); 5] = [
            (GitStep::Add, add_args),
            (
                GitStep::Commit,
                os_args(["commit", "-m", commit_message(message, version).as_str()]),
            ),
            (GitStep::Tag, os_args(["tag", tag_name(version).as_str()])),
            (GitStep::Push, os_args(["push"])),
            (GitStep::PushTags, os_args(["push", "--tags"])),
        ];

        let mut report = GitReport::default();
        for (step, args) in steps {
            let diagnostic = match self.run(&args) {
                Ok(output) if output.success => {
                    debug!("{step} succeeded");
                    report.completed.push(step);
                    match step {
                        GitStep::Commit => info!("git commit created for v{version}"),
                        GitStep::Tag => info!("git tag created for v{version}"),
                        GitStep::PushTags => {
                            info!("git push completed (commit and tags sent to remote)")
                        }
                        GitStep::Add | GitStep::Push => {}
                    }
                    continue;
                }
                Ok(output) => failure_diagnostic(&output),
                Err(err) => err.to_string(),
            };
            report.failure = Some(GitFailure { step, diagnostic });
            break;
        }

        report
    }
}

pub fn commit_message(message: &str, version: &Version) -> String {
    format!("Release: {message} (v{version})")
}

pub fn tag_name(version: &Version) -> String {
    format!("v{version}")
}

fn os_args<'a>(args: impl IntoIterator<Item = &'a str>) -> Vec<OsString> {
    args.into_iter().map(OsString::from).collect()
}

fn failure_diagnostic(output: &GitOutput) -> String {
    let stderr = output.stderr.trim();
    let detail = if stderr.is_empty() {
        output.stdout.trim()
    } else {
        stderr
    };
    match output.code {
        Some(code) => format!("exit status {code}: {detail}"),
        None => format!("terminated by signal: {detail}"),
    }
}
