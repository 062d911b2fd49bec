use {
    super::bump_version::{bump_version, BumpLevel},
    crate::{
        types::config::{Category, ReleaseConfig},
        utils::{
            changelog::{today, ChangelogWriter},
            console::{done_banner, DryRunPreview},
            git::{Git, GitReport},
            patcher::{FilePatcher, PatchSummary},
            version_store::VersionStore,
        },
    },
    anyhow::{bail, Context, Result},
    clap::Args,
    log::{info, warn},
    semver::Version,
    std::path::{Path, PathBuf},
};

#[derive(Args, Debug)]
pub struct CommandArgs {
    #[arg(
        help = "Changelog entry and commit message. Quote it; triple quotes work for multi-line \
                messages"
    )]
    pub message: String,

    #[arg(value_enum, default_value_t = BumpLevel::Patch)]
    pub bump: BumpLevel,

    #[arg(short, long, value_enum, default_value_t = Category::Feature)]
    pub category: Category,

    #[arg(
        short,
        long,
        help = "Simulate the whole release without writing files or running git"
    )]
    pub dry_run: bool,

    #[arg(long, help = "TOML config file (defaults to ./relkeep.toml when present)")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ReleaseRequest {
    /// Raw message as typed, quotes included.
    pub message: String,
    pub bump: BumpLevel,
    pub category: Category,
    pub dry_run: bool,
}

impl From<&CommandArgs> for ReleaseRequest {
    fn from(args: &CommandArgs) -> Self {
        Self {
            message: args.message.clone(),
            bump: args.bump,
            category: args.category,
            dry_run: args.dry_run,
        }
    }
}

#[derive(Debug)]
pub struct ReleaseReport {
    pub previous: Version,
    pub version: Version,
    pub dry_run: bool,
    pub entry: String,
    /// Files handed to `git add`; empty for a dry run.
    pub staged: Vec<PathBuf>,
    pub patch: PatchSummary,
    /// `None` when git was skipped.
    pub git: Option<GitReport>,
}

pub fn run(args: CommandArgs, root: &Path) -> Result<()> {
    let config = ReleaseConfig::discover(root, args.config.as_deref())
        .context("failed to load release configuration")?;
    let release = Release::new(config, Git::new(root));

    let report = release.execute(&ReleaseRequest::from(&args))?;
    if report.dry_run {
        print!(
            "{}",
            DryRunPreview {
                version: &report.version,
                entry: &report.entry,
                pending: &report.patch.pending,
            }
        );
    }
    print!("{}", done_banner(&report.version, report.dry_run));

    Ok(())
}

/// Sequences one release: precondition, version bump, changelog, auxiliary
/// files, version marker, then git.
pub struct Release {
    git: Git,
    store: VersionStore,
    changelog: ChangelogWriter,
    patcher: FilePatcher,
}

impl Release {
    pub fn new(config: ReleaseConfig, git: Git) -> Self {
        Self {
            git,
            store: VersionStore::new(config.version_path()),
            changelog: ChangelogWriter::new(&config),
            patcher: FilePatcher::new(config.versioned_paths()),
        }
    }

    pub fn execute(&self, request: &ReleaseRequest) -> Result<ReleaseReport> {
        if !request.dry_run && !self.git.is_clean()? {
            bail!("working directory is not clean, commit or stash changes before releasing");
        }

        let message = normalize_message(&request.message)?;

        let previous = if request.dry_run {
            self.store.peek()
        } else {
            self.store.read()
        };
        let version = bump_version(&request.bump, &previous);
        info!("bumping version {previous} -> {version}");

        let entry = self
            .changelog
            .render_entry(&version, &message, request.category.key(), today());

        if request.dry_run {
            let patch = self.patcher.patch(&previous, &version, true)?;
            info!("skipping git commit, tag, and push (dry-run mode)");
            return Ok(ReleaseReport {
                previous,
                version,
                dry_run: true,
                entry,
                staged: vec![],
                patch,
                git: None,
            });
        }

        // Everything that can fail on read happens before the first write.
        let changelog = self.changelog.prepare(&entry)?;

        // The auxiliary files are matched against whatever the marker holds
        // right before it is overwritten, not against `previous`.
        let on_disk = self.store.read();
        self.store.write(&version)?;
        self.changelog.write(&changelog)?;
        let patch = self.patcher.patch(&on_disk, &version, false)?;

        let mut staged = vec![
            self.store.path().to_path_buf(),
            self.changelog.path().to_path_buf(),
        ];
        staged.extend(patch.updated.iter().cloned());
        info!(
            "updated {} and {} -> v{version}",
            self.store.path().display(),
            self.changelog.path().display()
        );

        let git = self.git.commit_tag_push(&version, &message, &staged);
        if let Some(failure) = &git.failure {
            warn!(
                "git operation failed at `{}`: {}",
                failure.step, failure.diagnostic
            );
            warn!("you may need to manually resolve and push");
        }

        Ok(ReleaseReport {
            previous,
            version,
            dry_run: false,
            entry,
            staged,
            patch,
            git: Some(git),
        })
    }
}

/// Strips one layer of surrounding `"""`, `'''`, `"` or `'` and trims.
/// Fails when nothing is left.
pub fn normalize_message(raw: &str) -> Result<String> {
    let message = strip_quotes(raw.trim()).trim();
    if message.is_empty() {
        bail!("commit message cannot be empty");
    }
    Ok(message.to_string())
}

fn strip_quotes(raw: &str) -> &str {
    for quote in ["\"\"\"", "'''"] {
        if raw.len() >= 2 * quote.len() && raw.starts_with(quote) && raw.ends_with(quote) {
            return &raw[quote.len()..raw.len() - quote.len()];
        }
    }
    for quote in ['"', '\''] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}
