use {
    super::fs::{read_text, write_text},
    anyhow::Result,
    log::{debug, info, warn},
    regex::{Captures, Regex},
    semver::Version,
    std::path::PathBuf,
};

/// Rewrites `version = "X.Y.Z"` and `__version__ = "X.Y.Z"` in a fixed set of
/// auxiliary files.
#[derive(Debug, Clone)]
pub struct FilePatcher {
    paths: Vec<PathBuf>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct PatchSummary {
    pub updated: Vec<PathBuf>,
    /// Files a dry run would have rewritten.
    pub pending: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl FilePatcher {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// Files that do not exist are skipped; files that cannot be read or
    /// written are recorded in [`PatchSummary::failed`] and do not stop the
    /// loop.
    pub fn patch(&self, old: &Version, new: &Version, dry_run: bool) -> Result<PatchSummary> {
        let pattern = assignment_pattern(old)?;
        let new_version = new.to_string();
        let mut summary = PatchSummary::default();

        for path in &self.paths {
            if !path.exists() {
                debug!("skipping {}, file does not exist", path.display());
                continue;
            }

            let content = match read_text(path) {
                Ok(content) => content,
                Err(err) => {
                    warn!("failed to process {}: {err:#}", path.display());
                    summary.failed.push((path.clone(), format!("{err:#}")));
                    continue;
                }
            };

            let (patched, count) = replace_version(&pattern, &content, &new_version);
            if count == 0 {
                debug!("no version {old} found in {}", path.display());
                continue;
            }

            if dry_run {
                info!("would update version in {} ({count} match(es))", path.display());
                summary.pending.push(path.clone());
                continue;
            }

            match write_text(path, &patched) {
                Ok(()) => {
                    info!("updated version in {}", path.display());
                    summary.updated.push(path.clone());
                }
                Err(err) => {
                    warn!("failed to process {}: {err:#}", path.display());
                    summary.failed.push((path.clone(), format!("{err:#}")));
                }
            }
        }

        Ok(summary)
    }
}

/// Matches either assignment form holding exactly `version`, capturing the
/// key with its spacing and both quote characters.
fn assignment_pattern(version: &Version) -> Result<Regex> {
    let escaped = regex::escape(&version.to_string());
    Ok(Regex::new(&format!(
        r#"(?P<key>(?:__version__|version)\s*=\s*)(?P<open>['"]){escaped}(?P<close>['"])"#
    ))?)
}

/// Swaps the version token inside every match, leaving key, spacing and
/// quotes untouched. Returns the new text and the number of matches.
fn replace_version(pattern: &Regex, content: &str, new_version: &str) -> (String, usize) {
    let count = pattern.find_iter(content).count();
    if count == 0 {
        return (content.to_string(), 0);
    }

    let patched = pattern.replace_all(content, |caps: &Captures| {
        format!("{}{}{}{}", &caps["key"], &caps["open"], new_version, &caps["close"])
    });
    (patched.into_owned(), count)
}
