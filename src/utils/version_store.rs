use {
    super::fs::{read_text, write_text},
    anyhow::Result,
    log::{debug, warn},
    semver::Version,
    std::path::{Path, PathBuf},
};

/// Plain-text `MAJOR.MINOR.PATCH` marker file.
#[derive(Debug, Clone)]
pub struct VersionStore {
    path: PathBuf,
}

impl VersionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current version, self-healing the file to `0.0.0` when it is missing
    /// or malformed. Never fails.
    pub fn read(&self) -> Version {
        if !self.path.exists() {
            self.reset();
            warn!(
                "{} not found, created default {}",
                self.path.display(),
                default_version()
            );
            return default_version();
        }

        match read_text(&self.path).map(|content| parse_version(&content)) {
            Ok(Some(version)) => version,
            Ok(None) => {
                warn!(
                    "invalid version format in {}, resetting to {}",
                    self.path.display(),
                    default_version()
                );
                self.reset();
                default_version()
            }
            Err(err) => {
                warn!("{err:#}, resetting to {}", default_version());
                self.reset();
                default_version()
            }
        }
    }

    /// Like [`VersionStore::read`] but never touches the file.
    pub fn peek(&self) -> Version {
        if !self.path.exists() {
            warn!(
                "{} not found, assuming {}",
                self.path.display(),
                default_version()
            );
            return default_version();
        }

        match read_text(&self.path).map(|content| parse_version(&content)) {
            Ok(Some(version)) => version,
            Ok(None) => {
                warn!(
                    "invalid version format in {}, assuming {}",
                    self.path.display(),
                    default_version()
                );
                default_version()
            }
            Err(err) => {
                warn!("{err:#}, assuming {}", default_version());
                default_version()
            }
        }
    }

    pub fn write(&self, version: &Version) -> Result<()> {
        debug!("writing {} to {}", version, self.path.display());
        write_text(&self.path, &version.to_string())
    }

    fn reset(&self) {
        if let Err(err) = self.write(&default_version()) {
            warn!("{err:#}");
        }
    }
}

pub fn default_version() -> Version {
    Version::new(0, 0, 0)
}

/// Strict `MAJOR.MINOR.PATCH` parser: three all-digit components, no
/// pre-release or build suffix.
pub fn parse_version(content: &str) -> Option<Version> {
    let mut parts = content.trim().split('.');
    let mut next = || -> Option<u64> {
        let part = parts.next()?;
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        part.parse().ok()
    };

    let (major, minor, patch) = (next()?, next()?, next()?);
    if parts.next().is_some() {
        return None;
    }
    Some(Version::new(major, minor, patch))
}
