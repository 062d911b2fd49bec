use {
    super::fs::{read_text, write_text},
    crate::types::config::ReleaseConfig,
    anyhow::Result,
    chrono::{Local, NaiveDate},
    log::{debug, warn},
    semver::Version,
    std::path::{Path, PathBuf},
};

pub const CHANGELOG_HEADING: &str = "# Changelog";

/// Builds dated, categorized entries and splices them in under the top
/// heading of a Markdown changelog, newest first.
#[derive(Debug, Clone)]
pub struct ChangelogWriter {
    path: PathBuf,
    config: ReleaseConfig,
}

impl ChangelogWriter {
    pub fn new(config: &ReleaseConfig) -> Self {
        Self {
            path: config.changelog_path(),
            config: config.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ```text
    /// ## [1.3.0] - 2024-05-01
    /// ### ✨ Added
    /// - message
    /// ```
    ///
    /// Multi-line messages are emitted verbatim instead of as a list item.
    pub fn render_entry(
        &self,
        version: &Version,
        message: &str,
        category: &str,
        date: NaiveDate,
    ) -> String {
        let label = self.config.label_for(category);
        let body = if message.contains('\n') {
            message.trim().to_string()
        } else {
            format!("- {}", message.trim())
        };

        format!(
            "## [{version}] - {date}\n### {label}\n{body}\n\n",
            date = date.format("%Y-%m-%d")
        )
    }

    /// Current document, or a fresh one holding only the heading.
    pub fn load(&self) -> Result<String> {
        if self.path.exists() {
            read_text(&self.path)
        } else {
            warn!("{} not found, creating a fresh one", self.path.display());
            Ok(format!("{CHANGELOG_HEADING}\n\n"))
        }
    }

    /// Updated document with `entry` spliced in. Nothing is written.
    pub fn prepare(&self, entry: &str) -> Result<String> {
        Ok(insert(&self.load()?, entry))
    }

    pub fn write(&self, document: &str) -> Result<()> {
        debug!("writing {}", self.path.display());
        write_text(&self.path, document)
    }

    pub fn update(&self, entry: &str) -> Result<()> {
        let document = self.prepare(entry)?;
        self.write(&document)
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Places `entry` right after the heading line, ahead of every existing
/// entry. The result always ends with exactly one newline.
pub fn insert(document: &str, entry: &str) -> String {
    let mut content = document.trim().to_string();
    if !content.starts_with(CHANGELOG_HEADING) {
        content = format!("{CHANGELOG_HEADING}\n\n{content}");
    }

    let updated = match content.find(CHANGELOG_HEADING) {
        Some(start) => {
            let after_heading = start + CHANGELOG_HEADING.len();
            let line_end = content[after_heading..]
                .find('\n')
                .map_or(content.len(), |offset| after_heading + offset);
            format!(
                "{}\n{}{}",
                &content[..line_end],
                entry,
                content[line_end..].trim()
            )
        }
        None => {
            warn!("changelog heading not found, appending entry to the end");
            format!("{content}\n{entry}")
        }
    };

    format!("{}\n", updated.trim())
}
