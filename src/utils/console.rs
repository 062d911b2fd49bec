//! Human-readable stdout blocks. Progress and diagnostics go through `log`;
//! this is only for the dry-run preview and the closing banner.

use {
    owo_colors::OwoColorize,
    semver::Version,
    std::{fmt, path::PathBuf},
};

/// What a dry run would do, rendered as a colored block.
pub struct DryRunPreview<'a> {
    pub version: &'a Version,
    pub entry: &'a str,
    pub pending: &'a [PathBuf],
}

impl fmt::Display for DryRunPreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n{}\n", "Dry run preview (no files written):".magenta().bold())?;
        writeln!(f, "{}\n{}\n", "VERSION would become:".cyan(), self.version.bold())?;
        writeln!(f, "{}\n{}", "CHANGELOG entry would be:".cyan(), self.entry.trim_end())?;

        if self.pending.is_empty() {
            writeln!(f, "\n{}", "No auxiliary files would change.".cyan())?;
        } else {
            writeln!(f, "\n{}", "Auxiliary files that would change:".cyan())?;
            for path in self.pending {
                writeln!(f, "  {} {}", "->".magenta(), path.display())?;
            }
        }

        writeln!(
            f,
            "\n{}",
            "Nothing written. Run without --dry-run to apply changes.".green()
        )
    }
}

pub fn done_banner(version: &Version, dry_run: bool) -> String {
    let suffix = if dry_run { " (preview only)" } else { "" };
    format!(
        "\n{}\n",
        format!("Done!{suffix} Released version v{version}")
            .green()
            .bold()
    )
}
