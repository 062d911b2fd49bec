use {
    anyhow::{Context, Result},
    std::{fs, path::Path},
};

pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).context(format!("failed to read {}", path.display()))
}

/// Overwrites `path`, creating missing parent directories first.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .context(format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(path, contents).context(format!("failed to write {}", path.display()))
}
