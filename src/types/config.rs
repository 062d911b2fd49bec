use {
    anyhow::{anyhow, bail, Context, Result},
    clap::ValueEnum,
    std::{
        collections::BTreeMap,
        fs,
        path::{Path, PathBuf},
    },
    toml_edit::{DocumentMut, Item},
};

/// Name of the configuration file picked up from the working directory.
pub const CONFIG_FILE_NAME: &str = "relkeep.toml";

pub const DEFAULT_VERSION_FILE: &str = "VERSION";
pub const DEFAULT_CHANGELOG_FILE: &str = "CHANGELOG.md";
pub const DEFAULT_VERSIONED_FILES: [&str; 2] = ["setup.py", "src/__init__.py"];

/// Changelog section a release entry is filed under.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Category {
    #[default]
    #[value(help = "New functionality")]
    Feature,
    #[value(help = "Bug fixes")]
    Fix,
    #[value(help = "Internal restructuring")]
    Refactor,
    #[value(help = "Maintenance work")]
    Chore,
    #[value(help = "Documentation changes")]
    Docs,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Feature,
        Category::Fix,
        Category::Refactor,
        Category::Chore,
        Category::Docs,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Feature => "feature",
            Category::Fix => "fix",
            Category::Refactor => "refactor",
            Category::Chore => "chore",
            Category::Docs => "docs",
        }
    }

    pub fn default_label(self) -> &'static str {
        match self {
            Category::Feature => "✨ Added",
            Category::Fix => "🐞 Fixed",
            Category::Refactor => "🔨 Refactor",
            Category::Chore => "🧹 Chore",
            Category::Docs => "📝 Docs",
        }
    }
}

/// Files and labels a release run operates on.
///
/// Relative paths are resolved against `root`, so tests can point a whole run
/// at a scratch directory.
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    pub root: PathBuf,
    pub version_file: PathBuf,
    pub changelog_file: PathBuf,
    /// Auxiliary files expected to carry `version = "X.Y.Z"` or
    /// `__version__ = "X.Y.Z"`.
    pub versioned_files: Vec<PathBuf>,
    /// Category key to changelog sub-heading.
    pub categories: BTreeMap<String, String>,
}

impl ReleaseConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            version_file: PathBuf::from(DEFAULT_VERSION_FILE),
            changelog_file: PathBuf::from(DEFAULT_CHANGELOG_FILE),
            versioned_files: DEFAULT_VERSIONED_FILES.iter().map(PathBuf::from).collect(),
            categories: Category::ALL
                .iter()
                .map(|c| (c.key().to_string(), c.default_label().to_string()))
                .collect(),
        }
    }

    /// Uses `explicit` if given, otherwise `relkeep.toml` under `root` when it
    /// exists, otherwise the defaults.
    pub fn discover(root: impl Into<PathBuf>, explicit: Option<&Path>) -> Result<Self> {
        let root = root.into();
        match explicit {
            Some(path) => Self::load(root, path),
            None => {
                let candidate = root.join(CONFIG_FILE_NAME);
                if candidate.is_file() {
                    Self::load(root, &candidate)
                } else {
                    Ok(Self::new(root))
                }
            }
        }
    }

    pub fn load(root: impl Into<PathBuf>, path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("failed to read config {}", path.display()))?;
        Self::from_toml(root, &content).context(format!("invalid config {}", path.display()))
    }

    /// Overlays the keys present in `content` on top of the defaults.
    pub fn from_toml(root: impl Into<PathBuf>, content: &str) -> Result<Self> {
        let doc = content.parse::<DocumentMut>()?;
        let mut config = Self::new(root);

        for (key, item) in doc.iter() {
            match key {
                "version_file" => config.version_file = PathBuf::from(expect_str(key, item)?),
                "changelog_file" => config.changelog_file = PathBuf::from(expect_str(key, item)?),
                "versioned_files" => {
                    let array = item
                        .as_array()
                        .ok_or_else(|| anyhow!("`versioned_files` must be an array of paths"))?;
                    config.versioned_files = array
                        .iter()
                        .map(|value| {
                            value.as_str().map(PathBuf::from).ok_or_else(|| {
                                anyhow!("`versioned_files` entries must be strings")
                            })
                        })
                        .collect::<Result<_>>()?;
                }
                "categories" => {
                    let table = item
                        .as_table_like()
                        .ok_or_else(|| anyhow!("`categories` must be a table"))?;
                    for (name, label) in table.iter() {
                        let label = label.as_str().ok_or_else(|| {
                            anyhow!("label for category `{name}` must be a string")
                        })?;
                        config
                            .categories
                            .insert(name.to_lowercase(), label.to_string());
                    }
                }
                other => bail!("unknown key `{other}`"),
            }
        }

        Ok(config)
    }

    pub fn version_path(&self) -> PathBuf {
        self.root.join(&self.version_file)
    }

    pub fn changelog_path(&self) -> PathBuf {
        self.root.join(&self.changelog_file)
    }

    pub fn versioned_paths(&self) -> Vec<PathBuf> {
        self.versioned_files
            .iter()
            .map(|path| self.root.join(path))
            .collect()
    }

    /// Label for `key`, or the default category's label for unknown keys.
    pub fn label_for(&self, key: &str) -> &str {
        self.categories
            .get(&key.to_lowercase())
            .or_else(|| self.categories.get(Category::default().key()))
            .map(String::as_str)
            .unwrap_or(Category::default().default_label())
    }
}

fn expect_str<'a>(key: &str, item: &'a Item) -> Result<&'a str> {
    item.as_str()
        .ok_or_else(|| anyhow!("`{key}` must be a string"))
}
