//! relkeep - release bookkeeping for small projects
//!
//! One run reads the `VERSION` marker, bumps it, files a dated entry at the
//! top of `CHANGELOG.md`, rewrites `version = "X.Y.Z"` / `__version__ =
//! "X.Y.Z"` in auxiliary files, then commits, tags `v<version>` and pushes.
//!
//! # Examples
//!
//! ## Bumping version
//!
//! ```
//! use relkeep::commands::bump_version::{bump_version, BumpLevel};
//! use semver::Version;
//!
//! let current = Version::parse("1.2.3").unwrap();
//! let new = bump_version(&BumpLevel::Minor, &current);
//! assert_eq!(new, Version::parse("1.3.0").unwrap());
//! ```
//!
//! ## Previewing a release
//!
//! ```no_run
//! use relkeep::{
//!     commands::{bump_version::BumpLevel, release::{Release, ReleaseRequest}},
//!     types::{Category, ReleaseConfig},
//!     utils::Git,
//! };
//!
//! let release = Release::new(ReleaseConfig::new("."), Git::new("."));
//! let report = release
//!     .execute(&ReleaseRequest {
//!         message: "Add login flow".to_string(),
//!         bump: BumpLevel::Minor,
//!         category: Category::Feature,
//!         dry_run: true,
//!     })
//!     .unwrap();
//! println!("would release v{}", report.version);
//! ```

pub mod commands;
pub mod types;
pub mod utils;

pub use commands::bump_version;
pub use commands::release;

pub use semver::Version;

pub type Result<T> = anyhow::Result<T>;
