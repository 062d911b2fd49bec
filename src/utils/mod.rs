pub mod changelog;
pub mod console;
pub mod fs;
pub mod git;
pub mod patcher;
pub mod version_store;

pub use changelog::ChangelogWriter;
pub use git::Git;
pub use patcher::FilePatcher;
pub use version_store::VersionStore;
