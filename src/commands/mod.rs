pub mod bump_version;
pub mod release;
