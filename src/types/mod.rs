pub mod config;

pub use config::{Category, ReleaseConfig};
