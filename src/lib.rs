pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{GitCli, LocalStorage, StdRandom};
pub use config::{SessionConfig, SessionPaths};
pub use crate::core::{catalog::Catalog, session::Session};
pub use utils::error::{DesignCodeError, Result};
