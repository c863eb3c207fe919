pub mod toml_config;

pub use toml_config::FileConfig;

use crate::core::catalog::Catalog;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, Validate};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "design-code.toml";
pub const DEFAULT_TOKENS_DIR: &str = "design_tokens";
pub const DEFAULT_CHANGELOG_FILE: &str = "CHANGELOG.md";
pub const DEFAULT_GIT_PROGRAM: &str = "git";
pub const DEFAULT_MAX_UNIQUE_ATTEMPTS: usize = 20;

/// Where the session reads and writes. All paths are absolute once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPaths {
    pub repo_root: PathBuf,
    pub tokens_dir: PathBuf,
    pub changelog_path: PathBuf,
}

impl SessionPaths {
    /// `<repo>/design_tokens` and the changelog one level above it.
    pub fn for_repo(repo_root: impl Into<PathBuf>) -> Self {
        let repo_root = repo_root.into();
        let tokens_dir = repo_root.join(DEFAULT_TOKENS_DIR);
        let changelog_path = tokens_dir.join("..").join(DEFAULT_CHANGELOG_FILE);
        Self {
            repo_root,
            tokens_dir,
            changelog_path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub paths: SessionPaths,
    pub git_program: String,
    pub max_unique_attempts: usize,
    pub catalog: Catalog,
    /// Skips the interactive prompt when set.
    pub preset_count: Option<usize>,
}

impl SessionConfig {
    pub fn for_repo(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            paths: SessionPaths::for_repo(repo_root),
            git_program: DEFAULT_GIT_PROGRAM.to_string(),
            max_unique_attempts: DEFAULT_MAX_UNIQUE_ATTEMPTS,
            catalog: Catalog::builtin(),
            preset_count: None,
        }
    }

    pub fn from_file_config(repo_root: impl Into<PathBuf>, file: &FileConfig) -> Result<Self> {
        file.validate()?;

        // Storage joins paths onto the repo root, so a relative root would apply twice.
        let repo_root = std::path::absolute(repo_root.into())?;
        let tokens_dir = repo_root.join(file.tokens_dir());
        let changelog_path = match file.changelog() {
            Some(path) => repo_root.join(path),
            None => tokens_dir.join("..").join(DEFAULT_CHANGELOG_FILE),
        };
        let catalog = match &file.messages {
            Some(groups) => Catalog::from_groups(groups.clone())?,
            None => Catalog::builtin(),
        };

        Ok(Self {
            paths: SessionPaths {
                repo_root,
                tokens_dir,
                changelog_path,
            },
            git_program: file.git_program().to_string(),
            max_unique_attempts: file.max_unique_attempts(),
            catalog,
            preset_count: None,
        })
    }

    /// Loads `path` if given, else `<repo>/design-code.toml` when it exists.
    pub fn load(repo_root: &Path, path: Option<&Path>) -> Result<Self> {
        let default_path = repo_root.join(DEFAULT_CONFIG_FILE);
        let file = match path {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                FileConfig::from_file(path)?
            }
            None if default_path.is_file() => {
                tracing::debug!("Loading configuration from {}", default_path.display());
                FileConfig::from_file(&default_path)?
            }
            None => FileConfig::default(),
        };
        Self::from_file_config(repo_root, &file)
    }
}

impl Validate for SessionConfig {
    fn validate(&self) -> Result<()> {
        validate_path("paths.tokens_dir", &self.paths.tokens_dir)?;
        validate_path("paths.changelog", &self.paths.changelog_path)?;
        validate_positive_number("session.max_unique_attempts", self.max_unique_attempts, 1)?;
        if let Some(count) = self.preset_count {
            validate_positive_number("count", count, 1)?;
        }
        Ok(())
    }
}

#[cfg(feature = "cli")]
mod cli {
    use super::SessionConfig;
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_positive_number, Validate};
    use clap::{Parser, ValueEnum};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    pub enum LogFormat {
        Compact,
        Json,
    }

    #[derive(Debug, Clone, Parser)]
    #[command(name = "design-code")]
    #[command(about = "Daily design-token commit tool")]
    pub struct CliConfig {
        /// Repository holding design_tokens/ (defaults to the current directory)
        #[arg(long)]
        pub repo_dir: Option<PathBuf>,

        /// TOML configuration file (defaults to <repo>/design-code.toml when present)
        #[arg(long)]
        pub config: Option<PathBuf>,

        /// Number of commits to make, skipping the prompt
        #[arg(long)]
        pub count: Option<usize>,

        /// Seed for reproducible runs
        #[arg(long)]
        pub seed: Option<u64>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
        pub log_format: LogFormat,
    }

    impl CliConfig {
        pub fn session_config(&self) -> Result<SessionConfig> {
            let repo_root = match &self.repo_dir {
                Some(dir) => dir.clone(),
                None => std::env::current_dir()?,
            };
            let mut config = SessionConfig::load(&repo_root, self.config.as_deref())?;
            config.preset_count = self.count;
            config.validate()?;
            Ok(config)
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(count) = self.count {
                validate_positive_number("count", count, 1)?;
            }
            Ok(())
        }
    }
}

#[cfg(feature = "cli")]
pub use cli::{CliConfig, LogFormat};

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_layout() {
        let paths = SessionPaths::for_repo("/work/design-code");
        assert_eq!(paths.tokens_dir, PathBuf::from("/work/design-code/design_tokens"));
        assert_eq!(
            paths.changelog_path,
            PathBuf::from("/work/design-code/design_tokens/../CHANGELOG.md")
        );
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = SessionConfig::load(dir.path(), None).unwrap();

        assert_eq!(config.paths, SessionPaths::for_repo(dir.path()));
        assert_eq!(config.git_program, "git");
        assert_eq!(config.max_unique_attempts, 20);
        assert_eq!(config.catalog, Catalog::builtin());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_picks_up_repo_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[paths]\ntokens_dir = \"tokens\"\nchangelog = \"HISTORY.md\"\n[messages]\nlayout = [\"grid rework\"]\n",
        )
        .unwrap();

        let config = SessionConfig::load(dir.path(), None).unwrap();
        assert_eq!(config.paths.tokens_dir, dir.path().join("tokens"));
        assert_eq!(config.paths.changelog_path, dir.path().join("HISTORY.md"));
        assert_eq!(config.catalog.total_messages(), 1);
    }

    #[test]
    fn test_resolved_paths_are_absolute() {
        let config = SessionConfig::from_file_config("repo", &FileConfig::default()).unwrap();
        assert!(config.paths.repo_root.is_absolute());
        assert!(config.paths.repo_root.ends_with("repo"));
        assert_eq!(config.paths.tokens_dir, config.paths.repo_root.join("design_tokens"));
        assert!(config.paths.changelog_path.is_absolute());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(SessionConfig::load(dir.path(), Some(&missing)).is_err());
    }

    #[test]
    fn test_preset_count_must_be_positive() {
        let mut config = SessionConfig::for_repo("/repo");
        config.preset_count = Some(0);
        assert!(config.validate().is_err());
        config.preset_count = Some(3);
        assert!(config.validate().is_ok());
    }
}
