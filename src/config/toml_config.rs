use crate::config::{DEFAULT_GIT_PROGRAM, DEFAULT_MAX_UNIQUE_ATTEMPTS, DEFAULT_TOKENS_DIR};
use crate::utils::error::{DesignCodeError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Contents of `design-code.toml`. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub paths: Option<PathsConfig>,
    pub git: Option<GitConfig>,
    pub session: Option<SessionSettings>,
    pub messages: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Relative to the repository root.
    pub tokens_dir: Option<PathBuf>,
    /// Relative to the repository root.
    pub changelog: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitConfig {
    pub program: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionSettings {
    pub max_unique_attempts: Option<usize>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DesignCodeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| DesignCodeError::config(format!("TOML parsing error: {}", e)))
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| DesignCodeError::config(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn tokens_dir(&self) -> PathBuf {
        self.paths
            .as_ref()
            .and_then(|p| p.tokens_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKENS_DIR))
    }

    pub fn changelog(&self) -> Option<&Path> {
        self.paths.as_ref().and_then(|p| p.changelog.as_deref())
    }

    pub fn git_program(&self) -> &str {
        self.git
            .as_ref()
            .and_then(|g| g.program.as_deref())
            .unwrap_or(DEFAULT_GIT_PROGRAM)
    }

    pub fn max_unique_attempts(&self) -> usize {
        self.session
            .as_ref()
            .and_then(|s| s.max_unique_attempts)
            .unwrap_or(DEFAULT_MAX_UNIQUE_ATTEMPTS)
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        validate_path("paths.tokens_dir", &self.tokens_dir())?;
        if let Some(changelog) = self.changelog() {
            validate_path("paths.changelog", changelog)?;
        }
        validate_non_empty_string("git.program", self.git_program())?;
        validate_positive_number("session.max_unique_attempts", self.max_unique_attempts(), 1)?;

        if let Some(messages) = &self.messages {
            if messages.is_empty() {
                return Err(DesignCodeError::config("[messages] has no categories"));
            }
        }
        Ok(())
    }
}
