use serde::{Deserialize, Serialize};
use std::fmt;

/// One token file and the mutation routine that edits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Colors,
    Typography,
    Spacing,
    Components,
}

impl TokenKind {
    pub const ALL: [TokenKind; 4] = [
        TokenKind::Colors,
        TokenKind::Typography,
        TokenKind::Spacing,
        TokenKind::Components,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            TokenKind::Colors => "colors.json",
            TokenKind::Typography => "typography.json",
            TokenKind::Spacing => "spacing.json",
            TokenKind::Components => "components.json",
        }
    }

    /// Categories without an explicit mapping edit the component tokens.
    pub fn for_category(category: &str) -> Self {
        match category {
            "color" | "brand" => TokenKind::Colors,
            "typography" => TokenKind::Typography,
            "spacing" => TokenKind::Spacing,
            _ => TokenKind::Components,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// The single leaf a mutator rewrote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mutation {
    pub kind: TokenKind,
    pub path: Vec<String>,
    pub previous: Option<serde_json::Value>,
    pub value: serde_json::Value,
}

impl Mutation {
    pub fn pointer(&self) -> String {
        self.path.join(".")
    }
}

/// Result of one external version-control call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    pub command: String,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutcome {
    pub fn success(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            exit_code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    pub fn failure(command: impl Into<String>, exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Trimmed stderr, if the tool printed any.
    pub fn diagnostic(&self) -> Option<&str> {
        let text = self.stderr.trim();
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitRecord {
    pub category: String,
    pub message: String,
    pub mutation: Mutation,
    pub staged: bool,
    pub committed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub requested: usize,
    pub commits: Vec<CommitRecord>,
    pub pushed: bool,
}

impl SessionReport {
    pub fn committed_count(&self) -> usize {
        self.commits.iter().filter(|c| c.committed).count()
    }
}
