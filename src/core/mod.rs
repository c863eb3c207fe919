pub mod catalog;
pub mod changelog;
pub mod session;
pub mod tokens;

pub use crate::domain::model::{CommandOutcome, Mutation, SessionReport, TokenKind};
pub use crate::domain::ports::{RandomSource, Storage, VersionControl};
pub use crate::utils::error::Result;
