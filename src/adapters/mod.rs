// Adapters layer: concrete implementations of the domain ports (filesystem, git, randomness).

pub mod git;
pub mod random;
pub mod storage;

pub use git::GitCli;
pub use random::StdRandom;
pub use storage::LocalStorage;
