use crate::domain::model::CommandOutcome;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Appends without reading the existing content; creates the file if needed.
    fn append_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Source of every random choice the tool makes.
pub trait RandomSource {
    /// Uniform integer in `lo..=hi`. Callers guarantee `lo <= hi`.
    fn uniform_int(&mut self, lo: u64, hi: u64) -> u64;

    fn choose_one<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        let index = self.uniform_int(0, items.len() as u64 - 1) as usize;
        items.get(index)
    }
}

#[async_trait]
pub trait VersionControl: Send + Sync {
    async fn stage_all(&self) -> Result<CommandOutcome>;
    async fn commit(&self, message: &str) -> Result<CommandOutcome>;
    async fn push(&self) -> Result<CommandOutcome>;
}
