use crate::config::SessionConfig;
use crate::core::catalog::{Catalog, Pick};
use crate::core::{changelog, tokens};
use crate::domain::model::{CommandOutcome, CommitRecord, SessionReport, TokenKind};
use crate::domain::ports::{RandomSource, Storage, VersionControl};
use crate::utils::error::{DesignCodeError, Result};
use std::collections::HashSet;
use std::io::{BufRead, Write};

pub const PROMPT: &str = "  How many commits would you like to make today? ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    Looping,
    Pushing,
    Done,
}

/// Draws until the message is unused or `max_attempts` redraws were spent.
/// Returns the pick and the number of redraws.
pub fn pick_unused<'a, R: RandomSource>(
    catalog: &'a Catalog,
    rng: &mut R,
    used: &HashSet<String>,
    max_attempts: usize,
) -> (Pick<'a>, usize) {
    let mut pick = catalog.pick(rng);
    let mut attempts = 0;
    while used.contains(pick.message) && attempts < max_attempts {
        pick = catalog.pick(rng);
        attempts += 1;
    }
    (pick, attempts)
}

/// Reads lines until one parses as an integer of at least 1.
pub fn read_commit_count<I: BufRead, O: Write>(input: &mut I, out: &mut O) -> Result<usize> {
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(DesignCodeError::InputError {
                message: "input ended before a commit count was entered".to_string(),
            });
        }

        match line.trim().parse::<i64>() {
            Ok(n) if n >= 1 => match usize::try_from(n) {
                Ok(count) => return Ok(count),
                Err(_) => writeln!(out, "  Enter a number, e.g. 3")?,
            },
            Ok(_) => writeln!(out, "  Please enter at least 1.")?,
            Err(_) => writeln!(out, "  Enter a number, e.g. 3")?,
        }
    }
}

pub fn print_banner<O: Write>(out: &mut O) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "  ╔══════════════════════════════════════╗")?;
    writeln!(out, "  ║         🎨  Design Code  🎨          ║")?;
    writeln!(out, "  ║    Daily design-token commit tool     ║")?;
    writeln!(out, "  ╚══════════════════════════════════════╝")?;
    writeln!(out)?;
    Ok(())
}

/// Prints the diagnostic of a failed call. Returns whether the call succeeded.
fn report_outcome<O: Write>(out: &mut O, result: &Result<CommandOutcome>) -> Result<bool> {
    match result {
        Ok(outcome) if outcome.is_success() => Ok(true),
        Ok(outcome) => {
            tracing::warn!("`{}` exited with {:?}", outcome.command, outcome.exit_code);
            if let Some(diagnostic) = outcome.diagnostic() {
                writeln!(out, "  {}: {}", outcome.command, diagnostic)?;
            }
            Ok(false)
        }
        Err(e) => {
            tracing::warn!("{}", e);
            writeln!(out, "  {}", e)?;
            Ok(false)
        }
    }
}

pub struct Session<S: Storage, V: VersionControl, R: RandomSource> {
    storage: S,
    vcs: V,
    rng: R,
    config: SessionConfig,
    state: SessionState,
}

impl<S: Storage, V: VersionControl, R: RandomSource> Session<S, V, R> {
    pub fn new(storage: S, vcs: V, rng: R, config: SessionConfig) -> Self {
        Self {
            storage,
            vcs,
            rng,
            config,
            state: SessionState::AwaitingInput,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    fn transition(&mut self, next: SessionState) {
        tracing::debug!("Session {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Prompts for a count, makes that many commits and pushes once.
    pub async fn run<I: BufRead, O: Write>(
        &mut self,
        input: &mut I,
        out: &mut O,
    ) -> Result<SessionReport> {
        print_banner(out)?;

        let count = match self.config.preset_count {
            Some(count) => count,
            None => read_commit_count(input, out)?,
        };
        writeln!(out)?;

        self.transition(SessionState::Looping);
        let mut used = HashSet::new();
        let mut commits = Vec::new();
        for i in 1..=count {
            let record = self.commit_one(&mut used, out).await?;
            writeln!(out, "  [{}/{}] ✓ {}", i, count, record.message)?;
            commits.push(record);
        }

        self.transition(SessionState::Pushing);
        writeln!(out)?;
        writeln!(out, "  Pushing to GitHub …")?;
        let push = self.vcs.push().await;
        let pushed = report_outcome(out, &push)?;
        if pushed {
            let plural = if count == 1 { "" } else { "s" };
            writeln!(
                out,
                "  Done! {} commit{} pushed. Your graph just got greener 🟩",
                count, plural
            )?;
        } else {
            writeln!(out, "  Push failed — check your remote with: git remote -v")?;
        }
        writeln!(out)?;

        self.transition(SessionState::Done);
        let report = SessionReport {
            requested: count,
            commits,
            pushed,
        };
        tracing::info!(
            "Session finished: {}/{} commits, pushed: {}",
            report.committed_count(),
            report.requested,
            report.pushed
        );
        Ok(report)
    }

    async fn commit_one<O: Write>(
        &mut self,
        used: &mut HashSet<String>,
        out: &mut O,
    ) -> Result<CommitRecord> {
        let (pick, attempts) = pick_unused(
            &self.config.catalog,
            &mut self.rng,
            used,
            self.config.max_unique_attempts,
        );
        if used.contains(pick.message) {
            tracing::debug!("Reusing '{}' after {} redraws", pick.message, attempts);
        }
        let category = pick.category.to_string();
        let message = pick.message.to_string();
        used.insert(message.clone());

        let kind = TokenKind::for_category(&category);
        let mutation =
            tokens::mutate_file(&self.storage, &self.config.paths.tokens_dir, kind, &mut self.rng)
                .await?;
        changelog::append_entry(&self.storage, &self.config.paths.changelog_path, &message).await?;

        let stage = self.vcs.stage_all().await;
        let staged = report_outcome(out, &stage)?;
        let commit = self.vcs.commit(&message).await;
        let committed = report_outcome(out, &commit)?;

        Ok(CommitRecord {
            category,
            message,
            mutation,
            staged,
            committed,
        })
    }
}
