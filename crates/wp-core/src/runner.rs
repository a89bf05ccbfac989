//! Migration runner
//!
//! [`Migrator`] decides which catalog entries are outstanding and applies
//! them one at a time. Each entry runs in its own ledger transaction: its
//! statements and its version record commit together, and the first failure
//! rolls back that entry and halts the run. Entries committed earlier in the
//! same run stay applied, so re-running in range mode resumes where the
//! failed run stopped.
//!
//! Version numbers come from a running counter seeded with the starting
//! version, not from catalog positions. In range mode the two agree. In
//! selection mode they can drift apart (selected entries get consecutive
//! versions whatever their position), which a later range-mode run will read
//! as "already applied" up to that version.

use crate::catalog::{Catalog, MigrationEntry};
use crate::error::{BackendError, CoreError, CoreResult};
use crate::ledger::{Ledger, LedgerTransaction};
use crate::splitter::split_statements;
use chrono::Utc;
use std::fmt;

/// Where a [`Migrator`] is in its current run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No run started yet
    Idle,
    /// Computing the outstanding list
    Planning,
    /// Applying the planned entry at this 0-based step
    Applying(usize),
    /// Every planned entry was applied
    Committed,
    /// The run stopped at the first failure
    Aborted,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "idle"),
            RunState::Planning => write!(f, "planning"),
            RunState::Applying(step) => write!(f, "applying({step})"),
            RunState::Committed => write!(f, "committed"),
            RunState::Aborted => write!(f, "aborted"),
        }
    }
}

/// Inputs to [`Migrator::plan`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanRequest {
    /// Start of the range, also the starting version. Read from the ledger
    /// when omitted.
    pub from_version: Option<i64>,
    /// Exclusive end of the range; runs to the end of the catalog when omitted
    pub to_version: Option<i64>,
    /// Explicit 0-based catalog indices. Overrides the range entirely.
    pub selection: Option<Vec<usize>>,
}

impl PlanRequest {
    /// Range mode from the ledger's current version up to (not including) `to`
    pub fn up_to(to_version: i64) -> Self {
        Self {
            to_version: Some(to_version),
            ..Self::default()
        }
    }
}

/// Outstanding entries and the version they start from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Version the running counter is seeded with
    pub from_version: i64,
    /// Entries to apply, in order
    pub entries: Vec<MigrationEntry>,
}

impl Plan {
    /// Whether there is nothing to apply
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of the planned entries, in order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }
}

/// Applied/outstanding marker for one catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryStatus {
    pub entry: MigrationEntry,
    pub applied: bool,
}

/// Plans and applies catalog entries against a ledger
#[derive(Debug)]
pub struct Migrator<'c> {
    catalog: &'c Catalog,
    state: RunState,
}

impl<'c> Migrator<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            state: RunState::Idle,
        }
    }

    /// Current run state
    pub fn state(&self) -> RunState {
        self.state
    }

    fn transition(&mut self, next: RunState) {
        log::debug!("Migration run: {} -> {}", self.state, next);
        self.state = next;
    }

    /// Highest version recorded in the ledger, `None` if nothing was applied
    pub fn current_version<L: Ledger>(&self, ledger: &L) -> CoreResult<Option<i64>> {
        ledger
            .current_version()
            .map_err(|e| CoreError::LedgerUnavailable { source: boxed(e) })
    }

    /// Mark each catalog entry applied when its position is at or below the
    /// ledger's current version.
    pub fn status<L: Ledger>(&self, ledger: &L) -> CoreResult<Vec<EntryStatus>> {
        let version = self.current_version(ledger)?.unwrap_or(0);
        Ok(self
            .catalog
            .entries()
            .iter()
            .map(|entry| EntryStatus {
                entry: entry.clone(),
                applied: i64::try_from(entry.position).is_ok_and(|p| p <= version),
            })
            .collect())
    }

    /// Compute the outstanding entries for a run.
    ///
    /// An empty plan is a normal outcome and means the database is up to date.
    pub fn plan<L: Ledger>(&mut self, ledger: &L, request: &PlanRequest) -> CoreResult<Plan> {
        self.transition(RunState::Planning);
        let planned = self.compute_plan(ledger, request);
        if planned.is_err() {
            self.transition(RunState::Aborted);
        }
        planned
    }

    fn compute_plan<L: Ledger>(&self, ledger: &L, request: &PlanRequest) -> CoreResult<Plan> {
        let from_version = match request.from_version {
            Some(version) if version < 0 => {
                log::warn!("Starting version {version} is negative; starting from 0");
                0
            }
            Some(version) => version,
            None => self.current_version(ledger)?.unwrap_or(0),
        };

        let entries = match &request.selection {
            Some(indices) => {
                log::warn!(
                    "Selected migrations get consecutive versions from {from_version}, \
                     not their catalog positions"
                );
                self.select(indices)?
            }
            None => self.range(from_version, request.to_version),
        };

        if entries.is_empty() {
            log::debug!("Database is already up to date at version: {from_version}");
        } else {
            log::debug!("Planned {} migration(s) from version {from_version}", entries.len());
        }

        Ok(Plan {
            from_version,
            entries,
        })
    }

    /// Catalog entries at explicit indices, in the given order
    fn select(&self, indices: &[usize]) -> CoreResult<Vec<MigrationEntry>> {
        indices
            .iter()
            .map(|&index| {
                self.catalog
                    .get(index)
                    .cloned()
                    .ok_or(CoreError::SelectionOutOfRange {
                        index,
                        len: self.catalog.len(),
                    })
            })
            .collect()
    }

    /// Half-open slice `[from, to)`, clamped to the catalog
    fn range(&self, from: i64, to: Option<i64>) -> Vec<MigrationEntry> {
        let len = self.catalog.len();
        let start = clamp_index(from, len);
        let end = to.map_or(len, |to| clamp_index(to, len));
        if start >= end {
            return Vec::new();
        }
        self.catalog.entries()[start..end].to_vec()
    }

    /// Apply `entries` in order, numbering them from `starting_version + 1`.
    ///
    /// Returns the applied names only if every entry succeeded. On failure the
    /// failing entry is rolled back and the error is returned; entries before
    /// it remain committed.
    pub fn apply<L: Ledger>(
        &mut self,
        ledger: &mut L,
        entries: &[MigrationEntry],
        starting_version: i64,
    ) -> CoreResult<Vec<String>> {
        self.apply_with(ledger, entries, starting_version, |_, _| {})
    }

    /// Like [`apply`](Self::apply), calling `on_applied` with each entry and
    /// its version right after that entry commits.
    pub fn apply_with<L, F>(
        &mut self,
        ledger: &mut L,
        entries: &[MigrationEntry],
        starting_version: i64,
        mut on_applied: F,
    ) -> CoreResult<Vec<String>>
    where
        L: Ledger,
        F: FnMut(&MigrationEntry, i64),
    {
        let mut applied = Vec::with_capacity(entries.len());
        let mut version = starting_version;

        for (step, entry) in entries.iter().enumerate() {
            self.transition(RunState::Applying(step));

            let outcome = next_version(entry, version)
                .and_then(|next| self.apply_entry(ledger, entry, next).map(|()| next));
            let next = match outcome {
                Ok(next) => next,
                Err(err) => {
                    self.transition(RunState::Aborted);
                    return Err(err);
                }
            };

            on_applied(entry, next);
            applied.push(entry.name.clone());
            version = next;
        }

        self.transition(RunState::Committed);
        Ok(applied)
    }

    /// Plan and apply in one call
    pub fn migrate<L: Ledger>(
        &mut self,
        ledger: &mut L,
        request: &PlanRequest,
    ) -> CoreResult<Vec<String>> {
        let plan = self.plan(ledger, request)?;
        self.apply(ledger, &plan.entries, plan.from_version)
    }

    fn apply_entry<L: Ledger>(
        &self,
        ledger: &mut L,
        entry: &MigrationEntry,
        version: i64,
    ) -> CoreResult<()> {
        log::info!("Running migration {} to version {version}", entry.name);
        let script = self.catalog.load_script(entry)?;
        let statements = split_statements(&script);

        let tx = ledger.begin().map_err(|e| CoreError::TransactionFailed {
            name: entry.name.clone(),
            version,
            source: boxed(e),
        })?;
        run_entry(tx, entry, version, &statements)
    }
}

/// Execute one entry's statements and record it, all inside `tx`.
fn run_entry<T: LedgerTransaction>(
    mut tx: T,
    entry: &MigrationEntry,
    version: i64,
    statements: &[String],
) -> CoreResult<()> {
    for (idx, statement) in statements.iter().enumerate() {
        log::debug!("{}: statement {} of {}", entry.name, idx + 1, statements.len());
        if let Err(e) = tx.execute(statement) {
            discard(tx, entry);
            return Err(CoreError::ExecutionFailed {
                name: entry.name.clone(),
                version,
                statement: idx + 1,
                source: boxed(e),
            });
        }
    }

    if let Err(e) = tx.record_applied(version, &entry.name, Utc::now()) {
        discard(tx, entry);
        return Err(CoreError::TransactionFailed {
            name: entry.name.clone(),
            version,
            source: boxed(e),
        });
    }

    tx.commit().map_err(|e| CoreError::TransactionFailed {
        name: entry.name.clone(),
        version,
        source: boxed(e),
    })
}

fn discard<T: LedgerTransaction>(tx: T, entry: &MigrationEntry) {
    if let Err(e) = tx.rollback() {
        log::warn!("Rollback of migration {} failed: {e}", entry.name);
    }
}

/// Version for the entry after `version`, checked before any transaction opens.
fn next_version(entry: &MigrationEntry, version: i64) -> CoreResult<i64> {
    version
        .checked_add(1)
        .ok_or_else(|| CoreError::VersionOverflow {
            name: entry.name.clone(),
            version,
        })
}

fn boxed<E: std::error::Error + Send + Sync + 'static>(err: E) -> BackendError {
    Box::new(err)
}

/// Map a version onto a slice bound; negatives clamp to 0.
fn clamp_index(version: i64, len: usize) -> usize {
    usize::try_from(version).map_or(0, |v| v.min(len))
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
