//! Session Store: the single owner of the live table.
//!
//! Each user session holds exactly one table at a time, plus the active
//! column selection and any staged (uncommitted) manual edits. Operations
//! borrow the table read-only and produce a detached frame; the session
//! swaps that frame in only when the whole operation succeeded, so a failed
//! commit leaves the stored table untouched (copy-on-success).

use crate::engine::edit;
use crate::engine::export;
use crate::engine::types::{MutationOutcome, MutationReport};
use crate::error::{InsightError, Result};
use crate::selection::ColumnSelection;
use polars::prelude::DataFrame;
use uuid::Uuid;

/// Per-user mutable session state. Sessions are fully independent; there is
/// no shared state across them.
#[derive(Debug, Default)]
pub struct Session {
    id: Uuid,
    table: Option<DataFrame>,
    selection: ColumnSelection,
    pending_edits: Option<DataFrame>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            table: None,
            selection: ColumnSelection::default(),
            pending_edits: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Installs a freshly loaded dataset, resetting table, selection and
    /// pending edits together.
    pub fn load(&mut self, df: DataFrame) {
        tracing::info!(
            session = %self.id,
            rows = df.height(),
            columns = df.width(),
            "dataset loaded"
        );
        self.table = Some(df);
        self.selection = ColumnSelection::default();
        self.pending_edits = None;
    }

    /// Drops all session state, as when the user session ends.
    pub fn clear(&mut self) {
        self.table = None;
        self.selection = ColumnSelection::default();
        self.pending_edits = None;
    }

    pub fn table(&self) -> Option<&DataFrame> {
        self.table.as_ref()
    }

    pub fn selection(&self) -> &ColumnSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut ColumnSelection {
        &mut self.selection
    }

    fn require_table(&self) -> Result<&DataFrame> {
        self.table
            .as_ref()
            .ok_or_else(|| InsightError::Other("no dataset loaded".to_owned()))
    }

    /// Runs one mutation operation against the live table and commits the
    /// result atomically: on success the produced frame replaces the stored
    /// one, on failure the stored table is untouched and the report carries
    /// the failure message.
    pub fn apply<F>(&mut self, op: F) -> MutationReport
    where
        F: FnOnce(&DataFrame, &ColumnSelection) -> Result<MutationOutcome>,
    {
        let current = match self.require_table() {
            Ok(df) => df,
            Err(e) => return MutationReport::failure(e.to_string()),
        };

        match op(current, &self.selection) {
            Ok(outcome) => {
                let report = MutationReport::from_outcome(&outcome);
                self.table = Some(outcome.table);
                report
            }
            Err(e) => {
                tracing::warn!(session = %self.id, error = %e, "mutation rejected");
                MutationReport::failure(e.to_string())
            }
        }
    }

    /// Stages an edited frame from the presentation grid without touching
    /// the live table.
    pub fn stage_edits(&mut self, edited: DataFrame) {
        self.pending_edits = Some(edited);
    }

    pub fn pending_edits(&self) -> Option<&DataFrame> {
        self.pending_edits.as_ref()
    }

    /// Commits staged edits: reconciles column types, then swaps the frame
    /// in only if it actually differs from the stored table. An edit with no
    /// change is a no-op, and staged edits are consumed either way.
    pub fn commit_edits(&mut self) -> MutationReport {
        let Some(edited) = self.pending_edits.take() else {
            return MutationReport::failure("no edits staged");
        };
        let current = match self.require_table() {
            Ok(df) => df,
            Err(e) => return MutationReport::failure(e.to_string()),
        };

        match edit::commit_edits(current, &edited) {
            Ok(Some(outcome)) => {
                let report = MutationReport::from_outcome(&outcome);
                self.table = Some(outcome.table);
                report
            }
            Ok(None) => MutationReport {
                success: true,
                message: "No changes to apply".to_owned(),
                affected: 0,
                table: self.table.clone(),
            },
            Err(e) => {
                tracing::warn!(session = %self.id, error = %e, "edit commit rejected");
                MutationReport::failure(e.to_string())
            }
        }
    }

    /// Renders the live table as CSV text for download.
    pub fn export_csv(&self) -> Result<String> {
        let df = self.require_table()?;
        export::to_csv_string(df)
    }
}
