//! Version service: the Draft/Frozen state machine.
//!
//! Transitions per lineage:
//! - Draft accepts item mutations freely.
//! - `commit_revision` seals the Draft (Frozen, read-only forever) and
//!   installs a structural copy as the next Draft at `version + 1`. This is
//!   the only path by which `version` increases.
//!
//! Every mutation carries the version the caller last observed; a mismatch
//! is a concurrency conflict and the caller must re-read and retry.

use chrono::Utc;

use crate::budget::types::Budget;

use super::error::VersionError;
use super::types::{BudgetLineage, VersionState};

/// Stateless service for version transitions.
pub struct VersionService;

impl VersionService {
    /// Ensure a budget is the mutable Draft.
    ///
    /// # Errors
    ///
    /// Returns `VersionError::ImmutableVersion` for a sealed version.
    pub fn ensure_draft(budget: &Budget) -> Result<(), VersionError> {
        if budget.state.is_frozen() {
            return Err(VersionError::ImmutableVersion {
                budget: budget.id,
                version: budget.version,
            });
        }
        Ok(())
    }

    /// Ensure the caller's observed version is still current.
    ///
    /// # Errors
    ///
    /// Returns `VersionError::StaleVersion` when another editor already
    /// advanced the lineage.
    pub fn check_observed(budget: &Budget, observed: u32) -> Result<(), VersionError> {
        if budget.version != observed {
            return Err(VersionError::StaleVersion {
                budget: budget.id,
                current: budget.version,
                observed,
            });
        }
        Ok(())
    }

    /// Authorize an item mutation against the version the caller observed.
    ///
    /// Precedence when `observed` is not the current Draft version: a number
    /// that exists in the chain addresses a sealed version and fails with
    /// `ImmutableVersion`; a number past the Draft is a stale/invalid
    /// observation and fails with `StaleVersion`.
    ///
    /// # Errors
    ///
    /// Returns `VersionError::ImmutableVersion` or
    /// `VersionError::StaleVersion` as described above.
    pub fn authorize_mutation(
        lineage: &BudgetLineage,
        observed: u32,
    ) -> Result<(), VersionError> {
        let draft = lineage.draft();
        if observed == draft.version {
            return Ok(());
        }
        if lineage.get(observed).is_some() {
            return Err(VersionError::ImmutableVersion {
                budget: draft.id,
                version: observed,
            });
        }
        Err(VersionError::StaleVersion {
            budget: draft.id,
            current: draft.version,
            observed,
        })
    }

    /// Seal the current Draft and open the next one.
    ///
    /// The sealed version keeps its item snapshots verbatim — a revision
    /// never re-snapshots costs silently. The successor is a structural copy
    /// at `version + 1`, immediately mutable.
    ///
    /// Returns the new Draft's version number.
    ///
    /// # Errors
    ///
    /// Returns `VersionError::StaleVersion` when `observed` is not the
    /// current Draft version.
    pub fn commit_revision(
        lineage: &mut BudgetLineage,
        observed: u32,
    ) -> Result<u32, VersionError> {
        Self::check_observed(lineage.draft(), observed)?;

        let mut sealed = lineage.draft().clone();
        sealed.state = VersionState::Frozen;

        let now = Utc::now();
        let mut next = lineage.draft().clone();
        next.version += 1;
        next.state = VersionState::Draft;
        next.created_at = now;
        next.updated_at = now;
        let next_version = next.version;

        lineage.push_revision(sealed, next);
        Ok(next_version)
    }

    /// Look up one version of a lineage by number.
    ///
    /// # Errors
    ///
    /// Returns `VersionError::UnknownVersion` when the number is not in the
    /// chain.
    pub fn get_version(lineage: &BudgetLineage, version: u32) -> Result<&Budget, VersionError> {
        lineage.get(version).ok_or(VersionError::UnknownVersion {
            budget: lineage.draft().id,
            version,
        })
    }
}
