//! The dependence store: computation lifecycle and filtered queries.
//!
//! [`DependenceAnalysis`] owns one scope snapshot and, once
//! [`calculate_dependences`](DependenceAnalysis::calculate_dependences) has
//! run, the three dependence relations for it. Queries select any union of
//! kinds through a [`DependenceKinds`] mask.
//!
//! # Lifecycle
//!
//! The relations are held as a single optional triple. They are installed
//! atomically after a complete analysis run and dropped as a whole on
//! invalidation, so no query can ever observe a half-updated store: either
//! all three relations exist, or queries fail fast with
//! [`DependencesError::NotComputed`].
//!
//! Whenever a domain, scattering or access set of the scope changes, the
//! previously computed relations are meaningless. Mutable access to the
//! scope therefore goes through [`scop_mut`](DependenceAnalysis::scop_mut),
//! which invalidates up front; callers re-run the analysis when they are
//! done mutating.
//!
//! The underlying ISL context is safe for sequential reentrant use but not
//! thread-safe; callers must serialize access to one scope's analysis.

use std::ops::BitOr;

use isl_rs::UnionMap;
use log::info;
use thiserror::Error;

use crate::collect;
use crate::config::AnalysisConfig;
use crate::flow::{self, DependenceRelations};
use crate::scop::Scop;

/// Selection mask for dependence kinds.
///
/// Masks combine with `|`: `DependenceKinds::RAW | DependenceKinds::WAW`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependenceKinds(u32);

impl DependenceKinds {
    /// Read-after-write (flow) dependences.
    pub const RAW: DependenceKinds = DependenceKinds(1 << 0);
    /// Write-after-read (anti) dependences.
    pub const WAR: DependenceKinds = DependenceKinds(1 << 1);
    /// Write-after-write (output) dependences.
    pub const WAW: DependenceKinds = DependenceKinds(1 << 2);
    /// All three kinds.
    pub const ALL: DependenceKinds =
        DependenceKinds(Self::RAW.0 | Self::WAR.0 | Self::WAW.0);

    /// Whether every kind selected by `other` is also selected by `self`.
    pub fn contains(self, other: DependenceKinds) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for DependenceKinds {
    type Output = DependenceKinds;

    fn bitor(self, rhs: DependenceKinds) -> DependenceKinds {
        DependenceKinds(self.0 | rhs.0)
    }
}

/// Errors reported by the dependence store.
#[derive(Error, Debug)]
pub enum DependencesError {
    /// The store was queried before `calculate_dependences()` ran, or after
    /// an invalidation without a recomputation.
    #[error("dependences not computed; call calculate_dependences() first")]
    NotComputed,
}

/// Exact dependence analysis for one scope.
///
/// Construct it from a scope snapshot and a configuration, run
/// [`calculate_dependences`](Self::calculate_dependences), then query. The
/// legality and parallelism operations live in the [`crate::legality`] and
/// [`crate::parallelism`] modules.
pub struct DependenceAnalysis {
    scop: Scop,
    config: AnalysisConfig,
    relations: Option<DependenceRelations>,
}

impl DependenceAnalysis {
    /// Create an analysis over a scope snapshot. No dependences are computed
    /// yet; queries fail until
    /// [`calculate_dependences`](Self::calculate_dependences) has run.
    pub fn new(scop: Scop, config: AnalysisConfig) -> Self {
        DependenceAnalysis {
            scop,
            config,
            relations: None,
        }
    }

    pub fn scop(&self) -> &Scop {
        &self.scop
    }

    /// Mutable access to the scope.
    ///
    /// Invalidates the store up front: a mutated scope can never be paired
    /// with stale relations.
    pub fn scop_mut(&mut self) -> &mut Scop {
        self.relations = None;
        &mut self.scop
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Whether the store currently holds computed relations.
    pub fn is_computed(&self) -> bool {
        self.relations.is_some()
    }

    /// (Re)compute the RAW/WAR/WAW relations from the full statement set.
    ///
    /// Any previously held relations are released before the recomputation
    /// starts; the new triple is installed only once it is complete.
    pub fn calculate_dependences(&mut self) {
        self.relations = None;

        let accesses = collect::collect_accesses(&self.scop);
        let relations = flow::compute_dependences(&accesses);

        info!(
            "computed dependences for {} statement(s)",
            self.scop.statements().len()
        );
        self.relations = Some(relations);
    }

    /// Drop the computed relations. Queries fail until the next
    /// [`calculate_dependences`](Self::calculate_dependences).
    pub fn invalidate(&mut self) {
        self.relations = None;
    }

    /// The union of the requested dependence kinds, coalesced and with
    /// equality constraints made explicit for cheap downstream consumption.
    pub fn get_dependences(
        &self,
        kinds: DependenceKinds,
    ) -> Result<UnionMap, DependencesError> {
        let relations = self
            .relations
            .as_ref()
            .ok_or(DependencesError::NotComputed)?;

        let mut deps = UnionMap::empty(self.scop.param_space().copy());
        if kinds.contains(DependenceKinds::RAW) {
            deps = deps.union(relations.raw.copy());
        }
        if kinds.contains(DependenceKinds::WAR) {
            deps = deps.union(relations.war.copy());
        }
        if kinds.contains(DependenceKinds::WAW) {
            deps = deps.union(relations.waw.copy());
        }

        Ok(deps.coalesce().detect_equalities())
    }
}
