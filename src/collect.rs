//! Collection of scope-wide access and schedule information.
//!
//! The dataflow analysis works on whole-scope relations, not on individual
//! statements, so the first step unifies the per-statement relations into
//! four union maps: reads, guaranteed writes, conditional writes, and the
//! scattering. Each per-statement relation is intersected with the
//! statement's own iteration domain before being added; instances outside
//! the domain contribute nothing.

use isl_rs::UnionMap;

use crate::scop::{AccessKind, Scop};

/// Scope-wide access and schedule relations, one union map per category.
pub struct CollectedAccesses {
    /// Union of all read access relations.
    pub read: UnionMap,
    /// Union of all guaranteed write access relations.
    pub must_write: UnionMap,
    /// Union of all conditional write access relations.
    pub may_write: UnionMap,
    /// Union of all statement scatterings.
    pub schedule: UnionMap,
}

/// Gather the unified relations for a whole scope.
///
/// Pure function of the scope state. A scope without statements, or a
/// statement without accesses in some category, contributes the empty
/// relation there.
pub fn collect_accesses(scop: &Scop) -> CollectedAccesses {
    let space = scop.param_space();
    let mut read = UnionMap::empty(space.copy());
    let mut must_write = UnionMap::empty(space.copy());
    let mut may_write = UnionMap::empty(space.copy());
    let mut schedule = UnionMap::empty(space.copy());

    for stmt in scop.statements() {
        for access in stmt.accesses() {
            let accdom = access
                .relation()
                .copy()
                .intersect_domain(stmt.domain().copy());

            match access.kind() {
                AccessKind::Read => read = read.add_map(accdom),
                AccessKind::MustWrite => must_write = must_write.add_map(accdom),
                AccessKind::MayWrite => may_write = may_write.add_map(accdom),
            }
        }
        schedule = schedule.add_map(stmt.scattering().copy());
    }

    CollectedAccesses {
        read,
        must_write,
        may_write,
        schedule,
    }
}
