//! Array dataflow analysis: exact last-writer computation.
//!
//! Dependences are derived from two invocations of ISL's dataflow analysis
//! (`UnionAccessInfo::compute_flow()`), the same engine operation used by
//! the established polyhedral toolchains:
//!
//! 1. Reads sink into writes: for every read instance, the unique last
//!    guaranteed write reaching it in schedule order, plus speculative edges
//!    from conditional writes that could also be last. This is **RAW**.
//! 2. Writes sink into both earlier writes and earlier reads in one combined
//!    computation: the last preceding write gives **WAW**, the reads that
//!    still observe the overwritten value give **WAR**.
//!
//! A read with no preceding writer anywhere (its value enters from outside
//! the scope) simply produces no edge. The relations are coalesced before
//! they are handed to the store so that later algebra works on a minimal
//! disjoint representation.

use isl_rs::{UnionAccessInfo, UnionMap};
use log::debug;

use crate::collect::CollectedAccesses;

/// The three dependence relations of one scope.
///
/// The fields are only ever created together, so a value of this type is a
/// complete analysis result; there is no partially-computed state.
pub struct DependenceRelations {
    /// Read-after-write (flow) dependences.
    pub raw: UnionMap,
    /// Write-after-read (anti) dependences.
    pub war: UnionMap,
    /// Write-after-write (output) dependences.
    pub waw: UnionMap,
}

/// Run the dataflow analysis over the collected access information.
///
/// An empty scope yields three empty relations.
pub fn compute_dependences(info: &CollectedAccesses) -> DependenceRelations {
    // Guaranteed writes are must-sources, conditional writes may-sources.
    // The may-dependence result contains every must edge plus the edges a
    // conditional write could contribute; a must edge is never dropped in
    // favor of a speculative one.
    let read_flow = UnionAccessInfo::from_sink(info.read.copy())
        .set_must_source(info.must_write.copy())
        .set_may_source(info.may_write.copy())
        .set_schedule_map(info.schedule.copy())
        .compute_flow();
    let raw = read_flow.get_may_dependence().coalesce();

    // One combined computation for both write-sink kinds: the must result
    // pairs each write with the last preceding write to the same location;
    // reads enter as may-sources, so the may result additionally holds the
    // last reads before each write. The may result contains the must edges,
    // hence the difference is exactly the anti dependences.
    let write_flow = UnionAccessInfo::from_sink(info.must_write.copy())
        .set_must_source(info.must_write.copy())
        .set_may_source(info.read.copy())
        .set_schedule_map(info.schedule.copy())
        .compute_flow();
    let waw = write_flow.get_must_dependence();
    let war = write_flow
        .get_may_dependence()
        .subtract(waw.copy())
        .coalesce();
    let waw = waw.coalesce();

    debug!("RAW: {}", raw.to_str());
    debug!("WAR: {}", war.to_str());
    debug!("WAW: {}", waw.to_str());

    DependenceRelations { raw, war, waw }
}
