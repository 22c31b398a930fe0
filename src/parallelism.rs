//! Parallelism detection: does a loop dimension carry a dependence?
//!
//! A loop at schedule depth `d` can run in parallel when no dependence is
//! carried exactly there. Under the schedule prefix of length `d + 1`, a
//! carried-here dependence has a distance vector that is zero in every
//! coordinate except the last and nonzero in the last. Distances that are
//! all-zero are resolved within one iteration; distances with a nonzero
//! earlier coordinate are carried by an outer, sequential dimension; both
//! are harmless for this loop.

use isl_rs::{DimType, Set, Space, UnionMap, UnionSet};
use log::debug;

use crate::dependences::{DependenceAnalysis, DependenceKinds, DependencesError};

impl DependenceAnalysis {
    /// The union of all statement scatterings restricted to their first
    /// `prefix` output dimensions.
    fn combined_schedule_prefix(&self, prefix: u32) -> UnionMap {
        let mut schedule = UnionMap::empty(self.scop().param_space().copy());

        for stmt in self.scop().statements() {
            let n_out = stmt.scattering().dim(DimType::Out) as u32;
            assert!(
                prefix <= n_out,
                "schedule prefix {} exceeds the {}-dimensional scattering of `{}`",
                prefix,
                n_out,
                stmt.name()
            );
            let prefix_map =
                stmt.scattering()
                    .copy()
                    .project_out(DimType::Out, prefix, n_out - prefix);
            schedule = schedule.add_map(prefix_map);
        }

        schedule
    }

    /// Test whether the loop enumerating `loop_domain` at the 0-based
    /// schedule depth `depth` carries no dependence.
    ///
    /// `loop_domain` is a set of schedule-prefix coordinates of length
    /// `depth + 1`; only dependences that originate *and* terminate inside
    /// it are considered. A `true` result licenses parallel or vector
    /// execution of that loop without violating any stored dependence.
    pub fn is_parallel_dimension(
        &self,
        loop_domain: Set,
        depth: u32,
    ) -> Result<bool, DependencesError> {
        let prefix = depth + 1;
        let deps = self.get_dependences(DependenceKinds::ALL)?;
        let schedule = self.combined_schedule_prefix(prefix);

        let subset = UnionSet::from_set(loop_domain);
        let deps = deps
            .apply_range(schedule.copy())
            .apply_domain(schedule);

        // Dependences need to originate and to terminate in the scheduling
        // space enumerated by this loop.
        let deps = deps
            .intersect_domain(subset.copy())
            .intersect_range(subset);

        let distances = deps.deltas();
        debug!("distance vectors at depth {}: {}", depth, distances.to_str());

        let ctx = self.scop().ctx();
        let space = Space::set_alloc(ctx, 0, prefix);

        // [0, ..., 0]: resolved within a single iteration of this loop.
        let mut all_zero = Set::universe(space.copy());
        for i in 0..prefix {
            all_zero = all_zero.fix_si(DimType::Set, i, 0);
        }
        let all_zero = all_zero.align_params(self.scop().param_space().copy());

        // [0, ..., 0, ?]: zero prefix, arbitrary last coordinate.
        let mut last_unknown = Set::universe(space);
        for i in 0..prefix - 1 {
            last_unknown = last_unknown.fix_si(DimType::Set, i, 0);
        }
        let last_unknown = last_unknown.align_params(self.scop().param_space().copy());

        // Carried exactly here: zero prefix with nonzero last coordinate.
        // Everything else is valid: all-zero, or already carried by an
        // outer sequential dimension.
        let valid_distances = last_unknown.subtract(all_zero).complement();
        let invalid = distances.subtract(UnionSet::from_set(valid_distances));

        let is_parallel = invalid.is_empty();
        debug!("depth {} parallel: {}", depth, is_parallel);

        Ok(is_parallel)
    }
}
