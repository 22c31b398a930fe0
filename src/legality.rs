//! Scattering legality: does a candidate schedule preserve every dependence?
//!
//! A schedule replacement is legal when the time distance of every stored
//! dependence edge stays lexicographically positive under the candidate,
//! i.e. every source instance still executes strictly before its target.
//! The check maps the ALL-kind dependence relation through the combined
//! candidate scattering, takes the distance vectors (deltas), and intersects
//! them with the lexicographically non-positive cone: the candidate is
//! legal exactly when that intersection is empty.

use std::collections::HashMap;

use isl_rs::{DimType, Map, Set, Space, UnionMap};
use log::debug;

use crate::dependences::{DependenceAnalysis, DependenceKinds, DependencesError};

impl DependenceAnalysis {
    /// Validate a candidate scattering, given as statement name → new
    /// scattering map. Statements absent from the candidate keep their
    /// current scattering.
    ///
    /// A `true` result certifies that adopting the candidate preserves the
    /// required execution order of every RAW/WAR/WAW edge. When legality
    /// checking is disabled in the configuration, every candidate is
    /// reported legal without consulting the store.
    pub fn is_valid_scattering(
        &self,
        new_scattering: &HashMap<String, Map>,
    ) -> Result<bool, DependencesError> {
        if self.config().legality_check_disabled {
            return Ok(true);
        }

        let deps = self.get_dependences(DependenceKinds::ALL)?;

        let mut scattering = UnionMap::empty(self.scop().param_space().copy());
        let mut scattering_space: Option<Space> = None;

        for stmt in self.scop().statements() {
            let stmt_scat = match new_scattering.get(stmt.name()) {
                Some(map) => map.copy(),
                None => stmt.scattering().copy(),
            };

            if scattering_space.is_none() {
                scattering_space = Some(stmt_scat.get_space().range());
            }
            scattering = scattering.add_map(stmt_scat);
        }

        // No statements means no dependences to violate.
        let scattering_space = match scattering_space {
            Some(space) => space,
            None => return Ok(true),
        };

        let deps = deps
            .apply_domain(scattering.copy())
            .apply_range(scattering);

        let dims = scattering_space.dim(DimType::Set) as u32;
        let mut zero = Set::universe(scattering_space.copy());
        for i in 0..dims {
            zero = zero.fix_si(DimType::Set, i, 0);
        }

        let deltas = deps.deltas().extract_set(scattering_space);
        debug!("candidate distance vectors: {}", deltas.to_str());

        // Illegal as soon as one distance vector compares lex <= 0.
        let non_positive = deltas.lex_le_set(zero);
        let is_valid = non_positive.is_empty();
        debug!("candidate scattering valid: {}", is_valid);

        Ok(is_valid)
    }
}
