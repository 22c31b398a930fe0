//! Scope data model for the dependence analysis.
//!
//! A [`Scop`] (static control part) is a snapshot of one analyzable program
//! region: a shared parameter space plus a list of statements, each carrying
//! its iteration domain, its scattering (schedule) and its tagged memory
//! accesses.
//!
//! All ISL objects inside one scope must be created against the same
//! [`Context`] and use the same parameter space. The analysis relies on this
//! invariant; violating it is a caller error, not a reported condition.

use std::sync::Arc;

use isl_rs::{Context, Map, Set, Space};

/// Classification of a memory access.
///
/// Writes are split into guaranteed and conditional ones so the dataflow
/// analysis stays conservative under uncertainty: a may-write can add
/// speculative dependence edges, but never removes a guaranteed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// The statement reads the accessed location.
    Read,
    /// The statement writes the location on every execution of the instance.
    MustWrite,
    /// The statement writes the location only under a condition that is not
    /// captured exactly by the iteration domain.
    MayWrite,
}

impl AccessKind {
    /// Whether the access stores to memory, guaranteed or not.
    pub fn is_write(&self) -> bool {
        match self {
            AccessKind::Read => false,
            AccessKind::MustWrite | AccessKind::MayWrite => true,
        }
    }
}

/// A single tagged access: a relation from iteration vectors to the memory
/// locations they touch, e.g. `{ S0[i] -> A[i - 1] }`.
pub struct MemoryAccess {
    kind: AccessKind,
    relation: Map,
}

impl MemoryAccess {
    pub fn new(kind: AccessKind, relation: Map) -> Self {
        MemoryAccess { kind, relation }
    }

    pub fn kind(&self) -> AccessKind {
        self.kind
    }

    pub fn relation(&self) -> &Map {
        &self.relation
    }
}

/// One statement of a scope.
///
/// The scattering maps iteration vectors to logical time vectors; execution
/// order of the whole scope is the lexicographic order of those time vectors
/// across all statements.
pub struct ScopStmt {
    name: String,
    domain: Set,
    scattering: Map,
    accesses: Vec<MemoryAccess>,
}

impl ScopStmt {
    pub fn new(name: &str, domain: Set, scattering: Map) -> Self {
        ScopStmt {
            name: name.to_string(),
            domain,
            scattering,
            accesses: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &Set {
        &self.domain
    }

    pub fn scattering(&self) -> &Map {
        &self.scattering
    }

    /// Replace the statement's scattering, e.g. after a transformation has
    /// been accepted.
    pub fn set_scattering(&mut self, scattering: Map) {
        self.scattering = scattering;
    }

    pub fn accesses(&self) -> &[MemoryAccess] {
        &self.accesses
    }

    /// Append a tagged access relation to the statement.
    pub fn add_access(&mut self, kind: AccessKind, relation: Map) {
        self.accesses.push(MemoryAccess::new(kind, relation));
    }
}

/// A scope snapshot: shared context, shared parameter space, statements.
pub struct Scop {
    ctx: Arc<Context>,
    param_space: Space,
    statements: Vec<ScopStmt>,
}

impl Scop {
    /// Create an empty scope over an existing parameter space.
    pub fn new(ctx: Arc<Context>, param_space: Space) -> Self {
        Scop {
            ctx,
            param_space,
            statements: Vec::new(),
        }
    }

    /// Create an empty scope whose parameter space declares the given
    /// symbolic parameter names, e.g. `&["N", "M"]`.
    pub fn with_parameters(ctx: Arc<Context>, names: &[&str]) -> Self {
        let universe = if names.is_empty() {
            "{ : }".to_string()
        } else {
            format!("[{}] -> {{ : }}", names.join(", "))
        };
        let param_space = Set::read_from_str(&ctx, &universe).get_space();
        Scop::new(ctx, param_space)
    }

    pub fn ctx(&self) -> &Arc<Context> {
        &self.ctx
    }

    /// The parameter space shared by every entity of this scope.
    pub fn param_space(&self) -> &Space {
        &self.param_space
    }

    pub fn add_stmt(&mut self, stmt: ScopStmt) {
        self.statements.push(stmt);
    }

    pub fn statements(&self) -> &[ScopStmt] {
        &self.statements
    }

    /// Look up a statement by name for in-place modification.
    pub fn statement_mut(&mut self, name: &str) -> Option<&mut ScopStmt> {
        self.statements.iter_mut().find(|s| s.name() == name)
    }
}
