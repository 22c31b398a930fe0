//! PolyFlow: exact data-dependence analysis for polyhedral scopes
//!
//! This library computes the exact RAW/WAR/WAW dependence relations of a
//! structured loop region given in polyhedral form, and answers the two
//! questions a loop optimizer asks about them:
//!
//! 1. Is a candidate schedule legal, i.e. does it preserve the execution
//!    order of every dependence?
//! 2. Does a given loop dimension carry a dependence, or can it run in
//!    parallel?
//!
//! # Pipeline
//!
//! ```text
//! Scop (domains + scatterings + tagged accesses)
//!   → collect   (scope-wide Read / Write / MayWrite / Schedule unions)
//!   → flow      (ISL dataflow: exact last writer → RAW, WAW, WAR)
//!   → store     (filtered union queries, invalidate/recompute lifecycle)
//!        ├→ legality     (candidate scattering keeps all distances lex-positive?)
//!        └→ parallelism  (no dependence carried exactly at this depth?)
//! ```
//!
//! The dependences are exact: for a specific read instance only the last
//! write instance reaching it is reported, and in the presence of may-writes
//! the set of possible last writers is reported. The analysis never produces
//! redundant dependences.
//!
//! All heavy relational algebra (union, intersection, application, deltas,
//! lexicographic comparison, dataflow) is delegated to the Integer Set
//! Library through `isl_rs`; this crate contributes the dependence semantics
//! on top, not the solver.
//!
//! # Module Organization
//!
//! - [`scop`]: the scope snapshot (statements, domains, scatterings, tagged
//!   access relations, shared ISL context and parameter space)
//! - [`collect`]: unification of per-statement relations into scope-wide
//!   union maps
//! - [`flow`]: the two dataflow invocations producing RAW, WAW and WAR
//! - [`dependences`]: the store, computation lifecycle and filtered queries
//! - [`legality`]: candidate scattering validation
//! - [`parallelism`]: dependence-carrying test per loop dimension
//! - [`config`]: explicit analysis configuration
//! - [`import`]: JSON scope descriptions for tooling and tests
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use isl_rs::{Context, Map, Set};
//! use polyflow::{
//!     AccessKind, AnalysisConfig, DependenceAnalysis, DependenceKinds, Scop, ScopStmt,
//! };
//!
//! // for i in [1, N): A[i] = A[i - 1] + 1
//! let ctx = Arc::new(Context::alloc());
//! let mut scop = Scop::with_parameters(ctx.clone(), &["N"]);
//!
//! let mut stmt = ScopStmt::new(
//!     "S0",
//!     Set::read_from_str(&ctx, "[N] -> { S0[i] : 1 <= i < N }"),
//!     Map::read_from_str(&ctx, "[N] -> { S0[i] -> [i] }"),
//! );
//! stmt.add_access(
//!     AccessKind::Read,
//!     Map::read_from_str(&ctx, "[N] -> { S0[i] -> A[i - 1] }"),
//! );
//! stmt.add_access(
//!     AccessKind::MustWrite,
//!     Map::read_from_str(&ctx, "[N] -> { S0[i] -> A[i] }"),
//! );
//! scop.add_stmt(stmt);
//!
//! let mut analysis = DependenceAnalysis::new(scop, AnalysisConfig::default());
//! analysis.calculate_dependences();
//!
//! let raw = analysis.get_dependences(DependenceKinds::RAW).unwrap();
//! println!("RAW: {}", raw.to_str());
//! ```

pub mod collect;
pub mod config;
pub mod dependences;
pub mod flow;
pub mod import;
pub mod legality;
pub mod parallelism;
pub mod scop;

pub use config::AnalysisConfig;
pub use dependences::{DependenceAnalysis, DependenceKinds, DependencesError};
pub use flow::DependenceRelations;
pub use import::{AccessDescription, ImportError, ScopDescription, StmtDescription};
pub use scop::{AccessKind, MemoryAccess, Scop, ScopStmt};
