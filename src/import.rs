//! JSON scope descriptions.
//!
//! A [`ScopDescription`] is the textual form of a scope: parameter names
//! plus per-statement domain, scattering and access relations as ISL
//! strings. The format is what polyhedral extractors typically emit, and it
//! doubles as a convenient fixture format for tests and the command line
//! front end.
//!
//! ```json
//! {
//!   "parameters": ["N"],
//!   "statements": [
//!     {
//!       "name": "S0",
//!       "domain": "[N] -> { S0[i] : 0 <= i < N }",
//!       "scattering": "[N] -> { S0[i] -> [i] }",
//!       "accesses": [
//!         { "type": "write", "relation": "[N] -> { S0[i] -> A[i] }" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use isl_rs::{Context, Map, Set};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scop::{AccessKind, Scop, ScopStmt};

/// Errors raised while loading or realizing a scope description.
#[derive(Error, Debug)]
pub enum ImportError {
    /// I/O error while reading the description file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The description is not valid JSON for this format.
    #[error("failed to parse scope description: {0}")]
    Json(#[from] serde_json::Error),

    /// An access carries a kind other than `read`, `write` or `may_write`.
    #[error("unknown access kind `{0}` (expected read, write or may_write)")]
    UnknownAccessKind(String),

    /// A relation string is empty. Empty strings are rejected before they
    /// reach the ISL parser.
    #[error("statement `{0}` contains an empty ISL string")]
    EmptyInput(String),
}

/// Textual description of one scope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScopDescription {
    /// Symbolic parameter names shared by the whole scope.
    #[serde(default)]
    pub parameters: Vec<String>,

    /// Statements in textual order.
    pub statements: Vec<StmtDescription>,
}

/// One statement: domain, scattering and accesses as ISL strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StmtDescription {
    /// Statement identifier, e.g. `S0`.
    pub name: String,

    /// Iteration domain, e.g. `[N] -> { S0[i] : 0 <= i < N }`.
    pub domain: String,

    /// Scattering map, e.g. `[N] -> { S0[i] -> [i, 0] }`.
    pub scattering: String,

    /// Tagged access relations.
    #[serde(default)]
    pub accesses: Vec<AccessDescription>,
}

/// One tagged access relation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccessDescription {
    /// `read`, `write` or `may_write`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Access relation, e.g. `{ S0[i] -> A[i] }`.
    pub relation: String,
}

impl ScopDescription {
    /// Load a description from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse a description from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Realize the description into a [`Scop`] bound to `ctx`.
    pub fn build_scop(&self, ctx: Arc<Context>) -> Result<Scop, ImportError> {
        let params: Vec<&str> = self.parameters.iter().map(String::as_str).collect();
        let mut scop = Scop::with_parameters(ctx.clone(), &params);

        for stmt_desc in &self.statements {
            for text in [&stmt_desc.domain, &stmt_desc.scattering] {
                if text.trim().is_empty() {
                    return Err(ImportError::EmptyInput(stmt_desc.name.clone()));
                }
            }

            let domain = Set::read_from_str(&ctx, &stmt_desc.domain);
            let scattering = Map::read_from_str(&ctx, &stmt_desc.scattering);
            let mut stmt = ScopStmt::new(&stmt_desc.name, domain, scattering);

            for access in &stmt_desc.accesses {
                if access.relation.trim().is_empty() {
                    return Err(ImportError::EmptyInput(stmt_desc.name.clone()));
                }
                let kind = match access.kind.as_str() {
                    "read" => AccessKind::Read,
                    "write" => AccessKind::MustWrite,
                    "may_write" => AccessKind::MayWrite,
                    other => {
                        return Err(ImportError::UnknownAccessKind(other.to_string()))
                    }
                };
                stmt.add_access(kind, Map::read_from_str(&ctx, &access.relation));
            }

            scop.add_stmt(stmt);
        }

        Ok(scop)
    }
}
