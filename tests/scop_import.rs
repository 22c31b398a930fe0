//! Scope description import and a realistic matrix-multiply fixture.

use std::fs;
use std::sync::Arc;

use isl_rs::{Context, Set, UnionMap};
use polyflow::{AnalysisConfig, DependenceAnalysis, DependenceKinds, ScopDescription};

/// C[i][j] += A[i][k] * B[k][j] over a 32^3 iteration space.
const GEMM: &str = r#"{
    "statements": [
        {
            "name": "S0",
            "domain": "{ S0[i, j, k] : 0 <= i < 32 and 0 <= j < 32 and 0 <= k < 32 }",
            "scattering": "{ S0[i, j, k] -> [i, j, k] }",
            "accesses": [
                { "type": "read", "relation": "{ S0[i, j, k] -> C[i, j] }" },
                { "type": "read", "relation": "{ S0[i, j, k] -> A[i, k] }" },
                { "type": "read", "relation": "{ S0[i, j, k] -> B[k, j] }" },
                { "type": "write", "relation": "{ S0[i, j, k] -> C[i, j] }" }
            ]
        }
    ]
}"#;

fn union_map_eq(actual: &UnionMap, expected: &str, ctx: &Context) -> bool {
    let expected = UnionMap::read_from_str(ctx, expected);
    actual.copy().subtract(expected.copy()).is_empty()
        && expected.subtract(actual.copy()).is_empty()
}

fn gemm_analysis(ctx: &Arc<Context>) -> DependenceAnalysis {
    let description = ScopDescription::from_json_str(GEMM).unwrap();
    let scop = description.build_scop(ctx.clone()).unwrap();
    let mut analysis = DependenceAnalysis::new(scop, AnalysisConfig::default());
    analysis.calculate_dependences();
    analysis
}

#[test]
fn gemm_reduction_flows_along_the_innermost_loop() {
    let ctx = Arc::new(Context::alloc());
    let analysis = gemm_analysis(&ctx);

    let raw = analysis.get_dependences(DependenceKinds::RAW).unwrap();
    assert!(union_map_eq(
        &raw,
        "{ S0[i, j, k] -> S0[i, j, k + 1] : 0 <= i < 32 and 0 <= j < 32 and 0 <= k <= 30 }",
        &ctx,
    ));

    let waw = analysis.get_dependences(DependenceKinds::WAW).unwrap();
    assert!(union_map_eq(
        &waw,
        "{ S0[i, j, k] -> S0[i, j, k + 1] : 0 <= i < 32 and 0 <= j < 32 and 0 <= k <= 30 }",
        &ctx,
    ));
}

#[test]
fn gemm_outer_loops_are_parallel_the_reduction_is_not() {
    let ctx = Arc::new(Context::alloc());
    let analysis = gemm_analysis(&ctx);

    let i_loop = Set::read_from_str(&ctx, "{ [i] : 0 <= i < 32 }");
    assert!(analysis.is_parallel_dimension(i_loop, 0).unwrap());

    let j_loop = Set::read_from_str(&ctx, "{ [i, j] : 0 <= i < 32 and 0 <= j < 32 }");
    assert!(analysis.is_parallel_dimension(j_loop, 1).unwrap());

    let k_loop = Set::read_from_str(
        &ctx,
        "{ [i, j, k] : 0 <= i < 32 and 0 <= j < 32 and 0 <= k < 32 }",
    );
    assert!(!analysis.is_parallel_dimension(k_loop, 2).unwrap());
}

#[test]
fn description_loads_from_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gemm.json");
    fs::write(&path, GEMM).unwrap();

    let description = ScopDescription::from_file(&path).unwrap();
    assert_eq!(description.statements.len(), 1);
    assert_eq!(description.statements[0].accesses.len(), 4);

    let ctx = Arc::new(Context::alloc());
    let scop = description.build_scop(ctx).unwrap();
    assert_eq!(scop.statements()[0].name(), "S0");
}

#[test]
fn missing_file_reports_an_io_error() {
    let err = ScopDescription::from_file("/nonexistent/scop.json").unwrap_err();
    assert!(err.to_string().contains("I/O error"));
}
