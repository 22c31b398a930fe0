//! Analysis configuration.

/// Switches for the dependence analysis, supplied at construction.
///
/// Kept as an explicit value rather than process-global state so that two
/// analyses in the same process can run with different settings.
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    /// Skip the scattering legality check entirely and report every
    /// candidate as legal. Meant for pipelines whose transformations are
    /// correct by construction.
    pub legality_check_disabled: bool,
}
