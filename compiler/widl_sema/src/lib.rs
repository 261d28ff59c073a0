//! Semantic analysis for WIDL.
//!
//! Turns the fragments accumulated by the parser into a validated
//! [`Definitions`] graph. Analysis is a fixed sequence of passes over a
//! shared context; the first error aborts with no partial result.
//!
//! ```text
//! Pass 1: Collect     register declarations, merge partials
//! Pass 2: Build       resolve types, lower into the model arena
//! Pass 3: Graph       parents, consequential interfaces, member lists
//! Pass 4: Validate    extended attributes, special operations, ObservableArray
//! Pass 5: Exposure    globals and exposure sets
//! ```
//!
//! Named types resolve against the full declaration set, so forward
//! references and references across fragments work.

mod attrs;
mod build;
mod collect;
mod context;
mod exposure;
mod graph;
mod suggest;
mod types;
mod validate;

use widl_diagnostic::IdlError;
use widl_ir::ast::Fragment;
use widl_ir::model::Definitions;
use widl_ir::StringInterner;

use context::Context;

/// Settings consulted during analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Exposure for declarations without `[Exposed]` when no primary
    /// global is declared.
    pub default_global: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            default_global: "Window".to_owned(),
        }
    }
}

/// Analyze every fragment as one declaration set.
#[tracing::instrument(level = "debug", skip_all, fields(fragments = fragments.len()))]
pub fn analyze(
    fragments: &[Fragment],
    interner: &StringInterner,
    config: &AnalysisConfig,
) -> Result<Definitions, IdlError> {
    let mut ctx = Context::new(interner, config);
    collect::collect(&mut ctx, fragments)?;
    build::build(&mut ctx)?;
    graph::build_graph(&mut ctx)?;
    validate::validate(&mut ctx)?;
    exposure::compute_exposure(&mut ctx)?;
    Ok(ctx.defs)
}

#[cfg(test)]
mod test_support;
