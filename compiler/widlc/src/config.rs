//! Parser configuration.

use widl_parse::ParseOptions;
use widl_sema::AnalysisConfig;

/// Settings for a [`Parser`](crate::Parser). Survives [`reset`](crate::Parser::reset).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Global that declarations without `[Exposed]` are exposed on when
    /// no `[PrimaryGlobal]` interface is declared.
    pub default_global: String,
    /// Accept the legacy `A implements B;` statement as `A includes B;`.
    pub allow_implements: bool,
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default_global(mut self, name: impl Into<String>) -> Self {
        self.default_global = name.into();
        self
    }

    #[must_use]
    pub fn with_allow_implements(mut self, allow: bool) -> Self {
        self.allow_implements = allow;
        self
    }

    pub(crate) fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            allow_implements: self.allow_implements,
        }
    }

    pub(crate) fn analysis(&self) -> AnalysisConfig {
        AnalysisConfig {
            default_global: self.default_global.clone(),
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            default_global: AnalysisConfig::default().default_global,
            allow_implements: true,
        }
    }
}
