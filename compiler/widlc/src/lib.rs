//! WIDL front end.
//!
//! A [`Parser`] accumulates IDL source fragments across any number of
//! [`Parser::parse`] calls, then [`Parser::finish`] resolves and validates
//! everything seen so far into a [`Definitions`] graph:
//!
//! ```text
//! parse(src) ─┐
//! parse(src) ─┼─> fragments ──finish──> Definitions
//! parse(src) ─┘                 │
//!                               └─> IdlError (first error, no partial result)
//! ```
//!
//! Errors carry a [`Loc`](widl_ir::Loc) into the fragment that raised them;
//! render them against [`Parser::source_map`]:
//!
//! ```text
//! let mut parser = Parser::default();
//! parser.parse_named("dom.webidl", "interface X { getter boolean foo(); };")?;
//! if let Err(err) = parser.finish() {
//!     eprintln!("{}", parser.render(&err));
//! }
//! ```

mod config;
mod parser;

use std::sync::Once;

pub use config::ParserConfig;
pub use parser::{Parser, ParserState};

pub use widl_diagnostic::{Diagnostic, ErrorCode, ErrorKind, IdlError, SourceMap};
pub use widl_ir::model::{
    Declaration, DeclId, Definitions, ExposureSet, Interface, InterfaceKind, Member, MemberId,
    MemberKind,
};
pub use widl_ir::{FileId, Loc, Name, StringInterner};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times; only the first call does anything, and only
/// when `RUST_LOG` is set. Enable pass timings with `RUST_LOG=widl_sema=debug`
/// or the parser cursor with `RUST_LOG=widl_parse=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
