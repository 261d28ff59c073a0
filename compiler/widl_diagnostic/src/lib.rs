//! Diagnostic system for the WIDL front end.
//!
//! - [`ErrorKind`] is the error taxonomy; each kind has a stable [`ErrorCode`].
//! - [`IdlError`] is what `parse` and `finish` return on failure.
//! - [`Diagnostic`] is the rendered form, resolved against a [`SourceMap`].

mod diagnostic;
mod error;
mod error_code;
mod source_map;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error::{IdlError, RelatedLoc};
pub use error_code::{ErrorCode, ErrorKind};
pub use source_map::{LineCol, SourceMap};
