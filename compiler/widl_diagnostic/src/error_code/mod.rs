//! Error codes and kinds for all WIDL diagnostics.
//!
//! Each error code is a unique identifier (e.g., `W2004`) with the first digit
//! indicating the phase that raises it. Codes are stable and searchable; the
//! message text that accompanies them is not.

use std::fmt;

/// Error codes for all WIDL diagnostics.
///
/// Format: W#### where first digit indicates phase:
/// - W0xxx: Lexer and grammar errors
/// - W1xxx: Extended attribute errors
/// - W2xxx: Type and declaration graph errors
/// - W3xxx: Exposure errors
/// - W4xxx: Special operation errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Syntax (W0xxx)
    /// Malformed grammar or unterminated token
    W0001,

    // Extended attributes (W1xxx)
    /// Unrecognized extended attribute
    W1001,
    /// Extended attribute in a disallowed position or value shape
    W1002,

    // Types and graph (W2xxx)
    /// Type placement or constraint violation
    W2001,
    /// Inheritance, typedef or includes cycle
    W2002,
    /// Wrong declaration kind
    W2003,
    /// Member name collision
    W2004,
    /// Two top-level definitions with one name
    W2005,
    /// Unresolved name
    W2006,

    // Exposure (W3xxx)
    /// Name is not a declared global
    W3001,
    /// Exposure not a subset of the owner's exposure
    W3002,

    // Special operations (W4xxx)
    /// Special operation signature mismatch
    W4001,
}

impl ErrorCode {
    /// All error code variants, for iteration and testing.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::W0001,
        ErrorCode::W1001,
        ErrorCode::W1002,
        ErrorCode::W2001,
        ErrorCode::W2002,
        ErrorCode::W2003,
        ErrorCode::W2004,
        ErrorCode::W2005,
        ErrorCode::W2006,
        ErrorCode::W3001,
        ErrorCode::W3002,
        ErrorCode::W4001,
    ];

    /// Get the code as a string (e.g., "W2004").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::W0001 => "W0001",
            ErrorCode::W1001 => "W1001",
            ErrorCode::W1002 => "W1002",
            ErrorCode::W2001 => "W2001",
            ErrorCode::W2002 => "W2002",
            ErrorCode::W2003 => "W2003",
            ErrorCode::W2004 => "W2004",
            ErrorCode::W2005 => "W2005",
            ErrorCode::W2006 => "W2006",
            ErrorCode::W3001 => "W3001",
            ErrorCode::W3002 => "W3002",
            ErrorCode::W4001 => "W4001",
        }
    }

    /// The kind this code is raised for.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::W0001 => ErrorKind::Syntax,
            ErrorCode::W1001 => ErrorKind::UnknownAttribute,
            ErrorCode::W1002 => ErrorKind::AttributeContext,
            ErrorCode::W2001 => ErrorKind::TypeConstraint,
            ErrorCode::W2002 => ErrorKind::Cycle,
            ErrorCode::W2003 => ErrorKind::Kind,
            ErrorCode::W2004 => ErrorKind::DuplicateMember,
            ErrorCode::W2005 => ErrorKind::DuplicateDefinition,
            ErrorCode::W2006 => ErrorKind::Reference,
            ErrorCode::W3001 => ErrorKind::InvalidGlobalName,
            ErrorCode::W3002 => ErrorKind::ExposureSubset,
            ErrorCode::W4001 => ErrorKind::SpecialOperationSignature,
        }
    }

    /// Check if this is raised while parsing (W0xxx range).
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, ErrorCode::W0001)
    }

    /// Check if this is an extended attribute error (W1xxx range).
    pub fn is_attribute_error(&self) -> bool {
        matches!(self, ErrorCode::W1001 | ErrorCode::W1002)
    }

    /// Check if this is a type or graph error (W2xxx range).
    pub fn is_graph_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::W2001
                | ErrorCode::W2002
                | ErrorCode::W2003
                | ErrorCode::W2004
                | ErrorCode::W2005
                | ErrorCode::W2006
        )
    }

    /// Check if this is an exposure error (W3xxx range).
    pub fn is_exposure_error(&self) -> bool {
        matches!(self, ErrorCode::W3001 | ErrorCode::W3002)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error taxonomy. Every [`IdlError`](crate::IdlError) has exactly one kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    Syntax,
    UnknownAttribute,
    AttributeContext,
    TypeConstraint,
    Cycle,
    Kind,
    DuplicateMember,
    DuplicateDefinition,
    Reference,
    InvalidGlobalName,
    ExposureSubset,
    SpecialOperationSignature,
}

impl ErrorKind {
    pub fn code(self) -> ErrorCode {
        match self {
            ErrorKind::Syntax => ErrorCode::W0001,
            ErrorKind::UnknownAttribute => ErrorCode::W1001,
            ErrorKind::AttributeContext => ErrorCode::W1002,
            ErrorKind::TypeConstraint => ErrorCode::W2001,
            ErrorKind::Cycle => ErrorCode::W2002,
            ErrorKind::Kind => ErrorCode::W2003,
            ErrorKind::DuplicateMember => ErrorCode::W2004,
            ErrorKind::DuplicateDefinition => ErrorCode::W2005,
            ErrorKind::Reference => ErrorCode::W2006,
            ErrorKind::InvalidGlobalName => ErrorCode::W3001,
            ErrorKind::ExposureSubset => ErrorCode::W3002,
            ErrorKind::SpecialOperationSignature => ErrorCode::W4001,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Syntax => "syntax error",
            ErrorKind::UnknownAttribute => "unknown extended attribute",
            ErrorKind::AttributeContext => "misplaced extended attribute",
            ErrorKind::TypeConstraint => "type constraint violated",
            ErrorKind::Cycle => "cycle detected",
            ErrorKind::Kind => "wrong declaration kind",
            ErrorKind::DuplicateMember => "duplicate member",
            ErrorKind::DuplicateDefinition => "duplicate definition",
            ErrorKind::Reference => "unresolved reference",
            ErrorKind::InvalidGlobalName => "invalid global name",
            ErrorKind::ExposureSubset => "exposure not a subset",
            ErrorKind::SpecialOperationSignature => "invalid special operation",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
