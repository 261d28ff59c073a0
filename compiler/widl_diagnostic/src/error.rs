//! The single error type returned by `parse` and `finish`.

use widl_ir::Loc;

use crate::{Diagnostic, ErrorKind};

/// A related location attached to an error ("previously declared here").
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RelatedLoc {
    pub loc: Loc,
    pub message: String,
}

/// A syntax or semantic error.
///
/// The first error raised aborts the call that raised it; there is no
/// recovery and no partial result.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct IdlError {
    pub kind: ErrorKind,
    pub message: String,
    /// Primary location.
    pub loc: Loc,
    pub related: Vec<RelatedLoc>,
    pub notes: Vec<String>,
    pub suggestion: Option<String>,
}

impl IdlError {
    #[cold]
    pub fn new(kind: ErrorKind, message: impl Into<String>, loc: Loc) -> Self {
        IdlError {
            kind,
            message: message.into(),
            loc,
            related: Vec::new(),
            notes: Vec::new(),
            suggestion: None,
        }
    }

    #[cold]
    pub fn syntax(message: impl Into<String>, loc: Loc) -> Self {
        Self::new(ErrorKind::Syntax, message, loc)
    }

    #[cold]
    pub fn unknown_attribute(message: impl Into<String>, loc: Loc) -> Self {
        Self::new(ErrorKind::UnknownAttribute, message, loc)
    }

    #[cold]
    pub fn attribute_context(message: impl Into<String>, loc: Loc) -> Self {
        Self::new(ErrorKind::AttributeContext, message, loc)
    }

    #[cold]
    pub fn type_constraint(message: impl Into<String>, loc: Loc) -> Self {
        Self::new(ErrorKind::TypeConstraint, message, loc)
    }

    #[cold]
    pub fn cycle(message: impl Into<String>, loc: Loc) -> Self {
        Self::new(ErrorKind::Cycle, message, loc)
    }

    #[cold]
    pub fn kind_mismatch(message: impl Into<String>, loc: Loc) -> Self {
        Self::new(ErrorKind::Kind, message, loc)
    }

    #[cold]
    pub fn duplicate_member(message: impl Into<String>, loc: Loc) -> Self {
        Self::new(ErrorKind::DuplicateMember, message, loc)
    }

    #[cold]
    pub fn duplicate_definition(message: impl Into<String>, loc: Loc) -> Self {
        Self::new(ErrorKind::DuplicateDefinition, message, loc)
    }

    #[cold]
    pub fn reference(message: impl Into<String>, loc: Loc) -> Self {
        Self::new(ErrorKind::Reference, message, loc)
    }

    #[cold]
    pub fn invalid_global_name(message: impl Into<String>, loc: Loc) -> Self {
        Self::new(ErrorKind::InvalidGlobalName, message, loc)
    }

    #[cold]
    pub fn exposure_subset(message: impl Into<String>, loc: Loc) -> Self {
        Self::new(ErrorKind::ExposureSubset, message, loc)
    }

    #[cold]
    pub fn special_operation(message: impl Into<String>, loc: Loc) -> Self {
        Self::new(ErrorKind::SpecialOperationSignature, message, loc)
    }

    /// Attach a related location.
    #[must_use]
    pub fn with_related(mut self, loc: Loc, message: impl Into<String>) -> Self {
        self.related.push(RelatedLoc {
            loc,
            message: message.into(),
        });
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Convert into a renderable diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.kind.code())
            .with_message(self.message.clone())
            .with_label(self.loc, self.kind.as_str());
        for related in &self.related {
            diag = diag.with_secondary_label(related.loc, related.message.clone());
        }
        for note in &self.notes {
            diag = diag.with_note(note.clone());
        }
        if let Some(suggestion) = &self.suggestion {
            diag = diag.with_suggestion(suggestion.clone());
        }
        diag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;

    #[test]
    fn display_includes_kind_and_message() {
        let err = IdlError::duplicate_member("member `foo` declared twice", Loc::DUMMY);
        assert_eq!(err.to_string(), "duplicate member: member `foo` declared twice");
    }

    #[test]
    fn diagnostic_carries_code_and_extras() {
        let err = IdlError::unknown_attribute("unknown extended attribute `Throw`", Loc::DUMMY)
            .with_suggestion("did you mean `Throws`?")
            .with_related(Loc::DUMMY, "on this operation")
            .with_note("extended attribute names are case-sensitive");

        let diag = err.to_diagnostic();
        assert_eq!(diag.code, ErrorCode::W1001);
        assert_eq!(diag.labels.len(), 2);
        assert!(diag.labels[0].is_primary);
        assert_eq!(diag.suggestions, vec!["did you mean `Throws`?".to_string()]);
        assert_eq!(diag.notes.len(), 1);
    }
}
