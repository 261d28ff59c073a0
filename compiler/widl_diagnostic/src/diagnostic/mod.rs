//! Renderable diagnostics.
//!
//! [`Diagnostic`] is the presentation form of an [`IdlError`](crate::IdlError):
//! a code, a message, labelled locations, notes and suggestions. Rendering
//! needs the [`SourceMap`] to turn locations into `file:line:col`.

use std::fmt::{self, Write};

use widl_ir::Loc;

use crate::{ErrorCode, SourceMap};

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A labeled location with a message.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub loc: Loc,
    pub message: String,
    /// Whether this is the primary error location.
    pub is_primary: bool,
}

impl Label {
    pub fn primary(loc: Loc, message: impl Into<String>) -> Self {
        Label {
            loc,
            message: message.into(),
            is_primary: true,
        }
    }

    pub fn secondary(loc: Loc, message: impl Into<String>) -> Self {
        Label {
            loc,
            message: message.into(),
            is_primary: false,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Error)
    }

    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Warning)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add a primary label at the error location.
    pub fn with_label(mut self, loc: Loc, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(loc, message));
        self
    }

    /// Add a secondary label for context.
    pub fn with_secondary_label(mut self, loc: Loc, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(loc, message));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn primary_loc(&self) -> Option<Loc> {
        self.labels.iter().find(|l| l.is_primary).map(|l| l.loc)
    }

    /// Render as plain text:
    ///
    /// ```text
    /// dom.webidl:3:5: error[W2004]: member `foo` conflicts with ...
    ///    |     void foo();
    ///    |     ^^^^^^^^^^^ duplicate member
    ///   ::: dom.webidl:1:20: inherited from here
    ///   = note: ...
    ///   = help: ...
    /// ```
    pub fn render(&self, sources: &SourceMap) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut out, sources);
        out
    }

    fn write_to(&self, out: &mut String, sources: &SourceMap) -> fmt::Result {
        if let Some(loc) = self.primary_loc() {
            write!(out, "{}: ", position(sources, loc))?;
        }
        writeln!(out, "{}[{}]: {}", self.severity, self.code, self.message)?;

        for label in &self.labels {
            if label.is_primary {
                write_snippet(out, sources, label)?;
            } else {
                writeln!(
                    out,
                    "  ::: {}: {}",
                    position(sources, label.loc),
                    label.message
                )?;
            }
        }
        for note in &self.notes {
            writeln!(out, "  = note: {note}")?;
        }
        for suggestion in &self.suggestions {
            writeln!(out, "  = help: {suggestion}")?;
        }
        Ok(())
    }
}

fn position(sources: &SourceMap, loc: Loc) -> String {
    let name = sources.name(loc.file).unwrap_or("<unknown>");
    match sources.line_col(loc) {
        Some(lc) => format!("{name}:{}:{}", lc.line, lc.col),
        None => name.to_string(),
    }
}

fn write_snippet(out: &mut String, sources: &SourceMap, label: &Label) -> fmt::Result {
    let (Some(line), Some(lc)) = (sources.line_text(label.loc), sources.line_col(label.loc)) else {
        return Ok(());
    };
    let remaining = line.chars().count().saturating_sub(lc.col - 1);
    let width = label
        .loc
        .span
        .len()
        .try_into()
        .unwrap_or(usize::MAX)
        .clamp(1, remaining.max(1));
    writeln!(out, "   | {line}")?;
    writeln!(
        out,
        "   | {}{} {}",
        " ".repeat(lc.col - 1),
        "^".repeat(width),
        label.message
    )
}
