//! Diagnostic values and the reporting seam for the oxasm front end.
//!
//! The scanner (and later stages) report problems through a
//! [`DiagnosticSink`]. Reporting is fire-and-forget: every malformed
//! construct still produces a token on the scanner side, and the sink
//! alone decides what happens to the report -- collect it, print it,
//! count it, drop it.
//!
//! [`DiagnosticBuffer`] is the standard collecting implementation, used
//! by the driver loop and by tests. The unit type `()` implements the
//! sink as a discard-everything stub.

use std::fmt;

use oxasm_lexer_core::Span;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Warning category, so drivers can classify or suppress by kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum WarnKind {
    /// Keyword spelling recognized from another assembler for
    /// compatibility; scans as an identifier here.
    #[error("foreign-keyword")]
    ForeignKeyword,
}

/// A single reported problem.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Warning category; `None` for errors.
    pub warn_kind: Option<WarnKind>,
    pub message: String,
    /// Byte span in the current line, when the report has a location.
    pub span: Option<Span>,
}

impl Diagnostic {
    /// Build a warning diagnostic.
    pub fn warning(kind: WarnKind, message: impl Into<String>, span: Option<Span>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            warn_kind: Some(kind),
            message: message.into(),
            span,
        }
    }

    /// Build an error diagnostic.
    pub fn error(message: impl Into<String>, span: Option<Span>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            warn_kind: None,
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.warn_kind {
            Some(kind) => write!(f, "{} [{kind}]: {}", self.severity, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

/// Fire-and-forget reporting seam.
///
/// Implementations must not influence scanning: the reporter emits and
/// moves on regardless of what the sink does with the diagnostic.
pub trait DiagnosticSink {
    /// Deliver one diagnostic to the sink.
    fn report(&mut self, diagnostic: Diagnostic);

    /// Report a categorized, non-fatal warning.
    fn warn(&mut self, kind: WarnKind, message: impl Into<String>, span: Option<Span>)
    where
        Self: Sized,
    {
        self.report(Diagnostic::warning(kind, message, span));
    }

    /// Report a non-fatal error.
    fn error(&mut self, message: impl Into<String>, span: Option<Span>)
    where
        Self: Sized,
    {
        self.report(Diagnostic::error(message, span));
    }
}

/// Discards every report. Useful when a caller only cares about tokens.
impl DiagnosticSink for () {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}

/// Collects diagnostics in arrival order.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticBuffer {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of collected diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` if nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns `true` if any collected diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Iterate over the collected diagnostics.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    /// Drain the buffer, returning everything collected so far.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

impl DiagnosticSink for DiagnosticBuffer {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

impl<'a> IntoIterator for &'a DiagnosticBuffer {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn buffer_collects_in_order() {
        let mut buffer = DiagnosticBuffer::new();
        buffer.error("first", None);
        buffer.warn(WarnKind::ForeignKeyword, "second", Some(Span::new(0, 3)));

        assert_eq!(buffer.len(), 2);
        assert!(!buffer.is_empty());
        assert_eq!(buffer.iter().next().unwrap().message, "first");
    }

    #[test]
    fn has_errors_ignores_warnings() {
        let mut buffer = DiagnosticBuffer::new();
        buffer.warn(WarnKind::ForeignKeyword, "only a warning", None);
        assert!(!buffer.has_errors());

        buffer.error("now an error", None);
        assert!(buffer.has_errors());
    }

    #[test]
    fn take_drains_the_buffer() {
        let mut buffer = DiagnosticBuffer::new();
        buffer.error("gone after take", None);

        let taken = buffer.take();
        assert_eq!(taken.len(), 1);
        assert!(buffer.is_empty());
    }

    #[test]
    fn display_includes_severity_and_category() {
        let warning = Diagnostic::warning(WarnKind::ForeignKeyword, "odd spelling", None);
        assert_eq!(warning.to_string(), "warning [foreign-keyword]: odd spelling");

        let error = Diagnostic::error("bad token", Some(Span::new(1, 2)));
        assert_eq!(error.to_string(), "error: bad token");
    }

    #[test]
    fn unit_sink_discards() {
        let mut sink = ();
        sink.error("nobody hears this", None);
    }

    #[test]
    fn warning_carries_span() {
        let diagnostic = Diagnostic::warning(
            WarnKind::ForeignKeyword,
            "spanned",
            Some(Span::new(4, 7)),
        );
        assert_eq!(diagnostic.span, Some(Span::new(4, 7)));
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert_eq!(diagnostic.warn_kind, Some(WarnKind::ForeignKeyword));
    }
}
