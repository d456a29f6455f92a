use std::fmt;

use tracked_syntax::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
            Severity::Note => f.write_str("note"),
        }
    }
}

/// A message reported to the host through a [`DiagnosticSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Stable rule identifier, e.g. `tracked.not-a-variable`.
    pub id: &'static str,
    pub message: String,
    pub span: Span,
    pub help: Option<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]: {} at {}",
            self.severity, self.id, self.message, self.span
        )?;
        if let Some(help) = &self.help {
            write!(f, "\n  help: {}", help)?;
        }
        Ok(())
    }
}

/// Where expansion failures are reported.
///
/// The sink is append-only from the point of view of the expansion; nothing
/// reads back what was emitted.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic {
            severity: Severity::Error,
            id: "tracked.not-mutable",
            message: "@Tracked can only be applied to a `var`, not a `let`".to_string(),
            span: Span::new(0, 3),
            help: Some("replace `let` with `var`".to_string()),
        };
        insta::assert_snapshot!(diagnostic.to_string(), @r"
        error[tracked.not-mutable]: @Tracked can only be applied to a `var`, not a `let` at 0..3
          help: replace `let` with `var`
        ");
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let diagnostic = Diagnostic {
            severity: Severity::Note,
            id: "tracked.test",
            message: "note".to_string(),
            span: Span::default(),
            help: None,
        };
        (&mut sink).emit(diagnostic.clone());
        assert_eq!(sink, vec![diagnostic]);
    }
}
