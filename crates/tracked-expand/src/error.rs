use tracked_syntax::Span;

use crate::diagnostic::{Diagnostic, Severity};

/// Reasons a declaration is not eligible for expansion.
///
/// Each variant carries the span of the most specific offending node so the
/// diagnostic lands on the argument, the accessor block or the misordered
/// attribute instead of the whole declaration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpansionError {
    #[error("@{marker} can only be applied to a variable declaration, found `{keyword}`")]
    NotAVariableDeclaration {
        marker: String,
        keyword: String,
        span: Span,
    },
    #[error("@{marker} can only be applied to a single variable")]
    MultipleBindingsUnsupported { marker: String, span: Span },
    #[error("@{marker} can only be applied to a `var`, not a `let`")]
    NotMutable { marker: String, span: Span },
    #[error("@{marker} cannot be applied to a variable that already has accessors")]
    CustomAccessorsPresent { marker: String, span: Span },
    #[error("@{marker} requires an explicit type annotation on `{name}`")]
    MissingExplicitType {
        marker: String,
        name: String,
        span: Span,
    },
    #[error("@{marker} requires the variable to be bound to a plain identifier, found `{pattern}`")]
    UnsupportedBindingPattern {
        marker: String,
        pattern: String,
        span: Span,
    },
    #[error("@{marker} requires a wrapper type argument such as `Box<Value>.self`")]
    MissingWrapperArgument { marker: String, span: Span },
    #[error("expected a wrapper type reference of the form `Type.self`, found `{expression}`")]
    InvalidWrapperExpression { expression: String, span: Span },
    #[error("argument `{label}:` is given more than once")]
    DuplicateArgumentLabel { label: String, span: Span },
    #[error("@{marker} requires @{companion} to be applied to the same variable")]
    MissingRequiredCompanionMarker {
        marker: String,
        companion: String,
        near_miss: Option<String>,
        span: Span,
    },
    #[error("@{companion} must be written after @{marker}")]
    CompanionMarkerMisordered {
        marker: String,
        companion: String,
        span: Span,
    },
}

impl ExpansionError {
    /// Stable identifier of the rule that failed.
    pub fn id(&self) -> &'static str {
        match self {
            ExpansionError::NotAVariableDeclaration { .. } => "tracked.not-a-variable",
            ExpansionError::MultipleBindingsUnsupported { .. } => "tracked.multiple-bindings",
            ExpansionError::NotMutable { .. } => "tracked.not-mutable",
            ExpansionError::CustomAccessorsPresent { .. } => "tracked.custom-accessors",
            ExpansionError::MissingExplicitType { .. } => "tracked.missing-type",
            ExpansionError::UnsupportedBindingPattern { .. } => "tracked.unsupported-pattern",
            ExpansionError::MissingWrapperArgument { .. } => "tracked.missing-wrapper",
            ExpansionError::InvalidWrapperExpression { .. } => "tracked.invalid-wrapper",
            ExpansionError::DuplicateArgumentLabel { .. } => "tracked.duplicate-argument",
            ExpansionError::MissingRequiredCompanionMarker { .. } => "tracked.missing-companion",
            ExpansionError::CompanionMarkerMisordered { .. } => "tracked.misordered-companion",
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ExpansionError::NotAVariableDeclaration { span, .. }
            | ExpansionError::MultipleBindingsUnsupported { span, .. }
            | ExpansionError::NotMutable { span, .. }
            | ExpansionError::CustomAccessorsPresent { span, .. }
            | ExpansionError::MissingExplicitType { span, .. }
            | ExpansionError::UnsupportedBindingPattern { span, .. }
            | ExpansionError::MissingWrapperArgument { span, .. }
            | ExpansionError::InvalidWrapperExpression { span, .. }
            | ExpansionError::DuplicateArgumentLabel { span, .. }
            | ExpansionError::MissingRequiredCompanionMarker { span, .. }
            | ExpansionError::CompanionMarkerMisordered { span, .. } => *span,
        }
    }

    /// Suggested fix, if one is known.
    pub fn help(&self) -> Option<String> {
        match self {
            ExpansionError::MissingRequiredCompanionMarker {
                companion,
                near_miss: Some(near_miss),
                ..
            } => Some(format!(
                "found `@{}`; did you mean `@{}`?",
                near_miss, companion
            )),
            ExpansionError::MissingRequiredCompanionMarker { companion, .. } => {
                Some(format!("add `@{}` after the marker", companion))
            }
            ExpansionError::CompanionMarkerMisordered {
                marker, companion, ..
            } => Some(format!("move `@{}` after `@{}`", companion, marker)),
            ExpansionError::MultipleBindingsUnsupported { .. } => {
                Some("declare each variable in its own statement".to_string())
            }
            ExpansionError::NotMutable { .. } => Some("replace `let` with `var`".to_string()),
            _ => None,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            severity: Severity::Error,
            id: self.id(),
            message: self.to_string(),
            span: self.span(),
            help: self.help(),
        }
    }
}

impl From<ExpansionError> for Diagnostic {
    fn from(error: ExpansionError) -> Self {
        error.to_diagnostic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_and_id() {
        let error = ExpansionError::NotMutable {
            marker: "Tracked".to_string(),
            span: Span::new(4, 7),
        };
        assert_eq!(
            error.to_string(),
            "@Tracked can only be applied to a `var`, not a `let`"
        );
        assert_eq!(error.id(), "tracked.not-mutable");
        assert_eq!(error.span(), Span::new(4, 7));
    }

    #[test]
    fn test_companion_help() {
        let error = ExpansionError::MissingRequiredCompanionMarker {
            marker: "Tracked".to_string(),
            companion: "ObservationIgnored".to_string(),
            near_miss: Some("ObservationIgnore".to_string()),
            span: Span::default(),
        };
        assert_eq!(
            error.help().as_deref(),
            Some("found `@ObservationIgnore`; did you mean `@ObservationIgnored`?")
        );

        let diagnostic = Diagnostic::from(error);
        assert_eq!(diagnostic.id, "tracked.missing-companion");
        assert_eq!(diagnostic.severity, Severity::Error);
    }
}
