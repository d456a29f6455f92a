//! Reads the marker's arguments into a [`ResolvedConfiguration`].

use tracked_syntax::{Expr, TypePath};

use crate::inspect::Facts;

/// Settings derived from the marker arguments and the declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfiguration {
    /// The wrapper named by `Type.self`, without `.self`.
    pub wrapper_type: TypePath,
    /// Value of the `config:` argument.
    pub config_expression: Option<Expr>,
    /// Set only by a literal `projected: true`.
    pub emit_projection: bool,
    /// Whether the declared type is `T?` or `T!`.
    pub is_optional_value: bool,
    pub has_explicit_initializer: bool,
}

/// Assumes `wrapper_type` was already checked by
/// [`validate`](crate::validate::validate).
pub fn resolve(facts: &Facts<'_>, wrapper_type: TypePath) -> ResolvedConfiguration {
    let labeled = |label: &str| {
        facts
            .arguments
            .iter()
            .find(|argument| argument.label() == Some(label))
            .map(|argument| &argument.value)
    };

    // Anything but the literal `true` leaves the projection off.
    let emit_projection = labeled("projected").and_then(Expr::as_bool_literal) == Some(true);

    ResolvedConfiguration {
        wrapper_type,
        config_expression: labeled("config").cloned(),
        emit_projection,
        is_optional_value: facts.declared_type.normalized().is_optional(),
        has_explicit_initializer: facts.initializer.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use tracked_chumsky::parse_decl;

    use super::*;
    use crate::Config;
    use crate::inspect::inspect;

    fn resolved(src: &str) -> ResolvedConfiguration {
        let decl = parse_decl(src).unwrap();
        let attribute = &decl.attributes()[0];
        let facts = inspect(&Config::default(), attribute, &decl).unwrap();
        resolve(&facts, TypePath::single("Box"))
    }

    #[test]
    fn test_projected_flag() {
        let cases = [
            ("@Tracked(Box.self, projected: true) var a: Int", true),
            ("@Tracked(Box.self, projected: false) var a: Int", false),
            ("@Tracked(Box.self, projected: isEnabled) var a: Int", false),
            ("@Tracked(Box.self, projected: !false) var a: Int", false),
            ("@Tracked(Box.self) var a: Int", false),
        ];
        for (src, expected) in cases {
            assert_eq!(resolved(src).emit_projection, expected, "while resolving {src}");
        }
    }

    #[test]
    fn test_config_expression() {
        let config = resolved("@Tracked(Box.self, config: 0...100) var a: Int").config_expression;
        assert_eq!(config.map(|expr| expr.to_string()), Some("0...100".to_string()));
        assert_eq!(resolved("@Tracked(Box.self) var a: Int").config_expression, None);
    }

    #[test]
    fn test_optionality_and_initializer() {
        let plain = resolved("@Tracked(Box.self) var a: Int");
        assert!(!plain.is_optional_value);
        assert!(!plain.has_explicit_initializer);

        let optional = resolved("@Tracked(Box.self) var a: Int?");
        assert!(optional.is_optional_value);

        let unwrapped = resolved("@Tracked(Box.self) var a: Int! = 1");
        assert!(unwrapped.is_optional_value);
        assert!(unwrapped.has_explicit_initializer);

        let array = resolved("@Tracked(Box.self) var a: [Int?] = []");
        assert!(!array.is_optional_value);
    }
}
