//! Structural facts read off one annotated declaration.

use tracked_syntax::{Argument, Attribute, Decl, Expr, Ident, Span, TypeExpr};

use crate::{Config, ExpansionError};

/// Everything later stages need to know about an eligible declaration.
///
/// Borrows from the declaration; nothing is copied until emission.
#[derive(Debug, Clone, PartialEq)]
pub struct Facts<'d> {
    pub name: &'d Ident,
    pub declared_type: &'d TypeExpr,
    pub initializer: Option<&'d Expr>,
    /// `public`, `private(set)` and friends, in source order.
    pub access_modifiers: Vec<&'d Ident>,
    /// `static` or `class` on a type-level property.
    pub type_modifier: Option<&'d Ident>,
    pub attributes: &'d [Attribute],
    /// Arguments of the marker attribute.
    pub arguments: &'d [Argument],
    pub order: AttributeOrder,
}

/// Where the marker and its companion sit among the declaration's attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeOrder {
    pub marker: Option<usize>,
    /// Position and span of the last companion attribute.
    pub companion: Option<(usize, Span)>,
}

impl AttributeOrder {
    /// Scans `attributes`, matching by last path component so that
    /// `@Module.Tracked` and `@Tracked` are the same marker.
    pub fn scan(config: &Config, attribute: &Attribute, attributes: &[Attribute]) -> Self {
        let marker = attributes
            .iter()
            .position(|candidate| candidate == attribute)
            .or_else(|| {
                attributes
                    .iter()
                    .position(|candidate| candidate.is_named(&config.marker))
            });
        let companion = attributes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, candidate)| candidate.is_named(&config.companion))
            .map(|(position, candidate)| (position, candidate.span));
        Self { marker, companion }
    }
}

/// Checks the declaration's shape and extracts its [`Facts`].
///
/// Rules run in a fixed order and the first failure is returned.
pub fn inspect<'d>(
    config: &Config,
    attribute: &'d Attribute,
    decl: &'d Decl,
) -> Result<Facts<'d>, ExpansionError> {
    let marker = || config.marker.clone();

    let variable = match decl {
        Decl::Variable(variable) => variable,
        Decl::Other(other) => {
            return Err(ExpansionError::NotAVariableDeclaration {
                marker: marker(),
                keyword: other.keyword.to_string(),
                span: other.keyword.span,
            });
        }
    };

    let binding = match variable.bindings.as_slice() {
        [binding] => binding,
        [_, second, ..] => {
            return Err(ExpansionError::MultipleBindingsUnsupported {
                marker: marker(),
                span: second.span,
            });
        }
        [] => {
            return Err(ExpansionError::NotAVariableDeclaration {
                marker: marker(),
                keyword: variable.binding.keyword().to_string(),
                span: variable.binding_span,
            });
        }
    };

    if !variable.is_mutable() {
        return Err(ExpansionError::NotMutable {
            marker: marker(),
            span: variable.binding_span,
        });
    }

    if let Some(block) = &binding.accessor_block {
        return Err(ExpansionError::CustomAccessorsPresent {
            marker: marker(),
            span: block.span(),
        });
    }

    let Some(declared_type) = &binding.type_annotation else {
        return Err(ExpansionError::MissingExplicitType {
            marker: marker(),
            name: binding.pattern.to_string(),
            span: binding.pattern.span(),
        });
    };

    let Some(name) = binding.pattern.as_identifier() else {
        return Err(ExpansionError::UnsupportedBindingPattern {
            marker: marker(),
            pattern: binding.pattern.to_string(),
            span: binding.pattern.span(),
        });
    };

    Ok(Facts {
        name,
        declared_type,
        initializer: binding.initializer.as_ref(),
        access_modifiers: variable.access_modifiers().collect(),
        type_modifier: variable.type_modifier(),
        attributes: &variable.attributes,
        arguments: attribute.arguments(),
        order: AttributeOrder::scan(config, attribute, &variable.attributes),
    })
}

#[cfg(test)]
mod tests {
    use tracked_chumsky::parse_decl;

    use super::*;

    fn check(src: &str) -> Result<(String, String, Option<String>), &'static str> {
        let decl = parse_decl(src).unwrap();
        let attribute = decl.attributes()[0].clone();
        inspect(&Config::default(), &attribute, &decl)
            .map(|facts| {
                (
                    facts.name.to_string(),
                    facts.declared_type.to_string(),
                    facts.initializer.map(ToString::to_string),
                )
            })
            .map_err(|error| error.id())
    }

    #[test]
    fn test_inspect_facts() {
        assert_eq!(
            check("@Tracked(Box.self) var title: String? = nil"),
            Ok(("title".to_string(), "String?".to_string(), Some("nil".to_string())))
        );
        assert_eq!(
            check("@Tracked(Box.self) public var count: Int"),
            Ok(("count".to_string(), "Int".to_string(), None))
        );
    }

    #[test]
    fn test_inspect_rule_order() {
        let cases = [
            ("@Tracked(Box.self) func reset() {}", "tracked.not-a-variable"),
            ("@Tracked(Box.self) let a: Int, b: Int", "tracked.multiple-bindings"),
            ("@Tracked(Box.self) let a: Int = 1", "tracked.not-mutable"),
            ("@Tracked(Box.self) var a: Int { 1 }", "tracked.custom-accessors"),
            ("@Tracked(Box.self) var a: Int = 1 { didSet {} }", "tracked.custom-accessors"),
            ("@Tracked(Box.self) var a = 1", "tracked.missing-type"),
            ("@Tracked(Box.self) var (a, b) = (1, 2)", "tracked.missing-type"),
            ("@Tracked(Box.self) var (a, b): (Int, Int)", "tracked.unsupported-pattern"),
            ("@Tracked(Box.self) var _: Int", "tracked.unsupported-pattern"),
        ];
        for (src, id) in cases {
            assert_eq!(check(src).map(|_| ()), Err(id), "while inspecting {src}");
        }
    }

    #[test]
    fn test_error_spans() {
        let src = "@Tracked(Box.self) var a: Int, b: Int";
        let decl = parse_decl(src).unwrap();
        let error = inspect(&Config::default(), &decl.attributes()[0], &decl).unwrap_err();
        let span = error.span();
        assert_eq!(&src[span.start..span.end], "b: Int");

        let src = "@Tracked(Box.self) let a: Int";
        let decl = parse_decl(src).unwrap();
        let error = inspect(&Config::default(), &decl.attributes()[0], &decl).unwrap_err();
        let span = error.span();
        assert_eq!(&src[span.start..span.end], "let");
    }

    #[test]
    fn test_attribute_order() {
        let decl = parse_decl(
            "@ObservationIgnored @Main.Tracked(Box.self) @Other @ObservationIgnored var a: Int",
        )
        .unwrap();
        let attributes = decl.attributes();
        let order = AttributeOrder::scan(&Config::default(), &attributes[1], attributes);
        assert_eq!(order.marker, Some(1));
        assert_eq!(order.companion.map(|(position, _)| position), Some(3));

        let detached = Attribute::new("Tracked");
        let order = AttributeOrder::scan(&Config::default(), &detached, attributes);
        assert_eq!(order.marker, Some(1));
    }
}
