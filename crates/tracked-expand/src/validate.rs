//! Argument and companion-marker rules run after the shape checks.

use tracked_syntax::{Argument, Attribute, TypePath};

use crate::inspect::Facts;
use crate::{Config, ExpansionError};

/// Labels that may appear at most once in the marker's argument list.
const SINGLE_LABELS: &[&str] = &["config", "projected"];

/// Attribute names within this edit distance of the companion are offered as
/// a suggestion when the companion is missing.
const NEAR_MISS_DISTANCE: usize = 2;

/// Runs the remaining rules in order and returns the wrapper type named by
/// the first unlabeled argument, with `.self` stripped.
pub fn validate(
    config: &Config,
    attribute: &Attribute,
    facts: &Facts<'_>,
) -> Result<TypePath, ExpansionError> {
    let wrapper = wrapper_type(config, attribute, facts.arguments)?;
    check_duplicate_labels(facts.arguments)?;
    check_companion(config, attribute, facts)?;
    Ok(wrapper)
}

fn wrapper_type(
    config: &Config,
    attribute: &Attribute,
    arguments: &[Argument],
) -> Result<TypePath, ExpansionError> {
    let Some(argument) = arguments.iter().find(|argument| argument.label.is_none()) else {
        return Err(ExpansionError::MissingWrapperArgument {
            marker: config.marker.clone(),
            span: attribute.span,
        });
    };
    argument
        .value
        .as_type_reference()
        .ok_or_else(|| ExpansionError::InvalidWrapperExpression {
            expression: argument.value.to_string(),
            span: argument.span,
        })
}

fn check_duplicate_labels(arguments: &[Argument]) -> Result<(), ExpansionError> {
    let mut seen: Vec<&str> = Vec::new();
    for argument in arguments {
        let Some(label) = argument.label().filter(|label| SINGLE_LABELS.contains(label)) else {
            continue;
        };
        if seen.contains(&label) {
            return Err(ExpansionError::DuplicateArgumentLabel {
                label: label.to_string(),
                span: argument.span,
            });
        }
        seen.push(label);
    }
    Ok(())
}

fn check_companion(
    config: &Config,
    attribute: &Attribute,
    facts: &Facts<'_>,
) -> Result<(), ExpansionError> {
    match (facts.order.marker, facts.order.companion) {
        (_, None) => Err(ExpansionError::MissingRequiredCompanionMarker {
            marker: config.marker.clone(),
            companion: config.companion.clone(),
            near_miss: near_miss(config, facts.attributes),
            span: attribute.span,
        }),
        (Some(marker), Some((companion, span))) if companion < marker => {
            Err(ExpansionError::CompanionMarkerMisordered {
                marker: config.marker.clone(),
                companion: config.companion.clone(),
                span,
            })
        }
        _ => Ok(()),
    }
}

/// The closest attribute name that looks like a misspelled companion.
fn near_miss(config: &Config, attributes: &[Attribute]) -> Option<String> {
    attributes
        .iter()
        .map(|attribute| attribute.name.last_name())
        .filter(|name| *name != config.marker)
        .map(|name| (strsim::levenshtein(name, &config.companion), name))
        .filter(|(distance, _)| *distance <= NEAR_MISS_DISTANCE)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name.to_string())
}

#[cfg(test)]
mod tests {
    use tracked_chumsky::parse_decl;

    use super::*;
    use crate::inspect::inspect;

    fn run(src: &str) -> Result<TypePath, ExpansionError> {
        let decl = parse_decl(src).unwrap();
        let config = Config::default();
        let attribute = decl
            .attributes()
            .iter()
            .find(|attribute| attribute.is_named("Tracked"))
            .unwrap();
        let facts = inspect(&config, attribute, &decl).unwrap();
        validate(&config, attribute, &facts)
    }

    fn rule(src: &str) -> Result<String, &'static str> {
        run(src)
            .map(|wrapper| wrapper.to_string())
            .map_err(|error| error.id())
    }

    #[test]
    fn test_wrapper_argument() {
        assert_eq!(
            rule("@Tracked(Box<String>.self) @ObservationIgnored var title: String"),
            Ok("Box<String>".to_string())
        );
        assert_eq!(
            rule("@Tracked(config: 1, Outer.Box.self) @ObservationIgnored var title: String"),
            Ok("Outer.Box".to_string())
        );
        assert_eq!(
            rule("@Tracked @ObservationIgnored var title: String"),
            Err("tracked.missing-wrapper")
        );
        assert_eq!(
            rule("@Tracked(config: 1) @ObservationIgnored var title: String"),
            Err("tracked.missing-wrapper")
        );
        assert_eq!(
            rule("@Tracked(Box) @ObservationIgnored var title: String"),
            Err("tracked.invalid-wrapper")
        );
        assert_eq!(
            rule("@Tracked(makeBox().self) @ObservationIgnored var title: String"),
            Err("tracked.invalid-wrapper")
        );
    }

    #[test]
    fn test_invalid_wrapper_span() {
        let src = "@Tracked(\"Box\", config: 1) @ObservationIgnored var title: String";
        let error = run(src).unwrap_err();
        let span = error.span();
        assert_eq!(&src[span.start..span.end], "\"Box\"");
    }

    #[test]
    fn test_duplicate_labels() {
        let src = "@Tracked(Box.self, config: 1, config: 2) @ObservationIgnored var a: Int";
        let error = run(src).unwrap_err();
        assert_eq!(error.id(), "tracked.duplicate-argument");
        let span = error.span();
        assert_eq!(&src[span.start..span.end], "config: 2");

        assert_eq!(
            rule("@Tracked(Box.self, projected: true, projected: false) @ObservationIgnored var a: Int"),
            Err("tracked.duplicate-argument")
        );
        assert_eq!(
            rule("@Tracked(Box.self, extra: 1, extra: 2) @ObservationIgnored var a: Int"),
            Ok("Box".to_string())
        );
    }

    #[test]
    fn test_companion_marker() {
        assert_eq!(
            rule("@Tracked(Box.self) var a: Int"),
            Err("tracked.missing-companion")
        );
        assert_eq!(
            rule("@ObservationIgnored @Tracked(Box.self) var a: Int"),
            Err("tracked.misordered-companion")
        );
        assert_eq!(
            rule("@Tracked(Box.self) @Observation.ObservationIgnored var a: Int"),
            Ok("Box".to_string())
        );
    }

    #[test]
    fn test_companion_near_miss() {
        let error = run("@Tracked(Box.self) @ObservationIgnore var a: Int").unwrap_err();
        assert_eq!(
            error,
            ExpansionError::MissingRequiredCompanionMarker {
                marker: "Tracked".to_string(),
                companion: "ObservationIgnored".to_string(),
                near_miss: Some("ObservationIgnore".to_string()),
                span: error.span(),
            }
        );

        let error = run("@Tracked(Box.self) @MainActor var a: Int").unwrap_err();
        assert!(matches!(
            error,
            ExpansionError::MissingRequiredCompanionMarker { near_miss: None, .. }
        ));
    }

    #[test]
    fn test_misordered_span() {
        let src = "@ObservationIgnored @Tracked(Box.self) var a: Int";
        let error = run(src).unwrap_err();
        let span = error.span();
        assert_eq!(&src[span.start..span.end], "@ObservationIgnored");
    }
}
