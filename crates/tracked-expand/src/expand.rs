use tracing::debug;
use tracked_syntax::{Accessor, Attribute, Decl};

use crate::inspect::inspect;
use crate::resolve::resolve;
use crate::synthesize::{EmissionPlan, synthesize};
use crate::validate::validate;
use crate::{Config, DiagnosticSink, ExpansionError};

/// The "produce accessor block" request.
pub trait AccessorExpansion {
    /// Returns the four accessors, or nothing after reporting one diagnostic.
    fn expand_accessors(
        &self,
        attribute: &Attribute,
        decl: &Decl,
        sink: &mut dyn DiagnosticSink,
    ) -> Vec<Accessor>;
}

/// The "produce peer declarations" request.
pub trait PeerExpansion {
    /// Returns the storage and optional projection, or nothing after
    /// reporting one diagnostic.
    fn expand_peers(
        &self,
        attribute: &Attribute,
        decl: &Decl,
        sink: &mut dyn DiagnosticSink,
    ) -> Vec<Decl>;
}

/// Output of both requests for one declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expansion {
    pub accessors: Vec<Accessor>,
    pub peers: Vec<Decl>,
}

impl Expansion {
    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty() && self.peers.is_empty()
    }
}

/// Expands `@Tracked` variables.
///
/// Holds no state besides its configuration; both requests recompute
/// everything from the declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackedProperty {
    pub config: Config,
}

impl TrackedProperty {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs inspection, validation, resolution and synthesis.
    pub fn plan(
        &self,
        attribute: &Attribute,
        decl: &Decl,
    ) -> Result<EmissionPlan, ExpansionError> {
        let facts = inspect(&self.config, attribute, decl)?;
        let wrapper = validate(&self.config, attribute, &facts)?;
        let resolved = resolve(&facts, wrapper);
        Ok(synthesize(&self.config, &facts, &resolved))
    }

    fn plan_or_report(
        &self,
        request: &'static str,
        attribute: &Attribute,
        decl: &Decl,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<EmissionPlan> {
        let _span = tracing::debug_span!("expand", request, property = %property_label(decl))
            .entered();
        match self.plan(attribute, decl) {
            Ok(plan) => {
                debug!(
                    storage = %plan.storage_name,
                    ty = %plan.storage_type,
                    projected = plan.projection.is_some(),
                    "planned expansion"
                );
                Some(plan)
            }
            Err(error) => {
                debug!(id = error.id(), span = %error.span(), "expansion rejected");
                sink.emit(error.to_diagnostic());
                None
            }
        }
    }

    /// Runs both requests independently.
    pub fn expand(
        &self,
        attribute: &Attribute,
        decl: &Decl,
        sink: &mut dyn DiagnosticSink,
    ) -> Expansion {
        Expansion {
            accessors: self.expand_accessors(attribute, decl, sink),
            peers: self.expand_peers(attribute, decl, sink),
        }
    }
}

impl AccessorExpansion for TrackedProperty {
    fn expand_accessors(
        &self,
        attribute: &Attribute,
        decl: &Decl,
        sink: &mut dyn DiagnosticSink,
    ) -> Vec<Accessor> {
        self.plan_or_report("accessors", attribute, decl, sink)
            .map(|plan| plan.accessors)
            .unwrap_or_default()
    }
}

impl PeerExpansion for TrackedProperty {
    fn expand_peers(
        &self,
        attribute: &Attribute,
        decl: &Decl,
        sink: &mut dyn DiagnosticSink,
    ) -> Vec<Decl> {
        self.plan_or_report("peers", attribute, decl, sink)
            .map(|plan| plan.into_parts().1)
            .unwrap_or_default()
    }
}

/// Expands with the default [`Config`].
pub fn expand(attribute: &Attribute, decl: &Decl, sink: &mut dyn DiagnosticSink) -> Expansion {
    TrackedProperty::default().expand(attribute, decl, sink)
}

/// Best-effort name for log fields, before the declaration is validated.
fn property_label(decl: &Decl) -> String {
    match decl {
        Decl::Variable(variable) => variable
            .bindings
            .iter()
            .map(|binding| binding.pattern.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        Decl::Other(other) => other
            .name
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| other.keyword.to_string()),
    }
}
