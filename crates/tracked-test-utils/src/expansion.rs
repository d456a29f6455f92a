use tracked_expand::{AccessorExpansion, Config, Diagnostic, PeerExpansion, TrackedProperty};
use tracked_prettyless::PrettyPrintExt;

use crate::{find_attribute, parse_decl_or_panic};

/// Both expansion requests rendered to source text.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedText {
    pub accessors: String,
    pub peers: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl ExpandedText {
    /// Rule identifiers of the reported diagnostics, in report order.
    pub fn diagnostic_ids(&self) -> Vec<&'static str> {
        self.diagnostics.iter().map(|diagnostic| diagnostic.id).collect()
    }
}

/// Parse `src`, expand its marker with the default config and render the
/// accessors and peers.
pub fn expand_source(src: &str) -> ExpandedText {
    expand_source_with(Config::default(), src)
}

pub fn expand_source_with(config: Config, src: &str) -> ExpandedText {
    let decl = parse_decl_or_panic(src);
    let attribute = find_attribute(&decl, &config.marker);
    let property = TrackedProperty::new(config);
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let accessors = property.expand_accessors(&attribute, &decl, &mut diagnostics);
    let peers = property.expand_peers(&attribute, &decl, &mut diagnostics);
    ExpandedText {
        accessors: render(&accessors),
        peers: render(&peers),
        diagnostics,
    }
}

/// Empty output renders as an empty string rather than a lone newline.
fn render<T: tracked_prettyless::PrettyPrint>(items: &Vec<T>) -> String {
    if items.is_empty() {
        String::new()
    } else {
        items.sprint()
    }
}
