//! Accessor and peer generation for `@Tracked` variables.
//!
//! Re-exports the workspace crates under short names:
//!
//! - [`syntax`] - the host declaration tree
//! - [`expand`] - inspection, validation and code synthesis
//! - [`parsers`] - host source parsing (feature `parser`)
//! - [`pretty`] - rendering trees back to source (feature `pretty`)
//!
//! # Example
//!
//! ```ignore
//! use tracked::prelude::*;
//!
//! let decl = parse_decl("@Tracked(Box.self) @ObservationIgnored var title: String")?;
//! let mut diagnostics: Vec<Diagnostic> = Vec::new();
//! let expansion = expand(&decl.attributes()[0], &decl, &mut diagnostics);
//! println!("{}", expansion.accessors.sprint());
//! ```

pub use tracked_expand as expand;
pub use tracked_syntax as syntax;

#[cfg(feature = "parser")]
pub use tracked_chumsky as parsers;
#[cfg(feature = "pretty")]
pub use tracked_prettyless as pretty;

pub mod prelude {
    pub use tracked_expand::{
        AccessorExpansion, Config, Diagnostic, DiagnosticSink, EmissionPlan, Expansion,
        ExpansionError, PeerExpansion, Severity, TrackedProperty, expand,
    };
    pub use tracked_syntax::*;

    #[cfg(feature = "parser")]
    pub use tracked_chumsky::{ParseError, parse_decl, parse_decls};
    #[cfg(feature = "pretty")]
    pub use tracked_prettyless::{PrettyPrint, PrettyPrintExt};
}
