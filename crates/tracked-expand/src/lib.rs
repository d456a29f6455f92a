//! Expansion of `@Tracked` variables into observed, wrapper-backed storage.
//!
//! A declaration such as
//!
//! ```text
//! @Tracked(Clamped<Int>.self, config: 0...100) @ObservationIgnored
//! var percent: Int = 150
//! ```
//!
//! expands into four accessors (`init`, `get`, `set`, `_modify`) that route
//! through the observation registrar, a private `_percent` storage peer built
//! by `Clamped<Int>.makeWrapper(from:config:)`, and, with `projected: true`,
//! a `$percent` peer forwarding to the wrapper's projected value.
//!
//! The pipeline is [`inspect`] → [`validate`] → [`resolve`] → [`synthesize`],
//! driven by [`TrackedProperty`]. Failures are reported to a
//! [`DiagnosticSink`] and produce empty output.

mod config;
mod diagnostic;
mod error;
mod expand;
pub mod inspect;
pub mod resolve;
pub mod synthesize;
pub mod validate;

pub use config::Config;
pub use diagnostic::{Diagnostic, DiagnosticSink, Severity};
pub use error::ExpansionError;
pub use expand::{AccessorExpansion, Expansion, PeerExpansion, TrackedProperty, expand};
pub use inspect::{AttributeOrder, Facts, inspect};
pub use resolve::{ResolvedConfiguration, resolve};
pub use synthesize::{EmissionPlan, storage_type, synthesize};
pub use validate::validate;
