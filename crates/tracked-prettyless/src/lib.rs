//! Pretty printing for declarations and accessors.
//!
//! Built on top of the `prettyless` library. It offers:
//!
//! - [`Config`] - Configuration options for formatting output
//! - [`Document`] - A document builder for constructing pretty-printed output
//! - [`PrettyPrint`] - Core trait for defining how types render to documents
//! - [`PrettyPrintExt`] - Extension trait with convenience methods
//!
//! # Example
//!
//! ```ignore
//! use tracked_prettyless::{Config, PrettyPrintExt};
//!
//! let output = accessors.sprint();
//! let output = decl.sprint_with_config(Config::default().with_tab_spaces(2));
//! ```

mod config;
mod document;
mod traits;

pub use config::Config;
pub use document::Document;
pub use traits::{PrettyPrint, PrettyPrintExt};

pub use prettyless::{Arena, DocAllocator};
pub type ArenaDoc<'a> = prettyless::DocBuilder<'a, Arena<'a>>;

/// Prelude module for common imports.
pub mod prelude {
    pub use crate::{ArenaDoc, Config, DocAllocator, Document, PrettyPrint, PrettyPrintExt};
    pub use prettyless;
}
