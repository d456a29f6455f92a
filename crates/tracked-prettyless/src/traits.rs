//! Core traits for pretty printing.

use std::io::{self, Write, stdout};

use prettyless::DocAllocator;

use tracked_syntax::{Accessor, AccessorBlock, Decl, Stmt, VariableDecl};

use crate::{ArenaDoc, Config, Document};

/// Core trait for pretty printing values to a document.
///
/// # Example
///
/// ```ignore
/// impl PrettyPrint for Member {
///     fn pretty_print<'a>(&self, doc: &'a Document<'a>) -> ArenaDoc<'a> {
///         doc.text(format!("member {}", self.name))
///     }
/// }
/// ```
pub trait PrettyPrint {
    fn pretty_print<'a>(&self, doc: &'a Document<'a>) -> ArenaDoc<'a>;
}

/// Extension trait providing convenience methods for pretty printing.
///
/// ```ignore
/// use tracked_prettyless::{Config, PrettyPrintExt};
///
/// let output = decl.sprint();
/// let narrow = decl.sprint_with_config(Config::default().with_tab_spaces(2));
/// ```
pub trait PrettyPrintExt: PrettyPrint {
    /// Render to string with custom config.
    fn sprint_with_config(&self, config: Config) -> String;

    /// Render to string with default config.
    fn sprint(&self) -> String {
        self.sprint_with_config(Config::default())
    }

    /// Write to writer with custom config.
    fn write_with_config(&self, writer: &mut impl Write, config: Config) -> io::Result<()> {
        writer.write_all(self.sprint_with_config(config).as_bytes())
    }

    /// Write to writer with default config.
    fn write(&self, writer: &mut impl Write) -> io::Result<()> {
        self.write_with_config(writer, Config::default())
    }

    /// Print to stdout with default config.
    fn print(&self) -> io::Result<()> {
        self.write(&mut stdout())
    }
}

impl<T: PrettyPrint> PrettyPrintExt for T {
    fn sprint_with_config(&self, config: Config) -> String {
        let doc = Document::new(config);
        // Rendering into a `String` only fails if a formatter impl does.
        doc.render(self).unwrap_or_default()
    }
}

impl<T: PrettyPrint> PrettyPrint for &T {
    fn pretty_print<'a>(&self, doc: &'a Document<'a>) -> ArenaDoc<'a> {
        (*self).pretty_print(doc)
    }
}

/// Items are separated by a line break.
impl<T: PrettyPrint> PrettyPrint for [T] {
    fn pretty_print<'a>(&self, doc: &'a Document<'a>) -> ArenaDoc<'a> {
        let mut out = doc.nil();
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                out += doc.line_();
            }
            out += item.pretty_print(doc);
        }
        out
    }
}

impl<T: PrettyPrint> PrettyPrint for Vec<T> {
    fn pretty_print<'a>(&self, doc: &'a Document<'a>) -> ArenaDoc<'a> {
        self.as_slice().pretty_print(doc)
    }
}

impl PrettyPrint for Decl {
    fn pretty_print<'a>(&self, doc: &'a Document<'a>) -> ArenaDoc<'a> {
        doc.print_decl(self)
    }
}

impl PrettyPrint for VariableDecl {
    fn pretty_print<'a>(&self, doc: &'a Document<'a>) -> ArenaDoc<'a> {
        doc.print_variable(self)
    }
}

impl PrettyPrint for Accessor {
    fn pretty_print<'a>(&self, doc: &'a Document<'a>) -> ArenaDoc<'a> {
        doc.print_accessor(self)
    }
}

impl PrettyPrint for AccessorBlock {
    fn pretty_print<'a>(&self, doc: &'a Document<'a>) -> ArenaDoc<'a> {
        doc.print_accessor_block(self)
    }
}

impl PrettyPrint for Stmt {
    fn pretty_print<'a>(&self, doc: &'a Document<'a>) -> ArenaDoc<'a> {
        doc.print_stmt(self)
    }
}
