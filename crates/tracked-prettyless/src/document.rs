//! Document builder for pretty printing.

use std::{borrow::Cow, ops::Deref};

use prettyless::{Arena, DocAllocator};
use tracked_syntax::{
    Accessor, AccessorBlock, Attribute, Decl, OtherDecl, PatternBinding, Stmt, VariableDecl,
    dedent,
};

use crate::{ArenaDoc, Config, PrettyPrint};

/// A document builder for pretty printing declarations.
///
/// Holds the configuration and the arena the document nodes are allocated
/// from. Every node is laid out with hard line breaks, so the output for a
/// given tree does not depend on the configured width.
pub struct Document<'a> {
    config: Config,
    arena: Arena<'a>,
}

impl<'a> Document<'a> {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            arena: Arena::new(),
        }
    }

    /// Indent a document by the configured tab spaces.
    pub fn indent(&'a self, doc: ArenaDoc<'a>) -> ArenaDoc<'a> {
        doc.nest(self.config.tab_spaces as isize)
    }

    /// Create an indented block with a leading line break.
    pub fn block_indent(&'a self, doc: ArenaDoc<'a>) -> ArenaDoc<'a> {
        self.indent(self.arena.line_() + doc)
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build a list of items with a separator.
    pub fn list<I, U: Clone + Into<Cow<'a, str>>>(
        &'a self,
        items: impl Iterator<Item = I>,
        sep: U,
        f: impl Fn(I) -> ArenaDoc<'a>,
    ) -> ArenaDoc<'a> {
        let mut doc = self.nil();
        let mut first = true;
        for item in items {
            if !first {
                doc += self.text(sep.clone());
            }
            doc += f(item);
            first = false;
        }
        doc
    }

    /// `name {`, the body one level deeper, then `}`. An empty body stays on
    /// one line as `name {}`.
    pub fn braced(
        &'a self,
        header: ArenaDoc<'a>,
        body: ArenaDoc<'a>,
        empty: bool,
    ) -> ArenaDoc<'a> {
        if empty {
            return header + self.text(" {}");
        }
        header + self.text(" {") + self.block_indent(body) + self.line_() + self.text("}")
    }

    /// Render a node to a string.
    pub fn render<N>(&'a self, node: &N) -> Result<String, std::fmt::Error>
    where
        N: PrettyPrint + ?Sized,
    {
        let max_width = self.config.max_width;
        let arena_doc = node.pretty_print(self);
        let mut buf = String::new();
        arena_doc.render_fmt(max_width, &mut buf)?;
        Ok(strip_trailing_whitespace(&buf))
    }
}

impl<'a> Document<'a> {
    pub fn print_attribute(&'a self, attribute: &Attribute) -> ArenaDoc<'a> {
        self.text(attribute.to_string())
    }

    /// Attributes and modifiers in front of a declaration, each followed by
    /// a space.
    fn print_prefix(&'a self, attributes: &[Attribute], modifiers: &[String]) -> ArenaDoc<'a> {
        let mut doc = self.nil();
        for attribute in attributes {
            doc += self.print_attribute(attribute) + self.text(" ");
        }
        for modifier in modifiers {
            doc += self.text(modifier.clone()) + self.text(" ");
        }
        doc
    }

    pub fn print_decl(&'a self, decl: &Decl) -> ArenaDoc<'a> {
        match decl {
            Decl::Variable(decl) => self.print_variable(decl),
            Decl::Other(decl) => self.print_other(decl),
        }
    }

    pub fn print_variable(&'a self, decl: &VariableDecl) -> ArenaDoc<'a> {
        let modifiers: Vec<String> = decl.modifiers.iter().map(ToString::to_string).collect();
        self.print_prefix(&decl.attributes, &modifiers)
            + self.text(decl.binding.keyword())
            + self.text(" ")
            + self.list(decl.bindings.iter(), ", ", |binding| {
                self.print_binding(binding)
            })
    }

    pub fn print_binding(&'a self, binding: &PatternBinding) -> ArenaDoc<'a> {
        let mut doc = self.text(binding.pattern.to_string());
        if let Some(ty) = &binding.type_annotation {
            doc += self.text(format!(": {}", ty));
        }
        if let Some(initializer) = &binding.initializer {
            doc += self.text(format!(" = {}", initializer));
        }
        if let Some(block) = &binding.accessor_block {
            doc += self.text(" ") + self.print_accessor_block(block);
        }
        doc
    }

    fn print_other(&'a self, decl: &OtherDecl) -> ArenaDoc<'a> {
        let modifiers: Vec<String> = decl.modifiers.iter().map(ToString::to_string).collect();
        let mut doc = self.print_prefix(&decl.attributes, &modifiers)
            + self.text(decl.keyword.to_string());
        if let Some(name) = &decl.name {
            doc += self.text(" ") + self.text(name.to_string());
        }
        doc
    }

    /// Pretty print a `{ ... }` accessor block, without a leading space.
    pub fn print_accessor_block(&'a self, block: &AccessorBlock) -> ArenaDoc<'a> {
        let (body, empty) = match block {
            AccessorBlock::Accessors { accessors, .. } => {
                (self.print_accessors(accessors), accessors.is_empty())
            }
            AccessorBlock::Getter { body, .. } => (self.print_stmts(body), body.is_empty()),
        };
        if empty {
            return self.text("{}");
        }
        self.text("{") + self.block_indent(body) + self.line_() + self.text("}")
    }

    /// Accessors one after the other, separated by line breaks.
    pub fn print_accessors(&'a self, accessors: &[Accessor]) -> ArenaDoc<'a> {
        let mut doc = self.nil();
        for (i, accessor) in accessors.iter().enumerate() {
            if i > 0 {
                doc += self.line_();
            }
            doc += self.print_accessor(accessor);
        }
        doc
    }

    /// Renders as:
    /// ```text
    /// @storageRestrictions(initializes: _value)
    /// init(initialValue) {
    ///     <body>
    /// }
    /// ```
    pub fn print_accessor(&'a self, accessor: &Accessor) -> ArenaDoc<'a> {
        let mut header = self.nil();
        for attribute in &accessor.attributes {
            header += self.print_attribute(attribute) + self.line_();
        }
        header += self.text(accessor.kind.keyword().to_string());
        if let Some(parameter) = &accessor.parameter {
            header += self.text(format!("({})", parameter));
        }
        self.braced(header, self.print_stmts(&accessor.body), accessor.body.is_empty())
    }

    pub fn print_stmts(&'a self, stmts: &[Stmt]) -> ArenaDoc<'a> {
        let mut doc = self.nil();
        for (i, stmt) in stmts.iter().enumerate() {
            if i > 0 {
                doc += self.line_();
            }
            doc += self.print_stmt(stmt);
        }
        doc
    }

    pub fn print_stmt(&'a self, stmt: &Stmt) -> ArenaDoc<'a> {
        match stmt {
            Stmt::Expr(expr) => self.text(expr.to_string()),
            Stmt::Return(expr) => self.text(format!("return {}", expr)),
            Stmt::Let { name, value } => self.text(format!("let {} = {}", name, value)),
            Stmt::Var { name, value } => self.text(format!("var {} = {}", name, value)),
            Stmt::Assign { target, value } => self.text(format!("{} = {}", target, value)),
            Stmt::Defer(body) => {
                self.braced(self.text("defer"), self.print_stmts(body), body.is_empty())
            }
            Stmt::Yield(expr) => self.text(format!("yield {}", expr)),
            // Source text keeps its relative indentation under the new nesting.
            Stmt::Verbatim(text) => {
                let mut doc = self.nil();
                for (i, line) in dedent(text).lines().enumerate() {
                    if i > 0 {
                        doc += self.line_();
                    }
                    doc += self.text(line.to_string());
                }
                doc
            }
        }
    }
}

impl<'a> Deref for Document<'a> {
    type Target = Arena<'a>;

    fn deref(&self) -> &Self::Target {
        &self.arena
    }
}

/// Strip trailing whitespace from each line in the string.
fn strip_trailing_whitespace(s: &str) -> String {
    if s.is_empty() {
        return "\n".to_string();
    }
    let mut res = String::with_capacity(s.len());
    for line in s.lines() {
        res.push_str(line.trim_end());
        res.push('\n');
    }
    res
}
