use tracked_syntax::{Attribute, Decl};

#[cfg(feature = "expand")]
mod expansion;

#[cfg(feature = "expand")]
pub use expansion::{ExpandedText, expand_source, expand_source_with};

/// Parse one declaration, panicking with the parser's errors on failure.
#[cfg(feature = "parser")]
pub fn parse_decl_or_panic(src: &str) -> Decl {
    match tracked_chumsky::parse_decl(src) {
        Ok(decl) => decl,
        Err(errors) => {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            panic!("failed to parse {src:?}:\n{}", messages.join("\n"))
        }
    }
}

/// The first attribute on `decl` whose last path component is `name`.
pub fn find_attribute(decl: &Decl, name: &str) -> Attribute {
    decl.attributes()
        .iter()
        .find(|attribute| attribute.is_named(name))
        .cloned()
        .unwrap_or_else(|| panic!("no @{name} attribute on the declaration"))
}
