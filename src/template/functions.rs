//! Text transformations available to user data templates

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

/// Encode text as padded standard base64 on a single line
pub fn base64_encode(input: &str) -> String {
    BASE64.encode(input.as_bytes())
}

/// Prefix every line of `input`, including the first, with `width` spaces
///
/// The result can be placed verbatim under a YAML block scalar at the
/// matching depth. An empty input yields a single line of spaces and a
/// trailing newline yields a trailing indented empty line.
pub fn indent(width: usize, input: &str) -> String {
    let pad = " ".repeat(width);
    let separator = format!("\n{pad}");
    format!("{pad}{}", input.replace('\n', &separator))
}
