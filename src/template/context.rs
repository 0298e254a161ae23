//! Template context building
//!
//! Combines a document header with a generator input so both are visible
//! as top-level template fields.

use serde::Serialize;

/// Render context for a document that starts with a format marker
#[derive(Serialize)]
pub struct DocumentContext<'a, T: Serialize> {
    /// Marker line emitted by `{{ header }}`
    pub header: &'a str,
    #[serde(flatten)]
    pub input: &'a T,
}

impl<'a, T: Serialize> DocumentContext<'a, T> {
    pub fn new(header: &'a str, input: &'a T) -> Self {
        Self { header, input }
    }
}
