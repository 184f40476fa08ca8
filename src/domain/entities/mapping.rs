//! Mapping entity: a short key paired with the URL it stands for.

/// A short key and the original URL it resolves to.
///
/// Mappings are written once and never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub short_key: String,
    pub original_url: String,
}

impl Mapping {
    /// Creates a new Mapping instance.
    pub fn new(short_key: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            short_key: short_key.into(),
            original_url: original_url.into(),
        }
    }
}
