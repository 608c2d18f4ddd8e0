use serde::Deserialize;

/// Decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AbiConfig {
    /// Maximum array nesting accepted while decoding.
    pub max_depth: usize,
    /// Require `bytes`/`string` payloads to be zero-padded to a word boundary.
    pub validate_padding: bool,
}

impl Default for AbiConfig {
    fn default() -> Self {
        Self {
            max_depth: 32,
            validate_padding: true,
        }
    }
}
