use serde::Deserialize;

/// Decoder settings.
///
/// Missing fields take their default when deserialized, so an empty JSON
/// object yields [`RlpConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RlpConfig {
    /// Reject non-minimal length prefixes and wrapped single bytes.
    pub strict: bool,
    /// Maximum list nesting accepted while decoding.
    pub max_depth: usize,
}

impl Default for RlpConfig {
    fn default() -> Self {
        Self {
            strict: true,
            max_depth: 64,
        }
    }
}

impl RlpConfig {
    /// Accepts non-canonical length prefixes.
    pub fn lenient() -> Self {
        Self {
            strict: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_strict() {
        let config = RlpConfig::default();
        assert!(config.strict);
        assert_eq!(config.max_depth, 64);
    }

    #[test]
    fn lenient_keeps_depth_limit() {
        let config = RlpConfig::lenient();
        assert!(!config.strict);
        assert_eq!(config.max_depth, RlpConfig::default().max_depth);
    }

    #[test]
    fn deserialize_partial_json() {
        let config: RlpConfig = serde_json::from_str(r#"{"strict": false}"#).unwrap();
        assert!(!config.strict);
        assert_eq!(config.max_depth, 64);
    }

    #[test]
    fn deserialize_empty_object_gives_default() {
        let config: RlpConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RlpConfig::default());
    }
}
