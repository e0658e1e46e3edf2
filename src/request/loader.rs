//! Loading configurations from YAML or JSON documents.
//!
//! Loading only populates slots. Conflicts and out-of-range values are reported
//! later by resolution or validation, exactly as for programmatic writes.

use super::RequestConfiguration;
use crate::{Error, ErrorContext, Result};
use std::path::Path;
use tracing::debug;

impl RequestConfiguration {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a configuration file, picking the format from its extension
    /// (`.yaml`, `.yml` or `.json`).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), format = %ext, "loading request configuration");
        match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&content),
            "json" => Self::from_json_str(&content),
            other => Err(Error::configuration_with_context(
                format!("Unsupported configuration format '{}'", other),
                ErrorContext::new()
                    .with_field_path(path.display().to_string())
                    .with_details("expected a .yaml, .yml or .json file")
                    .with_source("config_loader"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageRole;

    #[test]
    fn test_yaml_populates_slots() {
        let config = RequestConfiguration::from_yaml_str(
            r#"
model: gpt-x
messages:
  - role: user
    content: hi
stop_single: "END"
stop_list: ["a"]
response_format_shorthand: json
"#,
        )
        .unwrap();
        assert_eq!(config.model(), "gpt-x");
        assert_eq!(config.messages()[0].role, MessageRole::User);
        // both stop slots are kept; the conflict surfaces on resolution
        assert_eq!(config.stop_single(), Some("END"));
        assert!(config.resolve_stop().is_err());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = RequestConfiguration::from_json_str(r#"{"model": "m", "stop": ["x"]}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
