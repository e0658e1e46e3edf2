//! Response format options, in structured and shorthand form.

use crate::validation::Violation;
use serde::{Deserialize, Serialize};

/// Structured `response_format` value as sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: ResponseFormatType,
}

impl ResponseFormat {
    pub fn text() -> Self {
        Self {
            format_type: ResponseFormatType::Text,
        }
    }

    pub fn json_object() -> Self {
        Self {
            format_type: ResponseFormatType::JsonObject,
        }
    }
}

/// Output encoding requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseFormatType {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "json_object", alias = "json")]
    JsonObject,
}

impl ResponseFormatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormatType::Text => "text",
            ResponseFormatType::JsonObject => "json_object",
        }
    }
}

/// Shorthand for the response format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseFormatKind {
    Text,
    Json,
}

impl ResponseFormatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormatKind::Text => "text",
            ResponseFormatKind::Json => "json",
        }
    }
}

impl std::fmt::Display for ResponseFormatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResponseFormatKind {
    type Err = Violation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ResponseFormatKind::Text),
            "json" => Ok(ResponseFormatKind::Json),
            _ => Err(Violation::invalid_enum("response_format", s)),
        }
    }
}

impl From<ResponseFormatKind> for ResponseFormat {
    fn from(kind: ResponseFormatKind) -> Self {
        match kind {
            ResponseFormatKind::Text => ResponseFormat::text(),
            ResponseFormatKind::Json => ResponseFormat::json_object(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shorthand_parsing() {
        assert_eq!("Json".parse::<ResponseFormatKind>().unwrap(), ResponseFormatKind::Json);
        assert_eq!(" text ".parse::<ResponseFormatKind>().unwrap(), ResponseFormatKind::Text);

        let err = "xml".parse::<ResponseFormatKind>().unwrap_err();
        assert_eq!(err, Violation::invalid_enum("response_format", "xml"));
    }

    #[test]
    fn test_shorthand_translation() {
        assert_eq!(
            ResponseFormat::from(ResponseFormatKind::Json),
            ResponseFormat::json_object()
        );
        assert_eq!(ResponseFormat::from(ResponseFormatKind::Text), ResponseFormat::text());
    }

    #[test]
    fn test_structured_wire_shape() {
        assert_eq!(
            serde_json::to_value(ResponseFormat::json_object()).unwrap(),
            json!({"type": "json_object"})
        );
        let parsed: ResponseFormat = serde_json::from_value(json!({"type": "json"})).unwrap();
        assert_eq!(parsed, ResponseFormat::json_object());
    }
}
