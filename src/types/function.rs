//! Function calling definitions.

use serde::{Deserialize, Serialize};

/// A callable function advertised to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema of the arguments object.
    #[serde(default = "empty_object_schema")]
    pub parameters: serde_json::Value,
}

fn empty_object_schema() -> serde_json::Value {
    serde_json::json!({"type": "object", "properties": {}})
}

impl FunctionDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters: empty_object_schema(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn parameters(mut self, parameters: serde_json::Value) -> Self {
        self.parameters = parameters;
        self
    }

    /// Build a definition whose parameters schema is derived from `T`.
    pub fn for_type<T: schemars::JsonSchema>(name: impl Into<String>) -> Self {
        let schema = schemars::schema_for!(T);
        let mut parameters =
            serde_json::to_value(&schema).unwrap_or_else(|_| empty_object_schema());
        if let Some(obj) = parameters.as_object_mut() {
            obj.remove("$schema");
            obj.remove("title");
        }
        Self {
            name: name.into(),
            description: None,
            parameters,
        }
    }
}

/// Which function, if any, the model is asked to call.
///
/// Encoded as `"none"`, `"auto"` or `{"name": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FunctionCallRepr", into = "FunctionCallRepr")]
pub enum FunctionCall {
    None,
    Auto,
    Named(String),
}

impl FunctionCall {
    pub fn named(name: impl Into<String>) -> Self {
        FunctionCall::Named(name.into())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum FunctionCallRepr {
    Mode(String),
    Named { name: String },
}

impl TryFrom<FunctionCallRepr> for FunctionCall {
    type Error = String;

    fn try_from(repr: FunctionCallRepr) -> Result<Self, Self::Error> {
        match repr {
            FunctionCallRepr::Mode(mode) => match mode.as_str() {
                "none" => Ok(FunctionCall::None),
                "auto" => Ok(FunctionCall::Auto),
                other => Err(format!(
                    "unknown function_call mode '{}', expected \"none\", \"auto\" or {{\"name\": ...}}",
                    other
                )),
            },
            FunctionCallRepr::Named { name } => Ok(FunctionCall::Named(name)),
        }
    }
}

impl From<FunctionCall> for FunctionCallRepr {
    fn from(call: FunctionCall) -> Self {
        match call {
            FunctionCall::None => FunctionCallRepr::Mode("none".to_string()),
            FunctionCall::Auto => FunctionCallRepr::Mode("auto".to_string()),
            FunctionCall::Named(name) => FunctionCallRepr::Named { name },
        }
    }
}

/// Canonical value of the `functions` field after resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FunctionSpec {
    /// Built from typed definitions.
    List(Vec<FunctionDefinition>),
    /// Pre-built value forwarded untouched.
    Raw(serde_json::Value),
}
