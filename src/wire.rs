//! Projection of a validated configuration onto the wire field names.

use crate::request::RequestConfiguration;
use crate::resolve;
use crate::types::{FunctionCall, FunctionSpec, Message, ResponseFormat};
use crate::validation::Validator;
use crate::Result;
use serde::Serialize;
use std::collections::BTreeMap;

/// Logical field name and the wire name it is sent under, in payload order.
pub const WIRE_FIELDS: &[(&str, &str)] = &[
    ("model", "model"),
    ("messages", "messages"),
    ("functions", "functions"),
    ("functionCall", "function_call"),
    ("temperature", "temperature"),
    ("topP", "top_p"),
    ("n", "n"),
    ("stream", "stream"),
    ("stop", "stop"),
    ("maxTokens", "max_tokens"),
    ("presencePenalty", "presence_penalty"),
    ("frequencyPenalty", "frequency_penalty"),
    ("logitBias", "logit_bias"),
    ("responseFormat", "response_format"),
    ("seed", "seed"),
    ("user", "user"),
];

/// Canonical request body. Every alternate has been resolved; unset fields are
/// omitted when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<FunctionSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logit_bias: Option<BTreeMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl ChatCompletionRequest {
    /// Validate `config` with `validator`, then build the canonical body.
    pub fn from_config(config: &RequestConfiguration, validator: &Validator) -> Result<Self> {
        validator.check(config)?;
        let pairs = resolve::all(config)?;
        Ok(Self {
            model: config.model().to_string(),
            messages: config.messages().to_vec(),
            functions: pairs.functions,
            function_call: config.function_call().cloned(),
            temperature: config.temperature(),
            top_p: config.top_p(),
            n: config.n(),
            stream: config.stream(),
            stop: pairs.stop,
            max_tokens: config.max_tokens(),
            presence_penalty: config.presence_penalty(),
            frequency_penalty: config.frequency_penalty(),
            logit_bias: config.logit_bias().cloned(),
            response_format: pairs.response_format,
            seed: config.seed(),
            user: config.user().map(str::to_string),
        })
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl RequestConfiguration {
    /// Validate the whole configuration, then resolve it into the wire form.
    ///
    /// No wire object is produced for a configuration with any violation.
    pub fn to_wire(&self) -> Result<ChatCompletionRequest> {
        ChatCompletionRequest::from_config(self, &Validator::new())
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        self.to_wire()?.to_json()
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_wire()?)?)
    }
}
