//! Mutable holder of every request parameter slot.
//!
//! Writes are never validated: a configuration can be assembled in any order and
//! a slot can be overwritten freely. Alternate slots of the same logical field are
//! stored independently, so setting both is only detected when the field is
//! resolved (see [`crate::resolve`]) or validated (see [`crate::validation`]).

mod loader;
pub mod pairs;

use crate::types::{
    FunctionCall, FunctionDefinition, Message, ResponseFormat, ResponseFormatKind,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use pairs::{AlternateFieldPair, ResolutionRule, ALL_PAIRS};

/// All parameters of a single outbound chat-completion request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RequestConfiguration {
    model: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    messages: Vec<Message>,

    // functions: typed list or pre-built value
    #[serde(skip_serializing_if = "Vec::is_empty")]
    function_list: Vec<FunctionDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    functions_raw: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_call: Option<FunctionCall>,

    // stop: one sequence or several
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_single: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop_list: Vec<String>,

    // response_format: structured or shorthand
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format_shorthand: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    logit_bias: Option<BTreeMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<String>,
}

impl RequestConfiguration {
    /// An empty configuration. Nothing is set, not even the required fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortcut for the two required fields.
    pub fn with_model(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            ..Self::default()
        }
    }

    // ---- required ----

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn set_model(&mut self, model: impl Into<String>) -> &mut Self {
        self.model = model.into();
        self
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn set_messages(&mut self, messages: Vec<Message>) -> &mut Self {
        self.messages = messages;
        self
    }

    pub fn push_message(&mut self, message: Message) -> &mut Self {
        self.messages.push(message);
        self
    }

    // ---- functions pair ----

    pub fn function_list(&self) -> &[FunctionDefinition] {
        &self.function_list
    }

    pub fn set_function_list(&mut self, functions: Vec<FunctionDefinition>) -> &mut Self {
        self.function_list = functions;
        self
    }

    pub fn push_function(&mut self, function: FunctionDefinition) -> &mut Self {
        self.function_list.push(function);
        self
    }

    pub fn clear_function_list(&mut self) -> &mut Self {
        self.function_list.clear();
        self
    }

    pub fn functions_raw(&self) -> Option<&serde_json::Value> {
        self.functions_raw.as_ref()
    }

    pub fn set_functions_raw(&mut self, functions: serde_json::Value) -> &mut Self {
        self.functions_raw = Some(functions);
        self
    }

    pub fn clear_functions_raw(&mut self) -> &mut Self {
        self.functions_raw = None;
        self
    }

    pub fn function_call(&self) -> Option<&FunctionCall> {
        self.function_call.as_ref()
    }

    pub fn set_function_call(&mut self, call: FunctionCall) -> &mut Self {
        self.function_call = Some(call);
        self
    }

    // ---- stop pair ----

    pub fn stop_single(&self) -> Option<&str> {
        self.stop_single.as_deref()
    }

    pub fn set_stop_single(&mut self, stop: impl Into<String>) -> &mut Self {
        self.stop_single = Some(stop.into());
        self
    }

    pub fn clear_stop_single(&mut self) -> &mut Self {
        self.stop_single = None;
        self
    }

    pub fn stop_list(&self) -> &[String] {
        &self.stop_list
    }

    pub fn set_stop_list<I, S>(&mut self, stops: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_list = stops.into_iter().map(Into::into).collect();
        self
    }

    pub fn clear_stop_list(&mut self) -> &mut Self {
        self.stop_list.clear();
        self
    }

    // ---- response format pair ----

    pub fn response_format(&self) -> Option<&ResponseFormat> {
        self.response_format.as_ref()
    }

    pub fn set_response_format(&mut self, format: ResponseFormat) -> &mut Self {
        self.response_format = Some(format);
        self
    }

    pub fn clear_response_format(&mut self) -> &mut Self {
        self.response_format = None;
        self
    }

    /// Raw shorthand text, as written. Parsed only at resolution time.
    pub fn response_format_shorthand(&self) -> Option<&str> {
        self.response_format_shorthand.as_deref()
    }

    pub fn set_response_format_kind(&mut self, kind: ResponseFormatKind) -> &mut Self {
        self.response_format_shorthand = Some(kind.as_str().to_string());
        self
    }

    /// Store a shorthand given as text (e.g. from a config file).
    pub fn set_response_format_shorthand(&mut self, shorthand: impl Into<String>) -> &mut Self {
        self.response_format_shorthand = Some(shorthand.into());
        self
    }

    pub fn clear_response_format_shorthand(&mut self) -> &mut Self {
        self.response_format_shorthand = None;
        self
    }

    // ---- sampling ----

    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    pub fn set_temperature(&mut self, temperature: f64) -> &mut Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn top_p(&self) -> Option<f64> {
        self.top_p
    }

    pub fn set_top_p(&mut self, top_p: f64) -> &mut Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn n(&self) -> Option<u32> {
        self.n
    }

    pub fn set_n(&mut self, n: u32) -> &mut Self {
        self.n = Some(n);
        self
    }

    pub fn stream(&self) -> Option<bool> {
        self.stream
    }

    pub fn set_stream(&mut self, stream: bool) -> &mut Self {
        self.stream = Some(stream);
        self
    }

    pub fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }

    pub fn set_max_tokens(&mut self, max_tokens: u32) -> &mut Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn presence_penalty(&self) -> Option<f64> {
        self.presence_penalty
    }

    pub fn set_presence_penalty(&mut self, penalty: f64) -> &mut Self {
        self.presence_penalty = Some(penalty);
        self
    }

    pub fn frequency_penalty(&self) -> Option<f64> {
        self.frequency_penalty
    }

    pub fn set_frequency_penalty(&mut self, penalty: f64) -> &mut Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    pub fn logit_bias(&self) -> Option<&BTreeMap<String, f64>> {
        self.logit_bias.as_ref()
    }

    pub fn set_logit_bias(&mut self, bias: BTreeMap<String, f64>) -> &mut Self {
        self.logit_bias = Some(bias);
        self
    }

    /// Add or replace the bias of a single token.
    pub fn insert_logit_bias(&mut self, token_id: impl Into<String>, bias: f64) -> &mut Self {
        self.logit_bias
            .get_or_insert_with(BTreeMap::new)
            .insert(token_id.into(), bias);
        self
    }

    pub fn seed(&self) -> Option<i64> {
        self.seed
    }

    pub fn set_seed(&mut self, seed: i64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn set_user(&mut self, user: impl Into<String>) -> &mut Self {
        self.user = Some(user.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_writes_do_not_clear_alternates() {
        let mut config = RequestConfiguration::new();
        config.set_stop_list(["a", "b"]).set_stop_single("c");
        assert_eq!(config.stop_single(), Some("c"));
        assert_eq!(config.stop_list(), ["a".to_string(), "b".to_string()]);

        config.set_response_format_kind(ResponseFormatKind::Json);
        config.set_response_format(ResponseFormat::text());
        assert_eq!(config.response_format_shorthand(), Some("json"));
        assert!(config.response_format().is_some());
    }

    #[test]
    fn test_last_write_wins() {
        let mut config = RequestConfiguration::new();
        config.set_temperature(0.1).set_temperature(0.9);
        assert_eq!(config.temperature(), Some(0.9));

        config.insert_logit_bias("50256", -100.0);
        config.insert_logit_bias("50256", 5.0);
        assert_eq!(config.logit_bias().unwrap()["50256"], 5.0);
    }

    #[test]
    fn test_clear_slots() {
        let mut config = RequestConfiguration::new();
        config
            .set_functions_raw(json!([{"name": "f"}]))
            .clear_functions_raw()
            .set_stop_single("x")
            .clear_stop_single();
        assert!(config.functions_raw().is_none());
        assert!(config.stop_single().is_none());
    }

    #[test]
    fn test_slot_serialization_skips_unset() {
        let config = RequestConfiguration::with_model("gpt-x", vec![Message::user("hi")]);
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({"model": "gpt-x", "messages": [{"role": "user", "content": "hi"}]})
        );
    }
}
