//! # chat-request
//!
//! Canonical parameters for a single chat-completion request.
//!
//! ## Overview
//!
//! A [`RequestConfiguration`] offers several ways to express some logical fields:
//! stop sequences as one string or a list, functions as typed definitions or a
//! pre-built value, and the response format as a structured object or a shorthand.
//! This crate decides which shape is live, folds it into one canonical value, and
//! rejects configurations that populate more than one alternate at once.
//!
//! Writes are never validated. Resolution is explicit and pure:
//!
//! - [`resolve`] computes the canonical value of one alternate pair on demand.
//! - [`validation::Validator`] checks the whole configuration (pairs, numeric
//!   ranges, required fields) and reports every violation.
//! - [`RequestConfiguration::to_wire`] validates first, then produces the
//!   [`ChatCompletionRequest`] body with wire field names.
//!
//! Sending the body is left to the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use chat_request::{Message, RequestConfiguration};
//!
//! let mut config = RequestConfiguration::with_model("gpt-x", vec![Message::user("hi")]);
//! config.set_stop_list(["\n"]).set_temperature(0.7);
//!
//! let body = config.to_json().unwrap();
//! assert_eq!(body["stop"], serde_json::json!(["\n"]));
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`request`] | Slot holder, alternate pair descriptors, file loading |
//! | [`resolve`] | Canonical value resolution per pair |
//! | [`validation`] | Whole-configuration validation engine |
//! | [`wire`] | Canonical wire form |
//! | [`types`] | Messages, functions, response formats |

pub mod request;
pub mod resolve;
pub mod types;
pub mod validation;
pub mod wire;

pub use request::{AlternateFieldPair, RequestConfiguration, ResolutionRule};
pub use types::{
    FunctionCall, FunctionDefinition, FunctionSpec, Message, MessageRole, ResponseFormat,
    ResponseFormatKind, ResponseFormatType,
};
pub use validation::{
    AllowedRange, FailureMode, ValidationPolicy, ValidationReport, Validator, Violation,
};
pub use wire::{ChatCompletionRequest, WIRE_FIELDS};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
