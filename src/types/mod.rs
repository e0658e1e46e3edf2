//! Value records owned by a request configuration.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Message`] | Chat message with role and text content |
//! | [`FunctionDefinition`] | Function advertised to the model |
//! | [`FunctionCall`] | Function selection (`none`, `auto`, or by name) |
//! | [`FunctionSpec`] | Resolved `functions` value |
//! | [`ResponseFormat`] | Structured `response_format` value |
//! | [`ResponseFormatKind`] | Shorthand for the response format |

pub mod function;
pub mod message;
pub mod response_format;

pub use function::{FunctionCall, FunctionDefinition, FunctionSpec};
pub use message::{Message, MessageRole};
pub use response_format::{ResponseFormat, ResponseFormatKind, ResponseFormatType};
