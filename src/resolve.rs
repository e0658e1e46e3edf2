//! Canonical value resolution for the alternate field pairs.
//!
//! Every function here is pure: it reads the configuration and either returns the
//! canonical value of one logical field or the violation that prevents it. Nothing
//! is cached, so resolving twice without writes in between yields the same answer,
//! and overwriting a slot before resolving carries no penalty.

use crate::request::pairs::{FUNCTIONS, RESPONSE_FORMAT, STOP};
use crate::request::RequestConfiguration;
use crate::types::{FunctionSpec, ResponseFormat, ResponseFormatKind};
use crate::validation::Violation;
use tracing::debug;

/// Canonical values of every pair, resolved together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedPairs {
    pub functions: Option<FunctionSpec>,
    pub stop: Option<Vec<String>>,
    pub response_format: Option<ResponseFormat>,
}

/// Resolve the `functions` field.
///
/// Absent when neither the typed list nor the raw value is set.
pub fn functions(config: &RequestConfiguration) -> Result<Option<FunctionSpec>, Violation> {
    let live = FUNCTIONS.ensure_exclusive(config)?;
    debug!(field = "functions", slot = ?live, "resolved alternate pair");
    Ok(match live {
        Some("function_list") => Some(FunctionSpec::List(config.function_list().to_vec())),
        Some(_) => config.functions_raw().cloned().map(FunctionSpec::Raw),
        None => None,
    })
}

/// Resolve the `stop` field.
///
/// A single stop sequence becomes a one-element list; a list is used verbatim
/// without clipping.
pub fn stop(config: &RequestConfiguration) -> Result<Option<Vec<String>>, Violation> {
    let live = STOP.ensure_exclusive(config)?;
    debug!(field = "stop", slot = ?live, "resolved alternate pair");
    Ok(match live {
        Some("stop_list") => Some(config.stop_list().to_vec()),
        Some(_) => config.stop_single().map(|s| vec![s.to_string()]),
        None => None,
    })
}

/// Resolve the `response_format` field.
///
/// The structured form passes through unchanged; the shorthand is parsed and
/// translated.
pub fn response_format(
    config: &RequestConfiguration,
) -> Result<Option<ResponseFormat>, Violation> {
    let live = RESPONSE_FORMAT.ensure_exclusive(config)?;
    debug!(field = "response_format", slot = ?live, "resolved alternate pair");
    match live {
        Some("response_format") => Ok(config.response_format().copied()),
        Some(_) => match config.response_format_shorthand() {
            Some(raw) => {
                let kind: ResponseFormatKind = raw.parse()?;
                Ok(Some(ResponseFormat::from(kind)))
            }
            None => Ok(None),
        },
        None => Ok(None),
    }
}

/// Resolve all pairs, stopping at the first failing one.
pub fn all(config: &RequestConfiguration) -> Result<ResolvedPairs, Violation> {
    Ok(ResolvedPairs {
        functions: functions(config)?,
        stop: stop(config)?,
        response_format: response_format(config)?,
    })
}

impl RequestConfiguration {
    /// See [`functions`].
    pub fn resolve_functions(&self) -> Result<Option<FunctionSpec>, Violation> {
        functions(self)
    }

    /// See [`stop`].
    pub fn resolve_stop(&self) -> Result<Option<Vec<String>>, Violation> {
        stop(self)
    }

    /// See [`response_format`].
    pub fn resolve_response_format(&self) -> Result<Option<ResponseFormat>, Violation> {
        response_format(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FunctionDefinition;
    use serde_json::json;

    #[test]
    fn test_unset_pairs_resolve_to_none() {
        let config = RequestConfiguration::new();
        assert_eq!(all(&config).unwrap(), ResolvedPairs::default());
    }

    #[test]
    fn test_stop_single_is_wrapped() {
        let mut config = RequestConfiguration::new();
        config.set_stop_single("X");
        assert_eq!(stop(&config).unwrap(), Some(vec!["X".to_string()]));
    }

    #[test]
    fn test_stop_list_is_not_clipped() {
        let mut config = RequestConfiguration::new();
        config.set_stop_list(["1", "2", "3", "4", "5"]);
        assert_eq!(stop(&config).unwrap().unwrap().len(), 5);
    }

    #[test]
    fn test_functions_raw_passes_through() {
        let raw = json!([{"name": "lookup", "parameters": {"type": "object"}}]);
        let mut config = RequestConfiguration::new();
        config.set_functions_raw(raw.clone());
        assert_eq!(functions(&config).unwrap(), Some(FunctionSpec::Raw(raw)));
    }

    #[test]
    fn test_functions_conflict_in_either_order() {
        let mut first = RequestConfiguration::new();
        first
            .push_function(FunctionDefinition::new("a"))
            .set_functions_raw(json!([{"name": "b"}]));

        let mut second = RequestConfiguration::new();
        second
            .set_functions_raw(json!([{"name": "b"}]))
            .push_function(FunctionDefinition::new("a"));

        for config in [first, second] {
            let err = functions(&config).unwrap_err();
            assert!(matches!(
                err,
                Violation::MutualExclusionConflict { ref field, .. } if field == "functions"
            ));
        }
    }

    #[test]
    fn test_shorthand_translation_and_conflict() {
        let mut config = RequestConfiguration::new();
        config.set_response_format_kind(ResponseFormatKind::Json);
        assert_eq!(
            response_format(&config).unwrap(),
            Some(ResponseFormat::json_object())
        );

        config.set_response_format(ResponseFormat::text());
        let err = response_format(&config).unwrap_err();
        assert_eq!(err.field(), "response_format");
    }

    #[test]
    fn test_unknown_shorthand() {
        let mut config = RequestConfiguration::new();
        config.set_response_format_shorthand("yaml");
        assert_eq!(
            response_format(&config).unwrap_err(),
            Violation::invalid_enum("response_format", "yaml")
        );
    }

    #[test]
    fn test_overwrite_before_resolve() {
        let mut config = RequestConfiguration::new();
        config.set_stop_single("a").set_stop_list(["b"]);
        assert!(stop(&config).is_err());
        config.clear_stop_single();
        assert_eq!(stop(&config).unwrap(), Some(vec!["b".to_string()]));
    }
}
