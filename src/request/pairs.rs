//! Descriptors for logical fields that accept more than one input shape.

use super::RequestConfiguration;
use crate::validation::Violation;

/// How the live slot of a pair becomes the canonical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionRule {
    /// The populated slot is used as is.
    PassThrough,
    /// A single value is wrapped into a one-element sequence.
    WrapSingle,
    /// A shorthand is translated into the structured form.
    TranslateShorthand,
}

/// One logical parameter with a canonical slot and its alternates.
///
/// At most one slot of a pair may be populated when the pair is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlternateFieldPair {
    pub logical_name: &'static str,
    pub wire_name: &'static str,
    pub canonical_slot: &'static str,
    pub alternate_slots: &'static [&'static str],
    pub rule: ResolutionRule,
}

pub const FUNCTIONS: AlternateFieldPair = AlternateFieldPair {
    logical_name: "functions",
    wire_name: "functions",
    canonical_slot: "function_list",
    alternate_slots: &["functions_raw"],
    rule: ResolutionRule::PassThrough,
};

pub const STOP: AlternateFieldPair = AlternateFieldPair {
    logical_name: "stop",
    wire_name: "stop",
    canonical_slot: "stop_list",
    alternate_slots: &["stop_single"],
    rule: ResolutionRule::WrapSingle,
};

pub const RESPONSE_FORMAT: AlternateFieldPair = AlternateFieldPair {
    logical_name: "response_format",
    wire_name: "response_format",
    canonical_slot: "response_format",
    alternate_slots: &["response_format_shorthand"],
    rule: ResolutionRule::TranslateShorthand,
};

pub const ALL_PAIRS: &[AlternateFieldPair] = &[FUNCTIONS, STOP, RESPONSE_FORMAT];

impl AlternateFieldPair {
    /// Every slot of the pair, canonical first.
    pub fn slots(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.canonical_slot).chain(self.alternate_slots.iter().copied())
    }

    /// Names of the slots currently holding a non-empty value.
    pub fn populated_slots(&self, config: &RequestConfiguration) -> Vec<&'static str> {
        self.slots()
            .filter(|slot| slot_is_populated(config, slot))
            .collect()
    }

    /// Fails with a conflict when more than one slot is populated.
    pub(crate) fn ensure_exclusive(
        &self,
        config: &RequestConfiguration,
    ) -> Result<Option<&'static str>, Violation> {
        let populated = self.populated_slots(config);
        match populated.len() {
            0 => Ok(None),
            1 => Ok(Some(populated[0])),
            _ => Err(Violation::conflict(self.wire_name, populated)),
        }
    }
}

fn slot_is_populated(config: &RequestConfiguration, slot: &str) -> bool {
    match slot {
        "function_list" => !config.function_list().is_empty(),
        "functions_raw" => config.functions_raw().is_some_and(raw_is_populated),
        "stop_single" => config.stop_single().is_some_and(|s| !s.is_empty()),
        "stop_list" => !config.stop_list().is_empty(),
        "response_format" => config.response_format().is_some(),
        "response_format_shorthand" => config
            .response_format_shorthand()
            .is_some_and(|s| !s.trim().is_empty()),
        _ => false,
    }
}

/// `null`, `[]` and `{}` count as unset.
fn raw_is_populated(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Array(items) => !items.is_empty(),
        serde_json::Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slots_order() {
        let slots: Vec<_> = STOP.slots().collect();
        assert_eq!(slots, vec!["stop_list", "stop_single"]);
    }

    #[test]
    fn test_empty_values_are_not_populated() {
        let mut config = RequestConfiguration::new();
        config
            .set_functions_raw(json!([]))
            .set_stop_single("")
            .set_response_format_shorthand("  ");
        for pair in ALL_PAIRS {
            assert!(pair.populated_slots(&config).is_empty(), "{}", pair.logical_name);
        }
    }

    #[test]
    fn test_conflict_reports_slots() {
        let mut config = RequestConfiguration::new();
        config.set_stop_single("x").set_stop_list(["y"]);
        let err = STOP.ensure_exclusive(&config).unwrap_err();
        assert_eq!(err, Violation::conflict("stop", vec!["stop_list", "stop_single"]));
    }
}
