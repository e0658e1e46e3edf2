//! Whole-configuration validation.
//!
//! The [`Validator`] runs every alternate-pair resolution and the numeric range
//! and required-field checks in one pass. By default it collects every violation
//! so callers see all the rules a configuration breaks at once; a fail-fast mode
//! stops at the first one.
//!
//! | Rule | Field | Allowed |
//! |------|-------|---------|
//! | required | `model`, `messages` | non-empty |
//! | exclusive | `functions`, `stop`, `response_format` | one slot populated |
//! | range | `temperature` | `[0, 2]` |
//! | range | `top_p` | `(0, 1]` |
//! | range | `presence_penalty`, `frequency_penalty` | `[-2, 2]` |
//! | range | `n` | `>= 1` |
//! | range | `logit_bias[*]` | `[-100, 100]` |
//!
//! `max_tokens` is unsigned, so its lower bound holds by construction.

pub mod error;

pub use error::{AllowedRange, ValidationReport, Violation};

use crate::request::RequestConfiguration;
use crate::resolve;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const TEMPERATURE_RANGE: AllowedRange = AllowedRange::closed(0.0, 2.0);
pub const TOP_P_RANGE: AllowedRange = AllowedRange::left_open(0.0, 1.0);
pub const PENALTY_RANGE: AllowedRange = AllowedRange::closed(-2.0, 2.0);
pub const N_RANGE: AllowedRange = AllowedRange::at_least(1.0);
pub const LOGIT_BIAS_RANGE: AllowedRange = AllowedRange::closed(-100.0, 100.0);

/// Advisory upper bound on the number of stop sequences.
pub const DEFAULT_MAX_STOP_SEQUENCES: usize = 4;

/// Whether to stop at the first violation or collect all of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    #[default]
    Collect,
    FailFast,
}

/// Tunable behaviour of the [`Validator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    pub mode: FailureMode,
    /// Stop lists longer than this are logged, not rejected.
    pub max_stop_sequences: usize,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            mode: FailureMode::Collect,
            max_stop_sequences: DEFAULT_MAX_STOP_SEQUENCES,
        }
    }
}

/// Runs every rule over a [`RequestConfiguration`].
#[derive(Debug, Clone, Default)]
pub struct Validator {
    policy: ValidationPolicy,
}

/// Collects violations and tells the caller when to stop.
struct Collector {
    mode: FailureMode,
    report: ValidationReport,
}

impl Collector {
    /// Returns `true` when validation should stop.
    fn record(&mut self, violation: Violation) -> bool {
        self.report.push(violation);
        self.mode == FailureMode::FailFast
    }

    fn check<T>(&mut self, outcome: Result<T, Violation>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(v) => {
                self.report.push(v);
                None
            }
        }
    }

    fn done(&self) -> bool {
        self.mode == FailureMode::FailFast && !self.report.is_empty()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn fail_fast() -> Self {
        Self::with_policy(ValidationPolicy {
            mode: FailureMode::FailFast,
            ..ValidationPolicy::default()
        })
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Validate the configuration and report every violation found.
    pub fn validate(&self, config: &RequestConfiguration) -> ValidationReport {
        let mut collector = Collector {
            mode: self.policy.mode,
            report: ValidationReport::new(),
        };
        self.run(config, &mut collector);
        debug!(
            model = config.model(),
            violations = collector.report.len(),
            mode = ?self.policy.mode,
            "validated request configuration"
        );
        collector.report
    }

    /// Like [`Validator::validate`] but as a `Result`.
    pub fn check(&self, config: &RequestConfiguration) -> crate::Result<()> {
        self.validate(config).into_result()
    }

    fn run(&self, config: &RequestConfiguration, c: &mut Collector) {
        if config.model().trim().is_empty() && c.record(Violation::missing("model")) {
            return;
        }
        if config.messages().is_empty() && c.record(Violation::missing("messages")) {
            return;
        }

        c.check(resolve::functions(config));
        if c.done() {
            return;
        }
        if let Some(stops) = c.check(resolve::stop(config)).flatten() {
            if stops.len() > self.policy.max_stop_sequences {
                warn!(
                    count = stops.len(),
                    max = self.policy.max_stop_sequences,
                    "stop list exceeds the advisory maximum; forwarding as is"
                );
            }
        }
        if c.done() {
            return;
        }
        c.check(resolve::response_format(config));
        if c.done() {
            return;
        }

        let ranges = [
            ("temperature", config.temperature(), TEMPERATURE_RANGE),
            ("top_p", config.top_p(), TOP_P_RANGE),
            ("presence_penalty", config.presence_penalty(), PENALTY_RANGE),
            ("frequency_penalty", config.frequency_penalty(), PENALTY_RANGE),
            ("n", config.n().map(f64::from), N_RANGE),
        ];
        for (field, value, allowed) in ranges {
            if let Some(value) = value {
                if !allowed.contains(value) && c.record(Violation::range(field, value, allowed)) {
                    return;
                }
            }
        }

        if let Some(bias) = config.logit_bias() {
            for (token, &value) in bias {
                if !LOGIT_BIAS_RANGE.contains(value)
                    && c.record(Violation::range(
                        format!("logit_bias[{}]", token),
                        value,
                        LOGIT_BIAS_RANGE,
                    ))
                {
                    return;
                }
            }
        }
    }
}

impl RequestConfiguration {
    /// Validate with the default (collect-all) policy.
    pub fn validate(&self) -> crate::Result<()> {
        Validator::new().check(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Message;

    fn valid_config() -> RequestConfiguration {
        RequestConfiguration::with_model("gpt-x", vec![Message::user("hi")])
    }

    #[test]
    fn test_minimal_config_is_valid() {
        assert!(Validator::new().validate(&valid_config()).is_valid());
    }

    #[test]
    fn test_collects_all_violations() {
        let mut config = RequestConfiguration::new();
        config
            .set_temperature(3.0)
            .set_top_p(0.0)
            .set_stop_single("x")
            .set_stop_list(["y"]);

        let report = Validator::new().validate(&config);
        let fields: Vec<&str> = report.violations().iter().map(|v| v.field()).collect();
        assert_eq!(fields, vec!["model", "messages", "stop", "temperature", "top_p"]);
    }

    #[test]
    fn test_fail_fast_stops_at_first() {
        let mut config = RequestConfiguration::new();
        config.set_temperature(3.0);
        let report = Validator::fail_fast().validate(&config);
        assert_eq!(report.len(), 1);
        assert_eq!(report.first().unwrap(), &Violation::missing("model"));
    }

    #[test]
    fn test_n_zero_rejected() {
        let mut config = valid_config();
        config.set_n(0);
        let report = Validator::new().validate(&config);
        assert_eq!(report.violations(), [Violation::range("n", 0.0, N_RANGE)]);
    }

    #[test]
    fn test_logit_bias_bounds() {
        let mut config = valid_config();
        config
            .insert_logit_bias("1", 100.0)
            .insert_logit_bias("2", -100.5);
        let report = Validator::new().validate(&config);
        assert_eq!(report.len(), 1);
        assert_eq!(report.violations()[0].field(), "logit_bias[2]");
    }

    #[test]
    fn test_long_stop_list_is_not_rejected() {
        let mut config = valid_config();
        config.set_stop_list(["a", "b", "c", "d", "e"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_policy_from_yaml() {
        let policy: ValidationPolicy = serde_yaml::from_str("mode: fail_fast").unwrap();
        assert_eq!(policy.mode, FailureMode::FailFast);
        assert_eq!(policy.max_stop_sequences, DEFAULT_MAX_STOP_SEQUENCES);
    }
}
