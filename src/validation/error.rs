//! Violation and report types produced by resolution and validation.

use std::fmt;

/// Interval a numeric parameter must fall into.
///
/// Bounds may be open or closed independently; an unbounded side uses an
/// infinite value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllowedRange {
    pub min: f64,
    pub max: f64,
    pub min_inclusive: bool,
    pub max_inclusive: bool,
}

impl AllowedRange {
    /// `[min, max]`
    pub const fn closed(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            min_inclusive: true,
            max_inclusive: true,
        }
    }

    /// `(min, max]`
    pub const fn left_open(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            min_inclusive: false,
            max_inclusive: true,
        }
    }

    /// `[min, +inf)`
    pub const fn at_least(min: f64) -> Self {
        Self {
            min,
            max: f64::INFINITY,
            min_inclusive: true,
            max_inclusive: false,
        }
    }

    /// Whether `value` lies inside the range. NaN never does.
    pub fn contains(&self, value: f64) -> bool {
        let above_min = if self.min_inclusive {
            value >= self.min
        } else {
            value > self.min
        };
        let below_max = if self.max_inclusive {
            value <= self.max
        } else {
            value < self.max
        };
        above_min && below_max
    }
}

impl fmt::Display for AllowedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.min_inclusive { '[' } else { '(' };
        let close = if self.max_inclusive { ']' } else { ')' };
        if self.max.is_infinite() {
            write!(f, "{}{}, +inf{}", open, self.min, close)
        } else {
            write!(f, "{}{}, {}{}", open, self.min, self.max, close)
        }
    }
}

/// A single rule failure for one logical request field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Violation {
    /// Two alternate slots of the same logical field were both populated.
    #[error("'{field}' is set through more than one alternate ({})", .slots.join(", "))]
    MutualExclusionConflict {
        field: String,
        slots: Vec<&'static str>,
    },

    #[error("'{field}' has unrecognized value '{value}'")]
    InvalidEnumValue { field: String, value: String },

    #[error("'{field}' is {value}, outside the allowed range {allowed}")]
    RangeViolation {
        field: String,
        value: f64,
        allowed: AllowedRange,
    },

    #[error("'{field}' is required")]
    MissingRequiredField { field: String },
}

impl Violation {
    pub fn conflict(field: impl Into<String>, slots: Vec<&'static str>) -> Self {
        Violation::MutualExclusionConflict {
            field: field.into(),
            slots,
        }
    }

    pub fn invalid_enum(field: impl Into<String>, value: impl Into<String>) -> Self {
        Violation::InvalidEnumValue {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn range(field: impl Into<String>, value: f64, allowed: AllowedRange) -> Self {
        Violation::RangeViolation {
            field: field.into(),
            value,
            allowed,
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Violation::MissingRequiredField {
            field: field.into(),
        }
    }

    /// Wire name of the field the violation refers to.
    pub fn field(&self) -> &str {
        match self {
            Violation::MutualExclusionConflict { field, .. }
            | Violation::InvalidEnumValue { field, .. }
            | Violation::RangeViolation { field, .. }
            | Violation::MissingRequiredField { field } => field,
        }
    }
}

/// Outcome of a validation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Check if validation passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Turn the report into a `Result`, failing when any violation was recorded.
    pub fn into_result(self) -> crate::Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(crate::Error::Invalid(self))
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.violations.is_empty() {
            return f.write_str("no violations");
        }
        let messages: Vec<String> = self.violations.iter().map(|v| v.to_string()).collect();
        write!(
            f,
            "{} violation(s): {}",
            self.violations.len(),
            messages.join("; ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_display() {
        assert_eq!(AllowedRange::closed(0.0, 2.0).to_string(), "[0, 2]");
        assert_eq!(AllowedRange::left_open(0.0, 1.0).to_string(), "(0, 1]");
        assert_eq!(AllowedRange::at_least(1.0).to_string(), "[1, +inf)");
    }

    #[test]
    fn test_range_bounds() {
        let temp = AllowedRange::closed(0.0, 2.0);
        assert!(temp.contains(0.0));
        assert!(temp.contains(2.0));
        assert!(!temp.contains(2.5));
        assert!(!temp.contains(f64::NAN));

        let top_p = AllowedRange::left_open(0.0, 1.0);
        assert!(!top_p.contains(0.0));
        assert!(top_p.contains(1.0));
    }

    #[test]
    fn test_violation_messages() {
        let v = Violation::conflict("stop", vec!["stop_single", "stop_list"]);
        assert_eq!(v.field(), "stop");
        assert_eq!(
            v.to_string(),
            "'stop' is set through more than one alternate (stop_single, stop_list)"
        );

        let v = Violation::range("temperature", 2.5, AllowedRange::closed(0.0, 2.0));
        assert_eq!(
            v.to_string(),
            "'temperature' is 2.5, outside the allowed range [0, 2]"
        );
    }

    #[test]
    fn test_report_into_result() {
        assert!(ValidationReport::new().into_result().is_ok());

        let report = ValidationReport::from_violations(vec![Violation::missing("model")]);
        let err = report.into_result().unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].field(), "model");
    }
}
