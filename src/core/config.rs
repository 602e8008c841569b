//! Review rules: consistency tolerance, identifier shapes, rate precision.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::ReviewError;

/// Sentinel text for a field known to be unresolved.
pub const NOT_FOUND: &str = "NOT FOUND";

/// Maximum absolute difference between the stated total and the sum of its parts.
pub const TOTAL_TOLERANCE: Decimal = dec!(0.01);

/// Provider codes: `4` followed by six digits.
pub const PROVIDER_ID_PATTERN: IdPattern = IdPattern::new('4', 6);

/// Supplier sub-accounts: `6` followed by six digits.
pub const SUBACCOUNT_PATTERN: IdPattern = IdPattern::new('6', 6);

/// Decimal places shown for derived rates.
pub const RATE_DECIMALS: u32 = 2;

/// Shape of an accounting code: one fixed leading digit plus a run of digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdPattern {
    /// Required first character.
    pub leading: char,
    /// Exact number of ASCII digits after the leading character.
    pub digits: usize,
}

impl IdPattern {
    pub const fn new(leading: char, digits: usize) -> Self {
        Self { leading, digits }
    }

    /// Whether `value` has exactly this shape. Surrounding whitespace is not tolerated.
    pub fn matches(&self, value: &str) -> bool {
        let mut chars = value.chars();
        if chars.next() != Some(self.leading) {
            return false;
        }
        let rest = chars.as_str();
        rest.len() == self.digits && rest.bytes().all(|b| b.is_ascii_digit())
    }

    /// Total length in bytes of a matching value.
    pub fn width(&self) -> usize {
        self.leading.len_utf8() + self.digits
    }
}

/// Rules applied by the derived-field calculator and the submission gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Tolerance for the total-consistency check (strictly less than).
    pub total_tolerance: Decimal,
    /// Shape of a valid provider ID.
    pub provider_id_pattern: IdPattern,
    /// Shape of a valid sub-account.
    pub subaccount_pattern: IdPattern,
    /// Decimal places derived rates are rounded to.
    pub rate_decimals: u32,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            total_tolerance: TOTAL_TOLERANCE,
            provider_id_pattern: PROVIDER_ID_PATTERN,
            subaccount_pattern: SUBACCOUNT_PATTERN,
            rate_decimals: RATE_DECIMALS,
        }
    }
}

/// Builder for [`ReviewConfig`].
///
/// # Example
///
/// ```
/// use facturator::core::{IdPattern, ReviewConfigBuilder};
/// use rust_decimal_macros::dec;
///
/// let config = ReviewConfigBuilder::new()
///     .total_tolerance(dec!(0.05))
///     .subaccount_pattern(IdPattern::new('4', 7))
///     .build()
///     .unwrap();
/// assert!(config.subaccount_pattern.matches("40000001"));
/// ```
#[derive(Debug, Default)]
pub struct ReviewConfigBuilder {
    config: ReviewConfig,
}

impl ReviewConfigBuilder {
    /// Start from the default rules.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_tolerance(mut self, tolerance: Decimal) -> Self {
        self.config.total_tolerance = tolerance;
        self
    }

    pub fn provider_id_pattern(mut self, pattern: IdPattern) -> Self {
        self.config.provider_id_pattern = pattern;
        self
    }

    pub fn subaccount_pattern(mut self, pattern: IdPattern) -> Self {
        self.config.subaccount_pattern = pattern;
        self
    }

    pub fn rate_decimals(mut self, decimals: u32) -> Self {
        self.config.rate_decimals = decimals;
        self
    }

    /// Validate and return the config.
    pub fn build(self) -> Result<ReviewConfig, ReviewError> {
        let config = self.config;
        if config.total_tolerance.is_sign_negative() {
            return Err(ReviewError::Config(format!(
                "total tolerance must not be negative, got {}",
                config.total_tolerance
            )));
        }
        for (name, pattern) in [
            ("provider ID", config.provider_id_pattern),
            ("sub-account", config.subaccount_pattern),
        ] {
            if pattern.digits == 0 {
                return Err(ReviewError::Config(format!(
                    "{name} pattern must require at least one digit"
                )));
            }
        }
        if config.rate_decimals > 28 {
            return Err(ReviewError::Config(format!(
                "rate precision {} exceeds 28 decimal places",
                config.rate_decimals
            )));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_patterns() {
        assert!(PROVIDER_ID_PATTERN.matches("4123456"));
        assert!(!PROVIDER_ID_PATTERN.matches("412345"));
        assert!(!PROVIDER_ID_PATTERN.matches("41234567"));
        assert!(!PROVIDER_ID_PATTERN.matches("5123456"));
        assert!(!PROVIDER_ID_PATTERN.matches("41234a6"));
        assert!(!PROVIDER_ID_PATTERN.matches(" 4123456"));
        assert!(!PROVIDER_ID_PATTERN.matches(""));
        assert_eq!(PROVIDER_ID_PATTERN.width(), 7);

        assert!(SUBACCOUNT_PATTERN.matches("6000001"));
        assert!(!SUBACCOUNT_PATTERN.matches(NOT_FOUND));
    }

    #[test]
    fn non_ascii_digits_rejected() {
        // Arabic-Indic digits are numeric but not ASCII.
        assert!(!PROVIDER_ID_PATTERN.matches("4١٢٣٤٥٦"));
    }

    #[test]
    fn builder_defaults_match_constants() {
        let config = ReviewConfigBuilder::new().build().unwrap();
        assert_eq!(config, ReviewConfig::default());
        assert_eq!(config.total_tolerance, TOTAL_TOLERANCE);
    }

    #[test]
    fn builder_rejects_invalid_rules() {
        assert!(
            ReviewConfigBuilder::new()
                .total_tolerance(dec!(-0.01))
                .build()
                .is_err()
        );
        assert!(
            ReviewConfigBuilder::new()
                .provider_id_pattern(IdPattern::new('4', 0))
                .build()
                .is_err()
        );
        assert!(ReviewConfigBuilder::new().rate_decimals(29).build().is_err());
    }

    #[test]
    fn config_serde_roundtrip() {
        let config = ReviewConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"total_tolerance\":\"0.01\""));
        let back: ReviewConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
