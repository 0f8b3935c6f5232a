//! Phone number normalization to international dialing digits.

#[cfg(test)]
#[path = "number_test.rs"]
mod number_test;

pub const DEFAULT_COUNTRY_CODE: &str = "62";
/// First digit of a local mobile number written without its trunk zero.
pub const DEFAULT_MOBILE_TRUNK: char = '8';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("country code must be 1-3 digits, got '{0}'")]
    InvalidCountryCode(String),
    #[error("mobile trunk must be a digit 1-9, got '{0}'")]
    InvalidMobileTrunk(char),
}

/// How local numbers are rewritten into international form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberPlan {
    country_code: String,
    mobile_trunk: char,
}

impl Default for NumberPlan {
    fn default() -> Self {
        Self { country_code: DEFAULT_COUNTRY_CODE.to_string(), mobile_trunk: DEFAULT_MOBILE_TRUNK }
    }
}

impl NumberPlan {
    /// # Errors
    ///
    /// Rejects country codes that are not 1-3 ASCII digits, and trunk digits
    /// outside `1..=9`.
    pub fn new(country_code: &str, mobile_trunk: char) -> Result<Self, PlanError> {
        let code = country_code.trim().trim_start_matches('+');
        if code.is_empty() || code.len() > 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PlanError::InvalidCountryCode(country_code.to_string()));
        }
        if !matches!(mobile_trunk, '1'..='9') {
            return Err(PlanError::InvalidMobileTrunk(mobile_trunk));
        }
        Ok(Self { country_code: code.to_string(), mobile_trunk })
    }

    /// # Errors
    ///
    /// See [`NumberPlan::new`].
    pub fn with_country_code(country_code: &str) -> Result<Self, PlanError> {
        Self::new(country_code, DEFAULT_MOBILE_TRUNK)
    }

    #[must_use]
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    #[must_use]
    pub fn mobile_trunk(&self) -> char {
        self.mobile_trunk
    }

    /// Strip everything but digits, then put the country code in front of
    /// local numbers:
    ///
    /// - `0812…` drops the leading zero: `62812…`
    /// - `812…` gets the code prepended: `62812…`
    /// - anything else is assumed to carry a country code already
    ///
    /// No length or shape validation happens beyond that. Returns an empty
    /// string when `raw` has no digits.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return digits;
        }
        if let Some(rest) = digits.strip_prefix('0') {
            return format!("{}{rest}", self.country_code);
        }
        if digits.starts_with(self.mobile_trunk) {
            return format!("{}{digits}", self.country_code);
        }
        digits
    }
}

/// [`NumberPlan::normalize`] with the default (Indonesian) plan.
#[must_use]
pub fn normalize_number(raw: &str) -> String {
    NumberPlan::default().normalize(raw)
}
