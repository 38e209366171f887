//! Phone number parsing and Belgian numbering-plan classification.
//!
//! [`PhoneDigits`] keeps the raw input next to its digit-only form. The
//! Belgian rules live in [`BelgianNumberingPlan`] and are combined with the
//! digits in [`BelgianPhoneNumber`], which exposes the classification
//! predicates. None of these types fail on malformed input: garbage simply
//! classifies as invalid.

use serde::{Deserialize, Serialize};

const SEPARATORS: [char; 3] = [' ', '.', '/'];

/// Raw phone input and the digits extracted from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneDigits {
    original: String,
    digits: String,
}

impl PhoneDigits {
    pub fn new(input: &str) -> Self {
        let mut value = Self::default();
        value.set_digits(input);
        value
    }

    /// Replaces the input and re-derives the digit-only form.
    pub fn set_digits(&mut self, input: &str) {
        self.original = input.to_string();
        self.digits = input.chars().filter(char::is_ascii_digit).collect();
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Optional `+`, then at least one of digits, space, dot or slash.
    pub fn contains_only_allowed_characters(&self) -> bool {
        let body = self
            .original
            .strip_prefix('+')
            .unwrap_or(self.original.as_str());
        !body.is_empty()
            && body
                .chars()
                .all(|ch| ch.is_ascii_digit() || SEPARATORS.contains(&ch))
    }

    pub fn is_local_number(&self) -> bool {
        self.digits.starts_with('0')
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BelgianNumberingPlan {
    /// Treat a leading trunk `0` as equivalent to the `32` country code.
    pub accept_local_zone_prefix: bool,
}

impl Default for BelgianNumberingPlan {
    fn default() -> Self {
        Self {
            accept_local_zone_prefix: true,
        }
    }
}

impl BelgianNumberingPlan {
    pub const COUNTRY_CODE: &'static str = "32";
    pub const TRUNK_PREFIX: char = '0';
    pub const LAND_LINE_DIGITS: usize = 8;
    pub const MOBILE_DIGITS: usize = 9;

    pub fn new(accept_local_zone_prefix: bool) -> Self {
        Self {
            accept_local_zone_prefix,
        }
    }

    /// Drops one leading trunk `0` or one leading `32`, never both.
    pub fn strip_prefix<'a>(&self, digits: &'a str) -> &'a str {
        digits
            .strip_prefix(Self::TRUNK_PREFIX)
            .or_else(|| digits.strip_prefix(Self::COUNTRY_CODE))
            .unwrap_or(digits)
    }

    pub fn has_country_prefix(&self, digits: &str) -> bool {
        (self.accept_local_zone_prefix && digits.starts_with(Self::TRUNK_PREFIX))
            || digits.starts_with(Self::COUNTRY_CODE)
    }

    /// Mobile ranges are 044 to 049. Zone 04 (Liège) shares the first digit
    /// and is told apart only by its shorter length.
    pub fn starts_with_mobile_prefix(&self, local_digits: &str) -> bool {
        match local_digits.as_bytes() {
            [b'4', second, ..] => (b'4'..=b'9').contains(second),
            _ => false,
        }
    }
}

/// Outcome of running a number through the Belgian rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneClass {
    LandLine,
    Mobile,
    /// No Belgian prefix; accepted without verification.
    Foreign,
    Invalid,
}

impl PhoneClass {
    pub fn as_str(self) -> &'static str {
        match self {
            PhoneClass::LandLine => "land_line",
            PhoneClass::Mobile => "mobile",
            PhoneClass::Foreign => "foreign",
            PhoneClass::Invalid => "invalid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BelgianPhoneNumber {
    input: PhoneDigits,
    plan: BelgianNumberingPlan,
    local_digits: String,
}

impl BelgianPhoneNumber {
    pub fn new(input: &str, accept_local_zone_prefix: bool) -> Self {
        Self::with_plan(input, BelgianNumberingPlan::new(accept_local_zone_prefix))
    }

    pub fn with_plan(input: &str, plan: BelgianNumberingPlan) -> Self {
        let mut number = Self {
            input: PhoneDigits::default(),
            plan,
            local_digits: String::new(),
        };
        number.set_digits(input);
        number
    }

    pub fn set_digits(&mut self, input: &str) {
        self.input.set_digits(input);
        self.local_digits = self.plan.strip_prefix(self.input.digits()).to_string();
    }

    pub fn plan(&self) -> BelgianNumberingPlan {
        self.plan
    }

    pub fn original(&self) -> &str {
        self.input.original()
    }

    pub fn digits(&self) -> &str {
        self.input.digits()
    }

    /// Digits without the trunk code or country code.
    pub fn local_digits(&self) -> &str {
        &self.local_digits
    }

    pub fn contains_only_allowed_characters(&self) -> bool {
        self.input.contains_only_allowed_characters()
    }

    pub fn is_local_number(&self) -> bool {
        self.input.is_local_number()
    }

    /// Looks at the full digit string, so a bare `0` or `32` still counts.
    pub fn has_valid_country_prefix(&self) -> bool {
        self.plan.has_country_prefix(self.input.digits())
    }

    pub fn has_valid_mobile_prefix(&self) -> bool {
        self.plan.starts_with_mobile_prefix(&self.local_digits)
            && self.has_valid_number_of_digits_mobile_number()
    }

    pub fn has_valid_number_of_digits_land_line_number(&self) -> bool {
        self.local_digits.len() == BelgianNumberingPlan::LAND_LINE_DIGITS
    }

    pub fn has_valid_number_of_digits_mobile_number(&self) -> bool {
        self.local_digits.len() == BelgianNumberingPlan::MOBILE_DIGITS
    }

    pub fn is_valid_land_line_number(&self) -> bool {
        self.has_valid_country_prefix() && self.has_valid_number_of_digits_land_line_number()
    }

    pub fn is_valid_mobile_number(&self) -> bool {
        self.has_valid_country_prefix()
            && self.has_valid_mobile_prefix()
            && self.has_valid_number_of_digits_mobile_number()
    }

    pub fn is_valid_number(&self, strict: bool) -> bool {
        if strict && !self.contains_only_allowed_characters() {
            return false;
        }
        self.is_valid_land_line_number() || self.is_valid_mobile_number()
    }

    pub fn classification(&self) -> PhoneClass {
        if self.is_valid_mobile_number() {
            PhoneClass::Mobile
        } else if self.is_valid_land_line_number() {
            PhoneClass::LandLine
        } else if !self.has_valid_country_prefix() {
            PhoneClass::Foreign
        } else {
            PhoneClass::Invalid
        }
    }
}
