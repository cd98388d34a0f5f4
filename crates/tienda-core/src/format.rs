//! # Amount Formatting
//!
//! Locale-style thousands grouping for whole-unit amounts, and the inverse
//! parser used when reading prices off a product card.
//!
//! ## Grouping Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  policy   separator  min grouping   1500      200000      0             │
//! │  ───────  ─────────  ────────────   ───────   ─────────   ───           │
//! │  es-CO    '.'        1              1.500     200.000     0             │
//! │  es-ES    '.'        2              1500      200.000     0             │
//! │  en-US    ','        1              1,500     200,000     0             │
//! │  none     -          -              1500      200000      0             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "Min grouping" follows the CLDR `minimumGroupingDigits` rule: the
//! separator only appears once the integer has at least
//! `group_size + min_grouping_digits` digits.
//!
//! No decimals are ever rendered; amounts are whole units.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Grouping Policy
// =============================================================================

/// How to group the digits of an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupingPolicy {
    /// Separator between groups, `None` disables grouping.
    pub separator: Option<char>,

    /// Digits per group (3 for every supported locale).
    pub group_size: u8,

    /// Extra digits required before the first separator appears.
    pub min_grouping_digits: u8,
}

impl GroupingPolicy {
    /// Colombian Spanish: `200.000`, `1.500`.
    pub const ES_CO: GroupingPolicy = GroupingPolicy {
        separator: Some('.'),
        group_size: 3,
        min_grouping_digits: 1,
    };

    /// Peninsular Spanish: `200.000`, but `1500`.
    pub const ES_ES: GroupingPolicy = GroupingPolicy {
        separator: Some('.'),
        group_size: 3,
        min_grouping_digits: 2,
    };

    /// US English: `200,000`.
    pub const EN_US: GroupingPolicy = GroupingPolicy {
        separator: Some(','),
        group_size: 3,
        min_grouping_digits: 1,
    };

    /// Plain digits.
    pub const NONE: GroupingPolicy = GroupingPolicy {
        separator: None,
        group_size: 3,
        min_grouping_digits: 1,
    };

    /// Returns the locale tag this policy was built from, if it is a preset.
    pub fn locale_tag(&self) -> Option<&'static str> {
        match *self {
            p if p == Self::ES_CO => Some("es-CO"),
            p if p == Self::ES_ES => Some("es-ES"),
            p if p == Self::EN_US => Some("en-US"),
            p if p == Self::NONE => Some("none"),
            _ => None,
        }
    }
}

impl Default for GroupingPolicy {
    fn default() -> Self {
        GroupingPolicy::ES_CO
    }
}

impl fmt::Display for GroupingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.locale_tag() {
            Some(tag) => f.write_str(tag),
            None => write!(
                f,
                "custom({:?}, {}, {})",
                self.separator, self.group_size, self.min_grouping_digits
            ),
        }
    }
}

impl FromStr for GroupingPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "es-co" => Ok(GroupingPolicy::ES_CO),
            "es-es" | "es" => Ok(GroupingPolicy::ES_ES),
            "en-us" | "en" => Ok(GroupingPolicy::EN_US),
            "none" | "plain" => Ok(GroupingPolicy::NONE),
            other => Err(ValidationError::InvalidFormat {
                field: "locale".to_string(),
                reason: format!("unsupported locale '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Renders an integer amount with thousands grouping and zero decimals.
///
/// ## Example
/// ```rust
/// use tienda_core::format::{format_amount, GroupingPolicy};
///
/// assert_eq!(format_amount(200_000, &GroupingPolicy::ES_CO), "200.000");
/// assert_eq!(format_amount(0, &GroupingPolicy::ES_CO), "0");
/// assert_eq!(format_amount(-1_234_567, &GroupingPolicy::EN_US), "-1,234,567");
/// ```
pub fn format_amount(amount: i64, policy: &GroupingPolicy) -> String {
    // unsigned_abs keeps i64::MIN representable
    let digits = amount.unsigned_abs().to_string();
    let sign = if amount < 0 { "-" } else { "" };

    let group = usize::from(policy.group_size.max(1));
    let threshold = group + usize::from(policy.min_grouping_digits);

    let separator = match policy.separator {
        Some(sep) if digits.len() >= threshold => sep,
        _ => return format!("{}{}", sign, digits),
    };

    let mut out = String::with_capacity(sign.len() + digits.len() + digits.len() / group);
    out.push_str(sign);

    let lead = match digits.len() % group {
        0 => group,
        n => n,
    };
    out.push_str(&digits[..lead]);
    for chunk in digits.as_bytes()[lead..].chunks(group) {
        out.push(separator);
        // digits are ASCII, so byte chunks are valid UTF-8
        out.extend(chunk.iter().map(|b| char::from(*b)));
    }

    out
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a price as printed on a product card back into whole units.
///
/// ## Rules
/// - Leading `$` and surrounding whitespace are ignored
/// - The policy's group separator is stripped wherever it appears
/// - What remains must be a non-empty run of ASCII digits
///
/// ## Example
/// ```rust
/// use tienda_core::format::{parse_amount, GroupingPolicy};
///
/// assert_eq!(parse_amount("$200.000", &GroupingPolicy::ES_CO).unwrap(), 200_000);
/// assert_eq!(parse_amount("15000", &GroupingPolicy::ES_CO).unwrap(), 15_000);
/// assert!(parse_amount("gratis", &GroupingPolicy::ES_CO).is_err());
/// ```
pub fn parse_amount(text: &str, policy: &GroupingPolicy) -> Result<i64, ValidationError> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();

    let digits: String = trimmed
        .chars()
        .filter(|c| Some(*c) != policy.separator && !c.is_whitespace())
        .collect();

    if digits.is_empty() {
        return Err(ValidationError::Required {
            field: "price".to_string(),
        });
    }

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: format!("'{}' is not a whole amount", text.trim()),
        });
    }

    digits.parse::<i64>().map_err(|_| ValidationError::OutOfRange {
        field: "price".to_string(),
        min: 0,
        max: i64::MAX,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_es_co() {
        let p = GroupingPolicy::ES_CO;
        assert_eq!(format_amount(0, &p), "0");
        assert_eq!(format_amount(999, &p), "999");
        assert_eq!(format_amount(1_500, &p), "1.500");
        assert_eq!(format_amount(15_000, &p), "15.000");
        assert_eq!(format_amount(200_000, &p), "200.000");
        assert_eq!(format_amount(1_234_567, &p), "1.234.567");
    }

    #[test]
    fn test_format_min_grouping_digits() {
        let p = GroupingPolicy::ES_ES;
        assert_eq!(format_amount(1_500, &p), "1500");
        assert_eq!(format_amount(10_000, &p), "10.000");
    }

    #[test]
    fn test_format_negative_and_extremes() {
        let p = GroupingPolicy::EN_US;
        assert_eq!(format_amount(-1_500, &p), "-1,500");
        assert_eq!(format_amount(i64::MIN, &p), "-9,223,372,036,854,775,808");
        assert_eq!(format_amount(i64::MAX, &GroupingPolicy::NONE), "9223372036854775807");
    }

    #[test]
    fn test_parse_card_prices() {
        let p = GroupingPolicy::ES_CO;
        assert_eq!(parse_amount("$200.000", &p).unwrap(), 200_000);
        assert_eq!(parse_amount(" $ 1.250.000 ", &p).unwrap(), 1_250_000);
        assert_eq!(parse_amount("0", &p).unwrap(), 0);

        assert!(matches!(
            parse_amount("$", &p),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            parse_amount("-5", &p),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_amount("99999999999999999999", &p),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_inverts_format() {
        let p = GroupingPolicy::ES_CO;
        for amount in [0, 7, 1_500, 200_000, 987_654_321] {
            assert_eq!(parse_amount(&format_amount(amount, &p), &p).unwrap(), amount);
        }
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("es-CO".parse::<GroupingPolicy>().unwrap(), GroupingPolicy::ES_CO);
        assert_eq!("en_us".parse::<GroupingPolicy>().unwrap(), GroupingPolicy::EN_US);
        assert!("fr-FR".parse::<GroupingPolicy>().is_err());
        assert_eq!(GroupingPolicy::ES_CO.to_string(), "es-CO");
    }
}
