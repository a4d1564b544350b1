//! Engine configuration

use chrono::{FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::*;

/// External date format accepted by statement queries (day/month/year)
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Tunables for a ledger engine instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Offset from UTC, in seconds, of the reference timezone used to decide
    /// which calendar day an entry belongs to
    pub utc_offset_seconds: i32,
    /// Reject deposits and withdrawals of zero
    pub reject_zero_amounts: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            utc_offset_seconds: 0,
            reject_zero_amounts: false,
        }
    }
}

impl LedgerConfig {
    /// Set the reference timezone in whole hours east of UTC
    ///
    /// Out-of-range values are kept (saturated) and rejected later by
    /// [`LedgerConfig::reference_offset`].
    pub fn with_utc_offset_hours(mut self, hours: i32) -> Self {
        self.utc_offset_seconds = hours.saturating_mul(3600);
        self
    }

    pub fn with_reject_zero_amounts(mut self, reject: bool) -> Self {
        self.reject_zero_amounts = reject;
        self
    }

    /// The reference timezone, validated
    pub fn reference_offset(&self) -> LedgerResult<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_seconds).ok_or_else(|| {
            LedgerError::Validation(format!(
                "UTC offset of {} seconds is out of range",
                self.utc_offset_seconds
            ))
        })
    }
}

/// Parse a `DD/MM/YYYY` date
pub fn parse_date(input: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|e| LedgerError::InvalidDate(format!("'{}': {}", input, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_day_month_year() {
        assert_eq!(
            parse_date("15/03/2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        for input in ["2024-03-15", "03/15/2024", "31/02/2024", "", "yesterday"] {
            assert!(
                matches!(parse_date(input), Err(LedgerError::InvalidDate(_))),
                "{input} should not parse"
            );
        }
    }

    #[test]
    fn test_reference_offset_bounds() {
        let config = LedgerConfig::default().with_utc_offset_hours(-3);
        assert_eq!(config.reference_offset().unwrap().local_minus_utc(), -3 * 3600);

        let config = LedgerConfig::default().with_utc_offset_hours(30);
        assert!(matches!(
            config.reference_offset(),
            Err(LedgerError::Validation(_))
        ));
    }

    #[test]
    fn test_huge_offset_is_rejected_not_overflowed() {
        for hours in [1_000_000, -1_000_000, i32::MAX, i32::MIN] {
            let config = LedgerConfig::default().with_utc_offset_hours(hours);
            assert!(matches!(
                config.reference_offset(),
                Err(LedgerError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: LedgerConfig = serde_json::from_str(r#"{"utc_offset_seconds": -10800}"#).unwrap();
        assert_eq!(config.utc_offset_seconds, -10800);
        assert!(!config.reject_zero_amounts);
    }
}
