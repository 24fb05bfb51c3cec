//! Settings that control how the dashboard is computed and displayed.

use crate::{Error, dashboard::normalize::Normalizer, timezone::get_timezone};

/// The number of most recent transactions loaded for the dashboard.
pub const DEFAULT_TRANSACTION_LIMIT: u32 = 100;

/// The currency symbol used when displaying amounts.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// The configuration for computing and displaying the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    ///
    /// Timestamps with an offset are converted into this timezone before
    /// deciding which month they belong to. `None` means UTC.
    pub local_timezone: Option<String>,

    /// How many of the most recent transactions to load from the store.
    pub transaction_limit: u32,

    /// The symbol shown in front of amounts, e.g. "₹".
    pub currency_symbol: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            local_timezone: None,
            transaction_limit: DEFAULT_TRANSACTION_LIMIT,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_owned(),
        }
    }
}

impl DashboardConfig {
    /// Create a [Normalizer] that uses the configured timezone.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if `local_timezone` is not a known timezone.
    pub fn normalizer(&self) -> Result<Normalizer<'static>, Error> {
        let normalizer = Normalizer::default();

        match &self.local_timezone {
            Some(timezone) => Ok(normalizer.timezone(get_timezone(timezone)?)),
            None => Ok(normalizer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_CURRENCY_SYMBOL, DEFAULT_TRANSACTION_LIMIT, DashboardConfig};
    use crate::Error;

    #[test]
    fn default_config_matches_dashboard_defaults() {
        let config = DashboardConfig::default();

        assert_eq!(config.local_timezone, None);
        assert_eq!(config.transaction_limit, DEFAULT_TRANSACTION_LIMIT);
        assert_eq!(config.currency_symbol, DEFAULT_CURRENCY_SYMBOL);
    }

    #[test]
    fn normalizer_uses_configured_timezone() {
        let config = DashboardConfig {
            local_timezone: Some("Asia/Kolkata".to_owned()),
            ..Default::default()
        };

        let normalizer = config.normalizer().unwrap();

        assert_eq!(normalizer.month_key("2024-01-31T20:00:00Z").as_str(), "2024-02");
    }

    #[test]
    fn normalizer_rejects_invalid_timezone() {
        let config = DashboardConfig {
            local_timezone: Some("Not/AZone".to_owned()),
            ..Default::default()
        };

        let result = config.normalizer();

        assert!(matches!(result, Err(Error::InvalidTimezone(name)) if name == "Not/AZone"));
    }
}
