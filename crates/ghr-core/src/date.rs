//! Date formatting for chat messages
//!
//! Formats use strftime syntax. The default `%-d.%-m.%Y %H:%M:%S` renders
//! like `4.7.2024 18:03:09`.

use std::fmt::Display;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Locale, TimeZone, Utc};

use crate::config::DateConfig;
use crate::error::{Error, Result};

/// Formats timestamps with the configured pattern and locale
#[derive(Debug, Clone)]
pub struct DateFormatter {
    format: String,
    locale: Option<Locale>,
}

impl DateFormatter {
    /// Create a formatter
    ///
    /// An empty `locale` disables localization. Unknown locales and invalid
    /// format strings are configuration errors.
    pub fn new(format: &str, locale: &str) -> Result<Self> {
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::Config(format!("Invalid date format: {}", format)));
        }

        let locale = if locale.is_empty() {
            None
        } else {
            let parsed = Locale::try_from(locale)
                .map_err(|_| Error::Config(format!("Unknown date locale: {}", locale)))?;
            Some(parsed)
        };

        Ok(Self {
            format: format.to_string(),
            locale,
        })
    }

    /// Create a formatter from the `[date]` config section
    pub fn from_config(config: &DateConfig) -> Result<Self> {
        Self::new(&config.format, &config.locale)
    }

    /// Format a timestamp in the local time zone
    pub fn format(&self, timestamp: &DateTime<Utc>) -> String {
        self.format_in(timestamp, &Local)
    }

    /// Format a timestamp in the given time zone
    pub fn format_in<Tz>(&self, timestamp: &DateTime<Utc>, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let local = timestamp.with_timezone(tz);
        match self.locale {
            Some(locale) => local.format_localized(&self.format, locale).to_string(),
            None => local.format(&self.format).to_string(),
        }
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self {
            format: crate::config::default_date_format(),
            locale: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 4, 18, 3, 9).unwrap()
    }

    #[test]
    fn test_default_format() {
        let formatter = DateFormatter::default();
        assert_eq!(formatter.format_in(&timestamp(), &Utc), "4.7.2024 18:03:09");
    }

    #[test]
    fn test_custom_format() {
        let formatter = DateFormatter::new("%Y-%m-%d", "").unwrap();
        assert_eq!(formatter.format_in(&timestamp(), &Utc), "2024-07-04");
    }

    #[test]
    fn test_localized_month_name() {
        let formatter = DateFormatter::new("%B", "de_DE").unwrap();
        assert_eq!(formatter.format_in(&timestamp(), &Utc), "Juli");
    }

    #[test]
    fn test_unknown_locale_is_error() {
        let result = DateFormatter::new("%Y", "xx_NOPE");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_format_is_error() {
        let result = DateFormatter::new("%Q broken %", "");
        assert!(result.is_err());
    }
}
