//! Timestamp scalar and human-readable rendering.

use crate::config::{Config, DisplayTimezone, TimestampUnit};
use chrono::{DateTime, Local, Utc};

/// Opaque, totally ordered provenance timestamp (larger = later).
pub type Timestamp = i64;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How raw timestamps are turned into display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeFormat {
    pub unit: TimestampUnit,
    pub timezone: DisplayTimezone,
}

impl TimeFormat {
    pub fn from_config(config: &Config) -> Self {
        Self {
            unit: config.timestamp_unit,
            timezone: config.display_timezone,
        }
    }

    /// Render as `YYYY-MM-DD HH:MM:SS`, or the raw number when out of range.
    pub fn render(&self, ts: Timestamp) -> String {
        let Some(utc) = self.to_datetime(ts) else {
            return ts.to_string();
        };

        match self.timezone {
            DisplayTimezone::Utc => utc.format(DATETIME_FORMAT).to_string(),
            DisplayTimezone::Local => utc
                .with_timezone(&Local)
                .format(DATETIME_FORMAT)
                .to_string(),
        }
    }

    fn to_datetime(&self, ts: Timestamp) -> Option<DateTime<Utc>> {
        match self.unit {
            TimestampUnit::Seconds => DateTime::from_timestamp(ts, 0),
            TimestampUnit::Millis => DateTime::from_timestamp_millis(ts),
            TimestampUnit::Micros => DateTime::from_timestamp_micros(ts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_micros_in_utc() {
        let format = TimeFormat {
            unit: TimestampUnit::Micros,
            timezone: DisplayTimezone::Utc,
        };
        // 2024-01-02 03:04:05 UTC
        assert_eq!(format.render(1_704_164_645_000_000), "2024-01-02 03:04:05");
    }

    #[test]
    fn renders_local_time_by_default() {
        let format = TimeFormat::default();
        assert_eq!(format.timezone, DisplayTimezone::Local);

        let ts = 1_704_164_645_000_000;
        let expected = DateTime::from_timestamp_micros(ts)
            .unwrap()
            .with_timezone(&Local)
            .format(DATETIME_FORMAT)
            .to_string();
        assert_eq!(format.render(ts), expected);
    }

    #[test]
    fn renders_each_unit() {
        let mut format = TimeFormat {
            timezone: DisplayTimezone::Utc,
            ..TimeFormat::default()
        };

        format.unit = TimestampUnit::Seconds;
        assert_eq!(format.render(0), "1970-01-01 00:00:00");

        format.unit = TimestampUnit::Millis;
        assert_eq!(format.render(86_400_000), "1970-01-02 00:00:00");
    }

    #[test]
    fn out_of_range_falls_back_to_number() {
        let format = TimeFormat {
            unit: TimestampUnit::Seconds,
            timezone: DisplayTimezone::Utc,
        };
        assert_eq!(format.render(i64::MAX), i64::MAX.to_string());
    }

    #[test]
    fn from_config_copies_settings() {
        let mut config = Config::default();
        config.timestamp_unit = TimestampUnit::Millis;
        config.display_timezone = DisplayTimezone::Utc;

        let format = TimeFormat::from_config(&config);
        assert_eq!(format.unit, TimestampUnit::Millis);
        assert_eq!(format.timezone, DisplayTimezone::Utc);
    }
}
