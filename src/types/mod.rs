use chrono::{DateTime, Utc};

// Types layer - All data structures
pub mod db;
pub mod dto;
pub mod internal;

/// Convert stored unix seconds to a UTC timestamp for the wire
///
/// Out-of-range values collapse to the unix epoch.
pub fn timestamp_to_datetime(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_to_datetime() {
        let dt = timestamp_to_datetime(1_700_000_000);
        assert_eq!(dt.timestamp(), 1_700_000_000);
        assert_eq!(timestamp_to_datetime(i64::MAX).timestamp(), 0);
    }
}
