use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::ValidationError;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar date of a daily bar, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradingDate(Date);

impl TradingDate {
    /// Parse an ISO date. A trailing time component (`2024-01-05 00:00:00`,
    /// `2024-01-05T00:00:00-05:00`) is ignored, as written by common
    /// market data downloaders.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let date_part = match trimmed.char_indices().nth(10) {
            Some((index, 'T' | ' ')) => &trimmed[..index],
            _ => trimmed,
        };

        Date::parse(date_part, ISO_DATE)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }
}

impl Display for TradingDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl FromStr for TradingDate {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Serialize for TradingDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TradingDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_date() {
        let parsed = TradingDate::parse("2024-01-05").expect("must parse");
        assert_eq!(parsed.to_string(), "2024-01-05");
    }

    #[test]
    fn drops_time_component() {
        let spaced = TradingDate::parse("2024-01-05 00:00:00").expect("must parse");
        let offset = TradingDate::parse("2024-01-05T00:00:00-05:00").expect("must parse");
        assert_eq!(spaced, offset);
        assert_eq!(spaced.to_string(), "2024-01-05");
    }

    #[test]
    fn rejects_non_dates() {
        for input in ["", "yesterday", "2024-13-01", "2024/01/05"] {
            let err = TradingDate::parse(input).expect_err("must fail");
            assert!(matches!(err, ValidationError::InvalidDate { .. }));
        }
    }

    #[test]
    fn orders_chronologically() {
        let earlier = TradingDate::parse("2023-12-29").expect("must parse");
        let later = TradingDate::parse("2024-01-02").expect("must parse");
        assert!(earlier < later);
    }
}
