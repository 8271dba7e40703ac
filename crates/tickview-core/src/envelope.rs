use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{OutcomeStatus, ValidationError};

pub const SCHEMA_VERSION: &str = "v1.0.0";

/// Standard wrapper for machine-readable `tickview` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(meta: EnvelopeMeta, data: T) -> Result<Self, ValidationError> {
        meta.validate()?;
        Ok(Self { meta, data })
    }
}

/// Metadata attached to every envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    pub schema_version: String,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    pub status: OutcomeStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tickers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl EnvelopeMeta {
    pub fn new(
        request_id: impl Into<String>,
        status: OutcomeStatus,
    ) -> Result<Self, ValidationError> {
        let meta = Self {
            request_id: request_id.into(),
            schema_version: String::from(SCHEMA_VERSION),
            generated_at: OffsetDateTime::now_utc(),
            status,
            tickers: Vec::new(),
            warnings: Vec::new(),
        };
        meta.validate()?;
        Ok(meta)
    }

    pub fn with_tickers(mut self, tickers: impl IntoIterator<Item = String>) -> Self {
        self.tickers.extend(tickers);
        self
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.request_id.trim().len() < 8 {
            return Err(ValidationError::InvalidRequestId);
        }

        if !is_valid_schema_version(&self.schema_version) {
            return Err(ValidationError::InvalidSchemaVersion {
                value: self.schema_version.clone(),
            });
        }

        Ok(())
    }
}

fn is_valid_schema_version(value: &str) -> bool {
    let Some(version) = value.strip_prefix('v') else {
        return false;
    };

    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|ch| ch.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_meta_with_current_schema() {
        let meta = EnvelopeMeta::new("request-12345", OutcomeStatus::Rows)
            .expect("meta should be valid")
            .with_tickers([String::from("AAPL")]);

        assert_eq!(meta.schema_version, SCHEMA_VERSION);
        assert_eq!(meta.tickers, ["AAPL"]);
    }

    #[test]
    fn rejects_short_request_id() {
        let err = EnvelopeMeta::new("req", OutcomeStatus::Empty).expect_err("must fail");
        assert_eq!(err, ValidationError::InvalidRequestId);
    }

    #[test]
    fn rejects_bad_schema_version() {
        let mut meta =
            EnvelopeMeta::new("request-12345", OutcomeStatus::Empty).expect("meta must be valid");
        meta.schema_version = String::from("1.0");

        let err = Envelope::new(meta, ()).expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidSchemaVersion { .. }));
    }

    #[test]
    fn serializes_status_and_omits_empty_lists() {
        let meta =
            EnvelopeMeta::new("request-12345", OutcomeStatus::NotFound).expect("meta must be valid");
        let value = serde_json::to_value(Envelope::new(meta, 1).expect("envelope")).expect("json");

        assert_eq!(value["meta"]["status"], "not_found");
        assert!(value["meta"].get("warnings").is_none());
        assert_eq!(value["data"], 1);
    }
}
