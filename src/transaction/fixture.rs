//! Reads the static JSON document that seeds the transaction store.

use std::path::PathBuf;

use serde::Deserialize;

use crate::{
    Error,
    transaction::core::{NewTransaction, TransactionId},
};

/// Where the seed transactions come from.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureSource {
    /// A JSON file on disk, read when the store is first used.
    Path(PathBuf),
    /// A JSON document held in memory.
    Json(String),
}

/// One entry of the fixture document.
///
/// The `id` is optional; the store assigns one to records without it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FixtureRecord {
    /// The ID given in the fixture, if any.
    #[serde(default)]
    pub id: Option<TransactionId>,
    /// The rest of the transaction.
    #[serde(flatten)]
    pub transaction: NewTransaction,
}

impl FixtureSource {
    /// Read and parse the fixture.
    ///
    /// # Errors
    /// Returns [Error::FixtureLoadError] if the file cannot be read or the
    /// document is not an array of transactions.
    pub async fn load(&self) -> Result<Vec<FixtureRecord>, Error> {
        let text = match self {
            FixtureSource::Path(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|error| {
                    Error::FixtureLoadError(format!("{}: {error}", path.display()))
                })?,
            FixtureSource::Json(text) => text.clone(),
        };

        serde_json::from_str(&text).map_err(|error| Error::FixtureLoadError(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use time::macros::date;

    use crate::{
        Error,
        transaction::{TransactionType, fixture::FixtureSource},
    };

    #[tokio::test]
    async fn parses_records_with_and_without_ids() {
        let source = FixtureSource::Json(
            r#"[
                {"id": 7, "description": "Rent", "amount": 1200, "type": "expense",
                 "category": "Utilities", "date": "2025-03-01"},
                {"description": "Salary", "amount": 3000.5, "type": "income",
                 "category": "Work", "date": "2025-03-02"}
            ]"#
            .to_owned(),
        );

        let records = source.load().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, Some(7));
        assert_eq!(records[0].transaction.amount, 1200.0);
        assert_eq!(records[1].id, None);
        assert_eq!(
            records[1].transaction.transaction_type,
            TransactionType::Income
        );
        assert_eq!(records[1].transaction.date, date!(2025 - 03 - 02));
    }

    #[tokio::test]
    async fn missing_file_is_a_load_error() {
        let source = FixtureSource::Path(PathBuf::from("does/not/exist.json"));

        let result = source.load().await;

        assert!(matches!(result, Err(Error::FixtureLoadError(_))));
    }

    #[tokio::test]
    async fn malformed_document_is_a_load_error() {
        let source = FixtureSource::Json(r#"{"not": "an array"}"#.to_owned());

        let result = source.load().await;

        assert!(matches!(result, Err(Error::FixtureLoadError(_))));
    }
}
