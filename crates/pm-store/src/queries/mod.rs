//! Query modules for the entities stored in Redis.

pub mod clients;
pub mod projects;

use serde::de::DeserializeOwned;

/// Decode fetched documents, skipping missing and corrupt entries.
pub(crate) fn parse_rows<T: DeserializeOwned>(values: Vec<Option<String>>) -> Vec<T> {
    values
        .into_iter()
        .flatten()
        .filter_map(|json| match serde_json::from_str::<T>(&json) {
            Ok(row) => Some(row),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable document");
                None
            }
        })
        .collect()
}
