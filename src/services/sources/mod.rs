//! Catalog source abstraction
//!
//! A catalog can come from a local CSV file, a remote CSV over HTTP or text
//! already held in memory. Each adapter turns its source into a [`Catalog`];
//! everything downstream is source-agnostic.

use crate::{
    error::{AppError, AppResult},
    models::Catalog,
};

pub mod local;
pub mod memory;
pub mod remote;

pub use local::LocalFileSource;
pub use memory::InMemorySource;
pub use remote::RemoteSource;

/// Trait for catalog loaders
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Loads and parses the full catalog
    ///
    /// Fails on an unreadable source, a malformed table or a table without rows.
    async fn load(&self) -> AppResult<Catalog>;

    /// Cheap token identifying the current version of the source
    ///
    /// `None` means the source cannot tell, in which case only TTL expiry or an
    /// explicit reload refreshes a cached catalog.
    async fn fingerprint(&self) -> AppResult<Option<String>> {
        Ok(None)
    }

    /// Human-readable location for logging and the catalog info endpoint
    fn describe(&self) -> String;
}

/// Parses CSV bytes into a catalog
///
/// Rows may have fewer or more cells than the header row. Cells are kept
/// verbatim; headers are trimmed by [`Catalog::new`].
pub fn parse_csv(bytes: &[u8], origin: &str) -> AppResult<Catalog> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    if rows.is_empty() {
        return Err(AppError::EmptyCatalog(origin.to_string()));
    }

    tracing::debug!(
        origin = %origin,
        columns = headers.len(),
        rows = rows.len(),
        "Parsed catalog CSV"
    );

    Ok(Catalog::new(headers, rows))
}
