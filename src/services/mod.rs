pub mod columns;
pub mod ranking;
pub mod similarity;
pub mod sources;

pub use columns::{resolve_columns, resolve_for_catalog, resolve_with_overrides};
pub use ranking::rank;
pub use sources::{CatalogSource, InMemorySource, LocalFileSource, RemoteSource};
