use crate::{
    error::AppResult,
    models::Catalog,
    services::sources::{parse_csv, CatalogSource},
};

/// Catalog backed by CSV text held in memory
///
/// Useful for embedding a fixed catalog and for tests. The fingerprint is the
/// text length plus a cheap hash, so swapping the text is detectable.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    label: String,
    csv: String,
}

impl InMemorySource {
    pub fn new(label: impl Into<String>, csv: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            csv: csv.into(),
        }
    }
}

#[async_trait::async_trait]
impl CatalogSource for InMemorySource {
    async fn load(&self) -> AppResult<Catalog> {
        parse_csv(self.csv.as_bytes(), &self.label)
    }

    async fn fingerprint(&self) -> AppResult<Option<String>> {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        self.csv.hash(&mut hasher);
        Ok(Some(format!("{}:{:x}", self.csv.len(), hasher.finish())))
    }

    fn describe(&self) -> String {
        format!("memory:{}", self.label)
    }
}
