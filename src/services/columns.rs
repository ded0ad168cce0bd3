use crate::{
    error::{AppError, AppResult},
    models::{Catalog, ColumnMapping, ColumnOverrides, Field},
};

/// Maps arbitrary table headers onto the semantic fields
///
/// For each field the first header (in original order) whose trimmed,
/// lowercased text contains the field's needle wins. Fields with no match get
/// their fallback label; rating gets no header at all.
pub fn resolve_columns<S: AsRef<str>>(headers: &[S]) -> ColumnMapping {
    resolve_with_overrides(headers, &ColumnOverrides::default())
}

/// Same as [`resolve_columns`], but explicit overrides take precedence
pub fn resolve_with_overrides<S: AsRef<str>>(
    headers: &[S],
    overrides: &ColumnOverrides,
) -> ColumnMapping {
    let pick = |field: Field| -> Option<String> {
        if let Some(header) = overrides.get(field) {
            return Some(header.trim().to_string());
        }
        headers
            .iter()
            .map(|h| h.as_ref().trim())
            .find(|h| h.to_lowercase().contains(field.needle()))
            .map(str::to_string)
            .or_else(|| field.fallback_label().map(str::to_string))
    };
    let label = |field: Field| pick(field).unwrap_or_default();

    ColumnMapping {
        name: label(Field::Name),
        primary_genre: label(Field::PrimaryGenre),
        director: label(Field::Director),
        release_year: label(Field::ReleaseYear),
        synopsis: label(Field::Synopsis),
        keywords: label(Field::Keywords),
        cast: label(Field::Cast),
        age_rating: label(Field::AgeRating),
        rating: pick(Field::Rating),
    }
}

impl ColumnMapping {
    /// Checks that every required field points at a header the catalog has
    ///
    /// Optional fields (synopsis, keywords, cast, age rating, rating) may be
    /// missing; they read as empty or zero.
    pub fn validate(&self, catalog: &Catalog) -> AppResult<()> {
        for field in Field::ALL.into_iter().filter(|f| f.is_required()) {
            let label = self.get(field).unwrap_or_default();
            if !catalog.has_column(label) {
                return Err(AppError::UnresolvedColumn {
                    field: field.as_str(),
                    label: label.to_string(),
                });
            }
        }

        for field in Field::ALL.into_iter().filter(|f| !f.is_required()) {
            match self.get(field) {
                Some(label) if catalog.has_column(label) => {}
                label => tracing::warn!(
                    field = %field,
                    label = label.unwrap_or(""),
                    "Optional column missing from catalog, values will read as empty"
                ),
            }
        }

        Ok(())
    }
}

/// Resolves and validates the mapping for a loaded catalog
pub fn resolve_for_catalog(
    catalog: &Catalog,
    overrides: &ColumnOverrides,
) -> AppResult<ColumnMapping> {
    let mapping = resolve_with_overrides(catalog.headers(), overrides);
    mapping.validate(catalog)?;

    tracing::debug!(mapping = ?mapping, "Resolved catalog columns");

    Ok(mapping)
}
