use serde::Serialize;
use std::collections::HashSet;
use std::fmt::Display;

use super::MovieRecord;

/// Semantic fields the similarity engine reads from a catalog row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    PrimaryGenre,
    Director,
    ReleaseYear,
    Synopsis,
    Keywords,
    Cast,
    AgeRating,
    Rating,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Name,
        Field::PrimaryGenre,
        Field::Director,
        Field::ReleaseYear,
        Field::Synopsis,
        Field::Keywords,
        Field::Cast,
        Field::AgeRating,
        Field::Rating,
    ];

    /// Lowercase substring a header must contain to map onto this field
    pub fn needle(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::PrimaryGenre => "genre",
            Field::Director => "director",
            Field::ReleaseYear => "year",
            Field::Synopsis => "synopsis",
            Field::Keywords => "keyword",
            Field::Cast => "cast",
            Field::AgeRating => "age",
            Field::Rating => "rating",
        }
    }

    /// Header assumed when no column matches. Rating has none.
    pub fn fallback_label(self) -> Option<&'static str> {
        match self {
            Field::Name => Some("Name"),
            Field::PrimaryGenre => Some("Primary Genre"),
            Field::Director => Some("Director"),
            Field::ReleaseYear => Some("Theatrical Release Year"),
            Field::Synopsis => Some("Synopsis"),
            Field::Keywords => Some("Keywords"),
            Field::Cast => Some("Cast"),
            Field::AgeRating => Some("Age Rating"),
            Field::Rating => None,
        }
    }

    /// Fields a catalog must actually contain for scoring to be meaningful
    pub fn is_required(self) -> bool {
        matches!(
            self,
            Field::Name | Field::PrimaryGenre | Field::Director | Field::ReleaseYear
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::PrimaryGenre => "primary_genre",
            Field::Director => "director",
            Field::ReleaseYear => "release_year",
            Field::Synopsis => "synopsis",
            Field::Keywords => "keywords",
            Field::Cast => "cast",
            Field::AgeRating => "age_rating",
            Field::Rating => "rating",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolved header for every semantic field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMapping {
    pub name: String,
    pub primary_genre: String,
    pub director: String,
    pub release_year: String,
    pub synopsis: String,
    pub keywords: String,
    pub cast: String,
    pub age_rating: String,
    /// `None` when no header mentions a rating
    pub rating: Option<String>,
}

impl ColumnMapping {
    /// Header mapped to `field`, if any
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(&self.name),
            Field::PrimaryGenre => Some(&self.primary_genre),
            Field::Director => Some(&self.director),
            Field::ReleaseYear => Some(&self.release_year),
            Field::Synopsis => Some(&self.synopsis),
            Field::Keywords => Some(&self.keywords),
            Field::Cast => Some(&self.cast),
            Field::AgeRating => Some(&self.age_rating),
            Field::Rating => self.rating.as_deref(),
        }
    }
}

/// Explicit header choices that bypass substring matching
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnOverrides {
    pub name: Option<String>,
    pub primary_genre: Option<String>,
    pub director: Option<String>,
    pub release_year: Option<String>,
    pub synopsis: Option<String>,
    pub keywords: Option<String>,
    pub cast: Option<String>,
    pub age_rating: Option<String>,
    pub rating: Option<String>,
}

impl ColumnOverrides {
    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Name => &self.name,
            Field::PrimaryGenre => &self.primary_genre,
            Field::Director => &self.director,
            Field::ReleaseYear => &self.release_year,
            Field::Synopsis => &self.synopsis,
            Field::Keywords => &self.keywords,
            Field::Cast => &self.cast,
            Field::AgeRating => &self.age_rating,
            Field::Rating => &self.rating,
        };
        value.as_deref()
    }
}

/// In-memory table of movie rows with named columns
///
/// Headers are trimmed on construction. Rows keep the order of the source and
/// may be shorter than the header row; missing cells read as empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Catalog {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: headers.into_iter().map(|h| h.trim().to_string()).collect(),
            rows,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, header: &str) -> bool {
        self.column_index(header).is_some()
    }

    fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Materializes every row through `mapping`
    ///
    /// Columns absent from the table read as empty strings, except rating
    /// which reads as "0".
    pub fn records(&self, mapping: &ColumnMapping) -> Vec<MovieRecord> {
        let index = |field: Field| mapping.get(field).and_then(|h| self.column_index(h));
        let columns: Vec<(Field, Option<usize>)> =
            Field::ALL.iter().map(|&f| (f, index(f))).collect();

        self.rows
            .iter()
            .map(|row| {
                let mut record = MovieRecord::default();
                for &(field, idx) in &columns {
                    let value = match idx {
                        Some(i) => row.get(i).map(String::as_str).unwrap_or(""),
                        None if field == Field::Rating => "0",
                        None => "",
                    };
                    record.set(field, value.to_string());
                }
                record
            })
            .collect()
    }

    /// Distinct values of the mapped name column, in catalog order
    pub fn names(&self, mapping: &ColumnMapping) -> Vec<String> {
        let Some(idx) = self.column_index(&mapping.name) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter_map(|row| row.get(idx))
            .filter(|name| seen.insert(name.as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> ColumnMapping {
        ColumnMapping {
            name: "Name".to_string(),
            primary_genre: "Primary Genre".to_string(),
            director: "Director".to_string(),
            release_year: "Year".to_string(),
            synopsis: "Synopsis".to_string(),
            keywords: "Keywords".to_string(),
            cast: "Cast".to_string(),
            age_rating: "Age Rating".to_string(),
            rating: None,
        }
    }

    #[test]
    fn test_headers_are_trimmed() {
        let catalog = Catalog::new(vec![" Name ".to_string(), "Director\t".to_string()], vec![]);
        assert_eq!(catalog.headers(), &["Name", "Director"]);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_records_default_missing_columns() {
        let catalog = Catalog::new(
            vec!["Name".to_string(), "Primary Genre".to_string()],
            vec![vec!["Heat".to_string(), "Crime".to_string()]],
        );
        let records = catalog.records(&mapping());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Heat");
        assert_eq!(records[0].primary_genre, "Crime");
        assert_eq!(records[0].director, "");
        assert_eq!(records[0].keywords, "");
        assert_eq!(records[0].rating, "0");
    }

    #[test]
    fn test_records_short_row_reads_empty() {
        let mut m = mapping();
        m.rating = Some("Rating".to_string());
        let catalog = Catalog::new(
            vec!["Name".to_string(), "Rating".to_string()],
            vec![vec!["Heat".to_string()]],
        );
        let records = catalog.records(&m);
        assert_eq!(records[0].rating, "");
    }

    #[test]
    fn test_names_are_unique_in_order() {
        let catalog = Catalog::new(
            vec!["Name".to_string()],
            vec![
                vec!["Heat".to_string()],
                vec!["Alien".to_string()],
                vec!["Heat".to_string()],
            ],
        );
        assert_eq!(catalog.names(&mapping()), vec!["Heat", "Alien"]);
    }

    #[test]
    fn test_field_fallbacks() {
        assert_eq!(Field::ReleaseYear.fallback_label(), Some("Theatrical Release Year"));
        assert_eq!(Field::Rating.fallback_label(), None);
        assert!(Field::Director.is_required());
        assert!(!Field::Cast.is_required());
    }
}
