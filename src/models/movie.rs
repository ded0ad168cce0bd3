use serde::Serialize;

use super::Field;

/// One catalog row read through a column mapping
///
/// Values stay as the raw cell text. Numeric fields are parsed at scoring
/// time so that unparseable cells only cost their own dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MovieRecord {
    pub name: String,
    pub primary_genre: String,
    pub director: String,
    /// Comma-separated names
    pub cast: String,
    /// Comma-separated tags
    pub keywords: String,
    pub release_year: String,
    pub rating: String,
    pub synopsis: String,
    pub age_rating: String,
}

impl MovieRecord {
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::PrimaryGenre => self.primary_genre = value,
            Field::Director => self.director = value,
            Field::ReleaseYear => self.release_year = value,
            Field::Synopsis => self.synopsis = value,
            Field::Keywords => self.keywords = value,
            Field::Cast => self.cast = value,
            Field::AgeRating => self.age_rating = value,
            Field::Rating => self.rating = value,
        }
    }
}
