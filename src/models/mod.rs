pub mod catalog;
pub mod movie;
pub mod recommendation;

pub use catalog::{Catalog, ColumnMapping, ColumnOverrides, Field};
pub use movie::MovieRecord;
pub use recommendation::{RankOutcome, RecommendationResponse, ScoreBreakdown, ScoredCandidate};
