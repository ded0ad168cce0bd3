use serde::Serialize;

use super::MovieRecord;

/// Weighted contribution of each similarity dimension
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub genre: f64,
    pub director: f64,
    pub keywords: f64,
    pub cast: f64,
    pub year: f64,
    pub rating: f64,
}

impl ScoreBreakdown {
    /// Composite score
    pub fn total(&self) -> f64 {
        self.genre + self.director + self.keywords + self.cast + self.year + self.rating
    }
}

/// A recommended movie with its score and the attributes needed to display it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub name: String,
    pub primary_genre: String,
    pub director: String,
    pub release_year: String,
    pub synopsis: String,
    pub cast: String,
    pub age_rating: String,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

impl ScoredCandidate {
    pub fn new(record: MovieRecord, breakdown: ScoreBreakdown) -> Self {
        Self {
            name: record.name,
            primary_genre: record.primary_genre,
            director: record.director,
            release_year: record.release_year,
            synopsis: record.synopsis,
            cast: record.cast,
            age_rating: record.age_rating,
            score: breakdown.total(),
            breakdown,
        }
    }
}

/// Result of ranking a catalog against a reference title
#[derive(Debug, Clone, PartialEq)]
pub enum RankOutcome {
    /// Best candidates first. May be empty when the catalog has no other rows.
    Ranked(Vec<ScoredCandidate>),
    /// No row carries the reference title
    NotFound,
}

impl RankOutcome {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RankOutcome::NotFound)
    }

    pub fn candidates(&self) -> &[ScoredCandidate] {
        match self {
            RankOutcome::Ranked(candidates) => candidates,
            RankOutcome::NotFound => &[],
        }
    }

    pub fn into_candidates(self) -> Vec<ScoredCandidate> {
        match self {
            RankOutcome::Ranked(candidates) => candidates,
            RankOutcome::NotFound => Vec::new(),
        }
    }
}

/// Response body for a recommendation request
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub reference: String,
    pub recommendations: Vec<ScoredCandidate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_total() {
        let breakdown = ScoreBreakdown {
            genre: 0.23,
            year: 0.07,
            ..Default::default()
        };
        assert!((breakdown.total() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_not_found_has_no_candidates() {
        let outcome = RankOutcome::NotFound;
        assert!(outcome.is_not_found());
        assert!(outcome.candidates().is_empty());
        assert!(outcome.into_candidates().is_empty());
    }

    #[test]
    fn test_candidate_serializes_breakdown() {
        let record = MovieRecord {
            name: "Heat".to_string(),
            director: "Michael Mann".to_string(),
            ..Default::default()
        };
        let candidate = ScoredCandidate::new(
            record,
            ScoreBreakdown {
                director: 0.16,
                ..Default::default()
            },
        );
        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["name"], "Heat");
        assert_eq!(json["score"], 0.16);
        assert_eq!(json["breakdown"]["director"], 0.16);
    }
}
