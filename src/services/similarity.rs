//! Per-dimension similarity between two movie records
//!
//! Every function takes the reference value first and the candidate value
//! second, and returns a contribution in `0.0..=weight`. Categorical fields
//! score on exact equality, multi-valued fields on Jaccard overlap and ordinal
//! fields on linear distance decay.

use std::collections::HashSet;

use crate::models::{MovieRecord, ScoreBreakdown};

pub const GENRE_WEIGHT: f64 = 0.23;
pub const DIRECTOR_WEIGHT: f64 = 0.16;
pub const KEYWORD_WEIGHT: f64 = 0.155;
pub const CAST_WEIGHT: f64 = 0.185;
pub const YEAR_WEIGHT: f64 = 0.14;
pub const RATING_WEIGHT: f64 = 0.125;

/// Highest composite score a pair of records can reach
pub const MAX_SCORE: f64 =
    GENRE_WEIGHT + DIRECTOR_WEIGHT + KEYWORD_WEIGHT + CAST_WEIGHT + YEAR_WEIGHT + RATING_WEIGHT;

/// Distance at which year and rating similarity reach zero
const DECAY_SPAN: f64 = 10.0;

pub fn genre_similarity(genre1: &str, genre2: &str) -> f64 {
    if genre1 == genre2 {
        GENRE_WEIGHT
    } else {
        0.0
    }
}

pub fn director_similarity(director1: &str, director2: &str) -> f64 {
    if director1 == director2 {
        DIRECTOR_WEIGHT
    } else {
        0.0
    }
}

pub fn keyword_similarity(keywords1: &str, keywords2: &str) -> f64 {
    jaccard(keywords1, keywords2) * KEYWORD_WEIGHT
}

pub fn cast_similarity(cast1: &str, cast2: &str) -> f64 {
    jaccard(cast1, cast2) * CAST_WEIGHT
}

pub fn year_similarity(year1: &str, year2: &str) -> f64 {
    match (year1.trim().parse::<i64>(), year2.trim().parse::<i64>()) {
        (Ok(y1), Ok(y2)) => decay(y1.abs_diff(y2) as f64) * YEAR_WEIGHT,
        _ => 0.0,
    }
}

pub fn rating_similarity(rating1: &str, rating2: &str) -> f64 {
    match (rating1.trim().parse::<f64>(), rating2.trim().parse::<f64>()) {
        (Ok(r1), Ok(r2)) => decay((r1 - r2).abs()) * RATING_WEIGHT,
        _ => 0.0,
    }
}

/// Scores `candidate` against `reference` on all six dimensions
pub fn score(reference: &MovieRecord, candidate: &MovieRecord) -> ScoreBreakdown {
    ScoreBreakdown {
        genre: genre_similarity(&reference.primary_genre, &candidate.primary_genre),
        director: director_similarity(&reference.director, &candidate.director),
        keywords: keyword_similarity(&reference.keywords, &candidate.keywords),
        cast: cast_similarity(&reference.cast, &candidate.cast),
        year: year_similarity(&reference.release_year, &candidate.release_year),
        rating: rating_similarity(&reference.rating, &candidate.rating),
    }
}

/// Tokens of a ", "-separated list. A blank cell has no tokens.
fn tokens(value: &str) -> HashSet<&str> {
    if value.trim().is_empty() {
        return HashSet::new();
    }
    value.split(", ").collect()
}

/// Intersection over union of two token lists, 0 when either is empty
fn jaccard(a: &str, b: &str) -> f64 {
    let a = tokens(a);
    let b = tokens(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(&b).count();
    let union = a.union(&b).count();
    intersection as f64 / union as f64
}

/// 1 at distance 0, falling linearly to 0 at `DECAY_SPAN` and beyond. NaN yields 0.
fn decay(distance: f64) -> f64 {
    if distance <= DECAY_SPAN {
        1.0 - distance / DECAY_SPAN
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    fn record(genre: &str, director: &str, keywords: &str, cast: &str, year: &str, rating: &str) -> MovieRecord {
        MovieRecord {
            name: "Some Movie".to_string(),
            primary_genre: genre.to_string(),
            director: director.to_string(),
            keywords: keywords.to_string(),
            cast: cast.to_string(),
            release_year: year.to_string(),
            rating: rating.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_genre_is_exact_and_case_sensitive() {
        assert_close(genre_similarity("Drama", "Drama"), GENRE_WEIGHT);
        assert_close(genre_similarity("Drama", "drama"), 0.0);
        assert_close(genre_similarity("Drama", "Comedy"), 0.0);
    }

    #[test]
    fn test_director_equality() {
        assert_close(director_similarity("Greta Gerwig", "Greta Gerwig"), DIRECTOR_WEIGHT);
        assert_close(director_similarity("Greta Gerwig", "Noah Baumbach"), 0.0);
    }

    #[test]
    fn test_keyword_jaccard() {
        // {heist, crime} vs {crime, police, chase}: 1 shared of 4 total
        assert_close(
            keyword_similarity("heist, crime", "crime, police, chase"),
            0.25 * KEYWORD_WEIGHT,
        );
        assert_close(keyword_similarity("heist, crime", "crime, heist"), KEYWORD_WEIGHT);
    }

    #[test]
    fn test_empty_token_sets_score_zero() {
        assert_close(keyword_similarity("", ""), 0.0);
        assert_close(keyword_similarity("heist", ""), 0.0);
        assert_close(cast_similarity("", "Al Pacino"), 0.0);
        assert_close(cast_similarity("  ", "  "), 0.0);
    }

    #[test]
    fn test_tokens_split_on_comma_space_only() {
        // "heist,crime" is one token, disjoint from {heist, crime}
        assert_close(keyword_similarity("heist,crime", "heist, crime"), 0.0);
        assert_close(keyword_similarity("heist,crime", "heist,crime"), KEYWORD_WEIGHT);
        assert_close(
            cast_similarity("Al Pacino, Val Kilmer", "Al Pacino,Val Kilmer"),
            0.0,
        );
    }

    #[test]
    fn test_cast_jaccard() {
        assert_close(
            cast_similarity("Al Pacino, Robert De Niro", "Robert De Niro, Val Kilmer"),
            CAST_WEIGHT / 3.0,
        );
    }

    #[test]
    fn test_year_decay() {
        assert_close(year_similarity("2000", "2000"), YEAR_WEIGHT);
        assert_close(year_similarity("2000", "1995"), 0.07);
        assert_close(year_similarity("2000", "2010"), 0.0);
        assert_close(year_similarity("2000", "2011"), 0.0);
    }

    #[test]
    fn test_year_unparseable_scores_zero() {
        assert_close(year_similarity("2000", "unknown"), 0.0);
        assert_close(year_similarity("", "2000"), 0.0);
        assert_close(year_similarity("2000.5", "2000"), 0.0);
    }

    #[test]
    fn test_year_extreme_values_score_zero() {
        assert_close(year_similarity("9223372036854775807", "-1"), 0.0);
        assert_close(year_similarity("-9223372036854775808", "9223372036854775807"), 0.0);
        assert_close(
            year_similarity("9223372036854775807", "9223372036854775802"),
            0.07,
        );
    }

    #[test]
    fn test_rating_decay() {
        assert_close(rating_similarity("8.0", "7.5"), 0.11875);
        assert_close(rating_similarity("8", "8"), RATING_WEIGHT);
        assert_close(rating_similarity("0", "10"), 0.0);
        assert_close(rating_similarity("-5", "9"), 0.0);
    }

    #[test]
    fn test_rating_unparseable_scores_zero() {
        assert_close(rating_similarity("8.0", "N/A"), 0.0);
        assert_close(rating_similarity("NaN", "8.0"), 0.0);
    }

    #[test]
    fn test_identical_records_reach_max_score() {
        let movie = record("Crime", "Michael Mann", "heist, la", "Al Pacino", "1995", "8.3");
        let breakdown = score(&movie, &movie);
        assert_close(breakdown.total(), MAX_SCORE);
        assert!(breakdown.total() <= 1.0);
    }

    #[test]
    fn test_scores_stay_in_unit_range() {
        let movies = [
            record("Crime", "Michael Mann", "heist, la", "Al Pacino", "1995", "8.3"),
            record("Crime", "Michael Mann", "heist", "Al Pacino, Tom Cruise", "2004", "7.5"),
            record("Comedy", "", "", "", "abc", ""),
            record("", "", ", ,", "", "1890", "-3"),
        ];
        for a in &movies {
            for b in &movies {
                let total = score(a, b).total();
                assert!((0.0..=1.0).contains(&total), "score {total} out of range");
            }
        }
    }
}
