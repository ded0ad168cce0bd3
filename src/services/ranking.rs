use crate::{
    models::{Catalog, ColumnMapping, MovieRecord, RankOutcome, ScoredCandidate},
    services::similarity,
};

/// Number of recommendations returned when the caller does not ask for a count
pub const DEFAULT_COUNT: usize = 5;

/// Ranks every other movie in `catalog` by similarity to `reference_name`
///
/// The first row whose name equals `reference_name` is the reference. All rows
/// sharing that name are excluded from the candidates. Candidates are sorted by
/// descending score; ties keep catalog order. At most `count` are returned.
pub fn rank(
    reference_name: &str,
    catalog: &Catalog,
    mapping: &ColumnMapping,
    count: usize,
) -> RankOutcome {
    let records = catalog.records(mapping);
    rank_records(reference_name, records, count)
}

/// Ranking over records that have already been read through a column mapping
pub fn rank_records(reference_name: &str, records: Vec<MovieRecord>, count: usize) -> RankOutcome {
    let Some(reference) = records.iter().find(|r| r.name == reference_name).cloned() else {
        tracing::info!(reference = %reference_name, "Reference movie not found in catalog");
        return RankOutcome::NotFound;
    };

    let mut scored: Vec<ScoredCandidate> = records
        .into_iter()
        .filter(|candidate| candidate.name != reference.name)
        .map(|candidate| {
            let breakdown = similarity::score(&reference, &candidate);
            ScoredCandidate::new(candidate, breakdown)
        })
        .collect();

    // Vec::sort_by is stable, so equal scores stay in catalog order
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(count);

    tracing::debug!(
        reference = %reference_name,
        returned = scored.len(),
        top_score = scored.first().map(|c| c.score),
        "Ranked catalog"
    );

    RankOutcome::Ranked(scored)
}
