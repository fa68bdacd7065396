//! Match merger — joins `JobListing`s with the scoring service's
//! `JobMatch`es and orders the result.

use std::cmp::Ordering;

use crate::models::job::{JobListing, JobMatch, RankedJob};

/// Joins matches with their listings on the string-normalized id and
/// sorts by descending score.
///
/// Matches whose id has no corresponding listing are silently dropped —
/// the scoring service may reference stale or filtered-out ids, and
/// that is not an error. The sort is stable: ties keep the relative
/// order in which the scoring service returned them.
pub fn merge(listings: &[JobListing], matches: Vec<JobMatch>) -> Vec<RankedJob> {
    let mut ranked: Vec<RankedJob> = matches
        .into_iter()
        .filter_map(|m| {
            listings.iter().find(|l| l.id == m.job_id).map(|listing| RankedJob {
                listing: listing.clone(),
                match_score: m.match_score,
                match_reasons: m.match_reasons,
                recommendations: m.recommendations,
            })
        })
        .collect();

    // Vec::sort_by is stable, which the tie-order guarantee relies on.
    ranked.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(Ordering::Equal)
    });

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str) -> JobListing {
        JobListing {
            id: id.to_string(),
            title: Some(format!("Cargo {id}")),
            description: None,
            region: None,
            department: None,
            excluding_requirements: None,
            desirable_knowledge: None,
            url: None,
            position_level: None,
        }
    }

    fn job_match(job_id: &str, match_score: f64) -> JobMatch {
        JobMatch {
            job_id: job_id.to_string(),
            match_score,
            match_reasons: vec![],
            recommendations: vec![],
        }
    }

    #[test]
    fn test_unmatched_ids_are_dropped_silently() {
        let listings = vec![listing("1"), listing("2")];
        let matches = vec![job_match("2", 50.0), job_match("9", 99.0)];

        let ranked = merge(&listings, matches);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].listing.id, "2");
        assert_eq!(ranked[0].match_score, 50.0);
    }

    #[test]
    fn test_sorted_by_descending_score() {
        let listings = vec![listing("a"), listing("b"), listing("c")];
        let matches = vec![
            job_match("a", 10.0),
            job_match("b", 90.0),
            job_match("c", 40.0),
        ];

        let ranked = merge(&listings, matches);
        let scores: Vec<f64> = ranked.iter().map(|r| r.match_score).collect();
        assert_eq!(scores, vec![90.0, 40.0, 10.0]);
    }

    #[test]
    fn test_ties_keep_relative_input_order() {
        let listings = vec![listing("a"), listing("b"), listing("c"), listing("d")];
        let matches = vec![
            job_match("a", 40.0),
            job_match("b", 90.0),
            job_match("c", 90.0),
            job_match("d", 10.0),
        ];

        let ranked = merge(&listings, matches);
        let order: Vec<&str> = ranked.iter().map(|r| r.listing.id.as_str()).collect();
        // The two 90-score entries stay in input order: b before c.
        assert_eq!(order, vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn test_no_matches_yields_empty_list() {
        let listings = vec![listing("1")];
        assert!(merge(&listings, vec![]).is_empty());
    }

    #[test]
    fn test_match_carries_reasons_and_recommendations() {
        let listings = vec![listing("5")];
        let matches = vec![JobMatch {
            job_id: "5".to_string(),
            match_score: 72.0,
            match_reasons: vec!["conocimientos de SQL".to_string()],
            recommendations: vec!["destaca tu experiencia en BI".to_string()],
        }];

        let ranked = merge(&listings, matches);
        assert_eq!(ranked[0].match_reasons.len(), 1);
        assert_eq!(ranked[0].recommendations.len(), 1);
    }
}
