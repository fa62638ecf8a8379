//! Reduce an ambiguous candidate list to a single match.

use std::collections::BTreeSet;

use tracing::trace;

use crate::domain::entities::CandidateMatch;
use crate::domain::taxonomy::MAJOR_RANKS;

/// Tie-break cascade: group filter, best score, lowest rank, first returned.
#[derive(Debug, Clone, Default)]
pub struct Disambiguator {
    group_filter: BTreeSet<String>,
    prefer_lowest_rank: bool,
}

impl Disambiguator {
    pub fn new(group_filter: BTreeSet<String>, prefer_lowest_rank: bool) -> Self {
        Self {
            group_filter,
            prefer_lowest_rank,
        }
    }

    /// Returns at most one candidate. Lists of length 0 or 1 pass through.
    pub fn sieve(&self, candidates: Vec<CandidateMatch>) -> Vec<CandidateMatch> {
        if candidates.len() < 2 {
            return candidates;
        }

        let mut remaining = candidates;
        if !self.group_filter.is_empty() {
            remaining.retain(|c| c.belongs_to_any(&self.group_filter));
            if remaining.is_empty() {
                trace!("no candidate inside the configured groups");
                return remaining;
            }
        }

        remaining = best_score(remaining);
        if self.prefer_lowest_rank && remaining.len() > 1 {
            remaining = lowest_rank(remaining);
        }
        remaining.truncate(1);
        remaining
    }
}

fn best_score(candidates: Vec<CandidateMatch>) -> Vec<CandidateMatch> {
    let max = candidates
        .iter()
        .map(|c| c.score)
        .fold(f64::NEG_INFINITY, f64::max);
    let kept: Vec<_> = candidates
        .iter()
        .filter(|c| c.score == max)
        .cloned()
        .collect();
    if kept.is_empty() {
        candidates
    } else {
        kept
    }
}

/// Most specific major rank on the rank path, with its signed offset from the
/// end of the path.
fn rank_key(candidate: &CandidateMatch) -> Option<(usize, isize)> {
    let ranks: Vec<&str> = candidate.path_ranks().collect();
    let (major, rank) = MAJOR_RANKS
        .iter()
        .enumerate()
        .find(|(_, rank)| ranks.contains(rank))?;
    let position = ranks.iter().position(|r| r == rank)?;
    Some((major, position as isize - ranks.len() as isize))
}

fn lowest_rank(candidates: Vec<CandidateMatch>) -> Vec<CandidateMatch> {
    let keys: Vec<_> = candidates.iter().map(rank_key).collect();
    let Some(best) = keys.iter().flatten().min().copied() else {
        return candidates;
    };
    candidates
        .into_iter()
        .zip(keys)
        .filter(|(_, key)| *key == Some(best))
        .map(|(candidate, _)| candidate)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn candidate(name: &str, score: f64, ranks: &str, ids: &str) -> CandidateMatch {
        CandidateMatch {
            name_string: name.to_string(),
            canonical_form: Some(name.to_string()),
            score,
            classification_path: String::new(),
            classification_path_ranks: ranks.to_string(),
            classification_path_ids: ids.to_string(),
            data_source_id: 4,
            data_source_title: "NCBI".to_string(),
            match_type: 1,
            prescore: String::new(),
            taxon_id: String::new(),
            gni_uuid: String::new(),
        }
    }

    #[test]
    fn given_tied_scores_when_filtering_then_keeps_both_best() {
        let list: Vec<_> = [0.5, 0.9, 0.9, 0.3]
            .iter()
            .enumerate()
            .map(|(i, s)| candidate(&format!("n{i}"), *s, "", ""))
            .collect();
        let kept = best_score(list);
        let names: Vec<_> = kept.iter().map(|c| c.name_string.as_str()).collect();
        assert_eq!(names, vec!["n1", "n2"]);
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![candidate("only", 0.1, "", "")])]
    fn given_short_list_when_sieving_then_unchanged(#[case] list: Vec<CandidateMatch>) {
        let sieve = Disambiguator::new(BTreeSet::from(["99".to_string()]), true);
        assert_eq!(sieve.sieve(list.clone()), list);
    }

    #[test]
    fn given_group_filter_when_no_candidate_inside_then_resolves_to_nothing() {
        let sieve = Disambiguator::new(BTreeSet::from(["41".to_string()]), false);
        let list = vec![
            candidate("a", 1.0, "", "|11|22|33|44|5"),
            candidate("b", 1.0, "", "|11|22|33|44|6"),
        ];
        assert!(sieve.sieve(list).is_empty());
    }

    #[test]
    fn given_lowrank_when_sieving_then_prefers_species_over_genus() {
        let sieve = Disambiguator::new(BTreeSet::new(), true);
        let list = vec![
            candidate("genus hit", 1.0, "|kingdom|family|genus", ""),
            candidate("species hit", 1.0, "|kingdom|family|genus|species", ""),
        ];
        let kept = sieve.sieve(list);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name_string, "species hit");
    }

    #[rstest]
    #[case(["|genus|species", "|genus|species|subspecies"])]
    #[case(["|genus|species|subspecies", "|genus|species"])]
    fn given_same_major_rank_when_sieving_with_lowrank_then_deeper_path_wins(
        #[case] ranks: [&str; 2],
    ) {
        let sieve = Disambiguator::new(BTreeSet::new(), true);
        let list: Vec<_> = ranks
            .iter()
            .map(|r| candidate(r, 1.0, r, ""))
            .collect();
        let kept = sieve.sieve(list);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name_string, "|genus|species|subspecies");
    }

    #[test]
    fn given_species_paths_when_keying_then_offset_counts_from_path_end() {
        assert_eq!(
            rank_key(&candidate("a", 1.0, "|genus|species", "")),
            Some((0, -1))
        );
        assert_eq!(
            rank_key(&candidate("b", 1.0, "|genus|species|subspecies", "")),
            Some((0, -2))
        );
        assert_eq!(rank_key(&candidate("c", 1.0, "|clade", "")), None);
    }

    #[test]
    fn given_no_major_ranks_when_sieving_with_lowrank_then_first_wins() {
        let sieve = Disambiguator::new(BTreeSet::new(), true);
        let list = vec![
            candidate("x", 1.0, "|clade|no rank", ""),
            candidate("y", 1.0, "|clade", ""),
        ];
        assert_eq!(sieve.sieve(list)[0].name_string, "x");
    }

    #[test]
    fn given_sieved_list_when_sieving_again_then_idempotent() {
        let sieve = Disambiguator::new(BTreeSet::new(), true);
        let list = vec![
            candidate("a", 0.7, "|genus", ""),
            candidate("b", 0.9, "|genus", ""),
            candidate("c", 0.9, "|genus|species", ""),
        ];
        let once = sieve.sieve(list);
        assert_eq!(once[0].name_string, "c");
        assert_eq!(sieve.sieve(once.clone()), once);
    }
}
