use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::model::TopicRecord;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectionError {
    #[error("topics per category must be > 0")]
    InvalidPerCategory,
}

//
// ─── SEED ──────────────────────────────────────────────────────────────────────
//

/// Seed for a reproducible pick.
///
/// Any string works; the daily pick uses the ISO date so every render on the same
/// day shows the same topics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SampleSeed(String);

impl SampleSeed {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Seed for a calendar day, e.g. `"2024-06-01"`.
    #[must_use]
    pub fn for_day(day: NaiveDate) -> Self {
        Self(day.format("%Y-%m-%d").to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn rng(&self) -> StdRng {
        let digest = Sha256::digest(self.0.as_bytes());
        let mut seed = [0u8; 32];
        seed.copy_from_slice(&digest);
        StdRng::from_seed(seed)
    }
}

impl fmt::Display for SampleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//
// ─── SELECTION ─────────────────────────────────────────────────────────────────
//

/// Expand the named categories into topic records.
///
/// Output follows the order of `categories`, then catalog order within each
/// category. Unknown names contribute nothing; a name listed twice contributes
/// its topics twice.
#[must_use]
pub fn flatten<S: AsRef<str>>(catalog: &Catalog, categories: &[S]) -> Vec<TopicRecord> {
    categories
        .iter()
        .flat_map(|category| {
            let category = category.as_ref();
            catalog
                .topics_in(category)
                .iter()
                .map(move |t| TopicRecord::new(category, t.title.as_str(), t.description.as_str()))
        })
        .collect()
}

/// Pick up to `per_category` records from every category present in `records`.
///
/// Records are grouped by category in order of first appearance. Each group is
/// shuffled with a generator created for this call only (seeded from `seed`, or
/// from OS entropy when `seed` is `None`) and truncated. Groups are emitted in
/// group order.
///
/// # Errors
///
/// Returns `SelectionError::InvalidPerCategory` when `per_category` is zero.
pub fn sample(
    records: &[TopicRecord],
    per_category: u32,
    seed: Option<&SampleSeed>,
) -> Result<Vec<TopicRecord>, SelectionError> {
    if per_category == 0 {
        return Err(SelectionError::InvalidPerCategory);
    }
    let take_cap = usize::try_from(per_category).unwrap_or(usize::MAX);

    let mut rng = match seed {
        Some(seed) => seed.rng(),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut selected = Vec::new();
    for mut pool in group_by_category(records) {
        pool.shuffle(&mut rng);
        let take = take_cap.min(pool.len());
        selected.extend(pool.into_iter().take(take));
    }
    Ok(selected)
}

fn group_by_category(records: &[TopicRecord]) -> Vec<Vec<TopicRecord>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<TopicRecord>> = Vec::new();
    for record in records {
        let slot = *index.entry(record.category.as_str()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(record.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn titles(records: &[TopicRecord]) -> Vec<&str> {
        records.iter().map(|r| r.title.as_str()).collect()
    }

    fn count_in(records: &[TopicRecord], category: &str) -> usize {
        records.iter().filter(|r| r.category == category).count()
    }

    #[test]
    fn flatten_follows_requested_order() {
        let catalog = Catalog::builtin();
        let records = flatten(&catalog, &["SQL", "Power BI"]);
        assert_eq!(
            titles(&records),
            vec!["JOINs", "Window Functions", "DAX Basics", "Data Modeling"]
        );
        assert_eq!(records[0].category, "SQL");
        assert_eq!(
            records[0].description,
            "Combine rows from two or more tables."
        );
    }

    #[test]
    fn flatten_skips_unknown_and_repeats_duplicates() {
        let catalog = Catalog::builtin();
        assert!(flatten::<&str>(&catalog, &[]).is_empty());
        assert!(flatten(&catalog, &["Rust"]).is_empty());
        assert_eq!(flatten(&catalog, &["SQL", "Rust", "SQL"]).len(), 4);
    }

    #[test]
    fn python_scenario_is_reproducible() {
        let catalog = Catalog::builtin();
        let records = flatten(&catalog, &["Python"]);
        assert_eq!(records.len(), 4);

        let seed = SampleSeed::new("2024-06-01");
        let first = sample(&records, 2, Some(&seed)).unwrap();
        let second = sample(&records, 2, Some(&seed)).unwrap();

        assert_eq!(first.len(), 2);
        assert!(first.iter().all(|r| r.category == "Python"));
        assert_eq!(first, second);
    }

    #[test]
    fn seeded_sample_is_deterministic_for_whole_catalog() {
        let catalog = Catalog::builtin();
        let names: Vec<&str> = catalog.category_names().collect();
        let records = flatten(&catalog, &names);
        let seed = SampleSeed::for_day(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        for per_category in 1..=5 {
            assert_eq!(
                sample(&records, per_category, Some(&seed)).unwrap(),
                sample(&records, per_category, Some(&seed)).unwrap()
            );
        }
    }

    #[test]
    fn every_category_gets_min_of_cap_and_available() {
        let catalog = Catalog::builtin();
        let names: Vec<&str> = catalog.category_names().collect();
        let records = flatten(&catalog, &names);

        for per_category in 1..=5u32 {
            let picked = sample(&records, per_category, None).unwrap();
            for name in &names {
                let available = catalog.topics_in(name).len();
                assert_eq!(
                    count_in(&picked, name),
                    available.min(per_category as usize),
                    "category {name} with cap {per_category}"
                );
            }
        }
    }

    #[test]
    fn groups_keep_first_appearance_order() {
        let catalog = Catalog::builtin();
        let records = flatten(&catalog, &["NLP", "SQL", "Python"]);
        let picked = sample(&records, 1, Some(&SampleSeed::new("order"))).unwrap();
        let categories: Vec<&str> = picked.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, vec!["NLP", "SQL", "Python"]);
    }

    #[test]
    fn no_cross_category_leakage() {
        let catalog = Catalog::builtin();
        let records = flatten(&catalog, &["SQL", "NLP"]);
        let picked = sample(&records, 5, None).unwrap();
        let allowed: HashSet<&str> = ["SQL", "NLP"].into_iter().collect();
        assert!(picked.iter().all(|r| allowed.contains(r.category.as_str())));
        assert_eq!(picked.len(), 5);
    }

    #[test]
    fn picks_are_distinct_within_a_category() {
        let catalog = Catalog::builtin();
        let records = flatten(&catalog, &["Machine Learning"]);
        let picked = sample(&records, 4, Some(&SampleSeed::new("x"))).unwrap();
        let unique: HashSet<&str> = titles(&picked).into_iter().collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn zero_per_category_is_rejected() {
        let records = flatten(&Catalog::builtin(), &["SQL"]);
        assert_eq!(
            sample(&records, 0, None),
            Err(SelectionError::InvalidPerCategory)
        );
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(sample(&[], 3, None).unwrap().is_empty());
        assert!(
            sample(&[], 3, Some(&SampleSeed::new("2024-06-01")))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn different_days_do_not_all_agree() {
        let catalog = Catalog::builtin();
        let names: Vec<&str> = catalog.category_names().collect();
        let records = flatten(&catalog, &names);
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let picks: HashSet<Vec<String>> = (0..30)
            .map(|offset| {
                let day = start + chrono::Duration::days(offset);
                sample(&records, 1, Some(&SampleSeed::for_day(day)))
                    .unwrap()
                    .into_iter()
                    .map(|r| r.title)
                    .collect()
            })
            .collect();
        assert!(picks.len() > 1);
    }

    #[test]
    fn day_seed_uses_iso_format() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(SampleSeed::for_day(day).as_str(), "2024-06-01");
        assert_eq!(SampleSeed::for_day(day).to_string(), "2024-06-01");
    }
}
