//! Roster state and the selection filter.
//!
//! [`RosterState`] is the single owned copy of the candidate list. It is
//! validated on construction and on every edit, so downstream code can trust
//! that ids are unique and scores are finite and non-negative.
//! [`SelectionFilter`] is the explicit set of excluded ids supplied by the
//! exclusion UI; the roster never re-derives exclusion on its own.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::candidate::{Candidate, CandidateId};
use crate::error::InputError;

/// Ids currently excluded from the wheel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionFilter {
    excluded: BTreeSet<CandidateId>,
}

impl SelectionFilter {
    /// Creates an empty filter (nobody excluded).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter excluding the given ids.
    pub fn excluding<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<CandidateId>,
    {
        Self {
            excluded: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `id` is excluded.
    #[must_use]
    pub fn is_excluded(&self, id: &CandidateId) -> bool {
        self.excluded.contains(id)
    }

    /// Sets or clears the exclusion of `id`. Returns true if anything changed.
    pub fn set_excluded(&mut self, id: CandidateId, excluded: bool) -> bool {
        if excluded {
            self.excluded.insert(id)
        } else {
            self.excluded.remove(&id)
        }
    }

    /// Flips the exclusion of `id`. Returns the new state.
    pub fn toggle(&mut self, id: CandidateId) -> bool {
        if self.excluded.remove(&id) {
            false
        } else {
            self.excluded.insert(id);
            true
        }
    }

    /// Excluded ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &CandidateId> {
        self.excluded.iter()
    }

    /// Number of excluded ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.excluded.len()
    }

    /// Returns true if nobody is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.excluded.is_empty()
    }
}

/// The validated, ordered candidate list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterState {
    candidates: Vec<Candidate>,
}

impl RosterState {
    /// Build a roster, rejecting duplicate ids and invalid scores.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::DuplicateCandidate`] or
    /// [`InputError::InvalidScore`].
    pub fn new(candidates: Vec<Candidate>) -> Result<Self, InputError> {
        validate(&candidates)?;
        Ok(Self { candidates })
    }

    /// All candidates in roster order, including excluded ones.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Look up a candidate by id.
    #[must_use]
    pub fn get(&self, id: &CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| &c.id == id)
    }

    /// Returns true if `id` is on the roster.
    #[must_use]
    pub fn contains(&self, id: &CandidateId) -> bool {
        self.get(id).is_some()
    }

    /// Snapshot of the candidates that enter the probability engine.
    ///
    /// A candidate is active when neither its own `excluded` flag nor the
    /// filter excludes it. Roster order is preserved.
    #[must_use]
    pub fn active(&self, filter: &SelectionFilter) -> Vec<Candidate> {
        self.candidates
            .iter()
            .filter(|c| !c.excluded && !filter.is_excluded(&c.id))
            .cloned()
            .collect()
    }

    /// Add a candidate at the end of the roster.
    ///
    /// # Errors
    ///
    /// Same as [`RosterState::new`]; the roster is unchanged on error.
    pub fn push(&mut self, candidate: Candidate) -> Result<(), InputError> {
        check_score(&candidate)?;
        if self.contains(&candidate.id) {
            return Err(InputError::DuplicateCandidate(candidate.id));
        }
        self.candidates.push(candidate);
        Ok(())
    }

    /// Remove a candidate. Returns it if it was present.
    pub fn remove(&mut self, id: &CandidateId) -> Option<Candidate> {
        let idx = self.candidates.iter().position(|c| &c.id == id)?;
        Some(self.candidates.remove(idx))
    }

    /// Replace a candidate's raw score.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::UnknownCandidate`] or
    /// [`InputError::InvalidScore`]; the roster is unchanged on error.
    pub fn set_score(&mut self, id: &CandidateId, raw_score: f64) -> Result<(), InputError> {
        let candidate = self
            .candidates
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| InputError::UnknownCandidate(id.clone()))?;
        check_score(&Candidate::new(id.clone(), raw_score))?;
        candidate.raw_score = raw_score;
        Ok(())
    }

    /// Number of candidates, including excluded ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns true if the roster has no candidates at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

fn validate(candidates: &[Candidate]) -> Result<(), InputError> {
    let mut seen = BTreeSet::new();
    for c in candidates {
        check_score(c)?;
        if !seen.insert(&c.id) {
            return Err(InputError::DuplicateCandidate(c.id.clone()));
        }
    }
    Ok(())
}

fn check_score(c: &Candidate) -> Result<(), InputError> {
    if c.raw_score.is_finite() && c.raw_score >= 0.0 {
        Ok(())
    } else {
        Err(InputError::InvalidScore {
            id: c.id.clone(),
            score: c.raw_score,
        })
    }
}

/// Parse a spreadsheet score cell.
///
/// Accepts `.` or `,` as the decimal separator and surrounding whitespace.
/// Anything that is not a plain non-negative decimal (blank cells, `NaN`,
/// signs, exponents, text) counts as `0.0`.
///
/// # Example
///
/// ```
/// use sector::parse_score;
///
/// assert_eq!(parse_score("4,5"), 4.5);
/// assert_eq!(parse_score(" 3 "), 3.0);
/// assert_eq!(parse_score("n/a"), 0.0);
/// ```
#[must_use]
pub fn parse_score(cell: &str) -> f64 {
    let normalized = cell.trim().replace(',', ".");
    let mut dots = 0;
    let plain = !normalized.is_empty()
        && normalized.chars().all(|ch| match ch {
            '.' => {
                dots += 1;
                dots == 1
            }
            _ => ch.is_ascii_digit(),
        })
        && normalized != ".";

    if plain {
        normalized.parse().unwrap_or(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> RosterState {
        RosterState::new(vec![
            Candidate::new("ada", 1.0),
            Candidate::new("bob", 2.0),
            Candidate::new("cyd", 3.0).excluded(),
        ])
        .unwrap()
    }

    mod validation_tests {
        use super::*;

        #[test]
        fn rejects_duplicates() {
            let result = RosterState::new(vec![Candidate::new("a", 1.0), Candidate::new("a", 2.0)]);
            assert_eq!(result, Err(InputError::DuplicateCandidate("a".into())));
        }

        #[test]
        fn rejects_negative_and_nan() {
            assert!(RosterState::new(vec![Candidate::new("a", -1.0)]).is_err());
            assert!(RosterState::new(vec![Candidate::new("a", f64::NAN)]).is_err());
            assert!(RosterState::new(vec![Candidate::new("a", f64::INFINITY)]).is_err());
        }

        #[test]
        fn accepts_zero_score() {
            assert!(RosterState::new(vec![Candidate::new("a", 0.0)]).is_ok());
        }

        #[test]
        fn push_keeps_roster_on_error() {
            let mut r = roster();
            assert!(r.push(Candidate::new("ada", 5.0)).is_err());
            assert!(r.push(Candidate::new("dee", -5.0)).is_err());
            assert_eq!(r.len(), 3);
            assert!(r.push(Candidate::new("dee", 5.0)).is_ok());
            assert_eq!(r.len(), 4);
        }

        #[test]
        fn set_score_validates() {
            let mut r = roster();
            assert!(r.set_score(&"ada".into(), -2.0).is_err());
            assert_eq!(r.get(&"ada".into()).unwrap().raw_score, 1.0);
            assert!(r.set_score(&"ada".into(), 9.0).is_ok());
            assert_eq!(r.get(&"ada".into()).unwrap().raw_score, 9.0);
            assert_eq!(
                r.set_score(&"zed".into(), 1.0),
                Err(InputError::UnknownCandidate("zed".into()))
            );
        }
    }

    mod filter_tests {
        use super::*;

        #[test]
        fn active_honours_flag_and_filter() {
            let r = roster();
            let ids: Vec<_> = r
                .active(&SelectionFilter::new())
                .into_iter()
                .map(|c| c.id)
                .collect();
            assert_eq!(ids, vec![CandidateId::new("ada"), CandidateId::new("bob")]);

            let filter = SelectionFilter::excluding(["ada"]);
            let ids: Vec<_> = r.active(&filter).into_iter().map(|c| c.id).collect();
            assert_eq!(ids, vec![CandidateId::new("bob")]);
        }

        #[test]
        fn toggle_and_set() {
            let mut filter = SelectionFilter::new();
            assert!(filter.toggle("ada".into()));
            assert!(filter.is_excluded(&"ada".into()));
            assert!(!filter.toggle("ada".into()));
            assert!(filter.is_empty());

            assert!(filter.set_excluded("bob".into(), true));
            assert!(!filter.set_excluded("bob".into(), true));
            assert!(filter.set_excluded("bob".into(), false));
        }

        #[test]
        fn remove_drops_candidate() {
            let mut r = roster();
            assert!(r.remove(&"bob".into()).is_some());
            assert!(r.remove(&"bob".into()).is_none());
            assert!(!r.contains(&"bob".into()));
        }
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn decimal_separators() {
            assert_eq!(parse_score("4.5"), 4.5);
            assert_eq!(parse_score("4,5"), 4.5);
            assert_eq!(parse_score("10"), 10.0);
        }

        #[test]
        fn junk_is_zero() {
            for cell in ["", "   ", "nan", "NaN", "-3", "1.2.3", ".", "1e3", "abc"] {
                assert_eq!(parse_score(cell), 0.0, "cell {cell:?}");
            }
        }
    }
}
