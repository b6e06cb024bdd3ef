//! Mentor entity

use serde::{Deserialize, Serialize};

use crate::value_objects::{CohortId, MentorId};

/// A mentor and the cohorts they mentor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentor {
    /// Unique identifier
    pub id: MentorId,
    /// Display handle, used in logs and digests
    pub handle: String,
    /// Cohorts this mentor is assigned to
    pub cohorts: Vec<CohortId>,
}

impl Mentor {
    /// Create a new mentor with no cohort assignments
    pub fn new(id: MentorId, handle: impl Into<String>) -> Self {
        Self {
            id,
            handle: handle.into(),
            cohorts: Vec::new(),
        }
    }

    /// Assign a cohort to this mentor
    #[must_use]
    pub fn with_cohort(mut self, cohort: CohortId) -> Self {
        self.cohorts.push(cohort);
        self
    }

    /// Whether this mentor mentors the given cohort
    pub fn mentors(&self, cohort: CohortId) -> bool {
        self.cohorts.contains(&cohort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentor_cohort_assignment() {
        let alpha = CohortId::new();
        let beta = CohortId::new();
        let mentor = Mentor::new(MentorId::new(), "ada").with_cohort(alpha);
        assert!(mentor.mentors(alpha));
        assert!(!mentor.mentors(beta));
    }
}
