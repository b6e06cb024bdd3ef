//! Cohort entity

use serde::{Deserialize, Serialize};

use crate::value_objects::CohortId;

/// A named grouping of work items sharing a common track of instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cohort {
    /// Unique identifier
    pub id: CohortId,
    /// Display title
    pub title: String,
}

impl Cohort {
    /// Create a new cohort
    pub fn new(id: CohortId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}
