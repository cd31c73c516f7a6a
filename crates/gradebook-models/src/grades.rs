//! Grade entities owned by a student.

use crate::disciplines::Discipline;
use crate::ids::GradeId;
use serde::{Deserialize, Serialize};

/// A grade: one discipline paired with an optional score.
///
/// Owned by exactly one student. A slot with no score is "ungraded"; it still
/// counts toward the average-grade divisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    /// Surrogate key, present once persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<GradeId>,
    pub discipline: Discipline,
    pub score: Option<i32>,
}

impl Grade {
    /// An ungraded slot for the given discipline.
    pub fn new(discipline: Discipline) -> Self {
        Self {
            id: None,
            discipline,
            score: None,
        }
    }

    /// A scored grade for the given discipline.
    pub fn scored(discipline: Discipline, score: i32) -> Self {
        Self {
            id: None,
            discipline,
            score: Some(score),
        }
    }

    /// Whether a score has been recorded.
    #[inline]
    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }
}
