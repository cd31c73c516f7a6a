//! Badge entities associated one-to-one with a student.

use crate::ids::{BadgeId, StudentId};
use serde::{Deserialize, Serialize};

/// An access badge.
///
/// The badge side owns the association; the student only holds a
/// back-reference. Deleting a student leaves its badge row untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    /// Surrogate key, present once persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BadgeId>,
    /// Printed serial of the physical badge.
    pub serial: Option<String>,
    /// The student this badge was issued to.
    pub student_id: Option<StudentId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_serde_roundtrip() {
        let badge = Badge {
            id: Some(BadgeId(9)),
            serial: Some("B-00421".into()),
            student_id: Some(StudentId(3)),
        };
        let json = serde_json::to_string(&badge).unwrap();
        let back: Badge = serde_json::from_str(&json).unwrap();
        assert_eq!(back, badge);
    }
}
