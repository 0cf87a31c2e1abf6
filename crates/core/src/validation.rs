//! Invariants a scorecard must satisfy before it can be submitted, plus
//! input checks applied at the API boundary.

use crate::error::CoreError;
use crate::scorecard::{Perspective, Scorecard};

/// Upper bound for a single KRA's weightage.
pub const MAX_KRA_WEIGHTAGE: u32 = 100;

/// The KRA weightages of a submittable scorecard must add up to exactly this.
pub const REQUIRED_TOTAL_WEIGHTAGE: u32 = 100;

/// Maximum length for a reviewer comment.
pub const MAX_COMMENT_LENGTH: usize = 2_000;

/// Sum of KRA weightage across all perspectives. Saturates rather than
/// wrapping, so an out-of-range document can never total exactly 100.
pub fn total_weightage(doc: &Scorecard) -> u32 {
    doc.perspectives()
        .iter()
        .fold(0u32, |acc, p| acc.saturating_add(p.kra.weightage))
}

/// Whether the document satisfies the submit-for-review invariant.
pub fn is_submittable(doc: &Scorecard) -> bool {
    total_weightage(doc) == REQUIRED_TOTAL_WEIGHTAGE
}

pub fn ensure_submittable(doc: &Scorecard) -> Result<(), CoreError> {
    let total = total_weightage(doc);
    if total == REQUIRED_TOTAL_WEIGHTAGE {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Total weightage of all perspectives must be {REQUIRED_TOTAL_WEIGHTAGE}% (currently {total}%)"
        )))
    }
}

/// A single KRA weightage must lie in `0..=MAX_KRA_WEIGHTAGE`.
pub fn validate_weightage(weightage: u32) -> Result<(), CoreError> {
    if weightage > MAX_KRA_WEIGHTAGE {
        return Err(CoreError::Validation(format!(
            "KRA weightage must be between 0 and {MAX_KRA_WEIGHTAGE} (got {weightage})"
        )));
    }
    Ok(())
}

pub fn validate_perspectives(perspectives: &[Perspective]) -> Result<(), CoreError> {
    for perspective in perspectives {
        validate_weightage(perspective.kra.weightage).map_err(|e| match e {
            CoreError::Validation(msg) => {
                CoreError::Validation(format!("Perspective '{}': {msg}", perspective.name))
            }
            other => other,
        })?;
    }
    Ok(())
}

/// Validate a reviewer comment's length.
pub fn validate_comment(comment: &str) -> Result<(), CoreError> {
    if comment.chars().count() > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment exceeds maximum length of {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Actor;
    use crate::roles::Role;
    use crate::scorecard::Perspective;
    use crate::types::Date;

    fn doc_with(weights: &[u32]) -> Scorecard {
        let owner = Actor {
            id: 1,
            name: "Saurabh".into(),
            role: Role::Contributor,
            manager_id: None,
            level: "IT Op Ex".into(),
            department: "IT".into(),
            date_of_joining: Date::from_ymd_opt(2022, 1, 10).unwrap(),
        };
        let perspectives = weights
            .iter()
            .enumerate()
            .map(|(i, w)| Perspective::new(format!("P{i}"), *w))
            .collect();
        Scorecard::new(&owner, None, perspectives, chrono::Utc::now()).unwrap()
    }

    #[test]
    fn exactly_one_hundred_is_submittable() {
        let doc = doc_with(&[20, 20, 20, 20, 20]);
        assert_eq!(total_weightage(&doc), 100);
        assert!(is_submittable(&doc));
        assert!(ensure_submittable(&doc).is_ok());
    }

    #[test]
    fn under_weight_is_rejected() {
        let doc = doc_with(&[20, 20, 20, 20]);
        assert!(!is_submittable(&doc));
        let err = ensure_submittable(&doc).unwrap_err();
        assert!(err.to_string().contains("currently 80%"));
    }

    #[test]
    fn over_weight_is_rejected() {
        assert!(!is_submittable(&doc_with(&[60, 50])));
    }

    #[test]
    fn empty_document_is_not_submittable() {
        let doc = doc_with(&[]);
        assert_eq!(total_weightage(&doc), 0);
        assert!(!is_submittable(&doc));
    }

    #[test]
    fn single_perspective_at_full_weight() {
        assert!(is_submittable(&doc_with(&[100])));
    }

    #[test]
    fn weightage_range_is_enforced() {
        assert!(validate_weightage(0).is_ok());
        assert!(validate_weightage(MAX_KRA_WEIGHTAGE).is_ok());
        assert!(matches!(validate_weightage(101), Err(CoreError::Validation(_))));
        assert!(validate_weightage(u32::MAX).is_err());
    }

    #[test]
    fn out_of_range_perspective_is_named() {
        let perspectives = vec![Perspective::new("Finance", 50), Perspective::new("Customer", 250)];
        let err = validate_perspectives(&perspectives).unwrap_err();
        assert!(err.to_string().contains("Customer"));
        assert!(err.to_string().contains("got 250"));
    }

    #[test]
    fn stored_overflowing_weights_saturate_instead_of_wrapping() {
        // [u32::MAX, 101] wraps to exactly 100 under plain addition.
        let mut json = serde_json::to_value(doc_with(&[0, 0])).unwrap();
        json["perspectives"][0]["kra"]["weightage"] = u32::MAX.into();
        json["perspectives"][1]["kra"]["weightage"] = 101.into();
        let doc: Scorecard = serde_json::from_value(json).unwrap();

        assert_eq!(total_weightage(&doc), u32::MAX);
        assert!(!is_submittable(&doc));
        assert!(ensure_submittable(&doc).is_err());
    }

    #[test]
    fn comment_length_limit() {
        assert!(validate_comment("missing targets").is_ok());
        assert!(validate_comment(&"a".repeat(MAX_COMMENT_LENGTH)).is_ok());
        assert!(validate_comment(&"a".repeat(MAX_COMMENT_LENGTH + 1)).is_err());
    }
}
