//! internship-portal/crates/ip-core/src/lib.rs
//!
//! The central domain logic and interface definitions for the internship portal.

pub mod error;
pub mod models;
pub mod seed;
pub mod session;
pub mod store;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use session::Session;
pub use store::InternshipStore;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::models::*;
    use super::seed::*;
    use uuid::Uuid;

    #[test]
    fn test_progress_bounds() {
        assert_eq!(Progress::new(0).unwrap().value(), 0);
        assert_eq!(Progress::new(100).unwrap().value(), 100);
        assert!(matches!(
            Progress::new(101),
            Err(crate::PortalError::Validation(_))
        ));
    }

    #[test]
    fn test_progress_rejects_out_of_range_json() {
        let ok: Progress = serde_json::from_str("42").unwrap();
        assert_eq!(ok.value(), 42);
        assert!(serde_json::from_str::<Progress>("150").is_err());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_value(InternshipStatus::NotAssigned).unwrap();
        assert_eq!(json, serde_json::json!("not_assigned"));
        let json = serde_json::to_value(AssignmentStatus::InProgress).unwrap();
        assert_eq!(json, serde_json::json!("in_progress"));
        let json = serde_json::to_value(CertificateStatus::NotAvailable).unwrap();
        assert_eq!(json, serde_json::json!("not_available"));
    }

    #[test]
    fn test_assignment_status_transitions() {
        assert!(AssignmentStatus::Assigned.can_complete());
        assert!(AssignmentStatus::InProgress.can_record_progress());
        assert!(!AssignmentStatus::Completed.can_record_progress());
        assert!(!AssignmentStatus::Completed.can_complete());
        assert!(!AssignmentStatus::InProgress.can_issue_certificate());
        assert!(AssignmentStatus::Completed.can_issue_certificate());
    }

    #[test]
    fn test_company_free_slots() {
        let mut company = seed_company();
        assert_eq!(company.free_slots(), 3);
        company.current_internships = 3;
        assert_eq!(company.free_slots(), 0);
        assert!(!company.has_free_slot());
    }

    #[test]
    fn test_seed_ids_are_distinct() {
        let ids = [SEED_STUDENT_ID, SEED_ADMIN_ID, SEED_MANAGER_ID, SEED_COMPANY_ID];
        for (i, a) in ids.iter().enumerate() {
            assert_ne!(*a, Uuid::nil());
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(seed_company().manager_id, SEED_MANAGER_ID);
    }
}
