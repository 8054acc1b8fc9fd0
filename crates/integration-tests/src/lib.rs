//! Shared fixtures for the cross-crate tests.

use ip_core::{InternshipStore, NewCompany, NewStudent};
use uuid::Uuid;

pub fn company(name: &str, max_internships: u32) -> NewCompany {
    NewCompany {
        name: name.into(),
        area: "Mobile Development".into(),
        max_internships,
        manager_id: Uuid::now_v7(),
        manager_name: format!("{name} Manager"),
        manager_email: format!("manager@{}.com", name.to_lowercase().replace(' ', "")),
        is_active: true,
    }
}

pub fn student(name: &str, reg_no: &str) -> NewStudent {
    NewStudent {
        name: name.into(),
        email: format!("{}@student.com", name.to_lowercase().replace(' ', ".")),
        reg_no: reg_no.into(),
        technology: "Flutter".into(),
    }
}

/// Every company's counter is within capacity and matches its current assignments.
pub fn assert_counters_consistent(store: &InternshipStore) {
    for c in store.companies() {
        assert!(
            c.current_internships <= c.max_internships,
            "{} over capacity: {}/{}",
            c.name,
            c.current_internships,
            c.max_internships
        );
        assert_eq!(
            c.current_internships as usize,
            store.active_company_assignments(c.id).len(),
            "{} counter out of sync",
            c.name
        );
    }
}
