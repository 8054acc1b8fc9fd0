//! Mock records the portal starts with.
//!
//! Ids are fixed so the seeded users of the auth plugin line up with the
//! seeded student and company.

use uuid::Uuid;

use crate::models::{CertificateStatus, Company, InternshipStatus, Student};
use crate::store::InternshipStore;

pub const SEED_STUDENT_ID: Uuid = Uuid::from_u128(0x0191_0000_0000_7000_8000_0000_0000_0001);
pub const SEED_ADMIN_ID: Uuid = Uuid::from_u128(0x0191_0000_0000_7000_8000_0000_0000_0002);
pub const SEED_MANAGER_ID: Uuid = Uuid::from_u128(0x0191_0000_0000_7000_8000_0000_0000_0003);
pub const SEED_COMPANY_ID: Uuid = Uuid::from_u128(0x0191_0000_0000_7000_8000_0000_0000_0101);

pub fn seed_company() -> Company {
    Company {
        id: SEED_COMPANY_ID,
        name: "TechCorp Solutions".into(),
        area: "Frontend Development".into(),
        max_internships: 3,
        current_internships: 0,
        manager_id: SEED_MANAGER_ID,
        manager_name: "Manager Name".into(),
        manager_email: "manager@company.com".into(),
        is_active: true,
    }
}

pub fn seed_student() -> Student {
    Student {
        id: SEED_STUDENT_ID,
        name: "Qadis Parvez".into(),
        email: "qadis@student.com".into(),
        reg_no: "2021-Arid-4566".into(),
        technology: "Flutter".into(),
        has_shown_interest: false,
        assigned_company_id: None,
        assigned_company_name: None,
        internship_status: InternshipStatus::NotAssigned,
        certificate_status: CertificateStatus::NotAvailable,
        start_date: None,
        end_date: None,
    }
}

impl InternshipStore {
    /// A store holding the mock company and student.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.insert_company(seed_company());
        store.insert_student(seed_student());
        store
    }
}
