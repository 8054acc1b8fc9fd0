//! Scripted tour of the seeded portal: a student opts in, the admin places
//! them, the manager tracks the internship through to the certificate.

use anyhow::{bail, Context};
use ip_core::{AuthProvider, InternshipStore, Role, Session};
use tracing::info;

const DEMO_PASSWORD: &str = "password";

pub async fn run<A: AuthProvider>(
    store: &mut InternshipStore,
    session: &mut Session<A>,
) -> anyhow::Result<()> {
    // Student: register interest.
    let student_id = session
        .login("qadis@student.com", DEMO_PASSWORD)
        .await
        .context("student login")?
        .id;
    store.show_interest_in_internship(student_id)?;
    info!(
        available = store.get_available_companies().len(),
        "student registered interest"
    );
    session.logout();

    // Admin: place every waiting student in the first company with room.
    session.login("nauman@admin.com", DEMO_PASSWORD).await.context("admin login")?;
    if session.role() != Some(Role::Admin) {
        bail!("admin account resolved to {:?}", session.role());
    }
    let waiting: Vec<_> = store.get_students_with_interest().iter().map(|s| s.id).collect();
    for id in waiting {
        let Some(company_id) = store.get_available_companies().first().map(|c| c.id) else {
            info!(student_id = %id, "no company has a free slot");
            break;
        };
        let assignment = store.assign_student_to_company(id, company_id)?;
        info!(
            student = %assignment.student_name,
            company = %assignment.company_name,
            "student assigned"
        );
    }
    session.logout();

    // Manager: drive the company's active internships to a certificate.
    let manager_id = session
        .login("manager@company.com", DEMO_PASSWORD)
        .await
        .context("manager login")?
        .id;
    let company_id = store
        .company_for_manager(manager_id)
        .map(|c| c.id)
        .context("manager has no company")?;
    let active: Vec<_> = store
        .active_company_assignments(company_id)
        .iter()
        .map(|a| a.id)
        .collect();
    for assignment_id in active {
        for progress in [25, 60, 100] {
            store.update_internship_progress(assignment_id, progress)?;
        }
        store.complete_internship(assignment_id)?;
        let done = store.issue_certificate(assignment_id)?;
        info!(student = %done.student_name, "certificate issued");
    }
    session.logout();

    Ok(())
}
