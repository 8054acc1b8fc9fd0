//! # InternshipStore
//!
//! Owns the company, student and assignment collections and enforces the
//! assignment lifecycle. The store is a plain value owned by the
//! composition root; queries take `&self`, mutations take `&mut self`.
//!
//! Every mutation validates first and writes last, so a returned error
//! always means nothing changed.

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{PortalError, Result};
use crate::models::{
    Assignment, AssignmentStatus, CertificateStatus, Company, CompanyPatch, InternshipStatus,
    NewCompany, NewStudent, Progress, Student, StudentPatch,
};

#[derive(Debug, Clone, Default)]
pub struct InternshipStore {
    companies: Vec<Company>,
    students: Vec<Student>,
    assignments: Vec<Assignment>,
}

impl InternshipStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Company management ──────────────────────────────────────────────────

    pub fn add_company(&mut self, data: NewCompany) -> Result<Company> {
        if data.max_internships == 0 {
            return Err(PortalError::Validation(
                "max_internships must be at least 1".into(),
            ));
        }

        let company = Company {
            id: Uuid::now_v7(),
            name: data.name,
            area: data.area,
            max_internships: data.max_internships,
            current_internships: 0,
            manager_id: data.manager_id,
            manager_name: data.manager_name,
            manager_email: data.manager_email,
            is_active: data.is_active,
        };
        debug!(company_id = %company.id, name = %company.name, "company added");
        self.companies.push(company.clone());
        Ok(company)
    }

    pub fn update_company(&mut self, id: Uuid, patch: CompanyPatch) -> Result<Company> {
        let company = self
            .companies
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(PortalError::NotFound("Company", id))?;

        if let Some(max) = patch.max_internships {
            if max == 0 || max < company.current_internships {
                return Err(PortalError::Validation(format!(
                    "max_internships {max} must be at least 1 and not below the {} occupied slots",
                    company.current_internships
                )));
            }
        }

        if let Some(name) = patch.name {
            company.name = name;
        }
        if let Some(area) = patch.area {
            company.area = area;
        }
        if let Some(max) = patch.max_internships {
            company.max_internships = max;
        }
        if let Some(manager_id) = patch.manager_id {
            company.manager_id = manager_id;
        }
        if let Some(manager_name) = patch.manager_name {
            company.manager_name = manager_name;
        }
        if let Some(manager_email) = patch.manager_email {
            company.manager_email = manager_email;
        }
        if let Some(is_active) = patch.is_active {
            company.is_active = is_active;
        }

        debug!(company_id = %id, "company updated");
        Ok(company.clone())
    }

    // ── Student management ──────────────────────────────────────────────────

    pub fn add_student(&mut self, data: NewStudent) -> Result<Student> {
        let student = Student {
            id: Uuid::now_v7(),
            name: data.name,
            email: data.email,
            reg_no: data.reg_no,
            technology: data.technology,
            has_shown_interest: false,
            assigned_company_id: None,
            assigned_company_name: None,
            internship_status: InternshipStatus::NotAssigned,
            certificate_status: CertificateStatus::NotAvailable,
            start_date: None,
            end_date: None,
        };
        debug!(student_id = %student.id, reg_no = %student.reg_no, "student added");
        self.students.push(student.clone());
        Ok(student)
    }

    pub fn update_student(&mut self, id: Uuid, patch: StudentPatch) -> Result<Student> {
        let student = self.student_mut(id)?;

        if let Some(name) = patch.name {
            student.name = name;
        }
        if let Some(email) = patch.email {
            student.email = email;
        }
        if let Some(reg_no) = patch.reg_no {
            student.reg_no = reg_no;
        }
        if let Some(technology) = patch.technology {
            student.technology = technology;
        }

        debug!(student_id = %id, "student updated");
        Ok(student.clone())
    }

    /// Marks the student as willing to be assigned. Idempotent.
    pub fn show_interest_in_internship(&mut self, student_id: Uuid) -> Result<()> {
        let student = self.student_mut(student_id)?;
        student.has_shown_interest = true;
        debug!(%student_id, "student showed interest");
        Ok(())
    }

    // ── Assignment lifecycle ────────────────────────────────────────────────

    /// Places a student in one of the company's free slots.
    ///
    /// Rejected when either id is unknown, the company is full, the student
    /// has not shown interest, or the student already holds a current
    /// internship. `is_active` is not checked here; it only hides the
    /// company from students.
    pub fn assign_student_to_company(
        &mut self,
        student_id: Uuid,
        company_id: Uuid,
    ) -> Result<Assignment> {
        let company_idx = self.company_index(company_id)?;
        let student_idx = self.student_index(student_id)?;

        let company = &self.companies[company_idx];
        let student = &self.students[student_idx];

        if !company.has_free_slot() {
            warn!(%company_id, %student_id, "assignment rejected: no free slot");
            return Err(PortalError::CapacityExceeded { company_id });
        }
        if !student.has_shown_interest {
            warn!(%company_id, %student_id, "assignment rejected: interest not shown");
            return Err(PortalError::InterestNotShown { student_id });
        }
        if self.current_assignment(student_id).is_some() {
            warn!(%company_id, %student_id, "assignment rejected: student already placed");
            return Err(PortalError::AlreadyAssigned { student_id });
        }

        let now = Utc::now();
        let assignment = Assignment {
            id: Uuid::now_v7(),
            student_id,
            company_id,
            student_name: student.name.clone(),
            company_name: company.name.clone(),
            assigned_date: now,
            start_date: Some(now),
            end_date: None,
            status: AssignmentStatus::Assigned,
            progress: None,
            certificate_issued: false,
        };

        let company = &mut self.companies[company_idx];
        company.current_internships += 1;
        let company_name = company.name.clone();

        let student = &mut self.students[student_idx];
        student.assigned_company_id = Some(company_id);
        student.assigned_company_name = Some(company_name);
        student.internship_status = InternshipStatus::Assigned;
        student.certificate_status = CertificateStatus::NotAvailable;
        student.start_date = Some(now);
        student.end_date = None;

        debug!(assignment_id = %assignment.id, %student_id, %company_id, "student assigned");
        self.assignments.push(assignment.clone());
        Ok(assignment)
    }

    /// Records progress and moves the assignment (and its student) to in-progress.
    ///
    /// Progress 0 still counts as started. Completed assignments are frozen.
    pub fn update_internship_progress(
        &mut self,
        assignment_id: Uuid,
        progress: u8,
    ) -> Result<Assignment> {
        let progress = Progress::new(progress)?;
        let idx = self.assignment_index(assignment_id)?;

        let status = self.assignments[idx].status;
        if !status.can_record_progress() {
            warn!(%assignment_id, %status, "progress update rejected");
            return Err(PortalError::InvalidTransition {
                action: "record progress on",
                status,
            });
        }

        let assignment = &mut self.assignments[idx];
        assignment.progress = Some(progress);
        assignment.status = AssignmentStatus::InProgress;
        let assignment = assignment.clone();

        if let Some(student) = self.students.iter_mut().find(|s| s.id == assignment.student_id) {
            student.internship_status = InternshipStatus::InProgress;
        }

        debug!(%assignment_id, progress = progress.value(), "progress recorded");
        Ok(assignment)
    }

    /// Closes the assignment and frees its company slot.
    ///
    /// Completing an already completed assignment is rejected, so the slot
    /// counter is released exactly once per assignment.
    pub fn complete_internship(&mut self, assignment_id: Uuid) -> Result<Assignment> {
        let idx = self.assignment_index(assignment_id)?;

        let status = self.assignments[idx].status;
        if !status.can_complete() {
            warn!(%assignment_id, %status, "completion rejected");
            return Err(PortalError::InvalidTransition {
                action: "complete",
                status,
            });
        }

        let now = Utc::now();
        let assignment = &mut self.assignments[idx];
        assignment.status = AssignmentStatus::Completed;
        assignment.end_date = Some(now);
        let assignment = assignment.clone();

        if let Some(student) = self.latest_student_mut(&assignment) {
            student.internship_status = InternshipStatus::Completed;
            student.end_date = Some(now);
            student.certificate_status = CertificateStatus::InProgress;
        }

        if let Some(company) = self.companies.iter_mut().find(|c| c.id == assignment.company_id) {
            company.current_internships = company.current_internships.saturating_sub(1);
        }

        debug!(%assignment_id, company_id = %assignment.company_id, "internship completed");
        Ok(assignment)
    }

    /// Issues the certificate of a completed assignment, once.
    pub fn issue_certificate(&mut self, assignment_id: Uuid) -> Result<Assignment> {
        let idx = self.assignment_index(assignment_id)?;

        let current = &self.assignments[idx];
        if !current.status.can_issue_certificate() {
            warn!(%assignment_id, status = %current.status, "certificate rejected");
            return Err(PortalError::InvalidTransition {
                action: "issue a certificate for",
                status: current.status,
            });
        }
        if current.certificate_issued {
            return Err(PortalError::InvalidTransition {
                action: "reissue a certificate for",
                status: current.status,
            });
        }

        let assignment = &mut self.assignments[idx];
        assignment.certificate_issued = true;
        let assignment = assignment.clone();

        // A certificate for an older internship must not overwrite the
        // status of the student's current one.
        if let Some(student) = self.latest_student_mut(&assignment) {
            student.certificate_status = CertificateStatus::Issued;
        }

        debug!(%assignment_id, "certificate issued");
        Ok(assignment)
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn company(&self, id: Uuid) -> Option<&Company> {
        self.companies.iter().find(|c| c.id == id)
    }

    pub fn student(&self, id: Uuid) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn assignment(&self, id: Uuid) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.id == id)
    }

    /// Active companies with at least one free slot.
    pub fn get_available_companies(&self) -> Vec<&Company> {
        self.companies
            .iter()
            .filter(|c| c.is_active && c.has_free_slot())
            .collect()
    }

    /// Students waiting for a placement.
    pub fn get_students_with_interest(&self) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|s| s.has_shown_interest && s.internship_status == InternshipStatus::NotAssigned)
            .collect()
    }

    pub fn get_student_assignments(&self, student_id: Uuid) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.student_id == student_id)
            .collect()
    }

    pub fn get_company_assignments(&self, company_id: Uuid) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.company_id == company_id)
            .collect()
    }

    /// Assigned or in-progress internships of a company.
    pub fn active_company_assignments(&self, company_id: Uuid) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.company_id == company_id && a.status.is_current())
            .collect()
    }

    /// The student's assigned or in-progress internship, if any.
    pub fn current_assignment(&self, student_id: Uuid) -> Option<&Assignment> {
        self.assignments
            .iter()
            .find(|a| a.student_id == student_id && a.status.is_current())
    }

    /// The company managed by the given user.
    pub fn company_for_manager(&self, manager_id: Uuid) -> Option<&Company> {
        self.companies.iter().find(|c| c.manager_id == manager_id)
    }

    /// Case-insensitive substring match over company name or area.
    pub fn search_companies(&self, query: &str) -> Vec<&Company> {
        let needle = query.to_lowercase();
        self.companies
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle) || c.area.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Case-insensitive substring match over student name or registration number.
    pub fn search_students(&self, query: &str) -> Vec<&Student> {
        let needle = query.to_lowercase();
        self.students
            .iter()
            .filter(|s| {
                s.reg_no.to_lowercase().contains(&needle) || s.name.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Case-insensitive substring match over registration numbers.
    pub fn search_students_by_reg_no(&self, query: &str) -> Vec<&Student> {
        let needle = query.to_lowercase();
        self.students
            .iter()
            .filter(|s| s.reg_no.to_lowercase().contains(&needle))
            .collect()
    }

    // ── Internal ────────────────────────────────────────────────────────────

    /// Inserts prebuilt records; used by the seed module.
    pub(crate) fn insert_company(&mut self, company: Company) {
        self.companies.push(company);
    }

    pub(crate) fn insert_student(&mut self, student: Student) {
        self.students.push(student);
    }

    fn company_index(&self, id: Uuid) -> Result<usize> {
        self.companies
            .iter()
            .position(|c| c.id == id)
            .ok_or(PortalError::NotFound("Company", id))
    }

    fn student_index(&self, id: Uuid) -> Result<usize> {
        self.students
            .iter()
            .position(|s| s.id == id)
            .ok_or(PortalError::NotFound("Student", id))
    }

    fn assignment_index(&self, id: Uuid) -> Result<usize> {
        self.assignments
            .iter()
            .position(|a| a.id == id)
            .ok_or(PortalError::NotFound("Assignment", id))
    }

    /// The assignment's student, but only while this is the student's most
    /// recent assignment.
    fn latest_student_mut(&mut self, assignment: &Assignment) -> Option<&mut Student> {
        let latest = self
            .assignments
            .iter()
            .rev()
            .find(|a| a.student_id == assignment.student_id)?;
        if latest.id != assignment.id {
            return None;
        }
        self.students.iter_mut().find(|s| s.id == assignment.student_id)
    }

    fn student_mut(&mut self, id: Uuid) -> Result<&mut Student> {
        self.students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(PortalError::NotFound("Student", id))
    }
}
