//! # Domain Models
//!
//! These structs represent the core entities of the internship portal.
//! Freshly created records use UUID v7 for time-ordered, globally unique identification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PortalError, Result};

/// A company offering a fixed number of internship slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    /// Free-text technology or domain label (e.g. "Frontend Development")
    pub area: String,
    /// Capacity; always at least 1
    pub max_internships: u32,
    /// Occupied slots; only moved by assignment and completion
    pub current_internships: u32,
    /// The user managing this company's interns
    pub manager_id: Uuid,
    pub manager_name: String,
    pub manager_email: String,
    /// Inactive companies are hidden from students
    pub is_active: bool,
}

impl Company {
    /// Number of slots still open.
    pub fn free_slots(&self) -> u32 {
        self.max_internships.saturating_sub(self.current_internships)
    }

    pub fn has_free_slot(&self) -> bool {
        self.current_internships < self.max_internships
    }
}

/// Where a student stands in the internship lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InternshipStatus {
    NotAssigned,
    Assigned,
    InProgress,
    Completed,
}

/// Certificate state of a student. Only leaves `NotAvailable` after completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateStatus {
    NotAvailable,
    /// Internship completed, certificate not yet issued
    InProgress,
    Issued,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Registration number (e.g. "2021-Arid-4566")
    pub reg_no: String,
    /// Declared skill area
    pub technology: String,
    pub has_shown_interest: bool,
    /// Back-reference to the company of the latest assignment
    pub assigned_company_id: Option<Uuid>,
    pub assigned_company_name: Option<String>,
    pub internship_status: InternshipStatus,
    pub certificate_status: CertificateStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Status of a single assignment.
///
/// `Assigned -> InProgress -> Completed`; progress updates may re-enter
/// `InProgress` any number of times. `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Assigned,
    InProgress,
    Completed,
}

impl AssignmentStatus {
    /// Returns true while the assignment still occupies a company slot.
    pub fn is_current(&self) -> bool {
        matches!(self, Self::Assigned | Self::InProgress)
    }

    pub fn can_record_progress(&self) -> bool {
        self.is_current()
    }

    pub fn can_complete(&self) -> bool {
        self.is_current()
    }

    pub fn can_issue_certificate(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completion percentage, 0 to 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Progress(u8);

impl Progress {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Result<Self> {
        if value > Self::MAX {
            return Err(PortalError::Validation(format!(
                "progress must be between 0 and {}, got {value}",
                Self::MAX
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Progress {
    type Error = PortalError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Progress> for u8 {
    fn from(progress: Progress) -> u8 {
        progress.0
    }
}

/// Links one student to one company for one internship period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub company_id: Uuid,
    /// Snapshot taken at assignment time; renames do not propagate
    pub student_name: String,
    /// Snapshot taken at assignment time; renames do not propagate
    pub company_name: String,
    pub assigned_date: DateTime<Utc>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: AssignmentStatus,
    pub progress: Option<Progress>,
    pub certificate_issued: bool,
}

/// Payload for `InternshipStore::add_company`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCompany {
    pub name: String,
    pub area: String,
    pub max_internships: u32,
    pub manager_id: Uuid,
    pub manager_name: String,
    pub manager_email: String,
    pub is_active: bool,
}

/// Merge patch for a company. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub area: Option<String>,
    pub max_internships: Option<u32>,
    pub manager_id: Option<Uuid>,
    pub manager_name: Option<String>,
    pub manager_email: Option<String>,
    pub is_active: Option<bool>,
}

/// Payload for `InternshipStore::add_student`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub reg_no: String,
    pub technology: String,
}

/// Merge patch for a student's profile fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub reg_no: Option<String>,
    pub technology: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Admin,
    Manager,
}

/// An authenticated portal user. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub reg_no: Option<String>,
    pub company_name: Option<String>,
    pub technology: Option<String>,
}
