//! # PortalError
//!
//! Centralized error handling for the internship portal.
//! Every rejected store transition maps to one variant; nothing is mutated
//! when an operation returns an error.

use thiserror::Error;
use uuid::Uuid;

use crate::models::AssignmentStatus;

/// The primary error type for all ip-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortalError {
    /// Referenced entity does not exist (e.g., Company, Student, Assignment)
    #[error("{0} not found with ID {1}")]
    NotFound(&'static str, Uuid),

    /// Input rejected (e.g., progress above 100, zero capacity)
    #[error("validation error: {0}")]
    Validation(String),

    /// Login failure
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Company has no free slot left
    #[error("company {company_id} has no free internship slot")]
    CapacityExceeded { company_id: Uuid },

    /// Student has not opted in yet
    #[error("student {student_id} has not shown interest in an internship")]
    InterestNotShown { student_id: Uuid },

    /// Student already holds an assigned or in-progress internship
    #[error("student {student_id} already has a current internship")]
    AlreadyAssigned { student_id: Uuid },

    /// The assignment's status does not allow the requested action
    #[error("cannot {action} an assignment that is {status}")]
    InvalidTransition {
        action: &'static str,
        status: AssignmentStatus,
    },
}

/// A specialized Result type for portal logic.
pub type Result<T> = std::result::Result<T, PortalError>;
