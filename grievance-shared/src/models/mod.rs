/// Database models and repository operations
///
/// This module contains the two persisted entities of the portal:
///
/// - `user`: Registered accounts (regular users and administrators)
/// - `complaint`: Submitted complaints with derived classification labels

pub mod complaint;
pub mod user;

pub use complaint::{Complaint, ComplaintCounters, ComplaintStatus, CreateComplaint, Priority, Sentiment};
pub use user::{CreateUser, Role, User};
