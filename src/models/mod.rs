//! Data models for the Guestbook server

pub mod claims;
pub mod visitor;

// Re-export commonly used types
pub use claims::UserClaims;
pub use visitor::{CreateVisitor, UpdateVisitor, Visitor, VisitorQuery};
