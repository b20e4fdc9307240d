//! Shared document content tree for Plume.
//!
//! Both the version store and the live editor buffer speak this type; it is
//! the only value that crosses between them.

pub mod content;
pub mod error;
pub mod result;
pub mod visitor;

pub use content::*;
pub use error::*;
pub use result::*;
pub use visitor::*;
