//! apiref Model - Member records and identifiers
//!
//! The data model shared by every apiref crate: documented members,
//! their dotted/wire/slug identifier forms, and the in-memory registry.

mod member;
mod path;
mod registry;

pub use member::{Member, MemberKind};
pub use path::{MemberPath, Namespace, PathSegment};
pub use registry::MemberRegistry;
