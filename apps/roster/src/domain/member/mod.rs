// Member domain module
// Contains the member entity and its read-only projections

#![allow(clippy::module_inception)]

pub mod dto;
pub mod member;

// Re-export main types for convenience
pub use dto::MemberDto;
pub use member::Member;
