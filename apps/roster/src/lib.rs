//! Roster Store Library
//!
//! This library provides the member/team persistence layer: domain
//! entities, repository contracts, and their SQLite implementations.

pub mod config;
pub mod domain;
pub mod infrastructure;
