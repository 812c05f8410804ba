// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of infrastructure concerns

pub mod audit;
pub mod member;
pub mod page;
pub mod repositories;
pub mod team;
