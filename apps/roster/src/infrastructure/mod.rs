// Infrastructure layer module
// Contains database adapters and the query layer
// Follows Hexagonal Architecture

pub mod database;
pub mod query;
pub mod repositories;
