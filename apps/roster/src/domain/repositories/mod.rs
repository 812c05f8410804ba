// Repository contracts (ports)
// Implementations live in infrastructure::repositories

pub mod errors;
pub mod member_repository;
pub mod team_repository;

pub use errors::{RepositoryError, RepositoryResult};
pub use member_repository::{MemberCustomRepository, MemberRepository};
pub use team_repository::TeamRepository;
