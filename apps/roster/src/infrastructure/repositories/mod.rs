// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

mod rows;
pub mod sqlite_member_custom_repository;
pub mod sqlite_member_repository;
pub mod sqlite_team_repository;

pub use sqlite_member_custom_repository::SqliteMemberCustomRepository;
pub use sqlite_member_repository::SqliteMemberRepository;
pub use sqlite_team_repository::SqliteTeamRepository;
