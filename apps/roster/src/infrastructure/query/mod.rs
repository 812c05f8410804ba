// Query layer
// Criteria compile derived queries, named holds fixed SQL statements

pub mod criteria;
pub mod named;

pub use criteria::{Condition, MemberColumn, MemberCriteria, Value, MEMBER_COLUMNS};
pub use named::NamedQuery;
