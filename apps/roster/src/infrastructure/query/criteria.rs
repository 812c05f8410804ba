use sqlx::{QueryBuilder, Sqlite};

use crate::domain::page::{Direction, PageRequest, Sort};
use crate::domain::repositories::{RepositoryError, RepositoryResult};

/// Column list selected for every member query, aliased on `m`
pub const MEMBER_COLUMNS: &str = "m.member_id, m.username, m.age, m.team_id, \
     m.created_date, m.last_modified_date, m.created_by, m.last_modified_by";

/// Member columns that criteria and sorting may refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberColumn {
    Id,
    Username,
    Age,
    TeamId,
    CreatedDate,
    LastModifiedDate,
}

impl MemberColumn {
    pub fn as_sql(&self) -> &'static str {
        match self {
            MemberColumn::Id => "m.member_id",
            MemberColumn::Username => "m.username",
            MemberColumn::Age => "m.age",
            MemberColumn::TeamId => "m.team_id",
            MemberColumn::CreatedDate => "m.created_date",
            MemberColumn::LastModifiedDate => "m.last_modified_date",
        }
    }

    /// Resolves a domain property name, rejecting anything unknown
    ///
    /// Sort properties come from callers and end up in SQL text, so only this
    /// fixed set is accepted.
    pub fn from_property(property: &str) -> RepositoryResult<Self> {
        match property {
            "id" => Ok(MemberColumn::Id),
            "username" => Ok(MemberColumn::Username),
            "age" => Ok(MemberColumn::Age),
            "team_id" => Ok(MemberColumn::TeamId),
            "created_date" => Ok(MemberColumn::CreatedDate),
            "last_modified_date" => Ok(MemberColumn::LastModifiedDate),
            other => Err(RepositoryError::InvalidSortProperty(other.to_string())),
        }
    }
}

/// A bindable criteria value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Text(String),
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

/// A single predicate; predicates are joined with AND
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Eq(MemberColumn, Value),
    GreaterThan(MemberColumn, Value),
    In(MemberColumn, Vec<Value>),
}

/// Structured member query compiled to SQL with bound parameters
///
/// Stands in for deriving a query from a method name: each repository
/// method states its filter, order and paging here instead.
///
/// # Example
/// ```
/// use roster::infrastructure::query::MemberCriteria;
///
/// let criteria = MemberCriteria::new()
///     .username_eq("member")
///     .age_greater_than(15)
///     .order_by_id();
///
/// assert_eq!(
///     criteria.select().sql(),
///     "SELECT m.member_id, m.username, m.age, m.team_id, m.created_date, \
///      m.last_modified_date, m.created_by, m.last_modified_by FROM member m \
///      WHERE m.username = ? AND m.age > ? ORDER BY m.member_id ASC"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemberCriteria {
    conditions: Vec<Condition>,
    orders: Vec<(MemberColumn, Direction)>,
    limit: Option<(u32, i64)>,
}

impl MemberCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn username_eq(self, username: &str) -> Self {
        self.with(Condition::Eq(MemberColumn::Username, username.into()))
    }

    pub fn age_greater_than(self, age: i32) -> Self {
        self.with(Condition::GreaterThan(MemberColumn::Age, age.into()))
    }

    pub fn team_id_eq(self, team_id: i64) -> Self {
        self.with(Condition::Eq(MemberColumn::TeamId, team_id.into()))
    }

    pub fn username_in(self, usernames: &[String]) -> Self {
        let values = usernames.iter().cloned().map(Value::from).collect();
        self.with(Condition::In(MemberColumn::Username, values))
    }

    pub fn order_by(mut self, column: MemberColumn, direction: Direction) -> Self {
        self.orders.push((column, direction));
        self
    }

    pub fn order_by_id(self) -> Self {
        self.order_by(MemberColumn::Id, Direction::Asc)
    }

    /// Applies a caller supplied sort, then `id` ascending as a tiebreaker
    pub fn sorted(mut self, sort: &Sort) -> RepositoryResult<Self> {
        for order in sort.orders() {
            let column = MemberColumn::from_property(&order.property)?;
            self = self.order_by(column, order.direction);
        }

        if !self.orders.iter().any(|(column, _)| *column == MemberColumn::Id) {
            self = self.order_by_id();
        }

        Ok(self)
    }

    /// Applies the sort and the LIMIT/OFFSET window of a page request
    pub fn paged(self, request: &PageRequest) -> RepositoryResult<Self> {
        let offset = i64::try_from(request.offset()).map_err(|_| {
            RepositoryError::InvalidArgument(format!("Page offset out of range: {}", request.offset()))
        })?;

        let mut criteria = self.sorted(request.sort())?;
        criteria.limit = Some((request.size(), offset));
        Ok(criteria)
    }

    /// Builds `SELECT <member columns> ...` with ordering and paging
    pub fn select(&self) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new("SELECT ");
        qb.push(MEMBER_COLUMNS);
        qb.push(" FROM member m");
        self.push_where(&mut qb);

        for (index, (column, direction)) in self.orders.iter().enumerate() {
            qb.push(if index == 0 { " ORDER BY " } else { ", " });
            qb.push(column.as_sql());
            qb.push(" ");
            qb.push(direction.to_string());
        }

        if let Some((limit, offset)) = self.limit {
            qb.push(" LIMIT ");
            qb.push_bind(i64::from(limit));
            qb.push(" OFFSET ");
            qb.push_bind(offset);
        }

        qb
    }

    /// Builds `SELECT COUNT(*)` over the same filter, ignoring order and paging
    pub fn count(&self) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM member m");
        self.push_where(&mut qb);
        qb
    }

    fn push_where(&self, qb: &mut QueryBuilder<'static, Sqlite>) {
        for (index, condition) in self.conditions.iter().enumerate() {
            qb.push(if index == 0 { " WHERE " } else { " AND " });

            match condition {
                Condition::Eq(column, value) => {
                    qb.push(column.as_sql());
                    qb.push(" = ");
                    push_value(qb, value);
                }
                Condition::GreaterThan(column, value) => {
                    qb.push(column.as_sql());
                    qb.push(" > ");
                    push_value(qb, value);
                }
                Condition::In(_, values) if values.is_empty() => {
                    qb.push("0 = 1");
                }
                Condition::In(column, values) => {
                    qb.push(column.as_sql());
                    qb.push(" IN (");
                    for (i, value) in values.iter().enumerate() {
                        if i > 0 {
                            qb.push(", ");
                        }
                        push_value(qb, value);
                    }
                    qb.push(")");
                }
            }
        }
    }
}

fn push_value(qb: &mut QueryBuilder<'static, Sqlite>, value: &Value) {
    match value {
        Value::Int(n) => qb.push_bind(*n),
        Value::Text(s) => qb.push_bind(s.clone()),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_criteria_selects_everything() {
        let criteria = MemberCriteria::new();

        assert_eq!(
            criteria.select().sql(),
            format!("SELECT {} FROM member m", MEMBER_COLUMNS)
        );
        assert_eq!(criteria.count().sql(), "SELECT COUNT(*) FROM member m");
    }

    #[test]
    fn conditions_are_joined_with_and() {
        let criteria = MemberCriteria::new().username_eq("member").age_greater_than(15);

        assert!(criteria
            .count()
            .sql()
            .ends_with("WHERE m.username = ? AND m.age > ?"));
    }

    #[test]
    fn in_condition_binds_every_value() {
        let names = vec!["member".to_string(), "member2".to_string()];
        let criteria = MemberCriteria::new().username_in(&names);

        assert!(criteria.count().sql().ends_with("WHERE m.username IN (?, ?)"));
    }

    #[test]
    fn empty_in_condition_matches_nothing() {
        let criteria = MemberCriteria::new().username_in(&[]);

        assert!(criteria.count().sql().ends_with("WHERE 0 = 1"));
    }

    #[test]
    fn sorted_appends_id_tiebreaker() {
        let sort = Sort::by(Direction::Desc, "username");
        let criteria = MemberCriteria::new().sorted(&sort).unwrap();

        assert!(criteria
            .select()
            .sql()
            .ends_with("ORDER BY m.username DESC, m.member_id ASC"));
    }

    #[test]
    fn sorted_by_id_has_no_duplicate_tiebreaker() {
        let sort = Sort::by(Direction::Desc, "id");
        let criteria = MemberCriteria::new().sorted(&sort).unwrap();

        assert!(criteria.select().sql().ends_with("ORDER BY m.member_id DESC"));
    }

    #[test]
    fn unknown_sort_property_is_rejected() {
        let sort = Sort::by(Direction::Asc, "age; DROP TABLE member");
        let result = MemberCriteria::new().sorted(&sort);

        assert!(matches!(
            result,
            Err(RepositoryError::InvalidSortProperty(ref p)) if p.starts_with("age;")
        ));
    }

    #[test]
    fn paged_adds_limit_and_offset() {
        let request = PageRequest::of(1, 3, Sort::by(Direction::Desc, "username")).unwrap();
        let criteria = MemberCriteria::new()
            .age_greater_than(5)
            .paged(&request)
            .unwrap();

        let select = criteria.select();
        assert!(select.sql().ends_with(
            "WHERE m.age > ? ORDER BY m.username DESC, m.member_id ASC LIMIT ? OFFSET ?"
        ));
        assert_eq!(criteria.count().sql(), "SELECT COUNT(*) FROM member m WHERE m.age > ?");
    }
}
