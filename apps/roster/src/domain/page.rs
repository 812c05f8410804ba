use serde::{Deserialize, Serialize};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Asc => write!(f, "ASC"),
            Direction::Desc => write!(f, "DESC"),
        }
    }
}

/// One sort key: a property name plus its direction
///
/// The property is a domain name (`"username"`), not a column; repositories
/// resolve it against the properties they know and reject the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub property: String,
    pub direction: Direction,
}

impl Order {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }
}

/// Ordered list of sort keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Sort {
    orders: Vec<Order>,
}

impl Sort {
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Sorts by a single property
    ///
    /// # Example
    /// ```
    /// use roster::domain::page::{Direction, Sort};
    ///
    /// let sort = Sort::by(Direction::Desc, "username").and(Direction::Asc, "age");
    /// assert_eq!(sort.orders().len(), 2);
    /// ```
    pub fn by(direction: Direction, property: impl Into<String>) -> Self {
        Self {
            orders: vec![Order {
                property: property.into(),
                direction,
            }],
        }
    }

    /// Appends a further sort key
    pub fn and(mut self, direction: Direction, property: impl Into<String>) -> Self {
        self.orders.push(Order {
            property: property.into(),
            direction,
        });
        self
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Zero-based page index, page size and sort
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort: Sort,
}

impl PageRequest {
    /// Creates a page request
    ///
    /// # Returns
    /// * `Ok(PageRequest)` - Valid request
    /// * `Err(String)` - If `size` is zero, or the row offset does not fit
    ///   the signed 64-bit OFFSET the database accepts
    pub fn of(page: u32, size: u32, sort: Sort) -> Result<Self, String> {
        if size == 0 {
            return Err("Page size must be at least 1".to_string());
        }

        let offset = u64::from(page) * u64::from(size);
        if i64::try_from(offset).is_err() {
            return Err(format!("Page {} of size {} is out of range", page, size));
        }

        Ok(Self { page, size, sort })
    }

    /// Creates an unsorted page request
    pub fn of_size(page: u32, size: u32) -> Result<Self, String> {
        Self::of(page, size, Sort::unsorted())
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    /// Number of rows to skip before this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    /// Request for the following page with the same size and sort
    ///
    /// `None` once the page index or its offset would leave the valid range.
    pub fn next(&self) -> Option<Self> {
        let page = self.page.checked_add(1)?;
        Self::of(page, self.size, self.sort.clone()).ok()
    }
}

/// One page of query results plus the total count of the full result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    content: Vec<T>,
    number: u32,
    size: u32,
    total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            number: request.page(),
            size: request.size(),
            total_elements,
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Zero-based index of this page
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Requested page size, not the number of elements on this page
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(u64::from(self.size))
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.number) + 1 < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    pub fn is_first(&self) -> bool {
        !self.has_previous()
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    /// Converts the content while keeping the paging information
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}
