//! Offset/limit paging and paged result sets

use serde::Serialize;

/// Zero-based offset plus page size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Pagination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.limit.is_none() && self.offset.is_none()
    }

    pub fn to_sql(&self) -> String {
        let mut clauses = Vec::new();

        if let Some(limit) = self.limit {
            clauses.push(format!("LIMIT {}", limit));
        }

        if let Some(offset) = self.offset {
            clauses.push(format!("OFFSET {}", offset));
        }

        clauses.join(" ")
    }
}

/// One page of rows together with the unpaged total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResults<T> {
    pub results: Vec<T>,
    pub total: i64,
    pub limit: Option<i64>,
    pub offset: i64,
}

impl<T> QueryResults<T> {
    pub fn new(results: Vec<T>, total: i64, limit: Option<i64>, offset: i64) -> Self {
        Self {
            results,
            total,
            limit,
            offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// True when rows exist past this page
    pub fn has_next(&self) -> bool {
        self.offset + (self.results.len() as i64) < self.total
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> QueryResults<U> {
        QueryResults {
            results: self.results.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
        }
    }
}
