//! Listing controls shared by collection endpoints: pagination and
//! multi-field ordering.

use serde::Serialize;

use crate::domain::errors::{DomainError, DomainResult};

/// One page of a listing, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub count: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    /// Build a page, rejecting page numbers past the end. The first page of
    /// an empty listing is always valid.
    pub fn new(items: Vec<T>, count: u64, request: PageRequest) -> DomainResult<Self> {
        let page = Self {
            items,
            count,
            page: request.page,
            page_size: request.page_size,
        };
        if request.page > page.num_pages() {
            return Err(DomainError::InvalidPage);
        }
        Ok(page)
    }

    pub fn num_pages(&self) -> u32 {
        if self.count == 0 {
            return 1;
        }
        let pages = self.count.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.num_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            count: self.count,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// A field a listing may be ordered by, addressed by its public key
/// (e.g. `airplane__name`).
pub trait SortField: Copy + Eq + Sized {
    /// Resolve a public key to a field. Unknown keys yield `None`.
    fn from_key(key: &str) -> Option<Self>;

    /// The primary key, used for the `-pk` fallback.
    fn primary_key() -> Self;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortTerm<F> {
    pub field: F,
    pub descending: bool,
}

/// A validated, non-empty list of sort terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering<F> {
    terms: Vec<SortTerm<F>>,
}

impl<F: SortField> Ordering<F> {
    /// Parse a comma separated `ordering` value. Unknown keys are dropped;
    /// when nothing valid remains the ordering is `-pk`.
    pub fn parse(raw: &str) -> Self {
        let terms: Vec<SortTerm<F>> = raw
            .split(',')
            .map(str::trim)
            .filter_map(|key| {
                let (descending, name) = match key.strip_prefix('-') {
                    Some(rest) => (true, rest),
                    None => (false, key),
                };
                F::from_key(name).map(|field| SortTerm { field, descending })
            })
            .collect();

        if terms.is_empty() {
            return Self::fallback();
        }
        Self { terms }
    }

    /// Parse the optional query parameter; absent means "no explicit ordering".
    pub fn from_query(raw: Option<&str>) -> Option<Self> {
        raw.map(Self::parse)
    }

    pub fn fallback() -> Self {
        Self {
            terms: vec![SortTerm {
                field: F::primary_key(),
                descending: true,
            }],
        }
    }

    pub fn terms(&self) -> &[SortTerm<F>] {
        &self.terms
    }
}

/// Sortable flight fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightSortField {
    Id,
    AirplaneName,
    DepartureTime,
    ArrivalTime,
}

impl SortField for FlightSortField {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "airplane__name" => Some(Self::AirplaneName),
            "departure_time" => Some(Self::DepartureTime),
            "arrival_time" => Some(Self::ArrivalTime),
            _ => None,
        }
    }

    fn primary_key() -> Self {
        Self::Id
    }
}

/// Sortable airplane fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirplaneSortField {
    Id,
    Name,
    Rows,
    SeatsInRow,
    AirplaneTypeName,
}

impl SortField for AirplaneSortField {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "name" => Some(Self::Name),
            "rows" => Some(Self::Rows),
            "seats_in_row" => Some(Self::SeatsInRow),
            "airplane_type__name" => Some(Self::AirplaneTypeName),
            _ => None,
        }
    }

    fn primary_key() -> Self {
        Self::Id
    }
}
