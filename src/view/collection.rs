//! Pure filter/sort engine over in-memory record collections.
//!
//! Every list page derives its display list through [`apply`]: free-text
//! search over designated fields, exact-match equality filters with the
//! `"all"` sentinel, then a stable sort on one field.
//!
//! **Design invariant:** derivation is a pure function of (records, query).
//! The source slice is never mutated and the same inputs always produce the
//! same output list.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::core::errors::{OdkError, Result};

/// Filter value meaning "no constraint on this field".
pub const ALL_SENTINEL: &str = "all";

/// A single typed field value exposed by a record for filtering and sorting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// String field; compared lexicographically, matched exactly by filters.
    Text(&'a str),
    /// Numeric field; compared numerically.
    Number(f64),
    /// Calendar date (creation dates on leads/campaigns).
    Date(NaiveDate),
    /// Full timestamp (email send times).
    Stamp(DateTime<Utc>),
}

impl FieldValue<'_> {
    /// Natural ordering within a field. Mixed-type comparisons (which would
    /// mean two records disagree on a field's type) order as equal so the
    /// stable sort preserves input order.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Stamp(a), Self::Stamp(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }

    /// Exact-match test against a filter value given as text.
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            Self::Text(t) => *t == raw,
            Self::Number(n) => raw.parse::<f64>().is_ok_and(|v| v.total_cmp(n).is_eq()),
            Self::Date(d) => raw.parse::<NaiveDate>().is_ok_and(|v| v == *d),
            Self::Stamp(s) => DateTime::parse_from_rfc3339(raw)
                .is_ok_and(|v| v.with_timezone(&Utc) == *s),
        }
    }
}

/// A displayable record: stable numeric id, searchable text, named fields.
pub trait Record {
    /// Unique id within the collection.
    fn id(&self) -> u64;

    /// The designated fields free-text search runs over.
    fn searchable_text(&self) -> Vec<&str>;

    /// Look up a field by name. `None` means the record shape has no such field.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// All field names this record shape supports, for validation against
    /// empty collections.
    fn field_names() -> &'static [&'static str];
}

/// Sort direction for the chosen field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    /// Ascending natural order.
    Asc,
    /// Descending: the ascending comparator reversed, so ties keep input order.
    Desc,
}

impl SortDirection {
    /// Flip the direction (table-header click on the active sort column).
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Field name and direction for ordering the display list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Field to order by.
    pub field: String,
    /// Ascending or descending.
    pub direction: SortDirection,
}

/// Everything a list page holds about how to derive its display list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Free-text search term; empty matches every record.
    pub search: String,
    /// Equality filters, field name → expected value. [`ALL_SENTINEL`] disables one.
    pub filters: BTreeMap<String, String>,
    /// Optional sort; `None` keeps input order.
    pub sort: Option<SortSpec>,
}

impl Query {
    /// Fresh unconstrained query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style search term.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Builder-style equality filter.
    #[must_use]
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    /// Builder-style sort spec.
    #[must_use]
    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(SortSpec {
            field: field.into(),
            direction,
        });
        self
    }

    /// Filters that actually constrain (not the `"all"` sentinel).
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .filter(|(_, v)| v.as_str() != ALL_SENTINEL)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Reject field names the record shape does not have.
    ///
    /// Runs against `R::field_names()` so validation works on empty
    /// collections too. Unknown sort or filter fields are caller bugs and
    /// fail loudly instead of silently no-opping.
    pub fn validate_for<R: Record>(&self) -> Result<()> {
        let known = R::field_names();
        if let Some(sort) = &self.sort
            && !known.contains(&sort.field.as_str())
        {
            return Err(OdkError::InvalidArgument {
                details: format!("unknown sort field {:?}", sort.field),
            });
        }
        for (field, _) in self.active_filters() {
            if !known.contains(&field) {
                return Err(OdkError::InvalidArgument {
                    details: format!("unknown filter field {field:?}"),
                });
            }
        }
        Ok(())
    }
}

/// Derive the ordered display list for a query.
///
/// A record is included iff the search term (case-insensitive substring over
/// its searchable fields; empty matches all) AND every active equality filter
/// match. Sorting is stable; `Desc` reverses the comparator, not the list.
pub fn apply<'a, R: Record>(records: &'a [R], query: &Query) -> Result<Vec<&'a R>> {
    query.validate_for::<R>()?;

    let needle = query.search.trim().to_lowercase();
    let mut out: Vec<&R> = records
        .iter()
        .filter(|r| matches_search(*r, &needle) && matches_filters(*r, query))
        .collect();

    if let Some(sort) = &query.sort {
        out.sort_by(|a, b| {
            let ord = match (a.field(&sort.field), b.field(&sort.field)) {
                (Some(fa), Some(fb)) => fa.compare(&fb),
                // Records missing the value sort after those that have it.
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            match sort.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }

    Ok(out)
}

/// Slice out one 1-based page of an already-derived display list.
///
/// Out-of-range pages and a zero page size yield an empty slice.
#[must_use]
pub fn paginate<'a, T>(items: &'a [T], page: usize, page_size: usize) -> &'a [T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Number of pages a list occupies (at least 1, even when empty).
#[must_use]
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

fn matches_search<R: Record>(record: &R, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    record
        .searchable_text()
        .iter()
        .any(|hay| hay.to_lowercase().contains(needle))
}

fn matches_filters<R: Record>(record: &R, query: &Query) -> bool {
    query
        .active_filters()
        .all(|(field, expected)| record.field(field).is_some_and(|v| v.matches(expected)))
}
