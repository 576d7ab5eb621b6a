//! Pagination and sorting types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::config::{
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_NUMBER, MAX_PAGE_SIZE,
    SORT_DESCENDING_PREFIX,
};
use crate::errors::{AppError, AppResult};

/// Pagination query parameters shared by every list endpoint
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// 1-based page number (at most 1000000)
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: u64,
    /// Items per page (capped at 100)
    #[serde(default = "default_size")]
    #[validate(range(min = 1, message = "size must be at least 1"))]
    pub size: u64,
    /// Field to sort by; prefix with `-` for descending order
    #[serde(default)]
    pub sort_by: Option<String>,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
            sort_by: None,
        }
    }
}

impl PaginationParams {
    /// Resolve into a typed request for a resource with sortable fields `F`.
    ///
    /// # Errors
    /// Returns a validation error when `page` is past `MAX_PAGE_NUMBER` or
    /// `sort_by` names a field `F` does not allow.
    pub fn into_request<F: SortField>(self) -> AppResult<PageRequest<F>> {
        if self.page > MAX_PAGE_NUMBER {
            return Err(AppError::validation(format!(
                "page must be at most {}",
                MAX_PAGE_NUMBER
            )));
        }

        let sort = match self.sort_by.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(Sort::parse(raw)?),
        };

        Ok(PageRequest {
            page: self.page.max(1),
            size: self.size.clamp(1, MAX_PAGE_SIZE),
            sort,
        })
    }
}

/// A resource's set of sortable fields.
pub trait SortField: Sized + Copy + std::fmt::Debug {
    /// Accepted field names, used in error messages.
    const NAMES: &'static [&'static str];

    fn from_name(name: &str) -> Option<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<F> {
    pub field: F,
    pub order: SortOrder,
}

impl<F: SortField> Sort<F> {
    fn parse(raw: &str) -> AppResult<Self> {
        let (name, order) = match raw.strip_prefix(SORT_DESCENDING_PREFIX) {
            Some(rest) => (rest, SortOrder::Desc),
            None => (raw, SortOrder::Asc),
        };

        let field = F::from_name(name).ok_or_else(|| {
            AppError::validation(format!(
                "Cannot sort by '{}'; expected one of: {}",
                name,
                F::NAMES.join(", ")
            ))
        })?;

        Ok(Self { field, order })
    }
}

/// Validated page window handed to repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<F> {
    pub page: u64,
    pub size: u64,
    pub sort: Option<Sort<F>>,
}

impl<F> PageRequest<F> {
    /// Zero-based page index
    pub fn page_index(&self) -> u64 {
        self.page.saturating_sub(1)
    }

    /// Number of rows skipped before this page
    pub fn offset(&self) -> u64 {
        self.page_index().saturating_mul(self.size)
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub size: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    pub fn new(page: u64, size: u64, total: u64) -> Self {
        let total_pages = if size > 0 { total.div_ceil(size) } else { 0 };
        Self {
            page,
            size,
            total,
            total_pages,
        }
    }
}

/// One page of results together with its metadata
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Page<T> {
    pub fn new<F>(items: Vec<T>, request: &PageRequest<F>, total: u64) -> Self {
        Self {
            items,
            meta: PaginationMeta::new(request.page, request.size, total),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Field {
        Name,
        CreatedAt,
    }

    impl SortField for Field {
        const NAMES: &'static [&'static str] = &["name", "created_at"];

        fn from_name(name: &str) -> Option<Self> {
            match name {
                "name" => Some(Field::Name),
                "created_at" => Some(Field::CreatedAt),
                _ => None,
            }
        }
    }

    fn params(page: u64, size: u64, sort_by: Option<&str>) -> PaginationParams {
        PaginationParams {
            page,
            size,
            sort_by: sort_by.map(String::from),
        }
    }

    #[test]
    fn offset_is_zero_for_first_page() {
        let request = params(1, 20, None).into_request::<Field>().unwrap();
        assert_eq!(request.offset(), 0);
        assert_eq!(request.page_index(), 0);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let request = params(3, 15, None).into_request::<Field>().unwrap();
        assert_eq!(request.offset(), 30);
    }

    #[test]
    fn page_past_the_limit_is_a_validation_error() {
        let err = params(u64::MAX, MAX_PAGE_SIZE, None)
            .into_request::<Field>()
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("at most")));

        assert!(params(MAX_PAGE_NUMBER + 1, 1, None)
            .into_request::<Field>()
            .is_err());
    }

    #[test]
    fn last_allowed_page_offset_fits_in_a_signed_offset() {
        let request = params(MAX_PAGE_NUMBER, 5000, None)
            .into_request::<Field>()
            .unwrap();
        assert!(request.offset() <= i64::MAX as u64);
        assert_eq!(request.offset(), (MAX_PAGE_NUMBER - 1) * MAX_PAGE_SIZE);
    }

    #[test]
    fn size_is_capped() {
        let request = params(1, 5000, None).into_request::<Field>().unwrap();
        assert_eq!(request.size, MAX_PAGE_SIZE);
    }

    #[test]
    fn sort_prefix_selects_descending() {
        let request = params(1, 10, Some("-created_at"))
            .into_request::<Field>()
            .unwrap();
        assert_eq!(
            request.sort,
            Some(Sort {
                field: Field::CreatedAt,
                order: SortOrder::Desc
            })
        );

        let request = params(1, 10, Some("name")).into_request::<Field>().unwrap();
        assert_eq!(request.sort.unwrap().order, SortOrder::Asc);
    }

    #[test]
    fn blank_sort_is_ignored() {
        let request = params(1, 10, Some("  ")).into_request::<Field>().unwrap();
        assert!(request.sort.is_none());
    }

    #[test]
    fn unknown_sort_field_is_a_validation_error() {
        let err = params(1, 10, Some("password"))
            .into_request::<Field>()
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("name, created_at")));
    }

    #[test]
    fn zero_page_fails_validation() {
        assert!(params(0, 10, None).validate().is_err());
        assert!(params(1, 0, None).validate().is_err());
        assert!(PaginationParams::default().validate().is_ok());
    }

    #[test]
    fn meta_rounds_total_pages_up() {
        assert_eq!(PaginationMeta::new(1, 20, 0).total_pages, 0);
        assert_eq!(PaginationMeta::new(1, 20, 20).total_pages, 1);
        assert_eq!(PaginationMeta::new(1, 20, 21).total_pages, 2);
    }
}
