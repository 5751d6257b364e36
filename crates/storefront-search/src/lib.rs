//! Search criteria for the storefront API client.
//!
//! A [`SearchCriteria`] value describes pagination, sorting, a filter tree,
//! a free-text term and eager-loaded associations. [`convert`] renders it as
//! request parameters for one of two API surfaces:
//!
//! - [`ApiType::Store`]: flat query-string vocabulary understood by the
//!   store API (`p`, `manufacturer`, `properties`, ...).
//! - [`ApiType::Default`]: the nested JSON criteria body understood by the
//!   full API (`filter`, `associations`, `grouping`, ...).
//!
//! The [`listing`] module builds criteria from the selection state of a
//! product listing page.

pub mod converter;
pub mod criteria;
pub mod listing;

pub use converter::{
    ApiType, ConverterConfig, Diagnostic, QueryParams, convert, convert_with_diagnostics,
};
pub use criteria::{
    Association, CriteriaConfiguration, FilterInput, Grouping, MultiOperator, Pagination,
    PaginationLimit, RangeParameters, SearchCriteria, SearchFilter, Sort,
};
pub use listing::{ListingCriteria, SortingOption};
