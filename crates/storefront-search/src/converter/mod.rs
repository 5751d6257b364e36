//! Convert [`SearchCriteria`] into request parameters.
//!
//! Pagination, sorting, term and associations are shared by both API
//! surfaces. Filters are not: the full API takes the filter tree as-is,
//! while the store API only understands a fixed set of flat listing
//! parameters. Each surface has its own filter renderer (`admin`, `store`),
//! selected by [`ApiType`].
//!
//! Conversion never fails. Input that cannot be expressed is left out, and
//! [`convert_with_diagnostics`] reports what was left out.

mod admin;
pub(crate) mod params;
mod store;

pub use params::QueryParams;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::criteria::{
    Association, CriteriaConfiguration, FilterInput, Pagination, PaginationLimit, SearchCriteria,
    Sort,
};

/// Field used to collapse product variants when parents are not requested.
pub const DISPLAY_GROUP_FIELD: &str = "displayGroup";

/// Target API surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiType {
    /// Store API: flat query-string parameters.
    Store,
    /// Full API: nested JSON criteria body.
    #[default]
    Default,
}

/// Settings the converter reads defaults from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterConfig {
    pub default_pagination_limit: u32,
    pub pagination_limits: Vec<u32>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            default_pagination_limit: PaginationLimit::Ten.value(),
            pagination_limits: PaginationLimit::values(),
        }
    }
}

impl ConverterConfig {
    #[must_use]
    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_pagination_limit = limit;
        self
    }

    pub fn accepts_limit(&self, limit: u32) -> bool {
        self.pagination_limits.contains(&limit)
    }
}

/// Something the converter left out or replaced.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Requested page size is not accepted; the default was used instead.
    LimitFallback { requested: u32, applied: u32 },
    /// Filter has no store API representation.
    DroppedFilter {
        filter_type: &'static str,
        field: Option<String>,
    },
    /// `filters` was an object, so only pagination was emitted.
    FiltersNotAList,
}

/// Convert criteria into request parameters for the given API surface.
pub fn convert(
    criteria: &SearchCriteria,
    api_type: ApiType,
    config: &ConverterConfig,
) -> QueryParams {
    convert_with_diagnostics(criteria, api_type, config).0
}

/// Same as [`convert`], also returning everything that was dropped or
/// replaced along the way.
pub fn convert_with_diagnostics(
    criteria: &SearchCriteria,
    api_type: ApiType,
    config: &ConverterConfig,
) -> (QueryParams, Vec<Diagnostic>) {
    let mut params = QueryParams::new();
    let mut diagnostics = Vec::new();

    apply_pagination(
        &mut params,
        &mut diagnostics,
        criteria.pagination.as_ref(),
        api_type,
        config,
    );

    let filters = match &criteria.filters {
        Some(FilterInput::Object(_)) => {
            debug!("filters given as an object, emitting pagination only");
            diagnostics.push(Diagnostic::FiltersNotAList);
            return (params, diagnostics);
        }
        Some(FilterInput::List(filters)) => filters.as_slice(),
        None => &[],
    };

    if let Some(sort) = criteria.sort.as_ref().and_then(|sort| sort_param(sort, api_type)) {
        params.insert("sort", sort);
    }

    let unconfigured = CriteriaConfiguration::default();
    let configuration = criteria.configuration.as_ref().unwrap_or(&unconfigured);

    match api_type {
        ApiType::Store => store::apply_filters(&mut params, &mut diagnostics, filters),
        ApiType::Default => {
            let display_parents = configuration.display_parents.unwrap_or(false);
            let group_variants =
                !display_parents && !filters.is_empty() && configuration.grouping.is_none();
            admin::apply_filters(&mut params, filters, group_variants);
            if group_variants {
                params.insert("grouping", json!({ "field": DISPLAY_GROUP_FIELD }));
            }
        }
    }

    if let Some(term) = criteria.term.as_deref().filter(|term| !term.is_empty()) {
        params.insert("term", term);
    }

    if let Some(grouping) = &configuration.grouping {
        params.insert("grouping", json!({ "field": grouping.field }));
    }

    if let Some(associations) = &configuration.associations {
        params.insert("associations", Value::Object(associations_map(associations)));
    }

    (params, diagnostics)
}

fn apply_pagination(
    params: &mut QueryParams,
    diagnostics: &mut Vec<Diagnostic>,
    pagination: Option<&Pagination>,
    api_type: ApiType,
    config: &ConverterConfig,
) {
    let pagination = match pagination {
        Some(pagination) if pagination.is_empty() => return,
        Some(pagination) => *pagination,
        None => Pagination::default(),
    };

    if let Some(page) = pagination.page.filter(|page| *page > 0) {
        let key = match api_type {
            ApiType::Store => "p",
            ApiType::Default => "page",
        };
        params.insert(key, page);
    }

    let limit = match pagination.limit {
        Some(limit) if config.accepts_limit(limit) => limit,
        Some(requested) => {
            debug!(
                requested,
                applied = config.default_pagination_limit,
                "pagination limit not accepted, using default"
            );
            diagnostics.push(Diagnostic::LimitFallback {
                requested,
                applied: config.default_pagination_limit,
            });
            config.default_pagination_limit
        }
        None => config.default_pagination_limit,
    };
    params.insert("limit", limit);
}

fn sort_param(sort: &Sort, api_type: ApiType) -> Option<String> {
    if sort.field.is_empty() {
        return None;
    }
    let rendered = match (api_type, sort.desc) {
        (ApiType::Store, true) => format!("{}-desc", sort.field),
        (ApiType::Store, false) => format!("{}-asc", sort.field),
        (ApiType::Default, true) => format!("-{}", sort.field),
        (ApiType::Default, false) => sort.field.clone(),
    };
    Some(rendered)
}

fn associations_map(associations: &[Association]) -> Map<String, Value> {
    associations
        .iter()
        .map(|association| {
            let value = match association.associations.as_deref() {
                Some(children) if !children.is_empty() => {
                    json!({ "associations": associations_map(children) })
                }
                _ => Value::Object(Map::new()),
            };
            (association.name.clone(), value)
        })
        .collect()
}
