//! Listing page helpers.
//!
//! A product listing keeps the user's current selection (facet values,
//! chosen manufacturers and properties, sorting and page) in a
//! [`ListingCriteria`]. The helpers here toggle values in that selection
//! and turn it into [`SearchCriteria`] for the converter.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::converter::params::scalar_text;
use crate::criteria::{
    FilterInput, MultiOperator, Pagination, RangeParameters, SearchCriteria, SearchFilter, Sort,
};

const CATEGORY_TREE: &str = "categoryTree";
const CATEGORY_FIELD: &str = "product.categoriesRo.id";
const MANUFACTURER: &str = "manufacturer";
const MANUFACTURER_FIELD: &str = "manufacturerId";
const SHIPPING_FREE: &str = "shipping-free";
const PRICE: &str = "price";

/// Sorting choice as offered by the listing's sort selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortingOption {
    pub field: String,
    /// `asc` or `desc`; anything else sorts ascending.
    #[serde(default)]
    pub order: Option<String>,
}

/// Current selection state of a listing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingCriteria {
    /// Selected facet values keyed by facet code.
    #[serde(default)]
    pub filters: Map<String, Value>,
    #[serde(default)]
    pub manufacturer: Vec<String>,
    #[serde(default)]
    pub properties: Vec<String>,
    #[serde(default)]
    pub sort: Option<Sort>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl ListingCriteria {
    /// Build converter input from the current selection.
    pub fn to_search_criteria(&self) -> SearchCriteria {
        let mut filters = filter_criteria(&self.filters);

        if !self.manufacturer.is_empty() {
            filters.push(SearchFilter::equals_any(
                MANUFACTURER_FIELD,
                self.manufacturer.iter().cloned(),
            ));
        }
        if !self.properties.is_empty() {
            filters.push(properties_filter(
                self.properties.iter().cloned().map(Value::String).collect(),
            ));
        }

        SearchCriteria {
            pagination: Some(self.pagination),
            sort: self.sort.clone(),
            filters: Some(FilterInput::List(filters)),
            ..SearchCriteria::default()
        }
    }
}

/// Turn selected facet values into filters.
///
/// Known facet codes get their dedicated filter; any other code holding a
/// list of ids is treated as a property group and matched against both
/// property and option ids.
pub fn filter_criteria(selected: &Map<String, Value>) -> Vec<SearchFilter> {
    let mut filters = Vec::new();

    for (code, value) in selected {
        match code.as_str() {
            CATEGORY_TREE => {
                if let Some(first) = non_null_values(value).into_iter().next() {
                    filters.push(SearchFilter::equals(CATEGORY_FIELD, first));
                }
            }
            MANUFACTURER => {
                let ids = non_null_values(value);
                if !ids.is_empty() {
                    filters.push(SearchFilter::equals_any(MANUFACTURER_FIELD, ids));
                }
            }
            SHIPPING_FREE => {
                if let Some(flag) = value.as_bool() {
                    filters.push(SearchFilter::equals(SHIPPING_FREE, flag));
                }
            }
            PRICE => {
                match serde_json::from_value::<RangeParameters>(value.clone()) {
                    Ok(parameters) if parameters.lower().is_some() || parameters.upper().is_some() => {
                        filters.push(SearchFilter::range(PRICE, parameters));
                    }
                    _ => debug!(?value, "ignoring price selection without bounds"),
                }
            }
            _ => {
                let ids = non_null_values(value);
                if !ids.is_empty() {
                    filters.push(properties_filter(ids));
                } else {
                    debug!(code = code.as_str(), "ignoring facet selection without values");
                }
            }
        }
    }

    filters
}

/// Map a sorting option to converter sort.
pub fn sorting_criteria(option: Option<&SortingOption>) -> Option<Sort> {
    let option = option?;
    if option.field.is_empty() {
        return None;
    }
    Some(Sort {
        field: option.field.clone(),
        desc: option.order.as_deref() == Some("desc"),
    })
}

/// Toggle an equals filter's value in the facet selection.
///
/// With `force_save` the value is appended even when already selected.
pub fn toggle_filter(filter: &SearchFilter, criteria: &mut ListingCriteria, force_save: bool) {
    let SearchFilter::Equals { field, value } = filter else {
        debug!(filter_type = filter.type_name(), "only equals filters can be toggled");
        return;
    };
    if field.is_empty() {
        return;
    }

    let entry = criteria
        .filters
        .entry(field.clone())
        .or_insert_with(|| Value::Array(Vec::new()));
    if !entry.is_array() {
        *entry = Value::Array(Vec::new());
    }
    if let Value::Array(selected) = entry {
        match selected.iter().position(|v| v == value) {
            Some(index) if !force_save => {
                selected.remove(index);
            }
            _ => selected.push(value.clone()),
        }
    }
}

/// Toggle a manufacturer or property id.
pub fn toggle_entity_filter(filter: &SearchFilter, criteria: &mut ListingCriteria) {
    let SearchFilter::Equals { field, value } = filter else {
        debug!(filter_type = filter.type_name(), "only equals filters can be toggled");
        return;
    };
    let Some(id) = scalar_text(value) else {
        return;
    };

    let selected = if field == MANUFACTURER {
        &mut criteria.manufacturer
    } else {
        &mut criteria.properties
    };
    match selected.iter().position(|existing| *existing == id) {
        Some(index) => {
            selected.remove(index);
        }
        None => selected.push(id),
    }
}

/// Clear the entity selection, sorting and page.
pub fn reset_search_criteria(criteria: &mut ListingCriteria) {
    criteria.manufacturer.clear();
    criteria.properties.clear();
    criteria.sort = None;
    criteria.pagination = Pagination::default();
}

fn properties_filter(ids: Vec<Value>) -> SearchFilter {
    SearchFilter::multi(
        MultiOperator::Or,
        vec![
            SearchFilter::equals_any("propertyIds", ids.clone()),
            SearchFilter::equals_any("optionIds", ids),
        ],
    )
}

fn non_null_values(value: &Value) -> Vec<Value> {
    value
        .as_array()
        .map(|items| items.iter().filter(|v| !v.is_null()).cloned().collect())
        .unwrap_or_default()
}
