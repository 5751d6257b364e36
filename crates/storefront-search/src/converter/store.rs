//! Filter rendering for the store API.
//!
//! The store listing endpoints do not take a filter tree. They take a fixed
//! set of flat parameters (`manufacturer`, `properties`, `min-price`,
//! `max-price`, `shipping-free`), with multiple ids joined by `|`. Filters
//! that do not map onto one of those are dropped.

use serde_json::{Number, Value};
use tracing::debug;

use super::params::scalar_text;
use super::{Diagnostic, QueryParams};
use crate::criteria::SearchFilter;

const MANUFACTURER_FIELD: &str = "manufacturerId";
const PROPERTY_FIELDS: &[&str] = &["propertyIds", "optionIds"];
const PRICE_FIELD: &str = "price";
const SHIPPING_FREE_FIELD: &str = "shipping-free";

#[derive(Default)]
struct ListingParams {
    manufacturers: Vec<String>,
    properties: Vec<String>,
    min_price: Option<Number>,
    max_price: Option<Number>,
    shipping_free: bool,
}

pub(super) fn apply_filters(
    params: &mut QueryParams,
    diagnostics: &mut Vec<Diagnostic>,
    filters: &[SearchFilter],
) {
    let mut listing = ListingParams::default();
    for filter in filters {
        collect(&mut listing, diagnostics, filter);
    }

    if !listing.manufacturers.is_empty() {
        params.insert("manufacturer", listing.manufacturers.join("|"));
    }
    if !listing.properties.is_empty() {
        params.insert("properties", listing.properties.join("|"));
    }
    if let Some(min) = listing.min_price {
        params.insert("min-price", Value::Number(min));
    }
    if let Some(max) = listing.max_price {
        params.insert("max-price", Value::Number(max));
    }
    if listing.shipping_free {
        params.insert(SHIPPING_FREE_FIELD, true);
    }
}

fn collect(listing: &mut ListingParams, diagnostics: &mut Vec<Diagnostic>, filter: &SearchFilter) {
    match filter {
        SearchFilter::EqualsAny { field, value } if field == MANUFACTURER_FIELD => {
            extend_unique(&mut listing.manufacturers, value);
        }
        SearchFilter::Equals { field, value } if field == MANUFACTURER_FIELD => {
            extend_unique(&mut listing.manufacturers, std::slice::from_ref(value));
        }
        SearchFilter::EqualsAny { field, value } if PROPERTY_FIELDS.contains(&field.as_str()) => {
            extend_unique(&mut listing.properties, value);
        }
        SearchFilter::Equals { field, value } if PROPERTY_FIELDS.contains(&field.as_str()) => {
            extend_unique(&mut listing.properties, std::slice::from_ref(value));
        }
        SearchFilter::Range { field, parameters } if field == PRICE_FIELD => {
            if let Some(lower) = parameters.lower() {
                listing.min_price = Some(lower.clone());
            }
            if let Some(upper) = parameters.upper() {
                listing.max_price = Some(upper.clone());
            }
        }
        SearchFilter::Equals { field, value } if field == SHIPPING_FREE_FIELD => {
            if value.as_bool() == Some(true) {
                listing.shipping_free = true;
            }
        }
        // Facet combinations (e.g. property OR option ids) are flattened.
        SearchFilter::Multi { queries, .. } => {
            for query in queries {
                collect(listing, diagnostics, query);
            }
        }
        other => {
            debug!(
                filter_type = other.type_name(),
                field = other.field(),
                "filter not supported by store api, dropping"
            );
            diagnostics.push(Diagnostic::DroppedFilter {
                filter_type: other.type_name(),
                field: other.field().map(str::to_string),
            });
        }
    }
}

fn extend_unique(target: &mut Vec<String>, values: &[Value]) {
    for text in values.iter().filter_map(scalar_text) {
        if !text.is_empty() && !target.contains(&text) {
            target.push(text);
        }
    }
}
