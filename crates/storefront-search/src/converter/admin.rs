//! Filter rendering for the full API.
//!
//! The full API accepts the same filter tree the criteria carry, so each
//! node is re-tagged one to one, depth first, keeping child order.

use serde_json::{Map, Value, json};

use super::{DISPLAY_GROUP_FIELD, QueryParams};
use crate::criteria::{MultiOperator, RangeParameters, SearchFilter};

pub(super) fn apply_filters(params: &mut QueryParams, filters: &[SearchFilter], group_variants: bool) {
    if filters.is_empty() {
        return;
    }

    let mut rendered: Vec<Value> = filters.iter().map(filter_node).collect();
    if group_variants {
        rendered.push(filter_node(&display_group_filter()));
    }
    params.insert("filter", rendered);
}

/// Keeps only rows that belong to a display group, i.e. drops bare parents.
fn display_group_filter() -> SearchFilter {
    SearchFilter::not(
        MultiOperator::And,
        vec![SearchFilter::equals(DISPLAY_GROUP_FIELD, Value::Null)],
    )
}

fn filter_node(filter: &SearchFilter) -> Value {
    match filter {
        SearchFilter::Equals { field, value } => {
            json!({ "type": filter.type_name(), "field": field, "value": value })
        }
        SearchFilter::EqualsAny { field, value } => {
            json!({ "type": filter.type_name(), "field": field, "value": value })
        }
        SearchFilter::Range { field, parameters } => {
            json!({ "type": filter.type_name(), "field": field, "parameters": range_parameters(parameters) })
        }
        SearchFilter::Multi { operator, queries } | SearchFilter::Not { operator, queries } => {
            let queries: Vec<Value> = queries.iter().map(filter_node).collect();
            json!({ "type": filter.type_name(), "operator": operator.as_str(), "queries": queries })
        }
    }
}

fn range_parameters(parameters: &RangeParameters) -> Value {
    let bounds = [
        ("gte", &parameters.gte),
        ("gt", &parameters.gt),
        ("lte", &parameters.lte),
        ("lt", &parameters.lt),
    ];
    let map: Map<String, Value> = bounds
        .into_iter()
        .filter_map(|(key, bound)| bound.clone().map(|n| (key.to_string(), Value::Number(n))))
        .collect();
    Value::Object(map)
}
