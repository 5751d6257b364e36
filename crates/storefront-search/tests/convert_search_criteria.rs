use assert_json_diff::assert_json_eq;
use serde_json::{Value, json};
use storefront_search::{
    ApiType, Association, ConverterConfig, MultiOperator, Pagination, RangeParameters,
    SearchCriteria, SearchFilter, Sort, convert,
};

fn config() -> ConverterConfig {
    ConverterConfig::default()
}

fn criteria(value: Value) -> SearchCriteria {
    serde_json::from_value(value).expect("criteria should deserialize")
}

fn to_json(criteria: &SearchCriteria, api_type: ApiType, config: &ConverterConfig) -> Value {
    Value::from(convert(criteria, api_type, config))
}

#[test]
fn store_pagination_uses_p_param() {
    let config = ConverterConfig::default().with_default_limit(10);
    let result = to_json(
        &SearchCriteria::new().with_pagination(Pagination::page(1)),
        ApiType::Store,
        &config,
    );
    assert_json_eq!(result, json!({ "p": 1, "limit": 10 }));
}

#[test]
fn accepted_limit_is_kept() {
    let result = to_json(
        &criteria(json!({ "pagination": { "page": 3, "limit": 5 } })),
        ApiType::Default,
        &config(),
    );
    assert_json_eq!(result, json!({ "page": 3, "limit": 5 }));
}

#[test]
fn limit_outside_accepted_set_uses_default() {
    for limit in [0, 2, 7, 11, 99, 1000] {
        let result = to_json(
            &SearchCriteria::new().with_pagination(Pagination::new(None, Some(limit))),
            ApiType::Default,
            &config(),
        );
        assert_json_eq!(result, json!({ "limit": 10 }));
    }
}

#[test]
fn empty_pagination_object_is_omitted() {
    let result = to_json(&criteria(json!({ "pagination": {} })), ApiType::Default, &config());
    assert_json_eq!(result, json!({}));
}

#[test]
fn changed_default_limit_is_used() {
    let config = config().with_default_limit(50);
    let result = to_json(
        &SearchCriteria::new().with_pagination(Pagination::page(1)),
        ApiType::Default,
        &config,
    );
    assert_json_eq!(result, json!({ "page": 1, "limit": 50 }));
}

#[test]
fn store_sort_with_pagination() {
    let result = to_json(
        &criteria(json!({
            "pagination": { "page": 1 },
            "sort": { "desc": true, "field": "name" },
            "filters": []
        })),
        ApiType::Store,
        &config(),
    );
    assert_json_eq!(result, json!({ "p": 1, "limit": 10, "sort": "name-desc" }));
}

#[test]
fn default_sort_without_direction() {
    let result = to_json(
        &criteria(json!({ "pagination": { "page": 1 }, "sort": { "field": "name" }, "filters": [] })),
        ApiType::Default,
        &config(),
    );
    assert_json_eq!(result, json!({ "page": 1, "limit": 10, "sort": "name" }));
}

#[test]
fn equals_and_range_filters_are_retagged() {
    let result = to_json(
        &SearchCriteria::new()
            .with_filter(SearchFilter::equals("name", "Aerodynamic Iron Jetsilk"))
            .with_filter(SearchFilter::range(
                "price",
                RangeParameters::default().lt(120).gte(5),
            ))
            .with_display_parents(true),
        ApiType::Default,
        &config(),
    );
    assert_json_eq!(
        result,
        json!({
            "limit": 10,
            "filter": [
                { "type": "equals", "field": "name", "value": "Aerodynamic Iron Jetsilk" },
                { "type": "range", "field": "price", "parameters": { "lt": 120, "gte": 5 } }
            ]
        })
    );
}

#[test]
fn multi_filter_nesting_is_preserved() {
    let names = SearchFilter::multi(
        MultiOperator::Or,
        vec![
            SearchFilter::equals("name", "Aerodynamic Iron Jetsilk"),
            SearchFilter::equals("name", "Rustic Copper Jimbies"),
        ],
    );
    let price = SearchFilter::range("price", RangeParameters::default().gte(0).lte(200));
    let criteria = SearchCriteria::new()
        .with_filter(SearchFilter::multi(MultiOperator::And, vec![price, names]))
        .with_display_parents(true);

    let result = to_json(&criteria, ApiType::Default, &config());
    assert_eq!(
        result["filter"],
        json!([{
            "type": "multi",
            "operator": "AND",
            "queries": [
                { "type": "range", "field": "price", "parameters": { "gte": 0, "lte": 200 } },
                {
                    "type": "multi",
                    "operator": "OR",
                    "queries": [
                        { "type": "equals", "field": "name", "value": "Aerodynamic Iron Jetsilk" },
                        { "type": "equals", "field": "name", "value": "Rustic Copper Jimbies" }
                    ]
                }
            ]
        }])
    );
}

#[test]
fn empty_multi_is_kept() {
    let criteria = SearchCriteria::new()
        .with_filter(SearchFilter::multi(MultiOperator::Or, vec![]))
        .with_display_parents(true);
    let result = to_json(&criteria, ApiType::Default, &config());
    assert_eq!(
        result["filter"],
        json!([{ "type": "multi", "operator": "OR", "queries": [] }])
    );
}

#[test]
fn store_manufacturer_filter_is_flattened() {
    let result = to_json(
        &SearchCriteria::new().with_filter(SearchFilter::equals_any("manufacturerId", ["shopware"])),
        ApiType::Store,
        &config(),
    );
    assert_json_eq!(result, json!({ "limit": 10, "manufacturer": "shopware" }));
}

#[test]
fn term_handling() {
    let result = to_json(&criteria(json!({ "term": "fulltext" })), ApiType::Default, &config());
    assert_eq!(result["term"], json!("fulltext"));

    let result = to_json(&criteria(json!({ "term": null })), ApiType::Default, &config());
    assert!(result.get("term").is_none());
}

#[test]
fn display_parents_with_object_filters_is_pagination_only() {
    let result = to_json(
        &criteria(json!({ "filters": {}, "configuration": { "displayParents": true } })),
        ApiType::Default,
        &config(),
    );
    assert_json_eq!(result, json!({ "limit": 10 }));
}

#[test]
fn store_object_filters_is_pagination_only() {
    let params = convert(
        &criteria(json!({
            "filters": {},
            "pagination": { "page": 2 },
            "sort": { "field": "price", "desc": true },
            "term": "shirt",
        })),
        ApiType::Store,
        &config(),
    );
    assert_json_eq!(Value::from(params.clone()), json!({ "p": 2, "limit": 10 }));

    let mut pairs = params.to_query_pairs();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            ("limit".to_string(), "10".to_string()),
            ("p".to_string(), "2".to_string()),
        ]
    );
}

#[test]
fn display_group_is_injected_by_default() {
    let result = to_json(
        &criteria(json!({
            "filters": [{ "type": "equals", "field": "name", "value": "test" }],
            "sort": { "field": "name", "desc": true }
        })),
        ApiType::Default,
        &config(),
    );
    assert_json_eq!(
        result,
        json!({
            "filter": [
                { "field": "name", "type": "equals", "value": "test" },
                {
                    "type": "not",
                    "operator": "AND",
                    "queries": [{ "type": "equals", "field": "displayGroup", "value": null }]
                }
            ],
            "grouping": { "field": "displayGroup" },
            "sort": "-name",
            "limit": 10
        })
    );
}

#[test]
fn explicit_grouping_field() {
    let result = to_json(
        &SearchCriteria::new().with_grouping("displayGroup"),
        ApiType::Default,
        &config(),
    );
    assert_eq!(result["grouping"], json!({ "field": "displayGroup" }));
}

#[test]
fn associations_single_and_multiple() {
    let result = to_json(
        &SearchCriteria::new().with_association(Association::new("media")),
        ApiType::Default,
        &config(),
    );
    assert_eq!(result["associations"], json!({ "media": {} }));

    let result = to_json(
        &SearchCriteria::new()
            .with_association(Association::new("media").with(Association::new("cover")))
            .with_association(Association::new("stock")),
        ApiType::Default,
        &config(),
    );
    assert_eq!(
        result["associations"],
        json!({ "media": { "associations": { "cover": {} } }, "stock": {} })
    );
}

#[test]
fn empty_associations_still_emit_key() {
    let result = to_json(
        &criteria(json!({ "configuration": { "associations": [] } })),
        ApiType::Default,
        &config(),
    );
    assert_eq!(result["associations"], json!({}));
}

#[test]
fn deep_associations_are_mirrored() {
    let result = to_json(
        &criteria(json!({
            "configuration": {
                "associations": [{
                    "name": "cmsPage",
                    "associations": [{
                        "name": "sections",
                        "associations": [{ "name": "blocks", "associations": [{ "name": "slots" }] }]
                    }]
                }]
            }
        })),
        ApiType::Default,
        &config(),
    );
    assert_eq!(
        result["associations"],
        json!({
            "cmsPage": {
                "associations": {
                    "sections": {
                        "associations": {
                            "blocks": { "associations": { "slots": {} } }
                        }
                    }
                }
            }
        })
    );
}

#[test]
fn conversion_is_deterministic() {
    let criteria = SearchCriteria::new()
        .with_pagination(Pagination::new(Some(2), Some(25)))
        .with_sort(Sort::desc("price"))
        .with_filter(SearchFilter::equals_any("manufacturerId", ["a", "b"]))
        .with_term("shirt")
        .with_association(Association::new("media"));
    let config = config();

    for api_type in [ApiType::Store, ApiType::Default] {
        let first = convert(&criteria, api_type, &config);
        let second = convert(&criteria, api_type, &config);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
