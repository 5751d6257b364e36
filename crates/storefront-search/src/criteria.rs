//! Abstract search criteria.
//!
//! These types mirror the JSON shape the UI layer produces, so they can be
//! deserialized directly from request state. None of them depend on which
//! API surface the criteria will eventually be sent to.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A node of the filter tree, discriminated by its `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SearchFilter {
    /// `field` equals a single value.
    Equals {
        field: String,
        #[serde(default)]
        value: Value,
    },
    /// `field` equals any of the listed values.
    EqualsAny {
        field: String,
        #[serde(default)]
        value: Vec<Value>,
    },
    /// `field` lies within the given bounds.
    Range {
        field: String,
        #[serde(default)]
        parameters: RangeParameters,
    },
    /// Boolean combination of nested filters.
    Multi {
        operator: MultiOperator,
        #[serde(default)]
        queries: Vec<SearchFilter>,
    },
    /// Negated combination of nested filters.
    Not {
        #[serde(default)]
        operator: MultiOperator,
        #[serde(default)]
        queries: Vec<SearchFilter>,
    },
}

impl SearchFilter {
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn equals_any<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::EqualsAny {
            field: field.into(),
            value: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn range(field: impl Into<String>, parameters: RangeParameters) -> Self {
        Self::Range {
            field: field.into(),
            parameters,
        }
    }

    pub fn multi(operator: MultiOperator, queries: Vec<SearchFilter>) -> Self {
        Self::Multi { operator, queries }
    }

    pub fn not(operator: MultiOperator, queries: Vec<SearchFilter>) -> Self {
        Self::Not { operator, queries }
    }

    /// Field the filter constrains. Combinators have none.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Equals { field, .. } | Self::EqualsAny { field, .. } | Self::Range { field, .. } => {
                Some(field.as_str())
            }
            Self::Multi { .. } | Self::Not { .. } => None,
        }
    }

    /// Wire name of the filter type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Equals { .. } => "equals",
            Self::EqualsAny { .. } => "equalsAny",
            Self::Range { .. } => "range",
            Self::Multi { .. } => "multi",
            Self::Not { .. } => "not",
        }
    }
}

/// Operator joining the children of a `multi` or `not` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MultiOperator {
    #[default]
    #[serde(rename = "AND", alias = "and")]
    And,
    #[serde(rename = "OR", alias = "or")]
    Or,
}

impl MultiOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Bounds of a `range` filter. Numbers are kept exactly as provided.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gte: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<Number>,
}

impl RangeParameters {
    #[must_use]
    pub fn gte(mut self, bound: impl Into<Number>) -> Self {
        self.gte = Some(bound.into());
        self
    }

    #[must_use]
    pub fn gt(mut self, bound: impl Into<Number>) -> Self {
        self.gt = Some(bound.into());
        self
    }

    #[must_use]
    pub fn lte(mut self, bound: impl Into<Number>) -> Self {
        self.lte = Some(bound.into());
        self
    }

    #[must_use]
    pub fn lt(mut self, bound: impl Into<Number>) -> Self {
        self.lt = Some(bound.into());
        self
    }

    /// Lower bound, inclusive or not.
    pub fn lower(&self) -> Option<&Number> {
        self.gte.as_ref().or(self.gt.as_ref())
    }

    /// Upper bound, inclusive or not.
    pub fn upper(&self) -> Option<&Number> {
        self.lte.as_ref().or(self.lt.as_ref())
    }
}

/// Content of the criteria's `filters` key.
///
/// A list is the regular filter set. Anything that is a JSON object instead
/// (typically `{}` from a half-initialised listing state) means "no
/// constraints" and reduces the conversion to pagination only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterInput {
    List(Vec<SearchFilter>),
    Object(Map<String, Value>),
}

impl FilterInput {
    pub fn as_list(&self) -> Option<&[SearchFilter]> {
        match self {
            Self::List(filters) => Some(filters),
            Self::Object(_) => None,
        }
    }
}

impl From<Vec<SearchFilter>> for FilterInput {
    fn from(filters: Vec<SearchFilter>) -> Self {
        Self::List(filters)
    }
}

/// Page sizes the backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum PaginationLimit {
    One = 1,
    Five = 5,
    Ten = 10,
    TwentyFive = 25,
    Fifty = 50,
    SeventyFive = 75,
    Hundred = 100,
    FiveHundred = 500,
}

impl PaginationLimit {
    pub const ALL: [PaginationLimit; 8] = [
        Self::One,
        Self::Five,
        Self::Ten,
        Self::TwentyFive,
        Self::Fifty,
        Self::SeventyFive,
        Self::Hundred,
        Self::FiveHundred,
    ];

    pub fn value(self) -> u32 {
        self as u32
    }

    pub fn values() -> Vec<u32> {
        Self::ALL.iter().map(|limit| limit.value()).collect()
    }
}

/// Page selection. Both fields absent is the "no pagination at all" form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl Pagination {
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self { page, limit }
    }

    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            limit: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.page.is_none() && self.limit.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    #[serde(default)]
    pub desc: bool,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            desc: false,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            desc: true,
        }
    }
}

/// Relation to load alongside the result, optionally with its own relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associations: Option<Vec<Association>>,
}

impl Association {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            associations: None,
        }
    }

    #[must_use]
    pub fn with(mut self, child: Association) -> Self {
        self.associations.get_or_insert_with(Vec::new).push(child);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grouping {
    pub field: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaConfiguration {
    /// Return parent products instead of collapsing variants by display group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_parents: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouping: Option<Grouping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associations: Option<Vec<Association>>,
}

/// Everything a listing or search request can ask for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<CriteriaConfiguration>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Append a filter, turning a degenerate object input into a list.
    #[must_use]
    pub fn with_filter(mut self, filter: SearchFilter) -> Self {
        match &mut self.filters {
            Some(FilterInput::List(filters)) => filters.push(filter),
            _ => self.filters = Some(FilterInput::List(vec![filter])),
        }
        self
    }

    #[must_use]
    pub fn with_filters(mut self, filters: impl Into<FilterInput>) -> Self {
        self.filters = Some(filters.into());
        self
    }

    #[must_use]
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    #[must_use]
    pub fn with_display_parents(mut self, display_parents: bool) -> Self {
        self.configuration_mut().display_parents = Some(display_parents);
        self
    }

    #[must_use]
    pub fn with_grouping(mut self, field: impl Into<String>) -> Self {
        self.configuration_mut().grouping = Some(Grouping {
            field: field.into(),
        });
        self
    }

    #[must_use]
    pub fn with_association(mut self, association: Association) -> Self {
        self.configuration_mut()
            .associations
            .get_or_insert_with(Vec::new)
            .push(association);
        self
    }

    fn configuration_mut(&mut self) -> &mut CriteriaConfiguration {
        self.configuration.get_or_insert_with(Default::default)
    }
}
