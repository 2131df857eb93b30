//! Search request building

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single narrowing clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Clause {
    /// Numeric range on one field
    Range(RangeClause),

    /// Exact value match
    Term { field: String, value: String },

    /// Any of the given values
    Terms { field: String, values: Vec<String> },
}

impl Clause {
    /// Inclusive range `[lower, upper]`
    pub fn range(field: impl Into<String>, lower: f64, upper: f64) -> Self {
        Clause::Range(RangeClause {
            field: field.into(),
            lower: Some(lower),
            upper: Some(upper),
            inclusive: true,
        })
    }

    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        Clause::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn terms(field: impl Into<String>, values: Vec<String>) -> Self {
        Clause::Terms {
            field: field.into(),
            values,
        }
    }

    /// Document field the clause applies to
    pub fn field(&self) -> &str {
        match self {
            Clause::Range(range) => &range.field,
            Clause::Term { field, .. } | Clause::Terms { field, .. } => field,
        }
    }
}

/// Range clause with optional open ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeClause {
    pub field: String,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    /// `true` for `gte`/`lte`, `false` for `gt`/`lt`
    pub inclusive: bool,
}

impl RangeClause {
    /// Check whether a value falls inside the range
    pub fn contains(&self, value: f64) -> bool {
        let above = match self.lower {
            Some(lower) if self.inclusive => value >= lower,
            Some(lower) => value > lower,
            None => true,
        };
        let below = match self.upper {
            Some(upper) if self.inclusive => value <= upper,
            Some(upper) => value < upper,
            None => true,
        };
        above && below
    }
}

/// Aggregation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AggregationRequest {
    /// count/min/max/avg/sum over a numeric field
    Stats { field: String },

    /// Document counts per distinct value
    Terms { field: String, size: Option<usize> },
}

impl AggregationRequest {
    pub fn field(&self) -> &str {
        match self {
            AggregationRequest::Stats { field } | AggregationRequest::Terms { field, .. } => field,
        }
    }
}

/// Engine-neutral search request.
///
/// `query` clauses narrow both hits and aggregations, `post_filters` narrow only
/// the hits. Filters add their narrowing as post filters so their own aggregations
/// stay unaffected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: Vec<Clause>,
    pub post_filters: Vec<Clause>,
    pub aggregations: IndexMap<String, AggregationRequest>,
    pub from: usize,
    /// `None` returns every matching document
    pub size: Option<usize>,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clause narrowing both hits and aggregations
    pub fn add_query(&mut self, clause: Clause) -> &mut Self {
        self.query.push(clause);
        self
    }

    /// Add a clause narrowing only the hits
    pub fn add_post_filter(&mut self, clause: Clause) -> &mut Self {
        self.post_filters.push(clause);
        self
    }

    /// Register an aggregation under `name`, replacing any previous one
    pub fn add_aggregation(
        &mut self,
        name: impl Into<String>,
        aggregation: AggregationRequest,
    ) -> &mut Self {
        self.aggregations.insert(name.into(), aggregation);
        self
    }

    pub fn set_pagination(&mut self, from: usize, size: usize) -> &mut Self {
        self.from = from;
        self.size = Some(size);
        self
    }

    /// Move every post filter into the query so it also narrows aggregations
    pub fn promote_post_filters(&mut self) -> &mut Self {
        let post_filters = std::mem::take(&mut self.post_filters);
        self.query.extend(post_filters);
        self
    }

    pub fn aggregation(&self, name: &str) -> Option<&AggregationRequest> {
        self.aggregations.get(name)
    }
}
