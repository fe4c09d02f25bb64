//! # Property Search
//!
//! Builds the parameterized SQL used to list properties with optional filters.
//!
//! ## Query Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SELECT properties.*, ratings.average_rating                           │
//! │  FROM properties LEFT JOIN (per-property avg(rating)) AS ratings       │
//! │                                                                         │
//! │  WHERE city LIKE $1                      ← location (if given)         │
//! │    AND cost_per_night >= $2              ← min price (if given)        │
//! │    AND cost_per_night <= $3              ← max price (if given)        │
//! │    AND ratings.average_rating >= $4      ← min rating (if given)       │
//! │                                                                         │
//! │  GROUP BY properties.id                                                 │
//! │  ORDER BY cost_per_night, properties.id                                 │
//! │  LIMIT $n                                ← always the last parameter   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Filters are appended in the fixed order above. The first one present opens
//! the `WHERE`; every later one is joined with `AND`. Placeholders are numbered
//! from the parameter list as it grows, so `$n` always names the n-th value.
//! Filter values never appear in the SQL text.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::DEFAULT_RESULT_LIMIT;

/// Catalog joined with per-property average ratings.
///
/// Ratings are aggregated per property in a derived table, which makes the
/// minimum-rating filter a plain `WHERE` predicate. Properties without
/// reviews carry a `NULL` average.
const BASE_QUERY: &str = "SELECT properties.*, ratings.average_rating
FROM properties
LEFT JOIN (
  SELECT property_id, avg(rating) AS average_rating
  FROM property_reviews
  GROUP BY property_id
) AS ratings ON ratings.property_id = properties.id";

// =============================================================================
// Filter Criteria
// =============================================================================

/// Optional, independent search filters.
///
/// Absent and "falsy" values (empty string, zero, `NaN`) mean the filter is
/// not specified and add no predicate. Field names on the wire follow the
/// search form (`city`, `minimum_price_per_night`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Case-sensitive substring of the city.
    #[serde(alias = "locationSubstring")]
    pub city: Option<String>,

    /// Inclusive lower bound on the nightly rate, in cents.
    #[serde(rename = "minimum_price_per_night", alias = "minPricePerNight")]
    pub min_price_per_night: Option<Money>,

    /// Inclusive upper bound on the nightly rate, in cents.
    #[serde(rename = "maximum_price_per_night", alias = "maxPricePerNight")]
    pub max_price_per_night: Option<Money>,

    /// Inclusive lower bound on the average rating (0-5 scale).
    #[serde(rename = "minimum_rating", alias = "minRating")]
    pub min_rating: Option<f64>,
}

impl FilterCriteria {
    /// Location filter, if specified.
    pub fn location(&self) -> Option<&str> {
        self.city.as_deref().filter(|city| !city.is_empty())
    }

    /// Minimum price filter, if specified.
    pub fn min_price(&self) -> Option<Money> {
        self.min_price_per_night.filter(|price| !price.is_zero())
    }

    /// Maximum price filter, if specified.
    pub fn max_price(&self) -> Option<Money> {
        self.max_price_per_night.filter(|price| !price.is_zero())
    }

    /// Minimum rating filter, if specified.
    pub fn min_rating(&self) -> Option<f64> {
        self.min_rating
            .filter(|rating| *rating != 0.0 && !rating.is_nan())
    }

    /// Number of filters that will produce a predicate.
    pub fn active_filters(&self) -> usize {
        [
            self.location().is_some(),
            self.min_price().is_some(),
            self.max_price().is_some(),
            self.min_rating().is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    /// True when no filter is specified.
    pub fn is_empty(&self) -> bool {
        self.active_filters() == 0
    }
}

// =============================================================================
// Result Limit
// =============================================================================

/// Maximum number of rows to return.
///
/// Anything that is not a positive integer is coerced to the default of 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct ResultLimit(i64);

impl ResultLimit {
    /// Creates a limit, substituting the default for zero or negative values.
    ///
    /// ## Example
    /// ```rust
    /// use lightbnb_core::search::ResultLimit;
    ///
    /// assert_eq!(ResultLimit::new(25).get(), 25);
    /// assert_eq!(ResultLimit::new(0).get(), 10);
    /// assert_eq!(ResultLimit::new(-4).get(), 10);
    /// ```
    pub const fn new(limit: i64) -> Self {
        if limit > 0 {
            ResultLimit(limit)
        } else {
            ResultLimit(DEFAULT_RESULT_LIMIT)
        }
    }

    /// Returns the limit value.
    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl Default for ResultLimit {
    fn default() -> Self {
        ResultLimit(DEFAULT_RESULT_LIMIT)
    }
}

impl From<i64> for ResultLimit {
    fn from(limit: i64) -> Self {
        ResultLimit::new(limit)
    }
}

impl From<ResultLimit> for i64 {
    fn from(limit: ResultLimit) -> Self {
        limit.0
    }
}

impl From<Option<i64>> for ResultLimit {
    fn from(limit: Option<i64>) -> Self {
        limit.map(ResultLimit::new).unwrap_or_default()
    }
}

// =============================================================================
// Parameterized Query
// =============================================================================

/// A single bound value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryParam {
    Text(String),
    Int(i64),
    Real(f64),
}

/// SQL text plus its positional parameters.
///
/// The n-th `$n` placeholder in [`sql`](Self::sql) refers to the n-th element
/// of [`params`](Self::params) (1-indexed).
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterizedQuery {
    sql: String,
    params: Vec<QueryParam>,
}

impl ParameterizedQuery {
    /// The SQL text with `$n` placeholders.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Parameters in placeholder order.
    pub fn params(&self) -> &[QueryParam] {
        &self.params
    }

    /// Splits into SQL text and parameters.
    pub fn into_parts(self) -> (String, Vec<QueryParam>) {
        (self.sql, self.params)
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Accumulates predicates onto a base query.
///
/// `predicates` decides between `WHERE` and `AND`; the SQL text is never
/// inspected for that.
struct PredicateChain {
    sql: String,
    params: Vec<QueryParam>,
    predicates: usize,
}

impl PredicateChain {
    fn new(base: &str) -> Self {
        PredicateChain {
            sql: base.to_string(),
            params: Vec::new(),
            predicates: 0,
        }
    }

    /// Appends a value and returns its 1-based placeholder index.
    fn bind(&mut self, value: QueryParam) -> usize {
        self.params.push(value);
        self.params.len()
    }

    /// Appends `<lhs> <op> $n` as the next conjunct.
    fn and_where(&mut self, lhs: &str, op: &str, value: QueryParam) {
        let placeholder = self.bind(value);
        let keyword = if self.predicates == 0 { "\nWHERE" } else { " AND" };
        self.predicates += 1;
        self.sql
            .push_str(&format!("{keyword} {lhs} {op} ${placeholder}"));
    }

    /// Appends grouping, ordering and the limit, which is always bound last.
    fn finish(mut self, limit: ResultLimit) -> ParameterizedQuery {
        let placeholder = self.bind(QueryParam::Int(limit.get()));
        self.sql.push_str(&format!(
            "\nGROUP BY properties.id\nORDER BY cost_per_night, properties.id\nLIMIT ${placeholder};"
        ));

        ParameterizedQuery {
            sql: self.sql,
            params: self.params,
        }
    }
}

/// Builds the property search query for the given filters and limit.
///
/// Pure and deterministic: the same inputs always produce byte-identical SQL
/// and parameters.
///
/// ## Example
/// ```rust
/// use lightbnb_core::money::Money;
/// use lightbnb_core::search::{build_property_search, FilterCriteria, QueryParam, ResultLimit};
///
/// let criteria = FilterCriteria {
///     min_price_per_night: Some(Money::from_cents(50)),
///     max_price_per_night: Some(Money::from_cents(150)),
///     ..FilterCriteria::default()
/// };
/// let query = build_property_search(&criteria, ResultLimit::default());
///
/// assert!(query
///     .sql()
///     .contains("WHERE cost_per_night >= $1 AND cost_per_night <= $2"));
/// assert!(query.sql().contains("LIMIT $3"));
/// assert_eq!(
///     query.params(),
///     &[QueryParam::Int(50), QueryParam::Int(150), QueryParam::Int(10)]
/// );
/// ```
pub fn build_property_search(criteria: &FilterCriteria, limit: ResultLimit) -> ParameterizedQuery {
    let mut chain = PredicateChain::new(BASE_QUERY);

    if let Some(city) = criteria.location() {
        chain.and_where("city", "LIKE", QueryParam::Text(format!("%{city}%")));
    }

    if let Some(min) = criteria.min_price() {
        chain.and_where("cost_per_night", ">=", QueryParam::Int(min.cents()));
    }

    if let Some(max) = criteria.max_price() {
        chain.and_where("cost_per_night", "<=", QueryParam::Int(max.cents()));
    }

    if let Some(rating) = criteria.min_rating() {
        chain.and_where("ratings.average_rating", ">=", QueryParam::Real(rating));
    }

    chain.finish(limit)
}

// =============================================================================
// Unit Tests
// =============================================================================
