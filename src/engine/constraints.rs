//! Caller-supplied score thresholds and the matcher that checks them.
//!
//! A [`ConstraintKey`] names either a whole category (checked against the
//! category average) or a single `category.subfeature` score. Missing paths
//! read as 0 before comparing.

use super::aggregate::category_average_or_zero;
use crate::error::{AbusError, Result};
use crate::types::model::Model;
use crate::types::scoring::Score;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConstraintKey {
    Category(String),
    Subfeature { category: String, subfeature: String },
}

impl ConstraintKey {
    pub fn category(name: impl Into<String>) -> Self {
        Self::Category(name.into())
    }

    pub fn subfeature(category: impl Into<String>, subfeature: impl Into<String>) -> Self {
        Self::Subfeature {
            category: category.into(),
            subfeature: subfeature.into(),
        }
    }

    /// The value this key is compared against for `model`.
    pub fn observed(&self, model: &Model) -> Score {
        match self {
            Self::Category(category) => category_average_or_zero(model.category(category)),
            Self::Subfeature {
                category,
                subfeature,
            } => model.subfeature_score(category, subfeature),
        }
    }
}

impl FromStr for ConstraintKey {
    type Err = AbusError;

    fn from_str(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.contains(['<', '>', '=']) {
            return Err(AbusError::InvalidConstraint(format!(
                "constraint key must not contain a comparison operator: {raw:?}"
            )));
        }
        let key = match raw.split_once('.') {
            Some((category, subfeature)) => {
                Self::subfeature(category.trim(), subfeature.trim())
            }
            None => Self::category(raw),
        };
        let has_empty_segment = match &key {
            Self::Category(category) => category.is_empty(),
            Self::Subfeature {
                category,
                subfeature,
            } => category.is_empty() || subfeature.is_empty(),
        };
        if has_empty_segment {
            return Err(AbusError::InvalidConstraint(format!(
                "constraint key must be `category` or `category.subfeature`: {raw:?}"
            )));
        }
        Ok(key)
    }
}

impl fmt::Display for ConstraintKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(category) => write!(f, "{category}"),
            Self::Subfeature {
                category,
                subfeature,
            } => write!(f, "{category}.{subfeature}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    AtLeast,
    Above,
    AtMost,
    Below,
    Equal,
}

impl Comparison {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AtLeast => ">=",
            Self::Above => ">",
            Self::AtMost => "<=",
            Self::Below => "<",
            Self::Equal => "==",
        }
    }

    fn holds(self, observed: Score, threshold: Score) -> bool {
        match self {
            Self::AtLeast => observed >= threshold,
            Self::Above => observed > threshold,
            Self::AtMost => observed <= threshold,
            Self::Below => observed < threshold,
            Self::Equal => observed == threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub comparison: Comparison,
    pub threshold: Score,
}

impl Bound {
    /// Inclusive minimum score.
    pub fn at_least(threshold: Score) -> Self {
        Self {
            comparison: Comparison::AtLeast,
            threshold,
        }
    }

    pub fn is_satisfied_by(&self, observed: Score) -> bool {
        self.comparison.holds(observed, self.threshold)
    }
}

/// Constraint key to bound. An empty set matches every model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintSet {
    bounds: BTreeMap<ConstraintKey, Bound>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ConstraintSet::insert_min`].
    pub fn with_min(mut self, key: ConstraintKey, threshold: Score) -> Self {
        self.insert_min(key, threshold);
        self
    }

    pub fn insert_min(&mut self, key: ConstraintKey, threshold: Score) -> Option<Bound> {
        self.insert(key, Bound::at_least(threshold))
    }

    /// Adds a bound, replacing any earlier bound on the same key.
    pub fn insert(&mut self, key: ConstraintKey, bound: Bound) -> Option<Bound> {
        self.bounds.insert(key, bound)
    }

    /// Overlays `other` on top of `self`; keys present in both take `other`'s bound.
    pub fn extend(&mut self, other: ConstraintSet) {
        self.bounds.extend(other.bounds);
    }

    pub fn get(&self, key: &ConstraintKey) -> Option<&Bound> {
        self.bounds.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ConstraintKey, &Bound)> {
        self.bounds.iter()
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Parses `KEY=VALUE` as an inclusive minimum.
    pub fn parse_min(&mut self, raw: &str) -> Result<()> {
        let (key, value) = raw.split_once('=').ok_or_else(|| {
            AbusError::InvalidConstraint(format!("expected KEY=VALUE, found {raw:?}"))
        })?;
        let key = key.parse::<ConstraintKey>()?;
        let threshold = parse_threshold(value)?;
        self.insert_min(key, threshold);
        Ok(())
    }

    /// Parses `KEY OP VALUE` where OP is one of `>=`, `>`, `<=`, `<`, `==`.
    pub fn parse_expr(&mut self, raw: &str) -> Result<()> {
        let (key, bound) = parse_expression(raw)?;
        self.insert(key, bound);
        Ok(())
    }

    /// Human-readable form of every bound, e.g. `usability.docs >= 1.5`.
    pub fn describe(&self) -> Vec<String> {
        self.bounds
            .iter()
            .map(|(key, bound)| format!("{key} {} {}", bound.comparison.as_str(), bound.threshold))
            .collect()
    }
}

/// True iff every constraint holds for `model`.
pub fn matches(model: &Model, constraints: &ConstraintSet) -> bool {
    constraints
        .iter()
        .all(|(key, bound)| bound.is_satisfied_by(key.observed(model)))
}

/// Keys whose bound `model` fails, in key order.
pub fn failing<'a>(model: &Model, constraints: &'a ConstraintSet) -> Vec<&'a ConstraintKey> {
    constraints
        .iter()
        .filter(|(key, bound)| !bound.is_satisfied_by(key.observed(model)))
        .map(|(key, _)| key)
        .collect()
}

fn parse_expression(raw: &str) -> Result<(ConstraintKey, Bound)> {
    // Two-character operators first so `>=` is not read as `>`.
    const OPERATORS: [(&str, Comparison); 5] = [
        (">=", Comparison::AtLeast),
        ("<=", Comparison::AtMost),
        ("==", Comparison::Equal),
        (">", Comparison::Above),
        ("<", Comparison::Below),
    ];

    for (token, comparison) in OPERATORS {
        if let Some((key, value)) = raw.split_once(token) {
            let key = key.parse::<ConstraintKey>()?;
            let threshold = parse_threshold(value)?;
            return Ok((
                key,
                Bound {
                    comparison,
                    threshold,
                },
            ));
        }
    }

    Err(AbusError::InvalidConstraint(format!(
        "expected KEY OP VALUE with OP in >=, >, <=, <, ==; found {raw:?}"
    )))
}

pub(crate) fn parse_threshold(raw: &str) -> Result<Score> {
    let threshold = raw.trim().parse::<Score>().map_err(|_| {
        AbusError::InvalidConstraint(format!("threshold must be a number, found {:?}", raw.trim()))
    })?;
    if !threshold.is_finite() {
        return Err(AbusError::InvalidConstraint(format!(
            "threshold must be finite, found {threshold}"
        )));
    }
    Ok(threshold)
}
