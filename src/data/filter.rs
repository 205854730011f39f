use std::ops::Not;

use super::model::{AuctionDataset, Column, PlayerRecord, ReservePrice};

// ---------------------------------------------------------------------------
// Filter predicate: a composable row test
// ---------------------------------------------------------------------------

/// What an empty multiselect means for a membership test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptySelection {
    /// Nothing selected → the dimension is not filtered.
    MatchAll,
    /// Nothing selected → nothing passes.
    MatchNone,
}

/// A row predicate built from named parts.
///
/// Views compose these with [`Predicate::and`], [`Predicate::or`] and `!`
/// instead of chaining boolean masks, so every filter can be logged and
/// inspected as a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Always,
    TextEquals(Column, String),
    NumberEquals(Column, f64),
    TextIn {
        column: Column,
        values: Vec<String>,
        when_empty: EmptySelection,
    },
    PriceIn(Vec<ReservePrice>),
    Not(Box<Predicate>),
    All(Vec<Predicate>),
    Any(Vec<Predicate>),
}

impl Predicate {
    pub fn text_eq(column: Column, value: impl Into<String>) -> Self {
        Predicate::TextEquals(column, value.into())
    }

    pub fn text_ne(column: Column, value: impl Into<String>) -> Self {
        !Predicate::text_eq(column, value)
    }

    pub fn number_eq(column: Column, value: f64) -> Self {
        Predicate::NumberEquals(column, value)
    }

    pub fn number_ne(column: Column, value: f64) -> Self {
        !Predicate::number_eq(column, value)
    }

    pub fn text_in(column: Column, values: &[String], when_empty: EmptySelection) -> Self {
        Predicate::TextIn {
            column,
            values: values.to_vec(),
            when_empty,
        }
    }

    /// Reserve price membership. An empty selection matches nothing.
    pub fn price_in(prices: &[ReservePrice]) -> Self {
        Predicate::PriceIn(prices.to_vec())
    }

    /// Conjunction, flattening nested `All`s.
    pub fn and(self, other: Predicate) -> Self {
        match (self, other) {
            (Predicate::Always, p) | (p, Predicate::Always) => p,
            (Predicate::All(mut parts), Predicate::All(more)) => {
                parts.extend(more);
                Predicate::All(parts)
            }
            (Predicate::All(mut parts), p) => {
                parts.push(p);
                Predicate::All(parts)
            }
            (p, q) => Predicate::All(vec![p, q]),
        }
    }

    /// Disjunction, flattening nested `Any`s.
    pub fn or(self, other: Predicate) -> Self {
        match (self, other) {
            (Predicate::Any(mut parts), Predicate::Any(more)) => {
                parts.extend(more);
                Predicate::Any(parts)
            }
            (Predicate::Any(mut parts), p) => {
                parts.push(p);
                Predicate::Any(parts)
            }
            (p, q) => Predicate::Any(vec![p, q]),
        }
    }

    pub fn matches(&self, record: &PlayerRecord) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::TextEquals(column, value) => record.text(*column) == Some(value.as_str()),
            Predicate::NumberEquals(column, value) => record.number(*column) == Some(*value),
            Predicate::TextIn {
                column,
                values,
                when_empty,
            } => {
                if values.is_empty() {
                    return *when_empty == EmptySelection::MatchAll;
                }
                record
                    .text(*column)
                    .is_some_and(|v| values.iter().any(|s| s == v))
            }
            Predicate::PriceIn(prices) => prices.contains(&record.reserve_price),
            Predicate::Not(inner) => !inner.matches(record),
            Predicate::All(parts) => parts.iter().all(|p| p.matches(record)),
            Predicate::Any(parts) => parts.iter().any(|p| p.matches(record)),
        }
    }
}

impl Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Predicate {
        match self {
            Predicate::Not(inner) => *inner,
            p => Predicate::Not(Box::new(p)),
        }
    }
}

/// Return indices of records that pass the predicate, in table order.
pub fn filtered_indices(dataset: &AuctionDataset, predicate: &Predicate) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| predicate.matches(r))
        .map(|(i, _)| i)
        .collect()
}
