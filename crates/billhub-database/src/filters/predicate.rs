//! WHERE-clause predicate tree rendered into a sqlx [`QueryBuilder`].
//!
//! Every caller-supplied value is pushed with `push_bind`; only column
//! names and fixed boolean flags are written into the SQL text.

use rust_decimal::Decimal;
use sqlx::{Postgres, QueryBuilder};

use billhub_core::types::ComparisonOp;

/// A value sent to PostgreSQL as a bind parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Int(i64),
    Decimal(Decimal),
    Text(String),
}

impl BindValue {
    fn push_to(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Self::Int(v) => {
                qb.push_bind(*v);
            }
            Self::Decimal(v) => {
                qb.push_bind(*v);
            }
            Self::Text(v) => {
                qb.push_bind(v.clone());
            }
        }
    }
}

/// A single condition or a parenthesised group of conditions.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `column <op> $n`
    Compare {
        column: String,
        op: ComparisonOp,
        value: BindValue,
    },
    /// `column BETWEEN $a AND $b`
    Between {
        column: String,
        low: BindValue,
        high: BindValue,
    },
    /// `column ILIKE $n`
    ILike { column: String, pattern: String },
    /// `column = true` / `column = false`
    Flag { column: String, value: bool },
    /// `column IS NULL`
    IsNull(String),
    /// `column IS NOT NULL`
    IsNotNull(String),
    /// `(a OR b OR ...)`; an empty group matches nothing.
    Any(Vec<Predicate>),
    /// `(a AND b AND ...)`; an empty group matches everything.
    All(Vec<Predicate>),
}

impl Predicate {
    pub fn compare(column: impl Into<String>, op: ComparisonOp, value: BindValue) -> Self {
        Self::Compare {
            column: column.into(),
            op,
            value,
        }
    }

    pub fn between(column: impl Into<String>, low: BindValue, high: BindValue) -> Self {
        Self::Between {
            column: column.into(),
            low,
            high,
        }
    }

    pub fn ilike(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::ILike {
            column: column.into(),
            pattern: pattern.into(),
        }
    }

    pub fn flag(column: impl Into<String>, value: bool) -> Self {
        Self::Flag {
            column: column.into(),
            value,
        }
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Self::IsNull(column.into())
    }

    pub fn is_not_null(column: impl Into<String>) -> Self {
        Self::IsNotNull(column.into())
    }

    /// Number of bind parameters this predicate contributes.
    pub fn bind_count(&self) -> usize {
        match self {
            Self::Compare { .. } | Self::ILike { .. } => 1,
            Self::Between { .. } => 2,
            Self::Flag { .. } | Self::IsNull(_) | Self::IsNotNull(_) => 0,
            Self::Any(group) | Self::All(group) => group.iter().map(Self::bind_count).sum(),
        }
    }

    /// Append this predicate to `qb`.
    pub fn push_to(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Self::Compare { column, op, value } => {
                qb.push(column).push(' ').push(op.as_sql()).push(' ');
                value.push_to(qb);
            }
            Self::Between { column, low, high } => {
                qb.push(column).push(" BETWEEN ");
                low.push_to(qb);
                qb.push(" AND ");
                high.push_to(qb);
            }
            Self::ILike { column, pattern } => {
                qb.push(column).push(" ILIKE ");
                qb.push_bind(pattern.clone());
            }
            Self::Flag { column, value } => {
                qb.push(format_args!("{column} = {value}"));
            }
            Self::IsNull(column) => {
                qb.push(column).push(" IS NULL");
            }
            Self::IsNotNull(column) => {
                qb.push(column).push(" IS NOT NULL");
            }
            Self::Any(group) => push_group(qb, group, " OR ", "FALSE"),
            Self::All(group) => push_group(qb, group, " AND ", "TRUE"),
        }
    }
}

fn push_group(
    qb: &mut QueryBuilder<'_, Postgres>,
    group: &[Predicate],
    separator: &str,
    when_empty: &str,
) {
    if group.is_empty() {
        qb.push(when_empty);
        return;
    }
    qb.push('(');
    for (i, predicate) in group.iter().enumerate() {
        if i > 0 {
            qb.push(separator);
        }
        predicate.push_to(qb);
    }
    qb.push(')');
}
