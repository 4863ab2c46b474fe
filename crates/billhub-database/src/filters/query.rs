//! An in-progress SELECT statement that filters append to.

use sqlx::{Postgres, QueryBuilder};

use billhub_core::result::AppResult;
use billhub_core::types::{PageRequest, SortDirection};

use super::predicate::Predicate;

/// One `ORDER BY` term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTerm {
    pub column: String,
    pub direction: SortDirection,
}

/// A SELECT with a fixed projection and FROM/JOIN shape, plus the WHERE
/// predicates (ANDed in insertion order) and ORDER BY terms appended by
/// filters.
///
/// The statement is plain data until rendered, so each render produces a
/// fresh [`QueryBuilder`] with its own bind arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    projection: &'static str,
    from: &'static str,
    predicates: Vec<Predicate>,
    order_by: Vec<OrderTerm>,
}

impl SelectQuery {
    /// Create a statement selecting `projection` from `from`.
    pub fn new(projection: &'static str, from: &'static str) -> Self {
        Self {
            projection,
            from,
            predicates: Vec::new(),
            order_by: Vec::new(),
        }
    }

    /// AND a predicate onto the WHERE clause.
    pub fn and_where(&mut self, predicate: Predicate) -> &mut Self {
        self.predicates.push(predicate);
        self
    }

    /// Append an ORDER BY term.
    pub fn order_by(&mut self, column: impl Into<String>, direction: SortDirection) -> &mut Self {
        self.order_by.push(OrderTerm {
            column: column.into(),
            direction,
        });
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn order_terms(&self) -> &[OrderTerm] {
        &self.order_by
    }

    pub fn has_order(&self) -> bool {
        !self.order_by.is_empty()
    }

    /// Total number of bind parameters in the WHERE clause.
    pub fn bind_count(&self) -> usize {
        self.predicates.iter().map(Predicate::bind_count).sum()
    }

    /// Render the full statement: projection, WHERE and ORDER BY.
    pub fn to_builder(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("");
        self.push_filtered(&mut qb);
        self.push_order(&mut qb);
        qb
    }

    /// Render `SELECT COUNT(*)` over the filtered rows, ignoring ORDER BY.
    pub fn to_count_builder(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM (");
        self.push_filtered(&mut qb);
        qb.push(") AS filtered");
        qb
    }

    /// Render the full statement limited to one page.
    ///
    /// Fails with a validation error when the page's row offset does not
    /// fit in a `BIGINT`.
    pub fn to_page_builder(
        &self,
        page: &PageRequest,
    ) -> AppResult<QueryBuilder<'static, Postgres>> {
        let offset = page.checked_offset()?;
        let mut qb = self.to_builder();
        qb.push(" LIMIT ").push_bind(page.limit());
        qb.push(" OFFSET ").push_bind(offset);
        Ok(qb)
    }

    /// The rendered SQL text with `$n` placeholders.
    pub fn sql(&self) -> String {
        self.to_builder().sql().to_string()
    }

    fn push_filtered(&self, qb: &mut QueryBuilder<'static, Postgres>) {
        qb.push("SELECT ")
            .push(self.projection)
            .push(" FROM ")
            .push(self.from);
        for (i, predicate) in self.predicates.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            predicate.push_to(qb);
        }
    }

    fn push_order(&self, qb: &mut QueryBuilder<'static, Postgres>) {
        for (i, term) in self.order_by.iter().enumerate() {
            qb.push(if i == 0 { " ORDER BY " } else { ", " });
            qb.push(&term.column).push(' ').push(term.direction.as_sql());
        }
    }
}

#[cfg(test)]
mod tests {
    use billhub_core::types::ComparisonOp;

    use super::super::predicate::BindValue;
    use super::*;

    fn query() -> SelectQuery {
        let mut q = SelectQuery::new("t.id, t.name", "t");
        q.and_where(Predicate::compare("t.id", ComparisonOp::Gte, BindValue::Int(3)))
            .and_where(Predicate::is_null("t.deleted_at"))
            .order_by("t.name", SortDirection::Desc)
            .order_by("t.id", SortDirection::Asc);
        q
    }

    #[test]
    fn test_full_statement() {
        assert_eq!(
            query().sql(),
            "SELECT t.id, t.name FROM t WHERE t.id >= $1 AND t.deleted_at IS NULL ORDER BY t.name DESC, t.id ASC"
        );
    }

    #[test]
    fn test_count_drops_order() {
        assert_eq!(
            query().to_count_builder().sql(),
            "SELECT COUNT(*) FROM (SELECT t.id, t.name FROM t WHERE t.id >= $1 AND t.deleted_at IS NULL) AS filtered"
        );
    }

    #[test]
    fn test_page_binds_follow_predicates() {
        let page = PageRequest::new(2, 10, 100);
        let Ok(qb) = query().to_page_builder(&page) else {
            panic!("page 2 should render");
        };
        assert!(qb.sql().ends_with("ORDER BY t.name DESC, t.id ASC LIMIT $2 OFFSET $3"));
    }

    #[test]
    fn test_page_with_unrepresentable_offset_is_rejected() {
        let page = PageRequest::new(u64::MAX, 10, 100);
        let Err(err) = query().to_page_builder(&page) else {
            panic!("page {} should not render", page.page);
        };
        assert!(err.is_validation());
    }

    #[test]
    fn test_no_predicates() {
        let q = SelectQuery::new("*", "t");
        assert_eq!(q.sql(), "SELECT * FROM t");
        assert_eq!(q.bind_count(), 0);
        assert!(!q.has_order());
    }
}
