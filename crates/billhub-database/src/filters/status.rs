//! Soft-delete status predicates shared by list filters.

use billhub_entity::client::RecordStatus;

use super::predicate::Predicate;

/// Tables that soft delete through `deleted_at` only and have no
/// `is_deleted` column.
const TABLES_WITHOUT_IS_DELETED: &[&str] = &["users"];

/// Build the disjunction matching rows of `table` in any of `statuses`.
///
/// The group always starts with `{table}.id IS NULL`, which never holds
/// for a real row, so a list with no known statuses matches nothing.
pub fn status_predicate(table: &str, statuses: &[RecordStatus]) -> Predicate {
    let mut any = vec![Predicate::is_null(format!("{table}.id"))];

    if statuses.contains(&RecordStatus::Active) {
        any.push(Predicate::is_null(format!("{table}.deleted_at")));
    }

    if statuses.contains(&RecordStatus::Archived) {
        let mut archived = vec![Predicate::is_not_null(format!("{table}.deleted_at"))];
        if !TABLES_WITHOUT_IS_DELETED.iter().any(|t| *t == table) {
            archived.push(Predicate::flag(format!("{table}.is_deleted"), false));
        }
        any.push(Predicate::All(archived));
    }

    if statuses.contains(&RecordStatus::Deleted) {
        any.push(Predicate::flag(format!("{table}.is_deleted"), true));
    }

    Predicate::Any(any)
}
