//! Filters for the tenant-scoped client list.
//!
//! Each filter takes the raw request token. An empty token leaves the
//! query untouched; anything else appends exactly one predicate (or one
//! ORDER BY term for [`ClientFilters::sort`]). Malformed tokens are
//! rejected with a validation error naming the parameter.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::trace;

use billhub_core::error::AppError;
use billhub_core::result::AppResult;
use billhub_core::types::{ClientId, CompanyId, ComparisonOp, SortDirection, SortField};
use billhub_entity::client::RecordStatus;

use super::params::ClientListParams;
use super::predicate::{BindValue, Predicate};
use super::query::SelectQuery;
use super::status::status_predicate;

const TABLE: &str = "clients";
const BALANCE: &str = "clients.balance";

/// Columns searched by [`ClientFilters::filter`].
const SEARCH_COLUMNS: [&str; 5] = [
    "clients.name",
    "clients.id_number",
    "client_contacts.first_name",
    "client_contacts.last_name",
    "client_contacts.email",
];

const PROJECTION: &str = "COALESCE(clients.currency_id, companies.currency_id) AS currency_id, \
     COALESCE(clients.country_id, companies.country_id) AS country_id, \
     CONCAT(COALESCE(client_contacts.first_name, ''), ' ', COALESCE(client_contacts.last_name, '')) AS contact, \
     clients.id, clients.name, clients.private_notes, \
     client_contacts.first_name, client_contacts.last_name, \
     clients.balance, clients.last_login, clients.created_at, \
     clients.created_at AS client_created_at, \
     client_contacts.phone, client_contacts.email, \
     clients.deleted_at, clients.is_deleted, clients.user_id, clients.id_number";

const FROM: &str = "clients \
     JOIN companies ON companies.id = clients.company_id \
     JOIN client_contacts ON client_contacts.client_id = clients.id";

/// Map a sort token column to the expression used in ORDER BY.
///
/// Sort columns are written into the SQL text, so only these are accepted.
fn sortable_column(column: &str) -> Option<&'static str> {
    let column = column.trim().to_ascii_lowercase();
    let column = column.strip_prefix("clients.").unwrap_or(&column);
    Some(match column {
        "id" => "clients.id",
        "name" => "clients.name",
        "id_number" => "clients.id_number",
        "balance" => "clients.balance",
        "last_login" => "clients.last_login",
        "created_at" | "client_created_at" => "clients.created_at",
        "deleted_at" => "clients.deleted_at",
        "contact" => "contact",
        "first_name" | "client_contacts.first_name" => "client_contacts.first_name",
        "last_name" | "client_contacts.last_name" => "client_contacts.last_name",
        "email" | "client_contacts.email" => "client_contacts.email",
        "phone" | "client_contacts.phone" => "client_contacts.phone",
        _ => return None,
    })
}

/// Escape `LIKE` metacharacters so the text matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn parse_amount(param: &str, token: &str, amount: &str) -> AppResult<Decimal> {
    Decimal::from_str(amount.trim())
        .map_err(|_| AppError::invalid_param(param, token, "a numeric amount"))
}

/// Builds and narrows the client list query for one company.
#[derive(Debug, Clone)]
pub struct ClientFilters {
    builder: SelectQuery,
}

impl ClientFilters {
    /// Wrap an existing query.
    pub fn new(builder: SelectQuery) -> Self {
        Self { builder }
    }

    /// Start from [`ClientFilters::base_query`] for `company_id`.
    pub fn for_company(company_id: CompanyId) -> Self {
        Self::new(Self::base_query(company_id))
    }

    /// The client list statement: clients of `company_id` joined to their
    /// primary, non-deleted contact, with currency and country falling
    /// back to the company's.
    pub fn base_query(company_id: CompanyId) -> SelectQuery {
        let mut query = SelectQuery::new(PROJECTION, FROM);
        query
            .and_where(Predicate::compare(
                "clients.company_id",
                ComparisonOp::Eq,
                BindValue::Int(company_id.get()),
            ))
            .and_where(Predicate::flag("client_contacts.is_primary", true))
            .and_where(Predicate::is_null("client_contacts.deleted_at"));
        query
    }

    /// Base query for `company_id` with `params` applied, ordered by
    /// `default_sort` when `params` carries no sort of its own.
    pub fn listing(
        company_id: CompanyId,
        params: &ClientListParams,
        default_sort: &str,
    ) -> AppResult<SelectQuery> {
        let mut filters = Self::for_company(company_id);
        filters.apply(params)?;
        if !filters.builder.has_order() {
            filters.sort(default_sort)?;
        }
        Ok(filters.into_builder())
    }

    pub fn builder(&self) -> &SelectQuery {
        &self.builder
    }

    pub fn into_builder(self) -> SelectQuery {
        self.builder
    }

    /// Apply every filter present in `params`.
    ///
    /// Order: `filter`, `status`, `balance`, `between_balance`, `sort`.
    pub fn apply(&mut self, params: &ClientListParams) -> AppResult<&mut Self> {
        if let Some(filter) = params.filter.as_deref() {
            self.filter(filter);
        }
        if let Some(status) = params.status.as_deref() {
            self.status(status);
        }
        if let Some(balance) = params.balance.as_deref() {
            self.balance(balance)?;
        }
        if let Some(range) = params.between_balance.as_deref() {
            self.between_balance(range)?;
        }
        if let Some(sort) = params.sort.as_deref() {
            self.sort(sort)?;
        }
        Ok(self)
    }

    /// Filter by balance with an `op:amount` token, e.g. `gt:100`.
    ///
    /// Operators are `lt`, `gt`, `lte`, `gte` and `eq`; anything else
    /// compares for equality.
    pub fn balance(&mut self, balance: &str) -> AppResult<&mut Self> {
        if balance.is_empty() {
            return Ok(self);
        }

        let (op, amount) = balance
            .split_once(':')
            .ok_or_else(|| AppError::invalid_param("balance", balance, "'operator:amount'"))?;
        let op = ComparisonOp::from_token(op);
        let amount = parse_amount("balance", balance, amount)?;

        trace!(%op, %amount, "Filtering clients by balance");
        self.builder
            .and_where(Predicate::compare(BALANCE, op, BindValue::Decimal(amount)));
        Ok(self)
    }

    /// Filter by an inclusive balance range with a `min:max` token, e.g. `10:50`.
    ///
    /// Segments after the second `:` are ignored.
    pub fn between_balance(&mut self, balance: &str) -> AppResult<&mut Self> {
        if balance.is_empty() {
            return Ok(self);
        }

        let mut parts = balance.split(':');
        let (Some(min), Some(max)) = (parts.next(), parts.next()) else {
            return Err(AppError::invalid_param("between_balance", balance, "'min:max'"));
        };
        let min = parse_amount("between_balance", balance, min)?;
        let max = parse_amount("between_balance", balance, max)?;

        self.builder.and_where(Predicate::between(
            BALANCE,
            BindValue::Decimal(min),
            BindValue::Decimal(max),
        ));
        Ok(self)
    }

    /// Case-insensitive substring search over client name, id number and
    /// the primary contact's first name, last name and email.
    pub fn filter(&mut self, filter: &str) -> &mut Self {
        if filter.is_empty() {
            return self;
        }

        let pattern = format!("%{}%", escape_like(filter));
        let any = SEARCH_COLUMNS
            .iter()
            .map(|column| Predicate::ilike(*column, pattern.clone()))
            .collect();
        self.builder.and_where(Predicate::Any(any));
        self
    }

    /// Filter by a comma separated list of `active`, `archived` and
    /// `deleted`. Unknown names are ignored.
    pub fn status(&mut self, filter: &str) -> &mut Self {
        if filter.is_empty() {
            return self;
        }

        let statuses: Vec<RecordStatus> = RecordStatus::parse_list(filter);
        trace!(?statuses, "Filtering clients by status");
        self.builder.and_where(status_predicate(TABLE, &statuses));
        self
    }

    /// Order by a `column|direction` token, e.g. `name|desc`.
    pub fn sort(&mut self, sort: &str) -> AppResult<&mut Self> {
        if sort.is_empty() {
            return Ok(self);
        }

        let field = parse_sort(sort)?;
        let column = sortable_column(&field.field)
            .ok_or_else(|| AppError::invalid_param("sort", sort, "a sortable client column"))?;

        self.builder.order_by(column, field.direction);
        Ok(self)
    }

    /// Restrict the list to a single client.
    pub fn client(&mut self, client_id: ClientId) -> &mut Self {
        self.builder.and_where(Predicate::compare(
            "clients.id",
            ComparisonOp::Eq,
            BindValue::Int(client_id.get()),
        ));
        self
    }
}

fn parse_sort(sort: &str) -> AppResult<SortField> {
    let (column, direction) = sort
        .split_once('|')
        .ok_or_else(|| AppError::invalid_param("sort", sort, "'column|direction'"))?;
    let direction = direction
        .parse::<SortDirection>()
        .map_err(|_| AppError::invalid_param("sort", sort, "direction 'asc' or 'desc'"))?;
    Ok(SortField::new(column.trim(), direction))
}
