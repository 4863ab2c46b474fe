//! Client repository implementation.

use sqlx::PgPool;
use tracing::debug;

use billhub_core::config::ListingConfig;
use billhub_core::error::{AppError, ErrorKind};
use billhub_core::result::AppResult;
use billhub_core::types::pagination::{PageRequest, PageResponse};
use billhub_core::types::{ClientId, CompanyId};
use billhub_entity::client::ClientListRow;

use crate::filters::{ClientFilters, ClientListParams, SelectQuery};

/// Repository for tenant-scoped client queries.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: PgPool,
    listing: ListingConfig,
}

impl ClientRepository {
    /// Create a new client repository.
    pub fn new(pool: PgPool, listing: ListingConfig) -> Self {
        Self { pool, listing }
    }

    /// Build the filtered list query for `company_id` without running it.
    ///
    /// Falls back to the configured default sort when `params` has none.
    pub fn list_query(
        &self,
        company_id: CompanyId,
        params: &ClientListParams,
    ) -> AppResult<SelectQuery> {
        ClientFilters::listing(company_id, params, &self.listing.default_sort)
    }

    /// Resolve the requested page against the configured limits.
    ///
    /// Pages whose row offset does not fit in a `BIGINT` are rejected.
    pub fn page_request(&self, params: &ClientListParams) -> AppResult<PageRequest> {
        let page = PageRequest::new(
            params.page.unwrap_or(1),
            params.per_page.unwrap_or(self.listing.default_page_size),
            self.listing.max_page_size,
        );
        page.checked_offset()?;
        Ok(page)
    }

    /// List one page of a company's clients matching `params`.
    pub async fn list(
        &self,
        company_id: CompanyId,
        params: &ClientListParams,
    ) -> AppResult<PageResponse<ClientListRow>> {
        let query = self.list_query(company_id, params)?;
        let page = self.page_request(params)?;

        let mut count = query.to_count_builder();
        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count clients", e))?;

        let mut select = query.to_page_builder(&page)?;
        let clients = select
            .build_query_as::<ClientListRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list clients", e))?;

        debug!(
            company_id = %company_id,
            page = page.page,
            per_page = page.page_size,
            total,
            returned = clients.len(),
            "Listed clients"
        );

        Ok(PageResponse::new(clients, &page, total.max(0) as u64))
    }

    /// Find one client of a company by primary key.
    pub async fn find_by_id(
        &self,
        company_id: CompanyId,
        client_id: ClientId,
    ) -> AppResult<Option<ClientListRow>> {
        let mut filters = ClientFilters::for_company(company_id);
        filters.client(client_id);

        let mut select = filters.builder().to_builder();
        select
            .build_query_as::<ClientListRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find client by id", e)
            })
    }
}
