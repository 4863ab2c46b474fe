//! Client listing CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use billhub_core::config::AppConfig;
use billhub_core::error::AppError;
use billhub_core::types::{ClientId, CompanyId};
use billhub_database::filters::{ClientFilters, ClientListParams};
use billhub_database::repositories::ClientRepository;
use billhub_entity::client::ClientListRow;

/// Arguments for client commands
#[derive(Debug, Args)]
pub struct ClientArgs {
    /// Client subcommand
    #[command(subcommand)]
    pub command: ClientCommand,
}

/// Client subcommands
#[derive(Debug, Subcommand)]
pub enum ClientCommand {
    /// List a company's clients
    List(ListArgs),
    /// Print the SQL a list request would run, without connecting
    Sql(ListArgs),
    /// Show one client
    Show {
        /// Owning company
        #[arg(long)]
        company: CompanyId,
        /// Client ID
        id: ClientId,
    },
}

/// Filter flags shared by `list` and `sql`
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Owning company
    #[arg(long)]
    pub company: CompanyId,
    /// Search text matched against name, id number and primary contact
    #[arg(long)]
    pub filter: Option<String>,
    /// Comma separated statuses: active, archived, deleted
    #[arg(long)]
    pub status: Option<String>,
    /// Balance comparison, e.g. gt:100
    #[arg(long)]
    pub balance: Option<String>,
    /// Inclusive balance range, e.g. 10:50
    #[arg(long)]
    pub between_balance: Option<String>,
    /// Sort as column|direction, e.g. name|desc
    #[arg(long)]
    pub sort: Option<String>,
    /// Page number
    #[arg(long)]
    pub page: Option<u64>,
    /// Rows per page
    #[arg(long)]
    pub per_page: Option<u64>,
}

impl ListArgs {
    /// Convert the flags into list request parameters.
    pub fn to_params(&self) -> ClientListParams {
        ClientListParams {
            filter: self.filter.clone(),
            status: self.status.clone(),
            balance: self.balance.clone(),
            between_balance: self.between_balance.clone(),
            sort: self.sort.clone(),
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Client display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ClientRow {
    /// Client ID
    id: i64,
    /// Name
    name: String,
    /// Primary contact
    contact: String,
    /// Email
    email: String,
    /// Balance
    balance: String,
    /// Status
    status: String,
    /// Created at
    created_at: String,
}

impl From<&ClientListRow> for ClientRow {
    fn from(c: &ClientListRow) -> Self {
        Self {
            id: c.id.get(),
            name: c.display_name().to_string(),
            contact: c.contact.trim().to_string(),
            email: c.email.clone().unwrap_or_default(),
            balance: c.balance.to_string(),
            status: c.status().to_string(),
            created_at: c.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Rendered statement for `client sql`
#[derive(Debug, Serialize)]
struct RenderedSql {
    sql: String,
    bind_count: usize,
}

/// Execute client commands
pub async fn execute(
    args: &ClientArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ClientCommand::Sql(list) => {
            let query = ClientFilters::listing(
                list.company,
                &list.to_params(),
                &config.listing.default_sort,
            )?;
            let rendered = RenderedSql {
                sql: query.sql(),
                bind_count: query.bind_count(),
            };
            match format {
                OutputFormat::Json => output::print_item(&rendered, format),
                OutputFormat::Table => {
                    println!("{}", rendered.sql);
                    println!("-- {} bind parameter(s)", rendered.bind_count);
                }
            }
        }
        ClientCommand::List(list) => {
            let db = super::connect(config).await?;
            let repo = ClientRepository::new(db.pool().clone(), config.listing.clone());

            let page = repo.list(list.company, &list.to_params()).await?;
            let rows: Vec<ClientRow> = page.items.iter().map(ClientRow::from).collect();

            output::print_list(&rows, &page, format);
            if format == OutputFormat::Table {
                output::print_kv(
                    "page",
                    &format!(
                        "{} of {} ({} clients)",
                        page.page, page.total_pages, page.total_items
                    ),
                );
            }
            db.close().await;
        }
        ClientCommand::Show { company, id } => {
            let db = super::connect(config).await?;
            let repo = ClientRepository::new(db.pool().clone(), config.listing.clone());

            let client = repo
                .find_by_id(*company, *id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Client {id} not found")))?;

            output::print_item(&client, format);
            db.close().await;
        }
    }

    Ok(())
}
