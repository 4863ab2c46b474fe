//! Configuration inspection commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use billhub_core::config::AppConfig;
use billhub_core::error::AppError;
use billhub_database::connection::mask_password;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut shown = config.clone();
            shown.database.url = mask_password(&shown.database.url);

            match format {
                OutputFormat::Json => output::print_item(&shown, format),
                OutputFormat::Table => {
                    println!("Database:");
                    output::print_kv("url", &shown.database.url);
                    output::print_kv(
                        "connections",
                        &format!(
                            "{}..{}",
                            shown.database.min_connections, shown.database.max_connections
                        ),
                    );
                    println!("Listing:");
                    output::print_kv("default_sort", &shown.listing.default_sort);
                    output::print_kv(
                        "default_page_size",
                        &shown.listing.default_page_size.to_string(),
                    );
                    output::print_kv("max_page_size", &shown.listing.max_page_size.to_string());
                    println!("Logging:");
                    output::print_kv("level", &shown.logging.level);
                    output::print_kv("format", &shown.logging.format);
                }
            }
        }
    }

    Ok(())
}
