use std::sync::Arc;

use bambooflow::Config;
use bambooflow_farmer::{Command, SqliteFarmerRepository};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum FarmerCommand {
    /// Print every stored farmer record
    List,
    /// Approve a registration
    Approve { id: String },
    /// Reject a registration
    Reject { id: String },
    /// Delete all farmer records
    Clear,
}

pub async fn run(config: &Config, command: FarmerCommand) -> anyhow::Result<()> {
    let pool = bambooflow::db::create_pool(&config.database.url, 1).await?;
    bambooflow::db::migrate(&pool).await?;

    let repository = Arc::new(SqliteFarmerRepository::new(pool.clone(), pool.clone()));
    let command_handler = Command::new(repository, config.registration.auto_approve);

    match command {
        FarmerCommand::List => {
            let records = command_handler.list().await?;
            if records.is_empty() {
                tracing::info!("no farmer records");
            }

            for record in records {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    record.id,
                    record.status,
                    record.full_name(),
                    record.phone,
                    record.province
                );
            }
        }
        FarmerCommand::Approve { id } => {
            command_handler.approve(&id).await?;
            tracing::info!("{id} approved");
        }
        FarmerCommand::Reject { id } => {
            command_handler.reject(&id).await?;
            tracing::info!("{id} rejected");
        }
        FarmerCommand::Clear => {
            command_handler.clear().await?;
            tracing::warn!("farmer records cleared");
        }
    }

    pool.close().await;

    Ok(())
}
