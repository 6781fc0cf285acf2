//! Operations CLI
//!
//! Command-line interface for the payment-hub operations API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use operations_client::OperationsClient;
use operations_types::WorkflowInstanceKey;

#[derive(Parser)]
#[command(name = "operations")]
#[command(author, version, about = "Payment hub operations CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Operations API
    #[arg(
        long,
        env = "OPERATIONS_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    /// Tenant the requests act for
    #[arg(long, env = "OPERATIONS_TENANT_ID")]
    tenant: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compensate a completed incoming transfer
    Transfer {
        #[command(subcommand)]
        action: TransferCommands,
    },
    /// Inspect workflow executions
    Show {
        #[command(subcommand)]
        action: ShowCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum TransferCommands {
    /// Send the funds back to the original payer
    Refund {
        /// Transaction id of the incoming transfer
        transaction_id: String,
        /// Reason forwarded to the counterparty
        #[arg(long)]
        comment: Option<String>,
    },
    /// Start the recall workflow for the transfer
    Recall {
        /// Transaction id of the incoming transfer
        transaction_id: String,
        /// Reason forwarded to the counterparty
        #[arg(long)]
        comment: Option<String>,
    },
}

#[derive(Subcommand)]
enum ShowCommands {
    /// Transfer executed by a workflow instance
    Transfer {
        /// Workflow instance key
        key: WorkflowInstanceKey,
    },
    /// Transaction request executed by a workflow instance
    TransactionRequest {
        /// Workflow instance key
        key: WorkflowInstanceKey,
    },
    /// Variables of every instance sharing a business key
    Variables {
        #[arg(long)]
        business_key: String,
        #[arg(long, default_value = "transactionId")]
        business_key_type: String,
    },
    /// Tasks of every instance sharing a business key
    Tasks {
        #[arg(long)]
        business_key: String,
        #[arg(long, default_value = "transactionId")]
        business_key_type: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut client = OperationsClient::new(&cli.api_url);
    if let Some(tenant) = cli.tenant {
        client = client.with_tenant(tenant);
    }

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Transfer { action } => match action {
            TransferCommands::Refund {
                transaction_id,
                comment,
            } => {
                let reply = client.refund(&transaction_id, comment).await?;
                println!("HTTP {}", reply.status);
                println!("{}", reply.body);
                if !reply.is_success() {
                    std::process::exit(1);
                }
            }
            TransferCommands::Recall {
                transaction_id,
                comment,
            } => {
                client.recall(&transaction_id, comment).await?;
                println!("✓ Recall started for {}", transaction_id);
            }
        },

        Commands::Show { action } => match action {
            ShowCommands::Transfer { key } => {
                let detail = client.transfer_detail(key).await?;
                println!("{}", serde_json::to_string_pretty(&detail)?);
            }
            ShowCommands::TransactionRequest { key } => {
                let detail = client.transaction_request_detail(key).await?;
                println!("{}", serde_json::to_string_pretty(&detail)?);
            }
            ShowCommands::Variables {
                business_key,
                business_key_type,
            } => {
                let variables = client.variables(&business_key, &business_key_type).await?;
                println!("{}", serde_json::to_string_pretty(&variables)?);
            }
            ShowCommands::Tasks {
                business_key,
                business_key_type,
            } => {
                let tasks = client.tasks(&business_key, &business_key_type).await?;
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            }
        },
    }

    Ok(())
}
