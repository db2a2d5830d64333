use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{ContactField, ContactFormController, HttpContactsApi, OperationOutcome};
use shared::domain::ContactId;
use tracing_subscriber::EnvFilter;

mod config;
mod render;
mod shell;
mod terminal;

use terminal::TerminalPrompt;

#[derive(Parser, Debug)]
#[command(name = "contacts", about = "Manage contacts through the Contatos REST API")]
struct Args {
    /// Contacts resource URL; overrides contacts.toml and the environment.
    #[arg(long, global = true)]
    endpoint: Option<String>,
    /// Answer yes to delete confirmations.
    #[arg(long, short = 'y', global = true)]
    yes: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show all contacts (default).
    List,
    /// Load one contact into the edit form and show it.
    Show { id: String },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
    },
    /// Load a contact, apply the given changes and submit it.
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    Delete { id: String },
    /// Interactive session.
    Shell,
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = config::load_settings()?;
    if let Some(endpoint) = args.endpoint {
        settings.api_endpoint = endpoint;
    }
    init_tracing(&settings.log_filter);

    let api = HttpContactsApi::parse(&settings.api_endpoint)
        .with_context(|| format!("cannot use endpoint '{}'", settings.api_endpoint))?;
    tracing::info!(endpoint = %api.endpoint(), "contacts: client ready");
    let prompt = Arc::new(TerminalPrompt::new(args.yes));
    let controller = ContactFormController::new(Arc::new(api), prompt.clone());

    // Same as opening the page: the list is loaded before any action.
    let initial = controller.initialize().await;

    match args.command.unwrap_or(Command::List) {
        Command::List => {
            finish(initial)?;
            print!("{}", render::contacts_table(&controller.contacts().await));
        }
        Command::Show { id } => {
            finish(controller.load_for_edit(&ContactId::new(id)).await)?;
            print!(
                "{}",
                render::form_summary("edit form", &controller.edit_form().await)
            );
        }
        Command::Create { name, email, phone } => {
            controller.set_create_field(ContactField::Name, name).await;
            controller.set_create_field(ContactField::Email, email).await;
            controller.set_create_field(ContactField::Phone, phone).await;
            finish(controller.submit_create().await)?;
            print!("{}", render::contacts_table(&controller.contacts().await));
        }
        Command::Edit {
            id,
            name,
            email,
            phone,
        } => {
            finish(controller.load_for_edit(&ContactId::new(id)).await)?;
            let changes = [
                (ContactField::Name, name),
                (ContactField::Email, email),
                (ContactField::Phone, phone),
            ];
            for (field, value) in changes {
                if let Some(value) = value {
                    controller.set_edit_field(field, value).await;
                }
            }
            finish(controller.submit_edit().await)?;
            print!("{}", render::contacts_table(&controller.contacts().await));
        }
        Command::Delete { id } => {
            finish(controller.delete_contact(&ContactId::new(id)).await)?;
            print!("{}", render::contacts_table(&controller.contacts().await));
        }
        Command::Shell => shell::run(controller, prompt).await?,
    }

    Ok(())
}

/// Maps a one-shot outcome to the process exit status. The controller has
/// already logged any API failure.
fn finish(outcome: OperationOutcome) -> Result<()> {
    match outcome {
        OperationOutcome::Completed | OperationOutcome::Declined => Ok(()),
        OperationOutcome::Blocked(errors) => {
            bail!("{}", render::blocked_summary(&errors).trim_end())
        }
        OperationOutcome::Failed => bail!("request to the contacts API failed"),
    }
}
