//! Line-oriented session that keeps one controller alive across commands.

use std::sync::Arc;

use anyhow::{Context, Result};
use client_core::{ContactField, ContactFormController, ControllerEvent, OperationOutcome};
use shared::domain::ContactId;
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::{render, terminal::TerminalPrompt};

const HELP: &str = "\
commands:
  list                     refresh and show contacts
  set <field> <value>      edit the create form (name, email, phone)
  save                     submit the create form
  edit <id>                load a contact into the edit form
  eset <field> <value>     edit the edit form (name, email, phone)
  update                   submit the edit form
  delete <id>              delete a contact (asks for confirmation)
  forms                    show both forms
  help                     show this text
  quit                     leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    List,
    SetCreate(ContactField, String),
    Save,
    Edit(ContactId),
    SetEdit(ContactField, String),
    Update,
    Delete(ContactId),
    Forms,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "" => Ok(ShellCommand::Empty),
        "list" | "ls" => Ok(ShellCommand::List),
        "save" => Ok(ShellCommand::Save),
        "update" => Ok(ShellCommand::Update),
        "forms" => Ok(ShellCommand::Forms),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        "edit" => required_id(verb, rest).map(ShellCommand::Edit),
        "delete" | "rm" => required_id(verb, rest).map(ShellCommand::Delete),
        "set" => field_assignment(verb, rest)
            .map(|(field, value)| ShellCommand::SetCreate(field, value)),
        "eset" => field_assignment(verb, rest)
            .map(|(field, value)| ShellCommand::SetEdit(field, value)),
        other => Err(format!("unknown command '{other}'; try 'help'")),
    }
}

fn required_id(verb: &str, rest: &str) -> Result<ContactId, String> {
    if rest.is_empty() {
        return Err(format!("usage: {verb} <id>"));
    }
    Ok(ContactId::new(rest))
}

/// The value is everything after the field name, inner spaces kept.
fn field_assignment(verb: &str, rest: &str) -> Result<(ContactField, String), String> {
    let (field, value) = match rest.split_once(char::is_whitespace) {
        Some((field, value)) => (field, value.trim()),
        None => (rest, ""),
    };
    if field.is_empty() {
        return Err(format!("usage: {verb} <field> <value>"));
    }
    let field = field.parse::<ContactField>().map_err(|err| err.to_string())?;
    Ok((field, value.to_string()))
}

pub async fn run(
    controller: Arc<ContactFormController>,
    prompt: Arc<TerminalPrompt>,
) -> Result<()> {
    let mut events = controller.subscribe_events();
    print!("{}", render::contacts_table(&controller.contacts().await));
    println!("type 'help' for commands");

    while let Some(line) = prompt
        .read_line("contacts> ")
        .await
        .context("failed to read command")?
    {
        match parse_command(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => {
                execute(&controller, command).await;
                show_events(&mut events);
            }
            Err(message) => println!("{message}"),
        }
    }
    Ok(())
}

/// Prints whatever the last command changed, in the order it happened.
fn show_events(events: &mut broadcast::Receiver<ControllerEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => {
                if let Some(view) = render::event_view(&event) {
                    print!("{view}");
                }
            }
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "shell: dropped controller events");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}

async fn execute(controller: &ContactFormController, command: ShellCommand) {
    match command {
        ShellCommand::Empty | ShellCommand::Quit => {}
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::List => {
            controller.refresh().await;
        }
        ShellCommand::Forms => {
            let state = controller.snapshot().await;
            print!("{}", render::form_summary("create form", &state.create_form));
            print!("{}", render::form_summary("edit form", &state.edit_form));
        }
        ShellCommand::SetCreate(field, value) => {
            if !controller.set_create_field(field, value).await {
                println!("the create form has no '{field}' field");
            }
        }
        ShellCommand::SetEdit(field, value) => {
            if field == ContactField::Id {
                println!("the edit form's id comes from 'edit <id>'");
            } else if !controller.set_edit_field(field, value).await {
                println!("the edit form has no '{field}' field");
            }
        }
        ShellCommand::Save => report(controller.submit_create().await),
        ShellCommand::Update => report(controller.submit_edit().await),
        ShellCommand::Edit(id) => report(controller.load_for_edit(&id).await),
        ShellCommand::Delete(id) => report(controller.delete_contact(&id).await),
    }
}

/// Successes show up through the event stream. Failures are already logged
/// and the list on screen is still the last good one.
fn report(outcome: OperationOutcome) {
    if let OperationOutcome::Blocked(errors) = outcome {
        print!("{}", render::blocked_summary(&errors));
    }
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
