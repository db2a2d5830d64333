use std::sync::Arc;

use async_trait::async_trait;
use shared::{
    domain::ContactId,
    error::ValidationErrors,
    protocol::{Contact, MessageResponse},
    validation::FieldError,
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info};

pub mod api;
pub mod error;
pub mod form;

pub use api::{ContactsApi, HttpContactsApi, DEFAULT_ENDPOINT};
pub use error::ApiCallError;
pub use form::{ContactField, FieldState, FormKind, FormPhase, FormState};

pub const DELETE_CONFIRMATION_PROMPT: &str = "Deseja realmente excluir o contato?";

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// User-facing side effects: confirmation messages and yes/no prompts.
#[async_trait]
pub trait UserPrompt: Send + Sync {
    async fn notify(&self, message: &str);
    async fn confirm(&self, question: &str) -> bool;
}

/// Result of one controller operation.
///
/// API failures are already logged by the time `Failed` is returned; callers
/// are not expected to surface them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    Completed,
    /// The form layer refused to submit; no request was sent.
    Blocked(ValidationErrors),
    /// The user declined the confirmation prompt; no request was sent.
    Declined,
    Failed,
}

impl OperationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    ListReplaced(Vec<Contact>),
    /// The edit form as it stands right after a successful fetch.
    EditFormLoaded(FormState),
    CreateFormReset,
    Notice(String),
}

/// Everything the controller renders from: the list and both forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerState {
    pub contacts: Vec<Contact>,
    pub create_form: FormState,
    pub edit_form: FormState,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            contacts: Vec::new(),
            create_form: FormState::new(FormKind::Create),
            edit_form: FormState::new(FormKind::Edit),
        }
    }
}

/// Mediates between the two forms, the displayed list and the contacts API.
///
/// Operations take `&self` and never hold the state lock across a request,
/// so any number of them may be in flight at once. Completions apply in
/// arrival order: the last list response to land wins.
pub struct ContactFormController {
    api: Arc<dyn ContactsApi>,
    prompt: Arc<dyn UserPrompt>,
    state: Mutex<ControllerState>,
    events: broadcast::Sender<ControllerEvent>,
}

impl ContactFormController {
    pub fn new(api: Arc<dyn ContactsApi>, prompt: Arc<dyn UserPrompt>) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            api,
            prompt,
            state: Mutex::new(ControllerState::default()),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: ControllerEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    pub async fn snapshot(&self) -> ControllerState {
        self.state.lock().await.clone()
    }

    pub async fn contacts(&self) -> Vec<Contact> {
        self.state.lock().await.contacts.clone()
    }

    pub async fn create_form(&self) -> FormState {
        self.state.lock().await.create_form.clone()
    }

    pub async fn edit_form(&self) -> FormState {
        self.state.lock().await.edit_form.clone()
    }

    pub async fn set_create_field(
        &self,
        field: ContactField,
        value: impl Into<String> + Send,
    ) -> bool {
        self.state.lock().await.create_form.set(field, value)
    }

    pub async fn set_edit_field(
        &self,
        field: ContactField,
        value: impl Into<String> + Send,
    ) -> bool {
        self.state.lock().await.edit_form.set(field, value)
    }

    pub async fn initialize(&self) -> OperationOutcome {
        self.refresh().await
    }

    /// Replaces the list wholesale with the server's; keeps it on failure.
    pub async fn refresh(&self) -> OperationOutcome {
        match self.api.list_contacts().await {
            Ok(contacts) => {
                info!(count = contacts.len(), "contacts: list refreshed");
                self.state.lock().await.contacts = contacts.clone();
                self.emit(ControllerEvent::ListReplaced(contacts));
                OperationOutcome::Completed
            }
            Err(err) => {
                error!(
                    status = err.status(),
                    payload = err.payload(),
                    "contacts: list request failed: {err}"
                );
                OperationOutcome::Failed
            }
        }
    }

    pub async fn submit_create(&self) -> OperationOutcome {
        let body = {
            let mut guard = self.state.lock().await;
            match guard.create_form.to_new_contact() {
                Ok(body) => {
                    guard.create_form.begin_submit();
                    body
                }
                Err(errors) => {
                    debug!(%errors, "contacts: create blocked by form validation");
                    return OperationOutcome::Blocked(errors);
                }
            }
        };

        let result = self.api.create_contact(&body).await;
        self.state.lock().await.create_form.finish_submit();

        match result {
            Ok(response) => {
                info!(name = %body.name, "contacts: contact created");
                self.confirm_success(response).await;
                self.state.lock().await.create_form.reset();
                self.emit(ControllerEvent::CreateFormReset);
                self.refresh().await;
                OperationOutcome::Completed
            }
            Err(err) => {
                error!(
                    status = err.status(),
                    payload = err.payload(),
                    "contacts: create request failed: {err}"
                );
                OperationOutcome::Failed
            }
        }
    }

    /// The edit form keeps its values after a successful update.
    pub async fn submit_edit(&self) -> OperationOutcome {
        let body = {
            let mut guard = self.state.lock().await;
            match guard.edit_form.to_update() {
                Ok(body) => {
                    guard.edit_form.begin_submit();
                    body
                }
                Err(errors) => {
                    debug!(%errors, "contacts: edit blocked by form validation");
                    return OperationOutcome::Blocked(errors);
                }
            }
        };

        let result = self.api.update_contact(&body).await;
        self.state.lock().await.edit_form.finish_submit();

        match result {
            Ok(response) => {
                info!(contact_id = %body.id, "contacts: contact updated");
                self.confirm_success(response).await;
                self.refresh().await;
                OperationOutcome::Completed
            }
            Err(err) => {
                error!(
                    contact_id = %body.id,
                    status = err.status(),
                    payload = err.payload(),
                    "contacts: update request failed: {err}"
                );
                OperationOutcome::Failed
            }
        }
    }

    pub async fn load_for_edit(&self, id: &ContactId) -> OperationOutcome {
        if let Some(blocked) = missing_identifier(id) {
            return blocked;
        }

        match self.api.get_contact(id).await {
            Ok(contact) => {
                info!(contact_id = %contact.id, "contacts: edit form loaded");
                let loaded = {
                    let mut guard = self.state.lock().await;
                    guard.edit_form.patch_from(&contact);
                    guard.edit_form.clone()
                };
                self.emit(ControllerEvent::EditFormLoaded(loaded));
                OperationOutcome::Completed
            }
            Err(err) => {
                error!(
                    contact_id = %id,
                    status = err.status(),
                    payload = err.payload(),
                    "contacts: fetch for edit failed: {err}"
                );
                OperationOutcome::Failed
            }
        }
    }

    pub async fn delete_contact(&self, id: &ContactId) -> OperationOutcome {
        if let Some(blocked) = missing_identifier(id) {
            return blocked;
        }
        if !self.prompt.confirm(DELETE_CONFIRMATION_PROMPT).await {
            info!(contact_id = %id, "contacts: delete declined");
            return OperationOutcome::Declined;
        }

        match self.api.delete_contact(id).await {
            Ok(response) => {
                info!(contact_id = %id, "contacts: contact deleted");
                self.confirm_success(response).await;
                self.refresh().await;
                OperationOutcome::Completed
            }
            Err(err) => {
                error!(
                    contact_id = %id,
                    status = err.status(),
                    payload = err.payload(),
                    "contacts: delete request failed: {err}"
                );
                OperationOutcome::Failed
            }
        }
    }

    async fn confirm_success(&self, response: MessageResponse) {
        self.prompt.notify(&response.message).await;
        self.emit(ControllerEvent::Notice(response.message));
    }
}

/// An empty identifier would address the collection instead of one contact.
fn missing_identifier(id: &ContactId) -> Option<OperationOutcome> {
    if !id.is_empty() {
        return None;
    }
    debug!("contacts: empty identifier, nothing sent");
    let mut errors = ValidationErrors::new();
    errors.push(ContactField::Id.label(), FieldError::Required);
    Some(OperationOutcome::Blocked(errors))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
