//! Form models gating create and edit submissions.

use std::{fmt, str::FromStr};

use shared::{
    domain::ContactId,
    error::ValidationErrors,
    protocol::{Contact, ContactUpdate, NewContact},
    validation::{validate_email, validate_name, validate_phone, FieldError},
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Id,
    Name,
    Email,
    Phone,
}

impl ContactField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    fn validate(self, value: &str) -> Vec<FieldError> {
        match self {
            // Written only by `patch_from`; an edit cannot target nothing.
            Self::Id if value.is_empty() => vec![FieldError::Required],
            Self::Id => Vec::new(),
            Self::Name => validate_name(value),
            Self::Email => validate_email(value),
            Self::Phone => validate_phone(value),
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field '{0}' (expected id, name, email or phone)")]
pub struct UnknownField(pub String);

impl FromStr for ContactField {
    type Err = UnknownField;

    /// Accepts both the English labels and the backend's wire names.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "name" | "nome" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "phone" | "telefone" => Ok(Self::Phone),
            _ => Err(UnknownField(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Create,
    Edit,
}

impl FormKind {
    pub fn fields(self) -> &'static [ContactField] {
        match self {
            Self::Create => &[ContactField::Name, ContactField::Email, ContactField::Phone],
            Self::Edit => &[
                ContactField::Id,
                ContactField::Name,
                ContactField::Email,
                ContactField::Phone,
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    value: String,
    dirty: bool,
    errors: Vec<FieldError>,
}

impl FieldState {
    fn empty(field: ContactField) -> Self {
        Self {
            value: String::new(),
            dirty: false,
            errors: field.validate(""),
        }
    }

    fn assign(&mut self, field: ContactField, value: String, dirty: bool) {
        self.errors = field.validate(&value);
        self.value = value;
        self.dirty = dirty;
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Changed by the user since creation or the last reset.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Empty,
    Editing,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    kind: FormKind,
    fields: Vec<(ContactField, FieldState)>,
    pending_submissions: usize,
}

impl FormState {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            fields: kind
                .fields()
                .iter()
                .map(|field| (*field, FieldState::empty(*field)))
                .collect(),
            pending_submissions: 0,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn field(&self, field: ContactField) -> Option<&FieldState> {
        self.fields
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, state)| state)
    }

    fn field_mut(&mut self, field: ContactField) -> Option<&mut FieldState> {
        self.fields
            .iter_mut()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, state)| state)
    }

    pub fn fields(&self) -> impl Iterator<Item = (ContactField, &FieldState)> + '_ {
        self.fields.iter().map(|(field, state)| (*field, state))
    }

    /// Empty string for fields this form does not carry.
    pub fn value(&self, field: ContactField) -> &str {
        self.field(field).map(FieldState::value).unwrap_or_default()
    }

    pub fn errors(&self, field: ContactField) -> &[FieldError] {
        self.field(field).map(FieldState::errors).unwrap_or_default()
    }

    /// User input. Returns `false` when the form has no such field, and for
    /// the identifier, which only a fetched contact may supply.
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) -> bool {
        if field == ContactField::Id {
            return false;
        }
        match self.field_mut(field) {
            Some(state) => {
                state.assign(field, value.into(), true);
                true
            }
            None => false,
        }
    }

    /// Overwrites the fields this form shares with `contact`, leaving dirty
    /// flags and everything else untouched.
    pub fn patch_from(&mut self, contact: &Contact) {
        let values = [
            (ContactField::Id, contact.id.as_str()),
            (ContactField::Name, contact.name.as_str()),
            (ContactField::Email, contact.email.as_str()),
            (ContactField::Phone, contact.phone.as_str()),
        ];
        for (field, value) in values {
            if let Some(state) = self.field_mut(field) {
                let dirty = state.dirty;
                state.assign(field, value.to_string(), dirty);
            }
        }
    }

    /// Clears every value and dirty flag. In-flight submissions stay counted.
    pub fn reset(&mut self) {
        for (field, state) in &mut self.fields {
            *state = FieldState::empty(*field);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|(_, state)| state.is_valid())
    }

    pub fn validation_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for (field, state) in &self.fields {
            for error in state.errors() {
                errors.push(field.label(), *error);
            }
        }
        errors
    }

    pub fn phase(&self) -> FormPhase {
        if self.pending_submissions > 0 {
            FormPhase::Submitting
        } else if self
            .fields
            .iter()
            .all(|(_, state)| state.value.is_empty() && !state.dirty)
        {
            FormPhase::Empty
        } else {
            FormPhase::Editing
        }
    }

    pub fn pending_submissions(&self) -> usize {
        self.pending_submissions
    }

    pub(crate) fn begin_submit(&mut self) {
        self.pending_submissions += 1;
    }

    pub(crate) fn finish_submit(&mut self) {
        self.pending_submissions = self.pending_submissions.saturating_sub(1);
    }

    fn checked(&self) -> Result<(), ValidationErrors> {
        let errors = self.validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn to_new_contact(&self) -> Result<NewContact, ValidationErrors> {
        self.checked()?;
        Ok(NewContact {
            name: self.value(ContactField::Name).to_string(),
            email: self.value(ContactField::Email).to_string(),
            phone: self.value(ContactField::Phone).to_string(),
        })
    }

    /// Fails on a create form, which has no identifier to target.
    pub fn to_update(&self) -> Result<ContactUpdate, ValidationErrors> {
        if self.field(ContactField::Id).is_none() {
            let mut errors = ValidationErrors::new();
            errors.push(ContactField::Id.label(), FieldError::Required);
            return Err(errors);
        }
        self.checked()?;
        Ok(ContactUpdate {
            id: ContactId::new(self.value(ContactField::Id)),
            name: self.value(ContactField::Name).to_string(),
            email: self.value(ContactField::Email).to_string(),
            phone: self.value(ContactField::Phone).to_string(),
        })
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
