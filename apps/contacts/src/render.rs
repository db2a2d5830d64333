//! Plain-text views over the controller state.

use std::fmt::Write as _;

use client_core::{ControllerEvent, FormPhase, FormState};
use shared::{error::ValidationErrors, protocol::Contact};

pub fn contacts_table(contacts: &[Contact]) -> String {
    if contacts.is_empty() {
        return "(no contacts)\n".to_string();
    }

    let id_width = column_width(contacts.iter().map(|c| c.id.as_str()), "ID");
    let name_width = column_width(contacts.iter().map(|c| c.name.as_str()), "NAME");
    let email_width = column_width(contacts.iter().map(|c| c.email.as_str()), "EMAIL");

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:id_width$}  {:name_width$}  {:email_width$}  PHONE",
        "ID", "NAME", "EMAIL"
    );
    for contact in contacts {
        let _ = writeln!(
            out,
            "{:id_width$}  {:name_width$}  {:email_width$}  {}",
            contact.id.as_str(),
            contact.name,
            contact.email,
            contact.phone
        );
    }
    out
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values
        .map(|value| value.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}

pub fn form_summary(title: &str, form: &FormState) -> String {
    let phase = match form.phase() {
        FormPhase::Empty => "empty",
        FormPhase::Editing => "editing",
        FormPhase::Submitting => "submitting",
    };
    let validity = if form.is_valid() { "valid" } else { "invalid" };

    let mut out = String::new();
    let _ = writeln!(out, "{title} [{phase}, {validity}]");
    for (field, state) in form.fields() {
        let marker = if state.is_dirty() { "*" } else { " " };
        let _ = write!(out, " {marker}{:<6} {:?}", field.label(), state.value());
        if !state.is_valid() {
            let messages: Vec<String> =
                state.errors().iter().map(ToString::to_string).collect();
            let _ = write!(out, "  <- {}", messages.join(", "));
        }
        out.push('\n');
    }
    out
}

pub fn blocked_summary(errors: &ValidationErrors) -> String {
    let mut out = String::from("not submitted; fix these fields:\n");
    for (field, error) in &errors.errors {
        let _ = writeln!(out, "  {field}: {error}");
    }
    out
}

/// Text for one controller event. Notices are left to the prompt, which has
/// already shown them.
pub fn event_view(event: &ControllerEvent) -> Option<String> {
    match event {
        ControllerEvent::ListReplaced(contacts) => Some(contacts_table(contacts)),
        ControllerEvent::EditFormLoaded(form) => Some(form_summary("edit form", form)),
        ControllerEvent::CreateFormReset => Some("create form cleared\n".to_string()),
        ControllerEvent::Notice(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{ContactField, FormKind};
    use shared::{domain::ContactId, validation::FieldError};

    #[test]
    fn table_aligns_columns() {
        let contacts = vec![
            Contact {
                id: ContactId::new("1"),
                name: "Maria Silva".to_string(),
                email: "maria@x.com".to_string(),
                phone: "(11) 91234-5678".to_string(),
            },
            Contact {
                id: ContactId::new("42"),
                name: "João Pereira".to_string(),
                email: "joao@x.com".to_string(),
                phone: "(21) 99999-0000".to_string(),
            },
        ];
        let table = contacts_table(&contacts);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ID  NAME          EMAIL        PHONE");
        assert_eq!(lines[1], "1   Maria Silva   maria@x.com  (11) 91234-5678");
        assert_eq!(lines[2], "42  João Pereira  joao@x.com   (21) 99999-0000");
    }

    #[test]
    fn empty_list_has_placeholder() {
        assert_eq!(contacts_table(&[]), "(no contacts)\n");
    }

    #[test]
    fn form_summary_marks_dirty_fields_and_errors() {
        let mut form = FormState::new(FormKind::Create);
        form.set(ContactField::Name, "ABC");
        let summary = form_summary("create form", &form);
        assert!(summary.starts_with("create form [editing, invalid]\n"));
        assert!(summary.contains(" *name   \"ABC\"  <- must have at least 8 characters"));
        assert!(summary.contains("  phone  \"\"  <- value is required"));
    }

    #[test]
    fn blocked_summary_lists_each_field() {
        let mut errors = ValidationErrors::new();
        errors.push("name", FieldError::TooShort { min: 8 });
        assert_eq!(
            blocked_summary(&errors),
            "not submitted; fix these fields:\n  name: must have at least 8 characters\n"
        );
    }

    #[test]
    fn events_render_lists_and_loaded_forms() {
        let contacts = vec![Contact {
            id: ContactId::new("42"),
            name: "João Pereira".to_string(),
            email: "joao@x.com".to_string(),
            phone: "(21) 99999-0000".to_string(),
        }];
        assert_eq!(
            event_view(&ControllerEvent::ListReplaced(contacts.clone())),
            Some(contacts_table(&contacts))
        );

        let mut form = FormState::new(FormKind::Edit);
        form.patch_from(&contacts[0]);
        let view = event_view(&ControllerEvent::EditFormLoaded(form)).expect("form view");
        assert!(view.starts_with("edit form [editing, valid]\n"));
        assert!(view.contains("  id     \"42\""));

        assert_eq!(
            event_view(&ControllerEvent::CreateFormReset).as_deref(),
            Some("create form cleared\n")
        );
        assert_eq!(
            event_view(&ControllerEvent::Notice("ok".to_string())),
            None
        );
    }
}
