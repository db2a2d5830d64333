//! Wire types for the `Contatos` REST resource.
//!
//! Field names on the wire are the backend's (`nome`, `telefone`); the Rust
//! side uses English names.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::ContactId;

/// A listed or fetched contact. Missing or `null` text fields read as empty
/// so one sparse record does not sink the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    #[serde(rename = "nome", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(rename = "telefone", default, deserialize_with = "null_as_empty")]
    pub phone: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /Contatos`. The identifier is assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
}

/// Body of `PUT /Contatos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactUpdate {
    pub id: ContactId,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
}

impl From<ContactUpdate> for Contact {
    fn from(value: ContactUpdate) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            phone: value.phone,
        }
    }
}

/// Confirmation returned by every mutating call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_uses_backend_field_names() {
        let contact = Contact {
            id: ContactId::new("42"),
            name: "João".to_string(),
            email: "joao@x.com".to_string(),
            phone: "(21) 99999-0000".to_string(),
        };
        let value = serde_json::to_value(&contact).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "id": "42",
                "nome": "João",
                "email": "joao@x.com",
                "telefone": "(21) 99999-0000",
            })
        );
    }

    #[test]
    fn new_contact_has_no_id_field() {
        let body = NewContact {
            name: "Maria Silva".to_string(),
            email: "maria@x.com".to_string(),
            phone: "(11) 91234-5678".to_string(),
        };
        let value = serde_json::to_value(&body).expect("serialize");
        assert!(value.get("id").is_none());
        assert_eq!(value["nome"], "Maria Silva");
    }

    #[test]
    fn list_with_sparse_record_still_decodes() {
        let list: Vec<Contact> = serde_json::from_str(
            r#"[
                {"id": "1", "nome": "Maria Silva", "email": "maria@x.com", "telefone": null},
                {"id": "2", "nome": null, "email": "ana@x.com"}
            ]"#,
        )
        .expect("parse");
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].phone, "");
        assert_eq!(list[1].name, "");
        assert_eq!(list[1].phone, "");
        assert_eq!(list[1].email, "ana@x.com");
    }

    #[test]
    fn message_response_tolerates_missing_message() {
        let parsed: MessageResponse = serde_json::from_str("{}").expect("parse");
        assert_eq!(parsed.message, "");
    }
}
