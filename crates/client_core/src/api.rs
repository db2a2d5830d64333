//! Transport seam for the `Contatos` REST resource.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    domain::ContactId,
    protocol::{Contact, ContactUpdate, MessageResponse, NewContact},
};
use tracing::debug;
use url::Url;

use crate::error::ApiCallError;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5149/api/Contatos";

#[async_trait]
pub trait ContactsApi: Send + Sync {
    async fn list_contacts(&self) -> Result<Vec<Contact>, ApiCallError>;
    async fn get_contact(&self, id: &ContactId) -> Result<Contact, ApiCallError>;
    async fn create_contact(&self, body: &NewContact) -> Result<MessageResponse, ApiCallError>;
    async fn update_contact(&self, body: &ContactUpdate)
        -> Result<MessageResponse, ApiCallError>;
    async fn delete_contact(&self, id: &ContactId) -> Result<MessageResponse, ApiCallError>;
}

pub struct HttpContactsApi {
    http: Client,
    endpoint: Url,
}

impl HttpContactsApi {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: Client::new(),
            endpoint,
        }
    }

    pub fn parse(endpoint: &str) -> Result<Self, ApiCallError> {
        let url = Url::parse(endpoint).map_err(|err| ApiCallError::Endpoint {
            endpoint: endpoint.to_string(),
            reason: err.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiCallError::Endpoint {
                endpoint: endpoint.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if url.cannot_be_a_base() {
            return Err(ApiCallError::Endpoint {
                endpoint: endpoint.to_string(),
                reason: "endpoint cannot carry path segments".to_string(),
            });
        }
        Ok(Self::new(url))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// `{endpoint}/{id}`, with the identifier percent-encoded as one segment.
    pub fn item_url(&self, id: &ContactId) -> Result<Url, ApiCallError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| ApiCallError::Endpoint {
                endpoint: self.endpoint.to_string(),
                reason: "endpoint cannot carry path segments".to_string(),
            })?
            .pop_if_empty()
            .push(id.as_str());
        Ok(url)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<T, ApiCallError> {
        let method_name = method.as_str().to_string();
        let url_text = url.to_string();
        debug!(method = %method_name, url = %url_text, "contacts: sending request");

        let response = build(self.http.request(method, url))
            .send()
            .await
            .map_err(|source| ApiCallError::Transport {
                method: method_name.clone(),
                url: url_text.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ApiCallError::Transport {
                method: method_name.clone(),
                url: url_text.clone(),
                source,
            })?;

        if !status.is_success() {
            return Err(ApiCallError::Status {
                method: method_name,
                url: url_text,
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|err| ApiCallError::Decode {
            method: method_name,
            url: url_text,
            reason: err.to_string(),
        })
    }
}

#[async_trait]
impl ContactsApi for HttpContactsApi {
    async fn list_contacts(&self) -> Result<Vec<Contact>, ApiCallError> {
        self.execute(Method::GET, self.endpoint.clone(), |req| req).await
    }

    async fn get_contact(&self, id: &ContactId) -> Result<Contact, ApiCallError> {
        let url = self.item_url(id)?;
        self.execute(Method::GET, url, |req| req).await
    }

    async fn create_contact(&self, body: &NewContact) -> Result<MessageResponse, ApiCallError> {
        self.execute(Method::POST, self.endpoint.clone(), |req| req.json(body))
            .await
    }

    async fn update_contact(
        &self,
        body: &ContactUpdate,
    ) -> Result<MessageResponse, ApiCallError> {
        self.execute(Method::PUT, self.endpoint.clone(), |req| req.json(body))
            .await
    }

    async fn delete_contact(&self, id: &ContactId) -> Result<MessageResponse, ApiCallError> {
        let url = self.item_url(id)?;
        self.execute(Method::DELETE, url, |req| req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_url_appends_a_single_encoded_segment() {
        let api = HttpContactsApi::parse(DEFAULT_ENDPOINT).expect("endpoint");
        let url = api.item_url(&ContactId::new("42")).expect("url");
        assert_eq!(url.as_str(), "http://localhost:5149/api/Contatos/42");

        let url = api.item_url(&ContactId::new("a/b c")).expect("url");
        assert_eq!(url.as_str(), "http://localhost:5149/api/Contatos/a%2Fb%20c");
    }

    #[test]
    fn item_url_ignores_trailing_slash_on_endpoint() {
        let api =
            HttpContactsApi::parse("http://localhost:5149/api/Contatos/").expect("endpoint");
        let url = api.item_url(&ContactId::new("7")).expect("url");
        assert_eq!(url.as_str(), "http://localhost:5149/api/Contatos/7");
    }

    #[test]
    fn parse_rejects_non_http_endpoints() {
        assert!(matches!(
            HttpContactsApi::parse("ftp://localhost/api/Contatos"),
            Err(ApiCallError::Endpoint { .. })
        ));
        assert!(matches!(
            HttpContactsApi::parse("not a url"),
            Err(ApiCallError::Endpoint { .. })
        ));
    }
}
