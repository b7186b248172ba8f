//! Session-Gated Users Client
//!
//! Every user operation first reads the credential store. Without a
//! credential the operation returns [`ClientError::AuthRequired`] and sends
//! nothing. With one, a single request goes out carrying
//! `Authorization: Bearer <token>`; transport errors, non-2xx statuses and
//! undecodable bodies all become [`ClientError::RequestFailed`].
//!
//! There is no retry. A 401 is reported like any other failed request.

use std::future::Future;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::app::config::Config;
use crate::app::credential_store::{Credential, CredentialStore};
use crate::shared::error::{ClientError, RequestFailure, StoreError};
use crate::shared::user::{UserEnvelope, UserPage, UserRecord, UserUpdate};

/// Users API client gated on a cached credential
pub struct SessionGatedClient<S> {
    config: Config,
    client: Client,
    store: S,
}

impl<S: CredentialStore> SessionGatedClient<S> {
    /// Build a client for `config`, reading credentials from `store`.
    ///
    /// Fails only if the HTTP client cannot be constructed (TLS backend).
    pub fn new(config: Config, store: S) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
            store,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn get_credential(&self) -> Option<Credential> {
        self.store.get().await
    }

    pub async fn set_credential(&self, credential: Credential) -> Result<(), StoreError> {
        self.store.set(credential).await
    }

    pub async fn clear_credential(&self) -> Result<(), StoreError> {
        self.store.clear().await
    }

    /// Records on `page` of the collection
    pub async fn list_users(&self, page: u32) -> Result<Vec<UserRecord>, ClientError> {
        self.list_users_page(page).await.map(|page| page.data)
    }

    /// `GET /users?page={page}` with its paging counters
    pub async fn list_users_page(&self, page: u32) -> Result<UserPage, ClientError> {
        let url = self.config.api_url(&format!("/users?page={}", page));
        self.gated("list_users", |token| async move {
            tracing::debug!("[SESSION] GET {}", url);
            let response = self.send(self.authorized(self.client.get(&url), &token)).await?;
            decode::<UserPage>(response).await
        })
        .await
    }

    /// `GET /users/{id}`
    pub async fn get_user(&self, id: i64) -> Result<UserRecord, ClientError> {
        let url = self.user_url(id);
        self.gated("get_user", |token| async move {
            tracing::debug!("[SESSION] GET {}", url);
            let response = self.send(self.authorized(self.client.get(&url), &token)).await?;
            decode::<UserEnvelope>(response).await.map(|envelope| envelope.data)
        })
        .await
    }

    /// `PUT /users/{id}`. Any 2xx status is success; the body is not read.
    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<(), ClientError> {
        let url = self.user_url(id);
        self.gated("update_user", |token| async move {
            tracing::debug!("[SESSION] PUT {}", url);
            let request = self.authorized(self.client.put(&url), &token).json(update);
            self.send(request).await.map(drop)
        })
        .await
    }

    /// `DELETE /users/{id}`. Any 2xx status is success.
    pub async fn delete_user(&self, id: i64) -> Result<(), ClientError> {
        let url = self.user_url(id);
        self.gated("delete_user", |token| async move {
            tracing::debug!("[SESSION] DELETE {}", url);
            self.send(self.authorized(self.client.delete(&url), &token))
                .await
                .map(drop)
        })
        .await
    }

    fn user_url(&self, id: i64) -> String {
        self.config.api_url(&format!("/users/{}", id))
    }

    /// Runs `call` only when a credential is cached.
    async fn gated<T, F, Fut>(&self, operation: &'static str, call: F) -> Result<T, ClientError>
    where
        F: FnOnce(Credential) -> Fut,
        Fut: Future<Output = Result<T, RequestFailure>>,
    {
        let Some(token) = self.store.get().await else {
            tracing::debug!("[SESSION] {}: no credential cached, login required", operation);
            return Err(ClientError::AuthRequired);
        };

        call(token).await.map_err(|failure| {
            tracing::warn!("[SESSION] {} failed: {}", operation, failure);
            ClientError::RequestFailed(failure)
        })
    }

    fn authorized(&self, request: RequestBuilder, token: &Credential) -> RequestBuilder {
        request.header("Authorization", format!("Bearer {}", token.as_str()))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, RequestFailure> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RequestFailure::status(status.as_u16(), body));
        }
        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RequestFailure> {
    Ok(response.json::<T>().await?)
}
