//! REST client of the portal backend.
//!
//! `RestService<R>` is the browser's [`BackingService`] for kind `R`: it
//! talks to `/api/{kind}` and unwraps the `{ "data": ... }` envelope. Any
//! non-2xx answer becomes a [`ServiceError`] carrying the server's message
//! (or the status text when the body is not the usual error shape), so
//! callers can toast it as is.

use std::marker::PhantomData;

use common::model::{Application, Classroom, FormTemplate, ParentProfile, StudentForms};
use common::portal::Portal;
use common::requests::{ApiErrorBody, Envelope};
use common::table::{fetch_into, BackingService, Resource, ResourceId, ServiceError, TableError};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const API_BASE: &str = "/api";

pub fn collection_url<R: Resource>() -> String {
    format!("{}/{}", API_BASE, R::KIND)
}

pub struct RestService<R> {
    _resource: PhantomData<fn() -> R>,
}

impl<R> Default for RestService<R> {
    fn default() -> Self {
        Self {
            _resource: PhantomData,
        }
    }
}

impl<R> BackingService<R> for RestService<R>
where
    R: Resource + Serialize + DeserializeOwned,
    R::Patch: Serialize,
{
    async fn list(&self) -> Result<Vec<R>, ServiceError> {
        get_json(&collection_url::<R>()).await
    }

    async fn create(&self, draft: &R) -> Result<R, ServiceError> {
        send_json(Request::post(&collection_url::<R>()), draft).await
    }

    async fn update(&self, id: ResourceId, patch: &R::Patch) -> Result<R, ServiceError> {
        let url = format!("{}/{}", collection_url::<R>(), id);
        send_json(Request::patch(&url), patch).await
    }

    async fn delete(&self, id: ResourceId) -> Result<(), ServiceError> {
        let url = format!("{}/{}", collection_url::<R>(), id);
        let _: ResourceId = read_data(Request::delete(&url).send().await).await?;
        Ok(())
    }
}

pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ServiceError> {
    read_data(Request::get(url).send().await).await
}

pub async fn post_json<B, T>(url: &str, body: &B) -> Result<T, ServiceError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    send_json(Request::post(url), body).await
}

/// POST without a body, e.g. resending an invitation.
pub async fn post_empty<T: DeserializeOwned>(url: &str) -> Result<T, ServiceError> {
    read_data(Request::post(url).send().await).await
}

async fn send_json<B, T>(builder: RequestBuilder, body: &B) -> Result<T, ServiceError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let request = builder
        .json(body)
        .map_err(|e| ServiceError::transport(e.to_string()))?;
    read_data(request.send().await).await
}

async fn read_data<T: DeserializeOwned>(
    sent: Result<Response, gloo_net::Error>,
) -> Result<T, ServiceError> {
    let response = sent.map_err(|e| ServiceError::transport(e.to_string()))?;
    if !response.ok() {
        let status = response.status();
        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) => body.error.message,
            Err(_) => response.status_text(),
        };
        return Err(ServiceError::status(status, message));
    }
    response
        .json::<Envelope<T>>()
        .await
        .map(|envelope| envelope.data)
        .map_err(|e| ServiceError::decode(e.to_string()))
}

/// Fetches every collection into a fresh portal.
pub async fn load_portal() -> Result<Portal, TableError> {
    let mut portal = Portal::new();
    fetch_into(&mut portal, &RestService::<FormTemplate>::default()).await?;
    fetch_into(&mut portal, &RestService::<Classroom>::default()).await?;
    fetch_into(&mut portal, &RestService::<StudentForms>::default()).await?;
    fetch_into(&mut portal, &RestService::<Application>::default()).await?;
    fetch_into(&mut portal, &RestService::<ParentProfile>::default()).await?;
    Ok(portal)
}
