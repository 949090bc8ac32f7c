//! Stateless HTTP request builder and response parser for the offers API.
//!
//! # Design
//! `OfferClient` holds only a `base_url`. Each CRUD operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The caller executes the round-trip in
//! between, which keeps this module deterministic and free of I/O.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Offer, OfferDraft, OfferId};

/// Synchronous, stateless client for the offers API.
#[derive(Debug, Clone)]
pub struct OfferClient {
    base_url: String,
}

impl OfferClient {
    /// `base_url` is the API root, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_path(&self) -> String {
        format!("{}/offers", self.base_url)
    }

    fn resource_path(&self, id: &OfferId) -> String {
        format!("{}/offers/{id}", self.base_url)
    }

    pub fn build_list_offers(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_path(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_offer(&self, draft: &OfferDraft) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_path(),
            headers: json_headers(),
            body: Some(to_json(draft)?),
        })
    }

    pub fn build_update_offer(&self, id: &OfferId, draft: &OfferDraft) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.resource_path(id),
            headers: json_headers(),
            body: Some(to_json(draft)?),
        })
    }

    pub fn build_delete_offer(&self, id: &OfferId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.resource_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Returns offers in server order; reversing for display is the store's job.
    pub fn parse_list_offers(&self, response: HttpResponse) -> Result<Vec<Offer>, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_create_offer(&self, response: HttpResponse) -> Result<Offer, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_update_offer(&self, response: HttpResponse) -> Result<Offer, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    /// The delete response body carries nothing the client needs.
    pub fn parse_delete_offer(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn to_json(draft: &OfferDraft) -> Result<String, ApiError> {
    serde_json::to_string(draft).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Any 2xx is success. 404 is `NotFound`, everything else is `Http`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
