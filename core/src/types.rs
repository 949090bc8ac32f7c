//! Domain DTOs for the offers API.
//!
//! # Design
//! `Offer` is a persisted record and always carries the server-assigned
//! `_id`. `OfferDraft` is the in-progress form state: it has no id and every
//! field is optional, so unset inputs are simply left out of the JSON body.
//! The mock-server crate defines its own copies of these shapes; integration
//! tests catch any schema drift between the two.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Opaque, server-assigned identifier of a persisted offer.
///
/// The id is interpolated into the resource path, so parsing rejects
/// values that would change the shape of the URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferId(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OfferIdError {
    #[error("offer id is empty")]
    Empty,
    #[error("offer id contains invalid character {0:?}")]
    InvalidChar(char),
}

impl OfferId {
    pub fn parse(raw: &str) -> Result<Self, OfferIdError> {
        if raw.is_empty() {
            return Err(OfferIdError::Empty);
        }
        if let Some(c) = raw
            .chars()
            .find(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#'))
        {
            return Err(OfferIdError::InvalidChar(c));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for OfferId {
    type Err = OfferIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single offer returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "_id")]
    pub id: OfferId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub discount_percentage: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub original_price: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub discounted_price: f64,
}

/// Older records carry `null` where a price failed to parse on save.
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

/// Request payload for both create and update. Updates are full replaces:
/// the whole draft is sent, and omitted fields are omitted on the wire too.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfferDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<f64>,
}

impl OfferDraft {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<&Offer> for OfferDraft {
    fn from(offer: &Offer) -> Self {
        Self {
            title: Some(offer.title.clone()),
            description: offer.description.clone(),
            discount_percentage: Some(offer.discount_percentage),
            original_price: Some(offer.original_price),
            discounted_price: Some(offer.discounted_price),
        }
    }
}
