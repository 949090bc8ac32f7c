//! Synchronous client core for the offers service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). `OfferStore` layers the
//! screen's state on top: the displayed collection, the editor draft, and
//! the refetch-after-mutation rule.
//!
//! # Design
//! - `OfferClient` is stateless; it holds only `base_url`.
//! - Each CRUD operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit. `OfferStore` drives both halves through a
//!   host-supplied `Transport`.
//! - Types use owned `String` / `Vec` fields to simplify FFI mapping.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod store;
pub mod transport;
pub mod types;

pub use client::OfferClient;
pub use config::ClientConfig;
pub use error::{ApiError, StoreError, TransportError};
pub use form::{field_text, parse_number, sanitize_numeric, OfferEditor};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::OfferStore;
pub use transport::Transport;
pub use types::{Offer, OfferDraft, OfferId, OfferIdError};
