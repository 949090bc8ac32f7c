//! Client-side store that keeps the displayed offers in sync with the server.
//!
//! # Design
//! The server list is the only source of truth. Every successful mutation
//! is followed by a full `GET` of the collection; the store never patches
//! its local copy. Failures are logged and returned, and never touch the
//! displayed collection.

use tracing::{debug, error, info, warn};

use crate::client::OfferClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, StoreError};
use crate::form::OfferEditor;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Offer, OfferDraft, OfferId};

pub struct OfferStore<T> {
    client: OfferClient,
    transport: T,
    offers: Vec<Offer>,
    editor: OfferEditor,
}

impl<T: Transport> OfferStore<T> {
    pub fn new(client: OfferClient, transport: T) -> Self {
        Self {
            client,
            transport,
            offers: Vec::new(),
            editor: OfferEditor::new(),
        }
    }

    pub fn from_config(config: &ClientConfig, transport: T) -> Self {
        Self::new(OfferClient::new(&config.base_url), transport)
    }

    /// Offers in display order: newest first.
    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn editor(&self) -> &OfferEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut OfferEditor {
        &mut self.editor
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Replace the displayed collection with the server's, reversed.
    pub fn list(&mut self) -> Result<&[Offer], StoreError> {
        match self.fetch() {
            Ok(()) => Ok(&self.offers),
            Err(e) => {
                error!(error = %e, "failed to fetch offers");
                Err(e.into())
            }
        }
    }

    pub fn create(&mut self, draft: &OfferDraft) -> Result<Offer, StoreError> {
        let result = self
            .client
            .build_create_offer(draft)
            .and_then(|req| self.send(req))
            .and_then(|resp| self.client.parse_create_offer(resp));
        let created = result.map_err(|e| {
            error!(error = %e, "failed to create offer");
            StoreError::from(e)
        })?;
        info!(id = %created.id, "created offer");
        self.editor.reset();
        self.refresh();
        Ok(created)
    }

    /// Full replace of every field but the id.
    pub fn update(&mut self, id: &OfferId, draft: &OfferDraft) -> Result<Offer, StoreError> {
        let result = self
            .client
            .build_update_offer(id, draft)
            .and_then(|req| self.send(req))
            .and_then(|resp| self.client.parse_update_offer(resp));
        let updated = result.map_err(|e| {
            error!(%id, error = %e, "failed to update offer");
            StoreError::from(e)
        })?;
        info!(%id, "updated offer");
        self.editor.reset();
        self.refresh();
        Ok(updated)
    }

    pub fn delete(&mut self, id: &OfferId) -> Result<(), StoreError> {
        let req = self.client.build_delete_offer(id);
        let result = self
            .send(req)
            .and_then(|resp| self.client.parse_delete_offer(resp));
        result.map_err(|e| {
            error!(%id, error = %e, "failed to delete offer");
            StoreError::from(e)
        })?;
        info!(%id, "deleted offer");
        self.refresh();
        Ok(())
    }

    /// Update the offer the editor is bound to with the editor's draft.
    /// Sends nothing when no offer is selected.
    pub fn update_selected(&mut self) -> Result<Offer, StoreError> {
        let id = self
            .editor
            .selected()
            .cloned()
            .ok_or(StoreError::NothingSelected)?;
        let draft = self.editor.draft().clone();
        self.update(&id, &draft)
    }

    /// The editor's submit button: update when bound to an offer, else create.
    pub fn submit(&mut self) -> Result<Offer, StoreError> {
        if self.editor.is_editing() {
            self.update_selected()
        } else {
            let draft = self.editor.draft().clone();
            self.create(&draft)
        }
    }

    /// The card's "Buy Now" button. Purchasing has no backend yet, so the
    /// intent is only recorded.
    pub fn buy_now(&self, id: &OfferId) {
        info!(%id, "buy now requested");
    }

    fn fetch(&mut self) -> Result<(), ApiError> {
        let req = self.client.build_list_offers();
        let resp = self.send(req)?;
        let mut offers = self.client.parse_list_offers(resp)?;
        offers.reverse();
        debug!(count = offers.len(), "fetched offers");
        self.offers = offers;
        Ok(())
    }

    /// A failed refresh does not undo the mutation that preceded it.
    fn refresh(&mut self) {
        if let Err(e) = self.fetch() {
            warn!(error = %e, "refresh after mutation failed, keeping previous offers");
        }
    }

    fn send(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        Ok(self.transport.execute(request)?)
    }
}
