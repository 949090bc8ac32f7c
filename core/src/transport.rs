//! The seam where the host performs I/O.
//!
//! The core never opens a socket. A mobile host, a test, or a blocking HTTP
//! agent implements `Transport` and hands it to `OfferStore`.

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

pub trait Transport {
    /// Execute `request` and return whatever response the server sent,
    /// including non-2xx statuses. Errors mean no response was received.
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}
