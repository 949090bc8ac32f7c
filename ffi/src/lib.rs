//! C-ABI wrapper around `offer-core`.
//!
//! # Overview
//! Exposes the offers CRUD API and the form helpers through `extern "C"`
//! functions, so the native screen can build and parse HTTP requests and
//! sanitize numeric input without linking a Rust async runtime.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-operation `build_*` / `parse_*` mirrors the core API 1:1.
//! - `offer_parse_list_offers` returns offers in display order (newest
//!   first), so the host can render the list as-is.
//! - A single `FfiOfferResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The caller owns all returned pointers and must call the matching
//!   `offer_free_*` function to release them.

pub mod types;

use std::ffi::CString;
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use offer_core::{ApiError, HttpResponse, OfferClient, OfferId};

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new client bound to `base_url` (e.g. `http://10.0.2.2:3000/api`).
///
/// Returns null if `base_url` is null or not UTF-8.
/// The caller must free the returned pointer with `offer_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn offer_client_new(base_url: *const c_char) -> *mut FfiOfferClient {
    catch_unwind(|| {
        let Some(url) = (unsafe { borrow_str(base_url) }) else {
            return std::ptr::null_mut();
        };
        let client = OfferClient::new(url);
        Box::into_raw(Box::new(FfiOfferClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `offer_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn offer_client_free(client: *mut FfiOfferClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Parse a caller-supplied id, rejecting null, non-UTF-8 and path-breaking ids.
unsafe fn read_id(id: *const c_char) -> Option<OfferId> {
    borrow_str(id).and_then(|s| OfferId::parse(s).ok())
}

/// Build an HTTP request for listing all offers.
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `offer_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn offer_build_list_offers(client: *const FfiOfferClient) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_list_offers())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build an HTTP request for creating an offer from `draft`.
///
/// Returns null if `client` or `draft` is null, or if serialization fails.
#[unsafe(no_mangle)]
pub extern "C" fn offer_build_create_offer(
    client: *const FfiOfferClient,
    draft: *const FfiOfferDraft,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || draft.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let draft = unsafe { (*draft).to_core() };
        match client.inner.build_create_offer(&draft) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build an HTTP request replacing offer `id` with `draft`.
///
/// Returns null if any argument is null or `id` is not a usable offer id.
#[unsafe(no_mangle)]
pub extern "C" fn offer_build_update_offer(
    client: *const FfiOfferClient,
    id: *const c_char,
    draft: *const FfiOfferDraft,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || draft.is_null() {
            return std::ptr::null_mut();
        }
        let Some(id) = (unsafe { read_id(id) }) else {
            return std::ptr::null_mut();
        };
        let client = unsafe { &*client };
        let draft = unsafe { (*draft).to_core() };
        match client.inner.build_update_offer(&id, &draft) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build an HTTP request for deleting offer `id`.
///
/// Returns null if `client` or `id` is null, or `id` is not a usable offer id.
#[unsafe(no_mangle)]
pub extern "C" fn offer_build_delete_offer(
    client: *const FfiOfferClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let Some(id) = (unsafe { read_id(id) }) else {
            return std::ptr::null_mut();
        };
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_delete_offer(&id))
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body reads
/// as an empty string.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = unsafe { borrow_str(resp.body) }.unwrap_or("").to_string();
    HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    }
}

/// Shared null checks, panic guard and error mapping for every parse entry point.
fn parse_with<T>(
    name: &str,
    client: *const FfiOfferClient,
    response: *const FfiHttpResponse,
    parse: impl FnOnce(&OfferClient, HttpResponse) -> Result<T, ApiError>,
    wrap: impl FnOnce(T) -> *mut FfiOfferResult,
) -> *mut FfiOfferResult {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiOfferResult::null_arg("client");
        }
        if response.is_null() {
            return FfiOfferResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = ffi_response_to_core(unsafe { &*response });
        match parse(&client.inner, resp) {
            Ok(value) => wrap(value),
            Err(e) => FfiOfferResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| FfiOfferResult::panic(&format!("panic in {name}")))
}

/// Parse an HTTP response from a list-offers request.
///
/// Returns a result with `data_tag = OfferList`, newest offer first.
#[unsafe(no_mangle)]
pub extern "C" fn offer_parse_list_offers(
    client: *const FfiOfferClient,
    response: *const FfiHttpResponse,
) -> *mut FfiOfferResult {
    parse_with(
        "offer_parse_list_offers",
        client,
        response,
        |c, r| c.parse_list_offers(r),
        |mut offers| {
            offers.reverse();
            FfiOfferResult::ok_offer_list(offers)
        },
    )
}

/// Parse an HTTP response from a create-offer request.
///
/// Returns a result with `data_tag = Offer` on success.
#[unsafe(no_mangle)]
pub extern "C" fn offer_parse_create_offer(
    client: *const FfiOfferClient,
    response: *const FfiHttpResponse,
) -> *mut FfiOfferResult {
    parse_with(
        "offer_parse_create_offer",
        client,
        response,
        |c, r| c.parse_create_offer(r),
        FfiOfferResult::ok_offer,
    )
}

/// Parse an HTTP response from an update-offer request.
///
/// Returns a result with `data_tag = Offer` on success.
#[unsafe(no_mangle)]
pub extern "C" fn offer_parse_update_offer(
    client: *const FfiOfferClient,
    response: *const FfiHttpResponse,
) -> *mut FfiOfferResult {
    parse_with(
        "offer_parse_update_offer",
        client,
        response,
        |c, r| c.parse_update_offer(r),
        FfiOfferResult::ok_offer,
    )
}

/// Parse an HTTP response from a delete-offer request.
///
/// Returns a result with `data_tag = None` on success.
#[unsafe(no_mangle)]
pub extern "C" fn offer_parse_delete_offer(
    client: *const FfiOfferClient,
    response: *const FfiHttpResponse,
) -> *mut FfiOfferResult {
    parse_with(
        "offer_parse_delete_offer",
        client,
        response,
        |c, r| c.parse_delete_offer(r),
        |()| FfiOfferResult::ok_empty(),
    )
}

// ---------------------------------------------------------------------------
// Form helpers
// ---------------------------------------------------------------------------

/// Strip everything but digits and `.` from numeric input (`"12a%"` -> `"12"`).
///
/// Returns null if `text` is null. Free the result with `offer_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn offer_sanitize_numeric(text: *const c_char) -> *mut c_char {
    catch_unwind(|| match unsafe { borrow_str(text) } {
        Some(text) => c_string(offer_core::sanitize_numeric(text)),
        None => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Sanitize `text` and parse its leading number into `*out`.
///
/// Returns false, leaving `*out` untouched, when no number is present.
#[unsafe(no_mangle)]
pub extern "C" fn offer_parse_number(text: *const c_char, out: *mut f64) -> bool {
    catch_unwind(|| {
        if out.is_null() {
            return false;
        }
        let parsed = unsafe { borrow_str(text) }
            .and_then(|t| offer_core::parse_number(&offer_core::sanitize_numeric(t)));
        match parsed {
            Some(value) => {
                unsafe { *out = value };
                true
            }
            None => false,
        }
    })
    .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `offer_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn offer_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.path.is_null() {
            drop(unsafe { CString::from_raw(req.path) });
        }
        if !req.body.is_null() {
            drop(unsafe { CString::from_raw(req.body) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    });
}

/// Free an `FfiOfferResult` returned by any `offer_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn offer_free_result(result: *mut FfiOfferResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Offer => {
                let offer = unsafe { Box::from_raw(result.data as *mut FfiOffer) };
                offer.free_fields();
            }
            FfiDataTag::OfferList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiOfferList) };
                if !list.items.is_null() && list.len > 0 {
                    let items = unsafe {
                        Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                            list.items,
                            list.len as usize,
                        ))
                    };
                    for item in items.iter() {
                        item.free_fields();
                    }
                }
            }
            FfiDataTag::None => {}
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn offer_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::{CStr, CString};

    const BASE: &str = "http://localhost:3000/api";
    const ID: &str = "65f1c0ffee0000000000abcd";

    fn new_client() -> *mut FfiOfferClient {
        let url = CString::new(BASE).unwrap();
        offer_client_new(url.as_ptr())
    }

    fn unset_draft() -> FfiOfferDraft {
        FfiOfferDraft {
            title: std::ptr::null(),
            description: std::ptr::null(),
            discount_percentage: f64::NAN,
            original_price: f64::NAN,
            discounted_price: f64::NAN,
        }
    }

    fn read(ptr: *const c_char) -> &'static str {
        unsafe { CStr::from_ptr(ptr) }.to_str().unwrap()
    }

    fn body_json(req: &FfiHttpRequest) -> serde_json::Value {
        serde_json::from_str(read(req.body)).unwrap()
    }

    #[test]
    fn client_new_and_free() {
        let client = new_client();
        assert!(!client.is_null());
        offer_client_free(client);
    }

    #[test]
    fn client_new_null_returns_null() {
        assert!(offer_client_new(std::ptr::null()).is_null());
    }

    #[test]
    fn client_free_null_is_safe() {
        offer_client_free(std::ptr::null_mut());
    }

    #[test]
    fn build_list_offers_returns_correct_request() {
        let client = new_client();
        let req = offer_build_list_offers(client);
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Get));
        assert_eq!(read(req_ref.path), "http://localhost:3000/api/offers");
        assert!(req_ref.body.is_null());
        assert_eq!(req_ref.headers_len, 0);

        offer_free_request(req);
        offer_client_free(client);
    }

    #[test]
    fn build_list_offers_null_client_returns_null() {
        assert!(offer_build_list_offers(std::ptr::null()).is_null());
    }

    #[test]
    fn build_create_offer_omits_unset_fields() {
        let client = new_client();
        let title = CString::new("Shoes").unwrap();
        let draft = FfiOfferDraft {
            title: title.as_ptr(),
            discount_percentage: 20.0,
            ..unset_draft()
        };
        let req = offer_build_create_offer(client, &draft);
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Post));
        assert_eq!(req_ref.headers_len, 1);
        let header = unsafe { &*req_ref.headers };
        assert_eq!(read(header.key), "content-type");
        assert_eq!(read(header.value), "application/json");
        assert_eq!(
            body_json(req_ref),
            serde_json::json!({"title": "Shoes", "discountPercentage": 20.0})
        );

        offer_free_request(req);
        offer_client_free(client);
    }

    #[test]
    fn build_create_offer_null_draft_returns_null() {
        let client = new_client();
        assert!(offer_build_create_offer(client, std::ptr::null()).is_null());
        offer_client_free(client);
    }

    #[test]
    fn build_update_offer_puts_to_id() {
        let client = new_client();
        let id = CString::new(ID).unwrap();
        let title = CString::new("Renamed").unwrap();
        let draft = FfiOfferDraft {
            title: title.as_ptr(),
            ..unset_draft()
        };
        let req = offer_build_update_offer(client, id.as_ptr(), &draft);
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Put));
        assert_eq!(read(req_ref.path), format!("{BASE}/offers/{ID}"));
        assert_eq!(body_json(req_ref)["title"], "Renamed");

        offer_free_request(req);
        offer_client_free(client);
    }

    #[test]
    fn build_update_offer_rejects_bad_id() {
        let client = new_client();
        let draft = unset_draft();
        let id = CString::new("a/b").unwrap();
        assert!(offer_build_update_offer(client, id.as_ptr(), &draft).is_null());
        let empty = CString::new("").unwrap();
        assert!(offer_build_update_offer(client, empty.as_ptr(), &draft).is_null());
        assert!(offer_build_update_offer(client, std::ptr::null(), &draft).is_null());
        offer_client_free(client);
    }

    #[test]
    fn build_delete_offer_valid_id() {
        let client = new_client();
        let id = CString::new(ID).unwrap();
        let req = offer_build_delete_offer(client, id.as_ptr());
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Delete));
        assert_eq!(read(req_ref.path), format!("{BASE}/offers/{ID}"));
        assert!(req_ref.body.is_null());

        offer_free_request(req);
        offer_client_free(client);
    }

    #[test]
    fn parse_list_offers_empty() {
        let client = new_client();
        let body = CString::new("[]").unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = offer_parse_list_offers(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert!(r.error_message.is_null());
        assert_eq!(r.data_tag, FfiDataTag::OfferList);

        let list = unsafe { &*(r.data as *const FfiOfferList) };
        assert_eq!(list.len, 0);
        assert!(list.items.is_null());

        offer_free_result(result);
        offer_client_free(client);
    }

    #[test]
    fn parse_list_offers_returns_newest_first() {
        let client = new_client();
        let body = CString::new(
            r#"[
                {"_id":"a","title":"Older","discountPercentage":5,"originalPrice":10,"discountedPrice":9.5},
                {"_id":"b","title":"Newer","description":"Fresh","discountPercentage":50,"originalPrice":20,"discountedPrice":10}
            ]"#,
        )
        .unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = offer_parse_list_offers(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);

        let list = unsafe { &*(r.data as *const FfiOfferList) };
        assert_eq!(list.len, 2);
        let items = unsafe { std::slice::from_raw_parts(list.items, list.len as usize) };
        assert_eq!(read(items[0].id), "b");
        assert_eq!(read(items[0].title), "Newer");
        assert_eq!(read(items[0].description), "Fresh");
        assert_eq!(items[0].discount_percentage, 50.0);
        assert_eq!(read(items[1].title), "Older");
        assert!(items[1].description.is_null());
        assert_eq!(items[1].discounted_price, 9.5);

        offer_free_result(result);
        offer_client_free(client);
    }

    #[test]
    fn parse_create_offer_success() {
        let client = new_client();
        let body = CString::new(r#"{"_id":"c","title":"New","originalPrice":12}"#).unwrap();
        let resp = FfiHttpResponse {
            status: 201,
            body: body.as_ptr(),
        };
        let result = offer_parse_create_offer(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert_eq!(r.data_tag, FfiDataTag::Offer);

        let offer = unsafe { &*(r.data as *const FfiOffer) };
        assert_eq!(read(offer.id), "c");
        assert_eq!(offer.original_price, 12.0);

        offer_free_result(result);
        offer_client_free(client);
    }

    #[test]
    fn parse_update_offer_not_found() {
        let client = new_client();
        let resp = FfiHttpResponse {
            status: 404,
            body: std::ptr::null(),
        };
        let result = offer_parse_update_offer(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NotFound);
        assert_eq!(r.http_status, 404);
        assert!(!r.error_message.is_null());

        offer_free_result(result);
        offer_client_free(client);
    }

    #[test]
    fn parse_create_offer_server_error_keeps_status() {
        let client = new_client();
        let body = CString::new("boom").unwrap();
        let resp = FfiHttpResponse {
            status: 500,
            body: body.as_ptr(),
        };
        let result = offer_parse_create_offer(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Http);
        assert_eq!(r.http_status, 500);
        assert_eq!(read(r.error_message), "HTTP 500: boom");

        offer_free_result(result);
        offer_client_free(client);
    }

    #[test]
    fn parse_delete_offer_success() {
        let client = new_client();
        let body = CString::new(r#"{"message":"Offer deleted"}"#).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = offer_parse_delete_offer(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert_eq!(r.data_tag, FfiDataTag::None);
        assert!(r.data.is_null());

        offer_free_result(result);
        offer_client_free(client);
    }

    #[test]
    fn parse_null_client_returns_null_arg() {
        let body = CString::new("[]").unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = offer_parse_list_offers(std::ptr::null(), &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);
        assert_eq!(read(r.error_message), "null argument: client");

        offer_free_result(result);
    }

    #[test]
    fn parse_null_response_returns_null_arg() {
        let client = new_client();
        let result = offer_parse_list_offers(client, std::ptr::null());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);

        offer_free_result(result);
        offer_client_free(client);
    }

    #[test]
    fn sanitize_numeric_strips_symbols() {
        let text = CString::new("12a%").unwrap();
        let out = offer_sanitize_numeric(text.as_ptr());
        assert_eq!(read(out), "12");
        offer_free_string(out);
        assert!(offer_sanitize_numeric(std::ptr::null()).is_null());
    }

    #[test]
    fn parse_number_writes_out_param() {
        let mut value = -1.0;
        let text = CString::new("$79.5").unwrap();
        assert!(offer_parse_number(text.as_ptr(), &mut value));
        assert_eq!(value, 79.5);

        let text = CString::new("abc").unwrap();
        assert!(!offer_parse_number(text.as_ptr(), &mut value));
        assert_eq!(value, 79.5);
        assert!(!offer_parse_number(text.as_ptr(), std::ptr::null_mut()));
    }

    #[test]
    fn free_functions_accept_null() {
        offer_free_request(std::ptr::null_mut());
        offer_free_result(std::ptr::null_mut());
        offer_free_string(std::ptr::null_mut());
    }
}
