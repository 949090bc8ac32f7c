//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, NaN
//! instead of `None` for numbers, and tagged enums with explicit
//! discriminants. Conversions live here so `lib.rs` stays focused on the
//! `extern "C"` surface.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use offer_core::{ApiError, HttpMethod, Offer, OfferClient, OfferDraft};

/// Opaque handle to an `OfferClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiOfferClient {
    pub(crate) inner: OfferClient,
}

/// Allocate a C string, dropping interior NULs rather than failing.
pub(crate) fn c_string(s: impl Into<String>) -> *mut c_char {
    let mut s = s.into();
    s.retain(|c| c != '\0');
    CString::new(s).unwrap_or_default().into_raw()
}

/// Borrow a caller-owned C string. Null and non-UTF-8 input yield `None`.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
pub(crate) unsafe fn borrow_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

fn nan_to_none(v: f64) -> Option<f64> {
    if v.is_nan() {
        None
    } else {
        Some(v)
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `offer_build_*` functions. The host executes the request and
/// passes the response back through `offer_parse_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: offer_core::HttpRequest) -> *mut Self {
        let body = match req.body {
            Some(b) => c_string(b),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: c_string(k),
                    value: c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path: c_string(req.path),
            headers,
            headers_len,
            body,
        }))
    }
}

/// Form input for create and update.
///
/// Null strings and NaN numbers mean "unset" and are left out of the JSON
/// body. The FFI layer reads but does not free these fields.
#[repr(C)]
pub struct FfiOfferDraft {
    pub title: *const c_char,
    pub description: *const c_char,
    pub discount_percentage: f64,
    pub original_price: f64,
    pub discounted_price: f64,
}

impl FfiOfferDraft {
    /// # Safety
    /// String fields must be null or valid NUL-terminated strings.
    pub(crate) unsafe fn to_core(&self) -> OfferDraft {
        OfferDraft {
            title: borrow_str(self.title).map(str::to_string),
            description: borrow_str(self.description).map(str::to_string),
            discount_percentage: nan_to_none(self.discount_percentage),
            original_price: nan_to_none(self.original_price),
            discounted_price: nan_to_none(self.discounted_price),
        }
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The host constructs this after executing a request and passes a pointer
/// to an `offer_parse_*` function. The FFI layer reads but does not free
/// these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiOfferResult`.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    NotFound = 1,
    Http = 2,
    Deserialization = 3,
    Serialization = 4,
    InvalidId = 5,
    Transport = 6,
    Panic = 7,
    NullArg = 8,
}

/// Tag that tells `offer_free_result` what `FfiOfferResult::data` points to.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    Offer = 1,
    OfferList = 2,
}

/// A persisted offer exposed to C. `description` may be null.
#[repr(C)]
pub struct FfiOffer {
    pub id: *mut c_char,
    pub title: *mut c_char,
    pub description: *mut c_char,
    pub discount_percentage: f64,
    pub original_price: f64,
    pub discounted_price: f64,
}

impl FfiOffer {
    fn from_core(offer: Offer) -> Self {
        FfiOffer {
            id: c_string(offer.id.to_string()),
            title: c_string(offer.title),
            description: offer.description.map_or(std::ptr::null_mut(), c_string),
            discount_percentage: offer.discount_percentage,
            original_price: offer.original_price,
            discounted_price: offer.discounted_price,
        }
    }

    /// Free the C-string fields (but not the struct itself).
    pub(crate) fn free_fields(&self) {
        for ptr in [self.id, self.title, self.description] {
            if !ptr.is_null() {
                drop(unsafe { CString::from_raw(ptr) });
            }
        }
    }
}

/// A list of offers exposed to C.
#[repr(C)]
pub struct FfiOfferList {
    pub items: *mut FfiOffer,
    pub len: u32,
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiOfferResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut std::ffi::c_void,
}

impl FfiOfferResult {
    fn ok(data_tag: FfiDataTag, data: *mut std::ffi::c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiOfferResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag,
            data,
        }))
    }

    fn err(error_code: FfiErrorCode, http_status: u16, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiOfferResult {
            error_code,
            error_message: c_string(msg),
            http_status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    /// Build a success result carrying a single `FfiOffer`.
    pub(crate) fn ok_offer(offer: Offer) -> *mut Self {
        let ffi_offer = Box::new(FfiOffer::from_core(offer));
        Self::ok(FfiDataTag::Offer, Box::into_raw(ffi_offer) as *mut std::ffi::c_void)
    }

    /// Build a success result carrying an `FfiOfferList`.
    pub(crate) fn ok_offer_list(offers: Vec<Offer>) -> *mut Self {
        let len = offers.len() as u32;
        let items = if offers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_offers: Box<[FfiOffer]> = offers.into_iter().map(FfiOffer::from_core).collect();
            Box::into_raw(ffi_offers) as *mut FfiOffer
        };
        let ffi_list = Box::new(FfiOfferList { items, len });
        Self::ok(FfiDataTag::OfferList, Box::into_raw(ffi_list) as *mut std::ffi::c_void)
    }

    /// Build a success result with no data payload (e.g. delete).
    pub(crate) fn ok_empty() -> *mut Self {
        Self::ok(FfiDataTag::None, std::ptr::null_mut())
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let code = match &err {
            ApiError::NotFound => FfiErrorCode::NotFound,
            ApiError::Http { .. } => FfiErrorCode::Http,
            ApiError::Deserialization(_) => FfiErrorCode::Deserialization,
            ApiError::Serialization(_) => FfiErrorCode::Serialization,
            ApiError::InvalidId(_) => FfiErrorCode::InvalidId,
            ApiError::Transport(_) => FfiErrorCode::Transport,
        };
        Self::err(code, err.status().unwrap_or(0), err.to_string())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::err(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::err(FfiErrorCode::Panic, 0, msg.to_string())
    }
}
