//! # Offline Storefront Core
//!
//! Local state for an offline demo storefront: a wishlist, an order list, a
//! review feed, customer-care reports and a single registered account. All
//! of it lives in an LMDB environment on the device; there is no server.
//!
//! ## Features
//!
//! - **Persisted collections**: every feature is an ordered JSON collection
//!   under a fixed key, mutated by whole-collection load/transform/save
//!   round trips ([`collection::PersistedCollection`])
//! - **Forgiving reads**: missing or undecodable data loads as empty
//! - **Render hooks**: callbacks receive the fresh collection after each change
//! - **FFI-ready**: every operation is exposed as a C function exchanging JSON
//! - **Safe error handling**: no `unwrap()` on runtime paths; failures come back as
//!   [`AppResponse`](app_response::AppResponse) values
//!
//! ## Quick Start
//!
//! ```no_run
//! use offline_storefront_core::{create_storefront, toggle_wishlist, free_response};
//! use std::ffi::CString;
//!
//! let name = CString::new("my_shop").unwrap();
//! let shop = create_storefront(name.as_ptr());
//!
//! let card = CString::new(r#"{"name":"Shoe","price":"$10","image":"shoe.png"}"#).unwrap();
//! let response = toggle_wishlist(shop, card.as_ptr());
//! free_response(response);
//! ```
//!
//! ## FFI Functions
//!
//! Every function except the constructors returns a JSON-encoded
//! [`AppResponse`](app_response::AppResponse) that must be released with
//! [`free_response`].
//!
//! - [`create_storefront`] / [`create_storefront_with_config`] - Open a storefront
//! - [`register_user`] / [`login_user`] - Single local account
//! - [`toggle_wishlist`] / [`remove_from_wishlist`] / [`get_wishlist`]
//! - [`place_order`] / [`cancel_order`] / [`get_orders`]
//! - [`submit_review`] / [`get_reviews`]
//! - [`submit_report`] / [`get_reports`]
//! - [`filter_products`] - Search over product cards, no state needed
//! - [`sync_storefront`] - Flush to disk, e.g. before the host suspends
//! - [`clear_storefront`] - Wipe all stored data
//! - [`close_storefront`] - Release the handle
//!
//! Only one handle per storefront file may be open at a time; a second
//! `create_storefront` for the same name returns null until the first handle
//! is closed.

pub mod app_response;
pub mod auth;
pub mod collection;
pub mod local_store;
pub mod orders;
pub mod record_id;
pub mod records;
pub mod reports;
pub mod reviews;
pub mod search;
pub mod store_config;
pub mod storefront;
pub mod timestamps;
pub mod wishlist;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::app_response::AppResponse;
use crate::auth::{welcome_message, LoginRequest, Registration};
use crate::records::ProductCard;
use crate::reports::ReportSubmission;
use crate::reviews::ReviewSubmission;
use crate::search::SearchFilter;
use crate::store_config::StoreConfig;
use crate::storefront::Storefront;

/// Opens (or creates) the storefront stored in `<name>.lmdb`.
///
/// Returns a pointer to the [`Storefront`] on success, or null on failure.
/// The handle must eventually be passed to [`close_storefront`]. There can be
/// one open handle per name; close it before opening the same name again.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use offline_storefront_core::create_storefront;
///
/// let name = CString::new("demo_shop").unwrap();
/// let shop = create_storefront(name.as_ptr());
/// assert!(!shop.is_null());
/// ```
///
/// # Errors
///
/// Returns null if the name pointer is null, not UTF-8, empty, already open
/// in this process, or the LMDB environment cannot be opened.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_storefront(name: *const c_char) -> *mut Storefront {
    if name.is_null() {
        warn!("Null name pointer passed to create_storefront");
        return std::ptr::null_mut();
    }

    let name_str = match unsafe { CStr::from_ptr(name).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in name parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    open_storefront(&StoreConfig::named(name_str))
}

/// Opens a storefront from a JSON [`StoreConfig`], e.g.
/// `{"name":"shop","directory":"/data/app","map_size":1048576}`.
/// Missing fields take their defaults. Same one-handle rule as [`create_storefront`].
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_storefront_with_config(config_json: *const c_char) -> *mut Storefront {
    if config_json.is_null() {
        warn!("Null config pointer passed to create_storefront_with_config");
        return std::ptr::null_mut();
    }

    let json = match unsafe { CStr::from_ptr(config_json).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in config parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    match StoreConfig::from_json(json) {
        Ok(config) => open_storefront(&config),
        Err(e) => {
            warn!("Rejected storefront config: {e}");
            std::ptr::null_mut()
        }
    }
}

fn open_storefront(config: &StoreConfig) -> *mut Storefront {
    info!("Attempting to open storefront at: {}", config.lmdb_path().display());

    match Storefront::open(config) {
        Ok(storefront) => Box::into_raw(Box::new(storefront)),
        Err(e) => {
            warn!("❌ Failed to open storefront: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Registers the local account from a JSON registration form:
/// `{"name":"...","email":"...","password":"...","confirmPassword":"..."}`.
///
/// Replaces any previously registered account. Validation failures come back
/// as `ValidationError` carrying the message to show next to the form.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn register_user(state: *mut Storefront, json_ptr: *const c_char) -> *const c_char {
    let storefront = match state_ref(state, "register_user") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let form: Registration = match parse_json(json_ptr, "registration") {
        Ok(form) => form,
        Err(err) => return err,
    };

    match storefront.accounts().register(&form) {
        Ok(_) => response_to_c_string(&AppResponse::success(
            "Registration successful. You can now login.",
        )),
        Err(e) => response_to_c_string(&e),
    }
}

/// Checks `{"email":"...","password":"..."}` against the registered account.
/// Success carries the greeting, e.g. `Welcome, Ada!`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn login_user(state: *mut Storefront, json_ptr: *const c_char) -> *const c_char {
    let storefront = match state_ref(state, "login_user") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let request: LoginRequest = match parse_json(json_ptr, "login") {
        Ok(request) => request,
        Err(err) => return err,
    };

    match storefront.accounts().login(&request) {
        Ok(user) => response_to_c_string(&AppResponse::success(welcome_message(&user))),
        Err(e) => response_to_c_string(&e),
    }
}

/// Adds the product card to the wishlist, or removes it if a product with the
/// same name is already there. The payload is `{"items":[...],"added":bool}`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn toggle_wishlist(state: *mut Storefront, card_json: *const c_char) -> *const c_char {
    let storefront = match state_ref(state, "toggle_wishlist") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let card: ProductCard = match parse_json(card_json, "product card") {
        Ok(card) => card,
        Err(err) => return err,
    };

    json_response(storefront.wishlist().toggle(card))
}

/// Removes every wishlist item named `name`. The payload is the remaining items.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn remove_from_wishlist(state: *mut Storefront, name: *const c_char) -> *const c_char {
    let storefront = match state_ref(state, "remove_from_wishlist") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let name = match c_ptr_to_string(name, "name") {
        Ok(name) => name,
        Err(err) => return err,
    };

    json_response(storefront.wishlist().remove(&name))
}

/// The payload is the wishlist items in insertion order.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_wishlist(state: *mut Storefront) -> *const c_char {
    match state_ref(state, "get_wishlist") {
        Ok(storefront) => json_response(Ok(storefront.wishlist().items())),
        Err(err) => err,
    }
}

/// Places an order for the product card. The payload is the new order; its
/// `id` is the confirmation number.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn place_order(state: *mut Storefront, card_json: *const c_char) -> *const c_char {
    let storefront = match state_ref(state, "place_order") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let card: ProductCard = match parse_json(card_json, "product card") {
        Ok(card) => card,
        Err(err) => return err,
    };

    json_response(storefront.orders().place(card))
}

/// Cancels the order with the given id. The payload is the remaining orders;
/// an unknown id leaves them unchanged.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn cancel_order(state: *mut Storefront, id: *const c_char) -> *const c_char {
    let storefront = match state_ref(state, "cancel_order") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let id = match c_ptr_to_string(id, "id") {
        Ok(id) => id,
        Err(err) => return err,
    };

    json_response(storefront.orders().cancel(&id))
}

/// The payload is every placed order, oldest first.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_orders(state: *mut Storefront) -> *const c_char {
    match state_ref(state, "get_orders") {
        Ok(storefront) => json_response(Ok(storefront.orders().list())),
        Err(err) => err,
    }
}

/// Posts `{"name":"...","comment":"..."}` to the top of the review feed.
/// A blank name posts as `Anonymous`; a blank comment is rejected.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn submit_review(state: *mut Storefront, json_ptr: *const c_char) -> *const c_char {
    let storefront = match state_ref(state, "submit_review") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let submission: ReviewSubmission = match parse_json(json_ptr, "review") {
        Ok(submission) => submission,
        Err(err) => return err,
    };

    json_response(storefront.reviews().submit(&submission))
}

/// The payload is the review feed, newest first.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_reviews(state: *mut Storefront) -> *const c_char {
    match state_ref(state, "get_reviews") {
        Ok(storefront) => json_response(Ok(storefront.reviews().list())),
        Err(err) => err,
    }
}

/// Files a contact-form report `{"email":"...","message":"..."}`. The payload
/// is the stored report; its `id` is the reference number.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn submit_report(state: *mut Storefront, json_ptr: *const c_char) -> *const c_char {
    let storefront = match state_ref(state, "submit_report") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let submission: ReportSubmission = match parse_json(json_ptr, "report") {
        Ok(submission) => submission,
        Err(err) => return err,
    };

    json_response(storefront.reports().submit(&submission))
}

/// The payload is every filed report, newest first.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_reports(state: *mut Storefront) -> *const c_char {
    match state_ref(state, "get_reports") {
        Ok(storefront) => json_response(Ok(storefront.reports().list())),
        Err(err) => err,
    }
}

/// Filters a JSON array of product cards by a search query. The payload is the
/// cards that stay visible, in their original order.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn filter_products(query: *const c_char, cards_json: *const c_char) -> *const c_char {
    let query = match c_ptr_to_string(query, "query") {
        Ok(query) => query,
        Err(err) => return err,
    };
    let cards: Vec<ProductCard> = match parse_json(cards_json, "product cards") {
        Ok(cards) => cards,
        Err(err) => return err,
    };

    json_response(Ok(SearchFilter::new(&query).visible(&cards)))
}

/// Flushes pending writes to disk. Hosts call this before being suspended.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn sync_storefront(state: *mut Storefront) -> *const c_char {
    let storefront = match state_ref(state, "sync_storefront") {
        Ok(s) => s,
        Err(err) => return err,
    };

    match storefront.sync() {
        Ok(()) => response_to_c_string(&AppResponse::success("Storefront synced to disk")),
        Err(e) => response_to_c_string(&e),
    }
}

/// Removes the account and every collection. The storefront stays usable.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn clear_storefront(state: *mut Storefront) -> *const c_char {
    let storefront = match state_ref(state, "clear_storefront") {
        Ok(s) => s,
        Err(err) => return err,
    };

    match storefront.clear_all() {
        Ok(()) => response_to_c_string(&AppResponse::success("All storefront data cleared")),
        Err(e) => response_to_c_string(&e),
    }
}

/// Releases a handle returned by [`create_storefront`]. The pointer must not
/// be used afterwards. Data stays on disk for the next open.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_storefront(state: *mut Storefront) -> *const c_char {
    if state.is_null() {
        let error = AppResponse::BadRequest("Null state pointer passed to close_storefront".to_string());
        return response_to_c_string(&error);
    }

    drop(unsafe { Box::from_raw(state) });
    info!("Storefront handle closed");
    response_to_c_string(&AppResponse::success("Storefront closed successfully"))
}

/// Frees a string returned by any function in this library. Null is ignored.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_response(ptr: *const c_char) {
    if ptr.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(ptr as *mut c_char) });
}

fn state_ref<'a>(state: *mut Storefront, caller: &str) -> Result<&'a Storefront, *const c_char> {
    match unsafe { state.as_ref() } {
        Some(storefront) => Ok(storefront),
        None => {
            warn!("Null state pointer passed to {caller}");
            let error = AppResponse::BadRequest(format!("Null state pointer passed to {caller}"));
            Err(response_to_c_string(&error))
        }
    }
}

/// Reads a C string and decodes it as JSON into `T`.
fn parse_json<T: DeserializeOwned>(ptr: *const c_char, field_name: &str) -> Result<T, *const c_char> {
    let json = c_ptr_to_string(ptr, field_name)?;
    serde_json::from_str(&json).map_err(|e| {
        let error = AppResponse::SerializationError(format!("Invalid {field_name} JSON: {e}"));
        response_to_c_string(&error)
    })
}

/// Wraps a serializable result as `{"Ok":"<json>"}` or the error response.
fn json_response<T: Serialize>(result: Result<T, AppResponse>) -> *const c_char {
    let response = match result {
        Ok(value) => match serde_json::to_string(&value) {
            Ok(json) => AppResponse::Ok(json),
            Err(e) => AppResponse::SerializationError(format!("Failed to serialize result: {e}")),
        },
        Err(e) => e,
    };
    response_to_c_string(&response)
}

/// Serializes an [`AppResponse`] into a caller-owned C string.
///
/// Returns null if serialization or C string creation fails.
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

/// Converts a C string pointer to a Rust String.
///
/// On failure the `Err` already holds the `BadRequest` response to hand back.
fn c_ptr_to_string(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = AppResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(response_to_c_string(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = AppResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}
