//! Registration and login against the single locally stored account.
//!
//! Registering overwrites whatever account was stored before. Passwords are
//! kept and compared in plaintext; this exists to make a demo storefront's
//! forms behave, not to protect anything.

use std::sync::LazyLock;

use log::info;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;
use crate::collection::PersistedSlot;
use crate::local_store::KeyValueStore;
use crate::record_id::{create_id, USER_PREFIX};
use crate::records::{UserCredential, USER_KEY};

pub const MIN_NAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

// Constant pattern, exercised by test_email_pattern.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

/// Fields of the registration form, as typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Length as the browser form measures it, in UTF-16 code units.
fn form_length(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Checks the form in the order the page reports problems; the first failure wins.
pub fn validate_registration(form: &Registration) -> Result<(), AppResponse> {
    if form_length(form.name.trim()) < MIN_NAME_LEN {
        return Err(AppResponse::validation("Name must be at least 3 characters."));
    }
    if !is_valid_email(form.email.trim()) {
        return Err(AppResponse::validation("Please enter a valid email."));
    }
    if form_length(&form.password) < MIN_PASSWORD_LEN {
        return Err(AppResponse::validation("Password must be at least 6 characters."));
    }
    if form.password != form.confirm_password {
        return Err(AppResponse::validation("Passwords do not match."));
    }
    Ok(())
}

pub fn welcome_message(user: &UserCredential) -> String {
    format!("Welcome, {}!", user.name)
}

pub struct Accounts<'s> {
    slot: PersistedSlot<'s, UserCredential>,
}

impl<'s> Accounts<'s> {
    pub fn new(store: &'s dyn KeyValueStore) -> Self {
        Self {
            slot: PersistedSlot::new(store, USER_KEY),
        }
    }

    pub fn register(&self, form: &Registration) -> Result<UserCredential, AppResponse> {
        validate_registration(form)?;

        let user = UserCredential {
            id: create_id(USER_PREFIX),
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            password: form.password.clone(),
        };
        self.slot.save(&user)?;
        info!("Registered account {}", user.id);
        Ok(user)
    }

    pub fn login(&self, request: &LoginRequest) -> Result<UserCredential, AppResponse> {
        let stored = self.slot.load().ok_or_else(|| {
            AppResponse::NotFound("No registered user found. Please register first.".to_string())
        })?;

        if request.email.trim() != stored.email || request.password != stored.password {
            return Err(AppResponse::Unauthorized("Email or password incorrect.".to_string()));
        }
        Ok(stored)
    }

    pub fn current_user(&self) -> Option<UserCredential> {
        self.slot.load()
    }
}
