//! Per-user JSON documents.
//!
//! Every persisted resource implements [`UserDocument`] and is stored under
//! `{KEY_PREFIX}-{user}`, so switching users swaps whole documents.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

use floorplan::events::EventLog;
use floorplan::settings::VisualSettings;

use crate::config::{EVENTS_KEY_PREFIX, VISUAL_SETTINGS_KEY_PREFIX};
use crate::storage_error::StorageError;
use crate::store::KeyValueStore;

/// A resource persisted as one JSON document per user.
pub trait UserDocument: Resource + Default + Serialize + DeserializeOwned {
    /// Stable across versions; the user id is appended.
    const KEY_PREFIX: &'static str;

    fn storage_key(user: &str) -> String {
        format!("{}-{}", Self::KEY_PREFIX, user)
    }
}

impl UserDocument for VisualSettings {
    const KEY_PREFIX: &'static str = VISUAL_SETTINGS_KEY_PREFIX;
}

impl UserDocument for EventLog {
    const KEY_PREFIX: &'static str = EVENTS_KEY_PREFIX;
}

pub fn encode_document<D: UserDocument>(document: &D) -> Result<String, StorageError> {
    serde_json::to_string(document).map_err(|e| StorageError::Encode(e.to_string()))
}

pub fn decode_document<D: UserDocument>(text: &str) -> Result<D, StorageError> {
    serde_json::from_str(text).map_err(|e| StorageError::Decode(e.to_string()))
}

/// Read `user`'s document. `Ok(None)` when nothing has been stored yet.
pub fn load_document<D: UserDocument>(
    store: &dyn KeyValueStore,
    user: &str,
) -> Result<Option<D>, StorageError> {
    store
        .read(&D::storage_key(user))?
        .map(|text| decode_document(&text))
        .transpose()
}

pub fn save_document<D: UserDocument>(
    store: &dyn KeyValueStore,
    user: &str,
    document: &D,
) -> Result<(), StorageError> {
    store.write(&D::storage_key(user), &encode_document(document)?)
}

/// Read `user`'s document, falling back to the default on a missing or
/// corrupt entry. Corruption is logged, not propagated.
pub fn load_or_default<D: UserDocument>(store: &dyn KeyValueStore, user: &str) -> D {
    match load_document::<D>(store, user) {
        Ok(Some(document)) => document,
        Ok(None) => D::default(),
        Err(e) => {
            warn!(
                "Stored document {} is unreadable, falling back to defaults: {}",
                D::storage_key(user),
                e
            );
            D::default()
        }
    }
}
