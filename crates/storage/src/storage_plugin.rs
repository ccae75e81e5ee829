use bevy::prelude::*;

use floorplan::events::EventLog;
use floorplan::settings::VisualSettings;

use crate::config::{DEFAULT_USER, USER_ENV};
use crate::store::DocumentStore;
use crate::user_documents::{encode_document, load_or_default, UserDocument};

/// The user whose documents are loaded. Changing it swaps every persisted
/// resource for that user's copy.
#[derive(Resource, Clone, Debug, PartialEq, Eq)]
pub struct UserIdentity(pub String);

impl Default for UserIdentity {
    fn default() -> Self {
        Self(DEFAULT_USER.to_string())
    }
}

impl UserIdentity {
    /// `$WAYFINDER_USER`, or the anonymous user when unset or blank.
    pub fn from_env() -> Self {
        match std::env::var(USER_ENV) {
            Ok(user) if !user.trim().is_empty() => Self(user.trim().to_string()),
            _ => Self::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// Loads the user's settings and events, and writes them back whenever they
/// change. Insert a [`DocumentStore`] or [`UserIdentity`] before adding the
/// plugin to override the platform defaults.
pub struct StoragePlugin;

impl Plugin for StoragePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DocumentStore>() {
            app.insert_resource(DocumentStore::platform_default());
        }
        if !app.world().contains_resource::<UserIdentity>() {
            app.insert_resource(UserIdentity::from_env());
        }
        app.init_resource::<VisualSettings>()
            .init_resource::<EventLog>()
            .add_systems(
                PreUpdate,
                (
                    sync_document::<VisualSettings>,
                    sync_document::<EventLog>,
                ),
            );
    }
}

/// Keep `D` in step with its stored document: reload it when the user
/// changes (including the first frame), otherwise write it back after
/// every change.
fn sync_document<D: UserDocument>(
    store: Res<DocumentStore>,
    user: Res<UserIdentity>,
    mut document: ResMut<D>,
    mut last_written: Local<Option<String>>,
) {
    if user.is_changed() {
        let loaded: D = load_or_default(&**store, &user.0);
        *last_written = encode_document(&loaded).ok();
        *document = loaded;
        info!("Loaded {} for user {}", D::KEY_PREFIX, user.0);
        return;
    }
    if !document.is_changed() {
        return;
    }

    let text = match encode_document(&*document) {
        Ok(text) => text,
        Err(e) => {
            warn!("Could not encode {}: {}", D::KEY_PREFIX, e);
            return;
        }
    };
    if last_written.as_deref() == Some(text.as_str()) {
        return;
    }
    match store.write(&D::storage_key(&user.0), &text) {
        Ok(()) => *last_written = Some(text),
        Err(e) => error!("Failed to persist {}: {}", D::storage_key(&user.0), e),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use floorplan::events::{EventLocation, NewMapEvent};
    use floorplan::settings::{SettingsPatch, VisibilityPatch};

    use super::*;
    use crate::store::{KeyValueStore, MemoryStore};
    use crate::StorageError;

    /// Shares one `MemoryStore` between the app and the test body.
    #[derive(Clone, Default)]
    struct SharedStore(Arc<MemoryStore>);

    impl KeyValueStore for SharedStore {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.read(key)
        }
        fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.write(key, value)
        }
        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.0.remove(key)
        }
    }

    fn app_with(store: SharedStore, user: &str) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(DocumentStore::new(store));
        app.insert_resource(UserIdentity(user.to_string()));
        app.add_plugins(StoragePlugin);
        app.update();
        app
    }

    fn sample_event() -> NewMapEvent {
        let start = Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).unwrap();
        NewMapEvent {
            title: "Orientation".to_string(),
            description: String::new(),
            location: EventLocation {
                latitude: 1.3067,
                longitude: 103.7695,
                level: 2,
            },
            start_time: start,
            end_time: start + chrono::Duration::hours(1),
        }
    }

    #[test]
    fn test_startup_loads_stored_settings() {
        let store = SharedStore::default();
        store
            .write(
                "wayfinder-visual-settings-alice",
                r#"{"defaultVisibility":{"showServicePaths":true,"showUtilities":true}}"#,
            )
            .unwrap();
        let app = app_with(store, "alice");
        assert!(
            app.world()
                .resource::<VisualSettings>()
                .default_visibility
                .show_service_paths
        );
    }

    #[test]
    fn test_changes_are_written_back() {
        let store = SharedStore::default();
        let mut app = app_with(store.clone(), "alice");

        let start = sample_event().start_time;
        app.world_mut()
            .resource_mut::<EventLog>()
            .add(sample_event(), start);
        app.world_mut()
            .resource_mut::<VisualSettings>()
            .apply(&SettingsPatch {
                default_visibility: Some(VisibilityPatch {
                    show_utilities: Some(false),
                    ..Default::default()
                }),
                ..Default::default()
            });
        app.update();

        let events = store.read("wayfinder-events-alice").unwrap().unwrap();
        assert!(events.contains("Orientation"), "got: {events}");
        let settings = store
            .read("wayfinder-visual-settings-alice")
            .unwrap()
            .unwrap();
        assert!(settings.contains(r#""showUtilities":false"#), "got: {settings}");
    }

    #[test]
    fn test_unchanged_documents_are_not_written() {
        let store = SharedStore::default();
        let mut app = app_with(store.clone(), "alice");
        app.update();
        app.update();
        assert_eq!(store.read("wayfinder-events-alice").unwrap(), None);
    }

    #[test]
    fn test_switching_user_swaps_documents() {
        let store = SharedStore::default();
        let mut app = app_with(store.clone(), "alice");
        let start = sample_event().start_time;
        app.world_mut()
            .resource_mut::<EventLog>()
            .add(sample_event(), start);
        app.update();

        app.world_mut().resource_mut::<UserIdentity>().0 = "bob".to_string();
        app.update();
        assert!(app.world().resource::<EventLog>().is_empty());

        app.world_mut().resource_mut::<UserIdentity>().0 = "alice".to_string();
        app.update();
        assert_eq!(app.world().resource::<EventLog>().len(), 1);
    }

    #[test]
    fn test_corrupt_document_keeps_defaults() {
        let store = SharedStore::default();
        store.write("wayfinder-events-alice", "[{").unwrap();
        let app = app_with(store.clone(), "alice");
        assert!(app.world().resource::<EventLog>().is_empty());
        // The corrupt entry is left alone until the user edits their events.
        assert_eq!(
            store.read("wayfinder-events-alice").unwrap().as_deref(),
            Some("[{")
        );
    }
}
