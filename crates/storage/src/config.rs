/// Environment variable naming the current user.
pub const USER_ENV: &str = "WAYFINDER_USER";

/// User id when none is configured.
pub const DEFAULT_USER: &str = "anonymous";

/// Environment variable overriding the native storage directory.
pub const STORAGE_DIR_ENV: &str = "WAYFINDER_STORAGE_DIR";

pub const DEFAULT_STORAGE_DIR: &str = ".wayfinder";

pub const VISUAL_SETTINGS_KEY_PREFIX: &str = "wayfinder-visual-settings";
pub const EVENTS_KEY_PREFIX: &str = "wayfinder-events";
