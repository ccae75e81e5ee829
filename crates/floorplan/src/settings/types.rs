use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Semantic color buckets a feature can be painted with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorCategory {
    Utilities,
    Landuse,
    Corridor,
    Stairs,
    Elevator,
    Default,
    ServicePaths,
}

impl ColorCategory {
    pub const ALL: [ColorCategory; 7] = [
        ColorCategory::Utilities,
        ColorCategory::Landuse,
        ColorCategory::Corridor,
        ColorCategory::Stairs,
        ColorCategory::Elevator,
        ColorCategory::Default,
        ColorCategory::ServicePaths,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Utilities => "Utilities",
            Self::Landuse => "Land use",
            Self::Corridor => "Corridors",
            Self::Stairs => "Stairs",
            Self::Elevator => "Elevators",
            Self::Default => "Rooms",
            Self::ServicePaths => "Service paths",
        }
    }
}

/// User-configurable colors, stored as CSS hex strings (`#rrggbb`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorSettings {
    pub utilities: String,
    pub landuse: String,
    pub corridor: String,
    pub stairs: String,
    pub elevator: String,
    pub default: String,
    pub service_paths: String,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            utilities: "#ffa500".to_string(),
            landuse: "#a0522d".to_string(),
            corridor: "#aaaaaa".to_string(),
            stairs: "#00ff00".to_string(),
            elevator: "#00ff00".to_string(),
            default: "#3b82f6".to_string(),
            service_paths: "#ffff00".to_string(),
        }
    }
}

impl ColorSettings {
    pub fn get(&self, category: ColorCategory) -> &str {
        match category {
            ColorCategory::Utilities => &self.utilities,
            ColorCategory::Landuse => &self.landuse,
            ColorCategory::Corridor => &self.corridor,
            ColorCategory::Stairs => &self.stairs,
            ColorCategory::Elevator => &self.elevator,
            ColorCategory::Default => &self.default,
            ColorCategory::ServicePaths => &self.service_paths,
        }
    }
}

/// Which optional layers are visible when a map view opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisibilitySettings {
    pub show_service_paths: bool,
    pub show_utilities: bool,
}

impl Default for VisibilitySettings {
    fn default() -> Self {
        Self {
            show_service_paths: false,
            show_utilities: true,
        }
    }
}

/// Per-user visualization settings, persisted as one JSON document.
#[derive(Resource, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisualSettings {
    pub colors: ColorSettings,
    pub default_visibility: VisibilitySettings,
}

/// Partial update of [`ColorSettings`]; `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorPatch {
    pub utilities: Option<String>,
    pub landuse: Option<String>,
    pub corridor: Option<String>,
    pub stairs: Option<String>,
    pub elevator: Option<String>,
    pub default: Option<String>,
    pub service_paths: Option<String>,
}

/// Partial update of [`VisibilitySettings`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisibilityPatch {
    pub show_service_paths: Option<bool>,
    pub show_utilities: Option<bool>,
}

/// Partial update of [`VisualSettings`], merged field by field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub colors: Option<ColorPatch>,
    pub default_visibility: Option<VisibilityPatch>,
}

impl ColorSettings {
    pub fn merged(&self, patch: &ColorPatch) -> ColorSettings {
        let pick = |update: &Option<String>, current: &String| {
            update.clone().unwrap_or_else(|| current.clone())
        };
        ColorSettings {
            utilities: pick(&patch.utilities, &self.utilities),
            landuse: pick(&patch.landuse, &self.landuse),
            corridor: pick(&patch.corridor, &self.corridor),
            stairs: pick(&patch.stairs, &self.stairs),
            elevator: pick(&patch.elevator, &self.elevator),
            default: pick(&patch.default, &self.default),
            service_paths: pick(&patch.service_paths, &self.service_paths),
        }
    }
}

impl VisibilitySettings {
    pub fn merged(&self, patch: &VisibilityPatch) -> VisibilitySettings {
        VisibilitySettings {
            show_service_paths: patch
                .show_service_paths
                .unwrap_or(self.show_service_paths),
            show_utilities: patch.show_utilities.unwrap_or(self.show_utilities),
        }
    }
}

impl VisualSettings {
    /// A new settings value with `patch` merged in. `self` is not modified.
    pub fn merged(&self, patch: &SettingsPatch) -> VisualSettings {
        VisualSettings {
            colors: match &patch.colors {
                Some(colors) => self.colors.merged(colors),
                None => self.colors.clone(),
            },
            default_visibility: match &patch.default_visibility {
                Some(visibility) => self.default_visibility.merged(visibility),
                None => self.default_visibility,
            },
        }
    }

    /// Replace `self` with the merged value. Returns whether anything changed.
    pub fn apply(&mut self, patch: &SettingsPatch) -> bool {
        let next = self.merged(patch);
        if next == *self {
            return false;
        }
        *self = next;
        true
    }
}
