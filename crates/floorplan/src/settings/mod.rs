//! Per-user visual settings: colours, default layer visibility and partial
//! updates merged field by field.

mod types;


pub use types::{
    ColorCategory, ColorPatch, ColorSettings, SettingsPatch, VisibilityPatch, VisibilitySettings,
    VisualSettings,
};
