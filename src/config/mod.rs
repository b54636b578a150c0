pub mod settings;
pub mod params;

// Re-export commonly used types
pub use settings::{
    WardrobeSettings, CatalogSettings, MenuSettings, WardrobeBehaviorSettings, SessionDefaults,
    SettingsError, config_path,
};
pub use params::SessionParams;
