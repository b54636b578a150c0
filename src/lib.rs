// MRE Wardrobe: virtual wardrobe extension for hosted mixed-reality worlds
// Preview a content pack, wear one item, tune its size

pub mod utils;
pub mod config;
pub mod host;
pub mod catalog;
pub mod wardrobe;
pub mod session;

// Re-export commonly used types for convenience
pub use catalog::{
    Catalog, CatalogError, CatalogSource, CatalogState, HttpCatalogSource, WearableDescriptor,
};
pub use config::{SessionParams, WardrobeSettings};
pub use host::{HostEvent, RecordingHost, SceneHost, UserId};
pub use session::{Session, SessionEvent};
pub use wardrobe::{WardrobeController, WardrobeError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
