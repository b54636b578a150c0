use std::collections::HashMap;

use super::settings::WardrobeSettings;

/// Per-session values handed over by the host when the extension is
/// instantiated in a world.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionParams {
    pub content_pack: Option<String>,
    pub header: String,
}

impl SessionParams {
    /// Resolve parameters from the host's parameter set, falling back to
    /// configured defaults for anything absent or blank.
    pub fn from_parameter_set(
        params: &HashMap<String, String>,
        settings: &WardrobeSettings,
    ) -> Self {
        let content_pack = non_blank(params.get("content_pack"))
            .or_else(|| non_blank(settings.session.content_pack.as_ref()));
        let header = non_blank(params.get("header"))
            .unwrap_or_else(|| settings.menu.header.clone());

        Self { content_pack, header }
    }

    pub fn from_settings(settings: &WardrobeSettings) -> Self {
        Self::from_parameter_set(&HashMap::new(), settings)
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
