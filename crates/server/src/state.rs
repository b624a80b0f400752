use std::sync::RwLock;

use sonarr_provider_core::{SanitizedSettings, SonarrProvider};

/// Shared application state
pub struct AppState {
    provider: SonarrProvider,
    settings: RwLock<Option<SanitizedSettings>>,
}

impl AppState {
    pub fn new(provider: SonarrProvider) -> Self {
        Self {
            provider,
            settings: RwLock::new(None),
        }
    }

    pub fn provider(&self) -> &SonarrProvider {
        &self.provider
    }

    /// Settings of the last successful `configure`, secrets hidden.
    pub fn settings(&self) -> Option<SanitizedSettings> {
        self.settings.read().ok().and_then(|s| s.clone())
    }

    pub fn set_settings(&self, settings: SanitizedSettings) {
        if let Ok(mut slot) = self.settings.write() {
            *slot = Some(settings);
        }
    }
}
