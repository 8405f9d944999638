use memorama_core::Difficulty;
use serde::{Deserialize, Serialize};

use crate::utils::StorageKey;

/// Player preferences that survive reloads.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    pub difficulty: Difficulty,
}

impl StorageKey for Settings {
    const KEY: &'static str = "memorama:settings";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_to_easy() {
        assert_eq!(Settings::default().difficulty, Difficulty::Easy);
    }

    #[test]
    fn settings_key_is_namespaced() {
        assert_eq!(<Settings as StorageKey>::KEY, "memorama:settings");
    }

    #[test]
    fn settings_read_stored_shape() {
        let settings: Settings = serde_json::from_str(r#"{"difficulty":"medium"}"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Medium);
    }
}
