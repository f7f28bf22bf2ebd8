use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const REGISTRY_VERSION: u32 = 2;

// Field values the vanilla launcher expects for profiles it did not create
// itself. The launcher rewrites the timestamps once the profile is used.
pub const PROFILE_TYPE: &str = "custom";
pub const PROFILE_ICON: &str = "Furnace";
pub const PROFILE_TIMESTAMP: &str = "2024-01-01T00:00:00.000Z";
pub const PROFILE_JAVA_ARGS: &str = "-Xmx4G";

/// One entry of the launcher's profile registry, serialized with the JSON
/// field names the launcher uses. Fields are defaulted on read because
/// profiles written by the launcher itself omit `gameDir`, `javaDir` and
/// `javaArgs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LauncherProfile {
    pub name: String,
    #[serde(rename = "type")]
    pub profile_type: String,
    pub created: String,
    pub last_used: String,
    pub icon: String,
    pub last_version_id: String,
    pub java_dir: String,
    pub java_args: String,
    pub game_dir: String,
}

impl LauncherProfile {
    /// A profile pointing the launcher at `game_dir`, with the fixed field
    /// values the installer always writes.
    pub fn custom(name: &str, version: &str, game_dir: &Path) -> Self {
        Self {
            name: name.to_string(),
            profile_type: PROFILE_TYPE.to_string(),
            created: PROFILE_TIMESTAMP.to_string(),
            last_used: PROFILE_TIMESTAMP.to_string(),
            icon: PROFILE_ICON.to_string(),
            last_version_id: version.to_string(),
            java_dir: String::new(),
            java_args: PROFILE_JAVA_ARGS.to_string(),
            game_dir: game_dir.display().to_string(),
        }
    }
}

/// The whole `launcher_profiles.json` document. `settings` is opaque to the
/// installer and round-trips untouched.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileRegistry {
    pub profiles: BTreeMap<String, LauncherProfile>,
    #[serde(default = "empty_settings")]
    pub settings: serde_json::Value,
    #[serde(default = "default_version")]
    pub version: u32,
}

fn empty_settings() -> serde_json::Value {
    serde_json::json!({})
}

fn default_version() -> u32 {
    REGISTRY_VERSION
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self {
            profiles: BTreeMap::new(),
            settings: empty_settings(),
            version: REGISTRY_VERSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_serializes_with_launcher_field_names() {
        let profile = LauncherProfile::custom(
            "Test Pack",
            "1.20.1",
            Path::new("/mc/instances/Test Pack/minecraft"),
        );
        let value = serde_json::to_value(&profile).unwrap();
        let object = value.as_object().unwrap();
        for key in [
            "name",
            "type",
            "created",
            "lastUsed",
            "icon",
            "lastVersionId",
            "javaDir",
            "javaArgs",
            "gameDir",
        ] {
            assert!(object.contains_key(key), "missing field {}", key);
        }
        assert_eq!(value["type"], PROFILE_TYPE);
        assert_eq!(value["icon"], PROFILE_ICON);
        assert_eq!(value["javaArgs"], PROFILE_JAVA_ARGS);
        assert_eq!(value["javaDir"], "");
        assert_eq!(value["lastVersionId"], "1.20.1");
    }

    #[test]
    fn launcher_written_profile_without_game_dir_parses() {
        let raw = r#"{
            "created": "2024-05-01T10:00:00.000Z",
            "icon": "Grass",
            "lastUsed": "2024-05-01T10:00:00.000Z",
            "lastVersionId": "latest-release",
            "name": "",
            "type": "latest-release"
        }"#;
        let profile: LauncherProfile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.last_version_id, "latest-release");
        assert_eq!(profile.game_dir, "");
        assert_eq!(profile.java_args, "");
    }

    #[test]
    fn default_registry_has_expected_shape() {
        let registry = ProfileRegistry::default();
        let value = serde_json::to_value(&registry).unwrap();
        assert_eq!(value["version"], REGISTRY_VERSION);
        assert!(value["profiles"].as_object().unwrap().is_empty());
        assert!(value["settings"].as_object().unwrap().is_empty());
    }

    #[test]
    fn registry_without_settings_or_version_parses() {
        let registry: ProfileRegistry = serde_json::from_str(r#"{"profiles": {}}"#).unwrap();
        assert_eq!(registry.version, REGISTRY_VERSION);
        assert!(registry.settings.is_object());
    }
}
