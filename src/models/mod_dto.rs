use camino::Utf8PathBuf;
use serde::{Deserialize, Deserializer, Serialize};

/// Install record metadata supplied by the host.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ModInfo {
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub create_time: Option<i64>,
}

/// Where the host staged the archive and where it will deploy it.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InstallContextPaths {
    pub staging_dir: Utf8PathBuf,
    pub destination_path: Utf8PathBuf,
}

/// `info.json` of a REDmod.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RedmodManifest {
    pub name: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_sounds: Vec<CustomSound>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CustomSound {
    pub name: String,
    #[serde(rename = "type")]
    pub sound_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gain: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
}

pub const SKIP_SOUND_TYPE: &str = "mod_skip";

impl CustomSound {
    pub fn is_skip(&self) -> bool {
        self.sound_type.eq_ignore_ascii_case(SKIP_SOUND_TYPE)
    }

    /// The sound file this entry refers to, relative to `customSounds/`.
    pub fn sound_file(&self) -> Option<&str> {
        self.file
            .as_deref()
            .or(self.path.as_deref())
            .filter(|f| !f.trim().is_empty())
    }
}

/// Per-mod record attached to the install so the host can run the REDmod tool later.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RedmodInfo {
    pub name: String,
    pub version: String,
    pub relative_path: Utf8PathBuf,
    pub vortex_mod_id: String,
}

/// Aggregate of every REDmod in one archive.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct RedmodInfoArray {
    pub data: Vec<RedmodInfo>,
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
