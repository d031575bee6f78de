use serde::Deserialize;

/// Wire shape of the published sound library. Everything beyond the id and
/// the remote URL is opaque to the verifier and ignored on parse.
#[derive(Debug, Clone, Deserialize)]
pub struct SoundLibrary {
    pub sounds: Vec<SoundEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SoundEntry {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "remoteUrl")]
    pub remote_url: Option<String>,
}

impl SoundLibrary {
    pub fn matching(&self, id_fragment: &str) -> Vec<&SoundEntry> {
        self.sounds
            .iter()
            .filter(|s| s.id.contains(id_fragment))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_matches_on_id_substring_and_ignores_extra_keys() {
        let json = r#"{
            "sounds": [
                {"id": "rain-1", "remoteUrl": "https://host/rain-1.mp3", "category": "nature"},
                {"id": "ear-cleaning-1", "remoteUrl": "https://host/ear-cleaning-1.mp3"},
                {"id": "ear-cleaning-2", "remoteUrl": "https://host/ear-cleaning-2.mp3"},
                {"remoteUrl": "https://host/orphan.mp3"}
            ]
        }"#;
        let library: SoundLibrary = serde_json::from_str(json).expect("parse library");
        assert_eq!(library.sounds.len(), 4);

        let hits = library.matching("ear-cleaning");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "ear-cleaning-1");
        assert_eq!(hits[1].id, "ear-cleaning-2");
    }

    #[test]
    fn missing_sounds_key_is_a_parse_error() {
        let err = serde_json::from_str::<SoundLibrary>(r#"{"version": 3}"#)
            .expect_err("library without sounds should not parse");
        assert!(err.to_string().contains("sounds"), "{err}");
    }
}
