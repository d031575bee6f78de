use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentManifest {
    #[serde(rename = "audioId")]
    pub audio_id: String,
    pub segments: Vec<SegmentEntry>,
    #[serde(rename = "segmentCount")]
    pub segment_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentEntry {
    pub name: String,
    #[serde(rename = "basePath")]
    pub base_path: String,
    #[serde(rename = "isFree", default = "default_is_free")]
    pub is_free: bool,
    #[serde(flatten)]
    pub source: SegmentSource,
}

/// Where the player finds the segment bytes. Exactly one of the two keys is
/// written: `remoteUrl` for hosted segments, `localResourceId` (null until the
/// app project assigns one) for bundled segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SegmentSource {
    Remote {
        #[serde(rename = "remoteUrl")]
        remote_url: String,
    },
    Local {
        #[serde(rename = "localResourceId")]
        local_resource_id: Option<i32>,
    },
}

fn default_is_free() -> bool {
    true
}

pub fn segment_name(audio_id: &str, index: usize) -> String {
    format!("{}_segment_{}", audio_id, index)
}

impl SegmentManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read manifest {:?}", path))?;
        let manifest: SegmentManifest = serde_json::from_slice(&bytes)
            .with_context(|| format!("failed to parse manifest {:?}", path))?;
        if manifest.segment_count != manifest.segments.len() {
            bail!(
                "manifest {:?} is inconsistent: segmentCount={} but {} segments listed",
                path,
                manifest.segment_count,
                manifest.segments.len()
            );
        }
        Ok(manifest)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write manifest {:?}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_entry_writes_null_resource_id_and_no_remote_url() {
        let entry = SegmentEntry {
            name: segment_name("river", 0),
            base_path: "river_segments/river_segment_000".to_string(),
            is_free: true,
            source: SegmentSource::Local {
                local_resource_id: None,
            },
        };
        let json = serde_json::to_string(&entry).expect("serialize entry");
        assert!(json.contains("\"localResourceId\":null"), "{json}");
        assert!(!json.contains("remoteUrl"), "{json}");
    }

    #[test]
    fn remote_entry_writes_url_and_no_resource_id() {
        let entry = SegmentEntry {
            name: segment_name("river", 3),
            base_path: "river_segments/river_segment_003".to_string(),
            is_free: true,
            source: SegmentSource::Remote {
                remote_url: "https://example.com/river_segment_003".to_string(),
            },
        };
        let json = serde_json::to_string(&entry).expect("serialize entry");
        assert!(
            json.contains("\"remoteUrl\":\"https://example.com/river_segment_003\""),
            "{json}"
        );
        assert!(!json.contains("localResourceId"), "{json}");
    }

    #[test]
    fn descriptor_keys_keep_wire_order() {
        let entry = SegmentEntry {
            name: "river_segment_0".to_string(),
            base_path: "river_segments/river_segment_000".to_string(),
            is_free: true,
            source: SegmentSource::Local {
                local_resource_id: None,
            },
        };
        let json = serde_json::to_string(&entry).expect("serialize entry");
        assert_eq!(
            json,
            "{\"name\":\"river_segment_0\",\"basePath\":\"river_segments/river_segment_000\",\"isFree\":true,\"localResourceId\":null}"
        );
    }

    #[test]
    fn lenient_load_defaults_is_free_and_tolerates_missing_source() {
        let json = r#"{"name":"rain_segment_0","basePath":"rain_segments/rain_segment_000"}"#;
        let entry: SegmentEntry = serde_json::from_str(json).expect("parse entry");
        assert!(entry.is_free);
        match entry.source {
            SegmentSource::Local { local_resource_id } => assert_eq!(local_resource_id, None),
            SegmentSource::Remote { .. } => panic!("entry without remoteUrl parsed as remote"),
        }
    }

    #[test]
    fn remote_entry_round_trips() {
        let json = r#"{"name":"rain_segment_1","basePath":"rain_segments/rain_segment_001","isFree":false,"remoteUrl":"https://host/rain_segment_001"}"#;
        let entry: SegmentEntry = serde_json::from_str(json).expect("parse entry");
        assert!(!entry.is_free);
        match entry.source {
            SegmentSource::Remote { remote_url } => {
                assert_eq!(remote_url, "https://host/rain_segment_001")
            }
            SegmentSource::Local { .. } => panic!("entry with remoteUrl parsed as local"),
        }
    }

    #[test]
    fn load_rejects_count_mismatch() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        std::fs::write(&path, r#"{"audioId":"river","segments":[],"segmentCount":2}"#)
            .expect("write manifest");
        let err = SegmentManifest::load(&path).expect_err("mismatch should fail");
        assert!(err.to_string().contains("segmentCount=2"), "{err}");
    }
}
