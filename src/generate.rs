use crate::manifest::{self, SegmentEntry, SegmentManifest, SegmentSource};
use crate::util;

use anyhow::Result;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum GenerateOutcome {
    Written(GenerateSummary),
    /// Segments directory does not exist. Nothing was written.
    DirMissing,
    /// Directory exists but holds no `*_segment_*` files. Nothing was written.
    NoSegments,
}

#[derive(Debug, Clone)]
pub struct GenerateSummary {
    pub output_file: PathBuf,
    pub manifest: SegmentManifest,
}

pub fn generate_manifest(
    audio_id: &str,
    segments_dir: &Path,
    output_file: &Path,
    base_url: Option<&str>,
) -> Result<GenerateOutcome> {
    if !segments_dir.is_dir() {
        return Ok(GenerateOutcome::DirMissing);
    }

    let files = util::list_segment_files(segments_dir)?;
    if files.is_empty() {
        return Ok(GenerateOutcome::NoSegments);
    }

    let manifest = build_manifest(audio_id, segments_dir, base_url, &files);
    manifest.save(output_file)?;

    Ok(GenerateOutcome::Written(GenerateSummary {
        output_file: output_file.to_path_buf(),
        manifest,
    }))
}

/// Paths are anchored at the parent of the segments directory so the manifest
/// stays valid when the directory sits inside a larger asset root.
fn build_manifest(
    audio_id: &str,
    segments_dir: &Path,
    base_url: Option<&str>,
    files: &[String],
) -> SegmentManifest {
    let dir_name = util::folder_basename(segments_dir);

    let segments = files
        .iter()
        .enumerate()
        .map(|(idx, file_name)| SegmentEntry {
            name: manifest::segment_name(audio_id, idx),
            base_path: format!("{}/{}", dir_name, file_name),
            is_free: true,
            source: match base_url {
                Some(base) => SegmentSource::Remote {
                    remote_url: format!("{}/{}", base, file_name),
                },
                None => SegmentSource::Local {
                    local_resource_id: None,
                },
            },
        })
        .collect::<Vec<_>>();

    SegmentManifest {
        audio_id: audio_id.to_string(),
        segment_count: segments.len(),
        segments,
    }
}
