use anyhow::{Context, Result};
use std::path::Path;

pub const SEGMENT_MARKER: &str = "_segment_";

pub fn folder_basename(p: &Path) -> String {
    p.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "root".to_string())
}

/// Filenames in `dir` containing the segment marker, ascending lexicographic.
/// The sort order is what assigns segment indices, so segment files must be
/// named with zero-padded counters.
pub fn list_segment_files(dir: &Path) -> Result<Vec<String>> {
    let mut v = vec![];
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to list segments directory {:?}", dir))?
    {
        let e = entry?;
        if !e.path().is_file() {
            continue;
        }
        let name = e.file_name().to_string_lossy().to_string();
        if name.contains(SEGMENT_MARKER) {
            v.push(name);
        }
    }
    v.sort();
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn listing_sorts_and_filters_on_marker() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join("river_segment_001"), b"b").expect("write");
        fs::write(tmp.path().join("river_segment_000"), b"a").expect("write");
        fs::write(tmp.path().join("cover.png"), b"x").expect("write");

        let names = list_segment_files(tmp.path()).expect("list");
        assert_eq!(names, vec!["river_segment_000", "river_segment_001"]);
    }

    #[test]
    fn listing_skips_directories_even_when_named_like_segments() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::create_dir(tmp.path().join("river_segment_000")).expect("mkdir");
        fs::write(tmp.path().join("river_segment_001"), b"a").expect("write");

        let names = list_segment_files(tmp.path()).expect("list");
        assert_eq!(names, vec!["river_segment_001"]);
    }

    #[test]
    fn basename_falls_back_for_bare_root() {
        assert_eq!(folder_basename(Path::new("audio/nature")), "nature");
        assert_eq!(folder_basename(Path::new("/")), "root");
    }
}
