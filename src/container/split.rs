//! Splits a container back into per-column artifacts on disk: one file per
//! column, named `<prefix><zero-padded index>`, holding that column's
//! compressed bytes verbatim (still block-compressed; the value decoder runs
//! only after decompression).
//!
//! The manifest is validated in full before the first file is created, so a
//! corrupt container produces no partial artifact set.

use std::fs;
use std::path::Path;

use crate::container::artifact::Container;
use crate::error::BintableError;

/// Writes each column's compressed payload to `dir`, returning the artifact
/// file names in ascending column-index order.
pub fn split_to_dir(
    container_bytes: &[u8],
    prefix: &str,
    dir: &Path,
) -> Result<Vec<String>, BintableError> {
    let info = Container::peek_manifest(container_bytes)?;
    let names = info.artifact_names(prefix);

    for (index, name) in names.iter().enumerate() {
        let range = info.payload_range(index)?;
        fs::write(dir.join(name), &container_bytes[range])?;
        log::info!("wrote split artifact {}", name);
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Codec;

    fn container_bytes() -> Vec<u8> {
        Container {
            codec: Codec::Raw,
            columns: vec![b"alpha".to_vec(), b"beta".to_vec()],
        }
        .to_bytes()
        .unwrap()
    }

    #[test]
    fn test_split_writes_verbatim_payloads_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let names = split_to_dir(&container_bytes(), "col", dir.path()).unwrap();

        assert_eq!(names, vec!["col0", "col1"]);
        assert_eq!(fs::read(dir.path().join("col0")).unwrap(), b"alpha");
        assert_eq!(fs::read(dir.path().join("col1")).unwrap(), b"beta");
    }

    #[test]
    fn test_split_of_corrupt_container_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut bytes = container_bytes();
        bytes.pop();

        let result = split_to_dir(&bytes, "col", dir.path());
        assert!(matches!(result, Err(BintableError::ManifestCorrupt(_))));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_split_pads_names_to_widest_index() {
        let container = Container {
            codec: Codec::Raw,
            columns: (0..11).map(|i| vec![i as u8]).collect(),
        };
        let dir = tempfile::tempdir().unwrap();
        let names = split_to_dir(&container.to_bytes().unwrap(), "c", dir.path()).unwrap();

        assert_eq!(names.first().unwrap(), "c00");
        assert_eq!(names.last().unwrap(), "c10");
        assert_eq!(fs::read(dir.path().join("c07")).unwrap(), vec![7u8]);
    }
}
