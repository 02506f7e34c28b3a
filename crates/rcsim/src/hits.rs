//! Tracer hit files.

use std::path::Path;

use rcsim_raytrace::{decode_records, HitResult};
use tracing::info;

use crate::error::{RcsError, Result};

/// Read hit records from `path`, picking the format by extension.
///
/// `.json` holds an array of [`HitResult`] objects; `.bin` holds raw 64-byte
/// records as the tracer writes them back.
pub fn read_hit_records(path: impl AsRef<Path>) -> Result<Vec<HitResult>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    let hits: Vec<HitResult> = match ext.as_str() {
        "json" => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        "bin" => decode_records(&std::fs::read(path)?)?,
        _ => return Err(RcsError::UnsupportedFormat(ext)),
    };
    info!(count = hits.len(), path = %path.display(), "loaded hits");
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcsim_math::{Point3, Vec3};
    use rcsim_raytrace::{encode_records, RecordError};
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rcsim-hits-{}-{name}", std::process::id()))
    }

    fn sample() -> Vec<HitResult> {
        vec![
            HitResult::new(Point3::new(0.5, 0.0, 0.0), 4.5, Vec3::x())
                .with_reflection(Vec3::x(), 1.0)
                .with_ids(2, 0, 0),
            HitResult::miss(1),
        ]
    }

    #[test]
    fn test_reads_bin_and_json() {
        let hits = sample();

        let bin = temp_path("read.bin");
        std::fs::write(&bin, encode_records(&hits)).unwrap();
        assert_eq!(read_hit_records(&bin).unwrap(), hits);

        let json = temp_path("read.JSON");
        std::fs::write(&json, serde_json::to_string(&hits).unwrap()).unwrap();
        assert_eq!(read_hit_records(&json).unwrap(), hits);

        let _ = std::fs::remove_file(bin);
        let _ = std::fs::remove_file(json);
    }

    #[test]
    fn test_truncated_bin_is_record_error() {
        let bin = temp_path("short.bin");
        std::fs::write(&bin, [0u8; 70]).unwrap();
        let err = read_hit_records(&bin).unwrap_err();
        assert!(matches!(
            err,
            RcsError::Record(RecordError::Misaligned {
                len: 70,
                record_size: 64
            })
        ));
        let _ = std::fs::remove_file(bin);
    }

    #[test]
    fn test_bad_json_and_unknown_extension() {
        let json = temp_path("bad.json");
        std::fs::write(&json, "{not json").unwrap();
        assert!(matches!(read_hit_records(&json), Err(RcsError::Json(_))));
        let _ = std::fs::remove_file(json);

        assert!(matches!(
            read_hit_records("hits.csv"),
            Err(RcsError::UnsupportedFormat(ext)) if ext == "csv"
        ));
        assert!(matches!(
            read_hit_records("/nonexistent/hits.bin"),
            Err(RcsError::Io(_))
        ));
    }
}
