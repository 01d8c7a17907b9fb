//! Headerless CSV access to the coordinate and catalog files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use flate2::read::GzDecoder;

use crate::error::{FinderError, Result};

pub type RecordReader = csv::Reader<Box<dyn Read>>;

/// Open a tabular source, decompressing `.gz` files on the fly.
pub fn open_records(path: &Path) -> Result<RecordReader> {
    let file = File::open(path).map_err(|source| FinderError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let reader: Box<dyn Read> = if path.extension().map_or(false, |e| e == "gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    Ok(ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader))
}

/// 1-based line number of a record, for diagnostics.
pub fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

/// Fetch the first `N` fields of a record, failing if it is too short.
pub fn fields<'r, const N: usize>(
    record: &'r StringRecord,
    path: &Path,
) -> Result<[&'r str; N]> {
    if record.len() < N {
        return Err(FinderError::MalformedRecord {
            path: path.to_path_buf(),
            line: record_line(record),
            reason: format!("expected {} fields, found {}", N, record.len()),
        });
    }
    Ok(std::array::from_fn(|i| &record[i]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const ROWS: &str = "ST10 1UF,399777,342161,52.976801,-2.004769\nCB5 8PF,546341,259322,52.2094,0.1464\n";

    fn collect(path: &Path) -> Vec<Vec<String>> {
        let mut reader = open_records(path).unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect()
    }

    #[test]
    fn test_plain_and_gzip_read_identically() {
        let dir = tempfile::tempdir().unwrap();

        let plain = dir.path().join("postcodes.csv");
        std::fs::write(&plain, ROWS).unwrap();

        let gz = dir.path().join("postcodes.csv.gz");
        let mut encoder = GzEncoder::new(File::create(&gz).unwrap(), Compression::default());
        encoder.write_all(ROWS.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let rows = collect(&plain);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "ST10 1UF");
        assert_eq!(rows, collect(&gz));
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let err = open_records(Path::new("/path/does/not/exist")).err().unwrap();
        assert!(matches!(err, FinderError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_short_record_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.csv");
        std::fs::write(&path, "only,three,fields\n").unwrap();

        let mut reader = open_records(&path).unwrap();
        let record = reader.records().next().unwrap().unwrap();
        assert!(fields::<3>(&record, &path).is_ok());
        match fields::<5>(&record, &path) {
            Err(FinderError::MalformedRecord { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected malformed record, got {:?}", other),
        }
    }
}
