use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::SplitError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    #[serde(rename = "RGID")]
    pub read_group_id: String,
    #[serde(rename = "RGSM")]
    pub sample_name: String,
    #[serde(rename = "RGLB")]
    pub library_id: String,
    #[serde(rename = "Lane")]
    pub lane: u32,
    #[serde(rename = "Read1File")]
    pub read1_path: String,
    #[serde(rename = "Read2File")]
    pub read2_path: String,
}

pub fn load_manifest(path: &Utf8Path) -> Result<Vec<ManifestRecord>, SplitError> {
    let read_error = |message: String| SplitError::ManifestRead {
        path: path.to_owned(),
        message,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path.as_std_path())
        .map_err(|err| read_error(err.to_string()))?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: ManifestRecord = row.map_err(|err| read_error(err.to_string()))?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use assert_matches::assert_matches;
    use camino::Utf8PathBuf;

    use super::*;

    fn write_manifest(dir: &tempfile::TempDir, content: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::from_path_buf(dir.path().join("fastq_list.csv")).unwrap();
        fs::write(path.as_std_path(), content).unwrap();
        path
    }

    #[test]
    fn load_manifest_parses_rows_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(
            &dir,
            "RGID,RGSM,RGLB,Lane,Read1File,Read2File\n\
             AAA.CCC.1,SAMPLE001,UnknownLibrary,1,r1_L1.fastq.gz,r2_L1.fastq.gz\n\
             AAA.CCC.2,SAMPLE001,UnknownLibrary,2,r1_L2.fastq.gz,r2_L2.fastq.gz\n",
        );

        let records = load_manifest(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].read_group_id, "AAA.CCC.1");
        assert_eq!(records[0].sample_name, "SAMPLE001");
        assert_eq!(records[1].lane, 2);
    }

    #[test]
    fn load_manifest_missing_file_is_a_read_error() {
        let err = load_manifest(Utf8Path::new("/nonexistent/fastq_list.csv")).unwrap_err();
        assert_matches!(err, SplitError::ManifestRead { .. });
    }

    #[test]
    fn load_manifest_rejects_a_non_numeric_lane() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(
            &dir,
            "RGID,RGSM,RGLB,Lane,Read1File,Read2File\n\
             AAA.CCC.1,SAMPLE001,UnknownLibrary,one,r1.fastq.gz,r2.fastq.gz\n",
        );

        let err = load_manifest(&path).unwrap_err();
        assert_matches!(err, SplitError::ManifestRead { .. });
    }
}
