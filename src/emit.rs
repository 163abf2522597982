use camino::Utf8PathBuf;

use crate::domain::Phenotype;
use crate::error::SplitError;
use crate::partition::SubjectEntity;

pub fn write_subject_csvs(entity: &SubjectEntity) -> Result<Vec<Utf8PathBuf>, SplitError> {
    let mut written = Vec::new();
    for phenotype in Phenotype::ALL {
        let rows: Vec<_> = entity
            .records
            .iter()
            .filter(|record| record.phenotype == phenotype)
            .collect();
        if rows.is_empty() {
            continue;
        }

        let path = entity
            .output_path
            .join(format!("{}_{}.csv", entity.subject_id, phenotype));
        let csv_error = |err: csv::Error| SplitError::CsvWrite {
            path: path.clone(),
            message: err.to_string(),
        };

        let mut writer = csv::Writer::from_path(path.as_std_path()).map_err(csv_error)?;
        for row in rows {
            writer.serialize(&row.manifest).map_err(csv_error)?;
        }
        writer.flush().map_err(|err| SplitError::CsvWrite {
            path: path.clone(),
            message: err.to_string(),
        })?;
        written.push(path);
    }
    Ok(written)
}
