use std::collections::HashMap;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::SplitError;
use crate::quality::ValidatedRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectGroup {
    pub subject_id: String,
    pub records: Vec<ValidatedRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectEntity {
    pub subject_id: String,
    pub records: Vec<ValidatedRecord>,
    pub output_path: Utf8PathBuf,
}

pub fn partition(records: Vec<ValidatedRecord>) -> Vec<SubjectGroup> {
    let mut groups: Vec<SubjectGroup> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();
    for record in records {
        match index_of.get(&record.subject_id) {
            Some(&index) => groups[index].records.push(record),
            None => {
                index_of.insert(record.subject_id.clone(), groups.len());
                groups.push(SubjectGroup {
                    subject_id: record.subject_id.clone(),
                    records: vec![record],
                });
            }
        }
    }
    groups
}

pub fn assign_output_paths(
    groups: Vec<SubjectGroup>,
    base_dir: &Utf8Path,
) -> Result<Vec<SubjectEntity>, SplitError> {
    groups
        .into_iter()
        .map(|group| {
            let output_path = base_dir.join(&group.subject_id);
            fs::create_dir_all(&output_path).map_err(|err| {
                SplitError::Filesystem(format!("create {output_path}: {err}"))
            })?;
            Ok(SubjectEntity {
                subject_id: group.subject_id,
                records: group.records,
                output_path,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Phenotype;
    use crate::manifest::ManifestRecord;

    fn validated(subject_id: &str, sample_id: &str) -> ValidatedRecord {
        ValidatedRecord {
            manifest: ManifestRecord {
                read_group_id: format!("{sample_id}.1"),
                sample_name: sample_id.to_string(),
                library_id: "LIB01".to_string(),
                lane: 1,
                read1_path: "r1.fastq.gz".to_string(),
                read2_path: "r2.fastq.gz".to_string(),
            },
            sample_id: sample_id.to_string(),
            subject_id: subject_id.to_string(),
            phenotype: Phenotype::Tumor,
        }
    }

    #[test]
    fn groups_follow_first_occurrence_order() {
        let records = vec![
            validated("SBJ02", "S1"),
            validated("SBJ01", "S2"),
            validated("SBJ02", "S3"),
        ];

        let groups = partition(records);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].subject_id, "SBJ02");
        assert_eq!(groups[0].records.len(), 2);
        assert_eq!(groups[1].subject_id, "SBJ01");
    }

    #[test]
    fn every_record_lands_in_exactly_one_group() {
        let records = vec![
            validated("SBJ01", "S1"),
            validated("SBJ02", "S2"),
            validated("SBJ01", "S3"),
            validated("SBJ03", "S4"),
        ];
        let total = records.len();

        let groups = partition(records);
        let grouped: usize = groups.iter().map(|group| group.records.len()).sum();

        assert_eq!(grouped, total);
    }

    #[test]
    fn output_paths_are_per_subject_directories() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8Path::from_path(dir.path()).unwrap();
        let groups = partition(vec![validated("SBJ01", "S1"), validated("SBJ02", "S2")]);

        let entities = assign_output_paths(groups, base).unwrap();

        assert_eq!(entities[0].output_path, base.join("SBJ01"));
        assert!(entities[0].output_path.is_dir());
        assert!(entities[1].output_path.is_dir());
    }

    #[test]
    fn existing_directories_are_reused() {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8Path::from_path(dir.path()).unwrap();
        std::fs::create_dir_all(base.join("SBJ01")).unwrap();

        let entities =
            assign_output_paths(partition(vec![validated("SBJ01", "S1")]), base).unwrap();

        assert_eq!(entities.len(), 1);
        assert!(entities[0].output_path.is_dir());
    }
}
