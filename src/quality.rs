use crate::app::{ProgressEvent, ProgressSink};
use crate::config::SplitConfig;
use crate::domain::Phenotype;
use crate::linker::EnrichedRecord;
use crate::manifest::ManifestRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRecord {
    pub manifest: ManifestRecord,
    pub sample_id: String,
    pub subject_id: String,
    pub phenotype: Phenotype,
}

pub fn apply_quality_gate(
    records: Vec<EnrichedRecord>,
    config: &SplitConfig,
    sink: &dyn ProgressSink,
) -> Vec<ValidatedRecord> {
    warn_missing(&records, "SampleID", sink, |record| {
        record.sample_id.is_none()
    });
    warn_missing(&records, "SubjectID", sink, |record| {
        record.subject_id.is_none()
    });
    warn_missing(&records, "Phenotype", sink, |record| {
        record.phenotype.is_none()
    });

    records
        .into_iter()
        .filter(|record| {
            !record
                .sample_id
                .as_deref()
                .is_some_and(|id| config.control_pattern.is_match(id))
        })
        .filter(|record| {
            !record
                .library_id
                .as_deref()
                .is_some_and(|id| config.topup_pattern.is_match(id))
        })
        .filter_map(|record| {
            Some(ValidatedRecord {
                sample_id: record.sample_id?,
                subject_id: record.subject_id?,
                phenotype: record.phenotype?,
                manifest: record.manifest,
            })
        })
        .collect()
}

fn warn_missing(
    records: &[EnrichedRecord],
    column: &str,
    sink: &dyn ProgressSink,
    is_missing: impl Fn(&EnrichedRecord) -> bool,
) {
    let affected: Vec<&str> = records
        .iter()
        .filter(|record| is_missing(record))
        .map(|record| record.manifest.sample_name.as_str())
        .collect();
    if affected.is_empty() {
        return;
    }
    sink.event(ProgressEvent::warning(format!(
        "could not retrieve the {column} information for samples {}",
        affected.join(", ")
    )));
}
