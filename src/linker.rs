use std::collections::HashMap;

use crate::domain::Phenotype;
use crate::manifest::ManifestRecord;
use crate::tracking::TrackingRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedRecord {
    pub manifest: ManifestRecord,
    pub library_id: Option<String>,
    pub sample_id: Option<String>,
    pub subject_id: Option<String>,
    pub phenotype: Option<Phenotype>,
}

pub fn merge(manifest: Vec<ManifestRecord>, tracking: &[TrackingRecord]) -> Vec<EnrichedRecord> {
    let mut by_sample_sheet_id: HashMap<&str, Vec<&TrackingRecord>> = HashMap::new();
    for record in tracking {
        if let Some(id) = record.sample_sheet_id.as_deref() {
            by_sample_sheet_id.entry(id).or_default().push(record);
        }
    }

    let mut enriched = Vec::with_capacity(manifest.len());
    for row in manifest {
        match by_sample_sheet_id.get(row.sample_name.as_str()) {
            Some(matches) => {
                for tracked in matches {
                    enriched.push(EnrichedRecord {
                        manifest: row.clone(),
                        library_id: tracked.library_id.clone(),
                        sample_id: tracked.sample_id.clone(),
                        subject_id: tracked.subject_id.clone(),
                        phenotype: Phenotype::cast(tracked.phenotype.as_deref()),
                    });
                }
            }
            None => enriched.push(EnrichedRecord {
                manifest: row,
                library_id: None,
                sample_id: None,
                subject_id: None,
                phenotype: None,
            }),
        }
    }
    enriched
}
