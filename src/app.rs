use camino::Utf8Path;
use serde::Serialize;

use crate::config::SplitConfig;
use crate::emit::write_subject_csvs;
use crate::error::SplitError;
use crate::linker::merge;
use crate::manifest::load_manifest;
use crate::partition::{assign_output_paths, partition};
use crate::quality::apply_quality_gate;
use crate::tracking::TrackingWorkbook;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub level: EventLevel,
    pub message: String,
}

impl ProgressEvent {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: EventLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: EventLevel::Warning,
            message: message.into(),
        }
    }
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub manifest_rows: usize,
    pub sheets_read: Vec<String>,
    pub tracking_rows: usize,
    pub merged_rows: usize,
    pub validated_rows: usize,
    pub subjects: Vec<SubjectSummary>,
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectSummary {
    pub subject_id: String,
    pub rows: usize,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct App {
    config: SplitConfig,
}

impl App {
    pub fn new(config: SplitConfig) -> Self {
        Self { config }
    }

    pub fn run(
        &self,
        manifest_path: &Utf8Path,
        tracking_path: &Utf8Path,
        output_dir: &Utf8Path,
        sink: &dyn ProgressSink,
    ) -> Result<RunSummary, SplitError> {
        sink.event(ProgressEvent::info(format!(
            "phase=Load; reading fastq manifest {manifest_path}"
        )));
        let manifest = load_manifest(manifest_path)?;
        let manifest_rows = manifest.len();

        sink.event(ProgressEvent::info(format!(
            "phase=Load; opening tracking workbook {tracking_path}"
        )));
        let mut workbook = TrackingWorkbook::open(tracking_path)?;
        let sheets = workbook.select_valid_sheets(&self.config.omitted_sheets)?;
        let tracking = workbook.concatenate_sheets(&sheets, sink)?;
        let tracking_rows = tracking.len();

        sink.event(ProgressEvent::info(
            "phase=Link; merging manifest and tracking table",
        ));
        let merged = merge(manifest, &tracking);
        let merged_rows = merged.len();

        sink.event(ProgressEvent::info("phase=Gate; validating merged table"));
        let validated = apply_quality_gate(merged, &self.config, sink);
        let validated_rows = validated.len();

        sink.event(ProgressEvent::info("phase=Partition; grouping by subject"));
        let groups = partition(validated);
        let entities = assign_output_paths(groups, output_dir)?;

        let mut subjects = Vec::with_capacity(entities.len());
        for entity in &entities {
            sink.event(ProgressEvent::info(format!(
                "phase=Emit; writing csvs for subject {}",
                entity.subject_id
            )));
            let files = write_subject_csvs(entity)?;
            subjects.push(SubjectSummary {
                subject_id: entity.subject_id.clone(),
                rows: entity.records.len(),
                files: files.into_iter().map(|path| path.to_string()).collect(),
            });
        }

        Ok(RunSummary {
            manifest_rows,
            sheets_read: sheets,
            tracking_rows,
            merged_rows,
            validated_rows,
            subjects,
            generated_at: iso_timestamp(),
        })
    }
}

fn iso_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
