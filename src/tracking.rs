use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::io::BufReader;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use camino::{Utf8Path, Utf8PathBuf};

use crate::app::{ProgressEvent, ProgressSink};
use crate::error::SplitError;

pub const LIBRARY_ID_COLUMN: &str = "LibraryID";
pub const SAMPLE_SHEET_ID_COLUMN: &str = "Sample_ID (SampleSheet)";
pub const SAMPLE_ID_COLUMN: &str = "SampleID";
pub const SUBJECT_ID_COLUMN: &str = "SubjectID";
pub const PHENOTYPE_COLUMN: &str = "Phenotype";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingRecord {
    pub library_id: Option<String>,
    pub sample_sheet_id: Option<String>,
    pub sample_id: Option<String>,
    pub subject_id: Option<String>,
    pub phenotype: Option<String>,
}

pub struct TrackingWorkbook {
    path: Utf8PathBuf,
    workbook: Xlsx<BufReader<File>>,
}

impl TrackingWorkbook {
    pub fn open(path: &Utf8Path) -> Result<Self, SplitError> {
        let workbook = open_workbook(path.as_std_path()).map_err(|err: calamine::XlsxError| {
            SplitError::WorkbookOpen {
                path: path.to_owned(),
                message: err.to_string(),
            }
        })?;
        Ok(Self {
            path: path.to_owned(),
            workbook,
        })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    pub fn select_valid_sheets(
        &self,
        omitted: &BTreeSet<String>,
    ) -> Result<Vec<String>, SplitError> {
        let sheets = filter_year_sheets(&self.sheet_names(), omitted);
        if sheets.is_empty() {
            return Err(SplitError::NoValidSheets(self.path.clone()));
        }
        Ok(sheets)
    }

    pub fn concatenate_sheets(
        &mut self,
        names: &[String],
        sink: &dyn ProgressSink,
    ) -> Result<Vec<TrackingRecord>, SplitError> {
        let mut records = Vec::new();
        for name in names {
            sink.event(ProgressEvent::info(format!(
                "phase=Load; reading sheet {name}"
            )));
            let range =
                self.workbook
                    .worksheet_range(name)
                    .map_err(|err| SplitError::SheetParse {
                        sheet: name.clone(),
                        message: err.to_string(),
                    })?;
            parse_sheet(&range, &mut records);
        }
        Ok(records)
    }
}

impl fmt::Debug for TrackingWorkbook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackingWorkbook")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

pub fn filter_year_sheets(names: &[String], omitted: &BTreeSet<String>) -> Vec<String> {
    names
        .iter()
        .filter(|name| is_year_sheet(name) && !omitted.contains(name.as_str()))
        .cloned()
        .collect()
}

fn is_year_sheet(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|ch| ch.is_ascii_digit())
}

fn parse_sheet(range: &Range<Data>, records: &mut Vec<TrackingRecord>) {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return;
    };
    let columns = ColumnIndex::from_header(header);
    for row in rows {
        let record = columns.record(row);
        if record != TrackingRecord::default() {
            records.push(record);
        }
    }
}

struct ColumnIndex {
    library_id: Option<usize>,
    sample_sheet_id: Option<usize>,
    sample_id: Option<usize>,
    subject_id: Option<usize>,
    phenotype: Option<usize>,
}

impl ColumnIndex {
    fn from_header(header: &[Data]) -> Self {
        let position = |wanted: &str| {
            header
                .iter()
                .position(|cell| matches!(cell, Data::String(name) if name.trim() == wanted))
        };
        Self {
            library_id: position(LIBRARY_ID_COLUMN),
            sample_sheet_id: position(SAMPLE_SHEET_ID_COLUMN),
            sample_id: position(SAMPLE_ID_COLUMN),
            subject_id: position(SUBJECT_ID_COLUMN),
            phenotype: position(PHENOTYPE_COLUMN),
        }
    }

    fn record(&self, row: &[Data]) -> TrackingRecord {
        let field = |index: Option<usize>| index.and_then(|i| cell_to_string(row.get(i)));
        TrackingRecord {
            library_id: field(self.library_id),
            sample_sheet_id: field(self.sample_sheet_id),
            sample_id: field(self.sample_id),
            subject_id: field(self.subject_id),
            phenotype: field(self.phenotype),
        }
    }
}

fn cell_to_string(cell: Option<&Data>) -> Option<String> {
    match cell? {
        Data::Empty | Data::Error(_) => None,
        Data::String(value) => {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Data::Int(value) => Some(value.to_string()),
        Data::Float(value) if value.fract() == 0.0 => Some(format!("{}", *value as i64)),
        Data::Float(value) => Some(value.to_string()),
        Data::Bool(value) => Some(value.to_string()),
        Data::DateTime(value) => Some(value.as_f64().to_string()),
        Data::DateTimeIso(value) | Data::DurationIso(value) => Some(value.clone()),
    }
}
