use std::collections::BTreeSet;

use regex::Regex;

pub const CONTROL_SAMPLE_PATTERN: &str = r"^(?:NTC|PTC)_\w+$";

pub const LIBRARY_TOPUP_PATTERN: &str = r"^L\d+_(?:topup)\d*$";

pub const DEFAULT_OMITTED_SHEETS: [&str; 1] = ["2018"];

#[derive(Debug, Clone)]
pub struct SplitConfig {
    pub omitted_sheets: BTreeSet<String>,
    pub control_pattern: Regex,
    pub topup_pattern: Regex,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            omitted_sheets: DEFAULT_OMITTED_SHEETS
                .iter()
                .map(|name| name.to_string())
                .collect(),
            control_pattern: Regex::new(CONTROL_SAMPLE_PATTERN).unwrap(),
            topup_pattern: Regex::new(LIBRARY_TOPUP_PATTERN).unwrap(),
        }
    }
}

impl SplitConfig {
    pub fn with_omitted_sheets(mut self, extra: impl IntoIterator<Item = String>) -> Self {
        self.omitted_sheets.extend(extra);
        self
    }
}
