use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SplitError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phenotype {
    Tumor,
    Normal,
}

impl Phenotype {
    pub const ALL: [Phenotype; 2] = [Phenotype::Tumor, Phenotype::Normal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phenotype::Tumor => "tumor",
            Phenotype::Normal => "normal",
        }
    }

    pub fn cast(raw: Option<&str>) -> Option<Phenotype> {
        raw.and_then(|value| value.parse().ok())
    }
}

impl fmt::Display for Phenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Phenotype {
    type Err = SplitError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "tumor" => Ok(Phenotype::Tumor),
            "normal" => Ok(Phenotype::Normal),
            _ => Err(SplitError::InvalidPhenotype(value.to_string())),
        }
    }
}
