use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Real(f64),
    Text(String),
    Empty,
    Other(serde_json::Value),
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

pub type Record = BTreeMap<String, CellValue>;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct History {
    #[serde(default)]
    pub rows: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportEntry {
    Header { label: String },
    Datum { label: String, value: String },
}

impl ReportEntry {
    pub fn label(&self) -> &str {
        match self {
            ReportEntry::Header { label } | ReportEntry::Datum { label, .. } => label,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            ReportEntry::Header { .. } => "",
            ReportEntry::Datum { value, .. } => value,
        }
    }

    pub fn is_header(&self) -> bool {
        matches!(self, ReportEntry::Header { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
}

impl Report {
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| !entry.is_header() && entry.label() == label)
            .map(ReportEntry::value)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(ReportEntry::label).collect()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|entry| (entry.label(), entry.value()))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportLine {
    pub label: String,
    pub value: String,
    pub header: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportResponse {
    pub rows: usize,
    pub entries: Vec<ReportLine>,
}

impl ReportResponse {
    pub fn new(rows: usize, report: &Report) -> Self {
        Self {
            rows,
            entries: report
                .entries
                .iter()
                .map(|entry| ReportLine {
                    label: entry.label().to_string(),
                    value: entry.value().to_string(),
                    header: entry.is_header(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AppendResponse {
    pub date: String,
    pub total_rows: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: String,
    pub rows_today: usize,
    pub total_rows: usize,
}
