use crate::models::{Report, ReportEntry};
use crate::numeric::{fmt, fmt_int};

#[derive(Debug, Default)]
pub struct ReportBuilder {
    entries: Vec<ReportEntry>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&mut self, label: &str) -> &mut Self {
        self.entries.push(ReportEntry::Header {
            label: label.to_string(),
        });
        self
    }

    pub fn real(&mut self, label: impl Into<String>, value: f64) -> &mut Self {
        self.push(label.into(), fmt(value, 2))
    }

    pub fn int(&mut self, label: impl Into<String>, value: f64) -> &mut Self {
        self.push(label.into(), fmt_int(value))
    }

    fn push(&mut self, label: String, value: String) -> &mut Self {
        self.entries.push(ReportEntry::Datum { label, value });
        self
    }

    pub fn build(self) -> Report {
        Report {
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let mut builder = ReportBuilder::new();
        builder.section("Översikt").int("Antal rader", 3.0).real("Summa", 1500.0);
        let report = builder.build();
        assert_eq!(report.labels(), vec!["Översikt", "Antal rader", "Summa"]);
        assert_eq!(report.get("Antal rader"), Some("3"));
        assert_eq!(report.get("Summa"), Some("1 500,00"));
        assert_eq!(report.get("Översikt"), None);
        assert!(report.entries[0].is_header());
        assert_eq!(report.entries[0].value(), "");
    }
}
