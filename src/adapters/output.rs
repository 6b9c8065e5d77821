use crate::core::ReportResult;
use crate::domain::model::OutputFormat;
use crate::utils::error::{PayrollError, Result};
use serde::Serialize;

const JSON_INDENT: &[u8] = b"    ";

pub fn render(result: &ReportResult, format: OutputFormat, pretty: bool) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(result, pretty),
        OutputFormat::Csv => render_csv(result),
    }
}

/// Serializes the result as a single-key JSON object. Pretty output is
/// indented by four spaces; non-ASCII text is written as-is.
pub fn render_json(result: &ReportResult, pretty: bool) -> Result<String> {
    if !pretty {
        return Ok(serde_json::to_string(result)?);
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    result.serialize(&mut serializer)?;
    String::from_utf8(buf)
        .map_err(|e| PayrollError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Writes the result as a table: a header row, then one row per entry or
/// department. Top reports yield at most one row.
pub fn render_csv(result: &ReportResult) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    match result {
        ReportResult::Payouts(entries) => {
            writer.write_record(["id", "name", "department", "hours_worked", "rate", "payout"])?;
            for entry in entries {
                writer.serialize(entry)?;
            }
        }
        ReportResult::AverageHourlyRateByDepartment(entries) => {
            writer.write_record(["department", "average_rate", "employees"])?;
            for entry in entries {
                writer.serialize(entry)?;
            }
        }
        ReportResult::CountByDepartment(counts) => {
            writer.write_record(["department", "count"])?;
            for row in counts.iter() {
                writer.serialize(row)?;
            }
        }
        ReportResult::TopPayout(top) => {
            writer.write_record(["name", "department", "payout"])?;
            if let Some(top) = top {
                writer.serialize(top)?;
            }
        }
        ReportResult::TopRate(top) => {
            writer.write_record(["name", "department", "rate"])?;
            if let Some(top) = top {
                writer.serialize(top)?;
            }
        }
        ReportResult::TotalPayoutByDepartment(totals) => {
            writer.write_record(["department", "total_payout"])?;
            for row in totals.iter() {
                writer.serialize(row)?;
            }
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PayrollError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| PayrollError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DepartmentMap, PayoutEntry, TopRate};

    fn counts() -> ReportResult {
        let mut counts = DepartmentMap::new();
        *counts.entry_or("Marketing", 0) += 1;
        *counts.entry_or("Design", 0) += 2;
        ReportResult::CountByDepartment(counts)
    }

    #[test]
    fn test_pretty_json_uses_four_space_indent_and_insertion_order() {
        let json = render_json(&counts(), true).unwrap();
        let expected = "{\n    \"count_by_department\": {\n        \"Marketing\": 1,\n        \"Design\": 2\n    }\n}";
        assert_eq!(json, expected);
    }

    #[test]
    fn test_compact_json() {
        let json = render_json(&ReportResult::TopRate(None), false).unwrap();
        assert_eq!(json, r#"{"top_rate":null}"#);
    }

    #[test]
    fn test_json_keeps_non_ascii() {
        let result = ReportResult::TopRate(Some(TopRate {
            name: Some("Ольга".to_string()),
            department: Some("Отдел".to_string()),
            rate: 99.0,
        }));
        let json = render(&result, OutputFormat::Json, false).unwrap();
        assert!(json.contains("Ольга"));
        assert!(json.contains("99.0"));
    }

    #[test]
    fn test_csv_counts() {
        let csv = render(&counts(), OutputFormat::Csv, true).unwrap();
        assert_eq!(csv, "department,count\nMarketing,1\nDesign,2\n");
    }

    #[test]
    fn test_csv_payouts_leave_missing_fields_empty() {
        let result = ReportResult::Payouts(vec![PayoutEntry {
            id: None,
            name: Some("Alice".to_string()),
            department: Some("Marketing".to_string()),
            hours_worked: 160.0,
            rate: 50.0,
            payout: 8000.0,
        }]);
        let csv = render_csv(&result).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("id,name,department,hours_worked,rate,payout")
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with(",Alice,Marketing,160"));
        assert!(row.contains("8000"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_csv_empty_top_report_is_header_only() {
        let csv = render_csv(&ReportResult::TopPayout(None)).unwrap();
        assert_eq!(csv, "name,department,payout\n");
    }
}
