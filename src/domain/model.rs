use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One parsed data row: trimmed column name to trimmed value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, String>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.data.get(column).map(String::as_str)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.data.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Department-keyed aggregate that keeps departments in first-seen order.
/// Lookups scan the list; department counts are small.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for DepartmentMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> DepartmentMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, department: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(name, _)| name == department)
            .map(|(_, value)| value)
    }

    /// Returns the slot for `department`, inserting `default` at the end if absent.
    pub fn entry_or(&mut self, department: &str, default: V) -> &mut V {
        let index = match self.entries.iter().position(|(name, _)| name == department) {
            Some(index) => index,
            None => {
                self.entries.push((department.to_string(), default));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Serialize> Serialize for DepartmentMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (department, value) in &self.entries {
            map.serialize_entry(department, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayoutEntry {
    pub id: Option<String>,
    pub name: Option<String>,
    pub department: Option<String>,
    pub hours_worked: f64,
    pub rate: f64,
    pub payout: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentAverage {
    pub department: String,
    pub average_rate: f64,
    pub employees: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPayout {
    pub name: Option<String>,
    pub department: Option<String>,
    pub payout: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopRate {
    pub name: Option<String>,
    pub department: Option<String>,
    pub rate: f64,
}

/// Output of a single report pass. Serializes as a one-key object named
/// after the report, e.g. `{"payouts": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportResult {
    Payouts(Vec<PayoutEntry>),
    AverageHourlyRateByDepartment(Vec<DepartmentAverage>),
    CountByDepartment(DepartmentMap<usize>),
    TopPayout(Option<TopPayout>),
    TopRate(Option<TopRate>),
    TotalPayoutByDepartment(DepartmentMap<f64>),
}

impl ReportResult {
    /// The single top-level key this result serializes under.
    pub fn key(&self) -> &'static str {
        match self {
            ReportResult::Payouts(_) => "payouts",
            ReportResult::AverageHourlyRateByDepartment(_) => "average_hourly_rate_by_department",
            ReportResult::CountByDepartment(_) => "count_by_department",
            ReportResult::TopPayout(_) => "top_payout",
            ReportResult::TopRate(_) => "top_rate",
            ReportResult::TotalPayoutByDepartment(_) => "total_payout_by_department",
        }
    }

    /// Number of entries (or departments) carried by the result.
    pub fn entry_count(&self) -> usize {
        match self {
            ReportResult::Payouts(entries) => entries.len(),
            ReportResult::AverageHourlyRateByDepartment(entries) => entries.len(),
            ReportResult::CountByDepartment(counts) => counts.len(),
            ReportResult::TopPayout(top) => usize::from(top.is_some()),
            ReportResult::TopRate(top) => usize::from(top.is_some()),
            ReportResult::TotalPayoutByDepartment(totals) => totals.len(),
        }
    }
}

/// Presentation format for a rendered report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_map_keeps_first_seen_order() {
        let mut counts = DepartmentMap::new();
        *counts.entry_or("Marketing", 0) += 1;
        *counts.entry_or("Design", 0) += 1;
        *counts.entry_or("Marketing", 0) += 1;

        let keys: Vec<&str> = counts.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Marketing", "Design"]);
        assert_eq!(counts.get("Marketing"), Some(&2));
        assert_eq!(counts.get("Sales"), None);
    }

    #[test]
    fn test_result_serializes_under_single_key() {
        let mut counts = DepartmentMap::new();
        *counts.entry_or("Design", 0) += 2;
        let json = serde_json::to_string(&ReportResult::CountByDepartment(counts)).unwrap();
        assert_eq!(json, r#"{"count_by_department":{"Design":2}}"#);

        let json = serde_json::to_string(&ReportResult::TopRate(None)).unwrap();
        assert_eq!(json, r#"{"top_rate":null}"#);

        let json = serde_json::to_string(&ReportResult::AverageHourlyRateByDepartment(vec![]))
            .unwrap();
        assert_eq!(json, r#"{"average_hourly_rate_by_department":[]}"#);
    }

    #[test]
    fn test_result_key_matches_serialized_key() {
        let results = [
            ReportResult::Payouts(vec![]),
            ReportResult::AverageHourlyRateByDepartment(vec![]),
            ReportResult::CountByDepartment(DepartmentMap::new()),
            ReportResult::TopPayout(None),
            ReportResult::TopRate(None),
            ReportResult::TotalPayoutByDepartment(DepartmentMap::new()),
        ];
        for result in results {
            let value = serde_json::to_value(&result).unwrap();
            let object = value.as_object().unwrap();
            assert_eq!(object.len(), 1);
            assert!(object.contains_key(result.key()));
        }
    }

    #[test]
    fn test_missing_fields_serialize_as_null() {
        let entry = PayoutEntry {
            id: None,
            name: Some("Alice".to_string()),
            department: None,
            hours_worked: 10.0,
            rate: 5.0,
            payout: 50.0,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value["id"].is_null());
        assert_eq!(value["name"], "Alice");
        assert_eq!(value["payout"], 50.0);
    }
}
