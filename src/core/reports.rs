use crate::core::rates::{resolve_hours, RateFailurePolicy, RateResolver, DEFAULT_RATE_ALIASES};
use crate::core::{Record, Report};
use crate::domain::model::{
    DepartmentAverage, DepartmentMap, PayoutEntry, ReportResult, TopPayout, TopRate,
};
use crate::utils::error::PayrollError;
use std::fmt;
use std::str::FromStr;

const UNKNOWN_DEPARTMENT: &str = "unknown";

fn department_key(record: &Record) -> &str {
    record.get("department").unwrap_or(UNKNOWN_DEPARTMENT)
}

fn field(record: &Record, column: &str) -> Option<String> {
    record.get(column).map(str::to_string)
}

/// Hours, rate and payout for a record that qualifies for payout reports.
fn resolve_payout(record: &Record, rates: &RateResolver) -> Option<(f64, f64, f64)> {
    let hours = resolve_hours(record)?;
    let rate = rates.resolve(record)?;
    Some((hours, rate, hours * rate))
}

macro_rules! report_with_rates {
    ($name:ident, $policy:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name {
            rates: RateResolver,
        }

        impl $name {
            pub const RATE_POLICY: RateFailurePolicy = $policy;

            pub fn with_aliases<S: AsRef<str>>(aliases: &[S]) -> Self {
                Self {
                    rates: RateResolver::with_aliases(
                        aliases.iter().map(|alias| alias.as_ref().to_string()),
                        Self::RATE_POLICY,
                    ),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::with_aliases(&DEFAULT_RATE_ALIASES)
            }
        }
    };
}

report_with_rates!(PayoutReport, RateFailurePolicy::Strict);
report_with_rates!(AvgHourlyRateByDepartmentReport, RateFailurePolicy::Strict);
report_with_rates!(TopPayoutReport, RateFailurePolicy::SkipInvalid);
report_with_rates!(TopRateReport, RateFailurePolicy::SkipInvalid);
report_with_rates!(TotalPayoutByDepartmentReport, RateFailurePolicy::SkipInvalid);

/// Payout details for every employee with usable hours and rate.
impl Report for PayoutReport {
    fn name(&self) -> &'static str {
        ReportKind::Payout.name()
    }

    fn generate(&self, records: &[Record]) -> ReportResult {
        let payouts = records
            .iter()
            .filter_map(|record| {
                let (hours_worked, rate, payout) = resolve_payout(record, &self.rates)?;
                Some(PayoutEntry {
                    id: field(record, "id"),
                    name: field(record, "name"),
                    department: field(record, "department"),
                    hours_worked,
                    rate,
                    payout,
                })
            })
            .collect();
        ReportResult::Payouts(payouts)
    }
}

impl Report for AvgHourlyRateByDepartmentReport {
    fn name(&self) -> &'static str {
        ReportKind::AvgHourlyRateByDepartment.name()
    }

    fn generate(&self, records: &[Record]) -> ReportResult {
        let mut totals: DepartmentMap<(f64, usize)> = DepartmentMap::new();
        for record in records {
            let Some(rate) = self.rates.resolve(record) else {
                continue;
            };
            let (sum, count) = totals.entry_or(department_key(record), (0.0, 0));
            *sum += rate;
            *count += 1;
        }

        let averages = totals
            .iter()
            .map(|(department, &(sum, count))| DepartmentAverage {
                department: department.to_string(),
                average_rate: sum / count as f64,
                employees: count,
            })
            .collect();
        ReportResult::AverageHourlyRateByDepartment(averages)
    }
}

/// Headcount per department. Every record counts, whatever its pay data.
#[derive(Debug, Clone, Default)]
pub struct CountByDepartmentReport;

impl Report for CountByDepartmentReport {
    fn name(&self) -> &'static str {
        ReportKind::CountByDepartment.name()
    }

    fn generate(&self, records: &[Record]) -> ReportResult {
        let mut counts = DepartmentMap::new();
        for record in records {
            *counts.entry_or(department_key(record), 0) += 1;
        }
        ReportResult::CountByDepartment(counts)
    }
}

/// Highest single payout. Ties keep the earliest record.
impl Report for TopPayoutReport {
    fn name(&self) -> &'static str {
        ReportKind::TopPayout.name()
    }

    fn generate(&self, records: &[Record]) -> ReportResult {
        let mut top: Option<(f64, &Record)> = None;
        for record in records {
            let Some((_, _, payout)) = resolve_payout(record, &self.rates) else {
                continue;
            };
            if top.map_or(true, |(max, _)| payout > max) {
                top = Some((payout, record));
            }
        }

        ReportResult::TopPayout(top.map(|(payout, record)| TopPayout {
            name: field(record, "name"),
            department: field(record, "department"),
            payout,
        }))
    }
}

/// Highest rate. Ties keep the earliest record.
impl Report for TopRateReport {
    fn name(&self) -> &'static str {
        ReportKind::TopRate.name()
    }

    fn generate(&self, records: &[Record]) -> ReportResult {
        let mut top: Option<(f64, &Record)> = None;
        for record in records {
            let Some(rate) = self.rates.resolve(record) else {
                continue;
            };
            if top.map_or(true, |(max, _)| rate > max) {
                top = Some((rate, record));
            }
        }

        ReportResult::TopRate(top.map(|(rate, record)| TopRate {
            name: field(record, "name"),
            department: field(record, "department"),
            rate,
        }))
    }
}

impl Report for TotalPayoutByDepartmentReport {
    fn name(&self) -> &'static str {
        ReportKind::TotalPayoutByDepartment.name()
    }

    fn generate(&self, records: &[Record]) -> ReportResult {
        let mut totals = DepartmentMap::new();
        for record in records {
            let Some((_, _, payout)) = resolve_payout(record, &self.rates) else {
                continue;
            };
            *totals.entry_or(department_key(record), 0.0) += payout;
        }
        ReportResult::TotalPayoutByDepartment(totals)
    }
}

/// The fixed registry of reports, addressed by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ReportKind {
    #[cfg_attr(feature = "cli", value(name = "payout"))]
    Payout,
    #[cfg_attr(feature = "cli", value(name = "avg_hourly_rate_by_department"))]
    AvgHourlyRateByDepartment,
    #[cfg_attr(feature = "cli", value(name = "count_by_department"))]
    CountByDepartment,
    #[cfg_attr(feature = "cli", value(name = "top_payout"))]
    TopPayout,
    #[cfg_attr(feature = "cli", value(name = "top_rate"))]
    TopRate,
    #[cfg_attr(feature = "cli", value(name = "total_payout_by_department"))]
    TotalPayoutByDepartment,
}

pub const REPORTS: [ReportKind; 6] = [
    ReportKind::Payout,
    ReportKind::AvgHourlyRateByDepartment,
    ReportKind::CountByDepartment,
    ReportKind::TopPayout,
    ReportKind::TopRate,
    ReportKind::TotalPayoutByDepartment,
];

impl ReportKind {
    pub fn name(self) -> &'static str {
        match self {
            ReportKind::Payout => "payout",
            ReportKind::AvgHourlyRateByDepartment => "avg_hourly_rate_by_department",
            ReportKind::CountByDepartment => "count_by_department",
            ReportKind::TopPayout => "top_payout",
            ReportKind::TopRate => "top_rate",
            ReportKind::TotalPayoutByDepartment => "total_payout_by_department",
        }
    }

    pub fn names() -> Vec<&'static str> {
        REPORTS.iter().map(|kind| kind.name()).collect()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        REPORTS.into_iter().find(|kind| kind.name() == name)
    }

    /// Builds the report, resolving rates through `aliases` in order.
    pub fn build<S: AsRef<str>>(self, aliases: &[S]) -> Box<dyn Report> {
        match self {
            ReportKind::Payout => Box::new(PayoutReport::with_aliases(aliases)),
            ReportKind::AvgHourlyRateByDepartment => {
                Box::new(AvgHourlyRateByDepartmentReport::with_aliases(aliases))
            }
            ReportKind::CountByDepartment => Box::new(CountByDepartmentReport),
            ReportKind::TopPayout => Box::new(TopPayoutReport::with_aliases(aliases)),
            ReportKind::TopRate => Box::new(TopRateReport::with_aliases(aliases)),
            ReportKind::TotalPayoutByDepartment => {
                Box::new(TotalPayoutByDepartmentReport::with_aliases(aliases))
            }
        }
    }

    /// Runs the report with the standard rate aliases.
    pub fn generate(self, records: &[Record]) -> ReportResult {
        self.build(&DEFAULT_RATE_ALIASES).generate(records)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportKind {
    type Err = PayrollError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::from_name(name).ok_or_else(|| PayrollError::UnknownReport {
            name: name.to_string(),
        })
    }
}
