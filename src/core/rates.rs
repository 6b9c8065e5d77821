use crate::core::Record;

/// Rate column names, highest priority first.
pub const DEFAULT_RATE_ALIASES: [&str; 3] = ["hourly_rate", "rate", "salary"];

/// What to do when a rate column is present but its value is not numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateFailurePolicy {
    /// The first alias present decides; an unparseable value means no rate.
    Strict,
    /// An unparseable value is ignored and the next alias is tried.
    SkipInvalid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateResolver {
    aliases: Vec<String>,
    policy: RateFailurePolicy,
}

impl RateResolver {
    pub fn new(policy: RateFailurePolicy) -> Self {
        Self::with_aliases(DEFAULT_RATE_ALIASES, policy)
    }

    pub fn with_aliases<I, S>(aliases: I, policy: RateFailurePolicy) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            aliases: aliases.into_iter().map(Into::into).collect(),
            policy,
        }
    }

    pub fn resolve(&self, record: &Record) -> Option<f64> {
        for alias in &self.aliases {
            let Some(raw) = record.get(alias) else {
                continue;
            };
            match (parse_number(raw), self.policy) {
                (Some(rate), _) => return Some(rate),
                (None, RateFailurePolicy::Strict) => return None,
                (None, RateFailurePolicy::SkipInvalid) => continue,
            }
        }
        None
    }
}

/// Hours worked for a record: zero when the column is absent, `None` when it
/// is present but not numeric.
pub fn resolve_hours(record: &Record) -> Option<f64> {
    match record.get("hours_worked") {
        Some(raw) => parse_number(raw),
        None => Some(0.0),
    }
}

/// Parses a decimal number. A single `_` between two digits is accepted as a
/// digit-group separator (`1_000`), anywhere else it makes the value invalid.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if !raw.contains('_') {
        return raw.parse::<f64>().ok();
    }

    let bytes = raw.as_bytes();
    let grouped_digits = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && i + 1 < bytes.len()
                && bytes[i - 1].is_ascii_digit()
                && bytes[i + 1].is_ascii_digit())
    });
    if !grouped_digits {
        return None;
    }
    raw.replace('_', "").parse::<f64>().ok()
}
