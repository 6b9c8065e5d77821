use crate::adapters::storage::LocalStorage;
use crate::core::{Record, Storage};
use crate::utils::error::Result;

pub const DEFAULT_DELIMITER: char = ',';

/// Records parsed from one input text, with counts of the lines that were left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRows {
    pub records: Vec<Record>,
    pub blank_lines: usize,
    pub malformed_lines: usize,
}

/// Splits delimited text into records keyed by the first line's column names.
///
/// Fields are split naively on the delimiter and trimmed; there is no quoting or
/// escaping. A data line whose field count differs from the header's is dropped.
/// When the header repeats a column name, the later column's value wins.
#[derive(Debug, Clone, Copy)]
pub struct RowParser {
    delimiter: char,
}

impl Default for RowParser {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl RowParser {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn parse(&self, text: &str) -> Vec<Record> {
        self.parse_counted(text).records
    }

    pub fn parse_counted(&self, text: &str) -> ParsedRows {
        let mut parsed = ParsedRows::default();
        let mut lines = split_lines(text);

        // The first line is the header, whatever it contains.
        let headers: Vec<&str> = match lines.next() {
            Some(line) => self.split_fields(line).collect(),
            None => return parsed,
        };

        for line in lines {
            if line.trim().is_empty() {
                parsed.blank_lines += 1;
                continue;
            }

            let values: Vec<&str> = self.split_fields(line).collect();
            if values.len() != headers.len() {
                parsed.malformed_lines += 1;
                continue;
            }

            parsed
                .records
                .push(headers.iter().copied().zip(values).collect());
        }

        parsed
    }

    fn split_fields<'a>(&self, line: &'a str) -> impl Iterator<Item = &'a str> {
        line.split(self.delimiter).map(str::trim)
    }
}

/// Characters that end a line, the same set `str.splitlines` recognises.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}',
    '\u{2029}',
];

/// Yields lines split on any of [`LINE_BREAKS`], with `\r\n` counted as one
/// break. Empty input yields nothing, and a trailing line break does not
/// produce an extra line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = if text.is_empty() { None } else { Some(text) };
    std::iter::from_fn(move || {
        let current = rest?;
        match current.char_indices().find(|(_, c)| LINE_BREAKS.contains(c)) {
            Some((pos, c)) => {
                let break_len = if current[pos..].starts_with("\r\n") {
                    2
                } else {
                    c.len_utf8()
                };
                let remaining = &current[pos + break_len..];
                rest = if remaining.is_empty() { None } else { Some(remaining) };
                Some(&current[..pos])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}

/// Parses comma-separated text.
pub fn parse(text: &str) -> Vec<Record> {
    RowParser::default().parse(text)
}

/// Reads and parses every file in order, concatenating their records.
pub fn load_all<P: AsRef<str>>(paths: &[P]) -> Result<Vec<Record>> {
    load_all_from(&LocalStorage::default(), paths, RowParser::default())
}

/// Like [`load_all`], reading through `storage` with a configured parser.
/// Any unreadable path fails the whole load.
pub fn load_all_from<S: Storage, P: AsRef<str>>(
    storage: &S,
    paths: &[P],
    parser: RowParser,
) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let text = storage.read_to_string(path)?;
        let parsed = parser.parse_counted(&text);
        tracing::debug!(
            "Parsed {} records from {} ({} blank, {} malformed lines skipped)",
            parsed.records.len(),
            path,
            parsed.blank_lines,
            parsed.malformed_lines
        );
        records.extend(parsed.records);
    }
    Ok(records)
}
