//! Delimited table loading for the payroll snapshot and yearly performance files

use polars::prelude::*;
use std::collections::HashMap;
use std::io::Cursor;
use tracing::info;

use crate::data::parser::{
    decode_utf16le, decode_utf8, is_postseason, parse_currency, parse_number, parse_year,
    round_tenths,
};
use crate::data::source::DataSource;
use crate::error::LoadError;

/// Column names used by the two source files
pub mod columns {
    pub const TEAM: &str = "Team";
    pub const TEAM_NAME: &str = "Team Name";
    pub const YEAR: &str = "Year";
    pub const WINS: &str = "Wins";
    pub const AVG_WINS: &str = "Avg. Wins";
    pub const AVG_TOTAL_PAYROLL: &str = "Avg. Total Payroll Allocation";
    pub const PAYROLL_TYPE: &str = "Payroll Type";
    pub const CLASS_AMOUNT: &str = "Avg. Amount of this Payroll Classification";
    pub const POSTSEASON: &str = "Postseason";
}

const PAYROLL_COLUMNS: [&str; 5] = [
    columns::TEAM,
    columns::AVG_WINS,
    columns::AVG_TOTAL_PAYROLL,
    columns::PAYROLL_TYPE,
    columns::CLASS_AMOUNT,
];

const PERFORMANCE_COLUMNS: [&str; 6] = [
    columns::TEAM,
    columns::TEAM_NAME,
    columns::YEAR,
    columns::WINS,
    columns::AVG_TOTAL_PAYROLL,
    columns::POSTSEASON,
];

/// Encoding and delimiter pair of a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Comma-delimited UTF-8 with double-quote quoting
    CommaUtf8,
    /// Tab-delimited UTF-16 little-endian
    TabUtf16Le,
}

impl Profile {
    pub fn separator(&self) -> u8 {
        match self {
            Profile::CommaUtf8 => b',',
            Profile::TabUtf16Le => b'\t',
        }
    }

    /// Decode raw bytes into text before any delimiter parsing
    pub fn decode(&self, bytes: &[u8], source_name: &str) -> Result<String, LoadError> {
        match self {
            Profile::CommaUtf8 => Ok(decode_utf8(bytes, source_name)),
            Profile::TabUtf16Le => decode_utf16le(bytes, source_name),
        }
    }
}

/// One data row: column name to raw cell text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Trimmed cell value; `None` when absent or blank
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Parsed table in source row order
#[derive(Debug, Clone)]
pub struct RawTable {
    pub source_name: String,
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl RawTable {
    /// Parse decoded text. Every column is read as a string; typing happens
    /// per field in the row constructors.
    pub fn parse(text: &str, profile: Profile, source_name: &str) -> Result<Self, LoadError> {
        let delimited = |message: String| LoadError::Delimited {
            source_name: source_name.to_string(),
            message,
        };

        if text.trim().is_empty() {
            return Err(delimited("no data in file".to_string()));
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .map_parse_options(|opts| opts.with_separator(profile.separator()))
            .into_reader_with_file_handle(Cursor::new(text.as_bytes().to_vec()))
            .finish()
            .map_err(|e| delimited(e.to_string()))?;

        Self::from_dataframe(&df, source_name).map_err(|e| delimited(e.to_string()))
    }

    fn from_dataframe(df: &DataFrame, source_name: &str) -> Result<Self, PolarsError> {
        let mut headers = Vec::with_capacity(df.width());
        let mut cells = Vec::with_capacity(df.width());
        for column in df.get_columns() {
            headers.push(column.name().trim().to_string());
            cells.push(column.str()?);
        }

        let mut records = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let fields = headers
                .iter()
                .zip(&cells)
                .filter_map(|(header, col)| col.get(i).map(|v| (header.clone(), v.to_string())))
                .collect();
            records.push(RawRecord { fields });
        }

        Ok(Self {
            source_name: source_name.to_string(),
            headers,
            records,
        })
    }

    /// Fail with a parse error when any required header is absent
    pub fn require(&self, required: &[&'static str]) -> Result<(), LoadError> {
        match required
            .iter()
            .find(|column| !self.headers.iter().any(|h| h == *column))
        {
            Some(column) => Err(LoadError::MissingColumn {
                source_name: self.source_name.clone(),
                column: *column,
            }),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Fetch, decode and parse one table
pub async fn load_table(source: &DataSource, profile: Profile) -> Result<RawTable, LoadError> {
    let bytes = source.fetch().await?;
    let text = profile.decode(&bytes, &source.name())?;
    let table = RawTable::parse(&text, profile, &source.name())?;
    info!("Loaded {} rows from {}", table.len(), source);
    Ok(table)
}

/// One row of the payroll snapshot (`winspay.csv`).
///
/// The file repeats a team's averages on every classification row.
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollRow {
    pub team: String,
    /// Average wins rounded to one decimal
    pub avg_wins: Option<f64>,
    /// Average total payroll in dollars
    pub avg_total_payroll: Option<f64>,
    pub payroll_type: Option<String>,
    /// Dollars allocated to `payroll_type`
    pub class_amount: Option<f64>,
}

impl PayrollRow {
    fn from_record(record: &RawRecord) -> Option<Self> {
        let team = record.get(columns::TEAM)?.to_string();
        Some(Self {
            team,
            avg_wins: record
                .get(columns::AVG_WINS)
                .and_then(parse_number)
                .map(round_tenths),
            avg_total_payroll: record.get(columns::AVG_TOTAL_PAYROLL).and_then(parse_currency),
            payroll_type: record.get(columns::PAYROLL_TYPE).map(str::to_string),
            class_amount: record.get(columns::CLASS_AMOUNT).and_then(parse_currency),
        })
    }

    /// Rows with a team cell, in file order
    pub fn from_table(table: &RawTable) -> Result<Vec<Self>, LoadError> {
        table.require(&PAYROLL_COLUMNS)?;
        Ok(table.records.iter().filter_map(Self::from_record).collect())
    }
}

/// One row of the yearly performance export (`Spend vs Wins_data.csv`)
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRow {
    pub team: String,
    pub team_name: String,
    pub year: Option<i32>,
    pub wins: Option<f64>,
    /// Total payroll for the season in dollars
    pub spending: Option<f64>,
    pub postseason: bool,
}

impl PerformanceRow {
    fn from_record(record: &RawRecord) -> Self {
        Self {
            team: record.get(columns::TEAM).unwrap_or_default().to_string(),
            team_name: record.get(columns::TEAM_NAME).unwrap_or_default().to_string(),
            year: record.get(columns::YEAR).and_then(parse_year),
            wins: record.get(columns::WINS).and_then(parse_number),
            spending: record.get(columns::AVG_TOTAL_PAYROLL).and_then(parse_currency),
            postseason: record.get(columns::POSTSEASON).is_some_and(is_postseason),
        }
    }

    /// All required fields present
    pub fn is_complete(&self) -> bool {
        !self.team.is_empty()
            && !self.team_name.is_empty()
            && self.year.is_some()
            && self.wins.is_some()
            && self.spending.is_some()
    }

    pub fn spending_millions(&self) -> Option<f64> {
        self.spending.map(|s| s / 1_000_000.0)
    }

    pub fn from_table(table: &RawTable) -> Result<Vec<Self>, LoadError> {
        table.require(&PERFORMANCE_COLUMNS)?;
        Ok(table.records.iter().map(Self::from_record).collect())
    }
}

/// Load the payroll snapshot (comma-delimited UTF-8)
pub async fn load_payroll(source: &DataSource) -> Result<Vec<PayrollRow>, LoadError> {
    let table = load_table(source, Profile::CommaUtf8).await?;
    PayrollRow::from_table(&table)
}

/// Load the yearly performance export (tab-delimited UTF-16LE)
pub async fn load_performance(source: &DataSource) -> Result<Vec<PerformanceRow>, LoadError> {
    let table = load_table(source, Profile::TabUtf16Le).await?;
    PerformanceRow::from_table(&table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PAYROLL_CSV: &str = "\
Team,Avg. Wins,Avg. Total Payroll Allocation,Payroll Type,Avg. Amount of this Payroll Classification
NYY,92.43,\"$245,500,000\",Active 26-Man Roster,\"$180,000,000\"
NYY,92.43,\"$245,500,000\",Injured List,\"$40,000,000\"
OAK,71.2,\"$58,000,000\",Active 26-Man Roster,\"$50,000,000\"
,80,\"$1\",Active,1
";

    fn utf16le(text: &str) -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn test_parse_comma_table_preserves_order() {
        let table = RawTable::parse(PAYROLL_CSV, Profile::CommaUtf8, "winspay.csv").unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.headers[0], "Team");
        assert_eq!(table.records[0].get("Team"), Some("NYY"));
        assert_eq!(table.records[2].get("Team"), Some("OAK"));
        assert_eq!(
            table.records[0].get(columns::AVG_TOTAL_PAYROLL),
            Some("$245,500,000")
        );
    }

    #[test]
    fn test_payroll_rows() {
        let table = RawTable::parse(PAYROLL_CSV, Profile::CommaUtf8, "winspay.csv").unwrap();
        let rows = PayrollRow::from_table(&table).unwrap();

        // The row without a team is dropped
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].avg_wins, Some(92.4));
        assert_eq!(rows[0].avg_total_payroll, Some(245_500_000.0));
        assert_eq!(rows[1].payroll_type.as_deref(), Some("Injured List"));
        assert_eq!(rows[1].class_amount, Some(40_000_000.0));
    }

    #[test]
    fn test_missing_column_is_parse_error() {
        let text = "Team,Avg. Wins\nNYY,90\n";
        let table = RawTable::parse(text, Profile::CommaUtf8, "winspay.csv").unwrap();
        let err = PayrollRow::from_table(&table).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("Avg. Total Payroll Allocation"));
    }

    #[test]
    fn test_empty_text_is_parse_error() {
        let err = RawTable::parse("  \n", Profile::CommaUtf8, "winspay.csv").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_tab_utf16_table() {
        let text = "Team\tTeam Name\tYear\tWins\tAvg. Total Payroll Allocation\tPostseason\n\
                    NYY\tNew York Yankees\t2019\t103\t$220,000,000\tDivision Winner\n\
                    NYY\tNew York Yankees\t2020\t33\t$90,000,000\tWild Card\n\
                    OAK\tOakland Athletics\t2021\t86\t$60,000,000\t\n";
        let bytes = utf16le(text);
        let decoded = Profile::TabUtf16Le.decode(&bytes, "spend.tsv").unwrap();
        let table = RawTable::parse(&decoded, Profile::TabUtf16Le, "spend.tsv").unwrap();
        let rows = PerformanceRow::from_table(&table).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].team_name, "New York Yankees");
        assert_eq!(rows[0].year, Some(2019));
        assert_eq!(rows[0].spending_millions(), Some(220.0));
        assert!(rows[0].postseason);
        assert!(rows[1].postseason);
        assert!(!rows[2].postseason);
        assert!(rows.iter().all(|r| r.is_complete()));
    }

    #[test]
    fn test_utf16_table_read_as_utf8_has_no_headers() {
        let bytes = utf16le("Team\tTeam Name\nNYY\tNew York Yankees\n");
        let decoded = Profile::CommaUtf8.decode(&bytes, "spend.tsv").unwrap();
        let result = RawTable::parse(&decoded, Profile::TabUtf16Le, "spend.tsv")
            .and_then(|table| PerformanceRow::from_table(&table));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_payroll_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PAYROLL_CSV.as_bytes()).unwrap();

        let rows = load_payroll(&DataSource::from(file.path().to_path_buf()))
            .await
            .unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[tokio::test]
    async fn test_load_performance_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let text = "Team\tTeam Name\tYear\tWins\tAvg. Total Payroll Allocation\tPostseason\n\
                    SEA\tSeattle Mariners\t2022\t90\t$110,000,000\tWild Card\n";
        file.write_all(&utf16le(text)).unwrap();

        let rows = load_performance(&DataSource::from(file.path().to_path_buf()))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].wins, Some(90.0));
    }
}
