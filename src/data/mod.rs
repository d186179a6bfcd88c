//! Data loading: sources, decoding, delimited parsing and the static roster

pub mod csv_loader;
pub mod parser;
pub mod roster;
pub mod source;

// Re-export commonly used types
pub use csv_loader::{
    load_payroll, load_performance, load_table, PayrollRow, PerformanceRow, Profile, RawRecord,
    RawTable,
};
pub use parser::{is_postseason, parse_currency, PayrollClass};
pub use roster::{find_by_abbreviation, find_by_name, roster};
pub use source::DataSource;
