pub mod error;
pub mod layout;
pub mod writer;

pub use error::{OutputError, Result};
pub use layout::{
    DATE_FORMAT, NIGHT_TIMESTAMP_FORMAT, OutputLayout, TIME_FORMAT, WideTable, render_table,
};
pub use writer::{default_output_name, to_csv_string, write_csv};
