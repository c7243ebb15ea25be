pub mod diary;
pub mod error;
pub mod events;
pub mod timestamp;

pub use diary::{
    DiaryColumns, DiaryTable, IN_BED_COLUMN, OUT_BED_COLUMN, SUBJECT_COLUMN, read_diary_table,
};
pub use error::{IngestError, Result};
pub use events::{parse_events, subjects};
pub use timestamp::{AUTO_FORMATS, parse_timestamp};
