use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One bed/wake pair: going to bed (`In_Bed`) and getting up (`Out_Bed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SleepInterval {
    pub onset: NaiveDateTime,
    pub wake: NaiveDateTime,
}

impl SleepInterval {
    pub fn wake_date(&self) -> NaiveDate {
        self.wake.date()
    }
}

/// One row of the long-format sleep diary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepEvent {
    /// 1-based line number of the row in the source CSV.
    pub row: usize,
    pub subject_id: String,
    pub bed_time: NaiveDateTime,
    pub wake_time: NaiveDateTime,
}

impl SleepEvent {
    pub fn interval(&self) -> SleepInterval {
        SleepInterval {
            onset: self.bed_time,
            wake: self.wake_time,
        }
    }
}
