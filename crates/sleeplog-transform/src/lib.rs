//! Sleep diary reshaping.
//!
//! [`reshape`] turns long-format [`SleepEvent`](sleeplog_model::SleepEvent)s
//! into one wide row per recording segment. [`default_segments`] builds the
//! segment list used when the caller supplies none.

pub mod defaults;
pub mod night;
pub mod reshape;

pub use defaults::{default_segments, sanitise_id};
pub use night::{NightIndex, night_date};
pub use reshape::{batch_width, reshape};
