pub mod status_line;
pub mod types;

pub use status_line::{parse_fields, StatusLine};
pub use types::{Field, IpduReadings, Parseable, RecordFields, Snapshot, UpsReadings};
