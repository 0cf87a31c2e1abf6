/// Actor and scorecard identifiers.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (joining date, scorecard date) carry no time component.
pub type Date = chrono::NaiveDate;
