/// Project identifiers are opaque strings (UUID v4 when generated by the store).
pub type ProjectId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
