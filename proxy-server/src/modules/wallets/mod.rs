pub mod methods;

/// Number of history events returned when the caller gives no `limit`
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;
