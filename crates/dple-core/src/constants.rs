//! Shared constants for the dynamic page list engine.

/// Engine version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---- Budget defaults ----

/// Maximum total query cost when neither engine nor legacy settings exist.
pub const DEFAULT_MAX_COST: u32 = 6;

/// Maximum total cost when the legacy "unlimited categories" switch is on.
pub const UNLIMITED_MAX_COST: u32 = 1000;

/// Maximum number of result rows when no setting exists.
pub const DEFAULT_MAX_RESULT_COUNT: u32 = 200;

/// Maximum number of result rows when the legacy "unlimited results" switch is on.
pub const UNLIMITED_MAX_RESULT_COUNT: u32 = 100_000;

/// Join-unit cost of linked-entity features and cheap user conditions.
pub const DEFAULT_JOIN_COST: u32 = 1;

/// Join-unit cost of `modifiedby` / `notmodifiedby` user conditions.
pub const DEFAULT_USER_EXPENSIVE_COST: u32 = 10;

/// Key in the condition cost map for expensive user conditions.
pub const USER_EXPENSIVE_KEY: &str = "user_expensive";

// ---- Namespaces ----

pub const NS_MAIN: i32 = 0;
pub const NS_USER: i32 = 2;
pub const NS_PROJECT: i32 = 4;
pub const NS_FILE: i32 = 6;
pub const NS_MEDIAWIKI: i32 = 8;
pub const NS_TEMPLATE: i32 = 10;
pub const NS_HELP: i32 = 12;
pub const NS_CATEGORY: i32 = 14;

// ---- Base query ----

/// Table every dynamic page list selects from.
pub const PAGE_TABLE: &str = "page";

/// Columns selected for every dynamic page list.
pub const PAGE_COLUMNS: [&str; 5] = [
    "page_id",
    "page_namespace",
    "page_title",
    "page_is_redirect",
    "page_len",
];

/// Word separator used in stored title keys.
pub const DBKEY_SEPARATOR: char = '_';

/// Separator between the sort key and the extra annotation in category sort keys.
pub const SORTKEY_EXTRA_SEPARATOR: char = '|';
