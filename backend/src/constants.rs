// =============================================================================
// Lunchbot Backend Constants
// =============================================================================
// This file contains all constants used throughout the backend to enable
// easy tuning and configuration from a single location.

// =============================================================================
// PAIRING HISTORY
// =============================================================================

/// Maximum number of past partners kept per user. Oldest entries are evicted first.
pub const MAX_HISTORY: usize = 50;

/// Weight given to a candidate the requester has never been paired with.
/// Always dominates history-derived weights, which are bounded by `MAX_HISTORY`.
pub const NEVER_PAIRED_WEIGHT: u64 = 1000;

// =============================================================================
// CANDIDATE POOL
// =============================================================================

/// Maximum number of group members considered for a single pairing
pub const MAX_CANDIDATE_POOL: i64 = 1000;

// =============================================================================
// PERSISTENCE
// =============================================================================

/// Key of the single document holding all pairing state
pub const DEFAULT_DOCUMENT_KEY: &str = "LunchbotData";

/// Directory used by the backup and reset tools
pub const DEFAULT_BACKUP_DIR: &str = "./db_backups";

// =============================================================================
// USER REFERENCES
// =============================================================================

/// Accepted shape of a username or user id, with an optional leading `@`
pub const USER_REFERENCE_PATTERN: &str = r"^@?[A-Za-z0-9][A-Za-z0-9._-]{0,63}$";

// =============================================================================
// MESSAGES
// =============================================================================

/// Sent to both partners when a pairing starts
pub const PAIRING_STARTED_MESSAGE: &str = "Hey! I think both of you should meet for lunch soon!";

/// Sent when a pairing is finished
pub const PAIRING_FINISHED_MESSAGE: &str = "Hope you enjoyed your lunch!";

/// Reported when none of the users have topics
pub const NO_TOPICS_MESSAGE: &str = "No topics available";

/// Prefix of a conversation-starter suggestion
pub const TOPIC_SUGGESTION_PREFIX: &str = "You could talk about";

// =============================================================================
// SERVER CONFIGURATION
// =============================================================================

/// Default server port if not specified in environment
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Default database pool size
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Default seconds to wait for a pooled connection
pub const DEFAULT_DB_ACQUIRE_TIMEOUT_SECS: u64 = 5;
