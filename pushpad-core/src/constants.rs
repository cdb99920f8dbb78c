//! Service constants for the Pushpad API.
//!
//! Paths, header names and the success status expected by each operation.
//! Status codes are fixed by the service; anything else is a failure.

// ═══════════════════════════════════════════════════════════════════════════════
// SERVICE LOCATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Default service host.
pub const DEFAULT_BASE_URL: &str = "https://pushpad.xyz";

/// Prefix of the versioned REST API.
pub const API_V1_PREFIX: &str = "/api/v1";

/// Default request timeout applied by the HTTP transport.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

// ═══════════════════════════════════════════════════════════════════════════════
// HEADERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Authorization header name.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Content type sent with every request.
pub const CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// Accept header value sent with every request.
pub const ACCEPT: &str = "application/json";

/// Response header carrying the subscription count.
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

// ═══════════════════════════════════════════════════════════════════════════════
// QUERY PARAMETERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Repeated key for uid filters.
pub const UIDS_PARAM: &str = "uids[]";

/// Repeated key for tag list filters.
pub const TAGS_LIST_PARAM: &str = "tags[]";

/// Single key for boolean tag expressions.
pub const TAGS_EXPRESSION_PARAM: &str = "tags";

/// Pagination key.
pub const PAGE_PARAM: &str = "page";

/// Uid key of the signed subscription link.
pub const UID_PARAM: &str = "uid";

/// Signature key of the signed subscription link.
pub const UID_SIGNATURE_PARAM: &str = "uid_signature";

// ═══════════════════════════════════════════════════════════════════════════════
// EXPECTED STATUS CODES
// ═══════════════════════════════════════════════════════════════════════════════

/// Successful creation (and notification delivery).
pub const STATUS_CREATED: u16 = 201;

/// Successful read or update.
pub const STATUS_OK: u16 = 200;

/// Project deletion is accepted asynchronously.
pub const STATUS_ACCEPTED: u16 = 202;

/// Sender/subscription deletion and notification cancel.
pub const STATUS_NO_CONTENT: u16 = 204;

/// Send-at timestamps are transmitted with minute precision, in UTC.
pub const SEND_AT_FORMAT: &str = "%Y-%m-%dT%H:%M";
