//! Scope configuration module for resolving the default owner scope.
//!
//! Stock queries are tenant-isolated by an owner scope identifier. The service
//! binary reads its default scope from the `DEFAULT_OWNER_ID` environment
//! variable (typically supplied via `.env`); when unset, queries run unscoped
//! and isolation is expected to be enforced server-side.

/// Environment variable naming the default owner scope for the service.
pub const DEFAULT_OWNER_ID_VAR: &str = "DEFAULT_OWNER_ID";

/// Gets the default owner scope identifier, if one is configured.
///
/// Empty or whitespace-only values are treated as unset.
#[must_use]
pub fn get_default_owner_id() -> Option<String> {
    std::env::var(DEFAULT_OWNER_ID_VAR)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
