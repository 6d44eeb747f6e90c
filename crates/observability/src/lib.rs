//! Tracing and logging (shared setup).

/// Initialize process-wide logging with the given default filter.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(default_filter: &str) {
    tracing::init(default_filter);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
