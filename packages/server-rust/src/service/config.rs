/// Server-level configuration for the call pipeline.
///
/// Controls call timeouts, concurrency limits, and registration checks.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Maximum number of in-flight calls before load shedding.
    pub max_concurrent_calls: u32,
    /// Timeout applied to calls whose context carries `call_timeout_ms == 0`,
    /// in milliseconds.
    pub default_call_timeout_ms: u64,
    /// Validate every interface table when a server is registered.
    pub validate_tables: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_calls: 1000,
            default_call_timeout_ms: 30_000,
            validate_tables: true,
        }
    }
}
