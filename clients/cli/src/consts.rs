pub mod dashboard_consts {
    //! Dashboard Configuration Constants
    //!
    //! Defaults for the status API endpoints, polling schedule and the fixed
    //! texts rendered into the page, organized by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// Maximum number of buffered poll events between the pollers and the session
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // RENDERED TEXT
    // =============================================================================

    /// Shown in place of a missing recommended provider or latency
    pub const PLACEHOLDER_DASH: &str = "—";

    /// Single list item rendered when there are no open incidents
    pub const NO_OPEN_INCIDENTS: &str = "No open incidents.";

    /// Notice rendered into the RPC region when the status fetch fails
    pub const STATUS_LOAD_FAILED: &str = "Failed to load status.";

    /// Exact severity literal that marks an incident as critical
    pub const CRITICAL_SEVERITY: &str = "CRIT";

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// Status API endpoints
    pub mod endpoints {
        /// Base URL used when neither the config file nor the CLI provides one
        pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

        /// Aggregate status endpoint
        pub const STATUS_PATH: &str = "/v1/status";

        /// Open incidents endpoint
        pub const OPEN_INCIDENTS_PATH: &str = "/v1/incidents?state=open";
    }

    /// Polling schedule
    pub mod polling {
        /// Interval between status fetches (seconds)
        pub const STATUS_INTERVAL_SECS: u64 = 10;

        /// Interval between open-incident fetches (seconds)
        pub const INCIDENTS_INTERVAL_SECS: u64 = 20;

        /// Per-request timeout, connect included (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;
    }
}
