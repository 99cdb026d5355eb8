//! Server and request-limit configuration.

use std::time::Duration;

/// Size limits applied to incoming requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum rows × cols for a maze grid.
    pub max_grid_cells: usize,
    /// Maximum number of cities for a TSP run (the search is factorial).
    pub max_cities: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_grid_cells: 400,
            max_cities: 6,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Pause before each streamed event. Zero streams as fast as the client reads.
    pub event_delay: Duration,
    pub limits: Limits,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            event_delay: Duration::ZERO,
            limits: Limits::default(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Consumer-side framing limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Longest line kept while waiting for its newline. Longer lines are
    /// dropped and counted as malformed.
    pub max_line_bytes: usize,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_line_bytes: 1024 * 1024,
        }
    }
}
