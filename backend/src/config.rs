//! Command line and environment configuration of the portal server.

use clap::Parser;

/// Goddard enrollment portal: REST backend and embedded web UI.
#[derive(Parser, Debug, Clone)]
#[command(name = "goddard-portal", version)]
pub struct Config {
    /// Interface to bind.
    #[arg(long, env = "PORTAL_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "PORTAL_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Do not open the portal in a browser on start.
    #[arg(long, env = "PORTAL_NO_BROWSER")]
    pub no_browser: bool,

    /// Start with empty collections instead of the demo data.
    #[arg(long, env = "PORTAL_NO_SEED")]
    pub no_seed: bool,

    /// Largest accepted JSON body, in bytes.
    #[arg(long, env = "PORTAL_JSON_LIMIT", default_value_t = 10 * 1024 * 1024)]
    pub json_limit: usize,
}

impl Config {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_development_setup() {
        let config = Config::parse_from(["goddard-portal"]);
        assert_eq!(config.url(), "http://127.0.0.1:8080");
        assert!(!config.no_seed);
        assert_eq!(config.json_limit, 10 * 1024 * 1024);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::parse_from(["goddard-portal", "--port", "9000", "--no-browser"]);
        assert_eq!(config.port, 9000);
        assert!(config.no_browser);
    }
}
