// Application configuration, loaded from environment variables and CLI flags.

use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server to.
    pub bind_addr: String,
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Corpus files to load into chains at startup.
    pub corpus_files: Vec<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables and CLI arguments.
    ///
    /// Environment variables:
    /// - `BIND_ADDR` - bind address (default: `127.0.0.1`)
    /// - `PORT` - HTTP server port (default: 9001)
    /// - `CORPUS_FILES` - comma-separated corpus file paths
    ///   (default: `chain1.txt,chain2.txt,chain3.txt`)
    ///
    /// CLI flags:
    /// - `--port <PORT>` - Override the port
    /// - `--corpus <a.txt,b.txt>` - Override the corpus file list
    pub fn load() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self::from_sources(&args, |key| std::env::var(key).ok())
    }

    /// Build a config from explicit sources. Split out so tests can run
    /// without touching the process environment.
    fn from_sources(args: &[String], env: impl Fn(&str) -> Option<String>) -> Self {
        let bind_addr = env("BIND_ADDR").unwrap_or_else(|| "127.0.0.1".to_string());

        // Port: CLI flag --port takes precedence, then env var, then default
        let port = Self::parse_cli_value(args, "--port")
            .and_then(|v| v.parse().ok())
            .or_else(|| env("PORT").and_then(|v| v.parse().ok()))
            .unwrap_or(9001);

        let corpus_files = Self::parse_cli_value(args, "--corpus")
            .or_else(|| env("CORPUS_FILES"))
            .unwrap_or_else(|| "chain1.txt,chain2.txt,chain3.txt".to_string())
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| PathBuf::from(s.trim()))
            .collect();

        Config {
            bind_addr,
            port,
            corpus_files,
        }
    }

    /// Parse a CLI flag value like `--port 8080`.
    fn parse_cli_value(args: &[String], flag: &str) -> Option<String> {
        args.windows(2).find_map(|pair| {
            if pair[0] == flag {
                Some(pair[1].clone())
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_sources(&args(&["babbler"]), no_env);
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.port, 9001);
        assert_eq!(
            config.corpus_files,
            vec![
                PathBuf::from("chain1.txt"),
                PathBuf::from("chain2.txt"),
                PathBuf::from("chain3.txt"),
            ]
        );
    }

    #[test]
    fn test_cli_port_overrides_env() {
        let config = Config::from_sources(&args(&["babbler", "--port", "8080"]), |key| {
            (key == "PORT").then(|| "7000".to_string())
        });
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_env_port_used_without_cli() {
        let config = Config::from_sources(&args(&["babbler"]), |key| {
            (key == "PORT").then(|| "7000".to_string())
        });
        assert_eq!(config.port, 7000);
    }

    #[test]
    fn test_corpus_list_parsing() {
        let config = Config::from_sources(
            &args(&["babbler", "--corpus", "a.txt, b.txt,"]),
            no_env,
        );
        assert_eq!(
            config.corpus_files,
            vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]
        );
    }
}
