//! Ambient configuration surface (SPEC_FULL.md §12). CLI argument parsing is
//! explicitly out of scope, so this is a pure function over the process's
//! arguments and environment, independently testable without a process
//! boundary.

use std::collections::HashMap;

const DEFAULT_MAP_PATH: &str = "topologies/default.map";

/// Resolved configuration for one run of the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub map_path: String,
    pub snapshot_path: Option<String>,
}

impl Config {
    /// Resolution order for the map path (§12): first positional argument,
    /// then `DRONEWAY_MAP`, then the hardcoded default. The snapshot path is
    /// `DRONEWAY_SNAPSHOT` alone, unset meaning "write nothing".
    pub fn resolve(args: &[String], env: &HashMap<String, String>) -> Self {
        let map_path = args
            .first()
            .cloned()
            .or_else(|| env.get("DRONEWAY_MAP").cloned())
            .unwrap_or_else(|| DEFAULT_MAP_PATH.to_string());
        let snapshot_path = env.get("DRONEWAY_SNAPSHOT").cloned();
        Config {
            map_path,
            snapshot_path,
        }
    }

    /// Convenience entry point for `main`: resolves from the real process
    /// argument list (minus argv[0]) and environment.
    pub fn from_process() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::resolve(&args, &env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn positional_argument_wins_over_everything() {
        let args = vec!["custom.map".to_string()];
        let config = Config::resolve(&args, &env(&[("DRONEWAY_MAP", "env.map")]));
        assert_eq!(config.map_path, "custom.map");
    }

    #[test]
    fn env_var_wins_over_default() {
        let config = Config::resolve(&[], &env(&[("DRONEWAY_MAP", "env.map")]));
        assert_eq!(config.map_path, "env.map");
    }

    #[test]
    fn falls_back_to_hardcoded_default() {
        let config = Config::resolve(&[], &HashMap::new());
        assert_eq!(config.map_path, DEFAULT_MAP_PATH);
    }

    #[test]
    fn snapshot_path_is_unset_by_default() {
        let config = Config::resolve(&[], &HashMap::new());
        assert_eq!(config.snapshot_path, None);
    }

    #[test]
    fn snapshot_path_reads_its_own_env_var() {
        let config = Config::resolve(&[], &env(&[("DRONEWAY_SNAPSHOT", "out.json")]));
        assert_eq!(config.snapshot_path, Some("out.json".to_string()));
    }
}
