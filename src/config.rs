use once_cell::sync::Lazy;
use std::env::{self, VarError};

pub const PAR_THRESHOLD_VAR: &str = "RUST_LINALG_PAR_THRESHOLD";
pub const MAX_STEPS_VAR: &str = "RUST_LINALG_MAX_STEPS";

const DEFAULT_PAR_THRESHOLD: usize = 4096;
const DEFAULT_MAX_STEPS: usize = 1 << 20;

/// Tuning knobs shared by the elementwise maps and the elimination engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Output cell count from which elementwise maps run on the rayon pool.
    pub parallel_threshold: usize,
    /// Successful row operations one elimination run may perform.
    pub max_elimination_steps: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            parallel_threshold: DEFAULT_PAR_THRESHOLD,
            max_elimination_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl Config {
    /// Builds a configuration from the `RUST_LINALG_*` environment variables,
    /// falling back to the defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        let config = Config {
            parallel_threshold: read_usize(PAR_THRESHOLD_VAR, DEFAULT_PAR_THRESHOLD),
            max_elimination_steps: read_usize(MAX_STEPS_VAR, DEFAULT_MAX_STEPS),
        };
        log::debug!("resolved {config:?}");
        config
    }

    #[inline(always)]
    pub fn is_parallel(&self, cells: usize) -> bool {
        cells >= self.parallel_threshold
    }
}

static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

/// Process-wide configuration, resolved from the environment on first use.
pub fn config() -> &'static Config {
    &CONFIG
}

fn read_usize(var: &str, default: usize) -> usize {
    parse_usize(var, env::var(var), default)
}

fn parse_usize(var: &str, value: Result<String, VarError>, default: usize) -> usize {
    match value {
        Ok(v) => match v.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                log::warn!("invalid value set for `{var}` variable: '{v}'; using {default}");
                default
            }
        },
        Err(VarError::NotPresent) => default,
        Err(VarError::NotUnicode(s)) => {
            log::warn!(
                "invalid value set for `{var}` variable: {}; using {default}",
                s.to_string_lossy()
            );
            default
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
