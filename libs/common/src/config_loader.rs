//! Configuration loading helper functions
//! Resolve single values from an explicit override, the environment, or a fallback

use tracing::debug;

/// Get string configuration value with priority: explicit > ENV > default
///
/// Empty strings count as unset.
pub fn get_string_config(explicit: Option<String>, env_var: &str, default: String) -> String {
    if let Some(val) = explicit {
        if !val.is_empty() {
            debug!("Using explicit {}", env_var);
            return val;
        }
    }

    if let Ok(env_val) = std::env::var(env_var) {
        if !env_val.is_empty() {
            debug!("Using {} from environment", env_var);
            return env_val;
        }
    }

    debug!("Using default value for {}", env_var);
    default
}
