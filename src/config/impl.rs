use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;
use crate::errors::Result;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns an Arc pointer to the configuration, which is cheap to clone
/// and doesn't hold any locks.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get()
        .expect("Config not initialized. Call init_config_from() first.")
        .load_full()
}

/// Initialize the global configuration from `-c`/`--config`, or "config.toml"
/// in the current directory.
///
/// An explicit path must exist. A missing default file falls back to
/// in-memory defaults. Calling it again after a successful load is a no-op.
pub fn init_config_from(path: Option<&str>) -> Result<()> {
    if CONFIG.get().is_some() {
        return Ok(());
    }
    let config = StaticConfig::load_from(path)?;
    CONFIG.get_or_init(|| ArcSwap::from_pointee(config));
    Ok(())
}

/// Apply in-place overrides (CLI flags) on top of the loaded configuration
pub fn update_config<F>(f: F)
where
    F: FnOnce(&mut StaticConfig),
{
    let Some(slot) = CONFIG.get() else {
        return;
    };
    let mut next = (*slot.load_full()).clone();
    f(&mut next);
    slot.store(Arc::new(next));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_config_overrides_field() {
        init_config_from(None).unwrap();
        update_config(|c| c.charts.width = 1234);
        assert_eq!(get_config().charts.width, 1234);
    }
}
