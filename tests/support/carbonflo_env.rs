use std::{
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

use carbonflo::app_dirs::CONFIG_HOME_ENV;
use carbonflo::config::{API_KEY_ENV, BASE_URL_ENV};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const MANAGED: [&str; 3] = [CONFIG_HOME_ENV, BASE_URL_ENV, API_KEY_ENV];

/// Points the config root at `path` and clears the server overrides until dropped.
pub struct CarbonfloEnvGuard {
    previous: Vec<(&'static str, Option<String>)>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl CarbonfloEnvGuard {
    pub fn set_config_home(path: PathBuf) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let previous = MANAGED
            .iter()
            .map(|key| (*key, std::env::var(key).ok()))
            .collect();
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var(CONFIG_HOME_ENV, path);
            std::env::remove_var(BASE_URL_ENV);
            std::env::remove_var(API_KEY_ENV);
        }
        Self {
            previous,
            _lock: lock,
        }
    }

    pub fn set(&self, key: &str, value: &str) {
        // SAFETY: the guard holds the global env lock.
        unsafe {
            std::env::set_var(key, value);
        }
    }
}

impl Drop for CarbonfloEnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            // SAFETY: tests run under a global lock to prevent concurrent env mutations.
            unsafe {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
