//! Test-only helpers for tests that touch `CONSOLE_*` environment variables.
//!
//! Pair every use with `#[serial(env)]`; the process environment is shared.

/// Environment variables read by [`ConsoleConfig`](crate::ConsoleConfig)
pub const CONSOLE_ENV_VARS: [&str; 2] = ["CONSOLE_BASE_URL", "CONSOLE_API_KEY"];

/// RAII guard that restores every variable it touched when dropped.
#[derive(Default)]
pub struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    /// Guard that sets `key` to `val`
    #[must_use]
    pub fn set(key: &'static str, val: &str) -> Self {
        Self::default().and_set(key, val)
    }

    /// Guard that removes `key`
    #[must_use]
    pub fn remove(key: &'static str) -> Self {
        Self::default().and_remove(key)
    }

    /// Guard that removes every `CONSOLE_*` variable so defaults apply
    #[must_use]
    pub fn clean_console() -> Self {
        CONSOLE_ENV_VARS
            .into_iter()
            .fold(Self::default(), Self::and_remove)
    }

    /// Also set `key` to `val`
    #[must_use]
    pub fn and_set(mut self, key: &'static str, val: &str) -> Self {
        self.remember(key);
        // SAFETY: callers serialize env access with `#[serial(env)]`.
        unsafe { std::env::set_var(key, val) };
        self
    }

    /// Also remove `key`
    #[must_use]
    pub fn and_remove(mut self, key: &'static str) -> Self {
        self.remember(key);
        // SAFETY: callers serialize env access with `#[serial(env)]`.
        unsafe { std::env::remove_var(key) };
        self
    }

    fn remember(&mut self, key: &'static str) {
        if !self.saved.iter().any(|(k, _)| *k == key) {
            self.saved.push((key, std::env::var(key).ok()));
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, prev) in self.saved.drain(..).rev() {
            // SAFETY: callers serialize env access with `#[serial(env)]`.
            match prev {
                Some(v) => unsafe { std::env::set_var(key, v) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}
