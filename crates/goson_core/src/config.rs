//! Database configuration.

/// Configuration for a database handle.
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether table files are written with indentation.
    pub pretty: bool,

    /// Whether every table write is fsynced before it replaces the file.
    pub sync_on_write: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pretty: true,
            sync_on_write: false,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether table files are pretty-printed.
    #[must_use]
    pub const fn pretty(mut self, value: bool) -> Self {
        self.pretty = value;
        self
    }

    /// Sets whether every write is fsynced.
    #[must_use]
    pub const fn sync_on_write(mut self, value: bool) -> Self {
        self.sync_on_write = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.pretty);
        assert!(!config.sync_on_write);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new().pretty(false).sync_on_write(true);

        assert!(!config.pretty);
        assert!(config.sync_on_write);
    }
}
