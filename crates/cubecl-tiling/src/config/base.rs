use super::logger::LoggerConfig;
use alloc::sync::Arc;

/// Static mutex holding the global configuration, initialized as `None`.
static TILING_GLOBAL_CONFIG: spin::Mutex<Option<Arc<TilingConfig>>> = spin::Mutex::new(None);

/// Represents the global configuration of the tiling transforms.
#[derive(Default, Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TilingConfig {
    /// Configuration for logging tiling operations.
    #[serde(default)]
    pub logger: LoggerConfig,
}

impl TilingConfig {
    /// Retrieves the current global configuration, loading it from the current directory if not set.
    ///
    /// If no configuration is set, it attempts to load one from `cubecl-tiling.toml` in the current
    /// directory or its parents, then applies the environment overrides. If no file is found, a
    /// default configuration is used.
    ///
    /// # Notes
    ///
    /// The configuration only drives logging, never the result of a transform. The log level is
    /// cached in an atomic the first time it is read.
    pub fn get() -> Arc<Self> {
        let mut state = TILING_GLOBAL_CONFIG.lock();
        if state.as_ref().is_none() {
            cfg_if::cfg_if! {
                if #[cfg(std_io)] {
                    let config = Self::from_current_dir();
                    let config = config.override_from_env();
                } else {
                    let config = Self::default();
                }
            }

            *state = Some(Arc::new(config));
        }

        state.as_ref().cloned().unwrap_or_default()
    }

    /// Sets the global configuration to the provided value.
    ///
    /// # Panics
    /// Panics if the configuration has already been set or read, as it cannot be overridden.
    ///
    /// # Warning
    /// This method must be called at the start of the program, before any tiling transform runs.
    pub fn set(config: Self) {
        let mut state = TILING_GLOBAL_CONFIG.lock();
        if state.is_some() {
            panic!("Cannot set the global configuration multiple times.");
        }
        *state = Some(Arc::new(config));
    }

    #[cfg(std_io)]
    /// Save the current configuration to the provided file path.
    pub fn save_default<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<()> {
        let config = Self::get();
        let content = toml::to_string_pretty(config.as_ref()).map_err(std::io::Error::other)?;
        std::fs::write(path, content)
    }

    #[cfg(feature = "std")]
    /// Overrides configuration fields based on environment variables.
    ///
    /// - `CUBECL_TILING_LOG`: `disabled`, `basic` or `full`.
    pub fn override_from_env(mut self) -> Self {
        use super::logger::TilingLogLevel;

        if let Ok(val) = std::env::var("CUBECL_TILING_LOG") {
            match val.as_str() {
                "disabled" | "0" | "false" => self.logger.level = TilingLogLevel::Disabled,
                "basic" | "1" | "true" => self.logger.level = TilingLogLevel::Basic,
                "full" | "2" => self.logger.level = TilingLogLevel::Full,
                _ => {}
            }
        }

        self
    }

    // Loads configuration from `cubecl-tiling.toml` in the current directory or its parents.
    //
    // Traverses up the directory tree until a valid configuration file is found or the root is reached.
    // Returns a default configuration if no file is found.
    #[cfg(std_io)]
    fn from_current_dir() -> Self {
        let Ok(mut dir) = std::env::current_dir() else {
            return Self::default();
        };

        loop {
            if let Ok(content) = Self::from_file_path(dir.join("cubecl-tiling.toml")) {
                return content;
            }

            if !dir.pop() {
                break;
            }
        }

        Self::default()
    }

    /// Loads configuration from a specified file path.
    #[cfg(std_io)]
    pub fn from_file_path<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("The file provided doesn't have the right format => {err:?}"),
            )
        })
    }
}
