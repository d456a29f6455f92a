//! Names the expansion recognizes and emits.

/// Configuration for [`TrackedProperty`](crate::TrackedProperty).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Last path component of the primary marker attribute.
    pub marker: String,
    /// Last path component of the companion marker. Also attached to the
    /// emitted storage declaration.
    pub companion: String,
    /// Expression generated code uses to reach the observation registrar.
    pub registrar: String,
    /// Prefix of the hidden storage name.
    pub storage_prefix: String,
    /// Prefix of the projected peer name.
    pub projection_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker: "Tracked".to_string(),
            companion: "ObservationIgnored".to_string(),
            registrar: "_$observationRegistrar".to_string(),
            storage_prefix: "_".to_string(),
            projection_prefix: "$".to_string(),
        }
    }
}

impl Config {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn with_companion(mut self, companion: impl Into<String>) -> Self {
        self.companion = companion.into();
        self
    }

    pub fn with_registrar(mut self, registrar: impl Into<String>) -> Self {
        self.registrar = registrar.into();
        self
    }

    pub fn with_storage_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.storage_prefix = prefix.into();
        self
    }

    pub fn with_projection_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.projection_prefix = prefix.into();
        self
    }

    pub(crate) fn storage_name(&self, name: &str) -> String {
        format!("{}{}", self.storage_prefix, name)
    }

    pub(crate) fn projection_name(&self, name: &str) -> String {
        format!("{}{}", self.projection_prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.marker, "Tracked");
        assert_eq!(config.companion, "ObservationIgnored");
        assert_eq!(config.storage_name("title"), "_title");
        assert_eq!(config.projection_name("title"), "$title");
    }

    #[test]
    fn test_config_builder() {
        let config = Config::new()
            .with_marker("Wrapped")
            .with_companion("Ignored")
            .with_registrar("registrar")
            .with_storage_prefix("__")
            .with_projection_prefix("projected_");
        assert_eq!(config.marker, "Wrapped");
        assert_eq!(config.companion, "Ignored");
        assert_eq!(config.registrar, "registrar");
        assert_eq!(config.storage_name("x"), "__x");
        assert_eq!(config.projection_name("x"), "projected_x");
    }
}
