use std::env;

use indexmap::IndexSet;
use log::debug;
use opengl_bindings::types::GLenum;
use opengl_bindings::COPY_WRITE_BUFFER;

/// Environment variable holding a comma separated list of built-in strategy
/// names to leave out of [`StrategyRegistry::with_defaults`].
///
/// [`StrategyRegistry::with_defaults`]: crate::strategy::StrategyRegistry::with_defaults
pub const DISABLE_VAR: &str = "GL_OBJECTS_DISABLE";

/// Knobs for the built-in strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    working_target: GLenum,
    disabled: IndexSet<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            working_target: COPY_WRITE_BUFFER,
            disabled: IndexSet::new(),
        }
    }
}

impl RegistryConfig {
    /// Defaults plus whatever [`DISABLE_VAR`] names.
    pub fn from_env() -> Self {
        match env::var(DISABLE_VAR) {
            Ok(list) => Self::default().disable_list(&list),
            Err(_) => Self::default(),
        }
    }

    /// Leaves the built-in strategy `name` unregistered.
    pub fn disable(mut self, name: impl Into<String>) -> Self {
        self.disabled.insert(name.into());
        self
    }

    fn disable_list(self, list: &str) -> Self {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .fold(self, |config, name| {
                debug!("strategy {} disabled by {}", name, DISABLE_VAR);
                config.disable(name)
            })
    }

    /// Target the bind-to-target buffer strategies bind to before each call.
    pub fn with_working_target(mut self, target: GLenum) -> Self {
        self.working_target = target;
        self
    }

    pub fn working_target(&self) -> GLenum {
        self.working_target
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        !self.disabled.contains(name)
    }

    pub fn disabled(&self) -> impl Iterator<Item = &str> {
        self.disabled.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use opengl_bindings::ARRAY_BUFFER;

    use super::*;

    #[test]
    fn everything_enabled_by_default() {
        let config = RegistryConfig::default();
        assert!(config.is_enabled("named_buffer"));
        assert_eq!(config.working_target(), COPY_WRITE_BUFFER);
    }

    #[test]
    fn builder_disables_and_retargets() {
        let config = RegistryConfig::default()
            .disable("named_buffer")
            .with_working_target(ARRAY_BUFFER);
        assert!(!config.is_enabled("named_buffer"));
        assert!(config.is_enabled("bind_to_working_target"));
        assert_eq!(config.working_target(), ARRAY_BUFFER);
    }

    #[test]
    fn disable_list_is_trimmed_and_ordered() {
        let config = RegistryConfig::default().disable_list(" texture_storage_dsa,,named_buffer ,");
        assert_eq!(
            config.disabled().collect::<Vec<_>>(),
            vec!["texture_storage_dsa", "named_buffer"]
        );
    }
}
