use crate::commands::CommandSender;
use crate::config::HandlerConfig;
use crate::permissions::PermissionAuthority;
use itertools::Itertools;
use std::sync::Arc;

/// The host's own suggestions, used whenever a command declines to offer
/// any.
pub trait DefaultCompleter: Send + Sync {
    fn complete(&self, sender: &CommandSender<'_>, alias: &str, args: &[String]) -> Vec<String>;
}

/// Never suggests anything.
pub struct NoCompletions;

impl DefaultCompleter for NoCompletions {
    fn complete(&self, _: &CommandSender<'_>, _: &str, _: &[String]) -> Vec<String> {
        Vec::new()
    }
}

/// Suggests the names of online players whose name starts with the word
/// being typed, ignoring case.
#[derive(Debug, Default, Clone)]
pub struct OnlinePlayers {
    names: Vec<String>,
}

impl OnlinePlayers {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl DefaultCompleter for OnlinePlayers {
    fn complete(&self, _: &CommandSender<'_>, _: &str, args: &[String]) -> Vec<String> {
        let Some(typed) = args.last() else {
            return Vec::new();
        };
        let typed = typed.to_lowercase();
        self.names
            .iter()
            .filter(|name| name.to_lowercase().starts_with(&typed))
            .cloned()
            .sorted_by_key(|name| name.to_lowercase())
            .collect()
    }
}

/// The host collaborators every command consults.
#[derive(Clone)]
pub struct HostServices {
    pub permissions: Arc<dyn PermissionAuthority>,
    pub fallback: Arc<dyn DefaultCompleter>,
    pub config: Arc<HandlerConfig>,
}

impl HostServices {
    pub fn new(
        permissions: impl PermissionAuthority + 'static,
        fallback: impl DefaultCompleter + 'static,
        config: HandlerConfig,
    ) -> Self {
        Self {
            permissions: Arc::new(permissions),
            fallback: Arc::new(fallback),
            config: Arc::new(config),
        }
    }
}
