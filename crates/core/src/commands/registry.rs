use super::handler::Command;
use indexmap::IndexMap;
use itertools::Itertools;
use std::sync::Arc;
use tracing::{debug, warn};

/// Where sealed commands get registered.
pub trait CommandMap {
    /// Registers `command` under its name and aliases. A non-empty
    /// `namespace` additionally registers `namespace:name`. Returns `false`
    /// when the command could not be registered under its own name.
    fn register(&mut self, namespace: &str, command: Command) -> bool;
}

/// Labels are stored lower-cased in registration order.
#[derive(Default)]
pub struct CommandRegistry {
    labels: IndexMap<String, Arc<Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn get(&self, label: &str) -> Option<&Command> {
        self.labels.get(&label.to_lowercase()).map(Arc::as_ref)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }

    /// Every registered command once, no matter how many labels it has.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.labels
            .values()
            .unique_by(|command| Arc::as_ptr(command))
            .map(Arc::as_ref)
    }
}

impl CommandMap for CommandRegistry {
    fn register(&mut self, namespace: &str, command: Command) -> bool {
        let name = command.name().to_lowercase();
        if self.labels.contains_key(&name) {
            warn!(
                "Could not register /{} for {}: the name is already taken",
                name,
                command.plugin()
            );
            return false;
        }

        let command = Arc::new(command);
        self.labels.insert(name.clone(), command.clone());

        if !namespace.is_empty() {
            let namespaced = format!("{}:{}", namespace.to_lowercase(), name);
            self.labels
                .entry(namespaced)
                .or_insert_with(|| command.clone());
        }

        for alias in command.aliases() {
            let alias = alias.to_lowercase();
            if self.labels.contains_key(&alias) {
                warn!("Skipping alias /{} of /{}: already taken", alias, name);
                continue;
            }
            self.labels.insert(alias, command.clone());
        }

        debug!(
            "Registered /{} for {} ({} completions)",
            name,
            command.plugin(),
            command.completions().len()
        );
        true
    }
}
