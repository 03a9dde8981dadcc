use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use toml_edit::{value, Array, DocumentMut};
use tracing::info;

trait ConfigSerializeDefault {
    fn fix_config(self, name: &str, doc: &mut DocumentMut);
}

macro_rules! impl_simple_default {
    ( $( $type:ty ),* ) => {
        $(
            impl ConfigSerializeDefault for $type {
                fn fix_config(self, name: &str, doc: &mut DocumentMut) {
                    doc.entry(name).or_insert_with(|| value(self));
                }
            }
        )*
    }
}

impl_simple_default!(String, bool);

impl ConfigSerializeDefault for Vec<String> {
    fn fix_config(self, name: &str, doc: &mut DocumentMut) {
        doc.entry(name)
            .or_insert_with(|| value(self.into_iter().collect::<Array>()));
    }
}

macro_rules! gen_config {
    (
        $( $(#[$doc:meta])* $name:ident: $type:ty = $default:expr ),*
    ) => {
        #[derive(Serialize, Deserialize, Debug, Clone)]
        pub struct HandlerConfig {
            $(
                $(#[$doc])*
                pub $name: $type,
            )*
        }

        impl Default for HandlerConfig {
            fn default() -> Self {
                HandlerConfig {
                    $( $name: $default, )*
                }
            }
        }

        impl HandlerConfig {
            /// Loads the config at `path`, writing back any missing keys with
            /// their default values first. A missing file is created.
            pub fn load(path: impl AsRef<Path>) -> Result<HandlerConfig> {
                let path = path.as_ref();
                let str = match fs::read_to_string(path) {
                    Ok(str) => str,
                    Err(err) if err.kind() == ErrorKind::NotFound => String::new(),
                    Err(err) => {
                        return Err(err).with_context(|| format!("Failed to read {}", path.display()))
                    }
                };
                let mut doc = str
                    .parse::<DocumentMut>()
                    .with_context(|| format!("Failed to parse {}", path.display()))?;

                $(
                    <$type as ConfigSerializeDefault>::fix_config($default, stringify!($name), &mut doc);
                )*

                let patched = doc.to_string();
                if str != patched {
                    info!("Writing default values to {}", path.display());
                    fs::write(path, &patched)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                }

                toml::from_str(&patched).with_context(|| format!("Invalid config in {}", path.display()))
            }
        }
    };
}

gen_config! {
    /// Whether senders without permission are told so.
    using_no_perm: bool = true,
    /// Sent on permission failure when the command has no message of its own.
    no_permission_message: String = "&cno permit!".to_string(),
    unknown_command_message: String = "&cUnknown command. Type \"/help\" for help.".to_string(),
    /// Names the console host suggests when a command declines to complete.
    online_players: Vec<String> = Vec::new()
}
