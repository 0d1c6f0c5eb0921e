//! Config command handler

use crate::application::ports::{ConfigStore, HOST_PORT_KEY};
use crate::domain::connection::Duration;
use crate::domain::endpoint::Endpoint;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;

    let mut config = store.load().await?;

    match key {
        HOST_PORT_KEY => {
            let endpoint = value.parse::<Endpoint>().map_err(|e| invalid(key, e))?;
            config.host_port = Some(endpoint.to_string());
        }
        "connect_timeout" => {
            let timeout = value.parse::<Duration>().map_err(|e| invalid(key, e))?;
            config.connect_timeout = Some(timeout.to_string());
        }
        "history_size" => {
            config.history_size = Some(value.trim().parse::<usize>().map_err(|_| {
                invalid(key, "Value must be a non-negative integer")
            })?);
        }
        "notify" => {
            config.notify = Some(
                parse_bool(value).map_err(|_| invalid(key, "Value must be 'true' or 'false'"))?,
            );
        }
        _ => return Err(unknown_key(key)),
    }

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;

    let config = store.load().await?;

    let value = match key {
        HOST_PORT_KEY => config.host_port,
        "connect_timeout" => config.connect_timeout,
        "history_size" => config.history_size.map(|n| n.to_string()),
        "notify" => config.notify.map(|b| b.to_string()),
        _ => return Err(unknown_key(key)),
    };

    presenter.output(value.as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    presenter.key_value(HOST_PORT_KEY, config.host_port.as_deref().unwrap_or(NOT_SET));
    presenter.key_value(
        "connect_timeout",
        config.connect_timeout.as_deref().unwrap_or(NOT_SET),
    );
    presenter.key_value(
        "history_size",
        &config
            .history_size
            .map(|n| n.to_string())
            .unwrap_or_else(|| NOT_SET.to_string()),
    );
    presenter.key_value(
        "notify",
        &config
            .notify
            .map(|b| b.to_string())
            .unwrap_or_else(|| NOT_SET.to_string()),
    );

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_valid_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(unknown_key(key))
    }
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    }
}

fn invalid(key: &str, message: impl ToString) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.to_string(),
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}
