//! Site configuration.

use kronos_client::Storefront;
use kronos_client::models::ConfigValue;
use kronos_client::services::stringify_config_value;

use crate::error::CliError;

pub fn show(app: &Storefront) {
    let config = app.site_config().current();
    for (key, value) in config.entries() {
        println!("{key:<28} {}", stringify_config_value(&value));
    }
}

pub async fn sync(app: &Storefront) {
    app.site_config().load().await;
    if app.site_config().using_remote() {
        println!("Configuration loaded from the backend");
    } else {
        println!("Backend unavailable, showing the local copy");
    }
    show(app);
}

pub async fn set(app: &Storefront, key: &str, value: String) -> Result<(), CliError> {
    let Some(outcome) = app.site_config().set_key(key, ConfigValue::Text(value)).await else {
        return Err(CliError::InvalidArgument(format!(
            "unknown key or invalid value for {key}"
        )));
    };

    match (outcome.local, outcome.remote) {
        (_, true) => println!("Saved {key}"),
        (true, false) => println!("Saved {key} locally; the backend did not accept it"),
        (false, false) => return Err(CliError::Failed("saving configuration")),
    }
    Ok(())
}

pub fn reset(app: &Storefront) {
    app.site_config().reset();
    println!("Configuration reset to defaults");
}
