//! Config command implementation.

use actionarea_core::config::{parse_duration, Config};
use anyhow::{anyhow, Context, Result};

use super::{ConfigAction, ConfigArgs};

/// Every key accepted by `config get` and `config set`.
const KEYS: &[&str] = &[
    "layout.landscape_aspect",
    "layout.min_landscape_width",
    "layout.master_fraction",
    "layout.min_master_width",
    "layout.margin",
    "layout.split_margin",
    "action_bar.max_items",
    "action_bar.height",
    "animation.enabled",
    "animation.duration",
    "animation.frame_interval",
    "ui.theme",
    "ui.show_log",
];

/// Run the config command.
pub async fn run(args: ConfigArgs) -> Result<()> {
    match args.action {
        ConfigAction::Get { key } => {
            let config = Config::load().context("Failed to load configuration")?;
            match get_config_value(&config, &key) {
                Some(v) => println!("{}: {}", key, v),
                None => print_unknown_key(&key),
            }
        }

        ConfigAction::Set { key, value } => {
            let mut config = Config::load().context("Failed to load configuration")?;
            if set_config_value(&mut config, &key, &value)? {
                config
                    .validate()
                    .with_context(|| format!("Refusing to set {} = {}", key, value))?;
                config.save().context("Failed to save configuration")?;
                println!("Set {} = {}", key, value);
            } else {
                print_unknown_key(&key);
            }
        }

        ConfigAction::Show => {
            let config = Config::load().context("Failed to load configuration")?;
            let rendered =
                toml::to_string_pretty(&config).context("Failed to render configuration")?;
            println!();
            println!("Action Area Configuration");
            println!("{}", "─".repeat(50));
            println!();
            println!("{}", rendered.trim_end());
            println!();
        }

        ConfigAction::Path => {
            println!("{}", Config::config_path().display());
        }

        ConfigAction::Reset => {
            Config::default()
                .save()
                .context("Failed to save configuration")?;
            println!("Configuration reset to defaults.");
        }
    }

    Ok(())
}

fn print_unknown_key(key: &str) {
    println!("Unknown configuration key: {}", key);
    println!("Available keys: {}", KEYS.join(", "));
}

fn get_config_value(config: &Config, key: &str) -> Option<String> {
    let value = match key {
        "layout.landscape_aspect" => config.layout.landscape_aspect.to_string(),
        "layout.min_landscape_width" => config.layout.min_landscape_width.to_string(),
        "layout.master_fraction" => config.layout.master_fraction.to_string(),
        "layout.min_master_width" => config.layout.min_master_width.to_string(),
        "layout.margin" => config.layout.margin.to_string(),
        "layout.split_margin" => config.layout.split_margin.to_string(),
        "action_bar.max_items" => config.action_bar.max_items.to_string(),
        "action_bar.height" => config.action_bar.height.to_string(),
        "animation.enabled" => config.animation.enabled.to_string(),
        "animation.duration" => format!("{}ms", config.animation.duration.as_millis()),
        "animation.frame_interval" => {
            format!("{}ms", config.animation.frame_interval.as_millis())
        }
        "ui.theme" => config.ui.theme.clone(),
        "ui.show_log" => config.ui.show_log.to_string(),
        _ => return None,
    };
    Some(value)
}

fn set_config_value(config: &mut Config, key: &str, value: &str) -> Result<bool> {
    let duration = |value: &str| {
        parse_duration(value).ok_or_else(|| anyhow!("Invalid duration '{}' (try 250ms or 1s)", value))
    };

    match key {
        "layout.landscape_aspect" => config.layout.landscape_aspect = value.parse()?,
        "layout.min_landscape_width" => config.layout.min_landscape_width = value.parse()?,
        "layout.master_fraction" => config.layout.master_fraction = value.parse()?,
        "layout.min_master_width" => config.layout.min_master_width = value.parse()?,
        "layout.margin" => config.layout.margin = value.parse()?,
        "layout.split_margin" => config.layout.split_margin = value.parse()?,
        "action_bar.max_items" => config.action_bar.max_items = value.parse()?,
        "action_bar.height" => config.action_bar.height = value.parse()?,
        "animation.enabled" => config.animation.enabled = value.parse()?,
        "animation.duration" => config.animation.duration = duration(value)?,
        "animation.frame_interval" => config.animation.frame_interval = duration(value)?,
        "ui.theme" => config.ui.theme = value.to_string(),
        "ui.show_log" => config.ui.show_log = value.parse()?,
        _ => return Ok(false),
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_every_key_is_readable() {
        let config = Config::default();
        for key in KEYS {
            assert!(get_config_value(&config, key).is_some(), "{key}");
        }
        assert!(get_config_value(&config, "network.port").is_none());
    }

    #[test]
    fn test_set_then_get() {
        let mut config = Config::default();

        assert!(set_config_value(&mut config, "animation.duration", "1s").expect("set"));
        assert_eq!(config.animation.duration, Duration::from_secs(1));
        assert_eq!(
            get_config_value(&config, "animation.duration").as_deref(),
            Some("1000ms")
        );

        assert!(set_config_value(&mut config, "layout.min_landscape_width", "140").expect("set"));
        assert_eq!(config.layout.min_landscape_width, 140);

        assert!(set_config_value(&mut config, "ui.theme", "light").expect("set"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();

        assert!(set_config_value(&mut config, "action_bar.max_items", "many").is_err());
        assert!(set_config_value(&mut config, "animation.duration", "soon").is_err());
        assert!(!set_config_value(&mut config, "network.port", "80").expect("unknown key"));

        set_config_value(&mut config, "layout.master_fraction", "1.5").expect("parses");
        assert!(config.validate().is_err());
    }
}
