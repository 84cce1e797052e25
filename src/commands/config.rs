//! `config show`: display the effective configuration with secrets masked

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::config::{Config, PRIVATE_KEY_ENV, PUBLIC_KEY_ENV};
use crate::error::Result;

/// Mask a sensitive value by showing only the first 2 and last 2 characters
fn mask_sensitive_value(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count > 4 {
        let first: String = value.chars().take(2).collect();
        let last: String = value.chars().skip(char_count - 2).collect();
        format!("{first}...{last}")
    } else {
        "****".to_string()
    }
}

/// Show current configuration
pub fn cmd_config_show(config: &Config, output_json: bool) -> Result<()> {
    let public_key = config.public_key().map(|k| mask_sensitive_value(&k));
    let private_configured = config.private_key().is_some();
    let config_file = Config::config_path().map(|p| p.display().to_string());
    let data_dir = config.data_dir().ok().map(|p| p.display().to_string());

    let json_output = json!({
        "base_url": config.base_url,
        "page_size": config.page_size,
        "search_limit": config.search_limit,
        "fetch_batch_size": config.fetch_batch_size,
        "debounce_ms": config.debounce_ms,
        "min_search_len": config.min_search_len,
        "splash_delay_ms": config.splash_delay_ms,
        "remote_timeout": config.remote_timeout,
        "display_policy": config.display_policy.to_string(),
        "nominal_total": config.nominal_total,
        "theme": config.theme.to_string(),
        "data_dir": data_dir,
        "auth": {
            "public_key": public_key,
            "private_key_configured": private_configured,
        },
        "config_file": config_file,
    });

    let mut text = String::new();
    text.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));

    let rows: [(&str, String); 11] = [
        ("base_url", config.base_url.clone()),
        ("page_size", config.page_size.to_string()),
        ("search_limit", config.search_limit.to_string()),
        ("fetch_batch_size", config.fetch_batch_size.to_string()),
        ("debounce_ms", config.debounce_ms.to_string()),
        ("min_search_len", config.min_search_len.to_string()),
        ("splash_delay_ms", config.splash_delay_ms.to_string()),
        ("remote_timeout", format!("{}s", config.remote_timeout)),
        ("display_policy", config.display_policy.to_string()),
        (
            "nominal_total",
            config
                .nominal_total
                .map_or_else(|| "reported by catalog".to_string(), |t| t.to_string()),
        ),
        ("theme", config.theme.to_string()),
    ];
    for (key, value) in rows {
        text.push_str(&format!("{}: {value}\n", key.cyan()));
    }
    text.push_str(&format!(
        "{}: {}\n",
        "data_dir".cyan(),
        data_dir.as_deref().unwrap_or("unknown")
    ));

    text.push('\n');
    text.push_str(&format!("{}:\n", "auth".cyan()));
    let public_status = match &public_key {
        Some(masked) => masked.green().to_string(),
        None => format!("not configured (set {PUBLIC_KEY_ENV})")
            .dimmed()
            .to_string(),
    };
    let private_status = if private_configured {
        "configured".green().to_string()
    } else {
        format!("not configured (set {PRIVATE_KEY_ENV})")
            .dimmed()
            .to_string()
    };
    text.push_str(&format!("  public_key: {public_status}\n"));
    text.push_str(&format!("  private_key: {private_status}\n"));

    text.push('\n');
    text.push_str(&format!(
        "{}",
        format!(
            "Config file: {}",
            config_file.as_deref().unwrap_or("none")
        )
        .dimmed()
    ));

    CommandOutput::new(json_output)
        .with_text(text)
        .print(output_json)
}
