//! Setting value validation.

use regex::Regex;
use std::sync::LazyLock;

static RE_LOGIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?[A-Za-z0-9_]{1,25}$").expect("valid login regex"));

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "CHANNELS" => {
            let channels: Vec<&str> = value
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .collect();
            if channels.is_empty() {
                return Err("at least one channel is required".into());
            }
            if let Some(bad) = channels.iter().find(|c| !RE_LOGIN.is_match(c)) {
                return Err(format!("invalid channel name '{bad}'"));
            }
        }
        "TWITCH_NICK" => {
            if !value.is_empty() && !RE_LOGIN.is_match(value) {
                return Err("invalid login name".into());
            }
        }
        "SERVER_PORT" => validate_int_range(value, 1, 65535)?,
        "CHAT_HISTORY_LIMIT" => validate_int_range(value, 1, 500)?,
        k if is_boolean_setting(k) => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

fn is_boolean_setting(key: &str) -> bool {
    matches!(key, "CHAT_FILTER_ENABLED" | "BTTV_ENABLED")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_boolean() {
        assert!(validate_setting("BTTV_ENABLED", "true").is_ok());
        assert!(validate_setting("BTTV_ENABLED", "false").is_ok());
        assert!(validate_setting("BTTV_ENABLED", "yes").is_err());
    }

    #[test]
    fn test_valid_channels() {
        assert!(validate_setting("CHANNELS", "basetradetv").is_ok());
        assert!(validate_setting("CHANNELS", "#alca, basetradetv").is_ok());
        assert!(validate_setting("CHANNELS", "").is_err());
        assert!(validate_setting("CHANNELS", "good,bad name").is_err());
    }

    #[test]
    fn test_valid_ranges() {
        assert!(validate_setting("SERVER_PORT", "8080").is_ok());
        assert!(validate_setting("SERVER_PORT", "0").is_err());
        assert!(validate_setting("SERVER_PORT", "http").is_err());
        assert!(validate_setting("CHAT_HISTORY_LIMIT", "30").is_ok());
        assert!(validate_setting("CHAT_HISTORY_LIMIT", "501").is_err());
    }

    #[test]
    fn test_nick_may_be_empty() {
        assert!(validate_setting("TWITCH_NICK", "").is_ok());
        assert!(validate_setting("TWITCH_NICK", "caster_bot").is_ok());
        assert!(validate_setting("TWITCH_NICK", "no spaces").is_err());
    }
}
