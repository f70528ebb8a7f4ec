use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tera::Value;

const FULL: &str = "%A %B, %-d, %Y at %-I:%M%p";
const MEDIUM: &str = "%a %m, %d, %Y %-I:%M%p";

/// `{{ show.start_time | datetime(format="full") }}`
///
/// Accepts an RFC 3339 string, which is how timestamps serialize into the
/// template context. `format` is `full` or `medium` (the default).
pub fn datetime(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let raw = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("datetime filter expects a string"))?;
    let time = DateTime::parse_from_rfc3339(raw)
        .map_err(|e| tera::Error::msg(format!("datetime filter cannot parse `{raw}`: {e}")))?
        .with_timezone(&Utc);

    let layout = match args.get("format").and_then(Value::as_str).unwrap_or("medium") {
        "full" => FULL,
        "medium" => MEDIUM,
        other => return Err(tera::Error::msg(format!("unknown datetime format `{other}`"))),
    };

    Ok(Value::String(time.format(layout).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(value: &str, layout: Option<&str>) -> tera::Result<Value> {
        let mut args = HashMap::new();
        if let Some(layout) = layout {
            args.insert("format".to_string(), Value::String(layout.to_string()));
        }
        datetime(&Value::String(value.to_string()), &args)
    }

    #[test]
    fn test_full_format() {
        let formatted = format("2035-04-21T21:30:00Z", Some("full")).unwrap();
        assert_eq!(formatted, Value::String("Saturday April, 21, 2035 at 9:30PM".into()));
    }

    #[test]
    fn test_medium_is_the_default() {
        let formatted = format("2035-04-01T09:05:00Z", None).unwrap();
        assert_eq!(formatted, Value::String("Sun 04, 01, 2035 9:05AM".into()));
    }

    #[test]
    fn test_rejects_unknown_format_and_bad_input() {
        assert!(format("2035-04-01T09:05:00Z", Some("short")).is_err());
        assert!(format("yesterday", None).is_err());
    }
}
