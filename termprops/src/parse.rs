//! Text-to-[`Value`] conversion for each [`Type`], grounded in the
//! reference registry's `parse_termprop_*`/`parse_systemd_property_*`
//! helper family: each `Type` has exactly one parse rule, selected by
//! [`crate::policy::RegistryPolicy::parse_fn`].
use crate::value::Value;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use percent_encoding::percent_decode_str;

/// `VALUELESS`: the property is either present or absent; there is
/// no payload to decode.
pub fn parse_valueless(_text: &str) -> Option<Value> {
    Some(Value::Valueless)
}

/// `STRING`: percent-decode (as used by OSC payloads) then validate
/// as UTF-8. Falls back to the raw text if it contains no escapes.
pub fn parse_string(text: &str) -> Option<Value> {
    let decoded = percent_decode_str(text).decode_utf8().ok()?;
    Some(Value::String(decoded.into_owned()))
}

/// Systemd context strings are not percent-encoded; only UTF-8
/// validity and a length cap are enforced.
pub fn parse_systemd_string(text: &str) -> Option<Value> {
    const MAX_LEN: usize = 255;
    if text.len() > MAX_LEN {
        return None;
    }
    Some(Value::String(text.to_string()))
}

pub fn parse_int(text: &str) -> Option<Value> {
    text.parse::<i64>().ok().map(Value::Int)
}

/// Decimal integer, clamped into `[min, max]` (values outside the
/// range are rejected rather than clamped, matching
/// `parse_termprop_integral_range`'s `std::optional` contract).
pub fn parse_int_range(text: &str, min: i64, max: i64) -> Option<Value> {
    let v: i64 = text.parse().ok()?;
    if v < min || v > max {
        return None;
    }
    Some(Value::Int(v))
}

pub fn parse_uint(text: &str) -> Option<Value> {
    text.parse::<u64>().ok().map(Value::Uint)
}

pub fn parse_uint_range(text: &str, min: u64, max: u64) -> Option<Value> {
    let v: u64 = text.parse().ok()?;
    if v < min || v > max {
        return None;
    }
    Some(Value::Uint(v))
}

/// `#rrggbb`, `#rrrrggggbbbb`, or `rgb:rr/gg/bb` (and the 4-digit
/// `rgb:rrrr/gggg/bbbb` form, truncated to the high byte).
pub fn parse_rgb(text: &str) -> Option<Value> {
    if let Some(hex) = text.strip_prefix('#') {
        return match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Value::Rgb(r, g, b))
            }
            12 => {
                let r = u16::from_str_radix(&hex[0..4], 16).ok()?;
                let g = u16::from_str_radix(&hex[4..8], 16).ok()?;
                let b = u16::from_str_radix(&hex[8..12], 16).ok()?;
                Some(Value::Rgb((r >> 8) as u8, (g >> 8) as u8, (b >> 8) as u8))
            }
            _ => None,
        };
    }
    if let Some(rest) = text.strip_prefix("rgb:") {
        let mut parts = rest.split('/');
        let r = parts.next()?;
        let g = parts.next()?;
        let b = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        let shrink = |s: &str| -> Option<u8> {
            let v = u16::from_str_radix(s, 16).ok()?;
            Some(match s.len() {
                1 => (v * 0x11) as u8,
                2 => v as u8,
                3 | 4 => (v >> (4 * (s.len() - 2))) as u8,
                _ => return None,
            })
        };
        return Some(Value::Rgb(shrink(r)?, shrink(g)?, shrink(b)?));
    }
    None
}

/// Parsed and re-serialised through `url::Url` so callers always see
/// a normalised form; a bare absolute path is promoted to a `file://`
/// URI (used for the current-directory/current-file termprops).
pub fn parse_uri(text: &str) -> Option<Value> {
    if let Ok(url) = url::Url::parse(text) {
        return Some(Value::Uri(url.to_string()));
    }
    if text.starts_with('/') {
        let url = url::Url::from_file_path(text).ok()?;
        return Some(Value::Uri(url.to_string()));
    }
    None
}

pub fn parse_uuid(text: &str) -> Option<Value> {
    uuid::Uuid::parse_str(text).ok().map(Value::Uuid)
}

/// Systemd UUIDs are required to be in the canonical dashed
/// lower-case form; no normalisation is performed.
pub fn parse_systemd_uuid(text: &str) -> Option<Value> {
    if text != text.to_lowercase() {
        return None;
    }
    uuid::Uuid::parse_str(text).ok().map(Value::Uuid)
}

/// `systemd.context.type`: one of a fixed set of context-type names,
/// stored as the matching enum ordinal. Grounded on
/// `context_type_from_string` in `systemdpropsregistry.cc`.
pub fn parse_systemd_context_type(text: &str) -> Option<Value> {
    const NAMES: &[&str] = &[
        "app",
        "boot",
        "chpriv",
        "command",
        "container",
        "elevate",
        "remote",
        "service",
        "session",
        "shell",
        "subcontext",
        "vm",
    ];
    NAMES
        .iter()
        .position(|&n| n == text)
        .map(|i| Value::Int(i as i64))
}

/// `systemd.context.exit-condition`: one of a fixed set of exit-
/// condition names, stored as the matching enum ordinal. Grounded on
/// `exit_condition_from_string` in `systemdpropsregistry.cc`.
pub fn parse_systemd_exit_condition(text: &str) -> Option<Value> {
    const NAMES: &[&str] = &["crash", "failure", "interrupt", "success"];
    NAMES
        .iter()
        .position(|&n| n == text)
        .map(|i| Value::Int(i as i64))
}

/// `systemd.current-directory`: a systemd-string payload (no percent-
/// decoding) promoted to a `file://` URI when it isn't already one.
/// Grounded on `impl::parse_cwd` in `systemdpropsregistry.cc`, which
/// parses the raw value as a systemd property string first and only
/// then checks/builds the URI.
pub fn parse_systemd_cwd(text: &str) -> Option<Value> {
    let Value::String(s) = parse_systemd_string(text)? else {
        unreachable!("parse_systemd_string always returns Value::String")
    };
    if let Ok(url) = url::Url::parse(&s) {
        if url.scheme() == "file" {
            return Some(Value::Uri(url.to_string()));
        }
    }
    Some(Value::Uri(format!("file://{}", s)))
}

/// `IMAGE`: a format-version byte followed by base64-encoded binary
/// data, as used by inline-image OSC payloads.
pub fn parse_image(text: &str) -> Option<Value> {
    let (version, data) = text.split_once(';')?;
    let version: u8 = version.parse().ok()?;
    if version != 1 {
        return None;
    }
    let bytes = BASE64.decode(data).ok()?;
    Some(Value::Image(bytes))
}
