//! Key and type checks for a single config layer.
//!
//! Runs before serde so that typos and wrong types are reported with the
//! layer and dotted key that caused them.

use crate::ConfigError;
use serde_json::Value;

enum Kind {
    Str,
    Uint,
    OneOf(&'static [&'static str]),
}

struct Block {
    name: &'static str,
    fields: &'static [(&'static str, Kind)],
}

const BLOCKS: &[Block] = &[
    Block {
        name: "storage",
        fields: &[
            ("backend", Kind::OneOf(&["file", "memory"])),
            ("path", Kind::Str),
        ],
    },
    Block {
        name: "analysis",
        fields: &[("delay_ms", Kind::Uint)],
    },
    Block {
        name: "auth",
        fields: &[("delay_ms", Kind::Uint), ("min_password_len", Kind::Uint)],
    },
    Block {
        name: "settings",
        fields: &[("connection_test_delay_ms", Kind::Uint)],
    },
];

/// Check one layer's document against the known blocks.
pub(super) fn check(value: &Value, origin: &str) -> Result<(), ConfigError> {
    let Value::Object(root) = value else {
        return Err(invalid(origin, "root", "expected object"));
    };
    for (key, value) in root {
        if key == "$schema" {
            check_kind(value, &Kind::Str, origin, key)?;
            continue;
        }
        let Some(block) = BLOCKS.iter().find(|block| block.name == key) else {
            return Err(invalid(origin, key, "unknown key"));
        };
        let Value::Object(fields) = value else {
            return Err(invalid(origin, key, "expected object"));
        };
        for (field, value) in fields {
            let path = format!("{}.{field}", block.name);
            match block.fields.iter().find(|(name, _)| name == field) {
                Some((_, kind)) => check_kind(value, kind, origin, &path)?,
                None => return Err(invalid(origin, &path, "unknown key")),
            }
        }
    }
    Ok(())
}

fn check_kind(value: &Value, kind: &Kind, origin: &str, path: &str) -> Result<(), ConfigError> {
    match kind {
        Kind::Str if value.is_string() => Ok(()),
        Kind::Str => Err(invalid(origin, path, "expected string")),
        Kind::Uint if value.is_u64() => Ok(()),
        Kind::Uint => Err(invalid(origin, path, "expected non-negative integer")),
        Kind::OneOf(options) => match value.as_str() {
            Some(found) if options.contains(&found) => Ok(()),
            _ => Err(invalid(
                origin,
                path,
                &format!("expected one of: {}", options.join(", ")),
            )),
        },
    }
}

fn invalid(origin: &str, path: &str, message: &str) -> ConfigError {
    ConfigError::InvalidField {
        path: format!("{origin}:{path}"),
        message: message.to_string(),
    }
}
