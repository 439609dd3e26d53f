//! `tsconfig.json` path-alias defaults

use serde_json::{json, Value};

/// Compiler options every blank base should carry
pub fn path_alias_defaults() -> Value {
    json!({
        "compilerOptions": {
            "baseUrl": ".",
            "paths": {
                "~/*": ["src/*"]
            }
        }
    })
}

/// Fill gaps in `existing` from `defaults`
///
/// Existing values always win. Missing or `null` keys take the default, and
/// objects present on both sides are merged recursively.
pub fn merge_defaults(existing: &mut Value, defaults: &Value) {
    let (Value::Object(target), Value::Object(defaults)) = (existing, defaults) else {
        return;
    };

    for (key, default) in defaults {
        if matches!(target.get(key), None | Some(Value::Null)) {
            target.insert(key.clone(), default.clone());
        } else if let Some(current) = target.get_mut(key) {
            if current.is_object() {
                merge_defaults(current, default);
            }
        }
    }
}
