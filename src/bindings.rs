use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::SigilError;

/// Name → value table consulted at render time.
///
/// Values are stored as `serde_json::Value`; `bind` marshals anything
/// serializable, recursively for maps, sequences, and structs. Names
/// missing from the table are not errors: the renderer passes the
/// placeholder through untouched so a later pass can finish the job.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    values: IndexMap<String, JsonValue>,
}

impl Bindings {
    pub fn new() -> Self {
        Bindings {
            values: IndexMap::new(),
        }
    }

    /// Marshal `value` to JSON and bind it under `name`. Replaces any
    /// previous binding of the same name.
    pub fn bind<T: Serialize>(
        &mut self,
        name: impl Into<String>,
        value: T,
    ) -> Result<(), SigilError> {
        let encoded = serde_json::to_value(value).map_err(|e| SigilError::RenderError {
            message: format!("Failed to encode binding value: {}", e),
            hint: Some("Binding values must serialize to JSON".into()),
            code: Some(401),
        })?;
        self.values.insert(name.into(), encoded);
        Ok(())
    }

    /// Bind an already-built JSON value.
    pub fn bind_json(&mut self, name: impl Into<String>, value: JsonValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<JsonValue> {
        self.values.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Binding names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl FromIterator<(String, JsonValue)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (String, JsonValue)>>(iter: I) -> Self {
        Bindings {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bind_primitives() {
        let mut bindings = Bindings::new();
        bindings.bind("port", 8080).unwrap();
        bindings.bind("host", "localhost").unwrap();
        bindings.bind("debug", true).unwrap();

        assert_eq!(bindings.get("port"), Some(&json!(8080)));
        assert_eq!(bindings.get("host"), Some(&json!("localhost")));
        assert_eq!(bindings.get("debug"), Some(&json!(true)));
        assert_eq!(bindings.get("missing"), None);
    }

    #[test]
    fn test_bind_recursive_value() {
        #[derive(Serialize)]
        struct Server {
            host: String,
            ports: Vec<u16>,
        }

        let mut bindings = Bindings::new();
        bindings
            .bind(
                "server",
                Server {
                    host: "db1".into(),
                    ports: vec![5432, 5433],
                },
            )
            .unwrap();

        assert_eq!(
            bindings.get("server"),
            Some(&json!({"host": "db1", "ports": [5432, 5433]}))
        );
    }

    #[test]
    fn test_bind_replaces() {
        let mut bindings = Bindings::new();
        bindings.bind("x", 1).unwrap();
        bindings.bind("x", 2).unwrap();
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings.get("x"), Some(&json!(2)));
    }

    #[test]
    fn test_failing_serialize_is_a_render_error() {
        struct Broken;
        impl Serialize for Broken {
            fn serialize<S: serde::Serializer>(&self, _s: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("boom"))
            }
        }

        let mut bindings = Bindings::new();
        let err = bindings.bind("bad", Broken).unwrap_err();
        assert!(matches!(err, SigilError::RenderError { code: Some(401), .. }));
    }

    #[test]
    fn test_names_in_insertion_order() {
        let mut bindings = Bindings::new();
        bindings.bind("b", 1).unwrap();
        bindings.bind("a", 2).unwrap();
        let names: Vec<&str> = bindings.names().collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
