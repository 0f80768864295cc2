//! JSON-backed configuration document
//!
//! A [`ConfigDocument`] is a string-keyed map of JSON values that can be
//! loaded from and saved to a file. Object-valued entries can be addressed
//! with dotted paths (`"server.port"`).

use crate::document::error::{DocumentError, DocumentResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Number, Value};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Key/value configuration document with optional file backing
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use utilkit::document::ConfigDocument;
///
/// let mut config = ConfigDocument::in_memory();
/// config.set("server", json!({ "port": 8080 })).unwrap();
///
/// assert!(config.contains("server"));
/// assert_eq!(config.get_path("server.port"), Some(&json!(8080)));
/// assert_eq!(config.get_or("missing", json!("fallback")), json!("fallback"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    path: Option<PathBuf>,
    data: Map<String, Value>,
}

impl ConfigDocument {
    /// Create a document that lives only in memory
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a file-backed document
    ///
    /// When `path` does not exist it is created (with parent directories)
    /// holding `defaults`. The file is then loaded, its keys taking
    /// precedence over `defaults`.
    pub fn open(path: impl Into<PathBuf>, defaults: Map<String, Value>) -> DocumentResult<Self> {
        let mut document = Self {
            path: Some(path.into()),
            data: defaults,
        };

        if let Some(path) = &document.path {
            if !path.is_file() {
                log::debug!("Creating config file {} from defaults", path.display());
                document.save()?;
            }
        }

        document.load()?;
        Ok(document)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Re-read the backing file, overlaying its keys onto the current data
    ///
    /// An in-memory document has nothing to load and is left unchanged.
    pub fn load(&mut self) -> DocumentResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let contents = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.clone(),
            source,
        })?;
        let parsed: Value =
            serde_json::from_str(&contents).map_err(|source| DocumentError::Parse {
                path: path.clone(),
                source,
            })?;

        match parsed {
            Value::Object(map) => {
                log::debug!("Loaded {} keys from {}", map.len(), path.display());
                self.data.extend(map);
                Ok(())
            }
            _ => Err(DocumentError::RootNotAnObject { path: path.clone() }),
        }
    }

    /// Write the document as sorted, 4-space indented JSON
    pub fn save(&self) -> DocumentResult<()> {
        let path = self.path.as_ref().ok_or(DocumentError::NoBackingFile)?;
        let io_error = |source: std::io::Error| DocumentError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let file = fs::File::create(path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
        self.data
            .serialize(&mut serializer)
            .map_err(|e| io_error(e.into()))?;
        writer.write_all(b"\n").map_err(io_error)?;
        writer.flush().map_err(io_error)?;

        log::debug!("Saved {} keys to {}", self.data.len(), path.display());
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Value for `key`, or `default` when the key is absent
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.data.get(key).cloned().unwrap_or(default)
    }

    /// Deserialize the value at `key` into `T`
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> DocumentResult<Option<T>> {
        self.get_path(key)
            .map(|value| {
                T::deserialize(value).map_err(|source| DocumentError::Conversion {
                    key: key.to_string(),
                    source,
                })
            })
            .transpose()
    }

    /// Value for `key`, storing `default` first when the key is absent
    pub fn get_or_set(&mut self, key: &str, default: Value) -> Value {
        self.data.entry(key.to_string()).or_insert(default).clone()
    }

    pub fn set<V: Serialize>(&mut self, key: &str, value: V) -> DocumentResult<()> {
        let value = to_json(key, value)?;
        self.data.insert(key.to_string(), value);
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Look up a dotted path through object-valued entries
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        segments.try_fold(self.data.get(first)?, |value, segment| {
            value.as_object()?.get(segment)
        })
    }

    /// Store a value at a dotted path, creating intermediate objects
    ///
    /// Fails with [`DocumentError::NotAnObject`] when an intermediate key
    /// already holds a non-object value.
    pub fn set_path<V: Serialize>(&mut self, path: &str, value: V) -> DocumentResult<()> {
        let value = to_json(path, value)?;
        let (parents, leaf) = match path.rsplit_once('.') {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, path),
        };

        let mut current = &mut self.data;
        let mut walked = String::new();
        for segment in parents.into_iter().flat_map(|p| p.split('.')) {
            if !walked.is_empty() {
                walked.push('.');
            }
            walked.push_str(segment);

            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            current = match entry {
                Value::Object(map) => map,
                _ => return Err(DocumentError::NotAnObject { key: walked }),
            };
        }

        current.insert(leaf.to_string(), value);
        Ok(())
    }
}

fn to_json<V: Serialize>(key: &str, value: V) -> DocumentResult<Value> {
    serde_json::to_value(value).map_err(|source| DocumentError::Conversion {
        key: key.to_string(),
        source,
    })
}

/// Parse `key=value` arguments into typed JSON values
///
/// Values become booleans (`true`/`false`, any case), integers (all ASCII
/// digits), floats (digits with one `.`, or digits too large for `u64`) or
/// strings. An argument without
/// `=` is a flag and maps to `true`.
pub fn parse_assignments<I, S>(args: I) -> Map<String, Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .map(|arg| {
            let arg = arg.as_ref();
            match arg.split_once('=') {
                Some((key, value)) => (key.to_string(), infer_value(value)),
                None => (arg.to_string(), Value::Bool(true)),
            }
        })
        .collect()
}

fn infer_value(raw: &str) -> Value {
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    if is_digits(raw) {
        if let Ok(n) = raw.parse::<u64>() {
            return Value::Number(n.into());
        }
    }
    // integers past u64::MAX stay numeric as floats
    if is_digits(&raw.replacen('.', "", 1)) {
        if let Some(n) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(n);
        }
    }

    Value::String(raw.to_string())
}
