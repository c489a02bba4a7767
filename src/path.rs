//! Dotted paths into nested JSON values.
//!
//! A path such as `user.addresses.[0].city` is split on `.`; segments of
//! the form `[<digits>]` address sequence elements, every other segment
//! is a mapping key.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde_json::{Map, Value};

use crate::errors::{FilterError, Result};
use crate::parser::{ParseError, Parser};

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathKey {
    Key(String),  // field
    Index(usize), // [0]
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKey::Key(k) => f.write_str(k),
            PathKey::Index(i) => write!(f, "[{i}]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    pub keys: Vec<PathKey>,
}

impl Path {
    pub fn new(keys: Vec<PathKey>) -> Self {
        Self { keys }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn not_found(&self) -> FilterError {
        FilterError::PathNotFound {
            path: self.to_string(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keys.iter().join("."))
    }
}

impl FromStr for Path {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        parse_path(s)
    }
}

impl From<Vec<PathKey>> for Path {
    fn from(keys: Vec<PathKey>) -> Self {
        Self { keys }
    }
}

/// Containers a [`PathKey`] can step into. Only mappings and sequences
/// implement this; scalars have no children.
pub trait Indexable {
    fn child(&self, key: &PathKey) -> Option<&Value>;
    fn child_mut(&mut self, key: &PathKey) -> Option<&mut Value>;
    /// Returns false when the key cannot be set on this container.
    fn set_child(&mut self, key: &PathKey, value: Value) -> bool;
}

impl Indexable for Map<String, Value> {
    fn child(&self, key: &PathKey) -> Option<&Value> {
        match key {
            PathKey::Key(k) => self.get(k),
            PathKey::Index(_) => None,
        }
    }

    fn child_mut(&mut self, key: &PathKey) -> Option<&mut Value> {
        match key {
            PathKey::Key(k) => self.get_mut(k),
            PathKey::Index(_) => None,
        }
    }

    fn set_child(&mut self, key: &PathKey, value: Value) -> bool {
        match key {
            PathKey::Key(k) => {
                self.insert(k.clone(), value);
                true
            }
            PathKey::Index(_) => false,
        }
    }
}

impl Indexable for Vec<Value> {
    fn child(&self, key: &PathKey) -> Option<&Value> {
        match key {
            PathKey::Index(i) => self.get(*i),
            PathKey::Key(_) => None,
        }
    }

    fn child_mut(&mut self, key: &PathKey) -> Option<&mut Value> {
        match key {
            PathKey::Index(i) => self.get_mut(*i),
            PathKey::Key(_) => None,
        }
    }

    fn set_child(&mut self, key: &PathKey, value: Value) -> bool {
        match key {
            PathKey::Index(i) => match self.get_mut(*i) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => false,
            },
            PathKey::Key(_) => false,
        }
    }
}

pub fn as_indexable(value: &Value) -> Option<&dyn Indexable> {
    match value {
        Value::Object(map) => Some(map as &dyn Indexable),
        Value::Array(arr) => Some(arr as &dyn Indexable),
        _ => None,
    }
}

pub fn as_indexable_mut(value: &mut Value) -> Option<&mut dyn Indexable> {
    match value {
        Value::Object(map) => Some(map as &mut dyn Indexable),
        Value::Array(arr) => Some(arr as &mut dyn Indexable),
        _ => None,
    }
}

/// Parse a dotted path. Only `[<digits>]` is accepted inside brackets.
pub fn parse_path(input: &str) -> Result<Path> {
    let keys = input
        .split('.')
        .map(|segment| parse_segment(segment).map_err(|e| malformed(input, segment, e)))
        .collect::<Result<Vec<_>>>()?;
    Ok(Path { keys })
}

fn parse_segment(segment: &str) -> std::result::Result<PathKey, ParseError> {
    let mut p = Parser::new(segment);
    if !p.consume_char('[') {
        return Ok(PathKey::Key(segment.to_string()));
    }
    let inner = p.capture_until(']')?;
    p.expect(']')?;
    if !p.eof() {
        return Err(ParseError::InvalidSyntax("trailing input after ']'".into()));
    }
    let mut digits = Parser::new(inner);
    let idx = digits.parse_index()?;
    if !digits.eof() {
        return Err(ParseError::InvalidSyntax("index must be digits only".into()));
    }
    Ok(PathKey::Index(idx))
}

fn malformed(path: &str, segment: &str, err: ParseError) -> FilterError {
    FilterError::MalformedPath {
        path: path.to_string(),
        segment: segment.to_string(),
        reason: err.to_string(),
    }
}

/// Value at `path`, or `PathNotFound` when any step is missing or mistyped.
pub fn resolve<'a>(value: &'a Value, path: &Path) -> Result<&'a Value> {
    walk(value, &path.keys).ok_or_else(|| path.not_found())
}

pub fn resolve_mut<'a>(value: &'a mut Value, path: &Path) -> Result<&'a mut Value> {
    walk_mut(value, &path.keys).ok_or_else(|| path.not_found())
}

pub fn exists(value: &Value, path: &Path) -> bool {
    walk(value, &path.keys).is_some()
}

/// Set the value at `path`. The parent must already exist; a mapping
/// parent gains or overwrites the key, a sequence parent must hold the index.
pub fn assign(value: &mut Value, path: &Path, new_value: Value) -> Result<()> {
    let (last, parents) = path.keys.split_last().ok_or_else(|| path.not_found())?;
    let container = walk_mut(value, parents)
        .and_then(as_indexable_mut)
        .ok_or_else(|| path.not_found())?;
    if container.set_child(last, new_value) {
        Ok(())
    } else {
        Err(path.not_found())
    }
}

fn walk<'a>(value: &'a Value, keys: &[PathKey]) -> Option<&'a Value> {
    keys.iter()
        .try_fold(value, |current, key| as_indexable(current)?.child(key))
}

fn walk_mut<'a>(value: &'a mut Value, keys: &[PathKey]) -> Option<&'a mut Value> {
    keys.iter()
        .try_fold(value, |current, key| as_indexable_mut(current)?.child_mut(key))
}
