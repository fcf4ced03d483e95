use rustc_hash::FxHashMap;

use crate::value::Value;

/// Variable bindings for one program run.
///
/// The caller owns the environment and may keep it across runs, so a REPL can
/// see the variables assigned by earlier inputs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Env {
    map: FxHashMap<String, Value>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.map.get(name).copied()
    }

    /// Creates the binding, or overwrites it if it already exists.
    pub fn set(&mut self, name: &str, value: Value) {
        match self.map.get_mut(name) {
            Some(entry) => *entry = value,
            None => {
                self.map.insert(name.to_string(), value);
            }
        }
    }
}

impl<S: Into<String>> FromIterator<(S, Value)> for Env {
    fn from_iter<I: IntoIterator<Item = (S, Value)>>(iter: I) -> Self {
        Self { map: iter.into_iter().map(|(name, value)| (name.into(), value)).collect() }
    }
}
