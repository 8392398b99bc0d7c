//! Accumulates parsed values at nested paths.

use laml_proto::{Map, Value};

/// Builds a value tree from writes at arbitrary paths.
///
/// Intermediate objects are created on demand. Writing an object onto an
/// existing object merges the two, so a deep path can be set before or
/// after its ancestor without losing either write. Any other write to an
/// existing path replaces it (last write wins).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOutput {
    root: Value,
}

impl Default for ParserOutput {
    fn default() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }
}

impl ParserOutput {
    /// Creates an accumulator holding an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `value` at `path`; the empty path addresses the root.
    pub fn set<S: AsRef<str>>(&mut self, path: &[S], value: Value) {
        let Some((last, parents)) = path.split_last() else {
            merge(&mut self.root, value);
            return;
        };

        let mut map = object_mut(&mut self.root);
        for key in parents {
            map = map.object_entry(key.as_ref());
        }

        match map.get_mut(last.as_ref()) {
            Some(existing) => merge(existing, value),
            None => {
                map.insert(last.as_ref(), value);
            }
        }
    }

    /// Returns the value stored at `path`, if any.
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&Value> {
        path.iter()
            .try_fold(&self.root, |value, key| value.get(key.as_ref()))
    }

    /// Consumes the accumulator and returns the finished tree.
    pub fn result(self) -> Value {
        self.root
    }
}

fn object_mut(value: &mut Value) -> &mut Map {
    if !matches!(value, Value::Object(_)) {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}

fn merge(slot: &mut Value, value: Value) {
    match (slot, value) {
        (Value::Object(existing), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match existing.get_mut(&key) {
                    Some(child) => merge(child, value),
                    None => {
                        existing.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::from(s)
    }

    #[test]
    fn test_sibling_then_nested() {
        let mut output = ParserOutput::new();
        output.set(&["A"], text("1"));
        output.set(&["B", "c"], text("2"));

        let value = output.result();
        let root = value.as_object().unwrap();
        assert_eq!(root.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(value.text_at(&["A"]), Some("1"));
        assert_eq!(value.text_at(&["B", "c"]), Some("2"));
    }

    #[test]
    fn test_nested_without_parent_has_same_shape() {
        let mut implicit = ParserOutput::new();
        implicit.set(&["B", "c"], text("2"));

        let mut explicit = ParserOutput::new();
        explicit.set(&["B"], Value::Object(Map::new()));
        explicit.set(&["B", "c"], text("2"));

        assert_eq!(implicit.result(), explicit.result());
    }

    #[test]
    fn test_parent_set_after_child_keeps_child() {
        let mut output = ParserOutput::new();
        output.set(&["B", "c"], text("2"));
        output.set(&["B"], Value::Object(Map::new()));
        output.set(&["B", "d"], text("3"));

        let value = output.result();
        assert_eq!(value.text_at(&["B", "c"]), Some("2"));
        assert_eq!(value.text_at(&["B", "d"]), Some("3"));
    }

    #[test]
    fn test_same_path_last_write_wins() {
        let mut output = ParserOutput::new();
        output.set(&["A"], text("first"));
        output.set(&["B"], text("other"));
        output.set(&["A"], text("second"));

        let value = output.result();
        assert_eq!(value.text_at(&["A"]), Some("second"));
        let keys: Vec<_> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["A", "B"]);
    }

    #[test]
    fn test_deep_paths_are_independent() {
        let mut output = ParserOutput::new();
        output.set(&["X", "Y", "Z"], text("deep"));
        output.set(&["X", "W"], Value::List(vec!["a".into(), "b".into()]));

        assert_eq!(output.get(&["X", "Y", "Z"]), Some(&text("deep")));
        let value = output.result();
        let x = value.get("X").and_then(Value::as_object).unwrap();
        assert_eq!(x.keys().collect::<Vec<_>>(), vec!["Y", "W"]);
    }

    #[test]
    fn test_empty_path_merges_into_root() {
        let mut output = ParserOutput::new();
        output.set(&["A"], text("1"));
        let incoming: Map = [("B", text("2"))].into_iter().collect();
        output.set::<&str>(&[], Value::Object(incoming));

        let value = output.result();
        assert_eq!(value.text_at(&["A"]), Some("1"));
        assert_eq!(value.text_at(&["B"]), Some("2"));
    }
}
