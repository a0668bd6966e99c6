//! Compact single-line rendering of label and annotation values.
//!
//! Mappings render as `{key:value,...}`, sequences as `[a,b]` and strings are
//! single-quoted with embedded quotes escaped (`'it\'s'`). Other scalars use
//! their JSON spelling: `true`, `false`, `null`. Numbers keep the exact text
//! they had in the request body (`42`, `-7`, `1.5`, `18446744073709551616`),
//! so integers beyond 64 bits are not rounded through `f64`.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    legacy_marker: bool,
}

impl Renderer {
    /// Create a renderer. With `legacy_marker` every string is prefixed with `u` (`u'x'`).
    pub fn new(legacy_marker: bool) -> Self {
        Self { legacy_marker }
    }

    /// Render any value on a single line
    pub fn render(&self, value: &Value) -> String {
        let mut out = String::new();
        self.write_value(&mut out, value);
        out
    }

    /// Render a mapping on a single line
    pub fn render_map(&self, map: &Map<String, Value>) -> String {
        let mut out = String::new();
        self.write_map(&mut out, map);
        out
    }

    fn write_value(&self, out: &mut String, value: &Value) {
        match value {
            Value::Object(map) => self.write_map(out, map),
            Value::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    self.write_value(out, item);
                }
                out.push(']');
            }
            Value::String(s) => self.write_str(out, s),
            Value::Number(n) => out.push_str(&n.to_string()),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Null => out.push_str("null"),
        }
    }

    fn write_map(&self, out: &mut String, map: &Map<String, Value>) {
        out.push('{');
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.write_str(out, key);
            out.push(':');
            self.write_value(out, value);
        }
        out.push('}');
    }

    fn write_str(&self, out: &mut String, s: &str) {
        if self.legacy_marker {
            out.push('u');
        }
        out.push('\'');
        out.push_str(&s.replace('\'', "\\'"));
        out.push('\'');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: Value) -> String {
        Renderer::default().render(&value)
    }

    #[test]
    fn nested_structures() {
        assert_eq!(
            render(json!({"a": {"b": ["c", "d"]}})),
            "{'a':{'b':['c','d']}}"
        );
        assert_eq!(
            render(json!([[1, [2, [3]]], {"x": {"y": {"z": []}}}])),
            "[[1,[2,[3]]],{'x':{'y':{'z':[]}}}]"
        );
    }

    #[test]
    fn empty_collections() {
        assert_eq!(render(json!({})), "{}");
        assert_eq!(render(json!([])), "[]");
        assert_eq!(render(json!("")), "''");
    }

    #[test]
    fn scalars() {
        assert_eq!(render(json!(true)), "true");
        assert_eq!(render(json!(false)), "false");
        assert_eq!(render(json!(null)), "null");
        assert_eq!(render(json!(42)), "42");
        assert_eq!(render(json!(-7)), "-7");
        assert_eq!(render(json!(1.5)), "1.5");
    }

    #[test]
    fn large_numbers_are_exact() {
        let value: Value =
            serde_json::from_str(r#"[18446744073709551616,-99999999999999999999,0.1]"#).unwrap();

        assert_eq!(
            render(value),
            "[18446744073709551616,-99999999999999999999,0.1]"
        );
    }

    #[test]
    fn escapes_single_quotes() {
        assert_eq!(render(json!("it's")), r"'it\'s'");
        assert_eq!(render(json!("''")), r"'\'\''");
        assert_eq!(render(json!({"o'k": "v"})), r"{'o\'k':'v'}");
    }

    #[test]
    fn leaves_other_characters_alone() {
        assert_eq!(render(json!("a \"b\" \\ c\nd")), "'a \"b\" \\ c\nd'");
    }

    #[test]
    fn keeps_key_order() {
        let value: Value = serde_json::from_str(r#"{"zeta":1,"alpha":2,"mid":3}"#).unwrap();

        assert_eq!(render(value), "{'zeta':1,'alpha':2,'mid':3}");
    }

    #[test]
    fn deterministic() {
        let value = json!({"b": [1, "x", null], "a": {"c": true}});
        let renderer = Renderer::default();

        assert_eq!(renderer.render(&value), renderer.render(&value));
    }

    #[test]
    fn legacy_marker() {
        let renderer = Renderer::new(true);

        assert_eq!(
            renderer.render(&json!({"a": ["b", 1, "it's"]})),
            r"{u'a':[u'b',1,u'it\'s']}"
        );
    }

    #[test]
    fn render_map_matches_render() {
        let value = json!({"severity": "high", "team": ["a", "b"]});
        let renderer = Renderer::default();

        assert_eq!(
            renderer.render_map(value.as_object().unwrap()),
            renderer.render(&value)
        );
    }
}
