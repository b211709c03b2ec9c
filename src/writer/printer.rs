//! Line-oriented YAML text builder.

use std::fmt::Write as _;

use serde_yaml::Value;

use crate::yaml::scalar_string;

/// Accumulates YAML lines at a current indentation column.
///
/// Every `print_*` call writes zero or more complete lines; absent or empty
/// values write nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Printer {
    indent: usize,
    step: usize,
    buf: String,
}

impl Printer {
    pub fn new(indent: usize, step: usize) -> Self {
        Self {
            indent,
            step,
            buf: String::new(),
        }
    }

    pub fn indent_level(&self) -> usize {
        self.indent
    }

    /// Shift the indentation by `steps` indentation steps (may be negative).
    pub fn indent(mut self, steps: isize) -> Self {
        let delta = steps.unsigned_abs() * self.step;
        self.indent = if steps < 0 {
            self.indent.saturating_sub(delta)
        } else {
            self.indent + delta
        };
        self
    }

    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        let _ = writeln!(self.buf, "{:indent$}{}", "", text, indent = self.indent);
    }

    /// `key: value`, omitted when `value` is `None` or empty.
    pub fn print_key_value(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.line(format_args!("{key}: {}", quote(value)));
        }
        self
    }

    /// `key: value` for any displayable value.
    pub fn print_key_display<T: std::fmt::Display>(self, key: &str, value: Option<T>) -> Self {
        let rendered = value.map(|v| v.to_string());
        self.print_key_value(key, rendered.as_deref())
    }

    /// `key: [a, b]`, omitted when the list is empty.
    pub fn print_key_list<T: std::fmt::Display>(mut self, key: &str, values: &[T]) -> Self {
        if !values.is_empty() {
            let items: Vec<String> = values.iter().map(|v| quote(&v.to_string())).collect();
            self.line(format_args!("{key}: [{}]", items.join(", ")));
        }
        self
    }

    /// A YAML value under `key`: scalars and sequences inline, mappings as an
    /// indented block. `null` is omitted.
    pub fn print_key_object(mut self, key: &str, value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => {}
            Some(Value::Mapping(map)) if !map.is_empty() => {
                self = self.print_key(key).indent(1);
                for (k, v) in map {
                    let k = scalar_string(k).unwrap_or_default();
                    self = self.print_key_object(&k, Some(v));
                }
                self = self.indent(-1);
            }
            Some(Value::Tagged(tagged)) => {
                let inner = flow(&tagged.value);
                self.line(format_args!("{key}: {} {inner}", tagged.tag));
            }
            Some(other) => {
                self.line(format_args!("{key}: {}", flow(other)));
            }
        }
        self
    }

    /// `key:` opening a nested block.
    pub fn print_key(mut self, key: &str) -> Self {
        self.line(format_args!("{key}:"));
        self
    }

    /// `- key:` opening an item of a list of single-key maps.
    pub fn print_list_key(mut self, key: &str) -> Self {
        self.line(format_args!("- {key}:"));
        self
    }

    pub fn print_new_line(mut self) -> Self {
        self.buf.push('\n');
        self
    }

    /// Append everything another printer has written.
    pub fn print(mut self, other: Printer) -> Self {
        self.buf.push_str(&other.buf);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Render a value in YAML flow style: `[a, b]`, `{k: v}` or a scalar.
pub fn flow(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => quote(s),
        Value::Sequence(items) => {
            let items: Vec<String> = items.iter().map(flow).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Mapping(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", flow(k), flow(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, flow(&tagged.value)),
        Value::Bool(_) | Value::Number(_) => scalar_string(value).unwrap_or_default(),
    }
}

/// Quote a string scalar when it would not read back as the same plain
/// string. Line breaks and other control characters need the escapes of a
/// double-quoted scalar; everything else is single-quoted.
pub fn quote(value: &str) -> String {
    if value.chars().any(char::is_control) {
        double_quote(value)
    } else if needs_quotes(value) {
        format!("'{}'", value.replace('\'', "''"))
    } else {
        value.to_string()
    }
}

fn double_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn needs_quotes(value: &str) -> bool {
    if value.is_empty() || value.trim() != value {
        return true;
    }
    if matches!(
        value.to_ascii_lowercase().as_str(),
        "null" | "~" | "true" | "false" | "yes" | "no" | "on" | "off"
    ) {
        return true;
    }
    if value.parse::<f64>().is_ok() {
        return true;
    }
    let first = value.chars().next().unwrap_or(' ');
    if "-?:,[]{}#&*!|>'\"%@`".contains(first) {
        // `- ` and `? ` start block structures; a lone dash in a word is fine.
        let plain_dash = first == '-' && value.len() > 1 && !value.starts_with("- ");
        if !plain_dash {
            return true;
        }
    }
    value.contains(": ") || value.contains(" #") || value.ends_with(':')
}
