use serde::{Deserialize, Serialize};

/// Go reserved words; a parameter carrying one of these names gets
/// `keyword_suffix` appended.
const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else",
    "fallthrough", "for", "func", "go", "goto", "if", "import", "interface",
    "map", "package", "range", "return", "select", "struct", "switch", "type",
    "var",
];

/// Naming conventions of the wrapped C API.
///
/// The shaping heuristics (receiver/method split, setter filter, constructor
/// target guessing) all read from here rather than from inline literals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConventions {
    /// Splits `Type_Method` symbols.
    #[serde(default = "default_separator")]
    pub separator: String,

    #[serde(default = "default_setter_prefix")]
    pub setter_prefix: String,

    /// Parameter name that marks the receiver of a method.
    #[serde(default = "default_receiver_name")]
    pub receiver_name: String,

    /// Structs whose name lacks this prefix are ignored entirely.
    #[serde(default = "default_struct_prefix")]
    pub struct_prefix: String,

    #[serde(default = "default_enum_marker_suffix")]
    pub enum_marker_suffix: String,

    /// Tried in order when guessing a constructor's target struct.
    #[serde(default = "default_constructor_prefixes")]
    pub constructor_prefixes: Vec<String>,

    #[serde(default = "default_constructor_name_prefix")]
    pub constructor_name_prefix: String,

    /// Small aggregates mirrored by value instead of wrapped as handles.
    #[serde(default = "default_value_structs")]
    pub value_structs: Vec<String>,

    /// Symbol prefixes never turned into methods or setters.
    #[serde(default = "default_method_skip_list")]
    pub method_skip_list: Vec<String>,

    #[serde(default = "default_keyword_suffix")]
    pub keyword_suffix: String,
}

impl Default for NamingConventions {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            setter_prefix: default_setter_prefix(),
            receiver_name: default_receiver_name(),
            struct_prefix: default_struct_prefix(),
            enum_marker_suffix: default_enum_marker_suffix(),
            constructor_prefixes: default_constructor_prefixes(),
            constructor_name_prefix: default_constructor_name_prefix(),
            value_structs: default_value_structs(),
            method_skip_list: default_method_skip_list(),
            keyword_suffix: default_keyword_suffix(),
        }
    }
}

fn default_separator() -> String { "_".to_string() }
fn default_setter_prefix() -> String { "Set".to_string() }
fn default_receiver_name() -> String { "self".to_string() }
fn default_struct_prefix() -> String { "Im".to_string() }
fn default_enum_marker_suffix() -> String { "_".to_string() }
fn default_constructor_name_prefix() -> String { "New".to_string() }
fn default_keyword_suffix() -> String { "Arg".to_string() }

fn default_constructor_prefixes() -> Vec<String> {
    vec!["Im".to_string(), "ImGui".to_string()]
}

fn default_value_structs() -> Vec<String> {
    ["ImVec1", "ImVec2ih", "ImVec2", "ImVec4", "ImRect", "ImColor"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_method_skip_list() -> Vec<String> {
    [
        "ImVec1", "ImVec2", "ImVec2ih", "ImVec4", "ImColor", "ImRect",
        "StbUndoRecord", "StbUndoState", "StbTexteditRow",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl NamingConventions {
    pub fn is_value_struct(&self, name: &str) -> bool {
        self.value_structs.iter().any(|s| s == name)
    }

    pub fn is_skipped_receiver(&self, prefix: &str) -> bool {
        self.method_skip_list.iter().any(|s| s == prefix)
    }

    /// Display name of an enum: the trailing marker is dropped when present.
    pub fn enum_display_name<'a>(&self, raw: &'a str) -> &'a str {
        if self.enum_marker_suffix.is_empty() {
            return raw;
        }
        raw.strip_suffix(self.enum_marker_suffix.as_str()).unwrap_or(raw)
    }

    /// Parameter name safe to emit; reserved words get the keyword suffix.
    pub fn param_name(&self, raw: &str) -> String {
        if GO_KEYWORDS.contains(&raw) {
            format!("{}{}", raw, self.keyword_suffix)
        } else {
            raw.to_string()
        }
    }

    /// `Type_Method` → `("Type", "Method")`. Both halves must be non-empty.
    pub fn split_symbol<'a>(&self, symbol: &'a str) -> Option<(&'a str, &'a str)> {
        if self.separator.is_empty() {
            return None;
        }
        let (prefix, rest) = symbol.split_once(self.separator.as_str())?;
        if prefix.is_empty() || rest.is_empty() {
            return None;
        }
        Some((prefix, rest))
    }

    /// Leading segment of a symbol (the whole symbol when there is no separator).
    pub fn leading_segment<'a>(&self, symbol: &'a str) -> &'a str {
        if self.separator.is_empty() {
            return symbol;
        }
        symbol.split(self.separator.as_str()).next().unwrap_or(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_display_name() {
        let conv = NamingConventions::default();
        assert_eq!(conv.enum_display_name("ImGuiWindowFlags_"), "ImGuiWindowFlags");
        assert_eq!(conv.enum_display_name("ImGuiDir"), "ImGuiDir");
    }

    #[test]
    fn test_param_name_escapes_keywords() {
        let conv = NamingConventions::default();
        assert_eq!(conv.param_name("type"), "typeArg");
        assert_eq!(conv.param_name("range"), "rangeArg");
        assert_eq!(conv.param_name("label"), "label");
    }

    #[test]
    fn test_split_symbol() {
        let conv = NamingConventions::default();
        assert_eq!(conv.split_symbol("ImDrawList_AddLine"), Some(("ImDrawList", "AddLine")));
        assert_eq!(conv.split_symbol("ImGuiIO_Set_Thing"), Some(("ImGuiIO", "Set_Thing")));
        assert_eq!(conv.split_symbol("igBegin"), None);
        assert_eq!(conv.split_symbol("_Leading"), None);
        assert_eq!(conv.split_symbol("Trailing_"), None);
    }

    #[test]
    fn test_parse_partial_toml_keeps_defaults() {
        let conv: NamingConventions = toml::from_str(r#"setter_prefix = "Put""#).unwrap();
        assert_eq!(conv.setter_prefix, "Put");
        assert_eq!(conv.separator, "_");
        assert!(conv.is_value_struct("ImVec2"));
    }
}
