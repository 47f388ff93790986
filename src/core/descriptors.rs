//! API description records produced by the upstream header parser.
//!
//! These are read-only snapshots: the generator never mutates them after
//! they are loaded.

use serde::{Deserialize, Serialize};

/// A single enumerator: `(valueName, integerValue)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDescriptor {
    pub name: String,
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

impl EnumDescriptor {
    pub fn new(name: impl Into<String>, values: &[(&str, i64)]) -> Self {
        Self {
            name: name.into(),
            values: values
                .iter()
                .map(|(n, v)| EnumValue { name: n.to_string(), value: *v })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDescriptor {
    pub name: String,
}

impl StructDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A native argument. `ty` is the raw type string, qualifiers included
/// (`"const char*"`, `"float[3]"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl ArgDef {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self { name: name.into(), ty: ty.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuncDef {
    pub func_name: String,
    #[serde(default, alias = "argsT")]
    pub args: Vec<ArgDef>,
    /// Empty when the descriptor omits it, as constructors do. Only the
    /// literal `void` is void.
    #[serde(default)]
    pub ret: String,
    #[serde(default)]
    pub struct_setter: bool,
    #[serde(default)]
    pub struct_getter: bool,
    #[serde(default)]
    pub constructor: bool,
}

impl FuncDef {
    pub fn new(func_name: impl Into<String>, args: Vec<ArgDef>, ret: impl Into<String>) -> Self {
        Self {
            func_name: func_name.into(),
            args,
            ret: ret.into(),
            struct_setter: false,
            struct_getter: false,
            constructor: false,
        }
    }

    pub fn setter(mut self) -> Self {
        self.struct_setter = true;
        self
    }

    pub fn getter(mut self) -> Self {
        self.struct_getter = true;
        self
    }

    pub fn constructor(mut self) -> Self {
        self.constructor = true;
        self
    }

    pub fn returns_void(&self) -> bool {
        self.ret.trim() == "void"
    }
}

/// Everything one generation run consumes, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDescription {
    #[serde(default)]
    pub enums: Vec<EnumDescriptor>,
    #[serde(default)]
    pub structs: Vec<StructDescriptor>,
    #[serde(default)]
    pub funcs: Vec<FuncDef>,
}

impl ApiDescription {
    /// Distinct raw argument type strings, in first-seen order.
    pub fn arg_vocabulary(&self) -> Vec<&str> {
        dedup_in_order(self.funcs.iter().flat_map(|f| f.args.iter().map(|a| a.ty.as_str())))
    }

    /// Distinct raw non-void return type strings, in first-seen order.
    /// Constructors are left out; their result type comes from the symbol.
    pub fn return_vocabulary(&self) -> Vec<&str> {
        dedup_in_order(
            self.funcs
                .iter()
                .filter(|f| !f.returns_void() && !f.constructor)
                .map(|f| f.ret.as_str()),
        )
    }
}

fn dedup_in_order<'a>(types: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = std::collections::HashSet::new();
    types.filter(|ty| seen.insert(*ty)).collect()
}
