//! Declaration shaper
//!
//! Combines the symbol classification with the resolved arguments and return
//! into the final declaration form, then renders it.

use super::buffer::CodeBuffer;
use super::naming::{classify_symbol, ShapeFlags, SymbolShape};
use crate::core::{FuncDef, NamingConventions};
use crate::errors::SkipReason;
use crate::marshal::{ArgKind, MarshalledArg, ResolvedReturn, ReturnKind};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum DeclKind {
    Free,
    Method { receiver: String },
    Setter { receiver: String },
    Constructor { target: String },
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => write!(f, "function"),
            Self::Method { receiver } => write!(f, "method on {}", receiver),
            Self::Setter { receiver } => write!(f, "setter on {}", receiver),
            Self::Constructor { target } => write!(f, "constructor of {}", target),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Native symbol invoked by the body.
    pub symbol: String,
    pub name: String,
    pub kind: DeclKind,
    pub receiver_var: String,
    pub params: Vec<String>,
    pub setups: Vec<String>,
    pub call_args: Vec<String>,
    pub ret: ResolvedReturn,
}

pub fn shape_declaration(
    func: &FuncDef,
    args: Vec<MarshalledArg>,
    ret: ResolvedReturn,
    conventions: &NamingConventions,
) -> Result<Declaration, SkipReason> {
    if func.struct_setter && args.is_empty() {
        return Err(SkipReason::SetterWithoutReceiver);
    }

    let flags = ShapeFlags {
        struct_setter: func.struct_setter,
        constructor: matches!(ret.kind, ReturnKind::Constructor { .. }),
    };

    let setups = args.iter().filter_map(|a| a.setup.clone()).collect();
    let call_args = args.iter().map(|a| a.call.clone()).collect();

    let (kind, name, params) = match classify_symbol(&func.func_name, flags, conventions) {
        SymbolShape::Rejected(reason) => return Err(reason),

        SymbolShape::Setter { receiver, name } => {
            (DeclKind::Setter { receiver }, name, param_decls(&args))
        }

        SymbolShape::Constructor => match &ret.kind {
            ReturnKind::Constructor { target, name } => {
                (DeclKind::Constructor { target: target.clone() }, name.clone(), param_decls(&args))
            }
            _ => (DeclKind::Free, func.func_name.clone(), param_decls(&args)),
        },

        SymbolShape::Method { name, .. } => match method_receiver(&args, conventions) {
            Some(receiver) => (DeclKind::Method { receiver }, name, param_decls(&args[1..])),
            None => (DeclKind::Free, func.func_name.clone(), param_decls(&args)),
        },

        SymbolShape::Free => (DeclKind::Free, func.func_name.clone(), param_decls(&args)),
    };

    Ok(Declaration {
        symbol: func.func_name.clone(),
        name,
        kind,
        receiver_var: conventions.receiver_name.clone(),
        params,
        setups,
        call_args,
        ret,
    })
}

fn param_decls(args: &[MarshalledArg]) -> Vec<String> {
    args.iter().filter_map(MarshalledArg::param_decl).collect()
}

/// Receiver type when the first parameter is named as the receiver and its
/// emitted type is declared in the generated package. Methods cannot be
/// attached to builtin types.
fn method_receiver(args: &[MarshalledArg], conventions: &NamingConventions) -> Option<String> {
    let first = args.first()?;
    if first.name != conventions.receiver_name {
        return None;
    }
    let go_type = first.go_type.as_ref()?;

    let local = match first.kind {
        ArgKind::GetterStruct | ArgKind::StructPointer | ArgKind::Enum => true,
        ArgKind::Table => conventions.is_value_struct(go_type.trim_start_matches('*')),
        ArgKind::SetterReceiver => false,
    };
    local.then(|| go_type.clone())
}

impl Declaration {
    pub fn render(&self) -> String {
        let receiver = match &self.kind {
            DeclKind::Method { receiver } | DeclKind::Setter { receiver } => {
                format!("({} {}) ", self.receiver_var, receiver)
            }
            DeclKind::Free | DeclKind::Constructor { .. } => String::new(),
        };
        let ret = match self.ret.go_type() {
            "" => String::new(),
            ty => format!(" {}", ty),
        };

        let mut buf = CodeBuffer::new();
        buf.writeln(&format!("func {}{}({}){} {{", receiver, self.name, self.params.join(", "), ret));

        for setup in &self.setups {
            for line in setup.lines() {
                buf.writeln(&format!("\t{}", line));
            }
            buf.blank();
        }

        let call = format!("C.{}({})", self.symbol, self.call_args.join(", "));
        let body = match self.ret.template() {
            Some(template) => template.fill(&call),
            None => call,
        };
        buf.writeln(&format!("\t{}", body));
        buf.writeln("}");

        buf.into_string()
    }
}
