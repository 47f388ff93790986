//! Symbol classification
//!
//! Recovers the declaration form of a native symbol from its spelling alone.
//! Whether a method candidate actually becomes a method also depends on its
//! first parameter, which the shaper checks.

use crate::core::NamingConventions;
use crate::errors::SkipReason;

/// Flags that influence classification, taken from the descriptor and from
/// return resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeFlags {
    pub struct_setter: bool,
    /// Return resolution settled on a constructor target.
    pub constructor: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolShape {
    Free,
    Method { receiver: String, name: String },
    Setter { receiver: String, name: String },
    /// Name and target come from return resolution.
    Constructor,
    Rejected(SkipReason),
}

pub fn classify_symbol(symbol: &str, flags: ShapeFlags, conventions: &NamingConventions) -> SymbolShape {
    if flags.constructor {
        return SymbolShape::Constructor;
    }

    let split = conventions
        .split_symbol(symbol)
        .filter(|(prefix, _)| !conventions.is_skipped_receiver(prefix));

    if flags.struct_setter {
        return match split {
            Some((receiver, name)) if name.starts_with(conventions.setter_prefix.as_str()) => {
                SymbolShape::Setter { receiver: receiver.to_string(), name: name.to_string() }
            }
            _ => SymbolShape::Rejected(SkipReason::SetterNameFiltered),
        };
    }

    match split {
        Some((receiver, name)) => {
            SymbolShape::Method { receiver: receiver.to_string(), name: name.to_string() }
        }
        None => SymbolShape::Free,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(symbol: &str, flags: ShapeFlags) -> SymbolShape {
        classify_symbol(symbol, flags, &NamingConventions::default())
    }

    #[test]
    fn test_free_without_separator() {
        assert_eq!(classify("igBegin", ShapeFlags::default()), SymbolShape::Free);
    }

    #[test]
    fn test_method_split_on_first_separator() {
        assert_eq!(
            classify("ImDrawList_AddLine_Ex", ShapeFlags::default()),
            SymbolShape::Method { receiver: "ImDrawList".into(), name: "AddLine_Ex".into() }
        );
    }

    #[test]
    fn test_skip_list_blocks_methods() {
        assert_eq!(classify("ImVec2_Length", ShapeFlags::default()), SymbolShape::Free);
        assert_eq!(classify("StbUndoState_Clear", ShapeFlags::default()), SymbolShape::Free);
    }

    #[test]
    fn test_setter_requires_prefix() {
        let setter = ShapeFlags { struct_setter: true, ..Default::default() };

        assert_eq!(
            classify("Window_SetTitle", setter),
            SymbolShape::Setter { receiver: "Window".into(), name: "SetTitle".into() }
        );
        assert_eq!(
            classify("Window_Title", setter),
            SymbolShape::Rejected(SkipReason::SetterNameFiltered)
        );
        assert_eq!(
            classify("SetTitle", setter),
            SymbolShape::Rejected(SkipReason::SetterNameFiltered)
        );
        assert_eq!(
            classify("ImRect_SetMin", setter),
            SymbolShape::Rejected(SkipReason::SetterNameFiltered)
        );
    }

    #[test]
    fn test_constructor_flag_wins() {
        let ctor = ShapeFlags { constructor: true, struct_setter: true };
        assert_eq!(classify("DrawList_DrawList", ctor), SymbolShape::Constructor);
    }

    #[test]
    fn test_custom_conventions() {
        let conventions = NamingConventions {
            separator: "::".into(),
            setter_prefix: "Put".into(),
            ..Default::default()
        };
        let setter = ShapeFlags { struct_setter: true, ..Default::default() };

        assert_eq!(
            classify_symbol("Canvas::PutColor", setter, &conventions),
            SymbolShape::Setter { receiver: "Canvas".into(), name: "PutColor".into() }
        );
        assert_eq!(classify_symbol("Canvas_Draw", ShapeFlags::default(), &conventions), SymbolShape::Free);
    }
}
