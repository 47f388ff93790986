//! Type registry
//!
//! Membership sets derived once from the struct and enum descriptors and
//! read-only afterwards. Every marshalling stage queries it.

use crate::core::conventions::NamingConventions;
use crate::core::descriptors::{EnumDescriptor, StructDescriptor};
use std::collections::HashSet;

/// Category a struct falls into at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructCategory {
    /// Mirrored by value; converted with the hand-maintained value conversions.
    Value,
    /// Wrapped as an integer-sized, non-owning token.
    OpaqueHandle,
    /// Outside the API's naming prefix; not wrapped at all.
    Foreign,
}

#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    enum_names: HashSet<String>,
    struct_names: HashSet<String>,
    value_struct_names: HashSet<String>,
    // Registration order, kept for reproducible emission.
    enum_order: Vec<String>,
    struct_order: Vec<String>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(
        enums: &[EnumDescriptor],
        structs: &[StructDescriptor],
        conventions: &NamingConventions,
    ) -> Self {
        let mut registry = Self::new();

        for e in enums {
            registry.register_enum(conventions.enum_display_name(&e.name));
        }
        for s in structs {
            registry.register_struct(&s.name, conventions);
        }

        registry
    }

    pub fn classify(name: &str, conventions: &NamingConventions) -> StructCategory {
        if !name.starts_with(conventions.struct_prefix.as_str()) {
            StructCategory::Foreign
        } else if conventions.is_value_struct(name) {
            StructCategory::Value
        } else {
            StructCategory::OpaqueHandle
        }
    }

    pub fn register_enum(&mut self, display_name: &str) {
        if self.enum_names.insert(display_name.to_string()) {
            self.enum_order.push(display_name.to_string());
        }
    }

    pub fn register_struct(&mut self, name: &str, conventions: &NamingConventions) -> StructCategory {
        let category = Self::classify(name, conventions);
        match category {
            StructCategory::OpaqueHandle => {
                if self.struct_names.insert(name.to_string()) {
                    self.struct_order.push(name.to_string());
                }
            }
            StructCategory::Value => {
                self.value_struct_names.insert(name.to_string());
            }
            StructCategory::Foreign => {}
        }
        category
    }

    pub fn is_enum(&self, name: &str) -> bool {
        self.enum_names.contains(name)
    }

    /// Opaque-handle structs only; value-typed structs are never members.
    pub fn is_struct(&self, name: &str) -> bool {
        self.struct_names.contains(name)
    }

    pub fn is_value_struct(&self, name: &str) -> bool {
        self.value_struct_names.contains(name)
    }

    pub fn enum_names(&self) -> &[String] {
        &self.enum_order
    }

    pub fn struct_names(&self) -> &[String] {
        &self.struct_order
    }

    /// Strips `const ` and a trailing `*`, then checks opaque-struct membership.
    pub fn pointee_struct<'a>(&self, raw: &'a str) -> Option<&'a str> {
        let pointee = strip_pointer(raw)?;
        self.is_struct(pointee).then_some(pointee)
    }
}

/// `"const ImDrawList*"` → `"ImDrawList"`. `None` when `raw` is not a pointer.
pub fn strip_pointer(raw: &str) -> Option<&str> {
    let without_ptr = raw.strip_suffix('*')?;
    let pure = without_ptr.strip_prefix("const ").unwrap_or(without_ptr);
    Some(pure.trim())
}
