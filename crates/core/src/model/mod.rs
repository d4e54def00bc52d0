//! Core data model for API surfaces: classes, methods, fields, and the
//! availability metadata each of them carries.
//!
//! Symbols are flat tagged records. Inheritance between classes is modelled as
//! a plain name reference (`ClassSymbol::superclass`) that is resolved lazily
//! against a [`Surface`], never as ownership.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod surface;

pub use surface::{SupertypeChain, Surface, SurfaceBuilder};

/// Access level of a symbol, ordered from least to most exposed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Private,
    Package,
    Protected,
    #[default]
    Public,
}

impl Visibility {
    /// Whether callers outside the declaring package can see the symbol.
    pub fn is_exported(self) -> bool {
        matches!(self, Visibility::Public | Visibility::Protected)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Package => "package",
            Visibility::Protected => "protected",
            Visibility::Public => "public",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of type declaration a class symbol represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
}

impl ClassKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Enum => "enum",
            ClassKind::Annotation => "annotation",
        }
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata shared by every symbol: visibility plus version tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolMeta {
    pub visibility: Visibility,
    /// SDK version that first exposed the symbol.
    pub introduced: u32,
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated_since: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_in: Option<u32>,
}

impl Default for SymbolMeta {
    fn default() -> Self {
        Self {
            visibility: Visibility::Public,
            introduced: 1,
            deprecated: false,
            deprecated_since: None,
            removed_in: None,
        }
    }
}

impl SymbolMeta {
    pub fn new(visibility: Visibility, introduced: u32) -> Self {
        Self { visibility, introduced, ..Self::default() }
    }

    /// Mark as deprecated, optionally recording the version it happened in.
    pub fn deprecated(mut self, since: Option<u32>) -> Self {
        self.deprecated = true;
        self.deprecated_since = since;
        self
    }
}

/// Identity of a method within its class: name plus ordered parameter types.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MethodKey {
    pub name: String,
    pub params: Vec<String>,
}

impl MethodKey {
    pub fn new(name: impl Into<String>, params: Vec<String>) -> Self {
        Self { name: name.into(), params }
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.params.join(","))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSymbol {
    pub name: String,
    pub params: Vec<String>,
    pub return_type: String,
    pub throws: BTreeSet<String>,
    pub is_static: bool,
    pub is_final: bool,
    pub is_abstract: bool,
    pub meta: SymbolMeta,
}

impl MethodSymbol {
    pub fn new(
        name: impl Into<String>,
        params: Vec<String>,
        return_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            return_type: return_type.into(),
            throws: BTreeSet::new(),
            is_static: false,
            is_final: false,
            is_abstract: false,
            meta: SymbolMeta::default(),
        }
    }

    pub fn key(&self) -> MethodKey {
        MethodKey::new(self.name.clone(), self.params.clone())
    }

    pub fn with_meta(mut self, meta: SymbolMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn with_throws<I, S>(mut self, throws: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.throws = throws.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_modifiers(mut self, is_static: bool, is_final: bool, is_abstract: bool) -> Self {
        self.is_static = is_static;
        self.is_final = is_final;
        self.is_abstract = is_abstract;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSymbol {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub is_static: bool,
    pub is_final: bool,
    /// Literal value of a `static final` constant, kept as source text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constant: Option<String>,
    pub meta: SymbolMeta,
}

impl FieldSymbol {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            is_static: false,
            is_final: false,
            constant: None,
            meta: SymbolMeta::default(),
        }
    }

    /// Build a `static final` constant field.
    pub fn constant(
        name: impl Into<String>,
        ty: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            is_static: true,
            is_final: true,
            constant: Some(value.into()),
            ..Self::new(name, ty)
        }
    }

    pub fn with_meta(mut self, meta: SymbolMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn with_modifiers(mut self, is_static: bool, is_final: bool) -> Self {
        self.is_static = is_static;
        self.is_final = is_final;
        self
    }
}

/// A class, interface, enum, or annotation declaration.
///
/// Members can only be attached through [`SurfaceBuilder`], which enforces
/// uniqueness of field names and method keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSymbol {
    pub name: String,
    pub kind: ClassKind,
    pub meta: SymbolMeta,
    pub is_final: bool,
    pub is_abstract: bool,
    pub superclass: Option<String>,
    pub interfaces: BTreeSet<String>,
    pub(crate) methods: BTreeMap<MethodKey, MethodSymbol>,
    pub(crate) fields: BTreeMap<String, FieldSymbol>,
}

impl ClassSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ClassKind::Class,
            meta: SymbolMeta::default(),
            is_final: false,
            is_abstract: false,
            superclass: None,
            interfaces: BTreeSet::new(),
            methods: BTreeMap::new(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_kind(mut self, kind: ClassKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_meta(mut self, meta: SymbolMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn with_superclass(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn with_interfaces<I, S>(mut self, interfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interfaces = interfaces.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_modifiers(mut self, is_final: bool, is_abstract: bool) -> Self {
        self.is_final = is_final;
        self.is_abstract = is_abstract;
        self
    }

    /// Methods in key order.
    pub fn methods(&self) -> impl Iterator<Item = &MethodSymbol> {
        self.methods.values()
    }

    pub fn method(&self, key: &MethodKey) -> Option<&MethodSymbol> {
        self.methods.get(key)
    }

    /// Fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSymbol> {
        self.fields.values()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSymbol> {
        self.fields.get(name)
    }

    pub fn member_count(&self) -> usize {
        self.methods.len() + self.fields.len()
    }
}

/// Path of a member symbol, e.g. `android.content.ClipData#getItemAt(int)`.
pub fn member_path(class: &str, member: impl fmt::Display) -> String {
    format!("{class}#{member}")
}

/// A class name lookup missed. Recoverable: during comparison absence means
/// "added" or "removed" depending on direction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Class not found in surface: {name}")]
pub struct NotFoundError {
    pub name: String,
}

/// A surface broke one of its structural invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed surface at {symbol}: {violation}")]
pub struct MalformedSurfaceError {
    /// Path of the offending symbol.
    pub symbol: String,
    pub violation: Violation,
}

impl MalformedSurfaceError {
    pub fn new(symbol: impl Into<String>, violation: Violation) -> Self {
        Self { symbol: symbol.into(), violation }
    }
}

/// The specific invariant a malformed surface violates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("symbol name is empty")]
    EmptyName,
    #[error("duplicate class name")]
    DuplicateClass,
    #[error("duplicate field name")]
    DuplicateField,
    #[error("duplicate method signature")]
    DuplicateMethod,
    #[error("conflicting return types {first} and {second}")]
    ReturnTypeConflict { first: String, second: String },
    #[error("owner class {owner} is not present in the surface")]
    DanglingOwner { owner: String },
    #[error("constant value on a field that is not static final")]
    ConstantOnNonConstant,
}
