use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use super::{
    member_path, ClassSymbol, FieldSymbol, MalformedSurfaceError, MethodSymbol, NotFoundError,
    Violation,
};

/// One immutable, validated snapshot of an API surface.
///
/// Values are only produced by [`SurfaceBuilder`], so every `Surface` in hand
/// already satisfies the uniqueness and ownership invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Surface {
    label: Option<String>,
    version: Option<u32>,
    classes: BTreeMap<String, ClassSymbol>,
}

impl Surface {
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// SDK version this snapshot describes, when known.
    pub fn version(&self) -> Option<u32> {
        self.version
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Classes sorted by qualified name.
    pub fn classes(&self) -> impl Iterator<Item = &ClassSymbol> {
        self.classes.values()
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn contains_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn member_count(&self) -> usize {
        self.classes.values().map(ClassSymbol::member_count).sum()
    }

    pub fn lookup_class(&self, name: &str) -> Result<&ClassSymbol, NotFoundError> {
        self.classes.get(name).ok_or_else(|| NotFoundError { name: name.to_string() })
    }

    /// Lazily walk the superclass references of `class`.
    ///
    /// The chain excludes `class` itself and stops at a root or at the first
    /// name this surface does not contain.
    pub fn resolve_supertype_chain<'a>(&'a self, class: &'a ClassSymbol) -> SupertypeChain<'a> {
        let mut visited = BTreeSet::new();
        visited.insert(class.name.as_str());
        SupertypeChain {
            surface: self,
            next: class.superclass.as_deref(),
            visited,
            unresolved: None,
        }
    }

    /// Interfaces `class` implements directly, through its resolved
    /// superclasses, or through interfaces those interfaces extend.
    pub fn effective_interfaces(&self, class: &ClassSymbol) -> BTreeSet<String> {
        let mut pending: Vec<&str> = class.interfaces.iter().map(String::as_str).collect();
        for ancestor in self.resolve_supertype_chain(class) {
            pending.extend(ancestor.interfaces.iter().map(String::as_str));
        }

        let mut seen = BTreeSet::new();
        while let Some(name) = pending.pop() {
            if !seen.insert(name.to_string()) {
                continue;
            }
            if let Some(iface) = self.classes.get(name) {
                pending.extend(iface.interfaces.iter().map(String::as_str));
            }
        }
        seen
    }
}

/// Iterator over the superclasses of a class, nearest first.
///
/// A clone taken before iterating walks the same chain independently; call
/// [`Surface::resolve_supertype_chain`] again to restart from the start.
#[derive(Debug, Clone)]
pub struct SupertypeChain<'a> {
    surface: &'a Surface,
    next: Option<&'a str>,
    visited: BTreeSet<&'a str>,
    unresolved: Option<&'a str>,
}

impl<'a> SupertypeChain<'a> {
    /// Superclass name at which the walk stopped because the surface does not
    /// contain it (or because it closes a cycle). Only meaningful once the
    /// iterator is exhausted.
    pub fn unresolved(&self) -> Option<&'a str> {
        self.unresolved
    }

    /// Drain the chain, returning resolved classes and the unresolved tail.
    pub fn resolve_all(mut self) -> (Vec<&'a ClassSymbol>, Option<&'a str>) {
        let classes: Vec<&'a ClassSymbol> = self.by_ref().collect();
        (classes, self.unresolved)
    }
}

impl<'a> Iterator for SupertypeChain<'a> {
    type Item = &'a ClassSymbol;

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.next.take()?;
        if !self.visited.insert(name) {
            trace!(class = name, "superclass cycle detected");
            self.unresolved = Some(name);
            return None;
        }
        match self.surface.classes.get(name) {
            Some(class) => {
                self.next = class.superclass.as_deref();
                Some(class)
            }
            None => {
                self.unresolved = Some(name);
                None
            }
        }
    }
}

/// Incremental, validating constructor for [`Surface`].
///
/// Every `add_*` call checks its invariant immediately and reports the first
/// violation; a builder that returned an error should be discarded.
#[derive(Debug, Default)]
pub struct SurfaceBuilder {
    label: Option<String>,
    version: Option<u32>,
    classes: BTreeMap<String, ClassSymbol>,
}

impl SurfaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Some(label.into());
        self
    }

    pub fn version(&mut self, version: u32) -> &mut Self {
        self.version = Some(version);
        self
    }

    /// Register a class. Any members already attached to `class` are
    /// re-validated one by one.
    pub fn add_class(&mut self, class: ClassSymbol) -> Result<&mut Self, MalformedSurfaceError> {
        if class.name.trim().is_empty() {
            return Err(MalformedSurfaceError::new(class.name, Violation::EmptyName));
        }
        if self.classes.contains_key(&class.name) {
            return Err(MalformedSurfaceError::new(class.name, Violation::DuplicateClass));
        }

        let mut shell = class;
        let methods = std::mem::take(&mut shell.methods);
        let fields = std::mem::take(&mut shell.fields);
        let owner = shell.name.clone();
        self.classes.insert(owner.clone(), shell);

        for field in fields.into_values() {
            self.add_field(&owner, field)?;
        }
        for method in methods.into_values() {
            self.add_method(&owner, method)?;
        }
        Ok(self)
    }

    pub fn add_method(
        &mut self,
        owner: &str,
        method: MethodSymbol,
    ) -> Result<&mut Self, MalformedSurfaceError> {
        let key = method.key();
        let path = member_path(owner, &key);
        if method.name.trim().is_empty() {
            return Err(MalformedSurfaceError::new(path, Violation::EmptyName));
        }
        let class = self.classes.get_mut(owner).ok_or_else(|| {
            MalformedSurfaceError::new(
                path.clone(),
                Violation::DanglingOwner { owner: owner.to_string() },
            )
        })?;

        if let Some(existing) = class.methods.get(&key) {
            let violation = if existing.return_type != method.return_type {
                Violation::ReturnTypeConflict {
                    first: existing.return_type.clone(),
                    second: method.return_type,
                }
            } else {
                Violation::DuplicateMethod
            };
            return Err(MalformedSurfaceError::new(path, violation));
        }

        class.methods.insert(key, method);
        Ok(self)
    }

    pub fn add_field(
        &mut self,
        owner: &str,
        field: FieldSymbol,
    ) -> Result<&mut Self, MalformedSurfaceError> {
        let path = member_path(owner, &field.name);
        if field.name.trim().is_empty() {
            return Err(MalformedSurfaceError::new(path, Violation::EmptyName));
        }
        if field.constant.is_some() && !(field.is_static && field.is_final) {
            return Err(MalformedSurfaceError::new(path, Violation::ConstantOnNonConstant));
        }
        let class = self.classes.get_mut(owner).ok_or_else(|| {
            MalformedSurfaceError::new(
                path.clone(),
                Violation::DanglingOwner { owner: owner.to_string() },
            )
        })?;
        if class.fields.contains_key(&field.name) {
            return Err(MalformedSurfaceError::new(path, Violation::DuplicateField));
        }

        class.fields.insert(field.name.clone(), field);
        Ok(self)
    }

    pub fn build(self) -> Surface {
        Surface { label: self.label, version: self.version, classes: self.classes }
    }
}
