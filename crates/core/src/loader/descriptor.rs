use serde::{Deserialize, Serialize};

use crate::model::{
    ClassKind, ClassSymbol, FieldSymbol, MalformedSurfaceError, MethodSymbol, Surface,
    SurfaceBuilder, SymbolMeta,
};

/// Serialized form of a surface snapshot.
///
/// Lists (rather than maps) are used throughout so that duplicate entries in
/// the source document stay observable and can be rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default)]
    pub classes: Vec<ClassDescriptor>,
    /// Members declared outside their class entry, located by `owner`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<OwnedMethodDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<OwnedFieldDescriptor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    pub name: String,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(flatten)]
    pub meta: SymbolMeta,
    #[serde(rename = "final", default)]
    pub is_final: bool,
    #[serde(rename = "abstract", default)]
    pub is_abstract: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default = "void")]
    pub returns: String,
    #[serde(default)]
    pub throws: Vec<String>,
    #[serde(rename = "static", default)]
    pub is_static: bool,
    #[serde(rename = "final", default)]
    pub is_final: bool,
    #[serde(rename = "abstract", default)]
    pub is_abstract: bool,
    #[serde(flatten)]
    pub meta: SymbolMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(rename = "static", default)]
    pub is_static: bool,
    #[serde(rename = "final", default)]
    pub is_final: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<String>,
    #[serde(flatten)]
    pub meta: SymbolMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedMethodDescriptor {
    pub owner: String,
    #[serde(flatten)]
    pub method: MethodDescriptor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedFieldDescriptor {
    pub owner: String,
    #[serde(flatten)]
    pub field: FieldDescriptor,
}

fn void() -> String {
    "void".to_string()
}

impl SurfaceDescriptor {
    /// Validate the descriptor and produce an immutable surface.
    ///
    /// Classes are registered first, then nested members, then top-level
    /// members, so an owner reference only dangles if the class is truly absent.
    pub fn build(&self) -> Result<Surface, MalformedSurfaceError> {
        let mut builder = SurfaceBuilder::new();
        if let Some(label) = &self.label {
            builder.label(label.clone());
        }
        if let Some(version) = self.version {
            builder.version(version);
        }

        for class in &self.classes {
            builder.add_class(class.to_symbol())?;
        }
        for class in &self.classes {
            for field in &class.fields {
                builder.add_field(&class.name, field.to_symbol())?;
            }
            for method in &class.methods {
                builder.add_method(&class.name, method.to_symbol())?;
            }
        }
        for owned in &self.fields {
            builder.add_field(&owned.owner, owned.field.to_symbol())?;
        }
        for owned in &self.methods {
            builder.add_method(&owned.owner, owned.method.to_symbol())?;
        }

        Ok(builder.build())
    }
}

impl ClassDescriptor {
    fn to_symbol(&self) -> ClassSymbol {
        let mut class = ClassSymbol::new(self.name.clone())
            .with_kind(self.kind)
            .with_meta(self.meta.clone())
            .with_interfaces(self.interfaces.iter().cloned())
            .with_modifiers(self.is_final, self.is_abstract);
        class.superclass = self.superclass.clone();
        class
    }
}

impl MethodDescriptor {
    fn to_symbol(&self) -> MethodSymbol {
        MethodSymbol::new(self.name.clone(), self.params.clone(), self.returns.clone())
            .with_throws(self.throws.iter().cloned())
            .with_modifiers(self.is_static, self.is_final, self.is_abstract)
            .with_meta(self.meta.clone())
    }
}

impl FieldDescriptor {
    fn to_symbol(&self) -> FieldSymbol {
        let mut field = FieldSymbol::new(self.name.clone(), self.ty.clone())
            .with_modifiers(self.is_static, self.is_final)
            .with_meta(self.meta.clone());
        field.constant = self.constant.clone();
        field
    }
}
