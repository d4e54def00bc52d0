use anyhow::{Context, Result};
use serde::Serialize;
use surface_core::model::{ClassSymbol, FieldSymbol, MethodSymbol, Surface};

use crate::commands::load_snapshot;

#[derive(Debug, Serialize)]
pub struct ClassView<'a> {
    pub name: &'a str,
    pub kind: &'static str,
    pub visibility: &'static str,
    pub introduced: u32,
    pub deprecated: bool,
    #[serde(rename = "final")]
    pub is_final: bool,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    pub superclass: Option<&'a str>,
    /// Resolved superclasses, nearest first.
    pub supertype_chain: Vec<&'a str>,
    /// Superclass name the chain could not resolve in this surface.
    pub unresolved_superclass: Option<&'a str>,
    pub interfaces: Vec<&'a str>,
    pub effective_interfaces: Vec<String>,
    pub fields: Vec<&'a FieldSymbol>,
    pub methods: Vec<&'a MethodSymbol>,
}

impl<'a> ClassView<'a> {
    pub fn new(surface: &'a Surface, class: &'a ClassSymbol) -> Self {
        let (chain, unresolved) = surface.resolve_supertype_chain(class).resolve_all();
        Self {
            name: &class.name,
            kind: class.kind.as_str(),
            visibility: class.meta.visibility.as_str(),
            introduced: class.meta.introduced,
            deprecated: class.meta.deprecated,
            is_final: class.is_final,
            is_abstract: class.is_abstract,
            superclass: class.superclass.as_deref(),
            supertype_chain: chain.iter().map(|ancestor| ancestor.name.as_str()).collect(),
            unresolved_superclass: unresolved,
            interfaces: class.interfaces.iter().map(String::as_str).collect(),
            effective_interfaces: surface.effective_interfaces(class).into_iter().collect(),
            fields: class.fields().collect(),
            methods: class.methods().collect(),
        }
    }
}

/// Show one class of a snapshot with its resolved supertype chain.
pub fn inspect_command(surface: &str, class: &str, json: bool) -> Result<()> {
    let loaded = load_snapshot(surface)?;
    let symbol = loaded
        .surface
        .lookup_class(class)
        .with_context(|| format!("Cannot inspect {class} in {surface}"))?;
    let view = ClassView::new(&loaded.surface, symbol);

    if json {
        let serialized = serde_json::to_string_pretty(&view)
            .context("Failed to serialize class view to JSON")?;
        println!("{}", serialized);
        return Ok(());
    }

    println!("{} {} {}", view.visibility, view.kind, view.name);
    println!("  Introduced: {}", view.introduced);
    if view.deprecated {
        println!("  Deprecated: yes");
    }
    let mut chain: Vec<&str> = view.supertype_chain.clone();
    if let Some(tail) = view.unresolved_superclass {
        chain.push(tail);
    }
    if chain.is_empty() {
        println!("  Supertypes: (root)");
    } else {
        println!("  Supertypes: {}", chain.join(" -> "));
    }
    if let Some(tail) = view.unresolved_superclass {
        println!("  Unresolved: {tail}");
    }
    if view.effective_interfaces.is_empty() {
        println!("  Interfaces: (none)");
    } else {
        println!("  Interfaces: {}", view.effective_interfaces.join(", "));
    }

    println!("  Fields ({}):", view.fields.len());
    for field in &view.fields {
        match &field.constant {
            Some(value) => println!("    - {} {} = {}", field.ty, field.name, value),
            None => println!("    - {} {}", field.ty, field.name),
        }
    }
    println!("  Methods ({}):", view.methods.len());
    for method in &view.methods {
        println!("    - {} {}", method.return_type, method.key());
    }

    Ok(())
}
