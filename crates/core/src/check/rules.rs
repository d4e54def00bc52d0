use std::cmp::Ordering;

use super::{Finding, FindingKind, Severity};
use crate::model::{ClassSymbol, FieldSymbol, MethodSymbol, Surface, SymbolMeta};

/// Removing something callers could see breaks them, unless it was already
/// deprecated or its removal was announced for a version `removed_at` has
/// reached. An unversioned NEW surface honours any announcement.
fn removal_severity(
    owner_exported: bool,
    meta: &SymbolMeta,
    removed_at: Option<u32>,
) -> Severity {
    let announced = match (meta.removed_in, removed_at) {
        (Some(scheduled), Some(actual)) => actual >= scheduled,
        (Some(_), None) => true,
        (None, _) => false,
    };
    if !(owner_exported && meta.visibility.is_exported()) {
        Severity::Informational
    } else if meta.deprecated || announced {
        Severity::Warning
    } else {
        Severity::Breaking
    }
}

fn removal_detail(meta: &SymbolMeta, noun: &str) -> String {
    match meta.removed_in {
        Some(version) => {
            format!("removed {} (scheduled for removal in {version})", describe(meta, noun))
        }
        None => format!("removed {}", describe(meta, noun)),
    }
}

fn describe(meta: &SymbolMeta, noun: &str) -> String {
    if meta.deprecated {
        format!("deprecated {} {noun}", meta.visibility)
    } else {
        format!("{} {noun}", meta.visibility)
    }
}

pub(super) fn class_removed(class: &ClassSymbol, removed_at: Option<u32>) -> Finding {
    Finding::class(
        &class.name,
        FindingKind::Removed,
        removal_severity(true, &class.meta, removed_at),
        removal_detail(&class.meta, class.kind.as_str()),
    )
}

pub(super) fn class_added(class: &ClassSymbol) -> Finding {
    Finding::class(
        &class.name,
        FindingKind::Added,
        Severity::Informational,
        format!(
            "added {} (introduced in {})",
            describe(&class.meta, class.kind.as_str()),
            class.meta.introduced
        ),
    )
}

/// Accumulates the individual differences of one symbol. Anything that would
/// be breaking is downgraded when the old symbol was not exported.
struct Changes {
    exported: bool,
    items: Vec<(Severity, String)>,
}

impl Changes {
    fn new(exported: bool) -> Self {
        Self { exported, items: Vec::new() }
    }

    fn breaking(&mut self, detail: String) {
        let severity = if self.exported { Severity::Breaking } else { Severity::Informational };
        self.items.push((severity, detail));
    }

    fn informational(&mut self, detail: String) {
        self.items.push((Severity::Informational, detail));
    }

    /// A modifier whose addition restricts callers or subclasses.
    fn restricting_modifier(&mut self, modifier: &str, old: bool, new: bool) {
        match (old, new) {
            (false, true) => self.breaking(format!("added {modifier} modifier")),
            (true, false) => self.informational(format!("removed {modifier} modifier")),
            _ => {}
        }
    }

    fn staticness(&mut self, old: bool, new: bool) {
        match (old, new) {
            (false, true) => self.breaking("became static".to_string()),
            (true, false) => self.breaking("is no longer static".to_string()),
            _ => {}
        }
    }

    fn meta(&mut self, old: &SymbolMeta, new: &SymbolMeta) {
        match new.visibility.cmp(&old.visibility) {
            Ordering::Less => self.breaking(format!(
                "visibility narrowed from {} to {}",
                old.visibility, new.visibility
            )),
            Ordering::Greater => self.informational(format!(
                "visibility widened from {} to {}",
                old.visibility, new.visibility
            )),
            Ordering::Equal => {}
        }

        match (old.deprecated, new.deprecated) {
            (false, true) => self.informational(match new.deprecated_since {
                Some(version) => format!("deprecated since {version}"),
                None => "deprecated".to_string(),
            }),
            (true, false) => self.informational("no longer deprecated".to_string()),
            _ => {}
        }

        if old.introduced != new.introduced {
            self.informational(format!(
                "introduced version changed from {} to {}",
                old.introduced, new.introduced
            ));
        }
    }

    fn into_findings(self, mut make: impl FnMut(Severity, String) -> Finding) -> Vec<Finding> {
        self.items.into_iter().map(|(severity, detail)| make(severity, detail)).collect()
    }
}

/// Member-by-member comparison of a class present in both surfaces.
pub(super) fn diff_class(
    old_surface: &Surface,
    new_surface: &Surface,
    old: &ClassSymbol,
    new: &ClassSymbol,
    out: &mut Vec<Finding>,
) {
    let exported = old.meta.visibility.is_exported();
    let mut changes = Changes::new(exported);

    if old.kind != new.kind {
        changes.breaking(format!("class kind changed from {} to {}", old.kind, new.kind));
    }
    changes.restricting_modifier("final", old.is_final, new.is_final);
    changes.restricting_modifier("abstract", old.is_abstract, new.is_abstract);
    superclass_change(new_surface, old, new, &mut changes);

    let old_ifaces = old_surface.effective_interfaces(old);
    let new_ifaces = new_surface.effective_interfaces(new);
    for iface in old_ifaces.difference(&new_ifaces) {
        changes.breaking(format!("removed interface {iface}"));
    }
    for iface in new_ifaces.difference(&old_ifaces) {
        changes.informational(format!("added interface {iface}"));
    }
    changes.meta(&old.meta, &new.meta);

    out.extend(changes.into_findings(|severity, detail| {
        Finding::class(&old.name, FindingKind::Changed, severity, detail)
    }));

    let removed_at = new_surface.version();
    diff_fields(exported, removed_at, old, new, out);
    diff_methods(exported, removed_at, old, new, out);
}

/// A new superclass is compatible as long as the old one is still somewhere
/// in the chain.
fn superclass_change(
    new_surface: &Surface,
    old: &ClassSymbol,
    new: &ClassSymbol,
    changes: &mut Changes,
) {
    if old.superclass == new.superclass {
        return;
    }
    let detail = format!(
        "superclass changed from {} to {}",
        old.superclass.as_deref().unwrap_or("(none)"),
        new.superclass.as_deref().unwrap_or("(none)")
    );
    let Some(previous) = old.superclass.as_deref() else {
        changes.informational(detail);
        return;
    };

    let (chain, unresolved) = new_surface.resolve_supertype_chain(new).resolve_all();
    let retained = chain.iter().any(|ancestor| ancestor.name == previous)
        || unresolved == Some(previous);
    if retained {
        changes.informational(detail);
    } else {
        changes.breaking(detail);
    }
}

fn diff_fields(
    class_exported: bool,
    removed_at: Option<u32>,
    old: &ClassSymbol,
    new: &ClassSymbol,
    out: &mut Vec<Finding>,
) {
    for (name, old_field) in &old.fields {
        match new.fields.get(name) {
            Some(new_field) => diff_field(class_exported, &old.name, old_field, new_field, out),
            None => out.push(Finding::field(
                &old.name,
                name,
                FindingKind::Removed,
                removal_severity(class_exported, &old_field.meta, removed_at),
                removal_detail(&old_field.meta, "field"),
            )),
        }
    }
    for (name, new_field) in &new.fields {
        if !old.fields.contains_key(name) {
            out.push(Finding::field(
                &old.name,
                name,
                FindingKind::Added,
                Severity::Informational,
                format!(
                    "added {} (introduced in {})",
                    describe(&new_field.meta, "field"),
                    new_field.meta.introduced
                ),
            ));
        }
    }
}

fn diff_field(
    class_exported: bool,
    class: &str,
    old: &FieldSymbol,
    new: &FieldSymbol,
    out: &mut Vec<Finding>,
) {
    let mut changes = Changes::new(class_exported && old.meta.visibility.is_exported());

    if old.ty != new.ty {
        changes.breaking(format!("type changed from {} to {}", old.ty, new.ty));
    }
    changes.staticness(old.is_static, new.is_static);
    changes.restricting_modifier("final", old.is_final, new.is_final);
    match (&old.constant, &new.constant) {
        (Some(before), Some(after)) if before != after => {
            changes.breaking(format!("constant value changed from {before} to {after}"))
        }
        (Some(before), None) => changes.breaking(format!("no longer a constant (was {before})")),
        (None, Some(after)) => {
            changes.informational(format!("became a constant with value {after}"))
        }
        _ => {}
    }
    changes.meta(&old.meta, &new.meta);

    out.extend(changes.into_findings(|severity, detail| {
        Finding::field(class, &old.name, FindingKind::Changed, severity, detail)
    }));
}

fn diff_methods(
    class_exported: bool,
    removed_at: Option<u32>,
    old: &ClassSymbol,
    new: &ClassSymbol,
    out: &mut Vec<Finding>,
) {
    for (key, old_method) in &old.methods {
        match new.methods.get(key) {
            Some(new_method) => diff_method(class_exported, &old.name, old_method, new_method, out),
            None => out.push(Finding::method(
                &old.name,
                key,
                FindingKind::Removed,
                removal_severity(class_exported, &old_method.meta, removed_at),
                removal_detail(&old_method.meta, "method"),
            )),
        }
    }
    for (key, new_method) in &new.methods {
        if !old.methods.contains_key(key) {
            out.push(Finding::method(
                &old.name,
                key,
                FindingKind::Added,
                Severity::Informational,
                format!(
                    "added {} (introduced in {})",
                    describe(&new_method.meta, "method"),
                    new_method.meta.introduced
                ),
            ));
        }
    }
}

fn diff_method(
    class_exported: bool,
    class: &str,
    old: &MethodSymbol,
    new: &MethodSymbol,
    out: &mut Vec<Finding>,
) {
    let mut changes = Changes::new(class_exported && old.meta.visibility.is_exported());

    if old.return_type != new.return_type {
        changes.breaking(format!(
            "return type changed from {} to {}",
            old.return_type, new.return_type
        ));
    }
    for thrown in new.throws.difference(&old.throws) {
        changes.breaking(format!("added thrown exception {thrown}"));
    }
    for thrown in old.throws.difference(&new.throws) {
        changes.informational(format!("removed thrown exception {thrown}"));
    }
    changes.staticness(old.is_static, new.is_static);
    changes.restricting_modifier("final", old.is_final, new.is_final);
    changes.restricting_modifier("abstract", old.is_abstract, new.is_abstract);
    changes.meta(&old.meta, &new.meta);

    let key = old.key();
    out.extend(changes.into_findings(|severity, detail| {
        Finding::method(class, &key, FindingKind::Changed, severity, detail)
    }));
}
