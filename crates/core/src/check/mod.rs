//! Compatibility checking between an OLD and a NEW surface snapshot.
//!
//! The checker is a pure function of its two inputs: it never mutates them and
//! always returns the complete, sorted finding list. Findings are ordered by
//! class name, then member kind (class, field, method), then member name, then
//! parameter types, so repeated runs over the same input are byte-identical.

use std::cmp::Ordering;
use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::loader::SurfaceDescriptor;
use crate::model::{
    member_path, ClassSymbol, MalformedSurfaceError, MethodKey, NotFoundError, Surface,
};

mod rules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    Added,
    Removed,
    Changed,
}

impl FindingKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FindingKind::Added => "added",
            FindingKind::Removed => "removed",
            FindingKind::Changed => "changed",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How serious a finding is, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Informational,
    Warning,
    Breaking,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Informational => "informational",
            Severity::Warning => "warning",
            Severity::Breaking => "breaking",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of symbol a finding is about. Declaration order is report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Class,
    Field,
    Method,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct OrderKey {
    class: String,
    member: MemberKind,
    name: String,
    params: Vec<String>,
}

/// One reported difference between two surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub symbol_path: String,
    pub kind: FindingKind,
    pub severity: Severity,
    pub detail: String,
    #[serde(skip)]
    order: OrderKey,
}

impl Finding {
    pub(crate) fn class(
        class: &str,
        kind: FindingKind,
        severity: Severity,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            symbol_path: class.to_string(),
            kind,
            severity,
            detail: detail.into(),
            order: OrderKey {
                class: class.to_string(),
                member: MemberKind::Class,
                name: String::new(),
                params: Vec::new(),
            },
        }
    }

    pub(crate) fn field(
        class: &str,
        field: &str,
        kind: FindingKind,
        severity: Severity,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            symbol_path: member_path(class, field),
            kind,
            severity,
            detail: detail.into(),
            order: OrderKey {
                class: class.to_string(),
                member: MemberKind::Field,
                name: field.to_string(),
                params: Vec::new(),
            },
        }
    }

    pub(crate) fn method(
        class: &str,
        key: &MethodKey,
        kind: FindingKind,
        severity: Severity,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            symbol_path: member_path(class, key),
            kind,
            severity,
            detail: detail.into(),
            order: OrderKey {
                class: class.to_string(),
                member: MemberKind::Method,
                name: key.name.clone(),
                params: key.params.clone(),
            },
        }
    }

    /// Qualified name of the class the finding belongs to.
    pub fn class_name(&self) -> &str {
        &self.order.class
    }

    pub fn member_kind(&self) -> MemberKind {
        self.order.member
    }

    pub fn is_breaking(&self) -> bool {
        self.severity == Severity::Breaking
    }
}

impl Ord for Finding {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order
            .cmp(&other.order)
            .then(self.kind.cmp(&other.kind))
            .then_with(|| self.detail.cmp(&other.detail))
            .then(self.severity.cmp(&other.severity))
            .then_with(|| self.symbol_path.cmp(&other.symbol_path))
    }
}

impl PartialOrd for Finding {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two surfaces on the current thread.
pub fn compare(old: &Surface, new: &Surface) -> Vec<Finding> {
    let mut findings = class_set_findings(old, new);
    for (old_class, new_class) in common_classes(old, new) {
        rules::diff_class(old, new, old_class, new_class, &mut findings);
    }
    finish(findings)
}

/// Compare two surfaces, spreading the member-level work over the rayon pool.
///
/// Each worker appends to its own list; lists are merged and then sorted, so
/// the output is identical to [`compare`].
pub fn compare_parallel(old: &Surface, new: &Surface) -> Vec<Finding> {
    let mut findings = class_set_findings(old, new);
    let common = common_classes(old, new);
    let member_findings = common
        .par_iter()
        .fold(Vec::new, |mut local, (old_class, new_class)| {
            rules::diff_class(old, new, old_class, new_class, &mut local);
            local
        })
        .reduce(Vec::new, |mut merged, mut part| {
            merged.append(&mut part);
            merged
        });
    findings.extend(member_findings);
    finish(findings)
}

/// Validate both descriptors, then compare them.
///
/// Fails before producing any finding if either side is malformed.
pub fn compare_descriptors(
    old: &SurfaceDescriptor,
    new: &SurfaceDescriptor,
) -> Result<Vec<Finding>, MalformedSurfaceError> {
    let old = old.build()?;
    let new = new.build()?;
    Ok(compare(&old, &new))
}

/// Whole-class additions and removals. Members of such classes are not
/// reported individually.
fn class_set_findings(old: &Surface, new: &Surface) -> Vec<Finding> {
    let mut findings = Vec::new();
    for class in old.classes() {
        if let Err(NotFoundError { name }) = new.lookup_class(&class.name) {
            debug!(class = %name, "class removed");
            findings.push(rules::class_removed(class, new.version()));
        }
    }
    for class in new.classes() {
        if let Err(NotFoundError { name }) = old.lookup_class(&class.name) {
            debug!(class = %name, "class added");
            findings.push(rules::class_added(class));
        }
    }
    findings
}

fn common_classes<'a>(
    old: &'a Surface,
    new: &'a Surface,
) -> Vec<(&'a ClassSymbol, &'a ClassSymbol)> {
    old.classes()
        .filter_map(|old_class| {
            new.lookup_class(&old_class.name).ok().map(|new_class| (old_class, new_class))
        })
        .collect()
}

fn finish(mut findings: Vec<Finding>) -> Vec<Finding> {
    findings.sort();
    let breaking = findings.iter().filter(|f| f.is_breaking()).count();
    info!(total = findings.len(), breaking, "surface comparison complete");
    findings
}
