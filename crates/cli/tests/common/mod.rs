//! Snapshot documents shared by the CLI tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const OLD_SURFACE: &str = r#"{
  "label": "api-28",
  "version": 28,
  "classes": [
    {
      "name": "android.content.ClipData",
      "superclass": "java.lang.Object",
      "interfaces": ["android.os.Parcelable"],
      "methods": [
        { "name": "getItemAt", "params": ["int"], "returns": "android.content.ClipData.Item" },
        { "name": "getItemCount", "returns": "int" }
      ]
    },
    {
      "name": "android.content.ClipboardManager",
      "methods": [ { "name": "hasText", "returns": "boolean", "deprecated": true } ]
    },
    { "name": "android.os.Parcelable", "kind": "interface" }
  ]
}"#;

/// `getItemAt` becomes final (breaking); `hasText` is removed while deprecated
/// (warning); `ClipDescription` is new (informational).
pub const NEW_SURFACE: &str = r#"{
  "label": "api-29",
  "version": 29,
  "classes": [
    {
      "name": "android.content.ClipData",
      "superclass": "java.lang.Object",
      "interfaces": ["android.os.Parcelable"],
      "methods": [
        { "name": "getItemAt", "params": ["int"], "returns": "android.content.ClipData.Item", "final": true },
        { "name": "getItemCount", "returns": "int" }
      ]
    },
    { "name": "android.content.ClipboardManager" },
    { "name": "android.content.ClipDescription", "introduced": 29 },
    { "name": "android.os.Parcelable", "kind": "interface" }
  ]
}"#;

/// Two methods with the same signature.
pub const MALFORMED_SURFACE: &str = r#"{
  "classes": [
    { "name": "a.Foo", "methods": [ { "name": "m", "params": ["int"] }, { "name": "m", "params": ["int"] } ] }
  ]
}"#;

pub fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).expect("write fixture");
    path
}

pub fn path_str(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
