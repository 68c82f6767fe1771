use std::borrow::Cow;

use safewatch_app_lib::mk_specta;
use specta_typescript::Typescript;

/// Where the web view imports its bindings from
const DEFAULT_PATH: &str = "safewatch-app/ui/bindings.ts";

pub fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_PATH.to_string());
    let mut lang = Typescript::new();
    lang.header = Cow::Borrowed("/* Generated by export-types, do not edit */");
    mk_specta()
        .export(lang, &path)
        .expect("Failed to export bindings");
    println!("Exported commands, events, and types to {path}");
}
