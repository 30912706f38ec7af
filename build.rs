use std::env;
use std::fs;
use std::path::PathBuf;

// Writes COMPILED_FEATURES (sorted, kebab-case) for `querylite::compiled_features()`.
fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    let out = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let mut features: Vec<String> = env::vars()
        .filter_map(|(k, _)| k.strip_prefix("CARGO_FEATURE_").map(|f| f.to_ascii_lowercase().replace('_', "-")))
        .collect();
    features.sort();
    let body = features.iter().map(|f| format!("{f:?}")).collect::<Vec<_>>().join(", ");
    fs::write(
        out.join("compiled_features.rs"),
        format!("pub static COMPILED_FEATURES: &[&str] = &[{body}];\n"),
    )
    .expect("write compiled_features.rs");
}
