use std::path::{Path, PathBuf};
use std::{env, fs};

// The crate sits at <root>/crates/quote-lens-app, so the shared VERSION file
// lives two ancestors up from the manifest directory.
fn workspace_root() -> PathBuf {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo");
    Path::new(&manifest_dir)
        .ancestors()
        .nth(2)
        .expect("crate directory should sit two levels below the workspace root")
        .to_path_buf()
}

fn main() {
    let version_file = workspace_root().join("VERSION");
    println!("cargo:rerun-if-changed={}", version_file.display());

    let version = fs::read_to_string(&version_file)
        .unwrap_or_else(|error| panic!("cannot read {}: {error}", version_file.display()));
    let version = version.trim();
    assert!(!version.is_empty(), "VERSION must not be blank");

    println!("cargo:rustc-env=QUOTE_LENS_VERSION={version}");
}
