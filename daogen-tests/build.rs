use std::path::Path;

fn main() {
    // Generate code for integration tests
    // The generated code is only used by tests (via include!), so it won't
    // affect normal library compilation
    let out_dir = std::env::var("OUT_DIR").unwrap();
    daogen_codegen::CodegenBuilder::new("declarations.toml")
        .output_dir(Path::new(&out_dir).join("dao"))
        .models_module("models")
        .generate()
        .expect("codegen failed");

    println!("cargo:rerun-if-changed=declarations.toml");
}
