use std::env;
use std::path::PathBuf;

use ts_codegen::DecoderGenerator;
use ts_schema::SchemaRegistry;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let Some(out_dir) = env::var_os("OUT_DIR").map(PathBuf::from) else {
        panic!("OUT_DIR is not set");
    };
    let registry = SchemaRegistry::new();
    let roots = ts_fixtures::roots();

    for (module, options) in ts_fixtures::options::all() {
        let path = out_dir.join(format!("{module}.rs"));
        if let Err(err) = DecoderGenerator::new(options).write_module(&path, &registry, &roots) {
            panic!("failed to generate the `{module}` decoders: {err}");
        }
    }
}
