use gl_generator::{Api, Fallbacks, Profile, Registry, StructGenerator};
use std::env;
use std::fs::File;
use std::path::Path;

fn main() {
    let dest = env::var("OUT_DIR").unwrap();
    let mut file = File::create(&Path::new(&dest).join("gl_bindings.rs")).unwrap();

    // Core-promoted ARB extensions, for drivers that only advertise the extension
    Registry::new(
        Api::Gl,
        (4, 6),
        Profile::Core,
        Fallbacks::All,
        [
            "GL_ARB_texture_multisample",
            "GL_ARB_texture_storage",
            "GL_ARB_texture_storage_multisample",
            "GL_ARB_buffer_storage",
            "GL_ARB_direct_state_access",
            "GL_ARB_map_buffer_range",
            "GL_ARB_copy_buffer",
            "GL_ARB_clear_buffer_object",
        ],
    )
    .write_bindings(StructGenerator, &mut file)
    .unwrap();

    println!("cargo:rerun-if-changed=build.rs");
}
