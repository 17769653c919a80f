use std::error::Error;
use vergen::EmitBuilder;

// Emits the VERGEN_* variables read by `cli::BuildInfo`.
pub fn main() -> Result<(), Box<dyn Error>> {
    EmitBuilder::builder()
        .build_timestamp()
        .git_sha(false)
        .cargo_target_triple()
        .rustc_semver()
        .rustc_host_triple()
        .rustc_llvm_version()
        .emit()?;
    Ok(())
}
