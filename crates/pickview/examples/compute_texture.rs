//! GPU compute-shader texture generation.
//!
//! A compute shader regenerates a 512x512 texture every frame with an
//! animated interference pattern; a fullscreen pass displays it.
//!
//! Run with: cargo run --example `compute_texture`

fn main() {
    env_logger::init();

    if let Err(e) = pickview::run_compute_texture() {
        log::error!("compute texture demo failed: {e}");
        std::process::exit(1);
    }
}
