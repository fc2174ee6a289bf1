//! Camera-orientation/Euler-angle visualization.
//!
//! Move the cyan target point with `X`/`Y`/`Z` (shift negates) and watch
//! the yellow vector - the base direction rotated by the extracted yaw and
//! pitch - track it. Arrow keys move the eye, the wheel zooms.
//!
//! Run with: cargo run --example `rot_angle`

fn main() {
    env_logger::init();

    if let Err(e) = pickview::run_rot_angle() {
        log::error!("rotation angle demo failed: {e}");
        std::process::exit(1);
    }
}
