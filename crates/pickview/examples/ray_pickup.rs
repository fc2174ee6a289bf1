//! Mouse ray-picking test against a point cloud.
//!
//! A thousand points scattered over a sphere, colored by octant. Left click
//! toggles the point under the cursor, a left drag selects a rectangle,
//! right drag rotates the trackball, and the wheel zooms. `A` toggles the
//! coordinate axes; `S` and `W` switch the pick margin between screen
//! pixels and world units.
//!
//! Run with: cargo run --example `ray_pickup`

fn main() {
    env_logger::init();

    if let Err(e) = pickview::run_ray_pickup(pickview::Options::default()) {
        log::error!("ray pickup demo failed: {e}");
        std::process::exit(1);
    }
}
