//! Headless rendering integration tests.
//!
//! These require a GPU adapter (real or software fallback). On machines
//! without one, engine creation fails and the tests skip themselves.

use rand::rngs::StdRng;
use rand::SeedableRng;

use pickview::{generate_texture, render_scene_to_image, Options, PickScene};

/// True when the buffer is neither all-black nor a single uniform color.
fn has_nontrivial_content(pixels: &[u8], width: u32, height: u32) -> bool {
    let total = (width * height) as usize;
    assert_eq!(pixels.len(), total * 4, "pixel buffer size mismatch");

    let all_black = pixels
        .chunks(4)
        .all(|px| px[0] == 0 && px[1] == 0 && px[2] == 0);
    let first = &pixels[0..4];
    let all_uniform = pixels.chunks(4).all(|px| px == first);

    !all_black && !all_uniform
}

#[test]
fn headless_scene_render() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut scene = PickScene::new(Options::default(), &mut rng);

    let pixels = match render_scene_to_image(&mut scene, 320, 240) {
        Ok(pixels) => pixels,
        Err(e) => {
            eprintln!("skipping headless test: no GPU adapter available ({e})");
            return;
        }
    };

    assert_eq!(pixels.len(), 320 * 240 * 4);
    assert!(
        has_nontrivial_content(&pixels, 320, 240),
        "point cloud render should not be uniform"
    );

    // The corner is bare background: dodger blue has a dominant blue channel.
    let corner = &pixels[0..4];
    assert!(corner[2] > corner[0], "background should be blue-ish");
}

#[test]
fn compute_texture_generation() {
    const W: u32 = 64;
    const H: u32 = 64;

    let texels = match generate_texture(W, H) {
        Ok(texels) => texels,
        Err(e) => {
            eprintln!("skipping compute test: no GPU adapter available ({e})");
            return;
        }
    };

    assert_eq!(texels.len(), (W * H) as usize);

    // value = 1 - global * local with |global| <= 0.5 and local in [0, sqrt(2)].
    for (i, &v) in texels.iter().enumerate() {
        assert!(
            (0.25..=1.75).contains(&v),
            "texel {i} out of range: {v}"
        );
    }

    // Each workgroup's center texel has zero local falloff, so it is exactly 1.
    for ty in 0..H / 16 {
        for tx in 0..W / 16 {
            let x = tx * 16 + 8;
            let y = ty * 16 + 8;
            let v = texels[(y * W + x) as usize];
            assert!(
                (v - 1.0).abs() < 1e-5,
                "tile ({tx},{ty}) center expected 1.0, got {v}"
            );
        }
    }

    // With roll = 0 the first workgroup's sine term is zero, so the whole
    // first tile is flat 1.0.
    for y in 0..16 {
        for x in 0..16 {
            let v = texels[(y * W + x) as usize];
            assert!(
                (v - 1.0).abs() < 1e-5,
                "tile (0,0) texel ({x},{y}) expected 1.0, got {v}"
            );
        }
    }

    // Away from the first tile the pattern varies.
    let varied = texels.iter().any(|&v| (v - 1.0).abs() > 1e-3);
    assert!(varied, "pattern should not be flat everywhere");
}

#[test]
fn compute_texture_rejects_bad_dimensions() {
    // Dimension validation happens before any GPU work, so this also runs
    // without an adapter - but engine creation comes first, so skip there.
    match generate_texture(100, 64) {
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.contains("100x64") || msg.contains("adapter"),
                "unexpected error: {msg}"
            );
        }
        Ok(_) => panic!("non-multiple-of-16 dimensions should be rejected"),
    }
}
