//! Integration tests for the art pipeline.
//!
//! These tests verify:
//!   1. Seeded builds render byte-identical images across runs
//!   2. Grid vs point-by-point evaluation parity
//!   3. JSON round-trip of channel trees preserves rendering
//!   4. Every channel value stays in range for deep random trees
//!   5. Movie → frame cache → frame selection pipeline

use rand::rngs::StdRng;
use rand::SeedableRng;
use recursive_art::eval::cache::FrameCache;
use recursive_art::eval::movie::{frame_time, DEFAULT_LOUD_LEVEL, DEFAULT_QUIET_LEVEL};
use recursive_art::{
    build_random_function, color_map, remap_interval, render_art, render_image, render_movie,
    ArtConfig, ArtError, ChannelTrees, FunctionNode,
};

// ── Helpers ────────────────────────────────────────────────────────

fn seeded_trees(seed: u64) -> ChannelTrees {
    let mut rng = StdRng::seed_from_u64(seed);
    ChannelTrees::build(&mut rng, 6, 9)
}

/// Color of pixel (i, j) computed without the renderer.
fn point_color(trees: &ChannelTrees, i: u32, j: u32, width: u32, height: u32, t: f64) -> [u8; 3] {
    let x = remap_interval(i as f64, 0.0, width as f64, -1.0, 1.0).unwrap();
    let y = remap_interval(j as f64, 0.0, height as f64, -1.0, 1.0).unwrap();
    [
        color_map(trees.red.evaluate(x, y, t)),
        color_map(trees.green.evaluate(x, y, t)),
        color_map(trees.blue.evaluate(x, y, t)),
    ]
}

// ── Determinism ────────────────────────────────────────────────────

#[test]
fn seeded_two_by_two_is_reproducible() {
    let first = render_art(&seeded_trees(1234), 2, 2).unwrap();
    let second = render_art(&seeded_trees(1234), 2, 2).unwrap();
    assert_eq!(first.len(), 4);
    assert_eq!(first.to_rgb_bytes(), second.to_rgb_bytes());
}

#[test]
fn config_seed_matches_explicit_rng() {
    let config = ArtConfig::from_json(r#"{"seed": 77, "width": 8, "height": 8}"#).unwrap();
    assert_eq!(config.channel_trees(), seeded_trees(77));
}

#[test]
fn free_function_and_channel_builder_agree() {
    let mut rng = StdRng::seed_from_u64(5);
    let red = build_random_function(&mut rng, 6, 9);
    let green = build_random_function(&mut rng, 6, 9);
    let blue = build_random_function(&mut rng, 6, 9);
    let trees = seeded_trees(5);
    assert_eq!(trees.red, red);
    assert_eq!(trees.green, green);
    assert_eq!(trees.blue, blue);
}

// ── Grid parity ────────────────────────────────────────────────────

#[test]
fn grid_matches_point_evaluation() {
    let trees = seeded_trees(31);
    let (w, h, t) = (9, 6, 0.25);
    let img = render_image(&trees, w, h, t).unwrap();
    for j in 0..h {
        for i in 0..w {
            assert_eq!(
                img.pixel(i, j),
                Some(point_color(&trees, i, j, w, h, t)),
                "pixel ({}, {})",
                i,
                j
            );
        }
    }
}

#[test]
fn deep_trees_fill_every_pixel() {
    for seed in 0..8 {
        let trees = seeded_trees(seed);
        let img = render_image(&trees, 16, 16, -0.3).unwrap();
        assert_eq!(img.len(), 256);
        assert_eq!(img.to_rgb_bytes().len(), 768);
    }
}

// ── Serialization ──────────────────────────────────────────────────

#[test]
fn tree_json_round_trip_renders_identically() {
    let trees = seeded_trees(8);
    let json = serde_json::to_string(&trees.red).unwrap();
    let red: FunctionNode = serde_json::from_str(&json).unwrap();
    let restored = ChannelTrees {
        red,
        green: trees.green.clone(),
        blue: trees.blue.clone(),
    };
    assert_eq!(
        render_image(&trees, 5, 5, 0.0).unwrap(),
        render_image(&restored, 5, 5, 0.0).unwrap()
    );
}

// ── Movie pipeline ─────────────────────────────────────────────────

#[test]
fn movie_cache_and_selection() {
    let trees = seeded_trees(21);
    let movie = render_movie(&trees, 4, 4, 10).unwrap();
    let cache = FrameCache::new(16);

    for (idx, frame) in movie.frames().iter().enumerate() {
        let t = frame_time(idx as u32, 10).unwrap();
        let cached = cache.get_or_render(&trees, 4, 4, t).unwrap();
        assert_eq!(&*cached, frame);
    }
    assert_eq!(cache.len(), 10);

    let loudest = movie
        .select_by_level(1e6, DEFAULT_QUIET_LEVEL, DEFAULT_LOUD_LEVEL)
        .unwrap();
    assert_eq!(loudest, &movie.frames()[9]);
    let silent = movie
        .select_by_level(0.0, DEFAULT_QUIET_LEVEL, DEFAULT_LOUD_LEVEL)
        .unwrap();
    assert_eq!(silent, &movie.frames()[0]);
}

// ── Edge cases ─────────────────────────────────────────────────────

#[test]
fn degenerate_inputs_are_errors() {
    assert!(matches!(
        remap_interval(1.0, 5.0, 5.0, 0.0, 1.0),
        Err(ArtError::InvalidInterval { .. })
    ));
    let trees = seeded_trees(0);
    assert!(matches!(
        render_image(&trees, 0, 0, 0.0),
        Err(ArtError::InvalidDimensions { .. })
    ));
    assert!(matches!(
        render_movie(&trees, 1, 1, 0),
        Err(ArtError::InvalidFrameCount)
    ));
}
