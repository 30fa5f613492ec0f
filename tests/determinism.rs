use std::collections::HashSet;

use simdup::{FeatureConfig, InputConfig, find_clusters, fingerprint_text, run_pipeline};

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// A corpus seeded with one-bit neighbors so clusters actually form.
fn noisy_corpus(size: usize) -> HashSet<u64> {
    (0..size)
        .flat_map(|i| {
            let h = splitmix64(i as u64);
            [h, h ^ (1 << (i % 64)), h ^ (1 << ((i + 7) % 64))]
        })
        .collect()
}

#[test]
fn clusters_are_identical_across_runs() {
    let corpus = noisy_corpus(500);

    let first = find_clusters(&corpus, 6, 3).unwrap();
    let second = find_clusters(&corpus, 6, 3).unwrap();
    let third = find_clusters(&corpus, 6, 3).unwrap();

    // Parallel scan order varies between runs; the emitted clusters and
    // their sequence must not.
    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[test]
fn pipeline_output_is_byte_identical_across_runs() {
    let mut input = String::from("id\thash\n");
    for i in 0..200u64 {
        let h = splitmix64(i);
        input.push_str(&format!("doc-{i}a\t{h}\n"));
        input.push_str(&format!("doc-{i}b\t{}\n", h ^ 1));
    }

    let input_cfg = InputConfig::default();

    let mut first = Vec::new();
    run_pipeline(input.as_bytes(), &mut first, &input_cfg, 5, 2).unwrap();
    let mut second = Vec::new();
    run_pipeline(input.as_bytes(), &mut second, &input_cfg, 5, 2).unwrap();

    assert_eq!(first, second);
}

#[test]
fn text_fingerprints_are_stable() {
    let cfg = FeatureConfig::default();
    let text = "The borrow checker enforces aliasing rules so data races are compile-time errors.";

    let reference = fingerprint_text(text, &cfg).unwrap();
    for _ in 0..10 {
        assert_eq!(fingerprint_text(text, &cfg).unwrap(), reference);
    }
}

#[test]
fn different_seeds_give_different_fingerprints() {
    let text = "the quick brown fox jumps over the lazy dog";
    let a = fingerprint_text(
        text,
        &FeatureConfig {
            seed: 12345,
            ..Default::default()
        },
    )
    .unwrap();
    let b = fingerprint_text(
        text,
        &FeatureConfig {
            seed: 54321,
            ..Default::default()
        },
    )
    .unwrap();
    assert_ne!(a, b);
}
