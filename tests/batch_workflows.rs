//! Library integration tests for complete colorizing workflows
//!
//! Each test builds transparent fixtures in a temporary directory, runs a
//! batch through the public API and inspects the files on disk.

use image::{Rgba, RgbaImage};
use png_colorizer::{
    colorize_file, BatchMode, BatchProcessor, ColorizerConfig, ColorizerError, Manifest,
    NoOpProgressReporter, Rgb,
};
use rand::{rngs::StdRng, SeedableRng};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FOREGROUND: [u8; 4] = [12, 200, 34, 255];

/// 3x2 sprite: left column opaque, middle half transparent, right column clear
fn sprite() -> RgbaImage {
    RgbaImage::from_fn(3, 2, |x, _| match x {
        0 => Rgba(FOREGROUND),
        1 => Rgba([200, 100, 0, 128]),
        _ => Rgba([255, 255, 255, 0]),
    })
}

fn write_sprite(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    sprite().save(&path).expect("Failed to write fixture");
    path
}

fn run(config: ColorizerConfig, inputs: &[PathBuf], seed: u64) -> png_colorizer::BatchReport {
    BatchProcessor::new(config)
        .expect("Valid configuration")
        .run(inputs, None, &mut StdRng::seed_from_u64(seed), &NoOpProgressReporter)
        .expect("Batch should complete")
}

#[test]
fn test_outputs_are_opaque_composites() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    let inputs = vec![write_sprite(input_dir.path(), "sprite.png")];

    let config = ColorizerConfig::builder()
        .output_dir(output_dir.path())
        .num_colors(6)
        .build()
        .unwrap();
    let report = run(config, &inputs, 1);

    assert_eq!(report.output_count(), 6);
    for output in &report.outputs {
        let decoded = image::open(&output.path).unwrap();
        assert!(!decoded.color().has_alpha(), "outputs must be opaque");

        let rgb = decoded.into_rgb8();
        assert_eq!(rgb.dimensions(), (3, 2));
        assert_eq!(rgb.get_pixel(0, 0).0, [12, 200, 34]);
        assert_eq!(rgb.get_pixel(2, 1).0, output.color.to_array());
    }
}

#[test]
fn test_exactly_k_outputs_per_input_with_padding() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    let inputs = vec![
        write_sprite(input_dir.path(), "a.png"),
        write_sprite(input_dir.path(), "b.png"),
        write_sprite(input_dir.path(), "c.png"),
    ];

    let config = ColorizerConfig::builder()
        .output_dir(output_dir.path())
        .num_colors(12)
        .digits(5)
        .build()
        .unwrap();
    let report = run(config, &inputs, 2);

    assert_eq!(report.output_count(), 36);
    assert_eq!(report.processed_inputs(), 3);

    let mut names: Vec<String> = fs::read_dir(output_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names.len(), 36);
    assert_eq!(names[0], "a_00001.png");
    assert_eq!(names[11], "a_00012.png");
    assert_eq!(names[35], "c_00012.png");
}

#[test]
fn test_undisturbed_colors_come_from_the_grid() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    let inputs = vec![write_sprite(input_dir.path(), "grid.png")];

    // 2 divisions at fixed lightness: hues {0, 0.5} x saturations {0, 1}
    let config = ColorizerConfig::builder()
        .output_dir(output_dir.path())
        .num_colors(8)
        .divisions(2)
        .lightness_range(0.5, 0.5)
        .build()
        .unwrap();
    let report = run(config, &inputs, 3);

    assert_eq!(report.output_count(), 8);
    let colors: HashSet<Rgb> = report.outputs.iter().map(|o| o.color).collect();
    assert_eq!(colors.len(), 3, "both zero-saturation hues collapse to gray");
    assert!(colors.contains(&Rgb::new(127, 127, 127)));
    assert!(colors.contains(&Rgb::new(255, 0, 0)));
}

#[test]
fn test_same_seed_reproduces_dataset() {
    let input_dir = TempDir::new().unwrap();
    let inputs = vec![write_sprite(input_dir.path(), "seeded.png")];

    let colors_for = |seed: u64| -> Vec<Rgb> {
        let output_dir = TempDir::new().unwrap();
        let config = ColorizerConfig::builder()
            .output_dir(output_dir.path())
            .num_colors(10)
            .add_disturbance(true)
            .build()
            .unwrap();
        run(config, &inputs, seed)
            .outputs
            .iter()
            .map(|o| o.color)
            .collect()
    };

    assert_eq!(colors_for(99), colors_for(99));
    assert_ne!(colors_for(99), colors_for(100));
}

#[test]
fn test_bad_files_are_reported_and_skipped() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();

    let text = input_dir.path().join("a_text.png");
    fs::write(&text, b"definitely not an image").unwrap();

    // JPEG magic bytes behind a .png extension
    let jpeg = input_dir.path().join("b_photo.png");
    fs::write(&jpeg, [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46]).unwrap();

    let opaque = input_dir.path().join("c_opaque.png");
    image::RgbImage::from_pixel(2, 2, image::Rgb([1, 2, 3]))
        .save(&opaque)
        .unwrap();

    let good = write_sprite(input_dir.path(), "d_good.png");
    let inputs = vec![text, jpeg, opaque, good.clone()];

    let config = ColorizerConfig::builder()
        .output_dir(output_dir.path())
        .num_colors(2)
        .build()
        .unwrap();
    let report = run(config, &inputs, 4);

    assert_eq!(report.failed_count(), 3);
    assert!(matches!(report.failures[0].error, ColorizerError::UnsupportedFormat(_)));
    assert!(matches!(report.failures[1].error, ColorizerError::UnsupportedFormat(_)));
    assert!(matches!(report.failures[2].error, ColorizerError::MissingAlpha(_)));
    assert_eq!(report.output_count(), 2);
    assert!(report.outputs.iter().all(|o| o.source == good));
}

#[test]
fn test_allow_opaque_accepts_rgb_inputs() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    let opaque = input_dir.path().join("opaque.png");
    image::RgbImage::from_pixel(2, 2, image::Rgb([9, 8, 7]))
        .save(&opaque)
        .unwrap();

    let config = ColorizerConfig::builder()
        .output_dir(output_dir.path())
        .num_colors(3)
        .allow_opaque(true)
        .build()
        .unwrap();
    let report = run(config, &[opaque], 5);

    assert!(report.is_clean());
    for output in &report.outputs {
        let rgb = image::open(&output.path).unwrap().into_rgb8();
        assert_eq!(rgb.get_pixel(1, 1).0, [9, 8, 7]);
    }
}

#[test]
fn test_cycle_mode_with_copies_and_manifest() {
    let input_dir = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let inputs = vec![
        write_sprite(input_dir.path(), "one.png"),
        write_sprite(input_dir.path(), "two.png"),
        write_sprite(input_dir.path(), "three.png"),
    ];
    let out = work.path().join("out");
    let pairs = work.path().join("pairs");
    let mirror = work.path().join("mirror");

    let config = ColorizerConfig::builder()
        .output_dir(&out)
        .num_colors(7)
        .digits(3)
        .mode(BatchMode::Cycle)
        .copy_input_dir(Some(&pairs))
        .copy_output_dir(Some(&mirror))
        .write_manifest(true)
        .seed(Some(6))
        .build()
        .unwrap();
    let report = run(config, &inputs, 6);

    assert_eq!(report.output_count(), 7);
    assert_eq!(report.processed_inputs(), 3);

    for (i, output) in report.outputs.iter().enumerate() {
        let name = format!("{:03}.png", i + 1);
        assert_eq!(output.relative_path, PathBuf::from(&name));
        assert_eq!(output.source, inputs[i % inputs.len()]);
        assert_eq!(
            fs::read(pairs.join(&name)).unwrap(),
            fs::read(&output.source).unwrap()
        );
        assert_eq!(
            fs::read(mirror.join(&name)).unwrap(),
            fs::read(out.join(&name)).unwrap()
        );
    }

    let manifest = Manifest::read_from(out.join("manifest.json")).unwrap();
    assert_eq!(manifest.mode, BatchMode::Cycle);
    assert_eq!(manifest.num_colors, 7);
    assert_eq!(manifest.entries.len(), 7);
    assert_eq!(manifest.entries[6].output, PathBuf::from("007.png"));
    assert_eq!(manifest.entries[6].hex, report.outputs[6].color.to_hex());
}

#[test]
fn test_colorize_file_returns_in_memory_composites() {
    let input_dir = TempDir::new().unwrap();
    let path = write_sprite(input_dir.path(), "mem.png");

    let config = ColorizerConfig::builder().num_colors(3).build().unwrap();
    let results = colorize_file(&path, &config, &mut StdRng::seed_from_u64(8)).unwrap();

    assert_eq!(results.len(), 3);
    for (color, image) in &results {
        assert_eq!(image.get_pixel(2, 0).0, color.to_array());
    }
}
