#[cfg(test)]
mod tests {
    use assert_fs::prelude::*;
    use assert_fs::TempDir;
    use image::{GenericImageView, ImageFormat, RgbImage};
    use pixconv::{ConversionEngine, ConvertOptions, ImageTransformer};
    use std::path::Path;

    fn save_image(path: &Path, width: u32, height: u32) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        img.save(path).unwrap();
    }

    fn run(options: ConvertOptions) -> pixconv::ConversionReport {
        let config = options.resolve().unwrap();
        ConversionEngine::new(config, ImageTransformer::default())
            .with_progress(false)
            .run()
            .unwrap()
    }

    #[test]
    fn test_mirrors_tree_with_widths() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.child("source");
        let target = temp_dir.child("target");
        save_image(source.child("a/b.png").path(), 400, 200);

        let report = run(ConvertOptions {
            source: source.path().to_path_buf(),
            target: target.path().to_path_buf(),
            widths: vec![100, 200],
            ..Default::default()
        });

        assert_eq!(report.converted, 2);
        assert!(target.child("a/b-100w.webp").path().exists());
        assert!(target.child("a/b-200w.webp").path().exists());

        let small = image::open(target.child("a/b-100w.webp").path()).unwrap();
        assert_eq!(small.dimensions(), (100, 50));
        let bytes = std::fs::read(target.child("a/b-200w.webp").path()).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::WebP);
    }

    #[test]
    fn test_small_images_are_not_enlarged() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.child("source");
        let target = temp_dir.child("target");
        save_image(source.child("tiny.jpg").path(), 40, 20);

        run(ConvertOptions {
            source: source.path().to_path_buf(),
            target: target.path().to_path_buf(),
            widths: vec![80],
            ..Default::default()
        });

        let output = image::open(target.child("tiny-80w.webp").path()).unwrap();
        assert_eq!(output.dimensions(), (40, 20));
    }

    #[test]
    fn test_enlarge_upscales() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.child("source");
        let target = temp_dir.child("target");
        save_image(source.child("tiny.png").path(), 40, 20);

        run(ConvertOptions {
            source: source.path().to_path_buf(),
            target: target.path().to_path_buf(),
            output_formats: vec!["png".into()],
            widths: vec![80],
            enlarge: true,
            ..Default::default()
        });

        let output = image::open(target.child("tiny-80w.png").path()).unwrap();
        assert_eq!(output.dimensions(), (80, 40));
    }

    #[test]
    fn test_ineligible_files_produce_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.child("source");
        let target = temp_dir.child("target");
        save_image(source.child("ignored.bmp").path(), 10, 10);
        source.child("notes.txt").write_str("not an image").unwrap();

        let report = run(ConvertOptions {
            source: source.path().to_path_buf(),
            target: target.path().to_path_buf(),
            ..Default::default()
        });

        assert_eq!(report.files_found, 0);
        assert!(target.path().is_dir());
        assert_eq!(std::fs::read_dir(target.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_corrupt_file_does_not_stop_batch() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.child("source");
        let target = temp_dir.child("target");
        source.create_dir_all().unwrap();
        source.child("broken.jpg").write_binary(b"not really a jpeg").unwrap();
        save_image(source.child("fine.jpg").path(), 16, 16);

        let report = run(ConvertOptions {
            source: source.path().to_path_buf(),
            target: target.path().to_path_buf(),
            ..Default::default()
        });

        assert_eq!(report.converted, 1);
        assert_eq!(report.failures.len(), 1);
        assert!(target.child("fine.webp").path().exists());
        assert!(!target.child("broken.webp").path().exists());
    }

    #[test]
    fn test_missing_source_is_config_error() {
        let result = ConvertOptions {
            target: "somewhere".into(),
            ..Default::default()
        }
        .resolve();

        assert!(result.is_err());
    }
}
