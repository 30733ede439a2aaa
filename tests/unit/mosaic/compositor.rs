//! Tests for sequential tile compositing, overlap precedence and run stepping

#[cfg(test)]
mod tests {
    use crate::support::{solid_tile, write_tile};
    use image::{Rgba, RgbaImage};
    use std::fs;
    use std::path::PathBuf;
    use tilestitch::MosaicError;
    use tilestitch::mosaic::compositor::{MosaicRun, compose_mosaic, draw_tile};
    use tilestitch::mosaic::naming::GridPoint;
    use tilestitch::mosaic::overlap::OverlapConfig;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const GREEN: [u8; 4] = [0, 255, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

    // Tests overlapping tiles overwrite instead of blending
    // Verified by alpha blending with imageops::overlay
    #[test]
    fn test_later_tile_wins_overlap_band() {
        let dir = tempfile::tempdir().unwrap();
        let left = write_tile(dir.path(), "S_000_000_lco.png", &solid_tile(16, RED));
        let right = write_tile(dir.path(), "S_000_001_lco.png", &solid_tile(16, BLUE));
        let config = OverlapConfig::new(16, 4).unwrap();

        // Input order must not matter, only name order
        for paths in [vec![left.clone(), right.clone()], vec![right, left]] {
            let canvas = compose_mosaic(&paths, 16, &config).unwrap();

            assert_eq!(canvas.dimensions(), (24, 12));
            assert_eq!(canvas.get_pixel(11, 5).0, RED);
            for x in 12..16 {
                assert_eq!(canvas.get_pixel(x, 5).0, BLUE, "overlap column {x}");
            }
            assert_eq!(canvas.get_pixel(23, 11).0, BLUE);
        }
    }

    // Tests the lower row wins the vertical overlap band
    // Verified by sorting tiles in reverse
    #[test]
    fn test_later_row_wins_vertical_overlap() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            write_tile(dir.path(), "S_001_000_lco.png", &solid_tile(20, GREEN)),
            write_tile(dir.path(), "S_000_000_lco.png", &solid_tile(20, RED)),
        ];
        let config = OverlapConfig::new(20, 5).unwrap();

        let canvas = compose_mosaic(&paths, 20, &config).unwrap();
        assert_eq!(canvas.dimensions(), (15, 30));
        assert_eq!(canvas.get_pixel(3, 14).0, RED);
        assert_eq!(canvas.get_pixel(3, 15).0, GREEN);
    }

    // Tests identical inputs produce byte-identical canvases
    // Verified by drawing in directory order
    #[test]
    fn test_composite_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let colors = [RED, GREEN, BLUE, WHITE];
        let mut paths = Vec::new();
        for (index, color) in colors.iter().enumerate() {
            let point = GridPoint::new(index as u32 % 2, index as u32 / 2);
            paths.push(write_tile(
                dir.path(),
                &format!("S_{point}_lco.png"),
                &solid_tile(24, *color),
            ));
        }
        let config = OverlapConfig::new(24, 6).unwrap();

        let first = compose_mosaic(&paths, 24, &config).unwrap();
        paths.reverse();
        let second = compose_mosaic(&paths, 24, &config).unwrap();
        assert_eq!(first.as_raw(), second.as_raw());
    }

    // Tests an undersized tile fills its whole cell after upsampling
    // Verified by skipping normalization
    #[test]
    fn test_undersized_tile_fills_cell() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            write_tile(dir.path(), "S_000_000_lco.png", &solid_tile(8, GREEN)),
            write_tile(dir.path(), "S_000_001_lco.png", &solid_tile(32, RED)),
        ];

        let canvas = compose_mosaic(&paths, 32, &OverlapConfig::without_overlap()).unwrap();
        assert_eq!(canvas.dimensions(), (64, 32));
        assert_eq!(canvas.get_pixel(31, 31).0, GREEN);
        assert_eq!(canvas.get_pixel(32, 0).0, RED);
    }

    // Tests oversized tiles are clipped at the canvas edge
    // Verified by cropping tiles before drawing
    #[test]
    fn test_oversized_tile_overflows_and_clips() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            write_tile(dir.path(), "S_000_000_lco.png", &solid_tile(24, BLUE)),
            write_tile(dir.path(), "S_001_001_lco.png", &solid_tile(24, RED)),
        ];

        let canvas = compose_mosaic(&paths, 16, &OverlapConfig::without_overlap()).unwrap();
        assert_eq!(canvas.dimensions(), (32, 32));
        // The first tile spills into the empty cells beside and below it
        assert_eq!(canvas.get_pixel(20, 4).0, BLUE);
        assert_eq!(canvas.get_pixel(4, 20).0, BLUE);
        assert_eq!(canvas.get_pixel(16, 16).0, RED);
        assert_eq!(canvas.get_pixel(31, 31).0, RED);
    }

    // Tests a stride of zero is rejected before any tile is read
    // Verified by decoding tiles before computing the overlap
    #[test]
    fn test_invalid_tile_size_before_decode() {
        let paths = [PathBuf::from("/nonexistent/S_000_000_lco.png")];
        let config = OverlapConfig::new(8, 8).unwrap();

        assert!(matches!(
            compose_mosaic(&paths, 8, &config),
            Err(MosaicError::InvalidTileSize {
                tile_size: 8,
                overlap: 8
            })
        ));
    }

    // Tests a decode failure aborts the run
    // Verified by skipping tiles that fail to decode
    #[test]
    fn test_decode_failure_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_tile(dir.path(), "S_000_000_lco.png", &solid_tile(8, RED));
        let bad = dir.path().join("S_000_001_lco.png");
        fs::write(&bad, b"not a png").unwrap();

        match compose_mosaic(&[good, bad.clone()], 8, &OverlapConfig::without_overlap()) {
            Err(MosaicError::TileDecode { path, .. }) => assert_eq!(path, bad),
            other => unreachable!("Expected TileDecode, got {other:?}"),
        }
    }

    // Tests an empty tile list is rejected
    #[test]
    fn test_empty_tile_set() {
        let paths: Vec<PathBuf> = Vec::new();
        assert!(matches!(
            compose_mosaic(&paths, 16, &OverlapConfig::default()),
            Err(MosaicError::EmptyTileSet)
        ));
    }

    // Tests stepping draws tiles in name order and then stops
    // Verified by drawing in input order
    #[test]
    fn test_run_steps_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            write_tile(dir.path(), "S_001_001_lco.png", &solid_tile(8, WHITE)),
            write_tile(dir.path(), "S_000_001_lco.png", &solid_tile(8, GREEN)),
            write_tile(dir.path(), "S_001_000_lco.png", &solid_tile(8, BLUE)),
            write_tile(dir.path(), "S_000_000_lco.png", &solid_tile(8, RED)),
        ];

        let mut run = MosaicRun::new(&paths, 8, &OverlapConfig::without_overlap()).unwrap();
        assert_eq!(run.remaining(), 4);
        assert_eq!(
            run.tiles().first().and_then(|p| p.file_name()),
            Some(std::ffi::OsStr::new("S_000_000_lco.png"))
        );
        assert_eq!(run.dimensions(), (16, 16));
        assert_eq!(run.placement().stride, 8);
        assert_eq!(run.extent().columns, 2);

        let mut drawn = Vec::new();
        while let Some(point) = run.draw_next().unwrap() {
            drawn.push(point);
        }
        assert_eq!(
            drawn,
            vec![
                GridPoint::new(0, 0),
                GridPoint::new(1, 0),
                GridPoint::new(0, 1),
                GridPoint::new(1, 1)
            ]
        );
        assert_eq!(run.remaining(), 0);
        assert!(run.draw_next().unwrap().is_none());

        let canvas = run.finish().unwrap();
        assert_eq!(canvas.get_pixel(12, 12).0, WHITE);
    }

    // Tests finish draws whatever tiles are left
    // Verified by returning the canvas without drawing
    #[test]
    fn test_finish_draws_remaining_tiles() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            write_tile(dir.path(), "S_000_000_lco.png", &solid_tile(8, RED)),
            write_tile(dir.path(), "S_000_001_lco.png", &solid_tile(8, GREEN)),
        ];

        let mut run = MosaicRun::new(&paths, 8, &OverlapConfig::without_overlap()).unwrap();
        run.draw_next().unwrap();
        assert_eq!(run.remaining(), 1);

        let canvas = run.finish().unwrap();
        assert_eq!(canvas.get_pixel(0, 0).0, RED);
        assert_eq!(canvas.get_pixel(15, 7).0, GREEN);
    }

    // Tests a failing tile keeps failing so the run cannot complete
    // Verified by advancing past the failing tile
    #[test]
    fn test_failed_tile_is_not_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("S_000_000_lco.png");
        fs::write(&bad, b"garbage").unwrap();
        let good = write_tile(dir.path(), "S_000_001_lco.png", &solid_tile(8, GREEN));

        let mut run = MosaicRun::new(&[bad, good], 8, &OverlapConfig::without_overlap()).unwrap();
        assert!(run.draw_next().is_err());
        assert_eq!(run.remaining(), 2);
        assert!(run.finish().is_err());
    }

    // Tests draw_tile replaces pixels, transparency included
    // Verified by blending the tile over the canvas
    #[test]
    fn test_draw_tile_replaces_pixels() {
        let mut canvas = RgbaImage::from_pixel(4, 4, Rgba(RED));
        let tile = RgbaImage::from_pixel(2, 2, Rgba(TRANSPARENT));

        draw_tile(&mut canvas, &tile, (1, 1));
        assert_eq!(canvas.get_pixel(0, 0).0, RED);
        assert_eq!(canvas.get_pixel(1, 1).0, TRANSPARENT);
        assert_eq!(canvas.get_pixel(2, 2).0, TRANSPARENT);
        assert_eq!(canvas.get_pixel(3, 3).0, RED);
    }

    // Tests drawing past the canvas edge clips rather than panics
    #[test]
    fn test_draw_tile_clips_outside_canvas() {
        let mut canvas = RgbaImage::new(4, 4);
        let tile = RgbaImage::from_pixel(4, 4, Rgba(BLUE));

        draw_tile(&mut canvas, &tile, (2, 2));
        draw_tile(&mut canvas, &tile, (100, 100));
        assert_eq!(canvas.get_pixel(3, 3).0, BLUE);
        assert_eq!(canvas.get_pixel(1, 1).0, TRANSPARENT);
    }
}
