//! Tests for PNG loading, export and tiled previews

#[cfg(test)]
mod tests {
    use retexture::AlgorithmError;
    use retexture::io::image::{export_grid_as_png, grid_to_image, load_pixel_grid, tile_grid};
    use retexture::spatial::grid::PixelGrid;
    use tempfile::TempDir;

    fn sample_grid() -> PixelGrid {
        PixelGrid::from_pixels(
            2,
            2,
            vec![
                [255, 0, 0, 255],
                [0, 255, 0, 255],
                [0, 0, 255, 255],
                [10, 20, 30, 128],
            ],
        )
        .unwrap()
    }

    // Tests a grid survives a PNG export and reload unchanged
    // Verified by writing channels in BGRA order
    #[test]
    fn test_export_and_load_png() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/out.png");
        let grid = sample_grid();

        export_grid_as_png(&grid, path.to_str().unwrap()).unwrap();
        assert!(path.exists(), "PNG file should be created with its parent");

        let loaded = load_pixel_grid(&path).unwrap();
        assert_eq!(loaded, grid);
    }

    // Tests loading a missing file reports the path
    // Verified by mapping the error to InvalidSourceData
    #[test]
    fn test_load_missing_file() {
        let result = load_pixel_grid("definitely/not/here.png");
        assert!(matches!(result, Err(AlgorithmError::ImageLoad { .. })));
    }

    // Tests image conversion keeps dimensions and byte order
    // Verified by swapping width and height
    #[test]
    fn test_grid_to_image() {
        let grid = PixelGrid::from_pixels(3, 1, vec![[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12]])
            .unwrap();
        let img = grid_to_image(&grid).unwrap();

        assert_eq!((img.width(), img.height()), (3, 1));
        assert_eq!(img.get_pixel(1, 0).0, [5, 6, 7, 8]);
    }

    // Tests tiled previews repeat the grid across and down
    // Verified by repeating only horizontally
    #[test]
    fn test_tile_grid() {
        let grid = sample_grid();
        let tiled = tile_grid(&grid, 2, 3).unwrap();

        assert_eq!((tiled.width(), tiled.height()), (4, 6));
        for y in 0..6 {
            for x in 0..4 {
                assert_eq!(tiled.get(x, y), grid.get(x % 2, y % 2));
            }
        }

        assert!(matches!(
            tile_grid(&grid, 0, 2),
            Err(AlgorithmError::InvalidParameter {
                parameter: "across",
                ..
            })
        ));
        assert!(matches!(
            tile_grid(&grid, 2, 0),
            Err(AlgorithmError::InvalidParameter {
                parameter: "down",
                ..
            })
        ));
        assert!(matches!(
            tile_grid(&grid, usize::MAX, 1),
            Err(AlgorithmError::InvalidParameter { .. })
        ));
    }
}
