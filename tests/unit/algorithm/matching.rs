//! Tests for exhaustive nearest-neighborhood search

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use retexture::AlgorithmError;
    use retexture::algorithm::matching::{MatchFinder, MatchStrategy};
    use retexture::spatial::grid::{Pixel, PixelGrid};
    use retexture::spatial::neighborhood::NeighborOffsets;

    fn random_grid(width: usize, height: usize, seed: u64) -> PixelGrid {
        let mut rng = StdRng::seed_from_u64(seed);
        let pixels = (0..width * height)
            .map(|_| [rng.random(), rng.random(), rng.random(), 255])
            .collect();
        PixelGrid::from_pixels(width, height, pixels).unwrap()
    }

    fn random_neighborhood(len: usize, seed: u64) -> Vec<Pixel> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len)
            .map(|_| [rng.random(), rng.random(), rng.random(), 255])
            .collect()
    }

    // Tests the returned coordinate has the minimum cost over every candidate
    // Verified by returning the last candidate scanned
    #[test]
    fn test_find_match_is_optimal() {
        let source = random_grid(6, 5, 7);
        let offsets = NeighborOffsets::causal(1);
        let finder = MatchFinder::new(&source, &offsets, MatchStrategy::Exhaustive);

        for seed in 0..20 {
            let target = random_neighborhood(offsets.len(), seed);
            let found = finder.find_match(&target).unwrap();

            for y in 0..source.height() {
                for x in 0..source.width() {
                    let cost = finder.candidate_cost(x, y, &target).unwrap();
                    assert!(found.cost <= cost, "({x}, {y}) beats the returned match");
                }
            }
            assert_eq!(finder.candidate_cost(found.x, found.y, &target), Some(found.cost));
        }
    }

    // Tests ties resolve to the first coordinate in row-major order
    // Verified by replacing strict less-than with less-or-equal
    #[test]
    fn test_ties_favor_first_scanned() {
        let mut pixels = vec![[0, 0, 0, 255]; 16];
        // One bright column, so every row at x = 2 has the same neighborhood
        for y in 0..4 {
            pixels[y * 4 + 1] = [200, 200, 200, 255];
        }
        let source = PixelGrid::from_pixels(4, 4, pixels).unwrap();
        let offsets = NeighborOffsets::causal(1);
        let finder = MatchFinder::new(&source, &offsets, MatchStrategy::Exhaustive);

        // Neighborhood of (2, y): up-left bright, up black, up-right black, left bright
        let target = vec![
            [200, 200, 200, 255],
            [0, 0, 0, 255],
            [0, 0, 0, 255],
            [200, 200, 200, 255],
        ];
        let found = finder.find_match(&target).unwrap();

        assert_eq!((found.x, found.y, found.cost), (2, 0, 0));
    }

    // Tests a uniform source matches (0, 0) for any target
    // Verified by scanning columns in the outer loop from the far edge
    #[test]
    fn test_uniform_source_matches_origin() {
        let source = PixelGrid::filled(5, 5, [10, 20, 30, 255]).unwrap();
        let offsets = NeighborOffsets::causal(2);
        let finder = MatchFinder::new(&source, &offsets, MatchStrategy::Exhaustive);

        let target = random_neighborhood(offsets.len(), 3);
        let found = finder.find_match(&target).unwrap();

        assert_eq!((found.x, found.y), (0, 0));
    }

    // Tests the parallel scan returns exactly the sequential result
    // Verified by reducing on cost alone
    #[test]
    fn test_parallel_matches_exhaustive() {
        let source = random_grid(40, 30, 11);
        let offsets = NeighborOffsets::causal(2);
        let sequential = MatchFinder::new(&source, &offsets, MatchStrategy::Exhaustive);
        let parallel = MatchFinder::new(&source, &offsets, MatchStrategy::Parallel);

        assert_eq!(parallel.strategy(), MatchStrategy::Parallel);
        for seed in 0..10 {
            let target = random_neighborhood(offsets.len(), seed);
            assert_eq!(
                sequential.find_match(&target).unwrap(),
                parallel.find_match(&target).unwrap()
            );
        }

        let uniform = PixelGrid::filled(40, 30, [1, 2, 3, 255]).unwrap();
        let uniform_finder = MatchFinder::new(&uniform, &offsets, MatchStrategy::Parallel);
        let found = uniform_finder.find_match(&random_neighborhood(offsets.len(), 99)).unwrap();
        assert_eq!((found.x, found.y), (0, 0));
    }

    // Tests target neighborhoods of the wrong length are rejected
    // Verified by zipping mismatched sequences silently
    #[test]
    fn test_neighborhood_length_mismatch() {
        let source = random_grid(5, 5, 1);
        let offsets = NeighborOffsets::causal(1);
        let finder = MatchFinder::new(&source, &offsets, MatchStrategy::Exhaustive);

        assert_eq!(finder.neighborhood_len(), 4);
        let result = finder.find_match(&[[0, 0, 0, 255]; 3]);
        assert!(matches!(
            result,
            Err(AlgorithmError::NeighborhoodMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    // Tests candidate neighborhoods are the source pixels at the wrapped offsets
    // Verified by gathering candidates from unwrapped coordinates
    #[test]
    fn test_candidate_neighborhoods() {
        let source = random_grid(5, 4, 5);
        let offsets = NeighborOffsets::causal(1);
        let finder = MatchFinder::new(&source, &offsets, MatchStrategy::Exhaustive);

        let candidate = finder.candidate(0, 0).unwrap();
        assert_eq!(
            candidate,
            &[
                source.pixel_at(-1, -1),
                source.pixel_at(0, -1),
                source.pixel_at(1, -1),
                source.pixel_at(-1, 0),
            ]
        );
        assert!(finder.candidate(5, 0).is_none());
        assert!(finder.candidate(0, 4).is_none());
    }
}
