use crate::{config::ToneConfig, maze::Coord, solvers::euclidean_distance};

/// Pitch announced for a cell of a `width` x `height` grid.
///
/// The pitch grows with the distance from the grid's far corner `(width, height)`, normalized by
/// the grid diagonal, so it spans `[min_frequency, min_frequency + frequency_range]`.
pub fn cell_frequency(coord: Coord, width: u8, height: u8, tone: &ToneConfig) -> f64 {
    let diagonal = euclidean_distance((0, 0), (width, height));
    if diagonal == 0.0 {
        return tone.min_frequency;
    }
    let distance = euclidean_distance(coord, (width, height));
    distance / diagonal * tone.frequency_range + tone.min_frequency
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_bounds() {
        let tone = ToneConfig::default();
        assert_eq!(cell_frequency((0, 0), 40, 20, &tone), 300.0);
        for x in 0..40 {
            for y in 0..20 {
                let f = cell_frequency((x, y), 40, 20, &tone);
                assert!((200.0..=300.0).contains(&f));
            }
        }
    }

    #[test]
    fn test_frequency_falls_towards_far_corner() {
        let tone = ToneConfig::default();
        let pitches = (0..10)
            .map(|i| cell_frequency((i, i), 10, 10, &tone))
            .collect::<Vec<_>>();
        assert!(pitches.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_empty_grid_uses_min_frequency() {
        let tone = ToneConfig::default();
        assert_eq!(cell_frequency((0, 0), 0, 0, &tone), 200.0);
    }
}
