//! Donut-chart geometry for the waste composition panel.
//!
//! The engine computes segment data; rendering is a front-end concern.
//! Shares are normalized by their actual total so a composition that does
//! not sum to exactly 100 still fills the ring.

use serde::{Deserialize, Serialize};

use crate::batches::Composition;
use crate::marketplace::Material;

/// Shares below this normalized percentage get no in-slice label.
const LABEL_MIN_PCT: f64 = 5.0;

/// One donut slice. Angles are in radians; the first slice starts at twelve
/// o'clock (-PI/2) and slices proceed clockwise in material order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSegment {
    pub material: Material,
    /// Normalized share of the ring (0-100).
    pub pct: f64,
    pub start_angle: f64,
    pub sweep: f64,
    /// Whether the slice is wide enough to carry a percentage label.
    pub label_visible: bool,
}

/// Compute donut segments for a composition. A zero (or negative) total
/// yields an empty list, which the front end renders as the no-data ring.
pub fn donut_segments(composition: &Composition) -> Vec<ChartSegment> {
    let total = composition.total();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut start_angle = -std::f64::consts::FRAC_PI_2;
    Material::ALL
        .iter()
        .map(|&material| {
            let pct = composition.share(material) / total * 100.0;
            let sweep = pct / 100.0 * std::f64::consts::TAU;
            let segment = ChartSegment {
                material,
                pct,
                start_angle,
                sweep,
                label_visible: pct >= LABEL_MIN_PCT,
            };
            start_angle += sweep;
            segment
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_cover_the_full_ring() {
        let composition = Composition {
            plastic: 35.0,
            paper: 28.0,
            organic: 25.0,
            metal: 12.0,
        };
        let segments = donut_segments(&composition);
        assert_eq!(segments.len(), 4);

        let total_pct: f64 = segments.iter().map(|s| s.pct).sum();
        assert!((total_pct - 100.0).abs() < 1e-9);

        let total_sweep: f64 = segments.iter().map(|s| s.sweep).sum();
        assert!((total_sweep - std::f64::consts::TAU).abs() < 1e-9);

        // Slices tile the ring with no gaps.
        let mut expected_start = -std::f64::consts::FRAC_PI_2;
        for segment in &segments {
            assert!((segment.start_angle - expected_start).abs() < 1e-9);
            expected_start += segment.sweep;
        }
    }

    #[test]
    fn test_shares_normalize_by_actual_total() {
        // Sums to 50, not 100: each value doubles after normalization.
        let composition = Composition {
            plastic: 20.0,
            paper: 15.0,
            organic: 10.0,
            metal: 5.0,
        };
        let segments = donut_segments(&composition);
        assert!((segments[0].pct - 40.0).abs() < 1e-9);
        assert!((segments[1].pct - 30.0).abs() < 1e-9);
        assert!((segments[2].pct - 20.0).abs() < 1e-9);
        assert!((segments[3].pct - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_composition_yields_no_segments() {
        assert!(donut_segments(&Composition::default()).is_empty());
    }

    #[test]
    fn test_small_slices_hide_their_label() {
        let composition = Composition {
            plastic: 93.0,
            paper: 3.0,
            organic: 2.0,
            metal: 2.0,
        };
        let segments = donut_segments(&composition);
        assert!(segments[0].label_visible);
        assert!(!segments[1].label_visible);
        assert!(!segments[2].label_visible);
        assert!(!segments[3].label_visible);
    }
}
