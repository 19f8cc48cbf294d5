//! Property tests for the quantile-to-bin partition and dot expansion

use proptest::prelude::*;
use qdot_stats::{compute_ntiles, expand_dots, HistBins, Ntiles};

fn sample_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6f64..1.0e6, 1..200)
}

fn assert_equally_spaced(ntiles: &Ntiles) {
    for pair in ntiles.centers.windows(2) {
        assert!(pair[1] > pair[0], "centers must ascend: {:?}", ntiles.centers);
        let gap = pair[1] - pair[0];
        let tol = 1e-9 * ntiles.bin_width.abs().max(1.0) + 1e-9 * pair[1].abs();
        assert!(
            (gap - ntiles.bin_width).abs() <= tol,
            "gap {} differs from bin width {}",
            gap,
            ntiles.bin_width
        );
    }
}

#[test]
fn test_ten_values_four_dots_two_bins() {
    let data: Vec<f64> = (1..=10).map(|x| x as f64).collect();
    let ntiles = compute_ntiles(&data, 4, HistBins::Fixed(2)).unwrap();

    assert_eq!(ntiles.quantiles, vec![2.125, 4.375, 6.625, 8.875]);
    assert_eq!(ntiles.centers.len(), 2);
    assert_eq!(ntiles.total(), 4);
}

#[test]
fn test_constant_sample_single_bin() {
    let ntiles = compute_ntiles(&[5.0, 5.0, 5.0, 5.0, 5.0], 3, HistBins::Fixed(1)).unwrap();
    assert_eq!(ntiles.counts, vec![3]);
    assert_eq!(ntiles.centers, vec![5.0]);
}

#[test]
fn test_hist_bins_serde() {
    let auto: HistBins = serde_json::from_str("\"auto\"").unwrap();
    assert_eq!(auto, HistBins::Auto);
    let fixed: HistBins = serde_json::from_str("6").unwrap();
    assert_eq!(fixed, HistBins::Fixed(6));
    assert!(serde_json::from_str::<HistBins>("0").is_err());
    assert!(serde_json::from_str::<HistBins>("\"lots\"").is_err());

    assert_eq!(serde_json::to_string(&HistBins::Auto).unwrap(), "\"auto\"");
    assert_eq!(serde_json::to_string(&HistBins::Fixed(6)).unwrap(), "6");
}

proptest! {
    #[test]
    fn test_fixed_bins_shape(data in sample_strategy(), dots in 1usize..60, bins in 1usize..30) {
        let ntiles = compute_ntiles(&data, dots, HistBins::Fixed(bins)).unwrap();
        prop_assert_eq!(ntiles.total(), dots);
        prop_assert_eq!(ntiles.centers.len(), bins);
        prop_assert_eq!(ntiles.counts.len(), bins);
        assert_equally_spaced(&ntiles);
    }

    #[test]
    fn test_auto_bins_balanced(data in sample_strategy(), dots in 1usize..80) {
        let ntiles = compute_ntiles(&data, dots, HistBins::Auto).unwrap();
        prop_assert_eq!(ntiles.total(), dots);
        prop_assert!(ntiles.max_count() + 2 <= ntiles.counts.len());
        prop_assert!(ntiles.counts.len() <= dots + 2);
        assert_equally_spaced(&ntiles);
    }

    #[test]
    fn test_deterministic(data in sample_strategy(), dots in 1usize..40) {
        let a = compute_ntiles(&data, dots, HistBins::Auto).unwrap();
        let b = compute_ntiles(&data, dots, HistBins::Auto).unwrap();
        prop_assert_eq!(a.centers.iter().map(|c| c.to_bits()).collect::<Vec<_>>(),
                        b.centers.iter().map(|c| c.to_bits()).collect::<Vec<_>>());
        prop_assert_eq!(a.counts, b.counts);
    }

    #[test]
    fn test_expansion_columns(counts in prop::collection::vec(0usize..12, 0..20)) {
        let centers: Vec<f64> = (0..counts.len()).map(|i| i as f64 * 0.75 - 3.0).collect();
        let dots = expand_dots(&centers, &counts).unwrap();
        prop_assert_eq!(dots.len(), counts.iter().sum::<usize>());

        let mut offset = 0;
        for (center, &k) in centers.iter().zip(&counts) {
            let xs = &dots.x[offset..offset + k];
            let ys = &dots.y[offset..offset + k];
            prop_assert!(xs.iter().all(|x| x == center));
            let expected: Vec<f64> = (0..k).map(|j| j as f64 + 0.5).collect();
            prop_assert_eq!(ys, expected.as_slice());
            offset += k;
        }
    }
}
