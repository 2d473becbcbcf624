use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use resample_cv::data::Dataset;
use resample_cv::evaluate::{compare_models, cross_validate};
use resample_cv::metrics::Metric;
use resample_cv::model::{Formula, ModelSpec};
use resample_cv::resample::{HoldOut, generate_splits};
use resample_cv::Error;

/// 100 rows of `y = 1 + 2x + N(0, 1)` with `x` uniform on [0, 10).
fn noisy_line(seed: u64) -> Arc<Dataset> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1.0).expect("valid normal");
    let x: Vec<f64> = (0..100).map(|_| rng.random_range(0.0..10.0)).collect();
    let y: Vec<f64> = x.iter().map(|v| 1.0 + 2.0 * v + noise.sample(&mut rng)).collect();
    Arc::new(Dataset::from_columns(&[("x", &x), ("y", &y)]).expect("equal-length columns"))
}

#[test]
fn linear_model_beats_overfit_smooth_in_mean_and_spread() {
    let dataset = noisy_line(2024);
    let splits = generate_splits(&dataset, 100, HoldOut::Fraction(0.2), 42).expect("valid split");
    assert_eq!(splits.len(), 100);

    let formula = Formula::new("y", "x");
    let candidates = vec![
        ("linear".to_string(), ModelSpec::Linear),
        ("wiggly".to_string(), ModelSpec::Smooth { span: 0.03 }),
    ];
    let results = compare_models(&splits, &candidates, &formula, Metric::Rmse).expect("fits");
    let linear = results[0].summary().expect("scores");
    let wiggly = results[1].summary().expect("scores");

    assert_eq!(linear.n, 100);
    assert!(
        linear.mean < wiggly.mean,
        "linear mean {} vs wiggly mean {}",
        linear.mean,
        wiggly.mean
    );
    assert!(
        linear.sd < wiggly.sd,
        "linear sd {} vs wiggly sd {}",
        linear.sd,
        wiggly.sd
    );
    // Held-out error of the right model sits near the noise level.
    assert!((0.7..1.3).contains(&linear.mean), "linear mean {}", linear.mean);
}

#[test]
fn same_seed_gives_same_scores() {
    let dataset = noisy_line(7);
    let formula = Formula::new("y", "x");
    let run = || {
        let splits = generate_splits(&dataset, 20, HoldOut::Count(20), 99).expect("valid split");
        cross_validate(&splits, &ModelSpec::Smooth { span: 0.5 }, &formula, Metric::Mae)
            .expect("fits")
            .scores
    };
    assert_eq!(run(), run());
}

#[test]
fn every_split_is_a_partition_of_eighty_and_twenty() {
    let dataset = noisy_line(1);
    let splits = generate_splits(&dataset, 100, HoldOut::Count(20), 3).expect("valid split");
    for (train, test) in splits.iter() {
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(), 20);
        assert!(test.indices().iter().all(|i| !train.indices().contains(i)));
        assert!(train.indices().iter().chain(test.indices()).all(|&i| i < 100));
    }
}

#[test]
fn materialized_split_matches_its_view() {
    let dataset = noisy_line(5);
    let splits = generate_splits(&dataset, 1, HoldOut::Fraction(0.2), 8).expect("valid split");
    let test = splits.test(0).expect("split 0");
    let table = test.materialize();
    assert_eq!(table.len(), 20);
    assert_eq!(
        table.numeric_column("y").expect("numeric"),
        test.numeric_column("y").expect("numeric")
    );
}

#[test]
fn holdout_as_large_as_dataset_is_invalid() {
    let dataset = noisy_line(5);
    for holdout in [HoldOut::Count(100), HoldOut::Count(250)] {
        let err = generate_splits(&dataset, 10, holdout, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }
}
