use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;

#[test]
fn uniform_is_all_ones() {
    assert_eq!(uniform(3), vec![1.0, 1.0, 1.0]);
    assert!(uniform(0).is_empty());
}

#[test]
fn gaussian_peaks_at_the_mean() {
    let w = gaussian(5, 2.0, 1.0);
    assert_eq!(w.len(), 5);
    assert!((w[2] - 1.0).abs() < 1e-12);
    assert!(w[1] < w[2] && w[3] < w[2]);
    assert!((w[1] - w[3]).abs() < 1e-12);
}

#[test]
fn symmetric_beta_binomial_is_symmetric() {
    let w = beta_binomial(7, 2.0, 2.0);
    for i in 0..7 {
        assert!((w[i] - w[6 - i]).abs() < 1e-9, "{w:?}");
    }
    assert!((w[3] - 1.0).abs() < 1e-12);
}

#[test]
fn beta_binomial_with_unit_parameters_is_flat() {
    // Beta(1, 1) mixes every binomial equally: the pmf is uniform.
    let w = beta_binomial(6, 1.0, 1.0);
    for x in w {
        assert!((x - 1.0).abs() < 1e-9);
    }
}

#[test]
fn pinned_zero_survives_reinstall() {
    let category = Category::NumericType;
    let mut table = WeightTable::new();
    table.install(category, uniform(2));
    table.set_zero_probability(category, OpKind::TypeFloat);
    assert_eq!(table.weight(category, OpKind::TypeFloat), Some(0.0));

    table.install(category, vec![5.0, 5.0]);
    assert_eq!(table.weights(category), Some(&[5.0, 0.0][..]));
}

#[test]
fn pin_before_install_applies_on_install() {
    let category = Category::ScalarType;
    let mut table = WeightTable::new();
    table.set_zero_probability(category, OpKind::TypeBool);
    assert!(!table.is_parametrized(category));

    table.install(category, uniform(3));
    assert_eq!(table.weight(category, OpKind::TypeBool), Some(0.0));
    assert_eq!(table.weight(category, OpKind::TypeInt), Some(1.0));
}

#[test]
fn sample_never_returns_zero_weight() {
    let category = Category::ScalarType;
    let mut table = WeightTable::new();
    table.install(category, vec![1.0, 0.0, 0.0]);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    for _ in 0..200 {
        assert_eq!(table.sample(category, &mut rng), Some(OpKind::TypeBool));
    }
    table.set_zero_probability(category, OpKind::TypeBool);
    assert_eq!(table.sample(category, &mut rng), None);
}

#[test]
fn sample_follows_weights() {
    let category = Category::NumericType;
    let mut table = WeightTable::new();
    table.install(category, vec![3.0, 1.0]);
    let mut rng = ChaCha8Rng::seed_from_u64(9);

    let ints = (0..4_000)
        .filter(|_| table.sample(category, &mut rng) == Some(OpKind::TypeInt))
        .count();
    assert!((2_800..=3_200).contains(&ints), "{ints}");
}

#[test]
fn sample_without_table_is_none() {
    let table = WeightTable::new();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    assert_eq!(table.sample(Category::Constant, &mut rng), None);
}

#[test]
#[should_panic(expected = "weights for NumericType")]
fn install_rejects_misaligned_weights() {
    WeightTable::new().install(Category::NumericType, uniform(3));
}

proptest! {
    #[test]
    fn beta_binomial_is_finite_and_normalized(
        n in 1usize..100,
        alpha in 0.5f64..5.0,
        beta in 0.5f64..5.0,
    ) {
        let w = beta_binomial(n, alpha, beta);
        prop_assert_eq!(w.len(), n);
        prop_assert!(w.iter().all(|x| x.is_finite() && *x >= 0.0 && *x <= 1.0 + 1e-12));
        prop_assert!(w.iter().any(|x| (*x - 1.0).abs() < 1e-12));
    }

    #[test]
    fn gaussian_is_never_all_zero(
        n in 1usize..100,
        mean_frac in 0.0f64..1.0,
        std_frac in 0.1f64..0.5,
    ) {
        let len = n as f64;
        let w = gaussian(n, mean_frac * (len - 1.0), std_frac * len);
        prop_assert!(w.iter().any(|x| *x > 0.01));
    }
}
