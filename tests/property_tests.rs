//! Property tests for the equality engine's numeric and zero laws.

use attest::{diff, equal, get_len, is_nil, is_zero, ToValue};
use proptest::prelude::*;

proptest! {
    // Cross-width integer equality is exactly magnitude equality.
    #[test]
    fn cross_width_signed_equality(a in any::<i32>(), b in any::<i64>()) {
        prop_assert_eq!(equal(&a.to_value(), &b.to_value()), i64::from(a) == b);
    }

    #[test]
    fn signed_unsigned_equality(a in any::<i64>(), b in any::<u32>()) {
        prop_assert_eq!(equal(&a.to_value(), &b.to_value()), a == i64::from(b));
    }

    // Widening i32 into f64 is lossless, so the conversion rule must accept
    // every such pair.
    #[test]
    fn int_to_double_is_always_convertible_equal(a in any::<i32>()) {
        prop_assert!(equal(&a.to_value(), &f64::from(a).to_value()));
    }

    #[test]
    fn float_int_equality_requires_integral_float(a in any::<i32>(), frac in 0.001f64..0.999) {
        prop_assert!(!equal(&a.to_value(), &(f64::from(a) + frac).to_value()));
    }

    // Reflexivity over a few shapes, and the diff round-trip law.
    #[test]
    fn sequences_are_reflexive(xs in proptest::collection::vec(any::<i64>(), 0..20)) {
        let v = xs.to_value();
        prop_assert!(equal(&v, &v));
        prop_assert_eq!(diff(&v, &v), "");
    }

    #[test]
    fn text_is_reflexive(s in ".*") {
        let v = s.to_value();
        prop_assert!(equal(&v, &v));
        prop_assert_eq!(diff(&v, &v), "");
    }

    #[test]
    fn symmetry_of_numeric_equality(a in any::<i64>(), b in any::<u64>()) {
        prop_assert_eq!(
            equal(&a.to_value(), &b.to_value()),
            equal(&b.to_value(), &a.to_value())
        );
    }

    // Zero and length classification for sequences.
    #[test]
    fn sequence_zero_iff_empty(xs in proptest::collection::vec(1u8..=255, 0..10)) {
        let v = xs.to_value();
        prop_assert_eq!(is_zero(&v), xs.is_empty());
        prop_assert!(!is_nil(&v));
        prop_assert_eq!(get_len(&v), Some(xs.len()));
    }

    #[test]
    fn option_nil_iff_none(x in proptest::option::of(any::<i32>())) {
        prop_assert_eq!(is_nil(&x.to_value()), x.is_none());
    }
}
