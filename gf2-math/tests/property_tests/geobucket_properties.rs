//! Property-based tests for geobucket accumulation
//!
//! Tests that the geobucket forms of multiplication, division and
//! substitution agree with the classic forms for every growth factor.

use crate::{arb_nonzero_poly, arb_poly, arb_ring};
use gf2_math::{Geobucket, MonomialOrder, Polynomial};
use proptest::prelude::*;

const FACTORS: std::ops::RangeInclusive<usize> = 2..=4;

fn summands() -> impl Strategy<Value = Vec<Polynomial>> {
    arb_ring(7).prop_flat_map(|(n, order)| prop::collection::vec(arb_poly(n, order, 24), 1..12))
}

fn pair() -> impl Strategy<Value = (Polynomial, Polynomial)> {
    let orders = prop_oneof![
        Just(MonomialOrder::Lex),
        Just(MonomialOrder::GrLex),
        Just(MonomialOrder::GRevLex),
    ];
    (1usize..=7, orders).prop_flat_map(|(n, order)| {
        (
            arb_poly(n, order.clone(), 20),
            arb_nonzero_poly(n, order, 6),
        )
    })
}

#[cfg(test)]
mod geobucket_sum_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn sum_matches_naive(polys in summands()) {
            let first = &polys[0];
            let mut naive = Polynomial::zero(first.nvars(), first.order().clone());
            for p in &polys {
                naive += p;
            }
            for factor in FACTORS {
                let mut gb = Geobucket::new(factor, first.nvars(), first.order().clone());
                for p in &polys {
                    gb.sym_diff_splice(&mut p.clone());
                }
                prop_assert_eq!(gb.mount(), naive.clone(), "factor {}", factor);
            }
        }

        #[test]
        fn drain_is_sorted_and_complete(polys in summands()) {
            let first = &polys[0];
            let order = first.order().clone();
            let mut naive = Polynomial::zero(first.nvars(), order.clone());
            for p in &polys {
                naive += p;
            }
            for factor in FACTORS {
                let mut gb = Geobucket::new(factor, first.nvars(), order.clone());
                for p in &polys {
                    gb.sym_diff_splice(&mut p.clone());
                }
                let mut drained = Vec::new();
                while let Some(m) = gb.pop_lm() {
                    drained.push(m);
                }
                for w in drained.windows(2) {
                    prop_assert!(order.greater(&w[0], &w[1]), "factor {}", factor);
                }
                let expected: Vec<_> = naive.iter().cloned().collect();
                prop_assert_eq!(drained, expected, "factor {}", factor);
                prop_assert!(gb.is_empty());
            }
        }
    }
}

#[cfg(test)]
mod geobucket_classic_properties {
    use super::*;

    proptest! {
        #[test]
        fn multiply_matches_classic((p, q) in pair()) {
            let mut fast = p.clone();
            fast.multiply(&q);
            let mut slow = p.clone();
            slow.mul_classic(&q);
            prop_assert_eq!(fast, slow);
        }

        #[test]
        fn remainder_matches_classic((p, d) in pair()) {
            let mut fast = p.clone();
            let mut slow = p.clone();
            prop_assert_eq!(fast.remainder(&d), slow.remainder_classic(&d));
            prop_assert_eq!(fast, slow);
        }

        #[test]
        fn quotient_matches_classic((p, d) in pair()) {
            let mut fast = p.clone();
            fast.quotient(&d);
            let mut slow = p.clone();
            slow.quotient_classic(&d);
            prop_assert_eq!(fast, slow);
        }

        #[test]
        fn replace_matches_classic((p, with) in pair(), var in 0usize..7) {
            let var = var % p.nvars();
            let mut fast = p.clone();
            fast.replace(var, &with);
            let mut slow = p.clone();
            slow.replace_classic(var, &with);
            prop_assert_eq!(fast, slow);
        }
    }
}
