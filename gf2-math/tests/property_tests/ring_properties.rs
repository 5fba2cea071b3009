//! Property-based tests for Boolean polynomial arithmetic
//!
//! Tests that polynomials:
//! - Form a commutative ring in which every element is idempotent
//! - Divide with remainder exactly
//! - Evaluate consistently with their arithmetic

use crate::{arb_nonzero_poly, arb_poly, arb_ring};
use gf2_math::{BitVector, MonomialOrder, Polynomial};
use proptest::prelude::*;

fn three_polys() -> impl Strategy<Value = (Polynomial, Polynomial, Polynomial)> {
    arb_ring(6).prop_flat_map(|(n, order)| {
        (
            arb_poly(n, order.clone(), 10),
            arb_poly(n, order.clone(), 10),
            arb_poly(n, order, 10),
        )
    })
}

fn division_input() -> impl Strategy<Value = (Polynomial, Polynomial)> {
    let orders = prop_oneof![
        Just(MonomialOrder::Lex),
        Just(MonomialOrder::GrLex),
        Just(MonomialOrder::GRevLex),
    ];
    (1usize..=6, orders).prop_flat_map(|(n, order)| {
        (
            arb_poly(n, order.clone(), 16),
            arb_nonzero_poly(n, order, 5),
        )
    })
}

#[cfg(test)]
mod ring_law_properties {
    use super::*;

    proptest! {
        #[test]
        fn addition_is_xor((p, q, r) in three_polys()) {
            prop_assert_eq!(&(&p + &q) + &r, &p + &(&q + &r));
            prop_assert_eq!(&p + &q, &q + &p);
            prop_assert!((&p + &p).is_zero());
        }

        #[test]
        fn multiplication_is_commutative_and_associative((p, q, r) in three_polys()) {
            prop_assert_eq!(&p * &q, &q * &p);
            prop_assert_eq!(&(&p * &q) * &r, &p * &(&q * &r));
        }

        #[test]
        fn multiplication_distributes((p, q, r) in three_polys()) {
            prop_assert_eq!(&p * &(&q + &r), &(&p * &q) + &(&p * &r));
        }

        #[test]
        fn square_is_identity((p, _, _) in three_polys()) {
            prop_assert_eq!(&p * &p, p);
        }

        #[test]
        fn evaluation_is_a_homomorphism((p, q, _) in three_polys(), v in any::<u64>()) {
            let n = p.nvars();
            let point = BitVector::from_index(n, v & ((1u64 << n) - 1));
            prop_assert_eq!((&p + &q).eval(&point), p.eval(&point) ^ q.eval(&point));
            prop_assert_eq!((&p * &q).eval(&point), p.eval(&point) & q.eval(&point));
        }
    }
}

#[cfg(test)]
mod division_properties {
    use super::*;

    proptest! {
        #[test]
        fn division_is_exact((p, d) in division_input()) {
            let q = &p / &d;
            let r = &p % &d;
            prop_assert_eq!(&(&q * &d) + &r, p);
            prop_assert!(r.iter().all(|m| !d.lm().divides(m)));
        }

        #[test]
        fn remainder_reports_change((p, d) in division_input()) {
            let mut r = p.clone();
            let changed = r.remainder(&d);
            prop_assert_eq!(changed, p.iter().any(|m| d.lm().divides(m)));
        }

        #[test]
        fn s_polynomial_cancels_leaders((p, d) in division_input()) {
            if !p.is_zero() {
                let s = Polynomial::s_poly(&p, &d);
                let lcm = p.lm().lcm(d.lm());
                prop_assert!(!s.contains(&lcm));
            }
        }
    }
}
