//! Property-based tests for monomial orders
//!
//! Tests that every order:
//! - Is a total order with the constant monomial at the bottom
//! - Respects divisibility
//! - Is compatible with multiplication by monomials sharing no variable

use crate::{arb_monomial, arb_ring};
use gf2_math::{Monomial, MonomialOrder};
use proptest::prelude::*;
use std::cmp::Ordering;

fn triple() -> impl Strategy<Value = (MonomialOrder, Monomial, Monomial, Monomial)> {
    arb_ring(8).prop_flat_map(|(n, order)| {
        (
            Just(order),
            arb_monomial(n),
            arb_monomial(n),
            arb_monomial(n),
        )
    })
}

#[cfg(test)]
mod order_basic_properties {
    use super::*;

    proptest! {
        #[test]
        fn compare_is_antisymmetric((order, a, b, _) in triple()) {
            prop_assert_eq!(order.compare(&a, &b), order.compare(&b, &a).reverse());
            prop_assert_eq!(order.compare(&a, &b) == Ordering::Equal, a == b);
        }

        #[test]
        fn compare_is_transitive((order, a, b, c) in triple()) {
            if order.compare(&a, &b) != Ordering::Greater
                && order.compare(&b, &c) != Ordering::Greater
            {
                prop_assert_ne!(order.compare(&a, &c), Ordering::Greater);
            }
        }

        #[test]
        fn one_is_smallest((order, a, _, _) in triple()) {
            let one = Monomial::one(a.nvars());
            prop_assert_ne!(order.compare(&one, &a), Ordering::Greater);
        }

        #[test]
        fn divisor_is_not_greater((order, a, b, _) in triple()) {
            let g = a.gcd(&b);
            prop_assert_ne!(order.compare(&g, &a), Ordering::Greater);
            prop_assert_ne!(order.compare(&a, &a.lcm(&b)), Ordering::Greater);
        }
    }
}

#[cfg(test)]
mod order_multiplicative_properties {
    use super::*;

    proptest! {
        #[test]
        fn disjoint_factor_keeps_comparison((order, a, b, c) in triple()) {
            if c.is_rel_prime(&a) && c.is_rel_prime(&b) {
                prop_assert_eq!(
                    order.compare(&a.product(&c), &b.product(&c)),
                    order.compare(&a, &b)
                );
            }
        }

        #[test]
        fn enumeration_is_increasing((n, order) in arb_ring(6)) {
            if order.supports_next() {
                let all: Vec<Monomial> = order.monomials(n).collect();
                prop_assert_eq!(all.len(), 1usize << n);
                for w in all.windows(2) {
                    prop_assert_eq!(order.compare(&w[0], &w[1]), Ordering::Less);
                }
            }
        }
    }
}
