//! Property-based tests for polynomial systems
//!
//! Tests the following properties:
//! - Self-reduction and self-minimization are idempotent
//! - Normal forms have no monomial divisible by a leading monomial
//! - Buchberger's algorithm yields a Gröbner basis
//! - The quotient dimension counts the solutions found by brute force

use crate::{arb_nonzero_poly, arb_order};
use gf2_math::{BitVector, Buchberger, Ideal, MonomialOrder};
use num_bigint::BigUint;
use proptest::prelude::*;

fn arb_system(max_vars: usize, max_polys: usize) -> impl Strategy<Value = Ideal> {
    let orders = prop_oneof![
        Just(MonomialOrder::Lex),
        Just(MonomialOrder::GrLex),
        Just(MonomialOrder::GRevLex),
    ];
    (1usize..=max_vars, orders).prop_flat_map(move |(n, order)| {
        prop::collection::vec(arb_nonzero_poly(n, order.clone(), 5), 1..=max_polys)
            .prop_map(move |polys| Ideal::from_polynomials(n, order.clone(), polys))
    })
}

fn groebner(system: &Ideal) -> Ideal {
    let mut bb = Buchberger::new(system.nvars(), system.order().clone());
    bb.update_ideal(system);
    bb.process();
    bb.done()
}

fn count_solutions(system: &Ideal) -> u64 {
    let n = system.nvars();
    (0..1u64 << n)
        .filter(|&v| {
            let point = BitVector::from_index(n, v);
            system.iter().all(|p| !p.eval(&point))
        })
        .count() as u64
}

#[cfg(test)]
mod reduction_properties {
    use super::*;

    proptest! {
        #[test]
        fn self_reduce_is_idempotent(mut system in arb_system(6, 5)) {
            system.self_reduce();
            let once = system.clone();
            system.self_reduce();
            prop_assert_eq!(system, once);
        }

        #[test]
        fn self_minimize_is_idempotent(mut system in arb_system(6, 5)) {
            system.self_minimize();
            let once = system.clone();
            system.self_minimize();
            prop_assert_eq!(&system, &once);
            prop_assert!(system.is_normalized());
            for (i, p) in system.iter().enumerate() {
                for (j, q) in system.iter().enumerate() {
                    if i != j {
                        prop_assert!(!p.lm().divides(q.lm()), "{} divides {}", p.lm(), q.lm());
                    }
                }
            }
        }

        #[test]
        fn self_reduce_keeps_solutions(system in arb_system(6, 5)) {
            let mut reduced = system.clone();
            reduced.self_reduce();
            prop_assert!(reduced.is_normalized());
            let n = system.nvars();
            for v in 0..1u64 << n {
                let point = BitVector::from_index(n, v);
                let before = system.iter().all(|p| !p.eval(&point));
                let after = reduced.iter().all(|p| !p.eval(&point));
                prop_assert!(!before || after);
            }
        }

        #[test]
        fn normal_form_is_irreducible(
            (system, mut p) in arb_system(6, 4).prop_flat_map(|s| {
                let poly = arb_nonzero_poly(s.nvars(), s.order().clone(), 16);
                (Just(s), poly)
            })
        ) {
            system.reduce(&mut p);
            for m in p.iter() {
                prop_assert!(system.iter().all(|g| !g.lm().divides(m)));
            }
            let mut classic = p.clone();
            prop_assert!(!system.reduce_classic(&mut classic));
        }

        #[test]
        fn minimize_leaves_irreducible_leader(
            (system, mut p) in arb_system(6, 4).prop_flat_map(|s| {
                let poly = arb_nonzero_poly(s.nvars(), s.order().clone(), 16);
                (Just(s), poly)
            })
        ) {
            system.minimize(&mut p);
            if let Some(lm) = p.leading_monomial() {
                prop_assert!(system.iter().all(|g| !g.lm().divides(lm)));
            }
        }
    }
}

#[cfg(test)]
mod groebner_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn buchberger_yields_basis(system in arb_system(4, 3)) {
            let gb = groebner(&system);
            prop_assert!(gb.is_gb());
            for p in system.iter() {
                let mut r = p.clone();
                gb.reduce(&mut r);
                prop_assert!(r.is_zero());
            }
        }

        #[test]
        fn dimension_counts_solutions(system in arb_system(5, 3)) {
            let gb = groebner(&system);
            let n = system.nvars();
            let expected = BigUint::from(count_solutions(&system));
            if gb.is_empty() {
                prop_assert_eq!(expected, BigUint::from(1u64 << n));
            } else {
                let free = n - gb.gather_vars().weight();
                prop_assert_eq!(gb.quotient_basis_dim() << free, expected);
            }
        }

        #[test]
        fn quotient_basis_matches_dimension(
            (system, order) in arb_system(5, 3)
                .prop_flat_map(|s| {
                    let order = arb_order(s.nvars());
                    (Just(s), order)
                }),
        ) {
            let gb = groebner(&system);
            let basis = gb.quotient_basis(order);
            prop_assert_eq!(BigUint::from(basis.len()), gb.quotient_basis_dim());
        }

        #[test]
        fn solution_count_is_order_independent(system in arb_system(4, 3)) {
            let gb = groebner(&system);
            let other = groebner(&system.with_order(MonomialOrder::GrLex));
            prop_assert_eq!(
                gb.quotient_basis_dim() << (system.nvars() - gb.gather_vars().weight()),
                other.quotient_basis_dim() << (system.nvars() - other.gather_vars().weight())
            );
        }
    }
}
