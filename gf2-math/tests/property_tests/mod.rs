//! Property-based tests for gf2-math
//!
//! Random monomials, polynomials and small systems checked against the
//! algebraic laws of the Boolean ring and against brute-force evaluation.

use gf2_math::{AlexMatrix, BitVector, Monomial, MonomialOrder, Polynomial};
use proptest::prelude::*;

mod geobucket_properties;
mod ideal_properties;
mod order_properties;
mod ring_properties;
mod text_properties;

/// Orders that need no variable count.
pub fn arb_plain_order() -> impl Strategy<Value = MonomialOrder> {
    prop_oneof![
        Just(MonomialOrder::Lex),
        Just(MonomialOrder::GrLex),
        Just(MonomialOrder::GRevLex),
        Just(MonomialOrder::rev(MonomialOrder::Lex)),
        Just(MonomialOrder::graded(MonomialOrder::rev(MonomialOrder::Lex))),
    ]
}

/// Lower triangular ones: column `c` weighs the variables from `c` on.
pub fn triangular_alex(nvars: usize) -> MonomialOrder {
    let rows = (0..nvars)
        .map(|pos| (0..nvars).map(|col| u64::from(col <= pos)).collect())
        .collect();
    MonomialOrder::alex(AlexMatrix::new(rows))
}

/// Orders on `nvars` variables, including a non-identity alex order and
/// both block orders.
pub fn arb_order(nvars: usize) -> BoxedStrategy<MonomialOrder> {
    let alex = Just(triangular_alex(nvars));
    if nvars < 2 {
        return prop_oneof![4 => arb_plain_order(), 1 => alex].boxed();
    }
    let block = (1..nvars, arb_plain_order(), arb_plain_order(), any::<bool>()).prop_map(
        |(split, left, right, left_first)| {
            if left_first {
                MonomialOrder::left_right(split, left, right)
            } else {
                MonomialOrder::right_left(split, left, right)
            }
        },
    );
    prop_oneof![4 => arb_plain_order(), 1 => alex, 2 => block].boxed()
}

/// Variable count in `1..=max_vars` with an order on that many variables.
pub fn arb_ring(max_vars: usize) -> impl Strategy<Value = (usize, MonomialOrder)> {
    (1usize..=max_vars).prop_flat_map(|n| (Just(n), arb_order(n)))
}

/// Monomial in `nvars` variables.
pub fn arb_monomial(nvars: usize) -> impl Strategy<Value = Monomial> {
    (0u64..(1u64 << nvars)).prop_map(move |v| Monomial::from_bits(BitVector::from_index(nvars, v)))
}

/// Polynomial with at most `max_terms` monomials.
pub fn arb_poly(
    nvars: usize,
    order: MonomialOrder,
    max_terms: usize,
) -> impl Strategy<Value = Polynomial> {
    prop::collection::vec(arb_monomial(nvars), 0..=max_terms)
        .prop_map(move |ms| Polynomial::from_monomials(nvars, order.clone(), ms))
}

/// Nonzero polynomial with at most `max_terms` monomials.
pub fn arb_nonzero_poly(
    nvars: usize,
    order: MonomialOrder,
    max_terms: usize,
) -> impl Strategy<Value = Polynomial> {
    arb_poly(nvars, order, max_terms).prop_filter("nonzero", |p| !p.is_zero())
}
