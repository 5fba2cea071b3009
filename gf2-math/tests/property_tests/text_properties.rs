//! Property-based tests for the text format
//!
//! Tests that printed monomials, polynomials and systems read back to
//! the same values, and that malformed input is rejected.

use crate::{arb_monomial, arb_nonzero_poly, arb_poly, arb_ring};
use gf2_math::{Ideal, Monomial, MonomialOrder, ParseError, Polynomial};
use proptest::prelude::*;

fn arb_ideal() -> impl Strategy<Value = Ideal> {
    arb_ring(8).prop_flat_map(|(n, order)| {
        prop::collection::vec(arb_nonzero_poly(n, order.clone(), 6), 0..5)
            .prop_map(move |polys| Ideal::from_polynomials(n, order.clone(), polys))
    })
}

#[cfg(test)]
mod text_roundtrip_properties {
    use super::*;

    proptest! {
        #[test]
        fn monomial_roundtrip(m in (1usize..=16).prop_flat_map(arb_monomial)) {
            let parsed = Monomial::parse(&m.to_string(), m.nvars());
            prop_assert_eq!(parsed, Ok(m));
        }

        #[test]
        fn polynomial_roundtrip(
            p in arb_ring(10)
                .prop_flat_map(|(n, order)| arb_poly(n, order, 12))
        ) {
            let parsed = Polynomial::parse(&p.to_string(), p.nvars(), p.order().clone());
            prop_assert_eq!(parsed, Ok(p));
        }

        #[test]
        fn ideal_roundtrip(ideal in arb_ideal()) {
            let parsed = Ideal::parse(&ideal.to_string(), ideal.nvars(), ideal.order().clone());
            prop_assert_eq!(parsed, Ok(ideal));
        }

        #[test]
        fn out_of_range_variable_rejected(n in 1usize..=16, extra in 0usize..4) {
            let text = format!("x{}", n + extra);
            prop_assert_eq!(
                Monomial::parse(&text, n),
                Err(ParseError::VariableOutOfRange { index: n + extra, nvars: n })
            );
        }

        #[test]
        fn trailing_input_rejected(p in arb_poly(4, MonomialOrder::GrLex, 6)) {
            let text = format!("{p} ;");
            let parsed = Polynomial::parse(&text, 4, MonomialOrder::GrLex);
            let trailing = matches!(parsed, Err(ParseError::TrailingInput { .. }));
            prop_assert!(trailing, "accepted {}", text);
        }
    }
}
