//! Monomial orders.
//!
//! Every order is a total order on the squarefree monomials of a fixed number
//! of variables, compatible with multiplication, and usable for Gröbner basis
//! computations. Besides the classical lex, graded lex and graded reverse lex
//! orders, the module provides a matrix order (alex) and combinators that
//! build new orders from old ones: variable reversal, grading and the two
//! block (elimination) orders.
//!
//! Most orders can also enumerate all monomials in increasing order through
//! [`MonomialOrder::next`]. The alex and graded combinators cannot.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::bitvec::BitVector;
use crate::monomial::Monomial;

/// Square weight matrix of an alex order.
///
/// `rows[pos][col]` is the weight variable `pos` contributes to column `col`.
/// Monomials are mapped to the integer vectors `sum_{i in m} rows[i]` which
/// are then compared lexicographically from the last column down. The matrix
/// must define a total order: the last nonzero entry of each row is positive
/// and the rows are linearly independent over the rationals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlexMatrix {
    rows: Vec<Vec<u64>>,
}

impl AlexMatrix {
    /// Create a matrix from its rows.
    ///
    /// # Panics
    /// Panics if the matrix is not square.
    pub fn new(rows: Vec<Vec<u64>>) -> Self {
        let n = rows.len();
        assert!(
            rows.iter().all(|r| r.len() == n),
            "alex matrix must be square"
        );
        Self { rows }
    }

    /// The identity matrix, which gives the lex order.
    pub fn identity(n: usize) -> Self {
        let rows = (0..n)
            .map(|pos| (0..n).map(|col| u64::from(pos == col)).collect())
            .collect();
        Self { rows }
    }

    /// Number of variables.
    #[inline]
    pub fn nvars(&self) -> usize {
        self.rows.len()
    }

    /// Entry at `(pos, col)`.
    #[inline]
    pub fn get(&self, pos: usize, col: usize) -> u64 {
        self.rows[pos][col]
    }

    fn column_weight(&self, m: &Monomial, col: usize) -> u64 {
        m.vars().map(|pos| self.rows[pos][col]).sum()
    }
}

/// A monomial order.
///
/// Composite orders share their parts through [`Arc`], so cloning an order
/// is cheap. Two orders are equal when they agree structurally, including
/// the alex weights; equal orders compare every pair of monomials alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum MonomialOrder {
    /// Lexicographic order: the highest differing variable decides.
    #[default]
    Lex,
    /// Degree first, then lex.
    GrLex,
    /// Degree first, then the monomial containing the lowest differing
    /// variable is smaller.
    GRevLex,
    /// Matrix order.
    Alex(Arc<AlexMatrix>),
    /// Reverse the variables, then compare with the inner order.
    Rev(Arc<MonomialOrder>),
    /// Degree first, then the inner order.
    Graded(Arc<MonomialOrder>),
    /// Block order eliminating the first `split` variables: the left blocks
    /// are compared first and the right blocks break ties.
    LeftRight {
        /// Number of variables in the left block
        split: usize,
        /// Order on the left block
        left: Arc<MonomialOrder>,
        /// Order on the right block
        right: Arc<MonomialOrder>,
    },
    /// Block order eliminating the last variables: the right blocks are
    /// compared first and the left blocks break ties.
    RightLeft {
        /// Number of variables in the left block
        split: usize,
        /// Order on the left block
        left: Arc<MonomialOrder>,
        /// Order on the right block
        right: Arc<MonomialOrder>,
    },
}

impl MonomialOrder {
    /// Matrix order with the given weights.
    pub fn alex(matrix: AlexMatrix) -> Self {
        Self::Alex(Arc::new(matrix))
    }

    /// `Rev(inner)`.
    pub fn rev(inner: MonomialOrder) -> Self {
        Self::Rev(Arc::new(inner))
    }

    /// `Graded(inner)`.
    pub fn graded(inner: MonomialOrder) -> Self {
        Self::Graded(Arc::new(inner))
    }

    /// Block order comparing the first `split` variables first.
    pub fn left_right(split: usize, left: MonomialOrder, right: MonomialOrder) -> Self {
        Self::LeftRight {
            split,
            left: Arc::new(left),
            right: Arc::new(right),
        }
    }

    /// Block order comparing the variables from `split` on first.
    pub fn right_left(split: usize, left: MonomialOrder, right: MonomialOrder) -> Self {
        Self::RightLeft {
            split,
            left: Arc::new(left),
            right: Arc::new(right),
        }
    }

    /// Compare two monomials over the same variables.
    pub fn compare(&self, a: &Monomial, b: &Monomial) -> Ordering {
        debug_assert_eq!(a.nvars(), b.nvars(), "monomials of different rings");
        match self {
            Self::Lex => a.cmp(b),
            Self::GrLex => a.degree().cmp(&b.degree()).then_with(|| a.cmp(b)),
            Self::GRevLex => a
                .degree()
                .cmp(&b.degree())
                .then_with(|| grevlex_tie(a.bits(), b.bits())),
            Self::Alex(matrix) => {
                debug_assert_eq!(matrix.nvars(), a.nvars());
                for col in (0..matrix.nvars()).rev() {
                    let ord = matrix
                        .column_weight(a, col)
                        .cmp(&matrix.column_weight(b, col));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                debug_assert_eq!(a, b, "alex matrix does not define a total order");
                Ordering::Equal
            }
            Self::Rev(inner) => {
                let (mut ra, mut rb) = (a.clone(), b.clone());
                ra.reverse();
                rb.reverse();
                inner.compare(&ra, &rb)
            }
            Self::Graded(inner) => a
                .degree()
                .cmp(&b.degree())
                .then_with(|| inner.compare(a, b)),
            Self::LeftRight { split, left, right } => {
                let rest = a.nvars() - split;
                left.compare(&a.left(*split), &b.left(*split))
                    .then_with(|| right.compare(&a.right(rest), &b.right(rest)))
            }
            Self::RightLeft { split, left, right } => {
                let rest = a.nvars() - split;
                right
                    .compare(&a.right(rest), &b.right(rest))
                    .then_with(|| left.compare(&a.left(*split), &b.left(*split)))
            }
        }
    }

    /// Whether `a > b`.
    #[inline]
    pub fn greater(&self, a: &Monomial, b: &Monomial) -> bool {
        self.compare(a, b) == Ordering::Greater
    }

    /// Whether [`next`](Self::next) is available.
    pub fn supports_next(&self) -> bool {
        match self {
            Self::Lex | Self::GrLex | Self::GRevLex => true,
            Self::Alex(_) | Self::Graded(_) => false,
            Self::Rev(inner) => inner.supports_next(),
            Self::LeftRight { left, right, .. } | Self::RightLeft { left, right, .. } => {
                left.supports_next() && right.supports_next()
            }
        }
    }

    /// The smallest monomial of every supported order: `1`.
    #[inline]
    pub fn first(&self, nvars: usize) -> Monomial {
        Monomial::one(nvars)
    }

    /// Replace `m` by its successor.
    ///
    /// Returns `false` when `m` was the greatest monomial; it is then replaced
    /// by the smallest one.
    ///
    /// # Panics
    /// Panics if the order does not support enumeration.
    pub fn next(&self, m: &mut Monomial) -> bool {
        assert!(
            self.supports_next(),
            "monomial order {self} cannot enumerate monomials"
        );
        let mut bits = std::mem::take(m).into_bits();
        let res = self.next_bits(&mut bits);
        *m = Monomial::from_bits(bits);
        res
    }

    fn next_bits(&self, w: &mut BitVector) -> bool {
        match self {
            Self::Lex => w.next(),
            Self::GrLex => grlex_next(w),
            Self::GRevLex => grevlex_next(w),
            Self::Rev(inner) => {
                w.reverse();
                let res = inner.next_bits(w);
                w.reverse();
                res
            }
            Self::LeftRight { split, left, right } => {
                let rest = w.len() - split;
                let mut part = w.right(rest);
                let mut res = right.next_bits(&mut part);
                w.set_right(&part);
                if !res {
                    let mut part = w.left(*split);
                    res = left.next_bits(&mut part);
                    w.set_left(&part);
                }
                res
            }
            Self::RightLeft { split, left, right } => {
                let mut part = w.left(*split);
                let mut res = left.next_bits(&mut part);
                w.set_left(&part);
                if !res {
                    let rest = w.len() - split;
                    let mut part = w.right(rest);
                    res = right.next_bits(&mut part);
                    w.set_right(&part);
                }
                res
            }
            Self::Alex(_) | Self::Graded(_) => unreachable!("checked by supports_next"),
        }
    }

    /// All monomials of `nvars` variables in increasing order.
    ///
    /// # Panics
    /// Panics if the order does not support enumeration.
    pub fn monomials(&self, nvars: usize) -> impl Iterator<Item = Monomial> + '_ {
        assert!(self.supports_next());
        let mut cur = Some(self.first(nvars));
        std::iter::from_fn(move || {
            let m = cur.take()?;
            let mut succ = m.clone();
            if self.next(&mut succ) {
                cur = Some(succ);
            }
            Some(m)
        })
    }
}

impl fmt::Display for MonomialOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex => f.write_str("lex"),
            Self::GrLex => f.write_str("grlex"),
            Self::GRevLex => f.write_str("grevlex"),
            Self::Alex(_) => f.write_str("alex"),
            Self::Rev(inner) => write!(f, "rev({inner})"),
            Self::Graded(inner) => write!(f, "gr({inner})"),
            Self::LeftRight { split, left, right } => write!(f, "lr({split}; {left}, {right})"),
            Self::RightLeft { split, left, right } => write!(f, "rl({split}; {left}, {right})"),
        }
    }
}

/// Tie-break of grevlex for monomials of equal degree.
fn grevlex_tie(a: &BitVector, b: &BitVector) -> Ordering {
    match (a ^ b).ones_iter().next() {
        None => Ordering::Equal,
        Some(i) if a.test(i) => Ordering::Less,
        Some(_) => Ordering::Greater,
    }
}

fn grlex_next(w: &mut BitVector) -> bool {
    let weight = w.weight();
    if weight == 0 {
        if w.is_empty() {
            return false;
        }
        w.set(0, true);
        return true;
    }
    if w.next_same_weight() {
        return true;
    }
    if weight == w.len() {
        w.set_all(false);
        return false;
    }
    w.first(weight + 1);
    true
}

fn grevlex_next(w: &mut BitVector) -> bool {
    let n = w.len();
    let Some(end) = w.ones_iter().last() else {
        if n == 0 {
            return false;
        }
        w.set(0, true);
        return true;
    };
    if end + 1 < n {
        w.set(end, false);
        w.set(end + 1, true);
        return true;
    }
    // the top run of ones ends at n - 1
    let Some(start) = (0..end).rev().find(|&i| !w.test(i)) else {
        w.set_all(false);
        return false;
    };
    let run = end - start;
    match (0..start).rev().find(|&i| w.test(i)) {
        None => {
            w.set_range(0, run + 1, true);
            w.set_range(run + 1, n, false);
        }
        Some(s) => {
            w.set(s, false);
            w.set_range(s + 1, s + run + 2, true);
            w.set_range(s + run + 2, n, false);
        }
    }
    true
}
