//! Packed bit vectors.
//!
//! A [`BitVector`] holds `len` boolean coordinates packed into 64-bit words.
//! Coordinate `i` lives in bit `i % 64` of word `i / 64`, so a vector reads as
//! an integer in which coordinate `i` has weight `2^i`. The lexicographic
//! order of the crate is the order of these integers: the highest differing
//! coordinate decides.
//!
//! Bits past `len` in the last word are always zero.

use rand::Rng;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use std::str::FromStr;

use crate::error::{ParseError, ParseResult};

const WORD_BITS: usize = 64;

#[inline]
fn word_count(len: usize) -> usize {
    len.div_ceil(WORD_BITS)
}

/// Fixed-length vector of bits.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct BitVector {
    len: usize,
    words: SmallVec<[u64; 2]>,
}

impl BitVector {
    /// Create the all-zero vector of the given length.
    pub fn zeros(len: usize) -> Self {
        Self {
            len,
            words: SmallVec::from_elem(0, word_count(len)),
        }
    }

    /// Create the all-one vector of the given length.
    pub fn ones(len: usize) -> Self {
        let mut v = Self {
            len,
            words: SmallVec::from_elem(u64::MAX, word_count(len)),
        };
        v.trim();
        v
    }

    /// Create a vector with ones exactly at `indices`.
    pub fn from_indices(len: usize, indices: &[usize]) -> Self {
        let mut v = Self::zeros(len);
        for &i in indices {
            v.set(i, true);
        }
        v
    }

    /// Create a vector from a slice of booleans, coordinate 0 first.
    pub fn from_bits(bits: &[bool]) -> Self {
        let mut v = Self::zeros(bits.len());
        for (i, &b) in bits.iter().enumerate() {
            if b {
                v.set(i, true);
            }
        }
        v
    }

    /// Create a vector from the low `len` bits of `value`.
    pub fn from_index(len: usize, value: u64) -> Self {
        let mut v = Self::zeros(len);
        if let Some(w) = v.words.first_mut() {
            *w = value;
        }
        v.trim();
        v
    }

    /// Integer value of the vector.
    ///
    /// # Panics
    /// Panics if the vector has more than 64 coordinates set beyond the first word.
    pub fn to_index(&self) -> u64 {
        assert!(
            self.words.iter().skip(1).all(|&w| w == 0),
            "bit vector does not fit in 64 bits"
        );
        self.words.first().copied().unwrap_or(0)
    }

    /// Random vector of the given length.
    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let mut v = Self::zeros(len);
        for w in v.words.iter_mut() {
            *w = rng.random();
        }
        v.trim();
        v
    }

    /// Number of coordinates.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the vector has no coordinates at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Packed words, lowest coordinates first.
    #[inline]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    fn trim(&mut self) {
        let rem = self.len % WORD_BITS;
        if rem != 0
            && let Some(last) = self.words.last_mut()
        {
            *last &= (1u64 << rem) - 1;
        }
    }

    /// Value of coordinate `i`.
    #[inline]
    pub fn test(&self, i: usize) -> bool {
        debug_assert!(i < self.len, "bit {i} out of range for length {}", self.len);
        (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1
    }

    /// Set coordinate `i` to `value`.
    #[inline]
    pub fn set(&mut self, i: usize, value: bool) {
        assert!(i < self.len, "bit {i} out of range for length {}", self.len);
        let mask = 1u64 << (i % WORD_BITS);
        if value {
            self.words[i / WORD_BITS] |= mask;
        } else {
            self.words[i / WORD_BITS] &= !mask;
        }
    }

    /// Invert coordinate `i`.
    #[inline]
    pub fn flip(&mut self, i: usize) {
        assert!(i < self.len, "bit {i} out of range for length {}", self.len);
        self.words[i / WORD_BITS] ^= 1u64 << (i % WORD_BITS);
    }

    /// Set coordinates `start..end` to `value`.
    pub fn set_range(&mut self, start: usize, end: usize, value: bool) {
        assert!(start <= end && end <= self.len);
        for i in start..end {
            self.set(i, value);
        }
    }

    /// Set every coordinate to `value`.
    pub fn set_all(&mut self, value: bool) {
        let fill = if value { u64::MAX } else { 0 };
        self.words.iter_mut().for_each(|w| *w = fill);
        self.trim();
    }

    /// Whether every coordinate is zero.
    #[inline]
    pub fn is_all_zero(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Whether every coordinate is one.
    pub fn is_all_ones(&self) -> bool {
        self.weight() == self.len
    }

    /// Hamming weight.
    #[inline]
    pub fn weight(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Sum of the coordinates over GF(2).
    #[inline]
    pub fn parity(&self) -> bool {
        self.words.iter().fold(0, |acc, w| acc ^ w.count_ones()) & 1 == 1
    }

    /// Indices of the one coordinates, ascending.
    pub fn ones_iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(k, &w)| {
            let mut rest = w;
            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let bit = rest.trailing_zeros() as usize;
                rest &= rest - 1;
                Some(k * WORD_BITS + bit)
            })
        })
    }

    /// Whether `self AND other` is zero.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(a, b)| a & b == 0)
    }

    /// Whether every one coordinate of `self` is also one in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        let mut other_words = other.words.iter();
        self.words
            .iter()
            .all(|a| a & !other_words.next().copied().unwrap_or(0) == 0)
    }

    // Enumeration

    /// Lexicographically first vector of the given weight: `1^w 0^(n-w)`.
    pub fn first(&mut self, weight: usize) {
        assert!(weight <= self.len);
        self.set_range(0, weight, true);
        self.set_range(weight, self.len, false);
    }

    /// Lexicographically last vector of the given weight: `0^(n-w) 1^w`.
    pub fn last(&mut self, weight: usize) {
        assert!(weight <= self.len);
        self.set_range(0, self.len - weight, false);
        self.set_range(self.len - weight, self.len, true);
    }

    /// Advance to the next vector in lexicographic (integer) order.
    ///
    /// Returns `false` when the all-one vector wraps around to zero.
    pub fn next(&mut self) -> bool {
        for i in 0..self.len {
            if self.test(i) {
                self.set(i, false);
            } else {
                self.set(i, true);
                return true;
            }
        }
        false
    }

    /// Step back to the previous vector in lexicographic order.
    ///
    /// Returns `false` when zero wraps around to the all-one vector.
    pub fn prev(&mut self) -> bool {
        for i in 0..self.len {
            if self.test(i) {
                self.set(i, false);
                return true;
            }
            self.set(i, true);
        }
        false
    }

    /// Advance to the next vector of the same weight.
    ///
    /// Returns `false` (and restarts at [`first`](Self::first)) after the last
    /// vector of that weight, and for the zero vector.
    pub fn next_same_weight(&mut self) -> bool {
        let n = self.len;
        let mut start = 0;
        while start < n && !self.test(start) {
            start += 1;
        }
        if start == n {
            return false;
        }
        let mut end = start + 1;
        while end < n && self.test(end) {
            end += 1;
        }
        if end == n {
            self.first(end - start);
            return false;
        }
        // 0^start 1^(end-start) 0 ... -> 1^(end-start-1) 0^(start+1) 1 ...
        self.set_range(0, end - start - 1, true);
        self.set_range(end - start - 1, end, false);
        self.set(end, true);
        true
    }

    /// Step back to the previous vector of the same weight.
    ///
    /// Returns `false` (and restarts at [`last`](Self::last)) before the first
    /// vector of that weight, and for the zero vector.
    pub fn prev_same_weight(&mut self) -> bool {
        let n = self.len;
        let mut pos = 0;
        while pos < n && !self.test(pos) {
            pos += 1;
        }
        if pos == n {
            return false;
        }
        if pos > 0 {
            self.set(pos - 1, true);
            self.set(pos, false);
            return true;
        }
        let mut end = 1;
        while end < n && self.test(end) {
            end += 1;
        }
        pos = end;
        while pos < n && !self.test(pos) {
            pos += 1;
        }
        if pos == n {
            self.last(end);
            return false;
        }
        // 1^end 0^(pos-end) 1 ... -> 0^(pos-end-1) 1^(end+1) 0 ...
        self.set_range(0, pos - end - 1, false);
        self.set_range(pos - end - 1, pos, true);
        self.set(pos, false);
        true
    }

    // Rearrangement

    /// Reverse the order of the coordinates.
    pub fn reverse(&mut self) {
        let n = self.len;
        for i in 0..n / 2 {
            let (a, b) = (self.test(i), self.test(n - 1 - i));
            if a != b {
                self.flip(i);
                self.flip(n - 1 - i);
            }
        }
    }

    /// Copy of `len` coordinates starting at `start`.
    pub fn extract(&self, start: usize, len: usize) -> Self {
        assert!(start + len <= self.len);
        let mut out = Self::zeros(len);
        for (k, word) in out.words.iter_mut().enumerate() {
            let bit = start + k * WORD_BITS;
            let (idx, off) = (bit / WORD_BITS, bit % WORD_BITS);
            let lo = self.words.get(idx).copied().unwrap_or(0) >> off;
            let hi = if off == 0 {
                0
            } else {
                self.words.get(idx + 1).copied().unwrap_or(0) << (WORD_BITS - off)
            };
            *word = lo | hi;
        }
        out.trim();
        out
    }

    /// Overwrite coordinates `start..start + part.len()` with `part`.
    pub fn insert(&mut self, start: usize, part: &Self) {
        assert!(start + part.len <= self.len);
        for i in 0..part.len {
            self.set(start + i, part.test(i));
        }
    }

    /// The first `m` coordinates.
    #[inline]
    pub fn left(&self, m: usize) -> Self {
        self.extract(0, m)
    }

    /// The last `m` coordinates.
    #[inline]
    pub fn right(&self, m: usize) -> Self {
        assert!(m <= self.len);
        self.extract(self.len - m, m)
    }

    /// Overwrite the first `part.len()` coordinates.
    #[inline]
    pub fn set_left(&mut self, part: &Self) {
        self.insert(0, part);
    }

    /// Overwrite the last `part.len()` coordinates.
    #[inline]
    pub fn set_right(&mut self, part: &Self) {
        assert!(part.len <= self.len);
        self.insert(self.len - part.len, part);
    }

    /// Concatenation: `self` occupies the low coordinates, `other` the high ones.
    pub fn concat(&self, other: &Self) -> Self {
        let mut out = self.resized(self.len + other.len);
        out.insert(self.len, other);
        out
    }

    /// Copy with a different length, truncating or padding with zeros.
    pub fn resized(&self, len: usize) -> Self {
        let mut out = Self::zeros(len);
        for (dst, src) in out.words.iter_mut().zip(self.words.iter()) {
            *dst = *src;
        }
        out.trim();
        out
    }

    /// Keep the coordinates selected by `mask`, moved down to positions `0, 1, ...`.
    pub fn pack(&mut self, mask: &Self) {
        assert_eq!(self.len, mask.len);
        let mut out = Self::zeros(self.len);
        for (k, i) in mask.ones_iter().enumerate() {
            out.set(k, self.test(i));
        }
        *self = out;
    }

    /// Inverse of [`pack`](Self::pack): spread the low coordinates over the
    /// positions selected by `mask`, zeroing the rest.
    pub fn unpack(&mut self, mask: &Self) {
        assert_eq!(self.len, mask.len);
        let mut out = Self::zeros(self.len);
        for (k, i) in mask.ones_iter().enumerate() {
            out.set(i, self.test(k));
        }
        *self = out;
    }

    /// Replace coordinate `i` by coordinate `pi[i]` (zero for `None`).
    pub fn permute(&mut self, pi: &[Option<usize>]) {
        assert_eq!(pi.len(), self.len, "permutation length mismatch");
        let mut out = Self::zeros(self.len);
        for (i, src) in pi.iter().enumerate() {
            if let Some(j) = *src {
                out.set(i, self.test(j));
            }
        }
        *self = out;
    }

    /// Read a vector written as `'0'`/`'1'` characters, coordinate 0 first.
    pub fn parse(text: &str) -> ParseResult<Self> {
        let trimmed = text.trim_start();
        let base = text.len() - trimmed.len();
        let digits = trimmed.trim_end();
        if digits.is_empty() {
            return Err(ParseError::UnexpectedEnd { offset: text.len() });
        }
        let mut v = Self::zeros(digits.len());
        for (i, c) in digits.char_indices() {
            match c {
                '0' => {}
                '1' => v.set(i, true),
                found => {
                    return Err(ParseError::UnexpectedChar {
                        found,
                        offset: base + i,
                    });
                }
            }
        }
        Ok(v)
    }
}

impl Ord for BitVector {
    fn cmp(&self, other: &Self) -> Ordering {
        let n = self.words.len().max(other.words.len());
        for pos in (0..n).rev() {
            let a = self.words.get(pos).copied().unwrap_or(0);
            let b = other.words.get(pos).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        self.len.cmp(&other.len)
    }
}

impl PartialOrd for BitVector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

macro_rules! bitwise_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $assign_trait<&BitVector> for BitVector {
            fn $assign_method(&mut self, rhs: &BitVector) {
                assert_eq!(self.len, rhs.len, "bit vector length mismatch");
                for (a, b) in self.words.iter_mut().zip(rhs.words.iter()) {
                    *a = *a $op *b;
                }
            }
        }

        impl $trait<&BitVector> for &BitVector {
            type Output = BitVector;

            fn $method(self, rhs: &BitVector) -> BitVector {
                let mut out = self.clone();
                out.$assign_method(rhs);
                out
            }
        }
    };
}

bitwise_op!(BitAnd, bitand, BitAndAssign, bitand_assign, &);
bitwise_op!(BitOr, bitor, BitOrAssign, bitor_assign, |);
bitwise_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^);

impl Not for &BitVector {
    type Output = BitVector;

    fn not(self) -> BitVector {
        let mut out = self.clone();
        out.words.iter_mut().for_each(|w| *w = !*w);
        out.trim();
        out
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len {
            f.write_str(if self.test(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitVector({self})")
    }
}

impl FromStr for BitVector {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_set_flip_weight() {
        let mut w = BitVector::zeros(127);
        w.set(12, true);
        w.flip(12);
        w.flip(12);
        assert_eq!(w.weight(), 1);

        w.set_range(14, 23, true);
        w.reverse();
        assert_eq!(w.weight(), 1 + 23 - 14);
        assert!(w.test(126 - 12));

        w.set_all(true);
        assert!(w.is_all_ones());
        assert_eq!(w.weight(), 127);
    }

    #[test]
    fn test_trim_keeps_high_bits_clear() {
        let w = !&BitVector::zeros(70);
        assert_eq!(w.weight(), 70);
        assert_eq!(w.words()[1], (1u64 << 6) - 1);
    }

    #[test]
    fn test_lex_order_is_integer_order() {
        let a = BitVector::from_index(3, 0b110);
        let b = BitVector::from_index(3, 0b011);
        assert!(a > b);
        assert_eq!(a.to_string(), "011");
        assert_eq!(b.to_string(), "110");
    }

    #[test]
    fn test_next_wraps_around() {
        let mut w = BitVector::zeros(3);
        let mut count = 1;
        while w.next() {
            count += 1;
        }
        assert_eq!(count, 8);
        assert!(w.is_all_zero());

        assert!(!w.prev());
        assert!(w.is_all_ones());
        assert!(w.prev());
        assert_eq!(w.to_index(), 6);
    }

    #[test]
    fn test_same_weight_enumeration() {
        let mut w = BitVector::zeros(5);
        w.first(2);
        let mut seen = vec![w.to_index()];
        while w.next_same_weight() {
            seen.push(w.to_index());
        }
        assert_eq!(seen.len(), 10);
        assert!(seen.windows(2).all(|p| p[0] < p[1]));
        assert_eq!(w.to_index(), 0b00011);

        w.last(2);
        let mut back = vec![w.to_index()];
        while w.prev_same_weight() {
            back.push(w.to_index());
        }
        back.reverse();
        assert_eq!(back, seen);
    }

    #[test]
    fn test_left_right_concat() {
        let w = BitVector::from_indices(130, &[0, 63, 64, 100, 129]);
        let left = w.left(65);
        let right = w.right(65);
        assert_eq!(left.ones_iter().collect::<Vec<_>>(), vec![0, 63, 64]);
        assert_eq!(right.ones_iter().collect::<Vec<_>>(), vec![35, 64]);
        assert_eq!(left.concat(&right), w);

        let mut z = BitVector::zeros(130);
        z.set_right(&right);
        z.set_left(&left);
        assert_eq!(z, w);
    }

    #[test]
    fn test_pack_unpack_permute() {
        let mask = BitVector::from_indices(6, &[1, 3, 4]);
        let mut w = BitVector::from_indices(6, &[0, 3, 4]);
        w.pack(&mask);
        assert_eq!(w.ones_iter().collect::<Vec<_>>(), vec![1, 2]);
        w.unpack(&mask);
        assert_eq!(w.ones_iter().collect::<Vec<_>>(), vec![3, 4]);

        w.permute(&[Some(3), None, Some(4), Some(0), None, Some(5)]);
        assert_eq!(w.ones_iter().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_text_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);
        let w = BitVector::random(126, &mut rng);
        let back: BitVector = w.to_string().parse().unwrap();
        assert_eq!(back, w);

        assert!(matches!(
            BitVector::parse("01x"),
            Err(ParseError::UnexpectedChar { found: 'x', offset: 2 })
        ));
    }
}
