//! Position-stable polynomial storage for the Buchberger engine.
//!
//! Critical pairs refer to polynomials by [`PolyId`]. A slot is never freed
//! or moved before the next reset, so a handle stays valid while its
//! polynomial is reduced in place or moved between the active basis and the
//! reserve.

use crate::ideal::reduce_by;
use crate::monomial::Monomial;
use crate::order::MonomialOrder;
use crate::polynomial::Polynomial;

/// Handle of a polynomial owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PolyId(usize);

impl PolyId {
    /// Slot index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Arena of polynomials with a sorted active list and a reserve list.
#[derive(Debug, Clone)]
pub(crate) struct Basis {
    nvars: usize,
    order: MonomialOrder,
    slots: Vec<Polynomial>,
    active: Vec<PolyId>,
    reserve: Vec<PolyId>,
}

impl Basis {
    pub(crate) fn new(nvars: usize, order: MonomialOrder) -> Self {
        Self {
            nvars,
            order,
            slots: Vec::new(),
            active: Vec::new(),
            reserve: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn nvars(&self) -> usize {
        self.nvars
    }

    #[inline]
    pub(crate) fn order(&self) -> &MonomialOrder {
        &self.order
    }

    /// Drop everything and switch to `order`.
    pub(crate) fn reset(&mut self, nvars: usize, order: MonomialOrder) {
        self.nvars = nvars;
        self.order = order;
        self.slots.clear();
        self.active.clear();
        self.reserve.clear();
    }

    #[inline]
    pub(crate) fn get(&self, id: PolyId) -> &Polynomial {
        &self.slots[id.0]
    }

    #[inline]
    pub(crate) fn lm(&self, id: PolyId) -> &Monomial {
        self.slots[id.0].lm()
    }

    #[inline]
    pub(crate) fn active_len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub(crate) fn reserve_len(&self) -> usize {
        self.reserve.len()
    }

    /// Active handles, ascending.
    pub(crate) fn active_ids(&self) -> Vec<PolyId> {
        self.active.clone()
    }

    /// Active polynomials, ascending.
    pub(crate) fn active_polys(&self) -> impl Iterator<Item = &Polynomial> + Clone {
        self.active.iter().map(|id| &self.slots[id.0])
    }

    // Tail reduction in `reduce_member` can leave the lists sorted by leader
    // only; a miss here costs one zero reduction.
    fn search(list: &[PolyId], slots: &[Polynomial], poly: &Polynomial) -> Result<usize, usize> {
        list.binary_search_by(|id| slots[id.0].compare(poly))
    }

    /// Whether an active polynomial equals `poly`, which must be sorted
    /// under the basis order.
    pub(crate) fn contains(&self, poly: &Polynomial) -> bool {
        Self::search(&self.active, &self.slots, poly).is_ok()
    }

    /// Store `poly` and add it to the active list.
    pub(crate) fn insert(&mut self, poly: Polynomial) -> PolyId {
        assert!(!poly.is_zero(), "zero polynomial inserted into a basis");
        debug_assert_eq!(poly.order(), &self.order);
        let pos = match Self::search(&self.active, &self.slots, &poly) {
            Ok(pos) | Err(pos) => pos,
        };
        let id = PolyId(self.slots.len());
        self.slots.push(poly);
        self.active.insert(pos, id);
        id
    }

    /// Move an active polynomial to the reserve.
    pub(crate) fn retire(&mut self, id: PolyId) {
        if let Some(pos) = self.active.iter().position(|&a| a == id) {
            self.active.remove(pos);
            let at = match Self::search(&self.reserve, &self.slots, &self.slots[id.0]) {
                Ok(at) | Err(at) => at,
            };
            self.reserve.insert(at, id);
        }
    }

    /// Normal form of `poly` modulo the active polynomials.
    pub(crate) fn reduce(&self, poly: &mut Polynomial) -> bool {
        reduce_by(self.active_polys(), poly)
    }

    /// Replace the polynomial `target` by its remainder modulo `divisor`.
    ///
    /// The leading monomial of `divisor` must not divide that of `target`,
    /// so the leading monomial and the position of `target` are kept.
    pub(crate) fn reduce_member(&mut self, target: PolyId, divisor: PolyId) -> bool {
        assert_ne!(target, divisor);
        let (t, d) = if target.0 < divisor.0 {
            let (lo, hi) = self.slots.split_at_mut(divisor.0);
            (&mut lo[target.0], &hi[0])
        } else {
            let (lo, hi) = self.slots.split_at_mut(target.0);
            (&mut hi[0], &lo[divisor.0])
        };
        debug_assert!(!d.lm().divides(t.lm()));
        t.remainder(d)
    }

    /// Copies of the active polynomials.
    pub(crate) fn to_vec(&self) -> Vec<Polynomial> {
        self.active_polys().cloned().collect()
    }
}
