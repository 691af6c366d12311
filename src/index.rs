use std::fmt;
use std::hash::Hash;

/// Default width of arena ids.
pub type DefaultIx = u32;

/// Integer type usable as an arena id.
///
/// # Safety
///
/// `new` and `index` must round-trip every value in `0..=max().index()`.
pub unsafe trait IndexType: Copy + Default + Hash + Ord + fmt::Debug + 'static {
    fn new(x: usize) -> Self;
    fn index(&self) -> usize;
    fn max() -> Self;
}

macro_rules! index_type {
    ($($ty:ty),*) => {
        $(
            unsafe impl IndexType for $ty {
                #[inline(always)]
                fn new(x: usize) -> Self {
                    x as $ty
                }
                #[inline(always)]
                fn index(&self) -> usize {
                    *self as usize
                }
                #[inline(always)]
                fn max() -> Self {
                    <$ty>::MAX
                }
            }
        )*
    };
}

index_type!(u16, u32, u64, usize);

/// Record identifier inside an [`ArenaTree`](crate::ArenaTree).
///
/// Ids are dense, assigned in insertion order starting at zero, and never reused.
/// The maximum value of `Ix` is reserved as the "no record" sentinel.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct NodeIndex<Ix = DefaultIx>(Ix);

impl<Ix: IndexType> NodeIndex<Ix> {
    #[inline]
    pub fn new(x: usize) -> Self {
        NodeIndex(IndexType::new(x))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0.index()
    }

    /// The sentinel id, standing for an absent child or an empty tree.
    #[inline]
    pub fn end() -> Self {
        NodeIndex(IndexType::max())
    }

    #[inline]
    pub fn is_end(self) -> bool {
        self == Self::end()
    }
}

impl<Ix: fmt::Debug> fmt::Debug for NodeIndex<Ix> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NodeIndex({:?})", self.0)
    }
}
