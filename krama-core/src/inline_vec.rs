//! Small-buffer-optimized vector for `Copy` element types.
//!
//! Detector lists of error mechanisms are almost always tiny (one to four
//! entries), and so are the residual syndromes the search decoder carries in
//! each frontier node. [`InlineVec`] keeps up to `N` elements inline and only
//! spills to the heap once that is exceeded, which removes allocator traffic
//! from the decode hot path in the common case.
//!
//! # Storage
//!
//! The storage is an enum tagged by ownership: either an inline array with a
//! length, or an owned `Vec`. Spilling copies the inline elements into a
//! fresh `Vec` with capacity `2 * N`; from then on growth follows `Vec`'s
//! amortized doubling. Moving an `InlineVec` moves the heap buffer without
//! copying elements; an inline one is copied element-wise as part of the move.
//!
//! ```
//! use krama_core::InlineVec;
//!
//! let mut v: InlineVec<u32, 2> = InlineVec::new();
//! v.push(3);
//! v.push(5);
//! assert!(!v.spilled());
//! v.push(7);
//! assert!(v.spilled());
//! assert_eq!(v.as_slice(), &[3, 5, 7]);
//! ```

use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Deref, DerefMut};

/// Ordered container with `N` elements of inline capacity.
#[derive(Clone)]
pub struct InlineVec<T: Copy + Default, const N: usize> {
    storage: Storage<T, N>,
}

#[derive(Clone)]
enum Storage<T: Copy + Default, const N: usize> {
    Inline { buf: [T; N], len: usize },
    Heap(Vec<T>),
}

impl<T: Copy + Default, const N: usize> InlineVec<T, N> {
    /// Creates an empty vector. Never allocates.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Storage::Inline {
                buf: [T::default(); N],
                len: 0,
            },
        }
    }

    /// Creates a vector holding `count` copies of `value`.
    #[must_use]
    pub fn from_elem(value: T, count: usize) -> Self {
        let mut v = Self::new();
        v.resize(count, value);
        v
    }

    /// Creates a vector from a slice, spilling only if `items.len() > N`.
    #[must_use]
    pub fn from_slice(items: &[T]) -> Self {
        if items.len() <= N {
            let mut buf = [T::default(); N];
            buf[..items.len()].copy_from_slice(items);
            Self {
                storage: Storage::Inline {
                    buf,
                    len: items.len(),
                },
            }
        } else {
            Self {
                storage: Storage::Heap(items.to_vec()),
            }
        }
    }

    /// Number of stored elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.storage {
            Storage::Inline { len, .. } => *len,
            Storage::Heap(v) => v.len(),
        }
    }

    /// Returns true if no elements are stored.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of elements that fit without reallocating.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        match &self.storage {
            Storage::Inline { .. } => N,
            Storage::Heap(v) => v.capacity(),
        }
    }

    /// Returns true once the contents live on the heap.
    #[inline]
    #[must_use]
    pub fn spilled(&self) -> bool {
        matches!(self.storage, Storage::Heap(_))
    }

    /// Appends an element.
    #[inline]
    pub fn push(&mut self, value: T) {
        if matches!(self.storage, Storage::Inline { len, .. } if len == N) {
            self.spill(N + 1);
        }
        match &mut self.storage {
            Storage::Inline { buf, len } => {
                buf[*len] = value;
                *len += 1;
            }
            Storage::Heap(v) => v.push(value),
        }
    }

    /// Removes and returns the last element.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        match &mut self.storage {
            Storage::Inline { buf, len } => {
                if *len == 0 {
                    None
                } else {
                    *len -= 1;
                    Some(buf[*len])
                }
            }
            Storage::Heap(v) => v.pop(),
        }
    }

    /// Removes all elements. A heap buffer is kept for reuse.
    #[inline]
    pub fn clear(&mut self) {
        match &mut self.storage {
            Storage::Inline { len, .. } => *len = 0,
            Storage::Heap(v) => v.clear(),
        }
    }

    /// Shortens the vector to `new_len` elements. No-op if already shorter.
    #[inline]
    pub fn truncate(&mut self, new_len: usize) {
        match &mut self.storage {
            Storage::Inline { len, .. } => *len = (*len).min(new_len),
            Storage::Heap(v) => v.truncate(new_len),
        }
    }

    /// Resizes to `new_len`, filling new slots with `value`.
    pub fn resize(&mut self, new_len: usize, value: T) {
        if new_len > self.capacity() {
            self.spill(new_len);
        }
        match &mut self.storage {
            Storage::Inline { buf, len } => {
                for slot in &mut buf[*len..new_len.max(*len)] {
                    *slot = value;
                }
                *len = new_len;
            }
            Storage::Heap(v) => v.resize(new_len, value),
        }
    }

    /// Appends every element of `items`.
    pub fn extend_from_slice(&mut self, items: &[T]) {
        let needed = self.len() + items.len();
        if needed > self.capacity() {
            self.spill(needed);
        }
        match &mut self.storage {
            Storage::Inline { buf, len } => {
                buf[*len..needed].copy_from_slice(items);
                *len = needed;
            }
            Storage::Heap(v) => v.extend_from_slice(items),
        }
    }

    /// Shared view of the elements.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        match &self.storage {
            Storage::Inline { buf, len } => &buf[..*len],
            Storage::Heap(v) => v.as_slice(),
        }
    }

    /// Mutable view of the elements.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match &mut self.storage {
            Storage::Inline { buf, len } => &mut buf[..*len],
            Storage::Heap(v) => v.as_mut_slice(),
        }
    }

    /// Converts into a `Vec`, reusing the heap buffer if spilled.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self.storage {
            Storage::Inline { buf, len } => buf[..len].to_vec(),
            Storage::Heap(v) => v,
        }
    }

    /// Moves the contents to the heap with room for at least `min_capacity`
    /// elements. The new capacity is never below `2 * N`.
    fn spill(&mut self, min_capacity: usize) {
        match &mut self.storage {
            Storage::Inline { buf, len } => {
                let cap = min_capacity.max(2 * N).max(1);
                let mut heap = Vec::with_capacity(cap);
                heap.extend_from_slice(&buf[..*len]);
                self.storage = Storage::Heap(heap);
            }
            Storage::Heap(v) => {
                if min_capacity > v.capacity() {
                    v.reserve(min_capacity - v.len());
                }
            }
        }
    }
}

impl<T: Copy + Default, const N: usize> Default for InlineVec<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default, const N: usize> Deref for InlineVec<T, N> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Copy + Default, const N: usize> DerefMut for InlineVec<T, N> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Copy + Default + PartialEq, const N: usize> PartialEq for InlineVec<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Copy + Default + Eq, const N: usize> Eq for InlineVec<T, N> {}

impl<T: Copy + Default + Hash, const N: usize> Hash for InlineVec<T, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: Copy + Default + fmt::Debug, const N: usize> fmt::Debug for InlineVec<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Copy + Default, const N: usize> FromIterator<T> for InlineVec<T, N> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = Self::new();
        v.extend(iter);
        v
    }
}

impl<T: Copy + Default, const N: usize> Extend<T> for InlineVec<T, N> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Copy + Default, const N: usize> IntoIterator for &'a InlineVec<T, N> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<T: Copy + Default, const N: usize> From<&[T]> for InlineVec<T, N> {
    fn from(items: &[T]) -> Self {
        Self::from_slice(items)
    }
}

impl<T: Copy + Default, const N: usize> From<Vec<T>> for InlineVec<T, N> {
    fn from(items: Vec<T>) -> Self {
        if items.len() <= N {
            Self::from_slice(&items)
        } else {
            Self {
                storage: Storage::Heap(items),
            }
        }
    }
}
