//! Fixed-capacity sample store with a circular write cursor

use heapless::Vec;

use crate::sample::Sample;

/// Backing store for up to `N` samples.
///
/// Slots fill sequentially until the store is full. After that the write
/// cursor wraps around, so `overwrite` always replaces the oldest slot in
/// insertion order. Storage lives inline, nothing is allocated.
#[derive(Clone, Debug, Default)]
pub(crate) struct SampleBuffer<const N: usize> {
    data: Vec<Sample, N>,
    next: usize,
}

impl<const N: usize> SampleBuffer<N> {
    pub fn new() -> Self {
        SampleBuffer {
            data: Vec::new(),
            next: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.data.is_full()
    }

    /// Appends into the next free slot. Returns false when full.
    pub fn push(&mut self, s: Sample) -> bool {
        if self.data.push(s).is_err() {
            return false;
        }
        self.next = wrap_next::<N>(self.next);
        true
    }

    /// Replaces the slot under the cursor and advances it. Returns false
    /// when the cursor points past the filled slots (store not yet full).
    pub fn overwrite(&mut self, s: Sample) -> bool {
        match self.data.get_mut(self.next) {
            Some(slot) => {
                *slot = s;
                self.next = wrap_next::<N>(self.next);
                true
            }
            None => false,
        }
    }

    /// Drops all samples and rewinds the cursor. Capacity is untouched.
    pub fn clear(&mut self) {
        self.data.clear();
        self.next = 0;
    }

    pub fn get(&self, idx: usize) -> Option<&Sample> {
        self.data.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Sample> {
        self.data.get_mut(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.data.iter()
    }
}

#[inline]
fn wrap_next<const N: usize>(n: usize) -> usize {
    let n1 = n + 1;
    if n1 >= N {
        0
    } else {
        n1
    }
}
