//! Streaming iterators on combinations of vertices.
//!
//! These iterators do not allocate after their initialisation.
///
/// Interface for streaming iterators.
///
/// Similarly as in the streaming-iterator crate, the elements yielded by the iterator
/// are borrowed by the iterator.
/// A loop on such an iterator `iter` is written as follows.
///```ignore
///while let Some(item) = iter.next() {
///    ...
///}
///```
pub trait StreamingIterator<A>
where
    A: ?Sized,
{
    /// Return the next value of the iterator.
    fn next(&mut self) -> Option<&A>;
}

/// Iterator on the `k`-element combinations of a slice of items,
/// in lexicographic order of positions.
///
/// If the slice is sorted, each combination is yielded sorted
/// and the combinations come in lexicographic order.
#[derive(Clone, Debug)]
pub struct Combinations<'a, T> {
    items: &'a [T],
    k: usize,
    positions: Vec<usize>,
    data: Vec<T>,
    untouched: bool,
}

impl<'a, T: Copy> Combinations<'a, T> {
    /// Combinations of `k` elements among `items`.
    pub fn new(items: &'a [T], k: usize) -> Self {
        assert!(k <= items.len());
        Self {
            items,
            k,
            positions: (0..k).collect(),
            data: items[..k].to_vec(),
            untouched: true,
        }
    }
}

impl<T: Copy> StreamingIterator<[T]> for Combinations<'_, T> {
    fn next(&mut self) -> Option<&[T]> {
        if self.untouched {
            self.untouched = false;
        } else {
            let n = self.items.len();
            let mut i = self.k;
            loop {
                if i == 0 {
                    return None;
                }
                i -= 1;
                if self.positions[i] != n - self.k + i {
                    break;
                }
            }
            self.positions[i] += 1;
            for j in (i + 1)..self.k {
                self.positions[j] = self.positions[i] + j - i;
            }
            for j in i..self.k {
                self.data[j] = self.items[self.positions[j]];
            }
        }
        Some(&self.data)
    }
}
