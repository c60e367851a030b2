//! Slice - borrowed, element-counted view into the source buffer
//!
//! A `Slice` remembers the whole owning buffer alongside its own start and
//! length, so "the region after this token" can be computed without pointer
//! arithmetic. Every operation clamps instead of panicking and none of them
//! copy the backing storage.

use std::fmt;

/// A view over part of a caller-owned buffer.
///
/// Equality via `==` is positional: two slices are equal when they cover the
/// same region of the same buffer. Use [`Slice::equal`] to compare contents.
pub struct Slice<'a, T = u8> {
    buffer: &'a [T],
    start: usize,
    len: usize,
}

impl<'a, T> Slice<'a, T> {
    /// View over the whole buffer
    #[inline]
    pub const fn new(buffer: &'a [T]) -> Self {
        Slice {
            buffer,
            start: 0,
            len: buffer.len(),
        }
    }

    /// Offset of the first element within the owning buffer
    #[inline]
    pub const fn offset(&self) -> usize {
        self.start
    }

    /// Number of elements in the view
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Offset one past the last element (exclusive)
    #[inline]
    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    /// The elements covered by this view
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        &self.buffer[self.start..self.end()]
    }

    /// Shift the start forward by `offset` elements, shrinking the length.
    /// Clamps at the end of the view.
    #[inline]
    pub fn index(self, offset: usize) -> Self {
        let step = offset.min(self.len);
        Slice {
            buffer: self.buffer,
            start: self.start + step,
            len: self.len - step,
        }
    }

    /// Same start, length clamped to `length`
    #[inline]
    pub fn truncate(self, length: usize) -> Self {
        Slice {
            buffer: self.buffer,
            start: self.start,
            len: self.len.min(length),
        }
    }

    /// Same start, length grown by `n`. Clamps at the end of the owning buffer.
    #[inline]
    pub fn extend(self, n: usize) -> Self {
        let available = self.buffer.len() - self.end();
        Slice {
            buffer: self.buffer,
            start: self.start,
            len: self.len + n.min(available),
        }
    }

    /// The part of `self` that begins immediately past the end of `inner`.
    ///
    /// `inner` is expected to come from the same buffer. If it ends before
    /// `self` starts the whole of `self` is returned; if it ends past `self`
    /// the result is empty.
    #[inline]
    pub fn after(self, inner: Slice<'a, T>) -> Self {
        debug_assert!(std::ptr::eq(self.buffer, inner.buffer));
        let start = inner.end().clamp(self.start, self.end());
        Slice {
            buffer: self.buffer,
            start,
            len: self.end() - start,
        }
    }
}

impl<'a, T: PartialEq> Slice<'a, T> {
    /// Element-wise content equality
    #[inline]
    pub fn equal(&self, other: &Slice<'_, T>) -> bool {
        self.as_slice() == other.as_slice()
    }

    /// True if the leading elements equal `prefix` exactly
    #[inline]
    pub fn starts_with(&self, prefix: &[T]) -> bool {
        self.as_slice().starts_with(prefix)
    }
}

impl<'a> Slice<'a, u8> {
    /// View as UTF-8, if the covered bytes are valid
    #[inline]
    pub fn as_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.as_slice()).ok()
    }
}

impl<T> Clone for Slice<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Slice<'_, T> {}

impl<T> PartialEq for Slice<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.buffer, other.buffer)
            && self.start == other.start
            && self.len == other.len
    }
}

impl<T> Eq for Slice<'_, T> {}

impl<T> fmt::Debug for Slice<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slice")
            .field("start", &self.start)
            .field("len", &self.len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_covers_buffer() {
        let slice = Slice::new(b"hello world".as_slice());
        assert_eq!(slice.offset(), 0);
        assert_eq!(slice.len(), 11);
        assert_eq!(slice.as_slice(), b"hello world");
    }

    #[test]
    fn test_index_clamps() {
        let slice = Slice::new(b"hello".as_slice());
        assert_eq!(slice.index(2).as_slice(), b"llo");
        assert_eq!(slice.index(2).offset(), 2);

        let past = slice.index(99);
        assert!(past.is_empty());
        assert_eq!(past.offset(), 5);
    }

    #[test]
    fn test_truncate_never_grows() {
        let slice = Slice::new(b"hello".as_slice());
        assert_eq!(slice.truncate(3).as_slice(), b"hel");
        assert_eq!(slice.truncate(3).truncate(10).len(), 3);
    }

    #[test]
    fn test_extend_stops_at_buffer_end() {
        let slice = Slice::new(b"hello".as_slice()).index(1).truncate(0);
        assert_eq!(slice.extend(2).as_slice(), b"el");
        assert_eq!(slice.extend(100).as_slice(), b"ello");
    }

    #[test]
    fn test_after() {
        let source = Slice::new(b"<root>".as_slice());
        let opener = source.truncate(1);
        assert_eq!(source.after(opener).as_slice(), b"root>");
        assert_eq!(source.after(opener).offset(), 1);

        let everything = source.after(source);
        assert!(everything.is_empty());
        assert_eq!(everything.offset(), 6);
    }

    #[test]
    fn test_after_inner_before_outer() {
        let source = Slice::new(b"abcdef".as_slice());
        let outer = source.index(3);
        let inner = source.truncate(1);
        assert_eq!(outer.after(inner).as_slice(), b"def");
    }

    #[test]
    fn test_equal_is_content_based() {
        let buffer = b"abab";
        let source = Slice::new(buffer.as_slice());
        let first = source.truncate(2);
        let second = source.index(2);
        assert!(first.equal(&second));
        assert_ne!(first, second);

        let other_buffer = b"ab".to_vec();
        assert!(first.equal(&Slice::new(other_buffer.as_slice())));
    }

    #[test]
    fn test_starts_with() {
        let slice = Slice::new(b"!DOCTYPE note".as_slice());
        assert!(slice.starts_with(b"!DOCTYPE"));
        assert!(!slice.starts_with(b"!DOCTYPEX note and more"));
        assert!(!slice.index(1).starts_with(b"!"));
    }

    #[test]
    fn test_wide_elements() {
        let units: [u16; 4] = [0x3c, 0x61, 0x3e, 0x00];
        let slice = Slice::new(units.as_slice());
        assert_eq!(slice.index(1).truncate(2).as_slice(), &[0x61, 0x3e]);
        assert!(slice.starts_with(&[0x3c]));
    }
}
