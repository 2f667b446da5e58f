//! Zero-copy byte segments and the primitive segment comparison.
//!
//! A [`Segment`] is an `(offset, len)` window into either a plain byte
//! array or a shared [`Bytes`] buffer. Every higher-level comparison in
//! this crate is built from [`compare_segments`].

use crate::error::{CellError, CellResult};
use bytes::Bytes;
use std::cmp::Ordering;
use std::fmt;

/// The byte source a segment points into.
#[derive(Clone, Copy)]
pub enum SegmentSource<'a> {
    /// A contiguous byte array addressed by offset.
    Array(&'a [u8]),
    /// A shared, reference-counted buffer addressed by position.
    Buffer(&'a Bytes),
}

impl<'a> SegmentSource<'a> {
    /// Total length of the underlying source.
    #[inline]
    #[must_use]
    pub fn len(self) -> usize {
        self.bytes().len()
    }

    /// Whether the underlying source holds no bytes.
    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn bytes(self) -> &'a [u8] {
        match self {
            SegmentSource::Array(array) => array,
            SegmentSource::Buffer(buffer) => buffer.as_ref(),
        }
    }
}

impl fmt::Debug for SegmentSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentSource::Array(array) => write!(f, "Array(len={})", array.len()),
            SegmentSource::Buffer(buffer) => write!(f, "Buffer(len={})", buffer.len()),
        }
    }
}

/// Borrowed view of `len` bytes starting at `offset` inside a source.
///
/// Segments never copy and never outlive the source they borrow from.
#[derive(Clone, Copy)]
pub struct Segment<'a> {
    source: SegmentSource<'a>,
    offset: usize,
    len: usize,
}

impl<'a> Segment<'a> {
    /// Creates a segment over `len` bytes of `array` starting at `offset`.
    ///
    /// The bounds are a caller precondition, checked only in debug builds.
    #[inline]
    #[must_use]
    pub fn array(array: &'a [u8], offset: usize, len: usize) -> Self {
        Self::unchecked(SegmentSource::Array(array), offset, len)
    }

    /// Creates a segment over `len` bytes of `buffer` starting at `position`.
    ///
    /// The bounds are a caller precondition, checked only in debug builds.
    #[inline]
    #[must_use]
    pub fn buffer(buffer: &'a Bytes, position: usize, len: usize) -> Self {
        Self::unchecked(SegmentSource::Buffer(buffer), position, len)
    }

    /// Creates a segment covering a whole slice.
    #[inline]
    #[must_use]
    pub fn from_slice(slice: &'a [u8]) -> Self {
        Self::array(slice, 0, slice.len())
    }

    /// Creates a segment after validating its bounds against the source.
    pub fn try_new(source: SegmentSource<'a>, offset: usize, len: usize) -> CellResult<Self> {
        check_bounds(offset, len, source.len())?;
        Ok(Self {
            source,
            offset,
            len,
        })
    }

    #[inline]
    fn unchecked(source: SegmentSource<'a>, offset: usize, len: usize) -> Self {
        debug_assert!(
            offset.checked_add(len).is_some_and(|end| end <= source.len()),
            "segment [{offset}, +{len}) exceeds source of {} bytes",
            source.len()
        );
        Self {
            source,
            offset,
            len,
        }
    }

    /// The backing source.
    #[inline]
    #[must_use]
    pub fn source(&self) -> SegmentSource<'a> {
        self.source
    }

    /// Start offset (array) or position (buffer) inside the source.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes in the segment.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the segment is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the segment points into a shared buffer.
    #[inline]
    #[must_use]
    pub fn is_buffer(&self) -> bool {
        matches!(self.source, SegmentSource::Buffer(_))
    }

    /// Borrows the viewed bytes.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &'a [u8] {
        &self.source.bytes()[self.offset..self.offset + self.len]
    }

    /// Narrows the segment to `len` bytes starting `start` bytes in.
    ///
    /// The result keeps the same source, so buffer-backed segments stay
    /// buffer-backed.
    #[inline]
    #[must_use]
    pub fn sub(&self, start: usize, len: usize) -> Self {
        debug_assert!(start + len <= self.len);
        Self::unchecked(self.source, self.offset + start, len)
    }

    /// Everything from `start` to the end of the segment.
    #[inline]
    #[must_use]
    pub fn tail(&self, start: usize) -> Self {
        self.sub(start, self.len - start)
    }

    /// Index of the first occurrence of `byte`, relative to the segment start.
    #[inline]
    #[must_use]
    pub fn find(&self, byte: u8) -> Option<usize> {
        self.as_slice().iter().position(|&b| b == byte)
    }

    /// Index of the last occurrence of `byte`, relative to the segment start.
    #[inline]
    #[must_use]
    pub fn rfind(&self, byte: u8) -> Option<usize> {
        self.as_slice().iter().rposition(|&b| b == byte)
    }

    /// Copies the viewed bytes into a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }
}

pub(crate) fn check_bounds(offset: usize, len: usize, source_len: usize) -> CellResult<()> {
    match offset.checked_add(len) {
        Some(end) if end <= source_len => Ok(()),
        _ => Err(CellError::out_of_bounds(offset, len, source_len)),
    }
}

/// Compares two segments as unsigned byte strings.
///
/// Bytes are compared pairwise up to the shorter length; on a common
/// prefix the shorter segment sorts first. The result depends only on
/// the viewed bytes, never on which backing either side uses, so
/// `compare_segments(a, b) == compare_segments(b, a).reverse()` for every
/// pairing of array and buffer segments.
#[inline]
#[must_use]
pub fn compare_segments(left: Segment<'_>, right: Segment<'_>) -> Ordering {
    left.as_slice().cmp(right.as_slice())
}

impl PartialEq for Segment<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Segment<'_> {}

impl PartialOrd for Segment<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Segment<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_segments(*self, *other)
    }
}

impl fmt::Debug for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}[{}..{}]\"", self.source, self.offset, self.offset + self.len)?;
        for &b in self.as_slice() {
            write!(f, "{}", std::ascii::escape_default(b))?;
        }
        write!(f, "\"")
    }
}

impl<'a> From<&'a [u8]> for Segment<'a> {
    fn from(slice: &'a [u8]) -> Self {
        Segment::from_slice(slice)
    }
}

impl<'a> From<&'a Bytes> for Segment<'a> {
    fn from(buffer: &'a Bytes) -> Self {
        Segment::buffer(buffer, 0, buffer.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_pairings<'a>(
        left: &'a [u8],
        left_buf: &'a Bytes,
        right: &'a [u8],
        right_buf: &'a Bytes,
    ) -> [(Segment<'a>, Segment<'a>); 4] {
        [
            (Segment::from_slice(left), Segment::from_slice(right)),
            (Segment::from_slice(left), Segment::from(right_buf)),
            (Segment::from(left_buf), Segment::from_slice(right)),
            (Segment::from(left_buf), Segment::from(right_buf)),
        ]
    }

    #[test]
    fn unsigned_byte_order() {
        // 0x80 must sort after 0x7f, which a signed comparison gets wrong.
        let low = [0x7f_u8];
        let high = [0x80_u8];
        assert_eq!(
            compare_segments(Segment::from_slice(&low), Segment::from_slice(&high)),
            Ordering::Less
        );
    }

    #[test]
    fn shorter_prefix_sorts_first() {
        let a = b"row";
        let b = b"row1";
        assert_eq!(
            compare_segments(Segment::from_slice(a), Segment::from_slice(b)),
            Ordering::Less
        );
        assert_eq!(
            compare_segments(Segment::from_slice(b), Segment::from_slice(a)),
            Ordering::Greater
        );
    }

    #[test]
    fn empty_segments_are_equal() {
        let empty: &[u8] = &[];
        let buf = Bytes::new();
        assert_eq!(
            compare_segments(Segment::from_slice(empty), Segment::from(&buf)),
            Ordering::Equal
        );
    }

    #[test]
    fn backing_does_not_change_result() {
        let left = b"abc\xff".to_vec();
        let right = b"abd".to_vec();
        let left_buf = Bytes::from(left.clone());
        let right_buf = Bytes::from(right.clone());

        for (l, r) in all_pairings(&left, &left_buf, &right, &right_buf) {
            assert_eq!(compare_segments(l, r), Ordering::Less);
            assert_eq!(compare_segments(r, l), Ordering::Greater);
        }
    }

    #[test]
    fn offsets_window_into_source() {
        let array = b"xxhelloyy";
        let buffer = Bytes::from_static(b"__hello");
        let a = Segment::array(array, 2, 5);
        let b = Segment::buffer(&buffer, 2, 5);
        assert_eq!(a.as_slice(), b"hello");
        assert_eq!(compare_segments(a, b), Ordering::Equal);
        assert!(b.is_buffer());
        assert!(!a.is_buffer());
    }

    #[test]
    fn try_new_rejects_out_of_bounds() {
        let array = [0u8; 4];
        let err = Segment::try_new(SegmentSource::Array(&array), 2, 3).unwrap_err();
        assert_eq!(err, CellError::out_of_bounds(2, 3, 4));

        let err = Segment::try_new(SegmentSource::Array(&array), usize::MAX, 2).unwrap_err();
        assert!(matches!(err, CellError::SegmentOutOfBounds { .. }));

        assert!(Segment::try_new(SegmentSource::Array(&array), 4, 0).is_ok());
    }

    #[test]
    fn find_and_sub_stay_relative() {
        let buffer = Bytes::from_static(b"..t,mid,id");
        let seg = Segment::buffer(&buffer, 2, 8);
        assert_eq!(seg.find(b','), Some(1));
        assert_eq!(seg.rfind(b','), Some(5));
        let tail = seg.tail(2);
        assert_eq!(tail.as_slice(), b"mid,id");
        assert!(tail.is_buffer());
        assert_eq!(tail.sub(0, 3).as_slice(), b"mid");
    }

    #[test]
    fn debug_escapes_bytes() {
        let seg = Segment::from_slice(b"a\x00");
        assert_eq!(format!("{seg:?}"), "Array(len=2)[0..2]\"a\\x00\"");
    }
}
