// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Core Primitives
//!
//! Small generic building blocks shared by the slot types. The only one the
//! car park needs is a half-open interval, used to describe the block of
//! consecutive slots a vehicle occupies.

use std::cmp::Ordering;
use std::fmt;

/// A half-open interval `[start, end)`.
///
/// The start is inclusive and the end is exclusive, so `[start, end)`
/// includes all values `x` such that `start <= x < end`.
///
/// # Examples
///
/// ```
/// use carpark_core::primitives::Interval;
/// let interval = Interval::new(1, 5);
/// assert!(interval.start() == 1);
/// assert!(interval.end() == 5);
/// assert!(interval.contains(3));
/// assert!(!interval.contains(5));
/// assert!(!interval.is_empty());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    start_inclusive: T,
    end_exclusive: T,
}

impl<T> Interval<T> {
    /// Creates a new half-open interval `[start, end)`.
    ///
    /// The bounds are ordered, so `Interval::new(5, 3)` is the same
    /// interval as `Interval::new(3, 5)`.
    ///
    /// # Panics
    ///
    /// Panics if `a` and `b` are not comparable.
    ///
    /// # Examples
    ///
    /// ```
    /// use carpark_core::primitives::Interval;
    ///
    /// let interval = Interval::new(5, 3);
    /// assert_eq!(interval.start(), 3);
    /// assert_eq!(interval.end(), 5);
    /// ```
    #[inline]
    pub fn new(a: T, b: T) -> Self
    where
        T: PartialOrd + Copy,
    {
        let ord = a
            .partial_cmp(&b)
            .expect("Interval::new: non-comparable bounds");
        let (s, e) = match ord {
            Ordering::Greater => (b, a),
            _ => (a, b),
        };

        Self {
            start_inclusive: s,
            end_exclusive: e,
        }
    }

    /// Returns the inclusive start of the interval.
    #[inline]
    pub fn start(&self) -> T
    where
        T: Copy,
    {
        self.start_inclusive
    }

    /// Returns the exclusive end of the interval.
    #[inline]
    pub fn end(&self) -> T
    where
        T: Copy,
    {
        self.end_exclusive
    }

    /// Checks if the interval is empty, i.e. `start == end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use carpark_core::primitives::Interval;
    ///
    /// assert!(Interval::new(5, 5).is_empty());
    /// assert!(!Interval::new(1, 5).is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool
    where
        T: PartialEq,
    {
        self.start_inclusive == self.end_exclusive
    }

    /// Checks if the interval contains `x`.
    ///
    /// # Examples
    ///
    /// ```
    /// use carpark_core::primitives::Interval;
    ///
    /// let interval = Interval::new(1, 5);
    /// assert!(interval.contains(1)); // start is inclusive
    /// assert!(!interval.contains(5)); // end is exclusive
    /// ```
    #[inline]
    pub fn contains(&self, x: T) -> bool
    where
        T: PartialOrd,
    {
        x >= self.start_inclusive && x < self.end_exclusive
    }

    /// Converts the interval into a standard `start..end` range.
    #[inline]
    pub fn to_range(&self) -> std::ops::Range<T>
    where
        T: Copy,
    {
        self.start_inclusive..self.end_exclusive
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    /// Formats the interval as `[start, end)`.
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start_inclusive, self.end_exclusive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_order() {
        let i = Interval::new(5i32, 3i32);
        assert_eq!(i.start(), 3);
        assert_eq!(i.end(), 5);
    }

    #[test]
    fn test_new_keeps_order_when_sorted() {
        let i = Interval::new(2usize, 9usize);
        assert_eq!(i.start(), 2);
        assert_eq!(i.end(), 9);
    }

    #[test]
    fn test_contains_is_half_open() {
        let i = Interval::new(1, 4);
        assert!(!i.contains(0));
        assert!(i.contains(1));
        assert!(i.contains(3));
        assert!(!i.contains(4));
    }

    #[test]
    fn test_empty_interval() {
        let e = Interval::new(4, 4);
        assert!(e.is_empty());
        assert!(!e.contains(4));
        assert_eq!(e.to_range(), 4..4);
    }

    #[test]
    fn test_display_and_range_conversion() {
        let i = Interval::new(2usize, 6usize);
        assert_eq!(format!("{}", i), "[2, 6)");
        assert_eq!(i.to_range(), 2..6);
    }
}
