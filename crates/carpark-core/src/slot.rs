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

use crate::primitives::Interval;
use num_traits::{CheckedAdd, CheckedSub, SaturatingSub, Zero};
use std::{
    iter::{FusedIterator, Sum},
    ops::{Add, AddAssign, Sub, SubAssign},
};

/// A 1-based slot number. Slot `1` is the first slot of the lot.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct SlotNumber(usize);

/// A run of consecutive slot numbers, half-open: `[first, last + 1)`.
pub type SlotBlock = Interval<SlotNumber>;

impl std::fmt::Display for SlotNumber {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SlotNumber({})", self.0)
    }
}

impl From<usize> for SlotNumber {
    #[inline]
    fn from(v: usize) -> Self {
        SlotNumber(v)
    }
}

impl SlotNumber {
    #[inline]
    pub const fn new(v: usize) -> Self {
        SlotNumber(v)
    }

    /// The lowest slot of every lot.
    #[inline]
    pub const fn first() -> Self {
        SlotNumber(1)
    }

    #[inline]
    pub const fn value(self) -> usize {
        self.0
    }

    #[inline]
    pub fn checked_add(self, len: SlotCount) -> Option<Self> {
        self.0.checked_add(len.0).map(SlotNumber)
    }

    #[inline]
    pub fn checked_sub(self, len: SlotCount) -> Option<Self> {
        self.0.checked_sub(len.0).map(SlotNumber)
    }

    #[inline]
    pub fn saturating_add(self, len: SlotCount) -> Self {
        SlotNumber(self.0.saturating_add(len.0))
    }

    /// The block of `len` slots starting at `self`, or `None` on overflow.
    #[inline]
    pub fn span_of(self, len: SlotCount) -> Option<SlotBlock> {
        self.checked_add(len).map(|end| SlotBlock::new(self, end))
    }
}

impl Add<SlotCount> for SlotNumber {
    type Output = SlotNumber;

    #[inline]
    fn add(self, rhs: SlotCount) -> Self::Output {
        SlotNumber(
            self.0
                .checked_add(rhs.0)
                .expect("overflow in SlotNumber + SlotCount"),
        )
    }
}

impl Sub<SlotCount> for SlotNumber {
    type Output = SlotNumber;

    #[inline]
    fn sub(self, rhs: SlotCount) -> Self::Output {
        SlotNumber(
            self.0
                .checked_sub(rhs.0)
                .expect("underflow in SlotNumber - SlotCount"),
        )
    }
}

impl Sub<SlotNumber> for SlotNumber {
    type Output = SlotCount;

    #[inline]
    fn sub(self, rhs: SlotNumber) -> Self::Output {
        SlotCount::new(self.value().abs_diff(rhs.value()))
    }
}

impl AddAssign<SlotCount> for SlotNumber {
    #[inline]
    fn add_assign(&mut self, rhs: SlotCount) {
        self.0 = self
            .0
            .checked_add(rhs.0)
            .expect("overflow in SlotNumber += SlotCount");
    }
}

/// A number of slots: a block length, a capacity or a high-water mark.
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct SlotCount(usize);

impl std::fmt::Display for SlotCount {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SlotCount({})", self.0)
    }
}

impl From<usize> for SlotCount {
    #[inline]
    fn from(v: usize) -> Self {
        SlotCount(v)
    }
}

impl SlotCount {
    #[inline]
    pub const fn new(v: usize) -> Self {
        SlotCount(v)
    }

    #[inline]
    pub const fn value(self) -> usize {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(SlotCount)
    }

    #[inline]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(SlotCount)
    }

    #[inline]
    pub fn saturating_sub(self, rhs: Self) -> Self {
        SlotCount(self.0.saturating_sub(rhs.0))
    }
}

impl Zero for SlotCount {
    #[inline]
    fn zero() -> Self {
        SlotCount::new(0)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add for SlotCount {
    type Output = SlotCount;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        SlotCount(
            self.0
                .checked_add(rhs.0)
                .expect("overflow in SlotCount + SlotCount"),
        )
    }
}

impl CheckedAdd for SlotCount {
    #[inline]
    fn checked_add(&self, rhs: &Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(SlotCount)
    }
}

impl Sub for SlotCount {
    type Output = SlotCount;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        SlotCount(
            self.0
                .checked_sub(rhs.0)
                .expect("underflow in SlotCount - SlotCount"),
        )
    }
}

impl CheckedSub for SlotCount {
    #[inline]
    fn checked_sub(&self, rhs: &Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(SlotCount)
    }
}

impl SaturatingSub for SlotCount {
    #[inline]
    fn saturating_sub(&self, rhs: &Self) -> Self {
        SlotCount(self.0.saturating_sub(rhs.0))
    }
}

impl AddAssign for SlotCount {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self
            .0
            .checked_add(rhs.0)
            .expect("overflow in SlotCount += SlotCount");
    }
}

impl SubAssign for SlotCount {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self
            .0
            .checked_sub(rhs.0)
            .expect("underflow in SlotCount -= SlotCount");
    }
}

impl Sum for SlotCount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl Interval<SlotNumber> {
    /// Number of slots in the block.
    #[inline]
    pub fn extent(&self) -> SlotCount {
        self.end() - self.start()
    }

    /// The highest slot of a non-empty block.
    #[inline]
    pub fn last(&self) -> Option<SlotNumber> {
        if self.is_empty() {
            None
        } else {
            Some(SlotNumber(self.end().0 - 1))
        }
    }

    /// Iterates the slot numbers of the block in ascending order.
    #[inline]
    pub fn slots(&self) -> SlotIter {
        SlotIter {
            next: self.start().0,
            end: self.end().0,
        }
    }
}

/// Ascending iterator over the slots of a [`SlotBlock`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotIter {
    next: usize,
    end: usize,
}

impl Iterator for SlotIter {
    type Item = SlotNumber;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.next < self.end {
            let slot = SlotNumber(self.next);
            self.next += 1;
            Some(slot)
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end.saturating_sub(self.next);
        (n, Some(n))
    }
}

impl DoubleEndedIterator for SlotIter {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.next < self.end {
            self.end -= 1;
            Some(SlotNumber(self.end))
        } else {
            None
        }
    }
}

impl ExactSizeIterator for SlotIter {}
impl FusedIterator for SlotIter {}
