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

//! Free slot index: the ascending set of slots that were handed out once and
//! are vacant again.
//!
//! Neighbouring entries are never merged into explicit blocks. A request for
//! `k` consecutive slots is answered by sliding a window of width `k` over the
//! ascending entries and accepting the first window whose first and last
//! values lie exactly `k - 1` apart, so slots freed by unrelated departures
//! still combine into one usable run.

use carpark_core::{SlotBlock, SlotCount, SlotNumber};
use std::{
    collections::{BTreeSet, btree_set},
    fmt::Display,
    iter::Copied,
};

/// A run of consecutive free slots located by [`FreeSlotsRead::find_run`].
///
/// `position` is the index of the run's first entry in the ascending free
/// sequence; `block` is the run's value range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FreeRun {
    position: usize,
    block: SlotBlock,
}

impl FreeRun {
    #[inline]
    pub fn new(position: usize, block: SlotBlock) -> Self {
        Self { position, block }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn block(&self) -> SlotBlock {
        self.block
    }

    #[inline]
    pub fn start(&self) -> SlotNumber {
        self.block.start()
    }

    #[inline]
    pub fn len(&self) -> SlotCount {
        self.block.extent()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.block.is_empty()
    }
}

impl Display for FreeRun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at position {}", self.block, self.position)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StaleRunError {
    run: FreeRun,
}

impl StaleRunError {
    #[inline]
    pub fn new(run: FreeRun) -> Self {
        Self { run }
    }

    #[inline]
    pub fn run(&self) -> FreeRun {
        self.run
    }
}

impl Display for StaleRunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Free run {} does not match the free slot index",
            self.run
        )
    }
}

impl std::error::Error for StaleRunError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DuplicateFreeSlotError {
    slot: SlotNumber,
    block: SlotBlock,
}

impl DuplicateFreeSlotError {
    #[inline]
    pub fn new(slot: SlotNumber, block: SlotBlock) -> Self {
        Self { slot, block }
    }

    #[inline]
    pub fn slot(&self) -> SlotNumber {
        self.slot
    }

    #[inline]
    pub fn block(&self) -> SlotBlock {
        self.block
    }
}

impl Display for DuplicateFreeSlotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cannot free block {}: {} is already free",
            self.block, self.slot
        )
    }
}

impl std::error::Error for DuplicateFreeSlotError {}

pub trait FreeSlotsRead {
    type Iter<'a>: Iterator<Item = SlotNumber> + 'a
    where
        Self: 'a;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, slot: SlotNumber) -> bool;

    /// Free slots in ascending order.
    fn iter(&self) -> Self::Iter<'_>;

    /// Finds the lowest run of `count` consecutive free slots.
    ///
    /// Returns `None` for a zero `count` or when fewer than `count` slots
    /// are free.
    fn find_run(&self, count: SlotCount) -> Option<FreeRun>;
}

pub trait FreeSlotsWrite {
    /// Removes exactly the slots of `run`, which must describe the current
    /// contents of the index. The index is unchanged on error.
    fn remove_run(&mut self, run: FreeRun) -> Result<(), StaleRunError>;

    /// Adds every slot of `block`, keeping the whole index ascending.
    /// Fails without mutating if any slot of `block` is already free.
    fn insert_block(&mut self, block: SlotBlock) -> Result<(), DuplicateFreeSlotError>;

    fn clear(&mut self);
}

pub trait FreeSlots: FreeSlotsRead + FreeSlotsWrite + Default {}
impl<T: FreeSlotsRead + FreeSlotsWrite + Default> FreeSlots for T {}

/// Free slot index backed by a strictly ascending `Vec`.
///
/// `find_run` is a single pass with two cursors, `insert_block` is a binary
/// search followed by one splice of the whole block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SortedVecFreeSlots {
    slots: Vec<SlotNumber>,
}

impl SortedVecFreeSlots {
    #[inline]
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    #[inline]
    pub fn as_slice(&self) -> &[SlotNumber] {
        &self.slots
    }

    #[inline]
    fn run_matches(&self, run: &FreeRun) -> bool {
        let Some(last) = run.block().last() else {
            return false;
        };
        let Some(end) = run.position().checked_add(run.len().value()) else {
            return false;
        };
        end <= self.slots.len()
            && self.slots[run.position()] == run.start()
            && self.slots[end - 1] == last
    }
}

impl FreeSlotsRead for SortedVecFreeSlots {
    type Iter<'a>
        = Copied<std::slice::Iter<'a, SlotNumber>>
    where
        Self: 'a;

    #[inline]
    fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn contains(&self, slot: SlotNumber) -> bool {
        self.slots.binary_search(&slot).is_ok()
    }

    #[inline]
    fn iter(&self) -> Self::Iter<'_> {
        self.slots.iter().copied()
    }

    fn find_run(&self, count: SlotCount) -> Option<FreeRun> {
        let width = count.value();
        if width == 0 || width > self.slots.len() {
            return None;
        }
        // Entries are strictly ascending, so a window spanning exactly
        // `width - 1` values has no gaps.
        let span = SlotCount::new(width - 1);
        self.slots
            .windows(width)
            .position(|window| window[width - 1] - window[0] == span)
            .map(|position| {
                let start = self.slots[position];
                FreeRun::new(position, SlotBlock::new(start, start + count))
            })
    }
}

impl FreeSlotsWrite for SortedVecFreeSlots {
    fn remove_run(&mut self, run: FreeRun) -> Result<(), StaleRunError> {
        if !self.run_matches(&run) {
            return Err(StaleRunError::new(run));
        }
        let position = run.position();
        self.slots.drain(position..position + run.len().value());
        Ok(())
    }

    fn insert_block(&mut self, block: SlotBlock) -> Result<(), DuplicateFreeSlotError> {
        if block.is_empty() {
            return Ok(());
        }
        let position = self.slots.partition_point(|&slot| slot < block.start());
        if let Some(&existing) = self.slots.get(position)
            && block.contains(existing)
        {
            return Err(DuplicateFreeSlotError::new(existing, block));
        }
        self.slots.splice(position..position, block.slots());
        Ok(())
    }

    #[inline]
    fn clear(&mut self) {
        self.slots.clear();
    }
}

/// Free slot index backed by a `BTreeSet`.
///
/// Inserts and removals are `O(k log n)`; `find_run` walks the set in order
/// and tracks the current stretch of consecutive values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BTreeSetFreeSlots {
    slots: BTreeSet<SlotNumber>,
}

impl BTreeSetFreeSlots {
    #[inline]
    pub fn new() -> Self {
        Self {
            slots: BTreeSet::new(),
        }
    }
}

impl FreeSlotsRead for BTreeSetFreeSlots {
    type Iter<'a>
        = Copied<btree_set::Iter<'a, SlotNumber>>
    where
        Self: 'a;

    #[inline]
    fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn contains(&self, slot: SlotNumber) -> bool {
        self.slots.contains(&slot)
    }

    #[inline]
    fn iter(&self) -> Self::Iter<'_> {
        self.slots.iter().copied()
    }

    fn find_run(&self, count: SlotCount) -> Option<FreeRun> {
        let width = count.value();
        if width == 0 || width > self.slots.len() {
            return None;
        }
        let mut run_position = 0;
        let mut run_start = SlotNumber::first();
        let mut run_len = 0;
        let mut prev: Option<SlotNumber> = None;
        for (position, &slot) in self.slots.iter().enumerate() {
            let extends = prev.is_some_and(|p| p.checked_add(SlotCount::new(1)) == Some(slot));
            if !extends {
                run_position = position;
                run_start = slot;
                run_len = 0;
            }
            run_len += 1;
            prev = Some(slot);
            if run_len == width {
                return Some(FreeRun::new(
                    run_position,
                    SlotBlock::new(run_start, run_start + count),
                ));
            }
        }
        None
    }
}

impl FreeSlotsWrite for BTreeSetFreeSlots {
    fn remove_run(&mut self, run: FreeRun) -> Result<(), StaleRunError> {
        let present = !run.is_empty() && run.block().slots().all(|slot| self.slots.contains(&slot));
        if !present || self.slots.range(..run.start()).count() != run.position() {
            return Err(StaleRunError::new(run));
        }
        for slot in run.block().slots() {
            self.slots.remove(&slot);
        }
        Ok(())
    }

    fn insert_block(&mut self, block: SlotBlock) -> Result<(), DuplicateFreeSlotError> {
        if let Some(&existing) = self.slots.range(block.to_range()).next() {
            return Err(DuplicateFreeSlotError::new(existing, block));
        }
        self.slots.extend(block.slots());
        Ok(())
    }

    #[inline]
    fn clear(&mut self) {
        self.slots.clear();
    }
}
