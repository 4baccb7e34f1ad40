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

//! # Car Park Engine (`carpark-engine`)
//!
//! Slot allocation for a car park whose vehicles occupy one or more
//! consecutive numbered slots.
//!
//! A new vehicle first looks for the lowest run of reusable slots in the
//! free slot index ([`free_slots`]); only when none exists is the
//! high-water mark pushed into never-used slots, within the lot's capacity.
//! A departing vehicle hands its whole block back to the index.
//!
//! - [`CarPark`]: uninitialized / initialized lifecycle and the public
//!   operations (`initialize`, `park`, `depart`, queries, `status`).
//! - [`ParkingLot`]: the state of an initialized lot.
//! - [`FreeSlotsRead`] / [`FreeSlotsWrite`]: the free slot index, with a
//!   sorted `Vec` ([`SortedVecFreeSlots`]) and a `BTreeSet`
//!   ([`BTreeSetFreeSlots`]) backend.

pub mod carpark;
pub mod err;
pub mod free_slots;
pub mod lot;

pub use carpark::CarPark;
pub use free_slots::{
    BTreeSetFreeSlots, FreeRun, FreeSlots, FreeSlotsRead, FreeSlotsWrite, SortedVecFreeSlots,
};
pub use lot::ParkingLot;
