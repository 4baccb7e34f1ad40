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

use crate::free_slots::{DuplicateFreeSlotError, StaleRunError};
use carpark_core::{SlotCount, SlotNumber};
use carpark_model::InvalidVehicleError;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotInitializedError;

impl Display for NotInitializedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Carpark not initialized")
    }
}

impl std::error::Error for NotInitializedError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlreadyInitializedError {
    capacity: SlotCount,
}

impl AlreadyInitializedError {
    #[inline]
    pub fn new(capacity: SlotCount) -> Self {
        Self { capacity }
    }

    /// Capacity of the lot that is already in place.
    #[inline]
    pub fn capacity(&self) -> SlotCount {
        self.capacity
    }
}

impl Display for AlreadyInitializedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Carpark already initialized with {} slots",
            self.capacity.value()
        )
    }
}

impl std::error::Error for AlreadyInitializedError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LotFullError {
    requested: SlotCount,
    high_water_mark: SlotCount,
    capacity: SlotCount,
}

impl LotFullError {
    #[inline]
    pub fn new(requested: SlotCount, high_water_mark: SlotCount, capacity: SlotCount) -> Self {
        Self {
            requested,
            high_water_mark,
            capacity,
        }
    }

    #[inline]
    pub fn requested(&self) -> SlotCount {
        self.requested
    }

    #[inline]
    pub fn high_water_mark(&self) -> SlotCount {
        self.high_water_mark
    }

    #[inline]
    pub fn capacity(&self) -> SlotCount {
        self.capacity
    }
}

impl Display for LotFullError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sorry, parking lot is full")
    }
}

impl std::error::Error for LotFullError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotNotOccupiedError {
    slot: SlotNumber,
}

impl SlotNotOccupiedError {
    #[inline]
    pub fn new(slot: SlotNumber) -> Self {
        Self { slot }
    }

    #[inline]
    pub fn slot(&self) -> SlotNumber {
        self.slot
    }
}

impl Display for SlotNotOccupiedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "No vehicle parked at slot {}", self.slot.value())
    }
}

impl std::error::Error for SlotNotOccupiedError {}

/// The lookup that came back empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VehicleQuery {
    Colour(String),
    Registration(String),
}

impl Display for VehicleQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleQuery::Colour(c) => write!(f, "colour '{c}'"),
            VehicleQuery::Registration(r) => write!(f, "registration '{r}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VehicleNotFoundError {
    query: VehicleQuery,
}

impl VehicleNotFoundError {
    #[inline]
    pub fn new(query: VehicleQuery) -> Self {
        Self { query }
    }

    #[inline]
    pub fn query(&self) -> &VehicleQuery {
        &self.query
    }
}

impl Display for VehicleNotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Not found")
    }
}

impl std::error::Error for VehicleNotFoundError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InitializeError {
    AlreadyInitialized(AlreadyInitializedError),
    ZeroCapacity,
}

impl Display for InitializeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitializeError::AlreadyInitialized(e) => write!(f, "{e}"),
            InitializeError::ZeroCapacity => {
                write!(f, "Parking lot capacity must be at least one slot")
            }
        }
    }
}

impl std::error::Error for InitializeError {}

impl From<AlreadyInitializedError> for InitializeError {
    fn from(e: AlreadyInitializedError) -> Self {
        InitializeError::AlreadyInitialized(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParkError {
    NotInitialized(NotInitializedError),
    InvalidVehicle(InvalidVehicleError),
    Full(LotFullError),
    /// The free slot index rejected a run it had just reported.
    FreeIndex(StaleRunError),
}

impl Display for ParkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParkError::NotInitialized(e) => write!(f, "{e}"),
            ParkError::InvalidVehicle(e) => write!(f, "{e}"),
            ParkError::Full(e) => write!(f, "{e}"),
            ParkError::FreeIndex(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ParkError {}

impl From<NotInitializedError> for ParkError {
    fn from(e: NotInitializedError) -> Self {
        ParkError::NotInitialized(e)
    }
}

impl From<InvalidVehicleError> for ParkError {
    fn from(e: InvalidVehicleError) -> Self {
        ParkError::InvalidVehicle(e)
    }
}

impl From<LotFullError> for ParkError {
    fn from(e: LotFullError) -> Self {
        ParkError::Full(e)
    }
}

impl From<StaleRunError> for ParkError {
    fn from(e: StaleRunError) -> Self {
        ParkError::FreeIndex(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepartError {
    NotInitialized(NotInitializedError),
    NotFound(SlotNotOccupiedError),
    /// The departing block overlaps slots the free index already holds.
    FreeIndex(DuplicateFreeSlotError),
}

impl Display for DepartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepartError::NotInitialized(e) => write!(f, "{e}"),
            DepartError::NotFound(e) => write!(f, "{e}"),
            DepartError::FreeIndex(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DepartError {}

impl From<NotInitializedError> for DepartError {
    fn from(e: NotInitializedError) -> Self {
        DepartError::NotInitialized(e)
    }
}

impl From<SlotNotOccupiedError> for DepartError {
    fn from(e: SlotNotOccupiedError) -> Self {
        DepartError::NotFound(e)
    }
}

impl From<DuplicateFreeSlotError> for DepartError {
    fn from(e: DuplicateFreeSlotError) -> Self {
        DepartError::FreeIndex(e)
    }
}
