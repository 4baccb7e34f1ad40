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

//! # Car Park Model (`carpark-model`)
//!
//! The vehicle catalogue consumed by the allocation engine.
//!
//! - **`VehicleKind`**: the closed set of categories (`Motorcycle`, `Car`, `Bus`)
//!   and the number of consecutive slots each one needs (1, 2 and 3).
//! - **`Vehicle`**: registration, colour and category of a vehicle about to park.
//!   Its `slots_needed` is all the engine cares about.
//! - **`ParkedVehicle`**: a vehicle plus the `SlotBlock` it was assigned.

pub mod err;
pub mod vehicle;

pub use err::{InvalidVehicleError, InvalidVehicleReason, UnknownVehicleKindError};
pub use vehicle::{ParkedVehicle, Vehicle, VehicleKind};

pub mod prelude {
    pub use crate::err::{InvalidVehicleError, InvalidVehicleReason, UnknownVehicleKindError};
    pub use crate::vehicle::{ParkedVehicle, Vehicle, VehicleKind};
    pub use carpark_core::{SlotBlock, SlotCount, SlotNumber};
}
