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

use crate::err::{InvalidVehicleError, InvalidVehicleReason, UnknownVehicleKindError};
use carpark_core::{SlotBlock, SlotCount, SlotNumber};
use std::{fmt::Display, str::FromStr};

/// The vehicle categories the car park knows about.
///
/// The only behavioural difference between categories is the number of
/// consecutive slots a vehicle of that category occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VehicleKind {
    Motorcycle,
    Car,
    Bus,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 3] = [VehicleKind::Motorcycle, VehicleKind::Car, VehicleKind::Bus];

    #[inline]
    pub const fn slots_needed(self) -> SlotCount {
        match self {
            VehicleKind::Motorcycle => SlotCount::new(1),
            VehicleKind::Car => SlotCount::new(2),
            VehicleKind::Bus => SlotCount::new(3),
        }
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            VehicleKind::Motorcycle => "Motorcycle",
            VehicleKind::Car => "Car",
            VehicleKind::Bus => "Bus",
        }
    }
}

impl Display for VehicleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VehicleKind {
    type Err = UnknownVehicleKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVehicleKindError::new(s))
    }
}

/// A vehicle waiting to be parked.
///
/// The number of slots it needs defaults to its category's, but may be
/// overridden; the allocation engine only ever looks at `slots_needed`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vehicle {
    registration: String,
    colour: String,
    kind: VehicleKind,
    slots_needed: SlotCount,
}

impl Vehicle {
    #[inline]
    pub fn new(
        registration: impl Into<String>,
        colour: impl Into<String>,
        kind: VehicleKind,
    ) -> Self {
        Self {
            registration: registration.into(),
            colour: colour.into(),
            kind,
            slots_needed: kind.slots_needed(),
        }
    }

    #[inline]
    pub fn with_slots_needed(mut self, slots_needed: SlotCount) -> Self {
        self.slots_needed = slots_needed;
        self
    }

    #[inline]
    pub fn registration(&self) -> &str {
        &self.registration
    }

    #[inline]
    pub fn colour(&self) -> &str {
        &self.colour
    }

    #[inline]
    pub fn kind(&self) -> VehicleKind {
        self.kind
    }

    #[inline]
    pub fn slots_needed(&self) -> SlotCount {
        self.slots_needed
    }

    /// Rejects vehicles that cannot be recorded: blank registration or
    /// colour, or a zero-length block.
    pub fn validate(&self) -> Result<(), InvalidVehicleError> {
        let reason = if self.registration.trim().is_empty() {
            InvalidVehicleReason::EmptyRegistration
        } else if self.colour.trim().is_empty() {
            InvalidVehicleReason::EmptyColour
        } else if self.slots_needed.is_zero() {
            InvalidVehicleReason::ZeroSlotsNeeded
        } else {
            return Ok(());
        };
        Err(InvalidVehicleError::new(self.registration.clone(), reason))
    }
}

impl Display for Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.colour, self.kind, self.registration)
    }
}

/// A vehicle together with the block of slots it was assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParkedVehicle {
    vehicle: Vehicle,
    block: SlotBlock,
}

impl ParkedVehicle {
    #[inline]
    pub fn new(vehicle: Vehicle, block: SlotBlock) -> Self {
        debug_assert_eq!(block.extent(), vehicle.slots_needed());
        Self { vehicle, block }
    }

    /// The assigned slot: the lowest slot of the block.
    #[inline]
    pub fn slot(&self) -> SlotNumber {
        self.block.start()
    }

    #[inline]
    pub fn block(&self) -> SlotBlock {
        self.block
    }

    #[inline]
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    #[inline]
    pub fn registration(&self) -> &str {
        self.vehicle.registration()
    }

    #[inline]
    pub fn colour(&self) -> &str {
        self.vehicle.colour()
    }

    #[inline]
    pub fn kind(&self) -> VehicleKind {
        self.vehicle.kind()
    }

    #[inline]
    pub fn into_vehicle(self) -> Vehicle {
        self.vehicle
    }
}

impl Display for ParkedVehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.vehicle, self.block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_slots_needed() {
        assert_eq!(VehicleKind::Motorcycle.slots_needed(), SlotCount::new(1));
        assert_eq!(VehicleKind::Car.slots_needed(), SlotCount::new(2));
        assert_eq!(VehicleKind::Bus.slots_needed(), SlotCount::new(3));
    }

    #[test]
    fn test_kind_parse_ignores_case() {
        assert_eq!("car".parse::<VehicleKind>(), Ok(VehicleKind::Car));
        assert_eq!("Motorcycle".parse::<VehicleKind>(), Ok(VehicleKind::Motorcycle));
        assert_eq!("BUS".parse::<VehicleKind>(), Ok(VehicleKind::Bus));
    }

    #[test]
    fn test_kind_parse_unknown() {
        let err = "truck".parse::<VehicleKind>().unwrap_err();
        assert_eq!(err.input(), "truck");
        assert!("".parse::<VehicleKind>().is_err());
    }

    #[test]
    fn test_vehicle_takes_slots_from_kind() {
        let v = Vehicle::new("KA-01-HH-1234", "White", VehicleKind::Car);
        assert_eq!(v.registration(), "KA-01-HH-1234");
        assert_eq!(v.colour(), "White");
        assert_eq!(v.kind(), VehicleKind::Car);
        assert_eq!(v.slots_needed(), SlotCount::new(2));
    }

    #[test]
    fn test_vehicle_slots_override() {
        let v = Vehicle::new("R1", "Red", VehicleKind::Bus).with_slots_needed(SlotCount::new(5));
        assert_eq!(v.slots_needed(), SlotCount::new(5));
        assert_eq!(v.kind(), VehicleKind::Bus);
    }

    #[test]
    fn test_validate_accepts_regular_vehicle() {
        assert!(Vehicle::new("R1", "Red", VehicleKind::Motorcycle).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let e = Vehicle::new("  ", "Red", VehicleKind::Car).validate().unwrap_err();
        assert_eq!(e.reason(), InvalidVehicleReason::EmptyRegistration);

        let e = Vehicle::new("R1", "", VehicleKind::Car).validate().unwrap_err();
        assert_eq!(e.reason(), InvalidVehicleReason::EmptyColour);
        assert_eq!(e.registration(), "R1");
    }

    #[test]
    fn test_validate_rejects_zero_slots() {
        let e = Vehicle::new("R1", "Red", VehicleKind::Car)
            .with_slots_needed(SlotCount::zero())
            .validate()
            .unwrap_err();
        assert_eq!(e.reason(), InvalidVehicleReason::ZeroSlotsNeeded);
    }

    #[test]
    fn test_parked_vehicle_slot_is_block_start() {
        let block = SlotNumber::new(4).span_of(SlotCount::new(3)).unwrap();
        let parked = ParkedVehicle::new(Vehicle::new("B1", "Blue", VehicleKind::Bus), block);
        assert_eq!(parked.slot(), SlotNumber::new(4));
        assert_eq!(parked.block(), block);
        assert_eq!(parked.colour(), "Blue");
        assert_eq!(parked.to_string(), "Blue Bus (B1) at [SlotNumber(4), SlotNumber(7))");
        assert_eq!(parked.into_vehicle().registration(), "B1");
    }
}
