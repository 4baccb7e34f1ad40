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

use crate::{
    err::{
        AlreadyInitializedError, DepartError, InitializeError, NotInitializedError, ParkError,
        VehicleNotFoundError, VehicleQuery,
    },
    free_slots::{FreeSlots, SortedVecFreeSlots},
    lot::ParkingLot,
};
use carpark_core::{SlotCount, SlotNumber};
use carpark_model::{ParkedVehicle, Vehicle};
use tracing::{info, instrument};

/// A car park that starts out without any slots and is given its capacity
/// exactly once by [`CarPark::initialize`].
///
/// Mutating calls before initialization fail with `NotInitialized`; lookups
/// simply find nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CarPark<F = SortedVecFreeSlots> {
    lot: Option<ParkingLot<F>>,
}

impl<F: FreeSlots> CarPark<F> {
    #[inline]
    pub fn new() -> Self {
        Self { lot: None }
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.lot.is_some()
    }

    #[inline]
    pub fn lot(&self) -> Option<&ParkingLot<F>> {
        self.lot.as_ref()
    }

    #[inline]
    fn lot_mut(&mut self) -> Result<&mut ParkingLot<F>, NotInitializedError> {
        self.lot.as_mut().ok_or(NotInitializedError)
    }

    /// Creates the lot with `capacity` slots. Only the first successful
    /// call has any effect.
    #[instrument(skip_all, fields(capacity = capacity.value()), err(Display))]
    pub fn initialize(&mut self, capacity: SlotCount) -> Result<(), InitializeError> {
        if let Some(lot) = &self.lot {
            return Err(AlreadyInitializedError::new(lot.capacity()).into());
        }
        if capacity.is_zero() {
            return Err(InitializeError::ZeroCapacity);
        }
        self.lot = Some(ParkingLot::new(capacity));
        info!("Parking lot created");
        Ok(())
    }

    #[instrument(
        skip_all,
        fields(
            registration = vehicle.registration(),
            slots_needed = vehicle.slots_needed().value()
        ),
        err(Display)
    )]
    pub fn park(&mut self, vehicle: Vehicle) -> Result<SlotNumber, ParkError> {
        self.lot_mut()?.park(vehicle)
    }

    #[instrument(skip_all, fields(slot = slot.value()), err(Display))]
    pub fn depart(&mut self, slot: SlotNumber) -> Result<ParkedVehicle, DepartError> {
        self.lot_mut()?.depart(slot)
    }

    /// `(slot, registration)` pairs of all vehicles with exactly `colour`,
    /// ascending by slot.
    pub fn query_by_colour(
        &self,
        colour: &str,
    ) -> Result<Vec<(SlotNumber, &str)>, VehicleNotFoundError> {
        let matches = self
            .lot
            .as_ref()
            .map(|lot| lot.vehicles_with_colour(colour))
            .unwrap_or_default();
        if matches.is_empty() {
            return Err(VehicleNotFoundError::new(VehicleQuery::Colour(
                colour.to_owned(),
            )));
        }
        Ok(matches)
    }

    pub fn query_by_registration(
        &self,
        registration: &str,
    ) -> Result<SlotNumber, VehicleNotFoundError> {
        self.lot
            .as_ref()
            .and_then(|lot| lot.slot_for_registration(registration))
            .ok_or_else(|| {
                VehicleNotFoundError::new(VehicleQuery::Registration(registration.to_owned()))
            })
    }

    /// Parked vehicles ordered by slot. Empty when uninitialized.
    pub fn status(&self) -> Vec<&ParkedVehicle> {
        self.lot
            .as_ref()
            .map(|lot| lot.parked().collect())
            .unwrap_or_default()
    }
}
