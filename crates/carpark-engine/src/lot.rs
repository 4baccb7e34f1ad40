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
    err::{DepartError, LotFullError, ParkError, SlotNotOccupiedError},
    free_slots::{FreeSlots, FreeSlotsRead, FreeSlotsWrite, SortedVecFreeSlots},
};
use carpark_core::{SlotBlock, SlotCount, SlotNumber};
use carpark_model::{ParkedVehicle, Vehicle};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

/// The state of an initialized car park.
///
/// Slots `1..=high_water_mark` have been handed out at least once; every one
/// of them is either occupied or held by the free slot index. Slots above the
/// high-water mark have never been used. Departures never lower the mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingLot<F = SortedVecFreeSlots> {
    capacity: SlotCount,
    high_water_mark: SlotCount,
    // Every occupied slot maps to the first slot of its vehicle's block.
    occupied: HashMap<SlotNumber, SlotNumber>,
    vehicles: BTreeMap<SlotNumber, ParkedVehicle>,
    free: F,
}

impl<F: FreeSlots> ParkingLot<F> {
    #[inline]
    pub fn new(capacity: SlotCount) -> Self {
        Self {
            capacity,
            high_water_mark: SlotCount::zero(),
            occupied: HashMap::new(),
            vehicles: BTreeMap::new(),
            free: F::default(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> SlotCount {
        self.capacity
    }

    #[inline]
    pub fn high_water_mark(&self) -> SlotCount {
        self.high_water_mark
    }

    /// Number of slots currently covered by parked vehicles.
    #[inline]
    pub fn occupied_slots(&self) -> SlotCount {
        SlotCount::new(self.occupied.len())
    }

    #[inline]
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    #[inline]
    pub fn free_slots(&self) -> &F {
        &self.free
    }

    /// The vehicle covering `slot`, whether or not `slot` is its first slot.
    #[inline]
    pub fn vehicle_at(&self, slot: SlotNumber) -> Option<&ParkedVehicle> {
        self.occupied
            .get(&slot)
            .and_then(|start| self.vehicles.get(start))
    }

    /// Parked vehicles in ascending slot order.
    #[inline]
    pub fn parked(&self) -> impl Iterator<Item = &ParkedVehicle> + '_ {
        self.vehicles.values()
    }

    /// Parks `vehicle` and returns the first slot of its block.
    ///
    /// A run of reusable free slots always wins over extending the
    /// high-water mark, and the lowest such run is taken.
    pub fn park(&mut self, vehicle: Vehicle) -> Result<SlotNumber, ParkError> {
        vehicle.validate()?;
        let block = self.allocate(vehicle.slots_needed())?;
        let start = block.start();
        for slot in block.slots() {
            self.occupied.insert(slot, start);
        }
        self.vehicles.insert(start, ParkedVehicle::new(vehicle, block));
        Ok(start)
    }

    fn allocate(&mut self, count: SlotCount) -> Result<SlotBlock, ParkError> {
        if let Some(run) = self.free.find_run(count) {
            self.free.remove_run(run)?;
            debug!(%run, "Reusing free run");
            return Ok(run.block());
        }

        let full = || LotFullError::new(count, self.high_water_mark, self.capacity);
        let new_mark = self
            .high_water_mark
            .checked_add(count)
            .filter(|mark| *mark <= self.capacity)
            .ok_or_else(full)?;
        // The exclusive end of a block ending at the last slot of a
        // `usize::MAX` lot is not representable.
        let block = SlotNumber::first()
            .checked_add(self.high_water_mark)
            .and_then(|start| start.span_of(count))
            .ok_or_else(full)?;
        trace!(%block, high_water_mark = new_mark.value(), "Extending into unused slots");
        self.high_water_mark = new_mark;
        Ok(block)
    }

    /// Removes the vehicle covering `slot` and hands its whole block back to
    /// the free slot index.
    ///
    /// `slot` may be any slot of the block; an interior slot of a multi-slot
    /// vehicle resolves to the vehicle's first slot.
    pub fn depart(&mut self, slot: SlotNumber) -> Result<ParkedVehicle, DepartError> {
        let start = *self
            .occupied
            .get(&slot)
            .ok_or(SlotNotOccupiedError::new(slot))?;
        if start != slot {
            debug!(
                slot = slot.value(),
                start = start.value(),
                "Resolved interior slot to block start"
            );
        }
        let parked = self
            .vehicles
            .remove(&start)
            .ok_or(SlotNotOccupiedError::new(slot))?;
        if let Err(e) = self.free.insert_block(parked.block()) {
            self.vehicles.insert(start, parked);
            return Err(e.into());
        }
        for s in parked.block().slots() {
            self.occupied.remove(&s);
        }
        Ok(parked)
    }

    /// `(slot, registration)` of every vehicle of exactly `colour`, in
    /// ascending slot order.
    pub fn vehicles_with_colour(&self, colour: &str) -> Vec<(SlotNumber, &str)> {
        self.vehicles
            .values()
            .filter(|parked| parked.colour() == colour)
            .map(|parked| (parked.slot(), parked.registration()))
            .collect()
    }

    /// First slot of the lowest-placed vehicle with `registration`.
    pub fn slot_for_registration(&self, registration: &str) -> Option<SlotNumber> {
        self.vehicles
            .values()
            .find(|parked| parked.registration() == registration)
            .map(ParkedVehicle::slot)
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        assert!(self.high_water_mark <= self.capacity);
        let top = SlotNumber::first() + self.high_water_mark;
        for (&slot, start) in &self.occupied {
            assert!(slot >= SlotNumber::first() && slot < top, "{slot} beyond mark");
            let parked = self.vehicles.get(start).expect("slot maps to a parked vehicle");
            assert!(parked.block().contains(slot));
            assert!(!self.free.contains(slot), "{slot} both occupied and free");
        }
        let covered: usize = self.vehicles.values().map(|p| p.block().extent().value()).sum();
        assert_eq!(covered, self.occupied.len());
        for (&start, parked) in &self.vehicles {
            assert_eq!(start, parked.slot());
            assert_eq!(parked.block().extent(), parked.vehicle().slots_needed());
        }
        let free: Vec<SlotNumber> = self.free.iter().collect();
        assert!(free.windows(2).all(|w| w[0] < w[1]), "free index not ascending");
        assert!(free.iter().all(|&s| s >= SlotNumber::first() && s < top));
        assert_eq!(
            free.len() + self.occupied.len(),
            self.high_water_mark.value(),
            "slots below the mark must be either free or occupied"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::free_slots::BTreeSetFreeSlots;
    use carpark_model::VehicleKind;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn sized(registration: &str, colour: &str, slots: usize) -> Vehicle {
        Vehicle::new(registration, colour, VehicleKind::Motorcycle)
            .with_slots_needed(SlotCount::new(slots))
    }

    fn slot(n: usize) -> SlotNumber {
        SlotNumber::new(n)
    }

    fn free_list<F: FreeSlots>(lot: &ParkingLot<F>) -> Vec<usize> {
        lot.free_slots().iter().map(SlotNumber::value).collect()
    }

    /// Capacity 6, six single-slot vehicles in slots 1 to 6.
    fn six_singles<F: FreeSlots>() -> ParkingLot<F> {
        let mut lot = ParkingLot::new(SlotCount::new(6));
        for i in 1..=6 {
            let got = lot.park(sized(&format!("R{i}"), "White", 1)).unwrap();
            assert_eq!(got, slot(i));
        }
        lot
    }

    macro_rules! test_lot_impl {
        ($modname:ident, $F:ty) => {
            mod $modname {
                use super::*;

                type Lot = ParkingLot<$F>;

                #[test]
                fn test_new_lot_is_empty() {
                    let lot = Lot::new(SlotCount::new(4));
                    assert_eq!(lot.capacity(), SlotCount::new(4));
                    assert_eq!(lot.high_water_mark(), SlotCount::zero());
                    assert_eq!(lot.occupied_slots(), SlotCount::zero());
                    assert_eq!(lot.parked().count(), 0);
                    lot.assert_invariants();
                }

                #[test]
                fn test_park_extends_high_water_mark() {
                    let mut lot = Lot::new(SlotCount::new(10));
                    assert_eq!(lot.park(sized("A", "Red", 2)).unwrap(), slot(1));
                    assert_eq!(lot.park(sized("B", "Red", 3)).unwrap(), slot(3));
                    assert_eq!(lot.park(sized("C", "Red", 1)).unwrap(), slot(6));
                    assert_eq!(lot.high_water_mark(), SlotCount::new(6));
                    assert_eq!(lot.occupied_slots(), SlotCount::new(6));
                    assert_eq!(lot.vehicle_count(), 3);
                    lot.assert_invariants();
                }

                #[test]
                fn test_park_records_every_slot_of_the_block() {
                    let mut lot = Lot::new(SlotCount::new(10));
                    lot.park(sized("A", "Red", 1)).unwrap();
                    lot.park(sized("B", "Blue", 3)).unwrap();
                    for s in 2..=4 {
                        let parked = lot.vehicle_at(slot(s)).unwrap();
                        assert_eq!(parked.registration(), "B");
                        assert_eq!(parked.slot(), slot(2));
                    }
                    assert!(lot.vehicle_at(slot(5)).is_none());
                }

                #[test]
                fn test_scenario_no_run_of_three_among_scattered_slots() {
                    let mut lot: Lot = six_singles();
                    lot.depart(slot(2)).unwrap();
                    lot.depart(slot(5)).unwrap();
                    assert_eq!(free_list(&lot), vec![2, 5]);

                    let err = lot.park(sized("BUS", "Red", 3)).unwrap_err();
                    assert!(matches!(err, ParkError::Full(_)));
                    assert_eq!(free_list(&lot), vec![2, 5]);
                    lot.assert_invariants();
                }

                #[test]
                fn test_scenario_run_of_three_from_separate_departures() {
                    let mut lot: Lot = six_singles();
                    for s in [2, 5, 3, 4] {
                        lot.depart(slot(s)).unwrap();
                    }
                    assert_eq!(free_list(&lot), vec![2, 3, 4, 5]);

                    assert_eq!(lot.park(sized("BUS", "Red", 3)).unwrap(), slot(2));
                    assert_eq!(free_list(&lot), vec![5]);
                    assert_eq!(lot.high_water_mark(), SlotCount::new(6));
                    lot.assert_invariants();
                }

                #[test]
                fn test_reuse_before_extend() {
                    let mut lot = Lot::new(SlotCount::new(20));
                    for i in 0..4 {
                        lot.park(sized(&format!("R{i}"), "Grey", 1)).unwrap();
                    }
                    lot.depart(slot(3)).unwrap();
                    // Slot 5 would fit too, but slot 3 is reusable.
                    assert_eq!(lot.park(sized("N", "Grey", 1)).unwrap(), slot(3));
                    assert_eq!(lot.high_water_mark(), SlotCount::new(4));
                }

                #[test]
                fn test_lowest_run_first_not_best_fit() {
                    let mut lot = Lot::new(SlotCount::new(20));
                    lot.park(sized("A", "Red", 3)).unwrap(); // 1..=3
                    lot.park(sized("B", "Red", 1)).unwrap(); // 4
                    lot.park(sized("C", "Red", 2)).unwrap(); // 5..=6
                    lot.park(sized("D", "Red", 1)).unwrap(); // 7
                    lot.depart(slot(5)).unwrap();
                    lot.depart(slot(1)).unwrap();
                    assert_eq!(free_list(&lot), vec![1, 2, 3, 5, 6]);
                    assert_eq!(lot.park(sized("E", "Red", 2)).unwrap(), slot(1));
                    assert_eq!(free_list(&lot), vec![3, 5, 6]);
                }

                #[test]
                fn test_round_trip_restores_run() {
                    let mut lot = Lot::new(SlotCount::new(12));
                    lot.park(sized("A", "Red", 2)).unwrap();
                    lot.park(sized("B", "Red", 2)).unwrap();
                    lot.depart(slot(1)).unwrap();
                    let s = lot.park(sized("C", "Red", 2)).unwrap();
                    lot.depart(s).unwrap();
                    let run = lot.free_slots().find_run(SlotCount::new(2)).unwrap();
                    assert_eq!(run.start(), s);
                    lot.assert_invariants();
                }

                #[test]
                fn test_capacity_boundary() {
                    let capacity = 10;
                    let k = 3;
                    let mut lot = Lot::new(SlotCount::new(capacity));
                    // Bring the mark to C - k, so the next block starts at C - k + 1.
                    lot.park(sized("FILL", "Red", capacity - k)).unwrap();
                    assert_eq!(
                        lot.park(sized("WIDE", "Red", k + 1)).unwrap_err(),
                        ParkError::Full(LotFullError::new(
                            SlotCount::new(k + 1),
                            SlotCount::new(capacity - k),
                            SlotCount::new(capacity),
                        ))
                    );
                    assert_eq!(lot.park(sized("FIT", "Red", k)).unwrap(), slot(capacity - k + 1));
                    assert_eq!(lot.high_water_mark(), SlotCount::new(capacity));
                    assert!(matches!(lot.park(sized("ONE", "Red", 1)), Err(ParkError::Full(_))));
                }

                #[test]
                fn test_park_at_the_top_of_a_maximal_lot_is_full() {
                    let capacity = SlotCount::new(usize::MAX);
                    let mut lot = Lot::new(capacity);
                    let wide = SlotCount::new(usize::MAX);
                    assert_eq!(
                        lot.park(sized("A", "Red", usize::MAX)).unwrap_err(),
                        ParkError::Full(LotFullError::new(wide, SlotCount::zero(), capacity))
                    );
                    assert_eq!(lot.high_water_mark(), SlotCount::zero());
                    assert_eq!(lot.park(sized("B", "Red", 2)).unwrap(), slot(1));
                    lot.assert_invariants();
                }

                #[test]
                fn test_park_rejects_invalid_vehicle_without_side_effects() {
                    let mut lot = Lot::new(SlotCount::new(3));
                    let err = lot.park(sized("", "Red", 1)).unwrap_err();
                    assert!(matches!(err, ParkError::InvalidVehicle(_)));
                    let err = lot.park(sized("A", "Red", 0)).unwrap_err();
                    assert!(matches!(err, ParkError::InvalidVehicle(_)));
                    assert_eq!(lot.high_water_mark(), SlotCount::zero());
                }

                #[test]
                fn test_depart_unknown_slot() {
                    let mut lot = Lot::new(SlotCount::new(3));
                    lot.park(sized("A", "Red", 1)).unwrap();
                    assert_eq!(
                        lot.depart(slot(2)),
                        Err(DepartError::NotFound(SlotNotOccupiedError::new(slot(2))))
                    );
                    lot.depart(slot(1)).unwrap();
                    assert!(matches!(lot.depart(slot(1)), Err(DepartError::NotFound(_))));
                }

                #[test]
                fn test_depart_frees_the_whole_block() {
                    let mut lot = Lot::new(SlotCount::new(10));
                    lot.park(sized("A", "Red", 1)).unwrap();
                    lot.park(sized("B", "Red", 3)).unwrap();
                    let parked = lot.depart(slot(2)).unwrap();
                    assert_eq!(parked.registration(), "B");
                    assert_eq!(parked.block().extent(), SlotCount::new(3));
                    assert_eq!(free_list(&lot), vec![2, 3, 4]);
                    assert_eq!(lot.high_water_mark(), SlotCount::new(4));
                    lot.assert_invariants();
                }

                #[test]
                fn test_depart_interior_slot_resolves_to_block_start() {
                    let mut lot = Lot::new(SlotCount::new(10));
                    lot.park(sized("A", "Red", 3)).unwrap();
                    let parked = lot.depart(slot(3)).unwrap();
                    assert_eq!(parked.slot(), slot(1));
                    assert_eq!(free_list(&lot), vec![1, 2, 3]);
                    assert!(lot.vehicle_at(slot(1)).is_none());
                    lot.assert_invariants();
                }

                #[test]
                fn test_depart_merges_into_existing_free_entries() {
                    let mut lot = Lot::new(SlotCount::new(10));
                    for r in ["A", "B", "C", "D"] {
                        lot.park(sized(r, "Red", 2)).unwrap();
                    }
                    lot.depart(slot(7)).unwrap();
                    lot.depart(slot(1)).unwrap();
                    lot.depart(slot(3)).unwrap();
                    assert_eq!(free_list(&lot), vec![1, 2, 3, 4, 7, 8]);
                    assert_eq!(lot.park(sized("E", "Red", 4)).unwrap(), slot(1));
                }

                #[test]
                fn test_colour_query_is_ordered_and_exact() {
                    let mut lot = Lot::new(SlotCount::new(10));
                    lot.park(sized("A", "White", 2)).unwrap();
                    lot.park(sized("B", "Black", 1)).unwrap();
                    lot.park(sized("C", "White", 1)).unwrap();
                    lot.park(sized("D", "white", 1)).unwrap();
                    lot.depart(slot(1)).unwrap();
                    lot.park(sized("E", "White", 1)).unwrap(); // reuses slot 1
                    assert_eq!(
                        lot.vehicles_with_colour("White"),
                        vec![(slot(1), "E"), (slot(4), "C")]
                    );
                    assert!(lot.vehicles_with_colour("Green").is_empty());
                }

                #[test]
                fn test_registration_query_returns_lowest_match() {
                    let mut lot = Lot::new(SlotCount::new(10));
                    lot.park(sized("X", "Red", 1)).unwrap();
                    lot.park(sized("DUP", "Red", 2)).unwrap();
                    lot.park(sized("DUP", "Blue", 1)).unwrap();
                    assert_eq!(lot.slot_for_registration("DUP"), Some(slot(2)));
                    assert_eq!(lot.slot_for_registration("X"), Some(slot(1)));
                    assert_eq!(lot.slot_for_registration("x"), None);
                }

                #[test]
                fn test_parked_is_in_slot_order() {
                    let mut lot = Lot::new(SlotCount::new(10));
                    for (r, k) in [("A", 1), ("B", 2), ("C", 1)] {
                        lot.park(sized(r, "Red", k)).unwrap();
                    }
                    lot.depart(slot(1)).unwrap();
                    lot.park(sized("D", "Red", 1)).unwrap();
                    let order: Vec<&str> = lot.parked().map(ParkedVehicle::registration).collect();
                    assert_eq!(order, vec!["D", "B", "C"]);
                }

                #[test]
                fn test_randomized_operations_keep_invariants() {
                    let mut rng = ChaCha8Rng::seed_from_u64(0xCA7_9A7C);
                    let mut lot = Lot::new(SlotCount::new(40));
                    let mut mark = SlotCount::zero();
                    for step in 0..3_000 {
                        if rng.random_bool(0.55) {
                            let k = rng.random_range(1..=3usize);
                            let before = lot.free_slots().find_run(SlotCount::new(k));
                            match lot.park(sized(&format!("V{step}"), "Red", k)) {
                                Ok(start) => {
                                    if let Some(run) = before {
                                        assert_eq!(start, run.start());
                                    } else {
                                        assert_eq!(start, SlotNumber::first() + mark);
                                    }
                                }
                                Err(ParkError::Full(_)) => assert!(before.is_none()),
                                Err(e) => panic!("unexpected error: {e}"),
                            }
                        } else {
                            let s = slot(rng.random_range(1..=40usize));
                            let occupied = lot.vehicle_at(s).is_some();
                            assert_eq!(lot.depart(s).is_ok(), occupied);
                        }
                        assert!(lot.high_water_mark() >= mark);
                        mark = lot.high_water_mark();
                        lot.assert_invariants();
                    }
                }
            }
        };
    }

    test_lot_impl!(sorted_vec, SortedVecFreeSlots);
    test_lot_impl!(btree_set, BTreeSetFreeSlots);
}
