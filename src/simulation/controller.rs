//! Signal control for the intersection
//!
//! The controller recomputes the whole signal state every tick from the
//! current traffic counts and the emergency approach, if any.

use std::collections::HashMap;

use log::debug;

use super::error::ControlError;
use super::types::{Approach, PhaseColor};

/// Phase shown to each approach, indexed by `Approach::index`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignalState([PhaseColor; 4]);

impl SignalState {
    /// All approaches red
    pub fn all_red() -> Self {
        Self([PhaseColor::Red; 4])
    }

    /// All red except `approach`
    pub fn green_for(approach: Approach) -> Self {
        let mut state = Self::all_red();
        state.0[approach.index()] = PhaseColor::Green;
        state
    }

    pub fn get(&self, approach: Approach) -> PhaseColor {
        self.0[approach.index()]
    }

    /// The approach holding right-of-way, if any
    pub fn green(&self) -> Option<Approach> {
        self.iter()
            .find(|(_, color)| color.is_green())
            .map(|(approach, _)| approach)
    }

    pub fn green_count(&self) -> usize {
        self.0.iter().filter(|color| color.is_green()).count()
    }

    /// Iterate in `Approach::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (Approach, PhaseColor)> + '_ {
        Approach::ALL.into_iter().map(|a| (a, self.get(a)))
    }
}

/// Number of live vehicles on each approach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrafficCounts([usize; 4]);

impl TrafficCounts {
    pub fn new(north: usize, south: usize, east: usize, west: usize) -> Self {
        Self([north, south, east, west])
    }

    pub fn get(&self, approach: Approach) -> usize {
        self.0[approach.index()]
    }

    pub fn increment(&mut self, approach: Approach) {
        self.0[approach.index()] += 1;
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// Approach with the highest count; ties go to the earliest in `Approach::ALL`
    pub fn busiest(&self) -> Approach {
        let mut best = Approach::North;
        for approach in Approach::ALL {
            if self.get(approach) > self.get(best) {
                best = approach;
            }
        }
        best
    }
}

impl TryFrom<&HashMap<Approach, usize>> for TrafficCounts {
    type Error = ControlError;

    fn try_from(map: &HashMap<Approach, usize>) -> Result<Self, Self::Error> {
        let mut counts = [0; 4];
        for approach in Approach::ALL {
            counts[approach.index()] = *map
                .get(&approach)
                .ok_or(ControlError::MissingApproach(approach))?;
        }
        Ok(Self(counts))
    }
}

/// Grants right-of-way to at most one approach per tick
#[derive(Debug, Clone, Default)]
pub struct IntersectionController {
    signals: SignalState,
}

impl IntersectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current signal state
    pub fn signals(&self) -> SignalState {
        self.signals
    }

    /// Validate `counts` and recompute the signal state
    ///
    /// Fails with `ControlError::MissingApproach` if any approach has no
    /// entry; the current state is left untouched in that case.
    pub fn decide(
        &mut self,
        counts: &HashMap<Approach, usize>,
        emergency: Option<Approach>,
    ) -> Result<SignalState, ControlError> {
        let counts = TrafficCounts::try_from(counts)?;
        Ok(self.decide_counts(&counts, emergency))
    }

    /// Recompute the signal state from already complete counts
    ///
    /// An emergency approach always wins. Otherwise the busiest approach is
    /// green.
    pub fn decide_counts(
        &mut self,
        counts: &TrafficCounts,
        emergency: Option<Approach>,
    ) -> SignalState {
        let green = match emergency {
            Some(approach) => {
                debug!("Emergency preemption: {} green", approach);
                approach
            }
            None => counts.busiest(),
        };

        let next = SignalState::green_for(green);
        if self.signals.green() != Some(green) {
            debug!("Signal change: {} green ({:?})", green, counts);
        }
        self.signals = next;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts_map(n: usize, s: usize, e: usize, w: usize) -> HashMap<Approach, usize> {
        HashMap::from([
            (Approach::North, n),
            (Approach::South, s),
            (Approach::East, e),
            (Approach::West, w),
        ])
    }

    #[test]
    fn test_busiest_approach_gets_green() {
        let mut controller = IntersectionController::new();
        let signals = controller.decide(&counts_map(3, 1, 0, 5), None).unwrap();
        assert_eq!(signals.green(), Some(Approach::West));
        assert_eq!(signals.green_count(), 1);
        assert_eq!(controller.signals(), signals);
    }

    #[test]
    fn test_emergency_overrides_counts() {
        let mut controller = IntersectionController::new();
        let signals = controller
            .decide(&counts_map(3, 1, 0, 5), Some(Approach::North))
            .unwrap();
        assert_eq!(signals.get(Approach::North), PhaseColor::Green);
        assert_eq!(signals.get(Approach::West), PhaseColor::Red);
        assert_eq!(signals.green_count(), 1);
    }

    #[test]
    fn test_ties_resolve_in_fixed_order() {
        let mut controller = IntersectionController::new();
        let signals = controller.decide(&counts_map(0, 4, 4, 4), None).unwrap();
        assert_eq!(signals.green(), Some(Approach::South));

        let signals = controller.decide(&counts_map(0, 0, 0, 0), None).unwrap();
        assert_eq!(signals.green(), Some(Approach::North));
    }

    #[test]
    fn test_decide_is_deterministic() {
        let mut a = IntersectionController::new();
        let mut b = IntersectionController::new();
        let counts = counts_map(2, 7, 7, 1);
        let first = a.decide(&counts, None).unwrap();
        assert_eq!(a.decide(&counts, None).unwrap(), first);
        assert_eq!(b.decide(&counts, None).unwrap(), first);
    }

    #[test]
    fn test_missing_approach_is_rejected() {
        let mut controller = IntersectionController::new();
        let before = controller.decide(&counts_map(0, 0, 9, 0), None).unwrap();

        let mut counts = counts_map(1, 1, 1, 1);
        counts.remove(&Approach::South);
        let err = controller.decide(&counts, None).unwrap_err();
        assert_eq!(err, ControlError::MissingApproach(Approach::South));
        assert_eq!(controller.signals(), before);
    }

    #[test]
    fn test_exactly_one_green_for_all_small_inputs() {
        let mut controller = IntersectionController::new();
        for n in 0..3 {
            for s in 0..3 {
                for e in 0..3 {
                    for w in 0..3 {
                        let counts = TrafficCounts::new(n, s, e, w);
                        let signals = controller.decide_counts(&counts, None);
                        assert_eq!(signals.green_count(), 1);
                        let green = signals.green().unwrap();
                        for approach in Approach::ALL {
                            assert!(counts.get(green) >= counts.get(approach));
                        }
                        for emergency in Approach::ALL {
                            let signals = controller.decide_counts(&counts, Some(emergency));
                            assert_eq!(signals.green(), Some(emergency));
                            assert_eq!(signals.green_count(), 1);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_default_state_is_all_red() {
        let controller = IntersectionController::new();
        assert_eq!(controller.signals(), SignalState::all_red());
        assert_eq!(controller.signals().green(), None);
    }
}
