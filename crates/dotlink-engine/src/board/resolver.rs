use crate::api::types::DotId;
use crate::board::chain::{CompletedGesture, Segment};
use crate::board::grid::{Dot, DotRegistry, GridPos};

/// A cell emptied by a cleared chain, waiting for a replacement dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vacancy {
    pub id: DotId,
    pub pos: GridPos,
}

/// Outcome of a released chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Cells to respawn, in chain order.
    pub vacancies: Vec<Vacancy>,
    /// Committed segments whose shapes must be removed.
    pub cleared_segments: Vec<Segment>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.vacancies.is_empty() && self.cleared_segments.is_empty()
    }
}

/// Clear a released chain from the registry. Chains of one dot or fewer
/// resolve to nothing.
pub fn resolve(gesture: CompletedGesture, dots: &mut DotRegistry) -> Resolution {
    if gesture.chain.len() <= 1 {
        return Resolution::default();
    }
    let vacancies = gesture
        .chain
        .iter()
        .filter_map(|&id| dots.remove(id))
        .map(|Dot { id, pos, .. }| Vacancy { id, pos })
        .collect::<Vec<_>>();
    log::debug!("chain of {} cleared", vacancies.len());
    Resolution {
        vacancies,
        cleared_segments: gesture.segments,
    }
}
