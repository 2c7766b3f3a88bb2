use std::collections::HashSet;

use glam::Vec2;

use crate::api::types::DotId;
use crate::board::grid::{DotColor, DotRegistry};

/// A committed edge between two consecutive chain members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub from: DotId,
    pub to: DotId,
}

/// The in-progress edge. `end == None` means it still sits on its anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeSegment {
    pub anchor: DotId,
    pub end: Option<Vec2>,
}

/// Ordered chain members plus a membership index and the locked color.
///
/// A chain is drawn in one or more runs: a cancelled gesture leaves its run
/// pending and the next press starts another run on the same chain. Runs are
/// not joined by a segment.
#[derive(Debug, Clone, Default)]
pub struct Chain {
    members: Vec<DotId>,
    index: HashSet<DotId>,
    color: Option<DotColor>,
    run_start: usize,
}

impl Chain {
    /// Open a new run at `dot`, locking `color` if the chain is empty.
    fn start_run(&mut self, dot: DotId, color: DotColor) {
        if self.members.is_empty() {
            self.color = Some(color);
        }
        self.run_start = self.members.len();
        self.push(dot);
    }

    fn push(&mut self, dot: DotId) {
        self.members.push(dot);
        self.index.insert(dot);
    }

    /// Remove the current run and return its members. The lock goes with the
    /// last member.
    fn drop_run(&mut self) -> Vec<DotId> {
        let dropped = self.members.split_off(self.run_start);
        for id in &dropped {
            self.index.remove(id);
        }
        if self.members.is_empty() {
            self.color = None;
        }
        self.run_start = 0;
        dropped
    }

    fn clear(&mut self) {
        self.members.clear();
        self.index.clear();
        self.color = None;
        self.run_start = 0;
    }

    pub fn members(&self) -> &[DotId] {
        &self.members
    }

    pub fn contains(&self, dot: DotId) -> bool {
        self.index.contains(&dot)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Fewer than two members: nothing to clear.
    pub fn is_incomplete(&self) -> bool {
        self.members.len() <= 1
    }

    pub fn tail(&self) -> Option<DotId> {
        self.members.last().copied()
    }

    /// The member just before the tail, within the current run.
    pub fn predecessor(&self) -> Option<DotId> {
        self.run().iter().rev().nth(1).copied()
    }

    /// Members added since the last press.
    pub fn run(&self) -> &[DotId] {
        &self.members[self.run_start..]
    }

    pub fn color(&self) -> Option<DotColor> {
        self.color
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Dragging,
}

/// Why `begin_chain` refused a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginRejected {
    AlreadyDragging,
    /// An aborted chain still holds the color lock.
    ColorLocked { locked: DotColor, pressed: DotColor },
    /// The dot already belongs to the pending chain.
    InChain(DotId),
    Vacant(DotId),
}

/// Why `try_extend` refused a hover. Rejections leave all state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotDragging,
    Vacant(DotId),
    ColorMismatch,
    Diagonal,
    TooLong,
    AlreadyConnected,
    Backtrack,
    Revisit,
}

/// A successful press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Began {
    pub color: DotColor,
    /// Members carried over from cancelled gestures.
    pub pending: usize,
}

/// A successful hover extension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extension {
    pub segment: Segment,
    pub color: DotColor,
}

/// What a release hands to the resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedGesture {
    pub chain: Vec<DotId>,
    pub segments: Vec<Segment>,
}

/// Gesture state machine for drawing a chain: `Idle -> Dragging -> Idle`.
#[derive(Debug, Clone)]
pub struct ChainBuilder {
    state: GestureState,
    chain: Chain,
    segments: Vec<Segment>,
    free: Option<FreeSegment>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self {
            state: GestureState::Idle,
            chain: Chain::default(),
            segments: Vec::new(),
            free: None,
        }
    }

    /// Press on `dot`. Locks its color and anchors a zero-length free segment.
    /// A pending chain left by `abort` is kept and this press opens a new run
    /// on it.
    pub fn begin_chain(
        &mut self,
        dots: &mut DotRegistry,
        dot: DotId,
    ) -> Result<Began, BeginRejected> {
        if self.state == GestureState::Dragging {
            return Err(BeginRejected::AlreadyDragging);
        }
        let pressed = dots.get(dot).ok_or(BeginRejected::Vacant(dot))?.color;
        if let Some(locked) = self.chain.color() {
            if locked != pressed {
                return Err(BeginRejected::ColorLocked { locked, pressed });
            }
            if self.chain.contains(dot) {
                return Err(BeginRejected::InChain(dot));
            }
        }

        let pending = self.chain.len();
        self.chain.start_run(dot, pressed);
        if let Some(d) = dots.get_mut(dot) {
            d.has_outgoing = true;
        }
        self.free = Some(FreeSegment { anchor: dot, end: None });
        self.state = GestureState::Dragging;
        Ok(Began { color: pressed, pending })
    }

    /// Follow the pointer with the free segment's far end. No validation.
    pub fn drag_to(&mut self, point: Vec2) {
        if let Some(free) = self.free.as_mut() {
            free.end = Some(point);
        }
    }

    /// Hover over `target` while dragging. Checks run in a fixed order and the
    /// first failing one is reported.
    pub fn try_extend(
        &mut self,
        dots: &mut DotRegistry,
        target: DotId,
    ) -> Result<Extension, Rejection> {
        if self.state != GestureState::Dragging {
            return Err(Rejection::NotDragging);
        }
        let (Some(tail), Some(locked)) = (self.chain.tail(), self.chain.color()) else {
            return Err(Rejection::NotDragging);
        };
        let tail_pos = dots.get(tail).ok_or(Rejection::Vacant(tail))?.pos;
        let candidate = dots.get(target).ok_or(Rejection::Vacant(target))?;

        if candidate.color != locked {
            return Err(Rejection::ColorMismatch);
        }
        let (dx, dy) = tail_pos.delta(candidate.pos);
        if dx != 0 && dy != 0 {
            return Err(Rejection::Diagonal);
        }
        if dx.abs() > 1 || dy.abs() > 1 {
            return Err(Rejection::TooLong);
        }
        if candidate.has_incoming {
            return Err(Rejection::AlreadyConnected);
        }
        if target == tail || self.chain.predecessor() == Some(target) {
            return Err(Rejection::Backtrack);
        }
        if self.chain.contains(target) {
            return Err(Rejection::Revisit);
        }

        let segment = Segment { from: tail, to: target };
        self.segments.push(segment);
        if let Some(d) = dots.get_mut(target) {
            d.has_incoming = true;
            d.has_outgoing = true;
        }
        self.chain.push(target);
        self.free = Some(FreeSegment { anchor: target, end: None });
        Ok(Extension { segment, color: locked })
    }

    /// Release. Drops the free segment and hands the whole chain, pending
    /// runs included, to the resolver. Returns `None` when no gesture was in
    /// progress.
    pub fn end_chain(&mut self, dots: &mut DotRegistry) -> Option<CompletedGesture> {
        if self.state != GestureState::Dragging {
            return None;
        }
        self.free = None;
        self.state = GestureState::Idle;

        // A lone press leaves no line behind.
        if self.chain.is_incomplete() {
            clear_flags(dots, self.chain.members());
        }
        let gesture = CompletedGesture {
            chain: self.chain.members().to_vec(),
            segments: std::mem::take(&mut self.segments),
        };
        self.chain.clear();
        Some(gesture)
    }

    /// Pointer left the surface mid-gesture. A run with committed segments
    /// stays pending with the color lock; a run that is only its press is
    /// dropped.
    pub fn abort(&mut self, dots: &mut DotRegistry) -> bool {
        if self.state != GestureState::Dragging {
            return false;
        }
        self.free = None;
        self.state = GestureState::Idle;
        if self.chain.run().len() <= 1 {
            let dropped = self.chain.drop_run();
            clear_flags(dots, &dropped);
        }
        true
    }

    /// Forget everything. The registry is expected to be rebuilt.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
        self.chain.clear();
        self.segments.clear();
        self.free = None;
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == GestureState::Dragging
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn free_segment(&self) -> Option<FreeSegment> {
        self.free
    }

    /// Color lock held by the current or pending chain.
    pub fn locked_color(&self) -> Option<DotColor> {
        self.chain.color()
    }
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn clear_flags(dots: &mut DotRegistry, ids: &[DotId]) {
    for &id in ids {
        if let Some(d) = dots.get_mut(id) {
            d.clear_flags();
        }
    }
}
