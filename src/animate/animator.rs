use rand::Rng;

use crate::animate::clock::{Clock, SystemClock};
use crate::config::TRANSITION_DURATION_MS;
use crate::foundation::core::{DatasetKind, Year};
use crate::render::composite::CellView;
use crate::render::compositor::ResolvedFrame;
use crate::temporal::interpolate::{clamp_progress, interpolate_with_rng};

/// Identifies one transition. Only the handle from the latest [`TransitionAnimator::present`] ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickHandle {
    generation: u64,
}

/// Cells to draw for one tick (or one immediate redraw).
#[derive(Clone, Debug, PartialEq)]
pub struct TickDraw {
    /// Dataset the cells belong to.
    pub kind: DatasetKind,
    /// Row-major cells.
    pub cells: Vec<f64>,
    /// Width in cells.
    pub width: u32,
    /// Height in cells.
    pub height: u32,
    /// Valid-data range for continuous kinds.
    pub range: Option<(f64, f64)>,
    /// Animation progress in `[0, 1]`.
    pub progress: f64,
    /// `true` on the last draw of a transition; the cells are exactly the target's.
    pub finished: bool,
}

impl TickDraw {
    /// Borrow as a color-mapping input.
    pub fn view(&self) -> CellView<'_> {
        CellView {
            kind: self.kind,
            cells: &self.cells,
            width: self.width,
            height: self.height,
            range: self.range,
        }
    }

    fn settled(target: &ResolvedFrame) -> Self {
        Self {
            kind: target.kind,
            cells: target.cells.clone(),
            width: target.width,
            height: target.height,
            range: target.range,
            progress: 1.0,
            finished: true,
        }
    }
}

/// What the caller should do after [`TransitionAnimator::present`].
#[derive(Clone, Debug, PartialEq)]
pub enum Presentation {
    /// Redraw once with these cells; no transition runs.
    Immediate(TickDraw),
    /// Schedule ticks with this handle until one reports `finished`.
    Animating(TickHandle),
}

#[derive(Clone, Debug)]
struct TransitionState {
    from_cells: Vec<f64>,
    to_cells: Vec<f64>,
    start_ms: f64,
    duration_ms: f64,
    width: u32,
    height: u32,
    kind: DatasetKind,
    /// Scale the start cells were shown with; kept until the target settles.
    range: Option<(f64, f64)>,
    target_range: Option<(f64, f64)>,
}

#[derive(Clone, Debug)]
enum Phase {
    Idle,
    Animating(TransitionState),
}

#[derive(Clone, Debug)]
struct Shown {
    kind: DatasetKind,
    year: Year,
    cells: Vec<f64>,
    range: Option<(f64, f64)>,
}

/// Stochastic reveal from the displayed cells toward a newly resolved frame.
///
/// - A dataset change, the first frame, or a redraw of the same year is immediate.
/// - A year change within a dataset animates for [`TRANSITION_DURATION_MS`].
/// - A new request while animating restarts from whatever was last drawn.
///
/// Every call to [`present`](Self::present) or [`cancel`](Self::cancel) invalidates earlier
/// handles, so at most one tick sequence can draw.
#[derive(Debug)]
pub struct TransitionAnimator<C: Clock = SystemClock> {
    clock: C,
    phase: Phase,
    shown: Option<Shown>,
    generation: u64,
}

impl Default for TransitionAnimator<SystemClock> {
    fn default() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl TransitionAnimator<SystemClock> {
    /// Animator on the wall clock.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> TransitionAnimator<C> {
    /// Animator on `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            phase: Phase::Idle,
            shown: None,
            generation: 0,
        }
    }

    /// Time source in use.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// `true` while a transition is in flight.
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Animating(_))
    }

    /// Cells most recently handed out for drawing.
    pub fn last_drawn(&self) -> Option<&[f64]> {
        self.shown.as_ref().map(|s| s.cells.as_slice())
    }

    /// Decide how to show `target`, replacing any transition in flight.
    pub fn present(&mut self, target: &ResolvedFrame) -> Presentation {
        self.generation += 1;

        let from = match self.shown.as_mut() {
            Some(s)
                if s.kind == target.kind
                    && s.year != target.year
                    && s.cells.len() == target.cells.len() =>
            {
                s.year = target.year;
                Some((s.cells.clone(), s.range))
            }
            _ => None,
        };

        let Some((from_cells, from_range)) = from else {
            self.phase = Phase::Idle;
            self.shown = Some(Shown {
                kind: target.kind,
                year: target.year,
                cells: target.cells.clone(),
                range: target.range,
            });
            tracing::debug!(kind = %target.kind, year = target.year, "immediate redraw");
            return Presentation::Immediate(TickDraw::settled(target));
        };

        let preempted = self.is_animating();
        self.phase = Phase::Animating(TransitionState {
            from_cells,
            to_cells: target.cells.clone(),
            start_ms: self.clock.now_ms(),
            duration_ms: TRANSITION_DURATION_MS,
            width: target.width,
            height: target.height,
            kind: target.kind,
            range: from_range.or(target.range),
            target_range: target.range,
        });
        tracing::debug!(
            kind = %target.kind,
            year = target.year,
            preempted,
            "transition started"
        );
        Presentation::Animating(TickHandle {
            generation: self.generation,
        })
    }

    /// Produce the cells for the current tick, or `None` if `handle` is no longer current.
    pub fn tick<R: Rng + ?Sized>(&mut self, handle: TickHandle, rng: &mut R) -> Option<TickDraw> {
        if handle.generation != self.generation {
            return None;
        }
        let Phase::Animating(t) = &self.phase else {
            return None;
        };

        let elapsed = self.clock.now_ms() - t.start_ms;
        let progress = if t.duration_ms > 0.0 {
            clamp_progress(elapsed / t.duration_ms)
        } else {
            1.0
        };
        let finished = progress >= 1.0;
        let cells = if finished {
            t.to_cells.clone()
        } else {
            interpolate_with_rng(&t.from_cells, &t.to_cells, progress, rng)
        };
        let draw = TickDraw {
            kind: t.kind,
            cells,
            width: t.width,
            height: t.height,
            range: if finished { t.target_range } else { t.range },
            progress,
            finished,
        };
        tracing::trace!(progress, finished, "transition tick");

        if let Some(shown) = self.shown.as_mut() {
            shown.cells.clone_from(&draw.cells);
            shown.range = draw.range;
        }
        if finished {
            self.phase = Phase::Idle;
        }
        Some(draw)
    }

    /// Drop any transition in flight. The last drawn cells stay current.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animate/animator.rs"]
mod tests;
