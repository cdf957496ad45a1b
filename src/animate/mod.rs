//! Progressive reveal between two displayed years.
//!
//! The animator is a plain state machine. Callers drive it from their own frame callback with
//! [`TransitionAnimator::tick`]; time comes from an injected [`Clock`].

/// Tick state machine.
pub mod animator;
/// Time sources.
pub mod clock;

pub use animator::{Presentation, TickDraw, TickHandle, TransitionAnimator};
pub use clock::{Clock, ManualClock, SystemClock};
