use super::*;

#[test]
fn manual_clock_is_monotonic() {
    let clock = ManualClock::new();
    assert_eq!(clock.now_ms(), 0.0);
    clock.advance(120.0);
    clock.advance(-50.0);
    clock.advance(f64::NAN);
    assert_eq!(clock.now_ms(), 120.0);
    clock.set(80.0);
    assert_eq!(clock.now_ms(), 120.0);
    clock.set(400.0);
    assert_eq!(clock.now_ms(), 400.0);
}

#[test]
fn shared_clock_sees_the_same_time() {
    let clock = Rc::new(ManualClock::new());
    let shared = Rc::clone(&clock);
    clock.advance(33.0);
    assert_eq!(shared.now_ms(), 33.0);
}

#[test]
fn system_clock_does_not_go_backwards() {
    let clock = SystemClock::new();
    let a = clock.now_ms();
    let b = clock.now_ms();
    assert!(a >= 0.0);
    assert!(b >= a);
}
