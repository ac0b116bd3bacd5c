//! Gesture emulation: long-press, wheel swipe, and the dual-action button.
//!
//! Three wire actions have no single-event equivalent on the host and are
//! synthesized here from low-level motion and key events:
//!
//! * a right-button release plays back a **long-press**: a touch down now and
//!   a deferred release after the long-press duration;
//! * a wheel notch plays back a **wheel swipe**: a three-step
//!   down / move / up drag covering one scroll step;
//! * the wheel button races a timer (the **dual-action button**): held past
//!   the hold threshold it taps the app-switch key, released earlier it taps
//!   the home key instead.
//!
//! All timestamps come from the shared [`Uptime`] clock, and every event of a
//! multi-step gesture reuses the down timestamp of its first event.

use std::sync::Arc;
use std::time::Duration;

use tap_core::domain::injected::{InjectedEvent, KeyDirection, MotionAction};
use tap_core::keymap::android;
use tracing::warn;

use super::dispatch_input::{InjectError, RawEventInjector};
use super::scheduler::{DelayedActionSlot, Uptime};

// ── Timing parameters ─────────────────────────────────────────────────────────

/// Durations and distances that shape the synthesized gestures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureTiming {
    /// How long a synthesized long-press stays down before the deferred
    /// release fires.
    pub long_press_duration: Duration,
    /// How long the dual-action button must stay held before it counts as a
    /// hold rather than a quick press.
    pub hold_threshold: Duration,
    /// Time between the down and the move step of a wheel swipe.
    pub wheel_duration: Duration,
    /// Gap between the down and up halves of a synthesized key tap.
    pub key_tap_up_delay: Duration,
    /// Vertical distance one wheel notch drags the contact, in scaled pixels.
    pub wheel_step: f32,
}

impl Default for GestureTiming {
    fn default() -> Self {
        Self {
            long_press_duration: Duration::from_millis(500),
            hold_threshold: Duration::from_millis(300),
            wheel_duration: Duration::from_millis(50),
            key_tap_up_delay: Duration::from_millis(10),
            wheel_step: 120.0,
        }
    }
}

// ── Gesture emulator ──────────────────────────────────────────────────────────

/// Synthesizes multi-event gestures on top of a [`RawEventInjector`].
///
/// The emulator owns two independent [`DelayedActionSlot`]s, one per deferred
/// purpose: the pending long-press release and the pending dual-action hold
/// tap. Within each slot the latest scheduled action wins; the two purposes
/// never cancel each other.
#[derive(Clone)]
pub struct GestureEmulator {
    injector: Arc<dyn RawEventInjector>,
    clock: Uptime,
    timing: GestureTiming,
    long_press_slot: DelayedActionSlot,
    dual_action_slot: DelayedActionSlot,
}

impl GestureEmulator {
    pub fn new(injector: Arc<dyn RawEventInjector>, clock: Uptime, timing: GestureTiming) -> Self {
        Self {
            injector,
            clock,
            timing,
            long_press_slot: DelayedActionSlot::new(),
            dual_action_slot: DelayedActionSlot::new(),
        }
    }

    /// Plays back a long-press at `(x, y)`.
    ///
    /// The touch down is injected immediately; the matching release is
    /// scheduled for [`GestureTiming::long_press_duration`] later and keeps
    /// the down timestamp, while its event timestamp is read from the clock
    /// when the release actually fires.
    ///
    /// # Errors
    ///
    /// Returns [`InjectError::InjectionFailed`] if the down event is
    /// rejected; no release is scheduled in that case.
    pub fn long_press(&self, x: f32, y: f32) -> Result<(), InjectError> {
        let down_time = self.clock.now_ms();
        let down = InjectedEvent::Motion {
            action: MotionAction::Down,
            x,
            y,
            down_time_ms: down_time,
            event_time_ms: down_time,
        };
        if !self.injector.inject(down) {
            return Err(InjectError::InjectionFailed {
                stage: "long-press down",
            });
        }

        let injector = Arc::clone(&self.injector);
        let clock = self.clock;
        self.long_press_slot
            .schedule(self.timing.long_press_duration, move || {
                let release = InjectedEvent::Motion {
                    action: MotionAction::Up,
                    x,
                    y,
                    down_time_ms: down_time,
                    event_time_ms: clock.now_ms(),
                };
                if !injector.inject(release) {
                    warn!(x, y, "deferred long-press release was rejected");
                }
            });
        Ok(())
    }

    /// Plays back one wheel notch as a short three-step drag.
    ///
    /// The drag starts at `(x, y)`, moves vertically by `delta_y` (clamped so
    /// it cannot leave the screen through the top edge) and releases one
    /// millisecond after the move. All three events share the down
    /// timestamp. Contacts too close to the top edge to complete a step are
    /// skipped entirely and report success.
    ///
    /// # Errors
    ///
    /// Returns [`InjectError::InjectionFailed`] naming the first rejected
    /// step. A rejected down aborts the gesture; after a successful down the
    /// release is attempted even if the move was rejected, so no synthetic
    /// contact is left stuck on screen.
    pub fn wheel_swipe(&self, x: f32, y: f32, delta_y: f32) -> Result<(), InjectError> {
        if y < self.timing.wheel_step {
            return Ok(());
        }
        let end_y = (y + delta_y).max(0.0);
        let down_time = self.clock.now_ms();
        let move_time = down_time + self.timing.wheel_duration.as_millis() as u64;
        let up_time = move_time + 1;

        let down = InjectedEvent::Motion {
            action: MotionAction::Down,
            x,
            y,
            down_time_ms: down_time,
            event_time_ms: down_time,
        };
        if !self.injector.inject(down) {
            return Err(InjectError::InjectionFailed {
                stage: "wheel swipe down",
            });
        }

        let moved = self.injector.inject(InjectedEvent::Motion {
            action: MotionAction::Move,
            x,
            y: end_y,
            down_time_ms: down_time,
            event_time_ms: move_time,
        });
        let released = self.injector.inject(InjectedEvent::Motion {
            action: MotionAction::Up,
            x,
            y: end_y,
            down_time_ms: down_time,
            event_time_ms: up_time,
        });
        if !moved {
            return Err(InjectError::InjectionFailed {
                stage: "wheel swipe move",
            });
        }
        if !released {
            return Err(InjectError::InjectionFailed {
                stage: "wheel swipe up",
            });
        }
        Ok(())
    }

    /// Arms the dual-action hold timer.
    ///
    /// If the button is still held when [`GestureTiming::hold_threshold`]
    /// elapses, an app-switch key tap fires. Arming again before that
    /// replaces the pending timer.
    pub fn dual_action_down(&self) {
        let injector = Arc::clone(&self.injector);
        let clock = self.clock;
        let up_delay = self.timing.key_tap_up_delay;
        self.dual_action_slot
            .schedule(self.timing.hold_threshold, move || {
                if let Err(error) =
                    tap_key(injector.as_ref(), clock, up_delay, android::KEYCODE_APP_SWITCH)
                {
                    warn!(%error, "deferred app-switch tap failed");
                }
            });
    }

    /// Resolves the dual-action button release.
    ///
    /// A release that beats the hold timer cancels it and taps the home key;
    /// a release after the timer already fired does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`InjectError::InjectionFailed`] if the home key tap is
    /// rejected.
    pub fn dual_action_up(&self) -> Result<(), InjectError> {
        if self.dual_action_slot.cancel() {
            self.key_tap(android::KEYCODE_HOME)
        } else {
            Ok(())
        }
    }

    /// Taps `key_code`: a key down now and a key up
    /// [`GestureTiming::key_tap_up_delay`] later, sharing the down timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`InjectError::InjectionFailed`] naming the first rejected
    /// half. Both halves are always attempted.
    pub fn key_tap(&self, key_code: u32) -> Result<(), InjectError> {
        tap_key(
            self.injector.as_ref(),
            self.clock,
            self.timing.key_tap_up_delay,
            key_code,
        )
    }

    /// Cancels any pending deferred work in both slots.
    ///
    /// Called when the session ends so no release or key tap fires into a
    /// torn-down session.
    pub fn cancel_pending(&self) {
        self.long_press_slot.cancel();
        self.dual_action_slot.cancel();
    }
}

/// Injects the down and up halves of a key tap.
///
/// The up carries the down's timestamp plus `up_delay`; the up half is
/// attempted even when the down half is rejected so a partially accepted tap
/// cannot leave a key logically held.
fn tap_key(
    injector: &dyn RawEventInjector,
    clock: Uptime,
    up_delay: Duration,
    key_code: u32,
) -> Result<(), InjectError> {
    let down_time = clock.now_ms();
    let pressed = injector.inject(InjectedEvent::Key {
        direction: KeyDirection::Down,
        key_code,
        down_time_ms: down_time,
        event_time_ms: down_time,
    });
    let released = injector.inject(InjectedEvent::Key {
        direction: KeyDirection::Up,
        key_code,
        down_time_ms: down_time,
        event_time_ms: down_time + up_delay.as_millis() as u64,
    });
    if !pressed {
        return Err(InjectError::InjectionFailed { stage: "key tap down" });
    }
    if !released {
        return Err(InjectError::InjectionFailed { stage: "key tap up" });
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
