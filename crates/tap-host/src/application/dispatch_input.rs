//! InputDispatcher: turns received pointer and key messages into injected
//! platform events.
//!
//! The dispatcher is the single entry point for remote input. Every message
//! passes the capability gate first, then routes by channel: the mouse
//! channel drives absolute movement, clicks and the gesture-backed buttons,
//! the touch channel drives relative pan gestures, and the key channel
//! translates protocol key codes into platform key events.
//!
//! Each channel tracks one contact: its current position in screen
//! coordinates and, while pressed, the timestamp of the press. All events of
//! one press-move-release cycle carry that press timestamp as their down
//! time; platform input validation rejects cycles that disagree on it.
//!
//! OS-level delivery sits behind [`RawEventInjector`], the permission check
//! behind [`InjectCapability`] and key translation behind [`KeyCodeLookup`];
//! the infrastructure layer provides the real implementations.

use std::sync::Arc;

use tap_core::domain::injected::{InjectedEvent, KeyDirection, MotionAction};
use tap_core::domain::transform::ScreenScale;
use tap_core::keymap::android;
use tap_core::protocol::codec::decode_key_event;
use tap_core::protocol::messages::{
    ChannelKind, MouseAction, PointerEventMessage, TouchAction,
};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use super::gestures::{GestureEmulator, GestureTiming};
use super::scheduler::Uptime;

// ── Seams ─────────────────────────────────────────────────────────────────────

/// Decides whether this session is allowed to inject input at all.
///
/// Checked per event, not once at startup: the permission can be revoked
/// while a session is running.
pub trait InjectCapability: Send + Sync {
    fn can_inject(&self) -> bool;
}

/// Low-level platform seam: delivers one synthesized event to the OS.
pub trait RawEventInjector: Send + Sync {
    /// Returns `true` when the platform accepted the event.
    fn inject(&self, event: InjectedEvent) -> bool;
}

/// Maps protocol key codes to platform key codes.
#[cfg_attr(test, mockall::automock)]
pub trait KeyCodeLookup: Send + Sync {
    /// Returns the platform key code for `code`, or 0 when the code has no
    /// mapping.
    fn platform_key_code(&self, code: u32) -> u32;
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Error type for input dispatch operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InjectError {
    #[error("session lacks the input injection capability")]
    CapabilityDenied,
    #[error("unsupported action {mask} on {kind:?} channel")]
    UnsupportedAction { kind: ChannelKind, mask: i32 },
    #[error("could not translate event: {reason}")]
    TranslationFailed { reason: &'static str },
    #[error("platform rejected the {stage} event")]
    InjectionFailed { stage: &'static str },
}

// ── Per-channel contact state ─────────────────────────────────────────────────

/// Tracked state of one input channel's contact.
#[derive(Debug, Default)]
struct ContactState {
    /// Current position in screen coordinates.
    x: f32,
    y: f32,
    /// Press timestamp while the contact is down, `None` while lifted.
    down_since_ms: Option<u64>,
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

/// Routes decoded remote input to the platform injector.
///
/// Holds the per-session state the routing needs: one [`ContactState`] per
/// channel, the shared clock, the coordinate scale and the gesture emulator.
/// One dispatcher serves one control session.
pub struct InputDispatcher {
    session_id: Uuid,
    capability: Arc<dyn InjectCapability>,
    injector: Arc<dyn RawEventInjector>,
    keymap: Arc<dyn KeyCodeLookup>,
    scale: ScreenScale,
    clock: Uptime,
    timing: GestureTiming,
    gestures: GestureEmulator,
    mouse: ContactState,
    touch: ContactState,
}

impl InputDispatcher {
    pub fn new(
        capability: Arc<dyn InjectCapability>,
        injector: Arc<dyn RawEventInjector>,
        keymap: Arc<dyn KeyCodeLookup>,
        scale: ScreenScale,
        timing: GestureTiming,
    ) -> Self {
        let clock = Uptime::new();
        let gestures = GestureEmulator::new(Arc::clone(&injector), clock, timing);
        Self {
            session_id: Uuid::new_v4(),
            capability,
            injector,
            keymap,
            scale,
            clock,
            timing,
            gestures,
            mouse: ContactState::default(),
            touch: ContactState::default(),
        }
    }

    /// Identifier of this control session, used in log output.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Handles a pointer message, reporting the outcome as a plain flag.
    ///
    /// Failures are logged and collapsed to `false`; transports that do not
    /// care about the error detail call this instead of
    /// [`InputDispatcher::handle_pointer`].
    pub fn try_inject_pointer(&mut self, message: &PointerEventMessage) -> bool {
        match self.handle_pointer(message) {
            Ok(()) => true,
            Err(error @ InjectError::UnsupportedAction { .. }) => {
                debug!(session = %self.session_id, %error, "pointer event ignored");
                false
            }
            Err(error) => {
                warn!(session = %self.session_id, %error, "pointer event dropped");
                false
            }
        }
    }

    /// Handles a key payload, reporting the outcome as a plain flag.
    pub fn try_inject_key(&mut self, payload: &[u8]) -> bool {
        match self.handle_key(payload) {
            Ok(()) => true,
            Err(error) => {
                warn!(session = %self.session_id, %error, "key event dropped");
                false
            }
        }
    }

    /// Routes one pointer message to the matching channel handler.
    ///
    /// # Errors
    ///
    /// [`InjectError::CapabilityDenied`] when injection is not permitted,
    /// [`InjectError::UnsupportedAction`] for action values this host does
    /// not emulate, [`InjectError::InjectionFailed`] when the platform
    /// rejects a synthesized event.
    pub fn handle_pointer(&mut self, message: &PointerEventMessage) -> Result<(), InjectError> {
        if !self.capability.can_inject() {
            return Err(InjectError::CapabilityDenied);
        }
        match message.kind {
            ChannelKind::Mouse => self.handle_mouse(message.mask, message.x, message.y),
            ChannelKind::Touch => self.handle_touch(message.mask, message.x, message.y),
        }
    }

    /// Decodes and injects one key payload.
    ///
    /// Key events are stateless: every message is stamped with a fresh down
    /// timestamp. A press message injects the key-down and the matching
    /// key-up in one go; a rejected key-down skips the key-up.
    ///
    /// # Errors
    ///
    /// [`InjectError::TranslationFailed`] for payloads that do not decode,
    /// belong to the unicode/sequence text path, or name a key this host has
    /// no platform code for; [`InjectError::CapabilityDenied`] and
    /// [`InjectError::InjectionFailed`] as for pointer events.
    pub fn handle_key(&mut self, payload: &[u8]) -> Result<(), InjectError> {
        if !self.capability.can_inject() {
            return Err(InjectError::CapabilityDenied);
        }
        let message = match decode_key_event(payload) {
            Ok(message) => message,
            Err(error) => {
                debug!(session = %self.session_id, %error, "key payload rejected by codec");
                return Err(InjectError::TranslationFailed {
                    reason: "malformed key payload",
                });
            }
        };
        if message.is_text_path() {
            return Err(InjectError::TranslationFailed {
                reason: "unicode/sequence event on key path",
            });
        }
        let key_code = self.keymap.platform_key_code(message.code);
        if key_code == android::KEYCODE_UNKNOWN {
            return Err(InjectError::TranslationFailed {
                reason: "unknown key code",
            });
        }

        let direction = if message.press || message.down {
            KeyDirection::Down
        } else {
            KeyDirection::Up
        };
        let stage = match direction {
            KeyDirection::Down => "key down",
            KeyDirection::Up => "key up",
        };
        let down_time = self.clock.now_ms();
        self.inject_key(direction, key_code, down_time, stage)?;
        if message.press {
            self.inject_key(KeyDirection::Up, key_code, down_time, "key up")?;
        }
        Ok(())
    }

    /// Lifts any contact still held and cancels pending deferred gestures.
    ///
    /// Called when the session ends so the screen is not left with a stuck
    /// synthetic finger. Release failures are logged, not propagated; there
    /// is nothing the caller could do about them during teardown.
    pub fn release_contacts(&mut self) {
        self.gestures.cancel_pending();
        release_channel(
            self.injector.as_ref(),
            self.clock,
            self.session_id,
            &mut self.mouse,
        );
        release_channel(
            self.injector.as_ref(),
            self.clock,
            self.session_id,
            &mut self.touch,
        );
    }

    // ── Mouse channel ─────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, mask: i32, x: i32, y: i32) -> Result<(), InjectError> {
        let Some(action) = MouseAction::from_mask(mask) else {
            return Err(InjectError::UnsupportedAction {
                kind: ChannelKind::Mouse,
                mask,
            });
        };
        match action {
            MouseAction::Move => {
                self.mouse.x = self.scale.scale_absolute(x);
                self.mouse.y = self.scale.scale_absolute(y);
                // Hovers only track position; a move injects solely while
                // the button is held.
                if let Some(down_time) = self.mouse.down_since_ms {
                    self.inject_motion(
                        MotionAction::Move,
                        self.mouse.x,
                        self.mouse.y,
                        down_time,
                        "mouse move",
                    )?;
                }
                Ok(())
            }
            MouseAction::LeftDown => {
                self.mouse.x = self.scale.scale_absolute(x);
                self.mouse.y = self.scale.scale_absolute(y);
                let now = self.clock.now_ms();
                match self.inject_motion(
                    MotionAction::Down,
                    self.mouse.x,
                    self.mouse.y,
                    now,
                    "mouse down",
                ) {
                    Ok(()) => {
                        self.mouse.down_since_ms = Some(now);
                        Ok(())
                    }
                    Err(error) => {
                        self.mouse.down_since_ms = None;
                        Err(error)
                    }
                }
            }
            MouseAction::LeftUp => {
                self.mouse.x = self.scale.scale_absolute(x);
                self.mouse.y = self.scale.scale_absolute(y);
                let result = match self.mouse.down_since_ms {
                    Some(down_time) => self.inject_motion(
                        MotionAction::Up,
                        self.mouse.x,
                        self.mouse.y,
                        down_time,
                        "mouse up",
                    ),
                    None => Ok(()),
                };
                // The press ends here no matter how the release went.
                self.mouse.down_since_ms = None;
                result
            }
            MouseAction::RightUp => {
                self.mouse.x = self.scale.scale_absolute(x);
                self.mouse.y = self.scale.scale_absolute(y);
                self.gestures.long_press(self.mouse.x, self.mouse.y)
            }
            MouseAction::BackUp => self.gestures.key_tap(android::KEYCODE_BACK),
            MouseAction::WheelButtonDown => {
                self.gestures.dual_action_down();
                Ok(())
            }
            MouseAction::WheelButtonUp => self.gestures.dual_action_up(),
            MouseAction::WheelDown => {
                self.gestures
                    .wheel_swipe(self.mouse.x, self.mouse.y, -self.timing.wheel_step)
            }
            MouseAction::WheelUp => {
                self.gestures
                    .wheel_swipe(self.mouse.x, self.mouse.y, self.timing.wheel_step)
            }
        }
    }

    // ── Touch channel ─────────────────────────────────────────────────────────

    fn handle_touch(&mut self, code: i32, x: i32, y: i32) -> Result<(), InjectError> {
        let Some(action) = TouchAction::from_code(code) else {
            return Err(InjectError::UnsupportedAction {
                kind: ChannelKind::Touch,
                mask: code,
            });
        };
        match action {
            TouchAction::PanStart => {
                self.touch.x = self.scale.scale_absolute(x);
                self.touch.y = self.scale.scale_absolute(y);
                let now = self.clock.now_ms();
                match self.inject_motion(
                    MotionAction::Down,
                    self.touch.x,
                    self.touch.y,
                    now,
                    "touch down",
                ) {
                    Ok(()) => {
                        self.touch.down_since_ms = Some(now);
                        Ok(())
                    }
                    Err(error) => {
                        self.touch.down_since_ms = None;
                        Err(error)
                    }
                }
            }
            TouchAction::PanUpdate => {
                // Pan deltas are inverted: dragging the remote view right
                // moves the contact left, like dragging a map.
                self.touch.x -= self.scale.scale_delta(x);
                self.touch.y -= self.scale.scale_delta(y);
                if self.touch.x < 0.0 {
                    self.touch.x = 0.0;
                }
                if self.touch.y < 0.0 {
                    self.touch.y = 0.0;
                }
                if let Some(down_time) = self.touch.down_since_ms {
                    self.inject_motion(
                        MotionAction::Move,
                        self.touch.x,
                        self.touch.y,
                        down_time,
                        "touch move",
                    )?;
                }
                Ok(())
            }
            TouchAction::PanEnd => {
                // The release lands on the last tracked position; the
                // message's own coordinates only re-anchor the channel for
                // the next gesture.
                let result = match self.touch.down_since_ms {
                    Some(down_time) => self.inject_motion(
                        MotionAction::Up,
                        self.touch.x,
                        self.touch.y,
                        down_time,
                        "touch up",
                    ),
                    None => Ok(()),
                };
                self.touch.down_since_ms = None;
                self.touch.x = self.scale.scale_absolute(x);
                self.touch.y = self.scale.scale_absolute(y);
                result
            }
        }
    }

    // ── Injection helpers ─────────────────────────────────────────────────────

    fn inject_motion(
        &self,
        action: MotionAction,
        x: f32,
        y: f32,
        down_time_ms: u64,
        stage: &'static str,
    ) -> Result<(), InjectError> {
        let event = InjectedEvent::Motion {
            action,
            x,
            y,
            down_time_ms,
            event_time_ms: self.clock.now_ms(),
        };
        if self.injector.inject(event) {
            Ok(())
        } else {
            Err(InjectError::InjectionFailed { stage })
        }
    }

    fn inject_key(
        &self,
        direction: KeyDirection,
        key_code: u32,
        down_time_ms: u64,
        stage: &'static str,
    ) -> Result<(), InjectError> {
        let event = InjectedEvent::Key {
            direction,
            key_code,
            down_time_ms,
            event_time_ms: self.clock.now_ms(),
        };
        if self.injector.inject(event) {
            Ok(())
        } else {
            Err(InjectError::InjectionFailed { stage })
        }
    }
}

fn release_channel(
    injector: &dyn RawEventInjector,
    clock: Uptime,
    session_id: Uuid,
    channel: &mut ContactState,
) {
    if let Some(down_time) = channel.down_since_ms.take() {
        let release = InjectedEvent::Motion {
            action: MotionAction::Up,
            x: channel.x,
            y: channel.y,
            down_time_ms: down_time,
            event_time_ms: clock.now_ms(),
        };
        if !injector.inject(release) {
            warn!(session = %session_id, "failed to release a held contact");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::injection::mock::{MockEventInjector, StaticCapability};
    use crate::infrastructure::keymap::AndroidKeymap;
    use mockall::predicate;
    use std::time::Duration;
    use tap_core::protocol::codec::encode_key_event;
    use tap_core::protocol::messages::{control_key, mouse_mask, touch_code, KeyEventMessage};
    use tokio::task::yield_now;
    use tokio::time::advance;

    fn mouse(mask: i32, x: i32, y: i32) -> PointerEventMessage {
        PointerEventMessage {
            kind: ChannelKind::Mouse,
            mask,
            x,
            y,
        }
    }

    fn touch(code: i32, x: i32, y: i32) -> PointerEventMessage {
        PointerEventMessage {
            kind: ChannelKind::Touch,
            mask: code,
            x,
            y,
        }
    }

    fn key_payload(code: u32, press: bool, down: bool) -> Vec<u8> {
        encode_key_event(&KeyEventMessage {
            code,
            press,
            down,
            sequence: false,
            unicode: false,
        })
    }

    fn make_dispatcher_scaled(scale: f32) -> (InputDispatcher, Arc<MockEventInjector>) {
        let mock = Arc::new(MockEventInjector::new());
        let dispatcher = InputDispatcher::new(
            Arc::new(StaticCapability::granted()),
            Arc::clone(&mock) as Arc<dyn RawEventInjector>,
            Arc::new(AndroidKeymap),
            ScreenScale::new(scale),
            GestureTiming::default(),
        );
        (dispatcher, mock)
    }

    fn make_dispatcher() -> (InputDispatcher, Arc<MockEventInjector>) {
        make_dispatcher_scaled(1.0)
    }

    // ── Capability gate ───────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_denied_capability_blocks_both_paths() {
        // Arrange
        let mock = Arc::new(MockEventInjector::new());
        let mut dispatcher = InputDispatcher::new(
            Arc::new(StaticCapability::denied()),
            Arc::clone(&mock) as Arc<dyn RawEventInjector>,
            Arc::new(AndroidKeymap),
            ScreenScale::new(1.0),
            GestureTiming::default(),
        );

        // Act & Assert
        assert_eq!(
            dispatcher.handle_pointer(&mouse(mouse_mask::LEFT_DOWN, 10, 10)),
            Err(InjectError::CapabilityDenied)
        );
        assert_eq!(
            dispatcher.handle_key(&key_payload(control_key::RETURN, true, false)),
            Err(InjectError::CapabilityDenied)
        );
        assert!(!dispatcher.try_inject_pointer(&mouse(mouse_mask::LEFT_DOWN, 10, 10)));
        assert!(!dispatcher.try_inject_key(&key_payload(control_key::RETURN, true, false)));
        assert!(mock.injected.lock().unwrap().is_empty());
    }

    // ── Mouse channel ─────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_click_cycle_shares_the_press_timestamp() {
        // Arrange
        let (mut dispatcher, mock) = make_dispatcher();

        // Act – press, drag, release with time passing in between.
        dispatcher
            .handle_pointer(&mouse(mouse_mask::LEFT_DOWN, 100, 200))
            .unwrap();
        advance(Duration::from_millis(20)).await;
        dispatcher
            .handle_pointer(&mouse(mouse_mask::LEFT_MOVE, 110, 210))
            .unwrap();
        advance(Duration::from_millis(10)).await;
        dispatcher
            .handle_pointer(&mouse(mouse_mask::LEFT_UP, 120, 220))
            .unwrap();

        // Assert – one press cycle, all events anchored to the press time.
        let events = mock.injected.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                InjectedEvent::Motion {
                    action: MotionAction::Down,
                    x: 100.0,
                    y: 200.0,
                    down_time_ms: 0,
                    event_time_ms: 0,
                },
                InjectedEvent::Motion {
                    action: MotionAction::Move,
                    x: 110.0,
                    y: 210.0,
                    down_time_ms: 0,
                    event_time_ms: 20,
                },
                InjectedEvent::Motion {
                    action: MotionAction::Up,
                    x: 120.0,
                    y: 220.0,
                    down_time_ms: 0,
                    event_time_ms: 30,
                },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_hover_move_tracks_position_without_injecting() {
        // Arrange
        let (mut dispatcher, mock) = make_dispatcher();

        // Act – a hover move, then a wheel notch that starts at the tracked
        // position.
        dispatcher
            .handle_pointer(&mouse(mouse_mask::MOVE, 50, 400))
            .unwrap();
        assert!(mock.injected.lock().unwrap().is_empty());
        dispatcher
            .handle_pointer(&mouse(mouse_mask::WHEEL_DOWN, 0, 0))
            .unwrap();

        // Assert – the swipe anchored where the hover left the pointer.
        let events = mock.injected.lock().unwrap();
        assert_eq!(
            events[0],
            InjectedEvent::Motion {
                action: MotionAction::Down,
                x: 50.0,
                y: 400.0,
                down_time_ms: 0,
                event_time_ms: 0,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_press_leaves_the_button_released() {
        // Arrange
        let (mut dispatcher, mock) = make_dispatcher();
        mock.set_should_fail(true);

        // Act – the press is rejected.
        let result = dispatcher.handle_pointer(&mouse(mouse_mask::LEFT_DOWN, 10, 20));
        assert_eq!(
            result,
            Err(InjectError::InjectionFailed { stage: "mouse down" })
        );

        // Later moves and the release must not inject anything.
        mock.set_should_fail(false);
        dispatcher
            .handle_pointer(&mouse(mouse_mask::LEFT_MOVE, 11, 21))
            .unwrap();
        dispatcher
            .handle_pointer(&mouse(mouse_mask::LEFT_UP, 12, 22))
            .unwrap();

        // Assert
        assert!(mock.injected.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_release_still_ends_the_press() {
        // Arrange – a held button whose release gets rejected.
        let (mut dispatcher, mock) = make_dispatcher();
        dispatcher
            .handle_pointer(&mouse(mouse_mask::LEFT_DOWN, 10, 20))
            .unwrap();
        mock.set_should_fail(true);

        // Act
        let result = dispatcher.handle_pointer(&mouse(mouse_mask::LEFT_UP, 10, 20));
        assert_eq!(
            result,
            Err(InjectError::InjectionFailed { stage: "mouse up" })
        );

        // A move after the failed release must not inject: the press ended.
        mock.set_should_fail(false);
        dispatcher
            .handle_pointer(&mouse(mouse_mask::LEFT_MOVE, 30, 40))
            .unwrap();

        // Assert – only the original down was ever recorded.
        assert_eq!(mock.injected.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_release_without_press_is_a_quiet_success() {
        let (mut dispatcher, mock) = make_dispatcher();

        let result = dispatcher.handle_pointer(&mouse(mouse_mask::LEFT_UP, 10, 20));

        assert_eq!(result, Ok(()));
        assert!(mock.injected.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsupported_mouse_mask_is_reported() {
        let (mut dispatcher, mock) = make_dispatcher();

        // 17 would be a right-button drag, which this host does not emulate.
        let result = dispatcher.handle_pointer(&mouse(17, 10, 20));

        assert_eq!(
            result,
            Err(InjectError::UnsupportedAction {
                kind: ChannelKind::Mouse,
                mask: 17,
            })
        );
        assert!(!dispatcher.try_inject_pointer(&mouse(17, 10, 20)));
        assert!(mock.injected.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_right_release_plays_back_a_long_press() {
        // Arrange
        let (mut dispatcher, mock) = make_dispatcher();

        // Act
        dispatcher
            .handle_pointer(&mouse(mouse_mask::RIGHT_UP, 100, 300))
            .unwrap();
        advance(Duration::from_millis(500)).await;
        yield_now().await;

        // Assert – down immediately, release after the long-press duration,
        // both anchored to the same press time.
        let events = mock.injected.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                InjectedEvent::Motion {
                    action: MotionAction::Down,
                    x: 100.0,
                    y: 300.0,
                    down_time_ms: 0,
                    event_time_ms: 0,
                },
                InjectedEvent::Motion {
                    action: MotionAction::Up,
                    x: 100.0,
                    y: 300.0,
                    down_time_ms: 0,
                    event_time_ms: 500,
                },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_release_taps_the_back_key() {
        let (mut dispatcher, mock) = make_dispatcher();

        dispatcher
            .handle_pointer(&mouse(mouse_mask::BACK_UP, 0, 0))
            .unwrap();

        let events = mock.injected.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                InjectedEvent::Key {
                    direction: KeyDirection::Down,
                    key_code: android::KEYCODE_BACK,
                    down_time_ms: 0,
                    event_time_ms: 0,
                },
                InjectedEvent::Key {
                    direction: KeyDirection::Up,
                    key_code: android::KEYCODE_BACK,
                    down_time_ms: 0,
                    event_time_ms: 10,
                },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_wheel_notches_swipe_in_opposite_directions() {
        // Arrange – park the pointer mid-screen first.
        let (mut dispatcher, mock) = make_dispatcher();
        dispatcher
            .handle_pointer(&mouse(mouse_mask::MOVE, 320, 400))
            .unwrap();

        // Act
        dispatcher
            .handle_pointer(&mouse(mouse_mask::WHEEL_DOWN, 0, 0))
            .unwrap();
        dispatcher
            .handle_pointer(&mouse(mouse_mask::WHEEL_UP, 0, 0))
            .unwrap();

        // Assert – two three-step swipes; scrolling down drags towards the
        // top of the screen, scrolling up drags away from it.
        let events = mock.injected.lock().unwrap();
        assert_eq!(events.len(), 6);
        assert!(matches!(
            events[1],
            InjectedEvent::Motion {
                action: MotionAction::Move,
                y,
                ..
            } if y == 280.0
        ));
        assert!(matches!(
            events[4],
            InjectedEvent::Motion {
                action: MotionAction::Move,
                y,
                ..
            } if y == 520.0
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wheel_button_quick_press_taps_home() {
        // Arrange
        let (mut dispatcher, mock) = make_dispatcher();

        // Act – press and release inside the hold threshold.
        dispatcher
            .handle_pointer(&mouse(mouse_mask::WHEEL_BUTTON_DOWN, 0, 0))
            .unwrap();
        advance(Duration::from_millis(100)).await;
        yield_now().await;
        dispatcher
            .handle_pointer(&mouse(mouse_mask::WHEEL_BUTTON_UP, 0, 0))
            .unwrap();
        advance(Duration::from_millis(500)).await;
        yield_now().await;

        // Assert – a home tap and nothing else.
        let events = mock.injected.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|event| matches!(
            event,
            InjectedEvent::Key {
                key_code: android::KEYCODE_HOME,
                ..
            }
        )));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wheel_button_hold_taps_app_switch() {
        // Arrange
        let (mut dispatcher, mock) = make_dispatcher();

        // Act – hold past the threshold before releasing.
        dispatcher
            .handle_pointer(&mouse(mouse_mask::WHEEL_BUTTON_DOWN, 0, 0))
            .unwrap();
        advance(Duration::from_millis(300)).await;
        yield_now().await;
        dispatcher
            .handle_pointer(&mouse(mouse_mask::WHEEL_BUTTON_UP, 0, 0))
            .unwrap();

        // Assert – an app-switch tap and no home tap.
        let events = mock.injected.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|event| matches!(
            event,
            InjectedEvent::Key {
                key_code: android::KEYCODE_APP_SWITCH,
                ..
            }
        )));
    }

    // ── Touch channel ─────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_pan_subtracts_deltas_and_clamps_to_the_origin() {
        // Arrange
        let (mut dispatcher, mock) = make_dispatcher();

        // Act
        dispatcher
            .handle_pointer(&touch(touch_code::PAN_START, 500, 500))
            .unwrap();
        dispatcher
            .handle_pointer(&touch(touch_code::PAN_UPDATE, 30, -20))
            .unwrap();
        dispatcher
            .handle_pointer(&touch(touch_code::PAN_UPDATE, 600, 0))
            .unwrap();

        // Assert – deltas move the contact the opposite way and the second
        // update pinned x to the edge.
        let events = mock.injected.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                InjectedEvent::Motion {
                    action: MotionAction::Down,
                    x: 500.0,
                    y: 500.0,
                    down_time_ms: 0,
                    event_time_ms: 0,
                },
                InjectedEvent::Motion {
                    action: MotionAction::Move,
                    x: 470.0,
                    y: 520.0,
                    down_time_ms: 0,
                    event_time_ms: 0,
                },
                InjectedEvent::Motion {
                    action: MotionAction::Move,
                    x: 0.0,
                    y: 520.0,
                    down_time_ms: 0,
                    event_time_ms: 0,
                },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_pan_end_releases_at_the_tracked_position_then_reanchors() {
        // Arrange – a pan that has drifted to (470, 520).
        let (mut dispatcher, mock) = make_dispatcher();
        dispatcher
            .handle_pointer(&touch(touch_code::PAN_START, 500, 500))
            .unwrap();
        dispatcher
            .handle_pointer(&touch(touch_code::PAN_UPDATE, 30, -20))
            .unwrap();

        // Act – the end message carries fresh absolute coordinates.
        dispatcher
            .handle_pointer(&touch(touch_code::PAN_END, 200, 100))
            .unwrap();

        // Assert – the release landed on the tracked position, not on the
        // message coordinates; those only re-anchor the channel.
        let events = mock.injected.lock().unwrap();
        assert_eq!(
            events[2],
            InjectedEvent::Motion {
                action: MotionAction::Up,
                x: 470.0,
                y: 520.0,
                down_time_ms: 0,
                event_time_ms: 0,
            }
        );
        assert_eq!(dispatcher.touch.down_since_ms, None);
        assert_eq!(dispatcher.touch.x, 200.0);
        assert_eq!(dispatcher.touch.y, 100.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pan_update_without_contact_tracks_only() {
        let (mut dispatcher, mock) = make_dispatcher();

        let result = dispatcher.handle_pointer(&touch(touch_code::PAN_UPDATE, 30, 40));

        assert_eq!(result, Ok(()));
        assert!(mock.injected.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pan_end_without_contact_reanchors_quietly() {
        let (mut dispatcher, mock) = make_dispatcher();

        let result = dispatcher.handle_pointer(&touch(touch_code::PAN_END, 200, 100));

        assert_eq!(result, Ok(()));
        assert!(mock.injected.lock().unwrap().is_empty());
        assert_eq!(dispatcher.touch.x, 200.0);
        assert_eq!(dispatcher.touch.y, 100.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pinch_codes_are_not_emulated() {
        let (mut dispatcher, _mock) = make_dispatcher();

        let result = dispatcher.handle_pointer(&touch(touch_code::SCALE_UPDATE, 10, 10));

        assert_eq!(
            result,
            Err(InjectError::UnsupportedAction {
                kind: ChannelKind::Touch,
                mask: touch_code::SCALE_UPDATE,
            })
        );
    }

    // ── Coordinate scaling ────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_scale_applies_to_absolutes_and_deltas() {
        // Arrange – remote coordinates are twice the screen's density.
        let (mut dispatcher, mock) = make_dispatcher_scaled(0.5);

        // Act
        dispatcher
            .handle_pointer(&mouse(mouse_mask::LEFT_DOWN, 100, 200))
            .unwrap();
        dispatcher
            .handle_pointer(&mouse(mouse_mask::LEFT_UP, 100, 200))
            .unwrap();
        dispatcher
            .handle_pointer(&touch(touch_code::PAN_START, 100, 100))
            .unwrap();
        dispatcher
            .handle_pointer(&touch(touch_code::PAN_UPDATE, 20, 0))
            .unwrap();

        // Assert
        let events = mock.injected.lock().unwrap();
        assert!(matches!(
            events[0],
            InjectedEvent::Motion { x, y, .. } if x == 50.0 && y == 100.0
        ));
        assert!(matches!(
            events[3],
            InjectedEvent::Motion {
                action: MotionAction::Move,
                x,
                y,
                ..
            } if x == 40.0 && y == 50.0
        ));
    }

    // ── Key channel ───────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_key_press_injects_a_down_up_pair() {
        // Arrange
        let (mut dispatcher, mock) = make_dispatcher();

        // Act
        dispatcher
            .handle_key(&key_payload(control_key::RETURN, true, false))
            .unwrap();

        // Assert – both halves, platform enter code, shared down time.
        let events = mock.injected.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                InjectedEvent::Key {
                    direction: KeyDirection::Down,
                    key_code: android::KEYCODE_ENTER,
                    down_time_ms: 0,
                    event_time_ms: 0,
                },
                InjectedEvent::Key {
                    direction: KeyDirection::Up,
                    key_code: android::KEYCODE_ENTER,
                    down_time_ms: 0,
                    event_time_ms: 0,
                },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_key_down_and_up_messages_are_stamped_independently() {
        // Arrange
        let (mut dispatcher, mock) = make_dispatcher();

        // Act – a held key: down message now, up message 30 ms later.
        dispatcher
            .handle_key(&key_payload(control_key::SHIFT, false, true))
            .unwrap();
        advance(Duration::from_millis(30)).await;
        dispatcher
            .handle_key(&key_payload(control_key::SHIFT, false, false))
            .unwrap();

        // Assert – each wire message gets a fresh timestamp; the key path
        // keeps no held-key state.
        let events = mock.injected.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                InjectedEvent::Key {
                    direction: KeyDirection::Down,
                    key_code: android::KEYCODE_SHIFT_LEFT,
                    down_time_ms: 0,
                    event_time_ms: 0,
                },
                InjectedEvent::Key {
                    direction: KeyDirection::Up,
                    key_code: android::KEYCODE_SHIFT_LEFT,
                    down_time_ms: 30,
                    event_time_ms: 30,
                },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_key_translation_goes_through_the_lookup_seam() {
        // Arrange – a lookup that maps one code and is consulted once.
        let mut lookup = MockKeyCodeLookup::new();
        lookup
            .expect_platform_key_code()
            .with(predicate::eq(control_key::ESCAPE))
            .times(1)
            .returning(|_| android::KEYCODE_ESCAPE);
        let mock = Arc::new(MockEventInjector::new());
        let mut dispatcher = InputDispatcher::new(
            Arc::new(StaticCapability::granted()),
            Arc::clone(&mock) as Arc<dyn RawEventInjector>,
            Arc::new(lookup),
            ScreenScale::new(1.0),
            GestureTiming::default(),
        );

        // Act
        dispatcher
            .handle_key(&key_payload(control_key::ESCAPE, true, false))
            .unwrap();

        // Assert
        let events = mock.injected.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|event| matches!(
            event,
            InjectedEvent::Key {
                key_code: android::KEYCODE_ESCAPE,
                ..
            }
        )));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_key_code_is_not_injected() {
        let (mut dispatcher, mock) = make_dispatcher();

        let result = dispatcher.handle_key(&key_payload(9_999, true, false));

        assert_eq!(
            result,
            Err(InjectError::TranslationFailed {
                reason: "unknown key code"
            })
        );
        assert!(mock.injected.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_text_path_events_are_rejected() {
        // Arrange
        let (mut dispatcher, mock) = make_dispatcher();
        let unicode = encode_key_event(&KeyEventMessage {
            code: 0x41,
            press: true,
            down: false,
            sequence: false,
            unicode: true,
        });
        let sequence = encode_key_event(&KeyEventMessage {
            code: 0,
            press: false,
            down: true,
            sequence: true,
            unicode: false,
        });

        // Act & Assert
        for payload in [unicode, sequence] {
            assert_eq!(
                dispatcher.handle_key(&payload),
                Err(InjectError::TranslationFailed {
                    reason: "unicode/sequence event on key path"
                })
            );
        }
        assert!(mock.injected.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_key_payload_is_reported() {
        let (mut dispatcher, mock) = make_dispatcher();

        let result = dispatcher.handle_key(&[0x01, 0x02, 0x03]);

        assert_eq!(
            result,
            Err(InjectError::TranslationFailed {
                reason: "malformed key payload"
            })
        );
        assert!(mock.injected.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_key_down_skips_the_paired_up() {
        // Arrange – only the first injection fails.
        let (mut dispatcher, mock) = make_dispatcher();
        mock.set_should_fail(true);

        // Act
        let result = dispatcher.handle_key(&key_payload(control_key::RETURN, true, false));

        // Assert – the error names the down and no up was recorded even
        // after the failure state clears.
        assert_eq!(
            result,
            Err(InjectError::InjectionFailed { stage: "key down" })
        );
        assert!(mock.injected.lock().unwrap().is_empty());
    }

    // ── Session teardown ──────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_release_contacts_lifts_held_channels() {
        // Arrange – both channels held.
        let (mut dispatcher, mock) = make_dispatcher();
        dispatcher
            .handle_pointer(&mouse(mouse_mask::LEFT_DOWN, 100, 200))
            .unwrap();
        dispatcher
            .handle_pointer(&touch(touch_code::PAN_START, 300, 400))
            .unwrap();
        advance(Duration::from_millis(50)).await;

        // Act
        dispatcher.release_contacts();

        // Assert – one release per held channel, anchored to each press.
        let events = mock.injected.lock().unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[2],
            InjectedEvent::Motion {
                action: MotionAction::Up,
                x: 100.0,
                y: 200.0,
                down_time_ms: 0,
                event_time_ms: 50,
            }
        );
        assert_eq!(
            events[3],
            InjectedEvent::Motion {
                action: MotionAction::Up,
                x: 300.0,
                y: 400.0,
                down_time_ms: 0,
                event_time_ms: 50,
            }
        );
        assert_eq!(dispatcher.mouse.down_since_ms, None);
        assert_eq!(dispatcher.touch.down_since_ms, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_release_contacts_cancels_pending_gestures() {
        // Arrange – an armed dual-action timer.
        let (mut dispatcher, mock) = make_dispatcher();
        dispatcher
            .handle_pointer(&mouse(mouse_mask::WHEEL_BUTTON_DOWN, 0, 0))
            .unwrap();

        // Act
        dispatcher.release_contacts();
        advance(Duration::from_millis(1_000)).await;
        yield_now().await;

        // Assert – the hold tap never fired.
        assert!(mock.injected.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_release_contacts_with_nothing_held_is_quiet() {
        let (mut dispatcher, mock) = make_dispatcher();

        dispatcher.release_contacts();

        assert!(mock.injected.lock().unwrap().is_empty());
    }
}
