//! Replays a scripted control session against the recording injector.
//!
//! Run with:
//!
//! ```text
//! RUST_LOG=debug cargo run -p tap-host --example replay_session
//! ```
//!
//! The script walks through every supported gesture the way a controlling
//! peer would drive them over the wire:
//!
//! ```text
//! script                               synthesized on the host
//! ──────                               ───────────────────────
//! tap                                  touch down + up
//! drag                                 down, three moves, up
//! right-button release                 long-press (deferred release)
//! wheel notch                          three-step swipe
//! quick wheel-button press             home key tap
//! two-finger pan                       down, inverted moves, up
//! return key press                     enter key down + up
//! ```
//!
//! Every step is first encoded to wire bytes and decoded again, so the
//! pointer codec is exercised alongside the dispatcher. The injector is the
//! in-memory recorder; swap in a platform backend to drive a real device.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tap_core::domain::injected::InjectedEvent;
use tap_core::protocol::codec::{decode_pointer_event, encode_key_event, encode_pointer_event};
use tap_core::protocol::messages::{
    control_key, mouse_mask, touch_code, ChannelKind, KeyEventMessage, PointerEventMessage,
};
use tap_host::{
    AndroidKeymap, InjectorSettings, InputDispatcher, MockEventInjector, RawEventInjector,
    StaticCapability,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// One scripted action: a wire frame to deliver or a pause between frames.
enum Step {
    Pointer(Vec<u8>),
    Key(Vec<u8>),
    Wait(Duration),
}

fn mouse(mask: i32, x: i32, y: i32) -> Step {
    Step::Pointer(encode_pointer_event(&PointerEventMessage {
        kind: ChannelKind::Mouse,
        mask,
        x,
        y,
    }))
}

fn touch(code: i32, x: i32, y: i32) -> Step {
    Step::Pointer(encode_pointer_event(&PointerEventMessage {
        kind: ChannelKind::Touch,
        mask: code,
        x,
        y,
    }))
}

fn key_press(code: u32) -> Step {
    Step::Key(encode_key_event(&KeyEventMessage {
        code,
        press: true,
        down: false,
        sequence: false,
        unicode: false,
    }))
}

fn wait_ms(ms: u64) -> Step {
    Step::Wait(Duration::from_millis(ms))
}

fn script() -> Vec<Step> {
    vec![
        // A plain tap.
        mouse(mouse_mask::LEFT_DOWN, 540, 960),
        wait_ms(30),
        mouse(mouse_mask::LEFT_UP, 540, 960),
        wait_ms(200),
        // A short drag.
        mouse(mouse_mask::LEFT_DOWN, 200, 800),
        wait_ms(16),
        mouse(mouse_mask::LEFT_MOVE, 240, 800),
        wait_ms(16),
        mouse(mouse_mask::LEFT_MOVE, 280, 800),
        wait_ms(16),
        mouse(mouse_mask::LEFT_MOVE, 320, 800),
        wait_ms(16),
        mouse(mouse_mask::LEFT_UP, 320, 800),
        wait_ms(200),
        // A long-press; its release fires on the gesture timer.
        mouse(mouse_mask::RIGHT_UP, 540, 400),
        wait_ms(600),
        // One wheel notch from mid-screen.
        mouse(mouse_mask::MOVE, 540, 1200),
        mouse(mouse_mask::WHEEL_DOWN, 0, 0),
        wait_ms(200),
        // A quick wheel-button press resolves to the home key.
        mouse(mouse_mask::WHEEL_BUTTON_DOWN, 0, 0),
        wait_ms(100),
        mouse(mouse_mask::WHEEL_BUTTON_UP, 0, 0),
        wait_ms(200),
        // A two-finger pan.
        touch(touch_code::PAN_START, 540, 960),
        wait_ms(16),
        touch(touch_code::PAN_UPDATE, 25, 0),
        wait_ms(16),
        touch(touch_code::PAN_UPDATE, 25, -10),
        wait_ms(16),
        touch(touch_code::PAN_END, 540, 960),
        wait_ms(200),
        // A key press over the key channel.
        key_press(control_key::RETURN),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = InjectorSettings::load_from_path(Path::new("tap-host.toml"))?;
    let injector = Arc::new(MockEventInjector::new());
    let mut dispatcher = InputDispatcher::new(
        Arc::new(StaticCapability::granted()),
        Arc::clone(&injector) as Arc<dyn RawEventInjector>,
        Arc::new(AndroidKeymap),
        settings.screen_scale(),
        settings.gesture_timing(),
    );
    info!(session = %dispatcher.session_id(), "replaying scripted session");

    for step in script() {
        match step {
            Step::Pointer(frame) => {
                let message = decode_pointer_event(&frame)?;
                dispatcher.try_inject_pointer(&message);
            }
            Step::Key(payload) => {
                dispatcher.try_inject_key(&payload);
            }
            Step::Wait(delay) => tokio::time::sleep(delay).await,
        }
    }

    // Give any still-pending deferred gesture work time to drain, then end
    // the session the way a disconnect handler would.
    tokio::time::sleep(Duration::from_millis(700)).await;
    dispatcher.release_contacts();

    let events = injector.injected.lock().unwrap();
    let motions = events
        .iter()
        .filter(|event| matches!(event, InjectedEvent::Motion { .. }))
        .count();
    let keys = events.len() - motions;
    info!(total = events.len(), motions, keys, "session replayed");
    for event in events.iter() {
        debug!(?event, "injected");
    }

    Ok(())
}
