// Rawkeys Trace Replay Tests
//
// Replays the sample trace shipped with the repository.
//
// Run with: cargo test -p rawkeys-core --test trace_replay

use rawkeys_core::key::{BTN_RIGHT, KEY_LEFT_SHIFT, KEY_RIGHT_ALT, KEY_RIGHT_SHIFT};
use rawkeys_core::{
    DeviceId, KeyEvent, RawInputProcessor, ReplaySummary, Settings, StandardScanCodeMap, Trace,
};

const SAMPLE_TRACE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../traces/modifiers_and_focus.toml"
);

#[test]
fn test_sample_trace_replay() {
    let trace = Trace::from_file(SAMPLE_TRACE).unwrap();
    let mut processor = RawInputProcessor::new().with_scan_map(Box::new(StandardScanCodeMap));
    let mut events: Vec<KeyEvent> = Vec::new();

    let summary = trace.replay(&mut processor, &mut events);

    assert_eq!(
        summary,
        ReplaySummary {
            decoded: 7,
            ignored: 1,
            released: 2,
        }
    );
    assert_eq!(
        events,
        vec![
            KeyEvent::down(DeviceId::Keyboard, KEY_LEFT_SHIFT),
            KeyEvent::down(DeviceId::Keyboard, KEY_RIGHT_SHIFT),
            KeyEvent::up(DeviceId::Keyboard, KEY_LEFT_SHIFT),
            KeyEvent::down(DeviceId::Keyboard, KEY_RIGHT_ALT),
            KeyEvent::down(DeviceId::Mouse, BTN_RIGHT),
            KeyEvent::up(DeviceId::Mouse, BTN_RIGHT),
            KeyEvent::up(DeviceId::Keyboard, KEY_RIGHT_SHIFT),
            KeyEvent::up(DeviceId::Keyboard, KEY_RIGHT_ALT),
        ]
    );
    assert_eq!(processor.take_motion(), (13, -3));
    assert!(processor.held_keys().is_empty());
}

#[test]
fn test_replay_with_keymap_override() {
    let settings = Settings::from_toml("[keymap]\n\"0xA5\" = 0\n").unwrap();
    let trace = Trace::from_file(SAMPLE_TRACE).unwrap();
    let mut processor =
        RawInputProcessor::from_settings(&settings).with_scan_map(Box::new(StandardScanCodeMap));
    let mut events: Vec<KeyEvent> = Vec::new();

    let summary = trace.replay(&mut processor, &mut events);

    // Right Alt is unmapped, so it is neither emitted nor released on focus loss
    assert!(events.iter().all(|e| e.key != KEY_RIGHT_ALT));
    assert_eq!(summary.released, 1);
}
