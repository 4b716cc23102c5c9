//! Tests for the recorder state machine

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use glam::Vec2;

use super::*;
use crate::config::RecorderConfig;
use crate::input::LiveInput;
use crate::replay::recording::{Recording, RecordingError};
use crate::test_utils::ScriptedInput;

const DT: f32 = 0.25;

fn jump_config() -> RecorderConfig {
    RecorderConfig::with_inputs(["Jump"], ["Horizontal"])
}

fn recorder() -> Recorder<ScriptedInput> {
    Recorder::new(ScriptedInput::new(), jump_config())
}

/// Record one frame per entry, holding "Jump" where the entry is true
fn record_jumps(pattern: &[bool]) -> Recording {
    let mut recorder = recorder();
    recorder.record_new();
    for &held in pattern {
        recorder.input_mut().set_button("Jump", held);
        recorder.tick(DT).unwrap();
    }
    recorder.stop();
    recorder.snapshot().unwrap()
}

fn finish_counter(recorder: &mut Recorder<ScriptedInput>) -> Rc<Cell<u32>> {
    let count = Rc::new(Cell::new(0));
    let listener_count = Rc::clone(&count);
    recorder.on_finished_playback(move || listener_count.set(listener_count.get() + 1));
    count
}

// ============================================================================
// Passthrough / Record forwarding
// ============================================================================

#[test]
fn test_starts_in_passthrough() {
    let mut recorder = recorder();
    assert_eq!(recorder.mode(), RecorderMode::Passthrough);
    assert!(!recorder.is_paused());
    assert!(recorder.recording().is_none());
    assert_eq!(recorder.playback_time(), 0.0);
    assert_eq!(recorder.tick(DT).unwrap(), TickEvent::Idle);
}

#[test]
fn test_passthrough_forwards_live_input() {
    let mut recorder = recorder();
    recorder.load_recording(record_jumps(&[true, true]));

    recorder.input_mut().set_button("Jump", false);
    recorder.input_mut().set_axis("Horizontal", -0.5);
    recorder.input_mut().set_key("Space", true);
    recorder.input_mut().mouse_position = Vec2::new(10.0, 20.0);

    assert!(!recorder.button("Jump"));
    assert_eq!(recorder.axis("Horizontal"), -0.5);
    assert!(recorder.key("Space"));
    assert_eq!(recorder.mouse_position(), Vec2::new(10.0, 20.0));
}

/// Live state that disagrees with `record_jumps(&[true, true])` and whose
/// edges differ between down and up for every source
fn contrary_input() -> ScriptedInput {
    let mut input = ScriptedInput::new();
    input.set_button("Jump", false);
    input.set_button_edges("Jump", false, true);
    input.set_button("Fire", true);
    input.set_button_edges("Fire", true, false);
    input.set_axis("Horizontal", -0.5);
    input.set_key("Space", true);
    input.set_key_edges("Space", false, true);
    input.set_key_edges("Enter", true, false);
    input.mouse_buttons = [false, true, false];
    input.mouse_buttons_down = [true, false, false];
    input.mouse_buttons_up = [false, false, true];
    input.mouse_position = Vec2::new(10.0, 20.0);
    input
}

/// Every query must return exactly what the live source reports
fn assert_answers_match_live(recorder: &Recorder<ScriptedInput>) {
    let live = recorder.input();
    for name in ["Jump", "Fire", "Unbound"] {
        assert_eq!(recorder.button(name), live.button(name), "button {name}");
        assert_eq!(recorder.button_down(name), live.button_down(name), "button_down {name}");
        assert_eq!(recorder.button_up(name), live.button_up(name), "button_up {name}");
    }
    for name in ["Space", "Enter", "Unbound"] {
        assert_eq!(recorder.key(name), live.key(name), "key {name}");
        assert_eq!(recorder.key_down(name), live.key_down(name), "key_down {name}");
        assert_eq!(recorder.key_up(name), live.key_up(name), "key_up {name}");
    }
    for name in ["Horizontal", "Vertical"] {
        assert_eq!(recorder.axis(name), live.axis(name), "axis {name}");
    }
    for button in 0..3 {
        assert_eq!(recorder.mouse_button(button), live.mouse_button(button));
        assert_eq!(recorder.mouse_button_down(button), live.mouse_button_down(button));
        assert_eq!(recorder.mouse_button_up(button), live.mouse_button_up(button));
    }
    assert_eq!(recorder.mouse_position(), live.mouse_position());

    assert!(recorder.button_up("Jump") && !recorder.button_down("Jump"));
    assert!(recorder.key_up("Space") && !recorder.key_down("Space"));
    assert!(recorder.mouse_button_down(0) && !recorder.mouse_button_up(0));
    assert!(recorder.mouse_button_up(2) && !recorder.mouse_button_down(2));
    assert_eq!(recorder.axis("Horizontal"), -0.5);
}

#[test]
fn test_every_query_forwards_in_passthrough_and_record() {
    let mut recorder = Recorder::new(contrary_input(), jump_config());
    recorder.load_recording(record_jumps(&[true, true]));
    assert_eq!(recorder.mode(), RecorderMode::Passthrough);
    assert_answers_match_live(&recorder);

    recorder.record();
    recorder.tick(DT).unwrap();
    assert_eq!(recorder.mode(), RecorderMode::Record);
    assert_answers_match_live(&recorder);

    // the loaded recording really does answer differently
    recorder.load_recording(record_jumps(&[true, true]));
    recorder.play();
    recorder.tick(DT).unwrap();
    assert!(recorder.button("Jump"));
    assert!(recorder.button_down("Jump"));
    assert_eq!(recorder.axis("Horizontal"), 0.0);
}

#[test]
fn test_record_forwards_and_captures() {
    let mut recorder = recorder();
    recorder.record_new();
    assert_eq!(recorder.mode(), RecorderMode::Record);

    recorder.input_mut().set_button("Jump", true);
    recorder.input_mut().set_button_edges("Jump", true, false);
    recorder.input_mut().set_axis("Horizontal", 0.75);
    assert_eq!(recorder.tick(DT).unwrap(), TickEvent::Recorded { frame: 0 });

    // queries still see live input while recording
    assert!(recorder.button("Jump"));
    assert!(recorder.button_down("Jump"));
    recorder.input_mut().set_button("Jump", false);
    assert!(!recorder.button("Jump"));

    let recording = recorder.recording().unwrap();
    assert_eq!(recording.frame_count(), 1);
    assert_eq!(recording.length(), DT);
    let frame = recording.frame(0).unwrap();
    assert!(frame.input("Jump").unwrap().button_state);
    assert_eq!(frame.input("Horizontal").unwrap().axis_value, 0.75);
}

#[test]
fn test_record_captures_keys_and_mouse() {
    let config = RecorderConfig {
        recorded_keys: vec!["Space".to_string()],
        record_mouse: true,
        ..RecorderConfig::default()
    };
    let mut recorder = Recorder::new(ScriptedInput::new(), config);
    recorder.record_new();
    recorder.input_mut().set_key("Space", true);
    recorder.input_mut().mouse_buttons[1] = true;
    recorder.input_mut().mouse_position = Vec2::new(3.0, 4.0);
    recorder.tick(DT).unwrap();
    recorder.stop();

    let frame = recorder.recording().unwrap().frame(0).unwrap();
    assert!(frame.input("Space").unwrap().button_state);
    assert!(frame.input("MOUSE_BUTTON_1").unwrap().button_state);
    assert!(!frame.input("MOUSE_BUTTON_0").unwrap().button_state);
    assert_eq!(frame.input("MOUSE_POSITION_X").unwrap().axis_value, 3.0);

    // replay against a live source reporting nothing
    *recorder.input_mut() = ScriptedInput::new();
    recorder.rewind_to_start();
    recorder.play();
    recorder.tick(DT).unwrap();
    assert!(recorder.key("Space"));
    assert!(recorder.key_down("Space"));
    assert!(recorder.mouse_button(1));
    assert!(recorder.mouse_button_down(1));
    assert!(!recorder.mouse_button(0));
    assert!(!recorder.mouse_button_up(0));
    assert_eq!(recorder.mouse_position(), Vec2::new(3.0, 4.0));
}

#[test]
fn test_save_property_deduplicated_and_record_only() {
    let mut recorder = recorder();
    recorder.save_property("level", "1");

    recorder.record_new();
    recorder.save_property("level", "1");
    recorder.save_property("level", "1");
    recorder.save_property("score", "40");
    recorder.tick(DT).unwrap();
    recorder.tick(DT).unwrap();

    let recording = recorder.recording().unwrap();
    let frame = recording.frame(0).unwrap();
    assert_eq!(frame.properties().len(), 2);
    assert_eq!(frame.property("level"), Some("1"));
    assert_eq!(frame.property("score"), Some("40"));
    assert!(recording.frame(1).unwrap().properties().is_empty());
}

// ============================================================================
// Playback
// ============================================================================

#[test]
fn test_edge_detection_one_frame_per_tick() {
    let recording = record_jumps(&[false, false, true, false, false]);
    let mut recorder = recorder();
    recorder.play_recording(recording, 0.0);

    let mut downs = Vec::new();
    let mut ups = Vec::new();
    for tick in 0..5 {
        assert_eq!(
            recorder.tick(DT).unwrap(),
            TickEvent::Advanced { frame: tick }
        );
        if recorder.button_down("Jump") {
            downs.push(tick);
        }
        if recorder.button_up("Jump") {
            ups.push(tick);
        }
    }

    assert_eq!(downs, vec![2]);
    assert_eq!(ups, vec![3]);
}

#[test]
fn test_skip_frame_sweep_keeps_pulse() {
    let mut pattern = [false; 10];
    pattern[5] = true;
    let mut recorder = recorder();
    recorder.play_recording(record_jumps(&pattern), 0.0);

    for _ in 0..4 {
        recorder.tick(DT).unwrap();
    }
    assert_eq!(recorder.current_frame(), Some(3));
    assert!(!recorder.button_down("Jump"));

    assert_eq!(
        recorder.tick(4.0 * DT).unwrap(),
        TickEvent::Advanced { frame: 7 }
    );
    assert!(recorder.button_down("Jump"));
    assert!(recorder.button_up("Jump"));
    assert!(!recorder.button("Jump"));

    recorder.tick(DT).unwrap();
    assert!(!recorder.button_down("Jump"));
    assert!(!recorder.button_up("Jump"));
}

#[test]
fn test_tick_between_frames_holds_latch() {
    let recording = record_jumps(&[false, true]);
    let mut recorder = recorder();
    recorder.play_recording(recording, 0.0);

    recorder.tick(DT).unwrap();
    recorder.tick(DT).unwrap();
    assert!(recorder.button_down("Jump"));

    // a tick that stays on the latched frame leaves the answers alone
    recorder.set_playback_time(2.0 * DT);
    recorder.tick(0.0).unwrap();
    assert_eq!(recorder.tick(0.0).unwrap(), TickEvent::Held);
    assert!(recorder.button("Jump"));
}

#[test]
fn test_playback_answers_defaults_for_unrecorded_ids() {
    let mut recorder = recorder();
    recorder.input_mut().set_axis("Vertical", 1.0);
    recorder.input_mut().set_button("Fire", true);
    recorder.play_recording(record_jumps(&[true]), 0.0);
    recorder.tick(DT).unwrap();

    assert_eq!(recorder.axis("Vertical"), 0.0);
    assert!(!recorder.button("Fire"));
    assert_eq!(recorder.try_property("missing"), None);
    assert_eq!(recorder.property("missing"), "");
}

#[test]
fn test_playback_termination_notifies_once() {
    let recording = record_jumps(&[false, true, false]);
    let length = recording.length();
    let mut recorder = recorder();
    let finished = finish_counter(&mut recorder);
    recorder.play_recording(recording, 0.0);

    let mut ticks = 0;
    while recorder.tick(DT).unwrap() != TickEvent::FinishedPlayback {
        ticks += 1;
        assert!(ticks <= 10, "playback never finished");
    }

    assert_eq!(ticks as f32 * DT, length);
    assert_eq!(finished.get(), 1);
    assert_eq!(recorder.mode(), RecorderMode::Passthrough);

    assert_eq!(recorder.tick(DT).unwrap(), TickEvent::Idle);
    assert_eq!(finished.get(), 1);
}

#[test]
fn test_play_without_recording_does_nothing() {
    let mut recorder = recorder();
    recorder.play();
    assert_eq!(recorder.mode(), RecorderMode::Passthrough);
}

#[test]
fn test_seek_rebuilds_latch_from_start() {
    let recording = record_jumps(&[false, true, true, true]);
    let mut recorder = recorder();
    recorder.play_recording(recording, 0.0);
    recorder.tick(DT).unwrap();
    assert!(!recorder.button("Jump"));

    recorder.set_playback_time(4.0 * DT);
    assert_eq!(recorder.tick(0.0).unwrap(), TickEvent::Advanced { frame: 3 });
    assert!(recorder.button("Jump"));
}

#[test]
fn test_play_recording_from_time() {
    let mut recorder = recorder();
    recorder.play_recording(record_jumps(&[true, false, false]), 2.0 * DT);
    assert_eq!(recorder.playback_time(), 2.0 * DT);
    recorder.tick(DT).unwrap();
    assert_eq!(recorder.current_frame(), Some(2));

    // seeking clamps to the recording
    recorder.set_playback_time(100.0);
    assert_eq!(recorder.playback_time(), 3.0 * DT);
    recorder.set_playback_time(-5.0);
    assert_eq!(recorder.playback_time(), 0.0);
}

// ============================================================================
// Pause / transitions
// ============================================================================

#[test]
fn test_pause_freezes_playback() {
    let mut recorder = recorder();
    recorder.play_recording(record_jumps(&[false, true, false]), 0.0);
    recorder.tick(DT).unwrap();
    recorder.tick(DT).unwrap();
    assert!(recorder.button_down("Jump"));

    recorder.pause();
    assert!(recorder.is_paused());
    assert_eq!(recorder.mode(), RecorderMode::Playback);
    assert_eq!(recorder.tick(DT).unwrap(), TickEvent::Paused);
    assert_eq!(recorder.playback_time(), 2.0 * DT);
    assert!(recorder.button_down("Jump"));

    // play() resumes without clearing the latch
    recorder.play();
    assert!(!recorder.is_paused());
    assert!(recorder.button_down("Jump"));
    recorder.tick(DT).unwrap();
    assert!(recorder.button_up("Jump"));
}

#[test]
fn test_pause_in_passthrough_is_ignored() {
    let mut recorder = recorder();
    recorder.pause();
    assert!(!recorder.is_paused());
}

#[test]
fn test_pause_stops_recording_frames() {
    let mut recorder = recorder();
    recorder.record_new();
    recorder.tick(DT).unwrap();
    recorder.pause();
    recorder.tick(DT).unwrap();
    recorder.resume();
    recorder.tick(DT).unwrap();
    assert_eq!(recorder.recording().unwrap().frame_count(), 2);
}

#[test]
fn test_record_resume_truncates_future() {
    let mut recorder = recorder();
    recorder.load_recording(record_jumps(&[false, false, true, true]));
    recorder.set_playback_time(2.0 * DT);

    recorder.record();
    assert_eq!(recorder.recording().unwrap().frame_count(), 2);
    assert_eq!(recorder.tick(DT).unwrap(), TickEvent::Recorded { frame: 2 });
    let recording = recorder.recording().unwrap();
    assert_eq!(recording.frame_count(), 3);
    assert!(!recording.frame(2).unwrap().input("Jump").unwrap().button_state);
}

#[test]
fn test_seek_while_recording_truncates() {
    let mut recorder = recorder();
    recorder.record_new();
    for _ in 0..4 {
        recorder.tick(DT).unwrap();
    }
    recorder.set_playback_time(DT);
    assert_eq!(recorder.mode(), RecorderMode::Record);
    assert_eq!(recorder.recording().unwrap().frame_count(), 1);
    assert_eq!(recorder.tick(DT).unwrap(), TickEvent::Recorded { frame: 1 });
}

#[test]
fn test_record_new_discards_previous() {
    let mut recorder = recorder();
    recorder.load_recording(record_jumps(&[true, true]));
    recorder.record_new();
    assert!(recorder.recording().unwrap().is_empty());
    assert_eq!(recorder.playback_time(), 0.0);
}

#[test]
fn test_rewind_while_recording_stops_first() {
    let mut recorder = recorder();
    recorder.record_new();
    recorder.tick(DT).unwrap();
    recorder.tick(DT).unwrap();

    recorder.rewind_to_start();
    assert_eq!(recorder.mode(), RecorderMode::Passthrough);
    assert_eq!(recorder.playback_time(), 0.0);
    assert_eq!(recorder.recording().unwrap().frame_count(), 2);
}

#[test]
fn test_stop_keeps_recorded_data() {
    let mut recorder = recorder();
    recorder.record_new();
    recorder.tick(DT).unwrap();
    recorder.stop();
    assert_eq!(recorder.mode(), RecorderMode::Passthrough);
    assert_eq!(recorder.recording().unwrap().frame_count(), 1);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_tick_error_reverts_to_passthrough() {
    let mut recorder = recorder();
    recorder.record_new();
    recorder.tick(DT).unwrap();

    let result = recorder.tick(-DT);
    assert!(matches!(
        result,
        Err(RecordingError::OrderingViolation { .. })
    ));
    assert_eq!(recorder.mode(), RecorderMode::Passthrough);
    assert_eq!(recorder.recording().unwrap().frame_count(), 1);
}

#[test]
fn test_non_finite_live_axis_stops_recording() {
    let mut recorder = recorder();
    recorder.record_new();
    recorder.tick(DT).unwrap();

    recorder.input_mut().set_axis("Horizontal", f32::NAN);
    let result = recorder.tick(DT);
    assert!(matches!(result, Err(RecordingError::NonFiniteAxis { frame: 1, .. })));
    assert_eq!(recorder.mode(), RecorderMode::Passthrough);

    let text = recorder.recording().unwrap().to_json(false).unwrap();
    assert!(Recording::from_json(&text).is_ok());
}

#[test]
fn test_load_text_round_trip() {
    let text = record_jumps(&[false, true]).to_json(false).unwrap();
    let mut recorder = recorder();
    recorder.load_text(&text).unwrap();
    assert_eq!(recorder.mode(), RecorderMode::Passthrough);
    assert_eq!(recorder.recording().unwrap().frame_count(), 2);

    recorder.play();
    recorder.tick(DT).unwrap();
    recorder.tick(DT).unwrap();
    assert!(recorder.button_down("Jump"));
}

#[test]
fn test_load_text_failure_stays_passthrough() {
    let mut recorder = recorder();
    recorder.play_recording(record_jumps(&[true, true, true]), 0.0);
    recorder.tick(DT).unwrap();

    let result = recorder.load_text("{ not a recording");
    assert!(matches!(result, Err(RecordingError::MalformedPayload(_))));
    assert_eq!(recorder.mode(), RecorderMode::Passthrough);
    assert_eq!(recorder.recording().unwrap().frame_count(), 3);
}

// ============================================================================
// Shared recordings
// ============================================================================

#[test]
fn test_recording_copy_on_write() {
    let mut recorder = recorder();
    recorder.record_new();
    recorder.tick(DT).unwrap();

    let shared = recorder.shared_recording().unwrap();
    let snapshot = recorder.snapshot().unwrap();
    recorder.tick(DT).unwrap();

    assert_eq!(shared.frame_count(), 1);
    assert_eq!(snapshot.frame_count(), 1);
    assert_eq!(recorder.recording().unwrap().frame_count(), 2);
}

#[test]
fn test_two_players_share_one_recording() {
    let recording = Arc::new(record_jumps(&[false, true]));
    let mut first = recorder();
    let mut second = recorder();
    first.play_recording(Arc::clone(&recording), 0.0);
    second.play_recording(Arc::clone(&recording), DT);

    first.tick(DT).unwrap();
    second.tick(DT).unwrap();
    assert!(!first.button("Jump"));
    assert!(second.button("Jump"));
    assert!(Arc::ptr_eq(&first.shared_recording().unwrap(), &recording));
}
