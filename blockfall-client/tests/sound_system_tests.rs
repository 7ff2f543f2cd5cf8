//! Sound system integration tests
//!
//! Exercises the public SoundSystem surface end to end: fixture WAVs on
//! disk, real decode, and the real output device where one exists. The
//! system is built to stay functional without a device, so every assertion
//! here reads playback state rather than listening to hardware.

mod helpers;

use std::path::{Path, PathBuf};

use blockfall_client::sfx::{ClipSpec, SoundSystem};
use helpers::fixtures;
use serial_test::serial;
use tempfile::TempDir;

/// Build a sounds directory with two good clips and one missing file
fn sounds_fixture() -> (TempDir, Vec<ClipSpec>) {
    let dir = tempfile::tempdir().expect("Failed to create sounds dir");
    fixtures::write_clip(&dir.path().join("move.wav")).expect("Failed to write move clip");
    fixtures::write_sine_wav(&dir.path().join("drop.wav"), 44100, 220.0, 0.1)
        .expect("Failed to write drop clip");
    let table = vec![
        ClipSpec::new("move", "move.wav"),
        ClipSpec::new("drop", "drop.wav"),
        ClipSpec::new("broken", "missing.wav"),
    ];
    (dir, table)
}

fn quiet_system(dir: &Path, table: Vec<ClipSpec>) -> SoundSystem {
    SoundSystem::with_clips(dir.to_path_buf(), table, None, 0.1)
}

/// The first play triggers loading; no explicit init call is required
#[test]
#[serial(audio)]
fn first_play_loads_clips_lazily() {
    let (dir, table) = sounds_fixture();
    let mut system = quiet_system(dir.path(), table);
    assert!(!system.is_ready());

    system.play("move");

    assert!(system.is_ready());
    assert_eq!(system.clip_count(), 2);
    assert_eq!(system.active_sounds(), vec!["move".to_string()]);
}

/// Names outside the clip table do nothing, before and after loading
#[test]
#[serial(audio)]
fn unknown_name_is_a_quiet_no_op() {
    let (dir, table) = sounds_fixture();
    let mut system = quiet_system(dir.path(), table);

    system.play("warp_speed");
    assert!(system.is_ready());
    assert!(system.active_sounds().is_empty());

    // The unknown name left the system fully usable
    system.play("move");
    assert_eq!(system.active_sounds(), vec!["move".to_string()]);
}

/// A system muted before anything loads still loads on the first play,
/// but starts nothing until unmuted
#[test]
#[serial(audio)]
fn muted_system_loads_but_stays_silent() {
    let (dir, table) = sounds_fixture();
    let mut system = quiet_system(dir.path(), table);

    system.set_enabled(false);
    system.play("move");
    assert!(system.is_ready());
    assert!(system.active_sounds().is_empty());

    system.set_enabled(true);
    system.play("move");
    assert_eq!(system.active_sounds(), vec!["move".to_string()]);
}

/// Re-triggering a sounding clip restarts it instead of layering a copy;
/// other clips mix alongside
#[test]
#[serial(audio)]
fn retrigger_restarts_instead_of_layering() {
    let (dir, table) = sounds_fixture();
    let mut system = quiet_system(dir.path(), table);

    system.play("move");
    system.play("move");
    assert_eq!(system.active_sounds(), vec!["move".to_string()]);

    system.play("drop");
    let mut active = system.active_sounds();
    active.sort();
    assert_eq!(active, vec!["drop".to_string(), "move".to_string()]);
}

/// A clip table pointing at nothing still yields a working system
#[test]
#[serial(audio)]
fn missing_sounds_directory_is_not_fatal() {
    let table = vec![ClipSpec::new("move", "move.wav")];
    let mut system = SoundSystem::with_clips(
        PathBuf::from("/nonexistent/blockfall-sounds"),
        table,
        None,
        0.1,
    );

    system.init();
    assert!(system.is_ready());
    assert_eq!(system.clip_count(), 0);

    // Triggering the unloadable clip warns but must not panic
    system.play("move");
    assert!(system.active_sounds().is_empty());
}

/// Stopping the output stream leaves playback state readable
#[test]
#[serial(audio)]
fn stop_leaves_state_intact() {
    let (dir, table) = sounds_fixture();
    let mut system = quiet_system(dir.path(), table);

    system.play("move");
    system.stop();

    assert!(system.is_ready());
    assert!(system.is_enabled());
    assert_eq!(system.clip_count(), 2);
}
