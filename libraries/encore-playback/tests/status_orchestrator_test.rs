//! Status orchestrator behavior against recording collaborators


use encore_core::{NowPlayingSnapshot, PlaybackStatus};
use encore_playback::{
    ScrobblePhase, ServiceState, SessionPlayback, StatusConfig, StatusEvent, TransportAction,
    TransportCommand,
};
use mocks::{artwork, paused, playing, track, Harness, NotificationCall, SessionCall};

// ===== Idempotence and album changes =====

#[test]
fn repeated_playing_update_requests_artwork_once() {
    let harness = Harness::new();
    let mut status = harness.orchestrator(StatusConfig::default());
    let t1 = track(1, "A");

    status.update_status(&playing(&t1));
    status.update_status(&playing(&t1));

    assert_eq!(harness.requests(), vec!["A"]);
    assert_eq!(harness.shows(), vec![(1, PlaybackStatus::Playing)]);
    assert_eq!(harness.now_playing_events().len(), 2);
    assert_eq!(status.artwork_album(), Some("A"));
}

#[test]
fn only_album_changes_trigger_artwork_requests() {
    let harness = Harness::new();
    let mut status = harness.orchestrator(StatusConfig::default());

    status.update_status(&playing(&track(1, "A")));
    status.update_status(&playing(&track(2, "A")));
    status.update_status(&playing(&track(3, "B")));

    assert_eq!(harness.requests(), vec!["A", "B"]);
    assert_eq!(harness.shows().len(), 3);
}

#[test]
fn pause_updates_notification_without_refetching() {
    let harness = Harness::new();
    let mut status = harness.orchestrator(StatusConfig::default());
    let t1 = track(1, "A");
    harness.engine.set_position(30_000);

    status.update_status(&playing(&t1));
    status.update_status(&paused(&t1));

    assert_eq!(
        harness.shows(),
        vec![(1, PlaybackStatus::Playing), (1, PlaybackStatus::Paused)]
    );
    assert_eq!(harness.requests(), vec!["A"]);

    let playback = harness.last_playback().unwrap();
    assert_eq!(playback.status, PlaybackStatus::Paused);
    assert_eq!(playback.position_ms, 0);
}

#[test]
fn playing_publishes_engine_position_and_all_actions() {
    let harness = Harness::new();
    let mut status = harness.orchestrator(StatusConfig::default());
    harness.engine.set_position(42_000);

    status.update_status(&playing(&track(1, "A")));

    let playback = harness.last_playback().unwrap();
    assert_eq!(playback.status, PlaybackStatus::Playing);
    assert_eq!(playback.position_ms, 42_000);
    assert_eq!(playback.speed, 1.0);
    assert_eq!(playback.actions, TransportAction::ALL);

    let metadata = harness.last_metadata().unwrap();
    assert_eq!(metadata.title, "Track 1");
    assert_eq!(metadata.album_artist, "Artist A");
    assert_eq!(metadata.track_number, 1);
}

#[test]
fn zero_duration_is_filled_from_engine() {
    let harness = Harness::new();
    let mut status = harness.orchestrator(StatusConfig::default());
    harness.engine.set_duration(180_000);

    status.update_status(&playing(&track(1, "A").with_duration(0)));

    assert_eq!(harness.last_metadata().unwrap().duration_ms, 180_000);
    let broadcast = harness.now_playing_events().pop().unwrap();
    assert_eq!(broadcast.track.unwrap().duration_ms, 180_000);
}

#[test]
fn broadcast_carries_artwork_flags() {
    let harness = Harness::new();
    let mut status = harness.orchestrator(StatusConfig {
        hide_artwork: false,
        hide_on_lockscreen: true,
    });

    status.update_status(&playing(&track(1, "A")));

    let broadcast = harness.now_playing_events().pop().unwrap();
    assert!(!broadcast.hide_artwork);
    assert!(broadcast.hide_on_lockscreen);
}

// ===== Resuming and Stopped =====

#[test]
fn resuming_never_shows_notification() {
    let harness = Harness::new();
    let mut status = harness.orchestrator(StatusConfig::default());
    let t1 = track(1, "A");

    status.update_status(&NowPlayingSnapshot::new(
        Some(t1.clone()),
        PlaybackStatus::Resuming,
    ));

    assert!(harness.shows().is_empty());
    assert_eq!(harness.clears(), 1);
    assert_eq!(harness.last_metadata().unwrap().title, "Track 1");
    assert_eq!(harness.now_playing_events().len(), 1);
    assert!(harness.requests().is_empty());
}

#[test]
fn resuming_resets_artwork_tracking() {
    let harness = Harness::new();
    let mut status = harness.orchestrator(StatusConfig::default());
    let t1 = track(1, "A");

    status.update_status(&playing(&t1));
    status.update_status(&NowPlayingSnapshot::new(
        Some(t1.clone()),
        PlaybackStatus::Resuming,
    ));
    assert_eq!(status.artwork_album(), None);

    status.update_status(&playing(&t1));

    assert_eq!(harness.requests(), vec!["A", "A"]);
    // Notification memory was cleared, so the same track is shown again
    assert_eq!(harness.shows().len(), 2);
}

#[test]
fn stopped_tears_down_session() {
    let harness = Harness::new();
    let mut status = harness.orchestrator(StatusConfig::default());
    status.start();
    assert!(status.is_session_active());

    status.update_status(&playing(&track(1, "A")));
    status.update_status(&NowPlayingSnapshot::stopped());

    assert!(!status.is_session_active());
    assert_eq!(status.artwork_album(), None);
    assert_eq!(harness.last_playback().unwrap(), SessionPlayback::stopped());
    assert_eq!(
        harness.session_calls().last(),
        Some(&SessionCall::Active(false))
    );
    assert_eq!(harness.notification_calls().last(), Some(&NotificationCall::Clear));

    let broadcast = harness.now_playing_events().pop().unwrap();
    assert_eq!(broadcast.status, PlaybackStatus::Stopped);
    assert!(broadcast.track.is_none());
}

// ===== Artwork delivery =====

#[test]
fn stale_artwork_is_dropped() {
    let harness = Harness::new();
    let mut status = harness.orchestrator(StatusConfig::default());

    status.update_status(&playing(&track(1, "A")));
    status.update_status(&playing(&track(2, "B")));

    assert!(!status.artwork_delivered("A", Some(artwork("A"))));
    assert!(harness.images().is_empty());
    assert!(status.session_metadata().artwork.is_none());

    assert!(status.artwork_delivered("B", Some(artwork("B"))));
    assert_eq!(harness.images(), vec![Some("B".to_string())]);
    assert_eq!(
        harness.last_metadata().unwrap().artwork.map(|a| a.album_key),
        Some("B".to_string())
    );
}

#[test]
fn artwork_survives_track_change_within_album() {
    let harness = Harness::new();
    let mut status = harness.orchestrator(StatusConfig::default());

    status.update_status(&playing(&track(1, "A")));
    status.artwork_delivered("A", Some(artwork("A")));
    status.update_status(&playing(&track(2, "A")));

    let metadata = harness.last_metadata().unwrap();
    assert_eq!(metadata.title, "Track 2");
    assert!(metadata.artwork.is_some());
}

#[test]
fn missing_artwork_clears_notification_image() {
    let harness = Harness::new();
    let mut status = harness.orchestrator(StatusConfig::default());

    status.update_status(&playing(&track(1, "A")));

    assert!(status.artwork_delivered("A", None));
    assert_eq!(harness.images(), vec![None]);
}

#[test]
fn lockscreen_hiding_keeps_artwork_off_session_only() {
    let harness = Harness::new();
    let mut status = harness.orchestrator(StatusConfig {
        hide_artwork: false,
        hide_on_lockscreen: true,
    });

    status.update_status(&playing(&track(1, "A")));
    assert_eq!(harness.requests(), vec!["A"]);

    assert!(status.artwork_delivered("A", Some(artwork("A"))));
    assert_eq!(harness.images(), vec![Some("A".to_string())]);
    assert!(harness.last_metadata().unwrap().artwork.is_none());
}

#[test]
fn artwork_available_refetches_current_album_only() {
    let harness = Harness::new();
    let mut status = harness.orchestrator(StatusConfig::default());

    status.update_status(&playing(&track(1, "A")));
    status.artwork_available("B");
    assert_eq!(harness.requests(), vec!["A"]);

    status.artwork_available("A");
    assert_eq!(harness.requests(), vec!["A", "A"]);
}

// ===== Visibility settings =====

#[test]
fn hidden_artwork_is_never_requested_or_applied() {
    let harness = Harness::new();
    let mut status = harness.orchestrator(StatusConfig {
        hide_artwork: true,
        hide_on_lockscreen: false,
    });

    status.update_status(&playing(&track(1, "A")));
    status.artwork_available("A");

    assert!(harness.requests().is_empty());
    assert!(!status.artwork_delivered("A", Some(artwork("A"))));
    assert!(harness.images().is_empty());
    assert_eq!(
        harness.all_events().first(),
        Some(&StatusEvent::ArtworkVisibilityChanged { hidden: true })
    );
}

#[test]
fn toggling_hide_artwork_refreshes_from_engine() {
    let harness = Harness::new();
    let mut status = harness.orchestrator(StatusConfig::default());
    let t1 = track(1, "A");
    harness.engine.set_now_playing(playing(&t1));

    status.refresh();
    assert_eq!(harness.requests(), vec!["A"]);

    status.set_hide_artwork(true);
    assert!(status.config().hide_artwork);
    assert!(harness
        .notification_calls()
        .contains(&NotificationCall::HideArtwork(true)));
    assert!(harness
        .all_events()
        .contains(&StatusEvent::ArtworkVisibilityChanged { hidden: true }));
    assert_eq!(harness.shows().len(), 2);
    assert_eq!(harness.requests(), vec!["A"]);
    assert!(harness.now_playing_events().last().unwrap().hide_artwork);

    status.set_hide_artwork(false);
    assert_eq!(harness.requests(), vec!["A", "A"]);
}

#[test]
fn toggling_lockscreen_hiding_reapplies_metadata() {
    let harness = Harness::new();
    let mut status = harness.orchestrator(StatusConfig::default());
    let t1 = track(1, "A");
    harness.engine.set_now_playing(playing(&t1));

    status.refresh();
    status.artwork_delivered("A", Some(artwork("A")));
    assert!(harness.last_metadata().unwrap().artwork.is_some());

    status.set_hide_on_lockscreen(true);

    assert!(harness
        .notification_calls()
        .contains(&NotificationCall::HideOnLockscreen(true)));
    assert!(harness.last_metadata().unwrap().artwork.is_none());
    // Tracking was reset, so the album is looked up again
    assert_eq!(harness.requests(), vec!["A", "A"]);
}

// ===== Failures, commands and events =====

#[test]
fn session_failures_do_not_abort_update() {
    let harness = Harness::new();
    let mut status = harness.orchestrator_with_failing_session(StatusConfig::default());
    status.start();

    status.update_status(&playing(&track(1, "A")));

    assert!(harness.session_calls().is_empty());
    assert_eq!(harness.shows().len(), 1);
    assert_eq!(harness.now_playing_events().len(), 1);
    assert_eq!(harness.requests(), vec!["A"]);
}

#[test]
fn transport_commands_reach_engine() {
    let harness = Harness::new();
    let status = harness.orchestrator(StatusConfig::default());

    for command in [
        TransportCommand::Play,
        TransportCommand::Pause,
        TransportCommand::Next,
        TransportCommand::Previous,
        TransportCommand::Stop,
        TransportCommand::SeekTo(1_500),
    ] {
        status.handle_command(command);
    }

    assert_eq!(
        harness.engine.commands(),
        vec!["resume", "pause", "next", "previous", "stop", "seek:1500"]
    );
}

#[test]
fn scrobble_event_carries_track_fields() {
    let harness = Harness::new();
    let status = harness.orchestrator(StatusConfig::default());
    let t1 = track(1, "A").with_duration(215_500);

    status.scrobble(&t1, ScrobblePhase::Start);

    match harness.all_events().last() {
        Some(StatusEvent::Scrobble(event)) => {
            assert_eq!(event.phase, ScrobblePhase::Start);
            assert_eq!(event.artist, "Artist A");
            assert_eq!(event.album, "Album A");
            assert_eq!(event.title, "Track 1");
            assert_eq!(event.duration_secs, 215);
        }
        other => panic!("expected scrobble event, got {other:?}"),
    }
}

#[test]
fn service_state_is_broadcast() {
    let harness = Harness::new();
    let status = harness.orchestrator(StatusConfig::default());

    status.set_service_state(ServiceState::Busy);
    status.set_service_state(ServiceState::Idle);

    let events = harness.all_events();
    assert_eq!(
        &events[events.len() - 2..],
        &[StatusEvent::ServiceBusy, StatusEvent::ServiceIdle]
    );
}
