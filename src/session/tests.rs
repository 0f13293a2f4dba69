// SPDX-License-Identifier: MPL-2.0
use super::*;
use crate::chrome::{ChromePhase, ChromeVisibility};
use crate::directory_scanner::MediaList;
use crate::error::VideoError;
use crate::media::{AnimationData, ImageData, VideoSource};
use crate::test_utils::{assert_abs_diff_eq, touch_all};
use crate::topmost::fake::FakeWindow;
use crate::video_player::backend::fake::{Call, FakeBackend};
use crate::video_player::PlaybackState;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

/// Classifies by extension without reading anything. Animations get
/// `frames` frames; any file whose name contains "corrupt" fails to decode.
struct FakeLoader {
    frames: usize,
    loads: Vec<PathBuf>,
}

impl FakeLoader {
    fn new(frames: usize) -> Self {
        Self {
            frames,
            loads: Vec::new(),
        }
    }
}

impl MediaLoader for FakeLoader {
    fn load(&mut self, path: &Path) -> Result<LoadedMedia> {
        self.loads.push(path.to_path_buf());
        let name = path.file_name().unwrap().to_string_lossy();
        if name.contains("corrupt") {
            return Err(Error::MediaDecode(format!("corrupt file: {name}")));
        }
        let pixel = || ImageData::from_rgba(1, 1, vec![0, 0, 0, 255]);
        match crate::media::detect_media_kind(path) {
            Some(MediaKind::StillImage) => Ok(LoadedMedia::StillImage(pixel())),
            Some(MediaKind::AnimatedImage) => Ok(LoadedMedia::AnimatedImage(AnimationData::new(
                1,
                1,
                (0..self.frames).map(|_| pixel()).collect(),
            ))),
            Some(MediaKind::Video) => Ok(LoadedMedia::Video(VideoSource::new(path))),
            None => Err(Error::MediaDecode("unsupported".into())),
        }
    }
}

type TestSession = MediaSession<FakeLoader, FakeBackend, FakeWindow>;

struct Fixture {
    _dir: TempDir,
    paths: Vec<PathBuf>,
    session: TestSession,
    t0: Instant,
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn fixture_with(names: &[&str], frames: usize, settings: SessionSettings) -> Fixture {
    let dir = tempdir().expect("failed to create temp dir");
    let paths = touch_all(dir.path(), names);
    let t0 = Instant::now();
    let session = MediaSession::new(
        FakeLoader::new(frames),
        FakeBackend::new(),
        FakeWindow::default(),
        settings,
        t0,
    );
    Fixture {
        _dir: dir,
        paths,
        session,
        t0,
    }
}

/// Opens `names[start]` through the real directory scan.
fn opened_raw(names: &[&str], start: usize) -> Fixture {
    let mut fx = fixture_with(names, 4, SessionSettings::default());
    let path = fx.paths[start].clone();
    fx.session
        .dispatch(Command::OpenWithArgument(path), fx.t0)
        .expect("open should succeed");
    fx
}

/// Like [`opened_raw`], then pins the list to `names` order so cursor
/// positions are predictable regardless of the filesystem.
fn opened(names: &[&str], start: usize) -> Fixture {
    let mut fx = opened_raw(names, start);
    fx.session.navigator = MediaNavigator::from_list(MediaList::from_paths(
        fx.paths.clone(),
        Some(fx.paths[start].as_path()),
    ));
    fx
}

fn dispatch(fx: &mut Fixture, command: Command) {
    fx.session
        .dispatch(command, fx.t0)
        .expect("command should succeed");
}

#[test]
fn new_session_is_empty_with_chrome_shown() {
    let fx = fixture_with(&[], 4, SessionSettings::default());
    let snapshot = fx.session.snapshot();
    assert_eq!(snapshot.kind, None);
    assert_eq!(snapshot.playback, None);
    assert_eq!(snapshot.chrome, ChromeVisibility::Visible);
    assert!(!snapshot.can_go_next);
    assert!(!snapshot.can_go_previous);
    assert_eq!(
        fx.session.chrome().hide_deadline(),
        Some(fx.t0 + ms(1_500))
    );
}

#[test]
fn open_scans_directory_and_shows_argument() {
    let fx = opened_raw(&["a.jpg", "b.gif", "c.mp4", "notes.txt"], 1);
    let snapshot = fx.session.snapshot();

    assert_eq!(snapshot.media_count, 3);
    assert_eq!(snapshot.kind, Some(MediaKind::AnimatedImage));
    assert_eq!(snapshot.path.as_deref(), Some(fx.paths[1].as_path()));
    assert!(matches!(snapshot.display, Some(DisplayHandle::Image(_))));
    assert!(snapshot.playback.as_ref().is_some_and(|p| p.is_playing()));
}

#[test]
fn clamped_scenario_over_image_animation_and_video() {
    let mut fx = opened(&["a.jpg", "b.gif", "c.mp4"], 1);
    let t = fx.t0;

    fx.session.dispatch(Command::NavigateNext, t).unwrap();
    let snapshot = fx.session.snapshot();
    assert_eq!(snapshot.cursor, Some(2));
    assert_eq!(snapshot.kind, Some(MediaKind::Video));
    assert!(snapshot.playback.as_ref().is_some_and(|p| p.is_playing()));

    let loads_before = fx.session.loader.loads.len();
    let playback_before = fx.session.snapshot().playback;
    fx.session.dispatch(Command::NavigateNext, t).unwrap();
    assert_eq!(fx.session.snapshot().cursor, Some(2));
    assert_eq!(fx.session.loader.loads.len(), loads_before);
    assert_eq!(fx.session.snapshot().playback, playback_before);

    fx.session.dispatch(Command::NavigatePrevious, t).unwrap();
    fx.session.dispatch(Command::NavigatePrevious, t).unwrap();
    let snapshot = fx.session.snapshot();
    assert_eq!(snapshot.cursor, Some(0));
    assert_eq!(snapshot.kind, Some(MediaKind::StillImage));
    assert_eq!(snapshot.playback, None);
    assert!(!snapshot.can_go_previous);
    assert!(snapshot.can_go_next);
}

#[test]
fn previous_at_first_changes_nothing() {
    let mut fx = opened(&["a.jpg", "b.jpg"], 0);
    let before = fx.session.snapshot();
    let loads = fx.session.loader.loads.len();

    fx.session.dispatch(Command::NavigatePrevious, fx.t0).unwrap();

    assert_eq!(fx.session.snapshot(), before);
    assert_eq!(fx.session.loader.loads.len(), loads);
}

#[test]
fn next_then_previous_reloads_same_path() {
    let mut fx = opened(&["a.jpg", "b.jpg", "c.jpg"], 1);
    let middle = fx.paths[1].clone();

    dispatch(&mut fx, Command::NavigateNext);
    dispatch(&mut fx, Command::NavigatePrevious);

    assert_eq!(fx.session.navigator().current_index(), Some(1));
    assert_eq!(fx.session.current_path(), Some(middle.as_path()));
    assert_eq!(fx.session.loader.loads.last(), Some(&middle));
}

#[test]
fn animation_advances_once_per_interval() {
    let mut fx = opened(&["spin.gif"], 0);
    for k in 1..=9u64 {
        fx.session.advance(fx.t0 + ms(100 * k));
        let position = fx.session.animation_player().unwrap().position();
        assert_eq!(position, (k as usize) % 4);
    }
}

#[test]
fn zero_frame_animation_never_advances() {
    let mut fx = fixture_with(&["empty.gif"], 0, SessionSettings::default());
    let path = fx.paths[0].clone();
    fx.session
        .dispatch(Command::OpenWithArgument(path), fx.t0)
        .unwrap();

    fx.session.advance(fx.t0 + ms(1_000));

    assert_eq!(fx.session.animation_player().unwrap().position(), 0);
    assert!(fx.session.snapshot().display.is_none());
}

#[test]
fn frame_interval_change_restarts_timer_and_keeps_frame() {
    let mut fx = opened(&["spin.gif"], 0);
    fx.session.advance(fx.t0 + ms(200));
    assert_eq!(fx.session.animation_player().unwrap().position(), 2);

    let now = fx.t0 + ms(250);
    fx.session.dispatch(Command::SetFrameInterval(50), now).unwrap();
    assert_eq!(fx.session.animation_player().unwrap().position(), 2);
    assert_eq!(
        fx.session.timers().deadline(TimerKind::FrameAdvance),
        Some(now + ms(50))
    );

    fx.session.advance(now + ms(50));
    assert_eq!(fx.session.animation_player().unwrap().position(), 3);
}

#[test]
fn frame_interval_is_remembered_for_next_animation() {
    let mut fx = opened(&["a.gif", "b.gif"], 0);
    dispatch(&mut fx, Command::SetFrameInterval(60));
    dispatch(&mut fx, Command::NavigateNext);

    assert_eq!(fx.session.animation_player().unwrap().interval().millis(), 60);
}

#[test]
fn video_autoplays_and_learns_duration_later() {
    let mut fx = opened(&["clip.mp4"], 0);
    let player = fx.session.video_player().unwrap();
    assert!(player.is_playing());
    assert_abs_diff_eq!(player.duration_secs(), 0.0);

    let source = player.source();
    let disposition = fx.session.handle_backend_event(BackendEvent::MediaOpened {
        source,
        duration_secs: 30.0,
        width: 1280,
        height: 720,
    });

    assert_eq!(disposition, SignalDisposition::Applied);
    assert_abs_diff_eq!(fx.session.video_player().unwrap().duration_secs(), 30.0);
}

#[test]
fn toggle_pair_never_seeks() {
    let mut fx = opened(&["clip.mp4"], 0);
    let source = fx.session.video_player().unwrap().source();
    fx.session.handle_backend_event(BackendEvent::MediaOpened {
        source,
        duration_secs: 30.0,
        width: 1280,
        height: 720,
    });
    fx.session.backend_mut().position = 12.0;
    fx.session.advance(fx.t0 + ms(1_000));

    fx.session.dispatch(Command::TogglePlayPause, fx.t0).unwrap();
    fx.session.dispatch(Command::TogglePlayPause, fx.t0).unwrap();

    let player = fx.session.video_player().unwrap();
    assert!(player.is_playing());
    assert_abs_diff_eq!(player.position_secs(), 12.0);
    assert!(!fx
        .session
        .backend()
        .calls
        .iter()
        .any(|call| matches!(call, Call::SetPosition(_))));
}

#[test]
fn looping_video_restarts_on_sync_tick() {
    let mut fx = opened(&["clip.mp4"], 0);
    let source = fx.session.video_player().unwrap().source();
    fx.session.handle_backend_event(BackendEvent::MediaOpened {
        source,
        duration_secs: 8.0,
        width: 1280,
        height: 720,
    });
    fx.session.backend_mut().position = 8.0;

    fx.session.advance(fx.t0 + ms(1_000));

    let player = fx.session.video_player().unwrap();
    assert!(player.is_playing());
    assert_abs_diff_eq!(player.position_secs(), 0.0, epsilon = 0.05);
}

#[test]
fn media_ended_without_loop_stops_and_play_restarts() {
    let mut fx = opened(&["clip.mp4"], 0);
    fx.session.dispatch(Command::SetLoop(false), fx.t0).unwrap();
    let source = fx.session.video_player().unwrap().source();
    fx.session.handle_backend_event(BackendEvent::MediaOpened {
        source,
        duration_secs: 8.0,
        width: 1280,
        height: 720,
    });

    fx.session
        .handle_backend_event(BackendEvent::MediaEnded { source });
    assert_eq!(
        fx.session.video_player().unwrap().state(),
        PlaybackState::Ended
    );

    fx.session.dispatch(Command::TogglePlayPause, fx.t0).unwrap();
    let player = fx.session.video_player().unwrap();
    assert!(player.is_playing());
    assert_abs_diff_eq!(player.position_secs(), 0.0);
}

#[test]
fn scrub_suppresses_sync_and_resumes_on_release() {
    let mut fx = opened(&["clip.mp4"], 0);
    let source = fx.session.video_player().unwrap().source();
    fx.session.handle_backend_event(BackendEvent::MediaOpened {
        source,
        duration_secs: 60.0,
        width: 1280,
        height: 720,
    });

    fx.session.dispatch(Command::BeginScrub, fx.t0).unwrap();
    fx.session.dispatch(Command::ScrubTo(20.0), fx.t0).unwrap();
    fx.session.backend_mut().position = 45.0;
    fx.session.advance(fx.t0 + ms(1_000));

    let player = fx.session.video_player().unwrap();
    assert_eq!(player.state(), PlaybackState::Paused);
    assert_abs_diff_eq!(player.position_secs(), 20.0);

    fx.session.dispatch(Command::EndScrub, fx.t0).unwrap();
    assert!(fx.session.video_player().unwrap().is_playing());
}

#[test]
fn speed_applies_immediately_and_persists() {
    let mut fx = opened(&["a.mp4", "b.mp4"], 0);
    dispatch(&mut fx, Command::SetSpeed(1.6));
    assert_abs_diff_eq!(fx.session.backend().rate, 1.5);
    assert!(fx.session.video_player().unwrap().is_playing());

    dispatch(&mut fx, Command::NavigateNext);
    assert_abs_diff_eq!(fx.session.video_player().unwrap().speed().value(), 1.5);
    assert_abs_diff_eq!(fx.session.backend().rate, 1.5);
}

#[test]
fn stale_signal_from_superseded_load_is_ignored() {
    let mut fx = opened(&["a.mp4", "b.mp4"], 0);
    let first = fx.session.video_player().unwrap().source();
    dispatch(&mut fx, Command::NavigateNext);
    let second = fx.session.video_player().unwrap().source();
    assert_ne!(first, second);
    assert_eq!(fx.session.backend().last_open(), Some(second));
    assert!(fx.session.backend().count(&Call::Close) >= 1);

    let disposition = fx.session.handle_backend_event(BackendEvent::MediaOpened {
        source: first,
        duration_secs: 99.0,
        width: 1280,
        height: 720,
    });

    assert_eq!(disposition, SignalDisposition::StaleIgnored);
    assert_abs_diff_eq!(fx.session.video_player().unwrap().duration_secs(), 0.0);
}

#[test]
fn signals_without_video_are_stale() {
    let mut fx = opened(&["a.jpg"], 0);
    let disposition = fx.session.handle_backend_event(BackendEvent::MediaEnded {
        source: SourceId::new(1),
    });
    assert_eq!(disposition, SignalDisposition::StaleIgnored);
}

#[test]
fn backend_open_failure_reverts_to_no_media() {
    let mut fx = opened(&["a.jpg", "clip.mp4"], 0);
    fx.session.backend_mut().fail_open = true;

    let result = fx.session.dispatch(Command::NavigateNext, fx.t0);

    assert!(matches!(result, Err(Error::Video(_))));
    let snapshot = fx.session.snapshot();
    assert_eq!(snapshot.kind, None);
    assert_eq!(snapshot.playback, None);
    assert_eq!(snapshot.cursor, Some(1));
    assert!(snapshot.last_error.is_some());
    assert!(!fx.session.timers().is_scheduled(TimerKind::PositionSync));
}

#[test]
fn async_open_failure_reverts_to_no_media() {
    let mut fx = opened(&["clip.mp4"], 0);
    let source = fx.session.video_player().unwrap().source();

    let disposition = fx.session.handle_backend_event(BackendEvent::OpenFailed {
        source,
        error: VideoError::CorruptedFile,
    });

    assert_eq!(disposition, SignalDisposition::Applied);
    let snapshot = fx.session.snapshot();
    assert_eq!(snapshot.kind, None);
    let failure = snapshot.last_error.expect("failure should be recorded");
    assert_eq!(failure.reason, Error::Video(VideoError::CorruptedFile));
    assert_eq!(failure.path, fx.paths[0]);
}

#[test]
fn decode_failure_keeps_session_navigable() {
    let mut fx = opened(&["a.jpg", "corrupt.png", "c.jpg"], 0);

    let result = fx.session.dispatch(Command::NavigateNext, fx.t0);
    assert!(matches!(result, Err(Error::MediaDecode(_))));

    let snapshot = fx.session.snapshot();
    assert_eq!(snapshot.kind, None);
    assert_eq!(snapshot.cursor, Some(1));
    assert!(matches!(
        snapshot.last_error,
        Some(LoadFailure {
            reason: Error::MediaDecode(_),
            ..
        })
    ));
    assert!(snapshot.can_go_next);

    dispatch(&mut fx, Command::NavigateNext);
    let snapshot = fx.session.snapshot();
    assert_eq!(snapshot.kind, Some(MediaKind::StillImage));
    assert!(snapshot.last_error.is_none());
}

#[test]
fn navigating_away_from_animation_stops_its_timer() {
    let mut fx = opened(&["a.jpg", "b.gif"], 0);
    dispatch(&mut fx, Command::NavigateNext);
    assert!(fx.session.timers().is_scheduled(TimerKind::FrameAdvance));

    dispatch(&mut fx, Command::NavigatePrevious);
    assert!(!fx.session.timers().is_scheduled(TimerKind::FrameAdvance));
    assert!(fx.session.animation_player().is_none());
}

#[test]
fn video_controls_are_ignored_for_images() {
    let mut fx = opened(&["a.jpg"], 0);
    let before = fx.session.snapshot();
    for command in [
        Command::TogglePlayPause,
        Command::SeekTo(3.0),
        Command::BeginScrub,
        Command::ScrubTo(1.0),
        Command::EndScrub,
    ] {
        fx.session.dispatch(command, fx.t0).unwrap();
    }
    assert_eq!(fx.session.snapshot(), before);
    assert!(fx.session.backend().calls.is_empty());
}

#[test]
fn chrome_hides_after_initial_delay_and_returns_on_activity() {
    let mut fx = fixture_with(&[], 4, SessionSettings::default());
    let t0 = fx.t0;

    fx.session.advance(t0 + ms(1_000));
    assert_eq!(fx.session.snapshot().chrome_phase, ChromePhase::VisiblePendingHide);

    fx.session.advance(t0 + ms(1_500));
    assert_eq!(fx.session.snapshot().chrome, ChromeVisibility::Hidden);

    fx.session.dispatch(Command::ActivityPing, t0 + ms(3_000)).unwrap();
    assert_eq!(fx.session.snapshot().chrome_phase, ChromePhase::VisibleActive);
    assert_eq!(
        fx.session.timers().deadline(TimerKind::ChromeHide),
        Some(t0 + ms(5_000))
    );
}

#[test]
fn activity_during_pending_hide_restarts_two_second_countdown() {
    let mut fx = fixture_with(&[], 4, SessionSettings::default());
    let t0 = fx.t0;
    fx.session.advance(t0 + ms(1_000));
    assert_eq!(fx.session.snapshot().chrome_phase, ChromePhase::VisiblePendingHide);

    let ping = t0 + ms(1_400);
    fx.session.dispatch(Command::ActivityPing, ping).unwrap();
    assert_eq!(fx.session.snapshot().chrome_phase, ChromePhase::VisibleActive);

    fx.session.advance(ping + ms(1_999));
    assert_eq!(fx.session.snapshot().chrome, ChromeVisibility::Visible);
    fx.session.advance(ping + ms(2_000));
    assert_eq!(fx.session.snapshot().chrome, ChromeVisibility::Hidden);
}

#[test]
fn resize_drag_keeps_chrome_visible() {
    let mut fx = fixture_with(&[], 4, SessionSettings::default());
    let t0 = fx.t0;
    fx.session.dispatch(Command::BeginResize, t0 + ms(100)).unwrap();
    assert!(!fx.session.timers().is_scheduled(TimerKind::ChromeHide));

    fx.session.advance(t0 + ms(20_000));
    assert_eq!(fx.session.snapshot().chrome, ChromeVisibility::Visible);

    fx.session.dispatch(Command::EndResize, t0 + ms(20_000)).unwrap();
    fx.session.advance(t0 + ms(22_000));
    assert_eq!(fx.session.snapshot().chrome, ChromeVisibility::Hidden);
}

#[test]
fn topmost_drift_is_repaired_within_one_tick() {
    let mut fx = fixture_with(&[], 4, SessionSettings::default());
    fx.session
        .dispatch(Command::SetTopmostIntent(true), fx.t0)
        .unwrap();
    assert_eq!(fx.session.window().set_calls, vec![false, true]);

    fx.session.window_mut().os_drops_topmost();
    assert!(fx.session.snapshot().topmost.has_drift());

    fx.session.advance(fx.t0 + ms(1_000));

    let topmost = fx.session.snapshot().topmost;
    assert!(topmost.intent && topmost.actual);
    assert_eq!(fx.session.topmost().repairs(), 1);
}

#[test]
fn deactivation_drops_topmost_until_reactivated() {
    let settings = SessionSettings {
        topmost: true,
        ..SessionSettings::default()
    };
    let mut fx = fixture_with(&[], 4, settings);
    assert!(fx.session.window().actual);

    fx.session.dispatch(Command::WindowDeactivated, fx.t0).unwrap();
    assert!(!fx.session.window().actual);
    assert!(fx.session.topmost().intent());

    fx.session.dispatch(Command::WindowActivated, fx.t0).unwrap();
    assert!(fx.session.window().actual);
}

#[test]
fn settings_from_config_snap_and_clamp() {
    let config = Config {
        topmost: Some(true),
        loop_video: None,
        frame_interval_ms: Some(57),
        playback_speed: Some(9.0),
        chrome_hide_delay_ms: Some(5),
        chrome_initial_delay_ms: Some(1_000_000),
    };
    let settings = SessionSettings::from_config(&config);

    assert!(settings.topmost);
    assert!(settings.loop_video);
    assert_eq!(settings.frame_interval.millis(), 60);
    assert_abs_diff_eq!(settings.playback_speed.value(), 2.0);
    assert_eq!(settings.chrome_hide_delay, ms(MIN_CHROME_DELAY_MS));
    assert_eq!(settings.chrome_initial_delay, ms(MAX_CHROME_DELAY_MS));
}

#[test]
fn shutdown_releases_video_and_timers() {
    let mut fx = opened(&["clip.mp4"], 0);
    fx.session.shutdown();
    assert_eq!(fx.session.next_deadline(), None);
    assert_eq!(fx.session.backend().calls.last(), Some(&Call::Close));
    assert_eq!(fx.session.current_kind(), None);
}

#[test]
fn media_info_describes_current_file() {
    let fx = opened(&["a.jpg"], 0);
    let info = fx.session.media_info().expect("a file is displayed");
    assert_eq!(info.file_name, "a.jpg");
    assert_eq!(info.dimensions, Some((1, 1)));
    assert_eq!(info.size_bytes, Some(0));
}

#[test]
fn fitted_window_follows_image_aspect() {
    let fx = opened(&["a.jpg"], 0);
    let size = fx
        .session
        .fitted_window_size(400.0, 1920.0)
        .expect("images have dimensions");
    // The fake decodes a 1x1 image
    assert_abs_diff_eq!(size.width, 400.0);
    assert_abs_diff_eq!(size.height, 400.0);
}

#[test]
fn fitted_window_follows_video_aspect_once_opened() {
    let mut fx = opened(&["clip.mp4"], 0);
    assert!(fx.session.fitted_window_size(400.0, 1920.0).is_none());

    let source = fx.session.video_player().unwrap().source();
    fx.session.handle_backend_event(BackendEvent::MediaOpened {
        source,
        duration_secs: 5.0,
        width: 1920,
        height: 1080,
    });

    let size = fx
        .session
        .fitted_window_size(400.0, 1920.0)
        .expect("opened video has a frame size");
    assert_abs_diff_eq!(size.width, 400.0 * 16.0 / 9.0, epsilon = 1e-6);
    assert_abs_diff_eq!(size.height, 400.0);
    assert_eq!(
        fx.session.media_info().and_then(|info| info.dimensions),
        Some((1920, 1080))
    );
}
