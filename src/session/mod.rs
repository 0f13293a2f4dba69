// SPDX-License-Identifier: MPL-2.0
//! The media session controller.
//!
//! [`MediaSession`] owns everything that changes while the viewer runs: the
//! navigation cursor, the loaded media and its playback state, the chrome
//! auto-hide machine, the topmost intent and every timer. The shell feeds it
//! three kinds of input, always on one thread:
//!
//! - [`Command`]s through [`MediaSession::dispatch`]
//! - backend signals through [`MediaSession::handle_backend_event`]
//! - the passage of time through [`MediaSession::advance`], called when
//!   [`MediaSession::next_deadline`] is reached
//!
//! and reads back a [`SessionSnapshot`] after each of them.

mod command;
mod snapshot;

pub use command::Command;
pub use snapshot::{
    DisplayHandle, LoadFailure, PlaybackSnapshot, SessionSnapshot, TopmostSnapshot,
};

use crate::animation::{AnimationPlayer, FrameInterval};
use crate::chrome::ChromeController;
use crate::config::{
    Config, DEFAULT_CHROME_HIDE_DELAY_MS, DEFAULT_CHROME_INITIAL_DELAY_MS, DEFAULT_LOOP_VIDEO,
    DEFAULT_TOPMOST, MAX_CHROME_DELAY_MS, MIN_CHROME_DELAY_MS, POSITION_SYNC_PERIOD_MS,
    TOPMOST_RECONCILE_PERIOD_MS,
};
use crate::error::{Error, Result};
use crate::media::{LoadedMedia, MediaInfo, MediaKind, MediaLoader};
use crate::navigation::MediaNavigator;
use crate::timer::{TimerKind, Timers};
use crate::topmost::{TopmostEnforcer, TopmostWindow};
use crate::video_player::{BackendEvent, PlaybackSpeed, SourceId, VideoBackend, VideoPlayer};
use crate::window_fit::{clamp_to_min, fit_to_aspect, WindowSize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Validated startup settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    pub topmost: bool,
    pub loop_video: bool,
    pub frame_interval: FrameInterval,
    pub playback_speed: PlaybackSpeed,
    pub chrome_hide_delay: Duration,
    pub chrome_initial_delay: Duration,
}

impl SessionSettings {
    /// Fills gaps with defaults and snaps values to what the session supports.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let defaults = Self::default();
        Self {
            topmost: config.topmost.unwrap_or(defaults.topmost),
            loop_video: config.loop_video.unwrap_or(defaults.loop_video),
            frame_interval: config
                .frame_interval_ms
                .map_or(defaults.frame_interval, FrameInterval::new),
            playback_speed: config
                .playback_speed
                .map_or(defaults.playback_speed, PlaybackSpeed::new),
            chrome_hide_delay: config
                .chrome_hide_delay_ms
                .map_or(defaults.chrome_hide_delay, chrome_delay),
            chrome_initial_delay: config
                .chrome_initial_delay_ms
                .map_or(defaults.chrome_initial_delay, chrome_delay),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            topmost: DEFAULT_TOPMOST,
            loop_video: DEFAULT_LOOP_VIDEO,
            frame_interval: FrameInterval::default(),
            playback_speed: PlaybackSpeed::default(),
            chrome_hide_delay: Duration::from_millis(DEFAULT_CHROME_HIDE_DELAY_MS),
            chrome_initial_delay: Duration::from_millis(DEFAULT_CHROME_INITIAL_DELAY_MS),
        }
    }
}

fn chrome_delay(millis: u64) -> Duration {
    Duration::from_millis(millis.clamp(MIN_CHROME_DELAY_MS, MAX_CHROME_DELAY_MS))
}

/// Playback choices that outlive a single load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preferences {
    pub speed: PlaybackSpeed,
    pub loop_video: bool,
    pub frame_interval: FrameInterval,
}

/// Outcome of a backend signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalDisposition {
    Applied,
    /// The signal belongs to a load that has since been replaced.
    StaleIgnored,
}

#[derive(Debug)]
enum Playback {
    Animation(AnimationPlayer),
    Video(VideoPlayer),
}

#[derive(Debug)]
struct CurrentMedia {
    path: PathBuf,
    media: LoadedMedia,
    /// `None` for still images.
    playback: Option<Playback>,
}

/// The media session controller.
pub struct MediaSession<L, B, W> {
    loader: L,
    backend: B,
    window: W,
    preferences: Preferences,
    navigator: MediaNavigator,
    current: Option<CurrentMedia>,
    chrome: ChromeController,
    topmost: TopmostEnforcer,
    timers: Timers,
    next_source: SourceId,
    last_error: Option<LoadFailure>,
}

impl<L, B, W> MediaSession<L, B, W>
where
    L: MediaLoader,
    B: VideoBackend,
    W: TopmostWindow,
{
    /// Starts an empty session: chrome shown briefly, topmost intent applied.
    pub fn new(
        loader: L,
        backend: B,
        mut window: W,
        settings: SessionSettings,
        now: Instant,
    ) -> Self {
        let topmost = TopmostEnforcer::new(settings.topmost);
        topmost.apply(&mut window);

        let chrome = ChromeController::new(
            now,
            settings.chrome_initial_delay,
            settings.chrome_hide_delay,
        );

        let mut timers = Timers::new();
        timers.schedule_repeating(
            TimerKind::TopmostReconcile,
            Duration::from_millis(TOPMOST_RECONCILE_PERIOD_MS),
            now,
        );

        let mut session = Self {
            loader,
            backend,
            window,
            preferences: Preferences {
                speed: settings.playback_speed,
                loop_video: settings.loop_video,
                frame_interval: settings.frame_interval,
            },
            navigator: MediaNavigator::new(),
            current: None,
            chrome,
            topmost,
            timers,
            next_source: SourceId::new(1),
            last_error: None,
        };
        session.sync_chrome_timer();
        session
    }

    /// Applies one command.
    ///
    /// # Errors
    ///
    /// Returns the load error when a command loads media that cannot be
    /// displayed. The session is still consistent: nothing is shown and the
    /// failure is kept in the snapshot.
    pub fn dispatch(&mut self, command: Command, now: Instant) -> Result<()> {
        match command {
            Command::OpenWithArgument(path) => return self.open(&path, now),
            Command::NavigateNext => {
                if let Some(path) = self.navigator.navigate_next() {
                    return self.load(path, now);
                }
            }
            Command::NavigatePrevious => {
                if let Some(path) = self.navigator.navigate_previous() {
                    return self.load(path, now);
                }
            }
            Command::TogglePlayPause => {
                if let Some(player) = video_player_mut(&mut self.current) {
                    player.toggle_play_pause(&mut self.backend);
                }
            }
            Command::SeekTo(secs) => {
                if let Some(player) = video_player_mut(&mut self.current) {
                    player.seek_to(&mut self.backend, secs);
                }
            }
            Command::BeginScrub => {
                if let Some(player) = video_player_mut(&mut self.current) {
                    player.begin_scrub(&mut self.backend);
                }
            }
            Command::ScrubTo(secs) => {
                if let Some(player) = video_player_mut(&mut self.current) {
                    player.scrub_to(&mut self.backend, secs);
                }
            }
            Command::EndScrub => {
                if let Some(player) = video_player_mut(&mut self.current) {
                    player.end_scrub(&mut self.backend);
                }
            }
            Command::SetSpeed(multiplier) => {
                let speed = PlaybackSpeed::new(multiplier);
                self.preferences.speed = speed;
                if let Some(player) = video_player_mut(&mut self.current) {
                    player.set_speed(&mut self.backend, speed);
                }
            }
            Command::SetLoop(enabled) => {
                self.preferences.loop_video = enabled;
                if let Some(player) = video_player_mut(&mut self.current) {
                    player.set_loop(enabled);
                }
            }
            Command::SetFrameInterval(millis) => self.set_frame_interval(millis, now),
            Command::ActivityPing => {
                self.chrome.activity(now);
                self.sync_chrome_timer();
            }
            Command::BeginResize => {
                self.chrome.begin_resize(now);
                self.sync_chrome_timer();
            }
            Command::EndResize => {
                self.chrome.end_resize(now);
                self.sync_chrome_timer();
            }
            Command::SetTopmostIntent(intent) => {
                self.topmost.set_intent(&mut self.window, intent);
            }
            Command::WindowActivated => self.topmost.window_activated(&mut self.window),
            Command::WindowDeactivated => self.topmost.window_deactivated(&mut self.window),
        }
        Ok(())
    }

    /// Runs every timer due at `now`, in the order they fell due.
    pub fn advance(&mut self, now: Instant) {
        for kind in self.timers.pop_due(now) {
            match kind {
                TimerKind::FrameAdvance => {
                    if let Some(Playback::Animation(player)) = playback_mut(&mut self.current) {
                        player.tick();
                    }
                }
                TimerKind::PositionSync => {
                    if let Some(player) = video_player_mut(&mut self.current) {
                        player.sync_tick(&mut self.backend);
                    }
                }
                TimerKind::ChromeHide => {}
                TimerKind::TopmostReconcile => {
                    self.topmost.reconcile(&mut self.window);
                }
            }
        }
        self.chrome.poll(now);
        self.sync_chrome_timer();
    }

    /// Applies a backend signal if it belongs to the video on screen.
    pub fn handle_backend_event(&mut self, event: BackendEvent) -> SignalDisposition {
        let source = event.source();
        let is_current = video_player_mut(&mut self.current)
            .is_some_and(|player| player.source() == source);
        if !is_current {
            tracing::debug!(source = source.raw(), "ignoring stale signal");
            return SignalDisposition::StaleIgnored;
        }

        match event {
            BackendEvent::MediaOpened {
                duration_secs,
                width,
                height,
                ..
            } => {
                if let Some(player) = video_player_mut(&mut self.current) {
                    player.media_opened(duration_secs, width, height);
                }
            }
            BackendEvent::MediaEnded { .. } => {
                if let Some(player) = video_player_mut(&mut self.current) {
                    player.reached_end(&mut self.backend);
                }
            }
            BackendEvent::OpenFailed { error, .. } => {
                let path = self.current.as_ref().map(|c| c.path.clone()).unwrap_or_default();
                tracing::warn!("Failed to open {}: {}", path.display(), error);
                self.teardown();
                self.last_error = Some(LoadFailure {
                    path,
                    reason: Error::Video(error),
                });
            }
        }
        SignalDisposition::Applied
    }

    /// Earliest instant at which [`advance`](Self::advance) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Releases the displayed media and stops every timer.
    pub fn shutdown(&mut self) {
        self.teardown();
        self.timers.clear();
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let display = self.current.as_ref().and_then(|current| match (&current.media, &current.playback) {
            (LoadedMedia::StillImage(image), _) => Some(DisplayHandle::Image(image.clone())),
            (LoadedMedia::AnimatedImage(anim), Some(Playback::Animation(player))) => anim
                .frame(player.position())
                .cloned()
                .map(DisplayHandle::Image),
            (LoadedMedia::Video(video), Some(Playback::Video(player))) => Some(DisplayHandle::Video {
                video: video.clone(),
                source: player.source(),
            }),
            _ => None,
        });

        let playback = self
            .current
            .as_ref()
            .and_then(|current| current.playback.as_ref())
            .map(|playback| match playback {
                Playback::Animation(player) => PlaybackSnapshot::Animation {
                    is_playing: true,
                    position: player.position(),
                    frame_count: player.frame_count(),
                    frame_interval_ms: player.interval().millis(),
                },
                Playback::Video(player) => PlaybackSnapshot::Video {
                    state: player.state(),
                    is_playing: player.is_playing(),
                    position_secs: player.position_secs(),
                    duration_secs: player.duration_secs(),
                    speed: player.speed().value(),
                    is_looping: player.loop_enabled(),
                    is_scrubbing: player.is_scrubbing(),
                },
            });

        SessionSnapshot {
            path: self.current.as_ref().map(|c| c.path.clone()),
            kind: self.current_kind(),
            display,
            playback,
            chrome: self.chrome.visibility(),
            chrome_phase: self.chrome.phase(),
            cursor: self.navigator.current_index(),
            media_count: self.navigator.len(),
            can_go_previous: self.navigator.can_go_previous(),
            can_go_next: self.navigator.can_go_next(),
            topmost: TopmostSnapshot {
                intent: self.topmost.intent(),
                actual: self.window.is_topmost(),
            },
            last_error: self.last_error.clone(),
        }
    }

    /// File facts for the displayed media.
    #[must_use]
    pub fn media_info(&self) -> Option<MediaInfo> {
        self.current
            .as_ref()
            .map(|current| MediaInfo::collect(&current.path, self.media_dimensions()))
    }

    /// Pixel size of the displayed media. Videos report theirs once the
    /// backend has opened them.
    #[must_use]
    pub fn media_dimensions(&self) -> Option<(u32, u32)> {
        self.loaded_media()?
            .dimensions()
            .or_else(|| self.video_player()?.dimensions())
    }

    /// Window size matching the aspect ratio of the displayed media.
    ///
    /// `None` while nothing is displayed, and for a video until the backend
    /// has reported its frame size.
    #[must_use]
    pub fn fitted_window_size(&self, current_height: f64, screen_width: f64) -> Option<WindowSize> {
        let (width, height) = self.media_dimensions()?;
        fit_to_aspect(current_height, width, height, screen_width).map(clamp_to_min)
    }

    #[must_use]
    pub fn current_kind(&self) -> Option<MediaKind> {
        self.current.as_ref().map(|current| current.media.kind())
    }

    #[must_use]
    pub fn current_path(&self) -> Option<&Path> {
        self.current.as_ref().map(|current| current.path.as_path())
    }

    #[must_use]
    pub fn loaded_media(&self) -> Option<&LoadedMedia> {
        self.current.as_ref().map(|current| &current.media)
    }

    #[must_use]
    pub fn video_player(&self) -> Option<&VideoPlayer> {
        match self.current.as_ref()?.playback.as_ref()? {
            Playback::Video(player) => Some(player),
            Playback::Animation(_) => None,
        }
    }

    #[must_use]
    pub fn animation_player(&self) -> Option<&AnimationPlayer> {
        match self.current.as_ref()?.playback.as_ref()? {
            Playback::Animation(player) => Some(player),
            Playback::Video(_) => None,
        }
    }

    #[must_use]
    pub fn navigator(&self) -> &MediaNavigator {
        &self.navigator
    }

    #[must_use]
    pub fn chrome(&self) -> &ChromeController {
        &self.chrome
    }

    #[must_use]
    pub fn topmost(&self) -> &TopmostEnforcer {
        &self.topmost
    }

    #[must_use]
    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    #[must_use]
    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&LoadFailure> {
        self.last_error.as_ref()
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[must_use]
    pub fn window(&self) -> &W {
        &self.window
    }

    /// Direct access to the window, for OS-side changes the session must
    /// observe rather than cause.
    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    fn open(&mut self, path: &Path, now: Instant) -> Result<()> {
        self.navigator.scan_directory(path);
        self.load(path.to_path_buf(), now)
    }

    /// Replaces whatever is displayed with `path`.
    fn load(&mut self, path: PathBuf, now: Instant) -> Result<()> {
        self.teardown();
        tracing::info!("Loading {}", path.display());

        let media = match self.loader.load(&path) {
            Ok(media) => media,
            Err(err) => return Err(self.record_failure(path, err)),
        };

        let playback = match &media {
            LoadedMedia::StillImage(_) => None,
            LoadedMedia::AnimatedImage(anim) => {
                let player = AnimationPlayer::new(anim.frame_count(), self.preferences.frame_interval);
                self.timers.schedule_repeating(
                    TimerKind::FrameAdvance,
                    player.interval().as_duration(),
                    now,
                );
                Some(Playback::Animation(player))
            }
            LoadedMedia::Video(video) => {
                let source = self.next_source;
                self.next_source = source.next();
                if let Err(err) = self.backend.open(source, &video.path) {
                    return Err(self.record_failure(path, err));
                }
                let mut player = VideoPlayer::new(
                    source,
                    &video.path,
                    self.preferences.speed,
                    self.preferences.loop_video,
                );
                player.start(&mut self.backend);
                self.timers.schedule_repeating(
                    TimerKind::PositionSync,
                    Duration::from_millis(POSITION_SYNC_PERIOD_MS),
                    now,
                );
                Some(Playback::Video(player))
            }
        };

        self.last_error = None;
        self.current = Some(CurrentMedia {
            path,
            media,
            playback,
        });
        Ok(())
    }

    fn record_failure(&mut self, path: PathBuf, err: Error) -> Error {
        tracing::warn!("Failed to load {}: {}", path.display(), err);
        self.last_error = Some(LoadFailure {
            path,
            reason: err.clone(),
        });
        err
    }

    /// Stops playback timers and releases the backend.
    fn teardown(&mut self) {
        self.timers.cancel(TimerKind::FrameAdvance);
        self.timers.cancel(TimerKind::PositionSync);
        if let Some(current) = self.current.take() {
            if let Some(Playback::Video(_)) = current.playback {
                self.backend.close();
            }
        }
    }

    fn set_frame_interval(&mut self, millis: u32, now: Instant) {
        let interval = FrameInterval::new(millis);
        self.preferences.frame_interval = interval;
        if let Some(Playback::Animation(player)) = playback_mut(&mut self.current) {
            player.set_interval(interval);
            self.timers
                .schedule_repeating(TimerKind::FrameAdvance, interval.as_duration(), now);
        }
    }

    fn sync_chrome_timer(&mut self) {
        match self.chrome.hide_deadline() {
            Some(deadline) => self.timers.schedule_at(TimerKind::ChromeHide, deadline),
            None => self.timers.cancel(TimerKind::ChromeHide),
        }
    }
}

fn playback_mut(current: &mut Option<CurrentMedia>) -> Option<&mut Playback> {
    current.as_mut()?.playback.as_mut()
}

fn video_player_mut(current: &mut Option<CurrentMedia>) -> Option<&mut VideoPlayer> {
    match playback_mut(current)? {
        Playback::Video(player) => Some(player),
        Playback::Animation(_) => None,
    }
}

#[cfg(test)]
mod tests;
