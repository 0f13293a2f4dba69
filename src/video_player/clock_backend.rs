// SPDX-License-Identifier: MPL-2.0
//! Clock-driven backend for the headless shell.
//!
//! Nothing is decoded: the playback head is derived from a monotonic clock
//! scaled by the playback rate. The file metadata is read on a blocking task and the
//! result delivered as a [`BackendEvent`] through a tokio channel, so the
//! caller's event loop stays responsive while the file opens.
//!
//! While playing, a timer task waits for the known duration and sends
//! [`BackendEvent::MediaEnded`] when the clock reaches it. Every change to the
//! clock (play, pause, seek, rate) replaces that task.

use super::backend::{BackendEvent, SourceId, VideoBackend};
use crate::error::{Error, Result, VideoError};
use crate::media::video::read_metadata;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct ClockBackend {
    events: UnboundedSender<BackendEvent>,
    runtime: Handle,
    /// Source of the open file.
    source: Option<SourceId>,
    /// Filled in once the open file metadata is read.
    duration: watch::Receiver<Option<f64>>,
    /// Position at the moment `anchor` was taken.
    base_secs: f64,
    /// Set while playing.
    anchor: Option<Instant>,
    rate: f64,
    end_task: Option<JoinHandle<()>>,
}

impl ClockBackend {
    #[must_use]
    pub fn new(events: UnboundedSender<BackendEvent>, runtime: Handle) -> Self {
        let (_, duration) = watch::channel(None);
        Self {
            events,
            runtime,
            source: None,
            duration,
            base_secs: 0.0,
            anchor: None,
            rate: 1.0,
            end_task: None,
        }
    }

    fn position_at(&self, now: Instant) -> f64 {
        match self.anchor {
            Some(anchor) => {
                self.base_secs + now.saturating_duration_since(anchor).as_secs_f64() * self.rate
            }
            None => self.base_secs,
        }
    }

    /// Folds elapsed play time into the base position.
    fn rebase(&mut self) {
        if self.anchor.is_some() {
            let now = Instant::now();
            self.base_secs = self.position_at(now);
            self.anchor = Some(now);
        }
    }

    fn cancel_end(&mut self) {
        if let Some(task) = self.end_task.take() {
            task.abort();
        }
    }

    /// Replaces the end-of-stream timer to match the current clock.
    fn schedule_end(&mut self) {
        self.cancel_end();
        let (Some(source), Some(anchor)) = (self.source, self.anchor) else {
            return;
        };
        if self.rate <= 0.0 {
            return;
        }

        let mut duration = self.duration.clone();
        let events = self.events.clone();
        let base_secs = self.base_secs;
        let rate = self.rate;
        self.end_task = Some(self.runtime.spawn(async move {
            let duration_secs = match duration.wait_for(Option::is_some).await {
                Ok(known) => (*known).unwrap_or(0.0),
                Err(_) => return,
            };
            if duration_secs <= 0.0 {
                return;
            }
            let remaining_secs = ((duration_secs - base_secs) / rate).max(0.0);
            let Ok(remaining) = Duration::try_from_secs_f64(remaining_secs) else {
                return;
            };
            tokio::time::sleep_until(tokio::time::Instant::from_std(anchor + remaining)).await;
            // The receiver is gone only during shutdown
            let _ = events.send(BackendEvent::MediaEnded { source });
        }));
    }
}

impl VideoBackend for ClockBackend {
    fn open(&mut self, source: SourceId, path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(Error::Video(VideoError::IoError(format!(
                "no such file: {}",
                path.display()
            ))));
        }

        self.cancel_end();
        self.base_secs = 0.0;
        self.anchor = None;
        self.source = Some(source);
        let (duration_tx, duration_rx) = watch::channel(None);
        self.duration = duration_rx;

        let events = self.events.clone();
        let path = path.to_path_buf();
        self.runtime.spawn_blocking(move || {
            let event = match read_metadata(&path) {
                Ok(metadata) => {
                    duration_tx.send_replace(Some(metadata.duration_secs));
                    BackendEvent::MediaOpened {
                        source,
                        duration_secs: metadata.duration_secs,
                        width: metadata.width,
                        height: metadata.height,
                    }
                }
                Err(Error::Video(error)) => BackendEvent::OpenFailed { source, error },
                Err(other) => BackendEvent::OpenFailed {
                    source,
                    error: VideoError::Other(other.to_string()),
                },
            };
            // The receiver is gone only during shutdown
            let _ = events.send(event);
        });
        Ok(())
    }

    fn play(&mut self) {
        if self.source.is_some() && self.anchor.is_none() {
            self.anchor = Some(Instant::now());
            self.schedule_end();
        }
    }

    fn pause(&mut self) {
        if self.anchor.is_some() {
            self.base_secs = self.position_at(Instant::now());
            self.anchor = None;
        }
        self.cancel_end();
    }

    fn set_position(&mut self, secs: f64) {
        self.base_secs = secs.max(0.0);
        if self.anchor.is_some() {
            self.anchor = Some(Instant::now());
            self.schedule_end();
        }
    }

    fn position(&self) -> f64 {
        self.position_at(Instant::now())
    }

    fn set_rate(&mut self, rate: f64) {
        self.rebase();
        self.rate = rate;
        self.schedule_end();
    }

    fn close(&mut self) {
        self.cancel_end();
        self.source = None;
        self.anchor = None;
        self.base_secs = 0.0;
    }
}

impl Drop for ClockBackend {
    fn drop(&mut self) {
        self.cancel_end();
    }
}
