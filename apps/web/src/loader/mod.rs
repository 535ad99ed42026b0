//! Loading overlay session.
//!
//! At most one session is alive. Starting a session aborts the previous one's
//! timer tasks before spawning new ones, so repeated submissions never stack
//! timers. The tasks are purely cosmetic; nothing waits on them.

pub mod handlers;
pub mod matrix;
pub mod messages;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

use crate::loader::matrix::{Glyph, MatrixRain};
use crate::loader::messages::{message_at, next_index};

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub message_interval: Duration,
    pub frame_interval: Duration,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            message_interval: Duration::from_millis(2000),
            frame_interval: Duration::from_millis(33),
            canvas_width: 1280,
            canvas_height: 720,
        }
    }
}

#[derive(Debug, Default)]
struct Progress {
    message_index: usize,
    frames_drawn: u64,
    last_frame: Vec<Glyph>,
}

struct LoadingSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    progress: Arc<Mutex<Progress>>,
    tasks: Vec<JoinHandle<()>>,
}

impl Drop for LoadingSession {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoaderStatus {
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub frames_drawn: u64,
    /// Glyphs of the most recent rain frame.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rain: Vec<Glyph>,
}

pub struct LoaderManager {
    config: LoaderConfig,
    current: Mutex<Option<LoadingSession>>,
}

impl LoaderManager {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            current: Mutex::new(None),
        }
    }

    /// Starts a new session, cancelling whichever one was running.
    /// Must be called from within a Tokio runtime.
    pub fn start(&self) -> Uuid {
        let progress = Arc::new(Mutex::new(Progress::default()));
        let session = LoadingSession {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            tasks: vec![
                spawn_message_cycle(progress.clone(), self.config.message_interval),
                spawn_matrix_rain(progress.clone(), &self.config),
            ],
            progress,
        };
        let id = session.id;

        let previous = self.lock().replace(session);
        if let Some(previous) = previous {
            debug!("Loading session {} superseded by {id}", previous.id);
        }
        info!("Loading session {id} started");
        id
    }

    /// Ends the current session, if any. Returns the id that was stopped.
    pub fn stop(&self) -> Option<Uuid> {
        let stopped = self.lock().take();
        stopped.map(|session| {
            info!("Loading session {} stopped", session.id);
            session.id
        })
    }

    pub fn status(&self) -> LoaderStatus {
        let current = self.lock();
        match current.as_ref() {
            Some(session) => {
                let (index, frames, rain) = session
                    .progress
                    .lock()
                    .map(|p| (p.message_index, p.frames_drawn, p.last_frame.clone()))
                    .unwrap_or_default();
                LoaderStatus {
                    active: true,
                    session_id: Some(session.id),
                    started_at: Some(session.started_at),
                    message: Some(message_at(index)),
                    frames_drawn: frames,
                    rain,
                }
            }
            None => LoaderStatus {
                active: false,
                session_id: None,
                started_at: None,
                message: None,
                frames_drawn: 0,
                rain: Vec::new(),
            },
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<LoadingSession>> {
        match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn spawn_message_cycle(progress: Arc<Mutex<Progress>>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if let Ok(mut p) = progress.lock() {
                p.message_index = next_index(p.message_index);
            }
        }
    })
}

fn spawn_matrix_rain(progress: Arc<Mutex<Progress>>, config: &LoaderConfig) -> JoinHandle<()> {
    let mut rain = MatrixRain::new(config.canvas_width, config.canvas_height);
    let period = config.frame_interval;
    tokio::spawn(async move {
        let mut rng = StdRng::from_entropy();
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            let frame = rain.step(&mut rng);
            if let Ok(mut p) = progress.lock() {
                p.frames_drawn += 1;
                p.last_frame = frame;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::messages::LOADING_MESSAGES;

    fn manager() -> LoaderManager {
        LoaderManager::new(LoaderConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_status() {
        let status = manager().status();
        assert!(!status.active);
        assert_eq!(status.frames_drawn, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_messages_cycle_every_interval() {
        let loader = manager();
        let id = loader.start();
        assert_eq!(loader.status().message, Some(LOADING_MESSAGES[0]));

        tokio::time::sleep(Duration::from_millis(2100)).await;
        let status = loader.status();
        assert_eq!(status.session_id, Some(id));
        assert_eq!(status.message, Some(LOADING_MESSAGES[1]));
        assert!(status.frames_drawn > 0);
        assert_eq!(status.rain.len(), 1280 / 16);

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(loader.status().message, Some(LOADING_MESSAGES[2]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_session_cancels_previous() {
        let loader = manager();
        let first = loader.start();
        let first_progress = loader.lock().as_ref().unwrap().progress.clone();
        tokio::time::sleep(Duration::from_millis(100)).await;

        let second = loader.start();
        assert_ne!(first, second);
        let frozen = first_progress.lock().unwrap().frames_drawn;

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(first_progress.lock().unwrap().frames_drawn, frozen);
        assert_eq!(loader.status().session_id, Some(second));
        assert!(loader.status().frames_drawn > 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_clears_session() {
        let loader = manager();
        let id = loader.start();
        assert_eq!(loader.stop(), Some(id));
        assert!(!loader.status().active);
        assert_eq!(loader.stop(), None);
    }
}
