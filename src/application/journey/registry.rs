//! JourneyRegistry - one running journey actor per open project.
//!
//! Journeys that sit idle past the configured timeout, or whose actor has
//! stopped, are evicted by [`JourneyRegistry::run_eviction`]; the next request
//! reopens them from storage.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{watch, Mutex, RwLock};
use tokio::time;

use crate::application::handlers::{OpenJourneyCommand, OpenJourneyError, OpenJourneyHandler};
use crate::domain::foundation::{Locale, ProjectId};

use super::service::{JourneyHandle, JourneyService};

struct OpenJourney {
    handle: JourneyHandle,
    last_used: Instant,
}

pub struct JourneyRegistry {
    opener: OpenJourneyHandler,
    default_locale: Locale,
    journeys: RwLock<HashMap<ProjectId, OpenJourney>>,
    /// Held while a journey is loaded so a project is only opened (and seeded) once.
    opening: Mutex<()>,
}

impl JourneyRegistry {
    pub fn new(opener: OpenJourneyHandler, default_locale: Locale) -> Self {
        Self {
            opener,
            default_locale,
            journeys: RwLock::new(HashMap::new()),
            opening: Mutex::new(()),
        }
    }

    /// Returns the running journey for `project_id`, opening it on first use.
    pub async fn get_or_open(&self, project_id: ProjectId) -> Result<JourneyHandle, OpenJourneyError> {
        if let Some(handle) = self.touch(project_id).await {
            return Ok(handle);
        }

        let _opening = self.opening.lock().await;
        if let Some(handle) = self.touch(project_id).await {
            return Ok(handle);
        }

        let opened = self
            .opener
            .handle(OpenJourneyCommand {
                project_id,
                locale: self.default_locale,
            })
            .await?;

        let handle = JourneyService::spawn(opened.controller);
        self.journeys.write().await.insert(
            project_id,
            OpenJourney {
                handle: handle.clone(),
                last_used: Instant::now(),
            },
        );
        tracing::debug!(%project_id, "journey opened");
        Ok(handle)
    }

    /// Live handle for an open journey, refreshing its idle clock.
    async fn touch(&self, project_id: ProjectId) -> Option<JourneyHandle> {
        let mut journeys = self.journeys.write().await;
        let entry = journeys.get_mut(&project_id)?;
        if entry.handle.is_stopped() {
            journeys.remove(&project_id);
            return None;
        }
        entry.last_used = Instant::now();
        Some(entry.handle.clone())
    }

    /// Stops tracking a journey; its actor ends once outstanding handles drop.
    pub async fn close(&self, project_id: ProjectId) -> bool {
        self.journeys.write().await.remove(&project_id).is_some()
    }

    /// Drops journeys idle for at least `max_idle` and journeys whose actor
    /// stopped. Busy journeys are kept. Returns how many were evicted.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut journeys = self.journeys.write().await;
        let before = journeys.len();
        journeys.retain(|project_id, entry| {
            let keep = !entry.handle.is_stopped()
                && (entry.handle.snapshot().is_loading || entry.last_used.elapsed() < max_idle);
            if !keep {
                tracing::debug!(%project_id, "journey evicted");
            }
            keep
        });
        before - journeys.len()
    }

    /// Sweeps idle journeys every `every` until `shutdown` flips to true.
    pub async fn run_eviction(
        self: Arc<Self>,
        every: Duration,
        max_idle: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut interval = time::interval(every);
        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        return;
                    }
                }
                _ = interval.tick() => {
                    let evicted = self.evict_idle(max_idle).await;
                    if evicted > 0 {
                        tracing::info!(evicted, "evicted idle journeys");
                    }
                }
            }
        }
    }

    pub async fn open_count(&self) -> usize {
        self.journeys.read().await.len()
    }
}
