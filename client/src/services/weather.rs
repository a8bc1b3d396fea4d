//! Weather enrichment for the selected location

use std::cell::RefCell;

use shared::models::WeatherSnapshot;
use shared::sequence::RequestSequencer;
use shared::types::Coordinate;

use super::ports::WeatherSource;

/// What a refresh did to the current snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherUpdate {
    /// The snapshot was replaced
    Applied(WeatherSnapshot),
    /// The lookup failed and the snapshot was cleared
    Unavailable,
    /// A newer lookup was issued meanwhile; nothing changed
    Stale,
}

/// Holds the last weather snapshot and keeps it tied to the latest lookup
pub struct WeatherEnricher<W: WeatherSource> {
    source: W,
    sequencer: RequestSequencer,
    current: RefCell<Option<WeatherSnapshot>>,
}

impl<W: WeatherSource> WeatherEnricher<W> {
    pub fn new(source: W) -> Self {
        Self {
            source,
            sequencer: RequestSequencer::new(),
            current: RefCell::new(None),
        }
    }

    /// Fetch conditions for `at`.
    ///
    /// Failures never propagate; they clear the snapshot instead.
    pub async fn refresh(&self, at: Coordinate) -> WeatherUpdate {
        let ticket = self.sequencer.issue();
        let result = self.source.current_weather(at).await;

        if !self.sequencer.is_current(ticket) {
            tracing::debug!(?ticket, "Dropping stale weather response");
            return WeatherUpdate::Stale;
        }

        match result {
            Ok(snapshot) => {
                *self.current.borrow_mut() = Some(snapshot.clone());
                WeatherUpdate::Applied(snapshot)
            }
            Err(e) => {
                tracing::warn!("Weather fetch failed: {}", e);
                *self.current.borrow_mut() = None;
                WeatherUpdate::Unavailable
            }
        }
    }

    pub fn current(&self) -> Option<WeatherSnapshot> {
        self.current.borrow().clone()
    }

    /// Forget the snapshot and ignore any lookup still in flight
    pub fn clear(&self) {
        self.sequencer.invalidate();
        *self.current.borrow_mut() = None;
    }
}
