//! The hazard report page
//!
//! Composes the map controller, lookups, media manager and submission
//! coordinator over one set of [`PagePorts`]. Every user action on the page
//! maps to one method here.

use std::cell::Cell;
use std::time::Duration;

use chrono::Utc;
use shared::media::StageOutcome;
use shared::models::{
    fields, FileKey, Severity, StagedFile, SubmissionReceipt, WeatherPanel, WeatherSnapshot,
};
use shared::notify::{Notification, SHORT_ALERT_TIMEOUT};
use shared::sequence::{RequestSequencer, RequestTicket};
use shared::submission::SubmissionState;
use shared::types::Coordinate;

use super::location::{DeviceLocation, PlaceLookup};
use super::map::MapController;
use super::media::MediaManager;
use super::ports::{Control, FormView, Notifier, PagePorts, PositionOptions, Timer};
use super::submission::{SubmissionCoordinator, SubmitContext};
use super::weather::{WeatherEnricher, WeatherUpdate};
use crate::config::Config;
use crate::error::ClientResult;

/// Concrete port implementations a page is built from
pub struct PageParts<P: PagePorts> {
    pub map: P::Map,
    pub view: P::View,
    pub notifier: P::Notifier,
    pub weather: P::Weather,
    pub geocoder: P::Geocoder,
    pub reports: P::Reports,
    pub locator: P::Locator,
    pub timer: P::Timer,
}

pub struct ReportPage<P: PagePorts> {
    map: MapController<P::Map>,
    view: P::View,
    notifier: P::Notifier,
    weather: WeatherEnricher<P::Weather>,
    places: PlaceLookup<P::Geocoder>,
    location: DeviceLocation<P::Locator>,
    media: MediaManager,
    submission: SubmissionCoordinator<P::Reports>,
    timer: P::Timer,
    // click, search and locate all compete for the one selected location
    selection: RequestSequencer,
    reset_delay: Duration,
    // bumped on every reset; a pending auto-reset only fires if unchanged
    reset_generation: Cell<u64>,
}

impl<P: PagePorts> ReportPage<P> {
    pub fn new(parts: PageParts<P>, config: &Config) -> Self {
        Self {
            map: MapController::new(parts.map),
            view: parts.view,
            notifier: parts.notifier,
            weather: WeatherEnricher::new(parts.weather),
            places: PlaceLookup::new(parts.geocoder),
            location: DeviceLocation::new(
                parts.locator,
                PositionOptions::from(&config.geolocation),
            ),
            media: MediaManager::new(),
            submission: SubmissionCoordinator::new(parts.reports),
            timer: parts.timer,
            selection: RequestSequencer::new(),
            reset_delay: config.form.reset_delay(),
            reset_generation: Cell::new(0),
        }
    }

    // ========================================================================
    // Map and location
    // ========================================================================

    /// Set up the map and panels; a prefilled coordinate is selected again
    pub async fn initialize(&self) {
        let draft = self.view.read_draft();
        let prefilled = Coordinate::parse(&draft.latitude, &draft.longitude);

        self.map.initialize(prefilled);
        self.view
            .show_severity(Severity::new(draft.severity).unwrap_or_default());
        self.view.set_media_label(&self.media.label());
        self.view.show_weather(&WeatherPanel::Prompt);

        if let Some(at) = prefilled {
            tracing::debug!(lat = at.latitude, lon = at.longitude, "Restoring prefilled location");
            self.fetch_weather(at).await;
        }
    }

    /// A click on the map
    pub async fn select_location(&self, at: Coordinate) {
        self.selection.issue();
        self.map.place_marker(at);
        self.write_coordinate(at);
        self.notifier.notify(
            Notification::success("Location selected successfully")
                .with_timeout(SHORT_ALERT_TIMEOUT),
        );
        self.enrich(at).await;
    }

    /// Forward-geocode `query` and select the first match
    pub async fn search_location(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        self.view.set_busy(Control::Search, true);
        let ticket = self.selection.issue();
        let result = self.places.search(query).await;
        if self.superseded(ticket) {
            self.view.set_busy(Control::Search, false);
            return;
        }
        match result {
            Ok(Some(found)) => {
                self.places.invalidate();
                self.map.focus(found.coordinate);
                self.write_coordinate(found.coordinate);
                self.view.set_field(fields::LOCATION_NAME, &found.name);
                self.notifier
                    .notify(Notification::success("Location found and selected"));
                self.fetch_weather(found.coordinate).await;
            }
            Ok(None) => {
                tracing::info!(query, "No geocoding match");
                self.notifier.notify(Notification::warning(
                    "Location not found. Try searching with more specific terms.",
                ));
            }
            Err(e) => {
                tracing::error!("Geocoding error: {}", e);
                self.notifier.notify(Notification::danger(
                    "Error searching location. Please try again.",
                ));
            }
        }
        self.view.set_busy(Control::Search, false);
    }

    /// Select the device position
    pub async fn use_current_location(&self) {
        self.view.set_busy(Control::Locate, true);
        let ticket = self.selection.issue();
        let result = self.location.locate().await;
        if self.superseded(ticket) {
            self.view.set_busy(Control::Locate, false);
            return;
        }
        match result {
            Ok(at) => {
                self.map.focus(at);
                self.write_coordinate(at);
                self.enrich(at).await;
                self.notifier
                    .notify(Notification::success("Current location retrieved successfully"));
            }
            Err(e) => {
                tracing::warn!("Geolocation failed: {}", e);
                self.notifier
                    .notify(Notification::new(e.alert_kind(), e.to_string()));
            }
        }
        self.view.set_busy(Control::Locate, false);
    }

    pub fn selected_location(&self) -> Option<Coordinate> {
        self.map.selected()
    }

    // ========================================================================
    // Form
    // ========================================================================

    pub fn severity_changed(&self, level: u8) {
        if let Some(severity) = Severity::new(level) {
            self.view.show_severity(severity);
        }
    }

    pub fn add_files(&self, candidates: Vec<StagedFile>) -> Vec<StageOutcome> {
        self.media.add_files(candidates, &self.view, &self.notifier)
    }

    pub fn remove_file(&self, key: &FileKey) -> Option<StagedFile> {
        self.media.remove_file(key, &self.view, &self.notifier)
    }

    pub fn staged_files(&self) -> Vec<StagedFile> {
        self.media.files()
    }

    pub fn weather_snapshot(&self) -> Option<WeatherSnapshot> {
        self.weather.current()
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.submission.state()
    }

    /// Validate and post the report, then reset the form after the
    /// configured delay unless it was reset by hand meanwhile
    pub async fn submit(&self) -> ClientResult<SubmissionReceipt> {
        let ctx = SubmitContext {
            view: &self.view,
            notifier: &self.notifier,
            map: self.map.map(),
        };
        let receipt = self
            .submission
            .submit(
                self.view.read_draft(),
                self.map.selected(),
                &self.media.files(),
                ctx,
                Utc::now(),
            )
            .await?;

        let generation = self.reset_generation.get();
        self.timer.sleep(self.reset_delay).await;
        if self.reset_generation.get() == generation {
            self.reset();
        } else {
            tracing::debug!("Form already reset; skipping automatic reset");
        }
        Ok(receipt)
    }

    /// Clear the whole form back to its initial state
    pub fn reset(&self) {
        if let Err(e) = self.submission.reset() {
            tracing::warn!("Reset refused: {}", e);
            self.notifier.notify(Notification::warning(
                "Please wait for the submission to finish",
            ));
            return;
        }
        self.reset_generation.set(self.reset_generation.get() + 1);

        self.view.clear_fields();
        self.view.show_severity(Severity::default());
        self.media.clear(&self.view);
        self.map.clear();
        self.weather.clear();
        self.places.invalidate();
        self.selection.invalidate();
        self.view.show_weather(&WeatherPanel::Prompt);
        self.view.clear_status();

        tracing::info!("Form reset");
        self.notifier.notify(
            Notification::info("Form reset successfully").with_timeout(SHORT_ALERT_TIMEOUT),
        );
    }

    pub fn view(&self) -> &P::View {
        &self.view
    }

    pub fn notifier(&self) -> &P::Notifier {
        &self.notifier
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Whether a newer selection was made while `ticket` was pending
    fn superseded(&self, ticket: RequestTicket) -> bool {
        let stale = !self.selection.is_current(ticket);
        if stale {
            tracing::debug!(?ticket, "Dropping superseded location result");
        }
        stale
    }

    fn write_coordinate(&self, at: Coordinate) {
        self.view.set_field(fields::LATITUDE, &at.latitude_field());
        self.view.set_field(fields::LONGITUDE, &at.longitude_field());
        self.view.set_field_invalid(fields::LATITUDE, false);
        self.view.set_field_invalid(fields::LONGITUDE, false);
    }

    /// Reverse geocode and fetch weather together
    async fn enrich(&self, at: Coordinate) {
        let (name, ()) = futures::join!(self.places.location_name(at), self.fetch_weather(at));
        if let Some(name) = name {
            self.view.set_field(fields::LOCATION_NAME, &name);
        }
    }

    async fn fetch_weather(&self, at: Coordinate) {
        self.view.show_weather(&WeatherPanel::Loading);
        match self.weather.refresh(at).await {
            WeatherUpdate::Applied(snapshot) => {
                self.view
                    .set_field(fields::WEATHER_CONDITIONS, &snapshot.to_field_value());
                self.view.show_weather(&WeatherPanel::Ready(snapshot));
            }
            WeatherUpdate::Unavailable => {
                self.view.set_field(fields::WEATHER_CONDITIONS, "");
                self.view.show_weather(&WeatherPanel::Unavailable);
            }
            WeatherUpdate::Stale => {}
        }
    }
}
