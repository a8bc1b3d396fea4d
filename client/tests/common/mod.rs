//! In-memory page ports shared by the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use hazard_report_client::services::{
    Control, FormView, GeolocationError, Geocoder, Geolocator, MapView, Notifier, PagePorts,
    PositionOptions, ReportSink, TokioTimer, WeatherSource,
};
use hazard_report_client::{ClientError, ClientResult, Config, PageParts, ReportPage};
use shared::models::{
    fields, FileKey, HazardReportDraft, PlaceMatch, ReportPayload, ReversePlace, Severity,
    StagedFile, SubmissionReceipt, WeatherPanel, WeatherSnapshot,
};
use shared::notify::{AlertKind, Notification};
use shared::types::{Coordinate, MapViewport};

// ============================================================================
// Form View
// ============================================================================

#[derive(Debug, Default)]
pub struct ViewState {
    pub fields: HashMap<String, String>,
    pub invalid: HashSet<String>,
    pub focused: Vec<String>,
    pub severity: Option<Severity>,
    pub busy: Vec<(Control, bool)>,
    pub weather: Vec<WeatherPanel>,
    pub receipts: Vec<SubmissionReceipt>,
    pub previews: Vec<FileKey>,
    pub file_input: Vec<String>,
    pub media_label: String,
    pub status_cleared: usize,
}

#[derive(Clone, Default)]
pub struct FakeView(pub Rc<RefCell<ViewState>>);

impl FakeView {
    pub fn fill(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .fields
            .insert(name.to_string(), value.to_string());
    }

    pub fn field(&self, name: &str) -> Option<String> {
        self.0.borrow().fields.get(name).cloned()
    }

    /// A valid report, minus the location
    pub fn fill_report(&self) {
        self.fill(fields::HAZARD_TYPE, "high_waves");
        self.fill(fields::SEVERITY, "4");
        self.fill(fields::DESCRIPTION, "Waves overtopping the sea wall");
    }

    pub fn last_weather(&self) -> Option<WeatherPanel> {
        self.0.borrow().weather.last().cloned()
    }
}

impl FormView for FakeView {
    fn read_draft(&self) -> HazardReportDraft {
        let state = self.0.borrow();
        let get = |name: &str| state.fields.get(name).cloned().unwrap_or_default();
        let optional = |name: &str| state.fields.get(name).cloned().filter(|v| !v.is_empty());
        HazardReportDraft {
            user_id: get(fields::USER_ID),
            hazard_type: get(fields::HAZARD_TYPE),
            severity: get(fields::SEVERITY).parse().unwrap_or(3),
            description: get(fields::DESCRIPTION),
            location_name: get(fields::LOCATION_NAME),
            latitude: get(fields::LATITUDE),
            longitude: get(fields::LONGITUDE),
            weather_conditions: get(fields::WEATHER_CONDITIONS),
            contact_email: optional(fields::CONTACT_EMAIL),
            contact_phone: optional(fields::CONTACT_PHONE),
        }
    }

    fn set_field(&self, name: &str, value: &str) {
        self.fill(name, value);
    }

    fn set_field_invalid(&self, name: &str, invalid: bool) {
        let mut state = self.0.borrow_mut();
        if invalid {
            state.invalid.insert(name.to_string());
        } else {
            state.invalid.remove(name);
        }
    }

    fn focus_field(&self, name: &str) {
        self.0.borrow_mut().focused.push(name.to_string());
    }

    fn clear_fields(&self) {
        let mut state = self.0.borrow_mut();
        state.fields.clear();
        state.invalid.clear();
    }

    fn show_severity(&self, severity: Severity) {
        self.0.borrow_mut().severity = Some(severity);
    }

    fn set_busy(&self, control: Control, busy: bool) {
        self.0.borrow_mut().busy.push((control, busy));
    }

    fn show_weather(&self, panel: &WeatherPanel) {
        self.0.borrow_mut().weather.push(panel.clone());
    }

    fn show_receipt(&self, receipt: &SubmissionReceipt) {
        self.0.borrow_mut().receipts.push(receipt.clone());
    }

    fn clear_status(&self) {
        self.0.borrow_mut().status_cleared += 1;
    }

    fn add_preview(&self, file: &StagedFile) {
        self.0.borrow_mut().previews.push(file.key());
    }

    fn remove_preview(&self, key: &FileKey) {
        self.0.borrow_mut().previews.retain(|k| k != key);
    }

    fn clear_previews(&self) {
        self.0.borrow_mut().previews.clear();
    }

    fn sync_file_input(&self, files: &[StagedFile]) {
        self.0.borrow_mut().file_input = files.iter().map(|f| f.name.clone()).collect();
    }

    fn set_media_label(&self, label: &str) {
        self.0.borrow_mut().media_label = label.to_string();
    }
}

// ============================================================================
// Map and Notifier
// ============================================================================

#[derive(Debug, Default)]
pub struct MapState {
    pub viewports: Vec<MapViewport>,
    pub marker: Option<Coordinate>,
    pub markers_added: usize,
    pub scrolled: usize,
}

#[derive(Clone, Default)]
pub struct FakeMap(pub Rc<RefCell<MapState>>);

impl MapView for FakeMap {
    fn set_view(&self, viewport: MapViewport) {
        self.0.borrow_mut().viewports.push(viewport);
    }

    fn add_marker(&self, at: Coordinate) {
        let mut state = self.0.borrow_mut();
        state.markers_added += 1;
        state.marker = Some(at);
    }

    fn move_marker(&self, at: Coordinate) {
        self.0.borrow_mut().marker = Some(at);
    }

    fn remove_marker(&self) {
        self.0.borrow_mut().marker = None;
    }

    fn scroll_into_view(&self) {
        self.0.borrow_mut().scrolled += 1;
    }
}

#[derive(Clone, Default)]
pub struct FakeNotifier(pub Rc<RefCell<Vec<Notification>>>);

impl FakeNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.0.borrow().iter().map(|n| n.message.clone()).collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.0.borrow().last().cloned()
    }

    pub fn contains(&self, kind: AlertKind, message: &str) -> bool {
        self.0
            .borrow()
            .iter()
            .any(|n| n.kind == kind && n.message == message)
    }
}

impl Notifier for FakeNotifier {
    fn notify(&self, notification: Notification) {
        self.0.borrow_mut().push(notification);
    }
}

// ============================================================================
// Network
// ============================================================================

/// Weather keyed by latitude; unknown latitudes answer 503
#[derive(Clone, Default)]
pub struct FakeWeather {
    pub responses: Rc<RefCell<Vec<(f64, Duration, WeatherSnapshot)>>>,
    pub requests: Rc<RefCell<Vec<Coordinate>>>,
}

impl FakeWeather {
    pub fn respond(&self, latitude: f64, delay: Duration, snapshot: WeatherSnapshot) {
        self.responses
            .borrow_mut()
            .push((latitude, delay, snapshot));
    }
}

#[async_trait(?Send)]
impl WeatherSource for FakeWeather {
    async fn current_weather(&self, at: Coordinate) -> ClientResult<WeatherSnapshot> {
        self.requests.borrow_mut().push(at);
        let found = self
            .responses
            .borrow()
            .iter()
            .find(|(lat, _, _)| *lat == at.latitude)
            .map(|(_, delay, snapshot)| (*delay, snapshot.clone()));
        match found {
            Some((delay, snapshot)) => {
                tokio::time::sleep(delay).await;
                Ok(snapshot)
            }
            None => Err(ClientError::Api {
                status: 503,
                message: "Weather service unavailable".into(),
            }),
        }
    }
}

#[derive(Clone, Default)]
pub struct FakeGeocoder {
    pub hit: Rc<RefCell<Option<PlaceMatch>>>,
    pub search_fails: Rc<RefCell<bool>>,
    pub searches: Rc<RefCell<Vec<String>>>,
    pub search_delay: Rc<RefCell<Duration>>,
}

#[async_trait(?Send)]
impl Geocoder for FakeGeocoder {
    async fn search(&self, query: &str) -> ClientResult<Option<PlaceMatch>> {
        self.searches.borrow_mut().push(query.to_string());
        let delay = *self.search_delay.borrow();
        tokio::time::sleep(delay).await;
        if *self.search_fails.borrow() {
            return Err(ClientError::Api {
                status: 502,
                message: "Bad gateway".into(),
            });
        }
        Ok(self.hit.borrow().clone())
    }

    async fn reverse(&self, _at: Coordinate) -> ClientResult<ReversePlace> {
        let place = serde_json::from_value(serde_json::json!({
            "display_name": "Marina Beach, Chennai, Tamil Nadu, India",
            "address": { "city": "Chennai", "state": "Tamil Nadu" }
        }))
        .unwrap();
        Ok(place)
    }
}

#[derive(Clone, Default)]
pub struct FakeReports {
    pub responses: Rc<RefCell<VecDeque<ClientResult<SubmissionReceipt>>>>,
    pub payloads: Rc<RefCell<Vec<ReportPayload>>>,
    pub delay: Rc<RefCell<Duration>>,
}

impl FakeReports {
    pub fn respond(&self, response: ClientResult<SubmissionReceipt>) {
        self.responses.borrow_mut().push_back(response);
    }
}

#[async_trait(?Send)]
impl ReportSink for FakeReports {
    async fn submit(&self, payload: ReportPayload) -> ClientResult<SubmissionReceipt> {
        self.payloads.borrow_mut().push(payload);
        let delay = *self.delay.borrow();
        tokio::time::sleep(delay).await;
        let next = self.responses.borrow_mut().pop_front();
        next.unwrap_or_else(|| {
            Err(ClientError::Api {
                status: 500,
                message: "Failed to submit report".into(),
            })
        })
    }
}

// ============================================================================
// Device
// ============================================================================

/// Answers with the stored position after the stored delay
#[derive(Clone)]
pub struct FakeLocator(
    pub Rc<RefCell<Result<Coordinate, GeolocationError>>>,
    pub Rc<RefCell<Duration>>,
);

impl Default for FakeLocator {
    fn default() -> Self {
        Self(
            Rc::new(RefCell::new(Err(GeolocationError::Unsupported))),
            Rc::new(RefCell::new(Duration::ZERO)),
        )
    }
}

#[async_trait(?Send)]
impl Geolocator for FakeLocator {
    async fn current_position(
        &self,
        _options: PositionOptions,
    ) -> Result<Coordinate, GeolocationError> {
        let delay = *self.1.borrow();
        tokio::time::sleep(delay).await;
        *self.0.borrow()
    }
}

// ============================================================================
// Harness
// ============================================================================

pub struct TestPorts;

impl PagePorts for TestPorts {
    type Map = FakeMap;
    type View = FakeView;
    type Notifier = FakeNotifier;
    type Weather = FakeWeather;
    type Geocoder = FakeGeocoder;
    type Reports = FakeReports;
    type Locator = FakeLocator;
    type Timer = TokioTimer;
}

/// Handles onto the fakes a page was built from
#[derive(Clone, Default)]
pub struct Harness {
    pub map: FakeMap,
    pub view: FakeView,
    pub notifier: FakeNotifier,
    pub weather: FakeWeather,
    pub geocoder: FakeGeocoder,
    pub reports: FakeReports,
    pub locator: FakeLocator,
}

impl Harness {
    pub fn page(&self) -> ReportPage<TestPorts> {
        hazard_report_client::telemetry::init();
        let parts = PageParts {
            map: self.map.clone(),
            view: self.view.clone(),
            notifier: self.notifier.clone(),
            weather: self.weather.clone(),
            geocoder: self.geocoder.clone(),
            reports: self.reports.clone(),
            locator: self.locator.clone(),
            timer: TokioTimer,
        };
        ReportPage::new(parts, &Config::default())
    }
}

pub fn snapshot(temperature: f64) -> WeatherSnapshot {
    WeatherSnapshot {
        temperature: Some(temperature),
        wind_speed: Some(18.0),
        humidity: Some(80.0),
        wave_height: Some(2.5),
        visibility: None,
        weather_description: Some("Overcast".into()),
        raw: None,
    }
}

pub fn receipt(report_id: &str) -> SubmissionReceipt {
    SubmissionReceipt {
        report_id: report_id.to_string(),
        priority_score: Some(7.5),
        nearby_reports_count: Some(2),
        message: None,
    }
}

pub fn image(name: &str, size: usize) -> StagedFile {
    StagedFile::new(name, "image/jpeg", vec![0u8; size])
}
