//! The report page as seen from JavaScript
//!
//! `new ReportApp()` mounts the map, wires the page controls and runs the
//! initial setup. Every handler spawns its work on the event loop.

use std::rc::Rc;

use hazard_report_client::services::PagePorts;
use hazard_report_client::{
    Config, NominatimClient, PageParts, ReportPage, ReportsClient, WeatherClient,
};
use shared::models::FileKey;
use shared::types::Coordinate;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event, EventTarget, HtmlInputElement, KeyboardEvent};

use crate::bindings::hazard_on_map_click;
use crate::device::{BrowserGeolocator, BrowserTimer};
use crate::dom::{
    element, read_selection, DomFormView, DomNotifier, FORM_ID, LOCATE_BUTTON_ID, PREVIEW_ID,
    SEARCH_BUTTON_ID, SEARCH_INPUT_ID, SEVERITY_ID,
};
use crate::log;
use crate::map::LeafletMapView;

/// Port implementations backed by the browser
pub struct BrowserPorts;

impl PagePorts for BrowserPorts {
    type Map = LeafletMapView;
    type View = DomFormView;
    type Notifier = DomNotifier;
    type Weather = WeatherClient;
    type Geocoder = NominatimClient;
    type Reports = ReportsClient;
    type Locator = BrowserGeolocator;
    type Timer = BrowserTimer;
}

type Page = Rc<ReportPage<BrowserPorts>>;

#[wasm_bindgen]
pub struct ReportApp {
    page: Page,
    // listeners stay registered for as long as the app lives
    _map_click: Closure<dyn FnMut(f64, f64)>,
    _listeners: Vec<Closure<dyn FnMut(Event)>>,
}

#[wasm_bindgen]
impl ReportApp {
    /// Mount the page. `api_base_url` overrides the default API address.
    #[wasm_bindgen(constructor)]
    pub fn new(api_base_url: Option<String>) -> Result<ReportApp, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let mut config = Config::default();
        if let Some(base_url) = api_base_url.filter(|u| !u.trim().is_empty()) {
            config.api.base_url = base_url;
        }

        let map = LeafletMapView::mount(&document)?;
        let map_handle = map.handle();
        let parts = PageParts::<BrowserPorts> {
            map,
            view: DomFormView::new(document.clone())?,
            notifier: DomNotifier::new(document.clone()),
            weather: WeatherClient::new(&config.api),
            geocoder: NominatimClient::new(&config.geocoding),
            reports: ReportsClient::new(&config.api),
            locator: BrowserGeolocator,
            timer: BrowserTimer,
        };
        let page: Page = Rc::new(ReportPage::new(parts, &config));

        let map_click = {
            let page = page.clone();
            Closure::<dyn FnMut(f64, f64)>::new(move |lat: f64, lng: f64| {
                let page = page.clone();
                spawn_local(async move {
                    page.select_location(Coordinate::new(lat, lng)).await;
                });
            })
        };
        hazard_on_map_click(&map_handle, &map_click);

        let listeners = wire_controls(&document, &page)?;

        let init = page.clone();
        spawn_local(async move {
            init.initialize().await;
        });
        log::info("Hazard report page ready");

        Ok(ReportApp {
            page,
            _map_click: map_click,
            _listeners: listeners,
        })
    }

    pub fn select_location(&self, lat: f64, lng: f64) {
        let page = self.page.clone();
        spawn_local(async move {
            page.select_location(Coordinate::new(lat, lng)).await;
        });
    }

    pub fn search(&self, query: String) {
        let page = self.page.clone();
        spawn_local(async move {
            page.search_location(&query).await;
        });
    }

    pub fn use_current_location(&self) {
        let page = self.page.clone();
        spawn_local(async move {
            page.use_current_location().await;
        });
    }

    /// Returns whether a staged file matched
    pub fn remove_file(&self, name: String, size: f64) -> bool {
        self.page
            .remove_file(&FileKey::new(name, size as u64))
            .is_some()
    }

    pub fn set_severity(&self, level: u8) {
        self.page.severity_changed(level);
    }

    pub fn submit(&self) {
        submit(&self.page);
    }

    pub fn reset(&self) {
        self.page.reset();
    }
}

fn submit(page: &Page) {
    let page = page.clone();
    spawn_local(async move {
        if let Err(e) = page.submit().await {
            log::warn(&format!("Report not submitted: {}", e));
        }
    });
}

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<Closure<dyn FnMut(Event)>, JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    Ok(closure)
}

fn wire_controls(
    document: &Document,
    page: &Page,
) -> Result<Vec<Closure<dyn FnMut(Event)>>, JsValue> {
    let mut listeners = Vec::new();

    let form = element(document, FORM_ID)?;
    let p = page.clone();
    listeners.push(listen(&form, "submit", move |event| {
        event.prevent_default();
        submit(&p);
    })?);

    if let Some(slider) = document.get_element_by_id(SEVERITY_ID) {
        let p = page.clone();
        listeners.push(listen(&slider, "input", move |event| {
            let level = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                .and_then(|input| input.value().parse().ok());
            if let Some(level) = level {
                p.severity_changed(level);
            }
        })?);
    }

    if let Some(input) = document.get_element_by_id(shared::models::fields::MEDIA_FILES) {
        let p = page.clone();
        listeners.push(listen(&input, "change", move |event| {
            let files = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                .and_then(|input| input.files());
            let Some(files) = files else {
                return;
            };
            let p = p.clone();
            spawn_local(async move {
                let candidates = read_selection(&files).await;
                p.add_files(candidates);
            });
        })?);
    }

    if let Some(preview) = document.get_element_by_id(PREVIEW_ID) {
        let p = page.clone();
        listeners.push(listen(&preview, "click", move |event| {
            if let Some(key) = clicked_preview_key(&event) {
                p.remove_file(&key);
            }
        })?);
    }

    if let Some(button) = document.get_element_by_id(LOCATE_BUTTON_ID) {
        let p = page.clone();
        listeners.push(listen(&button, "click", move |event| {
            event.prevent_default();
            let p = p.clone();
            spawn_local(async move {
                p.use_current_location().await;
            });
        })?);
    }

    if let Some(search_input) = document.get_element_by_id(SEARCH_INPUT_ID) {
        let run_search = {
            let p = page.clone();
            let search_input = search_input.clone();
            move || {
                let query = search_input
                    .dyn_ref::<HtmlInputElement>()
                    .map(|i| i.value())
                    .unwrap_or_default();
                let p = p.clone();
                spawn_local(async move {
                    p.search_location(&query).await;
                });
            }
        };

        if let Some(button) = document.get_element_by_id(SEARCH_BUTTON_ID) {
            let run = run_search.clone();
            listeners.push(listen(&button, "click", move |event| {
                event.prevent_default();
                run();
            })?);
        }

        listeners.push(listen(&search_input, "keydown", move |event| {
            let enter = event
                .dyn_ref::<KeyboardEvent>()
                .map(|k| k.key() == "Enter")
                .unwrap_or(false);
            if enter {
                event.prevent_default();
                run_search();
            }
        })?);
    }

    Ok(listeners)
}

/// Key of the preview whose remove button was clicked
fn clicked_preview_key(event: &Event) -> Option<FileKey> {
    let target = event.target()?.dyn_into::<web_sys::Element>().ok()?;
    target.closest(".remove-media").ok()??;
    let tile = target.closest(".media-preview-item").ok()??;
    let name = tile.get_attribute("data-name")?;
    let size = tile.get_attribute("data-size")?.parse().ok()?;
    Some(FileKey::new(name, size))
}
