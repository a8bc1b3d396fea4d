//! Leaflet map widget

use std::cell::RefCell;

use hazard_report_client::services::MapView;
use shared::format::marker_popup_html;
use shared::types::{Coordinate, MapViewport};
use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::bindings::{
    hazard_add_marker, hazard_add_search_control, hazard_create_map, hazard_move_marker,
    hazard_remove_marker, hazard_set_view, LeafletMap, LeafletMarker,
};
use crate::dom::{SEARCH_BUTTON_ID, SEARCH_INPUT_ID};

pub const MAP_CONTAINER_ID: &str = "locationMap";
const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors";

pub struct LeafletMapView {
    map: LeafletMap,
    marker: RefCell<Option<LeafletMarker>>,
    container: Option<Element>,
}

impl LeafletMapView {
    /// Create the map inside the `locationMap` element, with its search
    /// control
    pub fn mount(document: &web_sys::Document) -> Result<Self, JsValue> {
        let map = hazard_create_map(MAP_CONTAINER_ID, TILE_URL, TILE_ATTRIBUTION)?;
        hazard_add_search_control(&map, SEARCH_INPUT_ID, SEARCH_BUTTON_ID);
        Ok(Self {
            map,
            marker: RefCell::new(None),
            container: document.get_element_by_id(MAP_CONTAINER_ID),
        })
    }

    pub fn handle(&self) -> LeafletMap {
        self.map.clone()
    }
}

impl MapView for LeafletMapView {
    fn set_view(&self, viewport: MapViewport) {
        hazard_set_view(
            &self.map,
            viewport.center.latitude,
            viewport.center.longitude,
            viewport.zoom,
        );
    }

    fn add_marker(&self, at: Coordinate) {
        let popup = marker_popup_html(at);
        let marker = hazard_add_marker(&self.map, at.latitude, at.longitude, &popup);
        *self.marker.borrow_mut() = Some(marker);
    }

    fn move_marker(&self, at: Coordinate) {
        let moved = match self.marker.borrow().as_ref() {
            Some(marker) => {
                hazard_move_marker(marker, at.latitude, at.longitude, &marker_popup_html(at));
                true
            }
            None => false,
        };
        if !moved {
            self.add_marker(at);
        }
    }

    fn remove_marker(&self) {
        if let Some(marker) = self.marker.borrow_mut().take() {
            hazard_remove_marker(&self.map, &marker);
        }
    }

    fn scroll_into_view(&self) {
        if let Some(container) = &self.container {
            container.scroll_into_view();
        }
    }
}
