//! JavaScript glue for Leaflet, the device location API and timers

use wasm_bindgen::prelude::*;

#[wasm_bindgen(inline_js = r#"
export function hazard_create_map(containerId, tileUrl, attribution) {
    if (typeof L === 'undefined') {
        throw new Error('Leaflet map not available');
    }
    const map = L.map(containerId);
    L.tileLayer(tileUrl, { attribution, maxZoom: 18 }).addTo(map);
    return map;
}

export function hazard_set_view(map, lat, lng, zoom) {
    map.setView([lat, lng], zoom);
}

export function hazard_add_search_control(map, inputId, buttonId) {
    const control = L.control({ position: 'topright' });
    control.onAdd = function () {
        const div = L.DomUtil.create('div', 'leaflet-bar leaflet-control map-search');
        const input = L.DomUtil.create('input', 'map-search-input', div);
        input.type = 'text';
        input.id = inputId;
        input.placeholder = 'Search location...';
        const button = L.DomUtil.create('button', 'btn map-search-button', div);
        button.type = 'button';
        button.id = buttonId;
        button.innerHTML = '<i class="fas fa-search"></i>';
        L.DomEvent.disableClickPropagation(div);
        return div;
    };
    control.addTo(map);
}

export function hazard_add_marker(map, lat, lng, popupHtml) {
    const icon = L.divIcon({
        html: '<i class="fas fa-map-marker-alt"></i>',
        iconSize: [24, 24],
        className: 'custom-div-icon'
    });
    const marker = L.marker([lat, lng], { icon }).addTo(map);
    marker.bindPopup(popupHtml).openPopup();
    return marker;
}

export function hazard_move_marker(marker, lat, lng, popupHtml) {
    marker.setLatLng([lat, lng]);
    marker.setPopupContent(popupHtml);
}

export function hazard_remove_marker(map, marker) {
    map.removeLayer(marker);
}

export function hazard_on_map_click(map, callback) {
    map.on('click', (e) => callback(e.latlng.lat, e.latlng.lng));
}

export function hazard_current_position(highAccuracy, timeout, maximumAge) {
    return new Promise((resolve, reject) => {
        if (!navigator.geolocation) {
            reject(-1);
            return;
        }
        navigator.geolocation.getCurrentPosition(
            (position) => resolve([position.coords.latitude, position.coords.longitude]),
            (error) => reject(error.code),
            { enableHighAccuracy: highAccuracy, timeout, maximumAge }
        );
    });
}

export function hazard_sleep(ms) {
    return new Promise((resolve) => setTimeout(resolve, ms));
}
"#)]
extern "C" {
    /// A Leaflet `L.Map`
    #[derive(Clone)]
    pub type LeafletMap;

    /// A Leaflet `L.Marker`
    pub type LeafletMarker;

    #[wasm_bindgen(catch)]
    pub fn hazard_create_map(
        container_id: &str,
        tile_url: &str,
        attribution: &str,
    ) -> Result<LeafletMap, JsValue>;

    pub fn hazard_set_view(map: &LeafletMap, lat: f64, lng: f64, zoom: u8);

    /// Adds the search box and button, with the given element ids, to the
    /// top right corner of the map
    pub fn hazard_add_search_control(map: &LeafletMap, input_id: &str, button_id: &str);

    pub fn hazard_add_marker(map: &LeafletMap, lat: f64, lng: f64, popup_html: &str)
        -> LeafletMarker;

    pub fn hazard_move_marker(marker: &LeafletMarker, lat: f64, lng: f64, popup_html: &str);

    pub fn hazard_remove_marker(map: &LeafletMap, marker: &LeafletMarker);

    pub fn hazard_on_map_click(map: &LeafletMap, callback: &Closure<dyn FnMut(f64, f64)>);

    /// Resolves to `[lat, lng]`; rejects with the error code, or -1 when
    /// the API is missing
    pub fn hazard_current_position(
        high_accuracy: bool,
        timeout_ms: f64,
        maximum_age_ms: f64,
    ) -> js_sys::Promise;

    pub fn hazard_sleep(ms: f64) -> js_sys::Promise;
}
