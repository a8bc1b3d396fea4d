//! Map interaction controller
//!
//! Owns the map widget and tracks the one selected location. There is never
//! more than one marker: a new selection moves the existing one.

use std::cell::Cell;

use shared::types::{Coordinate, MapViewport, DEFAULT_VIEWPORT, SELECTED_ZOOM};

use super::ports::MapView;

pub struct MapController<M: MapView> {
    map: M,
    marker: Cell<Option<Coordinate>>,
}

impl<M: MapView> MapController<M> {
    pub fn new(map: M) -> Self {
        Self {
            map,
            marker: Cell::new(None),
        }
    }

    /// Show the default view, or zoom to a coordinate the form was prefilled with
    pub fn initialize(&self, prefilled: Option<Coordinate>) {
        match prefilled {
            Some(at) => self.focus(at),
            None => self.map.set_view(DEFAULT_VIEWPORT),
        }
    }

    /// Create the marker, or move it if one already exists
    pub fn place_marker(&self, at: Coordinate) {
        if self.marker.get().is_some() {
            self.map.move_marker(at);
        } else {
            self.map.add_marker(at);
        }
        self.marker.set(Some(at));
    }

    /// Zoom to `at` and mark it
    pub fn focus(&self, at: Coordinate) {
        self.map.set_view(MapViewport {
            center: at,
            zoom: SELECTED_ZOOM,
        });
        self.place_marker(at);
    }

    /// Drop the marker and return to the default view
    pub fn clear(&self) {
        if self.marker.take().is_some() {
            self.map.remove_marker();
        }
        self.map.set_view(DEFAULT_VIEWPORT);
    }

    pub fn selected(&self) -> Option<Coordinate> {
        self.marker.get()
    }

    pub fn map(&self) -> &M {
        &self.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingMap {
        calls: RefCell<Vec<String>>,
    }

    impl MapView for RecordingMap {
        fn set_view(&self, viewport: MapViewport) {
            self.calls.borrow_mut().push(format!("view {}", viewport.zoom));
        }
        fn add_marker(&self, at: Coordinate) {
            self.calls.borrow_mut().push(format!("add {}", at.latitude));
        }
        fn move_marker(&self, at: Coordinate) {
            self.calls.borrow_mut().push(format!("move {}", at.latitude));
        }
        fn remove_marker(&self) {
            self.calls.borrow_mut().push("remove".into());
        }
        fn scroll_into_view(&self) {}
    }

    #[test]
    fn test_single_marker_is_relocated() {
        let controller = MapController::new(RecordingMap::default());
        controller.place_marker(Coordinate::new(13.0, 80.2));
        controller.place_marker(Coordinate::new(15.0, 73.8));
        assert_eq!(controller.selected(), Some(Coordinate::new(15.0, 73.8)));
        assert_eq!(
            *controller.map().calls.borrow(),
            vec!["add 13".to_string(), "move 15".to_string()]
        );
    }

    #[test]
    fn test_clear_removes_marker_and_recenters() {
        let controller = MapController::new(RecordingMap::default());
        controller.focus(Coordinate::new(13.0, 80.2));
        controller.clear();
        controller.clear();
        assert_eq!(controller.selected(), None);
        assert_eq!(
            *controller.map().calls.borrow(),
            vec!["view 13", "add 13", "remove", "view 5", "view 5"]
        );
    }

    #[test]
    fn test_initialize_with_prefilled_coordinate() {
        let controller = MapController::new(RecordingMap::default());
        controller.initialize(Some(Coordinate::new(9.9, 76.2)));
        assert_eq!(controller.selected(), Some(Coordinate::new(9.9, 76.2)));

        let controller = MapController::new(RecordingMap::default());
        controller.initialize(None);
        assert_eq!(controller.selected(), None);
        assert_eq!(*controller.map().calls.borrow(), vec!["view 5"]);
    }
}
