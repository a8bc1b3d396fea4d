//! Workflow services of the hazard report page

pub mod location;
pub mod map;
pub mod media;
pub mod page;
pub mod ports;
pub mod submission;
#[cfg(not(target_arch = "wasm32"))]
pub mod timer;
pub mod weather;

pub use location::{DeviceLocation, FoundPlace, PlaceLookup};
pub use map::MapController;
pub use media::MediaManager;
pub use page::{PageParts, ReportPage};
pub use ports::{
    Control, FormView, GeolocationError, Geocoder, Geolocator, MapView, Notifier, PagePorts,
    PositionOptions, ReportSink, Timer, WeatherSource,
};
pub use submission::{SubmissionCoordinator, SubmitContext};
#[cfg(not(target_arch = "wasm32"))]
pub use timer::TokioTimer;
pub use weather::{WeatherEnricher, WeatherUpdate};
