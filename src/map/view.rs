//! Lifecycle of one mounted map.
//!
//! A [`MapView`] owns at most one map instance at a time. The instance is
//! acquired on mount, replaced when the camera options change, and released
//! exactly once on unmount or drop. Data set before the instance reports
//! ready is held and drawn by [`MapView::on_load`].

use geojson::FeatureCollection;
use serde_json::Value;

use super::{parse_collection, render_geojson, MapEngine};
use crate::config::DEFAULT_MAP_STYLE_URL;

/// Options that identify a map instance. Changing them recreates the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    /// Initial `[lon, lat]`
    pub center: [f64; 2],
    pub zoom: f64,
    pub style_url: String,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0],
            zoom: 2.0,
            style_url: DEFAULT_MAP_STYLE_URL.to_string(),
        }
    }
}

type Factory<M> = Box<dyn FnMut(&MapOptions) -> M + Send>;

pub struct MapView<M: MapEngine> {
    options: MapOptions,
    factory: Factory<M>,
    map: Option<M>,
    loaded: bool,
    data: Option<FeatureCollection>,
}

impl<M: MapEngine> MapView<M> {
    /// Create the map instance. It is not ready until [`on_load`](Self::on_load).
    pub fn mount<F>(options: MapOptions, factory: F) -> Self
    where
        F: FnMut(&MapOptions) -> M + Send + 'static,
    {
        let mut factory: Factory<M> = Box::new(factory);
        let map = factory(&options);
        Self {
            options,
            factory,
            map: Some(map),
            loaded: false,
            data: None,
        }
    }

    /// One-shot ready callback. Draws any data received before it.
    pub fn on_load(&mut self) {
        if self.loaded || self.map.is_none() {
            return;
        }
        self.loaded = true;
        self.draw();
    }

    /// Show new GeoJSON. Absent, malformed, or empty input leaves the map as is.
    pub fn set_geojson(&mut self, geojson: Option<&Value>) {
        let Some(collection) = geojson.and_then(parse_collection) else {
            return;
        };
        if collection.features.is_empty() {
            return;
        }
        self.data = Some(collection);
        if self.loaded {
            self.draw();
        }
    }

    /// Apply new camera options, recreating the instance if they differ.
    ///
    /// The last data shown is drawn again once the new instance loads.
    pub fn set_options(&mut self, options: MapOptions) {
        if options == self.options {
            return;
        }
        self.dispose();
        self.map = Some((self.factory)(&options));
        self.options = options;
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn map(&self) -> Option<&M> {
        self.map.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Tear down the view, releasing the map instance.
    pub fn unmount(mut self) {
        self.dispose();
    }

    fn draw(&mut self) {
        if let (Some(map), Some(data)) = (self.map.as_mut(), self.data.as_ref()) {
            render_geojson(map, data);
        }
    }

    fn dispose(&mut self) {
        self.loaded = false;
        if let Some(mut map) = self.map.take() {
            if let Err(e) = map.remove() {
                tracing::debug!(error = %e, "Ignoring map disposal failure");
            }
        }
    }
}

impl<M: MapEngine> Drop for MapView<M> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{LayerSpec, LngLatBounds, MapError};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct Counters {
        created: AtomicUsize,
        removed: AtomicUsize,
        fits: AtomicUsize,
        source_writes: AtomicUsize,
    }

    struct CountingMap {
        counters: Arc<Counters>,
        has_source: bool,
        layers: Vec<&'static str>,
    }

    impl MapEngine for CountingMap {
        fn has_source(&self, _id: &str) -> bool {
            self.has_source
        }
        fn add_source(&mut self, _id: &str, _data: &FeatureCollection) {
            self.has_source = true;
            self.counters.source_writes.fetch_add(1, Ordering::SeqCst);
        }
        fn set_source_data(&mut self, _id: &str, _data: &FeatureCollection) {
            self.counters.source_writes.fetch_add(1, Ordering::SeqCst);
        }
        fn has_layer(&self, id: &str) -> bool {
            self.layers.contains(&id)
        }
        fn add_layer(&mut self, layer: LayerSpec) {
            self.layers.push(layer.id);
        }
        fn fit_bounds(&mut self, _bounds: &LngLatBounds, _padding: u32) {
            self.counters.fits.fetch_add(1, Ordering::SeqCst);
        }
        fn remove(&mut self) -> Result<(), MapError> {
            self.counters.removed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn mount(counters: &Arc<Counters>) -> MapView<CountingMap> {
        let counters = counters.clone();
        MapView::mount(MapOptions::default(), move |_| {
            counters.created.fetch_add(1, Ordering::SeqCst);
            CountingMap {
                counters: counters.clone(),
                has_source: false,
                layers: Vec::new(),
            }
        })
    }

    fn point_collection() -> Value {
        json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {"type": "Point", "coordinates": [100.5, -0.6]}
            }]
        })
    }

    #[test]
    fn test_data_waits_for_load() {
        let counters = Arc::new(Counters::default());
        let mut view = mount(&counters);

        view.set_geojson(Some(&point_collection()));
        assert_eq!(counters.source_writes.load(Ordering::SeqCst), 0);

        view.on_load();
        assert_eq!(counters.source_writes.load(Ordering::SeqCst), 1);
        assert_eq!(counters.fits.load(Ordering::SeqCst), 1);

        // Ready fires once.
        view.on_load();
        assert_eq!(counters.source_writes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_absent_or_empty_data_is_ignored() {
        let counters = Arc::new(Counters::default());
        let mut view = mount(&counters);
        view.on_load();

        view.set_geojson(None);
        view.set_geojson(Some(&json!({"type": "FeatureCollection", "features": []})));
        view.set_geojson(Some(&json!("not geojson")));

        assert_eq!(counters.source_writes.load(Ordering::SeqCst), 0);
        assert_eq!(counters.fits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unmount_disposes_once() {
        let counters = Arc::new(Counters::default());
        let view = mount(&counters);
        view.unmount();

        assert_eq!(counters.created.load(Ordering::SeqCst), 1);
        assert_eq!(counters.removed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_disposes() {
        let counters = Arc::new(Counters::default());
        {
            let _view = mount(&counters);
        }
        assert_eq!(counters.removed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_option_change_recreates_and_redraws() {
        let counters = Arc::new(Counters::default());
        let mut view = mount(&counters);
        view.on_load();
        view.set_geojson(Some(&point_collection()));

        // Same options: nothing happens.
        view.set_options(MapOptions::default());
        assert_eq!(counters.created.load(Ordering::SeqCst), 1);

        view.set_options(MapOptions {
            zoom: 9.0,
            ..MapOptions::default()
        });
        assert_eq!(counters.created.load(Ordering::SeqCst), 2);
        assert_eq!(counters.removed.load(Ordering::SeqCst), 1);
        assert!(!view.is_loaded());
        assert_eq!(view.options().zoom, 9.0);

        view.on_load();
        assert_eq!(counters.source_writes.load(Ordering::SeqCst), 2);
        assert!(view.map().unwrap().has_layer("points"));

        drop(view);
        assert_eq!(counters.removed.load(Ordering::SeqCst), 2);
    }
}
