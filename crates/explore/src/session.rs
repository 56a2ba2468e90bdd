use catalog::{CountryCatalog, DataOrigin, LoadedCatalog};
use scene::{Globe, GlobeConfig, GlobeError, PointerEvent, PointerResponse, Viewport};

use crate::info_panel::{DetailView, InfoPanel};
use crate::search::{SearchFilter, SearchOutcome};

/// Everything one open page owns: the catalog, the optional globe view and
/// the panels driven by it.
#[derive(Debug)]
pub struct Session {
    catalog: CountryCatalog,
    origin: DataOrigin,
    globe: Option<Globe>,
    info: InfoPanel,
    search: SearchFilter,
}

impl Session {
    pub fn new(loaded: LoadedCatalog) -> Self {
        Self {
            catalog: loaded.catalog,
            origin: loaded.origin,
            globe: None,
            info: InfoPanel::new(),
            search: SearchFilter::default(),
        }
    }

    pub fn catalog(&self) -> &CountryCatalog {
        &self.catalog
    }

    pub fn origin(&self) -> DataOrigin {
        self.origin
    }

    pub fn globe(&self) -> Option<&Globe> {
        self.globe.as_ref()
    }

    pub fn globe_mut(&mut self) -> Option<&mut Globe> {
        self.globe.as_mut()
    }

    pub fn info(&self) -> &InfoPanel {
        &self.info
    }

    /// Creates the globe view. Replaces any previous one.
    pub fn attach_globe(
        &mut self,
        config: GlobeConfig,
        viewport: Viewport,
    ) -> Result<&mut Globe, GlobeError> {
        let globe = Globe::new(config, &self.catalog, viewport)?;
        Ok(self.globe.insert(globe))
    }

    pub fn detach_globe(&mut self) -> Option<Globe> {
        self.globe.take()
    }

    pub fn search(&self, query: &str) -> SearchOutcome {
        self.search.filter(&self.catalog, query)
    }

    /// Shows `key` in the panel and turns the globe toward it.
    /// Returns `false` for an unknown key.
    pub fn select_country(&mut self, key: &str, view: &mut impl DetailView) -> bool {
        if !self.info.show(&self.catalog, key, view) {
            tracing::debug!(country = key, "selection ignored, unknown country");
            return false;
        }
        if let (Some(globe), Some(record)) = (self.globe.as_mut(), self.catalog.get(key)) {
            globe.focus(record.position);
        }
        true
    }

    /// Routes a pointer event to the globe; a clicked marker opens its
    /// country in the panel without rotating.
    ///
    /// `view` is only called when a marker was clicked, so drag and hover
    /// keep working when the panel cannot be reached.
    pub fn handle_pointer<V: DetailView>(
        &mut self,
        event: PointerEvent,
        view: impl FnOnce() -> Option<V>,
    ) -> PointerResponse {
        let Some(globe) = self.globe.as_mut() else {
            return PointerResponse::default();
        };
        let response = globe.handle_pointer(event);
        if let Some(key) = &response.selected {
            match view() {
                Some(mut view) => {
                    self.info.show(&self.catalog, key, &mut view);
                }
                None => tracing::debug!(country = %key, "no detail view for selection"),
            }
        }
        response
    }

    /// Swaps in freshly loaded data and rebuilds the markers.
    pub fn replace_catalog(&mut self, loaded: LoadedCatalog) -> Result<(), GlobeError> {
        if let Some(globe) = self.globe.as_mut() {
            globe.rebuild_markers(&loaded.catalog)?;
        }
        self.catalog = loaded.catalog;
        self.origin = loaded.origin;
        Ok(())
    }

    /// Resets the globe and hides the panel, if `view` yields one.
    pub fn reset_globe<V: DetailView>(&mut self, view: impl FnOnce() -> Option<V>) {
        if let Some(globe) = self.globe.as_mut() {
            globe.reset();
        }
        match view() {
            Some(mut view) => self.info.hide(&mut view),
            None => self.info.clear(),
        }
    }

    /// Returns the new flag, or `None` without a globe.
    pub fn toggle_auto_rotation(&mut self) -> Option<bool> {
        self.globe.as_mut().map(Globe::toggle_auto_rotation)
    }
}
