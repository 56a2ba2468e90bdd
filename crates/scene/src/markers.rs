use catalog::CountryCatalog;
use foundation::math::{Vec3, sphere_point};

use crate::GlobeConfig;

pub const MARKER_COLOR: u32 = 0xff6b6b;
pub const MARKER_HOVER_COLOR: u32 = 0xfeca57;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u32);

impl MarkerId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum MarkerState {
    #[default]
    Default,
    Hovered,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerStyle {
    pub color: u32,
    pub scale: f64,
}

impl MarkerState {
    pub fn style(self, config: &GlobeConfig) -> MarkerStyle {
        match self {
            MarkerState::Default => MarkerStyle {
                color: MARKER_COLOR,
                scale: 1.0,
            },
            MarkerState::Hovered => MarkerStyle {
                color: MARKER_HOVER_COLOR,
                scale: config.hover_scale,
            },
        }
    }
}

/// A country anchor on the globe.
///
/// `position` is in the globe's local (rotating) frame; markers follow the
/// globe's orientation without being recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    /// Catalog key of the country this marker stands for.
    pub owner: String,
    pub position: Vec3,
    pub state: MarkerState,
}

/// All markers of one globe, in creation order.
#[derive(Debug, Clone, Default)]
pub struct MarkerRegistry {
    markers: Vec<Marker>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// One marker per catalog record, in catalog order.
    pub fn from_catalog(catalog: &CountryCatalog, radius: f64) -> Self {
        let mut registry = Self::new();
        for record in catalog.iter() {
            registry.add_marker(record.key.clone(), sphere_point(record.position, radius));
        }
        registry
    }

    pub fn add_marker(&mut self, owner: impl Into<String>, position: Vec3) -> MarkerId {
        let id = MarkerId(self.markers.len() as u32);
        self.markers.push(Marker {
            id,
            owner: owner.into(),
            position,
            state: MarkerState::Default,
        });
        id
    }

    pub fn all(&self) -> &[Marker] {
        &self.markers
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn hovered(&self) -> Option<MarkerId> {
        self.markers
            .iter()
            .find(|m| m.state == MarkerState::Hovered)
            .map(|m| m.id)
    }

    pub fn reset_states(&mut self) {
        for marker in &mut self.markers {
            marker.state = MarkerState::Default;
        }
    }

    /// Resets every marker, then marks `id` (if any) as hovered.
    pub fn set_hovered(&mut self, id: Option<MarkerId>) {
        self.reset_states();
        if let Some(marker) = id.and_then(|id| self.markers.get_mut(id.index())) {
            marker.state = MarkerState::Hovered;
        }
    }

    /// True when every marker's owner is a key of `catalog`.
    pub fn owners_resolve_in(&self, catalog: &CountryCatalog) -> bool {
        self.markers.iter().all(|m| catalog.contains(&m.owner))
    }
}
