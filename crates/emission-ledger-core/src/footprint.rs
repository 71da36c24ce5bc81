//! Footprint documents: the shipment-level declaration and its chain.
//!
//! A footprint holds one or more extensions. The first extension is the
//! active chain holder; its `tces` list is the append-only chain of elements
//! for the shipment.

use serde::{Deserialize, Serialize};

use crate::types::{Category, CategoryId, ElementId};

/// Spec version stamped on footprints and extensions.
pub const DEFAULT_SPEC_VERSION: &str = "2.0.0";

/// Status of a freshly created footprint.
pub const DEFAULT_STATUS: &str = "Active";

/// Data schema of the shipment-footprint extension.
pub const SHIPMENT_FOOTPRINT_SCHEMA: &str = "https://api.ileap.sine.dev/shipment-footprint.json";

fn default_spec_version() -> String {
    DEFAULT_SPEC_VERSION.to_string()
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

/// Distances for a transport leg, all in kilometres.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    /// Measured distance.
    pub actual: Option<f64>,
    /// Great-circle distance.
    pub gcd: Option<f64>,
    /// Shortest feasible distance.
    pub sfd: Option<f64>,
}

impl Distance {
    /// A distance carrying only a measured value.
    pub fn measured(actual: f64) -> Self {
        Self {
            actual: Some(actual),
            ..Self::default()
        }
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = f64> + '_ {
        [self.actual, self.gcd, self.sfd].into_iter().flatten()
    }
}

/// One traceable event for a shipment: a hub visit or a transport leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainElement {
    #[serde(rename = "tceId")]
    pub element_id: ElementId,

    /// Every predecessor id, oldest first.
    #[serde(rename = "prevTceIds", default)]
    pub ancestor_ids: Vec<ElementId>,

    #[serde(rename = "hocId", default)]
    pub hub_category_id: Option<CategoryId>,

    #[serde(rename = "tocId", default)]
    pub transport_category_id: Option<CategoryId>,

    pub shipment_id: String,

    pub mass: f64,

    #[serde(rename = "co2eWTW", default)]
    pub co2e_wtw: Option<f64>,

    #[serde(rename = "co2eTTW", default)]
    pub co2e_ttw: Option<f64>,

    #[serde(default)]
    pub transport_activity: Option<f64>,

    #[serde(default)]
    pub distance: Option<Distance>,
}

impl ChainElement {
    /// The category this element refers to.
    ///
    /// Returns `None` for a placeholder (no category) and for an element that
    /// illegally carries both.
    pub fn category(&self) -> Option<Category> {
        match (&self.hub_category_id, &self.transport_category_id) {
            (Some(hub), None) => Some(Category::Hub(hub.clone())),
            (None, Some(transport)) => Some(Category::Transport(transport.clone())),
            _ => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.hub_category_id.is_none() && self.transport_category_id.is_none()
    }

    /// Immediate predecessor, if any.
    pub fn parent_id(&self) -> Option<&ElementId> {
        self.ancestor_ids.last()
    }

    pub fn measured_distance(&self) -> Option<f64> {
        self.distance.as_ref().and_then(|d| d.actual)
    }
}

/// Payload of a shipment-footprint extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionData {
    pub mass: f64,

    pub shipment_id: String,

    #[serde(rename = "tces", default)]
    pub elements: Vec<ChainElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    #[serde(default = "default_spec_version")]
    pub spec_version: String,

    pub data_schema: String,

    pub data: ExtensionData,
}

impl Extension {
    /// A shipment-footprint extension with an empty chain.
    pub fn shipment(mass: f64, shipment_id: impl Into<String>) -> Self {
        Self {
            spec_version: default_spec_version(),
            data_schema: SHIPMENT_FOOTPRINT_SCHEMA.to_string(),
            data: ExtensionData {
                mass,
                shipment_id: shipment_id.into(),
                elements: Vec::new(),
            },
        }
    }
}

/// A shipment-level product footprint declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFootprint {
    pub id: String,

    #[serde(default = "default_spec_version")]
    pub spec_version: String,

    #[serde(default)]
    pub version: i32,

    pub created: String,

    #[serde(default = "default_status")]
    pub status: String,

    pub company_name: String,

    pub company_ids: Vec<String>,

    pub product_description: String,

    pub product_ids: Vec<String>,

    pub product_category_cpc: i32,

    pub product_name_company: String,

    #[serde(default)]
    pub pcf: Option<f64>,

    #[serde(default)]
    pub comment: String,

    #[serde(default)]
    pub extensions: Vec<Extension>,
}

impl ProductFootprint {
    /// The extension holding the chain (always the first one).
    pub fn active_extension(&self) -> Option<&Extension> {
        self.extensions.first()
    }

    /// The chain of the active extension; empty when there is none.
    pub fn chain(&self) -> &[ChainElement] {
        self.active_extension()
            .map(|ext| ext.data.elements.as_slice())
            .unwrap_or_default()
    }

    pub fn chain_len(&self) -> usize {
        self.chain().len()
    }

    /// The most recently appended element.
    pub fn head(&self) -> Option<&ChainElement> {
        self.chain().last()
    }
}
