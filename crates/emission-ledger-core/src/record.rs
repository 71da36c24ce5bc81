//! Emission factor records: hub and transport reference data.
//!
//! Intensities and shares are kept as the human-readable strings they are
//! certified as (`"85 gCO2e/tkm"`). They are never parsed here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::{CategoryId, CategoryKind};

/// Certification scheme a transport category is audited against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Certification {
    #[serde(rename = "ISO14083:2023")]
    Iso14083_2023,
    #[serde(rename = "ISO_14001")]
    Iso14001,
    #[serde(rename = "ECO_TRANSIT_CERT")]
    EcoTransitCert,
    #[serde(rename = "GLECv2")]
    GlecV2,
    #[serde(rename = "GLECv3")]
    GlecV3,
    #[serde(rename = "GLECv3.1")]
    GlecV3_1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Road,
    Air,
    Sea,
    Rail,
}

impl TransportMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Road => "road",
            TransportMode::Air => "air",
            TransportMode::Sea => "sea",
            TransportMode::Rail => "rail",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "road" => Ok(TransportMode::Road),
            "air" => Ok(TransportMode::Air),
            "sea" => Ok(TransportMode::Sea),
            "rail" => Ok(TransportMode::Rail),
            other => Err(format!("unknown transport mode: {other}")),
        }
    }
}

/// Share of one energy carrier in a category's energy mix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyCarrier {
    pub energy_carrier: String,
    pub relative_share: String,
    #[serde(rename = "emissionFactorWTW")]
    pub emission_factor_wtw: String,
    #[serde(rename = "emissionFactorTTW")]
    pub emission_factor_ttw: String,
}

/// Emission factors of a hub operation category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubRecord {
    #[serde(rename = "hocId")]
    pub hub_category_id: CategoryId,
    #[serde(rename = "passhubType")]
    pub passthrough_hub_type: String,
    pub energy_carriers: Vec<EnergyCarrier>,
    #[serde(rename = "co2eIntensityWTW")]
    pub co2e_intensity_wtw: String,
    #[serde(rename = "co2eIntensityTTW")]
    pub co2e_intensity_ttw: String,
    pub hub_activity_unit: String,
}

/// Emission factors of a transport operation category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportRecord {
    #[serde(rename = "tocId")]
    pub transport_category_id: CategoryId,
    pub certifications: Vec<Certification>,
    pub description: String,
    pub mode: TransportMode,
    pub load_factor: String,
    pub empty_distance_factor: String,
    pub temperature_control: String,
    pub truck_loading_sequence: String,
    #[serde(default)]
    pub air_shipping_option: Option<String>,
    #[serde(default)]
    pub flight_length: Option<String>,
    pub energy_carriers: Vec<EnergyCarrier>,
    #[serde(rename = "co2eIntensityWTW")]
    pub co2e_intensity_wtw: String,
    #[serde(rename = "co2eIntensityTTW")]
    pub co2e_intensity_ttw: String,
    pub transport_activity_unit: String,
}

/// A record from the emission factor repository.
///
/// On the wire the variant is recognised by the presence of `hocId` or
/// `tocId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmissionFactorRecord {
    Hub(HubRecord),
    Transport(TransportRecord),
}

impl EmissionFactorRecord {
    pub fn id(&self) -> &CategoryId {
        match self {
            EmissionFactorRecord::Hub(hub) => &hub.hub_category_id,
            EmissionFactorRecord::Transport(transport) => &transport.transport_category_id,
        }
    }

    pub fn kind(&self) -> CategoryKind {
        match self {
            EmissionFactorRecord::Hub(_) => CategoryKind::Hub,
            EmissionFactorRecord::Transport(_) => CategoryKind::Transport,
        }
    }

    pub fn as_hub(&self) -> Option<&HubRecord> {
        match self {
            EmissionFactorRecord::Hub(hub) => Some(hub),
            EmissionFactorRecord::Transport(_) => None,
        }
    }

    pub fn as_transport(&self) -> Option<&TransportRecord> {
        match self {
            EmissionFactorRecord::Transport(transport) => Some(transport),
            EmissionFactorRecord::Hub(_) => None,
        }
    }
}

impl From<HubRecord> for EmissionFactorRecord {
    fn from(record: HubRecord) -> Self {
        EmissionFactorRecord::Hub(record)
    }
}

impl From<TransportRecord> for EmissionFactorRecord {
    fn from(record: TransportRecord) -> Self {
        EmissionFactorRecord::Transport(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_untagged_variant_discrimination() {
        let hub: EmissionFactorRecord = serde_json::from_value(json!({
            "hocId": "100",
            "passhubType": "Charging Hub",
            "energyCarriers": [{
                "energyCarrier": "Electricity",
                "relativeShare": "1.0",
                "emissionFactorWTW": "25 gCO2e/MJ",
                "emissionFactorTTW": "0 gCO2e/MJ"
            }],
            "co2eIntensityWTW": "25 gCO2e/MJ",
            "co2eIntensityTTW": "0 gCO2e/MJ",
            "hubActivityUnit": "kWh delivered"
        }))
        .unwrap();
        assert_eq!(hub.kind(), CategoryKind::Hub);
        assert_eq!(hub.id().as_str(), "100");

        let transport: EmissionFactorRecord = serde_json::from_value(json!({
            "tocId": "202",
            "certifications": ["ISO14083:2023", "GLECv2"],
            "description": "Air Freight - International Cargo",
            "mode": "air",
            "loadFactor": "0.70",
            "emptyDistanceFactor": "0.02",
            "temperatureControl": "Refrigerated +2C to +8C",
            "truckLoadingSequence": "None",
            "airShippingOption": "Dedicated Cargo Aircraft",
            "flightLength": "Long Haul (>4000km)",
            "energyCarriers": [],
            "co2eIntensityWTW": "700 gCO2e/tkm",
            "co2eIntensityTTW": "650 gCO2e/tkm",
            "transportActivityUnit": "tkm"
        }))
        .unwrap();
        let record = transport.as_transport().unwrap();
        assert_eq!(record.mode, TransportMode::Air);
        assert_eq!(
            record.certifications,
            vec![Certification::Iso14083_2023, Certification::GlecV2]
        );
        assert!(transport.as_hub().is_none());
    }

    #[test]
    fn test_unknown_certification_rejected() {
        let result: Result<Certification, _> = serde_json::from_value(json!("GLECv9"));
        assert!(result.is_err());
    }

    #[test]
    fn test_transport_mode_strings() {
        for mode in [
            TransportMode::Road,
            TransportMode::Air,
            TransportMode::Sea,
            TransportMode::Rail,
        ] {
            assert_eq!(mode.as_str().parse::<TransportMode>().unwrap(), mode);
            assert_eq!(serde_json::to_value(mode).unwrap(), json!(mode.as_str()));
        }
        assert!("hovercraft".parse::<TransportMode>().is_err());
    }
}
