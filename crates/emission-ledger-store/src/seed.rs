//! Reference emission factor data the repository is seeded with.
//!
//! Hub categories use ids in the 100 range, transport categories the 200
//! range.

use emission_ledger_core::{
    Certification, EmissionFactorRecord, EnergyCarrier, HubRecord, TransportMode,
    TransportRecord,
};

/// Every id in the reference seed set, hubs first.
pub const SEED_IDS: [&str; 9] = ["100", "101", "102", "103", "200", "201", "202", "203", "204"];

fn carrier(name: &str, share: &str, wtw: &str, ttw: &str) -> EnergyCarrier {
    EnergyCarrier {
        energy_carrier: name.to_string(),
        relative_share: share.to_string(),
        emission_factor_wtw: wtw.to_string(),
        emission_factor_ttw: ttw.to_string(),
    }
}

fn hub(
    id: &str,
    hub_type: &str,
    energy_carriers: Vec<EnergyCarrier>,
    intensity: (&str, &str),
    unit: &str,
) -> EmissionFactorRecord {
    EmissionFactorRecord::Hub(HubRecord {
        hub_category_id: id.into(),
        passthrough_hub_type: hub_type.to_string(),
        energy_carriers,
        co2e_intensity_wtw: intensity.0.to_string(),
        co2e_intensity_ttw: intensity.1.to_string(),
        hub_activity_unit: unit.to_string(),
    })
}

struct Leg<'a> {
    id: &'a str,
    certifications: Vec<Certification>,
    description: &'a str,
    mode: TransportMode,
    load_factor: &'a str,
    empty_distance_factor: &'a str,
    temperature_control: &'a str,
    truck_loading_sequence: &'a str,
    air_shipping_option: Option<&'a str>,
    flight_length: Option<&'a str>,
    energy_carriers: Vec<EnergyCarrier>,
    intensity: (&'a str, &'a str),
    unit: &'a str,
}

impl Leg<'_> {
    fn into_record(self) -> EmissionFactorRecord {
        EmissionFactorRecord::Transport(TransportRecord {
            transport_category_id: self.id.into(),
            certifications: self.certifications,
            description: self.description.to_string(),
            mode: self.mode,
            load_factor: self.load_factor.to_string(),
            empty_distance_factor: self.empty_distance_factor.to_string(),
            temperature_control: self.temperature_control.to_string(),
            truck_loading_sequence: self.truck_loading_sequence.to_string(),
            air_shipping_option: self.air_shipping_option.map(str::to_string),
            flight_length: self.flight_length.map(str::to_string),
            energy_carriers: self.energy_carriers,
            co2e_intensity_wtw: self.intensity.0.to_string(),
            co2e_intensity_ttw: self.intensity.1.to_string(),
            transport_activity_unit: self.unit.to_string(),
        })
    }
}

/// Hub records of the seed set.
pub fn seed_hub_records() -> Vec<EmissionFactorRecord> {
    vec![
        hub(
            "100",
            "Charging Hub",
            vec![carrier("Electricity", "1.0", "25 gCO2e/MJ", "0 gCO2e/MJ")],
            ("25 gCO2e/MJ", "0 gCO2e/MJ"),
            "kWh delivered",
        ),
        hub(
            "101",
            "Refuelling Hub",
            vec![
                carrier("Hydrogen", "0.8", "70 gCO2e/MJ", "0 gCO2e/MJ"),
                carrier("Diesel", "0.2", "95 gCO2e/MJ", "73 gCO2e/MJ"),
            ],
            ("70 gCO2e/MJ", "0 gCO2e/MJ"),
            "kg dispensed",
        ),
        hub(
            "102",
            "Logistics Hub",
            vec![
                carrier("Electricity", "0.3", "25 gCO2e/MJ", "0 gCO2e/MJ"),
                carrier("Diesel", "0.7", "95 gCO2e/MJ", "73 gCO2e/MJ"),
            ],
            ("95 gCO2e/MJ", "73 gCO2e/MJ"),
            "number of vehicles serviced",
        ),
        hub(
            "103",
            "Multi-modal Energy Hub",
            vec![
                carrier("Electricity", "0.4", "25 gCO2e/MJ", "0 gCO2e/MJ"),
                carrier("HVO100", "0.35", "20 gCO2e/MJ", "15 gCO2e/MJ"),
                carrier("CNG", "0.25", "55 gCO2e/MJ", "50 gCO2e/MJ"),
            ],
            ("30 gCO2e/MJ", "20 gCO2e/MJ"),
            "energy delivered (MJ)",
        ),
    ]
}

/// Transport records of the seed set.
pub fn seed_transport_records() -> Vec<EmissionFactorRecord> {
    vec![
        Leg {
            id: "200",
            certifications: vec![Certification::Iso14083_2023, Certification::GlecV3],
            description: "Standard Diesel Truck - Long Haul",
            mode: TransportMode::Road,
            load_factor: "0.80",
            empty_distance_factor: "0.10",
            temperature_control: "Ambient",
            truck_loading_sequence: "LIFO",
            air_shipping_option: None,
            flight_length: None,
            energy_carriers: vec![carrier("Diesel", "1.0", "85 gCO2e/tkm", "75 gCO2e/tkm")],
            intensity: ("85 gCO2e/tkm", "75 gCO2e/tkm"),
            unit: "tkm",
        }
        .into_record(),
        Leg {
            id: "201",
            certifications: vec![Certification::GlecV3_1],
            description: "Electric Van - Urban Delivery",
            mode: TransportMode::Road,
            load_factor: "0.65",
            empty_distance_factor: "0.05",
            temperature_control: "None",
            truck_loading_sequence: "Optimized Route",
            air_shipping_option: None,
            flight_length: None,
            energy_carriers: vec![carrier("Electricity", "1.0", "30 gCO2e/tkm", "0 gCO2e/tkm")],
            intensity: ("30 gCO2e/tkm", "0 gCO2e/tkm"),
            unit: "vkm",
        }
        .into_record(),
        Leg {
            id: "202",
            certifications: vec![Certification::Iso14083_2023, Certification::GlecV2],
            description: "Air Freight - International Cargo",
            mode: TransportMode::Air,
            load_factor: "0.70",
            empty_distance_factor: "0.02",
            temperature_control: "Refrigerated +2C to +8C",
            truck_loading_sequence: "None",
            air_shipping_option: Some("Dedicated Cargo Aircraft"),
            flight_length: Some("Long Haul (>4000km)"),
            energy_carriers: vec![carrier(
                "Jet Fuel (Kerosene)",
                "1.0",
                "700 gCO2e/tkm",
                "650 gCO2e/tkm",
            )],
            intensity: ("700 gCO2e/tkm", "650 gCO2e/tkm"),
            unit: "tkm",
        }
        .into_record(),
        Leg {
            id: "203",
            certifications: vec![Certification::GlecV3, Certification::Iso14083_2023],
            description: "Electric Rail Freight - National",
            mode: TransportMode::Rail,
            load_factor: "0.90",
            empty_distance_factor: "0.03",
            temperature_control: "Ambient",
            truck_loading_sequence: "None",
            air_shipping_option: None,
            flight_length: None,
            energy_carriers: vec![carrier("Electricity", "1.0", "15 gCO2e/tkm", "0 gCO2e/tkm")],
            intensity: ("15 gCO2e/tkm", "0 gCO2e/tkm"),
            unit: "tkm",
        }
        .into_record(),
        Leg {
            id: "204",
            certifications: vec![Certification::GlecV3_1],
            description: "Container Ship - Transoceanic",
            mode: TransportMode::Sea,
            load_factor: "0.85",
            empty_distance_factor: "0.08",
            temperature_control: "Controlled Atmosphere (Fruits)",
            truck_loading_sequence: "None",
            air_shipping_option: None,
            flight_length: None,
            energy_carriers: vec![
                carrier("Heavy Fuel Oil (HFO)", "0.8", "12 gCO2e/tkm", "11 gCO2e/tkm"),
                carrier("Marine Gas Oil (MGO)", "0.2", "8 gCO2e/tkm", "7 gCO2e/tkm"),
            ],
            intensity: ("10 gCO2e/tkm", "9 gCO2e/tkm"),
            unit: "tkm",
        }
        .into_record(),
    ]
}

/// The full seed set, hubs first.
pub fn seed_records() -> Vec<EmissionFactorRecord> {
    let mut records = seed_hub_records();
    records.extend(seed_transport_records());
    records
}

/// The seed record for `id`, if it is part of the seed set.
pub fn seed_record(id: &str) -> Option<EmissionFactorRecord> {
    seed_records().into_iter().find(|r| r.id().as_str() == id)
}
