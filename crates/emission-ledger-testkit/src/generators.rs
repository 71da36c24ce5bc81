//! Proptest generators for property-based testing.

use proptest::prelude::*;

use emission_ledger_core::{
    append_element, footprint_template, Category, CategoryId, ChainElement, CoreError, Distance,
    ElementId, ProductFootprint, ShipmentInfo,
};

/// Generate a category id in the seeded numbering scheme.
pub fn category_id() -> impl Strategy<Value = CategoryId> {
    "[1-9][0-9]{2}".prop_map(CategoryId::new)
}

/// Generate a hub or transport category.
pub fn category() -> impl Strategy<Value = Category> {
    prop_oneof![
        category_id().prop_map(Category::Hub),
        category_id().prop_map(Category::Transport),
    ]
}

/// Generate an element id.
pub fn element_id() -> impl Strategy<Value = ElementId> {
    "[a-f0-9]{8}-[a-f0-9]{4}".prop_map(ElementId::new)
}

/// Generate a shipment mass in kilograms.
pub fn mass() -> impl Strategy<Value = f64> {
    0.0f64..50_000.0
}

/// Generate an optional measured distance.
pub fn distance() -> impl Strategy<Value = Option<f64>> {
    proptest::option::of(0.0f64..40_000.0)
}

/// Generate a shipment.
pub fn shipment() -> impl Strategy<Value = ShipmentInfo> {
    ("[A-Z]{1,3}[0-9]{1,6}", mass()).prop_map(|(id, mass)| ShipmentInfo::new(id, mass))
}

/// Generate a structurally valid chain element.
pub fn chain_element() -> impl Strategy<Value = ChainElement> {
    (
        element_id(),
        prop::collection::vec(element_id(), 0..8),
        category(),
        "[A-Z][0-9]{1,4}",
        mass(),
        distance(),
    )
        .prop_map(|(element_id, ancestor_ids, category, shipment_id, mass, actual)| {
            let (hub_category_id, transport_category_id) = match category {
                Category::Hub(id) => (Some(id), None),
                Category::Transport(id) => (None, Some(id)),
            };
            ChainElement {
                element_id,
                ancestor_ids,
                hub_category_id,
                transport_category_id,
                shipment_id,
                mass,
                co2e_wtw: None,
                co2e_ttw: None,
                transport_activity: None,
                distance: actual.map(Distance::measured),
            }
        })
}

/// Parameters for building a footprint chain.
#[derive(Debug, Clone)]
pub struct ChainParams {
    pub shipment: ShipmentInfo,
    pub steps: Vec<(Category, Option<f64>)>,
}

impl Arbitrary for ChainParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (shipment(), prop::collection::vec((category(), distance()), 0..24))
            .prop_map(|(shipment, steps)| ChainParams { shipment, steps })
            .boxed()
    }
}

/// Build the footprint described by `params`.
pub fn footprint_from_params(params: &ChainParams) -> Result<ProductFootprint, CoreError> {
    let mut footprint = footprint_template("Proptest Freight", &params.shipment);
    for (category, distance) in &params.steps {
        footprint = append_element(&footprint, category.clone(), *distance)?;
    }
    Ok(footprint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use emission_ledger_core::{
        document_digest, parse_chain_element, parse_footprint, validate_chain_element,
        verify_lineage,
    };
    use std::collections::HashSet;

    proptest! {
        #[test]
        fn test_append_grows_chain_by_one(
            params in any::<ChainParams>(),
            next in category(),
            d in distance(),
        ) {
            let footprint = footprint_from_params(&params).unwrap();
            let n = footprint.chain_len();

            let appended = append_element(&footprint, next, d).unwrap();
            prop_assert_eq!(appended.chain_len(), n + 1);
            prop_assert_eq!(appended.head().unwrap().ancestor_ids.len(), n);
            // Input is not mutated.
            prop_assert_eq!(footprint.chain_len(), n);
        }

        #[test]
        fn test_lineage_holds_for_built_chains(params: ChainParams) {
            let footprint = footprint_from_params(&params).unwrap();
            let chain = footprint.chain();

            prop_assert!(verify_lineage(chain).is_ok());

            let ids: HashSet<_> = chain.iter().map(|e| &e.element_id).collect();
            prop_assert_eq!(ids.len(), chain.len());

            for pair in chain.windows(2) {
                prop_assert!(pair[0].ancestor_ids.len() <= pair[1].ancestor_ids.len());
            }
        }

        #[test]
        fn test_shipment_fields_copied_to_every_element(params: ChainParams) {
            let footprint = footprint_from_params(&params).unwrap();
            for element in footprint.chain() {
                prop_assert_eq!(&element.shipment_id, &params.shipment.shipment_id);
                prop_assert_eq!(element.mass, params.shipment.shipment_weight);
            }
        }

        #[test]
        fn test_chain_element_round_trip(element in chain_element()) {
            prop_assert!(validate_chain_element(&element).is_ok());

            let text = serde_json::to_string(&element).unwrap();
            let value: serde_json::Value = serde_json::from_str(&text).unwrap();
            let reparsed = parse_chain_element(&value).unwrap();
            prop_assert_eq!(reparsed, element);
        }

        #[test]
        fn test_digest_survives_json_text(params: ChainParams) {
            let footprint = footprint_from_params(&params).unwrap();
            let text = serde_json::to_string(&footprint).unwrap();
            let value: serde_json::Value = serde_json::from_str(&text).unwrap();
            let reparsed = parse_footprint(&value).unwrap();

            prop_assert_eq!(&reparsed, &footprint);
            prop_assert_eq!(
                document_digest(&footprint).unwrap(),
                document_digest(&reparsed).unwrap()
            );
        }

        #[test]
        fn test_digest_deterministic(params: ChainParams) {
            let footprint = footprint_from_params(&params).unwrap();
            let reparsed: ProductFootprint =
                serde_json::from_value(serde_json::to_value(&footprint).unwrap()).unwrap();

            prop_assert_eq!(
                document_digest(&footprint).unwrap(),
                document_digest(&reparsed).unwrap()
            );
        }
    }
}
