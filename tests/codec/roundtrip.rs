//! read_data(write_data(e)) reproduces e

use crate::common::*;
use hepmc::compare::{equivalent, identical};
use hepmc::{AttributeValue, HeavyIon, PdfInfo, CYCLES_ATTRIBUTE};
use proptest::prelude::*;

fn roundtrip(event: &Event) -> Event {
    Event::from_data(&event.write_data()).unwrap()
}

#[test]
fn test_drell_yan_roundtrip() {
    let event = drell_yan();
    let back = roundtrip(&event);
    assert!(identical(&event, &back));
    assert!(equivalent(&event, &back));
    assert_invariants(&back);
    assert_eq!(back.attribute::<i32>("flow1", 4), Some(501));
    assert_eq!(back.attribute_as_string("note", -3), "hadronization");
}

#[test]
fn test_units_weights_and_position_survive() {
    let mut event = drell_yan();
    event.set_units(MomentumUnit::MeV, LengthUnit::Cm);
    event.shift_position_to(FourVector::new(0.1, 0.2, 0.3, 0.4));
    *event.weights_mut() = vec![0.5, 1.5, -2.0];
    event.particle_data_mut(ParticleId::from_index(2)).unwrap().mass = Some(91187.6);

    let back = roundtrip(&event);
    assert_eq!(back.momentum_unit(), MomentumUnit::MeV);
    assert_eq!(back.length_unit(), LengthUnit::Cm);
    assert_eq!(back.event_pos(), event.event_pos());
    assert_eq!(back.weights(), &[0.5, 1.5, -2.0]);
    assert_eq!(
        back.particle(ParticleId::from_index(2)).unwrap().generated_mass(),
        91187.6
    );
    assert!(identical(&event, &back));
}

#[test]
fn test_physics_records_roundtrip() {
    let mut event = drell_yan();
    let heavy_ion = HeavyIon {
        ncoll_hard: 1,
        npart_proj: 2,
        npart_targ: 3,
        ncoll: 4,
        impact_parameter: 1.25,
        centrality: 0.5,
        ..HeavyIon::default()
    };
    let pdf = PdfInfo {
        parton_id: [21, 2],
        x: [0.01, 0.2],
        scale: 91.2,
        xf: [0.5, 0.25],
        pdf_id: [230000, 230000],
    };
    event.add_attribute("GenHeavyIon", heavy_ion, EVENT_OWNER);
    event.add_attribute("GenPdfInfo", pdf, EVENT_OWNER);
    event.add_attribute("weights", AttributeValue::VectorDouble(vec![1.0, 0.25]), -1);

    let back = roundtrip(&event);
    assert_eq!(back.attribute::<HeavyIon>("GenHeavyIon", EVENT_OWNER), Some(heavy_ion));
    assert_eq!(back.attribute::<PdfInfo>("GenPdfInfo", EVENT_OWNER), Some(pdf));
    assert_eq!(back.attribute::<Vec<f64>>("weights", -1), Some(vec![1.0, 0.25]));
    assert!(equivalent(&event, &back));
}

#[test]
fn test_cycle_marker_roundtrip() {
    let mut tree = DecayTree::new();
    let a = tree.add_particle(particle(1, 2));
    let b = tree.add_particle(particle(2, 2));
    let v1 = tree.add_vertex(Default::default());
    let v2 = tree.add_vertex(Default::default());
    tree.add_particle_out(v1, a);
    tree.add_particle_in(v2, a);
    tree.add_particle_out(v2, b);
    tree.add_particle_in(v1, b);

    let mut event = Event::new();
    assert!(event.add_tree(tree).was_cyclic());

    let back = roundtrip(&event);
    assert!(identical(&event, &back));
    assert_eq!(back.attribute::<bool>(CYCLES_ATTRIBUTE, EVENT_OWNER), Some(true));
    assert_invariants(&back);
}

#[test]
fn test_removal_then_roundtrip() {
    let mut event = drell_yan();
    event.remove_particle(ParticleId::from_index(2)).unwrap();
    let back = roundtrip(&event);
    assert!(identical(&event, &back));
    assert_eq!(back.attribute::<i32>("flow1", 3), Some(501));
}

#[test]
fn test_binary_blob_roundtrip() {
    let data = drell_yan().write_data();
    let bytes = data.to_bytes().unwrap();
    let decoded = EventData::from_bytes(&bytes).unwrap();
    assert_eq!(decoded, data);
    assert!(identical(&drell_yan(), &Event::from_data(&decoded).unwrap()));
}

#[test]
fn test_json_roundtrip_of_flat_form() {
    let data = drell_yan().write_data();
    let json = serde_json::to_string(&data).unwrap();
    let decoded: EventData = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, data);
}

fn random_event(shape: &[(u8, u8, bool)]) -> Event {
    let mut event = Event::new();
    let mut open: Vec<ParticleId> = Vec::new();
    for (i, &(take, produce, positioned)) in shape.iter().enumerate() {
        let mut vertex = if positioned {
            Vertex::with_position(FourVector::new(i as f64, 0.0, 0.5, 1.0))
        } else {
            Vertex::new()
        };
        let take = (take as usize).min(open.len());
        if take == 0 {
            vertex.add_particle_in(particle(2212, 4));
        }
        for id in open.drain(..take) {
            vertex.add_particle_in(id);
        }
        for k in 0..produce {
            vertex.add_particle_out(particle(i as i32 * 10 + k as i32, 1));
        }
        let before = event.particle_count();
        let id = event.add_vertex(vertex);
        if i % 3 == 0 {
            event.add_attribute("depth", i as i32, id.get());
        }
        let first_new = before + usize::from(take == 0);
        open.extend((first_new..event.particle_count()).map(ParticleId::from_index));
    }
    event
}

proptest! {
    /// Invariant: the flat form reproduces any acyclic event exactly.
    #[test]
    fn flat_form_roundtrips(
        shape in prop::collection::vec((0u8..3, 1u8..4, any::<bool>()), 0..15),
        number in any::<i64>(),
    ) {
        let mut event = random_event(&shape);
        event.set_event_number(number);
        let back = roundtrip(&event);
        prop_assert!(identical(&event, &back));
        prop_assert!(equivalent(&event, &back));
        assert_invariants(&back);
    }
}
