//! Unit conversion

use crate::common::*;

#[test]
fn test_same_units_is_a_no_op() {
    let mut event = drell_yan();
    event.particle_data_mut(ParticleId::from_index(0)).unwrap().mass = Some(0.938);
    let before = event.write_data();

    event.set_units(MomentumUnit::GeV, LengthUnit::Mm);
    assert_eq!(event.write_data(), before);
}

#[test]
fn test_momentum_conversion() {
    let mut event = drell_yan();
    event.particle_data_mut(ParticleId::from_index(0)).unwrap().mass = Some(0.938);
    let before: Vec<FourVector> = event.particles().map(|p| p.momentum()).collect();

    event.set_units(MomentumUnit::MeV, LengthUnit::Mm);
    assert_eq!(event.momentum_unit(), MomentumUnit::MeV);
    for (p, old) in event.particles().zip(&before) {
        assert!(p.momentum().is_close(&(*old * 1000.0), 1e-9));
    }
    let mass = event.particle(ParticleId::from_index(0)).unwrap().data().mass.unwrap();
    assert!((mass - 938.0).abs() < 1e-9);

    // positions untouched
    let hard = event.vertex(VertexId::from_index(0)).unwrap();
    assert_eq!(hard.data().position, Some(FourVector::new(0.0, 0.0, 0.1, 0.0)));
}

#[test]
fn test_length_conversion_skips_unset_positions() {
    let mut event = drell_yan();
    event.shift_position_to(FourVector::new(0.0, 0.0, 2.0, 0.0));
    event.set_units(MomentumUnit::GeV, LengthUnit::Cm);

    assert_eq!(event.length_unit(), LengthUnit::Cm);
    let hadronization = event.vertex(VertexId::from_index(2)).unwrap();
    assert!(hadronization
        .data()
        .position
        .unwrap()
        .is_close(&FourVector::new(0.05, 0.05, 0.25, 0.1), 1e-12));
    assert!(event.event_pos().is_close(&FourVector::new(0.0, 0.0, 0.2, 0.0), 1e-12));
    assert_eq!(event.vertex(VertexId::from_index(1)).unwrap().data().position, None);
}

#[test]
fn test_conversion_there_and_back() {
    let original = drell_yan();
    let mut event = original.clone();
    event.set_units(MomentumUnit::MeV, LengthUnit::Cm);
    event.set_units(MomentumUnit::GeV, LengthUnit::Mm);

    for (a, b) in event.particles().zip(original.particles()) {
        assert!(a.momentum().is_close(&b.momentum(), 1e-9));
    }
    assert_invariants(&event);
}
