//! Incremental construction through add_particle / add_vertex and relinking

use crate::common::*;

#[test]
fn test_add_vertex_numbers_incoming_then_outgoing() {
    let mut event = Event::new();
    let mut v = Vertex::new();
    v.add_particle_out(particle(22, 1))
        .add_particle_in(particle(11, 3))
        .add_particle_out(particle(-22, 1))
        .add_particle_in(particle(-11, 3));
    event.add_vertex(v);

    let pids: Vec<i32> = event.particles().map(|p| p.pid()).collect();
    assert_eq!(pids, vec![11, -11, 22, -22]);
    assert_eq!(event.beams().count(), 2);
    assert_invariants(&event);
}

#[test]
fn test_drell_yan_shape() {
    let event = drell_yan();
    assert_eq!(event.particle_count(), 9);
    assert_eq!(event.vertex_count(), 3);
    assert_invariants(&event);

    let z = event.particle(ParticleId::from_index(2)).unwrap();
    assert_eq!(z.pid(), 23);
    let children: Vec<i32> = z.children().iter().map(|p| p.pid()).collect();
    assert_eq!(children, vec![13, -13]);
    let parents: Vec<i32> = z.parents().iter().map(|p| p.pid()).collect();
    assert_eq!(parents, vec![2212, 2212]);
}

#[test]
fn test_relinking_moves_a_particle_between_vertices() {
    let mut event = drell_yan();
    let mu = ParticleId::from_index(4);
    let hadronization = VertexId::from_index(2);

    // mu now enters the hadronization vertex as well as leaving the Z decay
    assert_eq!(event.add_particle_in(hadronization, mu), Some(mu));
    assert_eq!(event.particle(mu).unwrap().end_vertex_id(), Some(hadronization));
    assert_invariants(&event);

    // producing it from the root turns it into a beam
    event.add_particle_out(VertexId::ROOT, mu);
    assert!(event.particle(mu).unwrap().is_beam());
    assert_invariants(&event);

    // linking twice does not duplicate the edge
    event.add_particle_in(hadronization, mu);
    assert_eq!(event.vertex(hadronization).unwrap().particles_in_size(), 2);
    assert_invariants(&event);
}

#[test]
fn test_misuse_is_a_silent_no_op() {
    let mut event = drell_yan();
    let before = event.write_data();

    assert!(event.add_particle_in(VertexId::ROOT, ParticleId::from_index(0)).is_none());
    assert!(event.add_particle_in(VertexId::from_index(10), ParticleId::from_index(0)).is_none());
    assert!(event.add_particle_out(VertexId::from_index(0), ParticleId::from_index(40)).is_none());
    assert!(!event.remove_particle_in(VertexId::from_index(1), ParticleId::from_index(0)));
    assert!(!event.remove_particle_out(VertexId::ROOT, ParticleId::from_index(0)));
    assert!(event.remove_particle(ParticleId::from_index(40)).is_none());
    assert!(event.remove_vertex(VertexId::ROOT).is_none());
    assert!(event.remove_vertex(VertexId::from_index(3)).is_none());

    assert_eq!(event.write_data(), before);
}

#[test]
fn test_attribute_at_unresolved_owner_is_kept() {
    let mut event = drell_yan();
    assert!(event.add_attribute("orphan", 1i32, 12));
    assert!(event.contains_attribute("orphan", 12));

    // three particles go with the jet vertex
    event.remove_vertex(VertexId::from_index(2));
    assert_eq!(event.particle_count(), 6);
    assert!(!event.contains_attribute("orphan", 12));
    assert_eq!(event.attribute::<i32>("orphan", 9), Some(1));
    assert_invariants(&event);
}

#[test]
fn test_unlinking_without_cascade() {
    let mut event = drell_yan();
    let z = ParticleId::from_index(2);
    let z_decay = VertexId::from_index(1);

    assert!(event.remove_particle_in(z_decay, z));
    assert_eq!(event.particle(z).unwrap().end_vertex_id(), None);
    assert_eq!(event.vertex_count(), 3);
    assert_invariants(&event);

    let mu = ParticleId::from_index(4);
    assert!(event.remove_particle_out(z_decay, mu));
    assert!(event.particle(mu).unwrap().is_beam());
    assert_eq!(event.particle_count(), 9);
    assert_invariants(&event);
}

#[test]
fn test_inherited_vertex_position() {
    let event = drell_yan();
    // the Z decay has no position of its own and inherits the hard vertex's
    let z_decay = event.vertex(VertexId::from_index(1)).unwrap();
    assert!(!z_decay.has_set_position());
    assert_eq!(z_decay.position(), FourVector::new(0.0, 0.0, 0.1, 0.0));

    let hadronization = event.vertex(VertexId::from_index(2)).unwrap();
    assert_eq!(hadronization.position(), FourVector::new(0.5, 0.5, 0.5, 1.0));
}

#[test]
fn test_shift_position_leaves_unset_positions_unset() {
    let mut event = drell_yan();
    event.shift_position_by(FourVector::new(1.0, 0.0, 0.0, 0.0));

    assert_eq!(event.event_pos(), FourVector::new(1.0, 0.0, 0.0, 0.0));
    let hard = event.vertex(VertexId::from_index(0)).unwrap();
    assert_eq!(hard.data().position, Some(FourVector::new(1.0, 0.0, 0.1, 0.0)));
    let z_decay = event.vertex(VertexId::from_index(1)).unwrap();
    assert_eq!(z_decay.data().position, None);
}

#[test]
fn test_clone_is_deep() {
    let original = drell_yan();
    let mut copy = original.clone();
    copy.remove_vertex(VertexId::from_index(0));
    copy.add_attribute("signal_process_id", 2i32, EVENT_OWNER);

    assert_eq!(original.particle_count(), 9);
    assert_eq!(original.attribute::<i32>("signal_process_id", EVENT_OWNER), Some(1));
    assert_invariants(&original);
    assert_invariants(&copy);
}

#[test]
fn test_clear_and_reuse() {
    let mut event = drell_yan();
    event.clear();
    assert!(event.is_empty());
    assert_eq!(event.attribute_count(), 0);
    assert_eq!(event.root_vertex().particles_out_size(), 0);

    event.reserve(4, 1);
    let mut v = Vertex::new();
    v.add_particle_in(particle(5, 2)).add_particle_out(particle(6, 1));
    event.add_vertex(v);
    assert_invariants(&event);
}
