//! Worked examples of the flat encoding

use crate::common::*;

#[test]
fn test_decay_links() {
    let event = two_beams_one_decay();
    let data = event.write_data();

    assert_eq!(data.particles.len(), 4);
    assert_eq!(data.vertices.len(), 1);
    // A enters the decay vertex, C and D leave it; root edges are implicit
    assert_eq!(data.link_count(), 3);
    assert_eq!(data.links1, vec![1, -1, -1]);
    assert_eq!(data.links2, vec![-1, 3, 4]);

    let incoming = data.links1.iter().filter(|&&first| first > 0).count();
    let outgoing = data.links1.iter().filter(|&&first| first < 0).count();
    assert_eq!((incoming, outgoing), (1, 2));
}

#[test]
fn test_decay_read_back() {
    let data = two_beams_one_decay().write_data();
    let event = Event::from_data(&data).unwrap();
    assert_invariants(&event);

    let decay = VertexId::from_index(0);
    let a = event.particle(ParticleId::from_index(0)).unwrap();
    let b = event.particle(ParticleId::from_index(1)).unwrap();
    let c = event.particle(ParticleId::from_index(2)).unwrap();
    let d = event.particle(ParticleId::from_index(3)).unwrap();

    assert_eq!(a.pid(), 11);
    assert_eq!(b.pid(), -11);
    assert_eq!(a.end_vertex_id(), Some(decay));
    assert_eq!(c.production_vertex_id(), decay);
    assert_eq!(d.production_vertex_id(), decay);
    assert!(a.is_beam());
    assert!(b.is_beam());
    assert!(b.end_vertex().is_none());
    assert_eq!(event.beams().count(), 2);
}

#[test]
fn test_empty_event() {
    let event = Event::new();
    let data = event.write_data();
    assert!(data.particles.is_empty());
    assert!(data.vertices.is_empty());
    assert_eq!(data.weights, vec![1.0]);

    let back = Event::from_data(&data).unwrap();
    assert!(back.is_empty());
    assert!(hepmc::compare::identical(&event, &back));
}

#[test]
fn test_read_into_existing_event_replaces_it() {
    let mut target = drell_yan();
    target.read_data(&two_beams_one_decay().write_data()).unwrap();

    assert_eq!(target.particle_count(), 4);
    assert_eq!(target.vertex_count(), 1);
    assert_eq!(target.attribute_count(), 0);
    assert_eq!(target.event_number(), 0);
    assert_invariants(&target);
}

#[test]
fn test_listing_of_decoded_event() {
    let event = Event::from_data(&two_beams_one_decay().write_data()).unwrap();
    let listing = event.listing().to_string();
    assert!(listing.contains("1 vertices, 4 particles"));
    assert!(listing.contains(" I: "));
    assert!(event.content().to_string().contains("Particles (4)"));
}
