//! Structural comparison of events
//!
//! - [`identical`]: same flat form, ids included
//! - [`equivalent`]: same graph up to renumbering

use crate::event::Event;
use hepmc_core::{FourVector, ParticleData, EVENT_OWNER};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

type ParticleKey = (i32, i32, [u64; 4], Option<u64>);
type VertexKey = (i32, Option<[u64; 4]>, Vec<ParticleKey>, Vec<ParticleKey>);

fn bits(v: &FourVector) -> [u64; 4] {
    [v.x().to_bits(), v.y().to_bits(), v.z().to_bits(), v.t().to_bits()]
}

fn particle_key(data: &ParticleData) -> ParticleKey {
    (
        data.pid,
        data.status,
        bits(&data.momentum),
        data.mass.map(f64::to_bits),
    )
}

fn vertex_keys(event: &Event) -> FxHashMap<VertexKey, usize> {
    let mut keys = FxHashMap::default();
    for vertex in event.vertices() {
        let mut incoming: Vec<_> = vertex.particles_in().map(|p| particle_key(p.data())).collect();
        let mut outgoing: Vec<_> = vertex.particles_out().map(|p| particle_key(p.data())).collect();
        incoming.sort_unstable();
        outgoing.sort_unstable();
        let data = vertex.data();
        let key = (data.status, data.position.as_ref().map(bits), incoming, outgoing);
        *keys.entry(key).or_insert(0) += 1;
    }
    keys
}

fn beam_keys(event: &Event) -> Vec<ParticleKey> {
    let mut keys: Vec<_> = event.beams().map(|p| particle_key(p.data())).collect();
    keys.sort_unstable();
    keys
}

fn event_attributes(event: &Event) -> BTreeMap<String, String> {
    event
        .attribute_names(EVENT_OWNER)
        .into_iter()
        .map(|name| {
            let value = event.attribute_as_string(&name, EVENT_OWNER);
            (name, value)
        })
        .collect()
}

/// True if both events flatten to the same data, ids included
pub fn identical(a: &Event, b: &Event) -> bool {
    a.write_data() == b.write_data()
}

/// True if both events describe the same graph, ignoring ids
///
/// Vertices are matched as a multiset of (status, position, incoming
/// particles, outgoing particles); beams, units, event number, weights,
/// event position and event-level attribute strings must agree.
pub fn equivalent(a: &Event, b: &Event) -> bool {
    a.momentum_unit() == b.momentum_unit()
        && a.length_unit() == b.length_unit()
        && a.event_number() == b.event_number()
        && a.weights() == b.weights()
        && a.event_pos() == b.event_pos()
        && a.particle_count() == b.particle_count()
        && a.vertex_count() == b.vertex_count()
        && beam_keys(a) == beam_keys(b)
        && vertex_keys(a) == vertex_keys(b)
        && event_attributes(a) == event_attributes(b)
}
