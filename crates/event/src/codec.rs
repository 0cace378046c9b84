//! Flat codec
//!
//! Converts an [`Event`] to and from [`EventData`]. Particles and vertices
//! are written in id order and read back in record order, so ids survive a
//! round trip unchanged.
//!
//! Attributes are written as strings and come back unparsed; conversion
//! to a concrete kind happens on first typed access.

use crate::event::Event;
use hepmc_core::{Attribute, EventData, ParticleId, Result, VertexId};
use tracing::{debug, warn};

impl Event {
    /// Flatten into the struct-of-arrays form
    ///
    /// An attribute without a string form is left out (with a warning when
    /// warnings are enabled); it never makes the call fail.
    pub fn write_data(&self) -> EventData {
        let mut data = EventData {
            event_number: self.event_number(),
            momentum_unit: self.momentum_unit(),
            length_unit: self.length_unit(),
            event_pos: self.event_pos(),
            weights: self.weights().to_vec(),
            particles: self.particles.iter().map(|slot| slot.data).collect(),
            vertices: self.vertices.iter().map(|slot| slot.data).collect(),
            ..EventData::default()
        };

        for (index, slot) in self.vertices.iter().enumerate() {
            let vertex = VertexId::from_index(index).get();
            for p in &slot.incoming {
                data.links1.push(p.get());
                data.links2.push(vertex);
            }
            for p in &slot.outgoing {
                data.links1.push(vertex);
                data.links2.push(p.get());
            }
        }

        for (name, owner, attribute) in self.attributes.lock().iter() {
            match attribute.as_string() {
                Ok(s) => {
                    data.attribute_id.push(owner);
                    data.attribute_name.push(name.to_string());
                    data.attribute_string.push(s);
                }
                Err(e) => {
                    if self.setup.print_warnings {
                        warn!(target: "hepmc::codec", attribute = %name, owner, error = %e, "Dropping attribute");
                    }
                }
            }
        }
        data
    }

    /// Replace the contents of this event with `data`
    ///
    /// Units are taken as stated, without conversion. The run and the
    /// settings of this event are kept.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidData` if `data` is inconsistent; the event is
    /// left untouched in that case.
    pub fn read_data(&mut self, data: &EventData) -> Result<()> {
        data.validate()?;

        self.clear();
        self.set_event_number(data.event_number);
        self.restore_units(data.momentum_unit, data.length_unit);
        self.shift_position_to(data.event_pos);
        *self.weights_mut() = data.weights.clone();
        self.reserve(data.particles.len(), data.vertices.len());

        for particle in &data.particles {
            self.push_particle(*particle, None);
        }
        for vertex in &data.vertices {
            self.push_vertex(*vertex);
        }

        for (&first, &second) in data.links1.iter().zip(&data.links2) {
            match (ParticleId::new(first), VertexId::new(second)) {
                (Some(particle), Some(vertex)) => self.attach_in(vertex, particle),
                _ => {
                    if let (Some(vertex), Some(particle)) = (VertexId::new(first), ParticleId::new(second)) {
                        self.attach_out(vertex, particle);
                    }
                }
            }
        }

        // edges from the root are implicit
        for index in 0..self.particles.len() {
            if self.particles[index].production.is_root() {
                self.root.outgoing.push(ParticleId::from_index(index));
            }
        }

        let table = self.attributes.get_mut();
        for ((owner, name), value) in data
            .attribute_id
            .iter()
            .zip(&data.attribute_name)
            .zip(&data.attribute_string)
        {
            table.insert(name.clone(), *owner, Attribute::unparsed(value.as_str()));
        }

        debug!(
            target: "hepmc::codec",
            event = data.event_number,
            particles = data.particles.len(),
            vertices = data.vertices.len(),
            "Read event data"
        );
        Ok(())
    }

    /// Build a new event from `data`
    pub fn from_data(data: &EventData) -> Result<Self> {
        let mut event = Event::new();
        event.read_data(data)?;
        Ok(event)
    }
}
