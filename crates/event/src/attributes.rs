//! Event attribute table
//!
//! Attributes are keyed by `(name, owner)` where the owner id is 0 for the
//! event, a particle id or a vertex id. The table sits behind one lock so
//! that lazy conversion works through `&Event`.
//!
//! Event-level lookups fall back to the attached run: a name missing at
//! owner 0 is looked up among the run attributes.

use crate::event::Event;
use hepmc_core::{Attribute, AttributeContext, AttributeKind, FromAttribute, EVENT_OWNER};
use std::collections::BTreeMap;
use tracing::warn;

/// Attributes of one event, by name then owner id
#[derive(Debug, Clone, Default)]
pub(crate) struct AttributeTable {
    entries: BTreeMap<String, BTreeMap<i32, Attribute>>,
}

impl AttributeTable {
    pub(crate) fn insert(&mut self, name: String, owner: i32, attribute: Attribute) {
        self.entries.entry(name).or_default().insert(owner, attribute);
    }

    pub(crate) fn remove(&mut self, name: &str, owner: i32) -> Option<Attribute> {
        let owners = self.entries.get_mut(name)?;
        let removed = owners.remove(&owner);
        if owners.is_empty() {
            self.entries.remove(name);
        }
        removed
    }

    pub(crate) fn get(&self, name: &str, owner: i32) -> Option<&Attribute> {
        self.entries.get(name)?.get(&owner)
    }

    pub(crate) fn get_mut(&mut self, name: &str, owner: i32) -> Option<&mut Attribute> {
        self.entries.get_mut(name)?.get_mut(&owner)
    }

    pub(crate) fn names(&self, owner: i32) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, owners)| owners.contains_key(&owner))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Entries ordered by name, then owner
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, i32, &Attribute)> {
        self.entries.iter().flat_map(|(name, owners)| {
            owners
                .iter()
                .map(move |(owner, attribute)| (name.as_str(), *owner, attribute))
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Re-key every owner through `remap`; `None` drops the entry
    pub(crate) fn remap_owners(&mut self, remap: impl Fn(i32) -> Option<i32>) {
        for owners in self.entries.values_mut() {
            *owners = std::mem::take(owners)
                .into_iter()
                .filter_map(|(owner, attribute)| remap(owner).map(|o| (o, attribute)))
                .collect();
        }
        self.entries.retain(|_, owners| !owners.is_empty());
    }

    /// Keep the entries for which `keep` returns true
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(i32, &mut Attribute) -> bool) {
        for owners in self.entries.values_mut() {
            owners.retain(|owner, attribute| keep(*owner, attribute));
        }
        self.entries.retain(|_, owners| !owners.is_empty());
    }
}

impl Event {
    /// Conversion context of an attribute stored at `owner`
    pub fn attribute_context(&self, owner: i32) -> AttributeContext<'_> {
        AttributeContext {
            owner,
            particle_count: self.particles.len(),
            vertex_count: self.vertices.len(),
            weight_count: self.weights().len(),
            run_info: self.run_info().map(|r| &**r),
        }
    }

    /// Store an attribute at `(name, owner)`, replacing any previous value
    ///
    /// The owner does not have to exist yet: an attribute at an id past the
    /// end is kept and re-keyed by removals like any other. Always returns
    /// true.
    pub fn add_attribute(
        &mut self,
        name: impl Into<String>,
        attribute: impl Into<Attribute>,
        owner: i32,
    ) -> bool {
        self.attributes
            .get_mut()
            .insert(name.into(), owner, attribute.into());
        true
    }

    /// Remove the attribute at `(name, owner)`
    pub fn remove_attribute(&mut self, name: &str, owner: i32) -> Option<Attribute> {
        self.attributes.get_mut().remove(name, owner)
    }

    /// True if an attribute is stored at `(name, owner)`
    pub fn contains_attribute(&self, name: &str, owner: i32) -> bool {
        self.attributes.lock().get(name, owner).is_some()
    }

    /// Names of the attributes stored for `owner`, sorted
    pub fn attribute_names(&self, owner: i32) -> Vec<String> {
        self.attributes.lock().names(owner)
    }

    /// Total number of stored attributes
    pub fn attribute_count(&self) -> usize {
        self.attributes.lock().len()
    }

    /// Copy of the stored attribute, parsed or not
    pub fn attribute_raw(&self, name: &str, owner: i32) -> Option<Attribute> {
        self.attributes.lock().get(name, owner).cloned()
    }

    /// String form of the attribute at `(name, owner)`
    ///
    /// At owner 0 a miss falls back to the run attribute of the same name.
    /// Returns an empty string when nothing is found.
    pub fn attribute_as_string(&self, name: &str, owner: i32) -> String {
        let found = self
            .attributes
            .lock()
            .get(name, owner)
            .map(|a| a.as_string().unwrap_or_default());
        match (found, self.run_info()) {
            (Some(s), _) => s,
            (None, Some(run)) if owner == EVENT_OWNER => run.attribute_as_string(name),
            (None, _) => String::new(),
        }
    }

    /// Convert the attribute at `(name, owner)` to `kind` in place
    ///
    /// Returns false if it is absent or cannot be converted; a failed
    /// conversion leaves the attribute unparsed.
    pub fn parse_attribute(&self, name: &str, owner: i32, kind: AttributeKind) -> bool {
        let ctx = self.attribute_context(owner);
        let mut table = self.attributes.lock();
        let attribute = match table.get_mut(name, owner) {
            Some(attribute) => attribute,
            None => return false,
        };
        match attribute.parse(kind, &ctx) {
            Ok(_) => true,
            Err(e) => {
                if self.setup.print_errors {
                    warn!(target: "hepmc::event", attribute = %name, owner, error = %e, "Attribute conversion failed");
                }
                false
            }
        }
    }

    /// Typed value of the attribute at `(name, owner)`
    ///
    /// Converts in place on first access. At owner 0 a missing name falls
    /// back to the run attributes.
    pub fn attribute<T: FromAttribute>(&self, name: &str, owner: i32) -> Option<T> {
        let ctx = self.attribute_context(owner);
        {
            let mut table = self.attributes.lock();
            if let Some(attribute) = table.get_mut(name, owner) {
                return match attribute.get::<T>(&ctx) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        if self.setup.print_errors {
                            warn!(target: "hepmc::event", attribute = %name, owner, error = %e, "Attribute conversion failed");
                        }
                        None
                    }
                };
            }
        }
        match self.run_info() {
            Some(run) if owner == EVENT_OWNER => run.attribute::<T>(name),
            _ => None,
        }
    }
}
