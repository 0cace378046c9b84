//! Run-level metadata
//!
//! A `RunInfo` describes one generator run: the tools that produced it, the
//! names of the event weights and run-level attributes. Events hold it as
//! `Arc<RunInfo>`, so it lives as long as its longest holder.
//!
//! Run attributes sit behind a single lock so that lazy parsing works
//! through a shared reference.

use crate::attribute::{Attribute, AttributeContext, AttributeKind, FromAttribute};
use crate::data::RunInfoData;
use crate::error::Result;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Provenance of one tool used in the run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name
    pub name: String,
    /// Tool version
    pub version: String,
    /// Free-form description
    pub description: String,
}

impl ToolInfo {
    /// Describe a tool
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
        }
    }
}

/// Metadata shared by all events of one run
#[derive(Debug, Default)]
pub struct RunInfo {
    tools: Vec<ToolInfo>,
    weight_names: Vec<String>,
    attributes: Mutex<BTreeMap<String, Attribute>>,
}

impl Clone for RunInfo {
    fn clone(&self) -> Self {
        Self {
            tools: self.tools.clone(),
            weight_names: self.weight_names.clone(),
            attributes: Mutex::new(self.attributes.lock().clone()),
        }
    }
}

impl RunInfo {
    /// Empty run
    pub fn new() -> Self {
        Self::default()
    }

    /// Tools in registration order
    pub fn tools(&self) -> &[ToolInfo] {
        &self.tools
    }

    /// Register a tool
    pub fn add_tool(&mut self, tool: ToolInfo) {
        self.tools.push(tool);
    }

    /// Names of the event weights
    pub fn weight_names(&self) -> &[String] {
        &self.weight_names
    }

    /// Replace the weight names
    pub fn set_weight_names(&mut self, names: Vec<String>) {
        self.weight_names = names;
    }

    /// Position of the weight called `name`
    pub fn weight_index(&self, name: &str) -> Option<usize> {
        self.weight_names.iter().position(|n| n == name)
    }

    /// True if a weight called `name` exists
    pub fn has_weight(&self, name: &str) -> bool {
        self.weight_index(name).is_some()
    }

    fn context(&self) -> AttributeContext<'_> {
        AttributeContext {
            weight_count: self.weight_names.len(),
            run_info: Some(self),
            ..AttributeContext::default()
        }
    }

    /// Store a run attribute, replacing any previous value
    pub fn add_attribute(&self, name: impl Into<String>, attribute: impl Into<Attribute>) {
        self.attributes.lock().insert(name.into(), attribute.into());
    }

    /// Remove a run attribute
    pub fn remove_attribute(&self, name: &str) -> Option<Attribute> {
        self.attributes.lock().remove(name)
    }

    /// True if a run attribute called `name` exists
    pub fn contains_attribute(&self, name: &str) -> bool {
        self.attributes.lock().contains_key(name)
    }

    /// Names of all run attributes, sorted
    pub fn attribute_names(&self) -> Vec<String> {
        self.attributes.lock().keys().cloned().collect()
    }

    /// Copy of the stored attribute, parsed or not
    pub fn attribute_raw(&self, name: &str) -> Option<Attribute> {
        self.attributes.lock().get(name).cloned()
    }

    /// Convert a run attribute to `kind`; false if absent or not convertible
    pub fn parse_attribute(&self, name: &str, kind: AttributeKind) -> bool {
        let ctx = self.context();
        let mut attributes = self.attributes.lock();
        match attributes.get_mut(name) {
            Some(attribute) => attribute.parse(kind, &ctx).is_ok(),
            None => false,
        }
    }

    /// Typed value of a run attribute
    pub fn attribute<T: FromAttribute>(&self, name: &str) -> Option<T> {
        let ctx = self.context();
        let mut attributes = self.attributes.lock();
        attributes.get_mut(name)?.get::<T>(&ctx).ok()
    }

    /// String form of a run attribute; empty if absent
    pub fn attribute_as_string(&self, name: &str) -> String {
        self.attributes
            .lock()
            .get(name)
            .and_then(|a| a.as_string().ok())
            .unwrap_or_default()
    }

    /// Flatten into a run record
    ///
    /// Attributes without a string form are dropped.
    pub fn write_data(&self) -> RunInfoData {
        let mut data = RunInfoData {
            weight_names: self.weight_names.clone(),
            ..RunInfoData::default()
        };
        for tool in &self.tools {
            data.tool_name.push(tool.name.clone());
            data.tool_version.push(tool.version.clone());
            data.tool_description.push(tool.description.clone());
        }
        for (name, attribute) in self.attributes.lock().iter() {
            match attribute.as_string() {
                Ok(s) => {
                    data.attribute_name.push(name.clone());
                    data.attribute_string.push(s);
                }
                Err(e) => {
                    warn!(target: "hepmc::run", attribute = %name, error = %e, "Dropping run attribute");
                }
            }
        }
        data
    }

    /// Rebuild from a run record; attributes come back unparsed
    pub fn from_data(data: &RunInfoData) -> Result<Self> {
        data.validate()?;
        let tools = data
            .tool_name
            .iter()
            .zip(&data.tool_version)
            .zip(&data.tool_description)
            .map(|((name, version), description)| ToolInfo::new(name, version, description))
            .collect::<Vec<_>>();
        let attributes = data
            .attribute_name
            .iter()
            .zip(&data.attribute_string)
            .map(|(name, s)| (name.clone(), Attribute::unparsed(s.as_str())))
            .collect();
        debug!(
            target: "hepmc::run",
            tools = tools.len(),
            weights = data.weight_names.len(),
            "Restored run info"
        );
        Ok(Self {
            tools,
            weight_names: data.weight_names.clone(),
            attributes: Mutex::new(attributes),
        })
    }
}
