//! Tool catalog - the ordered, read-only set of registered tools.

use std::collections::HashMap;

use super::definitions::ToolKind;
use super::descriptor::ToolDescriptor;
use super::error::ToolError;

/// Ordered collection of tool descriptors.
///
/// Registration order is presentation order for discovery; lookups go
/// through a name index. The catalog is never mutated after construction.
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    descriptors: Vec<ToolDescriptor>,
    index: HashMap<&'static str, usize>,
}

impl ToolCatalog {
    /// Build a catalog from descriptors in registration order.
    ///
    /// Fails if two descriptors share a name.
    pub fn new(descriptors: impl IntoIterator<Item = ToolDescriptor>) -> Result<Self, ToolError> {
        let descriptors: Vec<ToolDescriptor> = descriptors.into_iter().collect();
        let mut index = HashMap::with_capacity(descriptors.len());

        for (position, descriptor) in descriptors.iter().enumerate() {
            if index.insert(descriptor.name(), position).is_some() {
                return Err(ToolError::DuplicateTool(descriptor.name().to_string()));
            }
        }

        Ok(Self { descriptors, index })
    }

    /// The catalog of every built-in tool, in presentation order.
    ///
    /// Fails if a tool's input schema does not compile.
    pub fn builtin() -> Result<Self, ToolError> {
        let descriptors = ToolKind::ALL
            .iter()
            .map(|kind| kind.descriptor())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(descriptors)
    }

    /// Copy of all descriptors in registration order.
    pub fn list(&self) -> Vec<ToolDescriptor> {
        self.descriptors.clone()
    }

    /// Iterate descriptors in registration order without copying.
    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.descriptors.iter()
    }

    /// Find a descriptor by tool name.
    pub fn lookup(&self, name: &str) -> Result<&ToolDescriptor, ToolError> {
        self.index
            .get(name)
            .and_then(|&position| self.descriptors.get(position))
            .ok_or_else(|| ToolError::unknown_tool(name))
    }

    /// Registered tool names in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.descriptors.iter().map(ToolDescriptor::name).collect()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
