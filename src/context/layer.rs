slotmap::new_key_type! {
    /// Unique identifier for a layer in an edit context.
    pub struct LayerId;
}

/// A named drawing layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    name: String,
}

impl Layer {
    /// Creates a new layer with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
