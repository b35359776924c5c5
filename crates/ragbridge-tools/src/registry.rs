use serde_json::{Value, json};

/// Host-facing description of one tool.
#[derive(Debug, Clone)]
pub struct ToolDef {
    pub id: &'static str,
    pub description: &'static str,
    pub schema: schemars::Schema,
}

impl ToolDef {
    /// `{name, description, parameters}` for host advertisement.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.id,
            "description": self.description,
            "parameters": self.schema,
        })
    }
}

#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDef>,
}

impl ToolRegistry {
    #[must_use]
    pub fn from_definitions(tools: Vec<ToolDef>) -> Self {
        Self { tools }
    }

    #[must_use]
    pub fn tools(&self) -> &[ToolDef] {
        &self.tools
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&ToolDef> {
        self.tools.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Array(self.tools.iter().map(ToolDef::to_json).collect())
    }
}
