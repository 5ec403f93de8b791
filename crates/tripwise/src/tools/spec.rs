//! Structured tool descriptions.
//!
//! The description a model sees is often the only thing steering it between
//! similar tools. `ToolSpec` keeps that text structured (purpose, when to
//! use, when not to use, examples) and renders it into the `description`
//! field of a [`ToolDef`].

use crate::ToolDef;

/// A structured tool specification.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    /// Tool name (must be unique within a ToolSet).
    pub name: String,
    /// One-sentence purpose: "Look up current weather conditions for a city".
    pub purpose: String,
    pub when_to_use: Option<String>,
    /// Steers the model away from a sibling tool it might confuse this with.
    pub when_not_to_use: Option<String>,
    /// JSON Schema for the arguments object.
    pub parameters: serde_json::Value,
    /// `(call, result)` pairs shown verbatim to the model.
    pub examples: Vec<(String, String)>,
    pub output_format: Option<String>,
}

impl ToolSpec {
    pub fn builder(name: impl Into<String>, purpose: impl Into<String>) -> ToolSpecBuilder {
        ToolSpecBuilder {
            spec: ToolSpec {
                name: name.into(),
                purpose: purpose.into(),
                when_to_use: None,
                when_not_to_use: None,
                parameters: serde_json::json!({"type": "object", "properties": {}}),
                examples: Vec::new(),
                output_format: None,
            },
        }
    }

    /// Render the description string sent to the model.
    pub fn to_description(&self) -> String {
        let mut desc = format!("{}.", self.purpose.trim_end_matches('.'));
        if let Some(when) = &self.when_to_use {
            desc.push_str(&format!("\nWhen to use: {when}"));
        }
        if let Some(when_not) = &self.when_not_to_use {
            desc.push_str(&format!("\nWhen NOT to use: {when_not}"));
        }
        if !self.examples.is_empty() {
            desc.push_str("\nExamples:");
            for (call, result) in &self.examples {
                desc.push_str(&format!("\n  - {call} -> {result}"));
            }
        }
        if let Some(format) = &self.output_format {
            desc.push_str(&format!("\nOutput format: {format}"));
        }
        desc
    }

    pub fn to_tool_def(&self) -> ToolDef {
        ToolDef::new(
            self.name.clone(),
            self.to_description(),
            self.parameters.clone(),
        )
    }
}

/// Builder for [`ToolSpec`]. Name and purpose are taken up front; every
/// other field is optional.
#[derive(Debug, Clone)]
pub struct ToolSpecBuilder {
    spec: ToolSpec,
}

impl ToolSpecBuilder {
    pub fn when_to_use(mut self, when: impl Into<String>) -> Self {
        self.spec.when_to_use = Some(when.into());
        self
    }

    pub fn when_not_to_use(mut self, when_not: impl Into<String>) -> Self {
        self.spec.when_not_to_use = Some(when_not.into());
        self
    }

    pub fn parameters(mut self, params: serde_json::Value) -> Self {
        self.spec.parameters = params;
        self
    }

    /// Derive the parameter schema from the argument type, so the schema
    /// and deserialization can never diverge.
    pub fn parameters_for<T: schemars::JsonSchema>(self) -> Self {
        self.parameters(crate::json_schema_for::<T>())
    }

    pub fn example(mut self, call: impl Into<String>, result: impl Into<String>) -> Self {
        self.spec.examples.push((call.into(), result.into()));
        self
    }

    pub fn output_format(mut self, format: impl Into<String>) -> Self {
        self.spec.output_format = Some(format.into());
        self
    }

    pub fn build(self) -> ToolSpec {
        self.spec
    }

    /// Shortcut for `.build().to_tool_def()`.
    pub fn to_tool_def(self) -> ToolDef {
        self.spec.to_tool_def()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_includes_guidance_sections() {
        let spec = ToolSpec::builder("get_weather_info", "Get the current weather for a city")
            .when_to_use("When the traveller asks what to pack or expect")
            .when_not_to_use("For costs; use get_daily_spend_estimate instead")
            .example(r#"get_weather_info(city="Paris")"#, "current conditions in Paris")
            .output_format("One sentence")
            .build();

        let desc = spec.to_description();
        assert!(desc.starts_with("Get the current weather for a city."));
        assert!(desc.contains("When NOT to use: For costs"));
        assert!(desc.contains("-> current conditions in Paris"));
        assert!(desc.ends_with("Output format: One sentence"));
    }

    #[test]
    fn minimal_spec_has_empty_object_schema() {
        let def = ToolSpec::builder("noop", "Do nothing.").to_tool_def();
        assert_eq!(def.function.name, "noop");
        assert_eq!(def.function.description, "Do nothing.");
        assert_eq!(def.function.parameters["type"], "object");
    }

    #[test]
    fn parameters_for_uses_derived_schema() {
        #[derive(schemars::JsonSchema)]
        #[allow(dead_code)]
        struct Args {
            city: String,
        }

        let def = ToolSpec::builder("t", "Test")
            .parameters_for::<Args>()
            .to_tool_def();
        assert!(def.function.parameters["properties"]["city"].is_object());
    }
}
