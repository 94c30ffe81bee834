use crate::error::PipelineError;
use vellum_render_core::{RenderConfig, Renderer};
use vellum_types::Marker;

/// A builder for a configured [`Renderer`].
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    config: RenderConfig,
    front_matter: Option<Marker>,
}

impl PipelineBuilder {
    /// Creates a builder with the default configuration and no front matter.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Reads the configuration from JSON. Options missing from the JSON keep
    /// their defaults.
    pub fn with_config_json(mut self, json: &str) -> Result<Self, PipelineError> {
        self.config = RenderConfig::from_json(json)?;
        Ok(self)
    }

    /// Front matter is rendered ahead of the main tree, with the default
    /// configuration.
    pub fn with_front_matter(mut self, tree: Marker) -> Self {
        self.front_matter = Some(tree);
        self
    }

    pub fn with_front_matter_json(mut self, json: &str) -> Result<Self, PipelineError> {
        self.front_matter = Some(serde_json::from_str(json)?);
        Ok(self)
    }

    /// Validates the configuration and builds the renderer.
    pub fn build(self) -> Result<Renderer, PipelineError> {
        let renderer = Renderer::new(self.config)?;
        Ok(match self.front_matter {
            Some(front_matter) => renderer.with_front_matter(front_matter),
            None => renderer,
        })
    }
}
