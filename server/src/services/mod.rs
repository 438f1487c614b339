pub mod description;

pub use description::{
    generator_from_config, render_prompt, DescriptionGenerator, DisabledGenerator, GenerationError,
    LlmDescriptionGenerator,
};
