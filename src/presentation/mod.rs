// Presentation layer - Output for the rendering collaborator
pub mod chart_output;
