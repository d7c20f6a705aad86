mod assistant;
pub mod markdown;

pub use assistant::AssistantService;
pub use markdown::render_markdown;
