pub mod gemini;
pub mod mock;

pub use gemini::GeminiGateway;
pub use mock::MockGateway;
