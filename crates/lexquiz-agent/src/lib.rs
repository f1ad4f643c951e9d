pub mod gemini;
pub mod persona;

pub use gemini::GeminiBackend;
