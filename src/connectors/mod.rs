//! External service connectors.
//!
//! The text-generation provider is reached only through the
//! [`TextGenerator`] trait. Routes receive a trait object built once at
//! startup by [`generator::init`] and never depend on the HTTP client.
//!
//! ```ignore
//! let generator = connectors::init_generator(&settings.generator)?;
//! App::new().app_data(web::Data::new(generator))
//! ```

pub mod errors;
pub mod generator;

pub use errors::GenerationError;
pub use generator::init as init_generator;
pub use generator::{OpenAiGenerator, PlaceholderGenerator, TextGenerator, Tone};
