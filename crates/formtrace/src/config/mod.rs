pub mod loader;
pub mod schema;

pub use loader::{load_config, load_or_default};
pub use schema::{default_fields, Config, FieldSpec, OcrServiceConfig};
