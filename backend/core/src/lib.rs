pub mod error;
pub mod tools;
pub mod traits;
pub mod types;

pub use error::{ErrorKind, ExtractError, SomarkError};
pub use tools::{ToolDefinition, ToolRegistry};
pub use traits::Tool;
pub use types::{
    basename, ExtractedContent, ExtractionRequest, ExtractionResult, OutputFormat,
};
