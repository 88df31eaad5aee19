pub mod extract;

pub use extract::{ExtractArgs, SomarkExtractTool, EXTRACT_TOOL_NAME};
