pub mod show_info_tool;
mod tool;

pub use show_info_tool::{ShowInfoTool, SHOW_INFO_TOOL_NAME};
pub use tool::{FunctionDescriptor, LlmTool, ToolDescriptor};
