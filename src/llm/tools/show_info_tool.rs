use crate::error::{Result, WatchLogError};
use crate::llm::tools::{FunctionDescriptor, LlmTool, ToolDescriptor};
use crate::tvdb::{ShowInfo, ShowInfoResolver};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

pub const SHOW_INFO_TOOL_NAME: &str = "get_show_info";

#[derive(Debug, Deserialize)]
struct ShowInfoArgs {
    query_string: String,
}

/// Tool that lets the model look up which network a show is on.
///
/// # Examples
///
/// ```ignore
/// use watchlog::llm::tools::ShowInfoTool;
/// use watchlog::tvdb::ShowInfoResolver;
///
/// let resolver = ShowInfoResolver::with_token_and_base_url(token, "https://api4.thetvdb.com/v4");
/// let tool = ShowInfoTool::new(resolver);
/// let result = tool.run(r#"{"query_string": "The Office"}"#).await?;
/// // "The show is The Office and it is available on NBC"
/// ```
#[derive(Clone)]
pub struct ShowInfoTool {
    resolver: ShowInfoResolver,
}

impl ShowInfoTool {
    pub fn new(resolver: ShowInfoResolver) -> Self {
        Self { resolver }
    }

    /// Sentence returned to the model for a lookup result
    pub fn format_result(info: &ShowInfo) -> String {
        format!("The show is {} and it is available on {}", info.title, info.service)
    }
}

#[async_trait]
impl LlmTool for ShowInfoTool {
    async fn run(&self, arguments: &str) -> Result<String> {
        info!(args = arguments, "Tool call arguments");

        let args: ShowInfoArgs = serde_json::from_str(arguments)
            .map_err(|e| WatchLogError::ToolArguments(e.to_string()))?;

        let info = self.resolver.resolve(&args.query_string).await;
        Ok(Self::format_result(&info))
    }

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            r#type: "function".to_string(),
            function: FunctionDescriptor {
                name: SHOW_INFO_TOOL_NAME.to_string(),
                description: "Get name and service information for a specific show".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "query_string": {
                            "type": "string",
                            "description": "Search string for the content, e.g. 'The Office', 'Bachelor', 'Agatha all along'"
                        }
                    },
                    "required": ["query_string"]
                }),
            },
        }
    }
}
