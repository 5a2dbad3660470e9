use crate::input::Manuscript;
use crate::server::word_counts_value;
use crate::state::AppState;
use crate::text::align_sentences;
use crate::utils::AnalyzerError;
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "Parameters for analyzing a Spanish text")]
pub struct AnalyzeTextParams {
    #[schemars(description = "Spanish text to translate and analyze")]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "Parameters for analyzing a manuscript file")]
pub struct AnalyzeFileParams {
    #[schemars(description = "Path to a UTF-8 .txt, .csv or .md file")]
    pub file_path: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "Parameters for counting word frequencies")]
pub struct CountWordsParams {
    #[schemars(description = "Text to count (already in the target language)")]
    pub text: String,
    #[schemars(description = "Number of top words to return (default: all)")]
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "Parameters for pairing sentences of a text and its translation")]
pub struct AlignSentencesParams {
    #[schemars(description = "Original text")]
    pub original: String,
    #[schemars(description = "Translated text")]
    pub translated: String,
}

#[derive(Clone)]
pub struct EscrutadorServer {
    state: AppState,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl EscrutadorServer {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "analyze_text",
        description = "Translate a Spanish text to English and analyze it: overall polarity and subjectivity, most frequent words, and up to 10 sentence fragments paired with their translation and scored individually. If translation fails the original text is analyzed and the report carries a warning."
    )]
    async fn analyze_text(
        &self,
        params: Parameters<AnalyzeTextParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        self.run(Manuscript::typed(params.text)).await
    }

    #[tool(
        name = "analyze_file",
        description = "Analyze a manuscript file (.txt, .csv or .md, UTF-8). Same output as analyze_text, plus a preview of the first 1000 characters."
    )]
    async fn analyze_file(
        &self,
        params: Parameters<AnalyzeFileParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let manuscript = Manuscript::from_path(&params.file_path)
            .await
            .map_err(to_mcp_error)?;
        self.run(manuscript).await
    }

    #[tool(
        name = "count_words",
        description = "Count word frequencies in a text. Words are lowercased, stopwords and words of two characters or fewer are dropped; ties keep first-seen order."
    )]
    async fn count_words(
        &self,
        params: Parameters<CountWordsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let value = word_counts_value(self.state.analyzer.counter(), &params.text, params.top_n);

        let json_result = serde_json::to_string_pretty(&value)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        Ok(CallToolResult::success(vec![Content::text(json_result)]))
    }

    #[tool(
        name = "align_sentences",
        description = "Split both texts on . ! ? and pair sentences by position. Extra sentences on the longer side are dropped."
    )]
    async fn align_sentences(
        &self,
        params: Parameters<AlignSentencesParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let pairs = align_sentences(&params.original, &params.translated);

        let json_result = serde_json::to_string_pretty(&pairs)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        Ok(CallToolResult::success(vec![Content::text(json_result)]))
    }

    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    async fn run(&self, manuscript: Manuscript) -> Result<CallToolResult, McpError> {
        let response = self
            .state
            .analyze(&manuscript)
            .await
            .map_err(to_mcp_error)?;

        let json_result = serde_json::to_string_pretty(&response)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        Ok(CallToolResult::success(vec![
            Content::text(response.report.render_text()),
            Content::text(json_result),
        ]))
    }
}

fn to_mcp_error(e: AnalyzerError) -> McpError {
    match e {
        AnalyzerError::EmptyInput
        | AnalyzerError::UnsupportedFile(_)
        | AnalyzerError::FileDecodeError { .. } => McpError::invalid_params(e.to_string(), None),
        other => McpError::internal_error(other.to_string(), None),
    }
}

#[tool_handler]
impl rmcp::handler::server::ServerHandler for EscrutadorServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                r#"Escrutador - literary text analyzer

Tools:
- analyze_text - Translate a Spanish text to English and report tone, subjectivity, top words and annotated fragments
- analyze_file - Same, reading a local .txt/.csv/.md file (use absolute path)
- count_words - Word frequencies of a text
- align_sentences - Pair the sentences of a text and its translation by position"#
                    .to_string(),
            ),
        }
    }
}
