//! MCP server exposing the project and search tools over stdio.

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars, tool, tool_handler, tool_router,
    transport::io::stdio,
};
use serde::Deserialize;

use super::{SearchRequest, ToolOutcome, Toolbox};
use crate::search::RipgrepEngine;

/// MCP server for registering and searching local projects.
pub struct GitFinderServer {
    tools: Toolbox<RipgrepEngine>,
    tool_router: ToolRouter<GitFinderServer>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddProjectInput {
    /// Absolute local path of the project (e.g. /Users/me/work/monorepo/packages/payment)
    pub path: String,
    /// Project name (e.g. payment-service)
    pub name: String,
    /// What the project does (e.g. payment and order processing)
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RemoveProjectInput {
    /// Name of the project to remove
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListProjectsInput {}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchCodeInput {
    /// Keyword to search for (e.g. payment, createOrder)
    pub keyword: String,
    /// Restrict the search to one project (optional, default: all projects)
    #[serde(default)]
    pub project: Option<String>,
    /// File glob filter (optional, e.g. "*.ts", "*.controller.ts")
    #[serde(default)]
    pub file_pattern: Option<String>,
    /// Maximum matches to return (default: 50)
    #[serde(default)]
    pub max_results: Option<usize>,
    /// Context lines around each match (default: 3)
    #[serde(default)]
    pub context_lines: Option<usize>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetFileTreeInput {
    /// Project name
    pub project: String,
    /// Tree depth (default: 3)
    #[serde(default)]
    pub depth: Option<usize>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ReadFileInput {
    /// Absolute path of the file to read
    pub path: String,
}

impl From<ToolOutcome> for CallToolResult {
    fn from(outcome: ToolOutcome) -> Self {
        match outcome {
            ToolOutcome::Success(text) => CallToolResult::success(vec![Content::text(text)]),
            ToolOutcome::Failure(text) => CallToolResult::error(vec![Content::text(text)]),
        }
    }
}

#[tool_router]
impl GitFinderServer {
    pub fn new(tools: Toolbox<RipgrepEngine>) -> Self {
        Self {
            tools,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Register a local project directory. Registered projects can be queried with search_code, get_file_tree and read_file."
    )]
    async fn add_project(
        &self,
        Parameters(input): Parameters<AddProjectInput>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self
            .tools
            .add_project(&input.path, &input.name, input.description.as_deref())
            .into())
    }

    #[tool(description = "Remove a registered project.")]
    async fn remove_project(
        &self,
        Parameters(input): Parameters<RemoveProjectInput>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.tools.remove_project(&input.name).into())
    }

    #[tool(
        description = "List registered projects with their descriptions. Call this before searching to decide which project to narrow the search to."
    )]
    async fn list_projects(
        &self,
        Parameters(_input): Parameters<ListProjectsInput>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.tools.list_projects().into())
    }

    #[tool(
        description = "Search registered projects for a keyword using ripgrep. Optionally restrict to one project or a file pattern. Results are grouped by project with surrounding context lines."
    )]
    async fn search_code(
        &self,
        Parameters(input): Parameters<SearchCodeInput>,
    ) -> Result<CallToolResult, McpError> {
        let request = SearchRequest {
            keyword: input.keyword,
            project: input.project,
            file_pattern: input.file_pattern,
            max_results: input.max_results,
            context_lines: input.context_lines,
        };
        Ok(self.tools.search_code(&request).await.into())
    }

    #[tool(
        description = "Show the file and folder structure of a project. Useful to understand its layout or narrow a search."
    )]
    async fn get_file_tree(
        &self,
        Parameters(input): Parameters<GetFileTreeInput>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.tools.get_file_tree(&input.project, input.depth).into())
    }

    #[tool(
        description = "Read a file found in search results. Only files inside registered projects and up to 100KB can be read."
    )]
    async fn read_file(
        &self,
        Parameters(input): Parameters<ReadFileInput>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.tools.read_file(&input.path).into())
    }
}

#[tool_handler]
impl ServerHandler for GitFinderServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "git-finder-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Keyword code search across registered local projects. \
                 Tools: add_project, remove_project, list_projects, search_code, \
                 get_file_tree, read_file."
                    .to_string(),
            ),
        }
    }
}

/// Run the MCP server over stdio.
pub async fn run_stdio(tools: Toolbox<RipgrepEngine>) -> Result<()> {
    let server = GitFinderServer::new(tools);
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
