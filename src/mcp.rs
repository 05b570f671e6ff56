use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ErrorData, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};
use serde::Deserialize;
use std::path::PathBuf;

use crate::pdf::removal::{remove_pages, DuplicatePolicy, RemovalOutcome, RemovalRequest};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemovePdfPagesRequest {
    #[schemars(description = "The path to the PDF file")]
    pub pdf_path: String,
    #[schemars(description = "The page numbers to remove from the PDF (1-indexed)")]
    pub page_numbers: Vec<i64>,
}

impl From<RemovePdfPagesRequest> for RemovalRequest {
    fn from(req: RemovePdfPagesRequest) -> Self {
        RemovalRequest {
            pdf_path: PathBuf::from(req.pdf_path),
            page_numbers: req.page_numbers,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    pub duplicate_policy: DuplicatePolicy,
}

#[derive(Debug, Clone)]
pub struct PdfServer {
    config: ServerConfig,
    tool_router: ToolRouter<Self>,
}

impl PdfServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            tool_router: Self::tool_router(),
        }
    }

    fn handle_removal(&self, request: RemovalRequest) -> crate::error::Result<RemovalOutcome> {
        tracing::info!(
            path = %request.pdf_path.display(),
            pages = ?request.page_numbers,
            "remove-pdf-pages"
        );
        remove_pages(&request, self.config.duplicate_policy).inspect_err(|e| {
            tracing::warn!(error = %e, "remove-pdf-pages failed");
        })
    }
}

impl Default for PdfServer {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}

/// Render a removal result as the single text item the caller receives.
/// Failures are flagged with `is_error` as well as by their text.
pub fn into_tool_result(result: crate::error::Result<RemovalOutcome>) -> CallToolResult {
    match result {
        Ok(outcome) => CallToolResult::success(vec![Content::text(outcome.message())]),
        Err(e) => CallToolResult::error(vec![Content::text(e.response_text())]),
    }
}

#[tool_router]
impl PdfServer {
    #[tool(name = "remove-pdf-pages", description = "Remove pages from a PDF")]
    fn remove_pdf_pages(
        &self,
        Parameters(req): Parameters<RemovePdfPagesRequest>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        Ok(into_tool_result(self.handle_removal(req.into())))
    }
}

#[tool_handler]
impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF page removal. Use remove-pdf-pages with a file path and 1-indexed page \
                 numbers; the file is rewritten in place."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server(config: ServerConfig) -> Result<()> {
    let server = PdfServer::new(config);

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
    tracing::info!("PDF MCP Server running on stdio");

    let reason = service.waiting().await?;
    tracing::info!(?reason, "PDF MCP Server stopped");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::document::test_support::{create_test_pdf, page_markers};
    use pretty_assertions::assert_eq;

    fn call(server: &PdfServer, json: serde_json::Value) -> crate::error::Result<RemovalOutcome> {
        let req: RemovePdfPagesRequest = serde_json::from_value(json).unwrap();
        server.handle_removal(req.into())
    }

    #[test]
    fn test_request_uses_camel_case() {
        let req: RemovePdfPagesRequest = serde_json::from_value(serde_json::json!({
            "pdfPath": "/tmp/a.pdf",
            "pageNumbers": [3, 1, 3]
        }))
        .unwrap();
        assert_eq!(req.pdf_path, "/tmp/a.pdf");
        assert_eq!(req.page_numbers, vec![3, 1, 3]);
    }

    #[test]
    fn test_tool_removes_pages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, create_test_pdf(5)).unwrap();

        let server = PdfServer::default();
        let outcome = call(
            &server,
            serde_json::json!({ "pdfPath": path, "pageNumbers": [4, 2] }),
        )
        .unwrap();
        assert_eq!(outcome.message(), "Successfully removed 2 pages from the PDF.");
        assert_eq!(
            page_markers(&std::fs::read(&path).unwrap()),
            vec!["Page 1", "Page 3", "Page 5"]
        );
    }

    #[test]
    fn test_tool_uses_configured_duplicate_policy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, create_test_pdf(5)).unwrap();

        let server = PdfServer::new(ServerConfig {
            duplicate_policy: DuplicatePolicy::Repeat,
        });
        let outcome = call(
            &server,
            serde_json::json!({ "pdfPath": path, "pageNumbers": [3, 3] }),
        )
        .unwrap();
        assert_eq!(outcome.pages_removed, 2);
        assert_eq!(
            page_markers(&std::fs::read(&path).unwrap()),
            vec!["Page 1", "Page 2", "Page 5"]
        );
    }

    #[test]
    fn test_tool_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, create_test_pdf(2)).unwrap();

        let server = PdfServer::default();
        let result = call(
            &server,
            serde_json::json!({ "pdfPath": path, "pageNumbers": [3, 0] }),
        );
        assert_eq!(
            result.unwrap_err().response_text(),
            "Error: Invalid page numbers: 3, 0. The document has 2 pages."
        );

        let tool_result = into_tool_result(call(
            &server,
            serde_json::json!({ "pdfPath": dir.path().join("missing.pdf"), "pageNumbers": [1] }),
        ));
        assert_eq!(tool_result.is_error, Some(true));
    }

    #[test]
    fn test_remove_pdf_pages_tool() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, create_test_pdf(3)).unwrap();

        let server = PdfServer::default();
        let ok = server
            .remove_pdf_pages(Parameters(RemovePdfPagesRequest {
                pdf_path: path.display().to_string(),
                page_numbers: vec![2],
            }))
            .unwrap();
        assert_ne!(ok.is_error, Some(true));
        assert_eq!(
            page_markers(&std::fs::read(&path).unwrap()),
            vec!["Page 1", "Page 3"]
        );

        let failed = server
            .remove_pdf_pages(Parameters(RemovePdfPagesRequest {
                pdf_path: path.display().to_string(),
                page_numbers: vec![9],
            }))
            .unwrap();
        assert_eq!(failed.is_error, Some(true));
    }
}
