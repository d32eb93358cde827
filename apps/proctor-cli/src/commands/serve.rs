// serve.rs — Start the MCP server on stdio.
//
// Delegates to the same gateway as proctor-daemon, so users can start the
// server via `proctor serve` without needing to know the binary name.

use rmcp::ServiceExt;

use proctor_gateway::{ProctorPaths, ProctorServer};

pub fn execute(paths: &ProctorPaths) -> anyhow::Result<()> {
    let server = ProctorServer::new(paths.clone())?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let transport = rmcp::transport::stdio();
        let server_handle = server
            .serve(transport)
            .await
            .map_err(|e| anyhow::anyhow!("MCP server error: {}", e))?;
        let _ = server_handle.waiting().await;
        Ok::<(), anyhow::Error>(())
    })
}
