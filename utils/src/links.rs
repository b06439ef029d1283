pub fn trim_base_url(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// Address of the run page in the service's web UI.
pub fn run_url(base_url: &str, organization: &str, workspace: &str, run_id: &str) -> String {
    format!(
        "{}/app/{}/workspaces/{}/runs/{}",
        trim_base_url(base_url),
        organization,
        workspace,
        run_id
    )
}
