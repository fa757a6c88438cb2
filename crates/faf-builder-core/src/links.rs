//! Setup command and deploy deep-link builders.

use crate::config::SiteConfig;

/// Endpoint of the hosting provider's "clone template" flow.
const DEPLOY_CLONE_ENDPOINT: &str = "https://vercel.com/new/clone";

/// Project and repository name given to freshly deployed templates.
const DEPLOY_PROJECT_NAME: &str = "zero-faf-project";

/// The command a user runs in a local folder to add `project.faf`.
#[must_use]
pub fn setup_command(config: &SiteConfig) -> String {
    format!("npx faf-cli@latest init --mcp={}", config.mcp_server_url)
}

/// Deep-link into the provider's import flow for the template repository.
///
/// The repository URL is percent-encoded as a single query value.
#[must_use]
pub fn deploy_link(config: &SiteConfig) -> String {
    format!(
        "{DEPLOY_CLONE_ENDPOINT}?repository-url={}&project-name={DEPLOY_PROJECT_NAME}&repository-name={DEPLOY_PROJECT_NAME}",
        urlencoding::encode(&config.template_repo_url),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_command_embeds_default_server() {
        assert_eq!(
            setup_command(&SiteConfig::default()),
            "npx faf-cli@latest init --mcp=https://grok-faf-mcp.vercel.app"
        );
    }

    #[test]
    fn setup_command_follows_override() {
        let config = SiteConfig::default().with_mcp_server_url("http://localhost:9000");
        assert_eq!(
            setup_command(&config),
            "npx faf-cli@latest init --mcp=http://localhost:9000"
        );
    }

    #[test]
    fn deploy_link_encodes_repository() {
        assert_eq!(
            deploy_link(&SiteConfig::default()),
            "https://vercel.com/new/clone?repository-url=https%3A%2F%2Fgithub.com%2Fwolfe-jam%2Fzero-faf-builder&project-name=zero-faf-project&repository-name=zero-faf-project"
        );
    }

    #[test]
    fn deploy_link_follows_override() {
        let config = SiteConfig::default().with_template_repo_url("https://github.com/acme/starter?ref=main");
        let link = deploy_link(&config);
        assert!(link.contains("repository-url=https%3A%2F%2Fgithub.com%2Facme%2Fstarter%3Fref%3Dmain&"));
    }
}
