//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{
    CheckRun, CompareCounts, PlatformConfig, PrComment, PrState, PullRequestDetails,
    ReviewThread, Reviewer,
};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Page size for REST and GraphQL list calls
const PAGE_SIZE: usize = 100;

/// Upper bound on pages fetched for a single list
const MAX_PAGES: u32 = 20;

// REST response types

#[derive(Deserialize)]
struct RestPullRequest {
    number: u64,
    title: String,
    state: String,
    draft: Option<bool>,
    merged_at: Option<String>,
    html_url: String,
    head: RestRef,
    base: RestRef,
    #[serde(default)]
    requested_reviewers: Vec<RestUser>,
}

#[derive(Deserialize)]
struct RestRef {
    #[serde(rename = "ref")]
    ref_name: String,
    sha: String,
}

#[derive(Deserialize)]
struct RestUser {
    login: String,
}

impl From<RestPullRequest> for PullRequestDetails {
    fn from(pr: RestPullRequest) -> Self {
        let state = match pr.state.as_str() {
            "open" => PrState::Open,
            _ if pr.merged_at.is_some() => PrState::Merged,
            _ => PrState::Closed,
        };
        Self {
            number: pr.number,
            title: pr.title,
            state,
            is_draft: pr.draft.unwrap_or(false),
            head_ref: pr.head.ref_name,
            head_sha: pr.head.sha,
            base_ref: pr.base.ref_name,
            html_url: pr.html_url,
            requested_reviewers: pr
                .requested_reviewers
                .into_iter()
                .map(|u| Reviewer::new(u.login))
                .collect(),
        }
    }
}

#[derive(Deserialize)]
struct CompareResponse {
    ahead_by: u64,
    behind_by: u64,
}

#[derive(Deserialize)]
struct CheckRunsResponse {
    total_count: usize,
    check_runs: Vec<RestCheckRun>,
}

#[derive(Deserialize)]
struct RestCheckRun {
    name: String,
    status: String,
    conclusion: Option<String>,
}

// GraphQL response types

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct ReviewThreadsData {
    repository: Option<ReviewThreadsRepository>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewThreadsRepository {
    pull_request: Option<ReviewThreadsPullRequest>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewThreadsPullRequest {
    review_threads: ReviewThreadConnection,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewThreadConnection {
    nodes: Vec<ReviewThreadNode>,
    page_info: PageInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewThreadNode {
    is_resolved: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MinimizeCommentData {
    minimize_comment: MinimizeCommentPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MinimizeCommentPayload {
    minimized_comment: MinimizedComment,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MinimizedComment {
    is_minimized: bool,
}

const REVIEW_THREADS_QUERY: &str = r"
    query ReviewThreads($owner: String!, $repo: String!, $pr: Int!, $cursor: String) {
        repository(owner: $owner, name: $repo) {
            pullRequest(number: $pr) {
                reviewThreads(first: 100, after: $cursor) {
                    nodes { isResolved }
                    pageInfo { hasNextPage endCursor }
                }
            }
        }
    }
";

const MINIMIZE_COMMENT_MUTATION: &str = r"
    mutation MinimizeComment($id: ID!) {
        minimizeComment(input: { subjectId: $id, classifier: OUTDATED }) {
            minimizedComment { isMinimized }
        }
    }
";

/// GitHub service using octocrab for comments and raw HTTP for readiness signals
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests
    token: String,
    /// HTTP client for raw requests
    http_client: Client,
    /// REST API root, without trailing slash
    api_base: String,
    /// GraphQL endpoint
    graphql_url: String,
}

impl GitHubService {
    /// Create a new GitHub service for github.com or an Enterprise host
    pub fn new(token: &str, owner: String, repo: String, host: Option<String>) -> Result<Self> {
        let (api_base, graphql_url) = host.as_ref().map_or_else(
            || {
                (
                    "https://api.github.com".to_string(),
                    "https://api.github.com/graphql".to_string(),
                )
            },
            |h| (format!("https://{h}/api/v3"), format!("https://{h}/api/graphql")),
        );

        Self::build(
            token,
            PlatformConfig { owner, repo, host },
            api_base,
            graphql_url,
        )
    }

    /// Create a service against an arbitrary API root (GraphQL at `<root>/graphql`)
    pub fn with_api_base(token: &str, owner: String, repo: String, api_base: &str) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/').to_string();
        let graphql_url = format!("{api_base}/graphql");

        Self::build(
            token,
            PlatformConfig {
                owner,
                repo,
                host: None,
            },
            api_base,
            graphql_url,
        )
    }

    fn build(
        token: &str,
        config: PlatformConfig,
        api_base: String,
        graphql_url: String,
    ) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_base.as_str())
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent(concat!("ready-or-not/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            token: token.to_string(),
            http_client,
            api_base,
            graphql_url,
        })
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{path}",
            self.api_base, self.config.owner, self.config.repo
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    /// GET a REST resource; any non-success status is an error
    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to fetch {what}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::GitHubApi(format!("Fetching {what} returned {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse {what}: {e}")))
    }

    /// Run a GraphQL operation, surfacing GraphQL-level errors
    async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let response = self
            .request(Method::POST, &self.graphql_url)
            .json(&serde_json::json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("GraphQL request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::GitHubApi(format!("GraphQL request returned {status}")));
        }

        let body: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse GraphQL response: {e}")))?;

        if let Some(errors) = body.errors
            && !errors.is_empty()
        {
            let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
            return Err(Error::GitHubApi(format!(
                "GraphQL error: {}",
                messages.join(", ")
            )));
        }

        body.data
            .ok_or_else(|| Error::GitHubApi("No data in GraphQL response".to_string()))
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails> {
        debug!(pr_number, "getting PR details");
        let url = self.repo_url(&format!("pulls/{pr_number}"));

        let response = self
            .request(Method::GET, &url)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to fetch PR #{pr_number}: {e}")))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::PrNotFound(pr_number));
        }
        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Fetching PR #{pr_number} returned {}",
                response.status()
            )));
        }

        let pr: RestPullRequest = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse PR #{pr_number}: {e}")))?;

        let details = PullRequestDetails::from(pr);
        debug!(pr_number, state = ?details.state, draft = details.is_draft, "got PR details");
        Ok(details)
    }

    async fn compare_commits(&self, base: &str, head: &str) -> Result<CompareCounts> {
        debug!(base, head, "comparing commits");
        let url = self.repo_url(&format!(
            "compare/{}...{}",
            urlencoding::encode(base),
            urlencoding::encode(head)
        ));

        let compare: CompareResponse = self.get_json(&url, "commit comparison").await?;

        debug!(
            ahead_by = compare.ahead_by,
            behind_by = compare.behind_by,
            "compared commits"
        );
        Ok(CompareCounts {
            behind_by: compare.behind_by,
            ahead_by: compare.ahead_by,
        })
    }

    async fn list_check_runs(&self, sha: &str) -> Result<Vec<CheckRun>> {
        debug!(sha, "listing check runs");
        let mut runs = Vec::new();

        for page in 1..=MAX_PAGES {
            let url = format!(
                "{}?per_page={PAGE_SIZE}&page={page}",
                self.repo_url(&format!("commits/{sha}/check-runs"))
            );
            let response: CheckRunsResponse = self.get_json(&url, "check runs").await?;
            let fetched = response.check_runs.len();

            runs.extend(
                response
                    .check_runs
                    .into_iter()
                    .map(|r| CheckRun::new(r.name, r.conclusion.as_deref(), r.status)),
            );

            if fetched < PAGE_SIZE || runs.len() >= response.total_count {
                break;
            }
            if page == MAX_PAGES {
                warn!(
                    total = response.total_count,
                    fetched = runs.len(),
                    "check run listing truncated"
                );
            }
        }

        debug!(sha, count = runs.len(), "listed check runs");
        Ok(runs)
    }

    async fn list_review_threads(&self, pr_number: u64) -> Result<Vec<ReviewThread>> {
        debug!(pr_number, "listing review threads");
        let mut threads = Vec::new();
        let mut cursor: Option<String> = None;

        for page in 1..=MAX_PAGES {
            let data: ReviewThreadsData = self
                .graphql(
                    REVIEW_THREADS_QUERY,
                    serde_json::json!({
                        "owner": self.config.owner,
                        "repo": self.config.repo,
                        "pr": pr_number,
                        "cursor": cursor,
                    }),
                )
                .await?;

            let connection = data
                .repository
                .and_then(|r| r.pull_request)
                .ok_or(Error::PrNotFound(pr_number))?
                .review_threads;

            threads.extend(connection.nodes.into_iter().map(|n| ReviewThread {
                is_resolved: n.is_resolved,
            }));

            if !connection.page_info.has_next_page {
                break;
            }
            if page == MAX_PAGES {
                warn!(pr_number, fetched = threads.len(), "review thread listing truncated");
            }
            cursor = connection.page_info.end_cursor;
        }

        debug!(pr_number, count = threads.len(), "listed review threads");
        Ok(threads)
    }

    async fn list_pr_comments(&self, pr_number: u64) -> Result<Vec<PrComment>> {
        debug!(pr_number, "listing PR comments");
        let first_page = self
            .client
            .issues(&self.config.owner, &self.config.repo)
            .list_comments(pr_number)
            .per_page(100)
            .send()
            .await?;

        let comments = self.client.all_pages(first_page).await?;

        let result: Vec<PrComment> = comments
            .into_iter()
            .map(|c| PrComment {
                id: c.id.0,
                node_id: c.node_id,
                body: c.body.unwrap_or_default(),
            })
            .collect();
        debug!(pr_number, count = result.len(), "listed PR comments");
        Ok(result)
    }

    async fn create_pr_comment(&self, pr_number: u64, body: &str) -> Result<PrComment> {
        debug!(pr_number, "creating PR comment");
        let comment = self
            .client
            .issues(&self.config.owner, &self.config.repo)
            .create_comment(pr_number, body)
            .await?;
        debug!(pr_number, comment_id = comment.id.0, "created PR comment");
        Ok(PrComment {
            id: comment.id.0,
            node_id: comment.node_id,
            body: comment.body.unwrap_or_default(),
        })
    }

    async fn minimize_comment(&self, node_id: &str) -> Result<()> {
        debug!(node_id, "minimizing comment");
        let data: MinimizeCommentData = self
            .graphql(
                MINIMIZE_COMMENT_MUTATION,
                serde_json::json!({ "id": node_id }),
            )
            .await?;

        debug!(
            node_id,
            minimized = data.minimize_comment.minimized_comment.is_minimized,
            "minimized comment"
        );
        Ok(())
    }

    async fn add_comment_reaction(&self, comment_id: u64) -> Result<()> {
        debug!(comment_id, "adding reaction");
        let url = self.repo_url(&format!("issues/comments/{comment_id}/reactions"));

        let response = self
            .request(Method::POST, &url)
            .json(&serde_json::json!({ "content": "+1" }))
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to add reaction: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Adding reaction returned {}",
                response.status()
            )));
        }

        debug!(comment_id, "added reaction");
        Ok(())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
