//! HTTP-level tests of the octocrab adapter, with the GitHub API mocked out.

use gh_activity::remote::{GithubApi, GithubRemote, Repo, UserIdentity};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn remote_for(server: &MockServer) -> GithubRemote {
    GithubRemote::connect_to("fake-token", server.uri()).expect("building the test client")
}

fn octocat_user() -> serde_json::Value {
    json!({
        "login": "octocat",
        "id": 1,
        "node_id": "MDQ6VXNlcjE=",
        "avatar_url": "https://github.com/images/error/octocat_happy.gif",
        "gravatar_id": "",
        "url": "https://api.github.com/users/octocat",
        "html_url": "https://github.com/octocat",
        "followers_url": "https://api.github.com/users/octocat/followers",
        "following_url": "https://api.github.com/users/octocat/following{/other_user}",
        "gists_url": "https://api.github.com/users/octocat/gists{/gist_id}",
        "starred_url": "https://api.github.com/users/octocat/starred{/owner}{/repo}",
        "subscriptions_url": "https://api.github.com/users/octocat/subscriptions",
        "organizations_url": "https://api.github.com/users/octocat/orgs",
        "repos_url": "https://api.github.com/users/octocat/repos",
        "events_url": "https://api.github.com/users/octocat/events{/privacy}",
        "received_events_url": "https://api.github.com/users/octocat/received_events",
        "type": "User",
        "site_admin": false
    })
}

#[tokio::test]
async fn current_user_resolves_the_login() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(octocat_user()))
        .expect(1)
        .mount(&server)
        .await;

    let remote = remote_for(&server);
    let identity = remote.current_user().await.expect("resolving the user");

    assert_eq!(identity, UserIdentity { login: "octocat".to_string() });
}

#[tokio::test]
async fn empty_repository_is_classified_from_the_error_message() {
    let server = MockServer::start().await;

    // GitHub reports an empty repository as a 409 with this exact message.
    Mock::given(method("GET"))
        .and(path("/repos/octocat/bare/commits"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "Git Repository is empty.",
            "documentation_url": "https://docs.github.com/rest/commits/commits#list-commits"
        })))
        .mount(&server)
        .await;

    let remote = remote_for(&server);
    let err = remote
        .commits_authored_by(&Repo::new("octocat", "bare"), "octocat")
        .await
        .expect_err("an empty repository fails the commit listing");

    assert!(err.is_repository_empty());
}

#[tokio::test]
async fn other_remote_failures_stay_transient() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/flaky/commits"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Server Error"
        })))
        .mount(&server)
        .await;

    let remote = remote_for(&server);
    let err = remote
        .commits_authored_by(&Repo::new("octocat", "flaky"), "octocat")
        .await
        .expect_err("a server error fails the commit listing");

    assert!(!err.is_repository_empty());
}

#[tokio::test]
async fn branches_of_an_empty_repository_are_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/bare/branches"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "Git Repository is empty.",
            "documentation_url": "https://docs.github.com/rest/branches/branches#list-branches"
        })))
        .mount(&server)
        .await;

    let remote = remote_for(&server);
    let branches = remote
        .branches(&Repo::new("octocat", "bare"))
        .await
        .expect("absent branch data is not an error");

    assert_eq!(branches, None);
}

#[tokio::test]
async fn branch_listing_maps_names() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/busy/branches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "name": "main",
                "commit": {
                    "sha": "c5b97d5ae6c19d5c5df71a34c7fbeeda2479ccbc",
                    "url": "https://api.github.com/repos/octocat/busy/commits/c5b97d5ae6c19d5c5df71a34c7fbeeda2479ccbc"
                },
                "protected": true
            },
            {
                "name": "dev",
                "commit": {
                    "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
                    "url": "https://api.github.com/repos/octocat/busy/commits/6dcb09b5b57875f334f61aebed695e2e4193db5e"
                },
                "protected": false
            }
        ])))
        .mount(&server)
        .await;

    let remote = remote_for(&server);
    let branches = remote
        .branches(&Repo::new("octocat", "busy"))
        .await
        .expect("listing branches")
        .expect("branch data is present");

    let names: Vec<_> = branches.into_iter().map(|b| b.name).collect();
    assert_eq!(names, ["main", "dev"]);
}
