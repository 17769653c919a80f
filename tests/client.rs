mod common;
use crate::common::*;
use serde_json::json;
use sim_api::httpclient::{Authentication, Client, ClientOptions, ErrorKind};
use std::time::Duration;

fn client(server: &StubServer) -> Client {
    Client::new(ClientOptions {
        base_url: server.base_url.clone(),
        timeout: Duration::from_secs(5),
        auth: Authentication::Disabled,
    })
    .unwrap()
}

#[tokio::test]
async fn list_groups() {
    let server = StubServer::start(vec![(
        "/service/AI/groups",
        StubResponse::json(200, json!(["a1101", "a1101-ai-c"])),
    )]);
    let groups = client(&server).list_groups().await.unwrap();
    assert_eq!(groups, vec!["a1101", "a1101-ai-c"]);
    assert_eq!(server.requests()[0].method, "GET");
}

#[tokio::test]
async fn list_groups_twice_is_idempotent() {
    let server = StubServer::start(vec![(
        "/service/AI/groups",
        StubResponse::json(200, json!(["a", "b"])),
    )]);
    let c = client(&server);
    let first = c.list_groups().await.unwrap();
    let second = c.list_groups().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn group_members_keep_order() {
    let server = StubServer::start(vec![
        (
            "/service/AI/groups/pn69ju-ai-c/members?solve=false",
            StubResponse::json(200, json!(["a", "b", "c"])),
        ),
        (
            "/service/AI/groups/pn69ju-ai-c/members?solve=true",
            StubResponse::json(200, json!(["c", "b", "a", "a"])),
        ),
    ]);
    let c = client(&server);
    let group = c.group_members("pn69ju-ai-c", false).await.unwrap();
    assert_eq!(group.name, "pn69ju-ai-c");
    assert_eq!(group.members, vec!["a", "b", "c"]);
    let solved = c.group_members("pn69ju-ai-c", true).await.unwrap();
    assert_eq!(solved.members, vec!["c", "b", "a", "a"]);
}

#[tokio::test]
async fn project_institution_links() {
    let server = StubServer::start(vec![(
        "/einrichtung?projektname=pn69ju",
        StubResponse::json(
            200,
            json!({
                "code": 0,
                "message": "OK",
                "data": [{
                    "projektname": "pn69ju",
                    "einrichtungsId": "0000000000E4EE4B",
                    "link": "https://simapi.sim.lrz.de/einrichtung/0000000000E4EE4B"
                }]
            }),
        ),
    )]);
    let links = client(&server)
        .project_institution_links("pn69ju")
        .await
        .unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].project, "pn69ju");
    assert_eq!(links[0].institution_id, "0000000000E4EE4B");
}

#[tokio::test]
async fn institution_found() {
    let server = StubServer::start(vec![(
        "/einrichtung/0000000000E4EE4B",
        StubResponse::json(
            200,
            json!({"code": 0, "message": "OK", "data": {"LRZid": "0000000000E4EE4B", "name": "Test Institute"}}),
        ),
    )]);
    let inst = client(&server)
        .institution("0000000000E4EE4B")
        .await
        .unwrap();
    assert_eq!(inst.lrz_id, "0000000000E4EE4B");
    assert_eq!(inst.name.as_deref(), Some("Test Institute"));
}

#[tokio::test]
async fn institution_not_found() {
    let server = StubServer::start(vec![]);
    let err = client(&server)
        .institution("0000000000E4EE4B")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ApiRequestFailed);
    assert_eq!(err.status(), Some(404));
    match err {
        sim_api::httpclient::Error::ApiRequestFailed { body, .. } => {
            assert_eq!(body, "Not Found")
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn server_error_message() {
    let server = StubServer::start(vec![(
        "/service/AI/groups",
        StubResponse::json(500, json!({"message": "Internal error"})),
    )]);
    let err = client(&server).list_groups().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("Internal error"));
}

#[tokio::test]
async fn malformed_json_body() {
    let server = StubServer::start(vec![
        ("/service/AI/groups", StubResponse::text(200, "[\"a\", \"b\"")),
        ("/user/di38qex", StubResponse::text(200, "<html>hello</html>")),
    ]);
    let c = client(&server);
    let err = c.list_groups().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidResponseFormat);
    let err = c.user("di38qex").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidResponseFormat);
}

#[tokio::test]
async fn invalid_utf8_body() {
    let server = StubServer::start(vec![
        (
            "/service/AI/groups",
            StubResponse::bytes(200, "application/json", b"[\"a\xff\"]"),
        ),
        (
            "/user/di38qex",
            StubResponse::bytes(403, "text/plain", b"denied \xff"),
        ),
    ]);
    let c = client(&server);
    let err = c.list_groups().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidResponseFormat);
    let err = c.user("di38qex").await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert!(err.to_string().contains("denied"));
}

#[tokio::test]
async fn institution_without_envelope_is_mapping_error() {
    let server = StubServer::start(vec![(
        "/einrichtung/0000000000E4EE4B",
        StubResponse::json(200, json!({"id": "0000000000E4EE4B", "name": "Test Institute"})),
    )]);
    let err = client(&server)
        .institution("0000000000E4EE4B")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MappingError);
    assert!(err.to_string().contains("response.code"));
}

#[tokio::test]
async fn shape_mismatch_is_mapping_error() {
    let server = StubServer::start(vec![
        ("/service/AI/groups", StubResponse::json(200, json!({"groups": []}))),
        (
            "/person/00000000001F17E0",
            StubResponse::json(200, json!({"code": 0, "data": {"benutzername": "x"}})),
        ),
        (
            "/person/unknown",
            StubResponse::json(200, json!({"code": 1, "message": "no such person"})),
        ),
    ]);
    let c = client(&server);
    assert_eq!(
        c.list_groups().await.unwrap_err().kind(),
        ErrorKind::MappingError
    );
    assert_eq!(
        c.person("00000000001F17E0").await.unwrap_err().kind(),
        ErrorKind::MappingError
    );
    let err = c.person("unknown").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ApiErrorCode);
    assert!(err.to_string().contains("no such person"));
}

#[tokio::test]
async fn person_and_user() {
    let server = StubServer::start(vec![
        (
            "/person/00000000001F17E0",
            StubResponse::json(
                200,
                json!({"code": 0, "message": "OK", "data": {
                    "LRZid": "00000000001F17E0",
                    "benutzername": "barekzai",
                    "kennungen": ["di38qex"]
                }}),
            ),
        ),
        (
            "/user/di38qex",
            StubResponse::json(
                200,
                json!({"kennung": "di38qex", "projekt": "pn69ju", "daten": {"vorname": "Mares"}}),
            ),
        ),
    ]);
    let c = client(&server);
    let person = c.person("00000000001F17E0").await.unwrap();
    assert_eq!(person.username.as_deref(), Some("barekzai"));
    assert_eq!(person.accounts, vec!["di38qex"]);
    let user = c.user("di38qex").await.unwrap();
    assert_eq!(user.project.as_deref(), Some("pn69ju"));
    assert_eq!(user.data["vorname"], "Mares");
}

#[tokio::test]
async fn identifiers_are_path_encoded() {
    let server = StubServer::start(vec![(
        "/user/a%20b",
        StubResponse::json(200, json!({"kennung": "a b"})),
    )]);
    let user = client(&server).user("a b").await.unwrap();
    assert_eq!(user.username, "a b");
}

#[tokio::test]
async fn sends_basic_auth_from_netrc() {
    let server = StubServer::start(vec![(
        "/service/AI/groups",
        StubResponse::json(200, json!([])),
    )]);
    let dir = tempfile::tempdir().unwrap();
    let netrc = write_netrc(
        dir.path(),
        "machine 127.0.0.1 login alice password wrong\n127.0.0.1 login alice password secret\n",
    );
    let c = Client::new(ClientOptions {
        base_url: server.base_url.clone(),
        timeout: Duration::from_secs(5),
        auth: Authentication::Netrc { path: Some(netrc) },
    })
    .unwrap();
    assert!(c.is_authenticated());
    c.list_groups().await.unwrap();
    // base64 of "alice:secret"
    assert_eq!(
        server.requests()[0].authorization.as_deref(),
        Some("Basic YWxpY2U6c2VjcmV0")
    );
}

#[tokio::test]
async fn unauthenticated_without_netrc() {
    let server = StubServer::start(vec![(
        "/service/AI/groups",
        StubResponse::json(200, json!([])),
    )]);
    client(&server).list_groups().await.unwrap();
    assert_eq!(server.requests()[0].authorization, None);
}

#[test]
fn missing_host_in_netrc() {
    let dir = tempfile::tempdir().unwrap();
    let netrc = write_netrc(dir.path(), "machine other.example.org login a password b\n");
    let err = Client::new(ClientOptions {
        base_url: "https://simapi.example.org".into(),
        timeout: Duration::from_secs(5),
        auth: Authentication::Netrc { path: Some(netrc) },
    })
    .err()
    .unwrap();
    assert_eq!(err.kind(), ErrorKind::CredentialsNotFound);
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    // bind and drop to get a port nobody listens on
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let c = Client::new(ClientOptions {
        base_url: format!("http://127.0.0.1:{}", port),
        timeout: Duration::from_secs(5),
        auth: Authentication::Disabled,
    })
    .unwrap();
    let err = c.list_groups().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TransportError);
}
