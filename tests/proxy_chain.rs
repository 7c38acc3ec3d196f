// tests/proxy_chain.rs
//
// Direct-then-proxies fallback against a local mock server.

use fmcsa_scrape::core::{FetchError, HttpClient, Via};
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = "<html><body><table><tr><th>MC-1</th></tr></table></body></html>";

fn runtime() -> Runtime {
    Runtime::new().expect("tokio runtime")
}

fn mount(rt: &Runtime, server: &MockServer, at: &str, resp: ResponseTemplate) {
    rt.block_on(Mock::given(method("GET")).and(path(at)).respond_with(resp).mount(server));
}

fn ok(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(body)
}

/// Paths the server saw, in arrival order.
fn hits(rt: &Runtime, server: &MockServer) -> Vec<String> {
    rt.block_on(server.received_requests())
        .unwrap_or_default()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect()
}

fn client() -> HttpClient {
    HttpClient::new(5).expect("client")
}

#[test]
fn direct_answer_skips_the_proxies() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    mount(&rt, &server, "/register", ok(PAGE));
    mount(&rt, &server, "/p1", ok("proxied"));

    let target = format!("{}/register", server.uri());
    let proxies = vec![format!("{}/p1?url={{url}}", server.uri())];
    let got = client().get_via_chain(&target, &proxies).unwrap();

    assert_eq!(got.via, Via::Direct);
    assert_eq!(got.body, PAGE);
    assert_eq!(hits(&rt, &server), vec!["/register"]);
}

#[test]
fn failed_and_blank_paths_fall_through_in_order() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    mount(&rt, &server, "/register", ResponseTemplate::new(503));
    mount(&rt, &server, "/p1", ok(" \n\t "));
    let target = format!("{}/register", server.uri());
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/p2"))
            .and(query_param("url", target.as_str()))
            .respond_with(ok(PAGE))
            .mount(&server),
    );
    mount(&rt, &server, "/p3", ok("never asked"));

    let proxies: Vec<String> = ["p1", "p2", "p3"]
        .iter()
        .map(|p| format!("{}/{p}?url={{url}}", server.uri()))
        .collect();
    let got = client().get_via_chain(&target, &proxies).unwrap();

    assert_eq!(got.via, Via::Proxy(proxies[1].clone()));
    assert_eq!(got.body, PAGE);
    assert_eq!(hits(&rt, &server), vec!["/register", "/p1", "/p2"]);
}

#[test]
fn every_path_failing_lists_each_attempt() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    mount(&rt, &server, "/register", ResponseTemplate::new(404));
    mount(&rt, &server, "/p1", ResponseTemplate::new(500));
    mount(&rt, &server, "/p2", ok(""));

    let target = format!("{}/register", server.uri());
    let proxies: Vec<String> = ["p1", "p2"]
        .iter()
        .map(|p| format!("{}/{p}?url={{url}}", server.uri()))
        .collect();

    match client().get_via_chain(&target, &proxies) {
        Err(FetchError::Exhausted { attempts }) => {
            assert_eq!(attempts.len(), 3, "{attempts:?}");
            assert!(attempts[0].starts_with("direct: HTTP 404"), "{attempts:?}");
            assert!(attempts[1].starts_with(&proxies[0]) && attempts[1].contains("HTTP 500"));
            assert!(attempts[2].starts_with(&proxies[1]) && attempts[2].contains("empty response body"));
        }
        other => panic!("expected Exhausted, got {other:?}"),
    }
}

#[test]
fn no_proxies_means_one_attempt() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    mount(&rt, &server, "/register", ResponseTemplate::new(502));

    let target = format!("{}/register", server.uri());
    match client().get_via_chain(&target, &[]) {
        Err(FetchError::Exhausted { attempts }) => assert_eq!(attempts.len(), 1),
        other => panic!("expected Exhausted, got {other:?}"),
    }
}
