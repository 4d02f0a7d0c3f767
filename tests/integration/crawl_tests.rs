//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use mail_ripple::config::{CrawlerConfig, UserAgentConfig};
use mail_ripple::crawler::EmailCrawler;
use mail_ripple::state::PageState;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_crawler(page_budget: usize) -> EmailCrawler {
    let config = CrawlerConfig {
        page_budget,
        fetch_timeout_secs: 2,
    };
    let user_agent = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    };
    EmailCrawler::new(&config, &user_agent).expect("Failed to build crawler")
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

/// Same server, but reached through a different host name
fn other_host_uri(server: &MockServer) -> String {
    format!("http://localhost:{}", server.address().port())
}

#[tokio::test]
async fn test_crawl_stays_on_seed_host() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!(
            r#"<p>contact@example.test</p>
            <a href="/about">About</a>
            <a href="{}/x">Elsewhere</a>"#,
            other_host_uri(&server)
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html("<p>Sales: sales@example.test</p>".to_string()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/x"))
        .respond_with(html("<p>other@other.test</p>".to_string()))
        .expect(0)
        .mount(&server)
        .await;

    let report = test_crawler(3)
        .crawl(&format!("{}/", server.uri()))
        .await
        .expect("crawl should run");

    assert_eq!(
        report.sorted_emails(),
        vec!["contact@example.test", "sales@example.test"]
    );
    assert_eq!(report.pages_attempted(), 2);
    assert_eq!(report.pages_processed(), 2);
}

#[tokio::test]
async fn test_redirect_off_host_is_not_followed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<p>contact@example.test</p><a href="/moved">Moved</a><a href="/old">Old</a>"#
                .to_string(),
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", format!("{}/x", other_host_uri(&server)).as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(html("<p>new@example.test</p>".to_string()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/x"))
        .respond_with(html("<p>other@other.test</p>".to_string()))
        .expect(0)
        .mount(&server)
        .await;

    let report = test_crawler(10)
        .crawl(&server.uri())
        .await
        .expect("crawl should run");

    assert_eq!(
        report.sorted_emails(),
        vec!["contact@example.test", "new@example.test"]
    );

    let moved = report
        .pages
        .iter()
        .find(|p| p.url.ends_with("/moved"))
        .expect("redirecting page was attempted");
    assert_eq!(moved.state, PageState::Failed);
}

#[tokio::test]
async fn test_budget_caps_fetches() {
    let server = MockServer::start().await;

    let links: String = (1..=20)
        .map(|i| format!(r#"<a href="/page{}">{}</a>"#, i, i))
        .collect();
    Mock::given(method("GET"))
        .respond_with(html(links))
        .mount(&server)
        .await;

    let report = test_crawler(4)
        .crawl(&server.uri())
        .await
        .expect("crawl should run");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 4);
    assert_eq!(report.pages_attempted(), 4);
}

#[tokio::test]
async fn test_no_page_fetched_twice() {
    let server = MockServer::start().await;
    let base = server.uri();

    let cycle = format!(
        r#"<a href="/">Home</a><a href="/a">A</a><a href="/b#top">B</a><a href="{}/a">A again</a>"#,
        base
    );
    for page in ["/", "/a", "/b"] {
        Mock::given(method("GET"))
            .and(path(page))
            .respond_with(html(cycle.clone()))
            .expect(1)
            .mount(&server)
            .await;
    }

    let report = test_crawler(10)
        .crawl(&base)
        .await
        .expect("crawl should run");

    assert_eq!(report.pages_attempted(), 3);
}

#[tokio::test]
async fn test_failed_page_does_not_stop_crawl() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<p>front@example.test</p>
            <a href="/broken">Broken</a><a href="/gone">Gone</a><a href="/team">Team</a>"#
                .to_string(),
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/team"))
        .respond_with(html("<p>team@example.test</p>".to_string()))
        .mount(&server)
        .await;

    let report = test_crawler(10)
        .crawl(&server.uri())
        .await
        .expect("crawl should run");

    assert_eq!(
        report.sorted_emails(),
        vec!["front@example.test", "team@example.test"]
    );
    assert_eq!(report.pages_attempted(), 4);
    assert_eq!(report.pages_processed(), 2);

    let states: Vec<PageState> = report.pages.iter().map(|p| p.state).collect();
    assert!(states.contains(&PageState::Failed));
    assert!(states.contains(&PageState::DeadLink));
}

#[tokio::test]
async fn test_unreachable_seed_yields_no_emails() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let report = test_crawler(10)
        .crawl(&format!("http://127.0.0.1:{}/", port))
        .await
        .expect("an unreachable seed is not an error");

    assert!(report.emails.is_empty());
    assert_eq!(report.pages_attempted(), 1);
    assert_eq!(report.pages[0].state, PageState::Unreachable);
}

#[tokio::test]
async fn test_budget_of_one_fetches_only_seed() {
    let server = MockServer::start().await;

    let links: String = (1..=5)
        .map(|i| format!(r#"<a href="/p{}">p{}</a>"#, i, i))
        .collect();
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!("<p>owner@example.test</p>{}", links)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/p1"))
        .respond_with(html("<p>hidden@example.test</p>".to_string()))
        .expect(0)
        .mount(&server)
        .await;

    let report = test_crawler(1)
        .crawl(&server.uri())
        .await
        .expect("crawl should run");

    assert_eq!(report.sorted_emails(), vec!["owner@example.test"]);
    assert_eq!(report.pages_attempted(), 1);
}

#[tokio::test]
async fn test_plain_crawl_entry_point() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("write to hello@example.test")
                .insert_header("content-type", "text/plain"),
        )
        .mount(&server)
        .await;

    let emails = mail_ripple::crawl(&server.uri(), 10).await.unwrap();
    assert_eq!(emails.len(), 1);
    assert!(emails.contains("hello@example.test"));

    assert!(mail_ripple::crawl("not a url", 10).await.is_err());
}
