use std::time::Duration;

use pretty_assertions::assert_eq;
use reev_core::{FrontendSettings, GenomeRelease, SeqvarQuery};
use reev_engine::{
    search_gene, AcmgClient, ClientConfig, FailureKind, GeneSearchClient, MiscClient,
    SettingsClient,
};
use serde_json::json;
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::default().with_base_url(format!("{}/internal", server.uri()))
}

#[tokio::test]
async fn fetch_version_returns_text_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/internal/version"))
        .respond_with(ResponseTemplate::new(200).set_body_string("v0.0.0"))
        .expect(1)
        .mount(&server)
        .await;

    let client = MiscClient::new(&config_for(&server)).unwrap();
    let version = client.fetch_version().await.expect("version");

    assert_eq!(version, "v0.0.0");
}

#[tokio::test]
async fn fetch_frontend_settings_decodes_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/internal/frontend-settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "matomo_host": "https://matomo.example.com/",
            "matomo_site_id": "1",
        })))
        .mount(&server)
        .await;

    let client = SettingsClient::new(&config_for(&server)).unwrap();
    let settings = client.fetch_frontend_settings().await.expect("settings");

    assert_eq!(
        settings,
        FrontendSettings {
            matomo_host: "https://matomo.example.com/".to_string(),
            matomo_site_id: "1".to_string(),
        }
    );
}

#[tokio::test]
async fn fetch_frontend_settings_rejects_missing_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/internal/frontend-settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "matomo_host": "x" })))
        .mount(&server)
        .await;

    let client = SettingsClient::new(&config_for(&server)).unwrap();
    let err = client.fetch_frontend_settings().await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn search_gene_sends_symbol_and_release() {
    let server = MockServer::start().await;
    let body = json!({ "symbol": "BRCA1", "hgnc_id": "HGNC:1100", "aliases": ["RNF53"] });
    Mock::given(method("GET"))
        .and(path("/internal/search"))
        .and(query_param("geneSymbol", "BRCA1"))
        .and(query_param("genomeRelease", "grch38"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeneSearchClient::new(&config_for(&server)).unwrap();
    let record = client
        .search_gene(" BRCA1 ", GenomeRelease::Grch38)
        .await
        .expect("gene");

    assert_eq!(record.into_value(), body);
}

#[tokio::test]
async fn search_gene_function_uses_given_config() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/internal/search"))
        .and(query_param("geneSymbol", "TP53"))
        .and(query_param("genomeRelease", "grch37"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "symbol": "TP53" })))
        .mount(&server)
        .await;

    let record = search_gene(&config_for(&server), "TP53", GenomeRelease::Grch37)
        .await
        .expect("gene");

    assert_eq!(record.get("symbol"), Some(&json!("TP53")));
}

#[tokio::test]
async fn search_gene_rejects_blank_symbol_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = GeneSearchClient::new(&config_for(&server)).unwrap();
    let err = client
        .search_gene("  ", GenomeRelease::Grch37)
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::InvalidInput);
}

#[tokio::test]
async fn search_gene_rejects_non_object_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/internal/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["BRCA1"])))
        .mount(&server)
        .await;

    let client = GeneSearchClient::new(&config_for(&server)).unwrap();
    let err = client
        .search_gene("BRCA1", GenomeRelease::Grch37)
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn non_success_status_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/internal/search"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = GeneSearchClient::new(&config_for(&server)).unwrap();
    let err = client
        .search_gene("NOPE1", GenomeRelease::Grch37)
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert_eq!(err.to_string(), "http status 404: 404 Not Found");
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/internal/frontend-settings"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let client = SettingsClient::new(&config_for(&server)).unwrap();
    let err = client.fetch_frontend_settings().await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn csrf_token_is_attached_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/internal/version"))
        .and(header("X-CSRFToken", "secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("v1.2.3"))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server).with_csrf_token("secret-token");
    let client = MiscClient::new(&config).unwrap();

    assert_eq!(client.fetch_version().await.unwrap(), "v1.2.3");
}

#[tokio::test]
async fn csrf_token_is_absent_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/internal/version"))
        .and(header_exists("X-CSRFToken"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/internal/version"))
        .respond_with(ResponseTemplate::new(200).set_body_string("v1.2.3"))
        .mount(&server)
        .await;

    let client = MiscClient::new(&config_for(&server)).unwrap();

    assert_eq!(client.fetch_version().await.unwrap(), "v1.2.3");
}

#[tokio::test]
async fn acmg_rating_query_carries_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/internal/acmg/"))
        .and(query_param("release", "grch37"))
        .and(query_param("chromosome", "17"))
        .and(query_param("position", "41197708"))
        .and(query_param("reference", "T"))
        .and(query_param("alternative", "G"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "PVS1": 1,
            "PS1": 0,
            "PM2": 1,
        })))
        .mount(&server)
        .await;

    let query = SeqvarQuery::parse(GenomeRelease::Grch37, "chr17:41197708:T:G").unwrap();
    let client = AcmgClient::new(&config_for(&server)).unwrap();
    let rating = client.fetch_acmg_rating(&query).await.expect("rating");

    assert_eq!(rating.criterion("PVS1"), Some(1));
    assert_eq!(rating.criterion("PS1"), Some(0));
}

#[tokio::test]
async fn concurrent_calls_are_independent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/internal/version"))
        .respond_with(ResponseTemplate::new(200).set_body_string("v0.0.0"))
        .expect(2)
        .mount(&server)
        .await;

    let client = MiscClient::new(&config_for(&server)).unwrap();
    let (first, second) = tokio::join!(client.fetch_version(), client.fetch_version());

    assert_eq!(first.unwrap(), "v0.0.0");
    assert_eq!(second.unwrap(), "v0.0.0");
    let requests: Vec<Request> = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn request_timeout_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/internal/version"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let config = config_for(&server).with_request_timeout(Duration::from_millis(50));
    let client = MiscClient::new(&config).unwrap();
    let err = client.fetch_version().await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/internal/version"))
        .respond_with(ResponseTemplate::new(200).set_body_string("01234567890"))
        .mount(&server)
        .await;

    let config = ClientConfig {
        max_body_bytes: 10,
        ..config_for(&server)
    };
    let client = MiscClient::new(&config).unwrap();
    let err = client.fetch_version().await.unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let server = MockServer::start().await;
    let config = config_for(&server);
    drop(server);

    let client = MiscClient::new(&config).unwrap();
    let err = client.fetch_version().await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Network);
}
