//! Wiremock integration tests for the client façade.
//!
//! Cover the full flow per operation: query construction, headers,
//! decoding with zero-value defaults, cache behaviour, retry/error
//! surfacing, and sequential/concurrent bulk equivalence.

use std::sync::Arc;
use std::time::Duration;

use futmarket::{
    CacheConfig, FixedUserAgent, FutClient, FutmarketError, Platform, RetryConfig, SearchOptions,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Matcher asserting a query parameter is NOT present.
struct NoQueryParam(&'static str);

impl Match for NoQueryParam {
    fn matches(&self, request: &Request) -> bool {
        request.url.query_pairs().all(|(k, _)| k != self.0)
    }
}

/// Client wired to the mock server: fixed UA, no retry delay, no cache
/// unless a test opts in.
fn test_client(server: &MockServer) -> FutClient {
    FutClient::builder()
        .api_base(server.uri())
        .user_agents(Arc::new(FixedUserAgent("futmarket-test/1.0".into())))
        .retry(RetryConfig::disabled())
        .disable_cache()
        .build()
        .expect("client should build")
}

fn price_book_json() -> serde_json::Value {
    serde_json::json!({
        "101": {
            "prices": {
                "PS": {"LCPrice": 4500, "MinPrice": 1000, "MaxPrice": 10000, "updated": "3 mins ago"},
                "PC": {"LCPrice": 5200, "MinPrice": 1000, "MaxPrice": 10000}
            }
        },
        "103": {
            "prices": {
                "PS": {"LCPrice": "12,000", "MinPrice": "5,000", "MaxPrice": "50,000"}
            }
        }
    })
}

// ============================================================================
// Single price lookup
// ============================================================================

#[tokio::test]
async fn price_lookup_parses_platform_block() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getPlayersPrice"))
        .and(query_param("player_ids", "101"))
        .and(query_param("platform", "PS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(price_book_json()))
        .mount(&server)
        .await;

    let price = test_client(&server)
        .player_price(101, Platform::Ps)
        .await
        .expect("lookup should succeed");

    assert_eq!(price.price, 4500);
    assert_eq!(price.min_price, 1000);
    assert_eq!(price.max_price, 10000);
    assert_eq!(price.updated, "3 mins ago");
}

#[tokio::test]
async fn price_lookup_unknown_id_returns_zero_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getPlayersPrice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let price = test_client(&server)
        .player_price(999_999, Platform::Ps)
        .await
        .expect("unknown id should not error");

    assert_eq!(price.price, 0);
    assert_eq!(price.min_price, 0);
    assert_eq!(price.max_price, 0);
}

#[tokio::test]
async fn price_by_resource_parses_top_level_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fetchPriceInformation"))
        .and(query_param("playerresource", "50524123"))
        .and(query_param("platform", "PC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "price": "7,500",
            "MinPrice": 650,
            "MaxPrice": 15000
        })))
        .mount(&server)
        .await;

    let price = test_client(&server)
        .player_price_by_resource(50524123, Platform::Pc)
        .await
        .expect("lookup should succeed");

    assert_eq!(price.price, 7500);
    assert_eq!(price.min_price, 650);
    assert_eq!(price.max_price, 15000);
}

// ============================================================================
// Bulk price lookups
// ============================================================================

#[tokio::test]
async fn bulk_prices_fill_missing_ids_with_zero_records() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getPlayersPrice"))
        .and(query_param("player_ids", "101,102,103"))
        .respond_with(ResponseTemplate::new(200).set_body_json(price_book_json()))
        .expect(1)
        .mount(&server)
        .await;

    let prices = test_client(&server)
        .player_prices(&[101, 102, 103], Platform::Ps)
        .await
        .expect("bulk lookup should succeed");

    assert_eq!(prices.len(), 3);
    assert_eq!(prices[&101].price, 4500);
    assert_eq!(prices[&102].price, 0); // absent upstream, zero-valued
    assert_eq!(prices[&103].price, 12000);
}

#[tokio::test]
async fn bulk_prices_dedupe_input_ids() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getPlayersPrice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(price_book_json()))
        .mount(&server)
        .await;

    let prices = test_client(&server)
        .player_prices(&[101, 101, 103], Platform::Ps)
        .await
        .unwrap();

    // one entry per unique id
    assert_eq!(prices.len(), 2);
}

#[tokio::test]
async fn concurrent_bulk_matches_sequential() {
    let server = MockServer::start().await;

    // Match on path only: the concurrent variant issues one request per
    // batch with its own id subset.
    Mock::given(method("GET"))
        .and(path("/getPlayersPrice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(price_book_json()))
        .mount(&server)
        .await;

    let sequential = test_client(&server)
        .player_prices(&[101, 102, 103], Platform::Ps)
        .await
        .unwrap();

    let concurrent_client = FutClient::builder()
        .api_base(server.uri())
        .retry(RetryConfig::disabled())
        .disable_cache()
        .batch_size(1)
        .max_concurrency(2)
        .build()
        .unwrap();
    let concurrent = concurrent_client
        .player_prices_concurrent(&[101, 102, 103], Platform::Ps)
        .await
        .unwrap();

    assert_eq!(sequential, concurrent);

    // batch_size 1 over 3 ids → 3 batch requests + 1 sequential request
    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 4);
}

#[tokio::test]
async fn concurrent_bulk_propagates_batch_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getPlayersPrice"))
        .and(query_param("player_ids", "102"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/getPlayersPrice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(price_book_json()))
        .mount(&server)
        .await;

    let client = FutClient::builder()
        .api_base(server.uri())
        .retry(RetryConfig::disabled())
        .disable_cache()
        .batch_size(1)
        .build()
        .unwrap();

    let result = client
        .player_prices_concurrent(&[101, 102, 103], Platform::Ps)
        .await;

    assert!(matches!(
        result,
        Err(FutmarketError::Status { status: 503 })
    ));
}

// ============================================================================
// Search
// ============================================================================

fn mixed_rating_players() -> serde_json::Value {
    serde_json::json!({
        "data": [
            {"ID": 1, "name": "Eighty", "rating": 80},
            {"ID": 2, "name": "EightyFive", "rating": 85},
            {"ID": 3, "name": "Ninety", "rating": 90},
            {"ID": 4, "name": "NinetyNine", "rating": 99}
        ]
    })
}

#[tokio::test]
async fn search_applies_min_rating_bound() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getFilteredPlayers"))
        .and(query_param("minrating", "85"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mixed_rating_players()))
        .mount(&server)
        .await;

    let options = SearchOptions::default().min_rating(85);
    let players = test_client(&server).search(&options).await.unwrap();

    assert_eq!(players.len(), 3);
    assert!(players.iter().all(|p| p.rating >= 85));
}

#[tokio::test]
async fn search_omits_unset_fields_from_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getFilteredPlayers"))
        .and(query_param("platform", "PS"))
        .and(query_param("page", "1"))
        .and(NoQueryParam("minrating"))
        .and(NoQueryParam("maxprice"))
        .and(NoQueryParam("position"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let players = test_client(&server)
        .search(&SearchOptions::default())
        .await
        .unwrap();
    assert!(players.is_empty());
}

#[tokio::test]
async fn search_decodes_full_rows() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getFilteredPlayers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{
                "ID": "44",
                "resource_id": 50512007,
                "name": "Some Striker",
                "common_name": "",
                "rating": 88,
                "position": "ST",
                "club": "FC Example",
                "league": "Example League",
                "nation": "Exampleland",
                "ps_LCPrice": "25,000",
                "pc_LCPrice": 31000,
                "pace": 91, "shooting": 88, "passing": 75,
                "dribbling": 86, "defending": 40, "physical": 78
            }]
        })))
        .mount(&server)
        .await;

    let players = test_client(&server)
        .search(&SearchOptions::default())
        .await
        .unwrap();

    assert_eq!(players.len(), 1);
    let p = &players[0];
    assert_eq!(p.futbin_id, 44);
    assert_eq!(p.display_name(), "Some Striker");
    assert_eq!(p.price_ps, 25000);
    assert_eq!(p.price_pc, 31000);
    assert_eq!(p.pace, 91);
    assert_eq!(p.defending, 40);
}

// ============================================================================
// Listings
// ============================================================================

#[tokio::test]
async fn empty_listing_is_a_result_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/currentTOTW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .mount(&server)
        .await;
    // missing "data" key entirely
    Mock::given(method("GET"))
        .and(path("/newPlayers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert!(client.totw().await.unwrap().is_empty());
    assert!(client.latest_players().await.unwrap().is_empty());
}

#[tokio::test]
async fn popular_players_parse() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getPopularPlayers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {"ID": 7, "resource_id": 70, "name": "Trendy", "rating": 93,
                 "ps_LCPrice": 1200000, "pc_LCPrice": "1,500,000"}
            ]
        })))
        .mount(&server)
        .await;

    let players = test_client(&server).popular_players().await.unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].futbin_id, 7);
    assert_eq!(players[0].price_ps, 1_200_000);
    assert_eq!(players[0].price_pc, 1_500_000);
}

#[tokio::test]
async fn leagues_and_versions_parse() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getLeaguesAndClubsAndroid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {"league_id": 13, "name": "Premier Division",
                 "clubs": [{"club_id": 1, "name": "First FC"}, {"club_id": 2, "name": "Second FC"}]}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/getCardVersions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"key": "gold_rare", "name": "Gold Rare", "img": "gold-rare"}]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);

    let leagues = client.leagues_and_clubs().await.unwrap();
    assert_eq!(leagues.len(), 1);
    assert_eq!(leagues[0].league_id, 13);
    assert_eq!(leagues[0].clubs.len(), 2);
    assert_eq!(leagues[0].clubs[1].name, "Second FC");

    let versions = client.card_versions().await.unwrap();
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0].key, "gold_rare");
}

// ============================================================================
// Cache behaviour
// ============================================================================

#[tokio::test]
async fn cache_hit_skips_second_upstream_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getPlayersPrice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(price_book_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = FutClient::builder()
        .api_base(server.uri())
        .retry(RetryConfig::disabled())
        .cache(CacheConfig::default())
        .build()
        .unwrap();

    let first = client.player_price(101, Platform::Ps).await.unwrap();
    let second = client.player_price(101, Platform::Ps).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn cache_transparency_same_values_with_and_without_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getPlayersPrice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(price_book_json()))
        .mount(&server)
        .await;

    let cached = FutClient::builder()
        .api_base(server.uri())
        .retry(RetryConfig::disabled())
        .cache(CacheConfig::default())
        .build()
        .unwrap();
    let uncached = test_client(&server);

    let a = cached.player_price(103, Platform::Ps).await.unwrap();
    let b = uncached.player_price(103, Platform::Ps).await.unwrap();
    assert_eq!(a, b);

    // second round: one served from cache, one from upstream; still equal
    let a2 = cached.player_price(103, Platform::Ps).await.unwrap();
    let b2 = uncached.player_price(103, Platform::Ps).await.unwrap();
    assert_eq!(a2, b2);
    assert_eq!(a, a2);
}

#[tokio::test]
async fn cache_entry_expires_after_ttl() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getPlayersPrice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(price_book_json()))
        .expect(2)
        .mount(&server)
        .await;

    let client = FutClient::builder()
        .api_base(server.uri())
        .retry(RetryConfig::disabled())
        .cache(CacheConfig::new().ttl(Duration::from_millis(100)))
        .build()
        .unwrap();

    let first = client.player_price(101, Platform::Ps).await.unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;
    let second = client.player_price(101, Platform::Ps).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn clear_cache_forces_refetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getPlayersPrice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(price_book_json()))
        .expect(2)
        .mount(&server)
        .await;

    let client = FutClient::builder()
        .api_base(server.uri())
        .retry(RetryConfig::disabled())
        .cache(CacheConfig::default())
        .build()
        .unwrap();

    client.player_price(101, Platform::Ps).await.unwrap();
    client.clear_cache();
    client.player_price(101, Platform::Ps).await.unwrap();
}

// ============================================================================
// Headers
// ============================================================================

#[tokio::test]
async fn requests_carry_expected_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getPopularPlayers"))
        .and(header("User-Agent", "futmarket-test/1.0"))
        .and(header("Accept", "application/json, text/plain, */*"))
        .and(header("Referer", "https://www.futbin.com/"))
        .and(header("Origin", "https://www.futbin.com"))
        .and(header("X-Custom", "extra"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = FutClient::builder()
        .api_base(server.uri())
        .user_agents(Arc::new(FixedUserAgent("futmarket-test/1.0".into())))
        .header("X-Custom", "extra")
        .retry(RetryConfig::disabled())
        .disable_cache()
        .build()
        .unwrap();

    client.popular_players().await.unwrap();
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn http_error_surfaces_status_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getPlayersPrice"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1) // status errors are permanent: exactly one attempt
        .mount(&server)
        .await;

    let client = FutClient::builder()
        .api_base(server.uri())
        .retry(RetryConfig::new().max_attempts(3).delay(Duration::ZERO))
        .disable_cache()
        .build()
        .unwrap();

    let result = client.player_price(101, Platform::Ps).await;
    assert!(matches!(
        result,
        Err(FutmarketError::Status { status: 500 })
    ));
}

#[tokio::test]
async fn connection_failure_is_transient_and_retried() {
    // Bind a server, learn its address, then shut it down so connections
    // are refused.
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = FutClient::builder()
        .api_base(uri)
        .retry(RetryConfig::new().max_attempts(2).delay(Duration::ZERO))
        .disable_cache()
        .build()
        .unwrap();

    let result = client.player_price(101, Platform::Ps).await;
    match result {
        Err(e) => assert!(e.is_transient(), "expected transient error, got {e}"),
        Ok(_) => panic!("request against a dead server should fail"),
    }
}

#[tokio::test]
async fn malformed_body_maps_to_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getPlayersPrice"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = test_client(&server).player_price(101, Platform::Ps).await;
    assert!(matches!(result, Err(FutmarketError::InvalidResponse(_))));
}

#[tokio::test]
async fn scraped_endpoints_are_not_implemented() {
    let server = MockServer::start().await;
    let client = test_client(&server);

    assert!(matches!(
        client.chemistry_styles().await,
        Err(FutmarketError::NotImplemented("chemistry_styles"))
    ));
    assert!(matches!(
        client.manager_cards().await,
        Err(FutmarketError::NotImplemented("manager_cards"))
    ));
}
