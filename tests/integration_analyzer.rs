use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use solana_pubkey::Pubkey;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;

use degenscope::Analyzer;
use degenscope::config::AnalyzerConfig;
use degenscope::config::SourceConfig;
use degenscope::constants::FALLBACK_SOL_PRICE_USD;
use degenscope::constants::WSOL_MINT_KEY;
use degenscope::model::TokenStatus;
use degenscope::source::DexScreenerSource;
use degenscope::source::HeliusSource;
use degenscope::source::PriceOracle;
use degenscope::source::TransactionSource;

const WALLET: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";

fn test_config(server: &MockServer, page_size: usize) -> SourceConfig {
    SourceConfig {
        helius_url: server.uri(),
        dexscreener_url: server.uri(),
        helius_api_key: Some("test-key".to_string()),
        page_size,
        max_transactions: 50,
        page_delay_ms: 0,
        batch_delay_ms: 0,
        market_chunk_delay_ms: 0,
        max_retries: 0,
        base_retry_delay_ms: 1,
        max_retry_delay_ms: 1,
        ..SourceConfig::default()
    }
}

fn analyzer(server: &MockServer, page_size: usize) -> Analyzer {
    let config = test_config(server, page_size);
    let helius = Arc::new(HeliusSource::new(config.clone()).unwrap());
    let dexscreener = Arc::new(DexScreenerSource::new(config));
    Analyzer::new(helius, dexscreener, AnalyzerConfig::default())
}

fn history_path() -> String {
    format!("/v0/addresses/{WALLET}/transactions")
}

fn buy_tx(signature: &str, mint: &Pubkey, lamports_out: u64, tokens: f64, timestamp: i64) -> serde_json::Value {
    json!({
        "signature": signature,
        "timestamp": timestamp,
        "fee": 5000,
        "feePayer": WALLET,
        "type": "SWAP",
        "source": "RAYDIUM",
        "nativeTransfers": [
            {"fromUserAccount": WALLET, "toUserAccount": "pool", "amount": lamports_out}
        ],
        "tokenTransfers": [
            {"fromUserAccount": "pool", "toUserAccount": WALLET, "mint": mint.to_string(),
             "tokenAmount": tokens, "tokenName": "Pepe Wif Hat", "tokenSymbol": "PWH"}
        ]
    })
}

fn sell_tx(signature: &str, mint: &Pubkey, lamports_in: u64, tokens: f64, timestamp: i64) -> serde_json::Value {
    json!({
        "signature": signature,
        "timestamp": timestamp,
        "fee": 5000,
        "feePayer": WALLET,
        "type": "SWAP",
        "source": "RAYDIUM",
        "nativeTransfers": [
            {"fromUserAccount": "pool", "toUserAccount": WALLET, "amount": lamports_in}
        ],
        "tokenTransfers": [
            {"fromUserAccount": WALLET, "toUserAccount": "pool", "mint": mint.to_string(),
             "tokenAmount": tokens, "tokenName": "Pepe Wif Hat", "tokenSymbol": "PWH"}
        ]
    })
}

fn pair_dto(mint: &Pubkey, liquidity: f64, volume: f64) -> serde_json::Value {
    json!({
        "baseToken": {"address": mint.to_string(), "name": "Pepe Wif Hat", "symbol": "PWH"},
        "priceUsd": "0.002",
        "liquidity": {"usd": liquidity},
        "volume": {"h24": volume},
        "pairCreatedAt": 1_699_990_000_000i64
    })
}

#[tokio::test]
async fn full_pipeline_buy_then_sell() {
    let server = MockServer::start().await;
    let wallet: Pubkey = WALLET.parse().unwrap();
    let mint = Pubkey::new_unique();

    // short page ends pagination after one request
    Mock::given(method("GET"))
        .and(path(history_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            sell_tx("sig2", &mint, 3_000_005_000u64, 100.0, 1_700_003_600),
            buy_tx("sig1", &mint, 2_000_005_000u64, 100.0, 1_700_000_000),
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/tokens/v1/solana/{mint}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([pair_dto(&mint, 50_000.0, 120_000.0)])))
        .mount(&server)
        .await;

    let summary = analyzer(&server, 100).analyze(&wallet).await.unwrap().unwrap();

    assert_eq!(summary.tokens_traded, 1);
    assert_eq!(summary.trade_count, 2);
    assert!((summary.total_sol_spent - 2.0).abs() < 1e-9);
    assert!((summary.total_sol_received - 3.0).abs() < 1e-9);
    assert!((summary.pnl_sol - 1.0).abs() < 1e-9);
    assert!((summary.pnl_percent - 50.0).abs() < 1e-9);
    assert!((summary.win_rate - 100.0).abs() < 1e-9);
    assert_eq!(summary.active_tokens, 1);
    assert_eq!(summary.profitable_tokens, 1);
    assert_eq!(summary.top_winners.len(), 1);
    assert_eq!(summary.top_winners[0].symbol, "PWH");
    assert_eq!(summary.top_winners[0].status, TokenStatus::Active);
    // sold everything, nothing held
    assert_eq!(summary.holding_tokens, 0);
    // 2 trades an hour apart
    assert!((summary.avg_hold_time_minutes - 60.0).abs() < 1e-9);
}

#[tokio::test]
async fn pagination_follows_signature_cursor() {
    let server = MockServer::start().await;
    let wallet: Pubkey = WALLET.parse().unwrap();
    let mint = Pubkey::new_unique();

    // most specific mocks first: wiremock uses the first match
    Mock::given(method("GET"))
        .and(path(history_path()))
        .and(query_param("before", "sig1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            sell_tx("sig2", &mint, 3_000_005_000u64, 100.0, 1_700_000_000),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(history_path()))
        .and(query_param("before", "sig2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(history_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            buy_tx("sig1", &mint, 2_000_005_000u64, 100.0, 1_700_003_600),
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/tokens/v1/solana/{mint}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    // page_size 1 forces the cursor walk across all three requests
    let summary = analyzer(&server, 1).analyze(&wallet).await.unwrap().unwrap();

    assert_eq!(summary.trade_count, 2);
    assert_eq!(summary.tokens_traded, 1);
    assert_eq!(summary.unknown_tokens, 1);
}

#[tokio::test]
async fn later_page_failure_keeps_partial_history() {
    let server = MockServer::start().await;
    let wallet: Pubkey = WALLET.parse().unwrap();
    let mint = Pubkey::new_unique();

    Mock::given(method("GET"))
        .and(path(history_path()))
        .and(query_param("before", "sig1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(history_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            buy_tx("sig1", &mint, 2_000_005_000u64, 100.0, 1_700_000_000),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/tokens/v1/solana/{mint}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let summary = analyzer(&server, 1).analyze(&wallet).await.unwrap().unwrap();

    // the first page survived, the rest was lost
    assert_eq!(summary.trade_count, 1);
    assert!((summary.total_sol_spent - 2.0).abs() < 1e-9);
}

#[tokio::test]
async fn first_page_failure_is_an_error() {
    let server = MockServer::start().await;
    let wallet: Pubkey = WALLET.parse().unwrap();

    Mock::given(method("GET"))
        .and(path(history_path()))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = analyzer(&server, 100).analyze(&wallet).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn history_without_swaps_reports_no_activity() {
    let server = MockServer::start().await;
    let wallet: Pubkey = WALLET.parse().unwrap();

    // a plain SOL transfer, no token legs
    Mock::given(method("GET"))
        .and(path(history_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "signature": "sig-transfer",
            "timestamp": 1_700_000_000,
            "fee": 5000,
            "feePayer": WALLET,
            "type": "TRANSFER",
            "nativeTransfers": [
                {"fromUserAccount": WALLET, "toUserAccount": "friend", "amount": 1_000_000_000u64}
            ]
        }])))
        .mount(&server)
        .await;

    let result = analyzer(&server, 100).analyze(&wallet).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn rate_limited_page_is_retried() {
    let server = MockServer::start().await;
    let wallet: Pubkey = WALLET.parse().unwrap();
    let mint = Pubkey::new_unique();

    // one 429, then the real page
    Mock::given(method("GET"))
        .and(path(history_path()))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(history_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            buy_tx("sig1", &mint, 2_000_005_000u64, 100.0, 1_700_000_000),
        ])))
        .mount(&server)
        .await;

    let mut config = test_config(&server, 100);
    config.max_retries = 2;
    let helius = HeliusSource::new(config).unwrap();

    let history = helius.fetch_history(&wallet).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].signature, "sig1");
}

#[tokio::test]
async fn sol_price_reads_the_wsol_pair() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/latest/dex/pairs/solana/{WSOL_MINT_KEY}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pairs": [{
                "baseToken": {"address": WSOL_MINT_KEY.to_string(), "name": "Wrapped SOL", "symbol": "SOL"},
                "priceUsd": "187.42"
            }]
        })))
        .mount(&server)
        .await;

    let oracle = DexScreenerSource::new(test_config(&server, 100));
    assert!((oracle.sol_price_usd().await - 187.42).abs() < 1e-9);
}

#[tokio::test]
async fn sol_price_falls_back_when_oracle_fails() {
    let server = MockServer::start().await;

    // first call fails outright, second returns an undecodable body
    Mock::given(method("GET"))
        .and(path(format!("/latest/dex/pairs/solana/{WSOL_MINT_KEY}")))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/latest/dex/pairs/solana/{WSOL_MINT_KEY}")))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let oracle = DexScreenerSource::new(test_config(&server, 100));
    assert_eq!(oracle.sol_price_usd().await, FALLBACK_SOL_PRICE_USD);
    assert_eq!(oracle.sol_price_usd().await, FALLBACK_SOL_PRICE_USD);
}

#[tokio::test]
async fn parsed_batches_skip_failed_chunks() {
    let server = MockServer::start().await;
    let mint = Pubkey::new_unique();

    Mock::given(method("POST"))
        .and(path("/v0/transactions"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v0/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            buy_tx("sig3", &mint, 1_000_000_000u64, 10.0, 1_700_000_000),
        ])))
        .mount(&server)
        .await;

    let mut config = test_config(&server, 100);
    config.batch_size = 2;
    let helius = HeliusSource::new(config).unwrap();

    let signatures: Vec<String> = vec!["sig1", "sig2", "sig3"].into_iter().map(String::from).collect();
    let parsed = helius.fetch_parsed_batches(&signatures).await.unwrap();

    // first batch of two failed and was skipped, second batch survived
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].signature, "sig3");
}

#[tokio::test]
async fn rugged_token_is_classified_from_market_data() {
    let server = MockServer::start().await;
    let wallet: Pubkey = WALLET.parse().unwrap();
    let mint = Pubkey::new_unique();

    Mock::given(method("GET"))
        .and(path(history_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            buy_tx("sig1", &mint, 5_000_005_000u64, 1_000_000.0, 1_700_000_000),
        ])))
        .mount(&server)
        .await;

    // liquidity drained below the rug threshold
    Mock::given(method("GET"))
        .and(path(format!("/tokens/v1/solana/{mint}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([pair_dto(&mint, 40.0, 0.0)])))
        .mount(&server)
        .await;

    let summary = analyzer(&server, 100).analyze(&wallet).await.unwrap().unwrap();

    assert_eq!(summary.rugged_tokens, 1);
    assert_eq!(summary.tokens[0].status, TokenStatus::Rugged);
    // bought and never sold
    assert_eq!(summary.holding_tokens, 1);
    assert!((summary.pnl_sol + 5.0).abs() < 1e-9);
}
