//! Integration tests for the feed client and public REST operations.
//!
//! These tests hit the live exchange and exercise the full
//! connect → subscribe → receive → unsubscribe → disconnect lifecycle.
//!
//! All tests are `#[ignore]` because they require network access.
//!
//! Run with:
//! ```bash
//! cargo test --test feed_integration -- --ignored
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::{sleep, timeout};

use bitbank_sdk::market::wire::TickerData;
use bitbank_sdk::prelude::*;

const TEST_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::test]
#[ignore]
async fn test_public_ticker_fetch() {
    let client = BitbankClient::new().unwrap();
    let response = client
        .request(&bitbank_sdk::ops::public::TICKER)
        .set(":pair", "btc_jpy")
        .unwrap()
        .execute()
        .await
        .unwrap();

    assert_eq!(response["success"], 1);
    let ticker: TickerData = serde_json::from_value(response["data"].clone()).unwrap();
    assert!(ticker.last > rust_decimal::Decimal::ZERO);
}

#[tokio::test]
#[ignore]
async fn test_public_depth_into_order_book() {
    let client = BitbankClient::new().unwrap();
    let response = client
        .request(&bitbank_sdk::ops::public::DEPTH)
        .set(":pair", "btc_jpy")
        .unwrap()
        .execute()
        .await
        .unwrap();

    let depth: DepthData = serde_json::from_value(response["data"].clone()).unwrap();
    let mut book = OrderBook::new();
    book.set_snapshot(&depth);
    assert!(!book.is_empty());
    assert!(book.buy_sell_ratio() > 0.0);
}

#[tokio::test]
#[ignore]
async fn test_feed_receives_ticker_frames() {
    let client = BitbankClient::new().unwrap();
    let mut feed = client.feed();

    let frames: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    {
        let frames = Arc::clone(&frames);
        feed.attach(Box::new(move |channel: &str, _payload: &Payload| {
            frames.lock().unwrap().push(channel.to_string());
        }))
        .unwrap();
    }
    feed.subscribe(["ticker_btc_jpy"]).unwrap();
    feed.connect();

    timeout(TEST_TIMEOUT, async {
        loop {
            if !frames.lock().unwrap().is_empty() {
                break;
            }
            sleep(Duration::from_millis(200)).await;
        }
    })
    .await
    .expect("timed out waiting for a ticker frame");

    assert_eq!(frames.lock().unwrap()[0], "ticker_btc_jpy");
    feed.disconnect().await;
}
