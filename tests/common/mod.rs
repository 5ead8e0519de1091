//! Shared fixtures for integration tests

#![allow(dead_code)]

use serde_json::{json, Value};
use shoplens::models::{Listing, TextItem};
use shoplens::source::Credentials;

pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-client-secret";

pub fn credentials() -> Credentials {
    Credentials::new(CLIENT_ID, CLIENT_SECRET)
}

/// DataLab payload with rows out of order and one malformed row
pub fn trend_payload() -> Value {
    json!({
        "startDate": "2024-01-01",
        "endDate": "2024-01-04",
        "timeUnit": "date",
        "results": [{
            "title": "오메가3",
            "category": ["50000008"],
            "data": [
                {"period": "2024-01-03", "ratio": 75.5},
                {"period": "2024-01-01", "ratio": 100.0},
                {"period": "not-a-date", "ratio": 10.0},
                {"period": "2024-01-02", "ratio": "82.25"}
            ]
        }]
    })
}

/// Blog search payload carrying the vitamin corpus with markup
pub fn blog_payload() -> Value {
    json!({
        "lastBuildDate": "Mon, 01 Jan 2024 00:00:00 +0900",
        "total": 2,
        "start": 1,
        "display": 2,
        "items": [
            {
                "title": "<b>great</b> vitamin",
                "link": "https://blog.naver.com/a/1",
                "description": "best &amp; price",
                "bloggername": "a",
                "postdate": "20240101"
            },
            {
                "title": "vitamin deal",
                "link": "https://blog.naver.com/b/2",
                "description": "great price",
                "bloggername": "b",
                "postdate": "20240102"
            }
        ]
    })
}

/// Shopping search payload with one unparsable price
pub fn shop_payload() -> Value {
    json!({
        "total": 3,
        "start": 1,
        "display": 3,
        "items": [
            {"title": "<b>오메가3</b> 1000", "lprice": "1000", "hprice": "", "brand": "A", "mallName": "쿠팡"},
            {"title": "오메가3 bad", "lprice": "bad", "hprice": "", "brand": "A", "mallName": "쿠팡"},
            {"title": "오메가3 3000", "lprice": "3000", "hprice": "", "brand": "B", "mallName": "네이버"}
        ]
    })
}

pub fn vitamin_corpus() -> Vec<TextItem> {
    vec![
        TextItem::new("great vitamin", "best price"),
        TextItem::new("vitamin deal", "great price"),
    ]
}

pub fn listing(price: Option<f64>, brand: Option<&str>, mall: &str) -> Listing {
    Listing {
        title: String::new(),
        low_price: price,
        brand: brand.map(str::to_string),
        mall_name: mall.to_string(),
    }
}
