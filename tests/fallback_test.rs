// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use parse_video::{FallbackConfig, FallbackParser, ParseError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fallback_for(server: &MockServer) -> FallbackParser {
    FallbackParser::with_config(FallbackConfig {
        endpoint: format!("{}/video/share/url/parse", server.uri()),
        require_zero_code: false,
    })
}

#[tokio::test]
async fn test_fallback_envelope_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/video/share/url/parse"))
        .and(query_param("url", "https://example.test/x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "msg": "",
            "data": {
                "author": {"uid": "u1", "name": "N", "avatar": "a"},
                "title": "T",
                "video_url": "v",
                "music_url": "m",
                "cover_url": "c",
                "images": ["i1", "i2"]
            }
        })))
        .mount(&server)
        .await;

    let info = fallback_for(&server)
        .parse_share_url("https://example.test/x")
        .await
        .unwrap();

    assert_eq!(info.title, "T");
    assert_eq!(info.video_url, "v");
    assert_eq!(info.music_url, "m");
    assert_eq!(info.cover_url, "c");
    assert_eq!(info.author.uid, "u1");
    assert_eq!(info.author.name, "N");
    assert_eq!(info.author.avatar, "a");
    assert_eq!(info.images.len(), 2);
    assert_eq!(info.images[0].url, "i1");
    assert_eq!(info.images[1].url, "i2");
}

#[tokio::test]
async fn test_fallback_null_data_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/video/share/url/parse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 404,
            "msg": "not found",
            "data": null
        })))
        .mount(&server)
        .await;

    let err = fallback_for(&server)
        .parse_share_url("https://example.test/x")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("kakadown response data is nil"));
}

#[tokio::test]
async fn test_fallback_null_data_with_ok_code_is_still_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/video/share/url/parse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "msg": "ok",
            "data": null
        })))
        .mount(&server)
        .await;

    let err = fallback_for(&server)
        .parse_share_url("https://example.test/x")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("kakadown response data is nil"));
}

#[tokio::test]
async fn test_fallback_legacy_schema_without_envelope() {
    let server = MockServer::start().await;
    // 旧版服务直接返回结果体, 没有code/msg/data信封
    Mock::given(method("GET"))
        .and(path("/video/share/url/parse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "legacy",
            "author": {"uid": "u2", "name": "L", "avatar": ""},
            "video_url": "https://cdn.example/legacy.mp4",
            "music_url": "",
            "cover_url": "",
            "images": []
        })))
        .mount(&server)
        .await;

    let info = fallback_for(&server)
        .parse_share_url("https://example.test/x")
        .await
        .unwrap();
    assert_eq!(info.title, "legacy");
    assert_eq!(info.author.name, "L");
    assert_eq!(info.video_url, "https://cdn.example/legacy.mp4");
}

#[tokio::test]
async fn test_fallback_surfaces_primary_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/video/share/url/parse"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = fallback_for(&server)
        .parse_share_url("https://example.test/x")
        .await
        .unwrap_err();
    // 两种解码都失败时以信封格式的解码错误为准
    assert!(matches!(err, ParseError::Decode(_)));
}

#[tokio::test]
async fn test_fallback_permissive_code_policy_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/video/share/url/parse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 500,
            "msg": "degraded",
            "data": {"title": "T", "video_url": "v", "images": []}
        })))
        .mount(&server)
        .await;

    // 默认不检查code, data非空即成功
    let info = fallback_for(&server)
        .parse_share_url("https://example.test/x")
        .await
        .unwrap();
    assert_eq!(info.video_url, "v");
}

#[tokio::test]
async fn test_fallback_strict_code_policy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/video/share/url/parse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 500,
            "msg": "degraded",
            "data": {"title": "T", "video_url": "v", "images": []}
        })))
        .mount(&server)
        .await;

    let parser = FallbackParser::with_config(FallbackConfig {
        endpoint: format!("{}/video/share/url/parse", server.uri()),
        require_zero_code: true,
    });
    let err = parser
        .parse_share_url("https://example.test/x")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("kakadown returned code 500"));
}
