// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{ParseError, Result};
use crate::extractors::traits::{collect_images, json_str, VideoExtractor, DEFAULT_USER_AGENT};
use crate::models::VideoParseInfo;

/// 闲鱼H5商品详情接口
const ITEM_DETAIL_API: &str = "https://h5api.m.goofish.com/h5/mtop.taobao.idle.pc.detail/1.0/";

/// 分享落地页脚本里内嵌的最终商品链接
static FINAL_URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"var url = '(.*?)';").unwrap());

/// 闲鱼(goofish)商品解析器
///
/// 分享短链先落地到中转页, 页面脚本内嵌goofish.com商品链接,
/// 取其中的商品id后调用H5详情接口拿标题/卖家/图片;
/// 该来源只有图集, 不回填视频地址
pub struct XianyuExtractor {
    client: reqwest::Client,
    api_base: String,
}

impl Default for XianyuExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl XianyuExtractor {
    pub fn new() -> Self {
        Self::with_api_base(ITEM_DETAIL_API)
    }

    /// 指定商品详情接口地址, 测试时指向mock服务
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_base: api_base.into(),
        }
    }

    /// 解析goofish.com商品链接: 取id参数后请求详情接口
    async fn parse_item_url(&self, item_url: &str) -> Result<VideoParseInfo> {
        let parsed_url = Url::parse(item_url)?;
        let item_id = parsed_url
            .query_pairs()
            .find(|(key, _)| key == "id")
            .map(|(_, value)| value.to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ParseError::Schema("item id not found in url".to_string()))?;

        debug!(item_id = %item_id, "requesting xianyu item detail");

        // Cookie必须带占位值, 否则接口返回非法请求
        let request_body = format!(r#"data={{"itemId":"{}"}}"#, item_id);
        let response = self
            .client
            .post(&self.api_base)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Cookie", "1=1;")
            .body(request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ParseError::Status(response.status().as_u16()));
        }

        let data: Value = serde_json::from_slice(&response.bytes().await?)?;

        let ret = data
            .pointer("/ret/0")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if !ret.starts_with("SUCCESS") {
            return Err(ParseError::Upstream(format!("xianyu api error: {}", ret)));
        }

        let item = data
            .pointer("/data/itemDO")
            .ok_or_else(|| ParseError::Schema("item data not found in api response".to_string()))?;

        let mut info = VideoParseInfo {
            title: json_str(item, "/title"),
            ..Default::default()
        };

        if let Some(seller) = data.pointer("/data/sellerDO") {
            info.author.name = json_str(seller, "/nick");
            info.author.avatar = json_str(seller, "/portraitUrl");
        }

        let mut images = collect_images(item.pointer("/imageInfos"), "/url");
        if images.is_empty() {
            // 部分商品主图列表为空, 从分享参数里兜底取图
            images = collect_images(
                item.pointer("/shareData/contentParams/mainParams/images"),
                "/image",
            );
        }
        if images.is_empty() {
            return Err(ParseError::Schema(
                "no images found for this item".to_string(),
            ));
        }
        info.images = images;

        info.ensure_playable()
    }
}

#[async_trait]
impl VideoExtractor for XianyuExtractor {
    async fn parse_share_url(&self, share_url: &str) -> Result<VideoParseInfo> {
        let response = self.client.get(share_url).send().await?;
        if !response.status().is_success() {
            return Err(ParseError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        let final_url = FINAL_URL_RE
            .captures(&body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                ParseError::Schema("could not find final url in javascript variable".to_string())
            })?;

        if !final_url.contains("goofish.com") {
            return Err(ParseError::Schema(format!(
                "not a goofish.com url: {}",
                final_url
            )));
        }

        debug!(final_url = %final_url, "xianyu share url resolved");
        self.parse_item_url(&final_url).await
    }

    async fn parse_video_id(&self, _video_id: &str) -> Result<VideoParseInfo> {
        Err(ParseError::UnsupportedSource {
            source_name: "xianyu".to_string(),
            operation: "video id",
        })
    }

    fn name(&self) -> &'static str {
        "xianyu"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_url_regex_captures_embedded_url() {
        let body = r#"<script>var url = 'https://www.goofish.com/item?id=42';</script>"#;
        let caps = FINAL_URL_RE.captures(body).unwrap();
        assert_eq!(
            caps.get(1).unwrap().as_str(),
            "https://www.goofish.com/item?id=42"
        );
    }

    #[test]
    fn test_final_url_regex_no_match() {
        assert!(FINAL_URL_RE.captures("<html>campaign page</html>").is_none());
    }

    #[tokio::test]
    async fn test_parse_video_id_is_unsupported() {
        let extractor = XianyuExtractor::new();
        let err = extractor.parse_video_id("42").await.unwrap_err();
        assert!(err.to_string().contains("has no video id parser"));
    }
}
