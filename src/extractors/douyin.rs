// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::{ParseError, Result};
use crate::extractors::traits::{collect_images, json_str, VideoExtractor, DEFAULT_USER_AGENT};
use crate::models::VideoParseInfo;

/// 抖音分享页, 拼接视频id后即作品落地页
const SHARE_VIDEO_PAGE: &str = "https://www.iesdouyin.com/share/video/";

/// 短链302后的Location里带作品id, 图集作品路径是note
static VIDEO_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(video|note)/(\d+)").unwrap());

/// 分享页SSR数据, 作品信息内嵌在路由数据脚本里
static ROUTER_DATA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)window\._ROUTER_DATA\s*=\s*(.*?)</script>").unwrap());

/// 抖音视频/图集解析器
///
/// 短链302取作品id, 再请求分享页从路由数据里取作品信息,
/// 视频地址把水印播放地址里的playwm替换为play
pub struct DouyinExtractor {
    client: reqwest::Client,
    page_base: String,
}

impl Default for DouyinExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DouyinExtractor {
    pub fn new() -> Self {
        Self::with_page_base(SHARE_VIDEO_PAGE)
    }

    /// 指定分享页地址前缀, 测试时指向mock服务
    pub fn with_page_base(page_base: impl Into<String>) -> Self {
        // 手动处理302, 短链的Location本身就是解析目标
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_default();

        Self {
            client,
            page_base: page_base.into(),
        }
    }
}

#[async_trait]
impl VideoExtractor for DouyinExtractor {
    async fn parse_share_url(&self, share_url: &str) -> Result<VideoParseInfo> {
        let response = self.client.get(share_url).send().await?;
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ParseError::Schema("douyin share url did not redirect".to_string()))?;

        let video_id = VIDEO_ID_RE
            .captures(location)
            .and_then(|caps| caps.get(2))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                ParseError::Schema(format!("video id not found in redirect url: {}", location))
            })?;

        debug!(video_id = %video_id, "douyin share url resolved");
        self.parse_video_id(&video_id).await
    }

    async fn parse_video_id(&self, video_id: &str) -> Result<VideoParseInfo> {
        let page_url = format!("{}{}", self.page_base, video_id);
        let response = self.client.get(&page_url).send().await?;
        if !response.status().is_success() {
            return Err(ParseError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        let router_json = ROUTER_DATA_RE
            .captures(&body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().trim_end_matches(';'))
            .ok_or_else(|| {
                ParseError::Schema("router data not found in share page".to_string())
            })?;

        let data: Value = serde_json::from_str(router_json)?;

        // SSR路由key是字面量模板, 图集作品落在note路由下
        let item = data
            .pointer("/loaderData/video_(id)~1page/videoInfoRes/item_list/0")
            .or_else(|| data.pointer("/loaderData/note_(id)~1page/videoInfoRes/item_list/0"))
            .ok_or_else(|| ParseError::Schema("video item not found in router data".to_string()))?;

        let mut info = VideoParseInfo {
            title: json_str(item, "/desc"),
            ..Default::default()
        };
        info.author.uid = json_str(item, "/author/sec_uid");
        info.author.name = json_str(item, "/author/nickname");
        info.author.avatar = json_str(item, "/author/avatar_thumb/url_list/0");
        info.cover_url = json_str(item, "/video/cover/url_list/0");
        info.music_url = json_str(item, "/music/play_url/url_list/0");

        // 图集作品的play_addr uri不是纯数字id, 此时不回填视频地址
        let play_uri = json_str(item, "/video/play_addr/uri");
        if !play_uri.is_empty() && play_uri.chars().all(|c| c.is_ascii_digit()) {
            info.video_url =
                json_str(item, "/video/play_addr/url_list/0").replace("playwm", "play");
        }

        info.images = collect_images(item.pointer("/images"), "/url_list/0");

        info.ensure_playable()
    }

    fn name(&self) -> &'static str {
        "douyin"
    }
}
