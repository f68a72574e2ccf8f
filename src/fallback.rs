// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::error::{ParseError, Result};
use crate::models::{ImgInfo, VideoParseInfo};

/// 默认兜底服务地址
pub const DEFAULT_FALLBACK_ENDPOINT: &str = "https://kakadown.com/video/share/url/parse";

/// 远端兜底解析配置
#[derive(Debug, Clone)]
pub struct FallbackConfig {
    /// 兜底服务地址
    pub endpoint: String,
    /// 是否要求响应code为0
    ///
    /// 默认false, 沿用宽松行为: 只要data非空即视为成功
    pub require_zero_code: bool,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_FALLBACK_ENDPOINT.to_string(),
            require_zero_code: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct KakadownAuthor {
    #[serde(default)]
    uid: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    avatar: String,
}

#[derive(Debug, Deserialize)]
struct KakadownData {
    #[serde(default)]
    author: KakadownAuthor,
    #[serde(default)]
    title: String,
    #[serde(default)]
    video_url: String,
    #[serde(default)]
    music_url: String,
    #[serde(default)]
    cover_url: String,
    #[serde(default)]
    images: Vec<String>,
}

/// 兜底服务信封格式
///
/// data字段区分三种情况: 缺失(旧版服务直接返回结果体, 走兼容
/// 路径)/显式null(上游未解析出结果, 报错)/有值
#[derive(Debug, Deserialize)]
struct KakadownResponse {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    msg: String,
    #[serde(default, deserialize_with = "nullable_data")]
    data: Option<Option<KakadownData>>,
}

/// 把显式null解码成Some(None), 字段缺失由default给出None
fn nullable_data<'de, D>(deserializer: D) -> std::result::Result<Option<Option<KakadownData>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<KakadownData>::deserialize(deserializer).map(Some)
}

/// 未识别来源的远端兜底解析器
///
/// 注册表没有命中的分享链接交给第三方解析服务处理
pub struct FallbackParser {
    client: reqwest::Client,
    config: FallbackConfig,
}

impl Default for FallbackParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FallbackParser {
    pub fn new() -> Self {
        Self::with_config(FallbackConfig::default())
    }

    pub fn with_config(config: FallbackConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// 请求兜底服务解析分享链接
    pub async fn parse_share_url(&self, share_url: &str) -> Result<VideoParseInfo> {
        let api_url = format!(
            "{}?url={}",
            self.config.endpoint,
            urlencoding::encode(share_url)
        );
        debug!(share_url, "falling back to remote parser");

        let response = self.client.get(&api_url).send().await?;
        let body = response.bytes().await?;

        let envelope: KakadownResponse = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(primary_err) => {
                // 旧版服务兼容: 响应体本身就是结果体;
                // 两种解码都失败时以信封格式的错误为准
                return serde_json::from_slice::<VideoParseInfo>(&body)
                    .map_err(|_| ParseError::Decode(primary_err));
            }
        };

        if self.config.require_zero_code && envelope.code != 0 {
            return Err(ParseError::Upstream(format!(
                "kakadown returned code {}: {}",
                envelope.code, envelope.msg
            )));
        }

        let data = match envelope.data {
            Some(Some(data)) => data,
            Some(None) => {
                return Err(ParseError::Upstream(
                    "kakadown response data is nil".to_string(),
                ))
            }
            None => {
                // 旧版服务兼容: 没有data字段说明响应体本身就是结果体
                return serde_json::from_slice::<VideoParseInfo>(&body)
                    .map_err(ParseError::Decode);
            }
        };

        let mut info = VideoParseInfo {
            title: data.title,
            video_url: data.video_url,
            music_url: data.music_url,
            cover_url: data.cover_url,
            images: data
                .images
                .into_iter()
                .map(|url| ImgInfo { url })
                .collect(),
            ..Default::default()
        };
        info.author.uid = data.author.uid;
        info.author.name = data.author.name;
        info.author.avatar = data.author.avatar;

        info.ensure_playable()
    }
}
