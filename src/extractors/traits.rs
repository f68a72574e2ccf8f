// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::models::{ImgInfo, VideoParseInfo};

/// 浏览器User-Agent, 部分平台接口对非浏览器UA直接返回403
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// 视频来源解析器特质
///
/// 每个来源实现分享链接和视频id两种解析入口, 允许只支持其一,
/// 不支持的入口返回明确错误; 单次调用内可发起多个串行HTTP请求,
/// 但不得持有跨调用状态
#[async_trait]
pub trait VideoExtractor: Send + Sync {
    /// 根据分享链接解析视频信息
    async fn parse_share_url(&self, share_url: &str) -> Result<VideoParseInfo>;

    /// 根据视频id解析视频信息
    async fn parse_video_id(&self, video_id: &str) -> Result<VideoParseInfo>;

    /// 来源名称
    fn name(&self) -> &'static str;
}

/// 按JSON指针取字符串字段, 缺失时返回空字符串
pub(crate) fn json_str(value: &Value, pointer: &str) -> String {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// 从JSON数组中按指针收集图片地址, 过滤空串, 保持顺序
pub(crate) fn collect_images(list: Option<&Value>, pointer: &str) -> Vec<ImgInfo> {
    list.and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.pointer(pointer).and_then(Value::as_str))
                .filter(|url| !url.is_empty())
                .map(|url| ImgInfo {
                    url: url.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_str_missing_path_is_empty() {
        let value = json!({"a": {"b": "x"}});
        assert_eq!(json_str(&value, "/a/b"), "x");
        assert_eq!(json_str(&value, "/a/c"), "");
    }

    #[test]
    fn test_collect_images_filters_empty_urls() {
        let value = json!([{"url": "https://i/1"}, {"url": ""}, {"url": "https://i/2"}]);
        let images = collect_images(Some(&value), "/url");
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].url, "https://i/1");
        assert_eq!(images[1].url, "https://i/2");
    }

    #[test]
    fn test_collect_images_handles_missing_list() {
        assert!(collect_images(None, "/url").is_empty());
    }
}
