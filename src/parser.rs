// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;
use std::sync::Arc;

use futures::StreamExt;
use tracing::{debug, info};

use crate::error::{ParseError, Result};
use crate::fallback::{FallbackConfig, FallbackParser};
use crate::models::{BatchParseItem, VideoParseInfo};
use crate::registry::{SourceRegistry, DEFAULT_REGISTRY};
use crate::utils::url_utils;

/// 批量解析配置
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// 并发上限, 不小于id数量时等价于全并发
    pub concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { concurrency: 16 }
    }
}

/// 解析器配置
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    /// 远端兜底配置
    pub fallback: FallbackConfig,
    /// 批量解析配置
    pub batch: BatchConfig,
}

/// 视频分享链接解析器
///
/// 统一入口: 分享文案/分享链接/视频id三种输入都归一成VideoParseInfo;
/// 无共享可变状态, 可被多线程并发调用
pub struct VideoParser {
    registry: Arc<SourceRegistry>,
    fallback: FallbackParser,
    batch: BatchConfig,
}

impl Default for VideoParser {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoParser {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// 使用配置创建解析器
    pub fn with_config(config: ParserConfig) -> Self {
        Self::with_registry(DEFAULT_REGISTRY.clone(), config)
    }

    /// 使用自定义来源注册表创建解析器, 扩展来源或测试时使用
    pub fn with_registry(registry: Arc<SourceRegistry>, config: ParserConfig) -> Self {
        debug!(sources = ?registry.sources(), "video parser initialized");
        Self {
            registry,
            fallback: FallbackParser::with_config(config.fallback),
            batch: config.batch,
        }
    }

    /// 从分享文案中提取链接并解析
    pub async fn parse_share_message(&self, share_message: &str) -> Result<VideoParseInfo> {
        let share_url = url_utils::extract_url(share_message)?;
        self.parse_share_url(share_url).await
    }

    /// 根据分享链接解析视频信息
    ///
    /// 命中注册来源时结果原样透传; 来源识别成功但解析失败时
    /// 直接报错, 不再尝试兜底服务
    pub async fn parse_share_url(&self, share_url: &str) -> Result<VideoParseInfo> {
        match self.registry.resolve(share_url) {
            Some(source) => {
                let extractor = self
                    .registry
                    .get(source)
                    .and_then(|source_info| source_info.share_extractor.as_ref())
                    .ok_or_else(|| ParseError::UnsupportedSource {
                        source_name: source.to_string(),
                        operation: "share url",
                    })?;
                debug!(
                    source,
                    extractor = extractor.name(),
                    share_url,
                    "share url matched registered source"
                );
                extractor.parse_share_url(share_url).await
            }
            None => {
                info!(share_url, "no registered source matched, using remote fallback");
                self.fallback.parse_share_url(share_url).await
            }
        }
    }

    /// 根据来源和视频id解析视频信息
    pub async fn parse_video_id(&self, source: &str, video_id: &str) -> Result<VideoParseInfo> {
        if source.is_empty() || video_id.is_empty() {
            return Err(ParseError::InvalidInput(
                "video id or source is empty".to_string(),
            ));
        }

        let extractor = self
            .registry
            .get(source)
            .and_then(|source_info| source_info.id_extractor.as_ref())
            .ok_or_else(|| ParseError::UnsupportedSource {
                source_name: source.to_string(),
                operation: "video id",
            })?;
        debug!(source, extractor = extractor.name(), video_id, "dispatching video id");
        extractor.parse_video_id(video_id).await
    }

    /// 根据来源批量解析视频id
    ///
    /// 并发受配置上限约束; 单条失败不影响其它条目, 每个id
    /// 都会出现在结果里; 重复id合并为一条, 结果无序
    pub async fn batch_parse_video_id(
        &self,
        source: &str,
        video_ids: &[String],
    ) -> Result<HashMap<String, BatchParseItem>> {
        if source.is_empty() || video_ids.is_empty() {
            return Err(ParseError::InvalidInput(
                "video ids or source is empty".to_string(),
            ));
        }
        if self
            .registry
            .get(source)
            .and_then(|source_info| source_info.id_extractor.as_ref())
            .is_none()
        {
            return Err(ParseError::UnsupportedSource {
                source_name: source.to_string(),
                operation: "video id",
            });
        }

        let concurrency = self.batch.concurrency.max(1);
        let mut results = HashMap::with_capacity(video_ids.len());
        let mut stream = futures::stream::iter(video_ids.iter().cloned())
            .map(move |video_id| async move {
                let parsed = self.parse_video_id(source, &video_id).await;
                (video_id, parsed)
            })
            .buffer_unordered(concurrency);

        while let Some((video_id, parsed)) = stream.next().await {
            let item = match parsed {
                Ok(parse_info) => BatchParseItem {
                    parse_info: Some(parse_info),
                    error: None,
                },
                Err(err) => BatchParseItem {
                    parse_info: None,
                    error: Some(err),
                },
            };
            results.insert(video_id, item);
        }

        Ok(results)
    }
}
