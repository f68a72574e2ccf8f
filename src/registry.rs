// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::extractors::{DouyinExtractor, VideoExtractor, XianyuExtractor};

/// 单个视频来源的注册信息
pub struct SourceInfo {
    /// 分享链接域名特征, 故意用子串匹配以兼容变体子域名
    pub host_patterns: Vec<&'static str>,
    /// 分享链接解析器
    pub share_extractor: Option<Arc<dyn VideoExtractor>>,
    /// 视频id解析器
    pub id_extractor: Option<Arc<dyn VideoExtractor>>,
}

/// 视频来源注册表
///
/// 初始化后只读, 可被多线程并发读取; 遍历顺序即注册顺序,
/// 链接同时命中多个来源时先注册者优先
#[derive(Default)]
pub struct SourceRegistry {
    entries: Vec<(&'static str, SourceInfo)>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一个来源
    pub fn register(mut self, source: &'static str, info: SourceInfo) -> Self {
        self.entries.push((source, info));
        self
    }

    /// 查找来源注册信息
    pub fn get(&self, source: &str) -> Option<&SourceInfo> {
        self.entries
            .iter()
            .find(|(key, _)| *key == source)
            .map(|(_, info)| info)
    }

    /// 根据分享链接识别来源
    ///
    /// 按注册顺序扫描域名特征做子串匹配, 无匹配返回None(不是错误)
    pub fn resolve(&self, share_url: &str) -> Option<&'static str> {
        self.entries.iter().find_map(|(key, info)| {
            info.host_patterns
                .iter()
                .any(|pattern| share_url.contains(pattern))
                .then_some(*key)
        })
    }

    /// 已注册的来源名称列表
    pub fn sources(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(key, _)| *key).collect()
    }
}

/// 内置来源注册表, 进程生命周期内只读
pub static DEFAULT_REGISTRY: Lazy<Arc<SourceRegistry>> = Lazy::new(|| {
    let douyin: Arc<dyn VideoExtractor> = Arc::new(DouyinExtractor::new());
    let xianyu: Arc<dyn VideoExtractor> = Arc::new(XianyuExtractor::new());

    Arc::new(
        SourceRegistry::new()
            .register(
                "douyin",
                SourceInfo {
                    host_patterns: vec!["v.douyin.com", "www.iesdouyin.com", "www.douyin.com"],
                    share_extractor: Some(douyin.clone()),
                    id_extractor: Some(douyin),
                },
            )
            .register(
                "xianyu",
                SourceInfo {
                    host_patterns: vec!["m.tb.cn", "goofish.com"],
                    share_extractor: Some(xianyu),
                    id_extractor: None,
                },
            ),
    )
});
