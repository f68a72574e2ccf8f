// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 错误模块
///
/// 定义解析过程中的统一错误类型
pub mod error;

/// 来源解析器模块
///
/// 实现各平台分享链接/视频id的解析
pub mod extractors;

/// 远端兜底模块
///
/// 未识别来源的分享链接交给第三方解析服务
pub mod fallback;

/// 数据模型模块
///
/// 定义解析结果的统一数据结构
pub mod models;

/// 解析调度模块
///
/// 对外提供分享文案/分享链接/视频id的统一解析入口
pub mod parser;

/// 来源注册表模块
///
/// 维护来源到解析器的静态映射和链接归属识别
pub mod registry;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

pub use error::{ParseError, Result};
pub use extractors::{DouyinExtractor, VideoExtractor, XianyuExtractor};
pub use fallback::{FallbackConfig, FallbackParser};
pub use models::{AuthorInfo, BatchParseItem, ImgInfo, VideoParseInfo};
pub use parser::{BatchConfig, ParserConfig, VideoParser};
pub use registry::{SourceInfo, SourceRegistry, DEFAULT_REGISTRY};
