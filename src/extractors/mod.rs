// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 来源解析器模块
///
/// 每个平台一个独立实现, 统一遵循VideoExtractor特质
pub mod douyin;
pub mod traits;
pub mod xianyu;

pub use douyin::DouyinExtractor;
pub use traits::{VideoExtractor, DEFAULT_USER_AGENT};
pub use xianyu::XianyuExtractor;
