// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};

/// 作者信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorInfo {
    /// 作者id
    #[serde(default)]
    pub uid: String,
    /// 作者昵称
    #[serde(default)]
    pub name: String,
    /// 作者头像地址
    #[serde(default)]
    pub avatar: String,
}

/// 图片信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImgInfo {
    /// 图片地址
    #[serde(default)]
    pub url: String,
}

/// 视频解析结果
///
/// 各来源解析器的统一输出, 未知字段一律为空字符串
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoParseInfo {
    /// 标题
    #[serde(default)]
    pub title: String,
    /// 作者信息
    #[serde(default)]
    pub author: AuthorInfo,
    /// 视频播放地址, 图集作品为空
    #[serde(default)]
    pub video_url: String,
    /// 背景音乐地址
    #[serde(default)]
    pub music_url: String,
    /// 封面地址
    #[serde(default)]
    pub cover_url: String,
    /// 图集, 按平台顺序排列, 纯视频作品为空
    #[serde(default)]
    pub images: Vec<ImgInfo>,
}

impl VideoParseInfo {
    /// 校验解析结果至少包含视频地址或图集之一, 否则视为解析失败
    pub fn ensure_playable(self) -> Result<Self> {
        if self.video_url.is_empty() && self.images.is_empty() {
            return Err(ParseError::EmptyResult);
        }
        Ok(self)
    }
}

/// 批量解析单项结果, 解析结果与错误二者有且只有其一
#[derive(Debug)]
pub struct BatchParseItem {
    /// 解析结果
    pub parse_info: Option<VideoParseInfo>,
    /// 解析错误
    pub error: Option<ParseError>,
}
