// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 解析错误类型
#[derive(Error, Debug)]
pub enum ParseError {
    /// 输入校验失败
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// 已识别来源缺少对应的解析能力
    ///
    /// 字段不叫source: thiserror会把该名字当作错误链的来源
    #[error("source {source_name} has no {operation} parser")]
    UnsupportedSource {
        source_name: String,
        operation: &'static str,
    },

    /// 请求失败
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// 上游返回非成功状态码
    #[error("unexpected http status: {0}")]
    Status(u16),

    /// 响应体JSON反序列化失败
    #[error("json decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// 响应结构不符合预期, 缺少字段或正则无匹配
    #[error("unexpected response: {0}")]
    Schema(String),

    /// 链接解析失败
    #[error("invalid url: {0}")]
    UrlParse(#[from] url::ParseError),

    /// 上游业务错误
    #[error("{0}")]
    Upstream(String),

    /// 解析结果既无视频地址也无图集
    #[error("no video url or images in parse result")]
    EmptyResult,
}

pub type Result<T> = std::result::Result<T, ParseError>;
