// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ParseError, Result};

static HTTP_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://[-A-Za-z0-9+&@#/%?=~_|!:,.;]*[-A-Za-z0-9+&@#/%=~_|]").unwrap()
});

/// 从自由文本中提取第一个http(s)链接
pub fn extract_url(text: &str) -> Result<&str> {
    HTTP_URL_RE
        .find(text)
        .map(|m| m.as_str())
        .ok_or_else(|| ParseError::InvalidInput("no http(s) url found in text".to_string()))
}
