//! Properties 格式解析
//!
//! 支持工厂资源使用的 Properties 文本格式子集：
//! 注释、续行、`=`/`:` 分隔符以及反斜杠转义。

use indexmap::IndexMap;
use thiserror::Error;

/// Properties 解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("第 {line} 行: {message}")]
pub struct PropertiesError {
    /// 逻辑行的起始行号（从 1 开始）
    pub line: usize,
    /// 错误描述
    pub message: String,
}

impl PropertiesError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

/// 解析 Properties 文本
///
/// 返回的映射保持键的首次出现顺序；重复的键以最后一次的值为准。
pub fn parse_properties(content: &str) -> Result<IndexMap<String, String>, PropertiesError> {
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    let mut physical = normalized.split('\n').enumerate();
    let mut properties = IndexMap::new();

    while let Some((index, raw)) = physical.next() {
        let trimmed = raw.trim_start_matches(WHITESPACE);
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let line = index + 1;
        let mut logical = trimmed.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match physical.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(WHITESPACE)),
                None => break,
            }
        }

        let (key, value) =
            split_key_value(&logical).map_err(|message| PropertiesError::new(line, message))?;
        properties.insert(key, value);
    }

    Ok(properties)
}

/// 行尾是否为奇数个反斜杠
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_key_value(logical: &str) -> Result<(String, String), String> {
    let mut escaped = false;
    let mut separator = None;
    for (index, c) in logical.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                separator = Some(index);
                break;
            }
            _ => {}
        }
    }

    let Some(separator) = separator else {
        return Err(format!("缺少键值分隔符 '=' 或 ':': {logical}"));
    };

    let raw_key = logical[..separator].trim_end_matches(WHITESPACE);
    if has_unescaped_whitespace(raw_key) {
        return Err(format!("键包含未转义的空白: {raw_key}"));
    }
    let key = unescape(raw_key)?;
    if key.trim().is_empty() {
        return Err("键为空".to_string());
    }
    let value = unescape(logical[separator + 1..].trim_start_matches(WHITESPACE))?;

    Ok((key, value))
}

fn has_unescaped_whitespace(raw: &str) -> bool {
    let mut escaped = false;
    for c in raw.chars() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if WHITESPACE.contains(&c) {
            return true;
        }
    }
    false
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let unit = read_code_unit(&mut chars)?;
                out.push(decode_code_unit(unit, &mut chars)?);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

fn read_code_unit(chars: &mut std::str::Chars<'_>) -> Result<u16, String> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.chars().count() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("无效的 \\u 转义: \\u{hex}"));
    }
    u16::from_str_radix(&hex, 16).map_err(|e| format!("无效的 \\u 转义: {e}"))
}

fn decode_code_unit(unit: u16, chars: &mut std::str::Chars<'_>) -> Result<char, String> {
    match unit {
        0xD800..=0xDBFF => {
            if chars.next() != Some('\\') || chars.next() != Some('u') {
                return Err(format!("代理项 \\u{unit:04X} 缺少低位代理"));
            }
            let low = read_code_unit(chars)?;
            char::decode_utf16([unit, low])
                .next()
                .and_then(Result::ok)
                .ok_or_else(|| format!("无效的代理项对: \\u{unit:04X}\\u{low:04X}"))
        }
        0xDC00..=0xDFFF => Err(format!("孤立的低位代理: \\u{unit:04X}")),
        _ => char::from_u32(u32::from(unit)).ok_or_else(|| format!("无效的字符: \\u{unit:04X}")),
    }
}
