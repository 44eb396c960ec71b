use std::collections::BTreeMap;

use crate::host::hash::FxHash;

/// Overrides read once from the page query string.
///
/// Recognised keys: `forceWidth`, `forceId`, `forceDownload` and `fxhash`. When a key
/// repeats, the last value wins.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct UrlOverrides {
    /// Exact backing-store width; also pins the device pixel ratio to 1.
    pub force_width: Option<u32>,
    /// Raw id text inserted (zero-padded) into exported filenames.
    pub force_id: Option<String>,
    /// Export once automatically after the first render.
    pub force_download: bool,
    /// Run hash override for the headless host.
    pub fxhash: Option<FxHash>,
}

impl UrlOverrides {
    /// Parse a query string (`?a=b&c`), a bare `a=b&c`, or a full URL.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let query = if input.contains("://") {
            match url::Url::parse(input) {
                Ok(u) => u.query().unwrap_or("").to_owned(),
                Err(e) => {
                    tracing::warn!(error = %e, "could not parse url, reading no overrides");
                    String::new()
                }
            }
        } else {
            input.strip_prefix('?').unwrap_or(input).to_owned()
        };

        let params: BTreeMap<String, String> = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        Self::from_params(&params)
    }

    fn from_params(params: &BTreeMap<String, String>) -> Self {
        let force_width = params.get("forceWidth").and_then(|raw| {
            let width = parse_leading_int(raw)
                .filter(|v| *v > 0)
                .and_then(|v| u32::try_from(v).ok());
            if width.is_none() {
                tracing::warn!(value = %raw, "ignoring unusable forceWidth");
            }
            width
        });

        let fxhash = params
            .get("fxhash")
            .and_then(|raw| match FxHash::new(raw.as_str()) {
                Ok(h) => Some(h),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring fxhash override");
                    None
                }
            });

        Self {
            force_width,
            force_id: params.get("forceId").cloned(),
            force_download: params.contains_key("forceDownload"),
            fxhash,
        }
    }

    /// `forceId` left-padded with zeros to four characters; longer ids are kept whole.
    pub fn padded_force_id(&self) -> Option<String> {
        self.force_id.as_deref().map(|id| format!("{id:0>4}"))
    }
}

/// Integer prefix of `s`, read the way JavaScript's `parseInt` reads it.
///
/// Leading whitespace and a sign are accepted, `0x` switches to hex, and parsing stops at
/// the first non-digit. `None` when no digit is found.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match s.get(..2) {
        Some("0x" | "0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map_or(digits.len(), |(i, _)| i);
    if end == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&digits[..end], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
#[path = "../tests/unit/params.rs"]
mod tests;
