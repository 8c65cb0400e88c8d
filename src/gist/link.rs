use std::sync::LazyLock;

use regex::Regex;

static NEXT_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<([^>]+)>;\s*rel="next""#).expect("valid next-link pattern"));

/// 从 `Link` 响应头中取出 `rel="next"` 的地址。
///
/// 没有下一页时返回 `None`。
pub fn next_page_url(link_header: &str) -> Option<&str> {
    NEXT_LINK
        .captures(link_header)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
