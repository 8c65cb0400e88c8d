use std::sync::LazyLock;

use regex::Regex;

const UNTITLED: &str = "Untitled";
pub(crate) const NO_DATE: &str = "No date";

static BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A---\s*\n((?s:.*?))\n---").expect("valid block pattern"));
static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"title:\s*"(.+?)""#).expect("valid title pattern"));
static DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"description:\s*"(.+?)""#).expect("valid description pattern")
});
static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"date:\s*(\d{4}-\d{2}-\d{2})").expect("valid date pattern"));
static TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"tags:\s*\[(.*?)\]").expect("valid tags pattern"));

/// 文章开头 `---` 分隔的元数据块。
///
/// 每个字段单独按模式匹配，缺失或格式错误的字段取默认值，不会影响其他字段。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: String,
    pub description: String,
    pub date: String,
    pub tags: Vec<String>,
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            title: UNTITLED.to_string(),
            description: String::new(),
            date: NO_DATE.to_string(),
            tags: Vec::new(),
        }
    }
}

fn capture<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
}

impl FrontMatter {
    /// 从内容前缀中提取元数据，永不失败。
    pub fn extract(content: &str) -> Self {
        let mut fm = Self::default();

        let Some(block) = capture(&BLOCK, content) else {
            return fm;
        };

        if let Some(title) = capture(&TITLE, block) {
            fm.title = title.to_string();
        }
        if let Some(description) = capture(&DESCRIPTION, block) {
            fm.description = description.to_string();
        }
        if let Some(date) = capture(&DATE, block) {
            fm.date = date.to_string();
        }
        if let Some(tags) = capture(&TAGS, block).filter(|t| !t.trim().is_empty()) {
            fm.tags = tags
                .split(',')
                .map(|t| t.trim().replace('"', ""))
                .collect();
        }

        fm
    }
}
