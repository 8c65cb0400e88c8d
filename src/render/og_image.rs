use htmlescape::{encode_attribute, encode_minimal};
use resvg::{tiny_skia, usvg};
use tracing::instrument;

use super::FontData;
use crate::error::{Error, Result};

pub const WIDTH: u32 = 1200;
pub const HEIGHT: u32 = 630;

const PADDING: u32 = 60;

const TITLE_SIZE: u32 = 64;
const TITLE_LINE: u32 = 70;
const TITLE_CHARS: usize = 24;
const TITLE_LINES: usize = 4;

const DESCRIPTION_SIZE: u32 = 24;
const DESCRIPTION_LINE: u32 = 32;
const DESCRIPTION_CHARS: usize = 54;
const DESCRIPTION_LINES: usize = 3;

const AVATAR: u32 = 48;

pub const DEFAULT_TITLE: &str = "Default Title";
pub const DEFAULT_DESCRIPTION: &str = "Default Description";
pub const DEFAULT_AUTHOR: &str = "Anonymous";
pub const DEFAULT_DATE: &str = "January 1, 2024";
pub const DEFAULT_READ_TIME: &str = "5";

/// 分享图的文本参数，均按纯文本处理
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OgImageOptions {
    pub title: String,
    pub description: String,
    pub author: String,
    pub date: String,
    pub read_time: String,
}

impl Default for OgImageOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            date: DEFAULT_DATE.to_string(),
            read_time: DEFAULT_READ_TIME.to_string(),
        }
    }
}

impl OgImageOptions {
    /// 缺失或为空的参数使用默认值
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        author: Option<String>,
        date: Option<String>,
        read_time: Option<String>,
    ) -> Self {
        fn or(value: Option<String>, default: &str) -> String {
            value
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        }

        Self {
            title: or(title, DEFAULT_TITLE),
            description: or(description, DEFAULT_DESCRIPTION),
            author: or(author, DEFAULT_AUTHOR),
            date: or(date, DEFAULT_DATE),
            read_time: or(read_time, DEFAULT_READ_TIME),
        }
    }

    fn byline(&self) -> String {
        if self.read_time.trim().is_empty() {
            self.date.clone()
        } else {
            format!("{} · {} min read", self.date, self.read_time.trim())
        }
    }
}

/// 按字符数贪心折行，超出行数时截断并追加省略号。
fn wrap(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        // 过长的单词强制拆分
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..max_chars).collect());
        }
        if word.is_empty() {
            continue;
        }

        let len = current.chars().count();
        if len > 0 && len + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let kept: String = last.chars().take(max_chars.saturating_sub(1)).collect();
            *last = format!("{}…", kept.trim_end());
        }
    }
    lines
}

fn baseline(top: u32, line_height: u32, size: u32) -> u32 {
    top + (line_height - size) / 2 + size * 9 / 10
}

fn text_block(lines: &[String], top: u32, size: u32, line_height: u32) -> String {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            format!(
                r#"<tspan x="{PADDING}" y="{}">{}</tspan>"#,
                baseline(top + i as u32 * line_height, line_height, size),
                encode_minimal(line)
            )
        })
        .collect()
}

/// 生成 1200x630 的 SVG 文档。
pub fn render_svg(options: &OgImageOptions, font_family: &str) -> String {
    let title = wrap(&options.title, TITLE_CHARS, TITLE_LINES);
    let description = wrap(&options.description, DESCRIPTION_CHARS, DESCRIPTION_LINES);

    let title_height = title.len() as u32 * TITLE_LINE;
    let description_height = match description.len() as u32 {
        0 => 0,
        n => 16 + n * DESCRIPTION_LINE,
    };
    let total = title_height + description_height + 24 + AVATAR;
    let top = (HEIGHT.saturating_sub(total) / 2).max(PADDING);

    let description_top = top + title_height + 16;
    let row_top = top + title_height + description_height + 24;
    let row_center = row_top + AVATAR / 2;

    let family = encode_attribute(font_family);

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    );
    svg.push_str(
        r##"<defs><linearGradient id="bg" x1="0" y1="0" x2="1" y2="1"><stop offset="0" stop-color="#1e293b"/><stop offset="1" stop-color="#0f172a"/></linearGradient></defs>"##,
    );
    svg.push_str(&format!(
        r#"<rect width="{WIDTH}" height="{HEIGHT}" fill="url(#bg)"/>"#
    ));
    svg.push_str(&format!(
        r##"<text font-family="{family}" font-size="{TITLE_SIZE}" font-weight="700" fill="#ffffff">{}</text>"##,
        text_block(&title, top, TITLE_SIZE, TITLE_LINE)
    ));
    if !description.is_empty() {
        svg.push_str(&format!(
            r##"<text font-family="{family}" font-size="{DESCRIPTION_SIZE}" font-weight="400" fill="#94a3b8">{}</text>"##,
            text_block(&description, description_top, DESCRIPTION_SIZE, DESCRIPTION_LINE)
        ));
    }
    svg.push_str(&format!(
        r##"<circle cx="{}" cy="{row_center}" r="{}" fill="#64748b"/>"##,
        PADDING + AVATAR / 2,
        AVATAR / 2
    ));
    svg.push_str(&format!(
        r##"<text x="{}" y="{}" font-family="{family}"><tspan font-size="20" font-weight="700" fill="#ffffff">{}</tspan><tspan dx="16" font-size="16" font-weight="400" fill="#94a3b8">{}</tspan></text>"##,
        PADDING + AVATAR + 16,
        row_center + 7,
        encode_minimal(&options.author),
        encode_minimal(&options.byline()),
    ));
    svg.push_str("</svg>");
    svg
}

/// 使用给定字体将分享图渲染为 PNG。
///
/// 只使用 `fonts` 中的字体，不读取系统字体。
#[instrument(name = "render og image", skip_all, fields(title = %options.title))]
pub fn render_png(options: &OgImageOptions, fonts: &FontData) -> Result<Vec<u8>> {
    let svg = render_svg(options, &fonts.family);

    let mut opt = usvg::Options::default();
    opt.font_family = fonts.family.clone();
    let db = opt.fontdb_mut();
    db.load_font_data(fonts.regular.to_vec());
    db.load_font_data(fonts.bold.to_vec());

    let tree = usvg::Tree::from_str(&svg, &opt).map_err(|e| Error::Render(e.to_string()))?;

    let mut pixmap = tiny_skia::Pixmap::new(WIDTH, HEIGHT)
        .ok_or_else(|| Error::Render("invalid canvas size".to_string()))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|e| Error::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    fn no_fonts() -> FontData {
        FontData {
            family: "Inter".to_string(),
            regular: Bytes::new(),
            bold: Bytes::new(),
        }
    }

    #[test]
    fn test_defaults_for_missing_or_empty() {
        let options = OgImageOptions::new(None, Some(String::new()), None, None, None);
        assert_eq!(options, OgImageOptions::default());
        assert_eq!(options.title, "Default Title");
        assert_eq!(options.description, "Default Description");
        assert_eq!(options.author, "Anonymous");
        assert_eq!(options.date, "January 1, 2024");
        assert_eq!(options.read_time, "5");
    }

    #[test]
    fn test_wrap_greedy() {
        let lines = wrap("the quick brown fox jumps over the lazy dog", 10, 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]);
    }

    #[test]
    fn test_wrap_splits_long_words_and_truncates() {
        let lines = wrap("abcdefghijkl", 5, 10);
        assert_eq!(lines, vec!["abcde", "fghij", "kl"]);

        let lines = wrap("one two three four five six", 3, 2);
        assert_eq!(lines, vec!["one", "tw…"]);
    }

    #[test]
    fn test_svg_contains_escaped_text() {
        let options = OgImageOptions::new(
            Some("Tom & <Jerry>".into()),
            None,
            Some("octocat".into()),
            Some("2024-03-01".into()),
            Some("3".into()),
        );
        let svg = render_svg(&options, "Inter");
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="1200" height="630""#));
        assert!(svg.contains("Tom &amp; &lt;Jerry&gt;"));
        assert!(svg.contains("octocat"));
        assert!(svg.contains("2024-03-01 · 3 min read"));
        assert!(svg.contains("#1e293b"));
    }

    #[test]
    fn test_png_has_canvas_size() {
        let png = render_png(&OgImageOptions::default(), &no_fonts()).expect("渲染失败");

        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        let width = u32::from_be_bytes(png[16..20].try_into().unwrap());
        let height = u32::from_be_bytes(png[20..24].try_into().unwrap());
        assert_eq!((width, height), (WIDTH, HEIGHT));
    }
}
