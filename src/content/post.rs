use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use super::FrontMatter;
use crate::gist::{GistFile, GistRecord};

/// 由 gist 派生出的博客文章元信息。
#[derive(Debug, Clone, Serialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`，或 `"No date"`
    pub date: String,
    pub slug: String,
    pub tags: Vec<String>,
    pub raw_url: String,
    pub html_url: String,
    pub author: Author,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Author {
    pub username: String,
    pub avatar_url: String,
}

impl BlogPost {
    /// 组合 gist、其首个文件与解析出的元数据
    pub fn new(gist: &GistRecord, file: &GistFile, front_matter: FrontMatter) -> Self {
        let author = gist
            .owner
            .as_ref()
            .map(|o| Author {
                username: o.login.clone(),
                avatar_url: o.avatar_url.clone(),
            })
            .unwrap_or_default();

        Self {
            id: gist.id.clone(),
            title: front_matter.title,
            description: front_matter.description,
            date: front_matter.date,
            slug: create_slug(&file.filename),
            tags: front_matter.tags,
            raw_url: file.raw_url.clone(),
            html_url: gist.html_url.clone(),
            author,
        }
    }

    /// 发布日期，无法解析时为 `None`
    pub fn published(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// 按日期倒序排列，无日期的文章排在最后并保持原有顺序。
pub fn sort_by_date_desc(posts: &mut [BlogPost]) {
    posts.sort_by(|a, b| match (a.published(), b.published()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// 由文件名生成 slug。
///
/// 去掉扩展名，转小写，空白替换为 `-`，再删除 `[a-z0-9-]` 以外的字符。
pub fn create_slug(filename: &str) -> String {
    let stem = match filename.rfind(['.', '/']) {
        Some(i) if filename[i..].starts_with('.') && i + 1 < filename.len() => &filename[..i],
        _ => filename,
    };

    let mut slug = String::with_capacity(stem.len());
    let mut in_space = false;
    for c in stem.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            slug.push(c);
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str, date: &str) -> BlogPost {
        BlogPost {
            id: slug.to_string(),
            title: slug.to_string(),
            description: String::new(),
            date: date.to_string(),
            slug: slug.to_string(),
            tags: vec![],
            raw_url: String::new(),
            html_url: String::new(),
            author: Author::default(),
        }
    }

    #[test]
    fn test_slug_from_filename() {
        assert_eq!(create_slug("Hello World.md"), "hello-world");
        assert_eq!(create_slug("Rust  &  Gists!.markdown"), "rust--gists");
        assert_eq!(create_slug("my_post-2024.md"), "mypost-2024");
        assert_eq!(create_slug("no-extension"), "no-extension");
        assert_eq!(create_slug("archive.tar.gz"), "archivetar");
        assert_eq!(create_slug("Café Déjà Vu.md"), "caf-dj-vu");
    }

    #[test]
    fn test_slug_edge_cases() {
        assert_eq!(create_slug(".env"), "");
        assert_eq!(create_slug("trailing."), "trailing");
        assert_eq!(create_slug(""), "");
    }

    #[test]
    fn test_slug_is_idempotent() {
        for name in ["Hello World.md", "A.B.C.txt", "  spaced  out .md", "UPPER_case.rs"] {
            let once = create_slug(name);
            assert_eq!(create_slug(&once), once, "slug 应当幂等: {name}");
        }
    }

    #[test]
    fn test_sort_newest_first() {
        let mut posts = vec![post("old", "2023-01-01"), post("new", "2024-05-01")];
        sort_by_date_desc(&mut posts);
        assert_eq!(posts[0].slug, "new");
        assert_eq!(posts[1].slug, "old");
    }

    #[test]
    fn test_undated_posts_sort_last_in_order() {
        let mut posts = vec![
            post("a", "No date"),
            post("b", "2022-02-02"),
            post("c", "No date"),
            post("d", "2024-12-31"),
        ];
        sort_by_date_desc(&mut posts);
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(post("hello", "2024-03-01")).unwrap();
        assert_eq!(json["slug"], "hello");
        assert_eq!(json["date"], "2024-03-01");
        assert!(json["author"]["username"].is_string());
        assert!(json["tags"].is_array());
        assert!(json["raw_url"].is_string());
    }
}
