/// 阅读速度（词/分钟）
pub const WORDS_PER_MINUTE: usize = 200;

/// 以空白分隔计词，向上取整为分钟数。
///
/// 非空内容（包括只有空白的内容）至少为 1，空内容为 0。
pub fn read_time_minutes(content: &str) -> usize {
    if content.is_empty() {
        return 0;
    }
    content
        .split_whitespace()
        .count()
        .div_ceil(WORDS_PER_MINUTE)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_multiple() {
        let content = vec!["word"; 400].join(" ");
        assert_eq!(read_time_minutes(&content), 2);
    }

    #[test]
    fn test_rounds_up() {
        assert_eq!(read_time_minutes("just a few words"), 1);
        let content = vec!["word"; 201].join("\n\t ");
        assert_eq!(read_time_minutes(&content), 2);
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert_eq!(read_time_minutes(""), 0);
        assert_eq!(read_time_minutes("\n"), 1);
        assert_eq!(read_time_minutes(" \n\t "), 1);
    }
}
