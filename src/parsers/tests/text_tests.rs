use crate::parsers::text;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tidy_keeps_single_blank_line() {
        let input = "  Line 1a   with  gaps \nLine 1b\n\n\n\n  Line 2  ";
        assert_eq!(text::tidy(input), "Line 1a with gaps\nLine 1b\n\nLine 2");
    }

    #[test]
    fn test_tidy_empty() {
        assert_eq!(text::tidy(""), "");
        assert_eq!(text::tidy("   \n\t\n  "), "");
    }

    #[test]
    fn test_flatten() {
        assert_eq!(text::flatten("Peter\nBenjamin \t Parker "), "Peter Benjamin Parker");
    }

    #[test]
    fn test_split_into_paragraphs() {
        assert!(text::split_into_paragraphs("").is_empty());

        let result = text::split_into_paragraphs("Line 1a\nLine 1b\n\n\nLine 2a");
        assert_eq!(result.len(), 2);
        assert_eq!(result[0], vec!["Line 1a", "Line 1b"]);
        assert_eq!(result[1], vec!["Line 2a"]);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(text::collapse_whitespace("  Trim  me  "), "Trim me");
        assert_eq!(text::collapse_whitespace("Tabs\tand\tspaces"), "Tabs and spaces");
        assert_eq!(text::collapse_whitespace("   "), "");
    }
}
