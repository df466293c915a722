use crate::parsers::html::render;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_lists_and_bold_survive() {
        let html = "<html><head><title>Ignored</title></head><body>\
            <h2>Powers and Abilities</h2><h3>Powers</h3>\
            <ul><li><b>Flight:</b> can fly</li><li><strong>Strength:</strong></li></ul>\
            </body></html>";

        assert_eq!(
            render(html, true),
            "## Powers and Abilities\n\n### Powers\n\n* **Flight:** can fly\n* **Strength:**"
        );
    }

    #[test]
    fn test_links_kept_with_title() {
        let html = r#"<body><p>See <a href="/wiki/Hulk" title="Hulk">the Hulk</a>.</p></body>"#;
        assert_eq!(render(html, false), r#"See [the Hulk](/wiki/Hulk "Hulk")."#);
    }

    #[test]
    fn test_links_ignored() {
        let html = r#"<body><p>See <a href="/wiki/Hulk" title="Hulk">the Hulk</a>.</p></body>"#;
        assert_eq!(render(html, true), "See the Hulk.");
    }

    #[test]
    fn test_link_without_title() {
        let html = r#"<body><a href="https://marvel.fandom.com/wiki/Category:Characters?from=B" class="next">Next <svg><path d="M0"/></svg></a></body>"#;
        assert_eq!(
            render(html, false),
            "[Next](https://marvel.fandom.com/wiki/Category:Characters?from=B)"
        );
    }

    #[test]
    fn test_scripts_and_styles_dropped() {
        let html = "<body><script>var x = 1;</script><div>Visible</div><style>p{}</style></body>";
        assert_eq!(render(html, false), "Visible");
    }

    #[test]
    fn test_images_precede_labels() {
        let html = r#"<body><figure><img src="a.png" alt="Portrait"> Real Name</figure></body>"#;
        assert_eq!(render(html, true), "![Portrait](a.png) Real Name");
    }

    #[test]
    fn test_blank_paragraphs_collapse() {
        let html = "<body><p>One</p><p></p><p>Two</p></body>";
        assert_eq!(render(html, false), "One\n\nTwo");
    }

    #[test]
    fn test_whitespace_in_markup_is_collapsed() {
        let html = "<body>\n  <ul>\n    <li>  <b> Healing: </b>  fast  </li>\n  </ul>\n</body>";
        assert_eq!(render(html, false), "* **Healing:** fast");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(render("", false), "");
        assert_eq!(render("<html><body>   </body></html>", true), "");
    }
}
