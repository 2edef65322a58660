//! Message body styling: plain text with clickable links.

use eframe::egui::{self, Color32};
use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s<>]+").expect("URL regex pattern is valid"));

/// Piece of a message body
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Text(&'a str),
    Link(&'a str),
}

/// Split a body into text and link segments, in order.
///
/// Trailing punctuation that usually closes a sentence is left out of
/// the link.
pub(crate) fn split_links(body: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for m in URL_RE.find_iter(body) {
        let link = m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?', ')', '\'', '"']);
        if link.len() <= "https://".len() {
            continue;
        }
        if m.start() > cursor {
            segments.push(Segment::Text(&body[cursor..m.start()]));
        }
        segments.push(Segment::Link(link));
        cursor = m.start() + link.len();
    }

    if cursor < body.len() {
        segments.push(Segment::Text(&body[cursor..]));
    }
    segments
}

/// Lay out a message body with links as hyperlinks.
pub(crate) fn render_body(ui: &mut egui::Ui, body: &str, text_color: Color32, link_color: Color32) {
    let font = egui::TextStyle::Name("bubble_body".into());
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for segment in split_links(body) {
            match segment {
                Segment::Text(text) => {
                    ui.label(
                        egui::RichText::new(text)
                            .text_style(font.clone())
                            .color(text_color),
                    );
                }
                Segment::Link(url) => {
                    ui.hyperlink_to(
                        egui::RichText::new(url)
                            .text_style(font.clone())
                            .color(link_color)
                            .underline(),
                        url,
                    );
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_one_segment() {
        assert_eq!(split_links("hello there"), vec![Segment::Text("hello there")]);
        assert!(split_links("").is_empty());
    }

    #[test]
    fn test_links_are_split_out() {
        assert_eq!(
            split_links("see https://example.com/a?b=1 now"),
            vec![
                Segment::Text("see "),
                Segment::Link("https://example.com/a?b=1"),
                Segment::Text(" now"),
            ]
        );
    }

    #[test]
    fn test_trailing_punctuation_stays_text() {
        assert_eq!(
            split_links("docs at http://x.io/help."),
            vec![
                Segment::Text("docs at "),
                Segment::Link("http://x.io/help"),
                Segment::Text("."),
            ]
        );
    }

    #[test]
    fn test_bare_scheme_is_not_a_link() {
        assert_eq!(split_links("https://"), vec![Segment::Text("https://")]);
    }
}
