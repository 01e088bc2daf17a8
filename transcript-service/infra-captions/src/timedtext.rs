use scraper::{Html, Selector};
use transcript_domain::{CaptionError, CaptionLine};

/// Parses a timed-text document into caption lines in document order.
///
/// Cue text is escaped twice by the source, so it is decoded once by the
/// document parser and once more here, which also drops inline markup.
pub fn parse_timed_text(body: &str) -> Result<Vec<CaptionLine>, CaptionError> {
    let selector = Selector::parse("text")
        .map_err(|err| CaptionError::InvalidResponse(format!("text selector: {err:?}")))?;
    let document = Html::parse_fragment(body);

    document
        .select(&selector)
        .map(|element| {
            let attrs = element.value();
            let start = parse_seconds(attrs.attr("start"), "start")?
                .ok_or_else(|| CaptionError::InvalidResponse("cue without start".to_string()))?;
            let dur = parse_seconds(attrs.attr("dur"), "dur")?.unwrap_or(0.0);
            let raw = element.text().collect::<String>();

            Ok(CaptionLine {
                text: decode_cue_text(&raw),
                start,
                dur,
            })
        })
        .collect()
}

fn parse_seconds(value: Option<&str>, name: &str) -> Result<Option<f64>, CaptionError> {
    value
        .map(|raw| {
            raw.trim().parse::<f64>().map_err(|err| {
                CaptionError::InvalidResponse(format!("{name}=\"{raw}\" is not a number: {err}"))
            })
        })
        .transpose()
}

fn decode_cue_text(raw: &str) -> String {
    Html::parse_fragment(raw)
        .root_element()
        .text()
        .collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cues_in_document_order() {
        let body = r#"<?xml version="1.0" encoding="utf-8" ?><transcript><text start="12.5" dur="1.2">second?</text><text start="0" dur="2">Hello</text></transcript>"#;

        let lines = parse_timed_text(body).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "second?");
        assert_eq!(lines[0].start, 12.5);
        assert_eq!(lines[0].dur, 1.2);
        assert_eq!(lines[1].text, "Hello");
        assert_eq!(lines[1].start, 0.0);
    }

    #[test]
    fn decodes_double_escaped_entities_and_strips_markup() {
        let body = r#"<transcript><text start="1" dur="1">it&amp;#39;s &lt;font color=&quot;#E5E5E5&quot;&gt;loud&lt;/font&gt; &amp;amp; clear</text></transcript>"#;

        let lines = parse_timed_text(body).unwrap();

        assert_eq!(lines[0].text, "it's loud & clear");
    }

    #[test]
    fn empty_document_yields_no_lines() {
        assert!(parse_timed_text("").unwrap().is_empty());
    }

    #[test]
    fn missing_duration_defaults_to_zero() {
        let lines = parse_timed_text(r#"<text start="3">tail</text>"#).unwrap();
        assert_eq!(lines[0].dur, 0.0);
    }

    #[test]
    fn non_numeric_offsets_are_rejected() {
        assert!(matches!(
            parse_timed_text(r#"<text start="soon" dur="1">x</text>"#),
            Err(CaptionError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_timed_text(r#"<text dur="1">x</text>"#),
            Err(CaptionError::InvalidResponse(_))
        ));
    }
}
