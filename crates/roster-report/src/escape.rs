//! Escaping for text placed into HTML and for JSON placed into `<script>`.

use serde::Serialize;

/// Escapes text for element content and quoted attribute values.
pub fn html_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Serializes `value` as JSON that can sit inside an inline script.
///
/// `<`, `>` and `&` only occur inside JSON strings, so replacing them with
/// unicode escapes keeps the JSON equivalent while making `</script>` and
/// `<!--` impossible.
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let json = serde_json::to_string(value)?;
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            other => out.push(other),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            html_escape(r#"<b>"A&B"</b> 'x'"#),
            "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt; &#39;x&#39;"
        );
        assert_eq!(html_escape("東京"), "東京");
    }

    #[test]
    fn script_json_cannot_close_the_script() {
        let json = script_json(&["</script><!-- x & y"]).unwrap();
        assert!(!json.contains("</script"));
        assert!(!json.contains("<!--"));
        let back: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec!["</script><!-- x & y"]);
    }
}
