/// Decode HTML entities in provider text into plain text.
///
/// Handles named (`&eacute;`), decimal (`&#039;`) and hex (`&#x27;`) forms.
/// The output is meant to be rendered as text; markup is never interpreted.
#[must_use]
pub fn decode_entities(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_common_provider_entities() {
        assert_eq!(
            decode_entities("Which &quot;Star Wars&quot; film isn&#039;t canon?"),
            "Which \"Star Wars\" film isn't canon?"
        );
        assert_eq!(decode_entities("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(decode_entities("Pok&eacute;mon"), "Pokémon");
        assert_eq!(decode_entities("it&#x27;s"), "it's");
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(decode_entities("Paris"), "Paris");
        assert_eq!(decode_entities(""), "");
    }

    #[test]
    fn encoded_markup_stays_literal_text() {
        assert_eq!(
            decode_entities("&lt;script&gt;alert(1)&lt;/script&gt;"),
            "<script>alert(1)</script>"
        );
    }
}
