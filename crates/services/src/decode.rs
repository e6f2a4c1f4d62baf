//! HTML entity decoding for text delivered by remote sources.

use html_escape::decode_html_entities;

/// Decode named and numeric HTML entities (`&quot;`, `&#039;`, `&eacute;`).
#[must_use]
pub fn decode_entities(raw: &str) -> String {
    decode_html_entities(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_common_entities() {
        assert_eq!(
            decode_entities("Which &quot;Harry Potter&quot; book?"),
            "Which \"Harry Potter\" book?"
        );
        assert_eq!(decode_entities("Rock &amp; Roll"), "Rock & Roll");
        assert_eq!(decode_entities("It&#039;s"), "It's");
        assert_eq!(decode_entities("Pok&#233;mon"), "Pokémon");
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(decode_entities("2+2?"), "2+2?");
    }
}
