use super::segment::{GroupId, Token};
use std::collections::HashSet;

/// Short function words that look stranded at the end of a line. Matching is
/// case-insensitive but keeps diacritics: `à` and `a` are different words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorWords {
    words: HashSet<String>,
}

impl ConnectorWords {
    /// A connector list from any words; they are stored lowercased
    pub fn new<I, S>(words: I) -> ConnectorWords
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ConnectorWords {
            words: words
                .into_iter()
                .map(|word| word.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Portuguese contractions and prepositions that should not end a line
    pub fn portuguese() -> ConnectorWords {
        ConnectorWords::new([
            "da", "de", "do", "das", "dos", "na", "no", "nas", "nos", "ao", "aos", "à", "às",
        ])
    }

    /// No connectors: nothing is paired or relocated
    pub fn empty() -> ConnectorWords {
        ConnectorWords {
            words: HashSet::new(),
        }
    }

    /// Whether `word` is a connector, ignoring case
    pub fn contains(&self, word: &str) -> bool {
        !self.words.is_empty() && self.words.contains(&word.to_lowercase())
    }

    /// Whether `token` is an ungrouped connector word
    pub(crate) fn is_loose_connector(&self, token: &Token) -> bool {
        token.group.is_none() && !token.is_space() && self.contains(&token.text)
    }
}

impl Default for ConnectorWords {
    fn default() -> Self {
        ConnectorWords::portuguese()
    }
}

/// Glues every connector word to the word after it: the connector, the space
/// and the next word become a fresh atomic group, so a line break can never
/// separate them. Tokens that already belong to a group are left alone, and
/// a token is consumed by at most one pair (scanning left to right).
pub fn pair_connectors(mut tokens: Vec<Token>, connectors: &ConnectorWords) -> Vec<Token> {
    let mut minted = 0;
    let mut i = 0;

    while i + 2 < tokens.len() {
        let candidate = &tokens[i..i + 3];
        let pairs = connectors.is_loose_connector(&candidate[0])
            && candidate[1].is_space()
            && candidate[1].group.is_none()
            && !candidate[2].is_space()
            && candidate[2].group.is_none();

        if pairs {
            let group = GroupId::minted(minted);
            minted += 1;
            for token in &mut tokens[i..i + 3] {
                token.group = Some(group.clone());
            }
            log::trace!("paired connector {:?} with {:?}", tokens[i].text, tokens[i + 2].text);
            i += 3;
        } else {
            i += 1;
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::segment::{tokenize, Segment};
    use test_case::test_case;

    fn groups(tokens: &[Token]) -> Vec<Option<GroupId>> {
        tokens.iter().map(|t| t.group.clone()).collect()
    }

    #[test_case("De", true ; "case insensitive")]
    #[test_case("às", true ; "accented connector")]
    #[test_case("as", false ; "diacritics matter")]
    #[test_case("dados", false ; "whole words only")]
    fn portuguese_connectors(word: &str, expected: bool) {
        assert_eq!(ConnectorWords::portuguese().contains(word), expected);
    }

    #[test]
    fn connector_space_and_word_become_one_group() {
        let tokens = tokenize(&[Segment::normal("serviço da instrumentação")]);
        let paired = pair_connectors(tokens, &ConnectorWords::portuguese());

        assert_eq!(paired[0].group, None);
        assert_eq!(paired[1].group, None);
        let group = paired[2].group.clone().expect("connector is grouped");
        assert!(group.is_minted());
        assert_eq!(paired[3].group, Some(group.clone()));
        assert_eq!(paired[4].group, Some(group));
    }

    #[test]
    fn pairs_across_segments() {
        let segments = vec![Segment::normal("cirurgia de "), Segment::bold("JOÃO")];
        let paired = pair_connectors(tokenize(&segments), &ConnectorWords::portuguese());
        let texts: Vec<&str> = paired.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["cirurgia", " ", "de", " ", "JOÃO"]);
        assert!(paired[2].group.is_some());
        assert_eq!(paired[2].group, paired[4].group);
    }

    #[test]
    fn overlapping_candidates_resolve_left_to_right() {
        let tokens = tokenize(&[Segment::normal("de da casa")]);
        let paired = pair_connectors(tokens, &ConnectorWords::portuguese());
        let first = paired[0].group.clone();
        assert!(first.is_some());
        assert_eq!(paired[2].group, first);
        assert_eq!(paired[3].group, None);
        assert_eq!(paired[4].group, None);
    }

    #[test]
    fn existing_groups_are_untouched() {
        let cpf = GroupId::named("cpf");
        let segments = vec![
            Segment::normal("de ").in_group(cpf.clone()),
            Segment::normal("CPF"),
        ];
        let tokens = tokenize(&segments);
        let before = groups(&tokens);
        let paired = pair_connectors(tokens, &ConnectorWords::portuguese());
        assert_eq!(groups(&paired), before);
    }

    #[test]
    fn minted_groups_are_unique() {
        let tokens = tokenize(&[Segment::normal("da casa do lado")]);
        let paired = pair_connectors(tokens, &ConnectorWords::portuguese());
        assert!(paired[0].group.is_some());
        assert!(paired[4].group.is_some());
        assert_ne!(paired[0].group, paired[4].group);
    }

    #[test]
    fn trailing_connector_has_nothing_to_pair_with() {
        let tokens = tokenize(&[Segment::normal("cirurgia de ")]);
        let paired = pair_connectors(tokens, &ConnectorWords::portuguese());
        assert!(paired.iter().all(|t| t.group.is_none()));
    }
}
