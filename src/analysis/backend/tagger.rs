//! Rule-based part-of-speech tagger producing Penn-Treebank-style tags.
//!
//! Rules are tried in a fixed order until one applies:
//!
//! 1. closed-class lexicon (determiners, pronouns, prepositions, ...)
//! 2. numerals (`CD`) and punctuation (`.`, `,`, `:`, `#`, `SYM`)
//! 3. exact sentiment-lexicon entry
//! 4. sentiment-lexicon entry reached by stripping an inflection suffix
//! 5. language-specific suffix rules
//! 6. capitalization
//! 7. default `NN`

use ahash::AHashMap;

use crate::analysis::backend::lexicon::SentimentLexicon;

/// Capitalization convention of a language.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capitalization {
    /// Capitalized words past the sentence start are proper nouns (`NNP`).
    ProperNouns,
    /// Every capitalized word is a noun (`NN`).
    AllNouns,
}

/// Suffix rule: a word ending in `suffix` (and longer than it) gets `tag`.
#[derive(Clone, Copy, Debug)]
pub struct SuffixRule {
    pub suffix: &'static str,
    pub tag: &'static str,
    /// Only apply to words written in lowercase.
    pub lowercase_only: bool,
}

impl SuffixRule {
    pub const fn new(suffix: &'static str, tag: &'static str) -> Self {
        SuffixRule {
            suffix,
            tag,
            lowercase_only: false,
        }
    }

    pub const fn lowercase(suffix: &'static str, tag: &'static str) -> Self {
        SuffixRule {
            suffix,
            tag,
            lowercase_only: true,
        }
    }
}

/// A Penn-style tagger configured for one language.
#[derive(Clone, Debug)]
pub struct PosTagger {
    closed_class: AHashMap<&'static str, &'static str>,
    suffix_rules: &'static [SuffixRule],
    capitalization: Capitalization,
}

impl PosTagger {
    pub fn new(
        closed_class: &[(&'static str, &'static str)],
        suffix_rules: &'static [SuffixRule],
        capitalization: Capitalization,
    ) -> Self {
        PosTagger {
            closed_class: closed_class.iter().copied().collect(),
            suffix_rules,
            capitalization,
        }
    }

    /// Tag `word`, the `index`-th token of its sentence.
    pub fn tag(&self, word: &str, index: usize, lexicon: &SentimentLexicon) -> &'static str {
        let lower = word.to_lowercase();

        if let Some(&tag) = self.closed_class.get(lower.as_str()) {
            return tag;
        }
        if let Some(tag) = symbol_tag(word) {
            return tag;
        }
        if let Some((entry, suffix)) = lexicon.lookup(&lower) {
            return if suffix.is_empty() {
                entry.class.base_tag()
            } else {
                entry.class.inflected_tag(suffix)
            };
        }

        let is_lowercase = !word.chars().next().is_some_and(char::is_uppercase);
        for rule in self.suffix_rules {
            if rule.lowercase_only && !is_lowercase {
                continue;
            }
            if lower.len() > rule.suffix.len() + 1 && lower.ends_with(rule.suffix) {
                return rule.tag;
            }
        }

        if !is_lowercase {
            match self.capitalization {
                Capitalization::AllNouns => return "NN",
                Capitalization::ProperNouns if index > 0 => return "NNP",
                Capitalization::ProperNouns => {}
            }
        }

        "NN"
    }
}

fn symbol_tag(word: &str) -> Option<&'static str> {
    if word == "#" {
        return Some("#");
    }
    if word.chars().all(|c| c.is_numeric() || c == '.' || c == ',')
        && word.chars().any(char::is_numeric)
    {
        return Some("CD");
    }

    let mut chars = word.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return None;
    };
    if c.is_alphanumeric() {
        return None;
    }
    Some(match c {
        '.' | '!' | '?' => ".",
        ',' => ",",
        ':' | ';' | '-' | '–' | '…' => ":",
        '(' | '[' | '{' => "(",
        ')' | ']' | '}' => ")",
        '"' | '\'' | '“' | '”' => "''",
        '$' | '€' | '£' => "$",
        _ => "SYM",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::backend::lexicon::WordClass;

    static RULES: &[SuffixRule] = &[
        SuffixRule::new("ly", "RB"),
        SuffixRule::new("ing", "VBG"),
        SuffixRule::lowercase("s", "NNS"),
    ];

    fn tagger() -> PosTagger {
        PosTagger::new(
            &[("the", "DT"), ("i", "PRP")],
            RULES,
            Capitalization::ProperNouns,
        )
    }

    fn lexicon() -> SentimentLexicon {
        SentimentLexicon::new(&[("love", 0.5, WordClass::Verb)], &[], &[], &["s"])
    }

    #[test]
    fn test_rule_order() {
        let tagger = tagger();
        let lex = lexicon();

        assert_eq!(tagger.tag("The", 0, &lex), "DT");
        assert_eq!(tagger.tag("I", 0, &lex), "PRP");
        assert_eq!(tagger.tag("love", 1, &lex), "VB");
        assert_eq!(tagger.tag("loves", 1, &lex), "VBZ");
        assert_eq!(tagger.tag("quickly", 1, &lex), "RB");
        assert_eq!(tagger.tag("running", 1, &lex), "VBG");
        assert_eq!(tagger.tag("cats", 1, &lex), "NNS");
        assert_eq!(tagger.tag("Berlin", 2, &lex), "NNP");
        assert_eq!(tagger.tag("Berlin", 0, &lex), "NN");
        assert_eq!(tagger.tag("tree", 2, &lex), "NN");
    }

    #[test]
    fn test_symbols() {
        let tagger = tagger();
        let lex = lexicon();

        assert_eq!(tagger.tag("#", 0, &lex), "#");
        assert_eq!(tagger.tag("2024", 0, &lex), "CD");
        assert_eq!(tagger.tag("3.5", 0, &lex), "CD");
        assert_eq!(tagger.tag("!", 3, &lex), ".");
        assert_eq!(tagger.tag(",", 3, &lex), ",");
        assert_eq!(tagger.tag("@", 3, &lex), "SYM");
    }

    #[test]
    fn test_all_nouns_capitalization() {
        let tagger = PosTagger::new(&[], &[], Capitalization::AllNouns);
        let lex = lexicon();
        assert_eq!(tagger.tag("Katze", 0, &lex), "NN");
        assert_eq!(tagger.tag("Katze", 4, &lex), "NN");
    }
}
