use std::fmt::{Debug, Formatter};
use std::sync::{Arc, LazyLock};

use crate::analysis::backend::LanguageBackend;
use crate::analysis::backend::engine::{DEFAULT_MAX_TEXT_LEN, LexiconBackend};
use crate::analysis::backend::lexicon::{SentimentLexicon, WordClass};
use crate::analysis::backend::tagger::{Capitalization, PosTagger, SuffixRule};
use crate::analysis::token::Document;
use crate::error::Result;

use WordClass::{Adjective, Noun, Verb};

// German tags are mapped onto the Penn tagset so the token filter treats both
// languages alike.
const CLOSED_CLASS: &[(&str, &str)] = &[
    // articles and determiners
    ("der", "DT"), ("die", "DT"), ("das", "DT"), ("den", "DT"), ("dem", "DT"),
    ("des", "DT"), ("ein", "DT"), ("eine", "DT"), ("einen", "DT"), ("einem", "DT"),
    ("einer", "DT"), ("eines", "DT"), ("kein", "DT"), ("keine", "DT"), ("keinen", "DT"),
    ("jeder", "DT"), ("jede", "DT"), ("jedes", "DT"), ("diese", "DT"), ("dieser", "DT"),
    ("dieses", "DT"), ("alle", "DT"),
    // pronouns
    ("ich", "PRP"), ("du", "PRP"), ("er", "PRP"), ("sie", "PRP"), ("es", "PRP"),
    ("wir", "PRP"), ("ihr", "PRP"), ("mich", "PRP"), ("dich", "PRP"), ("uns", "PRP"),
    ("euch", "PRP"), ("ihm", "PRP"), ("ihn", "PRP"), ("mir", "PRP"), ("dir", "PRP"),
    ("sich", "PRP"), ("man", "PRP"),
    ("mein", "PRP$"), ("meine", "PRP$"), ("meinen", "PRP$"), ("meinem", "PRP$"),
    ("dein", "PRP$"), ("deine", "PRP$"), ("sein", "PRP$"), ("seine", "PRP$"),
    ("unser", "PRP$"), ("unsere", "PRP$"), ("ihre", "PRP$"),
    // prepositions
    ("in", "IN"), ("im", "IN"), ("an", "IN"), ("am", "IN"), ("auf", "IN"),
    ("aus", "IN"), ("bei", "IN"), ("beim", "IN"), ("mit", "IN"), ("nach", "IN"),
    ("von", "IN"), ("vom", "IN"), ("zu", "TO"), ("zum", "IN"), ("zur", "IN"),
    ("für", "IN"), ("über", "IN"), ("unter", "IN"), ("vor", "IN"), ("hinter", "IN"),
    ("durch", "IN"), ("gegen", "IN"), ("ohne", "IN"), ("um", "IN"), ("seit", "IN"),
    ("weil", "IN"), ("dass", "IN"), ("wenn", "IN"), ("als", "IN"), ("ob", "IN"),
    // conjunctions
    ("und", "CC"), ("oder", "CC"), ("aber", "CC"), ("denn", "CC"), ("sondern", "CC"),
    // modals
    ("kann", "MD"), ("können", "MD"), ("muss", "MD"), ("müssen", "MD"), ("soll", "MD"),
    ("sollen", "MD"), ("will", "MD"), ("wollen", "MD"), ("darf", "MD"), ("mag", "MD"),
    ("möchte", "MD"),
    // auxiliaries
    ("ist", "VBZ"), ("bin", "VBP"), ("bist", "VBP"), ("sind", "VBP"), ("seid", "VBP"),
    ("war", "VBD"), ("waren", "VBD"), ("hat", "VBZ"), ("habe", "VBP"), ("haben", "VBP"),
    ("hatte", "VBD"), ("wird", "VBZ"), ("werden", "VBP"), ("wurde", "VBD"),
    // adverbs and negations
    ("nicht", "RB"), ("sehr", "RB"), ("auch", "RB"), ("noch", "RB"), ("schon", "RB"),
    ("nur", "RB"), ("immer", "RB"), ("nie", "RB"), ("niemals", "RB"), ("hier", "RB"),
    ("da", "RB"), ("jetzt", "RB"), ("heute", "RB"), ("gern", "RB"), ("gerne", "RB"),
    ("so", "RB"), ("ganz", "RB"), ("wirklich", "RB"), ("leider", "RB"), ("echt", "RB"),
    ("total", "RB"), ("ziemlich", "RB"), ("besonders", "RB"), ("wieder", "RB"), ("mal", "RB"),
    // wh-words
    ("wer", "WP"), ("was", "WP"), ("wie", "WRB"), ("wo", "WRB"), ("warum", "WRB"),
    ("wann", "WRB"),
    // interjections
    ("oh", "UH"), ("ach", "UH"), ("hallo", "UH"), ("ja", "UH"), ("nein", "UH"),
];

const SENTIMENT: &[(&str, f64, WordClass)] = &[
    ("gut", 0.7, Adjective), ("schön", 0.7, Adjective), ("toll", 0.8, Adjective),
    ("super", 0.8, Adjective), ("großartig", 0.9, Adjective), ("wunderbar", 0.9, Adjective),
    ("glücklich", 0.8, Adjective), ("froh", 0.6, Adjective), ("perfekt", 0.9, Adjective),
    ("lecker", 0.7, Adjective), ("nett", 0.5, Adjective), ("herrlich", 0.8, Adjective),
    ("schlecht", -0.7, Adjective), ("traurig", -0.6, Adjective), ("schrecklich", -0.9, Adjective),
    ("furchtbar", -0.8, Adjective), ("langweilig", -0.5, Adjective), ("wütend", -0.7, Adjective),
    ("hässlich", -0.7, Adjective), ("böse", -0.6, Adjective), ("dumm", -0.6, Adjective),
    ("kalt", -0.2, Adjective), ("müde", -0.4, Adjective), ("kaputt", -0.5, Adjective),
    ("lieb", 0.6, Verb), ("freu", 0.6, Verb), ("genieß", 0.6, Verb), ("hass", -0.8, Verb),
    ("nerv", -0.6, Verb), ("enttäusch", -0.7, Verb),
    ("freude", 0.7, Noun), ("spaß", 0.6, Noun), ("glück", 0.7, Noun), ("erfolg", 0.6, Noun),
    ("ärger", -0.6, Noun), ("angst", -0.6, Noun), ("problem", -0.4, Noun), ("fehler", -0.5, Noun),
    ("katastrophe", -0.9, Noun), ("stress", -0.5, Noun),
];

const NEGATIONS: &[&str] = &[
    "nicht", "kein", "keine", "keinen", "keinem", "nie", "niemals", "nichts", "niemand",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("sehr", 1.3), ("wirklich", 1.2), ("total", 1.3), ("echt", 1.2), ("extrem", 1.5),
    ("so", 1.1), ("ziemlich", 1.1), ("besonders", 1.3), ("richtig", 1.2),
];

const INFLECTIONS: &[&str] = &["sten", "ten", "est", "en", "em", "er", "es", "st", "te", "e", "n", "s", "t"];

static SUFFIX_RULES: &[SuffixRule] = &[
    SuffixRule::lowercase("lich", "JJ"),
    SuffixRule::lowercase("ig", "JJ"),
    SuffixRule::lowercase("isch", "JJ"),
    SuffixRule::lowercase("bar", "JJ"),
    SuffixRule::lowercase("los", "JJ"),
    SuffixRule::lowercase("sam", "JJ"),
    SuffixRule::lowercase("haft", "JJ"),
    SuffixRule::lowercase("ern", "VB"),
    SuffixRule::lowercase("eln", "VB"),
    SuffixRule::lowercase("en", "VB"),
    SuffixRule::lowercase("te", "VBD"),
    SuffixRule::lowercase("t", "VBZ"),
];

static TAGGER: LazyLock<Arc<PosTagger>> = LazyLock::new(|| {
    Arc::new(PosTagger::new(
        CLOSED_CLASS,
        SUFFIX_RULES,
        Capitalization::AllNouns,
    ))
});

static LEXICON: LazyLock<Arc<SentimentLexicon>> = LazyLock::new(|| {
    Arc::new(SentimentLexicon::new(
        SENTIMENT,
        NEGATIONS,
        INTENSIFIERS,
        INFLECTIONS,
    ))
});

/// German backend: lexicon sentiment with a Penn-style tagger.
pub struct GermanBackend {
    inner: LexiconBackend,
}

impl GermanBackend {
    pub fn new() -> Self {
        Self::with_max_text_len(DEFAULT_MAX_TEXT_LEN)
    }

    pub fn with_max_text_len(max_text_len: usize) -> Self {
        let inner = LexiconBackend::new(
            "de",
            "german",
            Arc::clone(&TAGGER),
            Arc::clone(&LEXICON),
        )
        .with_max_text_len(max_text_len);

        Self { inner }
    }
}

impl Default for GermanBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageBackend for GermanBackend {
    fn tokenize(&self, text: &str) -> Result<Document> {
        self.inner.tokenize(text)
    }

    fn language(&self) -> &'static str {
        "de"
    }

    fn name(&self) -> &'static str {
        "german"
    }
}

impl Debug for GermanBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GermanBackend")
            .field("inner", &self.inner)
            .finish()
    }
}
