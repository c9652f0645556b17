use std::fmt::{Debug, Formatter};
use std::sync::{Arc, LazyLock};

use crate::analysis::backend::LanguageBackend;
use crate::analysis::backend::engine::{DEFAULT_MAX_TEXT_LEN, LexiconBackend};
use crate::analysis::backend::lexicon::{SentimentLexicon, WordClass};
use crate::analysis::backend::tagger::{Capitalization, PosTagger, SuffixRule};
use crate::analysis::token::Document;
use crate::error::Result;

use WordClass::{Adjective, Noun, Verb};

const CLOSED_CLASS: &[(&str, &str)] = &[
    // determiners
    ("the", "DT"), ("a", "DT"), ("an", "DT"), ("this", "DT"), ("that", "DT"),
    ("these", "DT"), ("those", "DT"), ("every", "DT"), ("each", "DT"), ("some", "DT"),
    ("any", "DT"), ("no", "DT"), ("all", "DT"), ("both", "DT"), ("another", "DT"),
    // pronouns
    ("i", "PRP"), ("you", "PRP"), ("he", "PRP"), ("she", "PRP"), ("it", "PRP"),
    ("we", "PRP"), ("they", "PRP"), ("me", "PRP"), ("him", "PRP"), ("us", "PRP"),
    ("them", "PRP"), ("myself", "PRP"), ("yourself", "PRP"), ("i'm", "PRP"), ("it's", "PRP"),
    ("my", "PRP$"), ("your", "PRP$"), ("his", "PRP$"), ("her", "PRP$"), ("its", "PRP$"),
    ("our", "PRP$"), ("their", "PRP$"),
    // prepositions
    ("in", "IN"), ("on", "IN"), ("at", "IN"), ("of", "IN"), ("for", "IN"),
    ("with", "IN"), ("about", "IN"), ("from", "IN"), ("by", "IN"), ("into", "IN"),
    ("over", "IN"), ("under", "IN"), ("after", "IN"), ("before", "IN"), ("through", "IN"),
    ("between", "IN"), ("against", "IN"), ("during", "IN"), ("without", "IN"), ("than", "IN"),
    ("because", "IN"), ("if", "IN"), ("while", "IN"), ("since", "IN"), ("like", "IN"),
    ("to", "TO"),
    // conjunctions
    ("and", "CC"), ("or", "CC"), ("but", "CC"), ("nor", "CC"), ("yet", "CC"),
    // modals
    ("can", "MD"), ("could", "MD"), ("will", "MD"), ("would", "MD"), ("shall", "MD"),
    ("should", "MD"), ("may", "MD"), ("might", "MD"), ("must", "MD"), ("i'll", "MD"),
    // auxiliaries
    ("is", "VBZ"), ("am", "VBP"), ("are", "VBP"), ("was", "VBD"), ("were", "VBD"),
    ("be", "VB"), ("been", "VBN"), ("being", "VBG"), ("have", "VBP"), ("has", "VBZ"),
    ("had", "VBD"), ("do", "VBP"), ("does", "VBZ"), ("did", "VBD"),
    // adverbs and negations
    ("not", "RB"), ("n't", "RB"), ("never", "RB"), ("very", "RB"), ("really", "RB"),
    ("too", "RB"), ("also", "RB"), ("just", "RB"), ("always", "RB"), ("often", "RB"),
    ("still", "RB"), ("already", "RB"), ("quite", "RB"), ("so", "RB"), ("here", "RB"),
    ("there", "RB"), ("now", "RB"), ("then", "RB"), ("again", "RB"), ("today", "NN"),
    ("don't", "RB"), ("doesn't", "RB"), ("didn't", "RB"), ("isn't", "RB"), ("wasn't", "RB"),
    ("aren't", "RB"), ("can't", "RB"), ("won't", "RB"), ("couldn't", "RB"), ("wouldn't", "RB"),
    ("shouldn't", "RB"), ("cannot", "RB"),
    // wh-words
    ("who", "WP"), ("what", "WP"), ("which", "WDT"), ("when", "WRB"), ("where", "WRB"),
    ("why", "WRB"), ("how", "WRB"),
    // interjections
    ("oh", "UH"), ("wow", "UH"), ("yes", "UH"), ("hey", "UH"), ("lol", "UH"),
    ("omg", "UH"), ("yay", "UH"), ("ugh", "UH"),
];

const SENTIMENT: &[(&str, f64, WordClass)] = &[
    ("love", 0.5, Verb), ("enjoy", 0.5, Verb), ("win", 0.5, Verb), ("smile", 0.4, Verb),
    ("adore", 0.7, Verb), ("thank", 0.4, Verb), ("hate", -0.8, Verb), ("cry", -0.4, Verb),
    ("fail", -0.5, Verb), ("suck", -0.6, Verb), ("miss", -0.2, Verb), ("hurt", -0.5, Verb),
    ("good", 0.7, Adjective), ("great", 0.8, Adjective), ("awesome", 1.0, Adjective),
    ("amazing", 0.6, Adjective), ("happy", 0.8, Adjective), ("nice", 0.6, Adjective),
    ("beautiful", 0.85, Adjective), ("wonderful", 1.0, Adjective), ("best", 1.0, Adjective),
    ("excellent", 1.0, Adjective), ("fantastic", 0.4, Adjective), ("glad", 0.5, Adjective),
    ("perfect", 1.0, Adjective), ("delicious", 1.0, Adjective), ("sunny", 0.3, Adjective),
    ("cool", 0.35, Adjective), ("lovely", 0.5, Adjective), ("fun", 0.3, Adjective),
    ("bad", -0.7, Adjective), ("terrible", -1.0, Adjective), ("awful", -1.0, Adjective),
    ("horrible", -1.0, Adjective), ("sad", -0.5, Adjective), ("angry", -0.5, Adjective),
    ("boring", -1.0, Adjective), ("worst", -1.0, Adjective), ("ugly", -0.7, Adjective),
    ("annoying", -0.8, Adjective), ("disappointed", -0.75, Adjective), ("tired", -0.4, Adjective),
    ("sick", -0.7, Adjective), ("stupid", -0.8, Adjective), ("broken", -0.4, Adjective),
    ("wrong", -0.5, Adjective), ("poor", -0.4, Adjective), ("cold", -0.3, Adjective),
    ("problem", -0.3, Noun), ("mess", -0.4, Noun), ("disaster", -0.8, Noun),
    ("joy", 0.6, Noun), ("pain", -0.5, Noun),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "n't", "nothing", "none", "nobody", "neither", "nor", "cannot",
    "don't", "doesn't", "didn't", "isn't", "wasn't", "aren't", "can't", "won't",
    "couldn't", "wouldn't", "shouldn't",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3), ("really", 1.3), ("so", 1.2), ("extremely", 1.5), ("super", 1.3),
    ("totally", 1.3), ("too", 1.1), ("absolutely", 1.4), ("incredibly", 1.4), ("quite", 1.1),
];

const INFLECTIONS: &[&str] = &["ing", "ed", "es", "s", "d"];

static SUFFIX_RULES: &[SuffixRule] = &[
    SuffixRule::new("ly", "RB"),
    SuffixRule::new("ing", "VBG"),
    SuffixRule::new("ed", "VBD"),
    SuffixRule::new("ous", "JJ"),
    SuffixRule::new("ful", "JJ"),
    SuffixRule::new("ive", "JJ"),
    SuffixRule::new("able", "JJ"),
    SuffixRule::new("ible", "JJ"),
    SuffixRule::new("less", "JJ"),
    SuffixRule::new("ish", "JJ"),
    SuffixRule::new("ness", "NN"),
    SuffixRule::new("ment", "NN"),
    SuffixRule::new("tion", "NN"),
    SuffixRule::new("ss", "NN"),
    SuffixRule::lowercase("s", "NNS"),
];

static TAGGER: LazyLock<Arc<PosTagger>> = LazyLock::new(|| {
    Arc::new(PosTagger::new(
        CLOSED_CLASS,
        SUFFIX_RULES,
        Capitalization::ProperNouns,
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

/// English backend: lexicon sentiment with a Penn-style tagger.
pub struct EnglishBackend {
    inner: LexiconBackend,
}

impl EnglishBackend {
    pub fn new() -> Self {
        Self::with_max_text_len(DEFAULT_MAX_TEXT_LEN)
    }

    pub fn with_max_text_len(max_text_len: usize) -> Self {
        let inner = LexiconBackend::new(
            "en",
            "english",
            Arc::clone(&TAGGER),
            Arc::clone(&LEXICON),
        )
        .with_max_text_len(max_text_len);

        Self { inner }
    }
}

impl Default for EnglishBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageBackend for EnglishBackend {
    fn tokenize(&self, text: &str) -> Result<Document> {
        self.inner.tokenize(text)
    }

    fn language(&self) -> &'static str {
        "en"
    }

    fn name(&self) -> &'static str {
        "english"
    }
}

impl Debug for EnglishBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnglishBackend")
            .field("inner", &self.inner)
            .finish()
    }
}
