//! # Tagger Gramatical Embutido
//!
//! Atribui classes gramaticais ([`PosTag`]) a tokens com um classificador
//! determinístico em três camadas, na ordem:
//!
//! 1. **Forma**: pontuação pura e números (regex).
//! 2. **Léxico fechado**: determinantes, pronomes, preposições e
//!    conjunções são classes pequenas e estáveis — listas resolvem.
//! 3. **Heurísticas de sufixo e capitalização**: "-ly" → advérbio,
//!    "-ing"/"-ed" → verbo, inicial maiúscula fora do começo da sentença →
//!    nome próprio, e assim por diante. Substantivo é o fallback.
//!
//! É deliberadamente simples: o tagging fino é responsabilidade de backends
//! reais; este cobre o contrato de [`NlpBackend::pos_tag`] para testes e
//! uso leve.
//!
//! [`NlpBackend::pos_tag`]: crate::backend::NlpBackend::pos_tag

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Classe gramatical de um token (inventário reduzido, estilo UPOS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosTag {
    /// Substantivo comum. Ex: "dog", "idea".
    Noun,
    /// Nome próprio. Ex: "Smith", "London".
    ProperNoun,
    /// Verbo. Ex: "jumps", "running".
    Verb,
    /// Adjetivo. Ex: "quick", "lazy".
    Adjective,
    /// Advérbio. Ex: "quickly", "very".
    Adverb,
    /// Pronome. Ex: "he", "they".
    Pronoun,
    /// Determinante/artigo. Ex: "the", "an".
    Determiner,
    /// Adposição (preposição). Ex: "over", "of".
    Adposition,
    /// Conjunção. Ex: "and", "but".
    Conjunction,
    /// Numeral. Ex: "42", "3.14".
    Numeral,
    /// Pontuação. Ex: ".", ",".
    Punctuation,
    /// Qualquer outra coisa (símbolos, resíduos).
    Other,
}

impl PosTag {
    /// Representação textual da tag (ex: "NOUN", "PUNCT").
    pub fn label(&self) -> &'static str {
        match self {
            PosTag::Noun => "NOUN",
            PosTag::ProperNoun => "PROPN",
            PosTag::Verb => "VERB",
            PosTag::Adjective => "ADJ",
            PosTag::Adverb => "ADV",
            PosTag::Pronoun => "PRON",
            PosTag::Determiner => "DET",
            PosTag::Adposition => "ADP",
            PosTag::Conjunction => "CONJ",
            PosTag::Numeral => "NUM",
            PosTag::Punctuation => "PUNCT",
            PosTag::Other => "X",
        }
    }

    /// Parseia uma tag a partir da representação textual.
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "NOUN" => Some(PosTag::Noun),
            "PROPN" => Some(PosTag::ProperNoun),
            "VERB" => Some(PosTag::Verb),
            "ADJ" => Some(PosTag::Adjective),
            "ADV" => Some(PosTag::Adverb),
            "PRON" => Some(PosTag::Pronoun),
            "DET" => Some(PosTag::Determiner),
            "ADP" => Some(PosTag::Adposition),
            "CONJ" => Some(PosTag::Conjunction),
            "NUM" => Some(PosTag::Numeral),
            "PUNCT" => Some(PosTag::Punctuation),
            "X" => Some(PosTag::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for PosTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "each", "every", "some", "any", "no",
];

const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us",
    "them", "who", "whom", "which", "what", "mine", "yours", "his", "hers",
    "ours", "theirs", "myself", "itself", "themselves",
];

const ADPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "from", "to", "over",
    "under", "between", "through", "during", "into", "onto", "about",
    "against", "without", "within",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "so", "yet", "because", "although", "while",
    "if", "unless", "since",
];

/// Inteiros e decimais, com separador "." ou ",".
static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+([.,]\d+)*$").expect("padrão numérico válido"));

/// Classifica uma sequência de tokens, preservando a ordem.
pub fn tag_tokens(tokens: &[String]) -> Vec<(String, PosTag)> {
    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| (token.clone(), tag_word(token, i)))
        .collect()
}

/// Classifica um único token; `index` é a posição dele na sentença.
pub fn tag_word(word: &str, index: usize) -> PosTag {
    if word.is_empty() {
        return PosTag::Other;
    }
    if word.chars().all(|c| c.is_ascii_punctuation() || c.is_whitespace()) {
        return PosTag::Punctuation;
    }
    if NUMBER.is_match(word) {
        return PosTag::Numeral;
    }

    let lower = word.to_lowercase();
    if DETERMINERS.contains(&lower.as_str()) {
        return PosTag::Determiner;
    }
    if PRONOUNS.contains(&lower.as_str()) {
        return PosTag::Pronoun;
    }
    if ADPOSITIONS.contains(&lower.as_str()) {
        return PosTag::Adposition;
    }
    if CONJUNCTIONS.contains(&lower.as_str()) {
        return PosTag::Conjunction;
    }

    // maiúscula fora do início da sentença sugere nome próprio
    let capitalized = word.chars().next().map(char::is_uppercase).unwrap_or(false);
    if capitalized && index > 0 {
        return PosTag::ProperNoun;
    }

    if lower.ends_with("ly") {
        return PosTag::Adverb;
    }
    if lower.ends_with("ing") || lower.ends_with("ed") {
        return PosTag::Verb;
    }
    if lower.ends_with("ous") || lower.ends_with("ful") || lower.ends_with("ive") || lower.ends_with("able") {
        return PosTag::Adjective;
    }

    PosTag::Noun
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(word: &str) -> PosTag {
        tag_word(word, 1)
    }

    #[test]
    fn test_closed_classes() {
        assert_eq!(tag("the"), PosTag::Determiner);
        assert_eq!(tag("They"), PosTag::Pronoun);
        assert_eq!(tag("over"), PosTag::Adposition);
        assert_eq!(tag("and"), PosTag::Conjunction);
    }

    #[test]
    fn test_form_based() {
        assert_eq!(tag("."), PosTag::Punctuation);
        assert_eq!(tag(","), PosTag::Punctuation);
        assert_eq!(tag("42"), PosTag::Numeral);
        assert_eq!(tag("3.14"), PosTag::Numeral);
        assert_eq!(tag("10,5"), PosTag::Numeral);
    }

    #[test]
    fn test_suffix_heuristics() {
        assert_eq!(tag("quickly"), PosTag::Adverb);
        assert_eq!(tag("running"), PosTag::Verb);
        assert_eq!(tag("jumped"), PosTag::Verb);
        assert_eq!(tag("famous"), PosTag::Adjective);
        assert_eq!(tag("dog"), PosTag::Noun);
    }

    #[test]
    fn test_proper_noun_not_at_sentence_start() {
        assert_eq!(tag_word("Smith", 1), PosTag::ProperNoun);
        // no início da sentença, maiúscula não diz nada
        assert_eq!(tag_word("Smith", 0), PosTag::Noun);
    }

    #[test]
    fn test_label_roundtrip() {
        for tag in [
            PosTag::Noun,
            PosTag::ProperNoun,
            PosTag::Verb,
            PosTag::Adjective,
            PosTag::Adverb,
            PosTag::Pronoun,
            PosTag::Determiner,
            PosTag::Adposition,
            PosTag::Conjunction,
            PosTag::Numeral,
            PosTag::Punctuation,
            PosTag::Other,
        ] {
            assert_eq!(PosTag::from_label(tag.label()), Some(tag));
        }
    }
}
