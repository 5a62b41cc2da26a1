//! # Segmentador de Sentenças Embutido
//!
//! Divide texto bruto em sentenças por pontuação terminal (`.`, `!`, `?`),
//! com duas salvaguardas clássicas:
//!
//! - A palavra imediatamente anterior não pode ser uma abreviação conhecida
//!   ("Dr. Smith" não quebra a sentença).
//! - O que vem depois do espaço precisa parecer começo de sentença
//!   (maiúscula, dígito, aspa ou parêntese).
//!
//! O segmentador devolve as substrings aparadas (`trim`), em ordem, sem
//! metadados de offset — a sentença recomputa offsets localmente a partir
//! do próprio texto do segmento.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::tokenizer::is_abbreviation;

/// Pontuação terminal, fechamentos opcionais e o espaço que segue.
static BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([.!?]+["')\]]*)\s+"#).expect("padrão de fronteira válido")
});

/// Divide texto bruto em sentenças, ordem preservada.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0usize;

    for caps in BOUNDARY.captures_iter(text) {
        let whole = caps.get(0).expect("grupo 0 sempre existe");
        let punct = caps.get(1).expect("grupo 1 sempre existe");

        // palavra imediatamente anterior à pontuação
        let prev_word = text[start..punct.start()]
            .split_whitespace()
            .last()
            .unwrap_or("");
        if is_abbreviation(prev_word) {
            continue;
        }

        // o que segue precisa parecer começo de sentença
        let looks_like_start = text[whole.end()..]
            .chars()
            .next()
            .map(|c| c.is_uppercase() || c.is_numeric() || matches!(c, '"' | '\u{201C}' | '(' | '\''))
            .unwrap_or(false);
        if !looks_like_start {
            continue;
        }

        let segment = text[start..punct.end()].trim();
        if !segment.is_empty() {
            sentences.push(segment.to_string());
        }
        start = whole.end();
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_sentences() {
        let sentences = split_sentences("The dog barked. The cat ran away.");
        assert_eq!(
            sentences,
            vec!["The dog barked.", "The cat ran away."]
        );
    }

    #[test]
    fn test_abbreviation_does_not_split() {
        let sentences = split_sentences("Dr. Smith arrived late. Everyone waited.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0], "Dr. Smith arrived late.");
    }

    #[test]
    fn test_question_and_exclamation() {
        let sentences = split_sentences("Really? Yes! It works.");
        assert_eq!(sentences.len(), 3);
    }

    #[test]
    fn test_lowercase_continuation_does_not_split() {
        // "p. ej" minúsculo após ponto não inicia sentença nova
        let sentences = split_sentences("It costs 3. 50 is too much.");
        assert_eq!(sentences.len(), 2);
        let sentences = split_sentences("wait. and see");
        assert_eq!(sentences, vec!["wait. and see"]);
    }

    #[test]
    fn test_single_sentence_without_terminator() {
        let sentences = split_sentences("no punctuation here");
        assert_eq!(sentences, vec!["no punctuation here"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
    }
}
