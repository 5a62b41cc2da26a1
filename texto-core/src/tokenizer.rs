//! # Tokenizador Embutido — Fronteiras de Palavra UAX-29
//!
//! Divide uma sentença em substrings de token usando as fronteiras de
//! palavra do Unicode (UAX #29, via `unicode-segmentation`), com um
//! pós-processamento mínimo:
//!
//! - Espaços em branco são descartados (não viram tokens).
//! - Um ponto colado a uma abreviação conhecida é reanexado a ela
//!   (`"Dr" + "."` → `"Dr."`), para que o ponto não pareça fim de sentença.
//! - Números decimais ("3.14", "10,5") já chegam inteiros do UAX-29.
//!
//! O tokenizador devolve apenas as substrings, em ordem; os offsets são
//! recomputados pela sentença por busca de substring para a frente.
//! Cada substring emitida ocorre verbatim no texto original, o que torna
//! essa recuperação sempre possível.

use unicode_segmentation::UnicodeSegmentation;

/// Abreviações cujo ponto final pertence ao token, não à sentença.
pub(crate) const ABBREVIATIONS: &[&str] = &[
    "Dr", "Mr", "Mrs", "Ms", "Prof", "Sr", "Sra", "Jr", "St", "vs", "etc", "Fig",
];

/// Verifica se a palavra é uma abreviação conhecida (sem o ponto).
pub(crate) fn is_abbreviation(word: &str) -> bool {
    ABBREVIATIONS.iter().any(|abbr| abbr.eq_ignore_ascii_case(word))
}

/// Tokeniza uma sentença em substrings, ordem preservada.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    // true quando houve espaço desde o último token emitido
    let mut gap = true;

    for piece in text.split_word_bounds() {
        if piece.chars().all(char::is_whitespace) {
            gap = true;
            continue;
        }
        if piece == "." && !gap {
            if let Some(last) = tokens.last_mut() {
                if is_abbreviation(last) {
                    last.push('.');
                    continue;
                }
            }
        }
        tokens.push(piece.to_string());
        gap = false;
    }

    tokens
}
