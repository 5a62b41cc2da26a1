//! # Sentença — Tokenização com Offsets e Protocolo de Anotações
//!
//! A [`Sentence`] é o componente central do modelo: ela invoca o backend
//! para obter as substrings de token, recupera o offset exato de cada uma
//! no texto original e oferece as duas operações algorítmicas do crate —
//! busca binária de token por offset e leitura/escrita de anotações de
//! span.
//!
//! ## Recuperação de offsets
//!
//! O backend devolve apenas strings. Para cada token, em ordem, o offset é
//! recuperado procurando a substring **a partir do fim do token anterior**
//! (offset 0 para o primeiro). A estratégia gulosa da primeira ocorrência
//! tolera backends que normalizam espaçamento, mas pode desalinhar quando
//! um token se repete no sufixo ainda não varrido antes da sua posição
//! "verdadeira" — limitação conhecida e deliberadamente preservada, não
//! corrigida além dessa heurística.
//!
//! ## Protocolo de anotações
//!
//! - Anotação de sentença: valor único no mapa `annotations`.
//! - Anotação de span: um único [`TokenSpan`] compartilhado (`Rc`) por
//!   todos os tokens do intervalo `[begin, end)`.
//! - Leitura: a chave na sentença vence; caso contrário os tokens são
//!   varridos da esquerda para a direita e cada span é reportado uma única
//!   vez (a varredura salta para depois do último token coberto).

use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use crate::annotation::{Annotation, Label, TokenSpan};
use crate::backend::NlpBackend;
use crate::error::ModelError;
use crate::token::{SentenceRef, TextualEntity, Token};

/// Resultado de [`Sentence::get_annotation`]: a chave pode estar anotada na
/// própria sentença (valor único) ou espalhada pelos tokens (lista
/// ordenada, spans deduplicados).
#[derive(Debug, Clone)]
pub enum AnnotationMatch {
    /// Anotação de nível de sentença.
    Sentence(Rc<Annotation>),
    /// Anotações encontradas nos tokens, em ordem de posição.
    Tokens(Vec<Label>),
}

impl AnnotationMatch {
    /// Acesso à anotação de sentença, se for o caso.
    pub fn as_sentence(&self) -> Option<&Rc<Annotation>> {
        match self {
            AnnotationMatch::Sentence(ann) => Some(ann),
            AnnotationMatch::Tokens(_) => None,
        }
    }

    /// Acesso à lista de rótulos de token, se for o caso.
    pub fn as_tokens(&self) -> Option<&[Label]> {
        match self {
            AnnotationMatch::Tokens(labels) => Some(labels),
            AnnotationMatch::Sentence(_) => None,
        }
    }
}

/// Uma sentença com seus tokens posicionados e suas anotações.
///
/// Os tokens pertencem à sentença e nunca são reordenados nem removidos
/// após a construção; a única mutação posterior é nos mapas de anotação.
/// O texto vive em um `Rc` para que tokens e spans possam referenciá-lo
/// sem posse (handles `Weak`).
#[derive(Debug)]
pub struct Sentence {
    text: Rc<String>,
    index: usize,
    language: String,
    tokens: Vec<Token>,
    annotations: HashMap<String, Rc<Annotation>>,
}

impl Sentence {
    /// Constrói a sentença tokenizando `text` com o backend dado.
    ///
    /// Falhas do backend propagam como [`ModelError::Backend`]; um token
    /// que o backend emitiu mas que não ocorre no sufixo ainda não varrido
    /// do texto é [`ModelError::TokenAlignment`]. Em ambos os casos nenhuma
    /// sentença parcial fica observável.
    pub fn new(text: &str, index: usize, backend: &dyn NlpBackend) -> Result<Self, ModelError> {
        let words = backend.tokenize(text)?;
        let shared = Rc::new(text.to_string());

        let mut tokens = Vec::with_capacity(words.len());
        let mut prev_end = 0usize;
        for (i, word) in words.into_iter().enumerate() {
            let found = text[prev_end..]
                .find(&word)
                .ok_or_else(|| ModelError::TokenAlignment {
                    token: word.clone(),
                    offset: prev_end,
                })?;
            let char_index = prev_end + found;
            prev_end = char_index + word.len();
            tokens.push(Token::new(
                word,
                i,
                char_index,
                SentenceRef::new(Rc::downgrade(&shared), index),
            ));
        }

        debug!(index, tokens = tokens.len(), "sentença tokenizada");

        Ok(Self {
            text: shared,
            index,
            language: "en".to_string(),
            tokens,
            annotations: HashMap::new(),
        })
    }

    /// O texto da sentença.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Código do idioma da sentença.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Índice da sentença no documento (0 para sentenças avulsas).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Os tokens da sentença, em ordem de posição.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// O token na posição `index` da sequência.
    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Acesso mutável a um token (para anexar rótulos).
    pub fn token_mut(&mut self, index: usize) -> Option<&mut Token> {
        self.tokens.get_mut(index)
    }

    /// Número de tokens da sentença.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Verifica se a sentença não tem tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Itera sobre os tokens em ordem.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Localiza o token que cobre o offset de caractere dado.
    ///
    /// Busca binária sobre a sequência ordenada por `char_index` —
    /// complexidade O(log n). O token `t` cobre `offset` quando
    /// `t.char_index <= offset < t.end_char_index`. Um offset que cai em
    /// texto entre tokens (espaços, lacunas) devolve `Ok(None)`, que não é
    /// erro; um offset maior que o comprimento do texto é
    /// [`ModelError::OutOfRange`].
    pub fn token_at_char(&self, offset: usize) -> Result<Option<&Token>, ModelError> {
        if offset > self.text.len() {
            return Err(ModelError::OutOfRange { index: offset, limit: self.text.len() });
        }
        // primeiro token que termina depois do offset; como os tokens são
        // ordenados e sem sobreposição, ou ele cobre o offset ou ninguém cobre
        let at = self.tokens.partition_point(|t| t.end_char_index() <= offset);
        Ok(self.tokens.get(at).filter(|t| t.char_index() <= offset))
    }

    /// Anexa uma anotação de nível de sentença (não ancorada em tokens).
    pub fn add_annotation(&mut self, key: impl Into<String>, annotation: Annotation) {
        self.annotations.insert(key.into(), Rc::new(annotation));
    }

    /// Anexa uma anotação de span sobre o intervalo de tokens `[begin, end)`.
    ///
    /// Um único [`TokenSpan`] é criado e instalado como rótulo `key` de
    /// **cada** token coberto — todos devolvem o mesmo objeto para essa
    /// chave. Intervalo vazio ou fora dos índices válidos →
    /// [`ModelError::OutOfRange`].
    pub fn add_span_annotation(
        &mut self,
        key: &str,
        value: &str,
        begin: usize,
        end: usize,
        score: Option<f64>,
    ) -> Result<Rc<TokenSpan>, ModelError> {
        if begin >= end || end > self.tokens.len() {
            return Err(ModelError::OutOfRange {
                index: if end > self.tokens.len() { end } else { begin },
                limit: self.tokens.len(),
            });
        }
        let span = Rc::new(TokenSpan::new(
            value,
            &self.tokens[begin],
            Some(&self.tokens[end - 1]),
            score,
        )?);
        for token in &mut self.tokens[begin..end] {
            token.set_label(key, Label::Span(Rc::clone(&span)));
        }
        Ok(span)
    }

    /// Lê todas as anotações registradas sob `key`.
    ///
    /// A anotação de sentença, se existir, vence e é devolvida sozinha.
    /// Caso contrário os tokens são varridos da esquerda para a direita:
    /// cada rótulo encontrado entra no resultado e, quando é um span, a
    /// varredura salta para logo depois do último token coberto — um span
    /// sobre `[1, 4)` é reportado uma vez, não três. Chave ausente em toda
    /// parte → [`ModelError::MissingAnnotation`].
    pub fn get_annotation(&self, key: &str) -> Result<AnnotationMatch, ModelError> {
        if let Some(ann) = self.annotations.get(key) {
            return Ok(AnnotationMatch::Sentence(Rc::clone(ann)));
        }

        let mut found = Vec::new();
        let mut i = 0;
        while i < self.tokens.len() {
            if let Some(label) = self.tokens[i].label(key) {
                if let Label::Span(span) = label {
                    i = span.end_index();
                }
                found.push(label.clone());
            }
            i += 1;
        }

        if found.is_empty() {
            return Err(ModelError::MissingAnnotation { key: key.to_string() });
        }
        Ok(AnnotationMatch::Tokens(found))
    }

    /// Verifica se a chave está anotada na sentença ou em algum token.
    pub fn has_annotation(&self, key: &str) -> bool {
        self.annotations.contains_key(key) || self.tokens.iter().any(|t| t.has_label(key))
    }

    /// Roda o tagger do backend e instala o rótulo `"pos"` em cada token.
    ///
    /// Conveniência para camadas superiores; o valor do rótulo é a
    /// representação textual da classe (ex: "NOUN").
    pub fn pos_tag(&mut self, backend: &dyn NlpBackend) -> Result<(), ModelError> {
        let words: Vec<String> = self.tokens.iter().map(|t| t.text().to_string()).collect();
        let tagged = backend.pos_tag(&words)?;
        for (token, (_, tag)) in self.tokens.iter_mut().zip(tagged) {
            token.set_label("pos", Annotation::new(tag.label()));
        }
        Ok(())
    }
}

impl TextualEntity for Sentence {
    fn text(&self) -> &str {
        self.text()
    }

    fn language(&self) -> &str {
        self.language()
    }
}

impl std::fmt::Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sentence [{}]: {}", self.index, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RuleBackend;

    const PANGRAM: &str = "The quick brown fox jumps over the lazy dog.";

    fn sentence() -> Sentence {
        Sentence::new(PANGRAM, 0, &RuleBackend::new()).unwrap()
    }

    #[test]
    fn test_tokenization_offsets() {
        let s = sentence();
        assert_eq!(s.len(), 10);
        assert_eq!(s.token(0).unwrap().text(), "The");

        let jumps = s.token(4).unwrap();
        assert_eq!(jumps.text(), "jumps");
        assert_eq!(jumps.char_index(), PANGRAM.find("jumps").unwrap());
        assert_eq!(jumps.end_char_index(), jumps.char_index() + 5);

        let period = s.token(9).unwrap();
        assert_eq!(period.text(), ".");
        assert_eq!(period.char_index(), PANGRAM.find('.').unwrap());
    }

    #[test]
    fn test_token_parent_backref() {
        let s = sentence();
        let parent = s.token(0).unwrap().parent().unwrap();
        assert_eq!(parent.index(), 0);
        assert_eq!(*parent.text().unwrap(), PANGRAM.to_string());
    }

    #[test]
    fn test_token_at_char() {
        let s = sentence();

        let the_at = 0;
        assert_eq!(s.token_at_char(the_at).unwrap().unwrap().text(), "The");
        assert_eq!(s.token_at_char(the_at + 2).unwrap().unwrap().text(), "The");

        // espaço entre "the" e "lazy"
        let gap = PANGRAM.find("lazy").unwrap() - 1;
        assert!(s.token_at_char(gap).unwrap().is_none());

        assert_eq!(
            s.token_at_char(PANGRAM.len() - 1).unwrap().unwrap().text(),
            "."
        );

        // offset igual ao comprimento não cobre token algum, mas é válido
        assert!(s.token_at_char(PANGRAM.len()).unwrap().is_none());
        assert!(matches!(
            s.token_at_char(PANGRAM.len() + 1),
            Err(ModelError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_sentence_level_annotation_wins() {
        let mut s = sentence();
        s.add_annotation("tema", Annotation::new("animais"));
        let m = s.get_annotation("tema").unwrap();
        assert_eq!(m.as_sentence().unwrap().value(), "animais");
    }

    #[test]
    fn test_per_token_annotations_in_order() {
        let mut s = sentence();
        s.pos_tag(&RuleBackend::new()).unwrap();

        let m = s.get_annotation("pos").unwrap();
        let labels = m.as_tokens().unwrap();
        assert_eq!(labels.len(), 10);
        assert_eq!(labels[0].value(), "DET"); // "The"
        assert_eq!(labels[9].value(), "PUNCT"); // "."
    }

    #[test]
    fn test_span_annotations_deduplicated() {
        let mut s = sentence();
        s.add_span_annotation("test-key", "np", 1, 4, None).unwrap();
        s.add_span_annotation("test-key", "np", 7, 9, Some(0.9)).unwrap();

        let m = s.get_annotation("test-key").unwrap();
        let labels = m.as_tokens().unwrap();
        assert_eq!(labels.len(), 2);

        let first = labels[0].as_span().unwrap();
        assert_eq!(first.text().unwrap(), "quick brown fox");
        assert_eq!(first.start_index(), 1);
        assert_eq!(first.end_index(), 3);

        let second = labels[1].as_span().unwrap();
        assert_eq!(second.text().unwrap(), "lazy dog");
        assert_eq!(second.score(), Some(0.9));
    }

    #[test]
    fn test_span_is_same_object_on_every_token() {
        let mut s = sentence();
        let span = s.add_span_annotation("ent", "np", 1, 4, None).unwrap();
        for i in 1..4 {
            let label = s.token(i).unwrap().get_label("ent").unwrap();
            assert!(Rc::ptr_eq(label.as_span().unwrap(), &span));
        }
        assert!(!s.token(0).unwrap().has_label("ent"));
        assert!(!s.token(4).unwrap().has_label("ent"));
    }

    #[test]
    fn test_span_out_of_range() {
        let mut s = sentence();
        assert!(matches!(
            s.add_span_annotation("k", "v", 7, 11, None),
            Err(ModelError::OutOfRange { .. })
        ));
        assert!(matches!(
            s.add_span_annotation("k", "v", 3, 3, None),
            Err(ModelError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_missing_annotation() {
        let s = sentence();
        assert!(matches!(
            s.get_annotation("nada"),
            Err(ModelError::MissingAnnotation { .. })
        ));
    }

    #[test]
    fn test_greedy_alignment_with_repeated_tokens() {
        // "the" ocorre duas vezes: cada ocorrência é alinhada à primeira
        // posição ainda não varrida, em ordem
        let s = sentence();
        let first_the = s.token(0).unwrap();
        let second_the = s.token(6).unwrap();
        assert_eq!(first_the.char_index(), 0);
        assert_eq!(second_the.char_index(), PANGRAM.find(" the ").unwrap() + 1);
        assert!(second_the.char_index() > first_the.char_index());
    }

    #[test]
    fn test_empty_sentence() {
        let s = Sentence::new("", 0, &RuleBackend::new()).unwrap();
        assert!(s.is_empty());
        assert!(s.token_at_char(0).unwrap().is_none());
    }
}
