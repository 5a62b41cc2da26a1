//! # Documento — Sequência Ordenada de Sentenças
//!
//! Um [`Document`] possui um texto e a lista de [`Sentence`]s construídas a
//! partir dele. Há dois caminhos de construção:
//!
//! - [`from_text`]: o texto bruto é dividido pelo segmentador do backend.
//! - [`from_segments`]: o chamador já traz as sentenças prontas; o texto do
//!   documento passa a ser a junção delas por `\n`.
//!
//! Nos dois casos o índice de cada sentença é a sua posição na sequência.
//!
//! [`from_text`]: Document::from_text
//! [`from_segments`]: Document::from_segments

use tracing::debug;

use crate::backend::NlpBackend;
use crate::error::ModelError;
use crate::sentence::Sentence;
use crate::token::TextualEntity;

/// Um documento com suas sentenças segmentadas e tokenizadas.
#[derive(Debug)]
pub struct Document {
    text: String,
    id: Option<String>,
    language: String,
    sentences: Vec<Sentence>,
}

impl Document {
    /// Constrói o documento segmentando texto bruto com o backend dado.
    ///
    /// `text` fica registrado exatamente como recebido; falhas do backend
    /// propagam e nenhum documento parcial fica observável.
    pub fn from_text(text: &str, backend: &dyn NlpBackend) -> Result<Self, ModelError> {
        let segments = backend.segment_sentences(text)?;
        Self::build(text.to_string(), segments, backend)
    }

    /// Constrói o documento a partir de sentenças já segmentadas.
    ///
    /// O texto do documento é a junção dos segmentos por `\n`.
    pub fn from_segments<S: AsRef<str>>(
        segments: &[S],
        backend: &dyn NlpBackend,
    ) -> Result<Self, ModelError> {
        let segments: Vec<String> = segments.iter().map(|s| s.as_ref().to_string()).collect();
        let text = segments.join("\n");
        Self::build(text, segments, backend)
    }

    fn build(
        text: String,
        segments: Vec<String>,
        backend: &dyn NlpBackend,
    ) -> Result<Self, ModelError> {
        let mut sentences = Vec::with_capacity(segments.len());
        for (i, segment) in segments.iter().enumerate() {
            sentences.push(Sentence::new(segment, i, backend)?);
        }

        debug!(sentences = sentences.len(), "documento segmentado");

        Ok(Self {
            text,
            id: None,
            language: "en".to_string(),
            sentences,
        })
    }

    /// O texto do documento.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Código do idioma do documento.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Define o identificador do documento.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Identificador do documento, se houver.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// As sentenças do documento, em ordem.
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// A sentença na posição `index`.
    pub fn sentence(&self, index: usize) -> Option<&Sentence> {
        self.sentences.get(index)
    }

    /// Acesso mutável a uma sentença (para anotar).
    pub fn sentence_mut(&mut self, index: usize) -> Option<&mut Sentence> {
        self.sentences.get_mut(index)
    }

    /// Número de sentenças do documento.
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Verifica se o documento não tem sentenças.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Itera sobre as sentenças em ordem.
    pub fn iter(&self) -> std::slice::Iter<'_, Sentence> {
        self.sentences.iter()
    }
}

impl TextualEntity for Document {
    fn text(&self) -> &str {
        self.text()
    }

    fn language(&self) -> &str {
        self.language()
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Document: {}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RuleBackend;

    const RAW: &str = "The dog barked loudly. The cat ran away. Nobody slept.";

    #[test]
    fn test_segmentation_roundtrip() {
        let backend = RuleBackend::new();
        let from_raw = Document::from_text(RAW, &backend).unwrap();
        let segments: Vec<&str> =
            vec!["The dog barked loudly.", "The cat ran away.", "Nobody slept."];
        let from_segments = Document::from_segments(&segments, &backend).unwrap();

        assert_eq!(from_raw.len(), from_segments.len());
        for (a, b) in from_raw.iter().zip(from_segments.iter()) {
            assert_eq!(a.text(), b.text());
            assert_eq!(a.index(), b.index());
            let tokens_a: Vec<&str> = a.iter().map(|t| t.text()).collect();
            let tokens_b: Vec<&str> = b.iter().map(|t| t.text()).collect();
            assert_eq!(tokens_a, tokens_b);
        }

        // o construtor bruto preserva o texto original;
        // o de segmentos junta por newline
        assert_eq!(from_raw.text(), RAW);
        assert_eq!(from_segments.text(), segments.join("\n"));
    }

    #[test]
    fn test_sentence_indices_match_position() {
        let doc = Document::from_text(RAW, &RuleBackend::new()).unwrap();
        for (i, sentence) in doc.iter().enumerate() {
            assert_eq!(sentence.index(), i);
        }
    }

    #[test]
    fn test_document_id() {
        let doc = Document::from_text("Hello.", &RuleBackend::new())
            .unwrap()
            .with_id("doc-01");
        assert_eq!(doc.id(), Some("doc-01"));
    }

    #[test]
    fn test_annotate_through_document() {
        let mut doc = Document::from_text(RAW, &RuleBackend::new()).unwrap();
        let sentence = doc.sentence_mut(0).unwrap();
        sentence.add_span_annotation("ent", "animal", 1, 2, None).unwrap();
        let m = doc.sentence(0).unwrap().get_annotation("ent").unwrap();
        assert_eq!(m.as_tokens().unwrap().len(), 1);
    }
}
