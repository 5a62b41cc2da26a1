//! # Contrato do Backend NLP
//!
//! O modelo textual não sabe segmentar nem tokenizar: ele consome um
//! serviço externo através do trait [`NlpBackend`]. O contrato é mínimo e
//! posicional por construção — o backend devolve apenas as substrings, na
//! ordem original; os offsets são sempre recomputados localmente pela
//! [`Sentence`](crate::sentence::Sentence).
//!
//! As três operações:
//!
//! 1. `segment_sentences`: texto bruto → sentenças, ordem preservada.
//! 2. `tokenize`: sentença → tokens, ordem preservada. O único requisito é
//!    que cada token emitido seja localizável por busca de substring no
//!    texto original, varrendo para a frente.
//! 3. `pos_tag`: tokens → pares (token, classe gramatical). Consumido por
//!    camadas superiores, não pelo núcleo do modelo.
//!
//! Chamadas são síncronas e bloqueantes, sem retry nem timeout: uma falha
//! do backend é fatal para a construção em andamento.
//!
//! O crate embute o [`RuleBackend`], um backend determinístico baseado em
//! regras ([`tokenizer`], [`segmenter`], [`tagger`]) que cobre o contrato
//! inteiro sem dependências de runtime externas.
//!
//! [`tokenizer`]: crate::tokenizer
//! [`segmenter`]: crate::segmenter
//! [`tagger`]: crate::tagger

use crate::segmenter;
use crate::tagger::{self, PosTag};
use crate::tokenizer;

/// Falha de uma das operações do backend NLP.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendError {
    /// Falha na segmentação de sentenças.
    Segmentation(String),
    /// Falha na tokenização.
    Tokenization(String),
    /// Falha no tagging gramatical.
    Tagging(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::Segmentation(msg) => write!(f, "segmentação: {}", msg),
            BackendError::Tokenization(msg) => write!(f, "tokenização: {}", msg),
            BackendError::Tagging(msg) => write!(f, "tagging: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

/// O serviço externo de segmentação, tokenização e tagging.
///
/// Implementações devem preservar a ordem das substrings e nunca inventar
/// texto que não ocorra na entrada (normalizações leves de espaçamento são
/// toleradas pela recuperação de offsets da sentença, mas tokens
/// irreconhecíveis são erro).
pub trait NlpBackend {
    /// Divide texto bruto em substrings de sentença, em ordem.
    fn segment_sentences(&self, text: &str) -> Result<Vec<String>, BackendError>;

    /// Divide uma sentença em substrings de token, em ordem.
    fn tokenize(&self, text: &str) -> Result<Vec<String>, BackendError>;

    /// Atribui uma classe gramatical a cada token, preservando a ordem.
    fn pos_tag(&self, tokens: &[String]) -> Result<Vec<(String, PosTag)>, BackendError>;
}

/// Backend embutido, determinístico e baseado em regras.
///
/// Implementa o contrato completo com os módulos internos do crate:
/// segmentador por pontuação com lista de abreviações, tokenizador por
/// fronteiras de palavra UAX-29 e tagger por léxico fechado + sufixos.
/// Serve como padrão funcional e como referência de contrato para backends
/// reais (spaCy, NLTK, etc. atrás de FFI ou RPC).
#[derive(Debug, Clone, Default)]
pub struct RuleBackend;

impl RuleBackend {
    pub fn new() -> Self {
        Self
    }
}

impl NlpBackend for RuleBackend {
    fn segment_sentences(&self, text: &str) -> Result<Vec<String>, BackendError> {
        Ok(segmenter::split_sentences(text))
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>, BackendError> {
        Ok(tokenizer::tokenize(text))
    }

    fn pos_tag(&self, tokens: &[String]) -> Result<Vec<(String, PosTag)>, BackendError> {
        Ok(tagger::tag_tokens(tokens))
    }
}
