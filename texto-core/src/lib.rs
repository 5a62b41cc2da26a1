//! # texto-core — Modelo de Dados Textual Anotado em Memória
//!
//! Este crate implementa um modelo de dados para texto processado:
//! [`Document`], [`Sentence`], [`Token`] e [`Annotation`], com offsets de
//! caracteres exatos e anotações tipadas (de sentença, de token ou de span
//! multi-token). Ele **não** faz NLP: segmentação, tokenização e tagging
//! são consumidos de um backend plugável através do trait [`NlpBackend`].
//!
//! ## Arquitetura
//!
//! O dado flui em um único sentido na construção:
//!
//! 1. **Texto bruto** → segmentador do backend → lista de [`Sentence`].
//! 2. **Cada sentença** → tokenizador do backend → lista de [`Token`] com
//!    offsets recuperados localmente por busca de substring.
//! 3. **Anotações** são anexadas depois, contra o grafo já construído.
//!
//! As duas operações algorítmicas do núcleo vivem na [`Sentence`]: busca
//! binária de token por offset de caractere ([`Sentence::token_at_char`])
//! e o protocolo de anotações de span com deduplicação na leitura
//! ([`Sentence::get_annotation`]).
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use texto_core::{RuleBackend, Sentence};
//!
//! let backend = RuleBackend::new();
//! let mut sentence =
//!     Sentence::new("The quick brown fox jumps over the lazy dog.", 0, &backend).unwrap();
//!
//! // 10 tokens, offsets exatos
//! assert_eq!(sentence.len(), 10);
//! assert_eq!(sentence.token_at_char(4).unwrap().unwrap().text(), "quick");
//!
//! // anotação de span sobre os tokens [1, 4)
//! let span = sentence
//!     .add_span_annotation("ent", "noun-phrase", 1, 4, Some(0.9))
//!     .unwrap();
//! assert_eq!(span.text().unwrap(), "quick brown fox");
//!
//! // a leitura reporta o span uma única vez
//! let found = sentence.get_annotation("ent").unwrap();
//! assert_eq!(found.as_tokens().unwrap().len(), 1);
//! ```
//!
//! ## Módulos Principais
//!
//! - [`sentence`]: o componente central (offsets, busca binária, anotações).
//! - [`annotation`]: valores rotulados, spans e o handle [`Label`].
//! - [`document`] / [`corpus`]: agregação de sentenças e coleções.
//! - [`backend`]: o contrato do serviço NLP externo e o backend embutido.
//!
//! ## Limitação conhecida
//!
//! A recuperação de offsets é gulosa (primeira ocorrência à frente do fim
//! do token anterior). Tokens repetidos em posições próximas combinados a
//! normalizações agressivas do tokenizador podem desalinhar — comportamento
//! herdado e documentado, ver [`sentence`].

pub mod annotation;
pub mod backend;
pub mod corpus;
pub mod document;
pub mod error;
pub mod segmenter;
pub mod sentence;
pub mod tagger;
pub mod token;
pub mod tokenizer;

pub use annotation::{Annotation, Label, TokenAnchor, TokenSpan};
pub use backend::{BackendError, NlpBackend, RuleBackend};
pub use corpus::{Corpus, Entity};
pub use document::Document;
pub use error::ModelError;
pub use sentence::{AnnotationMatch, Sentence};
pub use tagger::PosTag;
pub use token::{SentenceRef, TextualEntity, Token};
