//! # Token — A Unidade Textual Mínima
//!
//! Um [`Token`] é um trecho contíguo do texto de uma sentença, com a sua
//! posição registrada duas vezes: o índice na sequência de tokens e o
//! offset (em bytes) do primeiro caractere no texto original. Manter o
//! offset exato é o que permite recortar spans e localizar tokens por
//! posição sem nunca reprocessar o texto.
//!
//! Tokens são construídos exclusivamente pela [`Sentence`] durante a
//! tokenização e pertencem a ela (a sequência é a posse). A referência de
//! volta para a sentença-mãe ([`SentenceRef`]) é **não-proprietária**: um
//! handle fraco para o texto mais o índice da sentença.
//!
//! [`Sentence`]: crate::sentence::Sentence

use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::annotation::Label;
use crate::error::ModelError;

/// Capacidade comum a toda entidade portadora de texto do modelo
/// (Token, Sentença, Documento): ter um texto e um idioma.
pub trait TextualEntity {
    /// O texto da entidade.
    fn text(&self) -> &str;
    /// Código do idioma (ex: "en", "pt").
    fn language(&self) -> &str;
}

/// Referência não-proprietária de um token para a sentença que o possui.
///
/// Guarda um `Weak` para o texto da sentença (suficiente para derivar o
/// texto de spans) e o índice da sentença no documento. O tempo de vida
/// útil é o da sentença: depois que ela é destruída, `text()` passa a
/// devolver `None`.
#[derive(Debug, Clone)]
pub struct SentenceRef {
    text: Weak<String>,
    index: usize,
}

impl SentenceRef {
    pub(crate) fn new(text: Weak<String>, index: usize) -> Self {
        Self { text, index }
    }

    /// Índice da sentença-mãe.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Texto da sentença-mãe, se ela ainda estiver viva.
    pub fn text(&self) -> Option<Rc<String>> {
        self.text.upgrade()
    }

    pub(crate) fn text_weak(&self) -> Weak<String> {
        self.text.clone()
    }
}

/// Um token com posição e rótulos de anotação.
#[derive(Debug, Clone)]
pub struct Token {
    /// O texto do token (ex: "fox", ",", "3.14").
    text: String,
    /// Índice sequencial na sentença (0, 1, 2...).
    index: usize,
    /// Offset de byte do primeiro caractere no texto da sentença.
    char_index: usize,
    /// Código do idioma do token.
    language: String,
    /// Referência de volta para a sentença-mãe; `None` em tokens avulsos.
    parent: Option<SentenceRef>,
    /// Rótulos de anotação por chave.
    labels: HashMap<String, Label>,
}

impl Token {
    pub(crate) fn new(
        text: impl Into<String>,
        index: usize,
        char_index: usize,
        parent: SentenceRef,
    ) -> Self {
        Self {
            text: text.into(),
            index,
            char_index,
            language: "en".to_string(),
            parent: Some(parent),
            labels: HashMap::new(),
        }
    }

    /// Cria um token avulso, sem sentença-mãe.
    ///
    /// Fora do fluxo normal de construção — existe para testes e para
    /// montar spans sintéticos. Índice e offset ficam em zero.
    pub fn detached(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            index: 0,
            char_index: 0,
            language: "en".to_string(),
            parent: None,
            labels: HashMap::new(),
        }
    }

    /// O texto do token.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Código do idioma do token.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Índice do token na sequência da sentença.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Offset (em bytes) do primeiro caractere no texto da sentença.
    pub fn char_index(&self) -> usize {
        self.char_index
    }

    /// Offset (em bytes) logo após o último caractere do token.
    pub fn end_char_index(&self) -> usize {
        self.char_index + self.text.len()
    }

    /// Comprimento do texto do token, em bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Verifica se o texto do token é vazio.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Referência para a sentença-mãe, se houver.
    pub fn parent(&self) -> Option<&SentenceRef> {
        self.parent.as_ref()
    }

    /// Verifica se o token está avulso (sem sentença-mãe).
    pub fn is_detached(&self) -> bool {
        self.parent.is_none()
    }

    /// Anexa (ou sobrescreve) um rótulo de anotação.
    pub fn set_label(&mut self, key: impl Into<String>, label: impl Into<Label>) {
        self.labels.insert(key.into(), label.into());
    }

    /// Lê um rótulo; falha com [`ModelError::MissingLabel`] se ausente.
    pub fn get_label(&self, key: &str) -> Result<&Label, ModelError> {
        self.labels
            .get(key)
            .ok_or_else(|| ModelError::MissingLabel { key: key.to_string() })
    }

    /// Lê um rótulo sem transformar ausência em erro.
    pub fn label(&self, key: &str) -> Option<&Label> {
        self.labels.get(key)
    }

    /// Verifica se o token carrega o rótulo.
    pub fn has_label(&self, key: &str) -> bool {
        self.labels.contains_key(key)
    }

    /// Itera sobre os pares (chave, rótulo) do token.
    pub fn labels(&self) -> impl Iterator<Item = (&String, &Label)> {
        self.labels.iter()
    }
}

impl TextualEntity for Token {
    fn text(&self) -> &str {
        self.text()
    }

    fn language(&self) -> &str {
        self.language()
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.parent {
            Some(parent) => write!(f, "Token [{}][{}]: {}", parent.index(), self.index, self.text),
            None => write!(f, "Token: {}", self.text),
        }
    }
}
