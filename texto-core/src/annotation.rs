//! # Anotações — Valores Rotulados e Spans de Tokens
//!
//! Uma [`Annotation`] é o registro mínimo de rotulagem do modelo: um valor
//! textual, um score opcional de confiança e um mapa aberto de campos extras
//! (`String` → `serde_json::Value`).
//!
//! Um [`TokenSpan`] é a variante ancorada em tokens: além do valor, guarda
//! as posições do primeiro e do último token cobertos e sabe recortar o
//! trecho de texto correspondente na sentença-mãe.
//!
//! ## Chave reservada
//!
//! A chave `"value"` é reservada: lê-la devolve o atributo `value` da
//! anotação, e escrevê-la pelo mapa de campos é um erro
//! ([`ModelError::InvalidField`]). Em um `TokenSpan`, `"start"` e `"end"`
//! também são reservadas e reportam os índices dos tokens âncora.
//!
//! ## Compartilhamento
//!
//! Anotações anexadas a tokens circulam como [`Label`], um handle contado
//! por referência (`Rc`). Um span registrado sobre `[begin, end)` é o
//! **mesmo objeto** em todos os tokens cobertos — é essa identidade que
//! permite à sentença deduplicar spans na leitura.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ModelError;
use crate::token::Token;

/// Chave reservada para o atributo `value` de qualquer anotação.
const VALUE_KEY: &str = "value";
/// Chaves reservadas adicionais de um `TokenSpan`.
const START_KEY: &str = "start";
const END_KEY: &str = "end";

/// Um valor rotulado com score opcional e campos extensíveis.
///
/// Imutável após a construção, exceto pela adição de campos via [`set`].
/// O mapa de campos usa mutabilidade interior (`RefCell`) para que uma
/// anotação já compartilhada entre tokens (`Rc`) ainda aceite novos campos.
///
/// [`set`]: Annotation::set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// O valor principal da anotação (ex: "PER", "quente", "positivo").
    value: String,
    /// Confiança da anotação, quando o produtor fornece uma (0.0 a 1.0).
    score: Option<f64>,
    /// Campos extras de formato livre.
    #[serde(default)]
    fields: RefCell<HashMap<String, Value>>,
}

impl Annotation {
    /// Cria uma anotação apenas com o valor.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            score: None,
            fields: RefCell::new(HashMap::new()),
        }
    }

    /// Cria uma anotação com valor e score de confiança.
    pub fn with_score(value: impl Into<String>, score: f64) -> Self {
        Self {
            value: value.into(),
            score: Some(score),
            fields: RefCell::new(HashMap::new()),
        }
    }

    /// Cria uma anotação com campos extras iniciais.
    ///
    /// Falha com [`ModelError::InvalidField`] se o mapa contiver a chave
    /// reservada `"value"`.
    pub fn with_fields(
        value: impl Into<String>,
        score: Option<f64>,
        fields: HashMap<String, Value>,
    ) -> Result<Self, ModelError> {
        if fields.contains_key(VALUE_KEY) {
            return Err(ModelError::InvalidField { key: VALUE_KEY.to_string() });
        }
        Ok(Self {
            value: value.into(),
            score,
            fields: RefCell::new(fields),
        })
    }

    /// O valor principal da anotação.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// O score de confiança, se houver.
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Lê um campo da anotação.
    ///
    /// A chave `"value"` devolve o atributo `value`; qualquer outra chave é
    /// consultada no mapa de campos. Chave ausente →
    /// [`ModelError::MissingField`].
    pub fn get(&self, key: &str) -> Result<Value, ModelError> {
        if key == VALUE_KEY {
            return Ok(Value::String(self.value.clone()));
        }
        self.fields
            .borrow()
            .get(key)
            .cloned()
            .ok_or_else(|| ModelError::MissingField { key: key.to_string() })
    }

    /// Insere ou sobrescreve um campo.
    ///
    /// A chave `"value"` é rejeitada com [`ModelError::InvalidField`].
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Result<(), ModelError> {
        let key = key.into();
        if key == VALUE_KEY {
            return Err(ModelError::InvalidField { key });
        }
        self.fields.borrow_mut().insert(key, value.into());
        Ok(())
    }

    /// Verifica se um campo existe (sem contar a chave reservada).
    pub fn has_field(&self, key: &str) -> bool {
        self.fields.borrow().contains_key(key)
    }
}

/// Posição de um token âncora, sem posse do token.
///
/// Um `TokenAnchor` é uma fotografia da posição de um [`Token`] no momento
/// em que o span foi criado: índice na sequência, offsets de início/fim e um
/// handle fraco (`Weak`) para o texto da sentença-mãe. Como os tokens nunca
/// são reordenados nem removidos após a construção da sentença, a fotografia
/// permanece válida enquanto a sentença viver.
#[derive(Debug, Clone)]
pub struct TokenAnchor {
    index: usize,
    char_index: usize,
    end_char_index: usize,
    parent: Option<Weak<String>>,
}

impl TokenAnchor {
    pub(crate) fn of(token: &Token) -> Self {
        Self {
            index: token.index(),
            char_index: token.char_index(),
            end_char_index: token.end_char_index(),
            parent: token.parent().map(|p| p.text_weak()),
        }
    }

    /// Índice do token na sequência da sentença.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Offset (em bytes) do primeiro caractere do token.
    pub fn char_index(&self) -> usize {
        self.char_index
    }

    /// Offset (em bytes) logo após o último caractere do token.
    pub fn end_char_index(&self) -> usize {
        self.end_char_index
    }

    /// Texto da sentença-mãe, se ela ainda estiver viva.
    pub fn parent_text(&self) -> Option<Rc<String>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }
}

/// Anotação ancorada em um intervalo contíguo de tokens.
///
/// O span cobre do token `start` ao token `end` (ambos inclusos). Se apenas
/// um token for dado na construção, o span colapsa para esse token.
///
/// O texto coberto é derivado sob demanda a partir dos offsets das âncoras,
/// nunca armazenado — ver [`text`].
///
/// [`text`]: TokenSpan::text
#[derive(Debug, Clone)]
pub struct TokenSpan {
    ann: Annotation,
    start: TokenAnchor,
    end: TokenAnchor,
}

impl TokenSpan {
    /// Cria um span de `start` até `end` (inclusivo).
    ///
    /// `end` omitido colapsa o span para o próprio `start`. Falha com
    /// [`ModelError::OutOfRange`] se `end.index < start.index`.
    pub fn new(
        value: impl Into<String>,
        start: &Token,
        end: Option<&Token>,
        score: Option<f64>,
    ) -> Result<Self, ModelError> {
        let start = TokenAnchor::of(start);
        let end = match end {
            Some(token) => TokenAnchor::of(token),
            None => start.clone(),
        };
        if end.index < start.index {
            return Err(ModelError::OutOfRange { index: end.index, limit: start.index });
        }
        let ann = match score {
            Some(s) => Annotation::with_score(value, s),
            None => Annotation::new(value),
        };
        Ok(Self { ann, start, end })
    }

    /// O valor da anotação do span.
    pub fn value(&self) -> &str {
        self.ann.value()
    }

    /// O score de confiança, se houver.
    pub fn score(&self) -> Option<f64> {
        self.ann.score()
    }

    /// A anotação subjacente (valor, score e campos extras).
    pub fn annotation(&self) -> &Annotation {
        &self.ann
    }

    /// Âncora do primeiro token coberto.
    pub fn start(&self) -> &TokenAnchor {
        &self.start
    }

    /// Âncora do último token coberto.
    pub fn end(&self) -> &TokenAnchor {
        &self.end
    }

    /// Índice do primeiro token coberto.
    pub fn start_index(&self) -> usize {
        self.start.index()
    }

    /// Índice do último token coberto (inclusivo).
    pub fn end_index(&self) -> usize {
        self.end.index()
    }

    /// Lê um campo do span.
    ///
    /// Além de `"value"`, as chaves reservadas `"start"` e `"end"` reportam
    /// os índices dos tokens âncora.
    pub fn get(&self, key: &str) -> Result<Value, ModelError> {
        match key {
            START_KEY => Ok(Value::from(self.start.index() as u64)),
            END_KEY => Ok(Value::from(self.end.index() as u64)),
            _ => self.ann.get(key),
        }
    }

    /// Insere ou sobrescreve um campo extra.
    ///
    /// `"value"`, `"start"` e `"end"` são reservadas e rejeitadas com
    /// [`ModelError::InvalidField`].
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Result<(), ModelError> {
        let key = key.into();
        if key == START_KEY || key == END_KEY {
            return Err(ModelError::InvalidField { key });
        }
        self.ann.set(key, value)
    }

    /// O trecho do texto da sentença-mãe coberto pelo span.
    ///
    /// Recorta do `char_index` do primeiro token ao `end_char_index` do
    /// último. Falha com [`ModelError::DetachedSpan`] se a sentença-mãe não
    /// for mais resolvível (tokens desanexados ou sentença já destruída).
    pub fn text(&self) -> Result<String, ModelError> {
        let parent = self.start.parent_text().ok_or(ModelError::DetachedSpan)?;
        Ok(parent[self.start.char_index()..self.end.end_char_index()].to_string())
    }
}

/// Uma anotação anexada a um token, nas duas formas possíveis.
///
/// O conjunto é fechado de propósito: um rótulo de token ou é uma anotação
/// simples ou é um span multi-token. Clonar um `Label` clona apenas o
/// handle (`Rc`), preservando a identidade do objeto compartilhado.
#[derive(Debug, Clone)]
pub enum Label {
    /// Anotação simples, própria do token.
    Plain(Rc<Annotation>),
    /// Span compartilhado por todos os tokens cobertos.
    Span(Rc<TokenSpan>),
}

impl Label {
    /// O valor da anotação, qualquer que seja a forma.
    pub fn value(&self) -> &str {
        match self {
            Label::Plain(ann) => ann.value(),
            Label::Span(span) => span.value(),
        }
    }

    /// O score de confiança, se houver.
    pub fn score(&self) -> Option<f64> {
        match self {
            Label::Plain(ann) => ann.score(),
            Label::Span(span) => span.score(),
        }
    }

    /// Acesso à anotação simples, se for o caso.
    pub fn as_plain(&self) -> Option<&Rc<Annotation>> {
        match self {
            Label::Plain(ann) => Some(ann),
            Label::Span(_) => None,
        }
    }

    /// Acesso ao span, se for o caso.
    pub fn as_span(&self) -> Option<&Rc<TokenSpan>> {
        match self {
            Label::Span(span) => Some(span),
            Label::Plain(_) => None,
        }
    }

    /// Verifica se o rótulo é um span multi-token.
    pub fn is_span(&self) -> bool {
        matches!(self, Label::Span(_))
    }
}

impl From<Annotation> for Label {
    fn from(ann: Annotation) -> Self {
        Label::Plain(Rc::new(ann))
    }
}

impl From<TokenSpan> for Label {
    fn from(span: TokenSpan) -> Self {
        Label::Span(Rc::new(span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_is_protected() {
        let ann = Annotation::new("PER");
        assert!(matches!(
            ann.set("value", "outra coisa"),
            Err(ModelError::InvalidField { .. })
        ));

        let mut fields = HashMap::new();
        fields.insert("value".to_string(), Value::from("x"));
        assert!(matches!(
            Annotation::with_fields("PER", None, fields),
            Err(ModelError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_get_value_always_returns_attribute() {
        let ann = Annotation::with_score("LOC", 0.85);
        ann.set("fonte", "gazetteer").unwrap();
        ann.set("revisado", true).unwrap();

        assert_eq!(ann.get("value").unwrap(), Value::from("LOC"));
        assert_eq!(ann.get("fonte").unwrap(), Value::from("gazetteer"));
        assert_eq!(ann.score(), Some(0.85));
    }

    #[test]
    fn test_missing_field() {
        let ann = Annotation::new("x");
        assert!(matches!(
            ann.get("inexistente"),
            Err(ModelError::MissingField { .. })
        ));
    }

    #[test]
    fn test_set_overwrites_existing_field() {
        let ann = Annotation::new("x");
        ann.set("n", 1).unwrap();
        ann.set("n", 2).unwrap();
        assert_eq!(ann.get("n").unwrap(), Value::from(2));
    }

    #[test]
    fn test_span_collapses_to_single_token() {
        let token = Token::detached("fox");
        let span = TokenSpan::new("animal", &token, None, None).unwrap();
        assert_eq!(span.start_index(), span.end_index());
    }

    #[test]
    fn test_detached_span_has_no_text() {
        let token = Token::detached("fox");
        let span = TokenSpan::new("animal", &token, None, None).unwrap();
        assert!(matches!(span.text(), Err(ModelError::DetachedSpan)));
    }

    #[test]
    fn test_span_reserved_keys() {
        let token = Token::detached("fox");
        let span = TokenSpan::new("animal", &token, None, Some(0.5)).unwrap();

        assert_eq!(span.get("start").unwrap(), Value::from(0u64));
        assert_eq!(span.get("end").unwrap(), Value::from(0u64));
        assert!(matches!(span.set("start", 3), Err(ModelError::InvalidField { .. })));
        assert!(matches!(span.set("value", "x"), Err(ModelError::InvalidField { .. })));
        span.set("fonte", "manual").unwrap();
        assert_eq!(span.get("fonte").unwrap(), Value::from("manual"));
    }

    #[test]
    fn test_label_preserves_identity() {
        let token = Token::detached("fox");
        let span = Rc::new(TokenSpan::new("animal", &token, None, None).unwrap());
        let a = Label::Span(Rc::clone(&span));
        let b = a.clone();
        assert!(Rc::ptr_eq(a.as_span().unwrap(), b.as_span().unwrap()));
    }
}
