//! # Corpus — Coleção Heterogênea de Entidades
//!
//! Um [`Corpus`] é uma sequência ordenada de entidades textuais — sentenças
//! avulsas ou documentos inteiros — sob um identificador opcional.
//!
//! ## Posse compartilhada
//!
//! A concatenação de corpora **não copia** as entidades filhas: o corpus
//! resultante referencia exatamente os mesmos objetos dos operandos. Por
//! isso os itens circulam como handles contados por referência
//! (`Rc<RefCell<_>>`): os corpora de origem continuam válidos depois da
//! concatenação e qualquer anotação feita através de um deles é visível
//! pelos demais.

use std::cell::RefCell;
use std::rc::Rc;

use crate::document::Document;
use crate::sentence::Sentence;
use crate::token::TextualEntity;

/// Uma entidade que pode viver em um corpus.
///
/// Conjunto fechado de propósito: apenas sentenças e documentos aparecem em
/// corpora. Clonar uma `Entity` clona o handle, não os dados.
#[derive(Debug, Clone)]
pub enum Entity {
    /// Uma sentença avulsa.
    Sentence(Rc<RefCell<Sentence>>),
    /// Um documento completo.
    Document(Rc<RefCell<Document>>),
}

impl Entity {
    /// O texto da entidade (cópia, pois o handle é compartilhado).
    pub fn text(&self) -> String {
        match self {
            Entity::Sentence(s) => s.borrow().text().to_string(),
            Entity::Document(d) => d.borrow().text().to_string(),
        }
    }

    /// Acesso ao handle de sentença, se for o caso.
    pub fn as_sentence(&self) -> Option<&Rc<RefCell<Sentence>>> {
        match self {
            Entity::Sentence(s) => Some(s),
            Entity::Document(_) => None,
        }
    }

    /// Acesso ao handle de documento, se for o caso.
    pub fn as_document(&self) -> Option<&Rc<RefCell<Document>>> {
        match self {
            Entity::Document(d) => Some(d),
            Entity::Sentence(_) => None,
        }
    }

    /// Verifica se duas entidades são o **mesmo objeto** (não só iguais).
    pub fn ptr_eq(&self, other: &Entity) -> bool {
        match (self, other) {
            (Entity::Sentence(a), Entity::Sentence(b)) => Rc::ptr_eq(a, b),
            (Entity::Document(a), Entity::Document(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Sentence> for Entity {
    fn from(sentence: Sentence) -> Self {
        Entity::Sentence(Rc::new(RefCell::new(sentence)))
    }
}

impl From<Document> for Entity {
    fn from(document: Document) -> Self {
        Entity::Document(Rc::new(RefCell::new(document)))
    }
}

/// Uma coleção ordenada de entidades com identificador opcional.
#[derive(Debug, Default)]
pub struct Corpus {
    id: Option<String>,
    items: Vec<Entity>,
}

impl Corpus {
    /// Cria um corpus vazio e sem identificador.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cria um corpus vazio com identificador.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            items: Vec::new(),
        }
    }

    /// Identificador do corpus, se houver.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Anexa uma entidade ao final da coleção.
    pub fn add(&mut self, item: impl Into<Entity>) {
        self.items.push(item.into());
    }

    /// Número de entidades do corpus.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Verifica se o corpus está vazio.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// A entidade na posição `index`.
    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.items.get(index)
    }

    /// Itera sobre as entidades em ordem.
    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.items.iter()
    }

    /// Concatena dois corpora em um novo, sem mutar os operandos.
    ///
    /// O identificador do resultado é `"a + b"` quando ambos os operandos
    /// têm id; se qualquer um não tiver, o resultado fica sem id. Os itens
    /// são os mesmos objetos dos operandos, na ordem `self` depois `other`.
    pub fn concat(&self, other: &Corpus) -> Corpus {
        let id = match (&self.id, &other.id) {
            (Some(a), Some(b)) => Some(format!("{} + {}", a, b)),
            _ => None,
        };
        let items = self
            .items
            .iter()
            .cloned()
            .chain(other.items.iter().cloned())
            .collect();
        Corpus { id, items }
    }
}

impl std::fmt::Display for Corpus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Corpus: {} ({} items)",
            self.id.as_deref().unwrap_or(""),
            self.items.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RuleBackend;

    fn sentence(text: &str) -> Sentence {
        Sentence::new(text, 0, &RuleBackend::new()).unwrap()
    }

    fn corpus(id: &str, texts: &[&str]) -> Corpus {
        let mut c = Corpus::with_id(id);
        for text in texts {
            c.add(sentence(text));
        }
        c
    }

    #[test]
    fn test_concat_lengths_and_order() {
        let c1 = corpus("c1", &["First one.", "Second one."]);
        let c2 = corpus("c2", &["Third one."]);
        let joined = c1.concat(&c2);

        assert_eq!(joined.len(), c1.len() + c2.len());
        assert!(joined.get(0).unwrap().ptr_eq(c1.get(0).unwrap()));
        assert!(joined.get(2).unwrap().ptr_eq(c2.get(0).unwrap()));
        // operandos intactos
        assert_eq!(c1.len(), 2);
        assert_eq!(c2.len(), 1);
    }

    #[test]
    fn test_concat_ids() {
        let c1 = corpus("c1", &["One."]);
        let c2 = corpus("c2", &["Two."]);
        assert_eq!(c1.concat(&c2).id(), Some("c1 + c2"));

        let anon = {
            let mut c = Corpus::new();
            c.add(sentence("Three."));
            c
        };
        assert_eq!(c1.concat(&anon).id(), None);
        assert_eq!(anon.concat(&c2).id(), None);
    }

    #[test]
    fn test_shared_mutation_is_visible_everywhere() {
        let c1 = corpus("c1", &["The dog barked."]);
        let c2 = corpus("c2", &["The cat ran."]);
        let joined = c1.concat(&c2);

        // anota através do corpus concatenado...
        let handle = joined.get(0).unwrap().as_sentence().unwrap();
        handle
            .borrow_mut()
            .add_span_annotation("ent", "animal", 1, 2, None)
            .unwrap();

        // ...e a anotação aparece pelo corpus original
        let original = c1.get(0).unwrap().as_sentence().unwrap();
        assert!(original.borrow().has_annotation("ent"));
    }

    #[test]
    fn test_heterogeneous_items() {
        let mut c = Corpus::with_id("misto");
        c.add(sentence("A sentence."));
        c.add(
            Document::from_text("A document. With two sentences.", &RuleBackend::new()).unwrap(),
        );

        assert_eq!(c.len(), 2);
        assert!(c.get(0).unwrap().as_sentence().is_some());
        assert!(c.get(1).unwrap().as_document().is_some());
    }

    #[test]
    fn test_display() {
        let c = corpus("meu-corpus", &["One."]);
        assert_eq!(c.to_string(), "Corpus: meu-corpus (1 items)");
    }
}
