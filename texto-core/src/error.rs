//! # Erros do Modelo Textual
//!
//! Todas as operações falíveis do crate retornam [`ModelError`].
//! Não há retentativas em nenhum ponto: cada erro é uma falha local e
//! imediata, reportada diretamente ao chamador.
//!
//! | Variante             | Quando ocorre                                              |
//! |----------------------|------------------------------------------------------------|
//! | `InvalidField`       | Tentativa de escrever uma chave reservada de anotação      |
//! | `MissingField`       | Leitura de um campo inexistente em uma anotação            |
//! | `MissingLabel`       | Leitura de um rótulo inexistente em um token               |
//! | `MissingAnnotation`  | Chave não anotada nem na sentença nem em token algum       |
//! | `OutOfRange`         | Offset ou intervalo de índices fora dos limites válidos    |
//! | `DetachedSpan`       | `TokenSpan::text` sobre tokens sem sentença-mãe resolvível |
//! | `TokenAlignment`     | Token do backend não localizável no texto original         |
//! | `Backend`            | Falha do serviço externo de segmentação/tokenização        |

use crate::backend::BackendError;

/// Erro de qualquer operação do modelo textual.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A chave é reservada e não pode ser escrita pelo mapa de campos.
    InvalidField { key: String },
    /// O campo não existe na anotação.
    MissingField { key: String },
    /// O rótulo não existe no token.
    MissingLabel { key: String },
    /// A chave não está anotada na sentença nem em nenhum de seus tokens.
    MissingAnnotation { key: String },
    /// Offset de caractere ou índice de token fora do intervalo válido.
    OutOfRange { index: usize, limit: usize },
    /// O span referencia tokens sem sentença-mãe viva.
    DetachedSpan,
    /// O tokenizador emitiu um token que não ocorre no sufixo ainda não
    /// varrido do texto original (violação do contrato do backend).
    TokenAlignment { token: String, offset: usize },
    /// Falha do backend NLP, propagada sem tradução. Fatal para a
    /// construção em andamento: nenhuma sentença parcial fica observável.
    Backend(BackendError),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InvalidField { key } => {
                write!(f, "'{}' é uma chave reservada e não pode ser sobrescrita", key)
            }
            ModelError::MissingField { key } => {
                write!(f, "campo '{}' não existe nesta anotação", key)
            }
            ModelError::MissingLabel { key } => {
                write!(f, "rótulo '{}' não existe neste token", key)
            }
            ModelError::MissingAnnotation { key } => {
                write!(f, "'{}' não é uma anotação desta sentença", key)
            }
            ModelError::OutOfRange { index, limit } => {
                write!(f, "índice {} fora do intervalo válido (limite {})", index, limit)
            }
            ModelError::DetachedSpan => {
                write!(f, "o span não possui sentença-mãe resolvível")
            }
            ModelError::TokenAlignment { token, offset } => {
                write!(
                    f,
                    "token '{}' não encontrado no texto a partir do offset {}",
                    token, offset
                )
            }
            ModelError::Backend(err) => write!(f, "falha do backend NLP: {}", err),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BackendError> for ModelError {
    fn from(err: BackendError) -> Self {
        ModelError::Backend(err)
    }
}
