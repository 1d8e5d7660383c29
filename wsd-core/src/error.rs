//! # Erros do Pipeline WSD
//!
//! O núcleo algorítmico (normalização, extração de contexto, ranqueamento,
//! predição) é total e infalível por contrato. Só são faláveis as bordas:
//! leitura/escrita de arquivos, violações do formato de resposta e um
//! inventário de sentidos inconsistente no corpus de treino.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsdError {
    /// Corpus ilegível ou saída não gravável: fatal, aborta a execução.
    #[error("falha de E/S em {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// O corpus de treino não produziu nenhuma instância anotada.
    #[error("corpus de treino sem instâncias anotadas")]
    EmptyTrainingCorpus,

    /// O classificador é estritamente binário: o treino deve observar
    /// exatamente dois rótulos de sentido distintos.
    #[error("esperava exatamente dois sentidos no corpus de treino, encontrados {found:?}")]
    SenseInventory { found: Vec<String> },

    /// Linha que não casa com o contrato textual
    /// `<answer instance="..." senseid="..."/>`.
    #[error("linha de resposta malformada: {line:?}")]
    MalformedAnswerLine { line: String },

    /// Instância presente na saída do sistema mas ausente no gabarito.
    #[error("instância {id:?} ausente no gabarito")]
    MissingGoldInstance { id: String },

    /// Falha de (de)serialização do modelo persistido em JSON.
    #[error("falha ao serializar/deserializar o modelo: {0}")]
    Model(#[from] serde_json::Error),
}

impl WsdError {
    /// Anexa o caminho ao erro de E/S subjacente.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
