//! # wsd-core — Desambiguação de Sentido de Palavras por Lista de Decisão
//!
//! Este crate implementa um classificador supervisionado de desambiguação de
//! sentido (WSD, *Word Sense Disambiguation*) para uma palavra ambígua com
//! exatamente dois sentidos, no estilo clássico das listas de decisão de
//! Yarowsky. Ele foi projetado para ser didático e modular: cada estágio do
//! pipeline é um módulo independente e puro sempre que possível.
//!
//! ## Arquitetura do Sistema
//!
//! O sistema segue uma arquitetura de pipeline linear em lote:
//!
//! 1.  **Entrada** ([`corpus`]): documento de marcação com instâncias
//!     anotadas (treino) ou não anotadas (teste).
//! 2.  **Normalização** ([`normalizer`]): minúsculas, fusão da variante da
//!     palavra-alvo, remoção de pontuação e stop words.
//! 3.  **Features de Contexto** ([`context`]): identidade da palavra em cada
//!     offset assinado da janela ±N ao redor da palavra-alvo.
//! 4.  **Estimação** ([`estimator`]): contagens condicionais por
//!     `(offset, palavra)` e sentido, suavizadas por Lidstone.
//! 5.  **Ranqueamento** ([`decision_list`]): regras ordenadas pela
//!     log-verossimilhança (razão das probabilidades dos dois sentidos).
//! 6.  **Inferência** ([`classifier`]): primeira regra que casa vence, com
//!     fallback no sentido majoritário do treino.
//! 7.  **Avaliação** ([`scorer`]): acurácia, baseline e matriz de confusão
//!     sobre o contrato textual de linhas de resposta.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use wsd_core::{CorpusReader, WsdConfig, WsdModel};
//!
//! let config = WsdConfig::default(); // tarefa "line": phone vs product
//! let reader = CorpusReader::new(&config);
//!
//! let training = reader.parse(r#"
//! <instance id="a">
//! <answer instance="a" senseid="phone"/>
//! <context><s> the telephone <head>line</head> went dead </s></context>
//! </instance>
//! <instance id="b">
//! <answer instance="b" senseid="product"/>
//! <context><s> a new <head>line</head> of computers </s></context>
//! </instance>
//! "#);
//!
//! let model = WsdModel::train(&training, config).expect("dois sentidos no treino");
//!
//! let test = reader.parse(r#"
//! <instance id="x">
//! <context><s> the telephone <head>line</head> rang </s></context>
//! </instance>
//! "#);
//! for line in model.predict_corpus(&test) {
//!     println!("{line}"); // <answer instance="x" senseid="phone"/>
//! }
//! ```

pub mod classifier;
pub mod config;
pub mod context;
pub mod corpus;
pub mod decision_list;
pub mod error;
pub mod estimator;
pub mod normalizer;
pub mod pipeline;
pub mod scorer;

pub use classifier::{majority_sense, predict};
pub use config::WsdConfig;
pub use context::word_at;
pub use corpus::{CorpusReader, Instance};
pub use decision_list::{Condition, DecisionList, RankedRule};
pub use error::WsdError;
pub use estimator::{FrequencyTable, ProbabilityTable, SensePair};
pub use normalizer::Normalizer;
pub use pipeline::{answer_line, write_answers, WsdModel};
pub use scorer::{parse_answer_lines, score, score_files, ScoreReport};
