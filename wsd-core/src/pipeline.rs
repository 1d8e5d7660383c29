//! # Pipeline WSD — Orquestrador de Treino e Inferência
//!
//! Conecta todos os estágios em uma passada única e síncrona:
//!
//! 1. **Treino**: instâncias anotadas → tabela de frequências (uma passada
//!    por offset da janela) → probabilidades suavizadas → lista de decisão
//!    ranqueada + sentido majoritário.
//! 2. **Inferência**: cada instância de teste é classificada de forma
//!    independente contra a lista (imutável e compartilhável).
//!
//! O resultado do treino é um [`WsdModel`] serializável: além do artefato
//! textual da lista de decisão (explicação inspecionável), o modelo inteiro
//! pode ser persistido e recarregado em JSON.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classifier::{majority_sense, predict};
use crate::config::WsdConfig;
use crate::corpus::Instance;
use crate::decision_list::DecisionList;
use crate::error::WsdError;
use crate::estimator::{FrequencyTable, SensePair};

/// O modelo treinado completo: configuração, par de sentidos, sentido
/// majoritário de fallback e a lista de decisão ranqueada.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsdModel {
    pub config: WsdConfig,
    pub senses: SensePair,
    pub majority_sense: String,
    pub decision_list: DecisionList,
}

impl WsdModel {
    /// Treina o modelo a partir das instâncias anotadas.
    ///
    /// O par de sentidos é resolvido a partir dos rótulos observados
    /// (exatamente dois, em ordem lexicográfica). A tabela de frequências é
    /// um acumulador local, consumido ao derivar as probabilidades.
    pub fn train(instances: &[Instance], config: WsdConfig) -> Result<Self, WsdError> {
        if instances.is_empty() {
            return Err(WsdError::EmptyTrainingCorpus);
        }
        let senses = SensePair::from_instances(instances)?;

        let mut frequencies = FrequencyTable::new(senses.clone());
        frequencies.observe_all(instances, &config.target, &config.offsets());
        let conditions = frequencies.len();

        let probabilities = frequencies.into_probabilities(config.smoothing);
        let decision_list = DecisionList::rank(&probabilities, &senses);
        let majority = majority_sense(instances, &senses);

        info!(
            instances = instances.len(),
            conditions,
            majority = %majority,
            "treinamento concluído"
        );

        Ok(Self {
            config,
            senses,
            majority_sense: majority,
            decision_list,
        })
    }

    /// Classifica uma única instância.
    pub fn predict_instance(&self, instance: &Instance) -> String {
        predict(
            &instance.tokens,
            &self.decision_list,
            &self.config.target,
            &self.majority_sense,
        )
    }

    /// Classifica todas as instâncias de teste, na ordem de leitura,
    /// emitindo uma linha de resposta por instância no contrato textual
    /// `<answer instance="<id>" senseid="<sentido>"/>`.
    pub fn predict_corpus(&self, instances: &[Instance]) -> Vec<String> {
        instances
            .iter()
            .map(|instance| answer_line(&instance.id, &self.predict_instance(instance)))
            .collect()
    }

    /// Persiste o modelo completo em JSON (escrita bufferizada).
    pub fn save_json(&self, path: &Path) -> Result<(), WsdError> {
        let file = File::create(path).map_err(|e| WsdError::io(path, e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Recarrega um modelo previamente treinado.
    pub fn load_json(path: &Path) -> Result<Self, WsdError> {
        let file = File::open(path).map_err(|e| WsdError::io(path, e))?;
        let model = serde_json::from_reader(BufReader::new(file))?;
        Ok(model)
    }
}

/// Renderiza uma linha de resposta no contrato consumido pelo avaliador.
pub fn answer_line(id: &str, sense: &str) -> String {
    format!("<answer instance=\"{id}\" senseid=\"{sense}\"/>")
}

/// Grava as linhas de resposta em um arquivo, uma por linha.
pub fn write_answers(path: &Path, answers: &[String]) -> Result<(), WsdError> {
    let mut body = answers.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    fs::write(path, body).map_err(|e| WsdError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(id: &str, sense: Option<&str>, words: &[&str]) -> Instance {
        Instance {
            id: id.to_string(),
            sense: sense.map(str::to_string),
            tokens: words.iter().map(|w| w.to_string()).collect(),
        }
    }

    fn training() -> Vec<Instance> {
        vec![
            instance("t1", Some("phone"), &["telephone", "line", "went", "dead"]),
            instance("t2", Some("phone"), &["access", "line", "busy"]),
            instance("t3", Some("phone"), &["telephone", "line", "rang"]),
            instance("t4", Some("product"), &["new", "line", "computers"]),
            instance("t5", Some("product"), &["car", "line", "sold"]),
        ]
    }

    #[test]
    fn test_train_resolves_senses_and_majority() {
        let model = WsdModel::train(&training(), WsdConfig::default()).expect("treino");
        assert_eq!(model.senses.sense_a, "phone");
        assert_eq!(model.senses.sense_b, "product");
        // 3 phone vs 2 product
        assert_eq!(model.majority_sense, "phone");
        assert!(!model.decision_list.is_empty());
    }

    #[test]
    fn test_predict_corpus_keeps_reading_order_and_contract() {
        let model = WsdModel::train(&training(), WsdConfig::default()).expect("treino");
        let test = vec![
            instance("x1", None, &["telephone", "line", "silent"]),
            instance("x2", None, &["totally", "unseen", "line", "context"]),
        ];
        let answers = model.predict_corpus(&test);
        assert_eq!(answers.len(), 2);
        assert_eq!(
            answers[0],
            "<answer instance=\"x1\" senseid=\"phone\"/>"
        );
        // contexto sem regra aplicável → sentido majoritário, nunca vazio
        assert_eq!(
            answers[1],
            "<answer instance=\"x2\" senseid=\"phone\"/>"
        );
    }

    #[test]
    fn test_training_is_idempotent() {
        let first = WsdModel::train(&training(), WsdConfig::default()).expect("treino");
        let second = WsdModel::train(&training(), WsdConfig::default()).expect("treino");
        // mesmo artefato byte a byte: mesma ordem, mesmos valores
        assert_eq!(
            first.decision_list.render_lines(),
            second.decision_list.render_lines()
        );

        let test = vec![
            instance("x1", None, &["car", "line", "today"]),
            instance("x2", None, &["line"]),
        ];
        assert_eq!(first.predict_corpus(&test), second.predict_corpus(&test));
    }

    #[test]
    fn test_empty_training_set_is_an_error() {
        assert!(matches!(
            WsdModel::train(&[], WsdConfig::default()),
            Err(WsdError::EmptyTrainingCorpus)
        ));
    }

    #[test]
    fn test_model_json_round_trip() {
        let model = WsdModel::train(&training(), WsdConfig::default()).expect("treino");
        let file = tempfile::NamedTempFile::new().expect("arquivo temporário");
        model.save_json(file.path()).expect("gravação");

        let reloaded = WsdModel::load_json(file.path()).expect("leitura");
        assert_eq!(reloaded.majority_sense, model.majority_sense);
        assert_eq!(reloaded.decision_list, model.decision_list);

        let test = vec![instance("x1", None, &["telephone", "line"])];
        assert_eq!(reloaded.predict_corpus(&test), model.predict_corpus(&test));
    }

    #[test]
    fn test_write_answers_one_per_line() {
        let file = tempfile::NamedTempFile::new().expect("arquivo temporário");
        let answers = vec![
            answer_line("a", "phone"),
            answer_line("b", "product"),
        ];
        write_answers(file.path(), &answers).expect("gravação");

        let body = std::fs::read_to_string(file.path()).expect("leitura");
        assert_eq!(
            body,
            "<answer instance=\"a\" senseid=\"phone\"/>\n<answer instance=\"b\" senseid=\"product\"/>\n"
        );
    }
}
