//! # Estimador de Frequências e Probabilidades
//!
//! Fase de contagem do treinamento supervisionado:
//!
//! 1. **Contagem**: para cada instância de treino e cada offset da janela,
//!    extrai a palavra de contexto e incrementa o contador da condição
//!    `(offset, palavra)` para o sentido anotado.
//! 2. **Suavização (Lidstone)**: converte contagens em probabilidades
//!    condicionais suavizadas, garantindo que nenhuma probabilidade seja
//!    zero (o que inviabilizaria a razão de verossimilhança).
//!
//! $$ P(s \mid c) = \frac{count(c, s) + k}{count(c) + k \cdot 2} $$
//!
//! A tabela de frequências é um acumulador explícito, passado e consumido
//! pelo chamador — não há estado global mutável. Ela também registra a
//! **ordem de descoberta** das condições: o ranqueamento desempata condições
//! de mesma força preservando essa ordem, e iteração de `HashMap` não é
//! determinística por si só.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::context::word_at;
use crate::corpus::Instance;
use crate::decision_list::Condition;
use crate::error::WsdError;

/// O par de rótulos de sentido do problema binário.
///
/// Resolvido uma única vez a partir do conjunto de rótulos observado no
/// treino, em ordem lexicográfica — para a tarefa de referência isso dá
/// `sense_a = "phone"` e `sense_b = "product"`, a convenção de sinal usual
/// da literatura. Carregado como parâmetro explícito em vez de literais
/// embutidos na lógica de comparação.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensePair {
    pub sense_a: String,
    pub sense_b: String,
}

impl SensePair {
    /// Resolve o par de sentidos a partir das instâncias de treino.
    ///
    /// Falha se o corpus não contiver exatamente dois rótulos distintos —
    /// o classificador é estritamente binário.
    pub fn from_instances(instances: &[Instance]) -> Result<Self, WsdError> {
        let labels: BTreeSet<&str> = instances
            .iter()
            .filter_map(|i| i.sense.as_deref())
            .collect();
        let found: Vec<String> = labels.into_iter().map(str::to_string).collect();

        match <[String; 2]>::try_from(found) {
            Ok([sense_a, sense_b]) => Ok(Self { sense_a, sense_b }),
            Err(found) => Err(WsdError::SenseInventory { found }),
        }
    }

    /// Verifica se o rótulo pertence ao par.
    pub fn contains(&self, sense: &str) -> bool {
        sense == self.sense_a || sense == self.sense_b
    }
}

/// Contagens de uma condição, uma por sentido.
#[derive(Debug, Clone, Copy, Default)]
struct SenseCounts {
    sense_a: u32,
    sense_b: u32,
}

impl SenseCounts {
    fn total(&self) -> u32 {
        self.sense_a + self.sense_b
    }
}

/// Acumulador de frequências condicionais, construído e destruído dentro do
/// treinamento.
#[derive(Debug)]
pub struct FrequencyTable {
    senses: SensePair,
    /// Ordem de descoberta das condições (primeira observação).
    order: Vec<Condition>,
    counts: HashMap<Condition, SenseCounts>,
}

impl FrequencyTable {
    pub fn new(senses: SensePair) -> Self {
        Self {
            senses,
            order: Vec::new(),
            counts: HashMap::new(),
        }
    }

    /// Observa todas as instâncias de treino para um único offset da janela.
    ///
    /// Instâncias sem feature neste offset (contexto fora da sentença ou
    /// alvo ausente) simplesmente não contribuem. Sentidos fora do par são
    /// reportados e excluídos da contagem.
    pub fn observe_offset(&mut self, instances: &[Instance], target: &str, offset: i32) {
        for instance in instances {
            let Some(sense) = instance.sense.as_deref() else {
                continue;
            };
            if !self.senses.contains(sense) {
                warn!(
                    instance = %instance.id,
                    sense,
                    "sentido fora do inventário binário; instância excluída da contagem"
                );
                continue;
            }
            let Some(word) = word_at(offset, &instance.tokens, target) else {
                continue;
            };

            let condition = Condition {
                offset,
                word: word.to_string(),
            };
            let is_sense_a = sense == self.senses.sense_a;
            let counts = match self.counts.entry(condition) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    self.order.push(entry.key().clone());
                    entry.insert(SenseCounts::default())
                }
            };
            if is_sense_a {
                counts.sense_a += 1;
            } else {
                counts.sense_b += 1;
            }
        }
    }

    /// Observa todos os offsets, na ordem fornecida (a ordem de referência é
    /// `1, -1, 2, -2, ...` — ver [`crate::config::WsdConfig::offsets`]).
    pub fn observe_all(&mut self, instances: &[Instance], target: &str, offsets: &[i32]) {
        for &offset in offsets {
            self.observe_offset(instances, target, offset);
        }
    }

    /// Número de condições distintas observadas.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Contagem crua de uma condição para um sentido (para inspeção/testes).
    pub fn count(&self, condition: &Condition, sense: &str) -> u32 {
        let Some(counts) = self.counts.get(condition) else {
            return 0;
        };
        if sense == self.senses.sense_a {
            counts.sense_a
        } else if sense == self.senses.sense_b {
            counts.sense_b
        } else {
            0
        }
    }

    /// Converte as contagens em probabilidades suavizadas, consumindo a
    /// tabela de frequências (ela não é mais necessária após o treino).
    pub fn into_probabilities(self, smoothing: f64) -> ProbabilityTable {
        let probs = self
            .counts
            .into_iter()
            .map(|(condition, counts)| {
                let total = f64::from(counts.total());
                // Suavização aditiva com dois sentidos no denominador
                let denom = total + smoothing * 2.0;
                let entry = SenseProbs {
                    sense_a: (f64::from(counts.sense_a) + smoothing) / denom,
                    sense_b: (f64::from(counts.sense_b) + smoothing) / denom,
                };
                (condition, entry)
            })
            .collect();

        ProbabilityTable {
            order: self.order,
            probs,
        }
    }
}

/// Probabilidades suavizadas de uma condição, uma por sentido.
#[derive(Debug, Clone, Copy)]
pub struct SenseProbs {
    pub sense_a: f64,
    pub sense_b: f64,
}

/// Tabela de probabilidades condicionais: derivada da tabela de frequências
/// ao fim do treino e somente lida a partir daí.
#[derive(Debug)]
pub struct ProbabilityTable {
    order: Vec<Condition>,
    probs: HashMap<Condition, SenseProbs>,
}

impl ProbabilityTable {
    /// Itera as condições na ordem de descoberta do treino, com suas
    /// probabilidades.
    pub fn iter(&self) -> impl Iterator<Item = (&Condition, SenseProbs)> {
        self.order.iter().map(move |condition| {
            let probs = self
                .probs
                .get(condition)
                .copied()
                .unwrap_or(SenseProbs { sense_a: 0.0, sense_b: 0.0 });
            (condition, probs)
        })
    }

    pub fn get(&self, condition: &Condition) -> Option<SenseProbs> {
        self.probs.get(condition).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(id: &str, sense: &str, words: &[&str]) -> Instance {
        Instance {
            id: id.to_string(),
            sense: Some(sense.to_string()),
            tokens: words.iter().map(|w| w.to_string()).collect(),
        }
    }

    fn pair() -> SensePair {
        SensePair {
            sense_a: "phone".to_string(),
            sense_b: "product".to_string(),
        }
    }

    #[test]
    fn test_sense_pair_resolved_lexicographically() {
        let instances = vec![
            instance("1", "product", &["line"]),
            instance("2", "phone", &["line"]),
        ];
        let senses = SensePair::from_instances(&instances).expect("dois sentidos");
        assert_eq!(senses.sense_a, "phone");
        assert_eq!(senses.sense_b, "product");
    }

    #[test]
    fn test_sense_pair_rejects_single_label() {
        let instances = vec![instance("1", "phone", &["line"])];
        assert!(matches!(
            SensePair::from_instances(&instances),
            Err(WsdError::SenseInventory { .. })
        ));
    }

    #[test]
    fn test_sense_pair_rejects_three_labels() {
        let instances = vec![
            instance("1", "phone", &["line"]),
            instance("2", "product", &["line"]),
            instance("3", "cord", &["line"]),
        ];
        assert!(matches!(
            SensePair::from_instances(&instances),
            Err(WsdError::SenseInventory { found }) if found.len() == 3
        ));
    }

    #[test]
    fn test_observe_counts_telephone_before_line_as_phone() {
        // Cenário de referência: "telephone" imediatamente antes de "line"
        // numa instância com sentido "phone" gera a condição (-1, telephone)
        let instances = vec![instance(
            "1",
            "phone",
            &["telephone", "line", "went", "dead"],
        )];
        let mut table = FrequencyTable::new(pair());
        table.observe_offset(&instances, "line", -1);

        let condition = Condition { offset: -1, word: "telephone".to_string() };
        assert_eq!(table.count(&condition, "phone"), 1);
        assert_eq!(table.count(&condition, "product"), 0);
    }

    #[test]
    fn test_out_of_window_contributes_nothing() {
        let instances = vec![instance("1", "phone", &["line"])];
        let mut table = FrequencyTable::new(pair());
        table.observe_all(&instances, "line", &[1, -1, 2, -2]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_smoothing_never_yields_zero_probability() {
        let instances = vec![instance(
            "1",
            "phone",
            &["telephone", "line"],
        )];
        let mut table = FrequencyTable::new(pair());
        table.observe_offset(&instances, "line", -1);
        let probs = table.into_probabilities(0.1);

        let condition = Condition { offset: -1, word: "telephone".to_string() };
        let p = probs.get(&condition).expect("condição observada");
        // (1 + 0.1) / (1 + 0.2) e (0 + 0.1) / (1 + 0.2)
        assert!((p.sense_a - 1.1 / 1.2).abs() < 1e-12);
        assert!((p.sense_b - 0.1 / 1.2).abs() < 1e-12);
        assert!(p.sense_b > 0.0);
        assert!(p.sense_a > p.sense_b);
    }

    #[test]
    fn test_discovery_order_is_preserved() {
        let instances = vec![
            instance("1", "phone", &["aaa", "line", "zzz"]),
            instance("2", "product", &["bbb", "line", "yyy"]),
        ];
        let mut table = FrequencyTable::new(pair());
        // ordem de referência: +1 antes de -1
        table.observe_all(&instances, "line", &[1, -1]);
        let probs = table.into_probabilities(0.1);

        let order: Vec<String> =
            probs.iter().map(|(c, _)| c.to_string()).collect();
        assert_eq!(
            order,
            vec!["1_word_zzz", "1_word_yyy", "-1_word_aaa", "-1_word_bbb"]
        );
    }
}
