//! # Lista de Decisão — Ranqueamento por Log-Verossimilhança
//!
//! O modelo aprendido é uma lista ordenada de regras. Cada condição
//! observada no treino vira uma regra pontuada pela razão logarítmica das
//! probabilidades suavizadas dos dois sentidos:
//!
//! $$ L = \log_2 \frac{P(s_a \mid c)}{P(s_b \mid c)} $$
//!
//! Convenção de sinal: $L > 0$ prediz `sense_a`; $L \le 0$ prediz `sense_b`
//! (o empate exato em zero vai para o segundo sentido — comportamento de
//! referência, preservado deliberadamente). As regras são ordenadas por
//! $|L|$ decrescente com desempate estável pela ordem de descoberta, o que
//! determina qual de várias regras igualmente fortes dispara primeiro na
//! inferência.

use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::WsdError;
use crate::estimator::{ProbabilityTable, SensePair};

/// A chave de uma regra: "o token na posição `offset` relativa à
/// palavra-alvo é igual a `word`".
///
/// Renderizada textualmente como `"<offset>_word_<word>"` no artefato
/// persistido (ex: `-1_word_telephone`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
    pub offset: i32,
    pub word: String,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_word_{}", self.offset, self.word)
    }
}

/// Uma regra ranqueada, imutável após o treino.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRule {
    pub condition: Condition,
    pub log_likelihood: f64,
    pub predicted_sense: String,
}

/// A lista de decisão completa: uma entrada por condição observada no
/// treino, em ordem de força decrescente. Condições jamais observadas não
/// aparecem e portanto nunca disparam.
///
/// Depois de construída a lista é somente leitura — pode ser compartilhada
/// livremente entre quantas chamadas de inferência forem necessárias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionList {
    rules: Vec<RankedRule>,
}

impl DecisionList {
    /// Constrói a lista ranqueada a partir da tabela de probabilidades.
    pub fn rank(probabilities: &ProbabilityTable, senses: &SensePair) -> Self {
        let mut rules: Vec<RankedRule> = probabilities
            .iter()
            .map(|(condition, probs)| {
                let log_likelihood = log_likelihood(probs.sense_a, probs.sense_b);
                let predicted_sense = if log_likelihood > 0.0 {
                    senses.sense_a.clone()
                } else {
                    senses.sense_b.clone()
                };
                RankedRule {
                    condition: condition.clone(),
                    log_likelihood,
                    predicted_sense,
                }
            })
            .collect();

        // sort_by é estável: empates em |L| preservam a ordem de descoberta
        rules.sort_by(|x, y| {
            y.log_likelihood
                .abs()
                .partial_cmp(&x.log_likelihood.abs())
                .unwrap_or(Ordering::Equal)
        });

        Self { rules }
    }

    /// As regras em ordem de aplicação (força decrescente).
    pub fn rules(&self) -> &[RankedRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Renderiza o artefato textual persistido: uma linha por regra, no
    /// formato `['<offset>_word_<palavra>', <log-verossimilhança>, '<sentido>']`.
    ///
    /// Além de artefato de treino, o arquivo é uma explicação inspecionável
    /// do modelo: as regras mais fortes aparecem primeiro.
    pub fn render_lines(&self) -> String {
        let mut out = String::new();
        for rule in &self.rules {
            out.push_str(&format!(
                "['{}', {}, '{}']\n",
                rule.condition, rule.log_likelihood, rule.predicted_sense
            ));
        }
        out
    }

    /// Grava o artefato textual em disco. Falha de escrita é fatal.
    pub fn write_to(&self, path: &Path) -> Result<(), WsdError> {
        fs::write(path, self.render_lines()).map_err(|e| WsdError::io(path, e))
    }
}

/// Razão logarítmica (base 2) entre as probabilidades dos dois sentidos.
///
/// Sob a suavização de Lidstone nenhuma das probabilidades é zero; ainda
/// assim, uma razão degenerada (numerador ou denominador nulo) é mapeada
/// defensivamente para "sem sinal" (zero), nunca para um erro de divisão.
fn log_likelihood(prob_a: f64, prob_b: f64) -> f64 {
    if prob_a <= 0.0 || prob_b <= 0.0 {
        return 0.0;
    }
    (prob_a / prob_b).log2()
}
