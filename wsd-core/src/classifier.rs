//! # Classificador por Lista de Decisão
//!
//! Inferência: percorre a lista ranqueada na ordem fixa de treino e aplica a
//! **primeira** regra cuja condição vale no contexto da instância — nenhuma
//! regra posterior é consultada. Se nenhuma condição casar, cai no sentido
//! majoritário do treino (estado terminal de fallback).
//!
//! A predição é uma função pura, total e somente leitura: toda sequência de
//! tokens resulta em exatamente um dos dois sentidos; nunca falha.

use tracing::warn;

use crate::context::word_at;
use crate::corpus::Instance;
use crate::decision_list::DecisionList;
use crate::estimator::SensePair;

/// Sentido mais frequente nas instâncias de treino.
///
/// `sense_a` só vence com contagem **estritamente** maior; o empate vai para
/// `sense_b` (desempate de referência, documentado e preservado). Instâncias
/// sem anotação ou com sentido fora do par são excluídas da contagem e
/// reportadas — nunca contadas silenciosamente.
pub fn majority_sense(instances: &[Instance], senses: &SensePair) -> String {
    let mut count_a = 0u32;
    let mut count_b = 0u32;

    for instance in instances {
        match instance.sense.as_deref() {
            Some(s) if s == senses.sense_a => count_a += 1,
            Some(s) if s == senses.sense_b => count_b += 1,
            Some(other) => warn!(
                instance = %instance.id,
                sense = other,
                "sentido fora do inventário; excluído da contagem majoritária"
            ),
            None => warn!(
                instance = %instance.id,
                "instância sem anotação; excluída da contagem majoritária"
            ),
        }
    }

    if count_a > count_b {
        senses.sense_a.clone()
    } else {
        senses.sense_b.clone()
    }
}

/// Prediz o sentido de uma sequência de tokens: primeira regra que casa
/// vence; lista esgotada cai no sentido majoritário.
pub fn predict(
    tokens: &[String],
    decision_list: &DecisionList,
    target: &str,
    majority: &str,
) -> String {
    for rule in decision_list.rules() {
        if word_at(rule.condition.offset, tokens, target)
            == Some(rule.condition.word.as_str())
        {
            return rule.predicted_sense.clone();
        }
    }
    majority.to_string()
}
