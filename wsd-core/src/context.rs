//! # Extração de Features de Contexto Posicional
//!
//! A única família de features deste classificador: a identidade da palavra
//! em um deslocamento assinado relativo à palavra-alvo. Para a sentença
//! normalizada `["telephone", "line", "went", "dead"]` com alvo "line":
//!
//! - `word_at(-1)` → `Some("telephone")`
//! - `word_at(1)`  → `Some("went")`
//! - `word_at(5)`  → `None` (fora da sentença — "ausente")
//!
//! A posição da palavra-alvo é resolvida pela **primeira** ocorrência na
//! sequência. Instâncias bem-formadas contêm exatamente uma ocorrência;
//! quando houver mais de uma, a política determinística é usar a primeira.

/// Retorna a palavra na posição `offset` relativa à palavra-alvo, ou `None`
/// se a posição cair fora da sentença.
///
/// Nunca entra em pânico: se a palavra-alvo não for encontrada (violação de
/// pré-condição da instância), degrada para `None` — "nenhuma feature
/// extraída para este offset" — em vez de interromper o pipeline.
pub fn word_at<'a>(offset: i32, tokens: &'a [String], target: &str) -> Option<&'a str> {
    let root = tokens.iter().position(|t| t == target)?;
    let index = root as i64 + i64::from(offset);
    if index < 0 {
        return None;
    }
    tokens.get(index as usize).map(|t| t.as_str())
}
