//! # Configuração do Classificador
//!
//! Concentra os hiperparâmetros do treinamento em um único struct, em vez de
//! espalhar constantes pelo código. Os valores padrão reproduzem a tarefa
//! clássica de desambiguação do substantivo inglês "line" (sentidos
//! *phone* vs. *product*), com janela de contexto de ±8 posições e
//! suavização de Lidstone com k = 0.1.

use serde::{Deserialize, Serialize};

/// Parâmetros de uma execução de treino/inferência.
///
/// Todos os campos são públicos e serializáveis: a configuração é persistida
/// junto com o modelo treinado, de modo que a inferência sempre usa os mesmos
/// parâmetros do treino (em especial o mesmo `target` e a mesma janela).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WsdConfig {
    /// A palavra ambígua a ser desambiguada, já em minúsculas (ex: "line").
    pub target: String,
    /// Forma variante da palavra-alvo que deve ser fundida na forma canônica
    /// durante a normalização (ex: o plural "lines" vira "line").
    ///
    /// É uma regra de sinônimo fixa, não um stemmer genérico: a substituição
    /// é textual e acontece antes da tokenização.
    pub target_variant: Option<String>,
    /// Meia-largura da janela de contexto. Com `window = 8`, os offsets
    /// considerados são {-8..-1} ∪ {1..8} — a posição 0 (a própria
    /// palavra-alvo) nunca é uma feature.
    pub window: u32,
    /// Constante k da suavização aditiva (Lidstone). Garante que nenhuma
    /// probabilidade condicional seja exatamente zero.
    pub smoothing: f64,
}

impl Default for WsdConfig {
    fn default() -> Self {
        Self {
            target: "line".to_string(),
            target_variant: Some("lines".to_string()),
            window: 8,
            smoothing: 0.1,
        }
    }
}

impl WsdConfig {
    /// Configuração para uma palavra-alvo arbitrária, mantendo janela e
    /// suavização de referência. A variante fundida é o plural regular.
    pub fn for_target(target: &str) -> Self {
        Self {
            target: target.to_lowercase(),
            target_variant: Some(format!("{}s", target.to_lowercase())),
            ..Self::default()
        }
    }

    /// Offsets da janela, na ordem em que o treino os percorre:
    /// `1, -1, 2, -2, ..., window, -window`.
    ///
    /// A ordem importa: ela define a ordem de descoberta das condições e,
    /// portanto, o desempate estável do ranqueamento (ver [`crate::decision_list`]).
    pub fn offsets(&self) -> Vec<i32> {
        (1..=self.window as i32).flat_map(|n| [n, -n]).collect()
    }
}
