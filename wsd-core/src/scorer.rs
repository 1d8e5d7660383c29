//! # Avaliador — Acurácia, Baseline e Matriz de Confusão
//!
//! Colaborador de avaliação desacoplado do núcleo: depende apenas do
//! contrato textual das linhas de resposta
//! `<answer instance="..." senseid="..."/>`, nunca das estruturas internas
//! do modelo. Compara a saída do sistema com o gabarito e produz:
//!
//! - acurácia bruta do sistema;
//! - acurácia do baseline de sentido mais frequente (derivado do próprio
//!   gabarito — independe da lista de decisão aprendida);
//! - matriz de confusão sentido × sentido (linhas = predito, colunas = gabarito).

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::WsdError;

/// Par `(instância, sentido)` extraído de uma linha de resposta.
pub type Answer = (String, String);

/// Extrai os pares `(instância, sentido)` de um arquivo de respostas.
///
/// Cada linha não vazia deve casar exatamente com o contrato textual;
/// qualquer outra coisa é uma violação fatal do formato.
pub fn parse_answer_lines(document: &str) -> Result<Vec<Answer>, WsdError> {
    let re = Regex::new(r#"(?i)<answer instance="(.*)" senseid="(.*)"/>"#)
        .expect("regex constante de linha de resposta");

    let mut answers = Vec::new();
    for line in document.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let caps = re.captures(line).ok_or_else(|| WsdError::MalformedAnswerLine {
            line: line.to_string(),
        })?;
        answers.push((caps[1].to_string(), caps[2].to_string()));
    }
    Ok(answers)
}

/// Resultado da avaliação de uma saída do sistema contra o gabarito.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReport {
    pub total: usize,
    pub correct: usize,
    /// Sentido mais frequente no gabarito (rótulo do baseline).
    pub baseline_sense: String,
    pub baseline_correct: usize,
    /// Rótulos de sentido observados (ordenados), eixos da matriz.
    pub labels: Vec<String>,
    /// `matrix[i][j]` = instâncias preditas como `labels[i]` com gabarito `labels[j]`.
    pub matrix: Vec<Vec<usize>>,
}

impl ScoreReport {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64 * 100.0
    }

    pub fn baseline_accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.baseline_correct as f64 / self.total as f64 * 100.0
    }
}

impl fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Baseline accuracy is {}%", self.baseline_accuracy())?;
        writeln!(
            f,
            "Accuracy after adding learned features is {}%",
            self.accuracy()
        )?;
        writeln!(f, "Confusion matrix is")?;

        let width = self
            .labels
            .iter()
            .map(|l| l.len())
            .chain(std::iter::once(7))
            .max()
            .unwrap_or(7)
            + 2;

        // cabeçalho: rótulos do gabarito (colunas)
        write!(f, "{:width$}", "", width = width)?;
        for label in &self.labels {
            write!(f, "{label:>width$}", width = width)?;
        }
        writeln!(f)?;

        // uma linha por sentido predito
        for (i, label) in self.labels.iter().enumerate() {
            write!(f, "{label:<width$}", width = width)?;
            for count in &self.matrix[i] {
                write!(f, "{count:>width$}", width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Pontua pares já extraídos: acurácia, baseline e matriz de confusão.
///
/// Linhas repetidas para um mesmo id são deduplicadas com semântica de
/// dicionário (a última vence), tanto no sistema quanto no gabarito; cada
/// instância conta exatamente uma vez. Acurácia e baseline compartilham o
/// mesmo denominador: o conjunto de instâncias pontuadas.
///
/// Toda instância predita precisa existir no gabarito; a ausência é um erro
/// de contrato, não um acerto ou erro silencioso.
pub fn score(system: &[Answer], gold: &[Answer]) -> Result<ScoreReport, WsdError> {
    // deduplicação por id com semântica de dicionário: a última linha de um
    // mesmo id vence, a ordem é a da primeira ocorrência
    let gold_by_id: HashMap<&str, &str> = gold
        .iter()
        .map(|(id, sense)| (id.as_str(), sense.as_str()))
        .collect();
    let mut system_ids: Vec<&str> = Vec::new();
    let mut system_by_id: HashMap<&str, &str> = HashMap::new();
    for (id, sense) in system {
        if system_by_id.insert(id.as_str(), sense.as_str()).is_none() {
            system_ids.push(id.as_str());
        }
    }

    // resolve os pares (predito, gabarito) das instâncias pontuadas
    let mut pairs: Vec<(&str, &str)> = Vec::with_capacity(system_ids.len());
    for id in &system_ids {
        let expected = gold_by_id.get(id).ok_or_else(|| {
            WsdError::MissingGoldInstance { id: id.to_string() }
        })?;
        pairs.push((system_by_id[id], *expected));
    }

    let mut label_set: BTreeSet<&str> = BTreeSet::new();
    for (predicted, expected) in &pairs {
        label_set.insert(predicted);
        label_set.insert(expected);
    }
    let labels: Vec<String> = label_set.iter().map(|l| l.to_string()).collect();
    let index: HashMap<&str, usize> = label_set
        .iter()
        .enumerate()
        .map(|(i, l)| (*l, i))
        .collect();

    let mut matrix = vec![vec![0usize; labels.len()]; labels.len()];
    let mut correct = 0usize;

    for (predicted, expected) in &pairs {
        if predicted == expected {
            correct += 1;
        }
        matrix[index[predicted]][index[expected]] += 1;
    }

    // baseline: sentido mais frequente no gabarito **das instâncias
    // pontuadas** — mesmo denominador da acurácia do sistema (empate →
    // primeiro rótulo em ordem lexicográfica, por exigir contagem
    // estritamente maior)
    let mut gold_counts: HashMap<&str, usize> = HashMap::new();
    for (_, expected) in &pairs {
        *gold_counts.entry(expected).or_insert(0) += 1;
    }
    let mut baseline_sense = labels.first().cloned().unwrap_or_default();
    let mut baseline_correct = 0usize;
    for label in &labels {
        let count = *gold_counts.get(label.as_str()).unwrap_or(&0);
        if count > baseline_correct {
            baseline_correct = count;
            baseline_sense = label.clone();
        }
    }

    Ok(ScoreReport {
        total: pairs.len(),
        correct,
        baseline_sense,
        baseline_correct,
        labels,
        matrix,
    })
}

/// Avalia dois arquivos no contrato de linhas de resposta.
pub fn score_files(system_path: &Path, gold_path: &Path) -> Result<ScoreReport, WsdError> {
    let system_doc =
        fs::read_to_string(system_path).map_err(|e| WsdError::io(system_path, e))?;
    let gold_doc =
        fs::read_to_string(gold_path).map_err(|e| WsdError::io(gold_path, e))?;

    let system = parse_answer_lines(&system_doc)?;
    let gold = parse_answer_lines(&gold_doc)?;
    score(&system, &gold)
}
