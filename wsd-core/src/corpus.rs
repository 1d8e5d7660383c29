//! # Leitura do Corpus Anotado
//!
//! O corpus da tarefa (formato *lexical sample*) é um documento de marcação
//! com elementos `<instance>` repetidos:
//!
//! ```text
//! <instance id="line-n.w8_059:8174:">
//! <answer instance="line-n.w8_059:8174:" senseid="phone"/>
//! <context>
//!  <s> ... the <head>line</head> went dead ... </s>
//! </context>
//! </instance>
//! ```
//!
//! O elemento `<answer>` (com o atributo `senseid`) só existe nos dados de
//! treino/gabarito. O texto da instância é a concatenação (separada por
//! espaço) do conteúdo de todos os elementos `<s>`, com marcações internas
//! como `<head>` descartadas.
//!
//! O documento não é XML estrito (tag soup herdado da tarefa original), por
//! isso a extração usa expressões regulares em vez de um parser XML — o
//! mesmo tratamento tolerante do leitor de referência.

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::warn;

use crate::config::WsdConfig;
use crate::error::WsdError;
use crate::normalizer::Normalizer;

/// Uma instância do corpus: uma sentença (ou janela de sentenças) contendo
/// a palavra ambígua, já normalizada em tokens.
///
/// Invariantes:
/// - instâncias de treino têm `sense` preenchido com um de dois rótulos fixos;
/// - instâncias de teste têm `sense` ausente até serem preditas;
/// - os tokens contêm (idealmente) exatamente uma ocorrência da forma
///   canônica da palavra-alvo.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    /// Identificador único da instância (atributo `id`).
    pub id: String,
    /// Rótulo de sentido anotado (atributo `senseid`), quando presente.
    pub sense: Option<String>,
    /// Sequência normalizada de tokens de conteúdo.
    pub tokens: Vec<String>,
}

/// Leitor de corpus: extrai instâncias do documento de marcação e as
/// normaliza com o [`Normalizer`] configurado.
pub struct CorpusReader {
    normalizer: Normalizer,
    instance_re: Regex,
    senseid_re: Regex,
    sentence_re: Regex,
    tag_re: Regex,
}

impl CorpusReader {
    pub fn new(config: &WsdConfig) -> Self {
        Self {
            normalizer: Normalizer::new(config),
            instance_re: Regex::new(r#"(?s)<instance\s+id="([^"]+)"[^>]*>(.*?)</instance>"#)
                .expect("regex constante de instância"),
            senseid_re: Regex::new(r#"senseid="([^"]+)""#)
                .expect("regex constante de senseid"),
            sentence_re: Regex::new(r"(?s)<s[^>]*>(.*?)</s>")
                .expect("regex constante de sentença"),
            tag_re: Regex::new(r"<[^>]*>").expect("regex constante de marcação"),
        }
    }

    /// Extrai e normaliza todas as instâncias do documento, na ordem em que
    /// aparecem.
    pub fn parse(&self, document: &str) -> Vec<Instance> {
        self.instance_re
            .captures_iter(document)
            .map(|caps| {
                let id = caps[1].to_string();
                let body = &caps[2];

                let sense = self
                    .senseid_re
                    .captures(body)
                    .map(|s| s[1].to_string());

                // Concatena o conteúdo de todos os <s>, removendo marcações
                // residuais (ex: <head>line</head> vira apenas "line").
                let mut text = String::new();
                for s in self.sentence_re.captures_iter(body) {
                    text.push(' ');
                    text.push_str(&self.tag_re.replace_all(&s[1], ""));
                }

                Instance {
                    id,
                    sense,
                    tokens: self.normalizer.normalize(&text),
                }
            })
            .collect()
    }

    /// Carrega o corpus de treino: toda instância precisa de um `senseid`.
    ///
    /// Instâncias sem anotação são excluídas explicitamente (não entram em
    /// nenhuma contagem) e reportadas como aviso estruturado — nunca
    /// contadas silenciosamente como "nenhum dos sentidos".
    pub fn load_training(&self, path: &Path) -> Result<Vec<Instance>, WsdError> {
        let document =
            fs::read_to_string(path).map_err(|e| WsdError::io(path, e))?;
        let instances: Vec<Instance> = self
            .parse(&document)
            .into_iter()
            .filter(|instance| {
                if instance.sense.is_none() {
                    warn!(
                        instance = %instance.id,
                        "instância de treino sem senseid; excluída do treinamento"
                    );
                    false
                } else {
                    true
                }
            })
            .collect();

        if instances.is_empty() {
            return Err(WsdError::EmptyTrainingCorpus);
        }
        Ok(instances)
    }

    /// Carrega o corpus de teste: `sense` fica ausente até a predição.
    pub fn load_test(&self, path: &Path) -> Result<Vec<Instance>, WsdError> {
        let document =
            fs::read_to_string(path).map_err(|e| WsdError::io(path, e))?;
        Ok(self.parse(&document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
<corpus lang="en">
<lexelt item="line-n">
<instance id="line-n.w8_059:8174:">
<answer instance="line-n.w8_059:8174:" senseid="phone"/>
<context>
 <s> The telephone <head>line</head> went dead. </s>
</context>
</instance>
<instance id="line-n.w7_098:12684:">
<context>
 <s> A new <head>line</head> of products was launched. </s>
 <s> Sales doubled. </s>
</context>
</instance>
</lexelt>
</corpus>
"#;

    fn reader() -> CorpusReader {
        CorpusReader::new(&WsdConfig::default())
    }

    #[test]
    fn test_parse_extracts_id_sense_and_tokens() {
        let instances = reader().parse(SAMPLE);
        assert_eq!(instances.len(), 2);

        let first = &instances[0];
        assert_eq!(first.id, "line-n.w8_059:8174:");
        assert_eq!(first.sense.as_deref(), Some("phone"));
        // <head> removido, stop words e pontuação descartadas
        assert_eq!(first.tokens, vec!["telephone", "line", "went", "dead"]);
    }

    #[test]
    fn test_parse_joins_multiple_sentences() {
        let instances = reader().parse(SAMPLE);
        let second = &instances[1];
        assert_eq!(second.sense, None);
        assert_eq!(
            second.tokens,
            vec!["new", "line", "products", "launched", "sales", "doubled"]
        );
    }

    #[test]
    fn test_load_training_excludes_unannotated_instances() {
        let mut file = tempfile::NamedTempFile::new().expect("arquivo temporário");
        std::io::Write::write_all(&mut file, SAMPLE.as_bytes()).expect("escrita");

        let instances = reader().load_training(file.path()).expect("treino");
        // a segunda instância não tem senseid e é excluída
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].sense.as_deref(), Some("phone"));
    }

    #[test]
    fn test_load_test_keeps_unannotated_instances() {
        let mut file = tempfile::NamedTempFile::new().expect("arquivo temporário");
        std::io::Write::write_all(&mut file, SAMPLE.as_bytes()).expect("escrita");

        let instances = reader().load_test(file.path()).expect("teste");
        assert_eq!(instances.len(), 2);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = reader().load_training(Path::new("/nonexistent/corpus.xml"));
        assert!(matches!(result, Err(WsdError::Io { .. })));
    }

    #[test]
    fn test_empty_training_corpus_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("arquivo temporário");
        std::io::Write::write_all(&mut file, b"<corpus></corpus>").expect("escrita");

        let result = reader().load_training(file.path());
        assert!(matches!(result, Err(WsdError::EmptyTrainingCorpus)));
    }
}
