//! # Normalizador de Texto
//!
//! Primeiro estágio do pipeline: converte o texto bruto de uma instância em
//! uma sequência de tokens limpos, pronta para a extração de features de
//! contexto. A normalização é agressiva de propósito — para este
//! classificador, só interessa a identidade das palavras de conteúdo ao
//! redor da palavra-alvo:
//!
//! 1. Minúsculas em todo o texto.
//! 2. Fusão da forma variante da palavra-alvo na forma canônica
//!    (ex: "lines" → "line"), por substituição textual fixa.
//! 3. Quebra em espaços em branco.
//! 4. Remoção da classe fixa de pontuação `[.,?!'"-_/]` de dentro de cada token.
//! 5. Descarte de stop words, tokens de pontuação e tokens vazios.
//!
//! A função é pura e determinística: nenhuma entrada malformada gera erro,
//! tokens que ficam vazios após a limpeza são silenciosamente descartados.

use std::collections::HashSet;

use regex::Regex;

use crate::config::WsdConfig;

/// Stop words do inglês (lista padrão do NLTK).
///
/// Palavras funcionais que carregam pouca informação lexical e só
/// adicionariam ruído às regras de contexto posicional.
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you",
    "you're", "you've", "you'll", "you'd", "your", "yours", "yourself",
    "yourselves", "he", "him", "his", "himself", "she", "she's", "her",
    "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this",
    "that", "that'll", "these", "those", "am", "is", "are", "was", "were",
    "be", "been", "being", "have", "has", "had", "having", "do", "does",
    "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because",
    "as", "until", "while", "of", "at", "by", "for", "with", "about",
    "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off",
    "over", "under", "again", "further", "then", "once", "here", "there",
    "when", "where", "why", "how", "all", "any", "both", "each", "few",
    "more", "most", "other", "some", "such", "no", "nor", "not", "only",
    "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "don't", "should", "should've", "now", "d", "ll", "m",
    "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't",
    "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn",
    "hasn't", "haven", "haven't", "isn", "isn't", "ma", "mightn",
    "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won",
    "won't", "wouldn", "wouldn't",
];

/// Sinais de pontuação ASCII tratados como stop words quando aparecem
/// isolados como token (ex: ";" ou "(" que sobram após a quebra em espaços).
const PUNCTUATION_TOKENS: &[&str] = &[
    "!", "\"", "#", "$", "%", "&", "'", "(", ")", "*", "+", ",", "-", ".",
    "/", ":", ";", "<", "=", ">", "?", "@", "[", "\\", "]", "^", "_", "`",
    "{", "|", "}", "~",
];

/// Normalizador configurado para uma palavra-alvo específica.
///
/// A regex de limpeza e o conjunto de stop words são compilados uma única
/// vez na construção; `normalize` pode então ser chamada para qualquer
/// número de instâncias sem estado compartilhado mutável.
pub struct Normalizer {
    target: String,
    target_variant: Option<String>,
    strip: Regex,
    stop_words: HashSet<&'static str>,
}

impl Normalizer {
    pub fn new(config: &WsdConfig) -> Self {
        let mut stop_words: HashSet<&'static str> =
            STOP_WORDS.iter().copied().collect();
        stop_words.extend(PUNCTUATION_TOKENS.iter().copied());

        // Classe fixa de pontuação removida de dentro dos tokens.
        // O sublinhado está incluído: nenhum token normalizado contém '_',
        // o que mantém a renderização "<offset>_word_<palavra>" das
        // condições livre de ambiguidade.
        let strip = Regex::new(r#"[.,?!'"\-_/]"#)
            .expect("classe de pontuação é uma regex constante válida");

        Self {
            target: config.target.clone(),
            target_variant: config.target_variant.clone(),
            strip,
            stop_words,
        }
    }

    /// Normaliza o texto bruto de uma instância em tokens de conteúdo.
    pub fn normalize(&self, raw_text: &str) -> Vec<String> {
        let mut text = raw_text.to_lowercase();
        if let Some(variant) = &self.target_variant {
            text = text.replace(variant.as_str(), &self.target);
        }

        text.split_whitespace()
            .map(|w| self.strip.replace_all(w, "").into_owned())
            .filter(|w| !w.is_empty() && !self.stop_words.contains(w.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::new(&WsdConfig::default())
    }

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        let tokens = normalizer().normalize("The Telephone LINE, went dead!");
        assert_eq!(tokens, vec!["telephone", "line", "went", "dead"]);
    }

    #[test]
    fn test_merges_plural_variant_into_target() {
        let tokens = normalizer().normalize("two lines were crossed");
        // "lines" é fundido em "line" antes da tokenização
        assert_eq!(tokens, vec!["two", "line", "crossed"]);
    }

    #[test]
    fn test_drops_stop_words_and_empty_tokens() {
        // "--" e "..." ficam vazios após a limpeza e são descartados;
        // "the"/"of"/"a" são stop words
        let tokens = normalizer().normalize("the end -- of a line ...");
        assert_eq!(tokens, vec!["end", "line"]);
    }

    #[test]
    fn test_isolated_punctuation_is_discarded() {
        let tokens = normalizer().normalize("phone ; line ( product )");
        assert_eq!(tokens, vec!["phone", "line", "product"]);
    }

    #[test]
    fn test_is_pure_and_deterministic() {
        let n = normalizer();
        let a = n.normalize("She said the line was dead.");
        let b = n.normalize("She said the line was dead.");
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_input_yields_no_tokens() {
        assert!(normalizer().normalize("").is_empty());
        assert!(normalizer().normalize("   .,?!   ").is_empty());
    }
}
