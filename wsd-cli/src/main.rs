//! Linha de comando do classificador WSD: treina a lista de decisão sobre um
//! corpus anotado, aplica-a ao corpus de teste e avalia a saída contra um
//! gabarito.
//!
//! ```text
//! wsd train line-train.xml line-test.xml my-decision-list.txt > my-line-answers.txt
//! wsd score my-line-answers.txt line-answers.txt
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use wsd_core::{score_files, write_answers, CorpusReader, WsdConfig, WsdModel};

#[derive(Parser)]
#[command(name = "wsd", about = "Desambiguação de sentido por lista de decisão")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Treina o modelo, grava a lista de decisão e emite as respostas do teste.
    Train {
        /// Corpus de treino anotado (elementos <instance> com <answer senseid>).
        train_corpus: PathBuf,
        /// Corpus de teste (instâncias sem anotação).
        test_corpus: PathBuf,
        /// Arquivo de saída da lista de decisão (artefato inspecionável).
        decision_list: PathBuf,

        /// Arquivo de saída das linhas de resposta (padrão: stdout).
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Palavra ambígua a desambiguar.
        #[arg(long, default_value = "line")]
        target: String,

        /// Meia-largura da janela de contexto (offsets ±1..±N).
        #[arg(long, default_value_t = 8)]
        window: u32,

        /// Constante de suavização de Lidstone.
        #[arg(long, default_value_t = 0.1)]
        smoothing: f64,

        /// Persiste o modelo completo (configuração + lista) em JSON.
        #[arg(long)]
        model_out: Option<PathBuf>,
    },
    /// Compara a saída do sistema com o gabarito: acurácia, baseline e
    /// matriz de confusão.
    Score {
        /// Linhas de resposta produzidas pelo sistema.
        system_answers: PathBuf,
        /// Linhas de resposta do gabarito (gold standard).
        gold_answers: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Train {
            train_corpus,
            test_corpus,
            decision_list,
            answers,
            target,
            window,
            smoothing,
            model_out,
        } => {
            let config = WsdConfig {
                window,
                smoothing,
                ..WsdConfig::for_target(&target)
            };
            let reader = CorpusReader::new(&config);

            let training = reader
                .load_training(&train_corpus)
                .context("falha ao carregar o corpus de treino")?;
            let test = reader
                .load_test(&test_corpus)
                .context("falha ao carregar o corpus de teste")?;
            info!(
                training = training.len(),
                test = test.len(),
                target = %config.target,
                "corpora carregados"
            );

            let model = WsdModel::train(&training, config)
                .context("falha no treinamento")?;
            model
                .decision_list
                .write_to(&decision_list)
                .context("falha ao gravar a lista de decisão")?;
            info!(
                rules = model.decision_list.len(),
                path = %decision_list.display(),
                "lista de decisão gravada"
            );

            let lines = model.predict_corpus(&test);
            match answers {
                Some(path) => {
                    write_answers(&path, &lines)
                        .context("falha ao gravar as respostas")?;
                    info!(path = %path.display(), "respostas gravadas");
                }
                None => {
                    for line in &lines {
                        println!("{line}");
                    }
                }
            }

            if let Some(path) = model_out {
                model
                    .save_json(&path)
                    .context("falha ao persistir o modelo")?;
                info!(path = %path.display(), "modelo persistido");
            }
        }
        Command::Score {
            system_answers,
            gold_answers,
        } => {
            let report = score_files(&system_answers, &gold_answers)
                .context("falha na avaliação")?;
            print!("{report}");
        }
    }
    Ok(())
}
