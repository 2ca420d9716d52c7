mod word;
mod word_list;
mod chain;
mod letter_graph;

use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use letter_graph::LetterGraph;

#[derive(Parser)]
#[command(
    name = "make-chains",
    about = "Generate word chains from a word list",
)]
struct Cli {
    /// File containing one word per line
    word_list: PathBuf,
    /// Number of words in each chain
    #[arg(long, default_value_t = 3)]
    length: usize,
    /// Number of chains to generate
    #[arg(long, default_value_t = 1)]
    count: usize,
    /// Attempts before giving up on a chain
    #[arg(long, default_value_t = chain::DEFAULT_MAX_ATTEMPTS)]
    attempts: u32,
}

fn print_chain(chain: &chain::Chain) {
    let graph = LetterGraph::new(chain);

    println!(
        "{}  ({} letters, {} links)",
        chain,
        graph.nodes().len(),
        graph.edges().len(),
    );
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let text = match std::fs::read_to_string(&cli.word_list) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{}: {}", cli.word_list.display(), e);
            return ExitCode::FAILURE;
        },
    };

    let words = word_list::parse_word_list(&text);

    if words.is_empty() {
        eprintln!("{}: no usable words", cli.word_list.display());
        return ExitCode::FAILURE;
    }

    let mut rng = rand::thread_rng();

    for _ in 0..cli.count {
        match chain::generate(&words, cli.length, cli.attempts, &mut rng) {
            Ok(chain) => print_chain(&chain),
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            },
        }
    }

    ExitCode::SUCCESS
}
