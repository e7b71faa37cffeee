use clap::{Parser, Subcommand};
use hecke_engine::config::defaults;
use hecke_engine::{
    canonical, canonical_factors, expand, left_justify, right_justify, verify_against,
    EngineConfig, Generator, HeckeError, HeckeModule, LinearCombination, Multiplier, Word,
};
use hecke_parser::{parse_generator, parse_word, read_queries, sage};
use log::{debug, info};
use num_complex::Complex;
use serde::Serialize;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Products of Kazhdan-Lusztig basis elements of fully commutative elements
#[derive(Debug, Parser)]
#[command(name = "fc-hecke", version, about)]
pub struct Cli {
    /// Engine configuration file (TOML)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Expand graph vertices on the thread pool
    #[arg(long, global = true)]
    pub parallel: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute c_s * c_w
    Multiply {
        /// Generator, e.g. 3 or s3
        s: String,
        /// Word, e.g. 1213 or (1,2,1,3)
        w: String,
    },
    /// Left and right justified forms of a word
    Justify { w: String },
    /// Canonical factors of a word and their expansion
    Factors { w: String },
    /// Closure graph of a word under c_1, ..., c_n
    Graph {
        w: String,
        /// Number of generators (default: configured rank)
        #[arg(short = 'n', long)]
        generators: Option<u8>,
    },
    /// Structure matrices on the closure of a word
    Matrix {
        w: String,
        #[arg(short = 'n', long)]
        generators: Option<u8>,
        /// Evaluate at v = e^(i * phase)
        #[arg(long, default_value_t = 1.0)]
        phase: f64,
    },
    /// Compute every product of a CSV file with an `s,w` header
    Batch { file: PathBuf },
    /// Compare products with answers recorded in a `type,s,w,expected` CSV file
    Verify {
        file: PathBuf,
        /// Cartan type whose answers are checked
        #[arg(long, default_value = "B4")]
        cartan: String,
    },
}

/// One term of a linear combination
#[derive(Debug, Serialize)]
struct TermOutput {
    word: String,
    coefficient: String,
}

#[derive(Debug, Serialize)]
struct ProductOutput {
    s: u8,
    w: String,
    product: Vec<TermOutput>,
}

#[derive(Debug, Serialize)]
struct JustifyOutput {
    w: String,
    left: Vec<String>,
    right: Vec<String>,
    canonical: String,
}

#[derive(Debug, Serialize)]
struct FactorsOutput {
    w: String,
    factors: Vec<String>,
    expansion: Vec<TermOutput>,
}

#[derive(Debug, Serialize)]
struct VertexOutput {
    vertex: u64,
    successors: Vec<u64>,
}

#[derive(Debug, Serialize)]
struct MatrixOutput {
    generator: u8,
    basis: Vec<String>,
    entries: Vec<Vec<String>>,
    quadratic_defect: f64,
}

#[derive(Debug, Serialize)]
struct MismatchOutput {
    s: u8,
    w: String,
    expected: Vec<TermOutput>,
    actual: Vec<TermOutput>,
}

#[derive(Debug, Serialize)]
struct VerifySummary {
    cartan: String,
    queries: usize,
    mismatches: usize,
}

/// Sets up env_logger; `RUST_LOG` takes precedence over `-v`.
pub fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

/// Parses and validates an engine configuration.
pub fn parse_config(text: &str) -> Result<EngineConfig, Box<dyn Error>> {
    let config: EngineConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, Box<dyn Error>> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("Cannot read config '{}': {}", path.display(), e))?;
            let config = parse_config(&text)?;
            info!("loaded configuration from {}", path.display());
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Runs a parsed command line
pub fn run(args: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = load_config(args.config.as_deref())?;
    if args.parallel {
        config = config.with_parallel(true);
    }
    debug!("engine configuration: {:?}", config);
    let rank = config.rank;
    let multiplier = Multiplier::new(config);

    match args.command {
        Command::Multiply { s, w } => {
            let s = parse_generator(&s)?;
            let w = parse_word(&w)?;
            emit(&product_output(&multiplier, s, &w)?)?;
        }
        Command::Justify { w } => {
            let w = checked_word(&w)?;
            emit(&JustifyOutput {
                w: w.to_string(),
                left: left_justify(&w).iter().map(Word::to_string).collect(),
                right: right_justify(&w).iter().map(Word::to_string).collect(),
                canonical: canonical(&w).to_string(),
            })?;
        }
        Command::Factors { w } => {
            let w = checked_word(&w)?;
            let factors = canonical_factors(&w);
            emit(&FactorsOutput {
                w: w.to_string(),
                factors: factors.iter().map(ToString::to_string).collect(),
                expansion: terms(&expand(&factors)),
            })?;
        }
        Command::Graph { w, generators } => {
            let w = checked_word(&w)?;
            let graph = multiplier.closure_graph(&w, generators.unwrap_or(rank))?;
            for (vertex, successors) in graph.encoded() {
                emit(&VertexOutput {
                    vertex,
                    successors,
                })?;
            }
        }
        Command::Matrix {
            w,
            generators,
            phase,
        } => {
            let w = checked_word(&w)?;
            let n = generators.unwrap_or(rank);
            let graph = multiplier.closure_graph(&w, n)?;
            let module = HeckeModule::from_graph(&multiplier, &graph, n)?;
            let v = Complex::from_polar(1.0, phase);
            let basis: Vec<String> = module.basis().iter().map(Word::to_string).collect();

            for summary in module.summarize(v)? {
                let matrix = module.matrix(Generator(summary.generator))?;
                let entries: Vec<Vec<String>> = matrix
                    .row_iter()
                    .map(|row| row.iter().map(ToString::to_string).collect::<Vec<String>>())
                    .collect();
                emit(&MatrixOutput {
                    generator: summary.generator,
                    basis: basis.clone(),
                    entries,
                    quadratic_defect: summary.quadratic_defect,
                })?;
            }
        }
        Command::Batch { file } => {
            let queries = read_queries(BufReader::new(File::open(&file)?))?;
            info!("{} queries in {}", queries.len(), file.display());
            for (s, w) in &queries {
                emit(&product_output(&multiplier, *s, w)?)?;
            }
        }
        Command::Verify { file, cartan } => {
            let oracle = sage::load_oracle(BufReader::new(File::open(&file)?))?;
            let queries = oracle.product_queries(&cartan);
            for (s, w) in &queries {
                check_range(*s, w)?;
            }

            let mismatches = verify_against(&multiplier, &oracle, &cartan, &queries)?;
            for mismatch in &mismatches {
                emit(&MismatchOutput {
                    s: mismatch.generator.id(),
                    w: mismatch.word.to_string(),
                    expected: terms(&mismatch.expected),
                    actual: terms(&mismatch.actual),
                })?;
            }
            emit(&VerifySummary {
                cartan: cartan.clone(),
                queries: queries.len(),
                mismatches: mismatches.len(),
            })?;

            if !mismatches.is_empty() {
                return Err(format!(
                    "{} of {} products disagree with the recorded answers",
                    mismatches.len(),
                    queries.len()
                )
                .into());
            }
        }
    }

    Ok(())
}

fn product_output(
    multiplier: &Multiplier,
    s: Generator,
    w: &Word,
) -> Result<ProductOutput, Box<dyn Error>> {
    check_range(s, w)?;
    let product = multiplier.multiply(s, w)?;
    Ok(ProductOutput {
        s: s.id(),
        w: w.to_string(),
        product: terms(&product),
    })
}

fn checked_word(text: &str) -> Result<Word, Box<dyn Error>> {
    let w = parse_word(text)?;
    if let Some(&g) = w.iter().find(|g| g.id() > defaults::MAX_RANK) {
        return Err(out_of_range(g).into());
    }
    Ok(w)
}

/// Ids above 9 have no digit encoding.
fn check_range(s: Generator, w: &Word) -> Result<(), HeckeError> {
    match std::iter::once(&s).chain(w.iter()).find(|g| g.id() > defaults::MAX_RANK) {
        Some(&g) => Err(out_of_range(g)),
        None => Ok(()),
    }
}

fn out_of_range(generator: Generator) -> HeckeError {
    HeckeError::GeneratorOutOfRange {
        generator,
        rank: defaults::MAX_RANK,
    }
}

fn terms(lc: &LinearCombination) -> Vec<TermOutput> {
    lc.iter()
        .map(|(w, c)| TermOutput {
            word: w.to_string(),
            coefficient: c.to_string(),
        })
        .collect()
}

fn emit<T: Serialize>(output: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string(output)?);
    Ok(())
}
