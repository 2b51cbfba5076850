//! newton-tutor CLI: solve an F = m·a exercise and judge an answer.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use newton_tutor::diagnose::StudentAnswer;
use newton_tutor::hint::{self, HintKey};
use newton_tutor::knowledge::{Knowledge, KnowledgeConfig};
use newton_tutor::problem::Given;
use newton_tutor::quantity::{self, Formula, QuantityKind};
use newton_tutor::tutor::Tutor;

#[derive(Parser)]
#[command(name = "newton-tutor", version, about = "Newton's second law tutor")]
struct Cli {
    /// Knowledge base file or directory (defaults to the bundled one).
    #[arg(long, global = true, conflicts_with = "no_knowledge")]
    knowledge: Option<PathBuf>,

    /// Run without a knowledge base.
    #[arg(long, global = true)]
    no_knowledge: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve for the target and judge a student answer.
    Solve {
        /// Quantity to find: mass, acceleration or force.
        #[arg(long)]
        target: String,

        /// Mass in kg.
        #[arg(long, allow_negative_numbers = true)]
        mass: Option<f64>,

        /// Acceleration in m/s².
        #[arg(long, allow_negative_numbers = true)]
        acceleration: Option<f64>,

        /// Force in N.
        #[arg(long, allow_negative_numbers = true)]
        force: Option<f64>,

        /// The student's numeric answer.
        #[arg(long, allow_negative_numbers = true)]
        answer: Option<f64>,

        /// The unit the student wrote.
        #[arg(long, default_value = "")]
        unit: String,

        /// Print the verdict as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the loaded knowledge base.
    Knowledge,
}

impl Cli {
    fn knowledge_config(&self) -> KnowledgeConfig {
        if self.no_knowledge {
            return KnowledgeConfig::Disabled;
        }
        match &self.knowledge {
            Some(path) if path.is_dir() => KnowledgeConfig::Directory(path.clone()),
            Some(path) => KnowledgeConfig::File(path.clone()),
            None => KnowledgeConfig::Bundled,
        }
    }
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let knowledge = Knowledge::load(&cli.knowledge_config());

    match cli.command {
        Commands::Solve {
            target,
            mass,
            acceleration,
            force,
            answer,
            unit,
            json,
        } => {
            let tutor = Tutor::new(knowledge);
            let given = Given {
                mass,
                acceleration,
                force,
            };
            let answer = StudentAnswer {
                value: answer,
                unit,
            };
            let verdict = tutor.evaluate(&target, &given, &answer)?;

            if json {
                let out = serde_json::to_string_pretty(&verdict).into_diagnostic()?;
                println!("{out}");
            } else {
                let unit = quantity::unit_for(tutor.knowledge().source(), &verdict.target);
                println!("{} = {} {}", verdict.target, verdict.correct_value, unit);
                if verdict.correct {
                    println!("Correct.");
                } else {
                    println!("Incorrect ({}).", verdict.error_type);
                }
                if let Some(hint) = &verdict.hint {
                    println!("Hint: {hint}");
                }
            }
        }

        Commands::Knowledge => {
            let source = knowledge.source();
            match knowledge.base() {
                Some(kb) => {
                    println!("{} v{} [{}] {}", kb.name, kb.version, kb.id, kb.origin);
                    if !kb.description.is_empty() {
                        println!("  {}", kb.description);
                    }
                }
                None => println!("No knowledge base loaded; showing built-in fallbacks."),
            }

            println!("\nUnits:");
            for kind in QuantityKind::ALL {
                println!(
                    "  {:<13} {}",
                    kind.as_str(),
                    quantity::unit_for(source, kind.as_str())
                );
            }

            println!("\nFormulas:");
            for kind in QuantityKind::ALL {
                let formula = Formula::from(kind);
                let id = source
                    .and_then(|kb| kb.formula_id(formula))
                    .unwrap_or("-");
                println!("  {:<13} {:<6} {id}", kind.as_str(), formula.notation());
            }

            println!("\nHints:");
            for key in HintKey::ALL {
                println!("  {:<8} {}", key.as_str(), hint::hint_text(source, key));
            }
        }
    }

    Ok(())
}
