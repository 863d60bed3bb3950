//! wcf: command-line tools for watercluster graph streams.

mod commands;
mod config;

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wcf_core::Invariant;

use commands::invariant::InvariantArgs;
use commands::transform::Transformation;
use commands::wcf2tikz::Wcf2TikzArgs;
use commands::OutputFormat;
use config::WcfConfig;

#[derive(Parser)]
#[command(name = "wcf", version, about = "Watercluster graph format tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert adjacency lists on stdin to watercluster format
    Adjlist2wcf {
        /// Neighbour indices in the input start at 0
        #[arg(short = '0', long)]
        zero_based: bool,
    },
    /// Convert watercluster format to multi_code
    Wcf2multi,
    /// Draw watercluster graphs as TikZ pictures
    Wcf2tikz {
        /// Give a plane embedding (fails if the graph is not planar)
        #[arg(short = 'p', long)]
        planar: bool,
        /// Use polar coordinates
        #[arg(short = 'P', long)]
        polar: bool,
        /// Factor applied to embedding coordinates
        #[arg(long)]
        scale: Option<f64>,
        /// Directory holding gconv, planarg and embed
        #[arg(long)]
        toolchain: Option<PathBuf>,
    },
    /// Print adjacency lists of directed graphs
    Show {
        /// Read digraph6 instead of watercluster format
        #[arg(short = 'D', long)]
        digraph6: bool,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Compute an invariant for every graph on stdin
    Invariant {
        /// Invariant name (arcs, sink, source)
        #[arg(required_unless_present = "invariants")]
        name: Option<String>,
        /// Print the list of available invariants and return
        #[arg(short = 'i', long)]
        invariants: bool,
        /// Write graphs with this value to stdout
        #[arg(short = 'f', long)]
        filter: Option<usize>,
        /// Filter also passes smaller values
        #[arg(short = 'l', long)]
        less: bool,
        /// Filter also passes greater values
        #[arg(short = 'g', long)]
        greater: bool,
        /// Filter does not pass the value itself
        #[arg(short = 'n', long)]
        not_equal: bool,
        /// Print the distribution of all values
        #[arg(short = 's', long)]
        summary: bool,
        /// Write each graph to PREFIX_<value>.wcf
        #[arg(short = 'S', long, value_name = "PREFIX")]
        split: Option<String>,
        /// Print the value of every graph
        #[arg(short = 'v', long)]
        verbose: bool,
        /// Read digraph6 instead of watercluster format
        #[arg(short = 'D', long)]
        digraph6: bool,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Apply a transformation to every graph on stdin
    Transform {
        #[arg(value_enum)]
        transformation: Transformation,
        /// Read digraph6 instead of watercluster format
        #[arg(short = 'D', long)]
        digraph6: bool,
    },
    /// Check configuration and planar toolchain status
    Doctor,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("WCF_LOG").unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let stdin = io::stdin().lock();
    let mut stdout = BufWriter::new(io::stdout().lock());
    let mut stderr = io::stderr().lock();

    match cli.command {
        Commands::Adjlist2wcf { zero_based } => {
            let config = WcfConfig::resolve(&cwd)?;
            commands::adjlist2wcf::run(stdin, &mut stdout, config.adjacency_options(zero_based))?;
        }

        Commands::Wcf2multi => {
            commands::wcf2multi::run(stdin, &mut stdout)?;
        }

        Commands::Wcf2tikz {
            planar,
            polar,
            scale,
            toolchain,
        } => {
            let config = WcfConfig::resolve(&cwd)?;
            let args = Wcf2TikzArgs {
                planar,
                polar,
                scale,
                toolchain,
            };
            commands::wcf2tikz::run(stdin, &mut stdout, &config, &args)?;
        }

        Commands::Show { digraph6, format } => {
            commands::show::run(stdin, &mut stdout, &mut stderr, digraph6, format)?;
        }

        Commands::Invariant {
            name,
            invariants,
            filter,
            less,
            greater,
            not_equal,
            summary,
            split,
            verbose,
            digraph6,
            format,
        } => {
            if invariants {
                return commands::invariant::list_invariants(&mut stderr);
            }
            let Some(name) = name else {
                anyhow::bail!("please specify the invariant");
            };
            let args = InvariantArgs {
                filter,
                less,
                greater,
                not_equal,
                summary,
                split,
                verbose,
                digraph6,
                format,
                ..InvariantArgs::new(Invariant::parse(&name)?)
            };
            commands::invariant::run(stdin, &mut stdout, &mut stderr, &args)?;
        }

        Commands::Transform {
            transformation,
            digraph6,
        } => {
            commands::transform::run(stdin, &mut stdout, transformation, digraph6)?;
        }

        Commands::Doctor => commands::doctor::run(&mut stdout, &cwd)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_short_flags() {
        let args = ["wcf", "invariant", "arcs", "-f", "3", "-l", "-S", "out"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Invariant {
                name,
                filter,
                less,
                split,
                ..
            } => {
                assert_eq!(name.as_deref(), Some("arcs"));
                assert_eq!(filter, Some(3));
                assert!(less);
                assert_eq!(split.as_deref(), Some("out"));
            }
            _ => panic!("expected invariant"),
        }

        let cli = Cli::try_parse_from(["wcf", "wcf2tikz", "-p", "-P", "--scale", "2.5"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Wcf2tikz {
                planar: true,
                polar: true,
                scale: Some(_),
                ..
            }
        ));

        let cli = Cli::try_parse_from(["wcf", "adjlist2wcf", "-0"]).unwrap();
        assert!(matches!(cli.command, Commands::Adjlist2wcf { zero_based: true }));
    }

    #[test]
    fn transform_and_formats() {
        let cli = Cli::try_parse_from(["wcf", "transform", "flip", "-D"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Transform {
                transformation: Transformation::Flip,
                digraph6: true
            }
        ));
        let cli = Cli::try_parse_from(["wcf", "show", "--format", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Show {
                format: OutputFormat::Json,
                digraph6: false
            }
        ));
        assert!(Cli::try_parse_from(["wcf", "transform", "rotate"]).is_err());
    }

    #[test]
    fn invariant_name_is_required_unless_listing() {
        assert!(Cli::try_parse_from(["wcf", "invariant"]).is_err());
        assert!(Cli::try_parse_from(["wcf", "invariant", "-i"]).is_ok());
    }
}
