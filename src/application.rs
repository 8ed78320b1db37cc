// Released under MIT License.

//! Implementation of the command-line interface.

use clap::Parser;
use colored::Colorize;

use modekin::input::Analysis;
use modekin::MODEKIN_VERSION;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Markov-chain analysis of binding-mode transitions from MD simulations."
)]
struct Args {
    /// Path to the YAML configuration file specifying the analysis.
    config: String,

    /// Suppress all standard output of the program.
    #[arg(short, long)]
    silent: bool,

    /// Overwrite the contents of an existing output directory instead of
    /// backing it up.
    #[arg(short, long)]
    overwrite: bool,
}

/// Perform the analysis requested on the command line. Returns `true` if the
/// run finished successfully, `false` otherwise.
pub(crate) fn run() -> bool {
    let args = Args::parse();

    let mut analysis = match Analysis::from_file(&args.config) {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("{}", e);
            return false;
        }
    };

    // command-line flags take precedence over the configuration file
    if args.silent {
        analysis.set_silent(true);
    }
    if args.overwrite {
        analysis.set_overwrite(true);
    }

    if !analysis.silent() {
        colog::init();
        println!(
            "\n{} {}\n",
            ">>> MODEKIN".bold(),
            format!("v{} <<<", MODEKIN_VERSION).bold()
        );
    }

    let silent = analysis.silent();

    let results = match analysis.run() {
        Ok(results) => results,
        Err(e) => {
            eprintln!("{}", e);
            return false;
        }
    };

    if let Err(e) = results.write() {
        eprintln!("{}", e);
        return false;
    }

    if !silent {
        println!("\n{}", "ANALYSIS COMPLETED".green().bold());
    }

    true
}
