//! Command implementations

use super::Args;
use crate::config;
use crate::core::Analyzer;
use crate::error::Result;
use crate::fixer::Fixer;
use crate::output::formatters;

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Analyze (and optionally fix) a project
    Analyze(Args),
    /// Initialize a default configuration file
    Init(Args),
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init(args);
        }
        Command::Analyze(args)
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        match self {
            Command::Analyze(args) => {
                let settings = config::resolve(args)?;

                if !settings.quiet {
                    println!(
                        "deadwood v{} - unused import and dependency cleaner",
                        env!("CARGO_PKG_VERSION")
                    );
                    println!("Analyzing: {}", settings.source_dir.display());
                    if settings.verbose {
                        println!("Settings: {:#?}", settings);
                    }
                    println!();
                }

                let analyzer = Analyzer::new(settings.clone());
                let results = analyzer.analyze()?;

                let report = formatters::format_results(&results, &settings)?;
                formatters::write_output(&report, settings.output_file.as_deref())?;

                if settings.fix {
                    let mut fixer = Fixer::new(settings.clone());
                    let outcome = fixer.apply(&results, &settings.source_dir);

                    let rendered = formatters::format_outcome(&outcome, &settings)?;
                    formatters::write_output(&rendered, None)?;
                }

                Ok(())
            }
            Command::Init(args) => {
                let root = args.path.clone().unwrap_or_else(|| ".".into());
                let config_path = root.join(config::CONFIG_FILE);

                if config_path.exists() {
                    println!(
                        "Configuration file already exists at: {}",
                        config_path.display()
                    );
                    println!("To overwrite it, delete the file first and run this command again.");
                    return Ok(());
                }

                config::create_default_config(&config_path)?;

                println!(
                    "Created default configuration file at: {}",
                    config_path.display()
                );
                println!("Edit it to adjust detectors, thresholds and fixing behavior.");

                Ok(())
            }
        }
    }

    /// Run the command and handle errors
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(_) => 0,
            Err(err) => {
                // Print user-friendly error message
                eprintln!("{}: {}", err.severity(), err.user_message());

                // Return appropriate exit code based on error severity
                match err.severity() {
                    crate::error::ErrorSeverity::Warning => 0,
                    crate::error::ErrorSeverity::Error => 1,
                    crate::error::ErrorSeverity::Critical => 2,
                }
            }
        }
    }
}
