use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};

use readme_gen::error::Result;
use readme_gen::{Config, Discovery, ReadmeGenerator, RunReport};

#[derive(Parser)]
#[command(name = "readme-gen")]
#[command(about = "Scaffold placeholder README.md files for every folder of a source tree")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Generate READMEs under ./src
    readme-gen generate src

    # Show which folders would get a README, without writing
    readme-gen plan src

    # Line-count Rust files instead of TypeScript, skip target/
    readme-gen generate . --extension rs --exclude target

    # Machine-readable report
    readme-gen generate src --format json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a README into every folder that lacks one
    Generate {
        #[command(flatten)]
        scan: ScanArgs,
    },

    /// List folders that would get a README, without writing anything
    Plan {
        #[command(flatten)]
        scan: ScanArgs,
    },
}

#[derive(Args)]
pub struct ScanArgs {
    /// Root directory to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Config file (defaults to <PATH>/.readme-gen.yml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Line-counted extension; repeat to track several (replaces the configured set)
    #[arg(long = "extension")]
    pub extensions: Vec<String>,

    /// Extra directory name to skip; repeatable
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Name of the generated file
    #[arg(long)]
    pub output_file: Option<String>,

    /// Project name used in the description placeholder
    #[arg(long)]
    pub project_name: Option<String>,

    /// Also skip paths ignored by .gitignore / .ignore files
    #[arg(long)]
    pub respect_gitignore: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl ScanArgs {
    /// Config file merged with command-line overrides
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(&self.path, self.config.as_deref())?;

        if !self.extensions.is_empty() {
            config.extensions = self.extensions.clone();
        }
        config.exclude.extend(self.exclude.iter().cloned());
        if let Some(output_file) = &self.output_file {
            config.output_file = output_file.clone();
        }
        if let Some(project_name) = &self.project_name {
            config.project_name = project_name.clone();
        }
        if self.respect_gitignore {
            config.respect_gitignore = true;
        }

        config.normalize();
        Ok(config)
    }
}

pub fn generate(scan: &ScanArgs) -> Result<()> {
    let generator = ReadmeGenerator::new(scan.load_config()?)?;
    generator.check_root()?;

    if scan.format == OutputFormat::Text {
        println!("Generating README files for {}", generator.root().display());
    }

    let report = generator.run()?;

    match scan.format {
        OutputFormat::Json => {
            let output = serde_json::to_string_pretty(&report).unwrap_or_default();
            println!("{}", output);
        }
        OutputFormat::Text => print_summary(&report, &generator.config().output_file),
    }

    Ok(())
}

pub fn plan(scan: &ScanArgs) -> Result<()> {
    let generator = ReadmeGenerator::new(scan.load_config()?)?;
    let discovery = generator.discover()?;

    match scan.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "root": generator.root(),
                "pending": ordered_pending(&discovery),
                "skipped": discovery.skipped,
            });
            println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
        }
        OutputFormat::Text => {
            let pending = ordered_pending(&discovery);
            if pending.is_empty() {
                println!("Every folder already has a {}", generator.config().output_file);
                return Ok(());
            }

            println!(
                "{} folders would get a {} ({} skipped):",
                pending.len(),
                generator.config().output_file,
                discovery.skipped.len()
            );
            for folder in pending {
                println!("  {}", relative(generator.root(), &folder));
            }
        }
    }

    Ok(())
}

fn ordered_pending(discovery: &Discovery) -> Vec<PathBuf> {
    let mut pending = discovery.pending.clone();
    pending.sort_by_key(|p| readme_gen::scanner::depth(p));
    pending
}

fn print_summary(report: &RunReport, output_file: &str) {
    println!();
    println!(
        "Done! Processed {} folders: created {} {} files ({} skipped, {} failed) in {} ms",
        report.processed(),
        report.created.len(),
        output_file,
        report.skipped.len(),
        report.failed.len(),
        report.elapsed_ms
    );

    if !report.failed.is_empty() {
        println!("\nFailed folders:");
        for failed in &report.failed {
            println!("  {}: {}", relative(&report.root, &failed.path), failed.error);
        }
    }

    println!("\nNext steps:");
    println!("1. Review each {} file", output_file);
    println!("2. Fill in the [Description] placeholders");
    println!("3. Add specific constraints and interfaces");
    println!("4. Update line counts and file purposes");
}

fn relative(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => rel.display().to_string(),
        Err(_) => path.display().to_string(),
    }
}
