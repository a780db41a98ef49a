//! Command-line interface implementation for ouroboros.
//! Provides argument parsing, help text formatting and the run orchestration.

use clap::{error::ErrorKind, Args, CommandFactory, Parser, Subcommand};
use log::debug;
use std::path::{Path, PathBuf};

use crate::{
    config::load_profile,
    constants::exit_codes,
    context::RunContext,
    error::{Error, Result},
    guid::{extract_identifiers, remap_identifiers, IdentifierMap, IdentifierSource, RandomIdentifierSource},
    ignore::PathFilter,
    ioutils::{ensure_output_dir, read_file},
    manifest::Manifest,
    processor::{PlannedEntry, Processor},
};

/// Command-line arguments structure for ouroboros.
#[derive(Parser, Debug)]
#[command(author, version, about = "ouroboros: create a new project from an existing one", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new .NET solution from a .NET solution
    Dotnet(DotnetArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DotnetArgs {
    /// Path to the template solution directory
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// Directory where the new solution will be created. Its name becomes the new project name
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Generate new project GUIDs
    #[arg(short = 'g', long)]
    pub new_guids: bool,

    /// Override the template solution name, which defaults to the template directory name
    #[arg(short, long, value_name = "NAME")]
    pub tpl_name: Option<String>,

    /// Profile file (JSON or YAML) with extension tables and extra ignore patterns.
    /// Defaults to ouroboros.{json,yaml,yml} in the template directory, if present
    #[arg(short, long, value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Report what would be created without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Cli structure.
///
/// # Exits
/// * With status code 1 and the help text if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Cli {
    match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::MissingRequiredArgument
            | ErrorKind::MissingSubcommand
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                let mut command = Cli::command().help_template(
                    r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                );
                let _ = command.print_help();
                std::process::exit(exit_codes::FAILURE);
            }
            _ => e.exit(),
        },
    }
}

/// Outcome of a run.
#[derive(Debug)]
pub struct RunSummary {
    pub context: RunContext,
    pub descriptor: PathBuf,
    /// Present when new GUIDs were requested
    pub identifiers: Option<IdentifierMap>,
    pub entries: Vec<PlannedEntry>,
}

/// Runs the `dotnet` command with random GUIDs.
pub fn run(args: DotnetArgs) -> Result<RunSummary> {
    run_with(args, &mut RandomIdentifierSource)
}

/// Runs the `dotnet` command.
///
/// # Flow
/// 1. Derives the template and output name tokens
/// 2. Loads the profile and builds the ignore filter
/// 3. Enumerates the template and locates its solution file
/// 4. Pairs the solution's project GUIDs with fresh ones, if requested
/// 5. Creates the output directory and instantiates every entry
pub fn run_with(args: DotnetArgs, identifier_source: &mut dyn IdentifierSource) -> Result<RunSummary> {
    let template_root = args.template.as_path();
    if !template_root.is_dir() {
        return Err(Error::TemplateDoesNotExistsError {
            template_dir: template_root.display().to_string(),
        });
    }

    ensure_distinct_roots(template_root, &args.output_dir)?;

    let context =
        RunContext::from_roots(template_root, args.output_dir.as_path(), args.tpl_name.as_deref())?;

    println!("Template: \n  {}", context.template_name);
    println!("Destination: \n  {}", context.output_name);

    let profile = load_profile(template_root, args.profile.as_deref())?;
    let filter = PathFilter::new(&profile.ignore)?;
    let manifest = Manifest::build(template_root, &filter, &profile)?;
    debug!("Template has {} entries", manifest.len());

    let descriptor = manifest
        .descriptor()
        .ok_or_else(|| Error::MissingDescriptorFile {
            template_dir: template_root.display().to_string(),
            extension: profile.descriptor_extension.clone(),
        })?
        .to_path_buf();

    println!("Solution file: \n  {}", descriptor.display());

    let identifiers = if args.new_guids {
        println!("Generating new guids...");
        let identifiers = regenerate_identifiers(&descriptor, identifier_source)?;
        for (original, replacement) in &identifiers {
            println!("  {} -> {}", original, replacement);
        }
        Some(identifiers)
    } else {
        None
    };

    if !args.dry_run {
        ensure_output_dir(&context.output_root)?;
    }

    println!("Generating new items...");
    let processor =
        Processor::new(&context, &profile, identifiers.as_ref()).dry_run(args.dry_run);
    let entries = processor.instantiate(&manifest)?;

    println!(
        "Template generation completed successfully in {}.",
        context.output_root.display()
    );

    Ok(RunSummary { context, descriptor, identifiers, entries })
}

/// Fails when the output root resolves to the template root, where copying a file
/// onto itself would truncate it.
pub fn ensure_distinct_roots(template_root: &Path, output_root: &Path) -> Result<()> {
    let template_root = template_root.canonicalize().map_err(|source| Error::FileReadError {
        path: template_root.display().to_string(),
        source,
    })?;
    // An output root that does not exist yet cannot be the template.
    match output_root.canonicalize() {
        Ok(resolved) if resolved == template_root => Err(Error::OutputIsTemplateError {
            output_dir: output_root.display().to_string(),
        }),
        _ => Ok(()),
    }
}

/// Reads the solution file and pairs each of its project GUIDs with a fresh one.
pub fn regenerate_identifiers(
    descriptor: &Path,
    identifier_source: &mut dyn IdentifierSource,
) -> Result<IdentifierMap> {
    let contents = read_file(descriptor)?;
    let identifiers = extract_identifiers(&contents);
    debug!("Found {} project guids in {}", identifiers.len(), descriptor.display());
    Ok(remap_identifiers(&identifiers, identifier_source))
}
