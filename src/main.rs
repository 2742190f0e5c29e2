use anyhow::Result;
use clap::{Parser, ValueEnum};
use pwa_scaffold::{
    debug, log, logger,
    project::{inspect_project, CommandInstaller, PackageManager},
    prompt::{Prefilled, Prompted, Questionnaire},
    setup::{run_setup, ProjectStructure, SetupOptions},
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Structure {
    /// App Router (app/)
    App,
    /// Pages Router (pages/)
    Pages,
}

#[derive(Debug, Parser)]
#[clap(
    name = "pwa-scaffold",
    about = "Turn a Next.js project into an installable PWA"
)]
struct Args {
    /// Root of the Next.js project.
    #[clap(short, long, value_name = "DIR", default_value = ".")]
    project: PathBuf,

    /// Application name.
    #[clap(long)]
    name: Option<String>,

    /// Short name shown under the home screen icon.
    #[clap(long)]
    short_name: Option<String>,

    /// Application description.
    #[clap(long)]
    description: Option<String>,

    /// Theme color (#rrggbb).
    #[clap(long, value_name = "HEX")]
    theme_color: Option<String>,

    /// Background color (#rrggbb).
    #[clap(long, value_name = "HEX")]
    background_color: Option<String>,

    /// Router used by the project.
    #[clap(long, value_enum)]
    structure: Option<Structure>,

    /// Assets directory inside public/: `assets`, `icons` or a custom path.
    #[clap(long, value_name = "DIR")]
    assets: Option<String>,

    /// Logo to render every icon and splash screen from (at least 512x512).
    #[clap(long, value_name = "FILE", conflicts_with = "manual_assets")]
    logo: Option<PathBuf>,

    /// Do not generate images, list the files to provide instead.
    #[clap(long)]
    manual_assets: bool,

    /// Do not install @ducanh2912/next-pwa.
    #[clap(long)]
    skip_install: bool,

    /// Never prompt; take defaults for anything not given as a flag.
    #[clap(short, long)]
    yes: bool,

    /// Print debug output.
    #[clap(short, long)]
    verbose: bool,
}

impl Args {
    fn prefilled(&self) -> Prefilled {
        Prefilled {
            structure: self.structure.map(|s| match s {
                Structure::App => ProjectStructure::AppRouter,
                Structure::Pages => ProjectStructure::PagesRouter,
            }),
            name: self.name.clone(),
            short_name: self.short_name.clone(),
            description: self.description.clone(),
            theme_color: self.theme_color.clone(),
            background_color: self.background_color.clone(),
            assets: self.assets.clone(),
            logo: self.logo.clone(),
            manual_assets: self.manual_assets,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::set_verbose(args.verbose);

    match run(&args) {
        Ok(Prompted::Answered(())) => {
            println!();
            println!("✓ Your app is ready to be installed. Read PWA_SETUP.md for the last steps.");
            ExitCode::SUCCESS
        }
        Ok(Prompted::Cancelled) => {
            println!("Setup cancelled, nothing else was changed.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log!("error"; "{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<Prompted<()>> {
    let project = inspect_project(&args.project)?;
    debug!("setup"; "project root {}", project.root.display());

    let answers = match Questionnaire::new(!args.yes).collect(&args.prefilled(), &project)? {
        Prompted::Answered(answers) => answers,
        Prompted::Cancelled => return Ok(Prompted::Cancelled),
    };

    let package_manager = PackageManager::detect(&args.project);
    debug!("setup"; "using {package_manager}");

    let installer = CommandInstaller {
        manager: package_manager,
        project_root: args.project.clone(),
    };
    let options = SetupOptions {
        package_manager,
        skip_install: args.skip_install,
    };
    run_setup(&args.project, &answers, &options, &installer)?;

    Ok(Prompted::Answered(()))
}
