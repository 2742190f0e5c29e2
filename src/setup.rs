use crate::asset_gen::{self, GeneratedAsset};
use crate::branding::BrandingAnswers;
use crate::location::{AssetsLocation, PUBLIC_DIR};
use crate::manifest::{build_manifest, write_manifest};
use crate::next_config::{patch_config, ConfigFileKind};
use crate::project::{PackageInstaller, PackageManager, PWA_PACKAGE};
use crate::report::{write_report, ReportContext};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStructure {
    AppRouter,
    PagesRouter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationMode {
    FromLogo(PathBuf),
    /// The operator provides the catalog images by hand
    Manual,
}

/// Everything the operator decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub structure: ProjectStructure,
    pub branding: BrandingAnswers,
    pub location: AssetsLocation,
    pub generation: GenerationMode,
}

#[derive(Debug, Clone)]
pub struct SetupOptions {
    pub package_manager: PackageManager,
    pub skip_install: bool,
}

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct SetupOutcome {
    pub assets: Vec<GeneratedAsset>,
    pub manifest_path: PathBuf,
    pub config: ConfigFileKind,
    pub report_path: PathBuf,
}

/// Apply `answers` to the project at `project_root`.
///
/// Steps run in order and the first failure ends the run.
pub fn run_setup(
    project_root: &Path,
    answers: &Answers,
    options: &SetupOptions,
    installer: &dyn PackageInstaller,
) -> Result<SetupOutcome> {
    if options.skip_install {
        log!("install"; "Skipping install of {PWA_PACKAGE}");
    } else {
        installer
            .install_package(PWA_PACKAGE)
            .with_context(|| format!("Failed to install {PWA_PACKAGE}"))?;
    }

    let assets = match &answers.generation {
        GenerationMode::FromLogo(logo) => {
            let output_dir = answers.location.directory(project_root);
            log!("assets"; "Generating images into {}", answers.location);
            asset_gen::generate(logo, &output_dir).context("Image generation failed")?
        }
        GenerationMode::Manual => {
            log!("assets"; "Skipping image generation, see PWA_SETUP.md for the list of files");
            Vec::new()
        }
    };

    let manifest = build_manifest(&answers.branding, &answers.location);
    let manifest_path = write_manifest(&project_root.join(PUBLIC_DIR), &manifest)?;

    let config = patch_config(project_root)?;

    let report_path = write_report(
        project_root,
        &ReportContext {
            answers,
            config,
            package_manager: options.package_manager,
            installed: !options.skip_install,
        },
    )?;

    Ok(SetupOutcome {
        assets,
        manifest_path,
        config,
        report_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingInstaller {
        installed: RefCell<Vec<String>>,
        fail: bool,
    }

    impl PackageInstaller for RecordingInstaller {
        fn install_package(&self, name: &str) -> Result<()> {
            self.installed.borrow_mut().push(name.to_string());
            if self.fail {
                anyhow::bail!("exit status: 1");
            }
            Ok(())
        }
    }

    fn manual_answers() -> Answers {
        Answers {
            structure: ProjectStructure::AppRouter,
            branding: BrandingAnswers::new("Acme", "Acme", "d", "#112233", "#ffffff").unwrap(),
            location: AssetsLocation::Icons,
            generation: GenerationMode::Manual,
        }
    }

    fn options(skip_install: bool) -> SetupOptions {
        SetupOptions {
            package_manager: PackageManager::Npm,
            skip_install,
        }
    }

    #[test]
    fn test_manual_run_writes_manifest_config_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let installer = RecordingInstaller::default();

        let outcome = run_setup(dir.path(), &manual_answers(), &options(false), &installer).unwrap();

        assert_eq!(*installer.installed.borrow(), [PWA_PACKAGE]);
        assert!(outcome.assets.is_empty());
        assert_eq!(outcome.manifest_path, dir.path().join("public/manifest.json"));
        assert_eq!(outcome.config, ConfigFileKind::CommonJs);
        assert!(dir.path().join("next.config.js").is_file());
        assert!(outcome.report_path.is_file());
        assert!(!dir.path().join("public/icons").exists());
    }

    #[test]
    fn test_install_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let installer = RecordingInstaller {
            fail: true,
            ..Default::default()
        };

        let err = run_setup(dir.path(), &manual_answers(), &options(false), &installer).unwrap_err();

        assert!(format!("{err:#}").contains("exit status: 1"));
        assert!(!dir.path().join("public").exists());
        assert!(!dir.path().join("next.config.js").exists());
    }

    #[test]
    fn test_skip_install_never_calls_installer() {
        let dir = tempfile::tempdir().unwrap();
        let installer = RecordingInstaller::default();

        run_setup(dir.path(), &manual_answers(), &options(true), &installer).unwrap();

        assert!(installer.installed.borrow().is_empty());
    }

    #[test]
    fn test_small_logo_stops_before_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("logo.png");
        image::RgbaImage::new(511, 511).save(&logo).unwrap();

        let answers = Answers {
            generation: GenerationMode::FromLogo(logo),
            ..manual_answers()
        };
        let err = run_setup(dir.path(), &answers, &options(true), &RecordingInstaller::default())
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<asset_gen::GenerationError>(),
            Some(asset_gen::GenerationError::SourceTooSmall { .. })
        ));
        assert!(!dir.path().join("public").exists());
    }
}
