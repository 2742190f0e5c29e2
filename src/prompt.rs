//! Interactive questions.
//!
//! Every step returns a [`Prompted`] value; a cancelled prompt travels back
//! to `main`, which is the only place that decides to exit.

use crate::branding::{non_empty, AnswerError, BrandingAnswers, HexColor};
use crate::location::AssetsLocation;
use crate::project::ProjectInfo;
use crate::setup::{Answers, GenerationMode, ProjectStructure};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use std::io;
use std::path::PathBuf;

pub const DEFAULT_THEME_COLOR: &str = "#000000";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompted<T> {
    Answered(T),
    Cancelled,
}

/// Unwrap an answer or hand the cancellation back to the caller
macro_rules! answered {
    ($step:expr) => {
        match $step {
            Prompted::Answered(value) => value,
            Prompted::Cancelled => return Ok(Prompted::Cancelled),
        }
    };
}

/// Answers supplied on the command line; `None` means "ask"
#[derive(Debug, Clone, Default)]
pub struct Prefilled {
    pub structure: Option<ProjectStructure>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub description: Option<String>,
    pub theme_color: Option<String>,
    pub background_color: Option<String>,
    pub assets: Option<String>,
    pub logo: Option<PathBuf>,
    pub manual_assets: bool,
}

pub struct Questionnaire {
    theme: ColorfulTheme,
    interactive: bool,
}

impl Questionnaire {
    /// With `interactive == false` every unanswered question takes its default,
    /// and a question without a default is an error.
    pub fn new(interactive: bool) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            interactive,
        }
    }

    pub fn collect(&self, prefilled: &Prefilled, project: &ProjectInfo) -> Result<Prompted<Answers>> {
        let structure = answered!(self.structure(prefilled.structure)?);

        let name = answered!(self.text(
            "name",
            "Application name",
            prefilled.name.as_deref(),
            project.name.as_deref(),
        )?);
        let short_name = answered!(self.text(
            "short name",
            "Short name (home screen label)",
            prefilled.short_name.as_deref(),
            Some(name.as_str()),
        )?);
        let description = answered!(self.text(
            "description",
            "Description",
            prefilled.description.as_deref(),
            project.description.as_deref(),
        )?);
        let theme_color = answered!(self.color(
            "theme color",
            "Theme color",
            prefilled.theme_color.as_deref(),
            DEFAULT_THEME_COLOR,
        )?);
        let background_color = answered!(self.color(
            "background color",
            "Background color",
            prefilled.background_color.as_deref(),
            DEFAULT_BACKGROUND_COLOR,
        )?);

        let location = answered!(self.location(prefilled.assets.as_deref())?);
        let generation = answered!(self.generation(prefilled)?);

        Ok(Prompted::Answered(Answers {
            structure,
            branding: BrandingAnswers {
                name,
                short_name,
                description,
                theme_color,
                background_color,
            },
            location,
            generation,
        }))
    }

    fn structure(&self, prefilled: Option<ProjectStructure>) -> Result<Prompted<ProjectStructure>> {
        if let Some(structure) = prefilled {
            return Ok(Prompted::Answered(structure));
        }
        if !self.interactive {
            return Ok(Prompted::Answered(ProjectStructure::AppRouter));
        }

        let items = ["App Router (app/)", "Pages Router (pages/)"];
        let choice = answered!(select(&self.theme, "Which router does the project use?", &items)?);
        Ok(Prompted::Answered(if choice == 0 {
            ProjectStructure::AppRouter
        } else {
            ProjectStructure::PagesRouter
        }))
    }

    fn text(
        &self,
        field: &'static str,
        prompt: &str,
        prefilled: Option<&str>,
        default: Option<&str>,
    ) -> Result<Prompted<String>> {
        if let Some(value) = prefilled {
            return Ok(Prompted::Answered(non_empty(field, value)?));
        }
        if !self.interactive {
            let value = default.ok_or(AnswerError::Missing(field))?;
            return Ok(Prompted::Answered(non_empty(field, value)?));
        }

        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .validate_with(move |value: &String| non_empty(field, value).map(|_| ()));
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        let value = answered!(interrupted_as_cancel(input.interact_text())?);
        Ok(Prompted::Answered(non_empty(field, &value)?))
    }

    fn color(
        &self,
        field: &'static str,
        prompt: &str,
        prefilled: Option<&str>,
        default: &str,
    ) -> Result<Prompted<HexColor>> {
        if let Some(value) = prefilled {
            return Ok(Prompted::Answered(HexColor::parse(field, value)?));
        }
        if !self.interactive {
            return Ok(Prompted::Answered(HexColor::parse(field, default)?));
        }

        let input = Input::<String>::with_theme(&self.theme)
            .with_prompt(format!("{prompt} (#rrggbb)"))
            .default(default.to_string())
            .validate_with(move |value: &String| HexColor::parse(field, value).map(|_| ()));
        let value = answered!(interrupted_as_cancel(input.interact_text())?);
        Ok(Prompted::Answered(HexColor::parse(field, &value)?))
    }

    fn location(&self, prefilled: Option<&str>) -> Result<Prompted<AssetsLocation>> {
        if let Some(value) = prefilled {
            return Ok(Prompted::Answered(AssetsLocation::parse(value)?));
        }
        if !self.interactive {
            return Ok(Prompted::Answered(AssetsLocation::Assets));
        }

        let items = ["public/assets", "public/icons", "Custom (public/...)"];
        let choice = answered!(select(&self.theme, "Where should the icons go?", &items)?);
        let location = match choice {
            0 => AssetsLocation::Assets,
            1 => AssetsLocation::Icons,
            _ => {
                let input = Input::<String>::with_theme(&self.theme)
                    .with_prompt("Directory inside public/")
                    .validate_with(|value: &String| AssetsLocation::custom(value).map(|_| ()));
                let suffix = answered!(interrupted_as_cancel(input.interact_text())?);
                AssetsLocation::custom(&suffix)?
            }
        };
        Ok(Prompted::Answered(location))
    }

    fn generation(&self, prefilled: &Prefilled) -> Result<Prompted<GenerationMode>> {
        if let Some(logo) = &prefilled.logo {
            return Ok(Prompted::Answered(GenerationMode::FromLogo(logo.clone())));
        }
        if prefilled.manual_assets {
            return Ok(Prompted::Answered(GenerationMode::Manual));
        }
        if !self.interactive {
            return Err(AnswerError::Missing("logo").into());
        }

        let items = [
            "Generate every icon and splash screen from my logo",
            "I'll add the images myself",
        ];
        let choice = answered!(select(&self.theme, "How should the images be created?", &items)?);
        if choice == 1 {
            return Ok(Prompted::Answered(GenerationMode::Manual));
        }

        let input = Input::<String>::with_theme(&self.theme)
            .with_prompt("Path to the logo (PNG/JPEG/WebP, at least 512x512)")
            .validate_with(|value: &String| {
                if PathBuf::from(value.trim()).is_file() {
                    Ok(())
                } else {
                    Err(format!("`{}` is not a file", value.trim()))
                }
            });
        let path = answered!(interrupted_as_cancel(input.interact_text())?);
        Ok(Prompted::Answered(GenerationMode::FromLogo(PathBuf::from(
            path.trim(),
        ))))
    }
}

/// Esc or `q` cancels a select prompt
fn select(theme: &ColorfulTheme, prompt: &str, items: &[&str]) -> Result<Prompted<usize>> {
    let choice = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt();
    Ok(match interrupted_as_cancel(choice)? {
        Prompted::Answered(Some(index)) => Prompted::Answered(index),
        Prompted::Answered(None) | Prompted::Cancelled => Prompted::Cancelled,
    })
}

fn interrupted_as_cancel<T>(result: dialoguer::Result<T>) -> Result<Prompted<T>> {
    match result {
        Ok(value) => Ok(Prompted::Answered(value)),
        Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => {
            Ok(Prompted::Cancelled)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn project(name: Option<&str>, description: Option<&str>) -> ProjectInfo {
        ProjectInfo {
            root: Path::new(".").to_path_buf(),
            name: name.map(str::to_string),
            description: description.map(str::to_string),
        }
    }

    fn answers(result: Prompted<Answers>) -> Answers {
        match result {
            Prompted::Answered(answers) => answers,
            Prompted::Cancelled => panic!("non-interactive run cannot be cancelled"),
        }
    }

    #[test]
    fn test_non_interactive_uses_defaults() {
        let prefilled = Prefilled {
            manual_assets: true,
            ..Default::default()
        };
        let result = Questionnaire::new(false)
            .collect(&prefilled, &project(Some("shop"), Some("A shop")))
            .unwrap();
        let answers = answers(result);

        assert_eq!(answers.structure, ProjectStructure::AppRouter);
        assert_eq!(answers.branding.name, "shop");
        assert_eq!(answers.branding.short_name, "shop");
        assert_eq!(answers.branding.description, "A shop");
        assert_eq!(answers.branding.theme_color.as_str(), DEFAULT_THEME_COLOR);
        assert_eq!(answers.location, AssetsLocation::Assets);
        assert_eq!(answers.generation, GenerationMode::Manual);
    }

    #[test]
    fn test_prefilled_values_win() {
        let prefilled = Prefilled {
            structure: Some(ProjectStructure::PagesRouter),
            name: Some("Acme".into()),
            short_name: Some("A".into()),
            description: Some("d".into()),
            theme_color: Some("#112233".into()),
            background_color: Some("#FFFFFF".into()),
            assets: Some("img/pwa".into()),
            logo: Some(PathBuf::from("logo.png")),
            manual_assets: false,
        };
        let answers = answers(
            Questionnaire::new(false)
                .collect(&prefilled, &project(Some("shop"), None))
                .unwrap(),
        );

        assert_eq!(answers.branding.name, "Acme");
        assert_eq!(answers.branding.short_name, "A");
        assert_eq!(answers.branding.background_color.as_str(), "#FFFFFF");
        assert_eq!(answers.location.relative_path(), "public/img/pwa");
        assert_eq!(
            answers.generation,
            GenerationMode::FromLogo(PathBuf::from("logo.png"))
        );
    }

    #[test]
    fn test_missing_answer_is_an_error() {
        let prefilled = Prefilled {
            manual_assets: true,
            ..Default::default()
        };
        let err = Questionnaire::new(false)
            .collect(&prefilled, &project(None, Some("d")))
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<AnswerError>(),
            Some(&AnswerError::Missing("name"))
        );

        let err = Questionnaire::new(false)
            .collect(&Prefilled::default(), &project(Some("shop"), Some("d")))
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<AnswerError>(),
            Some(&AnswerError::Missing("logo"))
        );
    }

    #[test]
    fn test_prefilled_colors_are_validated() {
        let prefilled = Prefilled {
            theme_color: Some("#abc".into()),
            manual_assets: true,
            ..Default::default()
        };
        let err = Questionnaire::new(false)
            .collect(&prefilled, &project(Some("shop"), Some("d")))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AnswerError>(),
            Some(AnswerError::InvalidColor {
                field: "theme color",
                ..
            })
        ));
    }
}
