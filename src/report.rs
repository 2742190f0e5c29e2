//! The `PWA_SETUP.md` guide left in the project root.

use crate::location::PUBLIC_DIR;
use crate::manifest::MANIFEST_FILE;
use crate::next_config::ConfigFileKind;
use crate::project::{PackageManager, PWA_PACKAGE};
use crate::setup::{Answers, GenerationMode, ProjectStructure};
use crate::sizes::{splash_entries, Category, SIZE_CATALOG};
use anyhow::{Context, Result};
use std::fmt::Write;
use std::path::{Path, PathBuf};

pub const REPORT_FILE: &str = "PWA_SETUP.md";

pub struct ReportContext<'a> {
    pub answers: &'a Answers,
    pub config: ConfigFileKind,
    pub package_manager: PackageManager,
    pub installed: bool,
}

pub fn render_report(ctx: &ReportContext<'_>) -> String {
    let mut out = String::new();
    let _ = write_sections(&mut out, ctx);
    out
}

fn write_sections(out: &mut String, ctx: &ReportContext<'_>) -> std::fmt::Result {
    let answers = ctx.answers;
    let branding = &answers.branding;
    let location = &answers.location;

    writeln!(out, "# PWA setup for {}", branding.name)?;
    writeln!(out)?;
    writeln!(out, "## What was done")?;
    writeln!(out)?;
    if ctx.installed {
        writeln!(out, "- Installed `{PWA_PACKAGE}` with {}", ctx.package_manager)?;
    } else {
        writeln!(
            out,
            "- Skipped installing `{PWA_PACKAGE}`; run `{} {}`",
            ctx.package_manager,
            ctx.package_manager.install_args(PWA_PACKAGE).join(" ")
        )?;
    }
    writeln!(out, "- Wrote `{PUBLIC_DIR}/{MANIFEST_FILE}`")?;
    writeln!(
        out,
        "- Wrote `{}` (any previous content was replaced)",
        ctx.config.file_name()
    )?;
    match &answers.generation {
        GenerationMode::FromLogo(logo) => writeln!(
            out,
            "- Generated {} images from `{}` into `{location}`",
            SIZE_CATALOG.len(),
            logo.display()
        )?,
        GenerationMode::Manual => writeln!(
            out,
            "- No images were generated; add the files listed below to `{location}`"
        )?,
    }
    writeln!(out)?;

    if answers.generation == GenerationMode::Manual {
        writeln!(out, "## Images to provide")?;
        writeln!(out)?;
        writeln!(
            out,
            "Every file must have exactly the listed size. Transparent padding is fine."
        )?;
        writeln!(out)?;
        writeln!(out, "| File | Size |")?;
        writeln!(out, "| --- | --- |")?;
        for spec in SIZE_CATALOG {
            writeln!(out, "| `{}/{}` | {} |", location, spec.file_name, spec.dimension)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "## Link the manifest")?;
    writeln!(out)?;
    match answers.structure {
        ProjectStructure::AppRouter => write_app_router(out, answers)?,
        ProjectStructure::PagesRouter => write_pages_router(out, answers)?,
    }
    writeln!(out)?;

    writeln!(out, "## Ignore generated service-worker files")?;
    writeln!(out)?;
    writeln!(out, "```gitignore")?;
    writeln!(out, "{PUBLIC_DIR}/sw.js")?;
    writeln!(out, "{PUBLIC_DIR}/sw.js.map")?;
    writeln!(out, "{PUBLIC_DIR}/workbox-*.js")?;
    writeln!(out, "{PUBLIC_DIR}/workbox-*.js.map")?;
    writeln!(out, "{PUBLIC_DIR}/swe-worker-*.js")?;
    writeln!(out, "```")?;
    writeln!(out)?;

    writeln!(out, "## Try it")?;
    writeln!(out)?;
    writeln!(
        out,
        "The service worker is disabled in development. Build and start a production server:"
    )?;
    writeln!(out)?;
    writeln!(out, "```sh")?;
    writeln!(
        out,
        "{} && {}",
        ctx.package_manager.run_script("build"),
        ctx.package_manager.run_script("start")
    )?;
    writeln!(out, "```")?;
    writeln!(out)?;
    writeln!(
        out,
        "Then open the site in Chrome and check the Application tab for the manifest and service worker."
    )?;
    Ok(())
}

fn write_app_router(out: &mut String, answers: &Answers) -> std::fmt::Result {
    let branding = &answers.branding;
    let location = &answers.location;
    let favicon = first_of(Category::Favicon);
    let apple = last_of(Category::AppleTouch);

    writeln!(out, "Add this to `app/layout.tsx`:")?;
    writeln!(out)?;
    writeln!(out, "```tsx")?;
    writeln!(out, "import type {{ Metadata, Viewport }} from \"next\";")?;
    writeln!(out)?;
    writeln!(out, "export const metadata: Metadata = {{")?;
    writeln!(out, "  title: {},", js_string(&branding.name))?;
    writeln!(out, "  description: {},", js_string(&branding.description))?;
    writeln!(out, "  manifest: \"/{MANIFEST_FILE}\",")?;
    writeln!(out, "  appleWebApp: {{")?;
    writeln!(out, "    capable: true,")?;
    writeln!(out, "    title: {},", js_string(&branding.short_name))?;
    writeln!(out, "    statusBarStyle: \"default\",")?;
    writeln!(out, "  }},")?;
    writeln!(out, "  icons: {{")?;
    if let Some(favicon) = favicon {
        writeln!(out, "    icon: \"{}\",", location.icon_src(favicon))?;
    }
    if let Some(apple) = apple {
        writeln!(out, "    apple: \"{}\",", location.icon_src(apple))?;
    }
    writeln!(out, "  }},")?;
    writeln!(out, "}};")?;
    writeln!(out)?;
    writeln!(out, "export const viewport: Viewport = {{")?;
    writeln!(out, "  themeColor: \"{}\",", branding.theme_color)?;
    writeln!(out, "}};")?;
    writeln!(out, "```")?;
    Ok(())
}

fn write_pages_router(out: &mut String, answers: &Answers) -> std::fmt::Result {
    let branding = &answers.branding;
    let location = &answers.location;

    writeln!(out, "Add this to `pages/_document.tsx`:")?;
    writeln!(out)?;
    writeln!(out, "```tsx")?;
    writeln!(out, "import {{ Html, Head, Main, NextScript }} from \"next/document\";")?;
    writeln!(out)?;
    writeln!(out, "export default function Document() {{")?;
    writeln!(out, "  return (")?;
    writeln!(out, "    <Html lang=\"en\">")?;
    writeln!(out, "      <Head>")?;
    writeln!(out, "        <link rel=\"manifest\" href=\"/{MANIFEST_FILE}\" />")?;
    writeln!(
        out,
        "        <meta name=\"theme-color\" content=\"{}\" />",
        branding.theme_color
    )?;
    writeln!(out, "        <meta name=\"apple-mobile-web-app-capable\" content=\"yes\" />")?;
    writeln!(
        out,
        "        <meta name=\"apple-mobile-web-app-title\" content={{{}}} />",
        js_string(&branding.short_name)
    )?;
    for spec in SIZE_CATALOG.iter().filter(|s| s.category == Category::Favicon) {
        writeln!(
            out,
            "        <link rel=\"icon\" sizes=\"{}\" href=\"{}\" />",
            spec.dimension,
            location.icon_src(spec.file_name)
        )?;
    }
    for spec in SIZE_CATALOG
        .iter()
        .filter(|s| s.category == Category::AppleTouch)
    {
        writeln!(
            out,
            "        <link rel=\"apple-touch-icon\" sizes=\"{}\" href=\"{}\" />",
            spec.dimension,
            location.icon_src(spec.file_name)
        )?;
    }
    for spec in splash_entries() {
        // iOS matches startup images on CSS pixels; catalog sizes are at 2x or 3x
        let ratio = if spec.dimension.width() >= 1125 && spec.dimension.width() < 1536 {
            3
        } else {
            2
        };
        writeln!(
            out,
            "        <link rel=\"apple-touch-startup-image\" href=\"{}\" media=\"(device-width: {}px) and (device-height: {}px) and (-webkit-device-pixel-ratio: {ratio})\" />",
            location.icon_src(spec.file_name),
            spec.dimension.width() / ratio,
            spec.dimension.height() / ratio,
        )?;
    }
    writeln!(out, "      </Head>")?;
    writeln!(out, "      <body>")?;
    writeln!(out, "        <Main />")?;
    writeln!(out, "        <NextScript />")?;
    writeln!(out, "      </body>")?;
    writeln!(out, "    </Html>")?;
    writeln!(out, "  );")?;
    writeln!(out, "}}")?;
    writeln!(out, "```")?;
    Ok(())
}

/// A double-quoted JS string literal, usable in TS code and as a JSX expression
fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

fn first_of(category: Category) -> Option<&'static str> {
    SIZE_CATALOG
        .iter()
        .find(|s| s.category == category)
        .map(|s| s.file_name)
}

fn last_of(category: Category) -> Option<&'static str> {
    SIZE_CATALOG
        .iter()
        .rev()
        .find(|s| s.category == category)
        .map(|s| s.file_name)
}

/// Writes `PWA_SETUP.md` into `project_root`
pub fn write_report(project_root: &Path, ctx: &ReportContext<'_>) -> Result<PathBuf> {
    let path = project_root.join(REPORT_FILE);
    std::fs::write(&path, render_report(ctx)).context("Failed to write PWA_SETUP.md")?;
    log!("report"; "✓ Generated {REPORT_FILE}");
    Ok(path)
}
