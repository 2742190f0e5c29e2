//! Turn a Next.js project into an installable web app.
//!
//! The pipeline is: inspect the project, collect answers, install the
//! service-worker dependency, render the icon and splash catalog from a logo,
//! write `manifest.json`, patch `next.config.*` and leave a setup guide.

#[macro_use]
pub mod logger;

pub mod asset_gen;
pub mod branding;
pub mod location;
pub mod manifest;
pub mod next_config;
pub mod project;
pub mod prompt;
pub mod report;
pub mod setup;
pub mod sizes;
