//! voicecloning CLI entry point.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use voicecloning_client::backend::{HttpProjectService, ProjectService, create_service};
use voicecloning_client::cli::{Args, Command};
use voicecloning_client::config::ClientConfig;
use voicecloning_client::form::{FormController, SubmitOutcome};
use voicecloning_client::logging;
use voicecloning_client::notify::StderrNotifier;
use voicecloning_client::page::{Bootstrapper, ClickOutcome, Page};

type App = Bootstrapper<HttpProjectService, StderrNotifier>;

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = ClientConfig::resolve(args.config.as_deref(), args.config_overrides())
        .context("Failed to load configuration")?;
    let service = create_service(&config).context("Failed to create HTTP client")?;
    let app = Bootstrapper::new(service, StderrNotifier, config.asset_url.clone());

    match &args.command {
        Command::Show { id } => show_project(&app, id, args.output.as_deref()),
        Command::Health => check_health(&app),
        command => {
            let route = command
                .route()
                .context("Command does not load a page")?;

            match app.load(&route) {
                Page::Listing(view) => {
                    info!("Rendered {} project(s)", view.card_count());
                    write_markup(&view.to_html(), args.output.as_deref())
                }
                Page::Create(mut form) => {
                    command.fill_form(&mut form);
                    create_project(&app, &form)
                }
                Page::Inert => bail!("Nothing to do for route {route}"),
            }
        }
    }
}

fn show_project(app: &App, id: &str, output: Option<&Path>) -> Result<()> {
    let mut view = app.empty_view();

    match app.handle_card_click(&mut view, id) {
        ClickOutcome::PopupOpened(_) => {
            let popup = view
                .popup()
                .context("Popup missing after successful fetch")?;
            write_markup(&popup.markup, output)
        }
        ClickOutcome::Ignored => {
            eprintln!("'{id}' is a placeholder card; nothing to show.");
            Ok(())
        }
        ClickOutcome::Failed => bail!("Failed to fetch project '{id}'"),
    }
}

fn create_project(app: &App, form: &FormController) -> Result<()> {
    if !form.submit_enabled() {
        eprintln!("The form is not complete:");
        for violation in form.violations() {
            eprintln!("  - {violation}");
        }
    }

    match app.submit(form) {
        SubmitOutcome::Redirect { project, to } => {
            println!("Project created: {}", project.id);
            println!("  Title: {}", project.title);
            println!("  Quality: {}", project.quality);
            println!("  Uploaded audio files: {}", project.audio_files.len());
            info!(%to, "returning to listing");
            Ok(())
        }
        SubmitOutcome::Suppressed => bail!("Submission suppressed: form is invalid"),
        SubmitOutcome::Failed { message } => bail!("Failed to create project: {message}"),
    }
}

fn check_health(app: &App) -> Result<()> {
    let health = app
        .service()
        .health()
        .context("Failed to reach project service")?;

    println!("Service status: {}", health.status);
    if !health.is_ok() {
        bail!("Service is unhealthy");
    }
    Ok(())
}

fn write_markup(markup: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            file.write_all(markup.as_bytes())
                .with_context(|| format!("Failed to write markup to: {}", path.display()))?;
            println!("Markup saved to: {}", path.display());
        }
        None => print!("{markup}"),
    }
    Ok(())
}
