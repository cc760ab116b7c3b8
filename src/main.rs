use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use clap::Parser;
use color_eyre::Section;
use libsitechrome::{
    components::{Components, InitOptions},
    config::SiteConfig,
    host::{FileStorage, HtmlDocument, Window},
    types::Location,
};
use tracing::error;

/// Render the shared header and footer into a page and apply the visitor's
/// stored language preference, as one page load would.
#[derive(Parser, Debug)]
#[command(name = "site-chrome")]
#[command(version)]
#[command(long_about = None)]
struct Cli {
    /// Site configuration (JSON)
    #[arg(short, long, default_value = "site.json")]
    config: PathBuf,

    /// Location being loaded, as a URL or a root-relative path
    #[arg(short, long, default_value = "/")]
    url: String,

    /// Page HTML containing the header/footer placeholders
    #[arg(long)]
    html: PathBuf,

    /// Key of the navigation entry to highlight
    #[arg(short, long, default_value = "")]
    page: String,

    /// File backing the client-side storage
    #[arg(short, long, default_value = ".site-chrome.json")]
    storage: PathBuf,

    /// Pick a language from the selector after the page is rendered
    #[arg(long, value_name = "LANG")]
    select: Option<String>,

    #[arg(long)]
    no_header: bool,

    #[arg(long)]
    no_footer: bool,

    /// Write the rendered page here instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_chrome=info".parse()?)
                .add_directive("libsitechrome=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    // A broken configuration only costs the page its chrome.
    let config = match SiteConfig::load(&cli.config) {
        Ok(config) => Some(config),
        Err(e) => {
            error!(error = ?e, "Site configuration is not available");
            None
        }
    };

    let html = fs::read_to_string(&cli.html)
        .with_note(|| format!("While reading page {}", cli.html.display()))?;
    let location = Location::parse(&cli.url)?;
    let mut window = Window::new(location, FileStorage::new(&cli.storage), HtmlDocument::new(html));

    let mut components = Components::new(config);
    components.init(
        &mut window,
        &InitOptions {
            current_page: cli.page.clone(),
            render_header: !cli.no_header,
            render_footer: !cli.no_footer,
        },
    );

    if let Some(lang) = cli.select.as_deref() {
        components.select_language(&mut window, lang);
    }
    components.run_deferred(&mut window);

    let (_, document, navigation) = window.into_parts();
    let html = document.into_html();
    match &cli.out {
        Some(out) => {
            fs::write(out, &html).with_note(|| format!("While writing {}", out.display()))?
        }
        None => io::stdout().write_all(html.as_bytes())?,
    }

    if let Some(target) = navigation {
        eprintln!("redirect: {target}");
    }

    Ok(())
}
