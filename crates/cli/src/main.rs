use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use summarist_core::{
    Config, ConfigBuilder, HostBindings, Outcome, PageContext, RestEndpoint, Resolver, Summarizer, fetch_file,
    fetch_stdin, fetch_url,
};
use tracing_subscriber::EnvFilter;
use url::Url;

mod desktop;
mod echo;

use desktop::{BrowserLauncher, PrintLauncher, PromptSink, TerminalNotifier};
use echo::{format_size, print_banner, print_delivery_details, print_info, print_step, print_warning};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Summarize a CMS article with an AI chat service
#[derive(Parser, Debug)]
#[command(name = "summarist")]
#[command(author = "Summarist Contributors")]
#[command(version)]
#[command(about = "Hand a CMS article to an AI chat for summarizing", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Address of the page (default: INPUT when it is a URL, or the file's path)
    #[arg(long, value_name = "URL")]
    page_url: Option<Url>,

    /// Config file (default: <config dir>/summarist/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Post ID for the REST lookup
    #[arg(long, value_name = "ID")]
    post_id: Option<u64>,

    /// REST API root, e.g. https://example.com/wp-json/
    #[arg(long, value_name = "URL")]
    rest_url: Option<Url>,

    /// Nonce sent with the REST lookup
    #[arg(long, value_name = "NONCE")]
    nonce: Option<String>,

    /// File holding the editor's unsaved post content
    #[arg(long, value_name = "FILE")]
    editor_state: Option<PathBuf>,

    /// File holding the page-builder preview document
    #[arg(long, value_name = "FILE")]
    preview: Option<PathBuf>,

    /// Time budget for finding content, in milliseconds
    #[arg(long, value_name = "MS")]
    deadline_ms: Option<u64>,

    /// Print the chat URL instead of opening it; leaves the clipboard alone
    #[arg(long)]
    dry_run: bool,

    /// Print the full clipboard prompt on stdout
    #[arg(long)]
    print_prompt: bool,

    /// Do not write to the system clipboard
    #[arg(long)]
    no_clipboard: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "summarist_core=debug,summarist=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn is_remote(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Resolves the address the page is summarized under.
fn page_url(args: &Args) -> anyhow::Result<Url> {
    if let Some(url) = &args.page_url {
        return Ok(url.clone());
    }
    if is_remote(&args.input) {
        return Url::parse(&args.input).with_context(|| format!("Invalid URL: {}", args.input));
    }
    if args.input == "-" {
        bail!("--page-url is required when reading from stdin");
    }

    let path = fs::canonicalize(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?;
    Url::from_file_path(&path).map_err(|_| anyhow::anyhow!("Cannot express {} as a URL", path.display()))
}

fn read_binding(path: Option<&Path>) -> anyhow::Result<Option<String>> {
    path.map(|path| fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display())))
        .transpose()
}

/// Builds the REST endpoint from flags, filling gaps from what the page exposes.
fn rest_override(args: &Args, page: &PageContext) -> anyhow::Result<Option<RestEndpoint>> {
    if args.post_id.is_none() && args.rest_url.is_none() && args.nonce.is_none() {
        return Ok(None);
    }

    let discovered = page.bindings.rest.as_ref();
    let Some(post_id) = args.post_id.or(discovered.map(|rest| rest.post_id)) else {
        print_warning("No post ID known; the REST lookup is skipped");
        return Ok(None);
    };

    let base = match (&args.rest_url, discovered) {
        (Some(root), _) => RestEndpoint::posts_base(root),
        (None, Some(rest)) => rest.base.clone(),
        (None, None) => {
            let root = page.url.join("/wp-json/").context("Cannot derive REST URL from page URL")?;
            RestEndpoint::posts_base(&root)
        }
    };
    let nonce = args.nonce.clone().or_else(|| discovered.and_then(|rest| rest.nonce.clone()));

    Ok(Some(RestEndpoint { base, post_id, nonce }))
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let config = Config::load(args.config.as_deref()).context("Failed to load config")?;
    let mut builder = ConfigBuilder::from_config(config).reset_delay_ms(0);
    if let Some(ms) = args.deadline_ms {
        builder = builder.deadline_ms(ms);
    }
    Ok(builder.build())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let config = load_config(&args)?;

    let html = if args.input == "-" {
        if args.verbose {
            print_step(1, 3, "Reading from stdin");
        }
        fetch_stdin().context("Failed to read from stdin")?
    } else if is_remote(&args.input) {
        if args.verbose {
            print_step(1, 3, &format!("Fetching from {}", args.input.bright_white().underline()));
        }
        fetch_url(&args.input, &config.fetch_config()).await.context("Failed to fetch URL")?
    } else {
        if args.verbose {
            print_step(1, 3, &format!("Reading from file {}", args.input.bright_white()));
        }
        fetch_file(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?
    };

    if args.verbose {
        eprintln!("  {} {}", "Size:".dimmed(), format_size(html.len()).bright_white());
        eprintln!();
        print_step(2, 3, "Inspecting page");
    }

    let page = PageContext::new(&html, page_url(&args)?);
    let overrides = HostBindings {
        editor_state: read_binding(args.editor_state.as_deref())?,
        preview_markup: read_binding(args.preview.as_deref())?,
        rest: rest_override(&args, &page)?,
    };
    let page = page.with_bindings(overrides);

    if args.verbose {
        eprintln!("  {} {}", "Page:".dimmed(), page.url.as_str().bright_white());
        eprintln!("  {} {}", "Kind:".dimmed(), format!("{:?}", page.kind).bright_white());
        if let Some(title) = page.document.title() {
            eprintln!("  {} {}", "Title:".dimmed(), title.bright_white());
        }
        eprintln!();
    }

    if !config.should_inject(page.kind) {
        bail!("Summarizer is disabled on front-end pages (show_on_frontend = false)");
    }

    if args.verbose {
        print_step(3, 3, "Summarizing");
    }

    let resolver = Resolver::with_defaults(&config.fetch_config(), config.deadline())?;
    let launcher: Box<dyn summarist_core::Launcher> =
        if args.dry_run { Box::new(PrintLauncher) } else { Box::new(BrowserLauncher) };
    let sink = PromptSink { echo: args.print_prompt, copy: !(args.dry_run || args.no_clipboard) };
    let summarizer = Summarizer::new(config, resolver, launcher, Box::new(sink), Box::new(TerminalNotifier));

    match summarizer.trigger(&page).await {
        Outcome::Delivered(delivery) => {
            if args.verbose {
                print_delivery_details(&delivery);
            }
            Ok(())
        }
        Outcome::Unavailable => bail!("No content found in {}", args.input),
        Outcome::PopupBlocked => bail!("Could not open the browser"),
        Outcome::Failed(reason) => bail!("Summarize failed: {}", reason),
        Outcome::Ignored => bail!("Another summarize action is still running"),
    }
}
