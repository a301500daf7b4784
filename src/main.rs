use clap::{Parser, Subcommand};
use simple_site::{config, generate, output, scan};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    if env!("ON_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("GIT_HASH") {
        "" => "dev@unknown",
        // Leaked once at startup
        hash => Box::leak(format!("dev@{hash}").into_boxed_str()),
    }
}

#[derive(Parser)]
#[command(name = "simple-site")]
#[command(about = "Static site builder for markdown content collections")]
#[command(long_about = "\
Static site builder for markdown content collections

Markdown files with YAML front-matter are grouped into collections. Pages
opt into the navigation menu from their front-matter.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── public/                      # Static assets → copied to output root
  ├── pages/                       # Routed at /<slug>
  │   ├── index.md                 # → /
  │   ├── about.md                 # → /about
  │   └── about/team.md            # → /about/team
  └── blog/                        # Routed at /blog/<slug>, with a listing
      └── first-post.md

Navigation front-matter:
  nav: true          Show the page in the menu
  navTitle: About    Menu label (defaults to title)
  navOrder: 30       Lower sorts first (default 999)
  navParent: about   Nest under the top-level item with this path or label

Run 'simple-site gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".simple-site-temp", global = true)]
    temp_dir: PathBuf,

    /// Log progress at info level (otherwise RUST_LOG applies)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the HTML site from the manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content directory without building
    Check,
    /// Print the navigation menu
    Nav {
        /// Print as JSON instead of a tree
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let pages = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&pages);
        }
        Command::Build => {
            std::fs::create_dir_all(&cli.temp_dir)?;

            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let manifest_path = write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let pages = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&pages);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::Nav { json } => {
            let manifest = scan::scan(&cli.source)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&manifest.navigation)?);
            } else {
                output::print_nav_tree(&manifest.navigation, manifest.config.nav.default_order);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Write the scan manifest as pretty JSON and return its path.
fn write_manifest(manifest: &scan::Manifest, temp_dir: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(temp_dir)?;
    let manifest_path = temp_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(manifest).map_err(std::io::Error::other)?;
    std::fs::write(&manifest_path, json)?;
    Ok(manifest_path)
}
