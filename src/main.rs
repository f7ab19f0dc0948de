use clap::{Parser, Subcommand};
use nestgen::{config, output, pipeline};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nestgen")]
#[command(about = "Static site generator for The Nest and its film gallery")]
#[command(long_about = "\
Static site generator for The Nest and its film gallery

HTML fragments are stitched into complete pages, every directory of film
images becomes a gallery page, the stylesheet is compiled and static assets
are mirrored with images recompressed.

Project structure:

  site.toml                          # Optional config (see gen-config)
  src/
  ├── templates/
  │   ├── base.html                  # {{PAGE_TITLE}} + header/content/footer containers
  │   ├── header.html
  │   ├── header-film.html
  │   └── footer.html
  ├── content/
  │   ├── index-content.html         # → dist/index.html
  │   └── film/info-content.html     # → dist/film/info.html (film header)
  └── static/
      ├── sass/main.scss             # → dist/static/css/main.css
      └── img/film/
          ├── 1a.jpg  1b.jpg         # root collection → dist/film/root.html + index.html
          └── 2023/1a.jpg            # → dist/film/2023.html

Images named <digits>a / <digits>b are shown as a primary with a hover image.

Run 'nestgen gen-config' to generate a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Project root containing site.toml and src/
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Build the site into the output directory (default)
    Build,
    /// Print discovered content pages and image collections as JSON
    Scan,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let site_config = config::load_config(&cli.root)?;
            let report = pipeline::build(&cli.root, &site_config)?;
            output::print_build_report(&report);
        }
        Command::Scan => {
            let site_config = config::load_config(&cli.root)?;
            let summary = pipeline::scan_site(&cli.root, &site_config)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }
    Ok(())
}
