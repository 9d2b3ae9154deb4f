use clap::{Args, Parser, Subcommand};
use laundry_site::contact::{ContactForm, ContactSubmitter, Field, SubmitPolicy};
use laundry_site::security::storage::{DEV_NOTICE_DISMISSED_KEY, SecureStore};
use laundry_site::whatsapp::{self, LinkBuilder, NavigationError, Navigator, OpenOptions};
use laundry_site::{config, content, generate, logging, output};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "laundry-site")]
#[command(about = "Static site generator for a laundry shop landing page")]
#[command(long_about = "\
Static site generator for a laundry shop landing page

Builds a single page with services, pricing, FAQ and a contact form. Every
button hands the visitor to WhatsApp with a prefilled message; the number,
texts and links are sanitized and checked against an allow-list at build time.

Content structure:

  content/
  ├── config.toml      # Business details, contact limits, colors, logging
  ├── content.toml     # Page copy: services, pricing, FAQ, gallery...
  └── assets/          # Copied verbatim to the output root

Both files are optional; stock values are used for anything left out.
LAUNDRY_* environment variables override business details.

Run 'laundry-site gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// File holding persisted CLI state (dismissed notices)
    #[arg(long, default_value = ".laundry-site/state.json", global = true)]
    state: PathBuf,

    /// Development mode: report log messages hidden by logging.suppress
    #[arg(long, global = true)]
    dev: bool,

    #[command(subcommand)]
    command: Command,
}

/// Which chat link to build.
#[derive(Args)]
#[group(multiple = false)]
struct LinkArgs {
    /// Link asking to order a service (id or title)
    #[arg(long)]
    service: Option<String>,

    /// Link asking about a pricing plan (id or name)
    #[arg(long)]
    plan: Option<String>,

    /// Link with a custom message
    #[arg(long)]
    message: Option<String>,
}

#[derive(Args)]
struct ContactArgs {
    /// Visitor name
    #[arg(long, default_value = "")]
    name: String,

    /// Visitor phone, local (08…) or international
    #[arg(long, default_value = "")]
    phone: String,

    /// Email address
    #[arg(long, default_value = "")]
    email: String,

    /// Message body, at least 10 characters
    #[arg(long, default_value = "")]
    message: String,
}

#[derive(Subcommand)]
enum Command {
    /// Render the site into the output directory
    Build,
    /// Validate config and content without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Build a click-to-chat link and open it
    Link(LinkArgs),
    /// Run the contact form flow with the given field values
    Contact(ContactArgs),
    /// Stop showing the development notice
    DismissNotice,
}

/// Navigator for a terminal: prints the link instead of opening a browser.
struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn open(&self, url: &str, options: OpenOptions) -> Result<(), NavigationError> {
        for line in output::format_open(url, options) {
            println!("{}", line);
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let mut site_config = config::load_config(&cli.source)?;
    if cli.dev {
        site_config.logging.dev = true;
    }
    let suppressed = logging::init_logging(&site_config.logging);

    let result = run(&cli, &site_config);

    if site_config.logging.dev {
        show_dev_notice(&cli.state, suppressed.get());
    }
    result
}

fn run(cli: &Cli, site_config: &config::SiteConfig) -> Result<(), Box<dyn std::error::Error>> {
    let business = &site_config.business;

    match &cli.command {
        Command::Build => {
            let site_content = content::load_content(&cli.source)?;
            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let report = generate::generate(site_config, &site_content, &cli.source, &cli.output)?;
            output::print_build_output(&report, &site_content);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site_content = content::load_content(&cli.source)?;
            let lines = output::format_check_output(site_config, &site_content);
            let passed = lines.last().is_some_and(|l| l == "All checks passed");
            for line in lines {
                println!("{}", line);
            }
            if !passed {
                return Err("check failed".into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Link(args) => {
            let builder = LinkBuilder::new(&business.whatsapp_number, &business.country_code);
            let url = if let Some(service) = &args.service {
                let site_content = content::load_content(&cli.source)?;
                let title = site_content
                    .find_service(service)
                    .map_or(service.as_str(), |s| s.title.as_str());
                builder.service_link(title)?
            } else if let Some(plan) = &args.plan {
                let site_content = content::load_content(&cli.source)?;
                let name = site_content
                    .find_plan(plan)
                    .map_or(plan.as_str(), |p| p.name.as_str());
                builder.pricing_link(name)?
            } else {
                builder.generate_link(args.message.as_deref())?
            };
            whatsapp::open_whatsapp(&url, &PrintNavigator)?;
        }
        Command::Contact(args) => {
            let mut form = ContactForm::new(&business.country_code);
            form.set_field(Field::Name, &args.name);
            form.set_field(Field::Phone, &args.phone);
            form.set_field(Field::Email, &args.email);
            form.set_field(Field::Message, &args.message);

            let builder = LinkBuilder::new(&business.whatsapp_number, &business.country_code);
            let mut submitter =
                ContactSubmitter::new(builder, SubmitPolicy::from(&site_config.contact));
            let outcome = submitter.submit(&mut form, &PrintNavigator);
            output::print_submit_outcome(&outcome);
            if !outcome.is_sent() {
                return Err("contact message was not sent".into());
            }
        }
        Command::DismissNotice => {
            let mut store = SecureStore::open(&cli.state);
            store.set(DEV_NOTICE_DISMISSED_KEY, "true")?;
            println!("Development notice dismissed ({})", store.path().display());
        }
    }

    Ok(())
}

/// Print the development notice once per run, unless dismissed.
fn show_dev_notice(state: &Path, suppressed: usize) {
    if suppressed == 0 {
        return;
    }
    let mut store = SecureStore::open(state);
    if store.flag(DEV_NOTICE_DISMISSED_KEY) {
        return;
    }
    for line in output::format_dev_notice(suppressed) {
        eprintln!("{}", line);
    }
}
