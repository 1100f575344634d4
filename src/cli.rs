//! Command line interface for the admin console

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::{de::DeserializeOwned, Serialize};

use eali_portal::api::{ApiClient, FileUpload};
use eali_portal::models::{
    ContactMessage, Language, LoginInput, NewsItem, Partner, PartnerType, Program, ProgramType,
    RegisterInput, Tender,
};
use eali_portal::services::{
    login_failure_message, registration_failure_message, AuthService, ContactService,
    ContentService, DashboardService, DocumentLink, HomeContent, NewsResource, Notifier,
    PartnerResource, ProgramResource, Resource, ResourceManager, TenderResource,
};

#[derive(Debug, Parser)]
#[command(name = "eali-admin", version, about = "Admin console for the EALI institutional website")]
pub struct Cli {
    /// Configuration file (defaults apply when it does not exist)
    #[arg(short, long, value_name = "PATH", default_value = "config.yml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session token
    Login {
        #[arg(long, value_name = "EMAIL")]
        email: String,
        /// Provide the password non-interactively; otherwise it is prompted
        #[arg(long, value_name = "PASSWORD")]
        password: Option<String>,
    },
    /// Forget the stored session token
    Logout,
    /// Create an administrator account
    Register {
        #[arg(long, value_name = "NAME")]
        username: String,
        #[arg(long, value_name = "EMAIL")]
        email: String,
    },
    /// Show whether a session token is stored
    Status,
    /// Manage news items
    News(ResourceArgs),
    /// Manage tenders
    Tenders(ResourceArgs),
    /// Manage partners
    Partners(ResourceArgs),
    /// Manage faculties and professional courses
    Programs(ResourceArgs),
    /// Print every public section as a visitor sees it
    Content {
        #[arg(long, default_value = "en")]
        lang: Language,
    },
    /// Print the full description of one program
    Program {
        id: i64,
        #[arg(long, default_value = "en")]
        lang: Language,
    },
    /// Send a message through the contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long)]
        message: String,
    },
    /// Show dashboard counters
    Stats,
    /// Resolve a stored document URL
    Document { url: String },
}

#[derive(Debug, Args)]
pub struct ResourceArgs {
    #[command(subcommand)]
    pub action: ResourceAction,
}

#[derive(Debug, Subcommand)]
pub enum ResourceAction {
    /// List the whole collection
    List {
        #[arg(long, default_value = "en")]
        lang: Language,
    },
    /// Create an item from a YAML form
    Create {
        /// YAML document with the form fields
        #[arg(long, value_name = "PATH")]
        form: PathBuf,
        /// Image (news) or PDF (tenders) to upload
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// Edit an item; fields in the YAML form replace the stored values
    Edit {
        id: i64,
        #[arg(long, value_name = "PATH")]
        form: Option<PathBuf>,
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// Delete an item
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

/// Prompts on the controlling terminal
pub struct TerminalNotifier {
    assume_yes: bool,
}

impl TerminalNotifier {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Notifier for TerminalNotifier {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{} [y/N] ", message);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(_) => false,
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("error: {}", message);
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// One-line rendering of a listed item
pub trait Listing {
    fn line(&self, lang: Language) -> String;
}

impl Listing for NewsItem {
    fn line(&self, lang: Language) -> String {
        format!("#{:<4} {}  [{}] {}", self.id, self.date, self.category, self.title(lang))
    }
}

impl Listing for Tender {
    fn line(&self, lang: Language) -> String {
        format!(
            "#{:<4} {} -> {}  {}",
            self.id,
            self.date_posted,
            self.deadline,
            self.title(lang)
        )
    }
}

impl Listing for Partner {
    fn line(&self, lang: Language) -> String {
        format!(
            "#{:<4} {:<13} {} ({})",
            self.id,
            self.kind.to_string(),
            self.name(lang),
            self.country(lang)
        )
    }
}

impl Listing for Program {
    fn line(&self, lang: Language) -> String {
        let options = self.options(lang);
        let mut line = format!(
            "#{:<4} {} {:<19} {}",
            self.id,
            self.icon().glyph(),
            self.kind.as_str(),
            self.name(lang)
        );
        if !options.is_empty() {
            line.push_str(&format!(" - {}", options.join(", ")));
        }
        line
    }
}

pub async fn run(command: Command, client: ApiClient) -> Result<()> {
    match command {
        Command::Login { email, password } => login(&client, email, password).await,
        Command::Logout => {
            AuthService::new(client).logout()?;
            println!("Signed out");
            Ok(())
        }
        Command::Register { username, email } => register(&client, username, email).await,
        Command::Status => {
            let session = client.session().snapshot();
            match (session.is_authenticated(), session.user) {
                (true, Some(user)) => println!("Signed in as {} <{}>", user.username, user.email),
                (true, None) => println!("Signed in"),
                (false, _) => println!("Not signed in"),
            }
            Ok(())
        }
        Command::News(args) => manage::<NewsResource>(client, args.action).await,
        Command::Tenders(args) => manage::<TenderResource>(client, args.action).await,
        Command::Partners(args) => manage::<PartnerResource>(client, args.action).await,
        Command::Programs(args) => manage::<ProgramResource>(client, args.action).await,
        Command::Content { lang } => content(client, lang).await,
        Command::Program { id, lang } => program(client, id, lang).await,
        Command::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let message = ContactMessage {
                name,
                email,
                subject,
                message,
            };
            ContactService::new(client).send(&message).await?;
            println!("Message sent");
            Ok(())
        }
        Command::Stats => {
            let stats = DashboardService::new(client).stats().await?;
            println!("News:           {}", stats.total_news);
            println!("Active tenders: {}", stats.active_tenders);
            println!("Partners:       {}", stats.partners);
            println!("Programs:       {}", stats.programs);
            Ok(())
        }
        Command::Document { url } => {
            document(&DocumentLink::resolve(&url, client.asset_origin()));
            Ok(())
        }
    }
}

async fn login(client: &ApiClient, email: String, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")?,
    };

    let auth = AuthService::new(client.clone());
    match auth.login(&LoginInput::new(email, password)).await {
        Ok(user) => {
            println!("Signed in as {}", user.username);
            Ok(())
        }
        Err(e) => {
            tracing::debug!(error = %e, "Login failed");
            bail!(login_failure_message(&e))
        }
    }
}

async fn register(client: &ApiClient, username: String, email: String) -> Result<()> {
    let password = rpassword::prompt_password("Password: ")?;
    let confirm = rpassword::prompt_password("Confirm password: ")?;

    let input = RegisterInput::new(username, email, password, confirm);
    match AuthService::new(client.clone()).register(&input).await {
        Ok(()) => {
            println!("Account created; sign in with `eali-admin login`");
            Ok(())
        }
        Err(e) => {
            tracing::debug!(error = %e, "Registration failed");
            bail!(registration_failure_message(&e))
        }
    }
}

async fn manage<R>(client: ApiClient, action: ResourceAction) -> Result<()>
where
    R: Resource,
    R::Item: Listing,
    R::Input: Serialize + DeserializeOwned,
{
    let assume_yes = matches!(action, ResourceAction::Delete { yes: true, .. });
    let notifier = Arc::new(TerminalNotifier::new(assume_yes));
    let mut manager = ResourceManager::<R>::mount(client, notifier).await?;

    match action {
        ResourceAction::List { lang } => {
            if manager.items().is_empty() {
                println!("No {} items", R::COLLECTION);
            }
            for item in manager.items() {
                println!("{}", item.line(lang));
            }
        }
        ResourceAction::Create { form, file } => {
            manager.open_create();
            let base = manager.modal().map(|m| m.input().clone()).unwrap_or_default();
            fill_form::<R>(&mut manager, &base, Some(&form), file.as_deref()).await?;
            manager.submit().await?;
            println!("Created {}", R::LABEL);
        }
        ResourceAction::Edit { id, form, file } => {
            if !manager.open_edit(id) {
                bail!("No {} with id {}", R::LABEL, id);
            }
            if let Some(current) = manager.modal().and_then(|m| m.current_file()) {
                println!("Current file: {}", current);
            }
            let base = manager.modal().map(|m| m.input().clone()).unwrap_or_default();
            fill_form::<R>(&mut manager, &base, form.as_deref(), file.as_deref()).await?;
            manager.submit().await?;
            println!("Updated {} {}", R::LABEL, id);
        }
        ResourceAction::Delete { id, .. } => {
            if manager.delete(id).await? {
                println!("Deleted {} {}", R::LABEL, id);
            }
        }
    }
    Ok(())
}

async fn fill_form<R>(
    manager: &mut ResourceManager<R>,
    base: &R::Input,
    form: Option<&Path>,
    file: Option<&Path>,
) -> Result<()>
where
    R: Resource,
    R::Input: Serialize + DeserializeOwned,
{
    if let Some(path) = form {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read form '{}'", path.display()))?;
        let filled = overlay(base, &text)
            .with_context(|| format!("Invalid form '{}'", path.display()))?;
        let input = manager
            .input_mut()
            .ok_or_else(|| anyhow!("No form is open"))?;
        *input = filled;
    }

    if let Some(path) = file {
        let upload = FileUpload::from_path(path).await?;
        manager.attach_file(Some(upload))?;
    }
    Ok(())
}

/// Replace the fields of `base` with those present in the YAML document.
fn overlay<I>(base: &I, yaml: &str) -> Result<I>
where
    I: Serialize + DeserializeOwned,
{
    let mut merged = serde_yaml::to_value(base)?;
    let fields: serde_yaml::Value = serde_yaml::from_str(yaml)?;

    match (&mut merged, fields) {
        (serde_yaml::Value::Mapping(target), serde_yaml::Value::Mapping(fields)) => {
            for (key, value) in fields {
                target.insert(key, value);
            }
        }
        (_, serde_yaml::Value::Null) => {}
        _ => bail!("expected a mapping of form fields"),
    }

    Ok(serde_yaml::from_value(merged)?)
}

async fn content(client: ApiClient, lang: Language) -> Result<()> {
    let home = HomeContent::load(&ContentService::new(client)).await;

    section("News", home.news_or_empty(), lang);
    section("Tenders", home.tenders_or_empty(), lang);
    section(
        "National partners",
        home.partners_or_empty(PartnerType::National),
        lang,
    );
    section(
        "International partners",
        home.partners_or_empty(PartnerType::International),
        lang,
    );
    section("Faculties", home.programs_or_empty(ProgramType::Faculty), lang);
    section(
        "Professional courses",
        home.programs_or_empty(ProgramType::ProfessionalCourse),
        lang,
    );
    Ok(())
}

fn section<T: Listing>(title: &str, items: &[T], lang: Language) {
    println!("== {} ({})", title, items.len());
    for item in items {
        println!("{}", item.line(lang));
    }
    println!();
}

async fn program(client: ApiClient, id: i64, lang: Language) -> Result<()> {
    let details = ContentService::new(client).program_details(id).await?;

    println!("{} {}", details.program.icon().glyph(), details.program.name(lang));
    let rows = [
        ("Description", details.description(lang)),
        ("Degree", details.degree(lang)),
        ("Duration", details.duration.as_deref().unwrap_or_default()),
        ("Admission", details.admission_requirements(lang)),
        ("Careers", details.career_opportunities(lang)),
    ];
    for (label, value) in rows {
        if !value.is_empty() {
            println!("{:<12} {}", format!("{}:", label), value);
        }
    }
    for option in details.program.options(lang) {
        println!("  - {}", option);
    }
    Ok(())
}

fn document(link: &DocumentLink) {
    if let Some(explanation) = link.explanation() {
        println!("{}", explanation);
    }
    if let (Some(url), Some(viewer), Some(name)) =
        (link.url(), link.viewer_url(), link.download_name())
    {
        println!("URL:      {}", url);
        println!("Viewer:   {}", viewer);
        println!("Download: {}", name);
    }
}
