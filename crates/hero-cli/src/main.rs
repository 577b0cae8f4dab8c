use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use hero_store::{
    Hero, HeroId, HeroService, HeroStore, HeroStoreResult, MemoryHeroStore, MessageService,
    NewHero,
};
use hero_store_http::{HeroApiConfig, HttpHeroStore};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "hero-cli")]
#[command(about = "Query and edit a hero collection")]
struct Cli {
    #[arg(long, value_enum, default_value_t = Backend::Memory, global = true)]
    backend: Backend,
    /// Overrides HEROES_API_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Overrides HEROES_API_COLLECTION.
    #[arg(long, global = true)]
    collection: Option<String>,
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    List,
    Get(GetArgs),
    Search(SearchArgs),
    Add(AddArgs),
    Update(UpdateArgs),
    Delete(DeleteArgs),
    /// Create, read, rename, and delete one hero, printing every step.
    Walkthrough(WalkthroughArgs),
}

#[derive(clap::Args, Debug)]
struct GetArgs {
    id: HeroId,
    /// Look the hero up through the `?id=` filter instead of its path.
    #[arg(long, action = ArgAction::SetTrue)]
    filter: bool,
}

#[derive(clap::Args, Debug)]
struct SearchArgs {
    term: String,
}

#[derive(clap::Args, Debug)]
struct AddArgs {
    name: String,
}

#[derive(clap::Args, Debug)]
struct UpdateArgs {
    id: HeroId,
    name: String,
}

#[derive(clap::Args, Debug)]
struct DeleteArgs {
    id: HeroId,
}

#[derive(clap::Args, Debug)]
struct WalkthroughArgs {
    #[arg(long, default_value = "Mx")]
    name: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Backend {
    Memory,
    Http,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let messages = MessageService::new();
    let result = match cli.backend {
        Backend::Memory => {
            let service = HeroService::new(
                MemoryHeroStore::with_fixture(),
                Arc::new(messages.clone()),
            );
            run_command(&service, cli.command, cli.json).await
        }
        Backend::Http => match connect_http(cli.base_url, cli.collection) {
            Ok(store) => {
                let service = HeroService::new(store, Arc::new(messages.clone()));
                run_command(&service, cli.command, cli.json).await
            }
            Err(error) => Err(error.to_string()),
        },
    };

    print_messages(&messages);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn connect_http(
    base_url: Option<String>,
    collection: Option<String>,
) -> HeroStoreResult<HttpHeroStore<hero_store_http::ReqwestTransport>> {
    let mut config = HeroApiConfig::from_env();
    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    if let Some(collection) = collection {
        config.collection = collection;
    }
    tracing::debug!(
        base_url = %config.base_url,
        collection = %config.collection,
        "connecting hero api"
    );
    HttpHeroStore::connect(&config)
}

async fn run_command<S: HeroStore>(
    service: &HeroService<S>,
    command: Commands,
    json: bool,
) -> Result<(), String> {
    match command {
        Commands::List => {
            // an unreachable store lists as empty; the failure shows in the message log
            let heroes = service.heroes().await.unwrap_or_default();
            print_heroes(&heroes, json)
        }
        Commands::Get(args) => {
            let hero = if args.filter {
                service.find_hero(args.id).await
            } else {
                service.hero(args.id).await
            }
            .map_err(|error| error.to_string())?;
            match hero {
                Some(hero) => print_heroes(std::slice::from_ref(&hero), json),
                None => {
                    println!("no hero with id={}", args.id);
                    Ok(())
                }
            }
        }
        Commands::Search(args) => {
            let heroes = service.search_heroes(&args.term).await.unwrap_or_default();
            print_heroes(&heroes, json)
        }
        Commands::Add(args) => {
            let hero = service
                .add_hero(NewHero::new(args.name))
                .await
                .map_err(|error| error.to_string())?;
            print_heroes(std::slice::from_ref(&hero), json)
        }
        Commands::Update(args) => service
            .update_hero(&Hero::new(args.id, args.name))
            .await
            .map_err(|error| error.to_string()),
        Commands::Delete(args) => service
            .delete_hero(args.id)
            .await
            .map_err(|error| error.to_string()),
        Commands::Walkthrough(args) => walkthrough(service, args.name, json)
            .await
            .map_err(|error| error.to_string()),
    }
}

async fn walkthrough<S: HeroStore>(
    service: &HeroService<S>,
    name: String,
    json: bool,
) -> HeroStoreResult<()> {
    let created = service.add_hero(NewHero::new(name)).await?;
    println!("created: {}", describe(Some(&created), json));

    let fetched = service.hero(created.id).await?;
    println!("fetched: {}", describe(fetched.as_ref(), json));

    let renamed = Hero::new(created.id, format!("{}2", created.name));
    service.update_hero(&renamed).await?;
    let fetched = service.hero(created.id).await?;
    println!("renamed: {}", describe(fetched.as_ref(), json));

    service.delete_hero(&created).await?;
    let fetched = service.hero(created.id).await?;
    println!("deleted: {}", describe(fetched.as_ref(), json));
    Ok(())
}

fn describe(hero: Option<&Hero>, json: bool) -> String {
    match (hero, json) {
        (Some(hero), true) => serde_json::to_string(hero).unwrap_or_else(|_| hero.name.clone()),
        (Some(hero), false) => format!("{}\t{}", hero.id, hero.name),
        (None, _) => "<absent>".to_string(),
    }
}

fn print_heroes(heroes: &[Hero], json: bool) -> Result<(), String> {
    if json {
        let encoded = serde_json::to_string(heroes).map_err(|error| error.to_string())?;
        println!("{encoded}");
        return Ok(());
    }
    for hero in heroes {
        println!("{}\t{}", hero.id, hero.name);
    }
    Ok(())
}

fn print_messages(messages: &MessageService) {
    for message in messages.messages() {
        eprintln!("{message}");
    }
}
