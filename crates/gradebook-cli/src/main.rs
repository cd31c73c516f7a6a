use anyhow::Result;
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use dotenvy::dotenv;
use gradebook_cli::seeder;
use gradebook_db::{init_db_pool, run_migrations};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gradebook-cli")]
#[command(about = "Gradebook CLI - database seeding and maintenance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the bundled schema migrations
    Migrate,
    /// Seed the database with fake students and grades
    Seed {
        /// Number of students to create
        #[arg(short = 'n', long, default_value = "25")]
        students: usize,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(env_filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    match cli.command {
        Commands::Migrate => {
            let pool = init_db_pool().await;
            run_migrations(&pool).await?;
            println!("Migrations applied");
        }
        Commands::Seed { students, yes } => {
            let confirmed = yes
                || Confirm::new()
                    .with_prompt(format!(
                        "Insert {} fake students into the configured database?",
                        students
                    ))
                    .default(false)
                    .interact()?;
            if !confirmed {
                println!("Aborted");
                return Ok(());
            }

            let pool = init_db_pool().await;
            run_migrations(&pool).await?;
            let inserted = seeder::seed_students(&pool, students).await?;
            println!("Seeded {} students", inserted);
        }
    }

    Ok(())
}
