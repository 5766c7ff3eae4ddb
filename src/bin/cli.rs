use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use learnhub::cli::create_admin;

#[derive(Parser)]
#[command(name = "learnhub-cli")]
#[command(about = "Learnhub CLI - Administrative tools for Learnhub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        /// First name of the admin
        #[arg(short = 'f', long)]
        first_name: String,

        /// Last name of the admin
        #[arg(short = 'l', long)]
        last_name: String,

        /// Email address
        #[arg(short = 'e', long)]
        email: String,

        /// Password
        #[arg(short = 'p', long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateAdmin {
            first_name,
            last_name,
            email,
            password,
        } => match create_admin(&pool, &first_name, &last_name, &email, &password).await {
            Ok(_) => {
                println!("✅ Admin created successfully!");
                println!("   Email: {}", email);
                println!("   Name: {} {}", first_name, last_name);
            }
            Err(e) => {
                eprintln!("❌ Error creating admin: {}", e);
                std::process::exit(1);
            }
        },
    }
}
