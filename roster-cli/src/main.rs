use clap::Parser;
use roster_client::{RosterClient, User};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "roster", about = "Manage user records on a roster server")]
struct Cli {
    #[arg(short, long, env = "ROSTER_SERVER", default_value = "http://127.0.0.1:8080")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// List all users in insertion order
    List,
    Get {
        id: Uuid,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Replace a user's name and email
    Update {
        id: Uuid,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    Delete {
        id: Uuid,
    },
    /// Send a submission through the workflow relay
    Trigger {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
}

fn print_user(user: &User) {
    println!(
        "- [{}] {} <{}> (created {})",
        user.id,
        user.name,
        user.email,
        user.created_at.to_rfc3339()
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    let client = RosterClient::connect(&args.server)?;

    match args.command {
        Command::List => {
            let users = client.list_users().await?;
            println!("Users ({})", users.len());
            for user in &users {
                print_user(user);
            }
        }
        Command::Get { id } => {
            let user = client.get_user(id).await?;
            print_user(&user);
        }
        Command::Create { name, email } => {
            let user = client.create_user(&name, &email).await?;
            println!("User created! ID: {}", user.id);
        }
        Command::Update { id, name, email } => {
            let user = client.update_user(id, &name, &email).await?;
            print!("User updated: ");
            print_user(&user);
        }
        Command::Delete { id } => {
            client.delete_user(id).await?;
            println!("User deleted!");
        }
        Command::Trigger { name, email } => {
            let data = client.trigger_workflow(&name, &email).await?;
            println!("Workflow triggered: {}", serde_json::to_string_pretty(&data)?);
        }
    }

    Ok(())
}
