//! Basic example demonstrating the Enginn API client.
//!
//! Run with:
//! ```
//! ENGINN_API_TOKEN=your-token cargo run --example basic
//! ```

use enginn::EnginnClient;

#[tokio::main]
async fn main() -> enginn::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Enginn client...");
    let client = EnginnClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // List first page of projects
    println!("\n--- Listing Projects (first page) ---");
    let mut projects = client.projects().per(10).page(1);
    projects.fetch().await?;
    println!(
        "Found {} projects (total: {:?})",
        projects.items().len(),
        projects.pagination().count
    );

    for project in projects.items() {
        println!("  - {:?} ({:?})", project.name(), project.uid());
    }

    // Walk the characters of the first project
    if let Some(project) = projects.items().first() {
        println!("\n--- Characters of {:?} ---", project.name());
        let mut characters = project.characters().per(50);
        let mut cursor = characters.iter();
        while let Some(character) = cursor.next().await {
            let character = character?;
            let mut takes = character.takes().per(1).page(1);
            takes.fetch().await?;
            println!(
                "  - {:?}: {} takes",
                character.name(),
                takes.pagination().count.unwrap_or(0)
            );
        }

        // Quiet variants record failures instead of returning them
        let mut missing = project.character(0);
        if !missing.fetch_quietly().await {
            println!("\nExpected failure: {}", missing.errors()[0]);
        }
    }

    println!("\nDone!");
    Ok(())
}
